/*
[INPUT]:  Contract symbol (e.g., "SOL_USDT")
[OUTPUT]: Market data (klines, ticker price, contract detail)
[POS]:    Examples - public market data queries
[UPDATE]: When adding new market data endpoints
*/

use mexc_futures_adapter::*;

/// Example: Query market data (no signature required)
///
/// Kline, ticker and detail endpoints are public; credentials are optional.
#[tokio::main]
async fn main() {
    println!("=== MEXC Futures Market Data Example ===\n");

    let client = match MexcClient::new() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ HTTP client created (public-only)\n");

    let symbol = "SOL_USDT";

    println!("Fetching {} klines for {}...", DEFAULT_KLINE_LIMIT, symbol);
    match client
        .fetch_ohlcv(symbol, Interval::Min15, DEFAULT_KLINE_LIMIT)
        .await
    {
        Ok(FetchOutcome::Data(table)) => {
            println!("✓ {} rows", table.len());
            if let Some(last) = table.last() {
                println!("  last candle {} close {}", last.time, last.close);
            }
        }
        Ok(FetchOutcome::NoData) => println!("✗ No data for {}", symbol),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nFetching ticker for {}...", symbol);
    match client.fetch_ticker_price(symbol).await {
        Ok(price) => println!("✓ Last price: {}", price),
        Err(e) => println!("✗ Price unavailable: {}", e),
    }

    println!("\nFetching contract detail for {}...", symbol);
    let detail = client.fetch_symbol_info_or_empty(Some(symbol)).await;
    println!("✓ Detail: {}", detail.as_value());

    println!("\n✓ Market data example complete");
}
