/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod error;
pub mod params;
pub mod public;
pub mod signature;

pub use error::{MexcError, Result};
pub use params::RequestParams;
pub use signature::RequestSigner;

pub use client::{API_KEY_HEADER, BASE_URL, ClientConfig, MexcClient};
pub use public::{DEFAULT_KLINE_LIMIT, DETAIL_ENDPOINT, KLINE_ENDPOINT, TICKER_ENDPOINT};
