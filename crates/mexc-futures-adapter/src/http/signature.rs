/*
[INPUT]:  Ordered request parameters and the API secret
[OUTPUT]: Lowercase hex HMAC-SHA256 signatures
[POS]:    HTTP layer - request signing for authenticated endpoints
[UPDATE]: When changing signing algorithm or parameter encoding
*/

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::auth::Credentials;
use crate::http::params::RequestParams;

type HmacSha256 = Hmac<Sha256>;

/// Signs request parameters with the account secret
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: Credentials,
}

impl RequestSigner {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Sign the URL-encoded form of `params`
    ///
    /// Key order matters: the exchange verifies against the same encoding.
    pub fn sign(&self, params: &RequestParams) -> String {
        self.sign_payload(&params.to_query_string())
    }

    /// Sign a pre-encoded payload
    pub fn sign_payload(&self, payload: &str) -> String {
        // HMAC accepts keys of any length
        let mut mac = HmacSha256::new_from_slice(self.credentials.api_secret())
            .expect("HMAC can take key of any size");
        mac.update(payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> RequestSigner {
        RequestSigner::new(Credentials::new("test_key", "test_secret"))
    }

    #[test]
    fn test_sign_known_vector() {
        let params = RequestParams::new()
            .with("symbol", "SOL_USDT")
            .with("interval", "Min15")
            .with("limit", 300)
            .with("timestamp", 1_700_000_000_000_i64);

        assert_eq!(
            signer().sign(&params),
            "ae5a1cb230e4d0adbac64ca782d563b4a34d65a1f756d2ed1abc786591e3dca8"
        );
    }

    #[test]
    fn test_sign_empty_params() {
        assert_eq!(
            signer().sign(&RequestParams::new()),
            "f7f9bd47fb987337b5796fdc1fdb9ba221d0d5396814bfcaf9521f43fd8927fd"
        );
    }

    #[test]
    fn test_sign_is_deterministic() {
        let params = RequestParams::new().with("symbol", "BTC_USDT").with("vol", 2);
        assert_eq!(signer().sign(&params), signer().sign(&params));
    }

    #[test]
    fn test_sign_changes_with_value_order_and_timestamp() {
        let base = RequestParams::new().with("symbol", "BTC_USDT").with("vol", 2);
        let changed_value = RequestParams::new().with("symbol", "BTC_USDT").with("vol", 3);
        let reordered = RequestParams::new().with("vol", 2).with("symbol", "BTC_USDT");
        let with_timestamp = base.clone().with("timestamp", 1_700_000_000_000_i64);

        let sig = signer().sign(&base);
        assert_ne!(sig, signer().sign(&changed_value));
        assert_ne!(sig, signer().sign(&reordered));
        assert_ne!(sig, signer().sign(&with_timestamp));
    }

    #[test]
    fn test_signature_is_lowercase_hex() {
        let sig = signer().sign(&RequestParams::new().with("symbol", "SOL_USDT"));
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }
}
