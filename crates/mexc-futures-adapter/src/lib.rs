/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public MEXC futures adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{API_KEY_ENV, API_SECRET_ENV, Credentials};

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    DEFAULT_KLINE_LIMIT,
    MexcClient,
    MexcError,
    RequestParams,
    RequestSigner,
    Result,
};

// Re-export all types
pub use types::*;
