/*
[INPUT]:  Environment-provided API key and secret
[OUTPUT]: Credentials for header auth and request signing
[POS]:    Auth layer - handles MEXC API credentials
[UPDATE]: When credential sources change
*/

pub mod credentials;

pub use credentials::{API_KEY_ENV, API_SECRET_ENV, Credentials};
