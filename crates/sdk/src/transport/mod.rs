//! Transport layer for the Higgsfield SDK.

pub mod http;

pub use http::HttpTransport;
