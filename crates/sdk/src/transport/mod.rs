//! Transport layer for the Pixabay SDK.

pub mod http;

pub use http::HttpTransport;
