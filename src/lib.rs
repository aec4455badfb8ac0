//! Rule-based HTTP reverse proxy library.
//!
//! Requests are matched against an ordered list of regular-expression rules;
//! the first match is forwarded to that rule's upstream and the upstream body
//! is streamed back. Unmatched requests get a 404.

pub mod cli;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
