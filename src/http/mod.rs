//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, catch-all handler)
//!     → [routing layer picks the first matching rule]
//!     → request.rs (rewrite URL, copy headers, pass body through)
//!     → forward.rs (single upstream attempt)
//!     → response.rs (200 relay / 500 error / 404)
//!     → Send to client
//! ```

pub mod forward;
pub mod request;
pub mod response;
pub mod server;

pub use forward::{ForwardError, Forwarder};
pub use response::Outcome;
pub use server::HttpServer;
