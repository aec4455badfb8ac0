//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (raw path + query)
//!     → router.rs (ordered scan)
//!     → matcher.rs (regex search)
//!     → Return: matched Rule or NoMatch
//!
//! Rule Compilation (at startup):
//!     RuleConfig[]
//!     → rules.rs (compile patterns, validate upstream bases)
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Rules compiled at startup, immutable at runtime
//! - Deterministic: same input always matches same rule
//! - First match wins (declaration order)

pub mod matcher;
pub mod router;
pub mod rules;

pub use router::{request_target, Router};
pub use rules::{Rule, RuleSet, RuleSetError, UpstreamBaseError};
