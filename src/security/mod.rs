//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request headers:
//!     → headers.rs (allow-list or permissive copy, Host rewrite)
//!     → Forwarder
//!
//! Upstream response headers:
//!     → headers.rs (allow-list or permissive copy)
//!     → Response assembler
//! ```
//!
//! # Design Decisions
//! - Strict by default: cookies and client metadata never reach upstreams
//! - Policy is configuration, not code

pub mod headers;

pub use headers::HeaderFilter;
