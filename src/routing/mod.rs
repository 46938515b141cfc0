//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → router.rs (ordered route lookup)
//!     → matcher.rs (whole-segment prefix test)
//!     → Return: RouteMatch or None
//!
//! Route Compilation (at startup):
//!     RouteConfig[] (declaration order)
//!     → Compile prefix matchers
//!     → Report shadowed prefixes
//!     → Freeze as immutable RouteTable behind an Arc
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always matches same route
//! - First match wins (declaration order, no priorities)

pub mod matcher;
pub mod router;

pub use router::{Route, RouteMatch, RouteTable, Shadowed};
