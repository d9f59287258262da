// Query module - builds, checks and runs the catalog lookups
pub mod filter;
pub mod guard;
pub mod service;

pub use filter::{PartSearch, Predicates};
pub use service::QueryService;
