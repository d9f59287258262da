// jlcparts-query - the JLCPCB parts catalog as agent tools
// This is the library root that exposes the public API

pub mod catalog;
pub mod config;
pub mod error;
pub mod mcp;
pub mod query;
pub mod render;
pub mod tools;

// Re-export commonly used types for convenience
pub use catalog::Catalog;
pub use config::{Config, RunMode};
pub use error::{CatalogError, CatalogResult};
pub use mcp::McpServer;
pub use query::{PartSearch, QueryService};
pub use tools::Tool;
