// MCP module - exposes the catalog tools to an agent over stdio
//
// Messages are JSON-RPC 2.0, one per line. Only the tools capability is
// implemented: initialize, ping, tools/list and tools/call.

pub mod protocol;
pub mod server;
pub mod transport;

pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, MCP_PROTOCOL_VERSION};
pub use server::McpServer;
pub use transport::StdioTransport;
