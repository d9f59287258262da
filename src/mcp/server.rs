// MCP server
// Reads JSON-RPC messages, answers the MCP lifecycle methods and routes
// tools/call onto the tool catalog

use super::protocol::{
    CallToolParams, CallToolResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
    INVALID_PARAMS, INVALID_REQUEST, JSONRPC_VERSION, MCP_PROTOCOL_VERSION, METHOD_NOT_FOUND,
    PARSE_ERROR, SERVER_NAME,
};
use super::transport::StdioTransport;
use crate::query::QueryService;
use crate::tools::{self, Tool};
use serde_json::{json, Value};
use std::io::{self, BufRead, Write};
use tracing::{debug, info, warn};

pub struct McpServer {
    service: QueryService,
}

impl McpServer {
    pub fn new(service: QueryService) -> Self {
        Self { service }
    }

    /// Serve requests until the client closes its end
    pub fn run<R: BufRead, W: Write>(&self, transport: &mut StdioTransport<R, W>) -> io::Result<()> {
        info!(server = SERVER_NAME, protocol = MCP_PROTOCOL_VERSION, "MCP server ready");

        while let Some(line) = transport.read_message()? {
            if let Some(response) = self.handle_message(&line) {
                let encoded = serde_json::to_string(&response)?;
                transport.write_message(&encoded)?;
            }
        }

        info!("client closed the connection");
        Ok(())
    }

    /// Handle one raw message; `None` means nothing is sent back
    pub fn handle_message(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    JsonRpcError::new(PARSE_ERROR, format!("Parse error: {}", e)),
                ))
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                return Some(JsonRpcResponse::failure(
                    id,
                    JsonRpcError::new(INVALID_REQUEST, format!("Invalid request: {}", e)),
                ))
            }
        };

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::failure(
                id,
                JsonRpcError::new(INVALID_REQUEST, "jsonrpc must be \"2.0\""),
            ));
        }

        self.handle_request(request)
    }

    pub fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!(method = %request.method, "request");

        let Some(id) = request.id else {
            // initialized, cancelled, ... need no answer
            return None;
        };

        let outcome = match request.method.as_str() {
            "initialize" => Ok(self.initialize()),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": tools::definitions() })),
            "tools/call" => self.call_tool(request.params),
            other => Err(JsonRpcError::new(
                METHOD_NOT_FOUND,
                format!("Method not found: {}", other),
            )),
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }

    fn initialize(&self) -> Value {
        json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "capabilities": {
                "tools": { "listChanged": false }
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            }
        })
    }

    fn call_tool(&self, params: Value) -> Result<Value, JsonRpcError> {
        let params: CallToolParams = serde_json::from_value(params)
            .map_err(|e| JsonRpcError::new(INVALID_PARAMS, format!("Invalid params: {}", e)))?;

        let tool = Tool::from_name(&params.name).ok_or_else(|| {
            JsonRpcError::new(INVALID_PARAMS, format!("Unknown tool: {}", params.name))
        })?;

        let result = match tool.call(&self.service, params.arguments) {
            Ok(Some(text)) => CallToolResult::text(text),
            Ok(None) => CallToolResult::empty(),
            Err(e) => {
                warn!(tool = tool.name(), error = %e, "tool call failed");
                CallToolResult::error(e.to_string())
            }
        };

        serde_json::to_value(result)
            .map_err(|e| JsonRpcError::new(INVALID_PARAMS, format!("Unencodable result: {}", e)))
    }
}
