// MCP server: JSON-RPC dispatch over newline-delimited stdio

use crate::envelope::ToolFailure;
use crate::framing::{Incoming, MessageCodec};
use crate::protocol::*;
use crate::resources::{higgsfield_resources, ResourceRegistry};
use crate::tools::{higgsfield_tools, ToolRegistry};
use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use higgsfield_sdk::HiggsfieldClient;
use serde::Serialize;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};
use tracing::{debug, info, warn};

pub const SERVER_NAME: &str = "higgsfield";

pub const INSTRUCTIONS: &str = "\
Access to Higgsfield image and video generation.

- generate_image: text-to-image with the Soul model, optional style and character
- generate_video: animate an image with a motion preset (DoP model)
- generate_talking_head: make a portrait speak an audio track
- create_character / list_characters: reusable identity references

Every generation is asynchronous. The generate_* tools return a job_set_id; poll
get_generation_status until the jobs complete. Results are kept for 7 days.
Browse higgsfield://styles, higgsfield://motions and higgsfield://characters for IDs.";

pub struct McpServer {
    tools: ToolRegistry,
    resources: ResourceRegistry,
}

impl McpServer {
    pub fn new(tools: ToolRegistry, resources: ResourceRegistry) -> Self {
        Self { tools, resources }
    }

    /// Server exposing every Higgsfield tool and resource through `client`.
    pub fn for_client(client: Arc<HiggsfieldClient>) -> Self {
        Self::new(higgsfield_tools(client.clone()), higgsfield_resources(client))
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn resources(&self) -> &ResourceRegistry {
        &self.resources
    }

    /// Serve requests from stdin, writing responses to stdout.
    pub async fn start(&self) -> Result<()> {
        info!(
            tools = self.tools.len(),
            resources = self.resources.len(),
            "MCP server listening on stdio"
        );
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve one JSON-RPC message per line until the reader closes.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = FramedRead::new(reader, MessageCodec::new());
        let mut sink = FramedWrite::new(writer, LinesCodec::new());

        while let Some(frame) = lines.next().await {
            let response = match frame.context("Failed to read from input")? {
                Incoming::Message(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    self.handle_line(line).await
                }
                Incoming::Malformed(reason) => {
                    warn!(reason, "Unreadable message");
                    encode(&JsonRpcResponse::error(
                        serde_json::Value::Null,
                        JsonRpcError::parse_error(),
                    ))
                }
            };

            if let Some(response) = response {
                sink.send(response)
                    .await
                    .context("Failed to write response")?;
            }
        }

        info!("Input closed, MCP server shutting down");
        Ok(())
    }

    /// Handle one raw message; `None` when no reply is due.
    pub async fn handle_line(&self, line: &str) -> Option<String> {
        let response = match serde_json::from_str::<JsonRpcRequest>(line) {
            Ok(request) => self.handle_request(request).await?,
            Err(e) => {
                warn!(error = %e, "Unparseable message");
                JsonRpcResponse::error(serde_json::Value::Null, JsonRpcError::parse_error())
            }
        };

        encode(&response)
    }

    /// Dispatch a request. Notifications produce no response.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!(method = %request.method, "Handling request");

        if request.is_notification() {
            debug!(method = %request.method, "Notification received");
            return None;
        }
        let id = request.id.unwrap_or_default();

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(id, JsonRpcError::invalid_request()));
        }

        let params = request.params.unwrap_or(serde_json::Value::Null);
        let response = match request.method.as_str() {
            "initialize" => self.initialize(id, params),
            "ping" => JsonRpcResponse::success(id, serde_json::json!({})),
            "tools/list" => respond(
                id,
                &ListToolsResult {
                    tools: self.tools.list_schemas(),
                },
            ),
            "tools/call" => self.call_tool(id, params).await,
            "resources/list" => respond(
                id,
                &ListResourcesResult {
                    resources: self.resources.list_schemas(),
                },
            ),
            "resources/read" => self.read_resource(id, params).await,
            other => JsonRpcResponse::error(id, JsonRpcError::method_not_found(other)),
        };
        Some(response)
    }

    fn initialize(&self, id: serde_json::Value, params: serde_json::Value) -> JsonRpcResponse {
        let params: InitializeParams = serde_json::from_value(params).unwrap_or_default();
        if let Some(client) = &params.client_info {
            info!(client = %client.name, version = %client.version, "Client connected");
        }

        let result = InitializeResult {
            protocol_version: negotiate_version(params.protocol_version.as_deref()).to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
                resources: Some(ResourcesCapability {
                    subscribe: false,
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        };
        respond(id, &result)
    }

    async fn call_tool(&self, id: serde_json::Value, params: serde_json::Value) -> JsonRpcResponse {
        let params: CallToolParams = match serde_json::from_value(params) {
            Ok(params) => params,
            Err(e) => return JsonRpcResponse::error(id, JsonRpcError::invalid_params(e.to_string())),
        };

        let Some(tool) = self.tools.get(&params.name) else {
            return JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_params(format!("Unknown tool: {}", params.name)),
            );
        };

        info!(tool = %params.name, "Calling tool");
        let result = match tool.execute(params.arguments).await {
            Ok(result) => result,
            Err(e) => {
                warn!(tool = %params.name, error = %e, "Tool raised an error");
                ToolFailure::new(format!("{:#}", e), "Tool execution failed").into_result()
            }
        };
        respond(id, &result)
    }

    async fn read_resource(
        &self,
        id: serde_json::Value,
        params: serde_json::Value,
    ) -> JsonRpcResponse {
        let params: ReadResourceParams = match serde_json::from_value(params) {
            Ok(params) => params,
            Err(e) => return JsonRpcResponse::error(id, JsonRpcError::invalid_params(e.to_string())),
        };

        let Some(resource) = self.resources.get(&params.uri) else {
            return JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_params(format!("Unknown resource: {}", params.uri)),
            );
        };

        info!(uri = %params.uri, "Reading resource");
        let text = resource.read().await;
        respond(
            id,
            &ReadResourceResult {
                contents: vec![ResourceContents {
                    uri: params.uri,
                    mime_type: "application/json".to_string(),
                    text,
                }],
            },
        )
    }
}

/// The client's protocol revision when supported, otherwise ours.
fn negotiate_version(requested: Option<&str>) -> &'static str {
    requested
        .and_then(|version| {
            SUPPORTED_PROTOCOL_VERSIONS
                .iter()
                .copied()
                .find(|supported| *supported == version)
        })
        .unwrap_or(PROTOCOL_VERSION)
}

fn encode(response: &JsonRpcResponse) -> Option<String> {
    match serde_json::to_string(response) {
        Ok(json) => Some(json),
        Err(e) => {
            warn!(error = %e, "Failed to encode response");
            None
        }
    }
}

fn respond<T: Serialize>(id: serde_json::Value, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(id, JsonRpcError::internal_error(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn server() -> McpServer {
        let client = HiggsfieldClient::builder()
            .base_url("http://127.0.0.1:1")
            .build()
            .unwrap();
        McpServer::for_client(Arc::new(client))
    }

    async fn call(server: &McpServer, method: &str, params: serde_json::Value) -> JsonRpcResponse {
        server
            .handle_request(JsonRpcRequest::new(1, method, Some(params)))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_initialize() {
        let server = server();
        let response = call(
            &server,
            "initialize",
            json!({
                "protocolVersion": "2025-03-26",
                "capabilities": {},
                "clientInfo": {"name": "test-client", "version": "1.0.0"}
            }),
        )
        .await;

        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], "2025-03-26");
        assert_eq!(result["serverInfo"]["name"], "higgsfield");
        assert!(result["capabilities"]["resources"].is_object());
        assert!(result["instructions"].as_str().unwrap().contains("job_set_id"));
    }

    #[tokio::test]
    async fn test_initialize_rejects_unknown_protocol_version() {
        let server = server();

        let response = call(&server, "initialize", json!({"protocolVersion": "1999-01-01"})).await;
        assert_eq!(response.result.unwrap()["protocolVersion"], PROTOCOL_VERSION);

        let response = call(&server, "initialize", json!({})).await;
        assert_eq!(response.result.unwrap()["protocolVersion"], PROTOCOL_VERSION);
    }

    #[tokio::test]
    async fn test_tools_list() {
        let server = server();
        let response = call(&server, "tools/list", json!({})).await;

        let result: ListToolsResult = serde_json::from_value(response.result.unwrap()).unwrap();
        let names: Vec<&str> = result.tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "create_character",
                "generate_image",
                "generate_talking_head",
                "generate_video",
                "get_generation_status",
                "list_characters",
            ]
        );
    }

    #[tokio::test]
    async fn test_resources_list() {
        let server = server();
        let response = call(&server, "resources/list", json!({})).await;

        let result: ListResourcesResult = serde_json::from_value(response.result.unwrap()).unwrap();
        let uris: Vec<&str> = result.resources.iter().map(|r| r.uri.as_str()).collect();
        assert_eq!(
            uris,
            vec![
                "higgsfield://characters",
                "higgsfield://motions",
                "higgsfield://styles",
            ]
        );
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let server = server();
        let response = call(&server, "prompts/list", json!({})).await;
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[tokio::test]
    async fn test_unknown_tool_and_resource() {
        let server = server();

        let response = call(&server, "tools/call", json!({"name": "nope", "arguments": {}})).await;
        assert_eq!(response.error.unwrap().code, -32602);

        let response = call(&server, "resources/read", json!({"uri": "higgsfield://nope"})).await;
        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[tokio::test]
    async fn test_notification_gets_no_response() {
        let server = server();
        let line = r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#;
        assert!(server.handle_line(line).await.is_none());
    }

    #[tokio::test]
    async fn test_parse_error() {
        let server = server();
        let response = server.handle_line("{not json").await.unwrap();
        let response: JsonRpcResponse = serde_json::from_str(&response).unwrap();
        assert_eq!(response.error.unwrap().code, -32700);
    }

    #[tokio::test]
    async fn test_serve_survives_undecodable_line() {
        let server = server();
        let input: &[u8] = b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"\xff\"}\n\
{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"ping\"}\n";
        let mut output = Vec::new();

        server.serve(input, &mut output).await.unwrap();

        let output = String::from_utf8(output).unwrap();
        let responses: Vec<JsonRpcResponse> = output
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].error.as_ref().unwrap().code, -32700);
        assert_eq!(responses[0].id, serde_json::Value::Null);
        assert_eq!(responses[1].id, json!(2));
        assert_eq!(responses[1].result, Some(json!({})));
    }

    #[tokio::test]
    async fn test_serve_over_stream() {
        let server = server();
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
            "\n"
        );
        let mut output = Vec::new();

        server.serve(input.as_bytes(), &mut output).await.unwrap();

        let output = String::from_utf8(output).unwrap();
        let responses: Vec<JsonRpcResponse> = output
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].id, json!(1));
        assert_eq!(responses[1].id, json!(2));
    }
}
