use std::sync::Arc;
use crate::publii::Publii;
use crate::server::tools::PubliiTools;
use mcp_sdk_rs::server::{Server, ServerHandler};
use mcp_sdk_rs::types::{
    Tool, ToolResult, ListToolsResult, MessageContent,
    Implementation, ClientCapabilities, ServerCapabilities
};
use mcp_sdk_rs::error::ErrorCode;
use mcp_sdk_rs::transport::stdio::StdioTransport;
use mcp_sdk_rs::error::Error;
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use serde::Deserialize;

#[derive(Deserialize)]
struct CallToolRequest {
    name: String,
    arguments: Option<Value>,
}

/// MCP handler exposing the Publii tools over stdio
#[derive(Clone)]
pub struct McpService {
    tools: PubliiTools,
}

impl McpService {
    pub fn new(publii: Arc<Publii>) -> Self {
        Self { tools: PubliiTools::new(publii) }
    }

    pub async fn run_stdio(&self) -> anyhow::Result<()> {
        let (read_tx, read_rx) = mpsc::channel::<String>(32);
        let (write_tx, mut write_rx) = mpsc::channel::<String>(32);

        // Stdin reader
        tokio::spawn(async move {
            let stdin = tokio::io::stdin();
            let mut reader = BufReader::new(stdin).lines();
            while let Ok(Some(line)) = reader.next_line().await {
                if read_tx.send(line).await.is_err() {
                    break;
                }
            }
        });

        // Stdout writer
        tokio::spawn(async move {
            let mut stdout = tokio::io::stdout();
            while let Some(msg) = write_rx.recv().await {
                let _ = stdout.write_all(msg.as_bytes()).await;
                let _ = stdout.write_all(b"\n").await;
                let _ = stdout.flush().await;
            }
        });

        let transport = StdioTransport::new(read_rx, write_tx);
        let server = Server::new(Arc::new(transport), Arc::new(self.clone()));
        tracing::info!("MCP server listening on stdio");
        server.start().await?;
        Ok(())
    }

    fn list_tools(&self) -> Result<Value, Error> {
        let tools = PubliiTools::definitions()
            .into_iter()
            .map(|def| -> Result<Tool, Error> {
                Ok(Tool {
                    name: def.name.to_string(),
                    description: def.description.to_string(),
                    input_schema: serde_json::from_value(def.input_schema)
                        .map_err(|e| Error::protocol(ErrorCode::ParseError, e.to_string()))?,
                    annotations: None,
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;

        let result = ListToolsResult { tools, next_cursor: None };
        serde_json::to_value(result).map_err(|e| Error::protocol(ErrorCode::InternalError, e.to_string()))
    }

    fn call_tool(&self, params: Option<Value>) -> Result<Value, Error> {
        let req: CallToolRequest = params.and_then(|v| serde_json::from_value(v).ok())
            .ok_or(Error::protocol(ErrorCode::InvalidParams, "Missing params"))?;

        let output = self.tools
            .call(&req.name, req.arguments.unwrap_or(Value::Null))
            .map_err(to_protocol_error)?;

        let text = serde_json::to_string_pretty(&output)
            .map_err(|e| Error::protocol(ErrorCode::InternalError, e.to_string()))?;

        let result = ToolResult {
            content: vec![MessageContent::Text { text }],
            structured_content: None,
        };

        serde_json::to_value(result).map_err(|e| Error::protocol(ErrorCode::InternalError, e.to_string()))
    }
}

/// Map a library error onto a JSON-RPC error code
fn error_code(err: &crate::Error) -> ErrorCode {
    match err {
        crate::Error::UnknownTool(_) => ErrorCode::MethodNotFound,
        crate::Error::Config(_) | crate::Error::NotFound(_) | crate::Error::Validation(_) => {
            ErrorCode::InvalidParams
        }
        crate::Error::Storage(_) | crate::Error::Io(_) | crate::Error::Json(_) => ErrorCode::InternalError,
    }
}

fn to_protocol_error(err: crate::Error) -> Error {
    tracing::warn!("Tool call failed: {}", err);
    Error::protocol(error_code(&err), err.to_string())
}

#[async_trait]
impl ServerHandler for McpService {
    async fn initialize(
        &self,
        _implementation: Implementation,
        _capabilities: ClientCapabilities
    ) -> Result<ServerCapabilities, Error> {
        Ok(ServerCapabilities::default())
    }

    async fn shutdown(&self) -> Result<(), Error> {
        Ok(())
    }

    async fn handle_method(&self, method: &str, params: Option<Value>) -> Result<Value, Error> {
        match method {
            "tools/list" => self.list_tools(),
            "tools/call" => self.call_tool(params),
            _ => Err(Error::protocol(ErrorCode::MethodNotFound, method.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;

    fn service(fixture: &Fixture) -> McpService {
        McpService::new(Arc::new(fixture.publii()))
    }

    #[test]
    fn test_error_codes() {
        assert!(matches!(
            error_code(&crate::Error::NotFound("x".into())),
            ErrorCode::InvalidParams
        ));
        assert!(matches!(
            error_code(&crate::Error::UnknownTool("x".into())),
            ErrorCode::MethodNotFound
        ));
        assert!(matches!(
            error_code(&crate::Error::Io(std::io::Error::other("disk"))),
            ErrorCode::InternalError
        ));
    }

    #[tokio::test]
    async fn test_tools_list() {
        let fixture = Fixture::new();
        let value = service(&fixture).handle_method("tools/list", None).await.unwrap();

        let tools = value["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 14);
        assert!(tools.iter().any(|t| t["name"] == "create_page"));
    }

    #[tokio::test]
    async fn test_tools_call_returns_json_text() {
        let fixture = Fixture::new();
        let params = serde_json::json!({
            "name": "create_post",
            "arguments": { "title": "Erster Post", "content": "<p>x</p>" }
        });
        let value = service(&fixture).handle_method("tools/call", Some(params)).await.unwrap();

        assert_eq!(value["content"][0]["type"], "text");
        let text = value["content"][0]["text"].as_str().unwrap();
        let created: Value = serde_json::from_str(text).unwrap();
        assert_eq!(created["slug"], "erster-post");
        assert!(value.get("structuredContent").is_none());
    }

    #[tokio::test]
    async fn test_tools_call_list_result_is_visible_text() {
        let fixture = Fixture::new();
        let params = serde_json::json!({ "name": "list_authors", "arguments": {} });
        let value = service(&fixture).handle_method("tools/call", Some(params)).await.unwrap();

        let content = value["content"].as_array().unwrap();
        assert_eq!(content.len(), 1);
        let authors: Value = serde_json::from_str(content[0]["text"].as_str().unwrap()).unwrap();
        assert!(authors.as_array().is_some_and(|a| !a.is_empty()));
    }

    #[tokio::test]
    async fn test_tools_call_errors() {
        let fixture = Fixture::new();
        let service = service(&fixture);

        assert!(service.handle_method("tools/call", None).await.is_err());
        let missing = serde_json::json!({ "name": "get_post", "arguments": { "post_id": 99 } });
        assert!(service.handle_method("tools/call", Some(missing)).await.is_err());
        assert!(service.handle_method("resources/list", None).await.is_err());
    }
}
