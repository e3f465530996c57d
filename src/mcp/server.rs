// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! rmcp service handler.
//!
//! [`McpServer`] implements [`ServerHandler`] over a fixed [`Registry`].
//! rmcp owns the JSON-RPC framing: request ids, notifications, `ping`,
//! unknown methods and the initialize handshake. Each handler here only
//! translates between rmcp model types and the registry.

use std::collections::BTreeMap;
use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, ErrorData, GetPromptRequestParam,
    GetPromptResult, Implementation, JsonObject, ListPromptsResult, ListResourceTemplatesResult,
    ListResourcesResult, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
    ReadResourceRequestParam, ReadResourceResult, ResourceContents, ServerCapabilities,
    ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler, ServiceExt};
use serde_json::{json, Value};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info};

#[cfg(feature = "telemetry")]
use crate::telemetry::metrics::GLOBAL_METRICS;

use super::registry::{from_wire, Registry, TEXT_MIME};
use crate::bible::BibleService;

/// Name reported in `serverInfo`.
pub const SERVER_NAME: &str = "Bible MCP";

const INSTRUCTIONS: &str = "Scripture from bible-api.com. Read bible://{translation}/{book}/{chapter}[/{verse}] \
     or bible://random/{translation}, or call get_verse_by_reference for free-text references.";

/// MCP server over a fixed registration table.
#[derive(Clone)]
pub struct McpServer {
    registry: Arc<Registry>,
}

impl McpServer {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Server with every default binding, backed by `service`.
    pub fn from_service(service: BibleService) -> Self {
        Self::new(Registry::with_defaults(service))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

/// Serve over the process's stdin and stdout.
pub async fn serve_stdio(server: McpServer) -> anyhow::Result<()> {
    serve(server, tokio::io::stdin(), tokio::io::stdout()).await
}

/// Serve newline-delimited JSON-RPC until `reader` reaches EOF.
pub async fn serve<R, W>(server: McpServer, reader: R, writer: W) -> anyhow::Result<()>
where
    R: AsyncRead + Send + Unpin + 'static,
    W: AsyncWrite + Send + Unpin + 'static,
{
    let running = server
        .serve((reader, writer))
        .await
        .map_err(|e| anyhow::anyhow!("MCP server init error: {e}"))?;
    info!("MCP session initialized");

    let reason = running
        .waiting()
        .await
        .map_err(|e| anyhow::anyhow!("MCP server error: {e}"))?;
    info!(reason = ?reason, "MCP session closed");
    Ok(())
}

/// Prompt arguments as strings; non-string JSON values keep their JSON text.
fn prompt_arguments(arguments: Option<JsonObject>) -> BTreeMap<String, String> {
    arguments
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| match value {
            Value::String(s) => (key, s),
            other => (key, other.to_string()),
        })
        .collect()
}

fn record_message(is_error: bool) {
    #[cfg(feature = "telemetry")]
    GLOBAL_METRICS.record_message(is_error);
    #[cfg(not(feature = "telemetry"))]
    let _ = is_error;
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_prompts()
                .enable_resources()
                .enable_tools()
                .build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: crate::VERSION.to_string(),
                ..Default::default()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.registry.tool_definitions()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let arguments = request.arguments.map(Value::Object).unwrap_or_else(|| json!({}));
        let dispatch = self.registry.call_tool(&request.name, arguments).await;
        debug!(
            tool = %dispatch.target,
            duration_ms = dispatch.duration.as_secs_f64() * 1000.0,
            is_error = dispatch.is_error,
            "Tool call finished"
        );
        record_message(dispatch.is_error);

        let content = vec![Content::text(dispatch.output)];
        Ok(if dispatch.is_error {
            CallToolResult::error(content)
        } else {
            CallToolResult::success(content)
        })
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        // every resource is templated
        Ok(ListResourcesResult::with_all_items(Vec::new()))
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, ErrorData> {
        Ok(ListResourceTemplatesResult::with_all_items(
            self.registry.resource_templates()?,
        ))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        let dispatch = self.registry.read_resource(&request.uri).await;
        debug!(
            uri = %dispatch.target,
            duration_ms = dispatch.duration.as_secs_f64() * 1000.0,
            is_error = dispatch.is_error,
            "Resource read finished"
        );
        record_message(dispatch.is_error);

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::TextResourceContents {
                uri: request.uri,
                mime_type: Some(TEXT_MIME.into()),
                text: dispatch.output,
                meta: None,
            }],
        })
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, ErrorData> {
        Ok(ListPromptsResult::with_all_items(
            self.registry.prompt_definitions(),
        ))
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, ErrorData> {
        let arguments = prompt_arguments(request.arguments);
        let rendered = self.registry.get_prompt(&request.name, &arguments);
        record_message(rendered.is_err());

        let (definition, text) = rendered?;
        from_wire(json!({
            "description": definition.description,
            "messages": [{
                "role": "user",
                "content": { "type": "text", "text": text }
            }]
        }))
    }
}
