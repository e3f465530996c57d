// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Handler traits and the registration table.
//!
//! - [`ToolHandler`], [`ResourceHandler`] and [`PromptHandler`] are implemented
//!   by the bindings in the sibling modules
//! - [`Registry`] maps tool names, URI templates and prompt names to handlers
//! - [`DispatchResult`] is what a tool call or resource read produces
//!
//! The registry is where lookup errors stop being typed: every failure from
//! a tool or resource handler leaves here as `Error: <message>` text.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use rmcp::model::{ErrorData, Prompt, ResourceTemplate, Tool};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

#[cfg(feature = "telemetry")]
use tracing::{debug, info_span, Instrument};

use crate::bible::BibleService;
use crate::error::{BibleError, BibleResult};
#[cfg(feature = "telemetry")]
use crate::telemetry::metrics::GLOBAL_METRICS;

/// MIME type of every resource this server returns.
pub const TEXT_MIME: &str = "text/plain";

/// Parse JSON arguments into a typed struct.
pub fn parse_arguments<T>(arguments: &Value) -> BibleResult<T>
where
    T: DeserializeOwned,
{
    serde_json::from_value(arguments.clone())
        .map_err(|err| BibleError::validation(format!("Failed to parse arguments: {err}")))
}

/// Decode an MCP payload from its wire form.
pub fn from_wire<T: DeserializeOwned>(value: Value) -> Result<T, ErrorData> {
    serde_json::from_value(value).map_err(|e| ErrorData::internal_error(e.to_string(), None))
}

/// A callable tool.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Name, description and input schema.
    fn definition(&self) -> Tool;

    /// Run the tool. The input is always a JSON object.
    async fn execute(&self, input: Value) -> BibleResult<String>;
}

/// A URI-templated resource.
#[async_trait]
pub trait ResourceHandler: Send + Sync {
    /// Template such as `bible://{translation}/{book}/{chapter}`.
    fn uri_template(&self) -> &'static str;

    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Read the resource, given the variables bound by its template.
    async fn read(&self, params: &UriParams) -> BibleResult<String>;
}

/// A prompt template. Rendering is pure; no I/O.
pub trait PromptHandler: Send + Sync {
    fn definition(&self) -> Prompt;

    fn render(&self, arguments: &BTreeMap<String, String>) -> Result<String, ErrorData>;
}

/// Fetch a required prompt argument.
pub fn required_argument<'a>(
    arguments: &'a BTreeMap<String, String>,
    name: &str,
) -> Result<&'a str, ErrorData> {
    arguments
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| ErrorData::invalid_params(format!("Missing required argument: {name}"), None))
}

// ============================================================================
// URI templates
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Variable(String),
}

/// A `scheme://{var}/literal/{var}` template with whole-segment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate {
    raw: String,
    scheme: String,
    segments: Vec<Segment>,
}

impl UriTemplate {
    pub fn parse(raw: &str) -> Self {
        let (scheme, path) = raw.split_once("://").unwrap_or(("", raw));
        let segments = path
            .split('/')
            .map(|s| match s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) => Segment::Variable(name.to_string()),
                None => Segment::Literal(s.to_string()),
            })
            .collect();
        Self {
            raw: raw.to_string(),
            scheme: scheme.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Bind variables against `uri`. Segment counts must agree, literals must
    /// match exactly and variables must be non-empty.
    pub fn matches(&self, uri: &str) -> Option<UriParams> {
        let (scheme, path) = uri.split_once("://").unwrap_or(("", uri));
        if scheme != self.scheme {
            return None;
        }

        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(lit) if lit == part => {}
                Segment::Literal(_) => return None,
                Segment::Variable(_) if part.is_empty() => return None,
                Segment::Variable(name) => {
                    params.insert(name.clone(), part.to_string());
                }
            }
        }
        Some(UriParams(params))
    }

    fn literal_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Literal(_)))
            .count()
    }
}

/// Variables bound by a [`UriTemplate`] match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UriParams(BTreeMap<String, String>);

impl UriParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// A variable the template is known to bind.
    pub fn require(&self, name: &str) -> BibleResult<&str> {
        self.get(name)
            .ok_or_else(|| BibleError::validation(format!("missing URI parameter {name:?}")))
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Result of dispatching a tool call or resource read.
#[derive(Debug, Clone)]
pub struct DispatchResult {
    /// Tool name or resource URI.
    pub target: String,
    /// Display text, or `Error: ...` on failure.
    pub output: String,
    pub duration: Duration,
    pub is_error: bool,
}

/// Registration table for tools, resources and prompts.
pub struct Registry {
    tools: BTreeMap<String, Arc<dyn ToolHandler>>,
    resources: Vec<(UriTemplate, Arc<dyn ResourceHandler>)>,
    prompts: BTreeMap<String, Arc<dyn PromptHandler>>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Every binding the server exposes, backed by `service`.
    pub fn with_defaults(service: BibleService) -> Self {
        let mut builder = RegistryBuilder::new();

        builder.register_resource(super::resources::ChapterResource::new(service.clone()));
        builder.register_resource(super::resources::VerseResource::new(service.clone()));
        builder.register_resource(super::resources::RandomVerseResource::new(service.clone()));

        builder.register_tool(super::tools::VerseByReferenceTool::new(service.clone()));
        builder.register_tool(super::tools::RandomVerseTool::new(service.clone()));
        builder.register_tool(super::tools::ListTranslationsTool::new(service));

        builder.register_prompt(super::prompts::AnalyzeVersePrompt);
        builder.register_prompt(super::prompts::VersesOnTopicPrompt);

        builder.build()
    }

    pub fn tool_definitions(&self) -> Vec<Tool> {
        self.tools.values().map(|h| h.definition()).collect()
    }

    /// Resource templates in match order, every one served as plain text.
    pub fn resource_templates(&self) -> Result<Vec<ResourceTemplate>, ErrorData> {
        self.resources
            .iter()
            .map(|(template, handler)| {
                from_wire(json!({
                    "uriTemplate": template.as_str(),
                    "name": handler.name(),
                    "description": handler.description(),
                    "mimeType": TEXT_MIME,
                }))
            })
            .collect()
    }

    pub fn prompt_definitions(&self) -> Vec<Prompt> {
        self.prompts.values().map(|h| h.definition()).collect()
    }

    pub fn contains_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Call a tool. Never fails: unknown tools and handler errors come back
    /// as `Error: ...` output with `is_error` set.
    pub async fn call_tool(&self, name: &str, input: Value) -> DispatchResult {
        let Some(handler) = self.tools.get(name) else {
            return DispatchResult {
                target: name.to_string(),
                output: format!("Error: Unknown tool: {name}"),
                duration: Duration::ZERO,
                is_error: true,
            };
        };

        let start = Instant::now();

        #[cfg(feature = "telemetry")]
        let result = handler
            .execute(input)
            .instrument(info_span!("tool_call", tool = %name))
            .await;

        #[cfg(not(feature = "telemetry"))]
        let result = handler.execute(input).await;

        finish(format!("tool:{name}"), name, result, start.elapsed())
    }

    /// Read a resource by URI. Never fails: unmatched URIs and handler errors
    /// come back as `Error: ...` output.
    pub async fn read_resource(&self, uri: &str) -> DispatchResult {
        let matched = self
            .resources
            .iter()
            .find_map(|(template, handler)| template.matches(uri).map(|p| (template, handler, p)));

        let Some((template, handler, params)) = matched else {
            return DispatchResult {
                target: uri.to_string(),
                output: format!("Error: No resource matches URI: {uri}"),
                duration: Duration::ZERO,
                is_error: true,
            };
        };

        let start = Instant::now();

        #[cfg(feature = "telemetry")]
        let result = handler
            .read(&params)
            .instrument(info_span!("resource_read", template = %template.as_str()))
            .await;

        #[cfg(not(feature = "telemetry"))]
        let result = handler.read(&params).await;

        finish(
            format!("resource:{}", template.as_str()),
            uri,
            result,
            start.elapsed(),
        )
    }

    /// Render a prompt. Unknown names and missing arguments are protocol errors.
    pub fn get_prompt(
        &self,
        name: &str,
        arguments: &BTreeMap<String, String>,
    ) -> Result<(Prompt, String), ErrorData> {
        let handler = self
            .prompts
            .get(name)
            .ok_or_else(|| ErrorData::invalid_params(format!("Unknown prompt: {name}"), None))?;
        let text = handler.render(arguments)?;
        Ok((handler.definition(), text))
    }
}

fn finish(
    metric: String,
    target: &str,
    result: BibleResult<String>,
    duration: Duration,
) -> DispatchResult {
    #[cfg(feature = "telemetry")]
    GLOBAL_METRICS.record_handler(&metric, duration, result.is_ok());
    #[cfg(not(feature = "telemetry"))]
    let _ = metric;

    match result {
        Ok(output) => DispatchResult {
            target: target.to_string(),
            output,
            duration,
            is_error: false,
        },
        Err(err) => {
            #[cfg(feature = "telemetry")]
            debug!(
                target_name = %target,
                duration_ms = duration.as_secs_f64() * 1000.0,
                error = %err,
                "Dispatch failed"
            );
            DispatchResult {
                target: target.to_string(),
                output: format!("Error: {err}"),
                duration,
                is_error: true,
            }
        }
    }
}

/// Builder for constructing a [`Registry`].
///
/// Resources are matched most-literal-first, then in registration order.
pub struct RegistryBuilder {
    tools: BTreeMap<String, Arc<dyn ToolHandler>>,
    resources: Vec<(UriTemplate, Arc<dyn ResourceHandler>)>,
    prompts: BTreeMap<String, Arc<dyn PromptHandler>>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
            resources: Vec::new(),
            prompts: BTreeMap::new(),
        }
    }

    pub fn register_tool<T: ToolHandler + 'static>(&mut self, handler: T) -> &mut Self {
        let name = handler.definition().name.to_string();
        self.tools.insert(name, Arc::new(handler));
        self
    }

    pub fn register_resource<R: ResourceHandler + 'static>(&mut self, handler: R) -> &mut Self {
        let template = UriTemplate::parse(handler.uri_template());
        self.resources.push((template, Arc::new(handler)));
        self
    }

    pub fn register_prompt<P: PromptHandler + 'static>(&mut self, handler: P) -> &mut Self {
        let name = handler.definition().name.to_string();
        self.prompts.insert(name, Arc::new(handler));
        self
    }

    pub fn build(mut self) -> Registry {
        // stable sort keeps registration order among equals
        self.resources
            .sort_by_key(|(template, _)| std::cmp::Reverse(template.literal_count()));
        Registry {
            tools: self.tools,
            resources: self.resources,
            prompts: self.prompts,
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::ErrorCode;
    use serde::Deserialize;

    struct EchoTool;

    #[derive(Deserialize)]
    struct EchoArgs {
        message: String,
    }

    #[async_trait]
    impl ToolHandler for EchoTool {
        fn definition(&self) -> Tool {
            Tool::new("echo", "Echo a message", Arc::new(serde_json::Map::new()))
        }

        async fn execute(&self, input: Value) -> BibleResult<String> {
            let args: EchoArgs = parse_arguments(&input)?;
            if args.message.is_empty() {
                return Err(BibleError::validation("message must not be empty"));
            }
            Ok(args.message)
        }
    }

    struct TemplateEcho(&'static str);

    #[async_trait]
    impl ResourceHandler for TemplateEcho {
        fn uri_template(&self) -> &'static str {
            self.0
        }

        fn name(&self) -> &'static str {
            "template_echo"
        }

        fn description(&self) -> &'static str {
            "Echo the bound variable"
        }

        async fn read(&self, params: &UriParams) -> BibleResult<String> {
            Ok(format!("{} {:?}", self.0, params.get("a")))
        }
    }

    fn registry() -> Registry {
        let mut builder = Registry::builder();
        builder.register_tool(EchoTool);
        builder.register_resource(TemplateEcho("test://{a}/{b}"));
        builder.register_resource(TemplateEcho("test://fixed/{b}"));
        builder.build()
    }

    #[test]
    fn test_uri_template_matching() {
        let template = UriTemplate::parse("bible://{translation}/{book}/{chapter}");
        let params = template.matches("bible://web/GEN/1").unwrap();
        assert_eq!(params.get("translation"), Some("web"));
        assert_eq!(params.get("book"), Some("GEN"));
        assert_eq!(params.get("chapter"), Some("1"));

        assert!(template.matches("bible://web/GEN").is_none());
        assert!(template.matches("bible://web/GEN/1/2").is_none());
        assert!(template.matches("bible://web//1").is_none());
        assert!(template.matches("other://web/GEN/1").is_none());
    }

    #[test]
    fn test_uri_template_literals() {
        let template = UriTemplate::parse("bible://random/{translation}");
        assert_eq!(
            template.matches("bible://random/kjv").unwrap().get("translation"),
            Some("kjv")
        );
        assert!(template.matches("bible://web/kjv").is_none());
    }

    #[tokio::test]
    async fn test_call_tool() {
        let result = registry().call_tool("echo", json!({"message": "hi"})).await;
        assert!(!result.is_error);
        assert_eq!(result.output, "hi");
    }

    #[tokio::test]
    async fn test_call_tool_errors_become_text() {
        let registry = registry();

        let result = registry.call_tool("echo", json!({"message": ""})).await;
        assert!(result.is_error);
        assert!(result.output.starts_with("Error: "));

        let result = registry.call_tool("echo", json!({})).await;
        assert!(result.is_error);
        assert!(result.output.contains("Failed to parse arguments"));

        let result = registry.call_tool("nope", json!({})).await;
        assert!(result.is_error);
        assert_eq!(result.output, "Error: Unknown tool: nope");
    }

    #[tokio::test]
    async fn test_read_resource_prefers_literal_templates() {
        let registry = registry();

        let result = registry.read_resource("test://fixed/x").await;
        assert!(result.output.starts_with("test://fixed/{b}"));

        let result = registry.read_resource("test://other/x").await;
        assert_eq!(result.output, "test://{a}/{b} Some(\"other\")");

        let result = registry.read_resource("test://only-one").await;
        assert!(result.is_error);
        assert!(result.output.starts_with("Error: No resource matches URI"));
    }

    #[test]
    fn test_required_argument() {
        let mut args = BTreeMap::new();
        args.insert("topic".to_string(), "grace".to_string());
        assert_eq!(required_argument(&args, "topic").unwrap(), "grace");
        assert_eq!(
            required_argument(&args, "reference").unwrap_err().code,
            ErrorCode::INVALID_PARAMS
        );
    }

    #[test]
    fn test_unknown_prompt_is_invalid_params() {
        let err = registry().get_prompt("missing", &BTreeMap::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }

    #[test]
    fn test_resource_templates_follow_match_order() {
        let templates = registry().resource_templates().unwrap();
        let wire = serde_json::to_value(&templates).unwrap();
        assert_eq!(wire[0]["uriTemplate"], "test://fixed/{b}");
        assert_eq!(wire[1]["uriTemplate"], "test://{a}/{b}");
        assert_eq!(wire[0]["mimeType"], TEXT_MIME);
        assert_eq!(wire[0]["name"], "template_echo");
    }
}
