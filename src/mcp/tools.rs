// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Tool bindings.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::{JsonObject, Tool};
use serde::Deserialize;
use serde_json::{json, Value};

use super::registry::{parse_arguments, ToolHandler};
use crate::bible::catalog::DEFAULT_TRANSLATION;
use crate::bible::BibleService;
use crate::error::BibleResult;

/// JSON Schema for an object with the given properties.
fn object_schema(properties: Value, required: &[&str]) -> Arc<JsonObject> {
    let mut schema = JsonObject::new();
    schema.insert("type".to_string(), json!("object"));
    schema.insert("properties".to_string(), properties);
    if !required.is_empty() {
        schema.insert("required".to_string(), json!(required));
    }
    Arc::new(schema)
}

fn translation_property() -> Value {
    json!({
        "type": "string",
        "description": "Translation ID (e.g. \"web\", \"kjv\")",
        "default": DEFAULT_TRANSLATION
    })
}

// ============================================================================
// get_verse_by_reference
// ============================================================================

#[derive(Debug, Deserialize)]
struct VerseByReferenceArgs {
    reference: String,
    #[serde(default)]
    translation: Option<String>,
}

/// `get_verse_by_reference(reference, translation = "web")`
pub struct VerseByReferenceTool {
    service: BibleService,
}

impl VerseByReferenceTool {
    pub fn new(service: BibleService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ToolHandler for VerseByReferenceTool {
    fn definition(&self) -> Tool {
        Tool::new(
            "get_verse_by_reference",
            "Get verse(s) by reference string, e.g. \"John 3:16\" or \"Matthew 5:1-10\".",
            object_schema(
                json!({
                    "reference": {
                        "type": "string",
                        "description": "Bible reference (e.g. \"John 3:16\", \"Matthew 5:1-10\")"
                    },
                    "translation": translation_property()
                }),
                &["reference"],
            ),
        )
    }

    async fn execute(&self, input: Value) -> BibleResult<String> {
        let args: VerseByReferenceArgs = parse_arguments(&input)?;
        self.service
            .passage(&args.reference, args.translation.as_deref())
            .await
    }
}

// ============================================================================
// get_random_verse_tool
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct RandomVerseArgs {
    #[serde(default)]
    translation: Option<String>,
    #[serde(default)]
    testament: Option<String>,
}

/// `get_random_verse_tool(translation = "web", testament = None)`
pub struct RandomVerseTool {
    service: BibleService,
}

impl RandomVerseTool {
    pub fn new(service: BibleService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ToolHandler for RandomVerseTool {
    fn definition(&self) -> Tool {
        Tool::new(
            "get_random_verse_tool",
            "Get a random verse from the Bible, optionally limited to one testament.",
            object_schema(
                json!({
                    "translation": translation_property(),
                    "testament": {
                        "type": "string",
                        "description": "\"OT\" (Old Testament) or \"NT\" (New Testament)",
                        "enum": ["OT", "NT"]
                    }
                }),
                &[],
            ),
        )
    }

    async fn execute(&self, input: Value) -> BibleResult<String> {
        let args: RandomVerseArgs = parse_arguments(&input)?;
        self.service
            .random(args.translation.as_deref(), args.testament.as_deref())
            .await
    }
}

// ============================================================================
// list_available_translations
// ============================================================================

/// `list_available_translations()`
pub struct ListTranslationsTool {
    service: BibleService,
}

impl ListTranslationsTool {
    pub fn new(service: BibleService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ToolHandler for ListTranslationsTool {
    fn definition(&self) -> Tool {
        Tool::new(
            "list_available_translations",
            "List all available Bible translations.",
            object_schema(json!({}), &[]),
        )
    }

    async fn execute(&self, _input: Value) -> BibleResult<String> {
        Ok(self.service.translations())
    }
}
