// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Prompt templates.

use std::collections::BTreeMap;

use rmcp::model::{ErrorData, Prompt, PromptArgument};
use serde_json::{json, Value};

use super::registry::{required_argument, PromptHandler};

/// Required string arguments, as `(name, description)` pairs.
fn required_arguments(arguments: &[(&str, &str)]) -> Option<Vec<PromptArgument>> {
    let wire: Vec<Value> = arguments
        .iter()
        .map(|(name, description)| {
            json!({ "name": name, "description": description, "required": true })
        })
        .collect();
    serde_json::from_value(Value::Array(wire)).ok()
}

/// `analyze_verse_prompt(reference)`
pub struct AnalyzeVersePrompt;

impl PromptHandler for AnalyzeVersePrompt {
    fn definition(&self) -> Prompt {
        Prompt::new(
            "analyze_verse_prompt",
            Some("Create a prompt to analyze a Bible verse."),
            required_arguments(&[("reference", "Bible verse reference (e.g. \"John 3:16\")")]),
        )
    }

    fn render(&self, arguments: &BTreeMap<String, String>) -> Result<String, ErrorData> {
        let reference = required_argument(arguments, "reference")?;
        Ok(format!(
            "Please analyze this Bible verse: {reference}\n\n\
             Consider:\n\
             1. Historical and cultural context\n\
             2. Key themes and theological significance\n\
             3. Literary devices and language\n\
             4. Connections to other passages\n\
             5. Modern application and relevance"
        ))
    }
}

/// `find_verses_on_topic_prompt(topic)`
pub struct VersesOnTopicPrompt;

impl PromptHandler for VersesOnTopicPrompt {
    fn definition(&self) -> Prompt {
        Prompt::new(
            "find_verses_on_topic_prompt",
            Some("Create a prompt to find Bible verses on a specific topic."),
            required_arguments(&[("topic", "The topic to search for")]),
        )
    }

    fn render(&self, arguments: &BTreeMap<String, String>) -> Result<String, ErrorData> {
        let topic = required_argument(arguments, "topic")?;
        Ok(format!(
            "Please find and share key Bible verses about: {topic}\n\n\
             For each verse:\n\
             1. Provide the full reference\n\
             2. Explain how it relates to the topic\n\
             3. Note any important context\n\n\
             Please include verses from different books and both testaments where applicable."
        ))
    }
}
