// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Static translation catalog.
//!
//! bible-api.com has no discovery endpoint, so the supported translations are
//! listed here from its documentation.

use serde::Serialize;

use crate::error::{BibleError, BibleResult};

/// A translation the upstream service can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TranslationDescriptor {
    /// Short id passed upstream, e.g. "kjv".
    pub id: &'static str,
    pub display_name: &'static str,
    pub language: &'static str,
    pub is_default: bool,
}

const fn translation(
    id: &'static str,
    display_name: &'static str,
    language: &'static str,
) -> TranslationDescriptor {
    TranslationDescriptor {
        id,
        display_name,
        language,
        is_default: false,
    }
}

/// Id of the default translation.
pub const DEFAULT_TRANSLATION: &str = "web";

/// All supported translations. Exactly one entry is the default.
pub static TRANSLATIONS: [TranslationDescriptor; 16] = [
    TranslationDescriptor {
        id: DEFAULT_TRANSLATION,
        display_name: "World English Bible",
        language: "English",
        is_default: true,
    },
    translation("kjv", "King James Version", "English"),
    translation("asv", "American Standard Version (1901)", "English"),
    translation("bbe", "Bible in Basic English", "English"),
    translation("darby", "Darby Bible", "English"),
    translation("dra", "Douay-Rheims 1899 American Edition", "English"),
    translation("ylt", "Young's Literal Translation (NT only)", "English"),
    translation("oeb-cw", "Open English Bible, Commonwealth Edition", "English (UK)"),
    translation("webbe", "World English Bible, British Edition", "English (UK)"),
    translation("oeb-us", "Open English Bible, US Edition", "English (US)"),
    translation("cherokee", "Cherokee New Testament", "Cherokee"),
    translation("cuv", "Chinese Union Version", "Chinese"),
    translation("bkr", "Bible kralická", "Czech"),
    translation("clementine", "Clementine Latin Vulgate", "Latin"),
    translation("almeida", "João Ferreira de Almeida", "Portuguese"),
    translation("rccv", "Protestant Romanian Corrected Cornilescu Version", "Romanian"),
];

/// All translations in catalog order.
pub fn list_translations() -> &'static [TranslationDescriptor] {
    &TRANSLATIONS
}

/// Look up a translation by exact, case-sensitive id.
pub fn find_translation(id: &str) -> Option<&'static TranslationDescriptor> {
    TRANSLATIONS.iter().find(|t| t.id == id)
}

/// Look up a translation, failing with `NotFoundLocal` when absent.
pub fn require_translation(id: &str) -> BibleResult<&'static TranslationDescriptor> {
    find_translation(id).ok_or_else(|| BibleError::unknown_translation(id))
}

/// The default translation descriptor.
pub fn default_translation() -> &'static TranslationDescriptor {
    TRANSLATIONS
        .iter()
        .find(|t| t.is_default)
        .unwrap_or(&TRANSLATIONS[0])
}

/// Render the catalog as the human-readable listing returned to callers.
pub fn render_catalog() -> String {
    let mut out = String::from("Available translations:\n\n");
    for t in list_translations() {
        let marker = if t.is_default { " (default)" } else { "" };
        out.push_str(&format!(
            "- {} ({}){} - {}\n",
            t.display_name, t.id, marker, t.language
        ));
    }
    out
}
