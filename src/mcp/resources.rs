// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Resource bindings under the `bible://` scheme.

use async_trait::async_trait;

use super::registry::{ResourceHandler, UriParams};
use crate::bible::BibleService;
use crate::error::BibleResult;

/// `bible://{translation}/{book}/{chapter}`
pub struct ChapterResource {
    service: BibleService,
}

impl ChapterResource {
    pub fn new(service: BibleService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ResourceHandler for ChapterResource {
    fn uri_template(&self) -> &'static str {
        "bible://{translation}/{book}/{chapter}"
    }

    fn name(&self) -> &'static str {
        "get_chapter"
    }

    fn description(&self) -> &'static str {
        "A full chapter. Book is a USFM id such as JHN or GEN."
    }

    async fn read(&self, params: &UriParams) -> BibleResult<String> {
        self.service
            .lookup(
                params.require("translation")?,
                params.require("book")?,
                params.require("chapter")?,
                None,
            )
            .await
    }
}

/// `bible://{translation}/{book}/{chapter}/{verse}`
pub struct VerseResource {
    service: BibleService,
}

impl VerseResource {
    pub fn new(service: BibleService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ResourceHandler for VerseResource {
    fn uri_template(&self) -> &'static str {
        "bible://{translation}/{book}/{chapter}/{verse}"
    }

    fn name(&self) -> &'static str {
        "get_verse"
    }

    fn description(&self) -> &'static str {
        "A single verse."
    }

    async fn read(&self, params: &UriParams) -> BibleResult<String> {
        self.service
            .lookup(
                params.require("translation")?,
                params.require("book")?,
                params.require("chapter")?,
                Some(params.require("verse")?),
            )
            .await
    }
}

/// `bible://random/{translation}`
pub struct RandomVerseResource {
    service: BibleService,
}

impl RandomVerseResource {
    pub fn new(service: BibleService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ResourceHandler for RandomVerseResource {
    fn uri_template(&self) -> &'static str {
        "bible://random/{translation}"
    }

    fn name(&self) -> &'static str {
        "get_random_verse"
    }

    fn description(&self) -> &'static str {
        "A random well-known verse."
    }

    async fn read(&self, params: &UriParams) -> BibleResult<String> {
        self.service
            .random(Some(params.require("translation")?), None)
            .await
    }
}
