// Style, motion and character catalogs

use super::{Resource, SCHEME};
use crate::envelope::{render, ResourceFailure};
use crate::protocol::ResourceSchema;
use crate::tools::characters::CharacterSummary;
use higgsfield_core::types::{MotionPreset, StylePreset};
use higgsfield_sdk::HiggsfieldClient;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

const CHARACTERS_PAGE_SIZE: u32 = 100;

fn descriptor(path: &str, name: &str, description: &str) -> ResourceSchema {
    ResourceSchema {
        uri: format!("{}://{}", SCHEME, path),
        name: name.to_string(),
        description: Some(description.to_string()),
        mime_type: Some("application/json".to_string()),
    }
}

#[derive(Debug, Serialize)]
struct StyleEntry {
    style_id: String,
    name: String,
    description: String,
    preview_url: Option<String>,
}

impl From<StylePreset> for StyleEntry {
    fn from(style: StylePreset) -> Self {
        Self {
            style_id: style.id,
            name: style.name,
            description: style.description,
            preview_url: style.preview_url,
        }
    }
}

#[derive(Debug, Serialize)]
struct StyleCatalog {
    available_styles: Vec<StyleEntry>,
    usage: &'static str,
}

/// Soul style presets
pub struct StylesResource {
    client: Arc<HiggsfieldClient>,
}

impl StylesResource {
    pub fn new(client: Arc<HiggsfieldClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Resource for StylesResource {
    fn schema(&self) -> ResourceSchema {
        descriptor(
            "styles",
            "Soul style presets",
            "Style IDs, names, descriptions and previews usable in generate_image",
        )
    }

    async fn read(&self) -> String {
        match self.client.catalog().styles().await {
            Ok(styles) => {
                debug!(count = styles.len(), "Styles fetched");
                render(&StyleCatalog {
                    available_styles: styles.into_iter().map(StyleEntry::from).collect(),
                    usage: "Use style_id parameter in generate_image tool",
                })
            }
            Err(e) => {
                warn!(resource = "styles", error = %e, "Catalog fetch failed");
                ResourceFailure::new(e, "Failed to fetch styles").render()
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct MotionEntry {
    motion_id: String,
    name: String,
    description: String,
    preview_url: Option<String>,
    start_end_frame: bool,
}

impl From<MotionPreset> for MotionEntry {
    fn from(motion: MotionPreset) -> Self {
        Self {
            motion_id: motion.id,
            name: motion.name,
            description: motion.description,
            preview_url: motion.preview_url,
            start_end_frame: motion.start_end_frame,
        }
    }
}

#[derive(Debug, Serialize)]
struct MotionCatalog {
    available_motions: Vec<MotionEntry>,
    usage: &'static str,
}

/// DoP motion presets
pub struct MotionsResource {
    client: Arc<HiggsfieldClient>,
}

impl MotionsResource {
    pub fn new(client: Arc<HiggsfieldClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Resource for MotionsResource {
    fn schema(&self) -> ResourceSchema {
        descriptor(
            "motions",
            "Motion presets",
            "Motion IDs, names, descriptions and previews usable in generate_video",
        )
    }

    async fn read(&self) -> String {
        match self.client.catalog().motions().await {
            Ok(motions) => {
                debug!(count = motions.len(), "Motions fetched");
                render(&MotionCatalog {
                    available_motions: motions.into_iter().map(MotionEntry::from).collect(),
                    usage: "Use motion_id parameter in generate_video tool",
                })
            }
            Err(e) => {
                warn!(resource = "motions", error = %e, "Catalog fetch failed");
                ResourceFailure::new(e, "Failed to fetch motion presets").render()
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct CharacterCatalog {
    total_characters: u64,
    characters: Vec<CharacterSummary>,
    usage: &'static str,
}

/// The caller's character references
pub struct CharactersResource {
    client: Arc<HiggsfieldClient>,
}

impl CharactersResource {
    pub fn new(client: Arc<HiggsfieldClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Resource for CharactersResource {
    fn schema(&self) -> ResourceSchema {
        descriptor(
            "characters",
            "Character references",
            "Character IDs usable in generate_image for a consistent identity",
        )
    }

    async fn read(&self) -> String {
        match self.client.characters().list(1, CHARACTERS_PAGE_SIZE).await {
            Ok(page) => render(&CharacterCatalog {
                total_characters: page.total,
                characters: page.items.into_iter().map(CharacterSummary::from).collect(),
                usage: "Use character_id parameter in generate_image tool",
            }),
            Err(e) => {
                warn!(resource = "characters", error = %e, "Catalog fetch failed");
                ResourceFailure::new(e, "Failed to fetch characters").render()
            }
        }
    }
}
