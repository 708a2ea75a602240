// Character reference tools

use crate::envelope::{tool_result, ToolFailure};
use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_array, json_schema_object, json_schema_string, parse_arguments, Tool};
use anyhow::Result;
use higgsfield_core::types::{CharacterId, CharacterReference, CharacterStatus};
use higgsfield_sdk::HiggsfieldClient;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Bounds on the number of face images per character.
pub const MIN_CHARACTER_IMAGES: usize = 1;
pub const MAX_CHARACTER_IMAGES: usize = 5;

/// Page size used when listing characters from the tool.
const LIST_PAGE_SIZE: u32 = 50;

/// Character entry as shown to the host
#[derive(Debug, Serialize)]
pub struct CharacterSummary {
    pub character_id: CharacterId,
    pub name: String,
    pub status: CharacterStatus,
    pub thumbnail_url: Option<String>,
    pub created_at: String,
}

impl From<CharacterReference> for CharacterSummary {
    fn from(character: CharacterReference) -> Self {
        Self {
            character_id: character.id,
            name: character.name,
            status: character.status,
            thumbnail_url: character.thumbnail_url,
            created_at: character.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct CharacterCreated {
    success: bool,
    character_id: CharacterId,
    name: String,
    status: CharacterStatus,
    message: &'static str,
    created_at: String,
    note: &'static str,
}

/// Tool to create a reusable character reference
pub struct CreateCharacterTool {
    client: Arc<HiggsfieldClient>,
}

impl CreateCharacterTool {
    const FAILURE: &'static str = "Failed to create character reference";

    pub fn new(client: Arc<HiggsfieldClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct CreateCharacterArgs {
    name: String,
    image_urls: Vec<String>,
}

#[async_trait::async_trait]
impl Tool for CreateCharacterTool {
    fn schema(&self) -> ToolSchema {
        let mut image_urls = json_schema_array(
            json_schema_string("Image URL"),
            "Face images of the character, ideally from different angles",
        );
        image_urls["minItems"] = MIN_CHARACTER_IMAGES.into();
        image_urls["maxItems"] = MAX_CHARACTER_IMAGES.into();

        ToolSchema {
            name: "create_character".to_string(),
            description: "Create a reusable character reference from 1-5 clear face images. \
                          Pass the returned character_id to generate_image for a consistent \
                          identity. Processing takes a few minutes."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "name": json_schema_string("Descriptive name for the character"),
                    "image_urls": image_urls
                }),
                vec!["name", "image_urls"],
            ),
            annotations: None,
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: CreateCharacterArgs = match parse_arguments(arguments) {
            Ok(args) => args,
            Err(e) => return Ok(ToolFailure::new(e, Self::FAILURE).into_result()),
        };

        let count = args.image_urls.len();
        if !(MIN_CHARACTER_IMAGES..=MAX_CHARACTER_IMAGES).contains(&count) {
            return Ok(ToolFailure::new(
                format!(
                    "Invalid input: image_urls must contain {}-{} URLs, got {}",
                    MIN_CHARACTER_IMAGES, MAX_CHARACTER_IMAGES, count
                ),
                Self::FAILURE,
            )
            .into_result());
        }

        match self.client.characters().create(&args.name, &args.image_urls).await {
            Ok(character) => {
                info!(tool = "create_character", character_id = %character.id, "Character submitted");
                let envelope = CharacterCreated {
                    success: true,
                    character_id: character.id,
                    name: character.name,
                    status: character.status,
                    message: "Character creation started. Status will progress: \
                              not_ready -> queued -> in_progress -> completed",
                    created_at: character.created_at,
                    note: "Use the list_characters tool to check when it is ready",
                };
                Ok(tool_result(&envelope, false))
            }
            Err(e) => {
                warn!(tool = "create_character", error = %e, "Character creation failed");
                Ok(ToolFailure::new(e, Self::FAILURE).into_result())
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct CharacterList {
    success: bool,
    total: u64,
    characters: Vec<CharacterSummary>,
    message: String,
}

/// Tool to list the caller's character references
pub struct ListCharactersTool {
    client: Arc<HiggsfieldClient>,
}

impl ListCharactersTool {
    const FAILURE: &'static str = "Failed to list characters";

    pub fn new(client: Arc<HiggsfieldClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for ListCharactersTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "list_characters".to_string(),
            description: "List your character references with their IDs, status and thumbnails."
                .to_string(),
            input_schema: json_schema_object(serde_json::json!({}), vec![]),
            annotations: None,
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
        match self.client.characters().list(1, LIST_PAGE_SIZE).await {
            Ok(page) => {
                let characters: Vec<CharacterSummary> =
                    page.items.into_iter().map(CharacterSummary::from).collect();
                info!(tool = "list_characters", count = characters.len(), "Characters listed");
                let envelope = CharacterList {
                    success: true,
                    total: page.total,
                    message: format!("Found {} character reference(s)", characters.len()),
                    characters,
                };
                Ok(tool_result(&envelope, false))
            }
            Err(e) => {
                warn!(tool = "list_characters", error = %e, "Character listing failed");
                Ok(ToolFailure::new(e, Self::FAILURE).into_result())
            }
        }
    }

    fn read_only(&self) -> bool {
        true
    }
}
