// Generation tools: text-to-image, image-to-video and talking-head video

use crate::envelope::{tool_result, ToolFailure};
use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    json_schema_boolean, json_schema_enum, json_schema_integer, json_schema_object,
    json_schema_string, parse_arguments, Tool,
};
use anyhow::Result;
use higgsfield_core::types::{Job, JobSet, JobSetId};
use higgsfield_sdk::api::generation::{
    GenerateImageRequest, GenerateTalkingHeadRequest, GenerateVideoRequest,
};
use higgsfield_sdk::HiggsfieldClient;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

const IMAGE_QUALITIES: &[&str] = &["720p", "1080p"];
const TALKING_HEAD_QUALITIES: &[&str] = &["mid", "high"];
const TALKING_HEAD_DURATIONS: &[u32] = &[5, 10, 15];

/// DoP quality tiers exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoQuality {
    Lite,
    Turbo,
    Standard,
}

impl VideoQuality {
    /// Resolve a caller-supplied label. Anything other than `lite` or
    /// `turbo` falls back to the standard tier.
    pub fn from_label(label: &str) -> Self {
        match label {
            "lite" => VideoQuality::Lite,
            "turbo" => VideoQuality::Turbo,
            _ => VideoQuality::Standard,
        }
    }

    /// Backend model identifier for this tier.
    pub fn model(&self) -> &'static str {
        match self {
            VideoQuality::Lite => "dop-lite",
            VideoQuality::Turbo => "dop-turbo",
            VideoQuality::Standard => "dop-preview",
        }
    }
}

/// Success envelope for a submitted job set. `created_at` and `jobs` are
/// echoed as the platform sent them.
#[derive(Debug, Serialize)]
pub struct JobSubmitted {
    pub success: bool,
    pub job_set_id: JobSetId,
    pub job_type: String,
    pub created_at: String,
    pub jobs: Vec<Job>,
}

impl From<JobSet> for JobSubmitted {
    fn from(job_set: JobSet) -> Self {
        Self {
            success: true,
            job_set_id: job_set.id,
            job_type: job_set.job_type,
            created_at: job_set.created_at,
            jobs: job_set.jobs,
        }
    }
}

/// Tool to generate an image with the Soul model
pub struct GenerateImageTool {
    client: Arc<HiggsfieldClient>,
}

impl GenerateImageTool {
    const FAILURE: &'static str = "Failed to start image generation";

    pub fn new(client: Arc<HiggsfieldClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateImageArgs {
    prompt: String,
    #[serde(default = "default_image_quality")]
    quality: String,
    #[serde(default)]
    character_id: Option<String>,
    #[serde(default)]
    style_id: Option<String>,
}

fn default_image_quality() -> String {
    "1080p".to_string()
}

#[async_trait::async_trait]
impl Tool for GenerateImageTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "generate_image".to_string(),
            description: "Generate an image from a text prompt with the Soul model. Starts an \
                          asynchronous job; poll get_generation_status with the returned \
                          job_set_id to retrieve results."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "prompt": json_schema_string("Detailed description of the image to generate"),
                    "quality": json_schema_enum("Image quality", IMAGE_QUALITIES, "1080p"),
                    "character_id": json_schema_string("Optional character reference ID for a consistent identity"),
                    "style_id": json_schema_string("Optional style preset ID (see higgsfield://styles)")
                }),
                vec!["prompt"],
            ),
            annotations: None,
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: GenerateImageArgs = match parse_arguments(arguments) {
            Ok(args) => args,
            Err(e) => return Ok(ToolFailure::new(e, Self::FAILURE).into_result()),
        };

        if !IMAGE_QUALITIES.contains(&args.quality.as_str()) {
            return Ok(ToolFailure::new(
                format!("Invalid input: quality must be one of {}", IMAGE_QUALITIES.join(", ")),
                Self::FAILURE,
            )
            .into_result());
        }

        let request = GenerateImageRequest::new(args.prompt)
            .quality(args.quality)
            .batch_size(1)
            .custom_reference_id(args.character_id)
            .style_id(args.style_id);

        match self.client.generation().image(&request).await {
            Ok(job_set) => {
                info!(tool = "generate_image", job_set_id = %job_set.id, "Job submitted");
                Ok(tool_result(&JobSubmitted::from(job_set), false))
            }
            Err(e) => {
                warn!(tool = "generate_image", error = %e, "Generation request failed");
                Ok(ToolFailure::new(e, Self::FAILURE).into_result())
            }
        }
    }
}

/// Tool to animate an image with the DoP model
pub struct GenerateVideoTool {
    client: Arc<HiggsfieldClient>,
}

impl GenerateVideoTool {
    const FAILURE: &'static str = "Failed to start video generation";

    pub fn new(client: Arc<HiggsfieldClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateVideoArgs {
    image_url: String,
    motion_id: String,
    #[serde(default)]
    prompt: Option<String>,
    #[serde(default = "default_video_quality")]
    quality: String,
}

fn default_video_quality() -> String {
    "standard".to_string()
}

#[async_trait::async_trait]
impl Tool for GenerateVideoTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "generate_video".to_string(),
            description: "Turn an image into a short cinematic video using a motion preset \
                          (DoP model). Starts an asynchronous job; poll get_generation_status \
                          with the returned job_set_id."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "image_url": json_schema_string("URL of the source image to animate"),
                    "motion_id": json_schema_string("Motion preset ID (see higgsfield://motions)"),
                    "prompt": json_schema_string("Optional description of the desired motion"),
                    "quality": json_schema_enum(
                        "lite (cheapest), turbo (faster) or standard (highest quality)",
                        &["lite", "turbo", "standard"],
                        "standard"
                    )
                }),
                vec!["image_url", "motion_id"],
            ),
            annotations: None,
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: GenerateVideoArgs = match parse_arguments(arguments) {
            Ok(args) => args,
            Err(e) => return Ok(ToolFailure::new(e, Self::FAILURE).into_result()),
        };

        let model = VideoQuality::from_label(&args.quality).model();
        let request = GenerateVideoRequest::new(&args.image_url, &args.motion_id, model)
            .prompt(args.prompt.clone());

        match self.client.generation().video(&request).await {
            Ok(job_set) => {
                info!(tool = "generate_video", job_set_id = %job_set.id, model, "Job submitted");
                Ok(tool_result(&JobSubmitted::from(job_set), false))
            }
            Err(e) => {
                warn!(tool = "generate_video", error = %e, model, "Generation request failed");
                let debug_info = serde_json::json!({
                    "image_url": args.image_url,
                    "motion_id": args.motion_id,
                    "prompt": args.prompt,
                    "quality": args.quality,
                    "model": model,
                    "api_key_preview": self.client.config().api_key_preview()
                });
                Ok(ToolFailure::new(e, Self::FAILURE)
                    .with_debug_info(debug_info)
                    .into_result())
            }
        }
    }
}

/// Success envelope for a talking-head submission
#[derive(Debug, Serialize)]
struct TalkingHeadSubmitted {
    #[serde(flatten)]
    job: JobSubmitted,
    duration: u32,
    quality: String,
}

/// Tool to make a portrait speak an audio track
pub struct GenerateTalkingHeadTool {
    client: Arc<HiggsfieldClient>,
}

impl GenerateTalkingHeadTool {
    const FAILURE: &'static str = "Failed to start talking-head generation";

    pub fn new(client: Arc<HiggsfieldClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateTalkingHeadArgs {
    image_url: String,
    audio_url: String,
    prompt: String,
    #[serde(default = "default_talking_head_quality")]
    quality: String,
    #[serde(default = "default_duration")]
    duration: u32,
    #[serde(default)]
    enhance_prompt: bool,
    #[serde(default = "default_seed")]
    seed: u64,
}

fn default_talking_head_quality() -> String {
    "high".to_string()
}

fn default_duration() -> u32 {
    5
}

fn default_seed() -> u64 {
    42
}

impl GenerateTalkingHeadArgs {
    fn validate(&self) -> Result<(), String> {
        if !TALKING_HEAD_QUALITIES.contains(&self.quality.as_str()) {
            return Err(format!(
                "Invalid input: quality must be one of {}",
                TALKING_HEAD_QUALITIES.join(", ")
            ));
        }
        if !TALKING_HEAD_DURATIONS.contains(&self.duration) {
            return Err("Invalid input: duration must be 5, 10 or 15 seconds".to_string());
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl Tool for GenerateTalkingHeadTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "generate_talking_head".to_string(),
            description: "Animate a portrait so it speaks the given audio track. Starts an \
                          asynchronous job; poll get_generation_status with the returned \
                          job_set_id."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "image_url": json_schema_string("URL of the portrait image"),
                    "audio_url": json_schema_string("URL of the speech audio"),
                    "prompt": json_schema_string("Description of the delivery and expression"),
                    "quality": json_schema_enum("Output quality", TALKING_HEAD_QUALITIES, "high"),
                    "duration": {
                        "type": "integer",
                        "description": "Video length in seconds",
                        "enum": TALKING_HEAD_DURATIONS,
                        "default": 5
                    },
                    "enhance_prompt": json_schema_boolean("Let the platform rewrite the prompt (default: false)"),
                    "seed": json_schema_integer("Random seed (default: 42)")
                }),
                vec!["image_url", "audio_url", "prompt"],
            ),
            annotations: None,
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: GenerateTalkingHeadArgs = match parse_arguments(arguments) {
            Ok(args) => args,
            Err(e) => return Ok(ToolFailure::new(e, Self::FAILURE).into_result()),
        };
        if let Err(e) = args.validate() {
            return Ok(ToolFailure::new(e, Self::FAILURE).into_result());
        }

        let request = GenerateTalkingHeadRequest::new(&args.image_url, &args.audio_url, &args.prompt)
            .quality(&args.quality)
            .duration(args.duration)
            .enhance_prompt(args.enhance_prompt)
            .seed(args.seed);

        match self.client.generation().talking_head(&request).await {
            Ok(job_set) => {
                info!(tool = "generate_talking_head", job_set_id = %job_set.id, "Job submitted");
                let envelope = TalkingHeadSubmitted {
                    job: JobSubmitted::from(job_set),
                    duration: args.duration,
                    quality: args.quality,
                };
                Ok(tool_result(&envelope, false))
            }
            Err(e) => {
                warn!(tool = "generate_talking_head", error = %e, "Generation request failed");
                Ok(ToolFailure::new(e, Self::FAILURE).into_result())
            }
        }
    }
}
