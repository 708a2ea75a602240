//! Generation API endpoints: Soul text-to-image, DoP image-to-video and
//! talking-head video.

use crate::client::HiggsfieldClient;
use crate::error::HiggsfieldResult;
use higgsfield_core::types::{InputAudio, InputImage, JobSet, Webhook};
use serde::Serialize;
use tracing::info;

/// Prompt sent with image-to-video requests when the caller gives none.
/// The platform rejects an empty prompt.
pub const DEFAULT_VIDEO_PROMPT: &str = "Smooth cinematic camera motion bringing the scene to life";

/// Strength applied to every motion preset.
pub const MOTION_STRENGTH: f64 = 0.5;

/// Generation API for submitting jobs.
pub struct GenerationApi<'a> {
    client: &'a HiggsfieldClient,
}

impl<'a> GenerationApi<'a> {
    pub(crate) fn new(client: &'a HiggsfieldClient) -> Self {
        Self { client }
    }

    /// Submit a Soul text-to-image job.
    pub async fn image(&self, request: &GenerateImageRequest) -> HiggsfieldResult<JobSet> {
        let body = ImageBody {
            params: ImageParams {
                prompt: &request.prompt,
                width_and_height: &request.width_and_height,
                enhance_prompt: request.enhance_prompt,
                quality: &request.quality,
                batch_size: request.batch_size,
                custom_reference_id: non_empty(&request.custom_reference_id),
                style_id: non_empty(&request.style_id),
                webhook: request.webhook.as_ref(),
            },
        };

        let job_set: JobSet = self
            .client
            .http
            .post(&["v1", "text2image", "soul"], &body)
            .await?;
        info!(job_set_id = %job_set.id, "Image generation submitted");
        Ok(job_set)
    }

    /// Submit a DoP image-to-video job.
    pub async fn video(&self, request: &GenerateVideoRequest) -> HiggsfieldResult<JobSet> {
        let prompt = request
            .prompt
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(DEFAULT_VIDEO_PROMPT);

        let body = VideoBody {
            params: VideoParams {
                model: &request.model,
                prompt,
                input_images: vec![InputImage::url(request.image_url.as_str())],
                motions: vec![MotionRef {
                    id: &request.motion_id,
                    strength: MOTION_STRENGTH,
                }],
            },
            webhook: request.webhook.as_ref(),
        };

        let job_set: JobSet = self
            .client
            .http
            .post(&["v1", "image2video", "dop"], &body)
            .await?;
        info!(job_set_id = %job_set.id, model = %request.model, "Video generation submitted");
        Ok(job_set)
    }

    /// Submit a talking-head (speaking portrait) job.
    pub async fn talking_head(
        &self,
        request: &GenerateTalkingHeadRequest,
    ) -> HiggsfieldResult<JobSet> {
        let body = TalkingHeadBody {
            params: TalkingHeadParams {
                input_image: InputImage::url(request.image_url.as_str()),
                input_audio: InputAudio::url(request.audio_url.as_str()),
                prompt: &request.prompt,
                quality: &request.quality,
                enhance_prompt: request.enhance_prompt,
                seed: request.seed,
                duration: request.duration,
            },
            webhook: request.webhook.as_ref(),
        };

        let job_set: JobSet = self
            .client
            .http
            .post(&["v1", "speak", "higgsfield"], &body)
            .await?;
        info!(job_set_id = %job_set.id, "Talking-head generation submitted");
        Ok(job_set)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Request to generate an image from a prompt.
#[derive(Debug, Clone)]
pub struct GenerateImageRequest {
    pub prompt: String,
    /// `"720p"` or `"1080p"`.
    pub quality: String,
    /// 1 or 4.
    pub batch_size: u32,
    /// Character reference to keep an identity consistent.
    pub custom_reference_id: Option<String>,
    pub style_id: Option<String>,
    pub width_and_height: String,
    pub enhance_prompt: bool,
    pub webhook: Option<Webhook>,
}

impl GenerateImageRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            quality: "1080p".to_string(),
            batch_size: 1,
            custom_reference_id: None,
            style_id: None,
            width_and_height: "2048x1152".to_string(),
            enhance_prompt: false,
            webhook: None,
        }
    }

    pub fn quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = quality.into();
        self
    }

    pub fn batch_size(mut self, batch_size: u32) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn custom_reference_id(mut self, id: Option<String>) -> Self {
        self.custom_reference_id = id;
        self
    }

    pub fn style_id(mut self, id: Option<String>) -> Self {
        self.style_id = id;
        self
    }

    pub fn width_and_height(mut self, size: impl Into<String>) -> Self {
        self.width_and_height = size.into();
        self
    }

    pub fn enhance_prompt(mut self, enhance: bool) -> Self {
        self.enhance_prompt = enhance;
        self
    }

    pub fn webhook(mut self, url: impl Into<String>, secret: Option<String>) -> Self {
        self.webhook = Some(Webhook::new(url, secret));
        self
    }
}

/// Request to animate an image with a motion preset.
#[derive(Debug, Clone)]
pub struct GenerateVideoRequest {
    pub image_url: String,
    pub motion_id: String,
    pub prompt: Option<String>,
    /// Backend model identifier, already resolved from a quality tier.
    pub model: String,
    pub webhook: Option<Webhook>,
}

impl GenerateVideoRequest {
    pub fn new(
        image_url: impl Into<String>,
        motion_id: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            image_url: image_url.into(),
            motion_id: motion_id.into(),
            prompt: None,
            model: model.into(),
            webhook: None,
        }
    }

    pub fn prompt(mut self, prompt: Option<String>) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn webhook(mut self, url: impl Into<String>, secret: Option<String>) -> Self {
        self.webhook = Some(Webhook::new(url, secret));
        self
    }
}

/// Request to make a portrait speak an audio track.
#[derive(Debug, Clone)]
pub struct GenerateTalkingHeadRequest {
    pub image_url: String,
    pub audio_url: String,
    pub prompt: String,
    /// `"mid"` or `"high"`.
    pub quality: String,
    /// Seconds: 5, 10 or 15.
    pub duration: u32,
    pub enhance_prompt: bool,
    pub seed: u64,
    pub webhook: Option<Webhook>,
}

impl GenerateTalkingHeadRequest {
    pub fn new(
        image_url: impl Into<String>,
        audio_url: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            image_url: image_url.into(),
            audio_url: audio_url.into(),
            prompt: prompt.into(),
            quality: "high".to_string(),
            duration: 5,
            enhance_prompt: false,
            seed: 42,
            webhook: None,
        }
    }

    pub fn quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = quality.into();
        self
    }

    pub fn duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }

    pub fn enhance_prompt(mut self, enhance: bool) -> Self {
        self.enhance_prompt = enhance;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn webhook(mut self, url: impl Into<String>, secret: Option<String>) -> Self {
        self.webhook = Some(Webhook::new(url, secret));
        self
    }
}

// Wire bodies. Image generation nests the webhook inside `params`; the video
// endpoints expect it next to `params`.

#[derive(Debug, Serialize)]
struct ImageBody<'a> {
    params: ImageParams<'a>,
}

#[derive(Debug, Serialize)]
struct ImageParams<'a> {
    prompt: &'a str,
    width_and_height: &'a str,
    enhance_prompt: bool,
    quality: &'a str,
    batch_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom_reference_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    style_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    webhook: Option<&'a Webhook>,
}

#[derive(Debug, Serialize)]
struct VideoBody<'a> {
    params: VideoParams<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    webhook: Option<&'a Webhook>,
}

#[derive(Debug, Serialize)]
struct VideoParams<'a> {
    model: &'a str,
    prompt: &'a str,
    input_images: Vec<InputImage>,
    motions: Vec<MotionRef<'a>>,
}

#[derive(Debug, Serialize)]
struct MotionRef<'a> {
    id: &'a str,
    strength: f64,
}

#[derive(Debug, Serialize)]
struct TalkingHeadBody<'a> {
    params: TalkingHeadParams<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    webhook: Option<&'a Webhook>,
}

#[derive(Debug, Serialize)]
struct TalkingHeadParams<'a> {
    input_image: InputImage,
    input_audio: InputAudio,
    prompt: &'a str,
    quality: &'a str,
    enhance_prompt: bool,
    seed: u64,
    duration: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn job_set_json(kind: &str) -> Value {
        json!({
            "id": "j1",
            "type": kind,
            "created_at": "2024-01-01T00:00:00Z",
            "jobs": [{"id": "job1", "status": "queued"}]
        })
    }

    async fn stub(endpoint: &str, kind: &str) -> (MockServer, HiggsfieldClient) {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_json(job_set_json(kind)))
            .expect(1)
            .mount(&server)
            .await;

        let client = HiggsfieldClient::builder()
            .base_url(server.uri())
            .api_key("key")
            .secret("secret")
            .build()
            .unwrap();
        (server, client)
    }

    async fn sent_body(server: &MockServer) -> Value {
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        serde_json::from_slice(&requests[0].body).unwrap()
    }

    #[tokio::test]
    async fn test_image_body_defaults() {
        let (server, client) = stub("/v1/text2image/soul", "soul").await;

        let job_set = client
            .generation()
            .image(&GenerateImageRequest::new("cat").quality("720p"))
            .await
            .unwrap();
        assert_eq!(job_set.id.0, "j1");

        let body = sent_body(&server).await;
        assert_eq!(
            body,
            json!({
                "params": {
                    "prompt": "cat",
                    "width_and_height": "2048x1152",
                    "enhance_prompt": false,
                    "quality": "720p",
                    "batch_size": 1
                }
            })
        );
    }

    #[tokio::test]
    async fn test_image_optional_fields_and_nested_webhook() {
        let (server, client) = stub("/v1/text2image/soul", "soul").await;

        let request = GenerateImageRequest::new("portrait")
            .custom_reference_id(Some("char-1".to_string()))
            .style_id(Some("style-1".to_string()))
            .webhook("https://hooks.example/done", None);
        client.generation().image(&request).await.unwrap();

        let body = sent_body(&server).await;
        assert_eq!(body["params"]["custom_reference_id"], "char-1");
        assert_eq!(body["params"]["style_id"], "style-1");
        assert_eq!(
            body["params"]["webhook"],
            json!({"url": "https://hooks.example/done", "secret": ""})
        );
        assert!(body.get("webhook").is_none());
    }

    #[tokio::test]
    async fn test_image_skips_empty_optional_ids() {
        let (server, client) = stub("/v1/text2image/soul", "soul").await;

        let request = GenerateImageRequest::new("portrait").style_id(Some(String::new()));
        client.generation().image(&request).await.unwrap();

        let body = sent_body(&server).await;
        assert!(body["params"].get("style_id").is_none());
    }

    #[tokio::test]
    async fn test_video_body_shape() {
        let (server, client) = stub("/v1/image2video/dop", "dop").await;

        let request = GenerateVideoRequest::new("https://img/a.jpg", "motion-1", "dop-turbo")
            .prompt(Some("slow zoom".to_string()));
        client.generation().video(&request).await.unwrap();

        let body = sent_body(&server).await;
        assert_eq!(
            body,
            json!({
                "params": {
                    "model": "dop-turbo",
                    "prompt": "slow zoom",
                    "input_images": [{"type": "image_url", "image_url": "https://img/a.jpg"}],
                    "motions": [{"id": "motion-1", "strength": 0.5}]
                }
            })
        );
    }

    #[tokio::test]
    async fn test_video_substitutes_placeholder_prompt() {
        for prompt in [None, Some(String::new()), Some("   ".to_string())] {
            let (server, client) = stub("/v1/image2video/dop", "dop").await;

            let request =
                GenerateVideoRequest::new("https://img/a.jpg", "motion-1", "dop-preview")
                    .prompt(prompt);
            client.generation().video(&request).await.unwrap();

            let body = sent_body(&server).await;
            assert_eq!(body["params"]["prompt"], DEFAULT_VIDEO_PROMPT);
        }
    }

    #[tokio::test]
    async fn test_video_prompt_sent_unmodified() {
        let (server, client) = stub("/v1/image2video/dop", "dop").await;

        let request = GenerateVideoRequest::new("https://img/a.jpg", "motion-1", "dop-preview")
            .prompt(Some("  slow zoom\n".to_string()));
        client.generation().video(&request).await.unwrap();

        let body = sent_body(&server).await;
        assert_eq!(body["params"]["prompt"], "  slow zoom\n");
    }

    #[tokio::test]
    async fn test_video_webhook_is_sibling_of_params() {
        let (server, client) = stub("/v1/image2video/dop", "dop").await;

        let request = GenerateVideoRequest::new("https://img/a.jpg", "motion-1", "dop-lite")
            .webhook("https://hooks.example/v", Some("s3cret".to_string()));
        client.generation().video(&request).await.unwrap();

        let body = sent_body(&server).await;
        assert_eq!(
            body["webhook"],
            json!({"url": "https://hooks.example/v", "secret": "s3cret"})
        );
        assert!(body["params"].get("webhook").is_none());
    }

    #[tokio::test]
    async fn test_talking_head_body_shape() {
        let (server, client) = stub("/v1/speak/higgsfield", "speak").await;

        let request =
            GenerateTalkingHeadRequest::new("https://img/face.jpg", "https://aud/a.mp3", "hello")
                .duration(10);
        let job_set = client.generation().talking_head(&request).await.unwrap();
        assert_eq!(job_set.job_type, "speak");

        let body = sent_body(&server).await;
        assert_eq!(
            body,
            json!({
                "params": {
                    "input_image": {"type": "image_url", "image_url": "https://img/face.jpg"},
                    "input_audio": {"type": "audio_url", "audio_url": "https://aud/a.mp3"},
                    "prompt": "hello",
                    "quality": "high",
                    "enhance_prompt": false,
                    "seed": 42,
                    "duration": 10
                }
            })
        );
    }

    #[tokio::test]
    async fn test_generation_surfaces_upstream_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Unauthorized"})))
            .mount(&server)
            .await;

        let client = HiggsfieldClient::builder()
            .base_url(server.uri())
            .build()
            .unwrap();

        let err = client
            .generation()
            .image(&GenerateImageRequest::new("cat"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(401));
    }
}
