use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a submitted generation request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobSetId(pub String);

impl JobSetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for JobSetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a single job inside a job set
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a character (custom) reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub String);

impl CharacterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Job status as reported by the platform.
///
/// Statuses this crate does not know are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    InProgress,
    Completed,
    Failed,
    Nsfw,
    #[serde(untagged)]
    Other(String),
}

impl JobStatus {
    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::InProgress => "in_progress",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
            JobStatus::Nsfw => "nsfw",
            JobStatus::Other(status) => status,
        }
    }

    /// Whether the job will not change any more
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Failed | JobStatus::Nsfw
        )
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A submitted image, video or talking-head request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSet {
    pub id: JobSetId,
    #[serde(rename = "type")]
    pub job_type: String,
    /// Timestamp exactly as the platform sent it
    pub created_at: String,
    #[serde(default)]
    pub jobs: Vec<Job>,
}

impl JobSet {
    /// Statuses of every job, in upstream order
    pub fn statuses(&self) -> Vec<JobStatus> {
        self.jobs.iter().map(|job| job.status.clone()).collect()
    }

    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }
}

/// One unit of generation work.
///
/// Fields other than `id` and `status` are kept untouched in `extra`, so a
/// job re-serializes to what the platform sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub status: JobStatus,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Job {
    pub fn new(id: impl Into<String>, status: JobStatus) -> Self {
        Self {
            id: JobId(id.into()),
            status,
            extra: serde_json::Map::new(),
        }
    }

    /// Result media, when present and in the expected shape
    pub fn results(&self) -> Option<JobResults> {
        let results = self.extra.get("results")?;
        JobResults::deserialize(results).ok()
    }
}

/// Result media of a completed job: a compressed preview and the raw output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResults {
    pub min: MediaAsset,
    pub raw: MediaAsset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaAsset {
    #[serde(rename = "type", default)]
    pub media_type: String,
    pub url: String,
}

/// Parse a platform timestamp: RFC 3339, or a naive ISO 8601 time taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Character reference lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterStatus {
    NotReady,
    Queued,
    InProgress,
    Completed,
    Failed,
    #[serde(untagged)]
    Other(String),
}

/// Image input in the `{type: "image_url", image_url}` shape the platform expects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputImage {
    ImageUrl { image_url: String },
}

impl InputImage {
    pub fn url(url: impl Into<String>) -> Self {
        Self::ImageUrl {
            image_url: url.into(),
        }
    }
}

/// Audio input in the `{type: "audio_url", audio_url}` shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputAudio {
    AudioUrl { audio_url: String },
}

impl InputAudio {
    pub fn url(url: impl Into<String>) -> Self {
        Self::AudioUrl {
            audio_url: url.into(),
        }
    }
}

/// A named, reusable identity derived from 1-5 face images
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterReference {
    pub id: CharacterId,
    pub name: String,
    pub status: CharacterStatus,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub input_images: Vec<InputImage>,
}

/// Paginated listing of character references.
///
/// Pagination fields other than `items` and `total` are kept as-is in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterPage {
    #[serde(default)]
    pub items: Vec<CharacterReference>,
    #[serde(default)]
    pub total: u64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Soul image style preset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StylePreset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub preview_url: Option<String>,
}

/// Image-to-video motion preset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionPreset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub start_end_frame: bool,
}

/// Completion callback registered with a generation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Webhook {
    pub url: String,
    pub secret: String,
}

impl Webhook {
    /// Build a webhook; a missing secret is sent as an empty string
    pub fn new(url: impl Into<String>, secret: Option<String>) -> Self {
        Self {
            url: url.into(),
            secret: secret.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_job_set_deserializes_with_results() {
        let set: JobSet = serde_json::from_value(json!({
            "id": "js-1",
            "type": "soul",
            "created_at": "2024-01-01T00:00:00Z",
            "jobs": [
                {
                    "id": "job-1",
                    "status": "completed",
                    "results": {
                        "min": {"type": "image", "url": "https://cdn/min.jpg"},
                        "raw": {"type": "image", "url": "https://cdn/raw.png"}
                    }
                },
                {"id": "job-2", "status": "in_progress"}
            ]
        }))
        .unwrap();

        assert_eq!(set.id, JobSetId::new("js-1"));
        assert_eq!(set.job_type, "soul");
        assert_eq!(set.statuses(), vec![JobStatus::Completed, JobStatus::InProgress]);
        let results = set.jobs[0].results().unwrap();
        assert_eq!(results.raw.url, "https://cdn/raw.png");
        assert!(set.jobs[1].results().is_none());
    }

    #[test]
    fn test_unrecognized_job_status_is_kept() {
        let job: Job = serde_json::from_value(json!({"id": "j", "status": "canceled"})).unwrap();
        assert_eq!(job.status, JobStatus::Other("canceled".to_string()));
        assert!(!job.status.is_terminal());
        assert_eq!(serde_json::to_value(&job.status).unwrap(), json!("canceled"));
    }

    #[test]
    fn test_job_serializes_as_received() {
        let upstream = json!({
            "id": "job1",
            "status": "queued",
            "results": null,
            "position": 3
        });
        let job: Job = serde_json::from_value(upstream.clone()).unwrap();
        assert!(job.results().is_none());
        assert_eq!(serde_json::to_value(&job).unwrap(), upstream);

        let bare = Job::new("job2", JobStatus::Queued);
        assert_eq!(
            serde_json::to_value(&bare).unwrap(),
            json!({"id": "job2", "status": "queued"})
        );
    }

    #[test]
    fn test_created_at_kept_verbatim() {
        for created_at in [
            "2024-01-01T00:00:00Z",
            "2024-01-01T00:00:00",
            "2024-01-01T00:00:00.123456+00:00",
        ] {
            let set: JobSet = serde_json::from_value(json!({
                "id": "j1",
                "type": "soul",
                "created_at": created_at,
                "jobs": []
            }))
            .unwrap();
            assert_eq!(set.created_at, created_at);
            assert!(set.created_at_utc().is_some(), "{created_at}");
        }
    }

    #[test]
    fn test_parse_timestamp() {
        let expected = parse_timestamp("2024-01-01T00:00:00Z").unwrap();
        assert_eq!(parse_timestamp("2024-01-01T00:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01T02:00:00+02:00"), Some(expected));
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_input_image_shape() {
        assert_eq!(
            serde_json::to_value(InputImage::url("https://x/a.jpg")).unwrap(),
            json!({"type": "image_url", "image_url": "https://x/a.jpg"})
        );
        assert_eq!(
            serde_json::to_value(InputAudio::url("https://x/a.mp3")).unwrap(),
            json!({"type": "audio_url", "audio_url": "https://x/a.mp3"})
        );
    }

    #[test]
    fn test_character_page_keeps_pagination_fields() {
        let page: CharacterPage = serde_json::from_value(json!({
            "items": [{
                "id": "c1",
                "name": "Jane",
                "status": "not_ready",
                "thumbnail_url": null,
                "created_at": "2024-01-01T00:00:00Z"
            }],
            "total": 1,
            "page": 1,
            "page_size": 20
        }))
        .unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].status, CharacterStatus::NotReady);
        assert_eq!(page.items[0].created_at, "2024-01-01T00:00:00Z");
        assert_eq!(page.extra.get("page_size"), Some(&json!(20)));
    }

    #[test]
    fn test_character_tolerates_new_status_and_naive_timestamp() {
        let character: CharacterReference = serde_json::from_value(json!({
            "id": "c2",
            "name": "Ada",
            "status": "archived",
            "created_at": "2024-05-01T10:00:00"
        }))
        .unwrap();

        assert_eq!(character.status, CharacterStatus::Other("archived".to_string()));
        assert_eq!(character.created_at, "2024-05-01T10:00:00");
    }

    #[test]
    fn test_motion_preset_defaults() {
        let motion: MotionPreset =
            serde_json::from_value(json!({"id": "m1", "name": "Dolly In"})).unwrap();
        assert!(!motion.start_end_frame);
        assert!(motion.preview_url.is_none());
        assert_eq!(motion.description, "");
    }

    #[test]
    fn test_webhook_secret_defaults_to_empty() {
        let webhook = Webhook::new("https://hooks.example/cb", None);
        assert_eq!(webhook.secret, "");
    }
}
