// Job set polling tool

use crate::envelope::{tool_result, ToolFailure};
use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_object, json_schema_string, parse_arguments, Tool};
use anyhow::Result;
use higgsfield_core::types::{Job, JobId, JobResults, JobSet, JobSetId, JobStatus};
use higgsfield_sdk::HiggsfieldClient;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

pub const MSG_COMPLETED: &str = "Generation complete! Download URLs are in the job results.";
pub const MSG_FAILED: &str = "One or more jobs failed.";
pub const MSG_NSFW: &str = "Content filter triggered - regenerate with a different prompt.";
pub const MSG_PROCESSING: &str = "Still processing - check again in a few seconds.";

/// Human-readable summary of a set of job statuses.
///
/// Rules are checked in order and the first match wins: all completed,
/// any failed, any nsfw, otherwise still processing.
pub fn status_message(statuses: &[JobStatus]) -> &'static str {
    if statuses.iter().all(|s| *s == JobStatus::Completed) {
        MSG_COMPLETED
    } else if statuses.contains(&JobStatus::Failed) {
        MSG_FAILED
    } else if statuses.contains(&JobStatus::Nsfw) {
        MSG_NSFW
    } else {
        MSG_PROCESSING
    }
}

#[derive(Debug, Serialize)]
struct ResultUrls {
    preview_url: String,
    full_quality_url: String,
    #[serde(rename = "type")]
    media_type: String,
}

impl From<JobResults> for ResultUrls {
    fn from(results: JobResults) -> Self {
        Self {
            preview_url: results.min.url,
            full_quality_url: results.raw.url,
            media_type: results.raw.media_type,
        }
    }
}

#[derive(Debug, Serialize)]
struct JobSummary {
    job_id: JobId,
    status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    results: Option<ResultUrls>,
}

impl From<Job> for JobSummary {
    fn from(job: Job) -> Self {
        let results = job.results().map(ResultUrls::from);
        Self {
            job_id: job.id,
            status: job.status,
            results,
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerationStatus {
    success: bool,
    job_set_id: JobSetId,
    #[serde(rename = "type")]
    job_type: String,
    created_at: String,
    jobs: Vec<JobSummary>,
    message: &'static str,
}

impl From<JobSet> for GenerationStatus {
    fn from(job_set: JobSet) -> Self {
        let message = status_message(&job_set.statuses());
        Self {
            success: true,
            job_set_id: job_set.id,
            job_type: job_set.job_type,
            created_at: job_set.created_at,
            jobs: job_set.jobs.into_iter().map(JobSummary::from).collect(),
            message,
        }
    }
}

/// Tool to poll a job set for status and results
pub struct GenerationStatusTool {
    client: Arc<HiggsfieldClient>,
}

impl GenerationStatusTool {
    const FAILURE: &'static str = "Failed to retrieve job status";

    pub fn new(client: Arc<HiggsfieldClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct GenerationStatusArgs {
    job_set_id: String,
}

#[async_trait::async_trait]
impl Tool for GenerationStatusTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_generation_status".to_string(),
            description: "Check the status of an image or video generation and retrieve result \
                          URLs once complete. Job statuses: queued, in_progress, completed, \
                          failed, nsfw. Results are retained for 7 days."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "job_set_id": json_schema_string("The job_set_id returned by a generate_* tool")
                }),
                vec!["job_set_id"],
            ),
            annotations: None,
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: GenerationStatusArgs = match parse_arguments(arguments) {
            Ok(args) => args,
            Err(e) => return Ok(ToolFailure::new(e, Self::FAILURE).into_result()),
        };

        let job_set_id = JobSetId::new(args.job_set_id);
        match self.client.job_sets().get(&job_set_id).await {
            Ok(job_set) => {
                let status = GenerationStatus::from(job_set);
                info!(
                    tool = "get_generation_status",
                    job_set_id = %status.job_set_id,
                    jobs = status.jobs.len(),
                    "Job set polled"
                );
                Ok(tool_result(&status, false))
            }
            Err(e) => {
                warn!(tool = "get_generation_status", error = %e, "Status poll failed");
                Ok(ToolFailure::new(e, Self::FAILURE).into_result())
            }
        }
    }

    fn read_only(&self) -> bool {
        true
    }
}
