//! Job sets API endpoints.

use crate::client::HiggsfieldClient;
use crate::error::HiggsfieldResult;
use higgsfield_core::types::{JobSet, JobSetId};

/// Job sets API for polling submitted generations.
pub struct JobSetsApi<'a> {
    client: &'a HiggsfieldClient,
}

impl<'a> JobSetsApi<'a> {
    pub(crate) fn new(client: &'a HiggsfieldClient) -> Self {
        Self { client }
    }

    /// Get a job set with the status of each job and, once completed, its
    /// result URLs.
    pub async fn get(&self, job_set_id: &JobSetId) -> HiggsfieldResult<JobSet> {
        self.client
            .http
            .get(&["v1", "job-sets", job_set_id.0.as_str()])
            .await
    }
}
