//! # Higgsfield SDK
//!
//! Async Rust client for the Higgsfield generative-media platform API.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use higgsfield_sdk::{HiggsfieldClient, HiggsfieldResult, JobSetId};
//! use higgsfield_sdk::api::generation::GenerateImageRequest;
//!
//! #[tokio::main]
//! async fn main() -> HiggsfieldResult<()> {
//!     let client = HiggsfieldClient::builder()
//!         .api_key("your-api-key")
//!         .secret("your-secret")
//!         .build()?;
//!
//!     // Submit a job
//!     let request = GenerateImageRequest::new("A lighthouse at dusk").quality("720p");
//!     let job_set = client.generation().image(&request).await?;
//!
//!     // Poll it
//!     let status = client.job_sets().get(&job_set.id).await?;
//!     println!("{:?}", status.statuses());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;

// Re-export main client
pub use client::{HiggsfieldClient, HiggsfieldClientBuilder};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{HiggsfieldError, HiggsfieldResult};

// Re-export core types for convenience
pub use higgsfield_core::types::{
    CharacterId, CharacterPage, CharacterReference, CharacterStatus, InputAudio, InputImage, Job,
    JobId, JobResults, JobSet, JobSetId, JobStatus, MediaAsset, MotionPreset, StylePreset,
    Webhook,
};
