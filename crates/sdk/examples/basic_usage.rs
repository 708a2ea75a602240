//! Basic SDK usage example.
//!
//! Submits an image generation, then polls the job set until every job
//! reaches a terminal status.
//!
//! Run with: HF_API_KEY=... HF_SECRET=... cargo run --example basic_usage

use higgsfield_sdk::api::generation::GenerateImageRequest;
use higgsfield_sdk::{HiggsfieldClient, HiggsfieldResult, JobStatus};
use std::time::Duration;

#[tokio::main]
async fn main() -> HiggsfieldResult<()> {
    // Initialize tracing for debug output
    tracing_subscriber::fmt::init();

    let client = HiggsfieldClient::builder()
        .api_key(std::env::var("HF_API_KEY").unwrap_or_default())
        .secret(std::env::var("HF_SECRET").unwrap_or_default())
        .timeout(Duration::from_secs(30))
        .build()?;

    // Browse a few styles
    println!("Listing styles...");
    let styles = client.catalog().styles().await?;
    for style in styles.iter().take(5) {
        println!("  Style: {} ({})", style.name, style.id);
    }

    // Existing character references
    let characters = client.characters().first_page().await?;
    println!("\n{} character reference(s)", characters.total);
    for character in &characters.items {
        println!("  Character: {} ({}, {:?})", character.name, character.id, character.status);
    }

    // Submit the job
    let request = GenerateImageRequest::new("A red fox in fresh snow, golden hour").quality("720p");
    let job_set = client.generation().image(&request).await?;
    println!("\nSubmitted job set {} ({})", job_set.id, job_set.job_type);
    if let Some(created_at) = job_set.created_at_utc() {
        println!("  Created at {}", created_at.to_rfc2822());
    }

    // Poll until done
    loop {
        let current = client.job_sets().get(&job_set.id).await?;
        let statuses = current.statuses();
        println!("  Statuses: {:?}", statuses);

        if statuses.iter().all(JobStatus::is_terminal) {
            for job in &current.jobs {
                if let Some(results) = job.results() {
                    println!("  Job {}: {}", job.id, results.raw.url);
                }
            }
            break;
        }

        tokio::time::sleep(Duration::from_secs(5)).await;
    }

    println!("\nBasic usage example completed successfully!");
    Ok(())
}
