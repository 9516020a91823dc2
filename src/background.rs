use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, info_span, Instrument};
use tera::Context;
use crate::domain::models::event::ApprovalStatus;
use crate::error::AppError;
use crate::state::AppState;

/// Polls the jobs table and delivers decision notifications to clubs.
pub async fn start_background_worker(state: Arc<AppState>) {
    info!("Starting background job worker...");

    loop {
        match state.job_repo.find_pending(10).await {
            Ok(jobs) => {
                for job in jobs {
                    let span = info_span!(
                        "background_job",
                        job_id = %job.id,
                        job_type = %job.job_type,
                        event_id = %job.payload.event_id
                    );

                    let state = state.clone();

                    async move {
                        info!("Processing job: {}", job.job_type);
                        match process_job(&state, &job).await {
                            Ok(_) => {
                                info!("Job completed successfully");
                                if let Err(e) = state.job_repo.update_status(&job.id, "COMPLETED", None).await {
                                    error!("Failed to mark job as completed: {:?}", e);
                                }
                            },
                            Err(e) => {
                                let err_msg = format!("{}", e);
                                error!("Job failed with error: {}", err_msg);
                                if let Err(up_err) = state.job_repo.update_status(&job.id, "FAILED", Some(err_msg)).await {
                                    error!("Failed to mark job as failed: {:?}", up_err);
                                }
                            }
                        }
                    }
                        .instrument(span)
                        .await;
                }
            }
            Err(e) => error!("Failed to fetch pending jobs: {:?}", e),
        }
        sleep(Duration::from_secs(5)).await;
    }
}

async fn process_job(
    state: &Arc<AppState>,
    job: &crate::domain::models::job::Job,
) -> Result<(), AppError> {
    let event = state.event_repo.find_by_id(&job.payload.event_id).await?
        .ok_or(AppError::NotFound(format!("Event {} not found", job.payload.event_id)))?;
    let club = state.club_repo.find_by_id(&job.payload.club_id).await?
        .ok_or(AppError::NotFound(format!("Club {} not found", job.payload.club_id)))?;

    let mut context = Context::new();
    context.insert("title", &event.title);
    context.insert("category", &event.category);
    context.insert("club_name", &club.name);
    context.insert("status", event.status.as_str());
    context.insert("venue", &event.venue);
    context.insert("building", &event.building);
    context.insert("starts_at", &event.starts_at.to_rfc3339());
    context.insert("reason", &event.rejection_reason);

    let template = if event.status == ApprovalStatus::Rejected {
        "rejected.txt"
    } else {
        "approved.txt"
    };

    let body = state.templates.render(template, &context)
        .map_err(|e| AppError::InternalWithMsg(format!("Template render error: {:?}", e)))?;
    let subject = format!("[{}] {}", job.job_type, event.title);

    state.notifier.dispatch(&club.id, &subject, &body).await?;

    Ok(())
}
