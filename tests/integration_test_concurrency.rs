mod common;

use axum::http::StatusCode;
use campus_events_backend::domain::services::approval::{self, Stage};
use campus_events_backend::error::AppError;
use common::{body_json, setup_campus, submit_event, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_stale_version_write_is_a_conflict() {
    let app = TestApp::new().await;
    let campus = setup_campus(&app).await;
    let event_id = submit_event(&app, &campus.president, "Contended Event").await;

    // Two approvers load the same snapshot of the event.
    let snapshot_a = app.state.event_repo.find_by_id(&event_id).await.unwrap().unwrap();
    let snapshot_b = snapshot_a.clone();

    // The first write wins and bumps the version.
    let mut event_a = snapshot_a.clone();
    approval::approve(Stage::Faculty, &mut event_a).unwrap();
    let updated = app.state.event_repo
        .update_decision(&event_a, snapshot_a.version)
        .await
        .unwrap();
    assert_eq!(updated.version, snapshot_a.version + 1);

    // The second write carries the stale version token and must not land.
    let mut event_b = snapshot_b.clone();
    approval::reject(&mut event_b, "Changed my mind").unwrap();
    let result = app.state.event_repo
        .update_decision(&event_b, snapshot_b.version)
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    // The stored event still reflects the first decision.
    let stored = app.state.event_repo.find_by_id(&event_id).await.unwrap().unwrap();
    assert_eq!(stored.status, event_a.status);
    assert_eq!(stored.rejection_reason, None);
}

#[tokio::test]
async fn test_version_token_is_visible_to_clients() {
    let app = TestApp::new().await;
    let campus = setup_campus(&app).await;
    let event_id = submit_event(&app, &campus.president, "Versioned Event").await;

    let event = body_json(app.get(&format!("/api/v1/events/{}", event_id), Some(&campus.president)).await).await;
    assert_eq!(event["version"], 0);

    let response = app.patch_json(
        &format!("/api/v1/events/{}/faculty-decision", event_id),
        json!({ "action": "approve" }),
        Some(&campus.faculty),
    ).await;
    assert_eq!(response.status(), StatusCode::OK);
    let event = body_json(response).await;
    assert_eq!(event["version"], 1);
}

#[tokio::test]
async fn test_update_on_deleted_event_is_not_found() {
    let app = TestApp::new().await;
    let campus = setup_campus(&app).await;
    let event_id = submit_event(&app, &campus.president, "Short Lived").await;

    let mut event = app.state.event_repo.find_by_id(&event_id).await.unwrap().unwrap();
    let expected_version = event.version;

    sqlx::query("DELETE FROM events WHERE id = ?")
        .bind(&event_id)
        .execute(&app.pool)
        .await
        .unwrap();

    approval::approve(Stage::Faculty, &mut event).unwrap();
    let result = app.state.event_repo.update_decision(&event, expected_version).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}
