mod common;

use axum::http::StatusCode;
use campus_events_backend::domain::services::approval;
use common::{body_json, setup_campus, setup_campus_in, submit_event, TestApp};
use serde_json::json;

async fn approve(app: &TestApp, auth: &common::AuthHeaders, event_id: &str, route: &str) {
    let response = app.patch_json(
        &format!("/api/v1/events/{}/{}", event_id, route),
        json!({ "action": "approve" }),
        Some(auth),
    ).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_pending_queues_follow_the_chain() {
    let app = TestApp::new().await;
    let campus = setup_campus(&app).await;
    let event_id = submit_event(&app, &campus.president, "Queue Walk").await;

    // Fresh submission: only the faculty coordinator sees it.
    let pending = body_json(app.get("/api/v1/events/pending", Some(&campus.faculty)).await).await;
    assert_eq!(pending.as_array().unwrap().len(), 1);
    assert_eq!(pending[0]["id"], event_id.as_str());

    let pending = body_json(app.get("/api/v1/events/pending", Some(&campus.venue)).await).await;
    assert!(pending.as_array().unwrap().is_empty());
    let pending = body_json(app.get("/api/v1/events/pending", Some(&campus.hod)).await).await;
    assert!(pending.as_array().unwrap().is_empty());

    // After faculty approval it moves to both the venue and HOD queues.
    approve(&app, &campus.faculty, &event_id, "faculty-decision").await;

    let pending = body_json(app.get("/api/v1/events/pending", Some(&campus.faculty)).await).await;
    assert!(pending.as_array().unwrap().is_empty());
    let pending = body_json(app.get("/api/v1/events/pending", Some(&campus.venue)).await).await;
    assert_eq!(pending.as_array().unwrap().len(), 1);
    let pending = body_json(app.get("/api/v1/events/pending", Some(&campus.hod)).await).await;
    assert_eq!(pending.as_array().unwrap().len(), 1);

    // Venue approval clears the venue queue while the HOD still has it.
    approve(&app, &campus.venue, &event_id, "venue-decision").await;

    let pending = body_json(app.get("/api/v1/events/pending", Some(&campus.venue)).await).await;
    assert!(pending.as_array().unwrap().is_empty());
    let pending = body_json(app.get("/api/v1/events/pending", Some(&campus.hod)).await).await;
    assert_eq!(pending.as_array().unwrap().len(), 1);

    approve(&app, &campus.hod, &event_id, "hod-decision").await;

    let pending = body_json(app.get("/api/v1/events/pending", Some(&campus.hod)).await).await;
    assert!(pending.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_pending_query_is_read_only() {
    let app = TestApp::new().await;
    let campus = setup_campus(&app).await;
    submit_event(&app, &campus.president, "Listed Twice").await;
    let second_id = submit_event(&app, &campus.president, "Also Listed Twice").await;

    approve(&app, &campus.faculty, &second_id, "faculty-decision").await;

    // Absent a transition, repeated reads of any queue return the same rows.
    for auth in [&campus.faculty, &campus.venue, &campus.hod] {
        let first = body_json(app.get("/api/v1/events/pending", Some(auth)).await).await;
        let second = body_json(app.get("/api/v1/events/pending", Some(auth)).await).await;
        assert_eq!(first, second);
        assert!(!first.as_array().unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_pending_is_forbidden_for_presidents() {
    let app = TestApp::new().await;
    let campus = setup_campus(&app).await;

    let response = app.get("/api/v1/events/pending", Some(&campus.president)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_faculty_queue_is_scoped_to_their_clubs() {
    let app = TestApp::new().await;
    let cs = setup_campus_in(&app, "Computer Science", "cs").await;
    let mech = setup_campus_in(&app, "Mechanical", "mech").await;

    submit_event(&app, &cs.president, "CS Workshop").await;

    let pending = body_json(app.get("/api/v1/events/pending", Some(&mech.faculty)).await).await;
    assert!(pending.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_my_events_includes_rejections_with_reason() {
    let app = TestApp::new().await;
    let campus = setup_campus(&app).await;
    let rejected_id = submit_event(&app, &campus.president, "Doomed Event").await;
    submit_event(&app, &campus.president, "Pending Event").await;

    let response = app.patch_json(
        &format!("/api/v1/events/{}/faculty-decision", rejected_id),
        json!({ "action": "reject", "reason": "Venue under renovation" }),
        Some(&campus.faculty),
    ).await;
    assert_eq!(response.status(), StatusCode::OK);

    let mine = body_json(app.get("/api/v1/events/mine", Some(&campus.president)).await).await;
    let mine = mine.as_array().unwrap();
    assert_eq!(mine.len(), 2);

    let rejected = mine.iter().find(|e| e["id"] == rejected_id.as_str()).unwrap();
    assert_eq!(rejected["status"], "rejected");
    assert_eq!(rejected["rejection_reason"], "Venue under renovation");
}

#[tokio::test]
async fn test_upcoming_feed_lists_only_final_future_events() {
    let app = TestApp::new().await;
    let campus = setup_campus(&app).await;
    let final_id = submit_event(&app, &campus.president, "Published Event").await;
    submit_event(&app, &campus.president, "Still In Review").await;

    approve(&app, &campus.faculty, &final_id, "faculty-decision").await;
    approve(&app, &campus.venue, &final_id, "venue-decision").await;
    approve(&app, &campus.hod, &final_id, "hod-decision").await;

    // The feed is public; no session required.
    let upcoming = body_json(app.get("/api/v1/events/upcoming", None).await).await;
    let upcoming = upcoming.as_array().unwrap();
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0]["id"], final_id.as_str());
    assert_eq!(upcoming[0]["status"], "final_approved");

    // The SQL feed and the domain predicate must classify rows the same way.
    let stored = app.state.event_repo.find_by_id(&final_id).await.unwrap().unwrap();
    assert!(approval::is_upcoming(&stored, chrono::Utc::now()));
}

#[tokio::test]
async fn test_history_shows_decided_events_for_hod_department() {
    let app = TestApp::new().await;
    let cs = setup_campus_in(&app, "Computer Science", "cs").await;
    let mech = setup_campus_in(&app, "Mechanical", "mech").await;

    let decided_id = submit_event(&app, &cs.president, "Decided").await;
    submit_event(&app, &cs.president, "Undecided").await;
    submit_event(&app, &mech.president, "Other Department").await;

    let response = app.patch_json(
        &format!("/api/v1/events/{}/faculty-decision", decided_id),
        json!({ "action": "reject", "reason": "Withdrawn by club" }),
        Some(&cs.faculty),
    ).await;
    assert_eq!(response.status(), StatusCode::OK);

    let history = body_json(app.get("/api/v1/events/history", Some(&cs.hod)).await).await;
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["id"], decided_id.as_str());

    // Other roles are turned away.
    let response = app.get("/api/v1/events/history", Some(&cs.faculty)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_guests_cannot_see_unpublished_events() {
    let app = TestApp::new().await;
    let campus = setup_campus(&app).await;
    let event_id = submit_event(&app, &campus.president, "Internal Draft").await;

    // Unpublished events look like missing records to guests.
    let response = app.get(&format!("/api/v1/events/{}", event_id), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The submitting club still sees it.
    let response = app.get(&format!("/api/v1/events/{}", event_id), Some(&campus.president)).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Once fully approved the event is public.
    approve(&app, &campus.faculty, &event_id, "faculty-decision").await;
    approve(&app, &campus.venue, &event_id, "venue-decision").await;
    approve(&app, &campus.hod, &event_id, "hod-decision").await;

    let response = app.get(&format!("/api/v1/events/{}", event_id), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let event = body_json(response).await;
    assert_eq!(event["status"], "final_approved");
}
