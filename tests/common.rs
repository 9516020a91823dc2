use campus_events_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::repositories::{
        sqlite_club_repo::SqliteClubRepo,
        sqlite_user_repo::SqliteUserRepo,
        sqlite_event_repo::SqliteEventRepo,
        sqlite_job_repo::SqliteJobRepo,
        sqlite_auth_repo::SqliteAuthRepo,
    },
    domain::services::auth_service::AuthService,
    domain::ports::Notifier,
    background::start_background_worker,
    error::AppError,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::Arc;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, header},
    Router,
};
use std::str::FromStr;
use async_trait::async_trait;
use tera::Tera;
use tower::ServiceExt;
use serde_json::Value;

pub struct MockNotifier;

#[async_trait]
impl Notifier for MockNotifier {
    async fn dispatch(&self, _channel: &str, _subject: &str, _body: &str) -> Result<(), AppError> {
        Ok(())
    }
}

pub struct AuthHeaders {
    pub access_token: String,
    pub csrf_token: String,
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let mut tera = Tera::default();
        tera.add_raw_template("approved.txt", "{{ title }} moved to {{ status }}").unwrap();
        tera.add_raw_template("rejected.txt", "{{ title }} rejected: {{ reason }}").unwrap();
        let templates = Arc::new(tera);

        let priv_key_pem = include_str!("../tests/keys/test_private.pem");
        let pub_key_pem = include_str!("../tests/keys/test_public.pem");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            notify_service_url: "http://localhost".to_string(),
            notify_service_token: "token".to_string(),
            jwt_secret_key: priv_key_pem.to_string(),
            jwt_public_key: pub_key_pem.to_string(),
            auth_issuer: "test-issuer".to_string(),
        };

        let auth_repo = Arc::new(SqliteAuthRepo::new(pool.clone()));
        let auth_service = Arc::new(AuthService::new(auth_repo.clone(), config.clone()));

        let state = Arc::new(AppState {
            config: config.clone(),
            club_repo: Arc::new(SqliteClubRepo::new(pool.clone())),
            user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
            event_repo: Arc::new(SqliteEventRepo::new(pool.clone())),
            job_repo: Arc::new(SqliteJobRepo::new(pool.clone())),
            auth_repo,
            auth_service,
            notifier: Arc::new(MockNotifier),
            templates,
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// Workers poll and claim jobs on their own schedule, which makes
    /// assertions on queue contents racy. Tests that want delivery opt in.
    #[allow(dead_code)]
    pub fn spawn_worker(&self) {
        let worker_state = self.state.clone();
        tokio::spawn(async move {
            start_background_worker(worker_state).await;
        });
    }

    pub async fn login(&self, username: &str, password: &str) -> AuthHeaders {
        let payload = serde_json::json!({
            "username": username,
            "password": password
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        let cookies: Vec<String> = response.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|h| h.to_str().unwrap().to_string())
            .collect();

        let access_token_cookie = cookies.iter()
            .find(|c| c.contains("access_token="))
            .expect("No access_token cookie returned");

        let start = access_token_cookie.find("access_token=").unwrap() + 13;
        let end = access_token_cookie[start..].find(';').unwrap_or(access_token_cookie.len() - start);
        let access_token = access_token_cookie[start..start+end].to_string();

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body_json: Value = serde_json::from_slice(&body_bytes).unwrap();
        let csrf_token = body_json["csrf_token"].as_str().expect("No csrf_token in body").to_string();

        AuthHeaders {
            access_token,
            csrf_token
        }
    }
}

#[allow(dead_code)]
impl TestApp {
    pub async fn post_json(&self, uri: &str, body: serde_json::Value, auth: Option<&AuthHeaders>) -> axum::http::Response<Body> {
        self.send("POST", uri, Some(body), auth).await
    }

    pub async fn patch_json(&self, uri: &str, body: serde_json::Value, auth: Option<&AuthHeaders>) -> axum::http::Response<Body> {
        self.send("PATCH", uri, Some(body), auth).await
    }

    pub async fn get(&self, uri: &str, auth: Option<&AuthHeaders>) -> axum::http::Response<Body> {
        self.send("GET", uri, None, auth).await
    }

    async fn send(&self, method: &str, uri: &str, body: Option<serde_json::Value>, auth: Option<&AuthHeaders>) -> axum::http::Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(auth) = auth {
            builder = builder
                .header(header::COOKIE, format!("access_token={}", auth.access_token))
                .header("X-CSRF-Token", &auth.csrf_token);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub async fn body_json(response: axum::http::Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// A fully provisioned campus: one club in "Computer Science" with its
/// approval chain, plus logged-in sessions for every role.
#[allow(dead_code)]
pub struct Campus {
    pub club_id: String,
    pub faculty_id: String,
    pub president: AuthHeaders,
    pub faculty: AuthHeaders,
    pub venue: AuthHeaders,
    pub hod: AuthHeaders,
}

#[allow(dead_code)]
pub async fn setup_campus(app: &TestApp) -> Campus {
    setup_campus_in(app, "Computer Science", "cs").await
}

#[allow(dead_code)]
pub async fn setup_campus_in(app: &TestApp, department: &str, prefix: &str) -> Campus {
    let faculty = body_json(app.post_json("/api/v1/staff", serde_json::json!({
        "username": format!("{}_faculty", prefix),
        "role": "faculty",
        "department": department,
    }), None).await).await;
    let faculty_id = faculty["user_id"].as_str().unwrap().to_string();
    let faculty_secret = faculty["secret"].as_str().unwrap().to_string();

    let venue = body_json(app.post_json("/api/v1/staff", serde_json::json!({
        "username": format!("{}_venue", prefix),
        "role": "venue_coordinator",
        "department": department,
    }), None).await).await;
    let venue_secret = venue["secret"].as_str().unwrap().to_string();

    let hod = body_json(app.post_json("/api/v1/staff", serde_json::json!({
        "username": format!("{}_hod", prefix),
        "role": "hod",
        "department": department,
    }), None).await).await;
    let hod_secret = hod["secret"].as_str().unwrap().to_string();

    let club = body_json(app.post_json("/api/v1/clubs", serde_json::json!({
        "name": format!("{} Club", prefix),
        "department": department,
        "faculty_id": faculty_id,
        "president_username": format!("{}_president", prefix),
    }), None).await).await;
    let club_id = club["club_id"].as_str().unwrap().to_string();
    let president_secret = club["president_secret"].as_str().unwrap().to_string();

    Campus {
        club_id,
        faculty_id,
        president: app.login(&format!("{}_president", prefix), &president_secret).await,
        faculty: app.login(&format!("{}_faculty", prefix), &faculty_secret).await,
        venue: app.login(&format!("{}_venue", prefix), &venue_secret).await,
        hod: app.login(&format!("{}_hod", prefix), &hod_secret).await,
    }
}

/// Submits an event for the logged-in president and returns its id.
#[allow(dead_code)]
pub async fn submit_event(app: &TestApp, president: &AuthHeaders, title: &str) -> String {
    let starts_at = chrono::Utc::now() + chrono::Duration::days(14);
    let response = app.post_json("/api/v1/events", serde_json::json!({
        "title": title,
        "description": "An evening of talks and demos",
        "category": "technical",
        "venue": "Auditorium A",
        "building": "Main Block",
        "starts_at": starts_at.to_rfc3339(),
        "ends_at": (starts_at + chrono::Duration::hours(3)).to_rfc3339(),
    }), Some(president)).await;

    assert!(response.status().is_success(), "Event creation failed: {}", response.status());
    body_json(response).await["id"].as_str().unwrap().to_string()
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
