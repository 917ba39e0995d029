//! Router tests.
//!
//! Drive the full axum router in-process with `tower::ServiceExt::oneshot`
//! against synthetic state, the same way a client would.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::connect_info::MockConnectInfo;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use crate::auth::jwt::create_access_token;
use crate::auth::rate_limit::RateLimitState;
use crate::config::Config;
use crate::models::mood::MoodEntry;
use crate::models::survey::Phq9Survey;
use crate::models::user::User;
use crate::store::draft::DraftStore;
use crate::store::Store;
use crate::{build_router, AppState};

fn test_config() -> Config {
    Config {
        host: "127.0.0.1".into(),
        port: 0,
        frontend_url: "http://localhost:3000".into(),
        jwt_secret: "test-secret".into(),
        jwt_access_ttl_secs: 900,
        jwt_refresh_ttl_secs: 604800,
        draft_path: std::env::temp_dir()
            .join(format!("solar-test-draft-{}.json", Uuid::new_v4()))
            .to_string_lossy()
            .into_owned(),
        seed_data: false,
        mock_latency_ms: 0,
    }
}

async fn test_app() -> (Router, AppState) {
    let config = Arc::new(test_config());
    let state = AppState {
        store: Store::new(),
        drafts: DraftStore::load(&config.draft_path),
        config,
        rate_limiter: RateLimitState::new(),
    };
    let app = build_router(state.clone())
        .layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 3000))));
    (app, state)
}

/// Insert a user without going through login; tests mint tokens directly.
async fn test_user(state: &AppState, company_id: &str) -> (Uuid, String) {
    let user = User {
        id: Uuid::new_v4(),
        company_id: company_id.into(),
        nickname: "사용자".into(),
        email: "user@example.com".into(),
        password_hash: crate::auth::password::hash_password("InitialPass123!").unwrap(),
        created_at: Utc::now(),
    };
    let id = user.id;
    state.store.insert_user(user).await;
    let token = create_access_token(id, company_id, &state.config).unwrap();
    (id, token)
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_check_is_public() {
    let (app, _) = test_app().await;
    let response = app
        .oneshot(request(Method::GET, "/health", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["service"], "solar-api");
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let (app, _) = test_app().await;
    let response = app
        .oneshot(request(Method::GET, "/api/mood", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_rejects_malformed_company_id_before_credentials() {
    let (app, _) = test_app().await;
    let response = app
        .oneshot(request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "company_id": "EMP12", "password": "whatever" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn login_issues_tokens_for_seeded_credentials() {
    let (app, state) = test_app().await;
    test_user(&state, "EMP001").await;

    // Wrong password: credential failure, not validation.
    let response = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "company_id": "EMP001", "password": "nope" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "company_id": "EMP001", "password": "InitialPass123!" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["access_token"].is_string());
    assert!(body["refresh_token"].is_string());
    assert_eq!(body["user"]["company_id"], "EMP001");
}

#[tokio::test]
async fn refresh_rotates_the_token() {
    let (app, state) = test_app().await;
    test_user(&state, "EMP001").await;

    let login = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "company_id": "EMP001", "password": "InitialPass123!" })),
        ))
        .await
        .unwrap();
    let tokens = body_json(login).await;
    let refresh_token = tokens["refresh_token"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/auth/refresh",
            None,
            Some(json!({ "refresh_token": refresh_token.clone() })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The presented token was revoked by the rotation.
    let response = app
        .oneshot(request(
            Method::POST,
            "/api/auth/refresh",
            None,
            Some(json!({ "refresh_token": refresh_token })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn mood_entry_create_and_list() {
    let (app, state) = test_app().await;
    let (_, token) = test_user(&state, "EMP001").await;

    let response = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/mood",
            Some(&token),
            Some(json!({ "mood": 7 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    assert_eq!(created["mood"], 7);
    assert_eq!(created["emoji"], "😁");

    let response = app
        .clone()
        .oneshot(request(Method::GET, "/api/mood?period=daily", Some(&token), None))
        .await
        .unwrap();
    let entries = body_json(response).await;
    assert_eq!(entries.as_array().unwrap().len(), 1);

    // Out-of-range mood never mutates.
    let response = app
        .oneshot(request(
            Method::POST,
            "/api/mood",
            Some(&token),
            Some(json!({ "mood": 11 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unknown_chart_period_is_rejected_at_the_boundary() {
    let (app, state) = test_app().await;
    let (_, token) = test_user(&state, "EMP001").await;

    let response = app
        .oneshot(request(
            Method::GET,
            "/api/mood?period=yearly",
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sparkline_centers_a_single_entry() {
    let (app, state) = test_app().await;
    let (user_id, token) = test_user(&state, "EMP001").await;
    state
        .store
        .add_mood_entry(MoodEntry {
            id: Uuid::new_v4(),
            user_id,
            date: Utc::now() - Duration::days(3),
            mood: 5,
            emoji: "😊".into(),
        })
        .await;

    let response = app
        .oneshot(request(Method::GET, "/api/mood/sparkline", Some(&token), None))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["points"][0]["x"], 50.0);
}

#[tokio::test]
async fn thought_record_requires_non_empty_lists() {
    let (app, state) = test_app().await;
    let (_, token) = test_user(&state, "EMP001").await;

    let response = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/thoughts",
            Some(&token),
            Some(json!({
                "situation": "팀 회의",
                "emotions": [],
                "automatic_thoughts": "생각",
                "cognitive_distortions": ["흑백논리 - 극단적 사고"],
                "alternative_thought": "대안",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .oneshot(request(
            Method::POST,
            "/api/thoughts",
            Some(&token),
            Some(json!({
                "situation": "팀 회의",
                "emotions": [{ "name": "불안", "intensity": 7 }],
                "automatic_thoughts": "생각",
                "cognitive_distortions": ["흑백논리 - 극단적 사고"],
                "alternative_thought": "대안",
                "alternative_distortions": ["균형잡힌 사고"],
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn behavior_record_caps_activities_per_slot() {
    let (app, state) = test_app().await;
    let (_, token) = test_user(&state, "EMP001").await;

    let activity = json!({ "situation": "morning", "activity": "산책" });
    let response = app
        .oneshot(request(
            Method::POST,
            "/api/behaviors",
            Some(&token),
            Some(json!({
                "morning_mood": 4,
                "work_mood": 6,
                "evening_mood": 7,
                "activities": [activity.clone(), activity.clone(), activity.clone(), activity],
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn phq9_submission_scores_and_buckets() {
    let (app, state) = test_app().await;
    let (user_id, token) = test_user(&state, "EMP001").await;

    let response = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/surveys/phq9",
            Some(&token),
            Some(json!({ "answers": [2, 2, 2, 1, 2, 2, 1, 2, 1] })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["score"], 15);
    assert_eq!(body["severity"], "moderately_severe");
    assert_eq!(body["percent"], 56);

    // Ten answers: rejected, nothing stored.
    let response = app
        .oneshot(request(
            Method::POST,
            "/api/surveys/phq9",
            Some(&token),
            Some(json!({ "answers": [1, 1, 1, 1, 1, 1, 1, 1, 1, 1] })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(state.store.phq9_surveys_for(user_id).await.len(), 1);
}

#[tokio::test]
async fn report_tab_is_gated_until_seven_and_seven() {
    let (app, state) = test_app().await;
    let (user_id, token) = test_user(&state, "EMP001").await;

    // 6 mood entries and 8 CBT records: still locked.
    seed_counts(&state, user_id, 6, 8).await;
    let response = app
        .clone()
        .oneshot(request(Method::GET, "/api/reports", Some(&token), None))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["status"], "locked");
    assert_eq!(body["requirements"]["mood_entries"], 6);

    // One more mood entry unlocks.
    seed_counts(&state, user_id, 1, 0).await;
    let response = app
        .oneshot(request(Method::GET, "/api/reports", Some(&token), None))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["status"], "unlocked");
}

#[tokio::test]
async fn report_detail_aggregates_and_marks_viewed() {
    let (app, state) = test_app().await;
    let (user_id, token) = test_user(&state, "EMP001").await;

    let surveys = [
        Phq9Survey {
            id: Uuid::new_v4(),
            user_id,
            date: Utc::now() - Duration::days(14),
            score: 15,
            answers: vec![2, 2, 2, 1, 2, 2, 1, 2, 1],
        },
        Phq9Survey {
            id: Uuid::new_v4(),
            user_id,
            date: Utc::now() - Duration::days(1),
            score: 10,
            answers: vec![1, 1, 2, 1, 1, 1, 1, 1, 1],
        },
    ];
    let survey_ids: Vec<Uuid> = surveys.iter().map(|s| s.id).collect();
    for survey in surveys {
        state.store.add_phq9_survey(survey).await;
    }
    let report = crate::models::report::WeeklyReport {
        id: Uuid::new_v4(),
        user_id,
        week_label: "11월 2주".into(),
        start_date: Utc::now() - Duration::days(7),
        end_date: Utc::now(),
        created_at: Utc::now(),
        phq9_survey_ids: survey_ids,
        thought_record_ids: vec![],
        behavior_record_ids: vec![],
        mood_entry_count: 7,
        is_viewed: false,
    };
    let report_id = report.id;
    state.store.add_weekly_report(report).await;

    let response = app
        .oneshot(request(
            Method::GET,
            &format!("/api/reports/{}", report_id),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["stats"]["phq9"]["trend"]["score_change"], -5);
    assert_eq!(body["stats"]["phq9"]["trend"]["is_improving"], true);

    let stored = state.store.weekly_report(user_id, report_id).await.unwrap();
    assert!(stored.is_viewed);
}

#[tokio::test]
async fn phq9_alert_triggers_and_dismisses() {
    let (app, state) = test_app().await;
    let (user_id, token) = test_user(&state, "EMP001").await;
    seed_counts(&state, user_id, 7, 7).await;
    state
        .store
        .add_phq9_survey(Phq9Survey {
            id: Uuid::new_v4(),
            user_id,
            date: Utc::now() - Duration::days(15),
            score: 10,
            answers: vec![1, 1, 2, 1, 1, 1, 1, 1, 1],
        })
        .await;

    let response = app
        .clone()
        .oneshot(request(Method::GET, "/api/alerts", Some(&token), None))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["phq9_due"], true);

    // Dismissal hides the nudge for the session...
    app.clone()
        .oneshot(request(
            Method::POST,
            "/api/alerts/phq9/dismiss",
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    let response = app
        .clone()
        .oneshot(request(Method::GET, "/api/alerts", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["phq9_due"], false);

    // ...until a source list changes again.
    seed_counts(&state, user_id, 1, 0).await;
    let response = app
        .oneshot(request(Method::GET, "/api/alerts", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["phq9_due"], true);
}

#[tokio::test]
async fn draft_round_trips_through_the_api() {
    let (app, state) = test_app().await;
    let (_, token) = test_user(&state, "EMP001").await;

    let draft = json!({
        "kind": "thought",
        "situation": "팀 회의에서 내 의견이 받아들여지지 않았다",
        "emotions": [{ "name": "불안", "intensity": 7 }],
    });
    let response = app
        .clone()
        .oneshot(request(
            Method::PUT,
            "/api/draft",
            Some(&token),
            Some(draft.clone()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(request(Method::GET, "/api/draft", Some(&token), None))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["kind"], "thought");
    assert_eq!(body["situation"], draft["situation"]);

    let response = app
        .clone()
        .oneshot(request(Method::DELETE, "/api/draft", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let response = app
        .oneshot(request(Method::GET, "/api/draft", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(body_json(response).await, Value::Null);
}

#[tokio::test]
async fn finalizing_a_record_clears_the_draft() {
    let (app, state) = test_app().await;
    let (_, token) = test_user(&state, "EMP001").await;

    app.clone()
        .oneshot(request(
            Method::PUT,
            "/api/draft",
            Some(&token),
            Some(json!({ "kind": "thought", "situation": "초안" })),
        ))
        .await
        .unwrap();

    app.clone()
        .oneshot(request(
            Method::POST,
            "/api/thoughts",
            Some(&token),
            Some(json!({
                "situation": "팀 회의",
                "emotions": [{ "name": "불안", "intensity": 7 }],
                "automatic_thoughts": "생각",
                "cognitive_distortions": ["흑백논리 - 극단적 사고"],
                "alternative_thought": "대안",
            })),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(request(Method::GET, "/api/draft", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(body_json(response).await, Value::Null);
}

#[tokio::test]
async fn community_flow_post_like_block_delete() {
    let (app, state) = test_app().await;
    let (author_id, author_token) = test_user(&state, "EMP001").await;
    let (_, viewer_token) = test_user(&state, "EMP002").await;

    let response = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/community/posts",
            Some(&author_token),
            Some(json!({ "content": "오늘의 경험을 공유해요" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let post_id = body_json(response).await["id"].as_str().unwrap().to_string();

    // Like toggles on and off, per viewer.
    let response = app
        .clone()
        .oneshot(request(
            Method::POST,
            &format!("/api/community/posts/{}/like", post_id),
            Some(&viewer_token),
            None,
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["is_liked"], true);
    assert_eq!(body["likes"], 1);

    // A stranger cannot delete the author's post.
    let response = app
        .clone()
        .oneshot(request(
            Method::DELETE,
            &format!("/api/community/posts/{}", post_id),
            Some(&viewer_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Blocking the author hides the post for the viewer only.
    app.clone()
        .oneshot(request(
            Method::POST,
            "/api/community/blocks",
            Some(&viewer_token),
            Some(json!({ "user_id": author_id })),
        ))
        .await
        .unwrap();
    let response = app
        .clone()
        .oneshot(request(
            Method::GET,
            "/api/community/posts",
            Some(&viewer_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);

    // The author still sees and can delete it.
    let response = app
        .oneshot(request(
            Method::DELETE,
            &format!("/api/community/posts/{}", post_id),
            Some(&author_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn seeded_dataset_unlocks_reports_for_the_primary_account() {
    let config = Arc::new(test_config());
    let store = Store::new();
    crate::store::seed::seed(&store, Utc::now()).await.unwrap();
    let state = AppState {
        store,
        drafts: DraftStore::load(&config.draft_path),
        config,
        rate_limiter: RateLimitState::new(),
    };
    let user = state
        .store
        .find_user_by_company_id("EMP001")
        .await
        .unwrap();

    let counts = state.store.record_counts(user.id).await;
    assert!(crate::services::eligibility::report_unlocked(counts));
    assert_eq!(state.store.weekly_reports_for(user.id).await.len(), 2);
    assert_eq!(state.store.community_posts_for(user.id).await.len(), 2);
}

/// Bulk-insert synthetic records to reach a given count delta.
async fn seed_counts(state: &AppState, user_id: Uuid, mood: usize, thoughts: usize) {
    for i in 0..mood {
        state
            .store
            .add_mood_entry(MoodEntry {
                id: Uuid::new_v4(),
                user_id,
                date: Utc::now() - Duration::days(i as i64),
                mood: 5,
                emoji: "😊".into(),
            })
            .await;
    }
    for _ in 0..thoughts {
        state
            .store
            .add_thought_record(crate::models::thought::ThoughtRecord {
                id: Uuid::new_v4(),
                user_id,
                date: Utc::now(),
                situation: "상황".into(),
                emotions: vec![crate::models::thought::Emotion {
                    name: "불안".into(),
                    intensity: 5,
                }],
                automatic_thoughts: "생각".into(),
                cognitive_distortions: vec!["흑백논리 - 극단적 사고".into()],
                alternative_thought: "대안".into(),
                alternative_distortions: vec![],
                shared_to_community: false,
            })
            .await;
    }
}
