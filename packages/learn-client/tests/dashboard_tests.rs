//! Dashboard operations against a mocked backend.

use std::sync::Arc;

use learn_client::testing::MockTransport;
use learn_client::{
    ClientConfig, ClientError, DashboardService, FileSessionStore, HttpClient,
    MemorySessionStore, Method, Session, SessionStore, SessionUser,
};
use serde_json::json;

fn dashboard(store: &MemorySessionStore, transport: &MockTransport) -> DashboardService {
    DashboardService::new(HttpClient::with_transport(
        ClientConfig::default(),
        Arc::new(store.clone()),
        Arc::new(transport.clone()),
    ))
}

fn session_for(user_id: i64) -> MemorySessionStore {
    MemorySessionStore::with_session(Session::new("tok", SessionUser::new(user_id)))
}

#[tokio::test]
async fn my_courses_requires_login_before_any_request() {
    let store = MemorySessionStore::new();
    let transport = MockTransport::new();

    let err = dashboard(&store, &transport).my_courses().await.unwrap_err();

    assert!(matches!(err, ClientError::Auth(_)));
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn my_courses_with_token_but_no_user_is_not_logged_in() {
    let store = MemorySessionStore::with_session(Session {
        token: Some("tok".into()),
        user: None,
    });
    let transport = MockTransport::new();

    let err = dashboard(&store, &transport).my_courses().await.unwrap_err();
    assert_eq!(err.to_string(), "Auth error: user not logged in");
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn my_courses_fetches_enrollments_for_session_user() {
    let store = session_for(42);
    let transport = MockTransport::new().respond(
        200,
        json!([
            {"enrollmentId": 1, "userId": 42, "courseId": 7, "courseName": "Intro to Rust", "status": "ACTIVE"},
            {"enrollmentId": 2, "userId": 42, "courseId": 8, "courseName": "Databases", "status": "COMPLETED"}
        ])
        .to_string(),
    );

    let courses = dashboard(&store, &transport).my_courses().await.unwrap();

    assert_eq!(courses.len(), 2);
    assert_eq!(courses[0].course_name.as_deref(), Some("Intro to Rust"));
    assert_eq!(courses[1].status, "COMPLETED");

    let call = transport.last_call().unwrap();
    assert_eq!(call.method, Method::Get);
    assert_eq!(call.url, "http://localhost:8080/enrollments/user/42");
}

#[tokio::test]
async fn change_password_puts_both_passwords() {
    let store = session_for(42);
    let transport = MockTransport::new().respond(200, r#"{"message":"Password updated"}"#);

    let data = dashboard(&store, &transport)
        .change_password(42, "old-pass", "new-pass")
        .await
        .unwrap();

    assert_eq!(data, json!({"message": "Password updated"}));

    let call = transport.last_call().unwrap();
    assert_eq!(call.method, Method::Put);
    assert_eq!(call.url, "http://localhost:8080/users/updateUser/42/password");
    assert_eq!(
        call.body,
        Some(json!({"currentPassword": "old-pass", "newPassword": "new-pass"}))
    );
}

#[tokio::test]
async fn wrong_current_password_does_not_log_out() {
    let store = session_for(42);
    let transport = MockTransport::new().respond(401, "Current password is incorrect");

    let err = dashboard(&store, &transport)
        .change_password(42, "wrong", "new-pass")
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(err.body(), Some("Current password is incorrect"));
    assert!(err.navigation().is_none());
    assert_eq!(store.user().unwrap().map(|u| u.user_id), Some(42));
}

#[tokio::test]
async fn delete_account_returns_raw_response() {
    let store = session_for(7);
    let transport = MockTransport::new().respond(200, "User deleted");

    let resp = dashboard(&store, &transport).delete_account(7).await.unwrap();

    assert_eq!(resp.status, 200);
    assert_eq!(resp.text(), "User deleted");

    let call = transport.last_call().unwrap();
    assert_eq!(call.method, Method::Delete);
    assert_eq!(call.url, "http://localhost:8080/users/removeUser/7");
    assert_eq!(call.body, None);
}

#[tokio::test]
async fn expired_session_on_courses_forces_login() {
    let store = session_for(42);
    let transport = MockTransport::new().respond(401, "");

    let err = dashboard(&store, &transport).my_courses().await.unwrap_err();

    assert_eq!(err.navigation().map(|n| n.path()), Some("/login"));
    assert!(store.load().unwrap().is_empty());
}

#[tokio::test]
async fn enroll_posts_user_and_course() {
    let store = session_for(42);
    let transport = MockTransport::new().respond(201, "Enrollment 15 created");

    let message = dashboard(&store, &transport).enroll(9).await.unwrap();

    assert_eq!(message, "Enrollment 15 created");
    let call = transport.last_call().unwrap();
    assert_eq!(call.method, Method::Post);
    assert_eq!(call.url, "http://localhost:8080/enrollments/doEnrollment");
    assert_eq!(call.body, Some(json!({"userId": 42, "courseId": 9})));
}

#[tokio::test]
async fn logout_clears_session() {
    let store = session_for(42);
    let transport = MockTransport::new();

    dashboard(&store, &transport).logout().unwrap();

    assert!(store.load().unwrap().is_empty());
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn user_id_zero_counts_as_logged_out() {
    let store = session_for(0);
    let transport = MockTransport::new();

    let service = dashboard(&store, &transport);
    assert!(matches!(service.my_courses().await, Err(ClientError::Auth(_))));
    assert!(matches!(service.enroll(3).await, Err(ClientError::Auth(_))));
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn unusable_stored_user_reports_not_logged_in() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, r#"{"token":"tok","user":{"email":"a@b.c"}}"#).unwrap();
    let transport = MockTransport::new();
    let service = DashboardService::new(HttpClient::with_transport(
        ClientConfig::default(),
        Arc::new(FileSessionStore::new(&path)),
        Arc::new(transport.clone()),
    ));

    let err = service.my_courses().await.unwrap_err();

    assert!(matches!(err, ClientError::Auth(_)));
    assert_eq!(transport.call_count(), 0);
}
