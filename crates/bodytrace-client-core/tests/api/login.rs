use bodytrace_shared::{
    imei::ImeiSelection,
    req_args::LoginReqArgs,
    routes::{landing_route, RouteId},
    session::Session,
    uac::Role,
};
use rstest::rstest;
use serde_json::json;

use crate::helpers::{no_cb, spawn_app, StubResponse};

const PATH: &str = "/api/admin/login";

fn login_args(login_type: Role) -> LoginReqArgs {
    LoginReqArgs::new("a@b.com", "x".to_string().into(), login_type)
}

#[tokio::test]
async fn admin_login_sets_session() {
    // Arrange
    let app = spawn_app().await;
    app.backend.stub(
        "POST",
        PATH,
        StubResponse::json(
            200,
            json!({"user":{"name":"A","email":"a@b.com","imei":null,"type":"admin"}}),
        ),
    );

    // Act
    let session = app
        .core_client
        .login(login_args(Role::Admin), no_cb)
        .await
        .unwrap()
        .unwrap();

    // Assert
    assert_eq!(session.name(), "A");
    assert_eq!(session.email(), "a@b.com");
    assert_eq!(session.role(), Role::Admin);
    assert!(session.is_logged_in());
    assert_eq!(session.imei(), &ImeiSelection::None);
    assert_eq!(app.core_client.session(), session);
    assert_eq!(landing_route(session.role()), Some(RouteId::UserAccounts));
    assert_eq!(app.core_client.server_address(), app.address);

    let request = app.backend.single_request();
    assert_eq!(
        request.body_json(),
        json!({"email":"a@b.com","password":"x","loginType":"admin"})
    );
}

#[rstest]
#[case::middle_admin(Role::MiddleAdmin, "middleAdmin", json!(["111", "222"]), 2)]
#[case::user(Role::User, "user", json!("111"), 1)]
#[tokio::test]
async fn login_stores_imeis(
    #[case] role: Role,
    #[case] wire_type: &str,
    #[case] imei: serde_json::Value,
    #[case] expected_imei_count: usize,
) {
    // Arrange
    let app = spawn_app().await;
    app.backend.stub(
        "POST",
        PATH,
        StubResponse::json(
            200,
            json!({"user":{"name":"B","email":"a@b.com","imei":imei,"type":wire_type}}),
        ),
    );

    // Act
    let session = app.core_client.login(login_args(role), no_cb).await.unwrap().unwrap();

    // Assert
    assert_eq!(session.role(), role);
    assert_eq!(session.imei().as_slice().len(), expected_imei_count);
}

#[tokio::test]
async fn failed_login_names_login_type() {
    // Arrange
    let app = spawn_app().await;
    app.backend.stub(
        "POST",
        PATH,
        StubResponse::json(401, json!({"message":"Invalid credentials"})),
    );

    // Act
    let outcome = app
        .core_client
        .login(login_args(Role::Admin), no_cb)
        .await
        .unwrap();

    // Assert
    assert_eq!(
        format!("{:#}", outcome.unwrap_err()),
        "failed to login as admin: Invalid credentials"
    );
    assert!(!app.core_client.is_logged_in());
}

#[tokio::test]
async fn unrecognized_type_leaves_session_untouched() {
    // Arrange
    let app = spawn_app().await;
    app.backend.stub(
        "POST",
        PATH,
        StubResponse::json(
            200,
            json!({"user":{"name":"A","email":"a@b.com","imei":null,"type":"superuser"}}),
        ),
    );

    // Act
    let outcome = app
        .core_client
        .login(login_args(Role::Admin), no_cb)
        .await
        .unwrap();

    // Assert
    assert!(outcome.is_err());
    assert_eq!(*app.session_store().session(), Session::default());
}

#[tokio::test]
async fn missing_password_not_sent() {
    // Arrange
    let app = spawn_app().await;
    let args = LoginReqArgs::new("a@b.com", String::new().into(), Role::User);

    // Act
    let outcome = app.core_client.login(args, no_cb).await.unwrap();

    // Assert
    assert_eq!(
        format!("{:#}", outcome.unwrap_err()),
        "failed to login as user: password is required"
    );
    assert_eq!(app.backend.hit_count(), 0);
}

#[tokio::test]
async fn logout_resets_to_default() {
    // Arrange
    let app = spawn_app().await;
    app.backend.stub(
        "POST",
        PATH,
        StubResponse::json(
            200,
            json!({"user":{"name":"U","email":"a@b.com","imei":"111","type":"user"}}),
        ),
    );
    app.core_client
        .login(login_args(Role::User), no_cb)
        .await
        .unwrap()
        .unwrap();

    // Act
    app.core_client.logout();

    // Assert
    assert_eq!(*app.core_client.session(), Session::default());
    assert!(!app.core_client.is_logged_in());
}

#[tokio::test]
async fn ui_notified_on_completion() {
    // Arrange
    let app = spawn_app().await;
    app.backend
        .stub("POST", PATH, StubResponse::text(500, "boom"));
    let (notify_tx, notify_rx) = futures::channel::oneshot::channel();

    // Act
    let outcome = app
        .core_client
        .login(login_args(Role::Admin), move || {
            let _ = notify_tx.send(());
        })
        .await
        .unwrap();

    // Assert
    assert_eq!(format!("{:#}", outcome.unwrap_err()), "failed to login as admin: boom");
    notify_rx.await.expect("ui callback was not called");
}
