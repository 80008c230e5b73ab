use bodytrace_shared::req_args::api::user::{
    ChangePasswordReqArgs, PasswordResetRequestReqArgs, ResetPasswordReqArgs,
};
use serde_json::json;

use crate::helpers::{no_cb, spawn_app, StubResponse};

fn change_args(new: &str, confirm: &str) -> ChangePasswordReqArgs {
    ChangePasswordReqArgs {
        email: "a@b.com".to_string(),
        old_password: "old".to_string().into(),
        new_password: new.to_string().into(),
        confirm_password: confirm.to_string().into(),
    }
}

#[tokio::test]
async fn change_password_mismatch_never_sent() {
    // Arrange
    let app = spawn_app().await;
    app.backend.stub(
        "POST",
        "/api/user/change-password",
        StubResponse::json(200, json!({"message":"ok"})),
    );

    // Act
    let outcome = app
        .core_client
        .change_password(&change_args("new1", "new2"), no_cb)
        .await
        .unwrap();

    // Assert
    assert_eq!(
        format!("{:#}", outcome.unwrap_err()),
        "failed to change password: New password and confirm password do not match."
    );
    assert_eq!(app.backend.hit_count(), 0);
}

#[tokio::test]
async fn change_password_success() {
    // Arrange
    let app = spawn_app().await;
    app.backend.stub(
        "POST",
        "/api/user/change-password",
        StubResponse::json(200, json!({"message":"Password changed"})),
    );

    // Act
    let outcome = app
        .core_client
        .change_password(&change_args("new", "new"), no_cb)
        .await
        .unwrap();

    // Assert
    outcome.unwrap();
    assert_eq!(
        app.backend.single_request().body_json(),
        json!({"email":"a@b.com","oldPassword":"old","newPassword":"new","confirmPassword":"new"})
    );
}

#[tokio::test]
async fn wrong_old_password_reported() {
    // Arrange
    let app = spawn_app().await;
    app.backend.stub(
        "POST",
        "/api/user/change-password",
        StubResponse::json(400, json!({"message":"Old password is incorrect"})),
    );

    // Act
    let outcome = app
        .core_client
        .change_password(&change_args("new", "new"), no_cb)
        .await
        .unwrap();

    // Assert
    assert_eq!(
        format!("{:#}", outcome.unwrap_err()),
        "failed to change password: Old password is incorrect"
    );
}

#[tokio::test]
async fn request_reset_sends_email() {
    // Arrange
    let app = spawn_app().await;
    app.backend.stub(
        "POST",
        "/api/user/request-password-reset",
        StubResponse::json(200, json!({"message":"sent"})),
    );

    // Act
    let outcome = app
        .core_client
        .request_password_reset(
            PasswordResetRequestReqArgs {
                email: "a@b.com".to_string(),
            },
            no_cb,
        )
        .await
        .unwrap();

    // Assert
    outcome.unwrap();
    assert_eq!(app.backend.single_request().body_json(), json!({"email":"a@b.com"}));
}

#[tokio::test]
async fn reset_password_with_token() {
    // Arrange
    let app = spawn_app().await;
    app.backend.stub(
        "POST",
        "/api/user/reset-password",
        StubResponse::text(200, ""),
    );
    let args = ResetPasswordReqArgs {
        reset_token: "tok123".to_string(),
        new_password: "pw".to_string().into(),
        confirm_password: "pw".to_string().into(),
    };

    // Act
    let outcome = app.core_client.reset_password(&args, no_cb).await.unwrap();

    // Assert
    outcome.unwrap();
    assert_eq!(
        app.backend.single_request().body_json(),
        json!({"resetToken":"tok123","newPassword":"pw","confirmPassword":"pw"})
    );
}

#[tokio::test]
async fn expired_token_reports_status_when_no_body() {
    // Arrange
    let app = spawn_app().await;
    app.backend.stub(
        "POST",
        "/api/user/reset-password",
        StubResponse::text(410, ""),
    );
    let args = ResetPasswordReqArgs {
        reset_token: "old".to_string(),
        new_password: "pw".to_string().into(),
        confirm_password: "pw".to_string().into(),
    };

    // Act
    let outcome = app.core_client.reset_password(&args, no_cb).await.unwrap();

    // Assert
    let actual = format!("{:#}", outcome.unwrap_err());
    assert!(
        actual.starts_with("failed to reset password: request failed with status code: 410"),
        "{actual}"
    );
}
