use bodytrace_client_core::FileUpload;
use rstest::rstest;

use crate::helpers::{no_cb, spawn_app, StubResponse};

fn spreadsheet() -> FileUpload {
    FileUpload {
        file_name: "users.xlsx".to_string(),
        bytes: b"PK\x03\x04 not really a spreadsheet".to_vec(),
    }
}

#[derive(Debug, Clone, Copy)]
enum Upload {
    CreateUsers,
    ResetPasswords,
    CreateMiddleAdmins,
}

#[rstest]
#[case::create_users(Upload::CreateUsers, "/api/user/create-users-from-excel", "created_users.xlsx")]
#[case::reset_passwords(
    Upload::ResetPasswords,
    "/api/user/reset-password-from-excel",
    "reset_passwords.xlsx"
)]
#[case::middle_admins(
    Upload::CreateMiddleAdmins,
    "/api/user/middle-admin/create-middle-admins",
    "created_middle_admins.xlsx"
)]
#[tokio::test]
async fn upload_returns_result_file(
    #[case] upload: Upload,
    #[case] path: &str,
    #[case] default_name: &str,
) {
    // Arrange
    let app = spawn_app().await;
    app.backend
        .stub("POST", path, StubResponse::file(b"result", None));
    let client = &app.core_client;

    // Act
    let rx = match upload {
        Upload::CreateUsers => client.create_users_from_excel(spreadsheet(), no_cb),
        Upload::ResetPasswords => client.reset_passwords_from_excel(spreadsheet(), no_cb),
        Upload::CreateMiddleAdmins => client.create_middle_admins_from_excel(spreadsheet(), no_cb),
    };
    let download = rx.await.unwrap().unwrap();

    // Assert
    assert_eq!(download.file_name, default_name);
    assert_eq!(download.bytes, b"result");
    let request = app.backend.single_request();
    assert!(
        request.content_type.starts_with("multipart/form-data"),
        "{}",
        request.content_type
    );
    let body = request.body_text();
    assert!(body.contains(r#"name="file""#), "{body}");
    assert!(body.contains(r#"filename="users.xlsx""#), "{body}");
}

#[tokio::test]
async fn non_spreadsheet_not_sent() {
    // Arrange
    let app = spawn_app().await;
    let file = FileUpload {
        file_name: "users.csv".to_string(),
        bytes: b"a,b".to_vec(),
    };

    // Act
    let outcome = app
        .core_client
        .create_users_from_excel(file, no_cb)
        .await
        .unwrap();

    // Assert
    assert!(outcome.is_err());
    assert_eq!(app.backend.hit_count(), 0);
}

#[tokio::test]
async fn server_error_names_operation() {
    // Arrange
    let app = spawn_app().await;
    app.backend.stub(
        "POST",
        "/api/user/create-users-from-excel",
        StubResponse::text(500, "Invalid spreadsheet format"),
    );

    // Act
    let outcome = app
        .core_client
        .create_users_from_excel(spreadsheet(), no_cb)
        .await
        .unwrap();

    // Assert
    assert_eq!(
        format!("{:#}", outcome.unwrap_err()),
        "failed to create users from excel: Invalid spreadsheet format"
    );
}
