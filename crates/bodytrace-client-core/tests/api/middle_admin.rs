use bodytrace_shared::{
    imei::Imei,
    pagination::{PageRequest, SortOrder},
    req_args::api::user::ListUsersReqArgs,
};
use serde_json::json;

use crate::helpers::{no_cb, spawn_app, StubResponse};

#[tokio::test]
async fn list_clients_uses_email_and_query() {
    // Arrange
    let app = spawn_app().await;
    app.backend.stub(
        "GET",
        "/api/middle-admin/mid@clinic.com/users",
        StubResponse::json(
            200,
            json!({
                "data":[{"_id":"u1","name":"Ann","email":"ann@c.com","imei":["111"]}],
                "totalPages":4,
                "totalCount":31
            }),
        ),
    );
    let args = ListUsersReqArgs::new(
        PageRequest::new(1, 10).unwrap(),
        "createdAt",
        SortOrder::Desc,
        "ann",
    );

    // Act
    let page = app
        .core_client
        .list_middle_admin_users("mid@clinic.com", args, no_cb)
        .await
        .unwrap()
        .unwrap();

    // Assert
    assert_eq!(page.total_pages, 4);
    assert_eq!(page.total_count, 31);
    assert_eq!(page.data[0].imei.first(), Some(&Imei::parse("111").unwrap()));
    let query = app.backend.single_request().query_pairs();
    assert_eq!(
        query,
        vec![
            ("page".to_string(), "1".to_string()),
            ("limit".to_string(), "10".to_string()),
            ("sortBy".to_string(), "createdAt".to_string()),
            ("order".to_string(), "desc".to_string()),
            ("search".to_string(), "ann".to_string()),
        ]
    );
}

#[tokio::test]
async fn blank_middle_admin_not_sent() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let outcome = app
        .core_client
        .list_middle_admin_users("", ListUsersReqArgs::new(PageRequest::default(), "createdAt", SortOrder::Desc, ""), no_cb)
        .await
        .unwrap();

    // Assert
    assert!(outcome.is_err());
    assert_eq!(app.backend.hit_count(), 0);
}

#[tokio::test]
async fn client_device_data() {
    // Arrange
    let app = spawn_app().await;
    app.backend.stub(
        "POST",
        "/api/middle-admin/getdevicedata",
        StubResponse::json(200, json!({"data":[{"ts":5,"values":{"diastolic":8000}}]})),
    );

    // Act
    let readings = app
        .core_client
        .fetch_middle_admin_device_data(vec![Imei::parse("111").unwrap()], no_cb)
        .await
        .unwrap()
        .unwrap();

    // Assert
    assert_eq!(readings.len(), 1);
    assert_eq!(readings[0].diastolic(), Some(8000.0));
}
