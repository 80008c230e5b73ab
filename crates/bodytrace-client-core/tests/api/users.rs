use bodytrace_shared::{
    imei::Imei,
    pagination::{PageRequest, SortOrder},
    req_args::api::user::{EditUserReqArgs, ListUsersReqArgs, NewUserReqArgs},
};
use serde_json::json;

use crate::helpers::{no_cb, spawn_app, StubResponse};

fn imei(value: &str) -> Imei {
    Imei::parse(value).unwrap()
}

#[tokio::test]
async fn create_user_sends_body_and_returns_user() {
    // Arrange
    let app = spawn_app().await;
    app.backend.stub(
        "POST",
        "/api/user/create",
        StubResponse::json(
            201,
            json!({"message":"User created","user":{"_id":"u1","name":"Ann","email":"ann@c.com","imei":["111"]}}),
        ),
    );
    let args = NewUserReqArgs {
        name: "Ann".to_string(),
        email: "ann@c.com".to_string(),
        password: "pw".to_string().into(),
        imei: vec![imei("111")],
    };

    // Act
    let user = app
        .core_client
        .create_user(args, no_cb)
        .await
        .unwrap()
        .unwrap();

    // Assert
    assert_eq!(user.id.as_ref(), "u1");
    assert_eq!(
        app.backend.single_request().body_json(),
        json!({"name":"Ann","email":"ann@c.com","password":"pw","imei":["111"]})
    );
}

#[tokio::test]
async fn create_user_missing_name_not_sent() {
    // Arrange
    let app = spawn_app().await;
    let args = NewUserReqArgs {
        name: " ".to_string(),
        email: "ann@c.com".to_string(),
        password: "pw".to_string().into(),
        imei: vec![],
    };

    // Act
    let outcome = app.core_client.create_user(args, no_cb).await.unwrap();

    // Assert
    assert_eq!(
        format!("{:#}", outcome.unwrap_err()),
        "failed to create user: name is required"
    );
    assert_eq!(app.backend.hit_count(), 0);
}

#[tokio::test]
async fn list_users_returns_page() {
    // Arrange
    let app = spawn_app().await;
    app.backend.stub(
        "POST",
        "/api/user/list/user",
        StubResponse::json(
            200,
            json!({
                "users":[
                    {"_id":"u1","name":"Ann","email":"ann@c.com","imei":["111"]},
                    {"_id":"u2","name":"Bo","email":"bo@c.com","imei":[]}
                ],
                "totalPages":3,
                "currentPage":2
            }),
        ),
    );
    let args = ListUsersReqArgs::new(
        PageRequest::new(2, 2).unwrap(),
        "createdAt",
        SortOrder::Desc,
        "",
    );

    // Act
    let page = app
        .core_client
        .list_users(args, no_cb)
        .await
        .unwrap()
        .unwrap();

    // Assert
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.current_page, Some(2));
    assert_eq!(
        app.backend.single_request().body_json(),
        json!({"page":2,"limit":2,"sortBy":"createdAt","order":"desc","search":""})
    );
}

#[tokio::test]
async fn edit_user_puts_to_id_path() {
    // Arrange
    let app = spawn_app().await;
    app.backend.stub(
        "PUT",
        "/api/user/users/u1",
        StubResponse::json(
            200,
            json!({"_id":"u1","name":"Ann B","email":"ann@c.com","imei":["111","222"]}),
        ),
    );
    let args = EditUserReqArgs {
        id: "u1".try_into().unwrap(),
        name: "Ann B".to_string(),
        email: "ann@c.com".to_string(),
        imei: vec![imei("111"), imei("222")],
    };

    // Act
    let user = app.core_client.edit_user(args, no_cb).await.unwrap().unwrap();

    // Assert
    assert_eq!(user.name, "Ann B");
    let request = app.backend.single_request();
    assert_eq!(request.method, "PUT");
    assert_eq!(
        request.body_json(),
        json!({"name":"Ann B","email":"ann@c.com","imei":["111","222"]})
    );
}

#[tokio::test]
async fn get_user_by_id() {
    // Arrange
    let app = spawn_app().await;
    app.backend.stub(
        "GET",
        "/api/user/u9/getuserbyid",
        StubResponse::json(200, json!({"user":{"_id":"u9","name":"Cy","email":"cy@c.com"}})),
    );

    // Act
    let user = app
        .core_client
        .get_user("u9".try_into().unwrap(), no_cb)
        .await
        .unwrap()
        .unwrap();

    // Assert
    assert_eq!(user.email, "cy@c.com");
    assert!(user.imei.is_empty());
    assert_eq!(app.backend.single_request().query, "");
}

#[tokio::test]
async fn not_found_names_operation() {
    // Arrange
    let app = spawn_app().await;
    app.backend.stub(
        "GET",
        "/api/user/u9/getuserbyid",
        StubResponse::json(404, json!({"error":"User not found"})),
    );

    // Act
    let outcome = app
        .core_client
        .get_user("u9".try_into().unwrap(), no_cb)
        .await
        .unwrap();

    // Assert
    assert_eq!(
        format!("{:#}", outcome.unwrap_err()),
        "failed to fetch user: User not found"
    );
}
