use bodytrace_shared::{
    device::ReadingColumns,
    imei::Imei,
    pagination::PageRequest,
    time::{DateRange, Timestamp},
};
use serde_json::json;

use crate::helpers::{no_cb, spawn_app, StubResponse};

fn imei(value: &str) -> Imei {
    Imei::parse(value).unwrap()
}

#[tokio::test]
async fn fetch_device_data_returns_readings() {
    // Arrange
    let app = spawn_app().await;
    app.backend.stub(
        "POST",
        "/api/user/device/data",
        StubResponse::json(
            200,
            json!([
                {"imei":"111","ts":"2024-03-01T10:00:00Z","values":{"weight":80000}},
                {"imei":"111","ts":1709287200000i64}
            ]),
        ),
    );

    // Act
    let readings = app
        .core_client
        .fetch_device_data(vec![imei("111")], no_cb)
        .await
        .unwrap()
        .unwrap();

    // Assert
    assert_eq!(readings.len(), 2);
    assert_eq!(readings[0].ts, Some(Timestamp::from_millis(1_709_287_200_000)));
    assert!(ReadingColumns::from_readings(&readings).weight);
    assert_eq!(app.backend.single_request().body_json(), json!({"imei":"111"}));
}

#[tokio::test]
async fn zero_readings_is_not_an_error() {
    // Arrange
    let app = spawn_app().await;
    app.backend
        .stub("POST", "/api/user/device/data", StubResponse::json(200, json!([])));

    // Act
    let readings = app
        .core_client
        .fetch_device_data(vec![imei("111")], no_cb)
        .await
        .unwrap();

    // Assert
    assert!(readings.unwrap().is_empty());
}

#[tokio::test]
async fn missing_imei_not_sent() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let outcome = app
        .core_client
        .fetch_device_data(vec![], no_cb)
        .await
        .unwrap();

    // Assert
    assert_eq!(
        format!("{:#}", outcome.unwrap_err()),
        "failed to fetch device data: IMEI is required"
    );
    assert_eq!(app.backend.hit_count(), 0);
}

#[tokio::test]
async fn filtered_data_defaults_missing_totals() {
    // Arrange
    let app = spawn_app().await;
    app.backend.stub(
        "POST",
        "/api/user/filtered-data",
        StubResponse::json(200, json!({"data":[{"ts":1,"values":{"systolic":12000}}]})),
    );
    let range = DateRange::parse("2024-01-01", "2024-01-31").unwrap();

    // Act
    let page = app
        .core_client
        .fetch_filtered_device_data(vec![imei("111")], range, PageRequest::default(), no_cb)
        .await
        .unwrap()
        .unwrap();

    // Assert
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.total_count, 0);
    assert_eq!(
        app.backend.single_request().body_json(),
        json!({"imei":"111","startDate":"2024-01-01","endDate":"2024-01-31","page":1,"limit":10})
    );
}

#[tokio::test]
async fn csv_download_uses_server_file_name() {
    // Arrange
    let app = spawn_app().await;
    app.backend.stub(
        "POST",
        "/api/user/downloadCSV",
        StubResponse::file(
            b"ts,weight\n1,80000\n",
            Some(r#"attachment; filename="imei_111.csv""#),
        ),
    );

    // Act
    let download = app
        .core_client
        .download_filtered_device_data(
            vec![imei("111")],
            DateRange::default(),
            PageRequest::default(),
            no_cb,
        )
        .await
        .unwrap()
        .unwrap();

    // Assert
    assert_eq!(download.file_name, "imei_111.csv");
    assert_eq!(download.bytes, b"ts,weight\n1,80000\n");
}

#[tokio::test]
async fn csv_download_default_file_name() {
    // Arrange
    let app = spawn_app().await;
    app.backend
        .stub("POST", "/api/user/downloadCSV", StubResponse::file(b"a", None));

    // Act
    let download = app
        .core_client
        .download_filtered_device_data(
            vec![imei("111")],
            DateRange::default(),
            PageRequest::default(),
            no_cb,
        )
        .await
        .unwrap()
        .unwrap();

    // Assert
    assert_eq!(download.file_name, "device_data.csv");
}
