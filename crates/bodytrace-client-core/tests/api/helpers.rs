//! Stub of the device backend. Each test spawns its own on a random port,
//! registers the responses it needs and inspects what the client sent.

use std::{
    collections::HashMap,
    net::TcpListener,
    ops::Deref,
    sync::{Arc, LazyLock, Mutex},
};

use actix_web::{http::StatusCode, web, App, HttpRequest, HttpResponse, HttpServer};
use bodytrace_client_core::{Client, SessionStore};
use bodytrace_shared::telemetry::{self, get_subscriber, init_subscriber};
use uuid::Uuid;

// Ensure that the `tracing` stack is only initialised once
pub static TRACING: LazyLock<String> = LazyLock::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    if std::env::var("TEST_LOG").is_ok() {
        let log_file_name = format!("client_core_tests{}", Uuid::new_v4());
        let (file, path) = telemetry::create_trace_file("traces", &log_file_name).unwrap();
        let subscriber = get_subscriber(subscriber_name, default_filter_level, file);
        init_subscriber(subscriber).unwrap();
        format!("Traces for tests being written to: {path:?}")
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber).unwrap();
        "Traces set to std::io::sink".to_string()
    }
});

/// Empty function for use when a call back isn't needed
pub fn no_cb() {}

#[derive(Debug, Clone)]
pub struct StubResponse {
    status: u16,
    body: Vec<u8>,
    headers: Vec<(String, String)>,
}

impl StubResponse {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            body: body.to_string().into_bytes(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.as_bytes().to_vec(),
            headers: vec![],
        }
    }

    pub fn file(bytes: &[u8], content_disposition: Option<&str>) -> Self {
        let mut headers = vec![(
            "content-type".to_string(),
            "application/octet-stream".to_string(),
        )];
        if let Some(value) = content_disposition {
            headers.push(("content-disposition".to_string(), value.to_string()));
        }
        Self {
            status: 200,
            body: bytes.to_vec(),
            headers,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn body_json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body was not json")
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Decoded query string pairs in the order they were sent
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        web::Query::<Vec<(String, String)>>::from_query(&self.query)
            .expect("failed to parse query string")
            .into_inner()
    }
}

#[derive(Debug, Default)]
struct StubState {
    responses: Mutex<HashMap<(String, String), StubResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

#[derive(Debug, Clone, Default)]
pub struct StubBackend {
    state: Arc<StubState>,
}

impl StubBackend {
    /// Registers the response for `method` + `path`. Unregistered routes
    /// return 404.
    pub fn stub(&self, method: &str, path: &str, response: StubResponse) {
        self.state
            .responses
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), response);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn hit_count(&self) -> usize {
        self.state.requests.lock().unwrap().len()
    }

    /// The only request received, panics if there wasn't exactly one
    pub fn single_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }
}

async fn handle(req: HttpRequest, body: web::Bytes, backend: web::Data<StubBackend>) -> HttpResponse {
    let recorded = RecordedRequest {
        method: req.method().to_string(),
        path: req.path().to_string(),
        query: req.query_string().to_string(),
        content_type: req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string(),
        body: body.to_vec(),
    };
    let key = (recorded.method.clone(), recorded.path.clone());
    backend.state.requests.lock().unwrap().push(recorded);
    let stub = backend.state.responses.lock().unwrap().get(&key).cloned();
    match stub {
        Some(stub) => {
            let mut builder = HttpResponse::build(StatusCode::from_u16(stub.status).unwrap());
            for (name, value) in stub.headers {
                builder.insert_header((name, value));
            }
            builder.body(stub.body)
        }
        None => HttpResponse::NotFound().body(format!("no stub for {key:?}")),
    }
}

pub struct TestApp {
    pub address: String,
    pub backend: StubBackend,
    pub core_client: Client,
}

impl TestApp {
    /// The store the client writes the session to
    pub fn session_store(&self) -> &SessionStore {
        self.core_client.session_store()
    }
}

pub async fn spawn_app() -> TestApp {
    start_tracing();
    let backend = StubBackend::default();
    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let data = web::Data::new(backend.clone());
    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .app_data(web::PayloadConfig::new(10 * 1024 * 1024))
            .default_service(web::to(handle))
    })
    .workers(1)
    .listen(listener)
    .expect("failed to listen")
    .run();
    tokio::spawn(server);

    let address = format!("http://127.0.0.1:{port}");
    let core_client = Client::new(&address, SessionStore::in_memory());
    TestApp {
        address,
        backend,
        core_client,
    }
}

fn start_tracing() {
    // Accessing TRACING also forces the LazyLock to initialize
    let logging_msg = TRACING.deref();
    println!("{logging_msg}");
}
