use anyhow::{anyhow, Context as _};
use bodytrace_shared::{
    const_config::{
        client::CLIENT_DEFAULT_SERVER_ADDRESS,
        path::{PathSpec, PATH_LOGIN},
    },
    req_args::LoginReqArgs,
    session::Session,
    uac::LoginResponse,
};
use closure_traits::{ChannelCallBack, ChannelCallBackOutput};
use futures::channel::oneshot;
use reqwest::{Method, StatusCode};
use std::fmt::Debug;
use std::sync::Arc;
use tracing::{debug, info};

use crate::{download::Download, session_store::SessionStore};

pub mod api;

/// Used as the query for GET requests that take no arguments
pub const DUMMY_ARGUMENT: &[(&str, &str)] = &[];

#[derive(Debug, Clone)]
pub struct Client {
    api_client: reqwest::Client,
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    server_address: String,
    session_store: SessionStore,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(CLIENT_DEFAULT_SERVER_ADDRESS, SessionStore::in_memory())
    }
}

impl Client {
    #[tracing::instrument(name = "NEW CLIENT-CORE", skip(server_address), fields(server_address = %server_address.as_ref()))]
    pub fn new<S: AsRef<str>>(server_address: S, session_store: SessionStore) -> Self {
        let server_address = server_address.as_ref().trim_end_matches('/').to_string();
        Self {
            api_client: reqwest::Client::new(),
            inner: Arc::new(ClientInner {
                server_address,
                session_store,
            }),
        }
    }

    pub fn server_address(&self) -> &str {
        &self.inner.server_address
    }

    pub fn session_store(&self) -> &SessionStore {
        &self.inner.session_store
    }

    /// Snapshot of the current session
    pub fn session(&self) -> Arc<Session> {
        self.inner.session_store.session()
    }

    pub fn is_logged_in(&self) -> bool {
        self.inner.session_store.is_logged_in()
    }

    /// On success the session store holds the returned identity
    #[tracing::instrument(skip(ui_notify))]
    pub fn login<F: UiCallBack>(
        &self,
        args: LoginReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Arc<Session>>> {
        let login_type = args.login_type;
        let action = format!("login as {login_type}");
        if let Err(e) = args.validate() {
            return reject(e, &action, ui_notify);
        }
        let (tx, rx) = oneshot::channel();
        let body = args.to_json_body();
        let session_store = self.inner.session_store.clone();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = process_login(resp, session_store)
                .await
                .with_context(|| format!("failed to {action}"));
            deliver(tx, msg, ui_notify);
        };
        self.initiate_request(&PATH_LOGIN, None, &body, on_done);
        rx
    }

    /// There is no server side session so this only clears local state
    #[tracing::instrument]
    pub fn logout(&self) {
        self.inner.session_store.clear_session();
    }

    #[tracing::instrument(skip(args, on_done))]
    // WARNING: Must skip args as it may contain sensitive info and "safe" versions
    // would usually already be logged by the caller
    fn initiate_request<T, F, O>(&self, path_spec: &PathSpec, id: Option<&str>, args: &T, on_done: F)
    where
        T: serde::Serialize + ?Sized,
        F: ChannelCallBack<O>,
        O: ChannelCallBackOutput,
    {
        let mut request = self
            .api_client
            .request(path_spec.method.clone(), self.endpoint_url(path_spec, id));
        request = if path_spec.method == Method::GET {
            request.query(args)
        } else {
            request.json(args)
        };
        reqwest_cross::fetch(request, on_done)
    }

    #[tracing::instrument(skip(form, on_done))]
    fn initiate_multipart_request<F, O>(
        &self,
        path_spec: &PathSpec,
        form: reqwest::multipart::Form,
        on_done: F,
    ) where
        F: ChannelCallBack<O>,
        O: ChannelCallBackOutput,
    {
        let request = self
            .api_client
            .request(path_spec.method.clone(), self.endpoint_url(path_spec, None))
            .multipart(form);
        reqwest_cross::fetch(request, on_done)
    }

    fn send_request_expect_json<F, T, U>(
        &self,
        path_spec: PathSpec,
        id: Option<&str>,
        args: &T,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<U>>
    where
        T: serde::Serialize + ?Sized,
        F: UiCallBack,
        U: Send + Debug + serde::de::DeserializeOwned + 'static,
    {
        self.send_request_expect_wrapped_json::<F, T, U, U>(path_spec, id, args, ui_notify)
    }

    /// For endpoints whose body `W` has more than one shape and needs to be
    /// normalized into `U`
    fn send_request_expect_wrapped_json<F, T, W, U>(
        &self,
        path_spec: PathSpec,
        id: Option<&str>,
        args: &T,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<U>>
    where
        T: serde::Serialize + ?Sized,
        F: UiCallBack,
        W: Send + Debug + serde::de::DeserializeOwned + Into<U> + 'static,
        U: Send + Debug + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let action = path_spec.action;
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = process_json_body::<W>(resp)
                .await
                .map(Into::<U>::into)
                .with_context(|| format!("failed to {action}"));
            deliver(tx, msg, ui_notify);
        };
        self.initiate_request(&path_spec, id, args, on_done);
        rx
    }

    fn send_request_expect_empty<F, T>(
        &self,
        path_spec: PathSpec,
        args: &T,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>>
    where
        T: serde::Serialize + ?Sized,
        F: UiCallBack,
    {
        let (tx, rx) = oneshot::channel();
        let action = path_spec.action;
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = process_empty(resp)
                .await
                .with_context(|| format!("failed to {action}"));
            deliver(tx, msg, ui_notify);
        };
        self.initiate_request(&path_spec, None, args, on_done);
        rx
    }

    fn send_request_expect_download<F, T>(
        &self,
        path_spec: PathSpec,
        args: &T,
        default_file_name: &'static str,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Download>>
    where
        T: serde::Serialize + ?Sized,
        F: UiCallBack,
    {
        let (tx, rx) = oneshot::channel();
        let action = path_spec.action;
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = process_download(resp, default_file_name)
                .await
                .with_context(|| format!("failed to {action}"));
            deliver(tx, msg, ui_notify);
        };
        self.initiate_request(&path_spec, None, args, on_done);
        rx
    }

    fn send_multipart_expect_download<F>(
        &self,
        path_spec: PathSpec,
        form: reqwest::multipart::Form,
        default_file_name: &'static str,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Download>>
    where
        F: UiCallBack,
    {
        let (tx, rx) = oneshot::channel();
        let action = path_spec.action;
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = process_download(resp, default_file_name)
                .await
                .with_context(|| format!("failed to {action}"));
            deliver(tx, msg, ui_notify);
        };
        self.initiate_multipart_request(&path_spec, form, on_done);
        rx
    }

    #[tracing::instrument(ret)]
    fn endpoint_url(&self, path_spec: &PathSpec, id: Option<&str>) -> String {
        let path = match id {
            Some(id) => path_spec.path_with_id(id),
            None => path_spec.path.to_string(),
        };
        format!("{}{path}", self.inner.server_address)
    }
}

/// Fails the operation without sending anything
fn reject<T, E, F>(err: E, action: &str, ui_notify: F) -> oneshot::Receiver<anyhow::Result<T>>
where
    E: Into<anyhow::Error>,
    F: UiCallBack,
{
    let (tx, rx) = oneshot::channel();
    let err = err.into().context(format!("failed to {action}"));
    info!("request not sent: {err:#}");
    deliver(tx, Err(err), ui_notify);
    rx
}

/// The receiver may have been dropped if the screen moved on, that is not an
/// error
fn deliver<T, F: UiCallBack>(tx: oneshot::Sender<T>, msg: T, ui_notify: F) {
    if tx.send(msg).is_err() {
        debug!("receiver dropped, discarding superseded response");
    }
    ui_notify();
}

#[tracing::instrument(ret, err(Debug))]
async fn process_empty(response: reqwest::Result<reqwest::Response>) -> anyhow::Result<()> {
    let (response, status) = extract_response(response)?;
    if status.is_success() {
        Ok(())
    } else {
        Err(handle_error(response).await)
    }
}

#[tracing::instrument(ret, err(Debug))]
async fn process_json_body<T>(response: reqwest::Result<reqwest::Response>) -> anyhow::Result<T>
where
    T: Debug + serde::de::DeserializeOwned,
{
    let (response, status) = extract_response(response)?;
    if status.is_success() {
        Ok(response
            .json()
            .await
            .context("failed to parse result as json")?)
    } else {
        Err(handle_error(response).await)
    }
}

#[tracing::instrument(ret, err(Debug))]
async fn process_download(
    response: reqwest::Result<reqwest::Response>,
    default_file_name: &'static str,
) -> anyhow::Result<Download> {
    let (response, status) = extract_response(response)?;
    if !status.is_success() {
        return Err(handle_error(response).await);
    }
    let headers = response.headers().clone();
    let bytes = response
        .bytes()
        .await
        .context("failed to read response body")?;
    Ok(Download::from_response_parts(
        &headers,
        bytes.to_vec(),
        default_file_name,
    ))
}

#[tracing::instrument(ret, err(Debug))]
async fn process_login(
    response: reqwest::Result<reqwest::Response>,
    session_store: SessionStore,
) -> anyhow::Result<Arc<Session>> {
    let login_response: LoginResponse = process_json_body(response).await?;
    Ok(session_store.set_session(login_response.user)?)
}

#[tracing::instrument(ret)]
async fn handle_error(response: reqwest::Response) -> anyhow::Error {
    let status = response.status();
    debug_assert!(
        !status.is_success(),
        "this is supposed to be an error, right? Status code is: {status}"
    );
    let Ok(body) = response.text().await else {
        return anyhow!("failed to get response body (status code: {status})");
    };
    match error_message_from_body(&body) {
        Some(msg) => anyhow!(msg),
        None => anyhow!("request failed with status code: {status} and no body"),
    }
}

/// Prefers the `message` or `error` field of a JSON body and falls back to the
/// raw text
fn error_message_from_body(body: &str) -> Option<String> {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: Option<String>,
        error: Option<String>,
    }

    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    let from_json = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|e| e.message.or(e.error))
        .filter(|msg| !msg.trim().is_empty());
    Some(from_json.unwrap_or_else(|| body.to_string()))
}

/// Provides a way to standardize the error message
#[tracing::instrument(ret, err(Debug))]
fn extract_response(
    response: reqwest::Result<reqwest::Response>,
) -> anyhow::Result<(reqwest::Response, StatusCode)> {
    if response.is_err() {
        info!("Response is err: {:#?}", response);
    }
    let response = response.context("failed to send request")?;
    let status = response.status();
    Ok((response, status))
}

pub trait UiCallBack: 'static + Send + FnOnce() {}
impl<T> UiCallBack for T where T: 'static + Send + FnOnce() {}

#[cfg(not(target_arch = "wasm32"))]
pub mod closure_traits {
    pub trait ChannelCallBack<O>:
        'static + Send + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    impl<T, O> ChannelCallBack<O> for T where
        T: 'static + Send + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    pub trait ChannelCallBackOutput: futures::Future<Output = ()> + Send {}
    impl<T> ChannelCallBackOutput for T where T: futures::Future<Output = ()> + Send {}
}

#[cfg(target_arch = "wasm32")]
pub mod closure_traits {
    pub trait ChannelCallBack<O>:
        'static + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    impl<T, O> ChannelCallBack<O> for T where
        T: 'static + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    pub trait ChannelCallBackOutput: futures::Future<Output = ()> {}
    impl<T> ChannelCallBackOutput for T where T: futures::Future<Output = ()> {}
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::message(r#"{"message":"Invalid credentials"}"#, Some("Invalid credentials"))]
    #[case::error(r#"{"error":"User not found"}"#, Some("User not found"))]
    #[case::message_preferred(r#"{"message":"a","error":"b"}"#, Some("a"))]
    #[case::other_json(r#"{"status":"bad"}"#, Some(r#"{"status":"bad"}"#))]
    #[case::plain_text("Not Found", Some("Not Found"))]
    #[case::blank_message(r#"{"message":" "}"#, Some(r#"{"message":" "}"#))]
    #[case::empty("  ", None)]
    fn error_message_extraction(#[case] body: &str, #[case] expected: Option<&str>) {
        assert_eq!(error_message_from_body(body).as_deref(), expected);
    }

    #[rstest]
    #[case::trailing_slash_removed("http://localhost:8080/", "http://localhost:8080/api/admin/login")]
    #[case::plain("https://api.example.com", "https://api.example.com/api/admin/login")]
    fn endpoint_urls(#[case] server: &str, #[case] expected: &str) {
        let client = Client::new(server, SessionStore::in_memory());
        assert_eq!(client.endpoint_url(&PATH_LOGIN, None), expected);
    }
}
