use anyhow::Context;
use closure_traits::{ChannelCallBack, ChannelCallBackOutput};
use futures::channel::oneshot;
use libris_shared::{
    const_config::{
        client::CLIENT_DEFAULT_SERVER_ADDRESS,
        path::{ApiPath, PATH_API_DASHBOARD, PATH_LOGIN},
    },
    library::Dashboard,
    req_args::LoginReqArgs,
    uac::{LoginResponse, MessageResponse, Role, UserProfile},
};
use reqwest::{Method, RequestBuilder};
use secrecy::ExposeSecret as _;
use std::fmt::Debug;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{info, warn};

use crate::{
    navigation::{self, Navigation},
    ResponseError, Session, SessionError, SessionStore,
};

pub mod api;

/// Used for requests that take no arguments
pub const NO_ARGUMENT: &[(&str, &str)] = &[];

/// Sends requests to the library backend on behalf of the current session
///
/// Every request goes through [`Client::build_request`] which attaches the
/// session's bearer token.
#[derive(Debug, Clone)]
pub struct Client {
    api_client: reqwest::Client,
    inner: Arc<Mutex<ClientInner>>,
}

#[derive(Debug)]
struct ClientInner {
    server_address: String,
    session: SessionStore,
}

impl Default for Client {
    fn default() -> Self {
        Self::new_in_memory(CLIENT_DEFAULT_SERVER_ADDRESS.to_string())
    }
}

/// Result of a login whose credential check succeeded
#[must_use]
#[derive(Debug)]
pub enum LoginOutcome {
    /// Token and profile are both stored
    Authenticated(Arc<UserProfile>),
    /// The token is stored but fetching the profile failed. The session is
    /// authenticated without a user (and so without a role) until the caller
    /// retries the profile fetch or logs out.
    TokenOnly(SessionError),
}

impl LoginOutcome {
    /// Returns `true` if the login outcome is [`Authenticated`].
    ///
    /// [`Authenticated`]: LoginOutcome::Authenticated
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(..))
    }
}

impl ClientInner {
    #[tracing::instrument]
    fn new(server_address: String, session: SessionStore) -> Self {
        Self {
            server_address,
            session,
        }
    }
}

impl Client {
    #[tracing::instrument(name = "NEW CLIENT-CORE")]
    pub fn new(server_address: String, session: SessionStore) -> Self {
        Self {
            api_client: reqwest::Client::new(),
            inner: Arc::new(Mutex::new(ClientInner::new(server_address, session))),
        }
    }

    /// A client whose session only lives as long as the process
    pub fn new_in_memory(server_address: String) -> Self {
        Self::new(server_address, SessionStore::new_in_memory())
    }

    /// Two step login: the credential check returns a token which is stored
    /// before the profile is fetched with it.
    ///
    /// - Credential check fails: `Err` wrapping [`SessionError::Authentication`]
    ///   and the session is untouched
    /// - Profile fetch fails: [`LoginOutcome::TokenOnly`]
    #[tracing::instrument(skip(ui_notify))]
    pub fn login<F: UiCallBack>(
        &self,
        args: LoginReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<LoginOutcome>> {
        let (tx, rx) = oneshot::channel();
        let args = serde_json::json!({
            "username": args.username,
            "password": args.password.expose_secret(),
        });
        let client = self.clone();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = process_login(resp, client).await;
            deliver(tx, msg);
            ui_notify();
        };

        self.initiate_request(PATH_LOGIN, &args, on_done);
        rx
    }

    /// Clears the session locally, there is no server side session to end
    #[tracing::instrument]
    pub fn logout(&self) -> Result<(), SessionError> {
        self.lock_inner().session.logout()
    }

    /// Decides where a navigation to `path` ends up for the current session
    #[tracing::instrument(ret)]
    pub fn navigate(&self, path: &str) -> Navigation {
        navigation::navigate_with_session(path, &self.lock_inner().session)
    }

    #[tracing::instrument(skip(args, on_done))]
    // WARNING: Must skip args as it my contain sensitive info and "safe" versions
    // would usually already be logged by the caller
    fn initiate_request<P, T, F, O>(&self, path: P, args: &T, on_done: F)
    where
        P: Into<ApiPath> + Debug,
        T: serde::Serialize,
        F: ChannelCallBack<O>,
        O: ChannelCallBackOutput,
    {
        let request = self.build_request(path.into(), args);
        reqwest_cross::fetch(request, on_done)
    }

    /// Builds a request against the configured server with the session's
    /// credentials attached
    fn build_request<T: serde::Serialize>(&self, path: ApiPath, args: &T) -> RequestBuilder {
        let has_body = !(path.method == Method::GET || path.method == Method::DELETE);
        let mut request = self
            .api_client
            .request(path.method, self.path_to_url(&path.path));
        request = if has_body {
            request.json(&args)
        } else {
            request.query(&args)
        };
        self.attach_bearer_token(request)
    }

    /// Pre-request hook, adds `Authorization: Bearer <token>` when a token is
    /// set.
    ///
    /// A token that is not a valid header value leaves an error in the
    /// builder, which is returned unchanged when the request is sent.
    fn attach_bearer_token(&self, request: RequestBuilder) -> RequestBuilder {
        let token = self.lock_inner().session.token().to_string();
        if token.is_empty() {
            request
        } else {
            request.bearer_auth(token)
        }
    }

    fn send_request_expect_json<P, F, T, U>(
        &self,
        path: P,
        args: &T,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<U>>
    where
        P: Into<ApiPath> + Debug,
        T: serde::Serialize,
        F: UiCallBack,
        U: Send + std::fmt::Debug + serde::de::DeserializeOwned + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = process_json_body(resp).await;
            deliver(tx, msg);
            ui_notify();
        };
        self.initiate_request(path, args, on_done);
        rx
    }

    /// For arguments rejected before anything is sent
    fn immediate_result<F, U: Debug>(
        &self,
        msg: anyhow::Result<U>,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<U>>
    where
        F: UiCallBack,
    {
        let (tx, rx) = oneshot::channel();
        deliver(tx, msg);
        ui_notify();
        rx
    }

    #[tracing::instrument(ret)]
    fn path_to_url(&self, path: &str) -> String {
        format!("{}{path}", &self.lock_inner().server_address)
    }

    fn lock_inner(&self) -> MutexGuard<'_, ClientInner> {
        self.inner.lock().expect("failed to unlock client mutex")
    }

    pub fn server_address(&self) -> String {
        self.lock_inner().server_address.clone()
    }

    pub fn session(&self) -> Session {
        self.lock_inner().session.session().clone()
    }

    pub fn user(&self) -> Option<Arc<UserProfile>> {
        self.lock_inner().session.user()
    }

    pub fn role(&self) -> Option<Role> {
        self.lock_inner().session.role().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock_inner().session.is_authenticated()
    }

    /// Replaces the stored profile, for use after [`LoginOutcome::TokenOnly`]
    /// once the profile has been fetched again
    pub fn set_user(&self, profile: UserProfile) -> Result<Arc<UserProfile>, SessionError> {
        self.lock_inner().session.set_user(profile)
    }
}

fn deliver<T: Debug>(tx: oneshot::Sender<anyhow::Result<T>>, msg: anyhow::Result<T>) {
    if let Err(msg) = tx.send(msg) {
        warn!(?msg, "receiver dropped before the result was delivered");
    }
}

#[tracing::instrument(ret, err(Debug))]
async fn process_json_body<T>(response: reqwest::Result<reqwest::Response>) -> anyhow::Result<T>
where
    T: Debug + serde::de::DeserializeOwned,
{
    let response = extract_response(response)?;
    if response.status().is_success() {
        Ok(response
            .json()
            .await
            .context("failed to parse result as json")?)
    } else {
        Err(handle_error(response).await)
    }
}

#[tracing::instrument(ret, err(Debug), skip(client))]
async fn process_login(
    response: reqwest::Result<reqwest::Response>,
    client: Client,
) -> anyhow::Result<LoginOutcome> {
    let login_response: LoginResponse = process_json_body(response)
        .await
        .map_err(SessionError::Authentication)?;
    client
        .lock_inner()
        .session
        .set_token(login_response.token)?;

    // Built only after the token is stored so the hook authenticates it
    let profile_response = client
        .build_request(PATH_API_DASHBOARD.into(), &NO_ARGUMENT)
        .send()
        .await;
    let dashboard: Dashboard = match process_json_body(profile_response).await {
        Ok(dashboard) => dashboard,
        Err(e) => {
            warn!(?e, "token stored but profile fetch failed");
            return Ok(LoginOutcome::TokenOnly(SessionError::ProfileFetch(e)));
        }
    };
    let user = client.lock_inner().session.set_user(dashboard.user)?;
    info!(role = %user.role, "login complete");
    Ok(LoginOutcome::Authenticated(user))
}

#[tracing::instrument(ret)]
async fn handle_error(response: reqwest::Response) -> anyhow::Error {
    let status = response.status();
    debug_assert!(
        !status.is_success(),
        "this is supposed to be an error, right? Status code is: {status}"
    );
    let Ok(body) = response.text().await else {
        return ResponseError {
            status,
            message: "failed to get response body".to_string(),
        }
        .into();
    };
    let message = if body.is_empty() {
        format!("request failed with status code: {status} and no body")
    } else {
        match serde_json::from_str::<MessageResponse>(&body) {
            Ok(MessageResponse { message }) => message,
            Err(_) => body,
        }
    };
    ResponseError { status, message }.into()
}

/// Provides a way to standardize the error message
#[tracing::instrument(ret, err(Debug))]
fn extract_response(
    response: reqwest::Result<reqwest::Response>,
) -> anyhow::Result<reqwest::Response> {
    if response.is_err() {
        info!("Response is err: {:#?}", response);
    }
    response.context("failed to send request")
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
