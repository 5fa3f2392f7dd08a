use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION};
use serde_json::Value;
use tracing::{debug, error, warn};

use super::endpoint::{Body, Endpoint, FormPart, ResponseKind};
use super::envelope::{classify, error_message, status_category, Envelope, Outcome};
use super::expiry::{ExpiryEvent, ExpirySender};
use super::notify::{NoticeLevel, Notifier, TracingNotifier};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult, FailureOrigin};
use crate::identity::{ExpiryClear, SessionStore};

pub const CLIENT_TYPE_HEADER: &str = "x-client-type";

/// Result of executing an endpoint: a normalized envelope, or the untouched transport
/// response for blob downloads.
#[derive(Debug)]
pub enum Reply {
    Envelope(Envelope),
    Raw(reqwest::Response),
}

/// Session generation a request was sent under.
#[derive(Debug, Clone, Copy)]
struct Issued {
    epoch: u64,
    authenticated: bool,
}

struct Inner {
    config: ClientConfig,
    base_url: String,
    http: reqwest::Client,
    session: Arc<SessionStore>,
    expiry: Option<ExpirySender>,
    notifier: Arc<dyn Notifier>,
}

/// The single configured HTTP client every endpoint call goes through.
/// Cheap to clone; clones share the connection pool and session.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

pub struct ApiClientBuilder {
    config: ClientConfig,
    session: Arc<SessionStore>,
    expiry: Option<ExpirySender>,
    notifier: Arc<dyn Notifier>,
}

impl ApiClientBuilder {
    pub fn expiry(mut self, sender: ExpirySender) -> Self {
        self.expiry = Some(sender);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn build(self) -> ClientResult<ApiClient> {
        let http = reqwest::Client::builder()
            .timeout(self.config.timeout())
            .build()
            .map_err(|e| ClientError::config(format!("failed to build http client: {}", e)))?;
        let base_url = self.config.base_url();
        reqwest::Url::parse(&base_url)
            .map_err(|e| ClientError::config(format!("invalid base url '{}': {}", base_url, e)))?;
        Ok(ApiClient {
            inner: Arc::new(Inner {
                config: self.config,
                base_url,
                http,
                session: self.session,
                expiry: self.expiry,
                notifier: self.notifier,
            }),
        })
    }
}

impl ApiClient {
    pub fn builder(config: ClientConfig, session: Arc<SessionStore>) -> ApiClientBuilder {
        ApiClientBuilder { config, session, expiry: None, notifier: Arc::new(TracingNotifier) }
    }

    pub fn config(&self) -> &ClientConfig { &self.inner.config }

    pub fn session(&self) -> &Arc<SessionStore> { &self.inner.session }

    pub fn notifier(&self) -> &Arc<dyn Notifier> { &self.inner.notifier }

    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.inner.base_url, path)
        } else {
            format!("{}/{}", self.inner.base_url, path)
        }
    }

    /// Outgoing hook: headers attached to every request.
    pub fn outgoing_headers(&self) -> ClientResult<HeaderMap> {
        self.headers_for(self.inner.session.token().as_deref())
    }

    fn headers_for(&self, token: Option<&str>) -> ClientResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = token {
            let v = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ClientError::config("stored token is not a valid header value"))?;
            headers.insert(AUTHORIZATION, v);
        }
        if let Some(kind) = &self.inner.config.client_type {
            let v = HeaderValue::from_str(kind)
                .map_err(|_| ClientError::config(format!("invalid client type '{}'", kind)))?;
            headers.insert(HeaderName::from_static(CLIENT_TYPE_HEADER), v);
        }
        Ok(headers)
    }

    /// Run one endpoint through the pipeline and return an envelope.
    pub async fn send(&self, endpoint: Endpoint) -> ClientResult<Envelope> {
        match self.execute(endpoint).await? {
            Reply::Envelope(env) => Ok(env),
            Reply::Raw(_) => Err(ClientError::decode("blob endpoint used where an envelope was expected")),
        }
    }

    /// Run one endpoint as a file download and return the native response.
    pub async fn download(&self, endpoint: Endpoint) -> ClientResult<reqwest::Response> {
        match self.execute(endpoint.blob()).await? {
            Reply::Raw(resp) => Ok(resp),
            Reply::Envelope(_) => Err(ClientError::decode("expected a raw download response")),
        }
    }

    pub async fn execute(&self, endpoint: Endpoint) -> ClientResult<Reply> {
        let url = self.url_for(&endpoint.path);
        let (token, epoch) = self.inner.session.credentials();
        let issued = Issued { epoch, authenticated: token.is_some() };
        let mut req = self
            .inner
            .http
            .request(endpoint.method.clone(), &url)
            .headers(self.headers_for(token.as_deref())?);
        if !endpoint.query.is_empty() {
            req = req.query(&endpoint.query);
        }
        req = match &endpoint.body {
            Body::Empty => req,
            Body::Json(v) => req.json(v),
            Body::Multipart(parts) => req.multipart(build_form(parts)?),
        };

        debug!(target: "salon::pipeline", method = %endpoint.method, path = %endpoint.path, "request");
        let resp = req.send().await.map_err(|e| self.transport_failure(&endpoint, e))?;

        if !resp.status().is_success() {
            return Err(self.status_failure(&endpoint, issued, resp).await);
        }
        if endpoint.response == ResponseKind::Blob {
            return Ok(Reply::Raw(resp));
        }

        let bytes = resp.bytes().await.map_err(|e| self.transport_failure(&endpoint, e))?;
        let env: Envelope = serde_json::from_slice(&bytes).map_err(|e| {
            error!(target: "salon::pipeline", path = %endpoint.path, "response is not an envelope: {}", e);
            ClientError::decode(format!("response is not an envelope: {}", e))
        })?;
        self.normalize(&endpoint, issued, env).map(Reply::Envelope)
    }

    /// Incoming hook, success path: classify the envelope code.
    fn normalize(&self, endpoint: &Endpoint, issued: Issued, env: Envelope) -> ClientResult<Envelope> {
        let surface = self.inner.config.surface;
        match classify(env.code, &self.inner.config.policy) {
            Outcome::Success => Ok(env),
            Outcome::AuthExpired if endpoint.session_expiry => {
                let message = env.message_or("authentication failed").to_string();
                let origin = FailureOrigin::Envelope { code: env.code };
                self.expire(issued, &message, origin);
                Err(ClientError::AuthExpired { message, origin })
            }
            Outcome::Forbidden => {
                let message = env.message_or("permission denied").to_string();
                warn!(target: "salon::pipeline", path = %endpoint.path, code = env.code, "permission denied: {}", message);
                if surface.forbidden {
                    self.inner.notifier.notify(NoticeLevel::Error, &message);
                }
                Err(ClientError::Forbidden { message, origin: FailureOrigin::Envelope { code: env.code } })
            }
            Outcome::AuthExpired | Outcome::ApplicationError => {
                let message = env.message_or("request failed").to_string();
                error!(target: "salon::pipeline", path = %endpoint.path, code = env.code, "request failed: {}", message);
                if surface.application {
                    self.inner.notifier.notify(NoticeLevel::Error, &message);
                }
                Err(ClientError::Application { code: env.code, message })
            }
        }
    }

    /// Incoming hook, failure path: a response with a non-success status was received.
    async fn status_failure(&self, endpoint: &Endpoint, issued: Issued, resp: reqwest::Response) -> ClientError {
        let status = resp.status().as_u16();
        let body: Value = resp.json().await.unwrap_or(Value::Null);
        let category = status_category(status);
        let message = error_message(&body).unwrap_or_else(|| category.to_string());
        let origin = FailureOrigin::HttpStatus { status };
        let surface = self.inner.config.surface;

        error!(target: "salon::pipeline", path = %endpoint.path, status, "{}: {}", category, message);
        match classify(i64::from(status), &self.inner.config.policy) {
            Outcome::AuthExpired if endpoint.session_expiry => {
                self.expire(issued, &message, origin);
                ClientError::AuthExpired { message, origin }
            }
            Outcome::Forbidden => {
                if surface.forbidden {
                    self.inner.notifier.notify(NoticeLevel::Error, &message);
                }
                ClientError::Forbidden { message, origin }
            }
            _ => {
                if surface.application {
                    self.inner.notifier.notify(NoticeLevel::Error, &message);
                }
                ClientError::Http { status, category: category.to_string(), message }
            }
        }
    }

    /// Incoming hook, failure path: no response was received at all.
    fn transport_failure(&self, endpoint: &Endpoint, err: reqwest::Error) -> ClientError {
        let out = if err.is_timeout() {
            error!(target: "salon::pipeline", path = %endpoint.path, "request timed out");
            ClientError::Timeout { timeout_ms: self.inner.config.timeout_ms }
        } else {
            error!(target: "salon::pipeline", path = %endpoint.path, "network error: {}", err);
            ClientError::Network { message: err.to_string() }
        };
        if self.inner.config.surface.transport {
            let text = if matches!(out, ClientError::Timeout { .. }) { "request timed out" } else { "network error" };
            self.inner.notifier.notify(NoticeLevel::Error, text);
        }
        out
    }

    /// Clear the session for this call and hand the redirect to the dispatcher.
    ///
    /// A failure from a token that a newer login already replaced is ignored. Events
    /// for a token carry its epoch so the dispatcher can merge a burst; anonymous
    /// failures carry none and always redirect.
    fn expire(&self, issued: Issued, message: &str, origin: FailureOrigin) {
        match self.inner.session.clear_for_expiry(issued.epoch) {
            ExpiryClear::Stale => {
                debug!(target: "salon::pipeline", epoch = issued.epoch, ?origin, "auth failure from a replaced session ignored");
                return;
            }
            ExpiryClear::Cleared => {
                warn!(target: "salon::pipeline", epoch = issued.epoch, ?origin, "session expired: {}", message);
            }
            ExpiryClear::AlreadyCleared => {
                debug!(target: "salon::pipeline", epoch = issued.epoch, "session already cleared by an earlier failure");
            }
        }
        if let Some(tx) = &self.inner.expiry {
            let epoch = issued.authenticated.then_some(issued.epoch);
            tx.send(ExpiryEvent { epoch, message: message.to_string(), origin });
        }
    }
}

fn build_form(parts: &[FormPart]) -> ClientResult<reqwest::multipart::Form> {
    let mut form = reqwest::multipart::Form::new();
    for part in parts {
        form = match part {
            FormPart::Text { name, value } => form.text(name.clone(), value.clone()),
            FormPart::File { name, file_name, mime, bytes } => {
                let mut p = reqwest::multipart::Part::bytes(bytes.clone()).file_name(file_name.clone());
                if let Some(m) = mime {
                    p = p.mime_str(m).map_err(|e| ClientError::encode(format!("invalid mime type '{}': {}", m, e)))?;
                }
                form.part(name.clone(), p)
            }
        };
    }
    Ok(form)
}
