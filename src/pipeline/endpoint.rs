use std::borrow::Cow;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ClientError, ClientResult};

/// How the pipeline should treat a successful response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// `{code, message, data}` envelope, inspected and classified.
    Json,
    /// File download; the transport response is handed back untouched.
    Blob,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    Text { name: String, value: String },
    File { name: String, file_name: String, mime: Option<String>, bytes: Vec<u8> },
}

impl FormPart {
    pub fn text<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        FormPart::Text { name: name.into(), value: value.into() }
    }

    pub fn file<N: Into<String>, F: Into<String>>(name: N, file_name: F, mime: Option<&str>, bytes: Vec<u8>) -> Self {
        FormPart::File { name: name.into(), file_name: file_name.into(), mime: mime.map(str::to_string), bytes }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Json(Value),
    Multipart(Vec<FormPart>),
}

/// One REST call shape: verb, interpolated path, query and body.
///
/// Endpoints are plain values; building one performs no I/O and never touches the
/// caller's payload after serializing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Body,
    pub response: ResponseKind,
    /// Whether an auth failure on this call clears the session and triggers the
    /// login redirect. Disabled for the login/logout calls themselves.
    pub session_expiry: bool,
}

impl Endpoint {
    pub fn new<P: Into<String>>(method: Method, path: P) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: Body::Empty,
            response: ResponseKind::Json,
            session_expiry: true,
        }
    }

    pub fn get<P: Into<String>>(path: P) -> Self { Self::new(Method::GET, path) }
    pub fn post<P: Into<String>>(path: P) -> Self { Self::new(Method::POST, path) }
    pub fn put<P: Into<String>>(path: P) -> Self { Self::new(Method::PUT, path) }
    pub fn delete<P: Into<String>>(path: P) -> Self { Self::new(Method::DELETE, path) }

    /// Append query parameters from any value serializing to a flat object.
    /// Null fields are skipped; arrays repeat the key.
    pub fn query<T: Serialize + ?Sized>(mut self, params: &T) -> ClientResult<Self> {
        let value = serde_json::to_value(params).map_err(|e| ClientError::encode(e.to_string()))?;
        match value {
            Value::Null => {}
            Value::Object(map) => {
                for (k, v) in map {
                    push_query_value(&mut self.query, &k, v);
                }
            }
            other => {
                return Err(ClientError::encode(format!("query parameters must be an object, got {}", other)));
            }
        }
        Ok(self)
    }

    pub fn param<K: Into<String>, V: ToString>(mut self, key: K, value: V) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> ClientResult<Self> {
        let value = serde_json::to_value(body).map_err(|e| ClientError::encode(e.to_string()))?;
        self.body = Body::Json(value);
        Ok(self)
    }

    pub fn multipart(mut self, parts: Vec<FormPart>) -> Self {
        self.body = Body::Multipart(parts);
        self
    }

    pub fn blob(mut self) -> Self {
        self.response = ResponseKind::Blob;
        self
    }

    pub fn without_session_expiry(mut self) -> Self {
        self.session_expiry = false;
        self
    }
}

fn push_query_value(out: &mut Vec<(String, String)>, key: &str, value: Value) {
    match value {
        Value::Null => {}
        Value::String(s) => out.push((key.to_string(), s)),
        Value::Bool(b) => out.push((key.to_string(), b.to_string())),
        Value::Number(n) => out.push((key.to_string(), n.to_string())),
        Value::Array(items) => {
            for item in items {
                push_query_value(out, key, item);
            }
        }
        obj @ Value::Object(_) => out.push((key.to_string(), obj.to_string())),
    }
}

/// Percent-encode a caller-supplied value for use as one path segment.
pub fn segment(raw: &str) -> Cow<'_, str> {
    urlencoding::encode(raw)
}
