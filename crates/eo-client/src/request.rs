//! HTTP request building.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{Error, ErrorKind, Result};

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl From<RequestMethod> for reqwest::Method {
    fn from(method: RequestMethod) -> Self {
        match method {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Post => reqwest::Method::POST,
            RequestMethod::Put => reqwest::Method::PUT,
            RequestMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A pending request against the Exact Online API.
///
/// Exact Online only takes JSON payloads, so the body is kept as an already
/// serialized `serde_json::Value`.
#[derive(Debug)]
pub struct RequestBuilder {
    pub(crate) method: RequestMethod,
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) body: Option<serde_json::Value>,
    pub(crate) bearer_token: Option<String>,
}

impl RequestBuilder {
    /// Request without headers, body or credentials.
    pub fn new(method: RequestMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
            bearer_token: None,
        }
    }

    /// The request URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The request method.
    pub fn method(&self) -> RequestMethod {
        self.method
    }

    /// Bearer token sent as `Authorization`.
    pub fn bearer_auth(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Ask for a JSON response. Exact Online answers with Atom XML otherwise.
    pub fn accept_json(self) -> Self {
        self.header("Accept", "application/json")
    }

    /// Serialize `payload` as the JSON body.
    ///
    /// Fails with `Serialization` before anything is sent.
    pub fn json<T: Serialize>(mut self, payload: &T) -> Result<Self> {
        let value = serde_json::to_value(payload)
            .map_err(|e| Error::with_source(ErrorKind::Serialization(e.to_string()), e))?;
        self.body = Some(value);
        Ok(self.header("Content-Type", "application/json"))
    }
}
