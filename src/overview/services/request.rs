//! # Request Description
//!
//! A barebones, transport-agnostic description of an HTTP request.
//! The expected response shape is a phantom type parameter: it is never
//! stored, only used by the resolver to pick what to decode into.

use super::resolver::ResolveError;
use bytes::Bytes;
use reqwest::{Method, Url};
use std::fmt;
use std::marker::PhantomData;

/// HTTP method together with the data it carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET with query parameters merged into the target address
    Get(Vec<(String, String)>),
    /// POST with a raw body payload
    Post(Bytes),
}

impl HttpMethod {
    /// Wire name of the method
    pub fn name(&self) -> &'static str {
        match self {
            HttpMethod::Get(_) => "GET",
            HttpMethod::Post(_) => "POST",
        }
    }
}

/// Abstract request whose successful response decodes into `Response`
pub struct Request<Response> {
    method: HttpMethod,
    address: String,
    _response: PhantomData<fn() -> Response>,
}

impl<Response> Request<Response> {
    pub fn new(method: HttpMethod, address: impl Into<String>) -> Self {
        Self {
            method,
            address: address.into(),
            _response: PhantomData,
        }
    }

    /// Convenience constructor for a GET request
    pub fn get<K, V>(address: impl Into<String>, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let params = params
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::new(HttpMethod::Get(params), address)
    }

    /// Convenience constructor for a POST request
    pub fn post(address: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self::new(HttpMethod::Post(body.into()), address)
    }

    pub fn method(&self) -> &HttpMethod {
        &self.method
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Turn this description into a concrete request
    ///
    /// For GET, the parameters are appended to whatever query the address
    /// already carries. Fails when the address is not an absolute
    /// `http`/`https` URL; such requests never reach the wire.
    pub fn prepare(&self) -> Result<PreparedRequest, ResolveError> {
        let mut url = Url::parse(&self.address).map_err(|e| {
            tracing::warn!("Could not parse request address '{}': {}", self.address, e);
            ResolveError::RequestConstruction(format!("invalid address '{}': {e}", self.address))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            tracing::warn!("Refusing to build request for non-http address '{}'", url);
            return Err(ResolveError::RequestConstruction(format!(
                "unsupported scheme '{}' in '{}'",
                url.scheme(),
                self.address
            )));
        }

        let (method, body) = match &self.method {
            HttpMethod::Get(params) => {
                if !params.is_empty() {
                    url.query_pairs_mut()
                        .extend_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
                }
                (Method::GET, None)
            }
            HttpMethod::Post(data) => (Method::POST, Some(data.clone())),
        };

        Ok(PreparedRequest { method, url, body })
    }
}

// Manual impls: derives would put bounds on `Response`.
impl<Response> Clone for Request<Response> {
    fn clone(&self) -> Self {
        Self {
            method: self.method.clone(),
            address: self.address.clone(),
            _response: PhantomData,
        }
    }
}

impl<Response> fmt::Debug for Request<Response> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("address", &self.address)
            .finish()
    }
}

/// A fully-formed request, ready to hand to a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    pub body: Option<Bytes>,
}
