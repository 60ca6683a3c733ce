//! # Request Resolver
//!
//! Executes a [`Request`] on a background task and decodes the JSON body
//! into the request's response type. Resolution is cooperatively
//! cancellable: once the token fires, no decoding happens and the caller
//! gets [`ResolveError::Cancelled`].

use super::request::{PreparedRequest, Request};
use async_trait::async_trait;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Boxed error produced by a transport
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Everything that can go wrong while resolving a request
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Address or parameters could not form a valid request; nothing was sent
    #[error("could not create request: {0}")]
    RequestConstruction(String),

    /// Network or HTTP level failure
    #[error("transport failed: {0}")]
    Transport(#[source] BoxError),

    /// The caller lost interest before the response was decoded
    #[error("request was cancelled")]
    Cancelled,

    /// The response body did not match the expected shape
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ResolveError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ResolveError::Cancelled)
    }
}

/// Sends a prepared request and returns the raw response body
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: PreparedRequest) -> Result<Bytes, ResolveError>;
}

/// [`Transport`] backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: PreparedRequest) -> Result<Bytes, ResolveError> {
        tracing::debug!("Sending {} {}", request.method, request.url);

        let mut builder = self.client.request(request.method, request.url);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| ResolveError::Transport(Box::new(e)))?;

        tracing::debug!("Received HTTP {}", response.status());

        response
            .bytes()
            .await
            .map_err(|e| ResolveError::Transport(Box::new(e)))
    }
}

/// Stateless resolver; cheap to clone and safe to share between callers
#[derive(Clone)]
pub struct Resolver {
    transport: Arc<dyn Transport>,
}

impl Resolver {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self::from_shared(Arc::new(transport))
    }

    pub fn from_shared(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Resolve `request` into its decoded JSON response
    ///
    /// The transport call runs on a spawned task. The token is checked
    /// again after the transport returns, so a cancellation that races
    /// with completion still skips decoding.
    pub async fn resolve_json<V>(
        &self,
        request: &Request<V>,
        cancel: &CancellationToken,
    ) -> Result<V, ResolveError>
    where
        V: DeserializeOwned + Send + 'static,
    {
        let prepared = request.prepare()?;
        let transport = Arc::clone(&self.transport);
        let cancel = cancel.clone();

        let task = tokio::spawn(async move {
            let body = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(ResolveError::Cancelled),
                result = transport.send(prepared) => result?,
            };

            if cancel.is_cancelled() {
                tracing::debug!("Resolution cancelled after transport completed, skipping decode");
                return Err(ResolveError::Cancelled);
            }

            serde_json::from_slice::<V>(&body).map_err(ResolveError::from)
        });

        match task.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(ResolveError::Cancelled),
            Err(e) => Err(ResolveError::Transport(Box::new(e))),
        }
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver").finish_non_exhaustive()
    }
}
