//! Testing infrastructure for overview components
//!
//! Scripted transports, spying fetch services and delegates, plus the
//! stub records shared by the unit tests.

use crate::overview::events::{ItemsUpdate, Subscription};
use crate::overview::models::{ArtObject, CollectionItem, WebImage};
use crate::overview::services::{FetchCollectionService, PreparedRequest, ResolveError, Transport};
use crate::overview::view_models::{OverviewDelegate, OverviewViewModel};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, Notify};
use tokio_util::sync::CancellationToken;

/// Transport that answers every request with the same canned reply
pub struct ScriptedTransport {
    reply: Result<Bytes, String>,
    pub send_count: AtomicUsize,
    sent: Mutex<Vec<PreparedRequest>>,
    sent_signal: Notify,
    gate: Option<Notify>,
    cancel_on_send: Option<CancellationToken>,
}

impl ScriptedTransport {
    pub fn replying(body: &str) -> Self {
        Self::with_reply(Ok(Bytes::from(body.to_string())))
    }

    pub fn failing(message: &str) -> Self {
        Self::with_reply(Err(message.to_string()))
    }

    fn with_reply(reply: Result<Bytes, String>) -> Self {
        Self {
            reply,
            send_count: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
            sent_signal: Notify::new(),
            gate: None,
            cancel_on_send: None,
        }
    }

    /// Hold every reply until [`ScriptedTransport::release`] is called
    pub fn held(mut self) -> Self {
        self.gate = Some(Notify::new());
        self
    }

    /// Cancel `token` just before replying, racing the caller's check
    pub fn cancelling_on_send(mut self, token: CancellationToken) -> Self {
        self.cancel_on_send = Some(token);
        self
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn sent_requests(&self) -> Vec<PreparedRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub async fn wait_until_sent(&self) {
        self.sent_signal.notified().await;
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: PreparedRequest) -> Result<Bytes, ResolveError> {
        self.send_count.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().unwrap().push(request);
        self.sent_signal.notify_one();

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if let Some(token) = &self.cancel_on_send {
            token.cancel();
        }

        self.reply
            .clone()
            .map_err(|message| ResolveError::Transport(message.into()))
    }
}

/// Fetch service fake recording every call
///
/// Replies with the records configured at call time, or with the records
/// set for that page if there are any. Loads can be made to
/// fail or to wait for a gate; gated loads ignore cancellation so stale
/// results really do arrive late.
pub struct FetchCollectionServiceSpy {
    load_response: Mutex<Vec<ArtObject>>,
    page_responses: Mutex<HashMap<u32, Vec<ArtObject>>>,
    failures: Mutex<VecDeque<ResolveError>>,
    gates: Mutex<VecDeque<Arc<Notify>>>,
    invocations: Mutex<Vec<(Option<String>, u32)>>,
    tokens: Mutex<Vec<CancellationToken>>,
}

impl FetchCollectionServiceSpy {
    pub fn returning(load_response: Vec<ArtObject>) -> Arc<Self> {
        Arc::new(Self {
            load_response: Mutex::new(load_response),
            page_responses: Mutex::new(HashMap::new()),
            failures: Mutex::new(VecDeque::new()),
            gates: Mutex::new(VecDeque::new()),
            invocations: Mutex::new(Vec::new()),
            tokens: Mutex::new(Vec::new()),
        })
    }

    pub fn set_load_response(&self, load_response: Vec<ArtObject>) {
        *self.load_response.lock().unwrap() = load_response;
    }

    pub fn set_page_response(&self, page: u32, load_response: Vec<ArtObject>) {
        self.page_responses
            .lock()
            .unwrap()
            .insert(page, load_response);
    }

    pub fn fail_next_load(&self, error: ResolveError) {
        self.failures.lock().unwrap().push_back(error);
    }

    /// The next load blocks until the returned gate is notified
    pub fn hold_next_load(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.lock().unwrap().push_back(gate.clone());
        gate
    }

    pub fn invoked_load_count(&self) -> usize {
        self.invocations.lock().unwrap().len()
    }

    pub fn invoked_load_parameters(&self) -> Option<(Option<String>, u32)> {
        self.invocations.lock().unwrap().last().cloned()
    }

    pub fn invocations(&self) -> Vec<(Option<String>, u32)> {
        self.invocations.lock().unwrap().clone()
    }

    pub fn cancel_tokens(&self) -> Vec<CancellationToken> {
        self.tokens.lock().unwrap().clone()
    }
}

#[async_trait]
impl FetchCollectionService for FetchCollectionServiceSpy {
    async fn load(
        &self,
        query: Option<&str>,
        page: u32,
        cancel: &CancellationToken,
    ) -> Result<Vec<ArtObject>, ResolveError> {
        self.invocations
            .lock()
            .unwrap()
            .push((query.map(str::to_string), page));
        self.tokens.lock().unwrap().push(cancel.clone());

        let response = match self.page_responses.lock().unwrap().get(&page) {
            Some(records) => records.clone(),
            None => self.load_response.lock().unwrap().clone(),
        };
        let failure = self.failures.lock().unwrap().pop_front();
        let gate = self.gates.lock().unwrap().pop_front();

        if let Some(gate) = gate {
            gate.notified().await;
        }

        match failure {
            Some(error) => Err(error),
            None => Ok(response),
        }
    }
}

#[derive(Default)]
pub struct OverviewDelegateSpy {
    invocations: Mutex<Vec<String>>,
}

impl OverviewDelegateSpy {
    pub fn invoked_count(&self) -> usize {
        self.invocations.lock().unwrap().len()
    }

    pub fn last_object_number(&self) -> Option<String> {
        self.invocations.lock().unwrap().last().cloned()
    }
}

impl OverviewDelegate for OverviewDelegateSpy {
    fn user_wants_more_info_on(&self, object_number: &str) {
        self.invocations
            .lock()
            .unwrap()
            .push(object_number.to_string());
    }
}

/// Forward every item update of `vm` into a channel while the subscription lives
pub fn collect_updates(
    vm: &OverviewViewModel,
) -> (mpsc::UnboundedReceiver<ItemsUpdate>, Subscription) {
    let (sender, receiver) = mpsc::unbounded_channel();
    let subscription = vm.item_updates().subscribe(move |update| {
        let _ = sender.send(update.clone());
    });
    (receiver, subscription)
}

pub fn art_object_stub1() -> ArtObject {
    ArtObject {
        id: "abc".to_string(),
        object_number: "abc".to_string(),
        title: Some("title".to_string()),
        principal_or_first_maker: Some("principalOrFirstMaker".to_string()),
        web_image: Some(WebImage {
            url: Some("http://hello.com".to_string()),
        }),
    }
}

pub fn art_object_stub2() -> ArtObject {
    ArtObject {
        id: "def".to_string(),
        object_number: "def".to_string(),
        title: Some("title2".to_string()),
        principal_or_first_maker: Some("principalOrFirstMaker2".to_string()),
        web_image: Some(WebImage {
            url: Some("http://goodbye.com".to_string()),
        }),
    }
}

pub fn item_from(record: &ArtObject) -> CollectionItem {
    CollectionItem::try_from(record.clone()).expect("stub records are complete")
}
