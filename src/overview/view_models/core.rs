//! # Core ViewModel Structure
//!
//! The overview view model is a handle onto a driver task that owns all
//! paging state. Intents are queued to the driver, so they can be issued
//! from anywhere (including item update handlers) and are applied strictly
//! in order.

use super::pagination_manager::PaginationDriver;
use super::selection_manager::OverviewDelegate;
use crate::overview::events::{ItemUpdates, LoadStatus};
use crate::overview::services::FetchCollectionService;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};

/// Title shown when browsing without a search query
pub const DEFAULT_TITLE: &str = "Rijksmuseum Collection";

/// Messages from the handle to the driver
#[derive(Debug)]
pub(super) enum Intent {
    ChangeQuery(Option<String>),
    ReachedEnd,
    /// Answered once every earlier intent has been handled and no load is running
    Flush(oneshot::Sender<()>),
}

/// Pagination and search coordinator for the collection overview
pub struct OverviewViewModel {
    title: String,
    intents: mpsc::UnboundedSender<Intent>,
    item_updates: Arc<ItemUpdates>,
    load_status: watch::Receiver<LoadStatus>,
    pub(super) delegate: Option<Arc<dyn OverviewDelegate>>,
}

impl OverviewViewModel {
    /// Create the view model and start loading page 1 of `initial_query`
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(initial_query: Option<String>, service: Arc<dyn FetchCollectionService>) -> Self {
        let title = initial_query
            .clone()
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());

        let (intents, intent_receiver) = mpsc::unbounded_channel();
        let (status_sender, load_status) = watch::channel(LoadStatus::Idle);
        let item_updates = Arc::new(ItemUpdates::new());

        let mut driver = PaginationDriver::new(
            service,
            Arc::clone(&item_updates),
            status_sender,
            initial_query,
        );
        driver.begin_load(1);
        tokio::spawn(driver.run(intent_receiver));

        tracing::debug!("Overview view model created with title '{}'", title);

        Self {
            title,
            intents,
            item_updates,
            load_status,
            delegate: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Latest-value channel of item list changes
    pub fn item_updates(&self) -> &ItemUpdates {
        &self.item_updates
    }

    /// Receiver for load progress
    pub fn load_status(&self) -> watch::Receiver<LoadStatus> {
        self.load_status.clone()
    }

    /// Start over at page 1 for `query`, abandoning any load in flight
    pub fn user_changed_query(&self, query: Option<String>) {
        self.send(Intent::ChangeQuery(query));
    }

    /// The user scrolled to the last item; load the next page if there is one
    ///
    /// Ignored while a load is in flight or once the results are exhausted.
    pub fn user_reached_end(&self) {
        self.send(Intent::ReachedEnd);
    }

    /// Wait until all intents issued so far have been handled and no load is running
    pub async fn wait_until_idle(&self) {
        let (ack, acked) = oneshot::channel();
        self.send(Intent::Flush(ack));
        // Only fails when the driver has gone away, in which case nothing is loading.
        let _ = acked.await;
    }

    fn send(&self, intent: Intent) {
        tracing::trace!("Queueing intent {:?}", intent);
        if self.intents.send(intent).is_err() {
            tracing::warn!("Overview driver has stopped; intent dropped");
        }
    }
}
