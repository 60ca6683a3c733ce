//! # Pagination Management
//!
//! The driver task behind [`OverviewViewModel`](super::OverviewViewModel).
//! It owns the query, page cursor and end-of-data flag, runs at most one
//! load at a time, and applies load results only if they belong to the
//! current query generation.

use super::core::Intent;
use crate::overview::events::{
    ItemUpdates, ItemsUpdate, LoadError, LoadStatus, StateChangeMode,
};
use crate::overview::models::{ArtObject, CollectionItem};
use crate::overview::services::{FetchCollectionService, ResolveError};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;

type LoadResult = Result<Vec<ArtObject>, ResolveError>;

/// The single load currently running
struct InFlightLoad {
    generation: u64,
    page: u32,
    cancel: CancellationToken,
    handle: JoinHandle<LoadResult>,
}

pub(super) struct PaginationDriver {
    service: Arc<dyn FetchCollectionService>,
    item_updates: Arc<ItemUpdates>,
    status: watch::Sender<LoadStatus>,
    query: Option<String>,
    /// Last page applied in this generation, or 1 before any
    page: u32,
    /// Whether any page has been applied in this generation
    has_results: bool,
    end_of_data: bool,
    /// Bumped on every query change
    generation: u64,
    in_flight: Option<InFlightLoad>,
    /// Flush acks answered once nothing is queued or loading
    idle_waiters: Vec<oneshot::Sender<()>>,
}

impl PaginationDriver {
    pub(super) fn new(
        service: Arc<dyn FetchCollectionService>,
        item_updates: Arc<ItemUpdates>,
        status: watch::Sender<LoadStatus>,
        query: Option<String>,
    ) -> Self {
        Self {
            service,
            item_updates,
            status,
            query,
            page: 1,
            has_results: false,
            end_of_data: false,
            generation: 0,
            in_flight: None,
            idle_waiters: Vec::new(),
        }
    }

    /// Handle intents and load completions until the view model is dropped
    pub(super) async fn run(mut self, mut intents: mpsc::UnboundedReceiver<Intent>) {
        loop {
            tokio::select! {
                intent = intents.recv() => match intent {
                    Some(intent) => self.handle_intent(intent),
                    None => break,
                },
                joined = settle(&mut self.in_flight) => {
                    if let Some(load) = self.in_flight.take() {
                        self.finish_load(load, joined);
                    }
                }
            }

            // Handlers may have queued intents while a page was published.
            if self.in_flight.is_none() && intents.is_empty() {
                self.notify_idle();
            }
        }

        if let Some(load) = self.in_flight.take() {
            tracing::debug!("Cancelling page {} load on shutdown", load.page);
            load.cancel.cancel();
            load.handle.abort();
        }
        tracing::debug!("Overview driver stopped");
    }

    fn handle_intent(&mut self, intent: Intent) {
        match intent {
            Intent::ChangeQuery(query) => self.change_query(query),
            Intent::ReachedEnd => self.reached_end(),
            Intent::Flush(ack) => self.idle_waiters.push(ack),
        }
    }

    fn change_query(&mut self, query: Option<String>) {
        if let Some(load) = self.in_flight.take() {
            tracing::debug!(
                "Query changed, cancelling page {} load of generation {}",
                load.page,
                load.generation
            );
            load.cancel.cancel();
        }

        self.query = query;
        self.page = 1;
        self.has_results = false;
        self.end_of_data = false;
        self.generation += 1;
        tracing::debug!(
            "Query set to {:?} (generation {})",
            self.query,
            self.generation
        );

        self.begin_load(1);
    }

    fn reached_end(&mut self) {
        if self.end_of_data {
            tracing::debug!("No more results for {:?}, ignoring", self.query);
            return;
        }
        if let Some(load) = &self.in_flight {
            tracing::debug!("Page {} still loading, ignoring", load.page);
            return;
        }

        // Until a page has landed the first page is retried.
        let next = if self.has_results {
            self.page + 1
        } else {
            self.page
        };
        self.begin_load(next);
    }

    pub(super) fn begin_load(&mut self, page: u32) {
        let cancel = CancellationToken::new();
        let service = Arc::clone(&self.service);
        let query = self.query.clone();
        let token = cancel.clone();

        tracing::debug!(
            "Loading page {} for {:?} (generation {})",
            page,
            query,
            self.generation
        );
        self.status.send_replace(LoadStatus::Loading { page });

        let handle =
            tokio::spawn(async move { service.load(query.as_deref(), page, &token).await });
        self.in_flight = Some(InFlightLoad {
            generation: self.generation,
            page,
            cancel,
            handle,
        });
    }

    fn finish_load(&mut self, load: InFlightLoad, joined: Result<LoadResult, JoinError>) {
        if load.generation != self.generation {
            tracing::trace!(
                "Discarding page {} result of stale generation {}",
                load.page,
                load.generation
            );
            return;
        }

        let records = match joined {
            Ok(Ok(records)) => records,
            Ok(Err(e)) if e.is_cancelled() => {
                tracing::debug!("Page {} load was cancelled", load.page);
                self.status.send_replace(LoadStatus::Idle);
                return;
            }
            Ok(Err(e)) => return self.fail(load.page, e.into()),
            Err(e) => return self.fail(load.page, e.into()),
        };

        if records.is_empty() {
            tracing::debug!("Page {} is empty, end of data for {:?}", load.page, self.query);
            self.end_of_data = true;
            self.status.send_replace(LoadStatus::Idle);
            return;
        }

        let items = match records
            .into_iter()
            .map(CollectionItem::try_from)
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(items) => items,
            Err(e) => return self.fail(load.page, e.into()),
        };

        self.page = load.page;
        self.has_results = true;

        let mode = if load.page == 1 {
            StateChangeMode::Overwrite
        } else {
            StateChangeMode::Append
        };
        tracing::debug!("Page {} applied with {} items ({:?})", load.page, items.len(), mode);

        // Publish before going idle so idle waiters always see the new value.
        self.item_updates.publish(ItemsUpdate::new(mode, items));
        self.status.send_replace(LoadStatus::Idle);
    }

    fn notify_idle(&mut self) {
        for ack in self.idle_waiters.drain(..) {
            let _ = ack.send(());
        }
    }

    fn fail(&mut self, page: u32, error: LoadError) {
        tracing::warn!("Loading page {} failed: {}", page, error);
        self.status.send_replace(LoadStatus::Failed {
            page,
            error: Arc::new(error),
        });
    }
}

/// Resolve when the in-flight load finishes; pend forever when there is none
async fn settle(in_flight: &mut Option<InFlightLoad>) -> Result<LoadResult, JoinError> {
    match in_flight {
        Some(load) => (&mut load.handle).await,
        None => std::future::pending().await,
    }
}
