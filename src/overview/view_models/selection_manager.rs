//! # Selection Management
//!
//! Forwards item selection to whoever presents item details.

use super::core::OverviewViewModel;
use crate::overview::models::CollectionItem;
use std::sync::Arc;

/// Receives "show me more" requests from the overview
pub trait OverviewDelegate: Send + Sync {
    fn user_wants_more_info_on(&self, object_number: &str);
}

impl OverviewViewModel {
    /// Set the delegate notified on item selection
    pub fn set_delegate(&mut self, delegate: Arc<dyn OverviewDelegate>) {
        self.delegate = Some(delegate);
    }

    /// The user picked `item`; notifies the delegate synchronously
    ///
    /// Paging state is not touched.
    pub fn user_selected_item(&self, item: &CollectionItem) {
        match &self.delegate {
            Some(delegate) => {
                tracing::debug!("Item {} selected", item.object_number);
                delegate.user_wants_more_info_on(&item.object_number);
            }
            None => tracing::debug!("Item {} selected but no delegate is set", item.object_number),
        }
    }
}
