//! # ViewModel Module
//!
//! The overview view model, split into the public handle, the paging
//! driver and selection forwarding.

mod core;
mod pagination_manager;
mod selection_manager;

pub use self::core::{OverviewViewModel, DEFAULT_TITLE};
pub use selection_manager::OverviewDelegate;
