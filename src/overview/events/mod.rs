//! # Events Module
//!
//! Observable outputs of the overview view model.

pub mod item_updates;
pub mod load_status;

pub use item_updates::{
    ItemUpdates, ItemsUpdate, ItemsUpdateHandler, StateChangeMode, Subscription,
};
pub use load_status::{LoadError, LoadStatus};
