//! # Overview
//!
//! Paginated, searchable browsing of the collection:
//!
//! - **services**: request description, cancellable JSON resolver, fetch port
//! - **models**: wire records and the validated display items
//! - **events**: observable item updates and load status
//! - **view_models**: the pagination/search coordinator
//! - **controllers**: the terminal front end

pub mod controllers;
pub mod events;
pub mod models;
pub mod services;
pub mod view_models;

#[cfg(test)]
pub(crate) mod testing;

// Re-export core types
pub use controllers::{AppController, UserCommand};
pub use events::{
    ItemUpdates, ItemsUpdate, LoadError, LoadStatus, StateChangeMode, Subscription,
};
pub use models::{ArtObject, CollectionItem, CollectionResponse, Section, ValidationError};
pub use services::{
    FetchCollectionService, HttpMethod, HttpTransport, Request, ResolveError, Resolver,
    RijksCollectionService, Transport,
};
pub use view_models::{OverviewDelegate, OverviewViewModel, DEFAULT_TITLE};
