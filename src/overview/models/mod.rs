//! # Models Module
//!
//! Wire records returned by the collection API and the display items
//! derived from them.

pub mod collection_item;
pub mod collection_response;

pub use collection_item::{CollectionItem, Section, ValidationError};
pub use collection_response::{ArtObject, CollectionResponse, WebImage};
