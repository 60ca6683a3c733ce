//! # Services Layer
//!
//! Network plumbing used by the view model: an abstract request type, a
//! cancellable JSON resolver, and the collection fetch port built on top.
//!
//! Services hold no per-session state; the view model owns all paging
//! state and only calls into the fetch port.

pub mod collection;
pub mod request;
pub mod resolver;

pub use collection::{FetchCollectionService, RijksCollectionService};
pub use request::{HttpMethod, PreparedRequest, Request};
pub use resolver::{BoxError, HttpTransport, ResolveError, Resolver, Transport};
