//! # Artline - Terminal Browser for the Rijksmuseum Collection
//!
//! Pages through the collection search API and republishes the results
//! as an observable item list, following the Model-View-ViewModel pattern:
//!
//! ```text
//! ┌──────────────┐  intents   ┌─────────────────┐   load(q, p)   ┌──────────────┐
//! │  Controller  │───────────▶│    ViewModel    │───────────────▶│   Services   │
//! │              │            │                 │                │              │
//! │ - Commands   │◀───────────│ - Query/paging  │◀───────────────│ - Request    │
//! │ - Printing   │  updates   │ - Stale guard   │  raw records   │ - Resolver   │
//! └──────────────┘            └─────────────────┘                └──────────────┘
//!                                      │
//!                                      ▼
//!                               ┌──────────────┐
//!                               │    Models    │
//!                               │ - Wire types │
//!                               │ - Items      │
//!                               └──────────────┘
//! ```

pub mod cmd_args;
pub mod config;
pub mod overview;

// Re-export main types for easy access
pub use overview::*;
