//! # Load Status
//!
//! Progress of the view model's page loads, published through a
//! `tokio::sync::watch` channel so the presentation layer can show a
//! spinner or a retry hint.

use crate::overview::models::ValidationError;
use crate::overview::services::ResolveError;
use std::sync::Arc;

/// A page load failed; the view model stays usable and the same intent retries
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("load task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading {
        page: u32,
    },
    /// The last load failed; nothing was published for it
    Failed {
        page: u32,
        error: Arc<LoadError>,
    },
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading { .. })
    }

    pub fn error(&self) -> Option<&LoadError> {
        match self {
            LoadStatus::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_loading_should_count_as_loading() {
        assert!(!LoadStatus::Idle.is_loading());
        assert!(LoadStatus::Loading { page: 2 }.is_loading());

        let failed = LoadStatus::Failed {
            page: 2,
            error: Arc::new(ResolveError::Transport("offline".into()).into()),
        };
        assert!(!failed.is_loading());
    }

    #[test]
    fn failed_status_should_expose_error() {
        let failed = LoadStatus::Failed {
            page: 1,
            error: Arc::new(LoadError::from(ValidationError::MissingField {
                object_number: "SK-A-1".to_string(),
                field: "title",
            })),
        };

        let error = failed.error().unwrap();
        assert!(matches!(error, LoadError::Validation(_)));
        assert!(error.to_string().contains("SK-A-1"));
        assert!(LoadStatus::Idle.error().is_none());
    }
}
