//! # Collection Item
//!
//! Display model for one entry of the overview list, and the validating
//! conversion from a raw [`ArtObject`].

use super::collection_response::ArtObject;
use reqwest::Url;

/// Grouping label for an item (the principal maker)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Section {
    pub name: String,
}

/// An item ready for presentation
///
/// `object_number` is the identity key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionItem {
    pub name: String,
    pub section: Section,
    pub object_number: String,
    pub image_url: Url,
}

/// A raw record could not be turned into a [`CollectionItem`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("record {object_number} is missing required field '{field}'")]
    MissingField {
        object_number: String,
        field: &'static str,
    },
    #[error("record {object_number} has an invalid image url '{url}'")]
    InvalidImageUrl { object_number: String, url: String },
}

impl TryFrom<ArtObject> for CollectionItem {
    type Error = ValidationError;

    fn try_from(record: ArtObject) -> Result<Self, Self::Error> {
        let missing = |field| ValidationError::MissingField {
            object_number: record.object_number.clone(),
            field,
        };

        let name = record.title.clone().ok_or_else(|| missing("title"))?;
        let section = record
            .principal_or_first_maker
            .clone()
            .ok_or_else(|| missing("principalOrFirstMaker"))?;
        let raw_url = record
            .web_image
            .as_ref()
            .and_then(|image| image.url.clone())
            .ok_or_else(|| missing("webImage.url"))?;

        let image_url = Url::parse(&raw_url).map_err(|_| ValidationError::InvalidImageUrl {
            object_number: record.object_number.clone(),
            url: raw_url.clone(),
        })?;

        Ok(Self {
            name,
            section: Section { name: section },
            object_number: record.object_number,
            image_url,
        })
    }
}
