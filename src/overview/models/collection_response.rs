//! # Collection Response
//!
//! Wire shape of the collection search endpoint. Only the fields the
//! overview needs are modelled; everything else in the payload is ignored.

use serde::{Deserialize, Serialize};

/// One page of search results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionResponse {
    /// Total number of matches across all pages
    pub count: u64,
    pub art_objects: Vec<ArtObject>,
}

/// Raw collection record as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtObject {
    pub id: String,
    pub object_number: String,
    pub title: Option<String>,
    pub principal_or_first_maker: Option<String>,
    pub web_image: Option<WebImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebImage {
    pub url: Option<String>,
}
