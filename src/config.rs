//! Configuration constants and utilities for artline
//!
//! Connection settings come from an INI profile file, with the API key
//! optionally overridden from the environment.

use anyhow::{Context, Result};
use ini::Ini;
use std::path::Path;

/// Default profile file path for artline
pub const DEFAULT_PROFILE_PATH: &str = "~/.artline/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "ARTLINE_PROFILE_PATH";

/// Environment variable name for overriding the API key
pub const API_KEY_ENV_VAR: &str = "ARTLINE_API_KEY";

pub const DEFAULT_BASE_URL: &str = "https://www.rijksmuseum.nl/api";
pub const DEFAULT_CULTURE: &str = "en";
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// The API refuses larger pages
pub const MAX_PAGE_SIZE: u32 = 100;

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    std::env::var_os(PROFILE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}

/// Where and how to reach the collection API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub culture: String,
    pub page_size: u32,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            culture: DEFAULT_CULTURE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ApiSettings {
    /// Override the page size, clamped to what the API accepts
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    /// Apply the API key override, ignoring blank values
    pub fn with_api_key_override(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|key| !key.trim().is_empty()) {
            self.api_key = Some(key);
        }
        self
    }
}

/// Load settings for `profile_name`, then apply environment overrides
pub fn load_api_settings(profile_name: &str, profile_path: &str) -> Result<ApiSettings> {
    let settings = load_profile_settings(profile_name, profile_path)?;
    Ok(settings.with_api_key_override(std::env::var(API_KEY_ENV_VAR).ok()))
}

/// Read one profile section from the INI file at `profile_path`
///
/// A missing file or section yields the defaults.
pub fn load_profile_settings(profile_name: &str, profile_path: &str) -> Result<ApiSettings> {
    let expanded = shellexpand::tilde(profile_path);
    let path = Path::new(expanded.as_ref());
    let mut settings = ApiSettings::default();

    if !path.exists() {
        tracing::debug!("Profile file '{}' not found, using defaults", path.display());
        return Ok(settings);
    }

    let ini = Ini::load_from_file(path)
        .with_context(|| format!("Failed to read profile file '{}'", path.display()))?;

    let Some(section) = ini.section(Some(profile_name)) else {
        tracing::debug!(
            "Profile '{}' not found in '{}', using defaults",
            profile_name,
            path.display()
        );
        return Ok(settings);
    };

    if let Some(base_url) = section.get("base_url") {
        settings.base_url = base_url.trim().to_string();
    }
    if let Some(api_key) = section.get("api_key").map(str::trim) {
        if !api_key.is_empty() {
            settings.api_key = Some(api_key.to_string());
        }
    }
    if let Some(culture) = section.get("culture") {
        settings.culture = culture.trim().to_string();
    }
    if let Some(page_size) = section.get("page_size") {
        let page_size: u32 = page_size.trim().parse().with_context(|| {
            format!("Invalid page_size '{page_size}' in profile '{profile_name}'")
        })?;
        settings = settings.with_page_size(page_size);
    }

    tracing::debug!(
        "Profile '{}' loaded, server: {}, culture: {}",
        profile_name,
        settings.base_url,
        settings.culture
    );
    Ok(settings)
}
