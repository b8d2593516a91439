use crate::error::{CatalogError, Result};

/// Default catalog API root.
pub const DEFAULT_API_URL: &str = "https://api.example-catalog/3";

/// Default environment variable holding the bearer token.
pub const DEFAULT_TOKEN_VAR: &str = "MOVIE_API_TOKEN";

/// Base URL poster paths are appended to.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Where and how to reach the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSettings {
    /// API root, e.g. `https://api.example-catalog/3`
    pub api_url: String,
    /// Name of the environment variable read for the bearer token
    pub token_var: String,
    /// Prefix for poster URLs
    pub image_base_url: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token_var: DEFAULT_TOKEN_VAR.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
        }
    }
}

impl CatalogSettings {
    /// Read the bearer token from the environment. Looked up on every call so
    /// a token exported after startup is picked up by the next refresh.
    pub fn bearer_token(&self) -> Result<String> {
        match std::env::var(&self.token_var) {
            Ok(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
            _ => Err(CatalogError::MissingToken {
                var: self.token_var.clone(),
            }),
        }
    }
}
