//! Dashboard Configuration
//!
//! Backend location, auth token and operator name. Persisted as JSON in
//! `localStorage`, falling back to the build-time `FIBERDESK_API_URL`.

use serde::{Deserialize, Serialize};

pub const STORAGE_KEY: &str = "fiberdesk.config";
const DEFAULT_BASE_URL: &str = "/api";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL without trailing slash
    pub base_url: String,
    /// Bearer token; None = send no Authorization header
    pub token: Option<String>,
    /// Name recorded as `assignedBy` on reassignment
    pub operator: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: option_env!("FIBERDESK_API_URL")
                .unwrap_or(DEFAULT_BASE_URL)
                .to_string(),
            token: None,
            operator: "Operator".to_string(),
        }
    }
}

impl ApiConfig {
    /// Parse a stored config, normalizing what users tend to paste
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let mut cfg: ApiConfig = serde_json::from_str(raw)?;
        cfg.normalize();
        Ok(cfg)
    }

    pub fn normalize(&mut self) {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        self.base_url = if trimmed.is_empty() {
            DEFAULT_BASE_URL.to_string()
        } else {
            trimmed.to_string()
        };
        self.token = self
            .token
            .take()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        self.operator = self.operator.trim().to_string();
        if self.operator.is_empty() {
            self.operator = "Operator".to_string();
        }
    }

    /// Join a path (with leading slash) onto the base URL
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Load from localStorage, falling back to defaults
    pub fn load() -> Self {
        let stored = local_storage().and_then(|s| s.get_item(STORAGE_KEY).ok().flatten());
        match stored {
            Some(raw) => Self::from_json(&raw).unwrap_or_else(|e| {
                tracing::warn!("ignoring unreadable stored config: {}", e);
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn save(&self) -> Result<(), String> {
        let storage = local_storage().ok_or_else(|| "localStorage unavailable".to_string())?;
        let json = serde_json::to_string(self).map_err(|e| e.to_string())?;
        storage
            .set_item(STORAGE_KEY, &json)
            .map_err(|e| format!("could not save settings: {:?}", e))
    }
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_normalizes() {
        let cfg = ApiConfig::from_json(
            r#"{"base_url":" https://isp.example/api/ ","token":"  ","operator":" Ravi "}"#,
        )
        .expect("parse");
        assert_eq!(cfg.base_url, "https://isp.example/api");
        assert_eq!(cfg.token, None);
        assert_eq!(cfg.operator, "Ravi");
        assert_eq!(cfg.url("/tickets"), "https://isp.example/api/tickets");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let cfg = ApiConfig::from_json(r#"{"token":"abc"}"#).expect("parse");
        assert_eq!(cfg.token.as_deref(), Some("abc"));
        assert!(!cfg.base_url.is_empty());
        assert_eq!(cfg.operator, "Operator");
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!(ApiConfig::from_json("not json").is_err());
    }
}
