// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_AI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_AI_URL.to_string(),
        }
    }
}

impl AiConfig {
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Overrides the platform data dir location of the database.
    pub db_path: Option<PathBuf>,
    pub ai: AiConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = AiConfig::default();
        Self {
            db_path: get("SMARTFIN_DB").map(PathBuf::from),
            ai: AiConfig {
                api_key: get("SMARTFIN_API_KEY").or_else(|| get("GEMINI_API_KEY")),
                model: get("SMARTFIN_MODEL").unwrap_or(defaults.model),
                base_url: get("SMARTFIN_AI_URL")
                    .map(|u| u.trim_end_matches('/').to_string())
                    .unwrap_or(defaults.base_url),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let cfg = AppConfig::from_lookup(lookup(&[]));
        assert_eq!(cfg, AppConfig::default());
        assert!(!cfg.ai.is_configured());
    }

    #[test]
    fn gemini_key_is_a_fallback() {
        let cfg =
            AppConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "g"), ("SMARTFIN_API_KEY", " ")]));
        assert_eq!(cfg.ai.api_key.as_deref(), Some("g"));

        let cfg =
            AppConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "g"), ("SMARTFIN_API_KEY", "s")]));
        assert_eq!(cfg.ai.api_key.as_deref(), Some("s"));
    }

    #[test]
    fn url_and_db_overrides() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("SMARTFIN_AI_URL", "http://localhost:9000/v1/"),
            ("SMARTFIN_DB", "/tmp/x.sqlite"),
            ("SMARTFIN_MODEL", "m"),
        ]));
        assert_eq!(cfg.ai.base_url, "http://localhost:9000/v1");
        assert_eq!(cfg.ai.model, "m");
        assert_eq!(cfg.db_path, Some(PathBuf::from("/tmp/x.sqlite")));
    }
}
