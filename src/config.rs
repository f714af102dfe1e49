use serde::Deserialize;

use std::env;
use std::fs;
use std::path::Path;

// ------------------------------------------------------------
// Root configuration
// ------------------------------------------------------------
//
// Top-level configuration for one agent run.
//
// It defines:
// - Which accounts are collected per platform
// - API endpoints (overridable for local testing)
// - Credentials (always taken from the environment)
// - Optional debug / demo flags
//
// Every field has a default, so an empty `{}` file or no file
// at all yields the production setup.
//
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    /// Account ids to collect, grouped by platform
    pub accounts: PlatformAccounts,

    /// API and webhook endpoints
    pub endpoints: Endpoints,

    /// Secrets, never read from the config file
    #[serde(skip)]
    pub credentials: Credentials,

    /// Optional debug configuration
    pub debug: Option<DebugConfig>,
}

// ------------------------------------------------------------
// Account lists
// ------------------------------------------------------------
//
// Raw platform ids, without the `<platform>:` prefix.
// The prefix is added by the collector when it builds the
// account identifier.
//
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PlatformAccounts {
    /// TikTok usernames
    pub tiktok: Vec<String>,

    /// Instagram business user ids
    pub instagram: Vec<String>,

    /// Facebook page ids
    pub facebook: Vec<String>,
}

impl Default for PlatformAccounts {
    fn default() -> Self {
        Self {
            tiktok: vec!["usuario1".to_string()],
            instagram: vec!["IG_USER_ID".to_string()],
            facebook: vec!["FB_PAGE_ID".to_string()],
        }
    }
}

impl PlatformAccounts {
    /// Returns the configured ids for a platform name.
    ///
    /// Unknown platforms have no accounts.
    pub fn for_platform(&self, platform: &str) -> &[String] {
        match platform {
            "tiktok" => &self.tiktok,
            "instagram" => &self.instagram,
            "facebook" => &self.facebook,
            _ => &[],
        }
    }
}

// ------------------------------------------------------------
// Endpoints
// ------------------------------------------------------------
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Endpoints {
    /// TikTok video list endpoint (full URL)
    pub tiktok_url: String,

    /// Graph API base, shared by Instagram and Facebook.
    /// No trailing slash.
    pub graph_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            tiktok_url: "https://open-api.tiktok.com/video/list/".to_string(),
            graph_url: "https://graph.facebook.com/v17.0".to_string(),
        }
    }
}

// ------------------------------------------------------------
// Credentials
// ------------------------------------------------------------
//
// Security-sensitive values. Loaded from:
// - TIKTOK_TOKEN
// - FB_TOKEN       (Instagram + Facebook Graph API)
// - ZAPIER_WEBHOOK
//
// A missing value stays `None`; the component that needs it
// treats that as a failed fetch / failed delivery.
//
#[derive(Clone, Default)]
pub struct Credentials {
    pub tiktok_token: Option<String>,
    pub graph_token: Option<String>,
    pub webhook_url: Option<String>,
}

impl Credentials {
    pub fn from_env() -> Self {
        Self {
            tiktok_token: non_empty_var("TIKTOK_TOKEN"),
            graph_token: non_empty_var("FB_TOKEN"),
            webhook_url: non_empty_var("ZAPIER_WEBHOOK"),
        }
    }
}

// Tokens must not end up in debug logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("tiktok_token", &self.tiktok_token.as_ref().map(|_| "***"))
            .field("graph_token", &self.graph_token.as_ref().map(|_| "***"))
            .field("webhook_url", &self.webhook_url.as_ref().map(|_| "***"))
            .finish()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

// ------------------------------------------------------------
// Debug configuration
// ------------------------------------------------------------
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DebugConfig {
    /// Logs every outgoing request URL at info level
    pub log: Option<bool>,

    /// Print the webhook payload instead of sending it
    pub demo: Option<bool>,
}

impl Config {
    pub fn debug_log(&self) -> bool {
        self.debug.as_ref().is_some_and(|d| d.log.unwrap_or(false))
    }

    pub fn demo(&self) -> bool {
        self.debug.as_ref().is_some_and(|d| d.demo.unwrap_or(false))
    }
}

// ------------------------------------------------------------
// Configuration loader
// ------------------------------------------------------------
//
// Resolution order:
// 1. `AGENT_CONFIG` names a file -> it must exist and parse
// 2. `config.json` in the working directory, if present
// 3. built-in defaults
//
// Credentials are overlaid from the environment afterwards.
//
pub fn load_config() -> anyhow::Result<Config> {
    let mut cfg = match non_empty_var("AGENT_CONFIG") {
        Some(path) => load_config_file(&path)?,
        None if Path::new("config.json").exists() => load_config_file("config.json")?,
        None => Config::default(),
    };

    cfg.credentials = Credentials::from_env();
    Ok(cfg)
}

pub fn load_config_file(path: &str) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("cannot read config {}: {}", path, e))?;
    parse_config(&data)
}

fn parse_config(data: &str) -> anyhow::Result<Config> {
    let cfg = serde_json::from_str(data)?;
    Ok(cfg)
}

#[cfg(test)]
impl Config {
    /// Config pointing every endpoint at a local mock server, with all
    /// credentials set.
    pub fn for_mock(base: &str) -> Self {
        Self {
            accounts: PlatformAccounts::default(),
            endpoints: Endpoints {
                tiktok_url: format!("{}/video/list/", base),
                graph_url: base.to_string(),
            },
            credentials: Credentials {
                tiktok_token: Some("tt-token".to_string()),
                graph_token: Some("fb-token".to_string()),
                webhook_url: Some(format!("{}/hooks/daily", base)),
            },
            debug: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_default_accounts() {
        let cfg = parse_config("{}").unwrap();

        assert_eq!(cfg.accounts.tiktok, vec!["usuario1"]);
        assert_eq!(cfg.accounts.instagram, vec!["IG_USER_ID"]);
        assert_eq!(cfg.accounts.facebook, vec!["FB_PAGE_ID"]);
        assert_eq!(cfg.endpoints.graph_url, "https://graph.facebook.com/v17.0");
        assert!(!cfg.demo());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = parse_config(
            r#"{
                "accounts": { "tiktok": ["a", "b"] },
                "endpoints": { "graph_url": "http://localhost:9000" },
                "debug": { "demo": true }
            }"#,
        )
        .unwrap();

        assert_eq!(cfg.accounts.tiktok, vec!["a", "b"]);
        assert_eq!(cfg.accounts.facebook, vec!["FB_PAGE_ID"]);
        assert_eq!(cfg.endpoints.graph_url, "http://localhost:9000");
        assert_eq!(
            cfg.endpoints.tiktok_url,
            "https://open-api.tiktok.com/video/list/"
        );
        assert!(cfg.demo());
        assert!(!cfg.debug_log());
    }

    #[test]
    fn credentials_are_never_read_from_file() {
        let cfg = parse_config(r#"{ "credentials": { "tiktok_token": "leak" } }"#).unwrap();
        assert!(cfg.credentials.tiktok_token.is_none());
    }

    #[test]
    fn debug_output_masks_secrets() {
        let creds = Credentials {
            tiktok_token: Some("secret-token".into()),
            graph_token: None,
            webhook_url: Some("https://hooks.example/abc".into()),
        };
        let out = format!("{:?}", creds);

        assert!(!out.contains("secret-token"));
        assert!(!out.contains("hooks.example"));
        assert!(out.contains("***"));
    }

    #[test]
    fn unknown_platform_has_no_accounts() {
        let accounts = PlatformAccounts::default();
        assert!(accounts.for_platform("myspace").is_empty());
        assert_eq!(accounts.for_platform("facebook"), ["FB_PAGE_ID"]);
    }

    #[test]
    fn missing_named_file_is_an_error() {
        assert!(load_config_file("/nonexistent/agent-config.json").is_err());
    }
}
