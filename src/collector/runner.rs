use reqwest::Client;

use std::sync::atomic::Ordering;

use crate::{
    config::Config,
    metrics::METRICS,
    platforms::{adapter::PlatformAdapter, get_adapter, PLATFORM_ORDER},
    schema::CollectedAccount,
    util,
};

/// Collects every configured account of every platform.
///
/// ORDER:
/// - Platforms in `PLATFORM_ORDER`
/// - Accounts in configuration order
///
/// Requests run strictly one after another; a slow API only costs
/// its own timeout.
///
/// GUARANTEES:
/// - Exactly one `CollectedAccount` per configured account id
/// - Never fails; failed accounts carry an empty post list
///
pub async fn collect_all(cfg: &Config, http: &Client) -> Vec<CollectedAccount> {
    let mut collected = Vec::new();

    for platform in PLATFORM_ORDER {
        let Some(adapter) = get_adapter(platform) else {
            log::error!("Platform '{}' is not supported", platform);
            continue;
        };

        for id in cfg.accounts.for_platform(platform) {
            collected.push(collect_account(adapter.as_ref(), cfg, http, id).await);
        }
    }

    collected
}

/// Runs one adapter for one account and records the outcome.
///
/// DEFAULT ON FAILURE:
/// - empty post list, `FetchOutcome::Failed { reason }`
///
pub async fn collect_account(
    adapter: &dyn PlatformAdapter,
    cfg: &Config,
    http: &Client,
    id: &str,
) -> CollectedAccount {
    let account = util::account_id(adapter.name(), id);
    METRICS.accounts_collected.fetch_add(1, Ordering::Relaxed);

    match adapter.fetch_posts(http, cfg, id).await {
        Ok(posts) => {
            log::info!("Collected {} posts for {}", posts.len(), account);
            METRICS.posts_collected.fetch_add(posts.len(), Ordering::Relaxed);
            CollectedAccount::fetched(account, posts)
        }
        Err(e) => {
            log::warn!("Collection failed for {}: {:#}", account, e);
            METRICS.fetch_failures.fetch_add(1, Ordering::Relaxed);
            CollectedAccount::failed(account, e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FetchOutcome, Post};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn collects_in_platform_then_config_order() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/video/list/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "videos": [{"play_count": 5, "description": "tt"}]
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/IG_USER_ID/media"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&server)
            .await;

        // Facebook page is unknown to the mock -> 404 -> failed collection
        let mut cfg = Config::for_mock(&server.uri());
        cfg.accounts.tiktok = vec!["a".into(), "b".into()];

        let collected = collect_all(&cfg, &Client::new()).await;
        let accounts: Vec<_> = collected.iter().map(|c| c.account.as_str()).collect();

        assert_eq!(
            accounts,
            ["tiktok:a", "tiktok:b", "instagram:IG_USER_ID", "facebook:FB_PAGE_ID"]
        );

        assert_eq!(collected[0].posts, vec![Post::new(5, "tt")]);
        assert_eq!(collected[2].outcome, FetchOutcome::Fetched);
        assert!(collected[2].posts.is_empty());
        assert!(collected[3].outcome.is_failed());
        assert!(collected[3].posts.is_empty());
    }

    #[tokio::test]
    async fn failure_reason_is_kept() {
        let mut cfg = Config::for_mock("http://127.0.0.1:9");
        cfg.credentials.tiktok_token = None;

        let adapter = get_adapter("tiktok").unwrap();
        let c = collect_account(adapter.as_ref(), &cfg, &Client::new(), "usuario1").await;

        assert_eq!(c.account, "tiktok:usuario1");
        match c.outcome {
            FetchOutcome::Failed { reason } => assert!(reason.contains("TIKTOK_TOKEN")),
            other => panic!("expected failure, got {:?}", other),
        }
    }
}
