use reqwest::Client;
use serde_json::Value;

use std::sync::atomic::Ordering;

use crate::{
    collector::http,
    config::Config,
    metrics::METRICS,
    schema::Post,
    util,
};

use super::adapter::PlatformAdapter;

const MEDIA_FIELDS: &str = "id,caption,media_type,timestamp";
const INSIGHT_METRICS: &str = "impressions,reach,engagement,video_views";

/// Insight metrics that count as views, in no particular priority;
/// the last one present in the response wins.
pub const VIEW_METRICS: [&str; 2] = ["video_views", "impressions"];

/// Instagram Graph API adapter
///
/// Two-stage fetch per account:
/// 1. GET /{user_id}/media            -> media list
/// 2. GET /{media_id}/insights        -> one call per media item
///
/// FAILURE HANDLING:
/// - Media list failure fails the whole account
/// - Insights failure only zeroes that post's views; the post
///   is still counted
pub struct InstagramAdapter;

#[async_trait::async_trait]
impl PlatformAdapter for InstagramAdapter {

    fn name(&self) -> &'static str {
        "instagram"
    }

    async fn fetch_posts(
        &self,
        http: &Client,
        cfg: &Config,
        account: &str,
    ) -> anyhow::Result<Vec<Post>> {
        let token = cfg
            .credentials
            .graph_token
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("FB_TOKEN is not set"))?;

        let url = http::graph_url(
            &cfg.endpoints.graph_url,
            account,
            "media",
            &[("access_token", token), ("fields", MEDIA_FIELDS)],
        )?;

        if cfg.debug_log() {
            log::info!("[instagram] GET media for {}", account);
        }

        let body = http::get_json(http, url).await?;
        let media = http::data_array(&body);

        let mut posts = Vec::with_capacity(media.len());
        for item in media {
            let insights = match media_id(item) {
                Some(id) => fetch_insights(http, cfg, token, &id).await,
                None => {
                    log::warn!("[instagram] media item without id on {}", account);
                    Vec::new()
                }
            };
            posts.push(post_from_media(item, &insights));
        }

        Ok(posts)
    }
}

/// Fetch the insights `data` array for one media item.
///
/// Never fails: any error yields an empty list, i.e. `{"data": []}`.
async fn fetch_insights(http: &Client, cfg: &Config, token: &str, media_id: &str) -> Vec<Value> {
    match try_fetch_insights(http, cfg, token, media_id).await {
        Ok(body) => http::data_array(&body).to_vec(),
        Err(e) => {
            METRICS.insight_failures.fetch_add(1, Ordering::Relaxed);
            log::warn!("[instagram] insights for media {} failed: {}", media_id, e);
            Vec::new()
        }
    }
}

async fn try_fetch_insights(
    http: &Client,
    cfg: &Config,
    token: &str,
    media_id: &str,
) -> anyhow::Result<Value> {
    let url = http::graph_url(
        &cfg.endpoints.graph_url,
        media_id,
        "insights",
        &[("metric", INSIGHT_METRICS), ("access_token", token)],
    )?;
    http::get_json(http, url).await
}

/// Graph ids are strings, but accept numbers too.
fn media_id(item: &Value) -> Option<String> {
    match item.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Build a post from a media item and its insight metrics.
pub fn post_from_media(item: &Value, insights: &[Value]) -> Post {
    let (views, parse_failures) = util::views_from_insights(insights, &VIEW_METRICS);
    if parse_failures > 0 {
        METRICS.metric_parse_errors.fetch_add(parse_failures, Ordering::Relaxed);
    }

    Post::new(views, util::str_field(item, "caption"))
}
