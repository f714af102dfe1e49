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

const VIDEO_FIELDS: &str =
    "id,title,description,length,created_time,insights.metric(total_video_impressions,total_video_views)";

pub const VIEW_METRICS: [&str; 2] = ["total_video_views", "total_video_impressions"];

/// Facebook page video adapter
///
/// Single request per page; insights are embedded through field
/// expansion, so there is no per-video call:
///
///   GET /{page_id}/videos?fields=...,insights.metric(...)
///
/// Views: last parseable allow-listed metric in `insights.data`.
/// Caption: `description`.
pub struct FacebookAdapter;

#[async_trait::async_trait]
impl PlatformAdapter for FacebookAdapter {

    fn name(&self) -> &'static str {
        "facebook"
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
            "videos",
            &[("access_token", token), ("fields", VIDEO_FIELDS)],
        )?;

        if cfg.debug_log() {
            log::info!("[facebook] GET videos for {}", account);
        }

        let body = http::get_json(http, url).await?;
        Ok(parse_videos(&body))
    }
}

/// Normalize a page videos response.
pub fn parse_videos(body: &Value) -> Vec<Post> {
    http::data_array(body)
        .iter()
        .map(|video| {
            let insights = video
                .pointer("/insights/data")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();

            let (views, parse_failures) = util::views_from_insights(insights, &VIEW_METRICS);
            if parse_failures > 0 {
                METRICS.metric_parse_errors.fetch_add(parse_failures, Ordering::Relaxed);
            }

            Post::new(views, util::str_field(video, "description"))
        })
        .collect()
}
