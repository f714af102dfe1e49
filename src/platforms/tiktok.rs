use reqwest::Client;
use serde_json::{Value, json};

use crate::{
    collector::http,
    config::Config,
    schema::Post,
    util,
};

use super::adapter::PlatformAdapter;

/// Number of videos requested per account.
const VIDEO_COUNT: u32 = 20;

/// TikTok video list adapter
///
/// One POST per account:
///   POST {tiktok_url}
///   Authorization: Bearer <TIKTOK_TOKEN>
///   {"username": "<id>", "count": 20}
///
/// Response shape:
///   {"videos": [{"play_count": 123, "description": "..."}, ...]}
///
/// Views come from `play_count`, caption from `description`.
pub struct TikTokAdapter;

#[async_trait::async_trait]
impl PlatformAdapter for TikTokAdapter {

    fn name(&self) -> &'static str {
        "tiktok"
    }

    async fn fetch_posts(
        &self,
        http: &Client,
        cfg: &Config,
        account: &str,
    ) -> anyhow::Result<Vec<Post>> {
        let token = cfg
            .credentials
            .tiktok_token
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("TIKTOK_TOKEN is not set"))?;

        let body = json!({
            "username": account,
            "count": VIDEO_COUNT,
        });

        if cfg.debug_log() {
            log::info!("[tiktok] POST {} username={}", cfg.endpoints.tiktok_url, account);
        }

        let res = http::post_json(http, &cfg.endpoints.tiktok_url, token, &body).await?;
        Ok(parse_videos(&res))
    }
}

/// Normalize a video list response.
///
/// A missing or non-array `videos` field means no posts.
/// Missing `play_count` counts as 0 views.
pub fn parse_videos(res: &Value) -> Vec<Post> {
    let Some(videos) = res.get("videos").and_then(Value::as_array) else {
        return Vec::new();
    };

    videos
        .iter()
        .map(|v| {
            let views = v
                .get("play_count")
                .and_then(util::parse_view_count)
                .unwrap_or(0);
            Post::new(views, util::str_field(v, "description"))
        })
        .collect()
}
