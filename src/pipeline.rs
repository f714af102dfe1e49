use reqwest::Client;

use crate::{
    aggregator::{analyze_and_rank, Ranking},
    collector::runner::collect_all,
    config::Config,
    dispatcher::WebhookDispatcher,
    prompts::generate_prompts,
    schema::{FetchOutcome, Payload},
    util,
};

/// Printed when no account produced any posts.
pub const NO_DATA_MESSAGE: &str = "No se encontraron datos para analizar.";

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Nothing to analyze; prompts and dispatch were skipped
    NoData,

    /// A payload was built and one delivery was attempted
    Dispatched { delivered: bool },
}

/// Runs the daily pipeline once:
/// collect -> rank -> prompts -> dispatch.
///
/// Never fails: collection and delivery problems are already
/// folded into empty results and `delivered: false`.
pub async fn run_daily(cfg: &Config, http: &Client) -> RunOutcome {
    let collected = collect_all(cfg, http).await;

    let failed = collected.iter().filter(|c| c.outcome.is_failed()).count();
    if failed > 0 {
        log::warn!("{} of {} accounts could not be collected", failed, collected.len());
        for c in &collected {
            if let FetchOutcome::Failed { reason } = &c.outcome {
                log::debug!("{} counted as empty: {}", c.account, reason);
            }
        }
    }

    let Some(ranking) = analyze_and_rank(&collected) else {
        println!("{}", NO_DATA_MESSAGE);
        return RunOutcome::NoData;
    };

    let top = ranking.top();
    log::info!(
        "Ranked {} accounts. Top: {} ({} views over {} posts)",
        ranking.rows().len(),
        top.account,
        top.total_views,
        top.n_posts
    );

    let payload = build_payload(ranking, util::now_iso8601());

    let delivered = WebhookDispatcher::new(cfg, http.clone()).send(&payload).await;
    if delivered {
        log::info!("Payload delivered to webhook");
    }

    RunOutcome::Dispatched { delivered }
}

/// Assemble the webhook payload from a ranking.
pub fn build_payload(ranking: Ranking, timestamp: String) -> Payload {
    let top_account = ranking.top().clone();
    let prompts = Vec::from(generate_prompts(&top_account));

    Payload {
        timestamp,
        ranking: ranking.into_rows(),
        top_account,
        prompts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_empty_sources(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/video/list/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"videos": []})))
            .mount(server)
            .await;

        Mock::given(method("GET"))
            .and(path("/IG_USER_ID/media"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(server)
            .await;

        Mock::given(method("GET"))
            .and(path("/FB_PAGE_ID/videos"))
            .respond_with(ResponseTemplate::new(500))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn no_posts_anywhere_skips_dispatch() {
        let server = MockServer::start().await;
        mount_empty_sources(&server).await;

        Mock::given(method("POST"))
            .and(path("/hooks/daily"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let cfg = Config::for_mock(&server.uri());
        let outcome = run_daily(&cfg, &Client::new()).await;

        assert_eq!(outcome, RunOutcome::NoData);
    }

    #[tokio::test]
    async fn full_run_posts_ranking_and_prompts() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/video/list/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "videos": [{"play_count": 10, "description": "corto"}]
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/IG_USER_ID/media"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"id": "m1", "caption": "a"}, {"id": "m2", "caption": "b"}]
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/m1/insights"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"name": "impressions", "values": [{"value": 100}]}]
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/m2/insights"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"name": "video_views", "values": [{"value": "50"}]}]
            })))
            .mount(&server)
            .await;

        // Facebook fails: still ranked, with zero views.
        Mock::given(method("GET"))
            .and(path("/FB_PAGE_ID/videos"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/hooks/daily"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let cfg = Config::for_mock(&server.uri());
        let outcome = run_daily(&cfg, &Client::new()).await;
        assert_eq!(outcome, RunOutcome::Dispatched { delivered: true });

        let requests = server.received_requests().await.unwrap();
        let hook = requests
            .iter()
            .find(|r| r.url.path() == "/hooks/daily")
            .unwrap();
        let body: Value = serde_json::from_slice(&hook.body).unwrap();

        assert_eq!(body["top_account"]["account"], "instagram:IG_USER_ID");
        assert_eq!(body["top_account"]["total_views"], 150);
        assert_eq!(body["top_account"]["avg_views"], 75.0);

        let ranked: Vec<&str> = body["ranking"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["account"].as_str().unwrap())
            .collect();
        assert_eq!(
            ranked,
            ["instagram:IG_USER_ID", "tiktok:usuario1", "facebook:FB_PAGE_ID"]
        );
        assert_eq!(body["ranking"][2]["n_posts"], 0);
        assert_eq!(body["ranking"][2]["avg_views"], 0.0);

        let prompts = body["prompts"].as_array().unwrap();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].as_str().unwrap().contains("instagram:IG_USER_ID"));

        let ts = body["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
    }

    #[tokio::test]
    async fn failed_delivery_still_completes() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/video/list/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "videos": [{"play_count": 3}]
            })))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/hooks/daily"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let cfg = Config::for_mock(&server.uri());
        let outcome = run_daily(&cfg, &Client::new()).await;

        assert_eq!(outcome, RunOutcome::Dispatched { delivered: false });
    }

    #[test]
    fn payload_top_matches_first_row() {
        use crate::schema::{CollectedAccount, Post};

        let collected = vec![
            CollectedAccount::fetched("fb:2".into(), vec![Post::new(10, "x")]),
            CollectedAccount::fetched(
                "ig:1".into(),
                vec![Post::new(100, "a"), Post::new(50, "b")],
            ),
        ];
        let ranking = analyze_and_rank(&collected).unwrap();
        let payload = build_payload(ranking, "t".into());

        assert_eq!(payload.top_account, payload.ranking[0]);
        assert_eq!(payload.top_account.account, "ig:1");
        assert_eq!(payload.prompts.len(), 2);
        assert_eq!(payload.timestamp, "t");
    }
}
