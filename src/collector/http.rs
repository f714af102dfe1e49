use anyhow::Result;
use reqwest::{Client, Url};
use serde_json::Value;

use std::time::Duration;

/// Timeout applied to every data-fetch request.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// GET a URL and decode the body as JSON.
///
/// Fails on transport errors, timeouts, non-2xx status and
/// invalid JSON. Callers decide what a failure defaults to.
pub async fn get_json(http: &Client, url: Url) -> Result<Value> {
    let res = http
        .get(url)
        .timeout(FETCH_TIMEOUT)
        .send()
        .await?
        .error_for_status()?;

    Ok(res.json::<Value>().await?)
}

/// POST a JSON body with a bearer token and decode the JSON response.
pub async fn post_json(http: &Client, url: &str, bearer: &str, body: &Value) -> Result<Value> {
    let res = http
        .post(url)
        .bearer_auth(bearer)
        .json(body)
        .timeout(FETCH_TIMEOUT)
        .send()
        .await?
        .error_for_status()?;

    Ok(res.json::<Value>().await?)
}

/// Build `{base}/{node}/{edge}?params...` for the Graph API.
///
/// `node` is an account or media id and is inserted as a single
/// path segment.
pub fn graph_url(base: &str, node: &str, edge: &str, params: &[(&str, &str)]) -> Result<Url> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| anyhow::anyhow!("graph base url cannot be a base: {}", base))?
        .pop_if_empty()
        .push(node)
        .push(edge);
    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params);
    }
    Ok(url)
}

/// The `data` array of a Graph API response, empty when absent.
pub fn data_array(body: &Value) -> &[Value] {
    body.get("data")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}
