use reqwest::Client;

use crate::config::Config;
use crate::schema::Post;

/// PlatformAdapter is the abstraction layer between:
/// - The generic collection runner
/// - Platform-specific HTTP APIs
///
/// Each platform implementation must:
/// - Know its endpoint(s) and credential
/// - Fetch the recent posts of one account
/// - Normalize them into `Post { views, caption }`
///
/// ERROR CONTRACT:
/// - Return `Err` when the account as a whole could not be fetched
///   (missing credential, network, HTTP status, undecodable body).
///   The runner turns this into an empty, failed collection.
/// - Sub-request failures that only affect one post (e.g. an
///   Instagram insights call) are defaulted inside the adapter.
/// - Must never panic on unexpected payload shapes.
///
/// THREAD SAFETY:
/// - Must be Send + Sync (adapters are handed out as `Arc<dyn _>`)
///
#[async_trait::async_trait]
pub trait PlatformAdapter: Send + Sync {

    /// Canonical platform name.
    ///
    /// CONTRACT:
    /// - Used as the `<platform>` part of account identifiers
    /// - Must match the key in `config.accounts`
    ///
    fn name(&self) -> &'static str;

    /// Fetches and normalizes the recent posts of one account.
    ///
    /// PARAMETERS:
    /// - `http`: shared client (per-request timeouts are applied
    ///   by the adapter)
    /// - `cfg`: run configuration (endpoints + credentials)
    /// - `account`: raw platform id, without prefix
    ///
    /// TODO:
    /// - Follow `paging.next` cursors; only the first page is read.
    ///
    async fn fetch_posts(
        &self,
        http: &Client,
        cfg: &Config,
        account: &str,
    ) -> anyhow::Result<Vec<Post>>;
}
