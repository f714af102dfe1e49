//! Data types shared across the whole run.
//!
//! Flow:
//! - Collectors produce `Post` lists per account (`CollectedAccount`)
//! - The aggregator turns them into `AccountSummary` rows
//! - The dispatcher serializes a `Payload` for the webhook
//!
//! Nothing here outlives a single run.

use serde::Serialize;

// ------------------------------------------------------------
// Post
// ------------------------------------------------------------
//
// One normalized post / video / media item.
//
// Every platform collector reduces its own payload shape to
// this pair, so the aggregator never sees platform fields.
//
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Post {
    /// View count (play count, video views or impressions,
    /// depending on the platform)
    pub views: u64,

    /// Caption / description text, empty when absent
    pub caption: String,
}

impl Post {
    pub fn new(views: u64, caption: impl Into<String>) -> Self {
        Self { views, caption: caption.into() }
    }
}

// ------------------------------------------------------------
// Fetch outcome
// ------------------------------------------------------------
//
// Explicit result of collecting one account.
//
// A failed fetch still contributes an empty post list to the
// ranking; the variant only records why it is empty.
//
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Request(s) succeeded; the post list may still be empty
    Fetched,

    /// Network, HTTP status, credential or parse failure
    Failed { reason: String },
}

impl FetchOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::Failed { .. })
    }
}

/// All posts collected for one account identifier.
#[derive(Debug, Clone)]
pub struct CollectedAccount {
    /// `"<platform>:<id>"`
    pub account: String,
    pub posts: Vec<Post>,
    pub outcome: FetchOutcome,
}

impl CollectedAccount {
    pub fn fetched(account: String, posts: Vec<Post>) -> Self {
        Self { account, posts, outcome: FetchOutcome::Fetched }
    }

    /// Failed collection: empty post list plus the reason.
    pub fn failed(account: String, reason: impl Into<String>) -> Self {
        Self {
            account,
            posts: Vec::new(),
            outcome: FetchOutcome::Failed { reason: reason.into() },
        }
    }
}

// ------------------------------------------------------------
// Account summary
// ------------------------------------------------------------
//
// Aggregated statistics for one account.
//
// INVARIANT:
//   avg_views == total_views / n_posts   if n_posts > 0
//   avg_views == 0                       otherwise
//
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct AccountSummary {
    pub account: String,
    pub total_views: u64,
    pub avg_views: f64,
    pub n_posts: usize,
}

// ------------------------------------------------------------
// Webhook payload
// ------------------------------------------------------------
#[derive(Debug, Serialize, Clone)]
pub struct Payload {
    /// ISO-8601 UTC, e.g. "2026-10-18T06:00:00.123456+00:00"
    pub timestamp: String,

    /// Full ranking, best account first
    pub ranking: Vec<AccountSummary>,

    /// Same row as `ranking[0]`
    pub top_account: AccountSummary,

    /// Exactly two prompt strings
    pub prompts: Vec<String>,
}
