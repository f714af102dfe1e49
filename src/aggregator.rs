use crate::schema::{AccountSummary, CollectedAccount, Post};

/// Non-empty, ranked list of account summaries.
///
/// Sorted by `total_views` descending. Accounts with equal totals
/// keep their collection order.
#[derive(Debug, Clone)]
pub struct Ranking {
    rows: Vec<AccountSummary>,
}

impl Ranking {
    /// Best account. Always present: an empty ranking is never built.
    pub fn top(&self) -> &AccountSummary {
        &self.rows[0]
    }

    pub fn rows(&self) -> &[AccountSummary] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<AccountSummary> {
        self.rows
    }
}

/// Summarize one account's posts.
///
/// `avg_views` is `total_views / n_posts`, or 0 without posts.
pub fn summarize(account: &str, posts: &[Post]) -> AccountSummary {
    // Saturates instead of overflowing on absurd API values.
    let total_views = posts
        .iter()
        .fold(0u64, |acc, p| acc.saturating_add(p.views));
    let n_posts = posts.len();
    let avg_views = if n_posts > 0 {
        total_views as f64 / n_posts as f64
    } else {
        0.0
    };

    AccountSummary {
        account: account.to_string(),
        total_views,
        avg_views,
        n_posts,
    }
}

/// Build the ranking from everything that was collected.
///
/// RETURNS:
/// - `None` when there is nothing to analyze: no accounts at all, or
///   no account produced a single post. The caller must stop before
///   prompt generation and dispatch.
/// - `Some(ranking)` otherwise, with one row per account, zero-post
///   accounts included.
///
pub fn analyze_and_rank(collected: &[CollectedAccount]) -> Option<Ranking> {
    if collected.iter().all(|c| c.posts.is_empty()) {
        return None;
    }

    let mut rows: Vec<AccountSummary> = collected
        .iter()
        .map(|c| summarize(&c.account, &c.posts))
        .collect();

    // sort_by is stable
    rows.sort_by(|a, b| b.total_views.cmp(&a.total_views));

    Some(Ranking { rows })
}
