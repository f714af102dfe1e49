//! Platform adapter registry and factory
//!
//! This module provides:
//! - Central registration of all supported platforms
//! - The fixed collection order used by the runner
//! - A factory function to resolve adapters by name
//!
//! All platform-specific request and payload logic lives in the
//! dedicated adapter modules. The rest of the application talks to
//! platforms exclusively through the `PlatformAdapter` trait.

pub mod adapter;
pub mod tiktok;
pub mod instagram;
pub mod facebook;

use std::sync::Arc;
use adapter::PlatformAdapter;

/// Platforms in collection order.
///
/// The aggregator's stable sort keeps this order for accounts with
/// equal totals, so it is part of the observable output.
pub const PLATFORM_ORDER: [&str; 3] = ["tiktok", "instagram", "facebook"];

/// Returns a platform adapter instance by name.
///
/// CONTRACT:
/// - `name` matches the account-list keys in the configuration
/// - Unknown names return `None`
///
pub fn get_adapter(name: &str) -> Option<Arc<dyn PlatformAdapter>> {
    match name {
        "tiktok" => Some(Arc::new(tiktok::TikTokAdapter)),
        "instagram" => Some(Arc::new(instagram::InstagramAdapter)),
        "facebook" => Some(Arc::new(facebook::FacebookAdapter)),
        _ => None,
    }
}
