/// Collector module
///
/// This module groups all logic responsible for:
/// - Walking the configured accounts of every platform
/// - Running the matching platform adapter per account
/// - Turning adapter errors into explicit, empty results
///
/// Design notes:
/// - Platform-specific logic MUST NOT live here
/// - `http` holds the request helpers shared by all adapters
pub mod http;
pub mod runner;
