//! Storage key derivation for container hostnames.

use thiserror::Error;

/// Root prefix for all records written to the store.
pub const KEY_ROOT: &str = "/internaldns";

/// Returned when a hostname cannot be turned into a storage key.
#[derive(Debug, Clone, Error)]
#[error("invalid hostname {hostname:?}")]
pub struct InvalidHostname {
    /// The offending hostname.
    pub hostname: String,
}

/// Derive the storage key for a hostname.
///
/// The hostname's dot-separated labels are reversed and joined with `/`
/// under [`KEY_ROOT`], so sibling subdomains share a key prefix and can be
/// range-scanned together: `a.b.com` becomes `/internaldns/com/b/a`. A
/// hostname without dots yields a single-label key. An empty hostname is
/// invalid input.
pub fn record_key(hostname: &str) -> Result<String, InvalidHostname> {
    if hostname.is_empty() {
        return Err(InvalidHostname {
            hostname: hostname.to_string(),
        });
    }

    let mut labels: Vec<&str> = hostname.split('.').collect();
    labels.reverse();

    Ok(format!("{}/{}", KEY_ROOT, labels.join("/")))
}
