//! Host suffix table mapping domain suffixes to record addresses.
//!
//! The table is built once at startup from configuration and is read-only
//! for the process lifetime. Lookups scan all entries; the table is small
//! and lookups only happen per discrete container event.

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::config::HostConfig;
use crate::error::SyncError;

/// Returned when a hostname matches no configured suffix.
///
/// This is a normal, frequent outcome for containers outside the managed
/// domain set; callers skip the event rather than surfacing a failure.
#[derive(Debug, Clone, Error)]
#[error("no host suffix matches hostname {hostname:?}")]
pub struct NoSuffixMatch {
    /// The hostname that failed to resolve.
    pub hostname: String,
}

/// One configured domain suffix and the address it resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEntry {
    /// Domain suffix matched against the tail of container hostnames.
    pub suffix: String,
    /// Address written to records for hostnames under this suffix.
    pub address: String,
}

/// Immutable suffix-to-address table.
#[derive(Debug, Clone, Default)]
pub struct HostTable {
    entries: HashMap<String, HostEntry>,
}

impl HostTable {
    /// Build a table from the `[hosts]` section of the configuration.
    ///
    /// Fails if any suffix or address is empty.
    pub fn from_config(hosts: &HashMap<String, HostConfig>) -> Result<Self, SyncError> {
        Self::from_entries(hosts.iter().map(|(suffix, host)| HostEntry {
            suffix: suffix.clone(),
            address: host.address.clone(),
        }))
    }

    /// Build a table from host entries.
    ///
    /// When two entries share a suffix, the last one wins. Empty suffixes
    /// and empty addresses are rejected.
    pub fn from_entries<I>(entries: I) -> Result<Self, SyncError>
    where
        I: IntoIterator<Item = HostEntry>,
    {
        let mut table = HashMap::new();

        for entry in entries {
            if entry.suffix.is_empty() {
                return Err(SyncError::Config(
                    "host suffix must not be empty".to_string(),
                ));
            }
            if entry.address.is_empty() {
                return Err(SyncError::Config(format!(
                    "host suffix {:?} has an empty address",
                    entry.suffix
                )));
            }
            if let Some(previous) = table.insert(entry.suffix.clone(), entry) {
                debug!(suffix = %previous.suffix, "duplicate host suffix, last entry wins");
            }
        }

        Ok(Self { entries: table })
    }

    /// Find the entry whose suffix is a trailing substring of `hostname`,
    /// preferring the longest matching suffix.
    pub fn lookup(&self, hostname: &str) -> Option<&HostEntry> {
        self.entries
            .values()
            .filter(|entry| hostname.ends_with(&entry.suffix))
            .max_by_key(|entry| entry.suffix.len())
    }

    /// Resolve a hostname to its configured address.
    pub fn resolve(&self, hostname: &str) -> Result<&str, NoSuffixMatch> {
        match self.lookup(hostname) {
            Some(entry) => Ok(entry.address.as_str()),
            None => Err(NoSuffixMatch {
                hostname: hostname.to_string(),
            }),
        }
    }

    /// Number of configured suffixes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no suffixes are configured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
