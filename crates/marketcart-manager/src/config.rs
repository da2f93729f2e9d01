//! # Manager Configuration
//!
//! Construction-time settings for the cart manager.

use serde::{Deserialize, Serialize};

/// Default storage key for the cart snapshot.
///
/// Namespaced so the cart's row can share a key-value table with other
/// persisted application data without collision.
pub const DEFAULT_STORAGE_KEY: &str = "marketcart:cart";

/// Default capacity of the out-of-band persist-failure channel.
pub const DEFAULT_FAILURE_CAPACITY: usize = 16;

// =============================================================================
// Corruption Policy
// =============================================================================

/// What `load` does when the stored snapshot cannot be used (unreadable
/// storage or bytes that fail to decode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorruptionPolicy {
    /// Fail `load` with an error that carries the raw stored bytes. The
    /// stored snapshot is left untouched; the embedding application
    /// decides whether to recover or reset. Default.
    #[default]
    Preserve,

    /// Log a warning and start with an empty cart. The corrupt snapshot
    /// stays in storage until the first mutation overwrites it. This
    /// trades a recoverable error for silent data loss.
    ResetToEmpty,
}

impl std::fmt::Display for CorruptionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorruptionPolicy::Preserve => write!(f, "preserve"),
            CorruptionPolicy::ResetToEmpty => write!(f, "reset_to_empty"),
        }
    }
}

impl std::str::FromStr for CorruptionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "preserve" => Ok(CorruptionPolicy::Preserve),
            "reset_to_empty" | "reset" => Ok(CorruptionPolicy::ResetToEmpty),
            other => Err(format!(
                "unknown corruption policy: '{}'. Valid options: preserve, reset_to_empty",
                other
            )),
        }
    }
}

// =============================================================================
// Manager Config
// =============================================================================

/// Cart manager configuration.
///
/// ## Example
/// ```rust
/// use marketcart_manager::{CorruptionPolicy, ManagerConfig};
///
/// let config = ManagerConfig::default()
///     .storage_key("myapp:cart")
///     .corruption_policy(CorruptionPolicy::ResetToEmpty);
/// assert_eq!(config.storage_key, "myapp:cart");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Storage key the snapshot lives under.
    pub storage_key: String,

    /// Behavior when the stored snapshot cannot be used at load time.
    pub corruption_policy: CorruptionPolicy,

    /// Capacity of the persist-failure channel. Failures beyond capacity
    /// are logged and dropped.
    pub failure_channel_capacity: usize,
}

impl ManagerConfig {
    /// Sets the storage key.
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Sets the corruption policy.
    pub fn corruption_policy(mut self, policy: CorruptionPolicy) -> Self {
        self.corruption_policy = policy;
        self
    }
}

impl Default for ManagerConfig {
    fn default() -> Self {
        ManagerConfig {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            corruption_policy: CorruptionPolicy::default(),
            failure_channel_capacity: DEFAULT_FAILURE_CAPACITY,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
