//! Heap sizing configuration.
//!
//! The managed heap reads its sizing from the environment the first time it
//! starts. Embedders that want different sizing can install a configuration
//! with [`configure_heap`](crate::configure_heap) before the first allocation.

use derive_more::{Display, Error};

/// Bytes reserved for the first arena chunk.
pub const ENV_HEAP_INITIAL: &str = "PURR_HEAP_INITIAL";

/// Upper bound on arena memory.
pub const ENV_HEAP_LIMIT: &str = "PURR_HEAP_LIMIT";

/// Sizing for a [`ManagedHeap`](crate::ManagedHeap).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeapConfig {
    /// Bytes reserved up front. Zero defers the first chunk to the first allocation.
    ///
    /// Ignored when the reserved chunk would not fit under `limit`.
    pub initial_capacity: usize,
    /// Maximum bytes the arena may reserve. `None` means unbounded.
    ///
    /// The arena reserves whole chunks, and the smallest chunk is 64 bytes on
    /// 64-bit targets. A limit below that refuses every allocation, including
    /// zero-sized ones. A request is refused when the chunk that would serve it
    /// does not fit, even if the request itself would.
    pub limit: Option<usize>,
}

/// An environment variable held a value that is not a byte count.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
#[display("invalid value {value:?} for {var}: expected a byte count such as 4096, 64k or 2m")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
}

impl HeapConfig {
    pub fn with_initial_capacity(mut self, bytes: usize) -> Self {
        self.initial_capacity = bytes;
        self
    }

    pub fn with_limit(mut self, bytes: usize) -> Self {
        self.limit = Some(bytes);
        self
    }

    /// Read `PURR_HEAP_INITIAL` and `PURR_HEAP_LIMIT`.
    ///
    /// A malformed value is logged and the default is kept for that field.
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Like [`HeapConfig::from_env`], but reports the first malformed value.
    pub fn try_from_env() -> Result<Self, ConfigError> {
        Self::try_from_lookup(|var| std::env::var(var).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        match read_size(ENV_HEAP_INITIAL, &lookup) {
            Ok(Some(bytes)) => config.initial_capacity = bytes,
            Ok(None) => {}
            Err(error) => tracing::warn!(%error, "ignoring heap configuration"),
        }
        match read_size(ENV_HEAP_LIMIT, &lookup) {
            Ok(limit) => config.limit = limit,
            Err(error) => tracing::warn!(%error, "ignoring heap configuration"),
        }

        config
    }

    pub(crate) fn try_from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            initial_capacity: read_size(ENV_HEAP_INITIAL, &lookup)?.unwrap_or(0),
            limit: read_size(ENV_HEAP_LIMIT, &lookup)?,
        })
    }
}

fn read_size(
    var: &'static str,
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<Option<usize>, ConfigError> {
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    parse_size(&value)
        .map(Some)
        .ok_or(ConfigError { var, value })
}

/// Parse a byte count with an optional binary `k`/`m`/`g` suffix.
pub(crate) fn parse_size(value: &str) -> Option<usize> {
    let value = value.trim();
    let (digits, multiplier) = match value.chars().last()?.to_ascii_lowercase() {
        'k' => (&value[..value.len() - 1], 1 << 10),
        'm' => (&value[..value.len() - 1], 1 << 20),
        'g' => (&value[..value.len() - 1], 1 << 30),
        _ => (value, 1),
    };
    digits.trim().parse::<usize>().ok()?.checked_mul(multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let vars: HashMap<_, _> = vars.iter().copied().collect();
        move |var: &str| vars.get(var).map(|v| v.to_string())
    }

    #[test]
    fn test_parse_plain_and_suffixed_sizes() {
        assert_eq!(parse_size("4096"), Some(4096));
        assert_eq!(parse_size(" 64k "), Some(64 * 1024));
        assert_eq!(parse_size("2M"), Some(2 * 1024 * 1024));
        assert_eq!(parse_size("1g"), Some(1 << 30));
        assert_eq!(parse_size("0"), Some(0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_size(""), None);
        assert_eq!(parse_size("k"), None);
        assert_eq!(parse_size("-5"), None);
        assert_eq!(parse_size("12kb"), None);
        assert_eq!(parse_size(&format!("{}g", usize::MAX)), None);
    }

    #[test]
    fn test_unset_environment_is_default() {
        let config = HeapConfig::try_from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, HeapConfig::default());
        assert_eq!(HeapConfig::from_lookup(lookup_from(&[])), HeapConfig::default());
    }

    #[test]
    fn test_environment_values_are_read() {
        let vars = [(ENV_HEAP_INITIAL, "8k"), (ENV_HEAP_LIMIT, "1m")];
        let config = HeapConfig::try_from_lookup(lookup_from(&vars)).unwrap();
        assert_eq!(config.initial_capacity, 8 * 1024);
        assert_eq!(config.limit, Some(1024 * 1024));
    }

    #[test]
    fn test_malformed_value_is_reported() {
        let vars = [(ENV_HEAP_LIMIT, "lots")];
        let err = HeapConfig::try_from_lookup(lookup_from(&vars)).unwrap_err();
        assert_eq!(err.var, ENV_HEAP_LIMIT);
        assert_eq!(err.value, "lots");
        assert!(err.to_string().contains("PURR_HEAP_LIMIT"));
    }

    #[test]
    fn test_malformed_value_falls_back_per_field() {
        let vars = [(ENV_HEAP_INITIAL, "huge"), (ENV_HEAP_LIMIT, "512")];
        let config = HeapConfig::from_lookup(lookup_from(&vars));
        assert_eq!(config.initial_capacity, 0);
        assert_eq!(config.limit, Some(512));
    }

    #[test]
    fn test_builder_methods() {
        let config = HeapConfig::default()
            .with_initial_capacity(256)
            .with_limit(4096);
        assert_eq!(config.initial_capacity, 256);
        assert_eq!(config.limit, Some(4096));
    }
}
