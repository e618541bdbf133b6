//! Enum consistency checking across schema loads.
//!
//! Enum definitions may legitimately appear in several schemas (and several
//! generated headers) as long as every definition agrees on the values it
//! shares with earlier ones. Tables are allowed to grow or shrink add-only
//! across loads, which tolerates partial header inclusion downstream; only a
//! key mapped to two different symbols is a hard conflict.
//!
//! The registry is an explicit object the caller constructs and injects into
//! schema-loading calls, so its lifetime and sharing are the caller's
//! decision.

use std::collections::{BTreeMap, HashMap};

use parking_lot::Mutex;

use crate::error::{Result, SchemaError};

/// Accumulates enum value tables by name and cross-checks repeats.
///
/// Safe to share across threads; the accumulated state is mutex-guarded.
#[derive(Debug, Default)]
pub struct EnumRegistry {
    tables: Mutex<HashMap<String, BTreeMap<u32, String>>>,
}

impl EnumRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks one enum definition against everything seen so far.
    ///
    /// An unseen name registers its table. A seen name is compared key by
    /// key: a key mapped to a different symbol on either side fails; keys
    /// present on only one side log a warning and succeed. The first
    /// registered table is kept as the reference.
    ///
    /// # Errors
    /// Returns [`SchemaError::EnumConflict`] naming the enum and the first
    /// conflicting key.
    pub fn check(&self, name: &str, table: &[(u32, String)]) -> Result<()> {
        let mut tables = self.tables.lock();

        let Some(previous) = tables.get(name) else {
            tables.insert(name.to_string(), table.iter().cloned().collect());
            return Ok(());
        };

        for (key, symbol) in table {
            match previous.get(key) {
                None => {
                    tracing::warn!(
                        name,
                        key,
                        "previously defined enum did not contain this value; this could lead \
                         to problems depending on which definitions are included"
                    );
                }
                Some(prev) if prev != symbol => {
                    return Err(SchemaError::EnumConflict {
                        name: name.to_string(),
                        key: *key,
                        previous: prev.clone(),
                        conflicting: symbol.clone(),
                    });
                }
                Some(_) => {}
            }
        }

        for (key, symbol) in previous {
            if !table.iter().any(|(k, _)| k == key) {
                tracing::warn!(
                    name,
                    key,
                    symbol,
                    "new enum definition does not contain this previously defined value"
                );
            }
        }

        Ok(())
    }

    /// Returns true if an enum with this name has been registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tables.lock().contains_key(name)
    }

    /// Number of distinct enum names registered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.lock().len()
    }

    /// Returns true if nothing has been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.lock().is_empty()
    }
}
