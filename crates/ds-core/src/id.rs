//! Element identifiers.
//!
//! Ids are strings on the wire (`"rectangle_4"`, or whatever an imported
//! file used) and interned `Spur` keys in memory, so the store can copy and
//! compare them freely.
//!
//! The interner is process-global and never shrinks. Growth is bounded by
//! the distinct ids the session has seen: ids minted by the store, ids
//! carried by loaded or imported documents, and ids echoed back by the
//! renderer (which only knows ids it was handed). Lookups by caller-supplied
//! strings go through [`ElementId::lookup`] so stale ids are not retained.

use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

static ID_STRINGS: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Suffix counter for generated ids; shared by every kind prefix.
static NEXT_SUFFIX: AtomicU64 = AtomicU64::new(0);

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(Spur);

impl ElementId {
    pub fn intern(s: &str) -> Self {
        ElementId(ID_STRINGS.get_or_intern(s))
    }

    /// The id for `s` if anything has interned it, without interning.
    pub fn lookup(s: &str) -> Option<Self> {
        ID_STRINGS.get(s).map(ElementId)
    }

    /// Mint `<prefix>_<n>`. The counter is per process, so an id restored
    /// from storage can still clash; document code re-rolls on collision.
    pub fn with_prefix(prefix: &str) -> Self {
        let n = NEXT_SUFFIX.fetch_add(1, Ordering::Relaxed);
        Self::intern(&format!("{prefix}_{n}"))
    }

    pub fn as_str(&self) -> &str {
        ID_STRINGS.resolve(&self.0)
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ElementId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ElementId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ElementId::intern(&s))
    }
}
