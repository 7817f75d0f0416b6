use braid_types::{ContentId, TypeTag};

use crate::error::SubstrateResult;
use crate::types::{RecordHead, StoredRecord};

/// The storage substrate braid builds on.
///
/// All implementations must satisfy these invariants:
/// - A record is identified by its (name, tag) pair; writing the same pair
///   again overwrites the payload whole and increments the version counter.
///   The returned identifier is stable across overwrites.
/// - Lists are append-only. Length equals the number of appends that have
///   returned successfully; a failed append must not be reflected.
/// - Identifiers are plain values: equal bytes name the same storage unit
///   regardless of which handle or process produced them.
/// - All failures are propagated, never silently ignored.
pub trait Substrate: Send + Sync {
    /// Create or overwrite the versioned record identified by `(name, tag)`.
    ///
    /// The first write stores version 0; each subsequent write of the same
    /// `(name, tag)` increments the version. Returns the record's stable
    /// identifier and the version just written.
    fn write_record(&self, name: &str, tag: &TypeTag, payload: &[u8])
        -> SubstrateResult<RecordHead>;

    /// Read a versioned record by its identifier.
    ///
    /// Returns `Ok(None)` if the identifier does not resolve.
    /// Returns `Err` on I/O failure.
    fn read_record(&self, id: &ContentId) -> SubstrateResult<Option<StoredRecord>>;

    /// Mint and persist a fresh, empty append-only list.
    ///
    /// Every call yields a distinct identifier, even for the same caller.
    fn create_list(&self) -> SubstrateResult<ContentId>;

    /// Append one identifier to the list.
    ///
    /// Append order under concurrent callers is decided by the backend; the
    /// only guarantee is that each successful append is reflected exactly
    /// once in subsequent lengths and indexed reads.
    fn list_append(&self, list: &ContentId, item: &ContentId) -> SubstrateResult<()>;

    /// Current length of the list.
    fn list_len(&self, list: &ContentId) -> SubstrateResult<u64>;

    /// Read the identifier stored at `index`.
    ///
    /// Fails with `IndexOutOfRange` for `index >= list_len()`, never by
    /// truncating or wrapping.
    fn list_at(&self, list: &ContentId, index: u64) -> SubstrateResult<ContentId>;

    /// End the caller's ownership of a local handle to the identified unit.
    ///
    /// Backends that hold per-handle resources (remote refcounts, caches)
    /// override this; failures must surface to the caller. The default does
    /// nothing, which is correct for backends whose identifiers are plain
    /// values.
    fn release(&self, id: &ContentId) -> SubstrateResult<()> {
        let _ = id;
        Ok(())
    }
}
