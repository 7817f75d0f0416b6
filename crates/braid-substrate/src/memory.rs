use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use braid_types::{ContentId, TypeTag};
use tracing::debug;

use crate::error::{SubstrateError, SubstrateResult};
use crate::traits::Substrate;
use crate::types::{RecordHead, StoredRecord};

/// Domain tag for deriving record identifiers from their (name, tag) pair.
const RECORD_DOMAIN: &str = "braid-record-v1";
/// Domain tag for minting list identifiers.
const LIST_DOMAIN: &str = "braid-list-v1";

/// In-memory, HashMap-based substrate.
///
/// Intended for tests and embedding. All units are held in memory behind
/// `RwLock`s. Record identifiers are derived from the (name, tag) pair, so
/// overwrites land on the same unit; list identifiers are minted from a
/// monotonic counter, so every [`Substrate::create_list`] call yields a
/// distinct list.
pub struct InMemorySubstrate {
    records: RwLock<HashMap<ContentId, RecordSlot>>,
    lists: RwLock<HashMap<ContentId, Vec<ContentId>>>,
    next_list: AtomicU64,
}

struct RecordSlot {
    tag: TypeTag,
    payload: Vec<u8>,
    version: u64,
}

impl InMemorySubstrate {
    /// Create a new empty substrate.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            lists: RwLock::new(HashMap::new()),
            next_list: AtomicU64::new(0),
        }
    }

    /// Number of records currently stored.
    pub fn record_count(&self) -> usize {
        self.records.read().expect("lock poisoned").len()
    }

    /// Number of lists currently stored.
    pub fn list_count(&self) -> usize {
        self.lists.read().expect("lock poisoned").len()
    }

    /// Remove all records and lists.
    pub fn clear(&self) {
        self.records.write().expect("lock poisoned").clear();
        self.lists.write().expect("lock poisoned").clear();
    }

    fn record_id(name: &str, tag: &TypeTag) -> ContentId {
        let mut hasher = blake3::Hasher::new();
        hasher.update(RECORD_DOMAIN.as_bytes());
        hasher.update(b":");
        hasher.update(tag.as_str().as_bytes());
        hasher.update(b"\n");
        hasher.update(name.as_bytes());
        ContentId::from_raw(*hasher.finalize().as_bytes())
    }

    fn mint_list_id(&self) -> ContentId {
        let seq = self.next_list.fetch_add(1, Ordering::Relaxed);
        let mut hasher = blake3::Hasher::new();
        hasher.update(LIST_DOMAIN.as_bytes());
        hasher.update(b":");
        hasher.update(&seq.to_be_bytes());
        ContentId::from_raw(*hasher.finalize().as_bytes())
    }
}

impl Default for InMemorySubstrate {
    fn default() -> Self {
        Self::new()
    }
}

impl Substrate for InMemorySubstrate {
    fn write_record(
        &self,
        name: &str,
        tag: &TypeTag,
        payload: &[u8],
    ) -> SubstrateResult<RecordHead> {
        let id = Self::record_id(name, tag);
        let mut records = self.records.write().expect("lock poisoned");
        let version = match records.entry(id) {
            Entry::Occupied(mut occupied) => {
                let slot = occupied.get_mut();
                slot.version += 1;
                slot.payload = payload.to_vec();
                slot.version
            }
            Entry::Vacant(vacant) => {
                vacant.insert(RecordSlot {
                    tag: tag.clone(),
                    payload: payload.to_vec(),
                    version: 0,
                });
                0
            }
        };
        debug!(id = %id.short_hex(), version, "record written");
        Ok(RecordHead { id, version })
    }

    fn read_record(&self, id: &ContentId) -> SubstrateResult<Option<StoredRecord>> {
        let records = self.records.read().expect("lock poisoned");
        Ok(records.get(id).map(|slot| StoredRecord {
            payload: slot.payload.clone(),
            tag: slot.tag.clone(),
            version: slot.version,
        }))
    }

    fn create_list(&self) -> SubstrateResult<ContentId> {
        let id = self.mint_list_id();
        let mut lists = self.lists.write().expect("lock poisoned");
        lists.insert(id, Vec::new());
        debug!(id = %id.short_hex(), "list created");
        Ok(id)
    }

    fn list_append(&self, list: &ContentId, item: &ContentId) -> SubstrateResult<()> {
        let mut lists = self.lists.write().expect("lock poisoned");
        let entries = lists.get_mut(list).ok_or(SubstrateError::NotFound(*list))?;
        entries.push(*item);
        debug!(list = %list.short_hex(), length = entries.len(), "list appended");
        Ok(())
    }

    fn list_len(&self, list: &ContentId) -> SubstrateResult<u64> {
        let lists = self.lists.read().expect("lock poisoned");
        let entries = lists.get(list).ok_or(SubstrateError::NotFound(*list))?;
        Ok(entries.len() as u64)
    }

    fn list_at(&self, list: &ContentId, index: u64) -> SubstrateResult<ContentId> {
        let lists = self.lists.read().expect("lock poisoned");
        let entries = lists.get(list).ok_or(SubstrateError::NotFound(*list))?;
        let length = entries.len() as u64;
        if index >= length {
            return Err(SubstrateError::IndexOutOfRange { index, length });
        }
        Ok(entries[index as usize])
    }
}

impl std::fmt::Debug for InMemorySubstrate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemorySubstrate")
            .field("record_count", &self.record_count())
            .field("list_count", &self.list_count())
            .finish()
    }
}
