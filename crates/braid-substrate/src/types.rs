use braid_types::{ContentId, TypeTag};

/// Result of writing a versioned structured record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordHead {
    /// The substrate's stable identifier for the record.
    pub id: ContentId,
    /// Version counter after this write. The first write stores version 0;
    /// every overwrite increments it.
    pub version: u64,
}

/// A versioned structured record as read back from the substrate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredRecord {
    /// The record's opaque payload bytes. The substrate imposes no schema.
    pub payload: Vec<u8>,
    /// The type tag the record was written under.
    pub tag: TypeTag,
    /// Version counter at read time.
    pub version: u64,
}
