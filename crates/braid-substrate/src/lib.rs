//! Storage substrate contract for braid.
//!
//! The substrate is the external storage layer braid builds on. It offers
//! exactly three primitives:
//!
//! - immutable, content-addressed identifiers ([`braid_types::ContentId`])
//! - versioned structured records, identified by a fixed name+tag, whose
//!   writes increment a version counter
//! - append-only ordered lists of content identifiers
//!
//! Everything else (consensus, persistence, sessions) lives behind the
//! [`Substrate`] trait and is out of scope here.
//!
//! # Backends
//!
//! - [`InMemorySubstrate`] — `HashMap`-based backend for tests and embedding
//!
//! # Design Rules
//!
//! 1. Records are overwritten whole; every overwrite increments the version.
//! 2. Lists only ever grow; length equals the number of successful appends.
//! 3. A missing record reads as `Ok(None)`; I/O failure is `Err`.
//! 4. All errors are propagated, never silently ignored.

pub mod error;
pub mod memory;
pub mod traits;
pub mod types;

pub use error::{SubstrateError, SubstrateResult};
pub use memory::InMemorySubstrate;
pub use traits::Substrate;
pub use types::{RecordHead, StoredRecord};
