//! Threaded comments over a content-addressed, versioned storage substrate.
//!
//! Each comment is a versioned structured record naming its parent (a video
//! or another comment) and owning an append-only list of replies. Comments
//! are never mutated in place, and the comment tree is never held in memory
//! as a graph: every record carries only its immediate-parent identifier and
//! its reply-list identifier, and the tree is reconstructed on demand.
//!
//! # Key Types
//!
//! - [`CommentRecord`] — The aggregate: construction, read-back, reply append
//! - [`CommentInfo`] — Logical payload, round-tripped through the wire codec
//! - [`ReplyList`] — Thin façade over the substrate's append-only list
//! - [`IdentityProvider`] — Injected display-name resolution capability
//! - [`PayloadDigest`] — Domain-separated digest naming each stored record
//!
//! # Design Rules
//!
//! 1. Reads validate foreign data defensively; the substrate has no schema.
//! 2. `parentVersion` is a snapshot taken at construction, never updated.
//! 3. The reply list is the only persisted state mutated after creation,
//!    and only by append.
//! 4. All errors propagate synchronously; nothing is retried or swallowed.

pub mod codec;
pub mod digest;
pub mod error;
pub mod identity;
pub mod record;
pub mod replies;

pub use codec::CommentInfo;
pub use digest::PayloadDigest;
pub use error::{CommentError, CommentResult};
pub use identity::{Anonymous, IdentityProvider, StaticIdentity};
pub use record::{comment_tag, CommentRecord, NewComment, COMMENT_TYPE_TAG};
pub use replies::ReplyList;
