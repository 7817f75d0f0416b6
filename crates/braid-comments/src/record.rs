use std::sync::Arc;

use braid_substrate::{StoredRecord, Substrate};
use braid_types::{ContentId, TypeTag};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::codec::{self, CommentInfo};
use crate::digest::PayloadDigest;
use crate::error::{CommentError, CommentResult};
use crate::identity::IdentityProvider;
use crate::replies::ReplyList;

/// Type tag under which comment records are stored.
pub const COMMENT_TYPE_TAG: &str = "braid/comment";

/// The tag for comment records, as a value.
pub fn comment_tag() -> TypeTag {
    TypeTag::new(COMMENT_TYPE_TAG)
}

/// Inputs for constructing a comment record.
#[derive(Clone, Debug)]
pub struct NewComment {
    /// Display identity of the author.
    pub owner: String,
    /// Comment body.
    pub text: String,
    /// Point in time of the write.
    pub date: DateTime<Utc>,
    /// Version of the parent record observed by the writer.
    pub parent_version: u64,
    /// True iff `parent` identifies a video rather than another comment.
    pub is_root_comment: bool,
    /// Identifier of the video or parent comment.
    pub parent: ContentId,
}

/// A comment stored as a versioned structured record.
///
/// The aggregate wraps live handles to its parent identifier, its reply
/// list, and the stored record itself. Records are never mutated in place:
/// after construction the only persisted state this type ever changes is the
/// reply list, and only by append. The comment tree is reconstructed on
/// demand through [`CommentRecord::read_from`] and
/// [`CommentRecord::get_reply`]; nothing here holds child back-pointers in
/// memory.
pub struct CommentRecord {
    substrate: Arc<dyn Substrate>,
    owner: String,
    text: String,
    date: DateTime<Utc>,
    parent_version: u64,
    is_root_comment: bool,
    parent: ContentId,
    replies: ReplyList,
    self_id: ContentId,
    version: u64,
}

impl CommentRecord {
    /// Construct and persist a new comment.
    ///
    /// Step order is load-bearing: the reply list is created and persisted
    /// first, then the payload referencing it is encoded, digested, and
    /// stored as a versioned record named by the digest. If the record write
    /// fails, the already-persisted list is left behind; orphan cleanup is
    /// the surrounding system's concern.
    ///
    /// Construction is not idempotent: `date` carries wall-clock time and
    /// the reply list identifier is freshly minted, so repeated calls with
    /// identical arguments produce distinct stored records.
    pub fn create(substrate: Arc<dyn Substrate>, new: NewComment) -> CommentResult<Self> {
        let replies = ReplyList::create(Arc::clone(&substrate))?;
        let info = CommentInfo {
            owner: new.owner,
            text: new.text,
            date: new.date,
            parent_version: new.parent_version,
            is_root_comment: new.is_root_comment,
            parent: new.parent,
            replies: *replies.id(),
        };
        let payload = codec::encode(&info)?;
        let name = PayloadDigest::COMMENT.digest(&payload);
        let head = substrate
            .write_record(&name, &comment_tag(), &payload)
            .map_err(CommentError::from_write)?;
        debug!(id = %head.id.short_hex(), version = head.version, "comment stored");
        Ok(Self {
            substrate,
            owner: info.owner,
            text: info.text,
            date: info.date,
            parent_version: info.parent_version,
            is_root_comment: info.is_root_comment,
            parent: info.parent,
            replies,
            self_id: head.id,
            version: head.version,
        })
    }

    /// Reconstruct a comment from its stored record.
    ///
    /// Cheap, side-effect free, and safe to call concurrently from
    /// independent readers. The returned aggregate holds fresh handles for
    /// `parent` and the reply list: identity is by content, not by the
    /// in-process objects some other holder may own.
    pub fn read_from(substrate: Arc<dyn Substrate>, id: &ContentId) -> CommentResult<Self> {
        let stored = substrate
            .read_record(id)
            .map_err(CommentError::from_read)?
            .ok_or(CommentError::NotFound(*id))?;
        Self::from_stored(substrate, *id, stored)
    }

    fn from_stored(
        substrate: Arc<dyn Substrate>,
        id: ContentId,
        stored: StoredRecord,
    ) -> CommentResult<Self> {
        if stored.tag != comment_tag() {
            return Err(CommentError::MalformedPayload(format!(
                "unexpected record tag: {}",
                stored.tag
            )));
        }
        let info = codec::decode(&stored.payload)?;
        let replies = ReplyList::resolve(Arc::clone(&substrate), info.replies);
        Ok(Self {
            substrate,
            owner: info.owner,
            text: info.text,
            date: info.date,
            parent_version: info.parent_version,
            is_root_comment: info.is_root_comment,
            parent: info.parent,
            replies,
            self_id: id,
            version: stored.version,
        })
    }

    /// Create a reply to this comment and append it to the reply list.
    ///
    /// The reply's owner comes from the injected identity capability; its
    /// `parent_version` snapshots this record's version as currently held,
    /// and its `parent` is this record's content identifier. If the append
    /// fails after the reply was stored, the reply is left orphaned and
    /// unreferenced; the error still propagates.
    pub fn add_reply(
        &self,
        identity: &dyn IdentityProvider,
        text: impl Into<String>,
    ) -> CommentResult<CommentRecord> {
        let owner = identity.display_name().ok_or(CommentError::NoUserName)?;
        let reply = Self::create(
            Arc::clone(&self.substrate),
            NewComment {
                owner,
                text: text.into(),
                date: Utc::now(),
                parent_version: self.version,
                is_root_comment: false,
                parent: self.self_id,
            },
        )?;
        self.replies.append(&reply.self_id)?;
        debug!(
            parent = %self.self_id.short_hex(),
            reply = %reply.self_id.short_hex(),
            "reply appended"
        );
        Ok(reply)
    }

    /// Current number of replies.
    ///
    /// A live read: other writers may append concurrently, so consecutive
    /// calls can return different values.
    pub fn num_replies(&self) -> CommentResult<u64> {
        self.replies.len()
    }

    /// Read back the reply at `index`.
    pub fn get_reply(&self, index: u64) -> CommentResult<CommentRecord> {
        let length = self.num_replies()?;
        if index >= length {
            return Err(CommentError::IndexOutOfRange { index, length });
        }
        let id = self.replies.at(index)?;
        Self::read_from(Arc::clone(&self.substrate), &id)
    }

    /// Release the owned `parent` and reply-list handles.
    ///
    /// Consuming `self` is the use-after-dispose guard: a disposed record
    /// cannot be operated on again. Both handles are released even if the
    /// first release fails; the first failure is the one reported.
    pub fn dispose(self) -> CommentResult<()> {
        let parent = self.substrate.release(&self.parent);
        let replies = self.substrate.release(self.replies.id());
        parent.and(replies).map_err(CommentError::from_read)
    }

    /// Display identity of the author.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Comment body.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Point in time of last write.
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Parent version snapshot taken at construction. Staleness against the
    /// parent's live version is the caller's to detect, by comparing with a
    /// fresh [`CommentRecord::read_from`] of the parent.
    pub fn parent_version(&self) -> u64 {
        self.parent_version
    }

    /// True iff the parent identifies a video rather than another comment.
    pub fn is_root_comment(&self) -> bool {
        self.is_root_comment
    }

    /// Identifier of the video or parent comment.
    pub fn parent(&self) -> &ContentId {
        &self.parent
    }

    /// Identifier of this comment's reply list.
    pub fn replies_id(&self) -> &ContentId {
        self.replies.id()
    }

    /// Identifier of the versioned record storing this comment. Lets a newly
    /// created reply reference its parent.
    pub fn self_id(&self) -> &ContentId {
        &self.self_id
    }

    /// Version of the stored record as observed by this handle.
    pub fn version(&self) -> u64 {
        self.version
    }
}

impl std::fmt::Debug for CommentRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommentRecord")
            .field("self_id", &self.self_id)
            .field("owner", &self.owner)
            .field("is_root_comment", &self.is_root_comment)
            .field("version", &self.version)
            .finish()
    }
}
