use std::sync::Arc;

use braid_substrate::Substrate;
use braid_types::ContentId;

use crate::error::{CommentError, CommentResult};

/// Thin façade over the substrate's append-only ordered-identifier list.
///
/// No buffering, no caching: every call is a substrate round trip, so length
/// and contents always reflect the substrate's current state. The list only
/// ever grows; append is the sole mutation.
pub struct ReplyList {
    substrate: Arc<dyn Substrate>,
    id: ContentId,
}

impl ReplyList {
    /// Mint and persist a fresh, empty list.
    pub fn create(substrate: Arc<dyn Substrate>) -> CommentResult<Self> {
        let id = substrate.create_list().map_err(CommentError::from_write)?;
        Ok(Self { substrate, id })
    }

    /// Wrap an existing list identifier.
    ///
    /// No I/O is performed; the list is resolved on first access.
    pub fn resolve(substrate: Arc<dyn Substrate>, id: ContentId) -> Self {
        Self { substrate, id }
    }

    /// The list's identifier.
    pub fn id(&self) -> &ContentId {
        &self.id
    }

    /// Append one identifier to the end of the list.
    pub fn append(&self, item: &ContentId) -> CommentResult<()> {
        self.substrate
            .list_append(&self.id, item)
            .map_err(CommentError::from_write)
    }

    /// Current length: the number of successful appends so far.
    pub fn len(&self) -> CommentResult<u64> {
        self.substrate
            .list_len(&self.id)
            .map_err(CommentError::from_read)
    }

    /// Returns `true` if the list has no entries.
    pub fn is_empty(&self) -> CommentResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Read the identifier stored at `index`.
    ///
    /// Fails with `IndexOutOfRange` at or beyond the current length, never
    /// by truncating or wrapping.
    pub fn at(&self, index: u64) -> CommentResult<ContentId> {
        self.substrate
            .list_at(&self.id, index)
            .map_err(CommentError::from_read)
    }
}

impl std::fmt::Debug for ReplyList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplyList").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use braid_substrate::InMemorySubstrate;

    fn substrate() -> Arc<InMemorySubstrate> {
        Arc::new(InMemorySubstrate::new())
    }

    #[test]
    fn create_starts_empty() {
        let list = ReplyList::create(substrate()).unwrap();
        assert_eq!(list.len().unwrap(), 0);
        assert!(list.is_empty().unwrap());
    }

    #[test]
    fn append_then_read_back() {
        let list = ReplyList::create(substrate()).unwrap();
        let item = ContentId::from_raw([3u8; 32]);
        list.append(&item).unwrap();

        assert_eq!(list.len().unwrap(), 1);
        assert!(!list.is_empty().unwrap());
        assert_eq!(list.at(0).unwrap(), item);
    }

    #[test]
    fn at_past_end_is_out_of_range() {
        let list = ReplyList::create(substrate()).unwrap();
        match list.at(0) {
            Err(CommentError::IndexOutOfRange { index: 0, length: 0 }) => {}
            other => panic!("expected IndexOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn resolve_sees_the_same_list() {
        let sub = substrate();
        let list = ReplyList::create(Arc::clone(&sub) as Arc<dyn Substrate>).unwrap();
        let item = ContentId::from_raw([4u8; 32]);
        list.append(&item).unwrap();

        // A fresh handle over the same identifier reads the same entries.
        let resolved = ReplyList::resolve(sub, *list.id());
        assert_eq!(resolved.len().unwrap(), 1);
        assert_eq!(resolved.at(0).unwrap(), item);
    }

    #[test]
    fn resolve_of_unknown_id_fails_on_access() {
        let resolved = ReplyList::resolve(substrate(), ContentId::from_raw([9u8; 32]));
        assert!(matches!(resolved.len(), Err(CommentError::NotFound(_))));
    }
}
