use std::fmt;

/// Domain-separated BLAKE3 digest over canonical payload bytes.
///
/// The hex digest names the versioned record a comment is stored under, so
/// identical content addresses the same record. The domain tag is prepended
/// to every computation, preventing cross-type collisions with other record
/// families sharing the substrate.
pub struct PayloadDigest {
    domain: &'static str,
}

impl PayloadDigest {
    /// Digest for comment records.
    pub const COMMENT: Self = Self {
        domain: "braid-comment-v1",
    };

    /// Create a digest with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Hex digest of a canonical payload.
    ///
    /// Deterministic across processes and implementations as long as the
    /// payload bytes are canonical; the codec guarantees that.
    pub fn digest(&self, payload: &[u8]) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(payload);
        hex::encode(hasher.finalize().as_bytes())
    }

    /// The domain tag used by this digest.
    pub fn domain(&self) -> &str {
        self.domain
    }
}

impl fmt::Debug for PayloadDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PayloadDigest")
            .field("domain", &self.domain)
            .finish()
    }
}
