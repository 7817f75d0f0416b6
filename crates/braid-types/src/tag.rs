use std::fmt;

use serde::{Deserialize, Serialize};

/// Tag distinguishing families of versioned structured records.
///
/// A versioned record is identified by its name *and* its tag; two records
/// with the same name under different tags are distinct storage units. Tags
/// are application-defined strings (e.g. `"braid/comment"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeTag(String);

impl TypeTag {
    /// Create a tag from a string.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TypeTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_compare_by_content() {
        assert_eq!(TypeTag::new("braid/comment"), TypeTag::from("braid/comment"));
        assert_ne!(TypeTag::new("braid/comment"), TypeTag::new("braid/other"));
    }

    #[test]
    fn display_is_the_tag_string() {
        assert_eq!(format!("{}", TypeTag::new("braid/comment")), "braid/comment");
    }
}
