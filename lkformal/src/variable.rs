//! Proposition identifiers used across the crate.
//!
//! Role
//! - Provide compact, copyable names for atomic propositions.
//! - The surface syntax restricts names to a single ASCII letter, so a
//!   `char` newtype is enough; ordering and hashing follow the letter.

/// Name of an atomic proposition.
///
/// Display
/// - Renders as the bare letter, e.g. `A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarName(char);

impl VarName {
    /// Create a new name from a single ASCII letter.
    ///
    /// The parser is the only producer of arbitrary input; everything else
    /// constructs names from literals, so the letter restriction is only
    /// asserted in debug builds.
    #[inline]
    pub fn new(letter: char) -> Self {
        debug_assert!(
            letter.is_ascii_alphabetic(),
            "proposition names are single ASCII letters (got {letter:?})"
        );
        Self(letter)
    }

    /// Get the underlying letter.
    #[inline]
    pub fn letter(&self) -> char {
        self.0
    }
}

impl From<char> for VarName {
    #[inline]
    fn from(letter: char) -> Self {
        Self::new(letter)
    }
}

impl std::fmt::Display for VarName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
