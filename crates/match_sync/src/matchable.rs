//! Identity and content-equality contracts for syncable entities

/// An entity that can participate in a sync.
///
/// The match id is an opaque identity key: stable for the lifetime of the
/// entity and unique within a collection at any point in time. It drives all
/// matching; full value equality is never used to pair items.
pub trait Matchable {
    /// A unique ID to match on
    fn match_id(&self) -> &str;
}

/// Cross-type content equivalence.
///
/// `content_eq` returns true when there is no meaningful difference between
/// the two values ("zero difference" semantics). Implement `ContentEq<Rhs>`
/// on a working type for each source type it is synced against, plus
/// `ContentEq` (Self) when the type is diffed against itself.
pub trait ContentEq<Rhs: ?Sized = Self> {
    /// True if `self` and `other` carry the same content
    fn content_eq(&self, other: &Rhs) -> bool;
}
