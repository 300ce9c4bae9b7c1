use crate::sort::SortMethod;
use std::cmp::Ordering;
use time::OffsetDateTime;

/// Shape the listing pipeline needs from an entity. Everything else about a
/// record stays opaque to the engine.
pub trait Record: Clone {
    /// Stable unique identifier, assigned by the server.
    fn id(&self) -> &str;

    fn created_at(&self) -> OffsetDateTime;

    /// Text field addressed by a `FilterCriteria::search` entry. `None` means
    /// the record has no such field, which fails that search entry.
    fn search_field(&self, name: &str) -> Option<&str>;

    /// The entity's ranged numeric field, if it has one. Records returning
    /// `None` are dropped while a range filter is active.
    fn range_value(&self) -> Option<i64>;

    /// Comparator for `method`, or `None` when the method is not meaningful
    /// for this entity. A miss keeps the incoming order.
    fn compare(method: SortMethod, a: &Self, b: &Self) -> Option<Ordering>;
}
