/// Named boolean filter with its predicate over a record.
///
/// Tables of these are declared once per entity kind and handed to the
/// pipeline, which looks facets up by the names active in the criteria.
pub struct Facet<R> {
    pub name: &'static str,
    pub matches: fn(&R) -> bool,
}

impl<R> Facet<R> {
    pub const fn new(name: &'static str, matches: fn(&R) -> bool) -> Self {
        Self { name, matches }
    }
}

impl<R> Clone for Facet<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Facet<R> {}
