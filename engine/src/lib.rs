/*!
Entity-agnostic faceted listing engine.

Given a snapshot of records, the current [`FilterCriteria`] and a facet table,
[`derive_view`] produces the filtered, sorted view a listing UI renders:

```text
records
  └─> text search (AND across fields)
        └─> numeric range (inclusive)
              └─> facets (OR across active facets)
                    └─> favorites-only
                          └─> stable sort
```

The pipeline is a total pure function; stores and presentation glue live in
`jobdeck-store`.
*/

pub mod criteria;
pub mod facet;
pub mod query;
pub mod record;
pub mod sort;

pub use criteria::FilterCriteria;
pub use criteria::NumericRange;
pub use facet::Facet;
pub use query::derive_view;
pub use record::Record;
pub use sort::SortMethod;
