/*!
Stateful side of the listing pipeline: the canonical record collection
([`RecordStore`]), the durable favorites set ([`FavoritesStore`]) and the
per-entity glue that recomputes the derived view ([`Listing`]).

One [`Listing`] is constructed per entity kind at application start and passed
by reference to consumers.
*/

pub mod favorites;
pub mod listing;
pub mod records;

pub use favorites::FavoritesStore;
pub use favorites::PersistenceError;
pub use favorites::default_favorites_path;
pub use listing::Listing;
pub use records::RecordStore;
