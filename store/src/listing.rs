use crate::favorites::FavoritesStore;
use crate::records::RecordStore;
use jobdeck_api_client::ApiError;
use jobdeck_engine::Facet;
use jobdeck_engine::FilterCriteria;
use jobdeck_engine::Record;
use jobdeck_engine::derive_view;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::Cell;
use std::cell::RefCell;
use tracing::debug;

/// One listing pipeline: a record store, a favorites set, a facet table and
/// the active filter criteria, with the derived view cached between changes.
///
/// Construct one per entity kind at application start and pass it by
/// reference; there is no global instance.
pub struct Listing<R: Record + 'static> {
    store: RecordStore<R>,
    favorites: FavoritesStore,
    facets: &'static [Facet<R>],
    criteria: RefCell<FilterCriteria>,
    criteria_version: Cell<u64>,
    cache: RefCell<Option<ViewCache<R>>>,
}

struct ViewCache<R> {
    view: Vec<R>,
    store_version: u64,
    favorites_version: u64,
    criteria_version: u64,
}

impl<R: Record + DeserializeOwned> Listing<R> {
    pub fn new(
        store: RecordStore<R>,
        favorites: FavoritesStore,
        facets: &'static [Facet<R>],
    ) -> Self {
        Self {
            store,
            favorites,
            facets,
            criteria: RefCell::new(FilterCriteria::default()),
            criteria_version: Cell::new(0),
            cache: RefCell::new(None),
        }
    }

    /// The filtered, sorted records for the current criteria. Recomputed only
    /// when the collection, the criteria, or (while favorites-only is active)
    /// the favorites set changed since the cached computation.
    pub fn view(&self) -> Vec<R> {
        if let Some(cache) = self.cache.borrow().as_ref() {
            if !self.is_stale(cache) {
                return cache.view.clone();
            }
        }
        let criteria = self.criteria.borrow().clone();
        let records = self.store.records();
        let favorites = self.favorites.snapshot();
        let view = derive_view(&records, &criteria, self.facets, &favorites);
        debug!(visible = view.len(), "recomputed listing view");
        *self.cache.borrow_mut() = Some(ViewCache {
            view: view.clone(),
            store_version: self.store.version(),
            favorites_version: self.favorites.version(),
            criteria_version: self.criteria_version.get(),
        });
        view
    }

    /// Replaces the criteria wholesale; the next `view()` recomputes.
    pub fn set_criteria(&self, criteria: FilterCriteria) {
        *self.criteria.borrow_mut() = criteria;
        self.criteria_version.set(self.criteria_version.get() + 1);
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.criteria.borrow().clone()
    }

    /// Resets search, facets, range, favorites-only and sort to defaults.
    pub fn clear_filters(&self) {
        self.set_criteria(FilterCriteria::default());
    }

    pub async fn refresh(&self) -> Result<(), ApiError> {
        self.store.refresh().await
    }

    pub async fn create<P: Serialize + ?Sized>(&self, payload: &P) -> Result<R, ApiError> {
        self.store.create(payload).await
    }

    pub async fn update<P: Serialize + ?Sized>(&self, id: &str, payload: &P) -> Result<R, ApiError> {
        self.store.update(id, payload).await
    }

    /// Deletes the record and drops its id from the favorites set, so a
    /// deleted record cannot come back as a favorite.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.store.delete(id).await?;
        self.favorites.remove(id);
        Ok(())
    }

    pub async fn fetch_one(&self, id: &str) -> Result<R, ApiError> {
        self.store.fetch_one(id).await
    }

    pub async fn fetch_for_user(&self, user_id: &str) -> Result<Vec<R>, ApiError> {
        self.store.fetch_for_user(user_id).await
    }

    pub fn toggle_favorite(&self, id: &str) -> bool {
        self.favorites.toggle(id)
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.is_favorite(id)
    }

    pub fn records(&self) -> Vec<R> {
        self.store.records()
    }

    pub fn store(&self) -> &RecordStore<R> {
        &self.store
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    fn is_stale(&self, cache: &ViewCache<R>) -> bool {
        if cache.store_version != self.store.version() {
            return true;
        }
        if cache.criteria_version != self.criteria_version.get() {
            return true;
        }
        self.criteria.borrow().favorites_only
            && cache.favorites_version != self.favorites.version()
    }
}
