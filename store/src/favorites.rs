use std::cell::Cell;
use std::cell::RefCell;
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Favorites persistence failure. Confined to this module: reads degrade to
/// an empty set and writes are logged and dropped, so callers never see it.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Set of favorited record ids for one entity kind, mirrored to a JSON file
/// after every mutation.
///
/// The set is independent of the record collection: an id whose record no
/// longer exists is ignored by the pipeline, not purged here.
pub struct FavoritesStore {
    path: PathBuf,
    ids: RefCell<HashSet<String>>,
    version: Cell<u64>,
}

impl FavoritesStore {
    /// Loads the set persisted at `path`. A missing file yields an empty set;
    /// a corrupt one is removed so the next save starts clean.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let ids = if path.exists() {
            match read_ids(&path) {
                Ok(ids) => ids.into_iter().collect(),
                Err(err) => {
                    warn!(
                        "favorites at {path:?} are unreadable ({err}); starting with an empty set"
                    );
                    if let Err(remove_err) = fs::remove_file(&path) {
                        warn!("failed to remove corrupt favorites file {path:?}: {remove_err}");
                    }
                    HashSet::new()
                }
            }
        } else {
            HashSet::new()
        };
        Self {
            path,
            ids: RefCell::new(ids),
            version: Cell::new(0),
        }
    }

    /// Loads the favorites for an entity kind from the default per-user path.
    pub fn for_kind(kind: &str) -> Self {
        Self::load(default_favorites_path(kind))
    }

    /// Flips membership for `id`, persists, and returns the new membership.
    pub fn toggle(&self, id: &str) -> bool {
        let now_favorite = {
            let mut ids = self.ids.borrow_mut();
            if ids.remove(id) {
                false
            } else {
                ids.insert(id.to_string());
                true
            }
        };
        self.bump();
        self.persist();
        now_favorite
    }

    /// Drops `id` if present, persisting on change. Record deletion calls
    /// this so a deleted record cannot linger as a favorite.
    pub fn remove(&self, id: &str) {
        let removed = self.ids.borrow_mut().remove(id);
        if removed {
            self.bump();
            self.persist();
        }
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.ids.borrow().contains(id)
    }

    pub fn snapshot(&self) -> HashSet<String> {
        self.ids.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.ids.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.borrow().is_empty()
    }

    /// Bumped on every mutation; lets bindings detect change cheaply.
    pub fn version(&self) -> u64 {
        self.version.get()
    }

    fn bump(&self) {
        self.version.set(self.version.get() + 1);
    }

    fn persist(&self) {
        if let Err(err) = self.write_ids() {
            warn!("failed to persist favorites to {:?}: {err}", self.path);
        }
    }

    fn write_ids(&self) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut ids: Vec<String> = self.ids.borrow().iter().cloned().collect();
        ids.sort();
        let data = serde_json::to_vec(&ids)?;
        let tmp_path = self.path.with_extension("tmp");
        {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(&data)?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

fn read_ids(path: &Path) -> Result<Vec<String>, PersistenceError> {
    let data = fs::read(path)?;
    Ok(serde_json::from_slice(&data)?)
}

/// Durable path for an entity kind's favorites under the user data
/// directory.
pub fn default_favorites_path(kind: &str) -> PathBuf {
    let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("jobdeck").join(format!("favorites_{kind}.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_as_an_empty_set() {
        let dir = tempdir().unwrap();
        let store = FavoritesStore::load(dir.path().join("favorites_jobs.json"));
        assert!(store.is_empty());
    }

    #[test]
    fn corrupt_file_loads_as_an_empty_set_and_is_removed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("favorites_jobs.json");
        fs::write(&path, "{not json").unwrap();

        let store = FavoritesStore::load(&path);
        assert!(store.is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn toggle_twice_restores_the_prior_state() {
        let dir = tempdir().unwrap();
        let store = FavoritesStore::load(dir.path().join("favorites_jobs.json"));

        assert!(store.toggle("job-1"));
        assert!(store.is_favorite("job-1"));
        assert!(!store.toggle("job-1"));
        assert!(store.is_empty());
    }

    #[test]
    fn persisted_set_round_trips_through_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("favorites_jobs.json");

        let store = FavoritesStore::load(&path);
        store.toggle("job-1");
        store.toggle("job-2");

        let reloaded = FavoritesStore::load(&path);
        assert_eq!(reloaded.snapshot(), store.snapshot());
    }

    #[test]
    fn file_holds_a_plain_json_id_array() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("favorites_jobs.json");

        let store = FavoritesStore::load(&path);
        store.toggle("b");
        store.toggle("a");

        let ids: Vec<String> = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn remove_persists_and_bumps_the_version() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("favorites_jobs.json");

        let store = FavoritesStore::load(&path);
        store.toggle("job-1");
        let before = store.version();
        store.remove("job-1");
        assert!(store.version() > before);
        store.remove("job-1");

        let reloaded = FavoritesStore::load(&path);
        assert!(reloaded.is_empty());
    }
}
