use jobdeck_api_client::ApiError;
use jobdeck_api_client::RestCollection;
use jobdeck_engine::Record;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use tracing::debug;

/// Canonical in-memory copy of one remote collection.
///
/// Single-threaded: methods take `&self` behind interior mutability so calls
/// may overlap across await points; no borrow is held across a suspension,
/// so the collection is never observed half-updated.
pub struct RecordStore<R> {
    api: RestCollection<R>,
    state: RefCell<State<R>>,
}

struct State<R> {
    records: Vec<R>,
    /// Monotonic stamp for in-flight refreshes; a response applies only if no
    /// newer refresh started while it was in flight.
    refresh_token: u64,
    version: u64,
}

impl<R: Record + DeserializeOwned> RecordStore<R> {
    pub fn new(api: RestCollection<R>) -> Self {
        Self {
            api,
            state: RefCell::new(State {
                records: Vec::new(),
                refresh_token: 0,
                version: 0,
            }),
        }
    }

    /// Replaces the canonical collection with the server's copy. On failure
    /// the previous collection stays untouched; a refresh superseded by a
    /// newer one discards its response.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let token = self.begin_refresh();
        let records = self.api.list().await?;
        if !self.apply_refresh(token, records) {
            debug!(token, "discarding superseded refresh response");
        }
        Ok(())
    }

    /// Creates a record and prepends the server's copy. The server owns
    /// generated fields; nothing is synthesized locally.
    pub async fn create<P: Serialize + ?Sized>(&self, payload: &P) -> Result<R, ApiError> {
        let created = self.api.create(payload).await?;
        let mut state = self.state.borrow_mut();
        state.records.insert(0, created.clone());
        state.version += 1;
        Ok(created)
    }

    /// Updates a record and replaces the stored copy with the server's
    /// response. Nothing changes locally before the server confirms.
    pub async fn update<P: Serialize + ?Sized>(&self, id: &str, payload: &P) -> Result<R, ApiError> {
        let updated = self.api.update(id, payload).await?;
        let mut state = self.state.borrow_mut();
        if let Some(slot) = state.records.iter_mut().find(|record| record.id() == id) {
            *slot = updated.clone();
        }
        state.version += 1;
        Ok(updated)
    }

    /// Deletes a record and removes it from the canonical collection.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.api.delete(id).await?;
        let mut state = self.state.borrow_mut();
        state.records.retain(|record| record.id() != id);
        state.version += 1;
        Ok(())
    }

    /// Fetches a single record without touching the canonical collection.
    pub async fn fetch_one(&self, id: &str) -> Result<R, ApiError> {
        self.api.get(id).await
    }

    /// Fetches the records created by one user; read-only, the canonical
    /// collection is untouched.
    pub async fn fetch_for_user(&self, user_id: &str) -> Result<Vec<R>, ApiError> {
        self.api.list_by_user(user_id).await
    }

    pub fn records(&self) -> Vec<R> {
        self.state.borrow().records.clone()
    }

    pub fn len(&self) -> usize {
        self.state.borrow().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().records.is_empty()
    }

    /// Bumped on every canonical-collection change; lets bindings detect
    /// change cheaply.
    pub fn version(&self) -> u64 {
        self.state.borrow().version
    }

    fn begin_refresh(&self) -> u64 {
        let mut state = self.state.borrow_mut();
        state.refresh_token += 1;
        state.refresh_token
    }

    fn apply_refresh(&self, token: u64, records: Vec<R>) -> bool {
        let mut state = self.state.borrow_mut();
        if state.refresh_token != token {
            return false;
        }
        state.records = records;
        state.version += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobdeck_api_client::ClientConfig;
    use jobdeck_records::Job;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::Mock;
    use wiremock::MockServer;
    use wiremock::ResponseTemplate;
    use wiremock::matchers::method;
    use wiremock::matchers::path;

    fn job_body(id: &str, title: &str, salary: i64) -> serde_json::Value {
        json!({
            "_id": id,
            "title": title,
            "location": "Remote",
            "salary": salary,
            "jobType": ["Full Time"],
            "createdAt": "2024-04-01T00:00:00Z"
        })
    }

    fn store_for(server: &MockServer) -> RecordStore<Job> {
        let api = RestCollection::new(&ClientConfig::new(server.uri(), "jobs")).unwrap();
        RecordStore::new(api)
    }

    fn offline_store() -> RecordStore<Job> {
        let api =
            RestCollection::new(&ClientConfig::new("http://127.0.0.1:9", "jobs")).unwrap();
        RecordStore::new(api)
    }

    fn job(id: &str, salary: i64) -> Job {
        serde_json::from_value(job_body(id, "Engineer", salary)).unwrap()
    }

    fn ids(records: &[Job]) -> Vec<&str> {
        records.iter().map(|record| record.id.as_str()).collect()
    }

    #[tokio::test]
    async fn refresh_replaces_the_collection_wholesale() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jobs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                job_body("j1", "Backend Engineer", 90_000),
                job_body("j2", "Frontend Engineer", 80_000)
            ])))
            .mount(&server)
            .await;

        let store = store_for(&server);
        store.refresh().await.unwrap();
        assert_eq!(ids(&store.records()), ["j1", "j2"]);
        assert_eq!(store.version(), 1);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_the_last_known_collection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jobs"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([job_body("j1", "Engineer", 90_000)])),
            )
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/jobs"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let store = store_for(&server);
        store.refresh().await.unwrap();
        let err = store.refresh().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
        assert_eq!(ids(&store.records()), ["j1"]);
    }

    #[test]
    fn superseded_refresh_response_is_discarded() {
        let store = offline_store();
        let stale = store.begin_refresh();
        let current = store.begin_refresh();

        assert!(!store.apply_refresh(stale, vec![job("old", 1)]));
        assert!(store.records().is_empty());

        assert!(store.apply_refresh(current, vec![job("new", 2)]));
        assert_eq!(ids(&store.records()), ["new"]);
    }

    #[tokio::test]
    async fn create_prepends_the_server_record() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jobs"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([job_body("j1", "Engineer", 90_000)])),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/jobs"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(job_body("j2", "Designer", 70_000)),
            )
            .mount(&server)
            .await;

        let store = store_for(&server);
        store.refresh().await.unwrap();
        let created = store
            .create(&json!({"title": "Designer", "salary": 70_000}))
            .await
            .unwrap();
        assert_eq!(created.id, "j2");
        assert_eq!(ids(&store.records()), ["j2", "j1"]);
    }

    #[tokio::test]
    async fn failed_create_leaves_the_collection_untouched() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/jobs"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"message": "Title is required"})),
            )
            .mount(&server)
            .await;

        let store = store_for(&server);
        let before = store.version();
        let err = store.create(&json!({})).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(store.is_empty());
        assert_eq!(store.version(), before);
    }

    #[tokio::test]
    async fn update_replaces_the_matching_record_in_place() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jobs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                job_body("j1", "Engineer", 90_000),
                job_body("j2", "Designer", 70_000)
            ])))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/jobs/edit/j2"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(job_body("j2", "Senior Designer", 95_000)),
            )
            .mount(&server)
            .await;

        let store = store_for(&server);
        store.refresh().await.unwrap();
        store
            .update("j2", &json!({"title": "Senior Designer", "salary": 95_000}))
            .await
            .unwrap();
        let records = store.records();
        assert_eq!(ids(&records), ["j1", "j2"]);
        assert_eq!(records[1].title, "Senior Designer");
        assert_eq!(records[1].salary, 95_000);
    }

    #[tokio::test]
    async fn delete_removes_the_record_from_the_collection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jobs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                job_body("j1", "Engineer", 90_000),
                job_body("j2", "Designer", 70_000)
            ])))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/jobs/j1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Job deleted"})))
            .mount(&server)
            .await;

        let store = store_for(&server);
        store.refresh().await.unwrap();
        store.delete("j1").await.unwrap();
        assert_eq!(ids(&store.records()), ["j2"]);
    }
}
