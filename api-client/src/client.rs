use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::error::Result;
use percent_encoding::NON_ALPHANUMERIC;
use percent_encoding::utf8_percent_encode;
use reqwest::Response;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::time::Duration;
use tracing::debug;

/// Typed client for one remote collection.
///
/// The six endpoints have the same shape for every entity kind; `R` is the
/// record type the collection serves.
pub struct RestCollection<R> {
    http: reqwest::Client,
    base_url: String,
    collection: String,
    _record: PhantomData<R>,
}

/// Error body the server attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
struct ServerMessage {
    message: String,
}

impl<R: DeserializeOwned> RestCollection<R> {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate().map_err(ApiError::Validation)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            collection: config.collection.clone(),
            _record: PhantomData,
        })
    }

    /// `GET /{collection}`: the full collection, no pagination.
    pub async fn list(&self) -> Result<Vec<R>> {
        let url = self.url("");
        debug!(%url, "fetching collection");
        let response = self.http.get(url).send().await?;
        decode(response).await
    }

    /// `GET /{collection}/{id}`.
    pub async fn get(&self, id: &str) -> Result<R> {
        let url = self.url(&format!("/{}", encode_segment(id)));
        let response = self.http.get(url).send().await?;
        decode(response).await
    }

    /// `POST /{collection}`. The server generates id and creation time.
    pub async fn create<P: Serialize + ?Sized>(&self, payload: &P) -> Result<R> {
        let url = self.url("");
        debug!(%url, "creating record");
        let response = self.http.post(url).json(payload).send().await?;
        decode(response).await
    }

    /// `PUT /{collection}/edit/{id}` with a partial payload; returns the
    /// server's merged record.
    pub async fn update<P: Serialize + ?Sized>(&self, id: &str, payload: &P) -> Result<R> {
        let url = self.url(&format!("/edit/{}", encode_segment(id)));
        debug!(%url, "updating record");
        let response = self.http.put(url).json(payload).send().await?;
        decode(response).await
    }

    /// `DELETE /{collection}/{id}`. The confirmation body is discarded.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let url = self.url(&format!("/{}", encode_segment(id)));
        debug!(%url, "deleting record");
        let response = self.http.delete(url).send().await?;
        check_status(response).await.map(|_| ())
    }

    /// `GET /{collection}/user/{userId}`: records created by one user.
    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<R>> {
        let url = self.url(&format!("/user/{}", encode_segment(user_id)));
        let response = self.http.get(url).send().await?;
        decode(response).await
    }

    fn url(&self, suffix: &str) -> String {
        format!("{}/{}{suffix}", self.base_url, self.collection)
    }
}

fn encode_segment(raw: &str) -> String {
    utf8_percent_encode(raw, NON_ALPHANUMERIC).to_string()
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let response = check_status(response).await?;
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::Network(format!("invalid response body: {err}")))
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = server_message(response).await;
    Err(match status {
        StatusCode::BAD_REQUEST => ApiError::Validation(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Authorization(message),
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        _ => ApiError::Network(format!("server returned {status}: {message}")),
    })
}

async fn server_message(response: Response) -> String {
    let status = response.status();
    match response.json::<ServerMessage>().await {
        Ok(body) => body.message,
        Err(_) => format!("status {status}"),
    }
}
