//! Hosted backend-as-a-service adapter speaking the PostgREST dialect.

use async_trait::async_trait;
use prep_core::model::{
    Category, CategoryId, ProgressDraft, ProgressId, Question, QuestionId, UserId, UserProgress,
};
use reqwest::header::{HeaderMap, HeaderValue, InvalidHeaderValue};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::repository::{
    CategoryRepository, ProgressRepository, QuestionRepository, Storage, StorageError,
    keep_valid_rows,
};

mod rows;

use rows::{CategoryRow, ProgressPayload, ProgressRow, QuestionRow};

const REST_PREFIX: &str = "rest/v1";
const RETURN_REPRESENTATION: &str = "return=representation";
const MERGE_DUPLICATES: &str = "resolution=merge-duplicates,return=representation";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RemoteInitError {
    #[error("invalid base url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("api key is required")]
    MissingApiKey,
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Connection settings for the hosted store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteConfig {
    pub base_url: String,
    pub api_key: String,
    /// Signed-in user's token. Row-level filtering keys off it; without one the
    /// api key is sent as the bearer.
    pub access_token: Option<String>,
}

#[derive(Clone)]
pub struct RemoteRepository {
    client: Client,
    base_url: Url,
}

impl RemoteRepository {
    /// Build a client with the auth headers baked in.
    ///
    /// # Errors
    ///
    /// Returns `RemoteInitError` for an unparsable url, an empty api key or a
    /// header value that cannot be encoded.
    pub fn new(config: &RemoteConfig) -> Result<Self, RemoteInitError> {
        if config.api_key.trim().is_empty() {
            return Err(RemoteInitError::MissingApiKey);
        }
        let base_url = normalize_base_url(&config.base_url)?;

        let bearer = config
            .access_token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
            .unwrap_or(&config.api_key);
        let mut headers = HeaderMap::new();
        headers.insert("apikey", HeaderValue::from_str(&config.api_key)?);
        let mut auth = HeaderValue::from_str(&format!("Bearer {bearer}"))?;
        auth.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth);

        let client = Client::builder().default_headers(headers).build()?;
        Ok(Self { client, base_url })
    }

    fn table_url(&self, table: &str, query: &[(&str, String)]) -> Url {
        table_url(&self.base_url, table, query)
    }

    async fn fetch_rows<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>, StorageError> {
        tracing::debug!(%url, "remote select");
        let response = self.client.get(url).send().await.map_err(connection)?;
        read_rows(response).await
    }

    async fn write_rows<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Vec<T>, StorageError> {
        let response = request.send().await.map_err(connection)?;
        read_rows(response).await
    }
}

/// Ensure the base url ends with a slash so joins keep its path.
fn normalize_base_url(raw: &str) -> Result<Url, url::ParseError> {
    let trimmed = raw.trim();
    if trimmed.ends_with('/') {
        Url::parse(trimmed)
    } else {
        Url::parse(&format!("{trimmed}/"))
    }
}

fn table_url(base: &Url, table: &str, query: &[(&str, String)]) -> Url {
    let mut url = base.clone();
    url.set_path(&format!("{}{REST_PREFIX}/{table}", base.path()));
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("select", "*");
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }
    url
}

fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{value}")
}

fn connection(e: reqwest::Error) -> StorageError {
    StorageError::Connection(e.to_string())
}

fn status_error(status: StatusCode) -> StorageError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StorageError::Unauthorized,
        StatusCode::NOT_FOUND => StorageError::NotFound,
        StatusCode::CONFLICT => StorageError::Conflict,
        other => StorageError::Connection(format!("unexpected status {other}")),
    }
}

async fn read_rows<T: DeserializeOwned>(response: Response) -> Result<Vec<T>, StorageError> {
    let status = response.status();
    if !status.is_success() {
        tracing::warn!(%status, "remote request failed");
        return Err(status_error(status));
    }
    response
        .json::<Vec<T>>()
        .await
        .map_err(|e| StorageError::Serialization(e.to_string()))
}

fn single<T>(mut rows: Vec<T>) -> Result<T, StorageError> {
    match rows.len() {
        0 => Err(StorageError::NotFound),
        1 => rows.pop().ok_or(StorageError::NotFound),
        _ => Err(StorageError::Conflict),
    }
}

fn at_most_one<T>(mut rows: Vec<T>) -> Result<Option<T>, StorageError> {
    match rows.len() {
        0 => Ok(None),
        1 => Ok(rows.pop()),
        _ => Err(StorageError::Conflict),
    }
}

#[async_trait]
impl CategoryRepository for RemoteRepository {
    async fn list_categories(&self) -> Result<Vec<Category>, StorageError> {
        let url = self.table_url("categories", &[("order", "name.asc".into())]);
        let rows: Vec<CategoryRow> = self.fetch_rows(url).await?;
        Ok(keep_valid_rows(
            "category",
            rows.into_iter().map(CategoryRow::into_category),
        ))
    }
}

#[async_trait]
impl QuestionRepository for RemoteRepository {
    async fn list_questions(
        &self,
        category: Option<CategoryId>,
    ) -> Result<Vec<Question>, StorageError> {
        let mut query = vec![("order", "created_at.desc".to_owned())];
        if let Some(id) = category {
            query.push(("category_id", eq(id)));
        }
        let url = self.table_url("questions", &query);
        let rows: Vec<QuestionRow> = self.fetch_rows(url).await?;
        Ok(keep_valid_rows(
            "question",
            rows.into_iter().map(QuestionRow::into_question),
        ))
    }

    async fn get_question(&self, id: QuestionId) -> Result<Question, StorageError> {
        let url = self.table_url("questions", &[("id", eq(id))]);
        let rows: Vec<QuestionRow> = self.fetch_rows(url).await?;
        single(rows)?.into_question()
    }
}

#[async_trait]
impl ProgressRepository for RemoteRepository {
    async fn find_progress(
        &self,
        user_id: UserId,
        question_id: QuestionId,
    ) -> Result<Option<UserProgress>, StorageError> {
        let url = self.table_url(
            "user_progress",
            &[("question_id", eq(question_id)), ("user_id", eq(user_id))],
        );
        let rows: Vec<ProgressRow> = self.fetch_rows(url).await?;
        at_most_one(rows)?
            .map(ProgressRow::into_progress)
            .transpose()
    }

    async fn insert_progress(&self, draft: &ProgressDraft) -> Result<UserProgress, StorageError> {
        let url = self.table_url("user_progress", &[]);
        tracing::debug!(question_id = %draft.question_id(), "remote insert progress");
        let request = self
            .client
            .post(url)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&ProgressPayload::from(draft));
        let rows: Vec<ProgressRow> = self.write_rows(request).await?;
        single(rows)?.into_progress()
    }

    async fn update_progress(
        &self,
        id: ProgressId,
        draft: &ProgressDraft,
    ) -> Result<UserProgress, StorageError> {
        let url = self.table_url("user_progress", &[("id", eq(id))]);
        tracing::debug!(progress_id = %id, "remote update progress");
        let request = self
            .client
            .patch(url)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&ProgressPayload::from(draft));
        let rows: Vec<ProgressRow> = self.write_rows(request).await?;
        single(rows)?.into_progress()
    }

    async fn upsert_progress(&self, draft: &ProgressDraft) -> Result<UserProgress, StorageError> {
        let url = self.table_url(
            "user_progress",
            &[("on_conflict", "user_id,question_id".into())],
        );
        tracing::debug!(question_id = %draft.question_id(), "remote upsert progress");
        let request = self
            .client
            .post(url)
            .header("Prefer", MERGE_DUPLICATES)
            .json(&ProgressPayload::from(draft));
        let rows: Vec<ProgressRow> = self.write_rows(request).await?;
        single(rows)?.into_progress()
    }
}

impl Storage {
    /// Build a `Storage` backed by the hosted REST store.
    ///
    /// # Errors
    ///
    /// Returns `RemoteInitError` if the client cannot be configured.
    pub fn remote(config: &RemoteConfig) -> Result<Self, RemoteInitError> {
        let repo = RemoteRepository::new(config)?;
        Ok(Self::from_repository(repo))
    }
}
