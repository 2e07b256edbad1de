use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

use super::documents::{document_id, document_to_json, encode_document, field_paths};
use crate::models::domain::{Property, SearchRequest, SiteSettings};
use crate::models::requests::{PropertyInput, UpdateRequestBody, UpdateSettingsBody};

/// Maximum page size accepted by the Firestore list endpoint.
const PAGE_SIZE: u32 = 300;

/// Errors that can occur when talking to Firestore
#[derive(Debug, Error)]
pub enum FirestoreError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Firestore REST client
///
/// Handles all persistence for the service:
/// - The property catalog (list, single lookup, highlighted query, CRUD)
/// - Search requests filed by the wizard and the lead form
/// - The mutable site settings blob
pub struct FirestoreClient {
    base_url: String,
    project_id: String,
    api_key: String,
    client: Client,
    collections: FirestoreCollections,
}

/// Collection names, plus the document id of the settings blob
#[derive(Debug, Clone)]
pub struct FirestoreCollections {
    pub properties: String,
    pub search_requests: String,
    pub settings: String,
    pub settings_doc: String,
}

impl FirestoreClient {
    /// Create a new Firestore client
    pub fn new(
        base_url: String,
        project_id: String,
        api_key: String,
        timeout_secs: u64,
        collections: FirestoreCollections,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            project_id,
            api_key,
            client,
            collections,
        }
    }

    fn documents_root(&self) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents",
            self.base_url.trim_end_matches('/'),
            self.project_id
        )
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}", self.documents_root(), collection)
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!(
            "{}/{}/{}",
            self.documents_root(),
            collection,
            urlencoding::encode(id)
        )
    }

    fn key_param(&self) -> String {
        format!("key={}", urlencoding::encode(&self.api_key))
    }

    /// Fetch the full property catalog, following page tokens until the
    /// listing is exhausted. Catalog order is the store's listing order.
    pub async fn list_properties(&self) -> Result<Vec<Property>, FirestoreError> {
        let documents = self
            .list_collection(&self.collections.properties, None)
            .await?;
        let properties: Vec<Property> = decode_documents(&documents);

        tracing::debug!("Fetched {} properties", properties.len());

        Ok(properties)
    }

    /// Fetch a single property. A missing document is `Ok(None)`.
    pub async fn get_property(&self, id: &str) -> Result<Option<Property>, FirestoreError> {
        let url = format!(
            "{}?{}",
            self.document_url(&self.collections.properties, id),
            self.key_param()
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(error_for_status(
                status,
                &format!("Failed to fetch property {}", id),
            ));
        }

        let document: Value = response.json().await?;
        let record = document_to_json(&document)
            .ok_or_else(|| FirestoreError::InvalidResponse("Not a document".into()))?;

        let property = serde_json::from_value(record).map_err(|e| {
            FirestoreError::InvalidResponse(format!("Failed to parse property: {}", e))
        })?;

        Ok(Some(property))
    }

    /// Properties flagged for the landing page.
    pub async fn list_highlighted_properties(&self) -> Result<Vec<Property>, FirestoreError> {
        let documents = self
            .run_equality_query(
                &self.collections.properties,
                "highlighted",
                json!({ "booleanValue": true }),
            )
            .await?;

        Ok(decode_documents(&documents))
    }

    pub async fn create_property(&self, input: &PropertyInput) -> Result<String, FirestoreError> {
        let mut record = serde_json::to_value(input).unwrap();
        if let Some(map) = record.as_object_mut() {
            let now = now_timestamp();
            map.insert("createdAt".to_string(), Value::String(now.clone()));
            map.insert("updatedAt".to_string(), Value::String(now));
        }

        let id = self
            .create_document(&self.collections.properties, &record)
            .await?;

        tracing::info!("Created property {}", id);

        Ok(id)
    }

    pub async fn update_property(
        &self,
        id: &str,
        input: &PropertyInput,
    ) -> Result<(), FirestoreError> {
        let mut record = serde_json::to_value(input).unwrap();
        if let Some(map) = record.as_object_mut() {
            map.insert("updatedAt".to_string(), Value::String(now_timestamp()));
        }

        self.patch_document(&self.collections.properties, id, &record)
            .await?;

        Ok(())
    }

    pub async fn delete_property(&self, id: &str) -> Result<(), FirestoreError> {
        self.delete_document(&self.collections.properties, id).await
    }

    /// Persist one search request. The caller's id is discarded and the
    /// creation time is stamped here.
    pub async fn create_search_request(
        &self,
        request: &SearchRequest,
    ) -> Result<String, FirestoreError> {
        let mut record = serde_json::to_value(request).unwrap();
        if let Some(map) = record.as_object_mut() {
            map.remove("id");
            map.insert("createdAt".to_string(), Value::String(now_timestamp()));
        }

        let id = self
            .create_document(&self.collections.search_requests, &record)
            .await?;

        tracing::info!("Filed search request {}", id);

        Ok(id)
    }

    /// All search requests, newest first.
    pub async fn list_search_requests(&self) -> Result<Vec<SearchRequest>, FirestoreError> {
        let documents = self
            .list_collection(&self.collections.search_requests, Some("createdAt desc"))
            .await?;

        Ok(decode_documents(&documents))
    }

    /// Published search requests for the public demands page. An equality
    /// filter combined with server-side ordering needs a composite index,
    /// so ordering happens here.
    pub async fn list_published_requests(&self) -> Result<Vec<SearchRequest>, FirestoreError> {
        let documents = self
            .run_equality_query(
                &self.collections.search_requests,
                "published",
                json!({ "booleanValue": true }),
            )
            .await?;

        let mut requests: Vec<SearchRequest> = decode_documents(&documents);
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(requests)
    }

    /// Partial update; only the provided fields are written.
    pub async fn update_search_request(
        &self,
        id: &str,
        update: &UpdateRequestBody,
    ) -> Result<(), FirestoreError> {
        let record = serde_json::to_value(update).unwrap();
        if field_paths(&record).is_empty() {
            return Ok(());
        }

        self.patch_document(&self.collections.search_requests, id, &record)
            .await?;

        Ok(())
    }

    pub async fn delete_search_request(&self, id: &str) -> Result<(), FirestoreError> {
        self.delete_document(&self.collections.search_requests, id)
            .await
    }

    /// Read the settings blob. A missing document reads as defaults.
    pub async fn get_site_settings(&self) -> Result<SiteSettings, FirestoreError> {
        let url = format!(
            "{}?{}",
            self.document_url(&self.collections.settings, &self.collections.settings_doc),
            self.key_param()
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(SiteSettings::default());
        }
        if !status.is_success() {
            return Err(error_for_status(status, "Failed to fetch settings"));
        }

        let document: Value = response.json().await?;
        let record = document_to_json(&document)
            .ok_or_else(|| FirestoreError::InvalidResponse("Not a document".into()))?;

        serde_json::from_value(record).map_err(|e| {
            FirestoreError::InvalidResponse(format!("Failed to parse settings: {}", e))
        })
    }

    /// Merge-update the settings blob, creating it if absent.
    pub async fn update_site_settings(
        &self,
        update: &UpdateSettingsBody,
    ) -> Result<SiteSettings, FirestoreError> {
        let mut record = serde_json::to_value(update).unwrap();
        if let Some(map) = record.as_object_mut() {
            map.insert("updatedAt".to_string(), Value::String(now_timestamp()));
        }

        let document = self
            .patch_document(
                &self.collections.settings,
                &self.collections.settings_doc,
                &record,
            )
            .await?;

        let merged = document_to_json(&document)
            .ok_or_else(|| FirestoreError::InvalidResponse("Not a document".into()))?;

        serde_json::from_value(merged).map_err(|e| {
            FirestoreError::InvalidResponse(format!("Failed to parse settings: {}", e))
        })
    }

    /// Cheap reachability probe for the health endpoint. A missing
    /// settings document still proves the store answers.
    pub async fn health_check(&self) -> Result<(), FirestoreError> {
        let url = format!(
            "{}?{}",
            self.document_url(&self.collections.settings, &self.collections.settings_doc),
            self.key_param()
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status.is_success() || status == StatusCode::NOT_FOUND {
            Ok(())
        } else {
            Err(error_for_status(status, "Health probe failed"))
        }
    }

    async fn list_collection(
        &self,
        collection: &str,
        order_by: Option<&str>,
    ) -> Result<Vec<Value>, FirestoreError> {
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut url = format!(
                "{}?{}&pageSize={}",
                self.collection_url(collection),
                self.key_param(),
                PAGE_SIZE
            );
            if let Some(order_by) = order_by {
                url.push_str(&format!("&orderBy={}", urlencoding::encode(order_by)));
            }
            if let Some(token) = &page_token {
                url.push_str(&format!("&pageToken={}", urlencoding::encode(token)));
            }

            let response = self.client.get(&url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(error_for_status(
                    status,
                    &format!("Failed to list {}", collection),
                ));
            }

            let json: Value = response.json().await?;
            // An empty collection answers with an empty body
            if let Some(page) = json.get("documents").and_then(Value::as_array) {
                documents.extend(page.iter().cloned());
            }

            match json.get("nextPageToken").and_then(Value::as_str) {
                Some(token) if !token.is_empty() => page_token = Some(token.to_string()),
                _ => break,
            }
        }

        Ok(documents)
    }

    async fn run_equality_query(
        &self,
        collection: &str,
        field: &str,
        value: Value,
    ) -> Result<Vec<Value>, FirestoreError> {
        let url = format!("{}:runQuery?{}", self.documents_root(), self.key_param());

        let body = json!({
            "structuredQuery": {
                "from": [{ "collectionId": collection }],
                "where": {
                    "fieldFilter": {
                        "field": { "fieldPath": field },
                        "op": "EQUAL",
                        "value": value
                    }
                }
            }
        });

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(error_for_status(
                status,
                &format!("Query on {} failed", collection),
            ));
        }

        let json: Value = response.json().await?;
        let rows = json
            .as_array()
            .ok_or_else(|| FirestoreError::InvalidResponse("Expected a result array".into()))?;

        // Rows without a document carry read metadata only
        Ok(rows
            .iter()
            .filter_map(|row| row.get("document").cloned())
            .collect())
    }

    async fn create_document(
        &self,
        collection: &str,
        record: &Value,
    ) -> Result<String, FirestoreError> {
        let url = format!("{}?{}", self.collection_url(collection), self.key_param());

        let response = self
            .client
            .post(&url)
            .json(&encode_document(record))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(error_for_status(
                status,
                &format!("Failed to create document in {}", collection),
            ));
        }

        let document: Value = response.json().await?;
        document_id(&document)
            .map(str::to_string)
            .ok_or_else(|| FirestoreError::InvalidResponse("Created document has no name".into()))
    }

    async fn patch_document(
        &self,
        collection: &str,
        id: &str,
        record: &Value,
    ) -> Result<Value, FirestoreError> {
        let mut url = format!(
            "{}?{}",
            self.document_url(collection, id),
            self.key_param()
        );
        for field in field_paths(record) {
            url.push_str(&format!(
                "&updateMask.fieldPaths={}",
                urlencoding::encode(&field)
            ));
        }

        let response = self
            .client
            .patch(&url)
            .json(&encode_document(record))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(error_for_status(
                status,
                &format!("Failed to update {}/{}", collection, id),
            ));
        }

        Ok(response.json().await?)
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<(), FirestoreError> {
        let url = format!(
            "{}?{}",
            self.document_url(collection, id),
            self.key_param()
        );

        let response = self.client.delete(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(error_for_status(
                status,
                &format!("Failed to delete {}/{}", collection, id),
            ));
        }

        Ok(())
    }
}

fn error_for_status(status: StatusCode, context: &str) -> FirestoreError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FirestoreError::Unauthorized,
        StatusCode::NOT_FOUND => FirestoreError::NotFound(context.to_string()),
        _ => FirestoreError::ApiError(format!("{}: {}", context, status)),
    }
}

fn decode_documents<T: DeserializeOwned>(documents: &[Value]) -> Vec<T> {
    documents
        .iter()
        .filter_map(document_to_json)
        .filter_map(|record| serde_json::from_value(record).ok())
        .collect()
}

fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
