/// Embedding client — HTTP similarity provider for any OpenAI-compatible
/// `/embeddings` endpoint (hosted APIs, or a local sentence-transformers server).
///
/// The profile embedding is computed once and reused; each job costs one request.
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{cosine_similarity, SemanticError, SemanticSimilarityProvider};

const MAX_RETRIES: u32 = 3;
const DEFAULT_RETRY_BASE: Duration = Duration::from_millis(1000);

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    #[serde(default)]
    index: usize,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct EmbeddingClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    retry_base: Duration,
    profile_cache: Arc<Mutex<Option<(String, Arc<Vec<f32>>)>>>,
}

impl EmbeddingClient {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SemanticError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            endpoint: embeddings_endpoint(base_url),
            api_key,
            model: model.into(),
            retry_base: DEFAULT_RETRY_BASE,
            profile_cache: Arc::new(Mutex::new(None)),
        })
    }

    /// Overrides the first backoff delay; later retries double it.
    #[cfg(test)]
    pub fn with_retry_base(mut self, retry_base: Duration) -> Self {
        self.retry_base = retry_base;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Embeds `inputs` in one request, returning vectors in input order.
    /// Retries on 429 and 5xx with exponential backoff.
    pub async fn embed(&self, inputs: &[&str]) -> Result<Vec<Vec<f32>>, SemanticError> {
        let request_body = EmbeddingRequest {
            model: &self.model,
            input: inputs.to_vec(),
        };

        let mut last_error: Option<SemanticError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = self.retry_base * (1 << (attempt - 1));
                warn!(
                    "Embedding call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let mut request = self.client.post(&self.endpoint).json(&request_body);
            if let Some(key) = &self.api_key {
                request = request.bearer_auth(key);
            }

            let response = match request.send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(SemanticError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Embedding API returned {}: {}", status, body);
                last_error = Some(SemanticError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(SemanticError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let parsed: EmbeddingResponse = response.json().await?;
            let vectors = into_ordered_vectors(parsed, inputs.len())?;
            debug!(
                "Embedding call succeeded: inputs={}, dims={}",
                vectors.len(),
                vectors.first().map_or(0, Vec::len)
            );
            return Ok(vectors);
        }

        Err(last_error.unwrap_or(SemanticError::EmptyEmbedding))
    }

    fn cached_profile(&self, profile_text: &str) -> Option<Arc<Vec<f32>>> {
        let cache = self.profile_cache.lock().ok()?;
        cache
            .as_ref()
            .filter(|(text, _)| text == profile_text)
            .map(|(_, vector)| Arc::clone(vector))
    }

    fn store_profile(&self, profile_text: &str, vector: Vec<f32>) -> Arc<Vec<f32>> {
        let vector = Arc::new(vector);
        if let Ok(mut cache) = self.profile_cache.lock() {
            *cache = Some((profile_text.to_string(), Arc::clone(&vector)));
        }
        vector
    }
}

#[async_trait]
impl SemanticSimilarityProvider for EmbeddingClient {
    fn name(&self) -> &str {
        "embedding"
    }

    async fn similarity(&self, profile_text: &str, job_text: &str) -> Result<f32, SemanticError> {
        let (profile, job) = match self.cached_profile(profile_text) {
            Some(profile) => {
                let mut vectors = self.embed(&[job_text]).await?;
                (profile, vectors.pop().ok_or(SemanticError::EmptyEmbedding)?)
            }
            None => {
                let mut vectors = self.embed(&[profile_text, job_text]).await?;
                let job = vectors.pop().ok_or(SemanticError::EmptyEmbedding)?;
                let profile = vectors.pop().ok_or(SemanticError::EmptyEmbedding)?;
                (self.store_profile(profile_text, profile), job)
            }
        };

        let similarity = cosine_similarity(&profile, &job)?.unwrap_or(0.0);
        if !similarity.is_finite() {
            return Err(SemanticError::InvalidSimilarity);
        }
        Ok(similarity)
    }
}

fn embeddings_endpoint(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if base.ends_with("/embeddings") {
        base.to_string()
    } else {
        format!("{}/embeddings", base)
    }
}

/// Providers may return `data` out of order; `index` is authoritative.
fn into_ordered_vectors(
    mut response: EmbeddingResponse,
    expected: usize,
) -> Result<Vec<Vec<f32>>, SemanticError> {
    if response.data.len() != expected || response.data.iter().any(|d| d.embedding.is_empty()) {
        return Err(SemanticError::EmptyEmbedding);
    }
    response.data.sort_by_key(|d| d.index);
    Ok(response.data.into_iter().map(|d| d.embedding).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    #[derive(Clone, Default)]
    struct FakeServer {
        calls: Arc<AtomicUsize>,
        inputs_seen: Arc<Mutex<Vec<usize>>>,
        fail_first: usize,
    }

    /// Embeds each input as `[len, 1.0]`, so equal-length texts are identical.
    async fn fake_embeddings(
        State(server): State<FakeServer>,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        let call = server.calls.fetch_add(1, Ordering::SeqCst);
        if call < server.fail_first {
            return (StatusCode::SERVICE_UNAVAILABLE, Json(json!({"error": {"message": "busy"}})));
        }
        if body["model"] == "missing-model" {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({"error": {"message": "model not found"}})),
            );
        }

        let inputs: Vec<String> = serde_json::from_value(body["input"].clone()).unwrap();
        server.inputs_seen.lock().unwrap().push(inputs.len());
        // reversed on purpose to exercise index ordering
        let data: Vec<Value> = inputs
            .iter()
            .enumerate()
            .rev()
            .map(|(i, text)| json!({"index": i, "embedding": [text.len() as f32, 1.0]}))
            .collect();
        (StatusCode::OK, Json(json!({ "data": data })))
    }

    async fn spawn_server(server: FakeServer) -> String {
        let app = Router::new()
            .route("/v1/embeddings", post(fake_embeddings))
            .with_state(server);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/v1", addr)
    }

    fn client(base: &str, model: &str) -> EmbeddingClient {
        EmbeddingClient::new(base, Some("test-key".into()), model, Duration::from_secs(5))
            .unwrap()
            .with_retry_base(Duration::from_millis(1))
    }

    #[test]
    fn test_endpoint_appends_embeddings() {
        assert_eq!(embeddings_endpoint("http://h/v1"), "http://h/v1/embeddings");
        assert_eq!(embeddings_endpoint("http://h/v1/"), "http://h/v1/embeddings");
        assert_eq!(embeddings_endpoint("http://h/v1/embeddings"), "http://h/v1/embeddings");
    }

    #[test]
    fn test_vectors_reordered_by_index() {
        let response = EmbeddingResponse {
            data: vec![
                EmbeddingData { embedding: vec![2.0], index: 1 },
                EmbeddingData { embedding: vec![1.0], index: 0 },
            ],
        };
        assert_eq!(into_ordered_vectors(response, 2).unwrap(), vec![vec![1.0], vec![2.0]]);
    }

    #[test]
    fn test_short_response_is_error() {
        let response = EmbeddingResponse {
            data: vec![EmbeddingData { embedding: vec![1.0], index: 0 }],
        };
        assert!(matches!(
            into_ordered_vectors(response, 2),
            Err(SemanticError::EmptyEmbedding)
        ));
    }

    #[tokio::test]
    async fn test_similarity_caches_profile_embedding() {
        let server = FakeServer::default();
        let base = spawn_server(server.clone()).await;
        let client = client(&base, "test-model");

        let first = client.similarity("same", "text").await.unwrap();
        let second = client.similarity("same", "other job text").await.unwrap();

        assert!((first - 1.0).abs() < 1e-6);
        assert!(second < first);
        // profile + job on the first call, job only afterwards
        assert_eq!(*server.inputs_seen.lock().unwrap(), vec![2, 1]);
    }

    #[tokio::test]
    async fn test_retries_on_server_error() {
        let server = FakeServer {
            fail_first: 2,
            ..FakeServer::default()
        };
        let base = spawn_server(server.clone()).await;
        let client = client(&base, "test-model");

        let vectors = client.embed(&["abc"]).await.unwrap();
        assert_eq!(vectors, vec![vec![3.0, 1.0]]);
        assert_eq!(server.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let server = FakeServer {
            fail_first: 10,
            ..FakeServer::default()
        };
        let base = spawn_server(server.clone()).await;
        let err = client(&base, "test-model").embed(&["abc"]).await.unwrap_err();

        assert!(matches!(err, SemanticError::Api { status: 503, .. }));
        assert_eq!(server.calls.load(Ordering::SeqCst), MAX_RETRIES as usize);
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let server = FakeServer::default();
        let base = spawn_server(server.clone()).await;
        let err = client(&base, "missing-model").embed(&["abc"]).await.unwrap_err();

        match err {
            SemanticError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "model not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(server.calls.load(Ordering::SeqCst), 1);
    }
}
