//! Local stand-ins for the Ollama and OpenAI embedding endpoints

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Json;
use axum::Router;
use serde_json::json;
use serde_json::Value;

/// A request as the server saw it
#[derive(Debug, Clone)]
pub struct Recorded {
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone, Default)]
pub struct Recorder {
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl Recorder {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, headers: &HeaderMap, body: &Value) {
        let authorization = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        self.requests.lock().unwrap().push(Recorded {
            authorization,
            body: body.clone(),
        });
    }
}

/// Embedding derived from the text so responses can be matched to inputs
pub fn embedding_for(text: &str) -> Vec<f32> {
    vec![text.chars().count() as f32, 1.0]
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    addr
}

/// Ollama `POST /api/embeddings {model, prompt}`; the prompt "fail" yields a 500
pub async fn spawn_ollama() -> (String, Recorder) {
    async fn embeddings(
        State(recorder): State<Recorder>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        recorder.record(&headers, &body);
        let prompt = body["prompt"].as_str().unwrap_or_default();
        if prompt == "fail" {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "model not loaded"})),
            );
        }
        (StatusCode::OK, Json(json!({"embedding": embedding_for(prompt)})))
    }

    let recorder = Recorder::default();
    let app = Router::new()
        .route("/api/embeddings", post(embeddings))
        .with_state(recorder.clone());
    (format!("http://{}", serve(app).await), recorder)
}

/// OpenAI `POST /v1/embeddings {input, model}`
///
/// With `drop_last`, the response carries one embedding fewer than requested.
pub async fn spawn_openai(drop_last: bool) -> (String, Recorder) {
    #[derive(Clone)]
    struct OpenAiState {
        recorder: Recorder,
        drop_last: bool,
    }

    async fn embeddings(
        State(state): State<OpenAiState>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        state.recorder.record(&headers, &body);
        let mut data: Vec<Value> = body["input"]
            .as_array()
            .map(|inputs| {
                inputs
                    .iter()
                    .enumerate()
                    .map(|(index, input)| {
                        json!({
                            "object": "embedding",
                            "index": index,
                            "embedding": embedding_for(input.as_str().unwrap_or_default()),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();
        if state.drop_last {
            data.pop();
        }
        Json(json!({"object": "list", "data": data, "model": body["model"]}))
    }

    let recorder = Recorder::default();
    let app = Router::new()
        .route("/v1/embeddings", post(embeddings))
        .with_state(OpenAiState {
            recorder: recorder.clone(),
            drop_last,
        });
    (format!("http://{}/v1", serve(app).await), recorder)
}
