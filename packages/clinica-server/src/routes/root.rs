use axum::Json;
use serde_json::{Value, json};

pub(crate) async fn index() -> Json<Value> {
    Json(json!({ "message": "API de gerenciamento da clínica" }))
}
