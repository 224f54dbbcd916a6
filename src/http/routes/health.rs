use axum::Json;

use crate::http::types::HealthzResponse;

pub async fn healthz() -> Json<HealthzResponse> {
    Json(HealthzResponse { message: "OK".into() })
}
