use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::LoanApplication;
use super::service::{CreditRiskService, CreditServiceError};

/// Router builder exposing the scoring and analytics endpoints.
pub fn assessment_router(service: Arc<CreditRiskService>) -> Router {
    Router::new()
        .route("/predict", post(predict_handler))
        .route("/api/v1/model/analytics", get(analytics_handler))
        .with_state(service)
}

pub(crate) async fn predict_handler(
    State(service): State<Arc<CreditRiskService>>,
    axum::Json(application): axum::Json<LoanApplication>,
) -> Response {
    match service.assess(&application) {
        Ok(assessment) => (StatusCode::OK, axum::Json(assessment)).into_response(),
        Err(CreditServiceError::Validation(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(CreditServiceError::Scoring(error)) => {
            let payload = json!({
                "error": "scoring failure",
                "detail": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn analytics_handler(State(service): State<Arc<CreditRiskService>>) -> Response {
    (StatusCode::OK, axum::Json(service.analytics())).into_response()
}
