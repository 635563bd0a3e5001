//! End-to-end scenarios for the credit assessment workflow, driven through the public service
//! facade and HTTP router only.

use std::sync::Arc;

use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use credit_risk::scoring::{
    assessment_router, CreditRiskService, FeatureVector, IntakeGuard, LinearAttribution,
    LoanApplication, LoanDecision, LogisticRiskModel, ModelError, ModelHandle, RiskAssessor,
    RiskBand, RiskModel,
};

/// Scores the requested amount from a fixed table; unknown amounts fall back to `default`.
struct ScriptedModel {
    default: f64,
    by_amount: Vec<(f64, f64)>,
}

impl RiskModel for ScriptedModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let amount = features.loan_amount();
        Ok(self
            .by_amount
            .iter()
            .find(|(candidate, _)| (candidate - amount).abs() < 1e-6)
            .map(|(_, probability)| *probability)
            .unwrap_or(self.default))
    }
}

fn application() -> LoanApplication {
    LoanApplication {
        tenure_months: 12,
        monthly_recharge: 100.0,
        monthly_transactions: 20,
        previous_loans: 1,
        loan_amount: 200.0,
    }
}

fn service(model: impl RiskModel + 'static) -> CreditRiskService {
    let assessor = RiskAssessor::new(
        ModelHandle::new(Arc::new(model)),
        Arc::new(LinearAttribution),
    );
    CreditRiskService::new(assessor, IntakeGuard::default())
}

#[test]
fn scenario_low_risk_is_approved_as_requested() {
    let service = service(ScriptedModel {
        default: 0.10,
        by_amount: Vec::new(),
    });

    let assessment = service.assess(&application()).expect("assessment");

    assert_eq!(assessment.risk_band, RiskBand::Low);
    assert_eq!(assessment.decision, LoanDecision::Approve);
    assert_eq!(assessment.recommended_loan_amount, None);
}

#[test]
fn scenario_medium_risk_recommends_first_probe_below_threshold() {
    let service = service(ScriptedModel {
        default: 0.35,
        by_amount: vec![(160.0, 0.52), (120.0, 0.51), (100.0, 0.44), (80.0, 0.1)],
    });

    let assessment = service.assess(&application()).expect("assessment");

    assert_eq!(assessment.risk_band, RiskBand::Medium);
    assert_eq!(assessment.decision, LoanDecision::ReduceLoanAmount);
    assert_eq!(assessment.recommended_loan_amount, Some(100.0));
}

#[test]
fn scenario_high_risk_with_no_safe_amount_is_rejected() {
    let service = service(ScriptedModel {
        default: 0.90,
        by_amount: vec![(160.0, 0.8), (120.0, 0.7), (100.0, 0.6), (80.0, 0.5)],
    });

    let assessment = service.assess(&application()).expect("assessment");

    assert_eq!(assessment.risk_band, RiskBand::High);
    assert_eq!(assessment.decision, LoanDecision::Reject);
    assert_eq!(assessment.recommended_loan_amount, None);
}

#[test]
fn scenario_boundary_probabilities_move_up_a_band() {
    let at_quarter = service(ScriptedModel {
        default: 0.25,
        by_amount: Vec::new(),
    })
    .assess(&application())
    .expect("assessment");
    assert_eq!(at_quarter.risk_band, RiskBand::Medium);

    let at_half = service(ScriptedModel {
        default: 0.50,
        by_amount: Vec::new(),
    })
    .assess(&application())
    .expect("assessment");
    assert_eq!(at_half.risk_band, RiskBand::High);
}

#[test]
fn opaque_models_report_attribution_as_unavailable() {
    let assessment = service(ScriptedModel {
        default: 0.3,
        by_amount: Vec::new(),
    })
    .assess(&application())
    .expect("assessment");

    let payload = serde_json::to_value(&assessment).expect("serialize");
    assert_eq!(payload["feature_impact"]["status"], "unavailable");
}

#[tokio::test]
async fn http_boundary_scores_with_the_reference_model() {
    let router = assessment_router(Arc::new(service(LogisticRiskModel::reference())));

    let response = router
        .oneshot(
            Request::post("/predict")
                .header(header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    json!({
                        "tenure_months": 12,
                        "monthly_recharge": 50,
                        "monthly_transactions": 20,
                        "previous_loans": 1,
                        "loan_amount": 500
                    })
                    .to_string(),
                ))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let payload: Value = serde_json::from_slice(&body).expect("json payload");

    assert_eq!(payload["risk_band"], "HIGH");
    assert_eq!(payload["decision"], "REJECT");
    assert_eq!(payload["recommended_loan_amount"], json!(200.0));
    let impact = payload["feature_impact"].as_object().expect("impact map");
    assert_eq!(impact.len(), 5);
    assert!(impact["loan_amount"].as_f64().expect("numeric impact") > 0.0);
}
