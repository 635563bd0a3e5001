use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::scoring::assessment::RiskAssessor;
use crate::scoring::domain::{FeatureVector, LoanApplication};
use crate::scoring::intake::IntakeGuard;
use crate::scoring::ports::{
    AttributionError, AttributionProvider, ModelError, ModelHandle, RiskModel,
};
use crate::scoring::service::CreditRiskService;

/// Scenario applicant: 12 months tenure, 100 recharge, 20 transactions, 1 loan, asks for 200.
pub(super) fn application() -> LoanApplication {
    LoanApplication {
        tenure_months: 12,
        monthly_recharge: 100.0,
        monthly_transactions: 20,
        previous_loans: 1,
        loan_amount: 200.0,
    }
}

/// Returns the same probability for every vector.
pub(super) struct ConstantModel(pub(super) f64);

impl RiskModel for ConstantModel {
    fn predict(&self, _features: &FeatureVector) -> Result<f64, ModelError> {
        Ok(self.0)
    }
}

/// Scores by requested amount and records every amount it was asked about.
pub(super) struct AmountScheduleModel {
    fallback: f64,
    schedule: Vec<(f64, f64)>,
    probes: Mutex<Vec<f64>>,
}

impl AmountScheduleModel {
    pub(super) fn new(fallback: f64, schedule: &[(f64, f64)]) -> Self {
        Self {
            fallback,
            schedule: schedule.to_vec(),
            probes: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn probes(&self) -> Vec<f64> {
        self.probes.lock().expect("probe mutex poisoned").clone()
    }
}

impl RiskModel for AmountScheduleModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let amount = features.loan_amount();
        self.probes
            .lock()
            .expect("probe mutex poisoned")
            .push(amount);
        Ok(self
            .schedule
            .iter()
            .find(|(scheduled, _)| (scheduled - amount).abs() < 1e-6)
            .map(|(_, probability)| *probability)
            .unwrap_or(self.fallback))
    }
}

pub(super) struct FailingModel;

impl RiskModel for FailingModel {
    fn predict(&self, _features: &FeatureVector) -> Result<f64, ModelError> {
        Err(ModelError::Inference("booster not loaded".to_string()))
    }
}

/// Attribution double returning a canned vector.
pub(super) struct FixedAttribution(pub(super) Vec<f64>);

impl AttributionProvider for FixedAttribution {
    fn explain(
        &self,
        _features: &FeatureVector,
        _model: &dyn RiskModel,
    ) -> Result<Vec<f64>, AttributionError> {
        Ok(self.0.clone())
    }
}

pub(super) fn unit_attribution() -> FixedAttribution {
    FixedAttribution(vec![-0.4, -1.2, 0.1, 0.3, 0.9])
}

pub(super) fn assessor_with(model: impl RiskModel + 'static) -> RiskAssessor {
    RiskAssessor::new(
        ModelHandle::new(Arc::new(model)),
        Arc::new(unit_attribution()),
    )
}

pub(super) fn service_with(model: impl RiskModel + 'static) -> Arc<CreditRiskService> {
    Arc::new(CreditRiskService::new(
        assessor_with(model),
        IntakeGuard::default(),
    ))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
