use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::analytics::ModelMetrics;
use super::assessment::RiskAssessor;
use super::domain::{LoanApplication, RiskAssessment};
use super::intake::{IntakeGuard, ValidationError};
use super::ports::{FeatureImportance, ScoringError};

/// Service composing intake validation, the assessor, and the analytics side channel.
pub struct CreditRiskService {
    guard: IntakeGuard,
    assessor: RiskAssessor,
    analytics: Option<ModelMetrics>,
}

impl CreditRiskService {
    pub fn new(assessor: RiskAssessor, guard: IntakeGuard) -> Self {
        Self {
            guard,
            assessor,
            analytics: None,
        }
    }

    /// Attach a precomputed metrics snapshot served by [`CreditRiskService::analytics`].
    pub fn with_analytics(mut self, metrics: ModelMetrics) -> Self {
        self.analytics = Some(metrics);
        self
    }

    pub fn assessor(&self) -> &RiskAssessor {
        &self.assessor
    }

    /// Validate and score one application.
    pub fn assess(
        &self,
        application: &LoanApplication,
    ) -> Result<RiskAssessment, CreditServiceError> {
        self.guard.validate(application)?;

        let assessment = self.assessor.assess(application).map_err(|err| {
            warn!(error = %err, "scoring failed");
            err
        })?;

        info!(
            probability = assessment.default_probability,
            band = assessment.risk_band.label(),
            decision = assessment.decision.label(),
            recommended = ?assessment.recommended_loan_amount,
            "application assessed"
        );

        Ok(assessment)
    }

    pub fn analytics(&self) -> ModelAnalyticsView {
        let model = self.assessor.model();
        ModelAnalyticsView {
            model_version: model.version().to_string(),
            feature_importance: model.capability().ranking(),
            metrics: self.analytics.clone(),
            generated_at: Utc::now(),
        }
    }
}

/// Analytics payload exposed to dashboards.
#[derive(Debug, Clone, Serialize)]
pub struct ModelAnalyticsView {
    pub model_version: String,
    /// `None` when the loaded model cannot report importances.
    pub feature_importance: Option<Vec<FeatureImportance>>,
    pub metrics: Option<ModelMetrics>,
    pub generated_at: DateTime<Utc>,
}

/// Error raised by the credit risk service.
#[derive(Debug, thiserror::Error)]
pub enum CreditServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("scoring failed: {0}")]
    Scoring(#[from] ScoringError),
}
