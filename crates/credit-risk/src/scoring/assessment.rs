use std::sync::Arc;

use tracing::warn;

use super::decision::{decide, RiskDecision};
use super::domain::{
    round_places, FeatureImpact, FeatureName, FeatureVector, LoanApplication, LoanDecision,
    RiskAssessment, FEATURE_COUNT,
};
use super::ports::{
    predict_checked, AttributionError, AttributionProvider, ModelHandle, RiskModel, ScoringError,
};
use super::search::find_safe_amount;

/// Composes the decision engine, safe-amount search, and attribution into one record.
///
/// The safe-amount search only runs when the decision is not [`LoanDecision::Approve`], so an
/// approved application never carries a recommendation.
pub fn assess(
    application: &LoanApplication,
    model: &dyn RiskModel,
    attribution: &dyn AttributionProvider,
) -> Result<RiskAssessment, ScoringError> {
    let features = FeatureVector::from_application(application);
    let probability = predict_checked(model, &features)?;
    let RiskDecision { band, decision } = decide(probability)?;

    let recommended_loan_amount = match decision {
        LoanDecision::Approve => None,
        LoanDecision::ReduceLoanAmount | LoanDecision::Reject => {
            find_safe_amount(application, model)?
        }
    };

    let feature_impact = attribute(&features, model, attribution)?;

    Ok(RiskAssessment {
        default_probability: round_places(probability, 4),
        risk_band: band,
        decision,
        recommended_loan_amount,
        feature_impact,
    })
}

fn attribute(
    features: &FeatureVector,
    model: &dyn RiskModel,
    attribution: &dyn AttributionProvider,
) -> Result<FeatureImpact, ScoringError> {
    let values = match attribution.explain(features, model) {
        Ok(values) => values,
        Err(AttributionError::Unavailable(reason)) => {
            warn!(%reason, "feature attribution unavailable");
            return Ok(FeatureImpact::Unavailable { reason });
        }
        Err(other) => return Err(other.into()),
    };

    let found = values.len();
    let values: [f64; FEATURE_COUNT] =
        values
            .try_into()
            .map_err(|_| AttributionError::LengthMismatch {
                expected: FEATURE_COUNT,
                found,
            })?;

    if let Some(feature) = FeatureName::ALL
        .into_iter()
        .find(|feature| !values[feature.index()].is_finite())
    {
        return Err(AttributionError::NonFinite { feature }.into());
    }

    Ok(FeatureImpact::Available(values))
}

/// Long-lived assessor holding the process-wide model and attribution provider.
#[derive(Clone)]
pub struct RiskAssessor {
    model: ModelHandle,
    attribution: Arc<dyn AttributionProvider>,
}

impl RiskAssessor {
    pub fn new(model: ModelHandle, attribution: Arc<dyn AttributionProvider>) -> Self {
        Self { model, attribution }
    }

    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    pub fn assess(&self, application: &LoanApplication) -> Result<RiskAssessment, ScoringError> {
        assess(application, self.model.model(), self.attribution.as_ref())
    }
}
