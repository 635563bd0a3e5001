use super::domain::{FeatureVector, FEATURE_COUNT};
use super::ports::{AttributionError, AttributionProvider, RiskModel};

/// Exact additive attribution for linear-logit models.
///
/// Each feature contributes `weight * (value - baseline)` to the log-odds, so the
/// contributions sum to the difference between the applicant's log-odds and the baseline's.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearAttribution;

impl AttributionProvider for LinearAttribution {
    fn explain(
        &self,
        features: &FeatureVector,
        model: &dyn RiskModel,
    ) -> Result<Vec<f64>, AttributionError> {
        let terms = model.linear_terms().ok_or_else(|| {
            AttributionError::Unavailable(format!(
                "model {} does not expose linear coefficients",
                model.version()
            ))
        })?;

        let values = features.values();
        Ok((0..FEATURE_COUNT)
            .map(|index| terms.weights[index] * (values[index] - terms.baseline[index]))
            .collect())
    }
}

/// Provider for deployments without an explainer; every assessment reports "unavailable".
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAttribution;

impl AttributionProvider for NoAttribution {
    fn explain(
        &self,
        _features: &FeatureVector,
        _model: &dyn RiskModel,
    ) -> Result<Vec<f64>, AttributionError> {
        Err(AttributionError::Unavailable(
            "no attribution provider configured".to_string(),
        ))
    }
}
