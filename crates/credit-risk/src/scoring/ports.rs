use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::domain::{FeatureName, FeatureVector, FEATURE_COUNT};

/// Scoring abstraction so the decision engine can be exercised without a trained artifact.
///
/// Implementations must be deterministic for a fixed vector and safe to share across
/// concurrent requests.
pub trait RiskModel: Send + Sync {
    /// Probability of default for the vector, expected in `[0, 1]`.
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError>;

    /// Queried once when the model is loaded; see [`ModelHandle`].
    fn capability(&self) -> ModelCapability {
        ModelCapability::Opaque
    }

    /// Log-odds coefficients for models that are linear in their inputs.
    fn linear_terms(&self) -> Option<&LinearTerms> {
        None
    }

    fn version(&self) -> &str {
        "unversioned"
    }
}

/// Per-feature explanation hook (e.g. additive attributions over the log-odds).
pub trait AttributionProvider: Send + Sync {
    /// One signed value per feature, in [`FeatureName::ALL`] order.
    fn explain(
        &self,
        features: &FeatureVector,
        model: &dyn RiskModel,
    ) -> Result<Vec<f64>, AttributionError>;
}

/// Coefficients of a model whose log-odds are `bias + sum(weights[i] * x[i])`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearTerms {
    pub weights: [f64; FEATURE_COUNT],
    pub bias: f64,
    /// Reference point the attributions are measured against (typically training means).
    pub baseline: [f64; FEATURE_COUNT],
}

/// Global importance score for one feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: FeatureName,
    pub importance: f64,
}

/// What a loaded model can report beyond its predictions.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelCapability {
    /// Importances in [`FeatureName::ALL`] order.
    SupportsImportance([f64; FEATURE_COUNT]),
    Opaque,
}

impl ModelCapability {
    /// Importance ranking, highest first; `None` for opaque models.
    pub fn ranking(&self) -> Option<Vec<FeatureImportance>> {
        match self {
            ModelCapability::SupportsImportance(values) => {
                let mut ranking: Vec<FeatureImportance> = FeatureName::ALL
                    .into_iter()
                    .zip(values.iter().copied())
                    .map(|(feature, importance)| FeatureImportance {
                        feature,
                        importance,
                    })
                    .collect();
                ranking.sort_by(|left, right| right.importance.total_cmp(&left.importance));
                Some(ranking)
            }
            ModelCapability::Opaque => None,
        }
    }
}

/// Process-wide model handle: immutable after construction, cloned cheaply into handlers.
#[derive(Clone)]
pub struct ModelHandle {
    model: Arc<dyn RiskModel>,
    capability: ModelCapability,
}

impl ModelHandle {
    pub fn new(model: Arc<dyn RiskModel>) -> Self {
        let capability = model.capability();
        Self { model, capability }
    }

    pub fn model(&self) -> &dyn RiskModel {
        self.model.as_ref()
    }

    pub fn capability(&self) -> &ModelCapability {
        &self.capability
    }

    pub fn version(&self) -> &str {
        self.model.version()
    }
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelHandle")
            .field("version", &self.model.version())
            .field("capability", &self.capability)
            .finish()
    }
}

/// Failure raised by a risk model implementation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("inference failed: {0}")]
    Inference(String),
}

/// Failure raised by an attribution provider.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AttributionError {
    #[error("attribution unavailable: {0}")]
    Unavailable(String),
    #[error("attribution returned {found} values, expected {expected}")]
    LengthMismatch { expected: usize, found: usize },
    #[error("attribution for {feature} is not a finite number")]
    NonFinite { feature: FeatureName },
}

/// Contract violations surfaced by the scoring core.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("risk model failed: {0}")]
    Model(#[from] ModelError),
    #[error("risk model returned probability {probability} outside [0, 1]")]
    ProbabilityOutOfRange { probability: f64 },
    #[error("loan amount must be positive to search for a safe amount (found {amount})")]
    NonPositiveLoanAmount { amount: f64 },
    #[error(transparent)]
    Attribution(#[from] AttributionError),
}

/// Runs the model and enforces the `[0, 1]` probability contract.
pub(crate) fn predict_checked(
    model: &dyn RiskModel,
    features: &FeatureVector,
) -> Result<f64, ScoringError> {
    let probability = model.predict(features)?;
    if probability.is_finite() && (0.0..=1.0).contains(&probability) {
        Ok(probability)
    } else {
        tracing::warn!(probability, "risk model violated the probability contract");
        Err(ScoringError::ProbabilityOutOfRange { probability })
    }
}
