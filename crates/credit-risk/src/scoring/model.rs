use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::domain::{FeatureName, FeatureVector, FEATURE_COUNT};
use super::ports::{LinearTerms, ModelCapability, ModelError, RiskModel};

pub const REFERENCE_MODEL_VERSION: &str = "reference-logit-v1";

/// On-disk description of a logistic model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub version: String,
    /// Must match [`FeatureName::ALL`]; a reordered artifact is refused at load time.
    pub feature_order: Vec<FeatureName>,
    pub weights: [f64; FEATURE_COUNT],
    pub bias: f64,
    pub baseline: [f64; FEATURE_COUNT],
}

impl ModelArtifact {
    /// Hand-calibrated coefficients approximating the synthetic training rule: applicants
    /// default when the request exceeds three months of recharge or they hold three or more
    /// previous loans. Baselines are the means of the synthetic training population.
    pub fn reference() -> Self {
        Self {
            version: REFERENCE_MODEL_VERSION.to_string(),
            feature_order: FeatureName::ALL.to_vec(),
            weights: [-0.02, -0.15, -0.004, 2.5, 0.05],
            bias: -5.5,
            baseline: [30.0, 52.0, 100.0, 2.0, 254.5],
        }
    }
}

/// Errors raised while loading a model artifact at startup.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("unable to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed model artifact: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("model artifact feature order {found:?} does not match the scoring contract")]
    FeatureOrder { found: Vec<FeatureName> },
    #[error("model artifact contains a non-finite {field}")]
    NonFinite { field: &'static str },
}

/// Logistic regression over the five behavioral features.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticRiskModel {
    version: String,
    terms: LinearTerms,
}

impl LogisticRiskModel {
    pub fn reference() -> Self {
        let artifact = ModelArtifact::reference();
        Self {
            version: artifact.version,
            terms: LinearTerms {
                weights: artifact.weights,
                bias: artifact.bias,
                baseline: artifact.baseline,
            },
        }
    }

    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ArtifactError> {
        if artifact.feature_order.as_slice() != FeatureName::ALL.as_slice() {
            return Err(ArtifactError::FeatureOrder {
                found: artifact.feature_order,
            });
        }
        if !artifact.weights.iter().all(|weight| weight.is_finite()) {
            return Err(ArtifactError::NonFinite { field: "weight" });
        }
        if !artifact.bias.is_finite() {
            return Err(ArtifactError::NonFinite { field: "bias" });
        }
        if !artifact.baseline.iter().all(|value| value.is_finite()) {
            return Err(ArtifactError::NonFinite { field: "baseline" });
        }

        Ok(Self {
            version: artifact.version,
            terms: LinearTerms {
                weights: artifact.weights,
                bias: artifact.bias,
                baseline: artifact.baseline,
            },
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, ArtifactError> {
        let artifact: ModelArtifact = serde_json::from_str(raw)?;
        Self::from_artifact(artifact)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn log_odds(&self, features: &FeatureVector) -> f64 {
        self.terms
            .weights
            .iter()
            .zip(features.values().iter())
            .fold(self.terms.bias, |acc, (weight, value)| acc + weight * value)
    }
}

impl RiskModel for LogisticRiskModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let z = self.log_odds(features);
        if z.is_nan() {
            return Err(ModelError::Inference(
                "log-odds evaluated to NaN".to_string(),
            ));
        }
        Ok(1.0 / (1.0 + (-z).exp()))
    }

    fn capability(&self) -> ModelCapability {
        let total: f64 = self.terms.weights.iter().map(|weight| weight.abs()).sum();
        let mut importances = [0.0; FEATURE_COUNT];
        if total > 0.0 {
            for (slot, weight) in importances.iter_mut().zip(self.terms.weights.iter()) {
                *slot = weight.abs() / total;
            }
        }
        ModelCapability::SupportsImportance(importances)
    }

    fn linear_terms(&self) -> Option<&LinearTerms> {
        Some(&self.terms)
    }

    fn version(&self) -> &str {
        &self.version
    }
}
