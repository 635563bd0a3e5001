//! Loan default scoring: decision policy, safe-amount search, attribution, and the HTTP surface.

pub mod analytics;
pub mod assessment;
pub mod attribution;
pub mod decision;
pub mod domain;
pub mod intake;
pub mod model;
pub mod ports;
pub mod router;
pub mod search;
pub mod service;

#[cfg(test)]
mod tests;

pub use analytics::{
    read_labelled_samples, AnalyticsError, ConfusionMatrix, LabelledSample, ModelMetrics,
};
pub use assessment::{assess, RiskAssessor};
pub use attribution::{LinearAttribution, NoAttribution};
pub use decision::{decide, RiskDecision, LOW_RISK_CEILING, REJECTION_THRESHOLD};
pub use domain::{
    FeatureImpact, FeatureName, FeatureVector, LoanApplication, LoanDecision, RiskAssessment,
    RiskBand, FEATURE_COUNT,
};
pub use intake::{IntakeGuard, IntakePolicy, ValidationError};
pub use model::{ArtifactError, LogisticRiskModel, ModelArtifact};
pub use ports::{
    AttributionError, AttributionProvider, FeatureImportance, LinearTerms, ModelCapability,
    ModelError, ModelHandle, RiskModel, ScoringError,
};
pub use router::assessment_router;
pub use search::{find_safe_amount, REDUCTION_FACTORS};
pub use service::{CreditRiskService, CreditServiceError, ModelAnalyticsView};
