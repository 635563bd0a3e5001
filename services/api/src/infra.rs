use credit_risk::config::ScoringConfig;
use credit_risk::error::AppError;
use credit_risk::scoring::{
    AttributionProvider, CreditRiskService, IntakeGuard, LinearAttribution, LogisticRiskModel,
    ModelHandle, ModelMetrics, NoAttribution, RiskAssessor, RiskModel,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loads the configured artifact, or the bundled reference model when none is set.
pub(crate) fn load_model(config: &ScoringConfig) -> Result<ModelHandle, AppError> {
    let model = match &config.model_path {
        Some(path) => LogisticRiskModel::load(path)?,
        None => LogisticRiskModel::reference(),
    };

    let handle = ModelHandle::new(Arc::new(model));
    info!(
        version = handle.version(),
        importance = handle.capability().ranking().is_some(),
        "risk model loaded"
    );
    Ok(handle)
}

/// Picks an explainer matching the model's capabilities once, at startup.
pub(crate) fn attribution_for(model: &dyn RiskModel) -> Arc<dyn AttributionProvider> {
    if model.linear_terms().is_some() {
        Arc::new(LinearAttribution)
    } else {
        Arc::new(NoAttribution)
    }
}

pub(crate) fn build_service(config: &ScoringConfig) -> Result<CreditRiskService, AppError> {
    let handle = load_model(config)?;
    let attribution = attribution_for(handle.model());
    let service = CreditRiskService::new(
        RiskAssessor::new(handle, attribution),
        IntakeGuard::from_config(config),
    );

    match &config.metrics_path {
        Some(path) => Ok(service.with_analytics(ModelMetrics::load(path)?)),
        None => Ok(service),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credit_risk::scoring::{FeatureVector, ModelError};
    use std::path::PathBuf;

    struct OpaqueModel;

    impl RiskModel for OpaqueModel {
        fn predict(&self, _features: &FeatureVector) -> Result<f64, ModelError> {
            Ok(0.4)
        }
    }

    #[test]
    fn default_config_loads_reference_model() {
        let handle = load_model(&ScoringConfig::default()).expect("reference model loads");
        assert_eq!(handle.version(), "reference-logit-v1");
    }

    #[test]
    fn missing_artifact_is_fatal() {
        let config = ScoringConfig {
            model_path: Some(PathBuf::from("/nonexistent/credit_model.json")),
            ..ScoringConfig::default()
        };
        assert!(matches!(load_model(&config), Err(AppError::Model(_))));
    }

    #[test]
    fn missing_metrics_snapshot_is_fatal() {
        let config = ScoringConfig {
            metrics_path: Some(PathBuf::from("/nonexistent/model_metrics.json")),
            ..ScoringConfig::default()
        };
        assert!(matches!(build_service(&config), Err(AppError::Analytics(_))));
    }

    #[test]
    fn opaque_models_get_no_attribution() {
        let attribution = attribution_for(&OpaqueModel);
        let features = FeatureVector::from_values([12.0, 100.0, 20.0, 1.0, 200.0]);
        assert!(attribution.explain(&features, &OpaqueModel).is_err());
    }
}
