//! Read-only model analytics consumed by dashboards: classification metrics on labelled data and
//! the model's feature-importance ranking.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::decision::REJECTION_THRESHOLD;
use super::domain::{FeatureVector, LoanApplication};
use super::ports::{predict_checked, FeatureImportance, ModelHandle, ScoringError};

/// One labelled historical outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelledSample {
    pub application: LoanApplication,
    pub defaulted: bool,
}

/// Counts of predicted vs. observed defaults; "positive" means default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_positive: u64,
    pub false_positive: u64,
    pub true_negative: u64,
    pub false_negative: u64,
}

impl ConfusionMatrix {
    pub fn record(&mut self, predicted_default: bool, defaulted: bool) {
        match (predicted_default, defaulted) {
            (true, true) => self.true_positive += 1,
            (true, false) => self.false_positive += 1,
            (false, false) => self.true_negative += 1,
            (false, true) => self.false_negative += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.true_positive + self.false_positive + self.true_negative + self.false_negative
    }
}

/// Layout shared with `model_metrics.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confusion_matrix: Option<ConfusionMatrix>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_importance: Option<Vec<FeatureImportance>>,
}

impl ModelMetrics {
    /// Derives the headline ratios; empty denominators yield 0.0.
    pub fn from_confusion(matrix: ConfusionMatrix) -> Self {
        let accuracy = ratio(matrix.true_positive + matrix.true_negative, matrix.total());
        let precision = ratio(
            matrix.true_positive,
            matrix.true_positive + matrix.false_positive,
        );
        let recall = ratio(
            matrix.true_positive,
            matrix.true_positive + matrix.false_negative,
        );
        let f1_score = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        Self {
            accuracy,
            precision,
            recall,
            f1_score,
            confusion_matrix: Some(matrix),
            feature_importance: None,
        }
    }

    /// Scores every sample; a prediction at or above the rejection threshold counts as default.
    pub fn evaluate(model: &ModelHandle, samples: &[LabelledSample]) -> Result<Self, ScoringError> {
        let mut matrix = ConfusionMatrix::default();
        for sample in samples {
            let features = FeatureVector::from_application(&sample.application);
            let probability = predict_checked(model.model(), &features)?;
            matrix.record(probability >= REJECTION_THRESHOLD, sample.defaulted);
        }

        let mut metrics = Self::from_confusion(matrix);
        metrics.feature_importance = model.capability().ranking();
        Ok(metrics)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, AnalyticsError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| AnalyticsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[derive(Debug, Deserialize)]
struct DatasetRow {
    tenure_months: u32,
    monthly_recharge: f64,
    monthly_transactions: u32,
    previous_loans: u32,
    loan_amount: f64,
    loan_default: u8,
}

/// Reads a CSV with the five feature columns and a 0/1 `loan_default` label.
pub fn read_labelled_samples<R: Read>(reader: R) -> Result<Vec<LabelledSample>, AnalyticsError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut samples = Vec::new();

    for (index, row) in csv_reader.deserialize::<DatasetRow>().enumerate() {
        let row = row?;
        let defaulted = match row.loan_default {
            0 => false,
            1 => true,
            other => {
                return Err(AnalyticsError::InvalidLabel {
                    row: index + 1,
                    value: other,
                })
            }
        };

        samples.push(LabelledSample {
            application: LoanApplication {
                tenure_months: row.tenure_months,
                monthly_recharge: row.monthly_recharge,
                monthly_transactions: row.monthly_transactions,
                previous_loans: row.previous_loans,
                loan_amount: row.loan_amount,
            },
            defaulted,
        });
    }

    Ok(samples)
}

/// Errors raised while reading datasets or analytics snapshots.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("unable to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed dataset: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed metrics snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("row {row}: loan_default must be 0 or 1 (found {value})")]
    InvalidLabel { row: usize, value: u8 },
}
