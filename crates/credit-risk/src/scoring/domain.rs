use std::fmt;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// Number of model inputs; the order of [`FeatureName::ALL`] is shared with every model artifact.
pub const FEATURE_COUNT: usize = 5;

/// Loan request exactly as received at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    pub tenure_months: u32,
    pub monthly_recharge: f64,
    pub monthly_transactions: u32,
    pub previous_loans: u32,
    pub loan_amount: f64,
}

/// Model input columns in their contractual order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureName {
    TenureMonths,
    MonthlyRecharge,
    MonthlyTransactions,
    PreviousLoans,
    LoanAmount,
}

impl FeatureName {
    pub const ALL: [FeatureName; FEATURE_COUNT] = [
        FeatureName::TenureMonths,
        FeatureName::MonthlyRecharge,
        FeatureName::MonthlyTransactions,
        FeatureName::PreviousLoans,
        FeatureName::LoanAmount,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            FeatureName::TenureMonths => "tenure_months",
            FeatureName::MonthlyRecharge => "monthly_recharge",
            FeatureName::MonthlyTransactions => "monthly_transactions",
            FeatureName::PreviousLoans => "previous_loans",
            FeatureName::LoanAmount => "loan_amount",
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered model input extracted from a [`LoanApplication`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn from_application(application: &LoanApplication) -> Self {
        Self([
            f64::from(application.tenure_months),
            application.monthly_recharge,
            f64::from(application.monthly_transactions),
            f64::from(application.previous_loans),
            application.loan_amount,
        ])
    }

    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    pub fn get(&self, feature: FeatureName) -> f64 {
        self.0[feature.index()]
    }

    pub fn loan_amount(&self) -> f64 {
        self.get(FeatureName::LoanAmount)
    }

    /// Candidate vector for the amount search; every other feature is preserved.
    pub fn with_loan_amount(&self, loan_amount: f64) -> Self {
        let mut values = self.0;
        values[FeatureName::LoanAmount.index()] = loan_amount;
        Self(values)
    }
}

/// Qualitative default-risk tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl RiskBand {
    pub const fn label(self) -> &'static str {
        match self {
            RiskBand::Low => "LOW",
            RiskBand::Medium => "MEDIUM",
            RiskBand::High => "HIGH",
        }
    }
}

/// Lending action paired with a [`RiskBand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanDecision {
    Approve,
    ReduceLoanAmount,
    Reject,
}

impl LoanDecision {
    pub const fn label(self) -> &'static str {
        match self {
            LoanDecision::Approve => "APPROVE",
            LoanDecision::ReduceLoanAmount => "REDUCE_LOAN_AMOUNT",
            LoanDecision::Reject => "REJECT",
        }
    }
}

/// Per-feature attribution for one assessment.
///
/// Serializes as `{feature_name: value}` in feature order when available and as
/// `{"status": "unavailable", "reason": ...}` otherwise, so clients can tell a zero
/// contribution apart from one that could not be computed.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureImpact {
    Available([f64; FEATURE_COUNT]),
    Unavailable { reason: String },
}

impl FeatureImpact {
    pub fn get(&self, feature: FeatureName) -> Option<f64> {
        match self {
            FeatureImpact::Available(values) => Some(values[feature.index()]),
            FeatureImpact::Unavailable { .. } => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, FeatureImpact::Available(_))
    }

    pub fn entries(&self) -> Vec<(FeatureName, f64)> {
        match self {
            FeatureImpact::Available(values) => FeatureName::ALL
                .into_iter()
                .zip(values.iter().copied())
                .collect(),
            FeatureImpact::Unavailable { .. } => Vec::new(),
        }
    }
}

impl Serialize for FeatureImpact {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FeatureImpact::Available(values) => {
                let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
                for (feature, value) in FeatureName::ALL.iter().zip(values.iter()) {
                    map.serialize_entry(feature.as_str(), value)?;
                }
                map.end()
            }
            FeatureImpact::Unavailable { reason } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("status", "unavailable")?;
                map.serialize_entry("reason", reason)?;
                map.end()
            }
        }
    }
}

/// Decision record returned for every scored application.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub default_probability: f64,
    pub risk_band: RiskBand,
    pub decision: LoanDecision,
    pub recommended_loan_amount: Option<f64>,
    pub feature_impact: FeatureImpact,
}

impl RiskAssessment {
    pub fn summary(&self) -> String {
        match (self.decision, self.recommended_loan_amount) {
            (LoanDecision::Approve, _) => format!(
                "approve ({} risk, p={:.4})",
                self.risk_band.label(),
                self.default_probability
            ),
            (decision, Some(amount)) => format!(
                "{} ({} risk, p={:.4}); safe amount {:.2}",
                decision.label().to_ascii_lowercase(),
                self.risk_band.label(),
                self.default_probability,
                amount
            ),
            (decision, None) => format!(
                "{} ({} risk, p={:.4}); no safe amount found",
                decision.label().to_ascii_lowercase(),
                self.risk_band.label(),
                self.default_probability
            ),
        }
    }
}

pub(crate) fn round_places(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}
