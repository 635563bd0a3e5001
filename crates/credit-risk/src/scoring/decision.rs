use serde::{Deserialize, Serialize};

use super::domain::{LoanDecision, RiskBand};
use super::ports::ScoringError;

/// Probabilities below this ceiling are approved outright.
pub const LOW_RISK_CEILING: f64 = 0.25;
/// Probabilities at or above this threshold are rejected; the safe-amount search targets below it.
pub const REJECTION_THRESHOLD: f64 = 0.50;

/// Band and action derived from one probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskDecision {
    pub band: RiskBand,
    pub decision: LoanDecision,
}

/// Maps a default probability onto the fixed, lower-inclusive policy bands.
pub fn decide(probability: f64) -> Result<RiskDecision, ScoringError> {
    if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
        return Err(ScoringError::ProbabilityOutOfRange { probability });
    }

    let decision = if probability < LOW_RISK_CEILING {
        RiskDecision {
            band: RiskBand::Low,
            decision: LoanDecision::Approve,
        }
    } else if probability < REJECTION_THRESHOLD {
        RiskDecision {
            band: RiskBand::Medium,
            decision: LoanDecision::ReduceLoanAmount,
        }
    } else {
        RiskDecision {
            band: RiskBand::High,
            decision: LoanDecision::Reject,
        }
    };

    Ok(decision)
}
