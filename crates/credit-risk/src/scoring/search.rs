use tracing::debug;

use super::decision::REJECTION_THRESHOLD;
use super::domain::{round_places, FeatureVector, LoanApplication};
use super::ports::{predict_checked, RiskModel, ScoringError};

/// Fractions of the requested amount probed, largest first.
///
/// This is a bounded probe, not a bisection: it costs at most four model calls and may step
/// over a qualifying amount that lies between two factors.
pub const REDUCTION_FACTORS: [f64; 4] = [0.8, 0.6, 0.5, 0.4];

/// Finds the least-reduced amount the model scores below [`REJECTION_THRESHOLD`].
///
/// Returns `Ok(None)` when none of the [`REDUCTION_FACTORS`] clears the threshold. Assumes the
/// model's risk falls as the amount falls but does not check it.
pub fn find_safe_amount(
    application: &LoanApplication,
    model: &dyn RiskModel,
) -> Result<Option<f64>, ScoringError> {
    let original = application.loan_amount;
    if !(original.is_finite() && original > 0.0) {
        return Err(ScoringError::NonPositiveLoanAmount { amount: original });
    }

    let base = FeatureVector::from_application(application);

    for factor in REDUCTION_FACTORS {
        let candidate_amount = original * factor;
        let recommended = round_places(candidate_amount, 2);
        // Cent rounding can collapse tiny requests onto the original amount or zero.
        if recommended <= 0.0 || recommended >= original {
            debug!(factor, candidate_amount, "skipping candidate lost to rounding");
            continue;
        }

        let candidate = base.with_loan_amount(candidate_amount);
        let probability = predict_checked(model, &candidate)?;
        debug!(factor, candidate_amount, probability, "probed reduced loan amount");

        if probability < REJECTION_THRESHOLD {
            return Ok(Some(recommended));
        }
    }

    Ok(None)
}
