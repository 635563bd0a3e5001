use super::domain::{FeatureName, LoanApplication};
use crate::config::{ScoringConfig, DEFAULT_MAX_LOAN_AMOUNT, DEFAULT_MAX_TENURE_MONTHS};

/// Boundary validation failures; the scoring core only ever sees applications that passed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be a finite number")]
    NonFinite { field: FeatureName },
    #[error("{field} must not be negative (found {value})")]
    Negative { field: FeatureName, value: f64 },
    #[error("loan_amount must be greater than zero (found {0})")]
    NonPositiveLoanAmount(f64),
    #[error("loan_amount {requested} exceeds the maximum of {max}")]
    LoanAmountTooLarge { requested: f64, max: f64 },
    #[error("tenure_months {found} exceeds the maximum of {max}")]
    TenureTooLong { found: u32, max: u32 },
}

/// Upper bounds applied at intake.
#[derive(Debug, Clone, PartialEq)]
pub struct IntakePolicy {
    max_loan_amount: f64,
    max_tenure_months: u32,
}

impl IntakePolicy {
    pub fn new(max_loan_amount: f64, max_tenure_months: u32) -> Self {
        let max_loan_amount = if max_loan_amount.is_finite() && max_loan_amount > 0.0 {
            max_loan_amount
        } else {
            DEFAULT_MAX_LOAN_AMOUNT
        };

        Self {
            max_loan_amount,
            max_tenure_months,
        }
    }

    pub fn max_loan_amount(&self) -> f64 {
        self.max_loan_amount
    }

    pub fn max_tenure_months(&self) -> u32 {
        self.max_tenure_months
    }
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LOAN_AMOUNT, DEFAULT_MAX_TENURE_MONTHS)
    }
}

impl From<&ScoringConfig> for IntakePolicy {
    fn from(config: &ScoringConfig) -> Self {
        Self::new(config.max_loan_amount, config.max_tenure_months)
    }
}

/// Guard run on every inbound application before it reaches the scoring core.
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard {
    policy: IntakePolicy,
}

impl IntakeGuard {
    pub fn with_policy(policy: IntakePolicy) -> Self {
        Self { policy }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::with_policy(IntakePolicy::from(config))
    }

    pub fn policy(&self) -> &IntakePolicy {
        &self.policy
    }

    pub fn validate(&self, application: &LoanApplication) -> Result<(), ValidationError> {
        for (field, value) in [
            (FeatureName::MonthlyRecharge, application.monthly_recharge),
            (FeatureName::LoanAmount, application.loan_amount),
        ] {
            if !value.is_finite() {
                return Err(ValidationError::NonFinite { field });
            }
        }

        if application.monthly_recharge < 0.0 {
            return Err(ValidationError::Negative {
                field: FeatureName::MonthlyRecharge,
                value: application.monthly_recharge,
            });
        }

        if application.loan_amount <= 0.0 {
            return Err(ValidationError::NonPositiveLoanAmount(
                application.loan_amount,
            ));
        }

        if application.loan_amount > self.policy.max_loan_amount {
            return Err(ValidationError::LoanAmountTooLarge {
                requested: application.loan_amount,
                max: self.policy.max_loan_amount,
            });
        }

        if application.tenure_months > self.policy.max_tenure_months {
            return Err(ValidationError::TenureTooLong {
                found: application.tenure_months,
                max: self.policy.max_tenure_months,
            });
        }

        Ok(())
    }
}
