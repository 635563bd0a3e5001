use crate::infra::{build_service, load_model};
use clap::Args;
use credit_risk::config::AppConfig;
use credit_risk::error::AppError;
use credit_risk::scoring::{
    read_labelled_samples, AnalyticsError, CreditServiceError, LoanApplication, ModelMetrics,
};
use std::fs::File;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Months the subscriber has been active on the network
    #[arg(long)]
    pub(crate) tenure_months: u32,
    /// Average monthly airtime recharge
    #[arg(long)]
    pub(crate) monthly_recharge: f64,
    /// Mobile money transactions per month
    #[arg(long)]
    pub(crate) monthly_transactions: u32,
    /// Loans taken before this request
    #[arg(long)]
    pub(crate) previous_loans: u32,
    /// Requested principal
    #[arg(long)]
    pub(crate) loan_amount: f64,
    /// Score with this model artifact instead of the configured one
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// CSV file with the five feature columns and a 0/1 `loan_default` column
    #[arg(long)]
    pub(crate) dataset: PathBuf,
    /// Write the metrics snapshot here instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Evaluate this model artifact instead of the configured one
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
}

impl AssessArgs {
    fn application(&self) -> LoanApplication {
        LoanApplication {
            tenure_months: self.tenure_months,
            monthly_recharge: self.monthly_recharge,
            monthly_transactions: self.monthly_transactions,
            previous_loans: self.previous_loans,
            loan_amount: self.loan_amount,
        }
    }
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(path) = args.model.clone() {
        config.scoring.model_path = Some(path);
    }

    let service = build_service(&config.scoring)?;
    let assessment = service.assess(&args.application())?;

    println!("{}", to_pretty_json(&assessment)?);
    eprintln!("{}", assessment.summary());
    Ok(())
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(path) = args.model {
        config.scoring.model_path = Some(path);
    }

    let model = load_model(&config.scoring)?;
    let dataset = File::open(&args.dataset)?;
    let samples = read_labelled_samples(dataset)?;
    let metrics = ModelMetrics::evaluate(&model, &samples).map_err(CreditServiceError::from)?;
    let rendered = to_pretty_json(&metrics)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, rendered)?;
            eprintln!(
                "wrote metrics for {} samples to {}",
                samples.len(),
                path.display()
            );
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|err| AppError::from(AnalyticsError::from(err)))
}
