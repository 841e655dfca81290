use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use loanguard_core::simulation::{self, LoanParameters, ScheduleDetail};

use crate::input;

/// Arguments for the overpayment simulation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct SimulateArgs {
    /// Outstanding principal at simulation start
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Nominal annual rate as a percentage (e.g. 8.5 for 8.5%)
    #[arg(long, alias = "rate")]
    pub annual_rate: Option<Decimal>,

    /// Remaining term in months
    #[arg(long)]
    pub term_months: Option<u32>,

    /// Extra amount paid toward principal every month
    #[arg(long)]
    pub overpayment: Option<Decimal>,

    /// Carry every month of the term instead of the yearly sample
    #[arg(long)]
    pub full_schedule: bool,

    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_simulate(args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut params: LoanParameters = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        LoanParameters {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_interest_rate_percent: args
                .annual_rate
                .ok_or("--annual-rate is required (or provide --input)")?,
            term_months: args
                .term_months
                .ok_or("--term-months is required (or provide --input)")?,
            monthly_overpayment: args.overpayment.unwrap_or(dec!(0)),
            schedule_detail: ScheduleDetail::default(),
        }
    };

    if args.full_schedule {
        params.schedule_detail = ScheduleDetail::Full;
    }

    let result = simulation::simulate_overpayment(&params)?;
    Ok(serde_json::to_value(result)?)
}
