use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::annuity::{annuity_payment, monthly_rate};
use crate::error::LoanGuardError;
use crate::types::*;
use crate::LoanGuardResult;

const HIGH_RATE_WARNING_PCT: Decimal = dec!(30);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Which months of the projection are carried in the summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScheduleDetail {
    /// Month 1 plus every twelfth month. Enough for yearly charting.
    #[default]
    Sampled,
    /// Every month of the scheduled term.
    Full,
}

/// Input for an overpayment simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanParameters {
    /// Outstanding balance at simulation start
    pub principal: Money,
    /// Nominal annual rate as a percentage (8.5 means 8.5%)
    pub annual_interest_rate_percent: Rate,
    /// Scheduled months remaining under the standard plan
    pub term_months: u32,
    /// Extra amount applied to principal every month in the overpayment plan
    pub monthly_overpayment: Money,
    #[serde(default)]
    pub schedule_detail: ScheduleDetail,
}

/// Remaining balances under both plans for one recorded month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub month_index: u32,
    pub standard_balance: Money,
    pub overpaid_balance: Money,
}

/// Savings metrics derived from the two repayment trajectories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSummary {
    pub standard_monthly_payment: Money,
    pub interest_saved_total: Money,
    pub months_saved: u32,
    pub schedule: Vec<ScheduleEntry>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Project a loan month by month under the standard annuity plan and under a
/// fixed-monthly-overpayment plan, and derive the savings between the two.
///
/// Both trajectories run on the same fixed payment. The overpayment plan adds
/// `monthly_overpayment` to each month's principal portion and freezes the
/// moment its balance reaches zero; from then on it accrues no interest.
/// `interest_saved_total` is rounded to whole currency units; balances and the
/// payment itself are reported at full decimal precision.
pub fn simulate_overpayment(
    input: &LoanParameters,
) -> LoanGuardResult<ComputationOutput<SimulationSummary>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let rate = monthly_rate(input.annual_interest_rate_percent);
    let payment = annuity_payment(input.principal, rate, input.term_months)?;

    if input.monthly_overpayment >= payment {
        warnings.push("Monthly overpayment equals or exceeds the standard monthly payment".into());
    }
    if input.annual_interest_rate_percent > HIGH_RATE_WARNING_PCT {
        warnings.push(format!(
            "Annual rate {}% is unusually high for consumer credit",
            input.annual_interest_rate_percent
        ));
    }

    let mut standard_balance = input.principal;
    let mut overpaid_balance = input.principal;
    let mut interest_standard = Decimal::ZERO;
    let mut interest_overpaid = Decimal::ZERO;
    let mut months_saved = 0u32;
    let mut overpaid_done = false;

    let capacity = match input.schedule_detail {
        ScheduleDetail::Sampled => (input.term_months / 12 + 1) as usize,
        ScheduleDetail::Full => input.term_months as usize,
    };
    let mut schedule: Vec<ScheduleEntry> = Vec::with_capacity(capacity);

    for month in 1..=input.term_months {
        // Standard path
        let interest = standard_balance * rate;
        interest_standard += interest;
        if month == input.term_months {
            // Final scheduled month clears the remaining balance
            standard_balance = Decimal::ZERO;
        } else {
            let principal_portion = payment - interest;
            standard_balance = (standard_balance - principal_portion).max(Decimal::ZERO);
        }

        // Overpayment path, frozen once repaid
        if !overpaid_done {
            let interest_over = overpaid_balance * rate;
            interest_overpaid += interest_over;
            if month == input.term_months {
                overpaid_balance = Decimal::ZERO;
            } else {
                let principal_portion = (payment - interest_over) + input.monthly_overpayment;
                overpaid_balance = (overpaid_balance - principal_portion).max(Decimal::ZERO);
            }
            if overpaid_balance.is_zero() {
                overpaid_done = true;
                months_saved = input.term_months - month;
            }
        }

        let record = match input.schedule_detail {
            ScheduleDetail::Sampled => month == 1 || month % 12 == 0,
            ScheduleDetail::Full => true,
        };
        if record {
            schedule.push(ScheduleEntry {
                month_index: month,
                standard_balance,
                overpaid_balance,
            });
        }
    }

    let interest_saved_total = (interest_standard - interest_overpaid).round_dp(0);

    let summary = SimulationSummary {
        standard_monthly_payment: payment,
        interest_saved_total,
        months_saved,
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Overpayment Amortization Projection",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "annual_rate_pct": input.annual_interest_rate_percent.to_string(),
            "term_months": input.term_months,
            "monthly_overpayment": input.monthly_overpayment.to_string(),
            "schedule_detail": match input.schedule_detail {
                ScheduleDetail::Sampled => "month 1 + every 12th month",
                ScheduleDetail::Full => "every month",
            },
        }),
        warnings,
        elapsed,
        summary,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &LoanParameters) -> LoanGuardResult<()> {
    if input.principal <= Decimal::ZERO {
        return Err(LoanGuardError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }

    if input.term_months == 0 {
        return Err(LoanGuardError::InvalidInput {
            field: "term_months".into(),
            reason: "Term must be at least 1 month".into(),
        });
    }

    if input.annual_interest_rate_percent < Decimal::ZERO {
        return Err(LoanGuardError::InvalidInput {
            field: "annual_interest_rate_percent".into(),
            reason: "Annual rate must not be negative".into(),
        });
    }

    if input.monthly_overpayment < Decimal::ZERO {
        return Err(LoanGuardError::InvalidInput {
            field: "monthly_overpayment".into(),
            reason: "Monthly overpayment must not be negative".into(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> LoanParameters {
        LoanParameters {
            principal: dec!(100000),
            annual_interest_rate_percent: dec!(8.5),
            term_months: 240,
            monthly_overpayment: dec!(500),
            schedule_detail: ScheduleDetail::Sampled,
        }
    }

    #[test]
    fn test_reference_scenario() {
        // 100,000 at 8.5% over 240 months with 500/month extra.
        // Annuity tables: standard payment 867.82; the overpaid path
        // clears during month 104, i.e. 136 months early.
        let out = simulate_overpayment(&sample_input()).unwrap();
        let summary = &out.result;

        assert_eq!(summary.standard_monthly_payment.round_dp(0), dec!(868));
        assert_eq!(summary.standard_monthly_payment.round_dp(2), dec!(867.82));
        assert_eq!(summary.months_saved, 136);
        assert!(summary.interest_saved_total > dec!(60000));
        assert!(summary.interest_saved_total < dec!(70000));
    }

    #[test]
    fn test_overpaid_path_clears_early() {
        let mut input = sample_input();
        input.schedule_detail = ScheduleDetail::Full;
        let out = simulate_overpayment(&input).unwrap();
        let schedule = &out.result.schedule;

        assert_eq!(schedule.len(), 240);

        let first_zero = schedule
            .iter()
            .find(|e| e.overpaid_balance.is_zero())
            .map(|e| e.month_index)
            .unwrap();
        assert_eq!(first_zero, 104);
        assert!(first_zero < 240);

        // Frozen at zero afterwards
        for entry in schedule.iter().filter(|e| e.month_index >= first_zero) {
            assert_eq!(entry.overpaid_balance, Decimal::ZERO);
        }

        // Standard plan runs the full clock and ends at exactly zero
        assert!(schedule[238].standard_balance > Decimal::ZERO);
        assert_eq!(schedule[239].standard_balance, Decimal::ZERO);
    }

    #[test]
    fn test_balances_non_increasing() {
        let mut input = sample_input();
        input.schedule_detail = ScheduleDetail::Full;
        let out = simulate_overpayment(&input).unwrap();
        let schedule = &out.result.schedule;

        for pair in schedule.windows(2) {
            assert!(pair[1].standard_balance <= pair[0].standard_balance);
            assert!(pair[1].overpaid_balance <= pair[0].overpaid_balance);
            // Overpaying never leaves a larger balance than the standard plan
            assert!(pair[1].overpaid_balance <= pair[1].standard_balance);
        }
    }

    #[test]
    fn test_zero_overpayment_is_identity() {
        let mut input = sample_input();
        input.monthly_overpayment = Decimal::ZERO;
        input.schedule_detail = ScheduleDetail::Full;
        let out = simulate_overpayment(&input).unwrap();
        let summary = &out.result;

        assert_eq!(summary.interest_saved_total, Decimal::ZERO);
        assert_eq!(summary.months_saved, 0);
        for entry in &summary.schedule {
            assert_eq!(entry.overpaid_balance, entry.standard_balance);
        }
    }

    #[test]
    fn test_zero_rate_straight_line() {
        // Interest-free 120,000 over 120 months: payment is exactly 1000 and
        // the balance steps down by 1000 a month.
        let input = LoanParameters {
            principal: dec!(120000),
            annual_interest_rate_percent: Decimal::ZERO,
            term_months: 120,
            monthly_overpayment: Decimal::ZERO,
            schedule_detail: ScheduleDetail::Sampled,
        };
        let out = simulate_overpayment(&input).unwrap();
        let summary = &out.result;

        assert_eq!(summary.standard_monthly_payment, dec!(1000));
        assert_eq!(summary.interest_saved_total, Decimal::ZERO);
        assert_eq!(summary.months_saved, 0);

        let at_month_60 = summary
            .schedule
            .iter()
            .find(|e| e.month_index == 60)
            .unwrap();
        assert_eq!(at_month_60.standard_balance, dec!(60000));
    }

    #[test]
    fn test_zero_rate_with_overpayment() {
        // 12,000 interest-free over 12 months, 1000/month extra: each month
        // repays 2000, so the balance clears during month 6.
        let input = LoanParameters {
            principal: dec!(12000),
            annual_interest_rate_percent: Decimal::ZERO,
            term_months: 12,
            monthly_overpayment: dec!(1000),
            schedule_detail: ScheduleDetail::Full,
        };
        let out = simulate_overpayment(&input).unwrap();
        let summary = &out.result;

        assert_eq!(summary.standard_monthly_payment, dec!(1000));
        assert_eq!(summary.months_saved, 6);
        // No interest anywhere, so nothing is saved
        assert_eq!(summary.interest_saved_total, Decimal::ZERO);
        assert_eq!(summary.schedule[5].overpaid_balance, Decimal::ZERO);
        assert_eq!(summary.schedule[4].overpaid_balance, dec!(2000));
    }

    #[test]
    fn test_sampling_policy() {
        let mut input = sample_input();
        input.term_months = 25;
        let out = simulate_overpayment(&input).unwrap();
        let months: Vec<u32> = out.result.schedule.iter().map(|e| e.month_index).collect();
        assert_eq!(months, vec![1, 12, 24]);
    }

    #[test]
    fn test_full_detail_has_every_month() {
        let mut input = sample_input();
        input.term_months = 25;
        input.schedule_detail = ScheduleDetail::Full;
        let out = simulate_overpayment(&input).unwrap();
        let months: Vec<u32> = out.result.schedule.iter().map(|e| e.month_index).collect();
        assert_eq!(months, (1..=25).collect::<Vec<u32>>());
    }

    #[test]
    fn test_idempotent() {
        let input = sample_input();
        let first = simulate_overpayment(&input).unwrap();
        let second = simulate_overpayment(&input).unwrap();
        assert_eq!(first.result, second.result);
    }

    #[test]
    fn test_monotone_in_overpayment() {
        let mut previous_saved = Decimal::ZERO;
        let mut previous_months = 0u32;
        for overpayment in [dec!(0), dec!(100), dec!(250), dec!(500), dec!(1500)] {
            let mut input = sample_input();
            input.monthly_overpayment = overpayment;
            let summary = simulate_overpayment(&input).unwrap().result;
            assert!(summary.interest_saved_total >= previous_saved);
            assert!(summary.months_saved >= previous_months);
            previous_saved = summary.interest_saved_total;
            previous_months = summary.months_saved;
        }
    }

    #[test]
    fn test_months_saved_bounds() {
        let out = simulate_overpayment(&sample_input()).unwrap();
        let summary = &out.result;
        assert!(summary.months_saved >= 1);
        assert!(summary.months_saved <= 239);
    }

    #[test]
    fn test_rejects_zero_principal() {
        let mut input = sample_input();
        input.principal = Decimal::ZERO;
        let err = simulate_overpayment(&input).unwrap_err();
        match err {
            LoanGuardError::InvalidInput { field, .. } => assert_eq!(field, "principal"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_zero_term() {
        let mut input = sample_input();
        input.term_months = 0;
        let err = simulate_overpayment(&input).unwrap_err();
        match err {
            LoanGuardError::InvalidInput { field, .. } => assert_eq!(field, "term_months"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_negative_rate() {
        let mut input = sample_input();
        input.annual_interest_rate_percent = dec!(-0.5);
        let err = simulate_overpayment(&input).unwrap_err();
        match err {
            LoanGuardError::InvalidInput { field, .. } => {
                assert_eq!(field, "annual_interest_rate_percent")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_negative_overpayment() {
        let mut input = sample_input();
        input.monthly_overpayment = dec!(-1);
        let err = simulate_overpayment(&input).unwrap_err();
        match err {
            LoanGuardError::InvalidInput { field, .. } => {
                assert_eq!(field, "monthly_overpayment")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_warning_on_oversized_overpayment() {
        let mut input = sample_input();
        input.monthly_overpayment = dec!(900);
        let out = simulate_overpayment(&input).unwrap();
        assert!(out
            .warnings
            .iter()
            .any(|w| w.contains("equals or exceeds the standard monthly payment")));
    }

    #[test]
    fn test_single_month_term() {
        let input = LoanParameters {
            principal: dec!(1000),
            annual_interest_rate_percent: dec!(12),
            term_months: 1,
            monthly_overpayment: dec!(50),
            schedule_detail: ScheduleDetail::Full,
        };
        let out = simulate_overpayment(&input).unwrap();
        let summary = &out.result;

        // Single payment of principal plus one month at 1%
        assert_eq!(summary.standard_monthly_payment, dec!(1010));
        assert_eq!(summary.months_saved, 0);
        assert_eq!(summary.schedule.len(), 1);
        assert_eq!(summary.schedule[0].standard_balance, Decimal::ZERO);
        assert_eq!(summary.schedule[0].overpaid_balance, Decimal::ZERO);
    }

    #[test]
    fn test_wire_shape_round_trip() {
        let json = r#"{
            "principal": 100000,
            "annualInterestRatePercent": 8.5,
            "termMonths": 240,
            "monthlyOverpayment": 500
        }"#;
        let input: LoanParameters = serde_json::from_str(json).unwrap();
        assert_eq!(input.schedule_detail, ScheduleDetail::Sampled);

        let out = simulate_overpayment(&input).unwrap();
        let value = serde_json::to_value(&out.result).unwrap();
        assert!(value.get("standardMonthlyPayment").is_some());
        assert!(value.get("interestSavedTotal").is_some());
        assert!(value.get("monthsSaved").is_some());
        let first = &value["schedule"][0];
        assert!(first.get("monthIndex").is_some());
        assert!(first.get("standardBalance").is_some());
        assert!(first.get("overpaidBalance").is_some());
    }
}
