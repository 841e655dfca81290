use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::LoanGuardError;
use crate::types::{Money, Rate};
use crate::LoanGuardResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

/// Nominal annual percentage rate converted to a monthly decimal rate.
pub fn monthly_rate(annual_percent: Rate) -> Rate {
    annual_percent / PERCENT / MONTHS_PER_YEAR
}

/// (1 + rate)^periods via iterative multiplication.
///
/// `Decimal::powd` goes through a ln/exp expansion and accumulates visible
/// error over hundreds of periods; repeated multiplication stays exact.
pub fn compound(rate: Rate, periods: u32) -> Decimal {
    let mut acc = Decimal::ONE;
    let base = Decimal::ONE + rate;
    for _ in 0..periods {
        acc *= base;
    }
    acc
}

/// Fixed annuity payment: P * r(1+r)^n / ((1+r)^n - 1).
///
/// The formula is 0/0 at a zero rate, so that case is handled explicitly as
/// straight-line amortisation.
pub fn annuity_payment(
    principal: Money,
    monthly_rate: Rate,
    term_months: u32,
) -> LoanGuardResult<Money> {
    if term_months == 0 {
        return Err(LoanGuardError::DivisionByZero {
            context: "annuity payment over a zero-month term".into(),
        });
    }

    if monthly_rate.is_zero() {
        // Interest-free: straight-line amortisation
        return Ok(principal / Decimal::from(term_months));
    }

    let growth = compound(monthly_rate, term_months);
    let numerator = principal * monthly_rate * growth;
    let denominator = growth - Decimal::ONE;

    if denominator.is_zero() {
        return Err(LoanGuardError::DivisionByZero {
            context: "annuity payment denominator".into(),
        });
    }

    Ok(numerator / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_rate_conversion() {
        // 8.5% nominal annual -> 0.0070833... monthly
        let r = monthly_rate(dec!(8.5));
        assert_eq!(r, dec!(8.5) / dec!(100) / dec!(12));
        assert_eq!(monthly_rate(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_compound_small_periods() {
        assert_eq!(compound(dec!(0.1), 0), dec!(1));
        assert_eq!(compound(dec!(0.1), 1), dec!(1.1));
        assert_eq!(compound(dec!(0.1), 2), dec!(1.21));
    }

    #[test]
    fn test_zero_rate_payment_is_straight_line() {
        let pmt = annuity_payment(dec!(120000), Decimal::ZERO, 120).unwrap();
        assert_eq!(pmt, dec!(1000));
    }

    #[test]
    fn test_standard_mortgage_payment() {
        // 100,000 at 8.5% nominal over 240 months: classic tables give 867.82
        let pmt = annuity_payment(dec!(100000), monthly_rate(dec!(8.5)), 240).unwrap();
        assert_eq!(pmt.round_dp(2), dec!(867.82));
        assert_eq!(pmt.round_dp(0), dec!(868));
    }

    #[test]
    fn test_single_month_term() {
        // One payment repays principal plus one month of interest
        let rate = dec!(0.01);
        let pmt = annuity_payment(dec!(1000), rate, 1).unwrap();
        assert_eq!(pmt, dec!(1010));
    }

    #[test]
    fn test_zero_term_rejected() {
        let err = annuity_payment(dec!(1000), dec!(0.01), 0).unwrap_err();
        assert!(matches!(err, LoanGuardError::DivisionByZero { .. }));
    }
}
