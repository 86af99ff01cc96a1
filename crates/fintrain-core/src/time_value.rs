use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::FinTrainError;
use crate::types::{Money, Percent, Rate};
use crate::FinTrainResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Convert an annual percentage (6 = 6%) into a monthly periodic rate.
pub fn monthly_rate(annual_percent: Percent) -> Rate {
    annual_percent / dec!(100) / MONTHS_PER_YEAR
}

/// `(1 + rate)^periods`.
///
/// Whole period counts use exact repeated multiplication (`powi`); fractional
/// counts fall back to `powd`.
pub fn compound_factor(rate: Rate, periods: Decimal) -> FinTrainResult<Decimal> {
    let base = Decimal::ONE + rate;
    let factor = if periods.fract().is_zero() {
        periods.to_i64().and_then(|n| base.checked_powi(n))
    } else {
        base.checked_powd(periods)
    };
    checked(factor, &format!("compound factor (1 + {rate})^{periods}"))
}

/// Lift a `checked_*` result into the crate error, naming the computation
/// that overflowed.
pub(crate) fn checked(value: Option<Decimal>, context: &str) -> FinTrainResult<Decimal> {
    value.ok_or_else(|| FinTrainError::Overflow {
        context: context.to_string(),
    })
}

/// Level payment that fully amortises `principal` over `periods` at the
/// periodic `rate`: `P r (1+r)^n / ((1+r)^n - 1)`.
pub fn annuity_payment(principal: Money, rate: Rate, periods: Decimal) -> FinTrainResult<Money> {
    let factor = compound_factor(rate, periods)?;
    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        return Err(FinTrainError::DivisionByZero {
            context: "annuity payment denominator (1+r)^n - 1".into(),
        });
    }
    let numerator = checked(
        principal
            .checked_mul(rate)
            .and_then(|v| v.checked_mul(factor)),
        "annuity payment numerator P r (1+r)^n",
    )?;
    checked(numerator.checked_div(denominator), "annuity payment")
}
