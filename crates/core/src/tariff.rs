use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::{CoreError, CostBreakdown, Result};

pub const BASE_CHARGE: Decimal = dec!(5000);
pub const TIER_ONE_CAP: Decimal = dec!(10);
pub const TIER_TWO_CAP: Decimal = dec!(20);
pub const TIER_ONE_RATE: Decimal = dec!(500);
pub const TIER_TWO_RATE: Decimal = dec!(600);
pub const TIER_THREE_RATE: Decimal = dec!(700);

/// Progressive three-band tariff: the first 10 units bill at 500 per unit,
/// the next 10 at 600, everything above 20 at 700, plus a flat base charge
/// that applies even at zero consumption. Negative consumption is rejected,
/// never clamped.
pub fn compute_cost(consumption: Decimal) -> Result<CostBreakdown> {
    if consumption < Decimal::ZERO {
        return Err(CoreError::NegativeConsumption(consumption));
    }
    let usage_0_to_10 = consumption.min(TIER_ONE_CAP);
    let usage_11_to_20 = (consumption - TIER_ONE_CAP)
        .max(Decimal::ZERO)
        .min(TIER_ONE_CAP);
    let usage_above_20 = (consumption - TIER_TWO_CAP).max(Decimal::ZERO);
    let cost_0_to_10 = usage_0_to_10 * TIER_ONE_RATE;
    let cost_11_to_20 = usage_11_to_20 * TIER_TWO_RATE;
    let cost_above_20 = usage_above_20 * TIER_THREE_RATE;
    Ok(CostBreakdown {
        usage_0_to_10,
        usage_11_to_20,
        usage_above_20,
        base_charge: BASE_CHARGE,
        cost_0_to_10,
        cost_11_to_20,
        cost_above_20,
        total_payment: BASE_CHARGE + cost_0_to_10 + cost_11_to_20 + cost_above_20,
    })
}
