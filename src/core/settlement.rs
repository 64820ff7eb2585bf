//! Settlement price formulas for declined-energy transactions.
//!
//! Each formula only depends on its explicit arguments, so the functions are
//! independently callable. The usual total → declined → holdback ordering is a
//! caller convention, [`Settlement::calculate`] chains all three.
//!
//! Non-finite inputs (NaN and ±∞) fail with an error rather than silently
//! propagating through the floating-point comparisons.

use crate::{
    prelude::*,
    quantity::{factor::ShapingFactor, rate::MegawattHourRate},
};

/// Markup applied to the shaped day-ahead index price.
const INDEX_MARKUP: f64 = 1.10;

/// Discount applied to the total settlement price for declined energy.
const DECLINED_ENERGY_DISCOUNT: f64 = 0.8;

/// Calculate the total settlement price.
///
/// The shaped day-ahead index price is marked up and clamped to `0..=2000` $/MWh.
pub fn total_settlement_price(
    shaping_factor: ShapingFactor,
    day_ahead_index_price: MegawattHourRate,
) -> Result<MegawattHourRate> {
    ensure!(shaping_factor.is_finite(), "invalid shaping factor: {shaping_factor}");
    ensure!(
        day_ahead_index_price.is_finite(),
        "invalid day-ahead index price: {day_ahead_index_price}",
    );
    Ok((shaping_factor * day_ahead_index_price * INDEX_MARKUP)
        .clamp(MegawattHourRate::ZERO, MegawattHourRate::PRICE_CAP))
}

/// Calculate the declined energy settlement price.
///
/// The discounted total is capped by the real-time index price. The result may be
/// negative when the real-time index price is negative.
pub fn declined_energy_settlement_price(
    total_settlement_price: MegawattHourRate,
    real_time_index_price: MegawattHourRate,
) -> Result<MegawattHourRate> {
    ensure!(
        total_settlement_price.is_finite(),
        "invalid total settlement price: {total_settlement_price}",
    );
    ensure!(
        real_time_index_price.is_finite(),
        "invalid real-time index price: {real_time_index_price}",
    );
    Ok((total_settlement_price * DECLINED_ENERGY_DISCOUNT).min(real_time_index_price))
}

/// Calculate the holdback settlement price.
///
/// The residual may be negative when the declined price exceeds the total, which is
/// a valid outcome, not an error.
pub fn holdback_settlement_price(
    total_settlement_price: MegawattHourRate,
    declined_energy_settlement_price: MegawattHourRate,
) -> Result<MegawattHourRate> {
    ensure!(
        total_settlement_price.is_finite(),
        "invalid total settlement price: {total_settlement_price}",
    );
    ensure!(
        declined_energy_settlement_price.is_finite(),
        "invalid declined energy settlement price: {declined_energy_settlement_price}",
    );
    Ok(total_settlement_price - declined_energy_settlement_price)
}

/// Settlement prices for one hour.
#[must_use]
pub struct Settlement {
    pub total: MegawattHourRate,
    pub declined_energy: MegawattHourRate,
    pub holdback: MegawattHourRate,
}

impl Settlement {
    pub fn calculate(
        shaping_factor: ShapingFactor,
        day_ahead_index_price: MegawattHourRate,
        real_time_index_price: MegawattHourRate,
    ) -> Result<Self> {
        let total = total_settlement_price(shaping_factor, day_ahead_index_price)?;
        let declined_energy = declined_energy_settlement_price(total, real_time_index_price)?;
        let holdback = holdback_settlement_price(total, declined_energy)?;
        Ok(Self { total, declined_energy, holdback })
    }
}
