use clap::Parser;

use crate::{
    core::settlement::Settlement,
    prelude::*,
    quantity::{factor::ShapingFactor, rate::MegawattHourRate},
    tables::build_settlement_table,
};

#[derive(Parser)]
pub struct SettleArgs {
    /// Hourly shaping factor.
    #[clap(long = "shaping-factor", allow_negative_numbers = true)]
    pub shaping_factor: ShapingFactor,

    /// Day-ahead applicable index price, in $/MWh.
    #[clap(long = "day-ahead-price", allow_negative_numbers = true)]
    pub day_ahead_index_price: MegawattHourRate,

    /// Real-time applicable index price, in $/MWh.
    #[clap(long = "real-time-price", allow_negative_numbers = true)]
    pub real_time_index_price: MegawattHourRate,
}

impl SettleArgs {
    pub fn run(&self) -> Result {
        let settlement = Settlement::calculate(
            self.shaping_factor,
            self.day_ahead_index_price,
            self.real_time_index_price,
        )?;
        println!("{}", build_settlement_table(&settlement));
        Ok(())
    }
}
