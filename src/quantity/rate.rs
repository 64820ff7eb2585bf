use std::fmt::{Debug, Display, Formatter};

use ordered_float::OrderedFloat;

use crate::quantity::Quantity;

/// US dollars per megawatt-hour.
pub type MegawattHourRate = Quantity<-1, 1>;

impl MegawattHourRate {
    /// Soft price cap, settlement prices never exceed it.
    pub const PRICE_CAP: Self = Self(OrderedFloat(2000.0));
}

impl Display for MegawattHourRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} $/MWh", self.0)
    }
}

impl Debug for MegawattHourRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}$/MWh", self.0)
    }
}
