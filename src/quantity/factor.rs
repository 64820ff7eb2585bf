use std::{
    fmt::{Debug, Display, Formatter},
    ops::Mul,
};

use crate::quantity::Quantity;

/// Dimensionless hourly shaping factor.
pub type ShapingFactor = Quantity<0, 0>;

impl Display for ShapingFactor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl Debug for ShapingFactor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

/// Scaling a quantity by a dimensionless factor preserves the dimensions.
impl<const ENERGY: isize, const COST: isize> Mul<Quantity<ENERGY, COST>> for ShapingFactor {
    type Output = Quantity<ENERGY, COST>;

    fn mul(self, rhs: Quantity<ENERGY, COST>) -> Self::Output {
        Quantity(self.0 * rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantity::rate::MegawattHourRate;

    #[test]
    fn test_scale_rate() {
        assert_eq!(
            ShapingFactor::from(2) * MegawattHourRate::from(50),
            MegawattHourRate::from(100),
        );
    }
}
