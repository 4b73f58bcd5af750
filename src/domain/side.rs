use std::fmt;

/// Which half of the dashboard a signal, condition row or card belongs to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, strum_macros::EnumIter)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Stable id segment used to compose widget identifiers (`buy-rsi-condition` etc.)
    pub fn slug(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }

    /// Uppercase Spanish label used in recommendation titles.
    pub fn label(&self) -> &'static str {
        match self {
            Side::Buy => "COMPRA",
            Side::Sell => "VENTA",
        }
    }

    pub fn is_buy(&self) -> bool {
        matches!(self, Side::Buy)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}
