//! Vanilla call/put terminal payoff over a log-moneyness axis.

use std::fmt;
use std::str::FromStr;

use bsfd_core::{ensure, Error, Price, Real, Result};

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionType {
    /// A call option (right to buy).
    Call,
    /// A put option (right to sell).
    Put,
}

impl OptionType {
    /// +1 for Call, −1 for Put.
    pub fn sign(self) -> Real {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = Error;

    /// Parses `"call"` / `"put"`, ignoring ASCII case. Anything else is an
    /// [`Error::UnsupportedPayoff`].
    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("call") {
            Ok(OptionType::Call)
        } else if s.eq_ignore_ascii_case("put") {
            Ok(OptionType::Put)
        } else {
            Err(Error::UnsupportedPayoff(s.to_string()))
        }
    }
}

/// Plain vanilla payoff `max(φ(S − K), 0)`, `φ = +1` for calls and `−1` for puts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VanillaPayoff {
    option_type: OptionType,
    strike: Price,
}

impl VanillaPayoff {
    /// Create a payoff; the strike must be positive and finite.
    pub fn new(option_type: OptionType, strike: Price) -> Result<Self> {
        ensure!(
            strike > 0.0 && strike.is_finite(),
            "strike must be positive, got {strike}"
        );
        Ok(Self {
            option_type,
            strike,
        })
    }

    /// Create a payoff from a type name such as `"call"` or `"put"`.
    pub fn parse(strike: Price, option_type: &str) -> Result<Self> {
        Self::new(option_type.parse()?, strike)
    }

    /// The option type.
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// The strike.
    pub fn strike(&self) -> Price {
        self.strike
    }

    /// Same payoff with another strike.
    pub fn with_strike(self, strike: Price) -> Result<Self> {
        Self::new(self.option_type, strike)
    }

    /// Same strike with another option type.
    pub fn with_option_type(self, option_type: OptionType) -> Self {
        Self {
            option_type,
            ..self
        }
    }

    /// Intrinsic value at underlying price `price`.
    #[inline]
    pub fn value(&self, price: Price) -> Price {
        (self.option_type.sign() * (price - self.strike)).max(0.0)
    }

    /// Intrinsic values at `spot · e^{x_i}` for every offset.
    pub fn evaluate(&self, spot: Price, offsets: &[Real]) -> Vec<Price> {
        offsets.iter().map(|&x| self.value(spot * x.exp())).collect()
    }
}

impl fmt::Display for VanillaPayoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.option_type, self.strike)
    }
}
