//! Exchange strike-interval tables.

use std::fmt;

use super::MoneynessError;

/// Option product family, each with its own listed-strike interval table.
///
/// The strike interval depends on the underlying's price tier: a price at
/// or below `breakpoints[i]` uses `ticks[i]`, anything above the last
/// breakpoint uses the final tick.
///
/// # Examples
/// ```
/// use pricer_models::moneyness::UnderlyingClass;
///
/// let class = UnderlyingClass::from_underlying_id("510050.XSHG").unwrap();
/// assert_eq!(class, UnderlyingClass::EquityEtf);
/// assert_eq!(class.tick_size(2.53), 0.05);
/// assert_eq!(class.tick_size(3.0), 0.05);
/// assert_eq!(class.tick_size(3.01), 0.1);
///
/// assert_eq!(UnderlyingClass::from_underlying_id("SR2109").unwrap(), UnderlyingClass::Sugar);
/// assert!(UnderlyingClass::from_underlying_id("XYZ").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UnderlyingClass {
    /// SSE 50 ETF options (`510050.XSHG`)
    EquityEtf,
    /// White sugar futures options (`SR`)
    Sugar,
    /// Soybean meal futures options (`M`)
    SoybeanMeal,
    /// Copper futures options (`CU`)
    Copper,
    /// Natural rubber futures options (`RU`)
    Rubber,
    /// Cotton futures options (`CF`)
    Cotton,
    /// Corn futures options (`C`)
    Corn,
}

const ETF_ID: &str = "510050.XSHG";

// Substring codes in match order; "CU" and "CF" precede "C".
const PRODUCT_CODES: [(&str, UnderlyingClass); 6] = [
    ("SR", UnderlyingClass::Sugar),
    ("M", UnderlyingClass::SoybeanMeal),
    ("CU", UnderlyingClass::Copper),
    ("RU", UnderlyingClass::Rubber),
    ("CF", UnderlyingClass::Cotton),
    ("C", UnderlyingClass::Corn),
];

impl UnderlyingClass {
    /// Resolves the product family from an underlying id.
    ///
    /// The ETF is matched exactly; futures by product-code substring.
    ///
    /// # Errors
    /// `MoneynessError::UnsupportedInstrumentClass` when nothing matches.
    pub fn from_underlying_id(underlying_id: &str) -> Result<Self, MoneynessError> {
        if underlying_id == ETF_ID {
            return Ok(UnderlyingClass::EquityEtf);
        }
        PRODUCT_CODES
            .iter()
            .find(|(code, _)| underlying_id.contains(code))
            .map(|&(_, class)| class)
            .ok_or_else(|| MoneynessError::UnsupportedInstrumentClass(underlying_id.to_string()))
    }

    fn breakpoints(&self) -> &'static [f64] {
        match self {
            UnderlyingClass::EquityEtf => &[3.0, 5.0, 10.0, 20.0, 50.0, 100.0],
            UnderlyingClass::Sugar => &[3000.0, 10000.0],
            UnderlyingClass::SoybeanMeal => &[2000.0, 5000.0],
            UnderlyingClass::Copper => &[40000.0, 80000.0],
            UnderlyingClass::Rubber => &[10000.0, 25000.0],
            UnderlyingClass::Cotton => &[10000.0, 20000.0],
            UnderlyingClass::Corn => &[1000.0, 3000.0],
        }
    }

    fn ticks(&self) -> &'static [f64] {
        match self {
            UnderlyingClass::EquityEtf => &[0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0],
            UnderlyingClass::Sugar => &[50.0, 100.0, 200.0],
            UnderlyingClass::SoybeanMeal => &[20.0, 50.0, 100.0],
            UnderlyingClass::Copper => &[500.0, 1000.0, 2000.0],
            UnderlyingClass::Rubber => &[100.0, 250.0, 500.0],
            UnderlyingClass::Cotton => &[100.0, 200.0, 400.0],
            UnderlyingClass::Corn => &[10.0, 20.0, 40.0],
        }
    }

    /// Decimal places kept on the rounded ATM strike.
    pub fn precision(&self) -> i32 {
        match self {
            UnderlyingClass::EquityEtf => 3,
            _ => 0,
        }
    }

    /// Listed-strike interval at `price`.
    pub fn tick_size(&self, price: f64) -> f64 {
        let ticks = self.ticks();
        let tier = self.breakpoints().partition_point(|&b| b < price);
        ticks[tier.min(ticks.len() - 1)]
    }

    /// Rounds `price` to the nearest strike interval, ties to even.
    ///
    /// ```
    /// use pricer_models::moneyness::UnderlyingClass;
    ///
    /// assert_eq!(UnderlyingClass::EquityEtf.round_to_tick(2.53), 2.55);
    /// assert_eq!(UnderlyingClass::Sugar.round_to_tick(5630.0), 5600.0);
    /// // 5650 / 100 = 56.5 rounds to the even multiple 56
    /// assert_eq!(UnderlyingClass::Sugar.round_to_tick(5650.0), 5600.0);
    /// ```
    pub fn round_to_tick(&self, price: f64) -> f64 {
        let tick = self.tick_size(price);
        let snapped = (price / tick).round_ties_even() * tick;
        let scale = 10f64.powi(self.precision());
        (snapped * scale).round_ties_even() / scale
    }
}

impl fmt::Display for UnderlyingClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnderlyingClass::EquityEtf => "EquityEtf",
            UnderlyingClass::Sugar => "Sugar",
            UnderlyingClass::SoybeanMeal => "SoybeanMeal",
            UnderlyingClass::Copper => "Copper",
            UnderlyingClass::Rubber => "Rubber",
            UnderlyingClass::Cotton => "Cotton",
            UnderlyingClass::Corn => "Corn",
        };
        f.write_str(name)
    }
}
