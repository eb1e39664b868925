use std::{
    fmt,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

/// Signed money amount represented as **integer paise**.
///
/// Use this type for all monetary values that reach an aggregate (contract
/// values, wallet balances, ledger rows) to avoid floating-point drift.
///
/// The value is signed:
/// - positive = credit / increase
/// - negative = debit / decrease
///
/// # Examples
///
/// ```rust
/// use listview::Money;
///
/// let amount = Money::new(12_34);
/// assert_eq!(amount.paise(), 1234);
/// assert_eq!(amount.to_string(), "₹12.34");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer paise.
    #[must_use]
    pub const fn new(paise: i64) -> Self {
        Self(paise)
    }

    /// Converts a raw rupee amount from a JSON payload.
    ///
    /// The admin API serves amounts as floats and sometimes omits them.
    /// Anything non-finite or outside the representable range becomes zero
    /// so a single corrupt row cannot poison a running sum.
    #[must_use]
    pub fn from_rupees(value: f64) -> Self {
        if !value.is_finite() {
            return Self::ZERO;
        }
        let paise = (value * 100.0).round();
        if paise < i64::MIN as f64 || paise > i64::MAX as f64 {
            return Self::ZERO;
        }
        Self(paise as i64)
    }

    /// Returns the raw value in paise.
    #[must_use]
    pub const fn paise(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Saturating addition, used by aggregate sums where an overflowing
    /// total must still render rather than panic.
    #[must_use]
    pub fn saturating_add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }

    /// GST portion at `rate_percent`, rounded to the nearest paisa.
    #[must_use]
    pub fn gst(self, rate_percent: u32) -> Money {
        let rate = i64::from(rate_percent);
        let scaled = i128::from(self.0) * i128::from(rate);
        let rounded = if scaled >= 0 {
            (scaled + 50) / 100
        } else {
            (scaled - 50) / 100
        };
        Money(rounded.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64)
    }

    /// GST-inclusive total at `rate_percent`.
    #[must_use]
    pub fn with_gst(self, rate_percent: u32) -> Money {
        self.saturating_add(self.gst(rate_percent))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let rupees = abs / 100;
        let paise = abs % 100;
        write!(f, "{sign}₹{rupees}.{paise:02}")
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl FromStr for Money {
    type Err = String;

    /// Parses a decimal rupee string into paise.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading
    /// `+`/`-`; rejects more than two fractional digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("empty amount".to_string());
        }

        let (sign, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (-1i64, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (1i64, stripped)
        } else {
            (1i64, trimmed)
        };

        let rest = rest.trim();
        if rest.is_empty() {
            return Err("empty amount".to_string());
        }

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let rupees_str = parts.next().ok_or_else(|| "invalid amount".to_string())?;
        let paise_str = parts.next();

        if parts.next().is_some() {
            return Err("invalid amount".to_string());
        }

        if rupees_str.is_empty() || !rupees_str.chars().all(|c| c.is_ascii_digit()) {
            return Err("invalid amount".to_string());
        }

        let rupees: i64 = rupees_str
            .parse()
            .map_err(|_| "invalid amount".to_string())?;

        let paise: i64 = match paise_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err("invalid amount".to_string());
                }
                match frac.len() {
                    1 => frac.parse::<i64>().map_err(|_| "invalid amount".to_string())? * 10,
                    2 => frac.parse::<i64>().map_err(|_| "invalid amount".to_string())?,
                    _ => return Err("too many decimals".to_string()),
                }
            }
        };

        let total = rupees
            .checked_mul(100)
            .and_then(|v| v.checked_add(paise))
            .ok_or_else(|| "amount too large".to_string())?;

        let signed = if sign < 0 {
            total.checked_neg().ok_or_else(|| "amount too large".to_string())?
        } else {
            total
        };

        Ok(Money(signed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_rupees() {
        assert_eq!(Money::new(0).to_string(), "₹0.00");
        assert_eq!(Money::new(1).to_string(), "₹0.01");
        assert_eq!(Money::new(10).to_string(), "₹0.10");
        assert_eq!(Money::new(2500_00).to_string(), "₹2500.00");
        assert_eq!(Money::new(-1050).to_string(), "-₹10.50");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!("10".parse::<Money>().unwrap().paise(), 1000);
        assert_eq!("10.5".parse::<Money>().unwrap().paise(), 1050);
        assert_eq!("10,50".parse::<Money>().unwrap().paise(), 1050);
        assert_eq!("-0.01".parse::<Money>().unwrap().paise(), -1);
        assert_eq!("  2.30 ".parse::<Money>().unwrap().paise(), 230);
    }

    #[test]
    fn parse_rejects_more_than_two_decimals() {
        assert!("12.345".parse::<Money>().is_err());
        assert!("0.001".parse::<Money>().is_err());
    }

    #[test]
    fn corrupt_floats_collapse_to_zero() {
        assert_eq!(Money::from_rupees(f64::NAN), Money::ZERO);
        assert_eq!(Money::from_rupees(f64::INFINITY), Money::ZERO);
        assert_eq!(Money::from_rupees(f64::NEG_INFINITY), Money::ZERO);
        assert_eq!(Money::from_rupees(1e30), Money::ZERO);
        assert_eq!(Money::from_rupees(2500.0).paise(), 2500_00);
    }

    #[test]
    fn gst_total_rounds_to_nearest_paisa() {
        let base = Money::new(2500_00);
        assert_eq!(base.gst(18), Money::new(450_00));
        assert_eq!(base.with_gst(18), Money::new(2950_00));
        // 18% of ₹1.03 is 18.54p, rounds to 19p.
        assert_eq!(Money::new(103).gst(18), Money::new(19));
    }
}
