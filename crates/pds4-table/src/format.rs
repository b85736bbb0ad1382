//! Field format parsing and value rendering.
//!
//! PDS4 field formats are a restricted printf dialect:
//! `%[+|-]width[.precision]specifier` with specifiers `d`, `o`, `f`, `e`,
//! `E` and `s`. The parser is the compliance gate; combinations that a
//! general-purpose format language would accept (zero precision in
//! scientific notation, left-justified numerics) are rejected here, at
//! declaration time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FormatError;
use crate::value::FieldValue;

/// Justification / sign prefix of a field format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sign {
    /// No prefix.
    #[default]
    None,
    /// `+`: numeric values always carry an explicit sign.
    Plus,
    /// `-`: left-justification; only legal for string fields.
    Minus,
}

/// Format specifier, the final character of a field format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Specifier {
    /// `d`: decimal integer.
    Decimal,
    /// `o`: octal integer.
    Octal,
    /// `f`: fixed-point real.
    Fixed,
    /// `e`: scientific notation, lowercase exponent marker.
    Scientific,
    /// `E`: scientific notation, uppercase exponent marker.
    ScientificUpper,
    /// `s`: string.
    Str,
}

impl Specifier {
    fn from_char(ch: char) -> Option<Self> {
        match ch {
            'd' => Some(Self::Decimal),
            'o' => Some(Self::Octal),
            'f' => Some(Self::Fixed),
            'e' => Some(Self::Scientific),
            'E' => Some(Self::ScientificUpper),
            's' => Some(Self::Str),
            _ => None,
        }
    }

    /// The specifier as it appears in a format string.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Decimal => 'd',
            Self::Octal => 'o',
            Self::Fixed => 'f',
            Self::Scientific => 'e',
            Self::ScientificUpper => 'E',
            Self::Str => 's',
        }
    }

    /// Whether the specifier renders numbers.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        !matches!(self, Self::Str)
    }

    const fn is_floating(self) -> bool {
        matches!(self, Self::Fixed | Self::Scientific | Self::ScientificUpper)
    }
}

/// A parsed, validated field format. Immutable once parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatSpec {
    /// Sign or justification prefix.
    pub sign: Sign,
    /// Field width in bytes, including sign and decimal point.
    pub width: usize,
    /// Precision, present only when the format carried a decimal point.
    pub precision: Option<usize>,
    /// Trailing specifier.
    pub specifier: Specifier,
}

impl FormatSpec {
    /// Parse and validate a field format string.
    ///
    /// # Examples
    ///
    /// ```
    /// use pds4_table::{FormatSpec, Sign, Specifier};
    ///
    /// let spec = FormatSpec::parse("%+7.3f").unwrap();
    /// assert_eq!(spec.sign, Sign::Plus);
    /// assert_eq!(spec.width, 7);
    /// assert_eq!(spec.precision, Some(3));
    /// assert_eq!(spec.specifier, Specifier::Fixed);
    ///
    /// assert!(FormatSpec::parse("%-23d").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] describing the first grammar violation.
    pub fn parse(format: &str) -> Result<Self, FormatError> {
        let rest = format
            .strip_prefix('%')
            .ok_or_else(|| FormatError::missing_percent(format))?;

        let (sign, rest) = match rest.as_bytes().first() {
            Some(b'+') => (Sign::Plus, &rest[1..]),
            Some(b'-') => (Sign::Minus, &rest[1..]),
            _ => (Sign::None, rest),
        };

        let Some(last) = rest.chars().next_back() else {
            return Err(FormatError::unknown_specifier(format));
        };
        let specifier = Specifier::from_char(last)
            .ok_or_else(|| FormatError::unknown_specifier(format))?;
        let middle = &rest[..rest.len() - last.len_utf8()];

        // The middle splits on the first dot: width, then optional precision.
        let (width_text, precision_text) = match middle.split_once('.') {
            None => (middle, None),
            Some((width, precision)) => (width, Some(precision)),
        };

        let width =
            parse_digits(width_text).ok_or_else(|| FormatError::invalid_width(format))?;
        if width == 0 {
            return Err(FormatError::zero_width(format));
        }
        let precision = precision_text
            .map(|text| parse_digits(text).ok_or_else(|| FormatError::invalid_precision(format)))
            .transpose()?;

        if precision == Some(0) && specifier.is_floating() {
            return Err(FormatError::zero_precision(format));
        }
        if specifier == Specifier::Str {
            // Textual comparison: "%5.05s" is rejected even though 5 == 05.
            if let Some(text) = precision_text
                && text != width_text
            {
                return Err(FormatError::string_precision_mismatch(format));
            }
        }
        if sign == Sign::Minus && specifier != Specifier::Str {
            return Err(FormatError::minus_on_numeric(format));
        }

        Ok(Self {
            sign,
            width,
            precision,
            specifier,
        })
    }

    /// Render a value to its fixed-width representation.
    ///
    /// The result is padded to [`width`](Self::width) but never truncated; a
    /// value whose natural rendering is wider comes back over-long so the
    /// encoder can reject it. Returns `None` when the value's kind cannot be
    /// rendered by this specifier (a string supplied to a numeric field).
    #[must_use]
    pub fn render(&self, value: &FieldValue) -> Option<String> {
        let forced_sign = self.sign == Sign::Plus;
        let rendered = match self.specifier {
            Specifier::Decimal => render_integer(value.as_integer()?, forced_sign, 10),
            Specifier::Octal => render_integer(value.as_integer()?, forced_sign, 8),
            Specifier::Fixed => {
                let real = value.as_real()?;
                let precision = self.precision.unwrap_or(DEFAULT_PRECISION);
                if forced_sign {
                    format!("{real:+.precision$}")
                } else {
                    format!("{real:.precision$}")
                }
            }
            Specifier::Scientific | Specifier::ScientificUpper => render_scientific(
                value.as_real()?,
                self.precision.unwrap_or(DEFAULT_PRECISION),
                self.specifier == Specifier::ScientificUpper,
                forced_sign,
            ),
            Specifier::Str => {
                let text = match value {
                    FieldValue::Text(text) => text.clone(),
                    FieldValue::Integer(n) => n.to_string(),
                    FieldValue::Real(n) => n.to_string(),
                };
                let width = self.width;
                return Some(if self.sign == Sign::Minus {
                    format!("{text:<width$}")
                } else {
                    format!("{text:>width$}")
                });
            }
        };
        let width = self.width;
        Some(format!("{rendered:>width$}"))
    }
}

impl FromStr for FormatSpec {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FormatSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.sign {
            Sign::None => "",
            Sign::Plus => "+",
            Sign::Minus => "-",
        };
        write!(f, "%{sign}{}", self.width)?;
        if let Some(precision) = self.precision {
            write!(f, ".{precision}")?;
        }
        write!(f, "{}", self.specifier.as_char())
    }
}

/// Fractional digits used when a floating format carries no precision.
const DEFAULT_PRECISION: usize = 6;

/// A non-empty run of ASCII digits, as an integer.
fn parse_digits(text: &str) -> Option<usize> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn render_integer(value: i64, forced_sign: bool, radix: u32) -> String {
    let magnitude = if radix == 8 {
        format!("{:o}", value.unsigned_abs())
    } else {
        value.unsigned_abs().to_string()
    };
    if value < 0 {
        format!("-{magnitude}")
    } else if forced_sign {
        format!("+{magnitude}")
    } else {
        magnitude
    }
}

/// C-style scientific notation: `precision` fractional mantissa digits and a
/// signed exponent of at least two digits, e.g. `3.14e+00`.
fn render_scientific(value: f64, precision: usize, uppercase: bool, forced_sign: bool) -> String {
    let formatted = format!("{value:.precision$e}");
    let (mantissa, exponent) = match formatted.split_once('e') {
        Some(parts) => parts,
        None => (formatted.as_str(), "0"),
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let marker = if uppercase { 'E' } else { 'e' };
    let sign = if forced_sign && !mantissa.starts_with('-') {
        "+"
    } else {
        ""
    };
    format!("{sign}{mantissa}{marker}{exponent:+03}")
}
