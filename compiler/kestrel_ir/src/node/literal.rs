//! Literal values.
//!
//! Values are parsed once, when the literal is lowered, and cached in the
//! node. Turning a value back into source text is a separate, explicit
//! step ([`LiteralValue::render`]); changing a value never touches the
//! document's raw text.

use std::fmt;

use crate::IrError;

/// Kind of a literal, independent of its value.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum LiteralKind {
    Integer,
    Float,
    Boolean,
    Null,
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LiteralKind::Integer => "integer",
            LiteralKind::Float => "float",
            LiteralKind::Boolean => "boolean",
            LiteralKind::Null => "null",
        })
    }
}

/// Cached scalar value of a literal node.
///
/// Floats are stored as bits so the node kind stays `Eq + Hash`.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum LiteralValue {
    Integer(i64),
    Float(u64),
    Boolean(bool),
    Null,
}

impl LiteralValue {
    pub fn float(value: f64) -> Self {
        LiteralValue::Float(value.to_bits())
    }

    pub const fn kind(self) -> LiteralKind {
        match self {
            LiteralValue::Integer(_) => LiteralKind::Integer,
            LiteralValue::Float(_) => LiteralKind::Float,
            LiteralValue::Boolean(_) => LiteralKind::Boolean,
            LiteralValue::Null => LiteralKind::Null,
        }
    }

    pub const fn as_integer(self) -> Option<i64> {
        match self {
            LiteralValue::Integer(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_float(self) -> Option<f64> {
        match self {
            LiteralValue::Float(bits) => Some(f64::from_bits(bits)),
            _ => None,
        }
    }

    pub const fn as_boolean(self) -> Option<bool> {
        match self {
            LiteralValue::Boolean(v) => Some(v),
            _ => None,
        }
    }

    /// Parse source text as a literal of the given kind.
    ///
    /// Integers accept an optional sign, `_` separators and a `0x` prefix.
    pub fn parse_as(kind: LiteralKind, text: &str) -> Result<Self, IrError> {
        let invalid = || IrError::InvalidLiteral {
            kind,
            text: text.to_owned(),
        };
        let trimmed = text.trim();
        match kind {
            LiteralKind::Integer => {
                let cleaned: String = trimmed.chars().filter(|c| *c != '_').collect();
                let (sign, digits) = match cleaned.strip_prefix('-') {
                    Some(rest) => ("-", rest),
                    None => ("", cleaned.strip_prefix('+').unwrap_or(&cleaned)),
                };
                let hex = digits
                    .strip_prefix("0x")
                    .or_else(|| digits.strip_prefix("0X"));
                let parsed = match hex {
                    Some(hex_digits) => i64::from_str_radix(&format!("{sign}{hex_digits}"), 16),
                    None => format!("{sign}{digits}").parse::<i64>(),
                };
                parsed.map(LiteralValue::Integer).map_err(|_| invalid())
            }
            LiteralKind::Float => {
                let cleaned: String = trimmed.chars().filter(|c| *c != '_').collect();
                cleaned
                    .parse::<f64>()
                    .map(LiteralValue::float)
                    .map_err(|_| invalid())
            }
            LiteralKind::Boolean => match trimmed {
                "true" => Ok(LiteralValue::Boolean(true)),
                "false" => Ok(LiteralValue::Boolean(false)),
                _ => Err(invalid()),
            },
            LiteralKind::Null => match trimmed {
                "null" => Ok(LiteralValue::Null),
                _ => Err(invalid()),
            },
        }
    }

    /// Render the value as source text.
    ///
    /// `parse_as(v.kind(), &v.render())` gives back `v` for every value
    /// except float NaN payloads.
    pub fn render(self) -> String {
        match self {
            LiteralValue::Integer(v) => v.to_string(),
            LiteralValue::Float(bits) => format!("{:?}", f64::from_bits(bits)),
            LiteralValue::Boolean(v) => v.to_string(),
            LiteralValue::Null => "null".to_owned(),
        }
    }
}

impl fmt::Debug for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Integer(v) => write!(f, "Integer({v})"),
            LiteralValue::Float(bits) => write!(f, "Float({:?})", f64::from_bits(*bits)),
            LiteralValue::Boolean(v) => write!(f, "Boolean({v})"),
            LiteralValue::Null => write!(f, "Null"),
        }
    }
}
