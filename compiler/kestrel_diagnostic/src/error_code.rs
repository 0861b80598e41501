//! Error codes for IR diagnostics.
//!
//! The first digit names the phase the problem was found in, matching the
//! three error channels of the node model.

use std::fmt;

/// Error codes for all IR diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E1xxx: Parser errors carried on the document
/// - E2xxx: Semantic errors attached to nodes
/// - E9xxx: Internal compiler errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Malformed source reported by the parser
    E1001,
    /// Semantic error attached to a node by a pass
    E2001,
    /// Structural invariant violated (compiler bug)
    E9001,
    /// Too many errors
    E9002,
}

impl ErrorCode {
    /// All error codes, in order.
    pub const ALL: [ErrorCode; 4] = [
        ErrorCode::E1001,
        ErrorCode::E2001,
        ErrorCode::E9001,
        ErrorCode::E9002,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E9001 => "E9001",
            ErrorCode::E9002 => "E9002",
        }
    }

    /// One-line description for `--explain` style listings.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "the parser could not make sense of the source",
            ErrorCode::E2001 => "a semantic pass rejected this construct",
            ErrorCode::E9001 => "internal compiler error: the node tree is malformed",
            ErrorCode::E9002 => "too many errors",
        }
    }

    pub fn is_parser_error(&self) -> bool {
        matches!(self, ErrorCode::E1001)
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, ErrorCode::E9001 | ErrorCode::E9002)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2001"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ErrorCode::ALL
            .into_iter()
            .find(|code| code.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_str() {
        for code in ErrorCode::ALL {
            assert_eq!(code.as_str().parse::<ErrorCode>(), Ok(code));
        }
        assert_eq!("e2001".parse::<ErrorCode>(), Ok(ErrorCode::E2001));
        assert!("E0000".parse::<ErrorCode>().is_err());
    }

    #[test]
    fn test_phases() {
        assert!(ErrorCode::E1001.is_parser_error());
        assert!(!ErrorCode::E2001.is_parser_error());
        assert!(ErrorCode::E9001.is_internal());
        assert_eq!(ErrorCode::E2001.to_string(), "E2001");
    }
}
