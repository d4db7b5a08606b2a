//! Option kind.

use std::fmt;
use std::str::FromStr;

/// Side of a European option.
///
/// # Examples
/// ```
/// use pricer_models::instruments::OptionKind;
///
/// let kind: OptionKind = "put".parse().unwrap();
/// assert_eq!(kind, OptionKind::Put);
/// assert_eq!(kind.to_string(), "put");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionKind {
    /// Right to buy at the strike: payoff max(S - K, 0)
    Call,
    /// Right to sell at the strike: payoff max(K - S, 0)
    Put,
}

impl OptionKind {
    /// Both kinds, calls first.
    pub const ALL: [OptionKind; 2] = [OptionKind::Call, OptionKind::Put];

    /// Lower-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionKind::Call => "call",
            OptionKind::Put => "put",
        }
    }

    /// Returns true for calls.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionKind::Call)
    }

    /// Returns true for puts.
    #[inline]
    pub fn is_put(&self) -> bool {
        matches!(self, OptionKind::Put)
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown option kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown option kind: '{0}' (expected 'call' or 'put')")]
pub struct ParseOptionKindError(pub String);

impl FromStr for OptionKind {
    type Err = ParseOptionKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(OptionKind::Call),
            "put" | "p" => Ok(OptionKind::Put),
            _ => Err(ParseOptionKindError(s.to_string())),
        }
    }
}
