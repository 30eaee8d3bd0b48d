//! The health verdict and its combination algebra.

use core::fmt;
use core::ops::{BitAnd, BitOr};

/// Health verdict reported by a scanner.
///
/// `NotFound` is a refinement of `Down`: a sensor that cannot locate its
/// target at all reports `NotFound` so that renderers can show it
/// distinctly, but the combination algebra treats it exactly as `Down`.
/// Combining two statuses never produces `NotFound`; it survives only when
/// a sensor itself reports it (or a single-child composite passes it
/// through unchanged).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Status {
    /// The target is healthy.
    Up,
    /// The target is unhealthy or unreachable.
    Down,
    /// The target does not exist. Aggregates like `Down`.
    NotFound,
}

impl Status {
    /// Whether this verdict counts as healthy.
    pub fn is_up(self) -> bool {
        matches!(self, Status::Up)
    }

    /// Whether this verdict counts as unhealthy (`Down` or `NotFound`).
    pub fn is_down(self) -> bool {
        !self.is_up()
    }

    /// Convert a boolean health check result into a verdict.
    pub fn from_bool(up: bool) -> Status {
        if up {
            Status::Up
        } else {
            Status::Down
        }
    }
}

/// The least favourable of two verdicts: `Down` if either side is down.
///
/// Associative and commutative over the up/down distinction.
impl BitAnd for Status {
    type Output = Status;

    fn bitand(self, rhs: Status) -> Status {
        if self.is_up() && rhs.is_up() {
            Status::Up
        } else {
            Status::Down
        }
    }
}

/// The most favourable of two verdicts: `Up` if either side is up.
///
/// Associative and commutative over the up/down distinction.
impl BitOr for Status {
    type Output = Status;

    fn bitor(self, rhs: Status) -> Status {
        if self.is_up() || rhs.is_up() {
            Status::Up
        } else {
            Status::Down
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Up => write!(f, "up"),
            Status::Down => write!(f, "down"),
            Status::NotFound => write!(f, "not found"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Status; 3] = [Status::Up, Status::Down, Status::NotFound];

    #[test]
    fn and_is_down_iff_either_operand_is_down() {
        for a in ALL {
            for b in ALL {
                let expected = if a.is_up() && b.is_up() {
                    Status::Up
                } else {
                    Status::Down
                };
                assert_eq!(a & b, expected, "{a} & {b}");
            }
        }
    }

    #[test]
    fn or_is_up_iff_either_operand_is_up() {
        for a in ALL {
            for b in ALL {
                let expected = if a.is_up() || b.is_up() {
                    Status::Up
                } else {
                    Status::Down
                };
                assert_eq!(a | b, expected, "{a} | {b}");
            }
        }
    }

    #[test]
    fn and_or_are_commutative() {
        for a in ALL {
            for b in ALL {
                assert_eq!(a & b, b & a);
                assert_eq!(a | b, b | a);
            }
        }
    }

    #[test]
    fn and_or_are_associative() {
        for a in ALL {
            for b in ALL {
                for c in ALL {
                    assert_eq!((a & b) & c, a & (b & c));
                    assert_eq!((a | b) | c, a | (b | c));
                }
            }
        }
    }

    #[test]
    fn combining_never_produces_not_found() {
        for a in ALL {
            for b in ALL {
                assert_ne!(a & b, Status::NotFound);
                assert_ne!(a | b, Status::NotFound);
            }
        }
    }

    #[test]
    fn not_found_counts_as_down() {
        assert!(Status::NotFound.is_down());
        assert_eq!(Status::NotFound & Status::Up, Status::Down);
        assert_eq!(Status::NotFound | Status::Down, Status::Down);
        assert_eq!(Status::NotFound | Status::Up, Status::Up);
    }

    #[test]
    fn from_bool_maps_to_up_down() {
        assert_eq!(Status::from_bool(true), Status::Up);
        assert_eq!(Status::from_bool(false), Status::Down);
    }

    #[test]
    fn display_names() {
        assert_eq!(Status::Up.to_string(), "up");
        assert_eq!(Status::Down.to_string(), "down");
        assert_eq!(Status::NotFound.to_string(), "not found");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Status::Up).unwrap(), "\"up\"");
        assert_eq!(
            serde_json::to_string(&Status::NotFound).unwrap(),
            "\"not_found\""
        );
    }
}
