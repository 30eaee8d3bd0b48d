//! Reduction strategies for composite scanners.

use core::fmt;

use crate::Status;

/// How a composite scanner combines its children's verdicts.
///
/// The combinator is part of a composite's identity, fixed at
/// construction; it is not a runtime parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Combinator {
    /// Every child must be up (AND-reduce).
    All,
    /// One healthy child suffices (OR-reduce).
    Any,
}

impl Combinator {
    /// Reduce a sequence of verdicts, starting from the first element.
    ///
    /// Returns `None` for an empty sequence: there is no neutral identity
    /// verdict, and a composite without children is rejected at
    /// construction anyway. A single-element sequence comes back
    /// unchanged, so a `NotFound` child surfaces through a one-child
    /// composite.
    ///
    /// The result is order-independent; order matters only for
    /// presentation.
    pub fn reduce(self, statuses: impl IntoIterator<Item = Status>) -> Option<Status> {
        statuses.into_iter().reduce(|a, b| match self {
            Combinator::All => a & b,
            Combinator::Any => a | b,
        })
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combinator::All => write!(f, "all"),
            Combinator::Any => write!(f, "any"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Status::{Down, NotFound, Up};

    #[test]
    fn all_is_down_iff_any_child_is_down() {
        assert_eq!(Combinator::All.reduce([Up, Up, Up]), Some(Up));
        assert_eq!(Combinator::All.reduce([Up, Down, Up]), Some(Down));
        assert_eq!(Combinator::All.reduce([Down, Down]), Some(Down));
        assert_eq!(Combinator::All.reduce([Up, NotFound]), Some(Down));
    }

    #[test]
    fn any_is_up_iff_any_child_is_up() {
        assert_eq!(Combinator::Any.reduce([Down, Down]), Some(Down));
        assert_eq!(Combinator::Any.reduce([Down, Up, Down]), Some(Up));
        assert_eq!(Combinator::Any.reduce([NotFound, Up]), Some(Up));
        assert_eq!(Combinator::Any.reduce([NotFound, Down]), Some(Down));
    }

    #[test]
    fn reduction_is_permutation_independent() {
        let statuses = [Up, Down, NotFound, Up];
        let permutations = [
            [Up, Down, NotFound, Up],
            [Down, Up, Up, NotFound],
            [NotFound, Up, Down, Up],
            [Up, Up, NotFound, Down],
        ];
        for c in [Combinator::All, Combinator::Any] {
            let expected = c.reduce(statuses);
            for p in permutations {
                assert_eq!(c.reduce(p), expected, "{c} over {p:?}");
            }
        }
    }

    #[test]
    fn single_element_passes_through_unchanged() {
        for c in [Combinator::All, Combinator::Any] {
            for s in [Up, Down, NotFound] {
                assert_eq!(c.reduce([s]), Some(s));
            }
        }
    }

    #[test]
    fn empty_sequence_has_no_verdict() {
        assert_eq!(Combinator::All.reduce([]), None);
        assert_eq!(Combinator::Any.reduce([]), None);
    }
}
