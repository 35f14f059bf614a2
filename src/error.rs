// SPDX-License-Identifier: MIT
use thiserror::Error;

/// An editop list that cannot be replayed against the sequences it was
/// handed: indices going backwards, pointing past the end of either
/// sequence, or not lining up with the output produced so far.
///
/// `index` is the position of the offending operation; for a script that
/// ends before the target is fully produced it is `ops.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid editops at operation {index}: {reason}")]
pub struct InvalidEditops {
    pub index: usize,
    pub reason: &'static str,
}

impl InvalidEditops {
    pub(crate) fn new(index: usize, reason: &'static str) -> Self {
        InvalidEditops { index, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_operation() {
        let err = InvalidEditops::new(3, "source positions must be non-decreasing");
        assert_eq!(
            err.to_string(),
            "invalid editops at operation 3: source positions must be non-decreasing"
        );
    }
}
