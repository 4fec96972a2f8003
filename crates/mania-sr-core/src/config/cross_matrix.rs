/// One row of the cross-column adjacency table.
///
/// A supported row has `key_count + 1` weights, one per boundary: the outer
/// edge of the first column, each pair of neighbouring columns, and the outer
/// edge of the last column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CrossRow {
    Supported(&'static [f64]),
    Unsupported,
}

impl CrossRow {
    pub fn weights(&self) -> Option<&'static [f64]> {
        match self {
            Self::Supported(weights) => Some(weights),
            Self::Unsupported => None,
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Supported(_))
    }
}

// Rows 1..=10 are hand tuned. Rows 12..=18 extend the even-row pattern
// (edge +0.05 per two keys, interior steps of 0.10 down to a 0.05 centre).
static CROSS_MATRIX: [CrossRow; 19] = [
    CrossRow::Unsupported,
    CrossRow::Supported(&[0.075, 0.075]),
    CrossRow::Supported(&[0.125, 0.05, 0.125]),
    CrossRow::Supported(&[0.125, 0.125, 0.125, 0.125]),
    CrossRow::Supported(&[0.175, 0.25, 0.05, 0.25, 0.175]),
    CrossRow::Supported(&[0.175, 0.25, 0.175, 0.175, 0.25, 0.175]),
    CrossRow::Supported(&[0.225, 0.35, 0.25, 0.05, 0.25, 0.35, 0.225]),
    CrossRow::Supported(&[0.225, 0.35, 0.25, 0.225, 0.225, 0.25, 0.35, 0.225]),
    CrossRow::Supported(&[0.275, 0.45, 0.35, 0.25, 0.05, 0.25, 0.35, 0.45, 0.275]),
    CrossRow::Supported(&[
        0.275, 0.45, 0.35, 0.25, 0.275, 0.275, 0.25, 0.35, 0.45, 0.275,
    ]),
    CrossRow::Supported(&[
        0.325, 0.55, 0.45, 0.35, 0.25, 0.05, 0.25, 0.35, 0.45, 0.55, 0.325,
    ]),
    CrossRow::Unsupported,
    CrossRow::Supported(&[
        0.375, 0.65, 0.55, 0.45, 0.35, 0.25, 0.05, 0.25, 0.35, 0.45, 0.55, 0.65, 0.375,
    ]),
    CrossRow::Unsupported,
    CrossRow::Supported(&[
        0.425, 0.75, 0.65, 0.55, 0.45, 0.35, 0.25, 0.05, 0.25, 0.35, 0.45, 0.55, 0.65, 0.75,
        0.425,
    ]),
    CrossRow::Unsupported,
    CrossRow::Supported(&[
        0.475, 0.85, 0.75, 0.65, 0.55, 0.45, 0.35, 0.25, 0.05, 0.25, 0.35, 0.45, 0.55, 0.65,
        0.75, 0.85, 0.475,
    ]),
    CrossRow::Unsupported,
    CrossRow::Supported(&[
        0.525, 0.95, 0.85, 0.75, 0.65, 0.55, 0.45, 0.35, 0.25, 0.05, 0.25, 0.35, 0.45, 0.55,
        0.65, 0.75, 0.85, 0.95, 0.525,
    ]),
];

/// Adjacency weights for a key count. Out-of-range counts are unsupported.
pub fn cross_row(key_count: u32) -> CrossRow {
    CROSS_MATRIX
        .get(key_count as usize)
        .copied()
        .unwrap_or(CrossRow::Unsupported)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_lengths_match_boundary_count() {
        for key_count in 1..=18u32 {
            if let Some(weights) = cross_row(key_count).weights() {
                assert_eq!(weights.len(), key_count as usize + 1, "row {}", key_count);
            }
        }
    }

    #[test]
    fn test_rows_are_symmetric() {
        for key_count in 1..=18u32 {
            if let Some(weights) = cross_row(key_count).weights() {
                let reversed: Vec<f64> = weights.iter().rev().copied().collect();
                assert_eq!(weights, reversed.as_slice(), "row {}", key_count);
            }
        }
    }

    #[test]
    fn test_unsupported_rows() {
        assert!(!cross_row(0).is_supported());
        for key_count in [11, 13, 15, 17] {
            assert_eq!(cross_row(key_count), CrossRow::Unsupported);
        }
        assert!(!cross_row(19).is_supported());
        assert!(!cross_row(u32::MAX).is_supported());
    }

    #[test]
    fn test_supported_rows() {
        for key_count in (1..=10).chain([12, 14, 16, 18]) {
            assert!(cross_row(key_count).is_supported(), "row {}", key_count);
        }
    }

    #[test]
    fn test_tuned_row_values() {
        assert_eq!(cross_row(4).weights(), Some(&[0.175, 0.25, 0.05, 0.25, 0.175][..]));
        assert_eq!(cross_row(1).weights(), Some(&[0.075, 0.075][..]));
    }
}
