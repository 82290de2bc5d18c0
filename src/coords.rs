//! Mapping logical text offsets back onto wrapped buffer cells.
//!
//! Detection runs over a flattened logical line, but consumers highlight
//! cells in the wrapped buffer. The mapping assumes what `buffer` produces:
//! every row of the logical line contributes exactly `cols` cells except
//! the last.

use crate::types::BufferPosition;
use crate::types::BufferRange;

/// Maps a column range in the flattened text to a buffer cell range.
///
/// `start_col` is one-based and inclusive, `end_col` is one-based and
/// exclusive, both counted in cells from the start of the logical line.
/// `start_row` is the zero-based snapshot row the logical line begins on.
/// The returned range is one-based with an inclusive end. An empty input
/// range collapses onto its start cell, and a zero `cols` pins the range
/// to the first cell of the origin row.
pub fn map_text_range_to_buffer(
    start_col: usize,
    end_col: usize,
    cols: usize,
    start_row: usize,
) -> BufferRange {
    if cols == 0 {
        let origin = BufferPosition {
            col: 1,
            row: start_row.saturating_add(1),
        };
        return BufferRange {
            end: origin,
            start: origin,
        };
    }
    let start_offset = start_col.saturating_sub(1);
    let last_offset = end_col.saturating_sub(2).max(start_offset);
    return BufferRange {
        end: position_at(last_offset, cols, start_row),
        start: position_at(start_offset, cols, start_row),
    };
}

/// Buffer position of a single zero-based cell offset in the flattened text.
fn position_at(offset: usize, cols: usize, start_row: usize) -> BufferPosition {
    return BufferPosition {
        col: (offset % cols).saturating_add(1),
        row: start_row.saturating_add(offset / cols).saturating_add(1),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Shorthand for building an expected position.
    fn pos(row: usize, col: usize) -> BufferPosition {
        return BufferPosition { col, row };
    }

    #[test]
    fn single_row_range_stays_on_row() {
        let range = map_text_range_to_buffer(1, 5, 80, 0);
        assert_eq!(range.start, pos(1, 1));
        assert_eq!(range.end, pos(1, 4));
    }

    #[test]
    fn range_ending_at_width_stays_on_row() {
        let range = map_text_range_to_buffer(1, 11, 10, 0);
        assert_eq!(range.start, pos(1, 1));
        assert_eq!(range.end, pos(1, 10));
    }

    #[test]
    fn range_crossing_width_wraps_to_next_row() {
        let range = map_text_range_to_buffer(1, 14, 10, 0);
        assert_eq!(range.start, pos(1, 1));
        assert_eq!(range.end, pos(2, 3));
    }

    #[test]
    fn range_starting_past_width_begins_on_later_row() {
        let range = map_text_range_to_buffer(12, 16, 10, 0);
        assert_eq!(range.start, pos(2, 2));
        assert_eq!(range.end, pos(2, 5));
    }

    #[test]
    fn origin_row_offsets_both_ends() {
        let range = map_text_range_to_buffer(8, 14, 10, 4);
        assert_eq!(range.start, pos(5, 8));
        assert_eq!(range.end, pos(6, 3));
    }

    #[test]
    fn empty_range_collapses_onto_start() {
        let range = map_text_range_to_buffer(3, 3, 10, 0);
        assert_eq!(range.start, pos(1, 3));
        assert_eq!(range.end, pos(1, 3));
    }

    #[test]
    fn zero_cols_pins_to_origin() {
        let range = map_text_range_to_buffer(5, 9, 0, 2);
        assert_eq!(range.start, pos(3, 1));
        assert_eq!(range.end, pos(3, 1));
    }
}
