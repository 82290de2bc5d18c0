//! Viewport snapshot handling: flattening wrapped rows into logical lines
//! and splitting captured text back into rows.
//!
//! A terminal renders one logical line across several rows when it exceeds
//! the viewport width. Detection works on the flattened logical line, so the
//! flattening here and the mapping in `coords` must agree on how many cells
//! each row contributes.

use crate::types::BufferLine;

/// Flattens the rows `start_row..=end_row` into one logical string.
///
/// Every row contributes at most `cols` cells. Interior rows are taken
/// verbatim so that cell offsets stay exact; only the assembled string has
/// its trailing blanks trimmed. Rows outside the snapshot contribute
/// nothing.
pub fn line_content(lines: &[BufferLine], start_row: usize, end_row: usize, cols: usize) -> String {
    let mut content = String::new();
    if cols == 0 {
        return content;
    }
    for row in start_row..=end_row {
        let Some(line) = lines.get(row) else {
            break;
        };
        content.extend(line.content.chars().take(cols));
    }
    content.truncate(content.trim_end().len());
    return content;
}

/// Groups snapshot rows into logical lines.
///
/// Returns `(start_row, end_row)` pairs, both inclusive. A continuation row
/// with no preceding unwrapped row opens its own span, which happens when a
/// snapshot starts mid-line.
pub fn logical_spans(lines: &[BufferLine]) -> Vec<(usize, usize)> {
    let mut spans: Vec<(usize, usize)> = Vec::new();
    for (row, line) in lines.iter().enumerate() {
        match spans.last_mut() {
            Some(span) if line.wrapped => span.1 = row,
            _ => spans.push((row, row)),
        }
    }
    return spans;
}

/// Splits captured text into viewport rows, soft-wrapping at `cols` the way
/// a terminal would. Returns no rows when `cols` is zero.
pub fn segment(text: &str, cols: usize) -> Vec<BufferLine> {
    let mut lines = Vec::new();
    if cols == 0 {
        return lines;
    }
    for raw in text.lines() {
        let cells: Vec<char> = raw.chars().collect();
        if cells.is_empty() {
            lines.push(BufferLine::new("", false));
            continue;
        }
        for (index, chunk) in cells.chunks(cols).enumerate() {
            lines.push(BufferLine::new(chunk.iter().collect::<String>(), index > 0));
        }
    }
    return lines;
}
