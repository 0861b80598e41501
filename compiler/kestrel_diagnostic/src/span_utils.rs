//! Line and column lookup for spans.
//!
//! Spans are byte offsets into the document's raw text; diagnostics are
//! reported as 1-based line and column (columns count characters, not
//! bytes). [`LineOffsetTable`] pre-computes line starts so repeated
//! lookups on the same document are O(log L).

use kestrel_ir::Span;

/// Pre-computed line offset table for efficient line/column lookup.
///
/// # Example
///
/// ```
/// use kestrel_diagnostic::span_utils::LineOffsetTable;
///
/// let source = "line1\nline2\nline3";
/// let table = LineOffsetTable::build(source);
///
/// assert_eq!(table.offset_to_line_col(source, 0), (1, 1));
/// assert_eq!(table.offset_to_line_col(source, 6), (2, 1));
/// assert_eq!(table.offset_to_line_col(source, 14), (3, 3));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// Byte offset of each line start. `offsets[0]` is always 0.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    /// Build a line offset table from source text.
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                match u32::try_from(i + 1) {
                    Ok(next) => offsets.push(next),
                    Err(_) => break,
                }
            }
        }
        LineOffsetTable { offsets }
    }

    /// 1-based line containing `offset`.
    #[inline]
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(line_idx).map_or(u32::MAX, |idx| idx + 1)
    }

    /// 1-based (line, column) of `offset`.
    pub fn offset_to_line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let line_start = self
            .line_start_offset(line)
            .map_or(0, |start| start as usize);
        (line, column(source, line_start, offset as usize))
    }

    /// Byte offset of a line start (1-based), `None` out of range.
    pub fn line_start_offset(&self, line: u32) -> Option<u32> {
        if line == 0 {
            return None;
        }
        self.offsets.get((line - 1) as usize).copied()
    }

    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}

/// Characters between `line_start` and `offset`, plus one.
///
/// Offsets past the end or inside a multi-byte character are clamped to
/// the nearest preceding boundary.
fn column(source: &str, line_start: usize, offset: usize) -> u32 {
    let mut end = offset.min(source.len());
    while end > line_start && !source.is_char_boundary(end) {
        end -= 1;
    }
    let count = source
        .get(line_start..end)
        .map_or(0, |text| text.chars().count());
    u32::try_from(count).unwrap_or(u32::MAX - 1) + 1
}

/// 1-based line where `span` starts.
///
/// For repeated lookups, use [`LineOffsetTable`] instead.
pub fn line_number(source: &str, span: Span) -> u32 {
    offset_to_line_col(source, span.start).0
}

/// 1-based (line, column) of a byte offset, scanning from the start.
///
/// For repeated lookups, use [`LineOffsetTable`] instead.
pub fn offset_to_line_col(source: &str, offset: u32) -> (u32, u32) {
    let offset = offset as usize;
    let mut line = 1u32;
    let mut line_start = 0usize;

    for (i, byte) in source.bytes().enumerate() {
        if i >= offset {
            break;
        }
        if byte == b'\n' {
            line += 1;
            line_start = i + 1;
        }
    }

    (line, column(source, line_start, offset))
}
