//! Grid placement and geometry.
//!
//! The page composer and the layout variant share one placement fold: an
//! item lands at its explicit coordinates when given, otherwise at the
//! cursor, and the cursor then advances by the item's width, wrapping to the
//! next row at the declared column count. The fold threads its cursor
//! through `scan` instead of mutating shared state.

use ratatui::layout::{Position, Rect};

/// A placement request: explicit coordinates when >= 0, cursor otherwise.
/// Spans below 1 normalize to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanRequest {
    pub col: i64,
    pub row: i64,
    pub w: i64,
    pub h: i64,
}

/// A resolved span in zero-indexed grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub col: u16,
    pub row: u16,
    pub w: u16,
    pub h: u16,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    col: u16,
    row: u16,
}

/// Resolve every request in order against a grid of `columns` columns.
pub fn place(columns: u16, requests: &[SpanRequest]) -> Vec<Span> {
    let columns = columns.max(1);
    requests
        .iter()
        .scan(Cursor::default(), |cursor, request| {
            let (span, next) = step(columns, *cursor, request);
            *cursor = next;
            Some(span)
        })
        .collect()
}

/// Resolve one request, returning the span and the cursor for the next one.
fn step(columns: u16, cursor: Cursor, request: &SpanRequest) -> (Span, Cursor) {
    let w = to_span(request.w);
    let h = to_span(request.h);
    let col = if request.col >= 0 {
        to_cell(request.col)
    } else {
        cursor.col
    };
    let row = if request.row >= 0 {
        to_cell(request.row)
    } else {
        cursor.row
    };

    let next_col = col.saturating_add(w);
    let next = if next_col >= columns {
        Cursor {
            col: 0,
            row: row.saturating_add(1),
        }
    } else {
        Cursor { col: next_col, row }
    };

    (Span { col, row, w, h }, next)
}

fn to_cell(value: i64) -> u16 {
    value.clamp(0, i64::from(u16::MAX)) as u16
}

fn to_span(value: i64) -> u16 {
    value.clamp(1, i64::from(u16::MAX)) as u16
}

/// Pixel geometry for one grid: weighted track boundaries over an area.
///
/// Spans that fall outside the declared tracks are clipped into them;
/// anything left with no room yields no rect at all.
#[derive(Debug, Clone)]
pub struct GridGeometry {
    area: Rect,
    xs: Vec<u16>,
    ys: Vec<u16>,
    gap: u16,
}

impl GridGeometry {
    pub fn new(area: Rect, col_weights: &[u16], row_weights: &[u16], gap: u16) -> Self {
        Self {
            area,
            xs: track_offsets(area.width, col_weights),
            ys: track_offsets(area.height, row_weights),
            gap,
        }
    }

    /// Geometry for a uniform `cols` x `rows` grid.
    pub fn uniform(area: Rect, cols: u16, rows: u16, gap: u16) -> Self {
        let col_weights = vec![1; cols.max(1) as usize];
        let row_weights = vec![1; rows.max(1) as usize];
        Self::new(area, &col_weights, &row_weights, gap)
    }

    /// The rect covered by a span, or None when it has no visible room.
    pub fn cell(&self, span: Span) -> Option<Rect> {
        let cols = (self.xs.len() - 1) as u16;
        let rows = (self.ys.len() - 1) as u16;
        if span.col >= cols || span.row >= rows {
            return None;
        }
        let col_end = span.col.saturating_add(span.w).min(cols);
        let row_end = span.row.saturating_add(span.h).min(rows);

        let x0 = self.xs[span.col as usize];
        let x1 = self.xs[col_end as usize];
        let y0 = self.ys[span.row as usize];
        let y1 = self.ys[row_end as usize];

        // The gutter comes off the trailing edge of interior cells only.
        let width = (x1 - x0).saturating_sub(if col_end < cols { self.gap } else { 0 });
        let height = (y1 - y0).saturating_sub(if row_end < rows { self.gap } else { 0 });
        if width == 0 || height == 0 {
            return None;
        }
        Some(Rect {
            x: self.area.x + x0,
            y: self.area.y + y0,
            width,
            height,
        })
    }
}

/// Boundary offsets for weighted tracks: `weights.len() + 1` entries from 0
/// to `total`. Zero weights count as 1 so every track stays addressable.
fn track_offsets(total: u16, weights: &[u16]) -> Vec<u16> {
    let sum: u32 = weights.iter().map(|w| u32::from((*w).max(1))).sum();
    let sum = sum.max(1);
    let mut offsets = Vec::with_capacity(weights.len() + 1);
    let mut acc: u32 = 0;
    offsets.push(0);
    for weight in weights {
        acc += u32::from((*weight).max(1));
        offsets.push((u32::from(total) * acc / sum) as u16);
    }
    offsets
}

/// True when a terminal coordinate lies inside the rect.
pub fn hit(rect: Rect, x: u16, y: u16) -> bool {
    rect.contains(Position { x, y })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(col: i64, row: i64, w: i64, h: i64) -> SpanRequest {
        SpanRequest { col, row, w, h }
    }

    fn span(col: u16, row: u16, w: u16, h: u16) -> Span {
        Span { col, row, w, h }
    }

    #[test]
    // A wide item, a cursor-placed item, then an explicit jump back to the
    // start of the next row.
    fn test_placement_mixed_cursor_and_explicit() {
        let spans = place(
            3,
            &[
                request(-1, -1, 2, 1),
                request(-1, -1, 1, 1),
                request(0, 1, 1, 1),
            ],
        );
        assert_eq!(spans, vec![span(0, 0, 2, 1), span(2, 0, 1, 1), span(0, 1, 1, 1)]);
    }

    #[test]
    fn test_cursor_wraps_at_column_count() {
        let spans = place(
            2,
            &[
                request(-1, -1, 1, 1),
                request(-1, -1, 1, 1),
                request(-1, -1, 1, 1),
            ],
        );
        assert_eq!(spans, vec![span(0, 0, 1, 1), span(1, 0, 1, 1), span(0, 1, 1, 1)]);
    }

    #[test]
    // An item exactly as wide as the grid consumes the whole row.
    fn test_full_width_item_wraps() {
        let spans = place(4, &[request(-1, -1, 4, 1), request(-1, -1, 1, 1)]);
        assert_eq!(spans, vec![span(0, 0, 4, 1), span(0, 1, 1, 1)]);
    }

    #[test]
    // Explicit placement moves the cursor too: the next item continues from
    // the end of the explicitly placed one.
    fn test_explicit_position_feeds_cursor() {
        let spans = place(4, &[request(2, 1, 1, 1), request(-1, -1, 1, 1)]);
        assert_eq!(spans, vec![span(2, 1, 1, 1), span(3, 1, 1, 1)]);
    }

    #[test]
    // Zero and negative spans normalize to a single cell.
    fn test_degenerate_spans_normalize() {
        let spans = place(4, &[request(-1, -1, 0, -3), request(-1, -1, 1, 1)]);
        assert_eq!(spans, vec![span(0, 0, 1, 1), span(1, 0, 1, 1)]);
    }

    #[test]
    fn test_track_offsets_weighted() {
        assert_eq!(track_offsets(9, &[1, 2]), vec![0, 3, 9]);
        assert_eq!(track_offsets(10, &[1, 1, 1, 1]), vec![0, 2, 5, 7, 10]);
        // Zero weights are bumped so the track keeps some width.
        assert_eq!(track_offsets(4, &[0, 1]), vec![0, 2, 4]);
    }

    #[test]
    fn test_cell_geometry_with_gap() {
        let area = Rect::new(0, 0, 8, 4);
        let geometry = GridGeometry::uniform(area, 4, 2, 1);

        // Interior cells give up the gutter on their trailing edge.
        assert_eq!(geometry.cell(span(0, 0, 1, 1)), Some(Rect::new(0, 0, 1, 1)));
        // The last column and row keep their full size.
        assert_eq!(geometry.cell(span(3, 1, 1, 1)), Some(Rect::new(6, 2, 2, 2)));
        // A span reaching the far edge keeps its trailing width too.
        assert_eq!(geometry.cell(span(2, 0, 2, 2)), Some(Rect::new(4, 0, 4, 4)));
    }

    #[test]
    fn test_cell_outside_tracks() {
        let area = Rect::new(0, 0, 8, 4);
        let geometry = GridGeometry::uniform(area, 4, 2, 0);

        assert_eq!(geometry.cell(span(4, 0, 1, 1)), None);
        assert_eq!(geometry.cell(span(0, 2, 1, 1)), None);
        // Overhanging spans clip to the declared tracks.
        assert_eq!(geometry.cell(span(3, 0, 3, 1)), Some(Rect::new(6, 0, 2, 2)));
    }

    #[test]
    fn test_geometry_honors_area_origin() {
        let area = Rect::new(10, 5, 8, 4);
        let geometry = GridGeometry::uniform(area, 2, 2, 0);
        assert_eq!(geometry.cell(span(1, 1, 1, 1)), Some(Rect::new(14, 7, 4, 2)));
    }
}
