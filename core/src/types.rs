/// Board side length used by configurations.
pub type Coord = u16;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

/// Grid position `(row, col)`.
pub type Coord2 = (usize, usize);

/// Cells touching `center`, row by row, clipped to a `bounds = (rows, cols)` board.
///
/// `center` itself is skipped. Edges do not wrap.
pub fn neighbors(center: Coord2, bounds: Coord2) -> impl Iterator<Item = Coord2> {
    let (row, col) = center;
    let (rows, cols) = bounds;
    let row_span = row.saturating_sub(1)..row.saturating_add(2).min(rows);
    let col_span = col.saturating_sub(1)..col.saturating_add(2).min(cols);

    row_span
        .flat_map(move |r| col_span.clone().map(move |c| (r, c)))
        .filter(move |&cell| cell != center)
}
