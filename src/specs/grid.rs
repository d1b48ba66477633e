// src/specs/grid.rs
//
// Table grid: a table's rows with `rowspan`/`colspan` expanded so a column
// index means the same thing on every row. Copies of a spanned cell are
// marked as placeholders; the interpreter treats them as "nothing new here".

use scraper::ElementRef;

use crate::core::html::{row_cells, span_attr, table_rows};

#[derive(Clone, Copy, Debug)]
pub struct GridCell<'a> {
    pub el: ElementRef<'a>,
    /// Copied in from a span rather than present in this row's markup.
    pub placeholder: bool,
    /// The source cell spans more than one column.
    pub multi_col: bool,
}

#[derive(Clone, Debug)]
pub struct GridRow<'a> {
    pub tr: ElementRef<'a>,
    pub cells: Vec<GridCell<'a>>,
}

impl<'a> GridRow<'a> {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, col: usize) -> Option<&GridCell<'a>> {
        self.cells.get(col)
    }

    /// Cell at `col` only if it belongs to this row's own markup.
    pub fn own_cell(&self, col: usize) -> Option<ElementRef<'a>> {
        self.cells.get(col).filter(|c| !c.placeholder).map(|c| c.el)
    }

    pub fn all_placeholders(&self) -> bool {
        self.cells.iter().all(|c| c.placeholder)
    }

    /// Separator rows: one cell stretched across the table.
    pub fn all_multi_col(&self) -> bool {
        self.cells.iter().all(|c| c.multi_col)
    }

    pub fn has_header_cell(&self) -> bool {
        self.cells.iter().any(|c| !c.placeholder && c.el.value().name() == "th")
    }
}

#[derive(Clone, Debug, Default)]
pub struct Grid<'a> {
    pub rows: Vec<GridRow<'a>>,
}

/// Rows still owed by a `rowspan` cell in one column.
#[derive(Clone, Copy)]
struct Pending<'a> {
    el: ElementRef<'a>,
    rows_left: usize,
    multi_col: bool,
}

impl<'a> Grid<'a> {
    pub fn from_table(table: ElementRef<'a>) -> Self {
        let mut pending: Vec<Option<Pending<'a>>> = Vec::new();
        let mut rows = Vec::new();

        for tr in table_rows(table) {
            let mut cells: Vec<GridCell<'a>> = Vec::new();
            let mut col = 0usize;

            for td in row_cells(tr) {
                fill_pending(&mut pending, &mut cells, &mut col);

                let colspan = span_attr(&td, "colspan");
                let rowspan = span_attr(&td, "rowspan");
                for k in 0..colspan {
                    cells.push(GridCell { el: td, placeholder: k > 0, multi_col: colspan > 1 });
                    if rowspan > 1 {
                        if pending.len() <= col {
                            pending.resize(col + 1, None);
                        }
                        pending[col] = Some(Pending { el: td, rows_left: rowspan - 1, multi_col: colspan > 1 });
                    }
                    col += 1;
                }
            }
            // Spans to the right of the last own cell. In a short row a gap may
            // precede some of them; those still count this row.
            fill_pending(&mut pending, &mut cells, &mut col);
            for slot in pending.iter_mut().skip(col) {
                consume(slot);
            }

            rows.push(GridRow { tr, cells });
        }

        Grid { rows }
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(GridRow::len).max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Emit placeholders for every consecutive column at `*col` still covered by a rowspan.
fn fill_pending<'a>(pending: &mut [Option<Pending<'a>>], cells: &mut Vec<GridCell<'a>>, col: &mut usize) {
    while let Some(p) = pending.get_mut(*col).and_then(consume) {
        cells.push(GridCell { el: p.el, placeholder: true, multi_col: p.multi_col });
        *col += 1;
    }
}

/// Count one row against the span in `slot`, clearing it once paid off.
/// Returns the span if it covered this row.
fn consume<'a>(slot: &mut Option<Pending<'a>>) -> Option<Pending<'a>> {
    let p = (*slot)?;
    *slot = (p.rows_left > 1).then_some(Pending { rows_left: p.rows_left - 1, ..p });
    Some(p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::html::{find_first, text_of};
    use scraper::Html;

    fn grid_texts(html: &str) -> Vec<Vec<(String, bool)>> {
        let doc = Html::parse_fragment(html);
        let table = find_first(doc.root_element(), "table").unwrap();
        Grid::from_table(table)
            .rows
            .iter()
            .map(|r| r.cells.iter().map(|c| (text_of(c.el), c.placeholder)).collect())
            .collect()
    }

    #[test]
    fn rowspan_year_keeps_columns_aligned() {
        let rows = grid_texts(
            "<table>\
             <tr><td rowspan=2>2020</td><td>Parasite</td><td>Bong Joon-ho</td></tr>\
             <tr><td>1917</td><td>Sam Mendes</td></tr>\
             <tr><td>2021</td><td>Nomadland</td><td>Chloé Zhao</td></tr>\
             </table>",
        );
        assert_eq!(rows[1][0], (s!("2020"), true));
        assert_eq!(rows[1][1], (s!("1917"), false));
        assert_eq!(rows[1][2], (s!("Sam Mendes"), false));
        assert_eq!(rows[2][0], (s!("2021"), false));
    }

    #[test]
    fn colspan_and_trailing_rowspan() {
        let doc = Html::parse_fragment(
            "<table>\
             <tr><td colspan=3>1930s</td></tr>\
             <tr><td>1931</td><td>Cimarron</td><td rowspan=2>note</td></tr>\
             <tr><td>1932</td><td>Grand Hotel</td></tr>\
             </table>",
        );
        let table = find_first(doc.root_element(), "table").unwrap();
        let grid = Grid::from_table(table);
        assert!(grid.rows[0].all_multi_col());
        assert_eq!(grid.rows[0].len(), 3);
        assert_eq!(grid.rows[2].len(), 3);
        assert!(grid.rows[2].cells[2].placeholder);
        assert!(grid.rows[2].own_cell(2).is_none());
        assert_eq!(grid.width(), 3);
    }

    #[test]
    fn short_row_still_pays_off_spans_past_a_gap() {
        let rows = grid_texts(
            "<table>\
             <tr><td>1931</td><td>Cimarron</td><td rowspan=2>note</td></tr>\
             <tr><td>1932</td></tr>\
             <tr><td>1933</td><td>Cavalcade</td><td>Frank Lloyd</td></tr>\
             </table>",
        );
        assert_eq!(rows[1].len(), 1);
        assert_eq!(
            rows[2],
            vec![(s!("1933"), false), (s!("Cavalcade"), false), (s!("Frank Lloyd"), false)]
        );
    }

    #[test]
    fn header_row_detection() {
        let doc = Html::parse_fragment(
            "<table><tr><th>Year</th><th>Film</th></tr><tr><td>2001</td><td>x</td></tr></table>",
        );
        let table = find_first(doc.root_element(), "table").unwrap();
        let grid = Grid::from_table(table);
        assert!(grid.rows[0].has_header_cell());
        assert!(!grid.rows[1].has_header_cell());
    }
}
