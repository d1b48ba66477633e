// src/specs/rows.rs
//
// Row interpreter: turns one selected table into nomination records.
//
// Per table the interpreter is in one of two states:
//   awaiting year: rows only feed the year context, nothing is emitted;
//   active:        entered on the first row (or heading) that yields a year; never left.
// Rows that cannot produce a film are skipped and counted, never reported as errors.

use crate::config::Policy;
use crate::core::html::{has_descendant, text_of};
use crate::core::sanitize::{display_category, is_numeric};
use crate::records::{EntityMention, NominationRecord};

use super::columns::{infer_roles, ColumnRole, ColumnRoleMap};
use super::context::{is_year_cell, plausible_year, TableContext};
use super::entities::{extract_entities, extract_film};
use super::grid::{Grid, GridRow};
use super::tables::SelectedTable;
use super::winner::is_winner;

/// Per-table counters for the caller's aggregate statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TableStats {
    pub rows: usize,
    pub header_rows: usize,
    pub separator_rows: usize,
    pub awaiting_year: usize,
    pub no_film: usize,
    pub emitted: usize,
    pub winners: usize,
}

impl TableStats {
    pub fn add(&mut self, other: &TableStats) {
        self.rows += other.rows;
        self.header_rows += other.header_rows;
        self.separator_rows += other.separator_rows;
        self.awaiting_year += other.awaiting_year;
        self.no_film += other.no_film;
        self.emitted += other.emitted;
        self.winners += other.winners;
    }

    pub fn skipped(&self) -> usize {
        self.header_rows + self.separator_rows + self.awaiting_year + self.no_film
    }
}

pub fn interpret_table(selected: &SelectedTable, category: &str, policy: &Policy) -> Vec<NominationRecord> {
    interpret_table_with_stats(selected, category, policy).0
}

pub fn interpret_table_with_stats(
    selected: &SelectedTable,
    category: &str,
    policy: &Policy,
) -> (Vec<NominationRecord>, TableStats) {
    let grid = Grid::from_table(selected.table);
    let roles = infer_roles(&grid, policy);
    let mut ctx = TableContext::for_heading(policy, &selected.heading);
    let category = display_category(category);

    let mut stats = TableStats::default();
    let mut out = Vec::new();

    for (i, row) in grid.rows.iter().enumerate() {
        stats.rows += 1;

        if i == 0 && row.has_header_cell() && !row_has_year(row, policy) {
            stats.header_rows += 1;
            continue;
        }

        if row.len() <= 1 || row.all_placeholders() || row.all_multi_col() {
            // Full-width group rows ("2020 (92nd)") still carry the year; notes don't.
            if let Some(text) = row.own_cell(0).map(text_of).filter(|t| is_year_cell(t, policy)) {
                ctx.observe(&text);
            }
            stats.separator_rows += 1;
            continue;
        }

        let year_col = designated_year_column(row, &roles, policy);
        if let Some(cell) = year_col.and_then(|c| row.own_cell(c)) {
            ctx.observe(&text_of(cell));
        }

        if !ctx.has_year() {
            stats.awaiting_year += 1;
            continue;
        }

        let Some((film_col, film)) = resolve_film(row, &roles, year_col, policy) else {
            logd!("row {i}: no film, skipped");
            stats.no_film += 1;
            continue;
        };

        let people = resolve_people(row, &roles, film_col, year_col, policy);
        let ordinal = ctx.next_ordinal();
        let won = is_winner(row.tr, ordinal, policy);
        let (ceremony_year, edition) = ctx.current();

        stats.emitted += 1;
        if won {
            stats.winners += 1;
        }
        out.push(NominationRecord {
            category: category.clone(),
            film_title: film.name,
            film_link: film.link,
            people,
            is_winner: won,
            edition,
            ceremony_year,
            ordinal,
        });
    }

    logd!("table {:?}: {} rows, {} records, {} skipped", selected.heading, stats.rows, stats.emitted, stats.skipped());
    (out, stats)
}

fn row_has_year(row: &GridRow, policy: &Policy) -> bool {
    row.cells.iter().any(|c| plausible_year(&text_of(c.el), policy).is_some())
}

/// The mapped year column, else the first year cell outside the film column
/// (a title such as "1941" is not a ceremony year).
fn designated_year_column(row: &GridRow, roles: &ColumnRoleMap, policy: &Policy) -> Option<usize> {
    if let Some(col) = roles.column_of(ColumnRole::Year) {
        return Some(col);
    }
    let film_col = roles.column_of(ColumnRole::Film);
    row.cells
        .iter()
        .enumerate()
        .position(|(col, c)| Some(col) != film_col && is_year_cell(&text_of(c.el), policy))
}

fn resolve_film(
    row: &GridRow,
    roles: &ColumnRoleMap,
    year_col: Option<usize>,
    policy: &Policy,
) -> Option<(usize, EntityMention)> {
    if let Some(col) = roles.column_of(ColumnRole::Film) {
        let cell = row.cell(col)?;
        return extract_film(cell.el, policy).map(|f| (col, f));
    }

    // Probe: the first non-person cell holding a link or bold text.
    row.cells.iter().enumerate().find_map(|(col, cell)| {
        if Some(col) == year_col || roles.role(col) == ColumnRole::Person {
            return None;
        }
        if !has_descendant(cell.el, &["a", "b", "strong"]) {
            return None;
        }
        let film = extract_film(cell.el, policy)?;
        (!is_numeric(&film.name) && film.name.chars().count() > 3).then_some((col, film))
    })
}

fn resolve_people(
    row: &GridRow,
    roles: &ColumnRoleMap,
    film_col: usize,
    year_col: Option<usize>,
    policy: &Policy,
) -> Vec<EntityMention> {
    if let Some(col) = roles.column_of(ColumnRole::Person) {
        return row.cell(col).map(|c| extract_entities(c.el, policy)).unwrap_or_default();
    }

    // Every other cell; a colspan copy is the same element and is read once.
    let film_el = row.cell(film_col).map(|c| c.el);
    let mut seen = Vec::new();
    let mut people = Vec::new();
    for (col, cell) in row.cells.iter().enumerate() {
        if col == film_col || Some(col) == year_col || Some(cell.el) == film_el {
            continue;
        }
        if seen.contains(&cell.el) {
            continue;
        }
        seen.push(cell.el);
        for m in extract_entities(cell.el, policy) {
            if !people.contains(&m) {
                people.push(m);
            }
        }
    }
    people
}
