// src/specs/columns.rs
//
// Which column holds what. Decided once per table from the header row, then
// from the first data row's content when headers don't settle it.

use std::collections::BTreeMap;

use crate::config::Policy;
use crate::core::html::{attr, find_all, text_of};
use super::grid::Grid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    Year,
    Film,
    Person,
    Unknown,
}

/// Column index → role. Immutable once built; unmapped columns read as `Unknown`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColumnRoleMap {
    roles: BTreeMap<usize, ColumnRole>,
}

impl ColumnRoleMap {
    pub fn from_pairs(pairs: &[(usize, ColumnRole)]) -> Self {
        Self { roles: pairs.iter().copied().collect() }
    }

    pub fn role(&self, col: usize) -> ColumnRole {
        self.roles.get(&col).copied().unwrap_or(ColumnRole::Unknown)
    }

    /// First column carrying `role`.
    pub fn column_of(&self, role: ColumnRole) -> Option<usize> {
        self.roles.iter().find(|(_, r)| **r == role).map(|(c, _)| *c)
    }

    pub fn is_mapped(&self, role: ColumnRole) -> bool {
        self.column_of(role).is_some()
    }

    fn is_assigned(&self, col: usize) -> bool {
        self.role(col) != ColumnRole::Unknown
    }

    /// Assign only if the column is free and the role isn't taken.
    fn fill(&mut self, col: usize, role: ColumnRole) {
        if !self.is_assigned(col) && !self.is_mapped(role) {
            self.roles.insert(col, role);
        }
    }
}

pub fn infer_roles(grid: &Grid, policy: &Policy) -> ColumnRoleMap {
    let mut map = ColumnRoleMap::default();

    // Pass 1: header vocabulary.
    if let Some(header) = grid.rows.first().filter(|r| r.has_header_cell()) {
        for (col, cell) in header.cells.iter().enumerate() {
            if let Some(role) = header_role(&text_of(cell.el), policy) {
                map.roles.insert(col, role);
            }
        }
    }

    if map.is_mapped(ColumnRole::Film) && map.is_mapped(ColumnRole::Person) {
        return map;
    }

    // Pass 2: the first data row's link targets, then the conventional shapes.
    if !map.is_mapped(ColumnRole::Film) {
        if let Some(probe) = grid.rows.get(1) {
            let film_col = probe.cells.iter().enumerate().find_map(|(col, cell)| {
                let film_like = find_all(cell.el, "a")
                    .filter_map(|a| attr(&a, "href"))
                    .any(|href| policy.is_film_target(href));
                (film_like && !map.is_assigned(col)).then_some(col)
            });
            if let Some(col) = film_col {
                map.roles.insert(col, ColumnRole::Film);
            }
        }
    }

    match grid.width() {
        3 => {
            map.fill(0, ColumnRole::Year);
            map.fill(1, ColumnRole::Film);
            map.fill(2, ColumnRole::Person);
        }
        2 => {
            map.fill(0, ColumnRole::Film);
            map.fill(1, ColumnRole::Person);
        }
        _ => {}
    }

    logd!("column roles: {:?}", map.roles);
    map
}

/// First rule wins: year, then film, then person.
fn header_role(text: &str, policy: &Policy) -> Option<ColumnRole> {
    let lc = text.to_lowercase();
    let hit = |terms: &[String]| terms.iter().any(|t| lc.contains(t.as_str()));
    if hit(&policy.headers.year[..]) {
        Some(ColumnRole::Year)
    } else if hit(&policy.headers.film[..]) {
        Some(ColumnRole::Film)
    } else if hit(&policy.headers.person[..]) {
        Some(ColumnRole::Person)
    } else {
        None
    }
}
