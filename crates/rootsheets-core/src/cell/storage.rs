//! Sparse cell storage
//!
//! Only non-empty cells are kept, in a row-major `BTreeMap` so iteration
//! order matches the order cells must appear in a worksheet part.

use std::collections::BTreeMap;

use super::CellValue;
use crate::style::StylePool;

/// Value and style of a single cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellData {
    /// The cell's value
    pub value: CellValue,
    /// Index into the worksheet's style pool (0 = default style)
    pub style_index: u32,
}

impl CellData {
    /// Cell with a value and the default style
    pub fn new(value: CellValue) -> Self {
        Self {
            value,
            style_index: 0,
        }
    }

    /// Cell with a value and a style
    pub fn with_style(value: CellValue, style_index: u32) -> Self {
        Self { value, style_index }
    }

    /// No value and default style
    pub fn is_empty(&self) -> bool {
        self.value.is_empty() && self.style_index == 0
    }
}

/// Row-major sparse storage for one worksheet
///
/// Structure: `BTreeMap<row_index, BTreeMap<col_index, CellData>>`
#[derive(Debug, Default)]
pub struct CellStorage {
    rows: BTreeMap<u32, BTreeMap<u16, CellData>>,
    style_pool: StylePool,
}

impl CellStorage {
    /// Create an empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cell
    pub fn get(&self, row: u32, col: u16) -> Option<&CellData> {
        self.rows.get(&row).and_then(|r| r.get(&col))
    }

    /// Set just the value, keeping any style already applied
    pub fn set_value(&mut self, row: u32, col: u16, value: CellValue) {
        let row_map = self.rows.entry(row).or_default();
        match row_map.get_mut(&col) {
            Some(cell) => cell.value = value,
            None => {
                row_map.insert(col, CellData::new(value));
            }
        }
        self.prune(row, col);
    }

    /// Set just the style, keeping the value
    pub fn set_style(&mut self, row: u32, col: u16, style_index: u32) {
        let row_map = self.rows.entry(row).or_default();
        match row_map.get_mut(&col) {
            Some(cell) => cell.style_index = style_index,
            None => {
                row_map.insert(col, CellData::with_style(CellValue::Empty, style_index));
            }
        }
        self.prune(row, col);
    }

    /// Remove a cell
    pub fn remove(&mut self, row: u32, col: u16) -> Option<CellData> {
        let removed = self.rows.get_mut(&row).and_then(|r| r.remove(&col));
        if self.rows.get(&row).is_some_and(|r| r.is_empty()) {
            self.rows.remove(&row);
        }
        removed
    }

    /// Number of stored cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(|r| r.len()).sum()
    }

    /// Whether nothing is stored
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Bounds of stored cells as (min_row, min_col, max_row, max_col)
    pub fn used_bounds(&self) -> Option<(u32, u16, u32, u16)> {
        let min_row = *self.rows.keys().next()?;
        let max_row = *self.rows.keys().next_back()?;
        let min_col = self.rows.values().filter_map(|r| r.keys().next()).min()?;
        let max_col = self
            .rows
            .values()
            .filter_map(|r| r.keys().next_back())
            .max()?;
        Some((min_row, *min_col, max_row, *max_col))
    }

    /// Iterate over all cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u16, &CellData)> {
        self.rows
            .iter()
            .flat_map(|(&row, cols)| cols.iter().map(move |(&col, data)| (row, col, data)))
    }

    /// Row indices holding at least one cell
    pub fn row_indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.rows.keys().copied()
    }

    /// The style pool
    pub fn style_pool(&self) -> &StylePool {
        &self.style_pool
    }

    /// The style pool (mutable)
    pub fn style_pool_mut(&mut self) -> &mut StylePool {
        &mut self.style_pool
    }

    fn prune(&mut self, row: u32, col: u16) {
        if self.get(row, col).is_some_and(CellData::is_empty) {
            self.remove(row, col);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_iterate_in_row_order() {
        let mut storage = CellStorage::new();
        storage.set_value(6, 2, CellValue::Number(1.0));
        storage.set_value(5, 9, CellValue::formula("=A6"));
        storage.set_value(5, 0, CellValue::Number(0.0));

        let order: Vec<_> = storage.iter().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(order, vec![(5, 0), (5, 9), (6, 2)]);
        assert_eq!(storage.used_bounds(), Some((5, 0, 6, 9)));
        assert_eq!(storage.row_indices().collect::<Vec<_>>(), vec![5, 6]);
    }

    #[test]
    fn test_style_survives_value_update() {
        let mut storage = CellStorage::new();
        storage.set_style(4, 0, 1);
        storage.set_value(4, 0, CellValue::string("Iter"));

        let cell = storage.get(4, 0).unwrap();
        assert_eq!(cell.style_index, 1);
        assert_eq!(cell.value.as_string(), Some("Iter"));
    }

    #[test]
    fn test_empty_cells_are_pruned() {
        let mut storage = CellStorage::new();
        storage.set_value(0, 0, CellValue::Number(1.0));
        storage.set_value(0, 0, CellValue::Empty);

        assert!(storage.is_empty());
        assert_eq!(storage.cell_count(), 0);
        assert_eq!(storage.used_bounds(), None);
    }
}
