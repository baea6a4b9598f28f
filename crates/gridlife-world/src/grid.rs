//! Generic 2D grid.

use gridlife_core::{Boundary, Error, Offset, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Values that have an "empty cell" sentinel.
pub trait Ground {
    fn ground() -> Self;
    fn is_ground(&self) -> bool;
}

/// A fixed-size row-major grid holding one `T` per cell.
///
/// Cells are addressed either by linear index `n` in `[0, rows * cols)` or by
/// `(row, col)`, with `n = row * cols + col`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Build a grid from nested rows. Every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let row_count = rows.len();
        let cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().position(|row| row.len() != cols) {
            return Err(Error::InvalidConfig(format!(
                "row {} has {} cells, expected {}",
                bad,
                rows[bad].len(),
                cols
            )));
        }

        Ok(Self {
            rows: row_count,
            cols,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.cells.len() {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index,
                len: self.cells.len(),
            })
        }
    }

    pub fn get_cell(&self, index: usize) -> Result<&T> {
        self.check_index(index)?;
        Ok(&self.cells[index])
    }

    pub fn get_cell_mut(&mut self, index: usize) -> Result<&mut T> {
        self.check_index(index)?;
        Ok(&mut self.cells[index])
    }

    /// Store `value` at `index`, returning what was there before.
    pub fn set_cell(&mut self, index: usize, value: T) -> Result<T> {
        self.check_index(index)?;
        Ok(std::mem::replace(&mut self.cells[index], value))
    }

    /// Convert a linear index to `(row, col)`
    pub fn coords_of(&self, index: usize) -> Result<(usize, usize)> {
        self.check_index(index)?;
        Ok((index / self.cols, index % self.cols))
    }

    /// Convert `(row, col)` to a linear index
    pub fn index_of(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(Error::CoordinatesOutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(row * self.cols + col)
    }

    /// Coordinates reached from an in-range origin by `delta`.
    fn offset_coords(
        &self,
        row: usize,
        col: usize,
        (dr, dc): Offset,
        boundary: Boundary,
    ) -> Option<(usize, usize)> {
        let rows = self.rows as i64;
        let cols = self.cols as i64;
        let r = row as i64 + i64::from(dr);
        let c = col as i64 + i64::from(dc);

        match boundary {
            Boundary::Toroidal => Some((r.rem_euclid(rows) as usize, c.rem_euclid(cols) as usize)),
            Boundary::Bounded if (0..rows).contains(&r) && (0..cols).contains(&c) => {
                Some((r as usize, c as usize))
            }
            Boundary::Bounded => None,
        }
    }

    /// Index of the cell at `delta` from `(row, col)`.
    ///
    /// Toroidal lookups always succeed; bounded lookups yield `None` past an edge.
    pub fn neighbor_index(
        &self,
        row: usize,
        col: usize,
        delta: Offset,
        boundary: Boundary,
    ) -> Result<Option<usize>> {
        self.index_of(row, col)?;
        Ok(self
            .offset_coords(row, col, delta, boundary)
            .map(|(r, c)| r * self.cols + c))
    }

    pub fn neighbor(
        &self,
        row: usize,
        col: usize,
        delta: Offset,
        boundary: Boundary,
    ) -> Result<Option<&T>> {
        Ok(self
            .neighbor_index(row, col, delta, boundary)?
            .map(|index| &self.cells[index]))
    }

    /// Neighbor values for each delta. Bounded lookups skip missing cells, so
    /// the result may be shorter than `deltas`.
    pub fn neighborhood(
        &self,
        row: usize,
        col: usize,
        deltas: &[Offset],
        boundary: Boundary,
    ) -> Result<Vec<&T>> {
        self.index_of(row, col)?;
        Ok(deltas
            .iter()
            .filter_map(|&delta| self.offset_coords(row, col, delta, boundary))
            .map(|(r, c)| &self.cells[r * self.cols + c])
            .collect())
    }

    /// Sorted indices of the neighbors at `deltas`. Bounded lookups skip
    /// missing cells, so the result may be shorter than `deltas`.
    pub fn neighbor_indices(
        &self,
        row: usize,
        col: usize,
        deltas: &[Offset],
        boundary: Boundary,
    ) -> Result<Vec<usize>> {
        self.index_of(row, col)?;
        let mut indices: Vec<usize> = deltas
            .iter()
            .filter_map(|&delta| self.offset_coords(row, col, delta, boundary))
            .map(|(r, c)| r * self.cols + c)
            .collect();
        indices.sort_unstable();
        Ok(indices)
    }

    /// Count neighbors at `deltas` for which `predicate` holds.
    pub fn count_neighbors<F>(
        &self,
        row: usize,
        col: usize,
        deltas: &[Offset],
        boundary: Boundary,
        predicate: F,
    ) -> Result<usize>
    where
        F: Fn(&T) -> bool,
    {
        Ok(self
            .neighborhood(row, col, deltas, boundary)?
            .into_iter()
            .filter(|&cell| predicate(cell))
            .count())
    }

    pub fn count_matching<F>(&self, predicate: F) -> usize
    where
        F: Fn(&T) -> bool,
    {
        self.cells.iter().filter(|&cell| predicate(cell)).count()
    }

    pub fn find_all_matching<F>(&self, predicate: F) -> Vec<usize>
    where
        F: Fn(&T) -> bool,
    {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, cell)| predicate(cell))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn row(&self, row: usize) -> Result<&[T]> {
        let start = self.index_of(row, 0)?;
        Ok(&self.cells[start..start + self.cols])
    }

    pub fn column(&self, col: usize) -> Result<Vec<&T>> {
        self.index_of(0, col)?;
        Ok(self.cells.iter().skip(col).step_by(self.cols).collect())
    }

    /// Main diagonal, truncated to the shorter side.
    pub fn diagonal(&self) -> Vec<&T> {
        (0..self.rows.min(self.cols))
            .map(|i| &self.cells[i * self.cols + i])
            .collect()
    }

    pub fn anti_diagonal(&self) -> Vec<&T> {
        (0..self.rows.min(self.cols))
            .map(|i| &self.cells[i * self.cols + self.cols - 1 - i])
            .collect()
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Iterator over all cells with their index
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.cells.iter().enumerate()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> + '_ {
        self.cells.iter_mut().enumerate()
    }
}

impl<T: Clone> Grid<T> {
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            cells: vec![value; rows * cols],
        }
    }

    /// Overwrite every cell with a value drawn uniformly from `values`.
    pub fn fill_random<R: Rng + ?Sized>(&mut self, values: &[T], rng: &mut R) {
        if values.is_empty() {
            return;
        }
        for cell in &mut self.cells {
            if let Some(value) = values.choose(rng) {
                *cell = value.clone();
            }
        }
    }
}

impl<T: PartialEq> Grid<T> {
    pub fn has_equal_values(&self, value: &T) -> bool {
        self.cells.iter().all(|cell| cell == value)
    }

    pub fn count_of(&self, value: &T) -> usize {
        self.count_matching(|cell| cell == value)
    }
}

impl<T: fmt::Display> Grid<T> {
    /// One line per row, cells joined by `separator`.
    pub fn to_text(&self, separator: &str) -> String {
        if self.cols == 0 {
            return String::new();
        }
        self.cells
            .chunks(self.cols)
            .map(|row| {
                row.iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(separator)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<T: fmt::Display> fmt::Display for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text("\t"))
    }
}

impl<T: Ground> Grid<T> {
    /// A grid where every cell is ground
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: (0..rows * cols).map(|_| T::ground()).collect(),
        }
    }

    pub fn is_free(&self, index: usize) -> Result<bool> {
        Ok(self.get_cell(index)?.is_ground())
    }

    /// Place `value` on a ground cell. Returns `false` if the cell is taken.
    pub fn born(&mut self, index: usize, value: T) -> Result<bool> {
        let cell = self.get_cell_mut(index)?;
        if !cell.is_ground() {
            return Ok(false);
        }
        *cell = value;
        Ok(true)
    }

    /// Reset an occupied cell to ground. Returns `false` if it already was.
    pub fn die(&mut self, index: usize) -> Result<bool> {
        let cell = self.get_cell_mut(index)?;
        if cell.is_ground() {
            return Ok(false);
        }
        *cell = T::ground();
        Ok(true)
    }

    /// Move an occupant onto a ground cell, leaving ground behind.
    pub fn move_occupant(&mut self, from: usize, to: usize) -> Result<bool> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from == to || self.cells[from].is_ground() || !self.cells[to].is_ground() {
            return Ok(false);
        }
        self.cells.swap(from, to);
        Ok(true)
    }

    /// Uniformly pick a ground cell.
    pub fn random_free_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<usize> {
        self.find_all_matching(T::is_ground)
            .choose(rng)
            .copied()
            .ok_or(Error::NoFreePlacement)
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = T::ground();
        }
    }
}
