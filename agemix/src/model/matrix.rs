use std::collections::HashMap;

use crate::error::{MixingError, Result};
use crate::model::age_group::AgeGroup;

/// Square contact matrix indexed by the same age groups on both axes.
///
/// Values are stored row-major; `groups[i]` labels both row `i` and column `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct MixingMatrix {
    groups: Vec<AgeGroup>,
    index: HashMap<String, usize>,
    values: Vec<f64>,
}

impl MixingMatrix {
    /// Build from an ordered group list and `n * n` row-major values.
    pub fn new(groups: Vec<AgeGroup>, values: Vec<f64>) -> Result<Self> {
        let index = index_groups(&groups)?;
        let n = groups.len();
        if values.len() != n * n {
            return Err(MixingError::data_format(format!(
                "matrix over {} groups needs {} values, got {}",
                n,
                n * n,
                values.len()
            )));
        }
        Ok(Self { groups, index, values })
    }

    /// Build by evaluating `f(row, col)` for every pair of indices.
    pub fn from_fn<F>(groups: Vec<AgeGroup>, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> f64,
    {
        let n = groups.len();
        let mut values = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                values.push(f(i, j));
            }
        }
        Self::new(groups, values)
    }

    /// Build from labelled cells. Every (row, col) pair over `groups` must be
    /// given exactly once and no cell may name a group outside `groups`.
    pub fn from_cells<I, R, C>(groups: Vec<AgeGroup>, cells: I) -> Result<Self>
    where
        I: IntoIterator<Item = (R, C, f64)>,
        R: AsRef<str>,
        C: AsRef<str>,
    {
        let index = index_groups(&groups)?;
        let n = groups.len();
        let mut slots: Vec<Option<f64>> = vec![None; n * n];
        for (row, col, value) in cells {
            let (row, col) = (row.as_ref(), col.as_ref());
            let i = *index
                .get(row)
                .ok_or_else(|| MixingError::data_format(format!("row group '{}' has no matching column", row)))?;
            let j = *index
                .get(col)
                .ok_or_else(|| MixingError::data_format(format!("column group '{}' has no matching row", col)))?;
            let slot = &mut slots[i * n + j];
            if slot.is_some() {
                return Err(MixingError::data_format(format!("duplicate cell ({}, {})", row, col)));
            }
            *slot = Some(value);
        }

        let mut values = Vec::with_capacity(n * n);
        for (k, slot) in slots.into_iter().enumerate() {
            let v = slot.ok_or_else(|| {
                MixingError::data_format(format!(
                    "missing cell ({}, {}); matrix is not square",
                    groups[k / n],
                    groups[k % n]
                ))
            })?;
            values.push(v);
        }
        Ok(Self { groups, index, values })
    }

    pub fn groups(&self) -> &[AgeGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Value at row `i`, column `j` by position.
    pub fn at(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.groups.len() + j]
    }

    /// Value for a (row, column) pair of labels.
    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        let i = *self.index.get(row)?;
        let j = *self.index.get(col)?;
        Some(self.at(i, j))
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Iterate `(row_group, col_group, value)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (&AgeGroup, &AgeGroup, f64)> + '_ {
        let n = self.groups.len();
        self.values
            .iter()
            .enumerate()
            .map(move |(k, v)| (&self.groups[k / n], &self.groups[k % n], *v))
    }

    /// Sum of all cells.
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

fn index_groups(groups: &[AgeGroup]) -> Result<HashMap<String, usize>> {
    let mut index = HashMap::with_capacity(groups.len());
    for (i, g) in groups.iter().enumerate() {
        if index.insert(g.label().to_string(), i).is_some() {
            return Err(MixingError::data_format(format!("duplicate age group '{}'", g)));
        }
    }
    Ok(index)
}
