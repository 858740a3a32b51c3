use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::error::{MixingError, Result};
use crate::io::AGE_GROUP_HEADER;
use crate::model::age_group::AgeGroup;
use crate::model::matrix::MixingMatrix;

/// Load a square mixing matrix from CSV.
///
/// The header names an `Age group` column followed by one column per age
/// group; each row gives a group label followed by its contact rates. Row
/// order may differ from column order, but both must list the same groups.
pub fn load_mixing_matrix_csv(path: impl AsRef<Path>) -> Result<MixingMatrix> {
    let path = path.as_ref();
    let rdr = csv::ReaderBuilder::new().has_headers(true).from_path(path)?;
    let matrix = read_mixing_matrix(rdr)?;
    info!(path = %path.display(), groups = matrix.len(), "loaded mixing matrix");
    Ok(matrix)
}

/// Parse a mixing matrix from any CSV source.
pub fn read_mixing_matrix_from<R: Read>(source: R) -> Result<MixingMatrix> {
    read_mixing_matrix(csv::ReaderBuilder::new().has_headers(true).from_reader(source))
}

fn read_mixing_matrix<R: Read>(mut rdr: csv::Reader<R>) -> Result<MixingMatrix> {
    let headers = rdr.headers()?.clone();
    let label_col = headers
        .iter()
        .position(|h| h.trim() == AGE_GROUP_HEADER)
        .ok_or_else(|| MixingError::data_format(format!("mixing table has no '{}' column", AGE_GROUP_HEADER)))?;

    let columns: Vec<(usize, AgeGroup)> = headers
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != label_col)
        .map(|(idx, h)| AgeGroup::parse(h.trim()).map(|g| (idx, g)))
        .collect::<Result<_>>()?;

    let mut cells: Vec<(String, String, f64)> = Vec::with_capacity(columns.len() * columns.len());
    for result in rdr.records() {
        let record = result?;
        let row = record
            .get(label_col)
            .map(str::trim)
            .ok_or_else(|| MixingError::data_format("mixing row without an age group"))?;
        for (idx, col) in &columns {
            let field = record.get(*idx).unwrap_or("").trim();
            let value: f64 = field.parse().map_err(|_| {
                MixingError::data_format(format!("non-numeric mixing value '{}' at ({}, {})", field, row, col))
            })?;
            cells.push((row.to_string(), col.label().to_string(), value));
        }
    }

    let groups = columns.into_iter().map(|(_, g)| g).collect();
    MixingMatrix::from_cells(groups, cells)
}
