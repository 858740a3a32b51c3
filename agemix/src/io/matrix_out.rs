use std::path::Path;

use crate::error::{MixingError, Result};
use crate::io::AGE_GROUP_HEADER;
use crate::model::matrix::MixingMatrix;

/// Render a matrix as CSV, the inverse of [`crate::io::contact::load_mixing_matrix_csv`].
///
/// Groups are ordered by lower age bound; ties keep their matrix order.
pub fn format_matrix(matrix: &MixingMatrix) -> Result<String> {
    let mut order: Vec<usize> = (0..matrix.len()).collect();
    order.sort_by_key(|&i| matrix.groups()[i].min());

    let mut wtr = csv::WriterBuilder::new().from_writer(Vec::new());

    let mut header = Vec::with_capacity(order.len() + 1);
    header.push(AGE_GROUP_HEADER.to_string());
    header.extend(order.iter().map(|&i| matrix.groups()[i].label().to_string()));
    wtr.write_record(&header)?;

    for &i in &order {
        let mut row = Vec::with_capacity(order.len() + 1);
        row.push(matrix.groups()[i].label().to_string());
        row.extend(order.iter().map(|&j| matrix.at(i, j).to_string()));
        wtr.write_record(&row)?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| MixingError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| MixingError::data_format(e.to_string()))
}

/// Write the formatted matrix to `path`, replacing any existing file.
pub fn write_matrix_csv(path: impl AsRef<Path>, matrix: &MixingMatrix) -> Result<()> {
    std::fs::write(path, format_matrix(matrix)?)?;
    Ok(())
}
