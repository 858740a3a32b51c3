use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{MixingError, Result};
use crate::model::proportions::AgeProportions;

pub const AGE_COLUMN: &str = "AGE";
pub const SEX_COLUMN: &str = "SEX";
/// `SEX` value for rows that combine both sexes.
pub const SEX_BOTH: &str = "0";
/// `AGE` value of the row holding the all-ages total.
pub const AGE_ALL: u32 = 999;
pub const DEFAULT_ESTIMATE_COLUMN: &str = "CENSUS2010POP";

/// Load single-year age proportions from a census age/sex CSV.
///
/// Only both-sexes rows are used. The `AGE == 999` row supplies the total;
/// every other age's `estimate_column` count is divided by it.
pub fn load_age_proportions_csv(path: impl AsRef<Path>, estimate_column: &str) -> Result<AgeProportions> {
    let path = path.as_ref();
    let rdr = csv::Reader::from_path(path)?;
    let props = read_age_proportions(rdr, estimate_column)?;
    info!(
        path = %path.display(),
        column = estimate_column,
        ages = props.len(),
        "loaded age proportions"
    );
    Ok(props)
}

/// Parse age proportions from any CSV source.
pub fn read_age_proportions_from<R: Read>(source: R, estimate_column: &str) -> Result<AgeProportions> {
    read_age_proportions(csv::Reader::from_reader(source), estimate_column)
}

fn read_age_proportions<R: Read>(mut rdr: csv::Reader<R>, estimate_column: &str) -> Result<AgeProportions> {
    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| MixingError::data_format(format!("population table has no '{}' column", name)))
    };
    let age_col = column(AGE_COLUMN)?;
    let sex_col = column(SEX_COLUMN)?;
    let pop_col = column(estimate_column)?;

    let mut counts = BTreeMap::new();
    let mut total = None;
    let mut skipped = 0usize;
    for result in rdr.records() {
        let record = result?;
        if record.get(sex_col).map(str::trim) != Some(SEX_BOTH) {
            skipped += 1;
            continue;
        }
        let age_field = record.get(age_col).unwrap_or("").trim();
        let age: u32 = age_field
            .parse()
            .map_err(|_| MixingError::data_format(format!("non-numeric {} '{}'", AGE_COLUMN, age_field)))?;
        let pop_field = record.get(pop_col).unwrap_or("").trim();
        let pop: f64 = pop_field.parse().map_err(|_| {
            MixingError::data_format(format!("non-numeric {} '{}' at age {}", estimate_column, pop_field, age))
        })?;

        if age == AGE_ALL {
            total = Some(pop);
        } else {
            counts.insert(age, pop);
        }
    }
    debug!(skipped, "ignored rows not covering both sexes");

    let total = total.ok_or_else(|| {
        MixingError::data_format(format!(
            "population table has no all-ages row ({} = {}, {} = {})",
            AGE_COLUMN, AGE_ALL, SEX_COLUMN, SEX_BOTH
        ))
    })?;
    AgeProportions::from_counts(counts, total)
}
