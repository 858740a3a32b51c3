use std::collections::BTreeMap;

use agemix::io::contact_synth::{synthetic_mixing_matrix, uniform_age_groups};
use agemix::model::age_group::parse_groups;
use agemix::{format_matrix, AgeMixing, AgeProportions};

fn main() -> anyhow::Result<()> {
    // Toy population over 0-99 in five-year groups; replace with census CSV loaders for real runs.
    let raw = synthetic_mixing_matrix(uniform_age_groups(20, 5)?)?;

    // Slowly shrinking cohorts so older groups carry less weight.
    let counts: BTreeMap<u32, f64> = (0..100).map(|age| (age, 5_000.0 - 30.0 * age as f64)).collect();
    let total: f64 = counts.values().sum();
    let proportions = AgeProportions::from_counts(counts, total)?;

    let mixing = AgeMixing::new(raw, proportions)?;
    let groups = parse_groups(&["0-19", "20-64", "65-99"])?;
    let matrix = mixing.new_matrix_checked(&groups)?;

    print!("{}", format_matrix(&matrix)?);
    println!();
    println!("scaled_total={:.6},rebinned_total={:.6}", mixing.scaled().total(), matrix.total());

    Ok(())
}
