//! agemix - re-bin a social contact matrix into coarser age groups
//!
//! Reads a mixing matrix and a census age/sex table, weights the matrix by
//! population share and prints it re-binned into the requested age groups.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agemix::io::matrix_out::write_matrix_csv;
use agemix::{format_matrix, AgeMixing, MixingConfig};

#[derive(Parser, Debug)]
#[command(name = "agemix")]
#[command(about = "Re-bin a social contact mixing matrix into coarser age groups")]
#[command(version)]
struct Args {
    /// TOML config file; flags below override its values
    #[arg(short, long, env = "AGEMIX_CONFIG")]
    config: Option<PathBuf>,

    /// Mixing matrix CSV [default: Age-Mixing.csv]
    #[arg(long, env = "AGEMIX_MIXING")]
    mixing: Option<PathBuf>,

    /// Census age/sex CSV [default: US-Age-Sex-Distribution.csv]
    #[arg(long, env = "AGEMIX_POPULATION")]
    population: Option<PathBuf>,

    /// Census column with population counts [default: CENSUS2010POP]
    #[arg(long, env = "AGEMIX_ESTIMATE_COLUMN")]
    estimate_column: Option<String>,

    /// Comma-separated target age groups [default: 0-20,21-64,65-100]
    #[arg(short, long, value_delimiter = ',', env = "AGEMIX_GROUPS")]
    groups: Option<Vec<String>>,

    /// Fail unless the target groups tile the source groups exactly
    #[arg(long)]
    strict: bool,

    /// Write the table here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> Result<(MixingConfig, Option<PathBuf>)> {
        let mut cfg = match &self.config {
            Some(path) => MixingConfig::from_toml_file(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => MixingConfig::default(),
        };
        if let Some(p) = self.mixing {
            cfg.mixing_path = p;
        }
        if let Some(p) = self.population {
            cfg.population_path = p;
        }
        if let Some(c) = self.estimate_column {
            cfg.estimate_column = c;
        }
        if let Some(g) = self.groups {
            cfg.target_groups = g.into_iter().map(|s| s.trim().to_string()).collect();
        }
        cfg.strict |= self.strict;
        Ok((cfg, self.output))
    }
}

fn main() -> Result<()> {
    // stdout carries the table, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agemix=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let (cfg, output) = Args::parse().into_config()?;
    cfg.check().context("Invalid configuration")?;
    let groups = cfg.parsed_target_groups()?;

    let mixing = AgeMixing::load(&cfg).with_context(|| {
        format!(
            "Failed to load inputs (mixing={}, population={})",
            cfg.mixing_path.display(),
            cfg.population_path.display()
        )
    })?;

    let matrix = if cfg.strict {
        mixing.new_matrix_checked(&groups)
    } else {
        mixing.new_matrix(&groups)
    }
    .context("Failed to re-bin mixing matrix")?;
    info!(groups = matrix.len(), total = matrix.total(), strict = cfg.strict, "re-binned mixing matrix");

    match output {
        Some(path) => {
            write_matrix_csv(&path, &matrix)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            info!(path = %path.display(), "wrote re-binned matrix");
        }
        None => print!("{}", format_matrix(&matrix)?),
    }

    Ok(())
}
