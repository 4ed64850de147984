//! Config command implementation

use super::shared::{ProcessingStats, load_configuration, setup_logging};
use crate::cli::args::ConfigArgs;
use anyhow::{Context, Result};

/// Print the effective configuration as TOML
///
/// The point table in effect is always written out in full, so the output
/// can be saved and edited as a config file.
pub async fn run_config(args: ConfigArgs) -> Result<ProcessingStats> {
    setup_logging(&args.logging)?;

    let config = load_configuration(args.config_file.as_deref(), args.profile)?;
    let effective = config.clone().with_scoring_table(config.scoring_table());

    let rendered = effective
        .to_toml_string()
        .context("Could not render configuration")?;
    print!("{}", rendered);

    Ok(ProcessingStats::default())
}
