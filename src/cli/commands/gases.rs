//! Gases command implementation
//!
//! Classifies one set of gas concentrations given on the command line with
//! both the Duval triangle and the ternary ratio method.

use super::shared::{ProcessingStats, setup_logging};
use crate::app::models::GasConcentrations;
use crate::app::services::duval::{classify_duval, duval_projection};
use crate::app::services::ternary::classify_ternary;
use crate::cli::args::GasesArgs;
use anyhow::Result;
use colored::*;
use std::time::Instant;
use tracing::debug;

/// Gases command runner
pub async fn run_gases(args: GasesArgs) -> Result<ProcessingStats> {
    let start_time = Instant::now();

    setup_logging(&args.logging)?;
    args.validate()?;

    let gases = GasConcentrations {
        hydrogen: args.hydrogen,
        methane: args.methane,
        ethane: args.ethane,
        ethylene: args.ethylene,
        acetylene: args.acetylene,
        ..Default::default()
    };
    debug!("Classifying {:?}", gases);

    let duval = classify_duval(&gases);
    let ternary = classify_ternary(&gases);

    println!("{}", "Duval Triangle 1".bright_green().bold());
    match duval.percentages {
        Some(p) => {
            let (x, y) = duval_projection(p.ch4, p.c2h4, p.c2h2);
            println!(
                "  {} CH4 {:.2}%  C2H4 {:.2}%  C2H2 {:.2}%",
                "Shares:".bright_cyan(),
                p.ch4,
                p.c2h4,
                p.c2h2
            );
            println!("  {} ({:.3}, {:.3})", "Projection:".bright_cyan(), x, y);
        }
        None => println!("  {} -", "Shares:".bright_cyan()),
    }
    println!(
        "  {} {}",
        "Zone:".bright_cyan(),
        duval.zone.as_str().bright_white().bold()
    );

    println!("\n{}", "Ternary ratios".bright_green().bold());
    match ternary.percentages {
        Some(p) => println!(
            "  {} {:.2}%  {:.2}%  {:.2}%",
            "Shares:".bright_cyan(),
            p.p1,
            p.p2,
            p.p3
        ),
        None => println!("  {} -", "Shares:".bright_cyan()),
    }
    println!(
        "  {} {}",
        "Zone:".bright_cyan(),
        ternary.zone.as_str().bright_white().bold()
    );

    Ok(ProcessingStats {
        records_classified: 1,
        processing_time: start_time.elapsed(),
        ..Default::default()
    })
}
