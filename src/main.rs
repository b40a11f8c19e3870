use std::path::Path;

use anyhow::{bail, Error};
use clap::error::ErrorKind;
use clap::Parser;
use ftail::Ftail;
use log::{info, LevelFilter};

use mutpath::costs::{CostKind, CostModel};
use mutpath::io::write_sweep_to_file;
use mutpath::render::{MatrixPreview, StepListing};
use mutpath::sweep::sweep;
use mutpath::EditDistance;

mod cli;
use crate::cli::{Cli, ConfigBuilder, Task};

type Result<T> = std::result::Result<T, Error>;

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) if matches!(error.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            error.exit()
        }
        Err(error) => {
            bail!("Unable to parse command line arguments: \n {}", error)
        }
    };
    if Ftail::new()
        .console(LevelFilter::from(cli.log_level))
        .init()
        .is_err()
    {
        bail!("Unable to set up logging");
    }
    info!("Successfully parsed the command line parameters");

    let cfg_build: ConfigBuilder = cli.into();
    let cfg = cfg_build.setup()?;

    info!("mutpath run started.");
    info!("{}", cfg);

    info!("Loading source from {}.", cfg.source);
    let x = cfg.source.load(&cfg.alphabet, cfg.handling)?;
    info!("Loading target from {}.", cfg.target);
    let y = cfg.target.load(&cfg.alphabet, cfg.handling)?;

    match cfg.task {
        Task::Align {
            show_matrix,
            show_decisions,
            preview,
            max_steps,
        } => {
            let result = EditDistance::align(&x, &y, &cfg.costs)?;
            println!("Source: {}", String::from_utf8_lossy(&x));
            println!("Target: {}", String::from_utf8_lossy(&y));
            println!("Costs: {}", cfg.costs);
            if show_matrix {
                println!("\nCost matrix:");
                print!(
                    "{}",
                    MatrixPreview::new(result.cost_matrix(), &x, &y).limit(preview)
                );
            }
            if show_decisions {
                println!("\nDecision matrix:");
                print!(
                    "{}",
                    MatrixPreview::new(result.decision_matrix(), &x, &y).limit(preview)
                );
            }
            println!("\nMinimum edit cost: {}", result.cost());
            println!("\nEdit steps:");
            print!("{}", StepListing::new(result.script()).limit(max_steps));
            println!("\nAlignment:");
            println!("{}", result.alignment(&x, &y)?.render(&x, &y)?);
        }
        Task::Sweep {
            vary,
            values,
            output,
        } => run_sweep(&x, &y, &cfg.costs, vary, &values, output.as_deref())?,
    }

    info!("mutpath run finished.");
    Ok(())
}

fn run_sweep(
    x: &[u8],
    y: &[u8],
    costs: &CostModel,
    vary: CostKind,
    values: &[f64],
    output: Option<&Path>,
) -> Result<()> {
    let points = sweep(x, y, costs, vary, values)?;
    println!("{vary}\tcost\tedits");
    for point in &points {
        println!("{}\t{}\t{}", point.value, point.cost, point.edits);
    }
    if let Some(path) = output {
        info!("Putting sweep results in {}", path.display());
        write_sweep_to_file(&points, vary, path)?;
    }
    Ok(())
}
