use anyhow::Context;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use corner_mesh::config::{CliArgs, InspectConfig};
use corner_mesh::pipeline::{Pipeline, format_reports};

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // Init tracing
    let filter = if args.verbose {
        EnvFilter::new("corner_mesh=debug")
    } else {
        EnvFilter::new("corner_mesh=info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config: InspectConfig = args.into();

    if let Some(threads) = config.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure rayon thread pool")?;
    }

    match Pipeline::run(&config) {
        Ok(result) => {
            let report = format_reports(&result.reports, config.json)
                .context("Failed to render report")?;
            print!("{report}");
            if !config.json {
                println!(
                    "Done: {} meshes inspected in {:.2}s",
                    result.reports.len(),
                    result.duration.as_secs_f64()
                );
            }
            Ok(())
        }
        Err(e) => {
            error!(%e, "Inspection failed");
            Err(anyhow::anyhow!(e)).context("corner-mesh inspection failed")
        }
    }
}
