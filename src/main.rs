mod cli;
mod printer;

use anyhow::{anyhow, Context, Result};
use cdt_gies::{Dataset, Gies, GraphExport, Settings, Skeleton};
use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;

use printer::{EdgePrinter, JsonPrinter};

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("CDT_GIES_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // CLI flags override the settings file and environment
    let mut settings = Settings::load();
    if let Some(path) = &args.rscript {
        settings.set("CDT_GIES_RSCRIPT", path.to_string_lossy());
    }
    if let Some(dir) = &args.temp_root {
        settings.set("CDT_GIES_TEMP_ROOT", dir.to_string_lossy());
    }
    if let Some(score) = &args.score {
        settings.set("CDT_GIES_SCORE", score.as_str());
    }
    if args.verbose {
        settings.set("CDT_GIES_VERBOSE", "true");
    }

    init_tracing(settings.verbose());

    let data = Dataset::from_csv_path(&args.data)
        .with_context(|| format!("reading dataset {}", args.data.display()))?;
    let skeleton = match &args.skeleton {
        Some(path) => Some(
            Skeleton::from_edge_list_path(path, args.directed)
                .with_context(|| format!("reading skeleton {}", path.display()))?,
        ),
        None => None,
    };

    let gies = Gies::from_settings(&settings).await?;

    let graph = tokio::select! {
        res = gies.orient(&data, skeleton.as_ref()) => res?,
        // Dropping the orientation future kills Rscript and removes the workspace.
        _ = tokio::signal::ctrl_c() => return Err(anyhow!("interrupted")),
    };

    let export = GraphExport::from(&graph);
    if args.json {
        JsonPrinter.print(&export)?;
    } else {
        EdgePrinter {
            color: std::io::stdout().is_terminal(),
        }
        .print(&export);
    }
    Ok(())
}
