use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "cdt-gies", about = "Learn a causal graph with GIES (R pcalg)", version)]
pub struct Cli {
    /// CSV dataset; the first line holds the column names.
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    /// Edge list (header line, then `cause,effect` rows) restricting allowed edges.
    #[arg(long, value_name = "EDGES")]
    pub skeleton: Option<PathBuf>,

    /// Read the skeleton as a directed graph. Directions are not used by GIES.
    #[arg(long, requires = "skeleton")]
    pub directed: bool,

    /// Score function: obs|observational or int|interventional.
    #[arg(long)]
    pub score: Option<String>,

    /// Stream R output and log progress.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Print the graph as JSON instead of an edge list.
    #[arg(long)]
    pub json: bool,

    /// Path to the Rscript executable.
    #[arg(long, value_name = "PATH")]
    pub rscript: Option<PathBuf>,

    /// Directory under which per-run workspaces are created.
    #[arg(long = "temp-root", value_name = "DIR")]
    pub temp_root: Option<PathBuf>,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directed_requires_skeleton() {
        assert!(Cli::try_parse_from(["cdt-gies", "data.csv", "--directed"]).is_err());
        let cli = Cli::try_parse_from([
            "cdt-gies",
            "data.csv",
            "--skeleton",
            "edges.csv",
            "--directed",
            "--score",
            "int",
        ])
        .unwrap();
        assert!(cli.directed);
        assert_eq!(cli.score.as_deref(), Some("int"));
    }
}
