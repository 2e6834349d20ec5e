//! Typed substitutions for the R script template.

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::error::GiesError;
use crate::workspace::{DATA_FILE, GAPS_FILE, RESULT_FILE};

/// Score criterion handed to `pcalg::gies`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Score {
    #[default]
    Observational,
    Interventional,
}

impl Score {
    /// Name of the pcalg score class.
    pub fn function_name(self) -> &'static str {
        match self {
            Score::Observational => "GaussL0penObsScore",
            Score::Interventional => "GaussL0penIntScore",
        }
    }
}

impl FromStr for Score {
    type Err = GiesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "obs" | "observational" => Ok(Score::Observational),
            "int" | "interventional" => Ok(Score::Interventional),
            _ => Err(GiesError::UnknownScore(s.to_string())),
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Observational => f.write_str("observational"),
            Score::Interventional => f.write_str("interventional"),
        }
    }
}

/// Per-call settings. Immutable once built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GiesConfig {
    pub score: Score,
    pub verbose: bool,
}

/// Values substituted into the template's `{FOLDER}`, `{FILE}`, `{SKELETON}`,
/// `{GAPS}`, `{SCORE}`, `{VERBOSE}` and `{OUTPUT}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptArguments {
    pub folder: PathBuf,
    pub file: &'static str,
    pub skeleton: bool,
    pub gaps: &'static str,
    pub score: Score,
    pub verbose: bool,
    pub output: &'static str,
}

impl ScriptArguments {
    pub fn new(folder: &Path, config: &GiesConfig, skeleton: bool) -> Self {
        Self {
            folder: folder.to_path_buf(),
            file: DATA_FILE,
            skeleton,
            gaps: GAPS_FILE,
            score: config.score,
            verbose: config.verbose,
            output: RESULT_FILE,
        }
    }

    /// Folder as an R string literal body, with a trailing slash.
    pub fn folder_literal(&self) -> String {
        let mut folder = self.folder.to_string_lossy().replace('\\', "/");
        if !folder.ends_with('/') {
            folder.push('/');
        }
        folder
    }

    pub fn render(&self, template: &str) -> String {
        template
            .replace("{FOLDER}", &self.folder_literal())
            .replace("{FILE}", self.file)
            .replace("{SKELETON}", r_bool(self.skeleton))
            .replace("{GAPS}", self.gaps)
            .replace("{SCORE}", self.score.function_name())
            .replace("{VERBOSE}", r_bool(self.verbose))
            .replace("{OUTPUT}", self.output)
    }
}

fn r_bool(b: bool) -> &'static str {
    if b {
        "TRUE"
    } else {
        "FALSE"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_names() {
        assert_eq!("obs".parse::<Score>().unwrap(), Score::Observational);
        assert_eq!("Interventional".parse::<Score>().unwrap(), Score::Interventional);
        assert_eq!(Score::Interventional.function_name(), "GaussL0penIntScore");
        assert!(matches!(
            "bic".parse::<Score>(),
            Err(GiesError::UnknownScore(ref s)) if s == "bic"
        ));
    }

    #[test]
    fn render_fills_every_placeholder() {
        let cfg = GiesConfig {
            score: Score::Interventional,
            verbose: true,
        };
        let args = ScriptArguments::new(Path::new("/tmp/cdt_gies42"), &cfg, true);
        let out = args.render(
            "{FOLDER}{FILE} {FOLDER}{GAPS} {SKELETON} {SCORE} {VERBOSE} {FOLDER}{OUTPUT}",
        );
        assert_eq!(
            out,
            "/tmp/cdt_gies42/data.csv /tmp/cdt_gies42/fixedgaps.csv TRUE \
             GaussL0penIntScore TRUE /tmp/cdt_gies42/result.csv"
        );
    }

    #[test]
    fn template_has_no_unknown_placeholders() {
        let args = ScriptArguments::new(Path::new("/w"), &GiesConfig::default(), false);
        let rendered = args.render(super::super::GIES_TEMPLATE);
        for key in [
            "{FOLDER}", "{FILE}", "{SKELETON}", "{GAPS}", "{SCORE}", "{VERBOSE}", "{OUTPUT}",
        ] {
            assert!(!rendered.contains(key), "{} left in script", key);
        }
        assert!(rendered.contains("GaussL0penObsScore"));
    }
}
