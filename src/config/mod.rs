use std::{
    collections::HashMap,
    env,
    fs,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use directories::BaseDirs;

use crate::error::Result;
use crate::gies::{GiesConfig, Score};

/// Layered settings: built-in defaults, then the rc file, then `CDT_GIES_*` env vars.
#[derive(Debug, Clone)]
pub struct Settings {
    inner: HashMap<String, String>,
    pub settings_path: PathBuf,
}

impl Settings {
    pub fn load() -> Self {
        Self::load_from(&default_settings_path())
    }

    pub fn load_from(path: &Path) -> Self {
        let mut map = default_map();

        if path.exists() {
            if let Ok(file) = fs::File::open(path) {
                let reader = BufReader::new(file);
                for line in reader.lines().map_while(|l| l.ok()) {
                    let line = line.trim();
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    if let Some((k, v)) = line.split_once('=') {
                        map.insert(k.trim().to_string(), v.trim().to_string());
                    }
                }
            }
        }

        // Environment takes precedence over the file
        for (k, v) in env::vars() {
            if is_settings_key(&k) {
                map.insert(k, v);
            }
        }

        Self {
            inner: map,
            settings_path: path.to_path_buf(),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).cloned()
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.inner.insert(key.to_string(), value.into());
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key)
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false)
    }

    pub fn rscript(&self) -> PathBuf {
        self.get("CDT_GIES_RSCRIPT")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("Rscript"))
    }

    pub fn temp_root(&self) -> PathBuf {
        self.get("CDT_GIES_TEMP_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(env::temp_dir)
    }

    pub fn verbose(&self) -> bool {
        self.get_bool("CDT_GIES_VERBOSE")
    }

    /// Score and verbosity as an immutable per-call configuration.
    pub fn gies_config(&self) -> Result<GiesConfig> {
        let score: Score = self
            .get("CDT_GIES_SCORE")
            .unwrap_or_else(|| "obs".into())
            .parse()?;
        Ok(GiesConfig {
            score,
            verbose: self.verbose(),
        })
    }
}

fn is_settings_key(k: &str) -> bool {
    const KEYS: &[&str] = &[
        "CDT_GIES_RSCRIPT",
        "CDT_GIES_TEMP_ROOT",
        "CDT_GIES_SCORE",
        "CDT_GIES_VERBOSE",
    ];

    KEYS.contains(&k)
}

fn default_settings_path() -> PathBuf {
    let base = BaseDirs::new()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.config"));
    base.join("cdt_gies").join("settings")
}

fn default_map() -> HashMap<String, String> {
    let mut m = HashMap::new();
    m.insert("CDT_GIES_RSCRIPT".into(), "Rscript".into());
    m.insert(
        "CDT_GIES_TEMP_ROOT".into(),
        env::temp_dir().to_string_lossy().into_owned(),
    );
    m.insert("CDT_GIES_SCORE".into(), "obs".into());
    m.insert("CDT_GIES_VERBOSE".into(), "false".into());
    m
}
