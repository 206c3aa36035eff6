//! Layered configuration for embedpack.
//!
//! Values are merged from lowest to highest priority:
//!
//! 1. Built-in defaults
//! 2. A TOML file (`embedpack.toml` in the working directory, or an explicit path)
//! 3. Environment variables prefixed with `EMBEDPACK_` (e.g. `EMBEDPACK_GENERATED_BY`)
//! 4. Command-line overrides
//!
//! ```toml
//! source = "web/dist"
//! output = "src/assets.rs"
//! generated_by = "make assets"
//! cfg = "not(debug_assertions)"
//! ```

pub mod error;

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_FILE: &str = "embedpack.toml";
/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "EMBEDPACK_";
/// Name written into the generated header when nothing else is configured.
pub const DEFAULT_GENERATED_BY: &str = "embedpack";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory (or single file) whose regular files become assets.
    pub source: PathBuf,
    /// Rust source file to generate.
    pub output: PathBuf,
    /// Tool name written into the "Code generated by" header.
    #[serde(default = "default_generated_by")]
    pub generated_by: String,
    /// `cfg` predicate the generated module is gated behind.
    #[serde(default)]
    pub cfg: Option<String>,
    /// Unix timestamp (seconds) recorded as the generation time; "now" when unset.
    #[serde(default)]
    pub timestamp: Option<u64>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

fn default_generated_by() -> String {
    DEFAULT_GENERATED_BY.to_string()
}

/// Values given on the command line. Unset fields leave lower layers alone.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cfg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_symlinks: Option<bool>,
}

impl Config {
    /// Build the merged provider stack without extracting it.
    ///
    /// An explicit `file` must exist; the default file is optional.
    pub fn figment(file: Option<&Path>, overrides: &Overrides) -> Result<Figment> {
        let file = match file {
            Some(path) if !path.is_file() => exn::bail!(ErrorKind::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => Some(PathBuf::from(DEFAULT_FILE)).filter(|path| path.is_file()),
        };
        let mut figment = Figment::new();
        if let Some(file) = file {
            figment = figment.merge(Toml::file_exact(file));
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX)).merge(Serialized::globals(overrides)))
    }

    /// Load, merge, and validate the configuration.
    pub fn load(file: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let config: Self = Self::figment(file, overrides)?.extract().or_raise(|| ErrorKind::Load)?;
        let config = config.normalize()?;
        tracing::debug!(?config, "Loaded configuration");
        Ok(config)
    }

    /// Blank optional strings mean "unset"; the generator name falls back to
    /// the default. Values that would corrupt the generated file are rejected.
    fn normalize(mut self) -> Result<Self> {
        if self.source.as_os_str().is_empty() {
            exn::bail!(ErrorKind::Invalid("source path is empty".to_string()));
        }
        if self.output.as_os_str().is_empty() {
            exn::bail!(ErrorKind::Invalid("output path is empty".to_string()));
        }
        self.generated_by = match self.generated_by.trim() {
            "" => default_generated_by(),
            name if name.contains(['\n', '\r']) => {
                exn::bail!(ErrorKind::Invalid("generated_by must be a single line".to_string()))
            },
            name => name.to_string(),
        };
        self.cfg = self.cfg.map(|cfg| cfg.trim().to_string()).filter(|cfg| !cfg.is_empty());
        if let Some(cfg) = &self.cfg
            && cfg.contains(['\n', '\r', ']'])
        {
            exn::bail!(ErrorKind::Invalid(format!("cfg predicate `{cfg}` is not a single expression")));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use std::fs;

    fn overrides(source: &str, output: &str) -> Overrides {
        Overrides {
            source: Some(PathBuf::from(source)),
            output: Some(PathBuf::from(output)),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        Jail::expect_with(|_jail| {
            let config = Config::load(None, &overrides("web", "src/assets.rs")).unwrap();
            assert_eq!(config.source, PathBuf::from("web"));
            assert_eq!(config.output, PathBuf::from("src/assets.rs"));
            assert_eq!(config.generated_by, DEFAULT_GENERATED_BY);
            assert_eq!(config.cfg, None);
            assert_eq!(config.timestamp, None);
            assert!(!config.follow_symlinks);
            Ok(())
        });
    }

    #[test]
    fn test_default_file_is_optional() {
        Jail::expect_with(|jail| {
            assert!(!jail.directory().join(DEFAULT_FILE).exists());
            let config = Config::load(None, &overrides("web", "out.rs")).unwrap();
            assert_eq!(config.source, PathBuf::from("web"));
            Ok(())
        });
    }

    #[test]
    fn test_missing_required_fields() {
        Jail::expect_with(|_jail| {
            let err = Config::load(None, &Overrides::default()).unwrap_err();
            assert!(matches!(&*err, ErrorKind::Load));
            Ok(())
        });
    }

    #[test]
    fn test_layering() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_FILE,
                r#"
                source = "from-file"
                output = "from-file.rs"
                generated_by = "make assets"
                timestamp = 1700000000
                "#,
            )?;
            jail.set_env("EMBEDPACK_OUTPUT", "from-env.rs");
            jail.set_env("EMBEDPACK_FOLLOW_SYMLINKS", "true");
            let cli = Overrides {
                cfg: Some("feature = \"embed\"".to_string()),
                timestamp: Some(42),
                ..Default::default()
            };
            let config = Config::load(None, &cli).unwrap();
            assert_eq!(config.source, PathBuf::from("from-file"));
            assert_eq!(config.output, PathBuf::from("from-env.rs"));
            assert_eq!(config.generated_by, "make assets");
            assert_eq!(config.cfg.as_deref(), Some("feature = \"embed\""));
            assert_eq!(config.timestamp, Some(42));
            assert!(config.follow_symlinks);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("custom.toml");
        fs::write(&path, "source = \"assets\"\noutput = \"out.rs\"\n").unwrap();
        let config = Config::load(Some(path.as_path()), &Overrides::default()).unwrap();
        assert_eq!(config.source, PathBuf::from("assets"));

        let missing = temp_dir.path().join("missing.toml");
        let err = Config::load(Some(missing.as_path()), &Overrides::default()).unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(p) if *p == missing));
    }

    #[test]
    fn test_blank_values_normalize() {
        Jail::expect_with(|_jail| {
            let cli = Overrides {
                generated_by: Some("   ".to_string()),
                cfg: Some(" ".to_string()),
                ..overrides("web", "out.rs")
            };
            let config = Config::load(None, &cli).unwrap();
            assert_eq!(config.generated_by, DEFAULT_GENERATED_BY);
            assert_eq!(config.cfg, None);
            Ok(())
        });
    }

    #[test]
    fn test_rejects_multiline_values() {
        Jail::expect_with(|_jail| {
            let cli = Overrides {
                generated_by: Some("evil\nfn main() {}".to_string()),
                ..overrides("web", "out.rs")
            };
            let err = Config::load(None, &cli).unwrap_err();
            assert!(matches!(&*err, ErrorKind::Invalid(_)));

            let cli = Overrides {
                cfg: Some("unix)]\n#![cfg(all()".to_string()),
                ..overrides("web", "out.rs")
            };
            assert!(Config::load(None, &cli).is_err());
            Ok(())
        });
    }
}
