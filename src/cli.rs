use clap::{ArgAction, Parser};
use embedpack_config::Overrides;
use std::path::PathBuf;

/// Pack a directory of static assets into a pre-compressed Rust module.
///
/// Options given here override `embedpack.toml` and `EMBEDPACK_*`
/// environment variables.
#[derive(Debug, Parser)]
#[command(name = "embedpack", version, about)]
pub struct Args {
    /// Directory (or single file) containing the assets to embed
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Rust source file to generate
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Gate the generated module behind `#![cfg(PREDICATE)]`
    #[arg(short = 'b', long = "cfg", value_name = "PREDICATE")]
    pub cfg: Option<String>,

    /// Generation time in Unix seconds [default: now]
    #[arg(short, long, value_name = "SECONDS")]
    pub timestamp: Option<u64>,

    /// Tool name written into the generated header
    #[arg(long, value_name = "NAME")]
    pub generated_by: Option<String>,

    /// Config file [default: ./embedpack.toml, if present]
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Descend into symlinked directories inside the input directory
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            source: self.input.clone(),
            output: self.output.clone(),
            generated_by: self.generated_by.clone(),
            cfg: self.cfg.clone(),
            timestamp: self.timestamp,
            // A flag can only switch this on; absence defers to lower layers.
            follow_symlinks: self.follow_symlinks.then_some(true),
        }
    }

    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;

    #[test]
    fn test_command_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_short_flags() {
        let args =
            Args::try_parse_from(["embedpack", "-i", "web", "-o", "src/assets.rs", "-b", "unix", "-t", "1700000000"])
                .unwrap();
        let overrides = args.overrides();
        assert_eq!(overrides.source, Some(PathBuf::from("web")));
        assert_eq!(overrides.output, Some(PathBuf::from("src/assets.rs")));
        assert_eq!(overrides.cfg.as_deref(), Some("unix"));
        assert_eq!(overrides.timestamp, Some(1_700_000_000));
        assert_eq!(overrides.generated_by, None);
        assert_eq!(overrides.follow_symlinks, None);
    }

    #[test]
    fn test_long_flags() {
        let args = Args::try_parse_from([
            "embedpack",
            "--input",
            "web",
            "--generated-by",
            "make assets",
            "--config",
            "ci.toml",
            "--follow-symlinks",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("ci.toml")));
        let overrides = args.overrides();
        assert_eq!(overrides.generated_by.as_deref(), Some("make assets"));
        assert_eq!(overrides.follow_symlinks, Some(true));
        assert_eq!(overrides.output, None);
    }

    #[test]
    fn test_invalid_timestamp() {
        assert!(Args::try_parse_from(["embedpack", "-t", "yesterday"]).is_err());
        assert!(Args::try_parse_from(["embedpack", "-t", "-5"]).is_err());
    }

    #[rstest]
    #[case(&["embedpack"], "info")]
    #[case(&["embedpack", "-v"], "debug")]
    #[case(&["embedpack", "-vv"], "trace")]
    #[case(&["embedpack", "-v", "-v", "-v"], "trace")]
    fn test_log_level(#[case] argv: &[&str], #[case] expected: &str) {
        assert_eq!(Args::try_parse_from(argv).unwrap().log_level(), expected);
    }
}
