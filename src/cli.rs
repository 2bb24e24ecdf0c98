use crate::config::ConfigOverrides;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mdtoc")]
#[command(
    version,
    about = "Generate a table of contents for all markdown files in a repository",
    long_about = None
)]
pub struct Cli {
    /// Directory to scan for markdown files (defaults to current directory)
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Output file to write the TOC to, relative to the scanned directory
    #[arg(short, long, default_value = "README.md")]
    pub output: PathBuf,

    /// Path to config file (defaults to .mdtoc, then ~/.mdtoc)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Maximum directory depth to traverse [default: 10]
    #[arg(short = 'd', long)]
    pub max_depth: Option<usize>,

    /// Title for the table of contents [default: "Table of Contents"]
    #[arg(short, long)]
    pub title: Option<String>,

    /// Show what would be generated without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Insert the TOC between two occurrences of this marker [default: "<!-- TOC -->"]
    #[arg(long = "insert-at", value_name = "MARKER")]
    pub insert_marker: Option<String>,

    /// Leave README.md files (any case) out of the TOC
    #[arg(long, overrides_with = "no_exclude_readme")]
    pub exclude_readme: bool,

    /// Keep README.md files even when the config file excludes them
    #[arg(long, overrides_with = "exclude_readme")]
    pub no_exclude_readme: bool,

    /// Ignore pattern, repeatable; replaces the configured set
    #[arg(long, action = ArgAction::Append, value_name = "GLOB")]
    pub ignore: Vec<String>,

    /// Write the default configuration to this file and exit
    #[arg(long, value_name = "FILE")]
    pub init_config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Configuration values the user passed explicitly
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            ignore: (!self.ignore.is_empty()).then(|| self.ignore.clone()),
            max_depth: self.max_depth,
            exclude_readme: self.exclude_readme_override(),
            title: self.title.clone(),
            insert_marker: self.insert_marker.clone(),
        }
    }

    fn exclude_readme_override(&self) -> Option<bool> {
        if self.exclude_readme {
            Some(true)
        } else if self.no_exclude_readme {
            Some(false)
        } else {
            None
        }
    }

    /// Output file location, resolved against the scanned directory
    pub fn output_path(&self) -> PathBuf {
        self.directory.join(&self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["mdtoc"]);

        assert_eq!(cli.directory, PathBuf::from("."));
        assert_eq!(cli.output, PathBuf::from("README.md"));
        assert!(!cli.dry_run);
        assert_eq!(cli.overrides(), ConfigOverrides::default());
    }

    #[test]
    fn test_explicit_flags_become_overrides() {
        let cli = Cli::parse_from([
            "mdtoc",
            "docs",
            "-d",
            "2",
            "-t",
            "Docs",
            "--insert-at",
            "<!-- INDEX -->",
            "--exclude-readme",
            "--ignore",
            "drafts/**",
            "--ignore",
            "*.wip.md",
        ]);

        let overrides = cli.overrides();
        assert_eq!(overrides.max_depth, Some(2));
        assert_eq!(overrides.title.as_deref(), Some("Docs"));
        assert_eq!(overrides.insert_marker.as_deref(), Some("<!-- INDEX -->"));
        assert_eq!(overrides.exclude_readme, Some(true));
        assert_eq!(
            overrides.ignore,
            Some(vec!["drafts/**".to_string(), "*.wip.md".to_string()])
        );
        assert_eq!(cli.output_path(), PathBuf::from("docs/README.md"));
    }

    #[test]
    fn test_ignore_does_not_swallow_directory() {
        let cli = Cli::parse_from(["mdtoc", "--ignore", "drafts/**", "docs"]);

        assert_eq!(cli.directory, PathBuf::from("docs"));
        assert_eq!(cli.overrides().ignore, Some(vec!["drafts/**".to_string()]));
    }

    #[test]
    fn test_no_exclude_readme_overrides_config() {
        use crate::config::{Config, ConfigFile};

        let file = ConfigFile {
            exclude_readme: Some(true),
            ..Default::default()
        };

        let cli = Cli::parse_from(["mdtoc", "--no-exclude-readme"]);
        assert_eq!(cli.overrides().exclude_readme, Some(false));
        assert!(!Config::resolve(Some(&file), &cli.overrides()).exclude_readme);

        let cli = Cli::parse_from(["mdtoc"]);
        assert_eq!(cli.overrides().exclude_readme, None);
        assert!(Config::resolve(Some(&file), &cli.overrides()).exclude_readme);
    }

    #[test]
    fn test_last_readme_flag_wins() {
        let cli = Cli::parse_from(["mdtoc", "--exclude-readme", "--no-exclude-readme"]);
        assert_eq!(cli.overrides().exclude_readme, Some(false));

        let cli = Cli::parse_from(["mdtoc", "--no-exclude-readme", "--exclude-readme"]);
        assert_eq!(cli.overrides().exclude_readme, Some(true));
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
