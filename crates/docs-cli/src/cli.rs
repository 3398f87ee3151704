//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// docs - Lint and repair a docs-cms documentation tree
#[derive(Parser, Debug)]
#[command(name = "docs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct GlobalArgs {
    /// Show per-document detail and debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Repository root holding the docs tree
    #[arg(long, global = true, default_value = ".", env = "DOCS_REPO_ROOT")]
    pub repo_root: PathBuf,

    /// CMS directory relative to the repository root (default: docs-cms if present)
    #[arg(long, global = true, env = "DOCS_CMS_DIR")]
    pub cms_dir: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Validate every document
    ///
    /// Exit codes: 0 no errors, 1 validation errors, 2 usage or internal error.
    ///
    /// Examples:
    ///   docs validate                     # Full run, including the site build
    ///   docs validate --skip-build        # Documents only
    ///   docs validate --doc-type adr      # Only ADRs
    ///   docs validate --fix --skip-build  # Run `fix all` first
    Validate {
        /// Skip the site build check
        #[arg(long)]
        skip_build: bool,

        /// Apply every fix in `all` before validating
        #[arg(long)]
        fix: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Only validate documents of this type (adr, rfc, memo, prd, frd, prdfaq, generic)
        #[arg(long)]
        doc_type: Option<String>,
    },

    /// Apply a named fix, or `all`
    ///
    /// Use 'docs list-fixes' to see the catalog.
    ///
    /// Examples:
    ///   docs fix all --dry-run
    ///   docs fix trailing-whitespace --file docs-cms/adr/adr-001-use-rust.md
    ///   docs fix internal-links --dry-run --diff
    Fix {
        /// Fix name, or `all`
        name: String,

        /// Report changes without writing files
        #[arg(long)]
        dry_run: bool,

        /// Print a unified diff for every changed file
        #[arg(long)]
        diff: bool,

        /// Only fix these files instead of the whole tree
        #[arg(long = "file", value_name = "PATH")]
        files: Vec<PathBuf>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the available fixes
    ListFixes {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set, add, remove or rename a frontmatter field across documents
    ///
    /// Examples:
    ///   docs bulk-update --field status --value "In Review" --file docs-cms/rfcs/rfc-002-api.md
    ///   docs bulk-update --field tags --operation add --value platform
    ///   docs bulk-update --field date --operation rename --new-name created --dry-run
    BulkUpdate {
        /// Frontmatter key to change
        #[arg(long)]
        field: String,

        /// Value to set, add or remove
        #[arg(long)]
        value: Option<String>,

        /// One of set, add, remove, rename
        #[arg(long, default_value = "set")]
        operation: String,

        /// New key name for `rename`
        #[arg(long)]
        new_name: Option<String>,

        /// Report changes without writing files
        #[arg(long)]
        dry_run: bool,

        /// Only update these files instead of the whole tree
        #[arg(long = "file", value_name = "PATH")]
        files: Vec<PathBuf>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    ///
    /// Examples:
    ///   docs completions bash > ~/.local/share/bash-completion/completions/docs
    ///   docs completions zsh > ~/.zfunc/_docs
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_global_defaults() {
        let cli = Cli::parse_from(["docs", "list-fixes"]);
        assert!(!cli.global.verbose);
        assert_eq!(cli.global.repo_root, PathBuf::from("."));
        assert_eq!(cli.global.cms_dir, None);
        assert_eq!(cli.command, Commands::ListFixes { json: false });
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["docs", "validate", "-v", "--repo-root", "/tmp/repo", "--cms-dir", "site"]);
        assert!(cli.global.verbose);
        assert_eq!(cli.global.repo_root, PathBuf::from("/tmp/repo"));
        assert_eq!(cli.global.cms_dir.as_deref(), Some("site"));
    }

    #[test]
    fn parse_validate_flags() {
        let cli = Cli::parse_from(["docs", "validate", "--skip-build", "--fix", "--doc-type", "adr"]);
        assert_eq!(
            cli.command,
            Commands::Validate {
                skip_build: true,
                fix: true,
                json: false,
                doc_type: Some("adr".to_string()),
            }
        );
    }

    #[test]
    fn parse_fix_with_files() {
        let cli = Cli::parse_from(["docs", "fix", "all", "--dry-run", "--file", "a.md", "--file", "b.md"]);
        match cli.command {
            Commands::Fix {
                name,
                dry_run,
                files,
                diff,
                ..
            } => {
                assert_eq!(name, "all");
                assert!(dry_run);
                assert!(!diff);
                assert_eq!(files, vec![PathBuf::from("a.md"), PathBuf::from("b.md")]);
            }
            other => panic!("Expected Fix command, got {other:?}"),
        }
    }

    #[test]
    fn parse_fix_requires_name() {
        assert!(Cli::try_parse_from(["docs", "fix"]).is_err());
    }

    #[test]
    fn parse_bulk_update_defaults_to_set() {
        let cli = Cli::parse_from(["docs", "bulk-update", "--field", "status", "--value", "Accepted"]);
        assert!(matches!(
            cli.command,
            Commands::BulkUpdate { ref field, ref operation, ref value, .. }
                if field == "status" && operation == "set" && value.as_deref() == Some("Accepted")
        ));
    }

    #[test]
    fn parse_completions() {
        let cli = Cli::parse_from(["docs", "completions", "bash"]);
        assert_eq!(cli.command, Commands::Completions { shell: Shell::Bash });
    }
}
