//! Packwright - script-to-executable build orchestrator.
//!
//! Wraps an external packaging tool: submit a script, get back exactly one
//! standalone executable (or a structured failure with the tool's log).

mod artifact;
mod audit;
mod commands;
mod config;
mod error;
mod orchestrator;
mod preflight;
mod process;
mod workspace;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "packwright")]
#[command(about = "Build orchestrator for script-to-executable packaging", version)]
#[command(
    after_help = "QUICK START:\n  packwright preflight          Check the packaging tool is installed\n  packwright build hello.py     Build hello.exe\n  packwright digest hello.exe   Print the artifact's SHA-256"
)]
struct Cli {
    /// Base directory for workspaces, artifacts, and the audit log
    #[arg(long, global = true, default_value = ".")]
    base_dir: PathBuf,

    /// Packaging tool command name
    #[arg(long, global = true)]
    tool: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a script into a standalone executable
    Build {
        /// Path to the source script
        script: PathBuf,

        /// Produce a directory instead of a single executable file
        #[arg(long)]
        onedir: bool,

        /// Icon file to embed
        #[arg(long)]
        icon: Option<PathBuf>,

        /// Data-bundling spec passed to the tool (SRC:DEST)
        #[arg(long)]
        add_data: Option<String>,

        /// Verbose tool output
        #[arg(short, long)]
        verbose: bool,

        /// Keep working directories after the build
        #[arg(long)]
        keep_workdirs: bool,

        /// Kill the tool if the build exceeds this many seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Print the SHA-256 digest of a file
    Digest {
        path: PathBuf,

        /// Compare against an expected hex digest
        #[arg(long)]
        expect: Option<String>,
    },

    /// Archive a directory into a compressed tarball
    Archive {
        source_dir: PathBuf,
        dest: PathBuf,
    },

    /// Rename an artifact within its directory
    Rename {
        path: PathBuf,
        new_name: String,

        /// Replace the destination if it already exists
        #[arg(long)]
        overwrite: bool,
    },

    /// Copy an artifact to <path>.bak
    Backup { path: PathBuf },

    /// Delete an artifact
    Remove { path: PathBuf },

    /// Show or persist default build options
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Check the packaging tool is installed
    Preflight {
        /// Exit nonzero if the tool is missing
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the persisted build options
    Show,
    /// Persist build options as defaults for future builds
    Set {
        /// Produce a directory instead of a single executable file
        #[arg(long)]
        onedir: bool,

        /// Icon file to embed
        #[arg(long)]
        icon: Option<PathBuf>,

        /// Data-bundling spec passed to the tool (SRC:DEST)
        #[arg(long)]
        add_data: Option<String>,

        /// Verbose tool output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            script,
            onedir,
            icon,
            add_data,
            verbose,
            keep_workdirs,
            timeout,
        } => commands::cmd_build(commands::BuildArgs {
            base_dir: cli.base_dir,
            tool: cli.tool,
            script,
            onedir,
            icon,
            add_data,
            verbose,
            keep_workdirs,
            timeout,
        }),
        Commands::Digest { path, expect } => commands::cmd_digest(&path, expect.as_deref()),
        Commands::Archive { source_dir, dest } => commands::cmd_archive(&source_dir, &dest),
        Commands::Rename {
            path,
            new_name,
            overwrite,
        } => commands::cmd_rename(&path, &new_name, overwrite),
        Commands::Backup { path } => commands::cmd_backup(&path),
        Commands::Remove { path } => commands::cmd_remove(&path),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::cmd_config_show(),
            ConfigAction::Set {
                onedir,
                icon,
                add_data,
                verbose,
            } => commands::cmd_config_set(onedir, icon, add_data, verbose),
        },
        Commands::Preflight { strict } => commands::cmd_preflight(&cli.base_dir, cli.tool, strict),
    }
}
