//! CLI for dci.
//!
//! `dci [OPTIONS] <LIBPATH> <LIBURL>` replaces the cached files; the
//! `locate` and `status` subcommands only read.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use dci_core::config::{self, DciConfig};
use dci_core::deno_dir::{CacheRootProvider, DenoDir};
use std::path::PathBuf;

use commands::{run_inject, run_locate, run_status};

/// Top-level CLI for dci.
#[derive(Debug, Parser)]
#[command(name = "dci", version)]
#[command(about = "Replace files in the Deno module cache with files in a local directory")]
#[command(long_about = "Replace files in the Deno module cache with files in a local directory.\n\n\
To use the files in ./denops-std-deno for https://deno.land/x/denops_std@v2.0.0:\n\n    \
dci ./denops-std-deno https://deno.land/x/denops_std@v2.0.0\n\n\
A <LIBPATH> named `locate` or `status` is read as a subcommand; write it as ./locate or ./status.")]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<CliCommand>,

    #[command(flatten)]
    pub inject: InjectArgs,
}

/// Options shared by every form of the command.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Deno cache directory (overrides DENO_DIR and the config file).
    #[arg(long, value_name = "DIR")]
    pub deno_dir: Option<PathBuf>,

    /// Display verbose log.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct InjectArgs {
    /// A local directory which is used to replace the cache.
    #[arg(value_name = "LIBPATH", required = true)]
    pub libpath: Option<PathBuf>,

    /// A base URL of a library in the cache to replace.
    #[arg(value_name = "LIBURL", required = true)]
    pub liburl: Option<String>,

    /// Delete cache (only files that exist in <LIBPATH>).
    #[arg(short, long)]
    pub delete: bool,

    /// Use symbolic link.
    #[arg(short, long)]
    pub symlink: bool,

    /// Replace up to N cache files concurrently (default from config, 1).
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Keep going after a file fails and report all failures at the end.
    #[arg(short, long)]
    pub keep_going: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Print the cache file path a URL maps to.
    Locate {
        /// Full module URL.
        url: String,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Show whether each file in <LIBPATH> is currently in the cache.
    Status {
        /// A local directory which is used to replace the cache.
        libpath: PathBuf,

        /// A base URL of a library in the cache.
        liburl: String,

        #[command(flatten)]
        common: CommonArgs,
    },
}

impl Cli {
    pub fn common(&self) -> &CommonArgs {
        match &self.command {
            Some(CliCommand::Locate { common, .. }) | Some(CliCommand::Status { common, .. }) => {
                common
            }
            None => &self.inject.common,
        }
    }

    pub fn verbose(&self) -> bool {
        self.common().verbose
    }
}

/// Cache root for this invocation: `--deno-dir`, else the environment and config.
pub fn cache_roots(
    common: &CommonArgs,
    cfg: &DciConfig,
) -> Box<dyn CacheRootProvider + Send + Sync> {
    match &common.deno_dir {
        Some(dir) => Box::new(dir.clone()),
        None => Box::new(DenoDir::from_process().with_configured(cfg.deno_dir.clone())),
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let cfg = config::load_or_init()?;
    tracing::debug!("loaded config: {:?}", cfg);

    match cli.command {
        Some(CliCommand::Locate { url, common }) => {
            run_locate(cache_roots(&common, &cfg).as_ref(), &url)?
        }
        Some(CliCommand::Status {
            libpath,
            liburl,
            common,
        }) => run_status(
            cache_roots(&common, &cfg).as_ref(),
            &libpath,
            &liburl,
            &cfg.extensions,
        )?,
        None => run_inject(&cli.inject, &cfg).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
