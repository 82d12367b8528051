//! CLI argument definitions for depcollect.
//!
//! Uses `clap` derive macros. Positional paths and the root package can also
//! come from the environment or a `--config` file; explicit flags win.

use std::path::PathBuf;

use clap::builder::NonEmptyStringValueParser;
use clap::{ArgGroup, Parser};

#[derive(Parser, Debug)]
#[command(
    name = "depcollect",
    version,
    about = "Copy a package's runtime dependency closure into a new node_modules tree",
    long_about = "depcollect reads package.json manifests starting from one root package, \
                  collects every package it transitively depends on, and copies those \
                  package directories into a destination tree. Packages without a readable \
                  manifest are kept as leaves; a package that cannot be copied fails the run."
)]
#[command(group(ArgGroup::new("mode").args(["dry_run", "tree", "why"])))]
pub struct Cli {
    /// Source tree with one directory per installed package [default: /app/node_modules]
    #[arg(env = "DEPCOLLECT_SOURCE")]
    pub source: Option<PathBuf>,

    /// Destination tree for the copied packages [default: /prisma-runtime/node_modules]
    #[arg(env = "DEPCOLLECT_DEST")]
    pub dest: Option<PathBuf>,

    /// Root package whose dependencies are collected [default: prisma]
    #[arg(long, env = "DEPCOLLECT_ROOT", value_parser = NonEmptyStringValueParser::new())]
    pub root: Option<String>,

    /// Label for the summary line [default: <root>-runtime]
    #[arg(long)]
    pub label: Option<String>,

    /// Manifest filename inside each package directory [default: package.json]
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub manifest: Option<String>,

    /// Read defaults from a TOML configuration file
    #[arg(long, env = "DEPCOLLECT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of packages to copy in parallel [default: 1]
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub jobs: Option<u32>,

    /// Collect and list packages without copying anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print the collected dependency tree instead of copying
    #[arg(long)]
    pub tree: bool,

    /// Maximum depth for --tree
    #[arg(long, requires = "tree")]
    pub depth: Option<u32>,

    /// Explain why a package is part of the closure
    #[arg(long, value_name = "PACKAGE")]
    pub why: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn parse() -> Cli {
    Cli::parse()
}
