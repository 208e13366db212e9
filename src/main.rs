use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod build_all;
mod catalog;
mod compile;
mod error;
mod generate;
mod layout;
mod metadata;
mod number;
mod row;
mod types;
mod utils;

#[derive(Parser)]
#[command(name = "set-checklist")]
#[command(about = "Trading card set price catalog and checklist generator")]
struct Cli {
    /// Directory holding one sub-directory per set
    #[arg(long, global = true, default_value = "set")]
    sets_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a set's cards.csv into output.json
    Compile {
        /// Set directory name (e.g. "xxvi")
        #[arg(value_name = "SET_NAME")]
        set_name: String,
    },
    /// Render a compiled set into HTML pages under www/
    Render {
        /// Set directory name (e.g. "xxvi")
        #[arg(value_name = "SET_NAME")]
        set_name: String,
    },
    /// Compile and render every set that has a cards.csv
    Build,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compile { set_name } => compile::run_compile(&cli.sets_dir, &set_name),
        Commands::Render { set_name } => generate::run_render(&cli.sets_dir, &set_name),
        Commands::Build => build_all::run_build(&cli.sets_dir),
    }
}
