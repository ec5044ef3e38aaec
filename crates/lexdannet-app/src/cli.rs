use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use lexdannet_types::LexicalCategory;

#[derive(Parser, Debug)]
#[command(
    name = "lexdannet",
    version,
    about = "Link Danish Wikidata lexemes to DanNet 2.2 word IDs"
)]
pub struct Cli {
    /// JSON profile; missing fields take defaults, env vars override
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log as JSON lines instead of plain text
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load DanNet, match lexemes and upload the results (default)
    Run(RunArgs),
    /// Load DanNet and print index statistics
    Load {
        /// Write the joined word table to this JSON file
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Look a lemma up in DanNet
    Lookup {
        lemma: String,
        /// noun, verb or adjective
        #[arg(long)]
        category: Option<LexicalCategory>,
    },
    /// Print the effective configuration
    Config,
}

impl Default for Command {
    fn default() -> Self {
        Command::Run(RunArgs::default())
    }
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Match and report without logging in or editing
    #[arg(long)]
    pub dry_run: bool,

    /// Stop after this many lexemes have been classified
    #[arg(long)]
    pub limit: Option<usize>,
}
