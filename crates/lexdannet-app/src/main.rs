use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use lexdannet_config::Config;
use lexdannet_core::{LemmaIndex, LoadReport, Matcher, load_index};
use lexdannet_dannet::{Dannet22Dump, check_known_entry, ensure_dump, export, http_client};
use lexdannet_types::LexicalCategory;
use lexdannet_wikibase::{SparqlLexemeSource, WikibaseClient, WikibaseEditor};
use tracing_subscriber::EnvFilter;

pub mod cli;
pub mod profile;
pub mod report;

use self::cli::{Cli, Command, RunArgs};
use self::report::Summary;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match profile::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.log_level, cli.json_logs);

    match dispatch(config, cli.command.unwrap_or_default()).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(default_level: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn dispatch(mut config: Config, command: Command) -> anyhow::Result<ExitCode> {
    match command {
        Command::Run(args) => {
            apply_run_args(&mut config, &args);
            run(&config).await
        }
        Command::Load { export } => {
            load(&config, export).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Lookup { lemma, category } => {
            lookup(&config, &lemma, category.as_ref()).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Config => {
            let json =
                serde_json::to_string_pretty(&config).context("Failed to serialize config")?;
            println!("{json}");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn apply_run_args(config: &mut Config, args: &RunArgs) {
    if args.dry_run {
        config.matcher.dry_run = true;
    }
    if args.limit.is_some() {
        config.matcher.limit = args.limit;
    }
}

/// Download if needed, then build the lemma index. Any failure here is fatal.
async fn load_dannet(config: &Config) -> anyhow::Result<(LemmaIndex, LoadReport)> {
    let http = http_client(&config.wikibase.user_agent, config.wikibase.timeout_seconds)?;

    let path = ensure_dump(&http, &config.dannet)
        .await
        .context("DanNet archive unavailable")?;

    let mut dump = Dannet22Dump::new(path, &config.dannet);
    let (index, load_report) = load_index(&mut dump)
        .with_context(|| format!("Failed to load {}", config.dannet.zip_path))?;

    check_known_entry(&index);
    Ok((index, load_report))
}

async fn run(config: &Config) -> anyhow::Result<ExitCode> {
    let (index, load_report) = load_dannet(config).await?;
    let dry_run = config.matcher.dry_run;

    let client = WikibaseClient::new(config.wikibase.clone())
        .context("Failed to build Wikibase client")?;

    let editor = if dry_run {
        tracing::info!("Dry run: no login, no edits");
        None
    } else {
        let session = client.login().await.context("Login failed")?;
        tracing::info!("Logged in as {}", session.username());
        Some(WikibaseEditor::new(&client, session))
    };

    let mut matcher = Matcher::new(&index).with_limit(config.matcher.limit);
    if let Some(editor) = &editor {
        matcher = matcher.with_editor(editor);
    }

    let mut source = SparqlLexemeSource::new(&client);
    let run_report = matcher.run(&mut source).await;

    let summary = Summary {
        load: &load_report,
        run: &run_report,
        dry_run,
    };
    println!("{summary}");

    if dry_run {
        for request in &run_report.planned {
            tracing::debug!("Planned: {request:?}");
        }
    }

    if run_report.interrupted.is_some() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

async fn load(config: &Config, export_path: Option<PathBuf>) -> anyhow::Result<()> {
    let (index, load_report) = load_dannet(config).await?;

    println!("Entries:        {}", load_report.loaded);
    println!("Malformed:      {}", load_report.malformed);
    println!("Duplicate IDs:  {}", load_report.duplicates);
    println!("Ambiguous keys: {}", index.ambiguous_keys());
    for (category, count) in index.category_counts() {
        println!("  {:<12} {count}", category.to_string());
    }

    if let Some(path) = export_path {
        let rows = export::write_json(&path, &index)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Exported {rows} entries to {}", path.display());
    }

    Ok(())
}

async fn lookup(
    config: &Config,
    lemma: &str,
    category: Option<&LexicalCategory>,
) -> anyhow::Result<()> {
    let (index, _) = load_dannet(config).await?;

    let hits = match category {
        Some(category) => index.candidates(lemma, category),
        None => index.lookup_lemma(lemma),
    };

    if hits.is_empty() {
        println!("'{lemma}' is not in DanNet");
    }
    for entry in hits {
        println!("{}\t{}\t{}", entry.id, entry.lemma, entry.category);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_args_override_profile() {
        let mut config = Config::default();
        config.matcher.limit = Some(10);

        apply_run_args(&mut config, &RunArgs { dry_run: true, limit: None });
        assert!(config.matcher.dry_run);
        assert_eq!(config.matcher.limit, Some(10));

        apply_run_args(&mut config, &RunArgs { dry_run: false, limit: Some(3) });
        assert!(config.matcher.dry_run);
        assert_eq!(config.matcher.limit, Some(3));
    }
}
