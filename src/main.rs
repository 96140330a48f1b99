mod cli;


use std::io::stderr;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tracing::level_filters::LevelFilter;
use tracing::{debug, info};

use ledger_assistant::actors::LedgerActor;
use ledger_assistant::commands::Command;
use ledger_assistant::config::Settings;
use ledger_assistant::engine::LedgerEngine;
use ledger_assistant::storage::CsvStore;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.log_level);

    let settings = Settings::load(cli.config.as_deref())?;

    info!(
        "Using ledger {} with reimbursable categories: {}",
        cli.ledger.display(),
        settings.caps.names().collect::<Vec<_>>().join(", ")
    );

    let actor = LedgerActor::new(LedgerEngine::new(CsvStore::new(cli.ledger.clone()), settings));

    if cli.command.is_empty() {
        let mut lines = BufReader::new(stdin()).lines();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            println!("{}\n", handle(&actor, &line).await);
        }
    } else {
        println!("{}", handle(&actor, &cli.command.join(" ")).await);
    }

    actor.despawn().await?;

    Ok(())
}

/// Runs one line of chat text and renders the reply, successful or not.
async fn handle(actor: &LedgerActor, line: &str) -> String {
    let timer = Instant::now();

    let reply = match line.parse::<Command>() {
        Ok(command) => match actor.submit(command).await {
            Ok(outcome) => outcome.to_string(),
            Err(error) => error.to_string()
        },
        Err(error) => error.to_string()
    };

    debug!("Handled [{}] in: {:?}", line.trim(), timer.elapsed());

    reply
}

fn setup_logging(level: LevelFilter) {
    //NOTE: Replies go to stdout, logging stays on stderr.
    tracing_subscriber::fmt()
        .with_writer(stderr)
        .with_target(false)
        .with_max_level(level)
        .init();
}
