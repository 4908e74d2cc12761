use std::io::{self, BufReader, BufWriter, Write};
use std::{fs::File, process};

use anyhow::{Context, Result};
use log::info;

use chainkv::commands::process_commands;
use chainkv::config::{Config, USAGE};
use chainkv::loader::load_accounts_from_path;
use chainkv::logger::initialize_logger;

const KEY_LABEL: &str = "Customer ID";

fn main() -> Result<()> {
    initialize_logger();

    let config = match Config::from_env() {
        Ok(Some(config)) => config,
        Ok(None) => {
            println!("{USAGE}");
            return Ok(());
        }
        Err(err) => {
            eprintln!("error: {err}\n{USAGE}");
            process::exit(2);
        }
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let accounts = config.accounts.display();
    writeln!(out, "****Loading initial accounts from file '{accounts}'****")?;
    let mut table = load_accounts_from_path(&config.accounts, config.initial_capacity)
        .with_context(|| format!("failed to load accounts from '{accounts}'"))?;
    writeln!(out, "****Initial accounts load complete.****\n")?;

    writeln!(out, "****Dump of hash table and stats after initial load.****")?;
    writeln!(out, "{}", table.report().with_key_label(KEY_LABEL))?;

    let transactions = config.transactions.display();
    writeln!(
        out,
        "***\n****Processing batch transactions from file '{transactions}'.****\n***"
    )?;
    let file = File::open(&config.transactions)
        .with_context(|| format!("failed to open transactions file '{transactions}'"))?;
    let summary = process_commands(BufReader::new(file), &mut table, &mut out)
        .with_context(|| format!("failed to process transactions from '{transactions}'"))?;
    info!(
        "batch finished: {} applied, {} skipped",
        summary.applied, summary.skipped
    );

    writeln!(out, "\n****Printing report after processing batch transactions.****")?;
    writeln!(out, "{}", table.report().with_key_label(KEY_LABEL))?;
    out.flush()?;

    info!("final table: {}", table.stats());

    Ok(())
}
