//! Cheatsheet command implementation.

use crate::cli::preflight;
use crate::cli::{Cli, Output};
use crate::config::Settings;
use crate::error::CheatsheetError;
use crate::orchestrator::Orchestrator;
use crate::output::write_document;
use anyhow::Result;

/// Build the cheatsheet for `cli.url` and print or write it.
pub async fn run_cheatsheet(cli: &Cli, mut settings: Settings) -> Result<()> {
    preflight::check()?;

    if let Some(model) = &cli.model {
        settings.openai.model = model.clone();
    }
    if let Some(temperature) = cli.temperature {
        settings.openai.temperature = temperature;
    }

    // Fail before any network work when the destination cannot exist.
    let output_dir = cli.output_dir(settings.output_dir());
    if let Some(dir) = &output_dir {
        if !dir.is_dir() {
            return Err(CheatsheetError::DirectoryInvalid(dir.clone()).into());
        }
    }

    let options = cli.run_options();
    let orchestrator = Orchestrator::new(settings)?;

    let spinner = Output::spinner(&format!("Building cheatsheet for {}", cli.url));
    let result = orchestrator.run(&cli.url, &options).await;
    spinner.finish_and_clear();
    let document = result?;

    match output_dir {
        Some(dir) => {
            let path = write_document(&document.title, &document.content, &dir)?;
            Output::success(&format!("Wrote '{}' to {}", document.title, path.display()));
        }
        None => println!("{}", document.content),
    }

    Ok(())
}
