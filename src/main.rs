use anyhow::Context;
use std::io;
use std::sync::Arc;
use wordle_tui::cli::{Cli, PlainInterface, parse_cli};
use wordle_tui::config::Config;
use wordle_tui::logging::init_logging;
use wordle_tui::provider::{DatamuseProvider, WordListProvider, WordProvider};
use wordle_tui::tui::TuiInterface;
use wordle_tui::{WORD_LENGTH, WordLoader, run_session};

fn build_provider(cli: &Cli, config: &Config) -> anyhow::Result<Arc<dyn WordProvider>> {
    if let Some(path) = &cli.wordbank_path {
        let provider = WordListProvider::from_file(path, WORD_LENGTH)?;
        if provider.is_empty() {
            anyhow::bail!("no {WORD_LENGTH}-letter words in '{}'", path.display());
        }
        return Ok(Arc::new(provider));
    }
    if cli.offline {
        return Ok(Arc::new(WordListProvider::embedded(WORD_LENGTH)));
    }
    let provider = DatamuseProvider::from_config(&config.source)
        .context("failed to set up the word source")?;
    Ok(Arc::new(provider))
}

fn main() -> anyhow::Result<()> {
    let cli = parse_cli();
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(endpoint) = &cli.endpoint {
        config.source.endpoint.clone_from(endpoint);
        config.validate()?;
    }

    let log_path = init_logging(&config.log).context("failed to open the log file")?;
    log::info!("wordle-tui starting, logging to {}", log_path.display());

    let provider = build_provider(&cli, &config)?;
    let mut loader = WordLoader::new(provider, config.source.max_candidates);

    let tally = if cli.plain {
        let stdin = io::stdin();
        let mut interface = PlainInterface::new(stdin.lock(), io::stdout());
        run_session(&mut loader, &mut interface)?
    } else {
        let mut interface = TuiInterface::new().context("failed to initialize the terminal")?;
        run_session(&mut loader, &mut interface)?
    };

    log::info!("session over: won {} of {}", tally.won, tally.played);
    println!("Thanks for playing! Won {} of {} rounds.", tally.won, tally.played);
    Ok(())
}
