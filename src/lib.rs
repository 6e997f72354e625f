// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use anyhow::{bail, Result};
use application::{Alert, NotesApi, NotesScreen, ScreenDriver};
use infrastructure::{Config, HttpNotesApi};
use ports::{JsonPresenter, TextPresenter};
use tracing::{debug, info, warn};
use crate::cli::args::{Args, Command};

/// What `run` prints to stdout once the command has settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Screen,
    QuotePanel,
    Json,
}

impl OutputFormat {
    pub fn for_args(args: &Args) -> Self {
        if args.json {
            Self::Json
        } else if matches!(args.command, Command::Quote) {
            Self::QuotePanel
        } else {
            Self::Screen
        }
    }

    pub fn render(self, screen: &NotesScreen) -> Result<String> {
        match self {
            Self::Json => Ok(format!("{}\n", JsonPresenter::new().render(screen)?)),
            Self::QuotePanel => Ok(TextPresenter::new().render_quote_panel(screen)),
            Self::Screen => Ok(TextPresenter::new().render(screen)),
        }
    }
}

pub async fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting notes-screen with arguments");
    let format = OutputFormat::for_args(&args);

    // Initialize infrastructure
    let config = Config::resolve(args.config.as_deref())?;
    let base_url = args.base_url.as_deref().unwrap_or(&config.api.base_url);
    let api = HttpNotesApi::new(base_url, config.api.timeout())?;
    info!(base_url = api.base_url(), "Using notes API");

    // Initialize application
    let mut driver = ScreenDriver::new(api, NotesScreen::new(config.screen));
    driver.mount().await;

    // Execute use case
    execute(&mut driver, args.command).await;

    // Present
    let mut screen = driver.into_screen();
    let alerts = screen.take_alerts();
    eprint!("{}", TextPresenter::new().render_alerts(&alerts));
    print!("{}", format.render(&screen)?);

    let failures = alerts.iter().filter(|a| a.is_error()).count();
    if failures > 0 {
        bail!("{} operation(s) failed", failures);
    }
    Ok(())
}

/// Perform `command` on an already mounted screen. Failures end up as
/// alerts on the screen, never as an early return.
pub async fn execute<A: NotesApi>(driver: &mut ScreenDriver<A>, command: Command) {
    match command {
        Command::Show => {}
        Command::Quote => {
            let request = driver.screen_mut().refresh_quote();
            driver.run([request]).await;
        }
        Command::Add { title, description } => {
            let screen = driver.screen_mut();
            screen.set_title(title);
            screen.set_description(description);
            let request = screen.submit_create();
            driver.run(request).await;
        }
        Command::Edit {
            note_id,
            title,
            description,
        } => {
            let screen = driver.screen_mut();
            if let Err(err) = screen.open_edit(note_id) {
                warn!(note_id, %err, "Cannot open editor");
                screen.raise(Alert::error(err.to_string()));
                return;
            }
            if let Some(title) = title {
                screen.set_edit_title(title);
            }
            if let Some(description) = description {
                screen.set_edit_description(description);
            }
            let request = screen.save_edit();
            driver.run(request).await;
        }
        Command::Delete { note_id } => {
            let request = driver.screen_mut().delete_note(note_id);
            driver.run([request]).await;
        }
    }
}
