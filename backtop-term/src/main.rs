mod app;
mod buffer;
mod content;
mod error;
mod fade;
mod render;
mod terminal;

use std::fs::File;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use simplelog::{Config, LevelFilter, WriteLogger};

use crate::app::{App, Flow};
use crate::error::AppError;
use crate::terminal::Terminal;

const LOG_FILE: &str = "backtop.log";

/// Poll interval while scrolling or fading.
const FRAME: Duration = Duration::from_millis(16);

/// Poll interval when nothing is moving.
const IDLE: Duration = Duration::from_millis(250);

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), AppError> {
    // stdout belongs to the UI, so log to a file
    let log_file = File::create(LOG_FILE)?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let mut term = Terminal::new()?;
    let mut app = App::new(term.size())?;
    let mut last = Instant::now();

    loop {
        let now = Instant::now();
        app.tick(now.duration_since(last))?;
        last = now;

        let view = app.view()?;
        let mut button_rect = None;
        term.render(|buf| button_rect = render::draw(buf, &view))?;
        app.set_button_rect(button_rect);

        let timeout = if app.is_animating() { FRAME } else { IDLE };
        for event in term.poll(timeout)? {
            if app.handle(event)? == Flow::Quit {
                log::info!("[app] quit");
                return Ok(());
            }
        }
    }
}
