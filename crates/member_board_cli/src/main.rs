//! Terminal front end for the member board.
//!
//! # Responsibility
//! - Resolve session config, start logging and open the in-memory store.
//! - Translate stdin commands into `AppEvent`s and print the board after
//!   each one.

mod commands;
mod render;

use commands::{Command, HELP};
use log::{error, info, warn};
use member_board_core::db::open_db_in_memory;
use member_board_core::seed::seed_demo;
use member_board_core::{
    core_version, init_logging, App, AppError, AppEvent, SessionConfig, Tag,
};
use render::render_screen;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = SessionConfig::from_process();
    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("logging disabled: {err}");
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=session_end module=cli status=error error={err}");
            eprintln!("member_board: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &SessionConfig) -> Result<(), Box<dyn Error>> {
    info!(
        "event=session_start module=cli status=ok version={} demo={}",
        core_version(),
        config.seed_demo
    );
    let conn = open_db_in_memory()?;
    let mut app = App::new(&conn)?;
    if config.seed_demo {
        seed_demo(&app)?;
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print_screen(&app, &mut stdout)?;
    prompt(&mut stdout)?;

    for line in stdin.lock().lines() {
        let line = line?;
        match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => writeln!(stdout, "{HELP}")?,
            Ok(command) => {
                match apply(&mut app, command) {
                    Ok(Some(notice)) => writeln!(stdout, "{notice}")?,
                    Ok(None) => {}
                    Err(err) => {
                        warn!("event=command module=cli status=error error={err}");
                        writeln!(stdout, "error: {err}")?;
                    }
                }
                print_screen(&app, &mut stdout)?;
            }
            Err(commands::ParseError::Empty) => {}
            Err(err) => writeln!(stdout, "error: {err}")?,
        }
        prompt(&mut stdout)?;
    }

    info!("event=session_end module=cli status=ok");
    Ok(())
}

/// Applies a parsed command; positions are resolved against the current
/// list and catalog.
///
/// Returns a notice for the user when the command had nothing to act on.
fn apply(app: &mut App<'_>, command: Command) -> Result<Option<String>, AppError> {
    let event = match command {
        Command::Show | Command::Help | Command::Quit => return Ok(None),
        Command::Click(index) => match app.click_at(index)? {
            Some(event) => event,
            None => return Ok(Some(format!("nothing to open at position {}", index + 1))),
        },
        Command::Drag { from, to } => {
            app.dispatch(AppEvent::DragStarted(from))?;
            AppEvent::DroppedAt(to)
        }
        Command::Add => AppEvent::AddMemberClicked,
        Command::Edit => AppEvent::EditRequested,
        Command::Delete => AppEvent::DeleteRequested,
        Command::Close => AppEvent::DetailClosed,
        Command::Set(field, value) => AppEvent::FormFieldChanged(field, value),
        Command::Toggle(index) => match catalog_tag(app, index)? {
            Ok(tag) => AppEvent::FormTagToggled(tag.id),
            Err(notice) => return Ok(Some(notice)),
        },
        Command::Submit => AppEvent::FormSubmitted,
        Command::Cancel => AppEvent::FormClosed,
        Command::Tags => AppEvent::TagManagementOpened,
        Command::TagName(name) => AppEvent::TagDraftNameChanged(name),
        Command::TagCategory(category) => AppEvent::TagDraftCategoryChanged(category),
        Command::TagColor(color) => AppEvent::TagDraftColorChanged(color),
        Command::TagEdit(index) => match catalog_tag(app, index)? {
            Ok(tag) => AppEvent::TagEditRequested(tag.id),
            Err(notice) => return Ok(Some(notice)),
        },
        Command::TagDelete(index) => match catalog_tag(app, index)? {
            Ok(tag) => AppEvent::TagDeleteRequested(tag.id),
            Err(notice) => return Ok(Some(notice)),
        },
        Command::TagSave => AppEvent::TagSaved,
        Command::TagReset => AppEvent::TagDraftReset,
        Command::TagsClose => AppEvent::TagManagementClosed,
    };
    app.dispatch(event)?;
    Ok(None)
}

/// Catalog tag at `index`, or the notice to show when there is none.
fn catalog_tag(app: &App<'_>, index: usize) -> Result<Result<Tag, String>, AppError> {
    Ok(app
        .tags()
        .list()?
        .into_iter()
        .nth(index)
        .ok_or_else(|| format!("no tag at position {}", index + 1)))
}

fn print_screen(app: &App<'_>, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
    let catalog = app.tags().list()?;
    write!(out, "{}", render_screen(&app.screen()?, &catalog))?;
    Ok(())
}

fn prompt(out: &mut impl Write) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}
