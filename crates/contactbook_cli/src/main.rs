//! Interactive terminal front-end.
//!
//! # Responsibility
//! - Compose bus, store, session and snapshot storage from CLI flags.
//! - Feed stdin lines to `Logic::process_input` and print the outcome.
//!
//! # Invariants
//! - The snapshot file is written between commands, never during one.

mod cli;

use clap::Parser;
use cli::Cli;
use contactbook_core::{
    core_version, default_log_level, init_logging, AppEvent, EventBus, EventCategory,
    EventFilter, Logic, RecordStore, Session, SqliteSnapshotStorage, UiAction,
};
use log::{error, info};
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_exit module=cli status=error error={err}");
            eprintln!("contactbook: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }

    let bus = EventBus::new();
    let mut storage = SqliteSnapshotStorage::open(&cli.data)?;
    let store = RecordStore::from_snapshot(bus.clone(), storage.load()?)?;
    storage.attach(&bus);
    bus.subscribe(EventFilter::Category(EventCategory::Ui), |event| {
        print_ui_event(event);
        Ok(())
    });

    let mut logic = Logic::new(Session::new(store, bus, cli.theme_list()));
    info!(
        "event=cli_start module=cli status=ok version={} people={} events={}",
        core_version(),
        logic.session().store().people().len(),
        logic.session().store().events().len()
    );
    print_people(&logic);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let revision_before = logic.session().store().revision();
        let filter_before = logic.session().person_filter().clone();
        let outcome = logic.process_input(&line);

        let exit_requested = match outcome {
            Ok(result) => {
                println!("{}", result.feedback);
                let view_changed = logic.session().store().revision() != revision_before
                    || *logic.session().person_filter() != filter_before;
                if view_changed {
                    print_people(&logic);
                }
                result.ui_action == Some(UiAction::Exit)
            }
            Err(err) => {
                println!("{err}");
                false
            }
        };

        // A failed write stays dirty and is retried after the next command.
        if let Err(err) = storage.flush_if_dirty(logic.session().store()) {
            eprintln!("contactbook: could not save changes: {err}");
        }
        if exit_requested {
            break;
        }
    }

    info!("event=cli_exit module=cli status=ok");
    Ok(())
}

fn print_people(logic: &Logic) {
    let session = logic.session();
    for (position, person) in session.displayed_people().iter().enumerate() {
        let marker = if person.favourite { "*" } else { " " };
        println!("{marker}{:>3}. {person}", position + 1);
    }
    for (position, event) in session.displayed_events().iter().enumerate() {
        println!(" E{:>2}. {event}", position + 1);
    }
}

fn print_ui_event(event: &AppEvent) {
    match event {
        AppEvent::ThemeSwitchRequest { theme } => println!("[theme] {theme}"),
        AppEvent::JumpToPersonRequest { index } => println!("[select] #{index}"),
        AppEvent::ShowHelpRequest => {
            for word in contactbook_core::CommandWord::all() {
                println!("{}\n", word.usage());
            }
        }
        AppEvent::CalendarDateSelected { date } => println!("[calendar] {date}"),
        AppEvent::ExitAppRequest | AppEvent::StoreChanged(_) => {}
    }
}
