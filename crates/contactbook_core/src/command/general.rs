//! Commands that act on the view, history, undo state or presentation.

use crate::bus::AppEvent;
use crate::command::{CommandError, CommandOutcome, CommandResult, UiAction};
use crate::model::index::Index;
use crate::repo::record_store::StoreSnapshot;
use crate::service::session::{PersonFilter, Session};

pub const FIND_USAGE: &str = "find: Finds all persons whose names contain any of the specified \
keywords (case-insensitive) and displays them as a list with index numbers.\n\
Parameters: KEYWORD [MORE_KEYWORDS]...\nExample: find alice bob charlie";
pub const LIST_USAGE: &str = "list: Lists all persons in the address book.\nExample: list";
pub const CLEAR_USAGE: &str = "clear: Clears all persons and events.\nExample: clear";
pub const UNDO_USAGE: &str = "undo: Undoes the previous undoable command.\nExample: undo";
pub const REDO_USAGE: &str = "redo: Redoes the previously undone command.\nExample: redo";
pub const HISTORY_USAGE: &str =
    "history: Lists all the commands that you have entered in reverse chronological order.\nExample: history";
pub const HELP_USAGE: &str = "help: Shows program usage instructions.\nExample: help";
pub const EXIT_USAGE: &str = "exit: Exits the program.\nExample: exit";
pub const SWITCH_THEME_USAGE: &str = "switchtheme: Switches the current theme to the theme identified \
by the index number in the themes list.\nParameters: INDEX (must be a positive integer)\nExample: switchtheme 1";

pub const MESSAGE_LIST_SUCCESS: &str = "Listed all persons";
pub const MESSAGE_CLEAR_SUCCESS: &str = "Address book has been cleared!";
pub const MESSAGE_UNDO_SUCCESS: &str = "Undo success!";
pub const MESSAGE_REDO_SUCCESS: &str = "Redo success!";
pub const MESSAGE_HISTORY_SUCCESS: &str = "Entered commands (from most recent to earliest):\n";
pub const MESSAGE_NO_HISTORY: &str = "You have not yet entered any commands.";
pub const MESSAGE_HELP_SUCCESS: &str = "Opened help window.";
pub const MESSAGE_EXIT_ACKNOWLEDGEMENT: &str = "Exiting Address Book as requested ...";
pub const MESSAGE_SWITCH_THEME_SUCCESS: &str = "Switched Theme: ";

pub(crate) fn find(session: &mut Session, keywords: &[String]) -> CommandOutcome {
    session.set_person_filter(PersonFilter::NameKeywords(keywords.to_vec()));
    let shown = session.displayed_people().len();
    Ok(CommandResult::new(format!("{shown} persons listed!")))
}

pub(crate) fn list(session: &mut Session) -> CommandOutcome {
    session.set_person_filter(PersonFilter::All);
    Ok(CommandResult::new(MESSAGE_LIST_SUCCESS))
}

pub(crate) fn clear(session: &mut Session) -> CommandOutcome {
    session.store_mut().reset(StoreSnapshot::default())?;
    session.set_person_filter(PersonFilter::All);
    Ok(CommandResult::new(MESSAGE_CLEAR_SUCCESS))
}

pub(crate) fn undo(session: &mut Session) -> CommandOutcome {
    session.undo()?;
    Ok(CommandResult::new(MESSAGE_UNDO_SUCCESS))
}

pub(crate) fn redo(session: &mut Session) -> CommandOutcome {
    session.redo()?;
    Ok(CommandResult::new(MESSAGE_REDO_SUCCESS))
}

pub(crate) fn history(session: &mut Session) -> CommandOutcome {
    let entries = session.history();
    if entries.is_empty() {
        return Ok(CommandResult::new(MESSAGE_NO_HISTORY));
    }
    let listing = entries
        .iter()
        .rev()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n");
    Ok(CommandResult::new(format!(
        "{MESSAGE_HISTORY_SUCCESS}{listing}"
    )))
}

pub(crate) fn help(session: &mut Session) -> CommandOutcome {
    session.bus().post(&AppEvent::ShowHelpRequest);
    Ok(CommandResult::with_action(
        MESSAGE_HELP_SUCCESS,
        UiAction::ShowHelp,
    ))
}

pub(crate) fn exit(session: &mut Session) -> CommandOutcome {
    session.bus().post(&AppEvent::ExitAppRequest);
    Ok(CommandResult::with_action(
        MESSAGE_EXIT_ACKNOWLEDGEMENT,
        UiAction::Exit,
    ))
}

/// Validates `index` against the theme list; never touches the store.
pub(crate) fn switch_theme(session: &mut Session, index: Index) -> CommandOutcome {
    let theme = session
        .themes()
        .get(index.zero_based())
        .cloned()
        .ok_or(CommandError::InvalidDisplayedIndex)?;
    session.bus().post(&AppEvent::ThemeSwitchRequest {
        theme: theme.clone(),
    });
    Ok(CommandResult::with_action(
        format!("{MESSAGE_SWITCH_THEME_SUCCESS}{theme}"),
        UiAction::SwitchTheme(theme),
    ))
}
