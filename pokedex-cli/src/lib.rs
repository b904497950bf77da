//! Command parsing, configuration and rendering for the `pokedex` binary.

mod command;
mod config;
mod render;

pub use command::{Command, CommandError, HELP};
pub use config::AppConfig;
pub use render::{render_json, render_text, View};

use pokedex_store::{FetchOutcome, Pokedex};
use pokedex_types::PageDirection;

/// Runs a store verb and waits for the records it published to resolve.
///
/// Returns `None` for commands that do not touch the store.
pub async fn execute(pokedex: &Pokedex, command: &Command) -> Option<FetchOutcome> {
    let outcome = match command {
        Command::Next => pokedex.fetch_page(PageDirection::Next).await,
        Command::Prev => pokedex.fetch_page(PageDirection::Previous).await,
        Command::Reload => pokedex.reload().await,
        Command::Search(term) => {
            pokedex.set_search_term(term.as_str());
            pokedex.search().await
        }
        Command::Show | Command::Help | Command::Quit => return None,
    };
    pokedex.wait_for_enrichment().await;
    Some(outcome)
}
