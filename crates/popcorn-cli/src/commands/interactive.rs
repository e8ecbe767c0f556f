//! Prompt-driven session: search, open a movie, rate it, manage the list.
//!
//! Esc in the movie menu closes the detail view. An empty search opens the
//! home menu (watched list, quit).

use super::prompts;
use crate::context::{AppContext, SharedSource};
use crate::output::Output;
use crate::render;
use crate::terminal::{with_spinner, TitleGuard};
use color_eyre::Result;
use dialoguer::Select;
use popcorn_core::{Selection, SelectionError, ViewModel};

enum MovieAction {
    Rate,
    Add,
    Close,
}

pub async fn run_interactive(output: &Output) -> Result<()> {
    if !output.is_human() {
        output.error("Interactive mode only supports --output human");
        return Ok(());
    }

    let ctx = AppContext::load()?;
    let source = ctx.source()?;
    let engine = ctx.search_engine(source.clone());
    let vm = ctx.view_model(source);
    let mut title = TitleGuard::new();

    tracing::info!(api_key_origin = %ctx.api_key.origin(), "Interactive session started");
    output.println(render::summary_line(&vm.state().summary));

    loop {
        let query = prompts::prompt_string("Search movies (empty for menu)", None)?;
        if query.trim().is_empty() {
            if !home_menu(&vm, output)? {
                break;
            }
            continue;
        }

        let state = with_spinner("Searching...", true, engine.search(&query)).await;
        if let Some(error) = &state.error {
            output.error(error);
            continue;
        }
        if query.trim().chars().count() < ctx.config.search.min_query_len {
            output.warn(format!(
                "Type at least {} characters to search",
                ctx.config.search.min_query_len
            ));
            continue;
        }

        output.info(format!("Found {} results", state.results.len()));
        if state.results.is_empty() {
            continue;
        }
        let items: Vec<String> = state
            .results
            .iter()
            .map(|r| format!("{} ({})", r.title, r.year))
            .collect();
        let picked = Select::new()
            .with_prompt("Open a movie (Esc to search again)")
            .items(&items)
            .default(0)
            .interact_opt()?;

        if let Some(index) = picked {
            movie_session(&vm, &state.results[index].imdb_id, &mut title, output).await?;
        }
    }

    Ok(())
}

async fn movie_session(
    vm: &ViewModel<SharedSource>,
    imdb_id: &str,
    title: &mut TitleGuard,
    output: &Output,
) -> Result<()> {
    vm.select(imdb_id);
    let state = with_spinner("Loading movie...", true, vm.settled()).await;

    match &state.selection {
        Selection::DetailReady { detail, .. } => {
            title.set(&state.window_title);
            output.println("");
            output.println(render::detail_pane(detail, state.watched_rating(imdb_id)));
            output.println("");
        }
        Selection::DetailFailed { message, .. } => {
            output.error(message);
            vm.close();
            return Ok(());
        }
        _ => return Ok(()),
    }

    loop {
        let state = vm.state();
        if state.selection.is_idle() {
            break;
        }

        let mut actions = Vec::new();
        let mut labels = Vec::new();
        if !state.is_watched(imdb_id) {
            actions.push(MovieAction::Rate);
            labels.push(match state.rating {
                Some(rating) => format!("Change rating (currently {})", rating),
                None => "Rate this movie".to_string(),
            });
            if state.rating.is_some() {
                actions.push(MovieAction::Add);
                labels.push("+ Add to list".to_string());
            }
        }
        actions.push(MovieAction::Close);
        labels.push("← Back".to_string());

        let picked = Select::new()
            .with_prompt("Movie (Esc to close)")
            .items(&labels)
            .default(0)
            .interact_opt()?;

        match picked.map(|i| &actions[i]) {
            Some(MovieAction::Rate) => {
                let rating = prompts::prompt_rating(state.rating)?;
                vm.set_rating(rating)?;
            }
            Some(MovieAction::Add) => match vm.commit() {
                Ok(entry) => {
                    output.success(format!("Added {} with rating {}", entry.title, entry.user_rating))
                }
                Err(SelectionError::Persist(e)) => {
                    output.warn(format!("Added for this session, but saving failed: {}", e))
                }
                Err(e) => output.error(e.to_string()),
            },
            Some(MovieAction::Close) | None => vm.close(),
        }
    }

    title.reset();
    Ok(())
}

/// Returns false when the user chose to quit
fn home_menu(vm: &ViewModel<SharedSource>, output: &Output) -> Result<bool> {
    loop {
        let state = vm.state();
        output.println(render::summary_line(&state.summary));
        if !state.watched.is_empty() {
            output.println(render::watched_table(&state.watched).to_string());
        }

        let mut labels = vec!["Search again".to_string()];
        labels.extend(
            state
                .watched
                .iter()
                .map(|e| format!("Remove {} ({})", e.title, e.year)),
        );
        labels.push("Quit".to_string());

        let picked = Select::new()
            .with_prompt("Menu")
            .items(&labels)
            .default(0)
            .interact_opt()?;

        match picked {
            None | Some(0) => return Ok(true),
            Some(i) if i == labels.len() - 1 => return Ok(false),
            Some(i) => {
                let entry = &state.watched[i - 1];
                vm.remove_watched(&entry.imdb_id)
                    .map_err(|e| color_eyre::eyre::eyre!("Failed to save the watched list: {}", e))?;
                output.success(format!("Removed {}", entry.title));
            }
        }
    }
}
