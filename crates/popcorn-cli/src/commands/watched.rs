use crate::context::AppContext;
use crate::output::Output;
use crate::render;
use crate::terminal::with_spinner;
use color_eyre::Result;
use popcorn_core::Selection;
use serde_json::json;

pub async fn run_show(imdb_id: &str, output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let vm = ctx.view_model(ctx.source()?);

    vm.select(imdb_id);
    let state = with_spinner("Loading movie...", output.is_human() && !output.is_quiet(), vm.settled()).await;

    match &state.selection {
        Selection::DetailReady { detail, .. } => {
            output.json(&json!({
                "detail": detail,
                "watched_rating": state.watched_rating(imdb_id),
            }));
            output.println(render::detail_pane(detail, state.watched_rating(imdb_id)));
        }
        Selection::DetailFailed { message, .. } => output.error(message),
        _ => output.error(format!("Could not load {}", imdb_id)),
    }
    Ok(())
}

pub async fn run_add(imdb_id: &str, rating: u8, output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let vm = ctx.view_model(ctx.source()?);

    vm.select(imdb_id);
    let state = with_spinner("Loading movie...", output.is_human() && !output.is_quiet(), vm.settled()).await;
    if let Selection::DetailFailed { message, .. } = &state.selection {
        output.error(message);
        return Ok(());
    }

    vm.set_rating(rating)?;
    let entry = vm.commit()?;

    output.json(&json!({ "added": entry }));
    output.success(format!("Added {} ({}) with rating {}", entry.title, entry.year, entry.user_rating));
    Ok(())
}

pub fn run_remove(imdb_id: &str, output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let mut watched = ctx.watched_list();

    let removed = watched
        .remove(imdb_id)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save the watched list: {}", e))?;
    if removed {
        output.success(format!("Removed {} from the watched list", imdb_id));
    } else {
        output.warn(format!("{} is not in the watched list", imdb_id));
    }
    Ok(())
}

pub fn run_list(output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let watched = ctx.watched_list();
    let summary = watched.summary();

    output.json(&json!({
        "watched": watched.entries(),
        "summary": summary,
    }));

    output.println(render::summary_line(&summary));
    if watched.is_empty() {
        output.info("Your watched list is empty. Try `popcorn search <title>`.");
    } else {
        output.println(render::watched_table(watched.entries()).to_string());
    }
    Ok(())
}

pub fn run_stats(output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let summary = ctx.watched_list().summary();

    output.json(&json!({ "summary": summary }));
    output.println(render::summary_line(&summary));
    Ok(())
}
