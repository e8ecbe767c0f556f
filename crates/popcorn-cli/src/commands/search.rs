use crate::context::AppContext;
use crate::output::Output;
use crate::render;
use crate::terminal::with_spinner;
use color_eyre::Result;
use serde_json::json;

pub async fn run_search(query: &str, output: &Output) -> Result<()> {
    tracing::debug!(query = %query, "Search command started");

    let ctx = AppContext::load()?;
    let engine = ctx.search_engine(ctx.source()?);
    let state = with_spinner("Searching...", output.is_human() && !output.is_quiet(), engine.search(query)).await;

    output.json(&json!(state));

    if let Some(error) = &state.error {
        output.error(error);
        return Ok(());
    }

    if query.trim().chars().count() < ctx.config.search.min_query_len {
        output.warn(format!(
            "Type at least {} characters to search",
            ctx.config.search.min_query_len
        ));
        return Ok(());
    }

    output.info(format!("Found {} results", state.results.len()));
    if !state.results.is_empty() {
        output.println(render::results_table(&state.results).to_string());
    }
    Ok(())
}
