use super::prompts;
use crate::context::AppContext;
use crate::output::Output;
use crate::ConfigCommands;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use comfy_table::{modifiers, presets, Attribute, Cell, Table};
use popcorn_config::{Config, PathManager};
use serde_json::json;

pub fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show_config(output),
        ConfigCommands::SetKey { key } => set_key(key, output),
        ConfigCommands::Path => show_paths(output),
    }
}

fn show_config(output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let config_file = ctx.paths.config_file();
    let store = ctx.watched_store();

    output.json(&json!({
        "config_file": config_file.display().to_string(),
        "config_file_exists": config_file.exists(),
        "watched_file": store.path().display().to_string(),
        "omdb": {
            "base_url": ctx.config.omdb.base_url,
            "api_key": ctx.api_key.masked(),
            "api_key_origin": ctx.api_key.origin().to_string(),
        },
        "search": {
            "min_query_len": ctx.config.search.min_query_len,
        },
    }));

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new("Setting").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);
    let file_note = if config_file.exists() { "" } else { " (not created, using defaults)" };
    table.add_row(vec![
        Cell::new("Config file"),
        Cell::new(format!("{}{}", config_file.display(), file_note)),
    ]);
    table.add_row(vec![Cell::new("Watched list"), Cell::new(store.path().display())]);
    table.add_row(vec![Cell::new("OMDb base URL"), Cell::new(&ctx.config.omdb.base_url)]);
    table.add_row(vec![
        Cell::new("OMDb API key"),
        Cell::new(format!("{} ({})", ctx.api_key.masked(), ctx.api_key.origin())),
    ]);
    table.add_row(vec![
        Cell::new("Minimum query length"),
        Cell::new(ctx.config.search.min_query_len),
    ]);
    output.println(table.to_string());
    Ok(())
}

fn set_key(key: Option<String>, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config_file = paths.config_file();
    let mut config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    let key = match key {
        Some(key) => key,
        None => prompts::prompt_password("OMDb API key")?,
    };
    let key = key.trim().to_string();
    if key.is_empty() {
        output.error("API key cannot be empty");
        return Ok(());
    }

    if config.omdb.api_key.is_some()
        && output.is_human()
        && !prompts::prompt_yes_no("Replace the stored API key?", true)?
    {
        output.info("Keeping the stored API key");
        return Ok(());
    }

    config.omdb.api_key = Some(key);
    config.validate().map_err(|e| eyre!("{}", e))?;
    config
        .save_to_file(&config_file)
        .map_err(|e| eyre!("{}", e))
        .wrap_err_with(|| format!("Failed to save config to {}", config_file.display()))?;

    output.success(format!("Saved API key to {}", config_file.display()));
    if std::env::var(popcorn_config::API_KEY_ENV).is_ok() {
        output.warn(format!(
            "{} is set and takes precedence over the config file",
            popcorn_config::API_KEY_ENV
        ));
    }
    Ok(())
}

fn show_paths(output: &Output) -> Result<()> {
    let paths = PathManager::default();
    output.json(&json!({
        "config_dir": paths.config_dir().display().to_string(),
        "data_dir": paths.data_dir().display().to_string(),
        "log_dir": paths.log_dir().display().to_string(),
    }));
    output.println(format!("Config: {}", paths.config_dir().display()));
    output.println(format!("Data:   {}", paths.data_dir().display()));
    output.println(format!("Logs:   {}", paths.log_dir().display()));
    Ok(())
}
