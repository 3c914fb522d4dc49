use super::prompts;
use super::AppContext;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use marquee_config::{mask_secret, Config, CredentialStore, PathManager};
use serde_json::json;

pub fn run_config(cmd: crate::ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show => show_config(output),
        crate::ConfigCommands::ApiKey { key, clear } => configure_api_key(key, clear, output),
        crate::ConfigCommands::Set { key, value } => set_value(&key, &value, output),
    }
}

fn section_table(title: &str, rows: Vec<(&str, String)>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new(title).fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new(""),
    ]);
    for (key, value) in rows {
        table.add_row(vec![Cell::new(key), Cell::new(value)]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn show_config(output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let config = &ctx.config;
    let config_file = ctx.paths.config_file();

    let api_key = ctx
        .credentials
        .get_tmdb_api_key()
        .map(|key| mask_secret(key))
        .unwrap_or_else(|| "<not set>".to_string());
    let log_file = config
        .logging
        .file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<stderr>".to_string());

    if !output.is_human() {
        output.data(
            "config",
            &json!({
                "config_file": config_file.display().to_string(),
                "exports_dir": ctx.paths.exports_dir().display().to_string(),
                "tmdb": config.tmdb,
                "curation": config.curation,
                "logging": config.logging,
                "api_key": api_key,
            }),
        );
        return Ok(());
    }

    if !config_file.exists() {
        output.warn(format!(
            "Configuration file not found at {}, showing defaults",
            config_file.display()
        ));
    }

    output.table(&section_table(
        "Files",
        vec![
            ("Config File", config_file.display().to_string()),
            ("Credentials File", ctx.paths.credentials_file().display().to_string()),
            ("Exports", ctx.paths.exports_dir().display().to_string()),
            ("Log File", log_file),
        ],
    ));
    output.table(&section_table(
        "TMDB",
        vec![
            ("API Key", api_key),
            ("API Base URL", config.tmdb.api_base_url.clone()),
            ("Image Base URL", config.tmdb.image_base_url.clone()),
            ("Default Locale", config.tmdb.default_locale.clone()),
        ],
    ));
    output.table(&section_table(
        "Curation",
        vec![
            ("Locale", config.curation.locale.clone()),
            ("Suggestion Min Chars", config.curation.suggestion_min_chars.to_string()),
        ],
    ));
    Ok(())
}

fn configure_api_key(key_arg: Option<String>, clear: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create configuration directories: {}", e))?;

    let credentials_file = path_manager.credentials_file();
    let mut cred_store = CredentialStore::new(credentials_file.clone());
    cred_store
        .load()
        .map_err(|e| eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;

    if clear {
        cred_store.clear_tmdb_api_key();
    } else {
        let key = match key_arg {
            Some(key) => key,
            None => {
                output.info("Create an API key at https://www.themoviedb.org/settings/api");
                prompts::prompt_secret("TMDB API Key")?
            }
        };
        let key = key.trim().to_string();
        if key.is_empty() {
            return Err(eyre!("API key cannot be empty"));
        }
        cred_store.set_tmdb_api_key(key);
    }

    cred_store
        .save()
        .map_err(|e| eyre!("Failed to save credentials to {}: {}", credentials_file.display(), e))?;

    if clear {
        output.success("TMDB API key removed");
    } else {
        output.success(format!("TMDB API key saved to {}", credentials_file.display()));
    }
    Ok(())
}

fn set_value(key: &str, value: &str, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();

    let mut config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    config.set_value(key, value).map_err(|e| eyre!("{}", e))?;
    config
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))?;

    output.success(format!("Set {} = {}", key, value));
    Ok(())
}
