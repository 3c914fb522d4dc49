use super::AppContext;
use crate::output::Output;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};

pub async fn run_locales(api_key: Option<&str>, output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let client = ctx.metadata_client(api_key)?;

    let mut locales = client.list_locales().await;
    if locales.is_empty() {
        output.warn("No locales available. Check the API key and network connection (run with -v for details).");
        return Ok(());
    }
    locales.sort_by(|a, b| a.display_name.cmp(&b.display_name));

    if output.is_human() {
        let mut table = Table::new();
        table.load_preset(comfy_table::presets::UTF8_FULL);
        table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
        table.set_header(vec![
            Cell::new("Code").fg(Color::Cyan).add_attribute(Attribute::Bold),
            Cell::new("Language").fg(Color::Cyan).add_attribute(Attribute::Bold),
        ]);
        for locale in &locales {
            table.add_row(vec![Cell::new(&locale.code), Cell::new(&locale.display_name)]);
        }
        output.table(&table);
        output.info(format!("{} locales from {}", locales.len(), client.provider_name()));
    } else {
        output.data("locales", &locales);
    }
    Ok(())
}
