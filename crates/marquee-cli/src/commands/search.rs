use super::AppContext;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};

pub async fn run_search(
    query: &str,
    locale: Option<String>,
    limit: usize,
    api_key: Option<&str>,
    output: &Output,
) -> Result<()> {
    let query = query.trim();
    if query.is_empty() {
        return Err(eyre!("Search query cannot be empty"));
    }

    let ctx = AppContext::load()?;
    let client = ctx.metadata_client(api_key)?;
    let locale = ctx.locale(locale);

    let mut results = client
        .search(query, &locale)
        .await
        .map_err(|e| eyre!("Search for '{}' failed: {}", query, e))?;
    results.truncate(limit);

    if !output.is_human() {
        output.data("search_results", &results);
        return Ok(());
    }

    if results.is_empty() {
        output.warn(format!("No movies found for '{}'", query));
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new("TMDB ID").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new("Title").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new("Year").fg(Color::Cyan).add_attribute(Attribute::Bold),
    ]);
    for hit in &results {
        table.add_row(vec![
            Cell::new(hit.id),
            Cell::new(&hit.title),
            Cell::new(hit.release_year().unwrap_or("-")),
        ]);
    }
    output.table(&table);
    Ok(())
}
