use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use marquee_core::{read_export, GenreFilter, ReviewList};
use marquee_models::MovieRecord;
use std::path::Path;

/// One row per record, numbered in list order
pub fn records_table<'a>(records: impl IntoIterator<Item = &'a MovieRecord>) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        ["#", "Title", "Year", "Rating", "Runtime", "Genres", "Director"]
            .into_iter()
            .map(|h| Cell::new(h).fg(Color::Cyan).add_attribute(Attribute::Bold)),
    );

    for (idx, record) in records.into_iter().enumerate() {
        let runtime = match record.duration_minutes {
            0 => "-".to_string(),
            minutes => format!("{} min", minutes),
        };
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(&record.title),
            Cell::new(record.release_year().unwrap_or("-")),
            Cell::new(record.rating_label()),
            Cell::new(runtime),
            Cell::new(record.genres.join(", ")),
            Cell::new(record.director.as_deref().unwrap_or("-")),
        ]);
    }
    table
}

pub fn run_show(file: &Path, genre: Option<&str>, output: &Output) -> Result<()> {
    let payload = read_export(file).map_err(|e| eyre!("{:#}", e))?;

    let mut list = ReviewList::new();
    let duplicates = list.replace_all(payload.records);
    if !duplicates.is_empty() {
        output.warn(format!("Ignoring {} duplicate record(s) in {}", duplicates.len(), file.display()));
    }

    let filter = genre.map(GenreFilter::parse).unwrap_or_default();
    let visible: Vec<&MovieRecord> = list.filter_by_genre(&filter).collect();

    if output.is_human() {
        output.info(format!(
            "{} ({} movies, locale {})",
            file.display(),
            list.len(),
            payload.locale
        ));
        if let GenreFilter::Genre(name) = &filter {
            output.info(format!("Showing {} of {} movies in genre '{}'", visible.len(), list.len(), name));
        }
        if visible.is_empty() {
            output.warn("No movies to show");
            return Ok(());
        }
        output.table(&records_table(visible));

        let genres = list.distinct_genres();
        if !genres.is_empty() {
            output.info(format!("Genres: {}", genres.join(", ")));
        }
    } else {
        output.data("records", &visible);
    }

    Ok(())
}
