use super::prompts;
use super::show::records_table;
use crate::output::Output;
use color_eyre::Result;
use marquee_core::{CurationSession, GenreFilter, MoveTarget, RecordField};
use marquee_models::{MovieId, MovieRecord};
use marquee_sources::MetadataClient;
use owo_colors::OwoColorize;

pub enum ReviewOutcome {
    Save,
    Discard,
}

#[derive(Clone, Copy)]
enum Action {
    Show,
    Edit,
    Move,
    Remove,
    Add,
    Filter,
    Save,
    Discard,
}

impl Action {
    const ALL: [Action; 8] = [
        Action::Show,
        Action::Edit,
        Action::Move,
        Action::Remove,
        Action::Add,
        Action::Filter,
        Action::Save,
        Action::Discard,
    ];

    fn label(self) -> &'static str {
        match self {
            Action::Show => "Show list",
            Action::Edit => "Edit a movie",
            Action::Move => "Move a movie",
            Action::Remove => "Remove a movie",
            Action::Add => "Add a movie",
            Action::Filter => "Filter by genre",
            Action::Save => "Save and exit",
            Action::Discard => "Discard and exit",
        }
    }
}

/// Interactive review of a resolved list. Every change goes through the session.
pub async fn run_review(
    session: &mut CurationSession,
    client: &dyn MetadataClient,
    output: &Output,
) -> Result<ReviewOutcome> {
    show_list(session, output);
    let actions: Vec<String> = Action::ALL.iter().map(|a| a.label().to_string()).collect();

    loop {
        let prompt = match session.genre_filter() {
            GenreFilter::All => format!("{} movies", session.review_list().len()),
            GenreFilter::Genre(genre) => format!(
                "{} of {} movies, genre '{}'",
                session.visible_records().len(),
                session.review_list().len(),
                genre
            ),
        };

        let action = match prompts::prompt_select(&prompt, &actions, 0)? {
            Some(index) => Action::ALL[index],
            None => Action::Discard,
        };

        match action {
            Action::Show => show_list(session, output),
            Action::Edit => edit_movie(session, output)?,
            Action::Move => move_movie(session, output)?,
            Action::Remove => remove_movie(session, output)?,
            Action::Add => add_movie(session, client, output).await?,
            Action::Filter => choose_filter(session, output)?,
            Action::Save => return Ok(ReviewOutcome::Save),
            Action::Discard => {
                let question = format!("Discard {} movies without saving?", session.review_list().len());
                if prompts::prompt_yes_no(&question, false)? {
                    return Ok(ReviewOutcome::Discard);
                }
            }
        }
    }
}

fn show_list(session: &CurationSession, output: &Output) {
    let visible = session.visible_records();
    if visible.is_empty() {
        output.warn("The list is empty");
        return;
    }
    output.table(&records_table(visible));
}

fn movie_label(record: &MovieRecord) -> String {
    match record.release_year() {
        Some(year) => format!("{} ({})", record.title, year),
        None => record.title.clone(),
    }
}

/// Pick one of the records shown under the current filter
fn pick_movie(session: &CurationSession, prompt: &str) -> Result<Option<MovieId>> {
    let (ids, labels): (Vec<MovieId>, Vec<String>) = session
        .visible_records()
        .into_iter()
        .map(|r| (r.id, movie_label(r)))
        .unzip();
    Ok(prompts::prompt_select(prompt, &labels, 0)?.map(|index| ids[index]))
}

fn field_hint(field: RecordField) -> String {
    match field {
        RecordField::Rating => "rating (0-10, '-' for none)".to_string(),
        RecordField::Duration => "duration in minutes".to_string(),
        RecordField::Genres | RecordField::Actors => format!("{} (comma separated)", field.name()),
        RecordField::Director | RecordField::TrailerUrl | RecordField::PosterUrl => {
            format!("{} ('-' for none)", field.name())
        }
        _ => field.name().to_string(),
    }
}

/// `-` clears only the fields that may be empty; elsewhere it is taken literally
fn entered_value(field: RecordField, input: &str) -> &str {
    let clearable = matches!(
        field,
        RecordField::Rating | RecordField::Director | RecordField::TrailerUrl | RecordField::PosterUrl
    );
    if clearable && input.trim() == "-" {
        ""
    } else {
        input
    }
}

fn preview(value: &str) -> String {
    const MAX: usize = 50;
    if value.chars().count() <= MAX {
        return value.to_string();
    }
    let cut: String = value.chars().take(MAX).collect();
    format!("{}...", cut)
}

fn edit_movie(session: &mut CurationSession, output: &Output) -> Result<()> {
    let Some(id) = pick_movie(session, "Edit which movie?")? else {
        return Ok(());
    };
    session.begin_edit(id)?;

    loop {
        let Some(draft) = session.draft() else {
            return Ok(());
        };
        let mut items: Vec<String> = RecordField::ALL
            .iter()
            .map(|field| format!("{:<9} {}", field.name(), preview(&field.current_value(draft))))
            .collect();
        items.push("Save changes".to_string());
        items.push("Cancel".to_string());

        match prompts::prompt_select(&format!("Editing {}", draft.title), &items, 0)? {
            Some(index) if index < RecordField::ALL.len() => {
                let field = RecordField::ALL[index];
                let current = field.current_value(draft);
                let value = prompts::prompt_string(&field_hint(field), Some(&current))?;
                if let Err(e) = session.edit_field(field, entered_value(field, &value)) {
                    output.error(e.to_string());
                }
            }
            Some(index) if index == RecordField::ALL.len() => {
                session.commit_edit()?;
                output.success("Changes saved");
                return Ok(());
            }
            _ => {
                session.cancel_edit();
                output.info("Edit cancelled");
                return Ok(());
            }
        }
    }
}

fn move_movie(session: &mut CurationSession, output: &Output) -> Result<()> {
    let Some(id) = pick_movie(session, "Move which movie?")? else {
        return Ok(());
    };

    let (others, mut labels): (Vec<MovieId>, Vec<String>) = session
        .review_list()
        .iter()
        .filter(|r| r.id != id)
        .map(|r| (r.id, format!("Before {}", movie_label(r))))
        .unzip();
    labels.push("To the end".to_string());

    let target = match prompts::prompt_select("Where to?", &labels, 0)? {
        Some(index) if index < others.len() => MoveTarget::Before(others[index]),
        Some(_) => MoveTarget::Index(others.len()),
        None => return Ok(()),
    };
    session.move_by_id(id, target)?;
    show_list(session, output);
    Ok(())
}

fn remove_movie(session: &mut CurationSession, output: &Output) -> Result<()> {
    let Some(id) = pick_movie(session, "Remove which movie?")? else {
        return Ok(());
    };
    let title = session
        .review_list()
        .get(id)
        .map(movie_label)
        .unwrap_or_default();
    if !prompts::prompt_yes_no(&format!("Remove {}?", title), true)? {
        return Ok(());
    }
    if session.remove(id).is_some() {
        output.success(format!("Removed {}", title));
    }
    Ok(())
}

async fn add_movie(session: &mut CurationSession, client: &dyn MetadataClient, output: &Output) -> Result<()> {
    let query = prompts::prompt_string("Search for a title", None)?;
    let matches = session.suggest(client, &query).await;
    if matches.is_empty() {
        output.warn(format!("No suggestions for '{}'", query.trim()));
        return Ok(());
    }

    let labels: Vec<String> = matches
        .iter()
        .map(|m| {
            if session.review_list().contains(m.id) {
                format!("{} {}", m.label(), "(already in list)".dimmed())
            } else {
                m.label()
            }
        })
        .collect();
    let Some(index) = prompts::prompt_select("Add which movie?", &labels, 0)? else {
        return Ok(());
    };

    let chosen = &matches[index];
    match session.add_match(client, chosen).await {
        Ok(_) => output.success(format!("Added {}", chosen.label())),
        Err(e) => output.error(format!("Could not add {}: {}", chosen.label(), e)),
    }
    Ok(())
}

fn choose_filter(session: &mut CurationSession, output: &Output) -> Result<()> {
    let genres = session.distinct_genres();
    let mut items = vec!["All genres".to_string()];
    items.extend(genres.iter().cloned());

    let Some(index) = prompts::prompt_select("Show which genre?", &items, 0)? else {
        return Ok(());
    };
    let filter = match index {
        0 => GenreFilter::All,
        i => GenreFilter::Genre(genres[i - 1].clone()),
    };
    session.set_genre_filter(filter);
    show_list(session, output);
    Ok(())
}
