use super::resolve_ui::{is_interactive, ResolveUI};
use super::review::{run_review, ReviewOutcome};
use super::AppContext;
use crate::output::Output;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use marquee_core::{default_export_path, write_export, CurationSession, ResolutionReport};
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::PathBuf;

pub struct ResolveArgs {
    pub file: PathBuf,
    pub locale: Option<String>,
    pub exclude: Vec<usize>, // 1-based positions among the parsed titles
    pub out: Option<PathBuf>,
    pub review: bool,
}

pub async fn run_resolve(args: ResolveArgs, api_key: Option<&str>, output: &Output) -> Result<()> {
    tracing::debug!("Resolve command started");

    if args.review && !is_interactive() {
        return Err(eyre!("--review needs an interactive terminal"));
    }

    let ctx = AppContext::load()?;
    let client = ctx.metadata_client(api_key)?;

    let bytes = std::fs::read(&args.file)
        .wrap_err_with(|| format!("Failed to read title list {}", args.file.display()))?;
    let text = String::from_utf8_lossy(&bytes);

    let mut session = CurationSession::from_config(&ctx.config.curation);
    session.set_locale(ctx.locale(args.locale));

    let count = session.load_text(&text);
    if count == 0 {
        output.warn(format!("No titles found in {}", args.file.display()));
        return Ok(());
    }
    for position in &args.exclude {
        let index = position.checked_sub(1).ok_or_else(|| eyre!("--exclude positions start at 1"))?;
        session
            .set_include(index, false)
            .map_err(|_| eyre!("--exclude {} is out of range: the list has {} titles", position, count))?;
    }

    let ui = ResolveUI::new(output);
    let report = session
        .resolve(client.as_ref(), |event| ui.on_event(event))
        .await
        .map_err(|e| eyre!("Resolution failed: {}", e))?;
    ui.finish();
    print_report(&report, output);

    if args.review {
        match run_review(&mut session, client.as_ref(), output).await? {
            ReviewOutcome::Save => {}
            ReviewOutcome::Discard => {
                output.info("Discarded the list without saving");
                return Ok(());
            }
        }
    }

    if session.review_list().is_empty() {
        output.warn("Nothing to save: no titles were resolved");
        return Ok(());
    }

    let path = args
        .out
        .unwrap_or_else(|| default_export_path(&ctx.paths.exports_dir()));
    let payload = session.save();
    write_export(&path, &payload).map_err(|e| eyre!("{:#}", e))?;

    if output.is_human() {
        output.success(format!("Saved {} movies to {}", payload.records.len(), path.display()));
    } else {
        output.data(
            "export",
            &json!({
                "path": path.display().to_string(),
                "records": payload.records.len(),
                "locale": payload.locale,
            }),
        );
    }
    Ok(())
}

fn print_report(report: &ResolutionReport, output: &Output) {
    if !output.is_human() {
        output.data("resolution", report);
        return;
    }

    let summary = format!("Resolved {} of {} titles", report.resolved, report.attempted);
    if report.skipped.is_empty() {
        output.success(summary);
        return;
    }

    output.warn(format!("{} ({} skipped)", summary, report.skipped.len()));
    if output.is_quiet() {
        return;
    }
    for skipped in &report.skipped {
        println!(
            "  {} {} {}",
            format!("#{}", skipped.line + 1).dimmed(),
            skipped.title.bold(),
            format!("({})", skipped.reason).yellow()
        );
    }
}
