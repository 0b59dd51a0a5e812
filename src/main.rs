use chat_awards::config::{AppConfig, AwardsConfig};
use chat_awards::error::AppError;
use chat_awards::render::{render, write_report, ReportFormat};
use chat_awards::telemetry;
use chat_awards::workflows::awards::{prepare_messages, AwardReport};
use chat_awards::workflows::export::{ChatExport, ChatExportLoader};
use clap::{Args, Parser, Subcommand};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "chat-awards",
    about = "Hand out year-in-review awards for an exported chat history",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute every award and render the report
    Report(ReportArgs),
    /// Summarize an export before generating a report
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Path to the JSON chat export
    #[arg(long)]
    input: PathBuf,
    /// Calendar year to report on (overrides APP_REPORT_YEAR)
    #[arg(long)]
    year: Option<i32>,
    /// Report title (overrides APP_REPORT_TITLE)
    #[arg(long)]
    title: Option<String>,
    /// Output format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,
    /// Write the report to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Path to the JSON chat export
    #[arg(long)]
    input: PathBuf,
    /// Calendar year used to select messages (overrides APP_REPORT_YEAR)
    #[arg(long)]
    year: Option<i32>,
    /// How many selected messages to print
    #[arg(long, default_value_t = 5)]
    limit: usize,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Command::Report(args) => run_report(args, config.awards),
        Command::Inspect(args) => run_inspect(args, config.awards),
    }
}

fn run_report(args: ReportArgs, awards: AwardsConfig) -> Result<(), AppError> {
    let ReportArgs {
        input,
        year,
        title,
        format,
        output,
    } = args;

    let settings = apply_overrides(awards, year, title).settings();
    let export = ChatExportLoader::from_path(&input)?;
    let report = AwardReport::from_export(&export, &settings);
    let document = render(&report, format)?;

    match output {
        Some(path) => {
            write_report(&path, &document)?;
            info!(path = %path.display(), ?format, "report written");
        }
        None => print!("{document}"),
    }

    Ok(())
}

/// Command-line flags take precedence over the environment.
fn apply_overrides(
    mut awards: AwardsConfig,
    year: Option<i32>,
    title: Option<String>,
) -> AwardsConfig {
    if let Some(year) = year {
        awards.year = year;
    }
    if title.is_some() {
        awards.title = title;
    }
    awards
}

fn run_inspect(args: InspectArgs, awards: AwardsConfig) -> Result<(), AppError> {
    let year = args.year.unwrap_or(awards.year);
    let export = ChatExportLoader::from_path(&args.input)?;
    print!("{}", render_inspection(&export, year, args.limit));
    Ok(())
}

fn render_inspection(export: &ChatExport, year: i32, limit: usize) -> String {
    let mut out = format!(
        "Chat export: {} ({}, id {})\nMessages: {}\n",
        export.name,
        export.kind,
        export.id,
        export.messages.len()
    );

    let mut kinds: BTreeMap<&str, usize> = BTreeMap::new();
    for message in &export.messages {
        *kinds.entry(message.kind.as_str()).or_default() += 1;
    }
    out.push_str("\nMessage kinds\n");
    for (kind, count) in &kinds {
        out.push_str(&format!("- {kind}: {count}\n"));
    }

    let media: BTreeSet<&str> = export
        .messages
        .iter()
        .map(|message| message.media_type.as_str())
        .filter(|media_type| !media_type.is_empty())
        .collect();
    if media.is_empty() {
        out.push_str("\nMedia types: none\n");
    } else {
        out.push_str("\nMedia types\n");
        for media_type in media {
            out.push_str(&format!("- {media_type}\n"));
        }
    }

    let prepared = prepare_messages(export, year);
    out.push_str(&format!("\nMessages selected for {year}: {}\n", prepared.len()));
    if let (Some(first), Some(last)) = (prepared.first(), prepared.last()) {
        out.push_str(&format!("Range: {} -> {}\n", first.timestamp, last.timestamp));
    }

    for message in prepared.iter().take(limit) {
        out.push_str(&format!(
            "\nMessage #{}\nFrom: {} ({})\nDate: {}\nText: {}\n",
            message.id,
            message.sender,
            message.sender_id,
            message.timestamp,
            message.text()
        ));
    }

    out
}
