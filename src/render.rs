use crate::workflows::awards::AwardReport;
use clap::ValueEnum;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot encode report as json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot encode report as csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv output is not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("cannot write report to {}: {}", .path.display(), .source)]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Renders the whole document in memory; nothing is written on failure.
pub fn render(report: &AwardReport, format: ReportFormat) -> Result<String, RenderError> {
    match format {
        ReportFormat::Text => Ok(render_text(report)),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        ReportFormat::Csv => render_csv(report),
    }
}

pub fn write_report(path: &Path, contents: &str) -> Result<(), RenderError> {
    std::fs::write(path, contents).map_err(|source| RenderError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn render_text(report: &AwardReport) -> String {
    let mut out = format!(
        "{}\n{}\n",
        report.title,
        "=".repeat(report.title.chars().count())
    );

    for (index, nomination) in report.nominations.iter().enumerate() {
        out.push_str(&format!(
            "\n{}. {}\n   {}\n   {}\n   avatar: {}\n",
            index + 1,
            nomination.title,
            nomination.subtitle,
            nomination.caption,
            nomination.avatar
        ));
    }

    out
}

fn render_csv(report: &AwardReport) -> Result<String, RenderError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for nomination in &report.nominations {
        writer.serialize(nomination)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| RenderError::Csv(err.into_error().into()))?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::awards::Nomination;

    fn sample_report() -> AwardReport {
        AwardReport {
            title: "Chat highlights of 2025".to_string(),
            nominations: vec![
                Nomination {
                    title: "Total messages".to_string(),
                    avatar: "images/1.jpg".to_string(),
                    subtitle: "3 messages".to_string(),
                    caption: "were written in the chat this year".to_string(),
                },
                Nomination {
                    title: "First message of the year".to_string(),
                    avatar: "images/user1.jpg".to_string(),
                    subtitle: "2025-01-01 00:00:01".to_string(),
                    caption: "happy new year, friends".to_string(),
                },
            ],
        }
    }

    #[test]
    fn text_lists_nominations_in_order() {
        let text = render(&sample_report(), ReportFormat::Text).expect("renders");
        assert!(text.starts_with("Chat highlights of 2025\n=======================\n"));
        let total = text.find("1. Total messages").expect("first entry");
        let first = text.find("2. First message of the year").expect("second entry");
        assert!(total < first);
        assert!(text.contains("   avatar: images/user1.jpg"));
    }

    #[test]
    fn text_block_lists_subtitle_caption_and_avatar() {
        let text = render(&sample_report(), ReportFormat::Text).expect("renders");
        assert!(text.ends_with(concat!(
            "\n2. First message of the year\n",
            "   2025-01-01 00:00:01\n",
            "   happy new year, friends\n",
            "   avatar: images/user1.jpg\n"
        )));
    }

    #[test]
    fn json_round_trips_structure() {
        let json = render(&sample_report(), ReportFormat::Json).expect("renders");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["title"], "Chat highlights of 2025");
        assert_eq!(value["nominations"][1]["subtitle"], "2025-01-01 00:00:01");
    }

    #[test]
    fn csv_has_header_and_quotes_commas() {
        let csv = render(&sample_report(), ReportFormat::Csv).expect("renders");
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("title,avatar,subtitle,caption"));
        assert_eq!(
            lines.next(),
            Some("Total messages,images/1.jpg,3 messages,were written in the chat this year")
        );
        assert_eq!(
            lines.next(),
            Some(concat!(
                "First message of the year,images/user1.jpg,",
                "2025-01-01 00:00:01,\"happy new year, friends\""
            ))
        );
    }

    #[test]
    fn write_failure_is_reported_with_path() {
        let path = Path::new("./missing-directory/report.txt");
        let error = write_report(path, "x").expect_err("directory does not exist");
        match error {
            RenderError::Write { path: failed, .. } => assert_eq!(failed, path),
            other => panic!("expected write error, got {other:?}"),
        }
    }
}
