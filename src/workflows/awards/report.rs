use super::filters::{filter_messages, MessageFilter, USER_MESSAGE_KIND};
use super::nominations::{nominate, AvatarPolicy, AwardError, AwardKind, Nomination};
use crate::workflows::export::{ChatExport, Message};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Inputs that shape one report run.
#[derive(Debug, Clone)]
pub struct AwardSettings {
    pub year: i32,
    pub title: String,
    pub avatars: AvatarPolicy,
}

impl AwardSettings {
    pub fn for_year(year: i32) -> Self {
        Self {
            year,
            title: default_title(year),
            avatars: AvatarPolicy::default(),
        }
    }
}

pub fn default_title(year: i32) -> String {
    format!("Chat highlights of {year}")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AwardReport {
    pub title: String,
    pub nominations: Vec<Nomination>,
}

/// User-authored messages from the requested year, in export order.
pub fn prepare_messages(export: &ChatExport, year: i32) -> Vec<Message> {
    filter_messages(
        &export.messages,
        &[MessageFilter::KindIs(USER_MESSAGE_KIND), MessageFilter::Year(year)],
    )
}

impl AwardReport {
    pub fn from_export(export: &ChatExport, settings: &AwardSettings) -> Self {
        let messages = prepare_messages(export, settings.year);
        info!(
            year = settings.year,
            total = export.messages.len(),
            kept = messages.len(),
            "messages prepared for awards"
        );
        Self::assemble(&messages, settings)
    }

    /// Runs every award in report order. Awards without enough data are
    /// replaced by a placeholder rather than failing the report.
    pub fn assemble(messages: &[Message], settings: &AwardSettings) -> Self {
        let nominations = AwardKind::ordered()
            .into_iter()
            .map(|kind| match nominate(kind, messages, &settings.avatars) {
                Ok(nomination) => {
                    debug!(award = ?kind, subtitle = %nomination.subtitle, "award decided");
                    nomination
                }
                Err(AwardError::InsufficientData { award }) => {
                    warn!(award = ?award, "no qualifying messages, using placeholder");
                    Nomination::placeholder(award, &settings.avatars)
                }
            })
            .collect();

        Self {
            title: settings.title.clone(),
            nominations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::export::NormalizedText;
    use chrono::NaiveDate;

    fn message(kind: &str, year: i32, sender: &str, text: &str) -> Message {
        let timestamp = NaiveDate::from_ymd_opt(year, 7, 14)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        Message::new(1, kind, timestamp, NormalizedText::plain(text)).with_sender(sender, sender)
    }

    fn export(messages: Vec<Message>) -> ChatExport {
        ChatExport {
            name: "Friends".to_string(),
            kind: "private_group".to_string(),
            id: 1,
            messages,
        }
    }

    #[test]
    fn prepare_keeps_user_messages_of_the_year() {
        let export = export(vec![
            message("message", 2024, "a", "old"),
            message("service", 2025, "", "pinned"),
            message("message", 2025, "b", "kept"),
            message("message", 2026, "c", "new"),
        ]);
        let kept = prepare_messages(&export, 2025);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].text(), "kept");
    }

    #[test]
    fn assemble_emits_every_award_in_order() {
        let messages = vec![message("message", 2025, "a", "hello")];
        let report = AwardReport::assemble(&messages, &AwardSettings::for_year(2025));
        assert_eq!(report.title, "Chat highlights of 2025");
        let titles: Vec<&str> = report.nominations.iter().map(|n| n.title.as_str()).collect();
        let expected: Vec<&str> = AwardKind::ordered().iter().map(|k| k.title()).collect();
        assert_eq!(titles, expected);
    }

    #[test]
    fn empty_year_yields_placeholders() {
        let export = export(vec![message("message", 2024, "a", "old")]);
        let report = AwardReport::from_export(&export, &AwardSettings::for_year(2025));
        assert_eq!(report.nominations.len(), 17);
        assert_eq!(report.nominations[0].subtitle, "0 messages");
        assert!(report.nominations[1..]
            .iter()
            .all(|nomination| nomination.caption == "not enough data"));
    }
}
