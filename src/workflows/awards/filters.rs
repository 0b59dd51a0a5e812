use crate::workflows::export::Message;
use chrono::Datelike;

pub const VIDEO_NOTE_MEDIA: &str = "video_message";
pub const STICKER_MEDIA: &str = "sticker";
pub const USER_MESSAGE_KIND: &str = "message";

/// Predicate over a single message. Filters are plain data so award
/// definitions can list them in constant tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageFilter {
    Always,
    VideoNote,
    /// Text without any attached media.
    PlainText,
    TextContains(&'static str),
    KindIs(&'static str),
    Forwarded,
    Year(i32),
    HasPhoto,
    MediaType(&'static str),
    HasSender,
    HasText,
    HasReactions,
}

impl MessageFilter {
    pub fn matches(&self, message: &Message) -> bool {
        match *self {
            Self::Always => true,
            Self::VideoNote => message.media_type == VIDEO_NOTE_MEDIA,
            Self::PlainText => message.media_type.is_empty() && !message.text().is_empty(),
            Self::TextContains(needle) => message.text().contains(needle),
            Self::KindIs(kind) => message.kind == kind,
            Self::Forwarded => !message.forwarded_from.is_empty(),
            Self::Year(year) => message.timestamp.year() == year,
            Self::HasPhoto => !message.photo.is_empty(),
            Self::MediaType(media_type) => message.media_type == media_type,
            Self::HasSender => !message.sender_id.is_empty(),
            Self::HasText => !message.text().is_empty(),
            Self::HasReactions => !message.reactions.is_empty(),
        }
    }
}

/// True when every filter accepts the message. An empty list accepts everything.
pub fn matches_all(filters: &[MessageFilter], message: &Message) -> bool {
    filters.iter().all(|filter| filter.matches(message))
}

pub fn filter_messages(messages: &[Message], filters: &[MessageFilter]) -> Vec<Message> {
    messages
        .iter()
        .filter(|message| matches_all(filters, message))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::export::NormalizedText;
    use chrono::NaiveDate;

    fn message(text: &str) -> Message {
        let timestamp = NaiveDate::from_ymd_opt(2025, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        Message::new(1, "message", timestamp, NormalizedText::plain(text))
    }

    #[test]
    fn media_filters_follow_media_type() {
        let video = message("").with_media_type("video_message");
        let sticker = message("").with_media_type("sticker");

        assert!(MessageFilter::VideoNote.matches(&video));
        assert!(!MessageFilter::VideoNote.matches(&sticker));
        assert!(MessageFilter::MediaType(STICKER_MEDIA).matches(&sticker));
        assert!(MessageFilter::Always.matches(&sticker));
    }

    #[test]
    fn plain_text_requires_text_and_no_media() {
        assert!(MessageFilter::PlainText.matches(&message("hi")));
        assert!(!MessageFilter::PlainText.matches(&message("")));
        let captioned = message("caption").with_media_type("animation");
        assert!(!MessageFilter::PlainText.matches(&captioned));
    }

    #[test]
    fn text_and_metadata_filters() {
        let link = message("look https://www.tiktok.com/@x/video/1");
        assert!(MessageFilter::TextContains("tiktok.com").matches(&link));
        assert!(!MessageFilter::TextContains("tiktok.com").matches(&message("tik tok")));

        assert!(MessageFilter::KindIs(USER_MESSAGE_KIND).matches(&link));
        assert!(!MessageFilter::KindIs("service").matches(&link));

        assert!(MessageFilter::Forwarded.matches(&message("x").with_forwarded_from("News")));
        assert!(!MessageFilter::Forwarded.matches(&link));

        assert!(MessageFilter::HasSender.matches(&message("x").with_sender("Al", "user1")));
        assert!(!MessageFilter::HasSender.matches(&link));
    }

    #[test]
    fn year_uses_local_timestamp() {
        let late = message("late");
        assert!(MessageFilter::Year(2025).matches(&late));
        assert!(!MessageFilter::Year(2026).matches(&late));
    }

    #[test]
    fn combinator_requires_every_filter() {
        let msg = message("hello").with_sender("Al", "user1");
        assert!(matches_all(&[], &msg));
        assert!(matches_all(
            &[MessageFilter::HasSender, MessageFilter::HasText],
            &msg
        ));
        assert!(!matches_all(
            &[MessageFilter::HasSender, MessageFilter::Forwarded],
            &msg
        ));
    }

    #[test]
    fn filter_messages_keeps_input_order() {
        let messages = vec![message("a"), message(""), message("b"), message("c")];
        let kept = filter_messages(&messages, &[MessageFilter::HasText]);
        let texts: Vec<&str> = kept.iter().map(Message::text).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }
}
