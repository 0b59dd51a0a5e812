use super::domain::{ChatExport, Message, Reaction, RecentReactor};
use super::normalizer::{normalize_text, TextPayload};
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub(crate) fn parse_export<R: Read>(reader: R) -> Result<ChatExport, serde_json::Error> {
    let raw: RawExport = serde_json::from_reader(reader)?;
    Ok(raw.into_export())
}

#[derive(Debug, Deserialize)]
struct RawExport {
    #[serde(default, deserialize_with = "null_as_empty")]
    name: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_empty")]
    kind: String,
    #[serde(default)]
    id: i64,
    #[serde(default)]
    messages: Vec<RawMessage>,
}

impl RawExport {
    fn into_export(self) -> ChatExport {
        ChatExport {
            name: self.name,
            kind: self.kind,
            id: self.id,
            messages: self
                .messages
                .into_iter()
                .map(RawMessage::into_message)
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawMessage {
    #[serde(default)]
    id: i64,
    #[serde(rename = "type", default, deserialize_with = "null_as_empty")]
    kind: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    date: NaiveDateTime,
    #[serde(default, deserialize_with = "null_as_empty")]
    from: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    from_id: String,
    #[serde(default)]
    text: TextPayload,
    #[serde(default, deserialize_with = "null_as_empty")]
    media_type: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    photo: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    forwarded_from: String,
    #[serde(default)]
    reactions: Vec<RawReaction>,
}

impl RawMessage {
    fn into_message(self) -> Message {
        Message::new(self.id, self.kind, self.date, normalize_text(self.text))
            .with_sender(self.from, self.from_id)
            .with_media_type(self.media_type)
            .with_photo(self.photo)
            .with_forwarded_from(self.forwarded_from)
            .with_reactions(
                self.reactions
                    .into_iter()
                    .map(RawReaction::into_reaction)
                    .collect(),
            )
    }
}

#[derive(Debug, Deserialize)]
struct RawReaction {
    #[serde(default, deserialize_with = "null_as_empty")]
    emoji: String,
    #[serde(default)]
    count: u32,
    #[serde(rename = "type", default, deserialize_with = "null_as_empty")]
    kind: String,
    #[serde(default)]
    recent: Vec<RawRecentReactor>,
}

impl RawReaction {
    fn into_reaction(self) -> Reaction {
        Reaction {
            emoji: self.emoji,
            count: self.count,
            kind: self.kind,
            recent: self
                .recent
                .into_iter()
                .map(|recent| RecentReactor {
                    name: recent.from,
                    id: recent.from_id,
                    date: recent.date,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawRecentReactor {
    #[serde(default, deserialize_with = "null_as_empty")]
    from: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    from_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    date: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .map_err(|err| format!("invalid message timestamp '{raw}' ({err})"))
}
