use super::aggregate::{pick_extremum, tally_by, Extremum};
use super::catalog::{
    fill_template, AwardDefinition, BUSIEST_DAY, EMOJI_CHAMPION, FORWARDS, LEAST_ACTIVE,
    LONGEST_AVERAGE, MOST_ACTIVE, MOST_DAYS_ACTIVE, PHOTOS, REACTIONS_RECEIVED, STICKERS,
    TIKTOK_LINKS, VIDEO_NOTES,
};
use super::emoji::emoji_glyphs;
use super::filters::MessageFilter;
use crate::workflows::export::Message;
use serde::Serialize;
use thiserror::Error;

pub const MENTION_FRAGMENT: &str = "mention";
const FIRST_MESSAGE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One rendered award. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Nomination {
    pub title: String,
    pub avatar: String,
    pub subtitle: String,
    pub caption: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AwardError {
    #[error("not enough messages to decide '{}'", .award.title())]
    InsufficientData { award: AwardKind },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AwardKind {
    TotalMessages,
    MostActive,
    LeastActive,
    FirstMessage,
    TikTokLinks,
    VideoNotes,
    Photos,
    LongestAverage,
    MostDaysActive,
    Forwards,
    MostMentioned,
    ReactionsGiven,
    ReactionsReceived,
    EmojiChampion,
    FavoriteEmoji,
    Stickers,
    BusiestDay,
}

/// How an award is computed: a catalog entry or one of the hand-written cases.
#[derive(Debug, Clone, Copy)]
pub enum AwardRule {
    Catalog(&'static AwardDefinition),
    TotalMessages,
    FirstMessage,
    MostMentioned,
    ReactionsGiven,
    FavoriteEmoji,
}

impl AwardKind {
    /// Report order.
    pub const fn ordered() -> [AwardKind; 17] {
        [
            AwardKind::TotalMessages,
            AwardKind::MostActive,
            AwardKind::LeastActive,
            AwardKind::FirstMessage,
            AwardKind::TikTokLinks,
            AwardKind::VideoNotes,
            AwardKind::Photos,
            AwardKind::LongestAverage,
            AwardKind::MostDaysActive,
            AwardKind::Forwards,
            AwardKind::MostMentioned,
            AwardKind::ReactionsGiven,
            AwardKind::ReactionsReceived,
            AwardKind::EmojiChampion,
            AwardKind::FavoriteEmoji,
            AwardKind::Stickers,
            AwardKind::BusiestDay,
        ]
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::TotalMessages => "Total messages",
            Self::MostActive => "Most active",
            Self::LeastActive => "Quietest member",
            Self::FirstMessage => "First message of the year",
            Self::TikTokLinks => "iPad kid of the year",
            Self::VideoNotes => "Podcast king",
            Self::Photos => "Photographer of the year",
            Self::LongestAverage => "Longest storyteller",
            Self::MostDaysActive => "Attendance champion",
            Self::Forwards => "Town crier",
            Self::MostMentioned => "Chat favourite",
            Self::ReactionsGiven => "Silent supporter",
            Self::ReactionsReceived => "Audience award",
            Self::EmojiChampion => "Millennial of the year",
            Self::FavoriteEmoji => "Emoji of the year",
            Self::Stickers => "Sticker collector",
            Self::BusiestDay => "Busiest day",
        }
    }

    pub fn rule(self) -> AwardRule {
        match self {
            Self::TotalMessages => AwardRule::TotalMessages,
            Self::MostActive => AwardRule::Catalog(&MOST_ACTIVE),
            Self::LeastActive => AwardRule::Catalog(&LEAST_ACTIVE),
            Self::FirstMessage => AwardRule::FirstMessage,
            Self::TikTokLinks => AwardRule::Catalog(&TIKTOK_LINKS),
            Self::VideoNotes => AwardRule::Catalog(&VIDEO_NOTES),
            Self::Photos => AwardRule::Catalog(&PHOTOS),
            Self::LongestAverage => AwardRule::Catalog(&LONGEST_AVERAGE),
            Self::MostDaysActive => AwardRule::Catalog(&MOST_DAYS_ACTIVE),
            Self::Forwards => AwardRule::Catalog(&FORWARDS),
            Self::MostMentioned => AwardRule::MostMentioned,
            Self::ReactionsGiven => AwardRule::ReactionsGiven,
            Self::ReactionsReceived => AwardRule::Catalog(&REACTIONS_RECEIVED),
            Self::EmojiChampion => AwardRule::Catalog(&EMOJI_CHAMPION),
            Self::FavoriteEmoji => AwardRule::FavoriteEmoji,
            Self::Stickers => AwardRule::Catalog(&STICKERS),
            Self::BusiestDay => AwardRule::Catalog(&BUSIEST_DAY),
        }
    }
}

/// Where award pictures come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarPolicy {
    placeholder: String,
    user_template: String,
    pinned_mention_id: String,
}

impl AvatarPolicy {
    pub fn new(
        placeholder: impl Into<String>,
        user_template: impl Into<String>,
        pinned_mention_id: impl Into<String>,
    ) -> Self {
        Self {
            placeholder: placeholder.into(),
            user_template: user_template.into(),
            pinned_mention_id: pinned_mention_id.into(),
        }
    }

    pub fn placeholder(&self) -> String {
        self.placeholder.clone()
    }

    /// Avatar of a sender. Blank ids (service messages) get the placeholder.
    pub fn for_user(&self, sender_id: &str) -> String {
        if sender_id.is_empty() {
            return self.placeholder();
        }
        self.user_template.replace("{id}", sender_id)
    }

    /// The most-mentioned award always shows this sender's avatar, whoever wins.
    pub fn pinned_mention(&self) -> String {
        self.for_user(&self.pinned_mention_id)
    }
}

impl Default for AvatarPolicy {
    fn default() -> Self {
        Self::new("images/1.jpg", "images/{id}.jpg", "user1097835763")
    }
}

impl Nomination {
    /// Stand-in shown when an award had nothing to rank.
    pub fn placeholder(kind: AwardKind, avatars: &AvatarPolicy) -> Self {
        Self {
            title: kind.title().to_string(),
            avatar: avatars.placeholder(),
            subtitle: "-".to_string(),
            caption: "not enough data".to_string(),
        }
    }
}

pub fn nominate(
    kind: AwardKind,
    messages: &[Message],
    avatars: &AvatarPolicy,
) -> Result<Nomination, AwardError> {
    match kind.rule() {
        AwardRule::Catalog(definition) => definition.evaluate(messages, avatars),
        AwardRule::TotalMessages => Ok(total_messages(messages, avatars)),
        AwardRule::FirstMessage => first_message(messages, avatars),
        AwardRule::MostMentioned => most_mentioned(messages, avatars),
        AwardRule::ReactionsGiven => reactions_given(messages, avatars),
        AwardRule::FavoriteEmoji => favorite_emoji(messages, avatars),
    }
}

pub fn total_messages(messages: &[Message], avatars: &AvatarPolicy) -> Nomination {
    Nomination {
        title: AwardKind::TotalMessages.title().to_string(),
        avatar: avatars.placeholder(),
        subtitle: format!("{} messages", messages.len()),
        caption: "were written in the chat this year".to_string(),
    }
}

pub fn first_message(
    messages: &[Message],
    avatars: &AvatarPolicy,
) -> Result<Nomination, AwardError> {
    let first = messages
        .iter()
        .find(|message| MessageFilter::PlainText.matches(message))
        .ok_or(AwardError::InsufficientData {
            award: AwardKind::FirstMessage,
        })?;

    Ok(Nomination {
        title: AwardKind::FirstMessage.title().to_string(),
        avatar: avatars.for_user(&first.sender_id),
        subtitle: first.timestamp.format(FIRST_MESSAGE_FORMAT).to_string(),
        caption: first.text().to_string(),
    })
}

pub fn most_mentioned(
    messages: &[Message],
    avatars: &AvatarPolicy,
) -> Result<Nomination, AwardError> {
    let mentions = tally_by(messages, &[MessageFilter::Always], |message| {
        message
            .fragments()
            .iter()
            .filter(|fragment| fragment.kind == MENTION_FRAGMENT && !fragment.text.is_empty())
            .map(|fragment| {
                fragment
                    .text
                    .strip_prefix('@')
                    .unwrap_or(&fragment.text)
                    .to_string()
            })
            .collect()
    });
    if mentions.is_empty() {
        return Err(AwardError::InsufficientData {
            award: AwardKind::MostMentioned,
        });
    }

    let (name, count) = pick_extremum(&mentions, Extremum::Max);
    Ok(Nomination {
        title: AwardKind::MostMentioned.title().to_string(),
        avatar: avatars.pinned_mention(),
        subtitle: fill_template("{count} mentions of @{key}", &name, count),
        caption: "tagged with @ more than anyone".to_string(),
    })
}

/// Counts reactors from each reaction's recent sample only, so totals are a
/// lower bound.
pub fn reactions_given(
    messages: &[Message],
    avatars: &AvatarPolicy,
) -> Result<Nomination, AwardError> {
    let reactors = tally_by(messages, &[MessageFilter::HasReactions], |message| {
        message
            .reactions
            .iter()
            .flat_map(|reaction| reaction.recent.iter())
            .map(|reactor| reactor.id.clone())
            .collect()
    });
    if reactors.is_empty() {
        return Err(AwardError::InsufficientData {
            award: AwardKind::ReactionsGiven,
        });
    }

    let (reactor, count) = pick_extremum(&reactors, Extremum::Max);
    Ok(Nomination {
        title: AwardKind::ReactionsGiven.title().to_string(),
        avatar: avatars.for_user(&reactor),
        subtitle: format!("{count} reactions"),
        caption: "left the most reactions this year".to_string(),
    })
}

pub fn favorite_emoji(
    messages: &[Message],
    avatars: &AvatarPolicy,
) -> Result<Nomination, AwardError> {
    let glyphs = tally_by(messages, &[MessageFilter::HasText], |message| {
        emoji_glyphs(message.text()).map(String::from).collect()
    });
    if glyphs.is_empty() {
        return Err(AwardError::InsufficientData {
            award: AwardKind::FavoriteEmoji,
        });
    }

    let (glyph, count) = pick_extremum(&glyphs, Extremum::Max);
    Ok(Nomination {
        title: AwardKind::FavoriteEmoji.title().to_string(),
        avatar: avatars.placeholder(),
        subtitle: format!("emoji {glyph}"),
        caption: format!("used {count} times"),
    })
}
