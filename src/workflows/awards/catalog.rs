use super::aggregate::{
    count_by, distinct_days_by, pick_extremum, ratio_by, sum_by, Extremum, Tally,
};
use super::emoji::count_emoji;
use super::filters::{MessageFilter, STICKER_MEDIA};
use super::nominations::{AvatarPolicy, AwardError, AwardKind, Nomination};
use crate::workflows::export::Message;

pub const DAY_LABEL_FORMAT: &str = "%A, %-d %B";

/// How a message is grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySelector {
    Sender,
    CalendarDay,
}

impl KeySelector {
    pub fn key(self, message: &Message) -> String {
        match self {
            Self::Sender => message.sender_id.clone(),
            Self::CalendarDay => message.timestamp.format(DAY_LABEL_FORMAT).to_string(),
        }
    }
}

/// Per-message quantity fed into sums and averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    TextChars,
    EmojiCount,
    ReactionCount,
}

impl Metric {
    pub fn measure(self, message: &Message) -> u64 {
        match self {
            Self::TextChars => message.text().chars().count() as u64,
            Self::EmojiCount => count_emoji(message.text()),
            Self::ReactionCount => message
                .reactions
                .iter()
                .map(|reaction| u64::from(reaction.count))
                .sum(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    Count,
    Sum(Metric),
    Average(Metric),
    DistinctDays,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarRule {
    Placeholder,
    Winner,
}

/// Declarative description of a "group, aggregate, pick the extreme" award.
///
/// `subtitle` and `caption` are templates: `{key}` expands to the winning key
/// and `{count}` to its value.
#[derive(Debug)]
pub struct AwardDefinition {
    pub kind: AwardKind,
    pub filters: &'static [MessageFilter],
    pub key: KeySelector,
    pub measure: Measure,
    pub extremum: Extremum,
    pub subtitle: &'static str,
    pub caption: &'static str,
    pub avatar: AvatarRule,
}

impl AwardDefinition {
    pub fn tally(&self, messages: &[Message]) -> Tally {
        let key = |message: &Message| self.key.key(message);
        match self.measure {
            Measure::Count => count_by(messages, self.filters, key),
            Measure::Sum(metric) => sum_by(messages, self.filters, |m| metric.measure(m), key),
            Measure::Average(metric) => {
                ratio_by(messages, self.filters, |m| metric.measure(m), key)
            }
            Measure::DistinctDays => distinct_days_by(messages, self.filters, key),
        }
    }

    pub fn evaluate(
        &self,
        messages: &[Message],
        avatars: &AvatarPolicy,
    ) -> Result<Nomination, AwardError> {
        let tally = self.tally(messages);
        if tally.is_empty() {
            return Err(AwardError::InsufficientData { award: self.kind });
        }

        let (key, count) = pick_extremum(&tally, self.extremum);
        let avatar = match self.avatar {
            AvatarRule::Placeholder => avatars.placeholder(),
            AvatarRule::Winner => avatars.for_user(&key),
        };

        Ok(Nomination {
            title: self.kind.title().to_string(),
            avatar,
            subtitle: fill_template(self.subtitle, &key, count),
            caption: fill_template(self.caption, &key, count),
        })
    }
}

pub(crate) fn fill_template(template: &str, key: &str, count: u64) -> String {
    template
        .replace("{key}", key)
        .replace("{count}", &count.to_string())
}

pub static MOST_ACTIVE: AwardDefinition = AwardDefinition {
    kind: AwardKind::MostActive,
    filters: &[MessageFilter::Always],
    key: KeySelector::Sender,
    measure: Measure::Count,
    extremum: Extremum::Max,
    subtitle: "{count}",
    caption: "messages this year",
    avatar: AvatarRule::Winner,
};

pub static LEAST_ACTIVE: AwardDefinition = AwardDefinition {
    kind: AwardKind::LeastActive,
    filters: &[MessageFilter::Always],
    key: KeySelector::Sender,
    measure: Measure::Count,
    extremum: Extremum::Min,
    subtitle: "{count}",
    caption: "messages in the whole year",
    avatar: AvatarRule::Winner,
};

pub static TIKTOK_LINKS: AwardDefinition = AwardDefinition {
    kind: AwardKind::TikTokLinks,
    filters: &[MessageFilter::TextContains("tiktok.com")],
    key: KeySelector::Sender,
    measure: Measure::Count,
    extremum: Extremum::Max,
    subtitle: "{count}",
    caption: "TikTok links shared this year",
    avatar: AvatarRule::Winner,
};

pub static VIDEO_NOTES: AwardDefinition = AwardDefinition {
    kind: AwardKind::VideoNotes,
    filters: &[MessageFilter::VideoNote],
    key: KeySelector::Sender,
    measure: Measure::Count,
    extremum: Extremum::Max,
    subtitle: "{count}",
    caption: "video notes recorded this year",
    avatar: AvatarRule::Winner,
};

pub static PHOTOS: AwardDefinition = AwardDefinition {
    kind: AwardKind::Photos,
    filters: &[MessageFilter::HasPhoto],
    key: KeySelector::Sender,
    measure: Measure::Count,
    extremum: Extremum::Max,
    subtitle: "{count} photos",
    caption: "shared the most photos this year",
    avatar: AvatarRule::Winner,
};

pub static LONGEST_AVERAGE: AwardDefinition = AwardDefinition {
    kind: AwardKind::LongestAverage,
    filters: &[MessageFilter::HasSender, MessageFilter::HasText],
    key: KeySelector::Sender,
    measure: Measure::Average(Metric::TextChars),
    extremum: Extremum::Max,
    subtitle: "{count} characters on average",
    caption: "writes the longest messages",
    avatar: AvatarRule::Winner,
};

pub static MOST_DAYS_ACTIVE: AwardDefinition = AwardDefinition {
    kind: AwardKind::MostDaysActive,
    filters: &[MessageFilter::HasSender],
    key: KeySelector::Sender,
    measure: Measure::DistinctDays,
    extremum: Extremum::Max,
    subtitle: "{count} active days",
    caption: "showed up almost every day of the year",
    avatar: AvatarRule::Winner,
};

pub static FORWARDS: AwardDefinition = AwardDefinition {
    kind: AwardKind::Forwards,
    filters: &[MessageFilter::Forwarded],
    key: KeySelector::Sender,
    measure: Measure::Count,
    extremum: Extremum::Max,
    subtitle: "{count}",
    caption: "messages forwarded this year",
    avatar: AvatarRule::Winner,
};

pub static REACTIONS_RECEIVED: AwardDefinition = AwardDefinition {
    kind: AwardKind::ReactionsReceived,
    filters: &[MessageFilter::HasSender, MessageFilter::HasReactions],
    key: KeySelector::Sender,
    measure: Measure::Sum(Metric::ReactionCount),
    extremum: Extremum::Max,
    subtitle: "{count} reactions",
    caption: "received the most reactions this year",
    avatar: AvatarRule::Winner,
};

pub static EMOJI_CHAMPION: AwardDefinition = AwardDefinition {
    kind: AwardKind::EmojiChampion,
    filters: &[MessageFilter::HasSender, MessageFilter::HasText],
    key: KeySelector::Sender,
    measure: Measure::Sum(Metric::EmojiCount),
    extremum: Extremum::Max,
    subtitle: "{count} emoji",
    caption: "used in messages this year",
    avatar: AvatarRule::Winner,
};

pub static STICKERS: AwardDefinition = AwardDefinition {
    kind: AwardKind::Stickers,
    filters: &[MessageFilter::HasSender, MessageFilter::MediaType(STICKER_MEDIA)],
    key: KeySelector::Sender,
    measure: Measure::Count,
    extremum: Extremum::Max,
    subtitle: "{count} stickers",
    caption: "sent this year",
    avatar: AvatarRule::Winner,
};

pub static BUSIEST_DAY: AwardDefinition = AwardDefinition {
    kind: AwardKind::BusiestDay,
    filters: &[MessageFilter::Always],
    key: KeySelector::CalendarDay,
    measure: Measure::Count,
    extremum: Extremum::Max,
    subtitle: "{key}",
    caption: "{count} messages in a single day",
    avatar: AvatarRule::Placeholder,
};
