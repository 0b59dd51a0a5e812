pub mod aggregate;
mod catalog;
pub mod emoji;
pub mod filters;
mod nominations;
mod report;

pub use aggregate::{pick_extremum, Extremum, Tally};
pub use catalog::{AvatarRule, AwardDefinition, KeySelector, Measure, Metric};
pub use filters::{filter_messages, matches_all, MessageFilter};
pub use nominations::{
    favorite_emoji, first_message, most_mentioned, nominate, reactions_given, total_messages,
    AvatarPolicy, AwardError, AwardKind, AwardRule, Nomination,
};
pub use report::{default_title, prepare_messages, AwardReport, AwardSettings};
