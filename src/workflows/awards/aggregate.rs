use super::filters::{matches_all, MessageFilter};
use crate::workflows::export::Message;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// Key -> value table produced by every aggregation. Ordered by key so that
/// extremum selection is reproducible.
pub type Tally = BTreeMap<String, u64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extremum {
    Max,
    Min,
}

impl Extremum {
    fn prefers(self, candidate: u64, current: u64) -> bool {
        match self {
            Self::Max => candidate > current,
            Self::Min => candidate < current,
        }
    }
}

pub fn count_by<F>(messages: &[Message], filters: &[MessageFilter], key: F) -> Tally
where
    F: Fn(&Message) -> String,
{
    let mut tally = Tally::new();
    for message in messages.iter().filter(|m| matches_all(filters, m)) {
        *tally.entry(key(message)).or_default() += 1;
    }
    tally
}

/// Like [`count_by`] but one message may contribute any number of keys.
pub fn tally_by<F>(messages: &[Message], filters: &[MessageFilter], keys: F) -> Tally
where
    F: Fn(&Message) -> Vec<String>,
{
    let mut tally = Tally::new();
    for message in messages.iter().filter(|m| matches_all(filters, m)) {
        for key in keys(message) {
            *tally.entry(key).or_default() += 1;
        }
    }
    tally
}

/// Sums `amount` per key. A key appears once any message passes, even when
/// every amount it collected is zero.
pub fn sum_by<A, K>(messages: &[Message], filters: &[MessageFilter], amount: A, key: K) -> Tally
where
    A: Fn(&Message) -> u64,
    K: Fn(&Message) -> String,
{
    let mut tally = Tally::new();
    for message in messages.iter().filter(|m| matches_all(filters, m)) {
        *tally.entry(key(message)).or_default() += amount(message);
    }
    tally
}

/// Per-key average of `numerator`, truncated toward zero.
pub fn ratio_by<N, K>(
    messages: &[Message],
    filters: &[MessageFilter],
    numerator: N,
    key: K,
) -> Tally
where
    N: Fn(&Message) -> u64,
    K: Fn(&Message) -> String,
{
    let mut totals: BTreeMap<String, (u64, u64)> = BTreeMap::new();
    for message in messages.iter().filter(|m| matches_all(filters, m)) {
        let entry = totals.entry(key(message)).or_default();
        entry.0 += numerator(message);
        entry.1 += 1;
    }

    totals
        .into_iter()
        .filter(|(_, (_, occurrences))| *occurrences > 0)
        .map(|(key, (sum, occurrences))| (key, sum / occurrences))
        .collect()
}

/// Number of distinct calendar dates (local time) each key was seen on.
pub fn distinct_days_by<F>(messages: &[Message], filters: &[MessageFilter], key: F) -> Tally
where
    F: Fn(&Message) -> String,
{
    let mut days: BTreeMap<String, BTreeSet<NaiveDate>> = BTreeMap::new();
    for message in messages.iter().filter(|m| matches_all(filters, m)) {
        days.entry(key(message))
            .or_default()
            .insert(message.timestamp.date());
    }

    days.into_iter()
        .map(|(key, dates)| (key, dates.len() as u64))
        .collect()
}

/// Returns the key holding the largest (or smallest) value. Ties go to the
/// lexicographically smallest key. An empty tally yields `("", 0)`.
pub fn pick_extremum(tally: &Tally, extremum: Extremum) -> (String, u64) {
    let mut best: Option<(&String, u64)> = None;
    for (key, value) in tally {
        let replace = match best {
            Some((_, current)) => extremum.prefers(*value, current),
            None => true,
        };
        if replace {
            best = Some((key, *value));
        }
    }

    best.map(|(key, value)| (key.clone(), value))
        .unwrap_or_default()
}
