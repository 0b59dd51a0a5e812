use std::ops::RangeInclusive;

/// Code point blocks counted as emoji. Narrower than Unicode's emoji property:
/// supplemental symbols and flags are not counted.
const EMOJI_BLOCKS: [RangeInclusive<u32>; 5] = [
    0x1F600..=0x1F64F,
    0x1F300..=0x1F5FF,
    0x1F680..=0x1F6FF,
    0x2600..=0x26FF,
    0x2700..=0x27BF,
];

pub fn is_emoji(ch: char) -> bool {
    let code = u32::from(ch);
    EMOJI_BLOCKS.iter().any(|block| block.contains(&code))
}

pub fn count_emoji(text: &str) -> u64 {
    text.chars().filter(|ch| is_emoji(*ch)).count() as u64
}

pub fn emoji_glyphs(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().filter(|ch| is_emoji(*ch))
}
