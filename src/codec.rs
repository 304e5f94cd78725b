use std::fmt;

use itertools::Itertools;
use log::{debug, warn};

use crate::character::{Character, CharacterKey};

pub const DEFAULT_RECORD_SEPARATOR: &str = "|||";
pub const DEFAULT_FIELD_SEPARATOR: &str = "|-|";
pub const DEFAULT_KEY_VALUE_SEPARATOR: &str = "|=|";

/// Delimiter tokens of the flat character format.
///
/// `firstName|=|Alice|-|age|=|30|||firstName|=|Bob` holds two records with the
/// default tokens. Field values are assumed never to contain any of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Separators {
    pub record: String,
    pub field: String,
    pub key_value: String,
}

impl Default for Separators {
    fn default() -> Self {
        Separators {
            record: DEFAULT_RECORD_SEPARATOR.to_string(),
            field: DEFAULT_FIELD_SEPARATOR.to_string(),
            key_value: DEFAULT_KEY_VALUE_SEPARATOR.to_string(),
        }
    }
}

impl Separators {
    pub fn validate(&self) -> Result<(), String> {
        let tokens = [&self.record, &self.field, &self.key_value];
        if tokens.iter().any(|token| token.is_empty()) {
            return Err("separators must not be empty".to_owned());
        }
        // A token inside another one would split records or fields apart.
        let overlapping = tokens
            .iter()
            .tuple_combinations()
            .any(|(a, b)| a.contains(b.as_str()) || b.contains(a.as_str()));
        if overlapping {
            return Err(format!(
                "separators must not contain one another, got {:?} {:?} {:?}",
                self.record, self.field, self.key_value
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// A `key<sep>value` token split into `parts` pieces instead of two.
    MalformedPair { segment: String, parts: usize },
    /// Nothing but blank segments.
    Empty,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MalformedPair { segment, parts } => {
                write!(f, "invalid field {:?} ({} parts)", segment, parts)
            }
            SkipReason::Empty => f.write_str("empty record"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Decoded(Character),
    Skipped(SkipReason),
}

/// Reads an integer the way the stored text has always been read: leading
/// whitespace, an optional sign, then as many digits as follow. Trailing
/// garbage is ignored, no digits at all means no value.
pub fn parse_age(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    // Accumulated with the sign applied so that i64::MIN is reachable.
    let mut value: i64 = 0;
    let mut seen_digit = false;
    for b in digits.bytes().take_while(|b| b.is_ascii_digit()) {
        seen_digit = true;
        let digit = (b - b'0') as i64;
        value = value.checked_mul(10)?;
        value = if negative {
            value.checked_sub(digit)?
        } else {
            value.checked_add(digit)?
        };
    }

    if !seen_digit {
        return None;
    }
    Some(value)
}

fn find_prop<'a>(props: &[(&'a str, &'a str)], key: CharacterKey) -> Option<&'a str> {
    props
        .iter()
        .find(|(name, _)| CharacterKey::from_name(name) == Some(key))
        .map(|(_, value)| *value)
}

pub fn decode_record(src: &str, separators: &Separators) -> RecordOutcome {
    let mut props: Vec<(&str, &str)> = Vec::new();
    for segment in src.split(separators.field.as_str()) {
        if segment.trim().is_empty() {
            continue;
        }
        let parts = segment.split(separators.key_value.as_str()).collect_vec();
        if parts.len() != 2 {
            return RecordOutcome::Skipped(SkipReason::MalformedPair {
                segment: segment.to_owned(),
                parts: parts.len(),
            });
        }
        props.push((parts[0], parts[1]));
    }

    if props.is_empty() {
        return RecordOutcome::Skipped(SkipReason::Empty);
    }

    let text = |key| find_prop(&props, key).unwrap_or_default().to_owned();
    let age = find_prop(&props, CharacterKey::Age)
        .filter(|raw| !raw.is_empty())
        .and_then(parse_age);

    RecordOutcome::Decoded(Character {
        first_name: text(CharacterKey::FirstName),
        last_name: text(CharacterKey::LastName),
        age,
        description: text(CharacterKey::Description),
    })
}

/// Decodes every record of `raw`, in order. Records that cannot be read are
/// logged and left out; this never fails.
pub fn decode(raw: Option<&str>, separators: &Separators) -> Vec<Character> {
    let raw = match raw {
        Some(raw) => raw,
        None => return Vec::new(),
    };

    raw.split(separators.record.as_str())
        .enumerate()
        .filter_map(|(index, src)| match decode_record(src, separators) {
            RecordOutcome::Decoded(character) => Some(character),
            RecordOutcome::Skipped(reason @ SkipReason::MalformedPair { .. }) => {
                warn!("Skipping character record {}: {}", index, reason);
                None
            }
            RecordOutcome::Skipped(reason) => {
                debug!("Skipping character record {}: {}", index, reason);
                None
            }
        })
        .collect()
}

/// Serializes one pair list per record. Pairs with an empty key or value are
/// dropped; a record left with no pairs still takes its slot.
pub fn encode<R, K, V>(records: &[R], separators: &Separators) -> String
where
    R: AsRef<[(K, V)]>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    records
        .iter()
        .map(|pairs| {
            pairs
                .as_ref()
                .iter()
                .filter(|(key, value)| !key.as_ref().is_empty() && !value.as_ref().is_empty())
                .map(|(key, value)| {
                    format!("{}{}{}", key.as_ref(), separators.key_value, value.as_ref())
                })
                .join(&separators.field)
        })
        .join(&separators.record)
}

pub fn encode_characters(characters: &[Character], separators: &Separators) -> String {
    let records = characters.iter().map(Character::to_pairs).collect_vec();
    encode(&records, separators)
}
