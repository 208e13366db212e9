//! Card number descriptors
//!
//! The number column comes in three shapes:
//!
//! - standard: `26-045C`
//! - reprint: `26-093C/15-095C` (current printing / original printing)
//! - promo: `PR-001/26-045C` (anything after the first `/` is a standard number)
//!
//! The raw string is kept as the card's `localID` in every case.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::OriginalSetData;

static RE_STANDARD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)-(\d+)([A-Z]+)$").unwrap());

/// A parsed `<set>-<number><rarity>` number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardNumber {
    pub set: u32,
    pub number: u32,
    pub rarity_code: String,
    pub local_id: String,
}

impl StandardNumber {
    pub fn parse(s: &str) -> Option<Self> {
        let caps = RE_STANDARD.captures(s)?;
        Some(Self {
            set: caps[1].parse().ok()?,
            number: caps[2].parse().ok()?,
            rarity_code: caps[3].to_string(),
            local_id: s.to_string(),
        })
    }
}

/// Expand a one-letter rarity code. Unknown codes pass through.
pub fn expand_rarity(code: &str) -> String {
    match code {
        "C" => "Common",
        "H" => "Hero",
        "L" => "Legend",
        "R" => "Rare",
        other => other,
    }
    .to_string()
}

/// Everything the compiler needs to know about a card's number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardNumber {
    pub set: u32,
    pub number: u32,
    pub rarity_code: String,
    pub local_id: String,
    pub is_promo: bool,
    /// Present only for the reprint shape
    pub original_set_data: Option<OriginalSetData>,
}

impl CardNumber {
    /// Parse the number column of a row. `None` means the row is unusable.
    ///
    /// A rarity of exactly `"Promo"` marks the card promo whatever its shape.
    /// Set 0 counts as a missing set.
    pub fn parse(number: &str, rarity: &str) -> Option<Self> {
        let mut is_promo = rarity == "Promo";
        let mut original_set_data = None;

        let current = if number.starts_with("PR-") {
            is_promo = true;
            let (_, base) = number.split_once('/')?;
            StandardNumber::parse(base)?
        } else if number.contains('/') {
            let parts: Vec<&str> = number.split('/').collect();
            if parts.len() != 2 {
                return None;
            }
            let current = StandardNumber::parse(parts[0])?;
            let original = StandardNumber::parse(parts[1])?;
            original_set_data = Some(OriginalSetData {
                rarity: expand_rarity(&original.rarity_code),
                set: original.set,
                number: original.number,
                local_id: original.local_id,
            });
            current
        } else {
            StandardNumber::parse(number)?
        };
        if current.set == 0 {
            return None;
        }

        Some(Self {
            set: current.set,
            number: current.number,
            rarity_code: current.rarity_code,
            local_id: number.to_string(),
            is_promo,
            original_set_data,
        })
    }
}
