//! Catalog types shared by the compiler and the renderer

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Pricing tier of a card
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VariationType {
    Normal,
    Foil,
    FullArt,
    FullArtSignature,
    /// Any other printing label from the price listing, kept verbatim
    Other(String),
}

impl VariationType {
    pub fn as_str(&self) -> &str {
        match self {
            VariationType::Normal => "Normal",
            VariationType::Foil => "Foil",
            VariationType::FullArt => "Full Art",
            VariationType::FullArtSignature => "Full Art Signature",
            VariationType::Other(s) => s.as_str(),
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Normal" => VariationType::Normal,
            "Foil" => VariationType::Foil,
            "Full Art" => VariationType::FullArt,
            "Full Art Signature" => VariationType::FullArtSignature,
            other => VariationType::Other(other.to_string()),
        }
    }

    /// Variation type for a price row. The product name wins over the printing column.
    pub fn from_listing(product_name: &str, printing: &str) -> Self {
        if product_name.contains("Full Art Signature") {
            VariationType::FullArtSignature
        } else if product_name.contains("Full Art") {
            VariationType::FullArt
        } else {
            VariationType::from_str(printing)
        }
    }

    /// Display/sort rank: Normal < Foil < Full Art < Full Art Signature < anything else
    pub fn rank(&self) -> u16 {
        match self {
            VariationType::Normal => 0,
            VariationType::Foil => 1,
            VariationType::FullArt => 2,
            VariationType::FullArtSignature => 3,
            VariationType::Other(_) => 999,
        }
    }

    /// Symbol shown next to a card in the rendered pages
    pub fn symbol(&self) -> &'static str {
        match self {
            VariationType::Foil => "✨",
            VariationType::FullArt => "⭐",
            VariationType::FullArtSignature => "💎",
            VariationType::Normal | VariationType::Other(_) => "",
        }
    }
}

impl From<String> for VariationType {
    fn from(s: String) -> Self {
        VariationType::from_str(&s)
    }
}

impl From<VariationType> for String {
    fn from(v: VariationType) -> Self {
        v.as_str().to_string()
    }
}

/// Identity of the original printing of a reprinted (or legacy) card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginalSetData {
    pub rarity: String,
    pub set: u32,
    pub number: u32,
    #[serde(rename = "localID")]
    pub local_id: String,
}

/// Whole amounts are written without a fraction (`1`, not `1.0`)
fn serialize_price<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// Price statistics for one variation of a card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variation {
    #[serde(rename = "type")]
    pub variation_type: VariationType,
    #[serde(rename = "marketPriceLow", serialize_with = "serialize_price")]
    pub market_price_low: f64,
    #[serde(rename = "marketPriceHigh", serialize_with = "serialize_price")]
    pub market_price_high: f64,
    #[serde(rename = "marketPriceAvg", serialize_with = "serialize_price")]
    pub market_price_avg: f64,
}

/// One canonical card of the compiled catalog
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Card {
    pub product_name: String,
    pub rarity: String,
    pub set: u32,
    pub number: u32,
    #[serde(rename = "localID")]
    pub local_id: String,

    #[serde(rename = "isReprint", default)]
    pub is_reprint: bool,
    #[serde(rename = "originalSetData", default)]
    pub original_set_data: Option<OriginalSetData>,
    #[serde(rename = "isLegacy", default)]
    pub is_legacy: bool,
    #[serde(rename = "isPromo", default)]
    pub is_promo: bool,

    #[serde(rename = "variation")]
    pub variations: Vec<Variation>,
}

// False flags are omitted. `originalSetData` follows `isReprint` on reprints
// and `isLegacy` on legacy-only cards.
impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("product_name", &self.product_name)?;
        map.serialize_entry("rarity", &self.rarity)?;
        map.serialize_entry("set", &self.set)?;
        map.serialize_entry("number", &self.number)?;
        map.serialize_entry("localID", &self.local_id)?;

        let mut original = self.original_set_data.as_ref();
        if self.is_reprint {
            map.serialize_entry("isReprint", &true)?;
            if let Some(data) = original.take() {
                map.serialize_entry("originalSetData", data)?;
            }
        }
        if self.is_legacy {
            map.serialize_entry("isLegacy", &true)?;
        }
        if let Some(data) = original {
            map.serialize_entry("originalSetData", data)?;
        }
        if self.is_promo {
            map.serialize_entry("isPromo", &true)?;
        }

        map.serialize_entry("variation", &self.variations)?;
        map.end()
    }
}

/// The compiled catalog written to `output.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub cards: Vec<Card>,
}
