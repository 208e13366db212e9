//! Grouping of price rows into canonical cards

use std::collections::HashMap;

use log::debug;

use crate::number::CardNumber;
use crate::row::RawRow;
use crate::types::{Card, Catalog, OriginalSetData, Variation, VariationType};

const FULL_ART_SUFFIXES: &[&str] = &[
    "(Full Art Signature)",
    "(Full Art Reprint)",
    "(Full Art)",
];

/// Strip the Full Art suffixes from the end of a product name, in order
pub fn base_product_name(product_name: &str) -> String {
    let mut name = product_name.trim_end();
    for suffix in FULL_ART_SUFFIXES {
        if let Some(stripped) = name.strip_suffix(suffix) {
            name = stripped.trim_end();
        }
    }
    name.trim().to_string()
}

/// Legacy cards are full-art cards from another set, or explicit Full Art Reprints
pub fn is_legacy(set: u32, product_name: &str, current_set: Option<u32>) -> bool {
    if product_name.contains("(Full Art Reprint)") {
        return true;
    }
    match current_set {
        Some(current) => set != current && product_name.contains("(Full Art)"),
        None => false,
    }
}

/// Round to cents, half away from zero
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Reduce price samples to low/high/average. Empty sample lists have no stats.
pub fn price_stats(variation_type: VariationType, prices: &[f64]) -> Option<Variation> {
    if prices.is_empty() {
        return None;
    }
    let low = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let high = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let avg = prices.iter().sum::<f64>() / prices.len() as f64;

    Some(Variation {
        variation_type,
        market_price_low: round_cents(low),
        market_price_high: round_cents(high),
        market_price_avg: round_cents(avg),
    })
}

/// A card under construction. Classification is fixed on first insert.
#[derive(Debug, Clone)]
struct PendingCard {
    product_name: String,
    rarity: String,
    set: u32,
    number: u32,
    local_id: String,
    is_legacy: bool,
    is_promo: bool,
    original_set_data: Option<OriginalSetData>,
    /// In first-seen order
    prices: Vec<(VariationType, Vec<f64>)>,
}

impl PendingCard {
    fn add_price(&mut self, variation_type: VariationType, price: f64) {
        match self.prices.iter_mut().find(|(t, _)| *t == variation_type) {
            Some((_, samples)) => samples.push(price),
            None => self.prices.push((variation_type, vec![price])),
        }
    }

    fn into_card(self) -> Card {
        let mut variations: Vec<Variation> = self
            .prices
            .into_iter()
            .filter_map(|(t, samples)| price_stats(t, &samples))
            .collect();
        variations.sort_by_key(|v| v.variation_type.rank());

        let is_reprint = self.original_set_data.is_some();
        let mut original_set_data = self.original_set_data;
        if self.is_legacy && original_set_data.is_none() {
            original_set_data = Some(OriginalSetData {
                rarity: self.rarity.clone(),
                set: self.set,
                number: self.number,
                local_id: self.local_id.clone(),
            });
        }

        Card {
            product_name: self.product_name,
            rarity: self.rarity,
            set: self.set,
            number: self.number,
            local_id: self.local_id,
            is_reprint,
            original_set_data,
            is_legacy: self.is_legacy,
            is_promo: self.is_promo,
            variations,
        }
    }
}

/// Folds price rows into cards keyed by (base product name, localID)
#[derive(Debug, Default)]
pub struct CardAccumulator {
    current_set: Option<u32>,
    cards: Vec<PendingCard>,
    index: HashMap<(String, String), usize>,
}

impl CardAccumulator {
    pub fn new(current_set: Option<u32>) -> Self {
        Self {
            current_set,
            ..Default::default()
        }
    }

    /// Number of distinct cards seen so far
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Add one parsed row. Returns false when the number is unusable.
    pub fn add_row(&mut self, row: &RawRow) -> bool {
        let Some(number) = CardNumber::parse(&row.number, &row.rarity) else {
            debug!("Skipping unparsable number '{}' ({})", row.number, row.product_name);
            return false;
        };
        self.add(row, number, row.price());
        true
    }

    /// Insert the card if its key is new, then record the price under its variation.
    ///
    /// A row without a price still inserts the card but adds no sample.
    pub fn add(&mut self, row: &RawRow, number: CardNumber, price: Option<f64>) {
        let base_name = base_product_name(&row.product_name);
        let variation_type = VariationType::from_listing(&row.product_name, &row.printing);
        let key = (base_name, number.local_id.clone());

        let idx = match self.index.get(&key) {
            Some(&idx) => idx,
            None => {
                let is_legacy = is_legacy(number.set, &row.product_name, self.current_set);
                debug!(
                    "New card '{}' {} (code {}, legacy: {})",
                    key.0, number.local_id, number.rarity_code, is_legacy
                );
                self.cards.push(PendingCard {
                    product_name: key.0.clone(),
                    rarity: row.rarity.clone(),
                    set: number.set,
                    number: number.number,
                    local_id: number.local_id,
                    is_legacy,
                    is_promo: number.is_promo,
                    original_set_data: number.original_set_data,
                    prices: Vec::new(),
                });
                let idx = self.cards.len() - 1;
                self.index.insert(key, idx);
                idx
            }
        };

        if let Some(price) = price {
            self.cards[idx].add_price(variation_type, price);
        }
    }

    /// Build the catalog, sorted by set then number. Ties keep first-seen order.
    pub fn into_catalog(self) -> Catalog {
        let mut cards: Vec<Card> = self.cards.into_iter().map(PendingCard::into_card).collect();
        cards.sort_by_key(|c| (c.set, c.number));
        Catalog { cards }
    }
}

/// Compile the data lines of a price listing (header already removed)
pub fn compile_lines<'a>(
    lines: impl IntoIterator<Item = &'a str>,
    current_set: Option<u32>,
) -> Catalog {
    let mut acc = CardAccumulator::new(current_set);
    for line in lines {
        if let Some(row) = RawRow::parse(line) {
            acc.add_row(&row);
        }
    }
    debug!("Grouped rows into {} cards", acc.len());
    acc.into_catalog()
}
