//! Price-listing CSV line parsing
//!
//! Lines are split by a two-state scanner: a `"` toggles the quoted state and
//! commas only separate fields outside quotes. Quote characters themselves are
//! dropped, and `""` is not an escaped quote. This is not a full CSV grammar.

use log::debug;
use regex::Regex;
use std::sync::LazyLock;

static RE_LEADING_FLOAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").unwrap());

/// Number of leading columns a price row must provide
pub const REQUIRED_FIELDS: usize = 6;

/// One line of the price listing
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub product_name: String,
    pub printing: String,
    pub condition: String,
    pub rarity: String,
    pub number: String,
    pub market_price: String,
}

/// Split a line on commas outside double quotes, trimming every field
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());

    fields
}

impl RawRow {
    /// Parse a data line. Lines with fewer than six fields yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let fields = split_fields(line);
        if fields.len() < REQUIRED_FIELDS {
            debug!("Skipping short line ({} fields): {}", fields.len(), line);
            return None;
        }

        let mut fields = fields.into_iter();
        // Length was checked above, so each next() yields a field
        let mut next = || fields.next().unwrap_or_default();
        Some(Self {
            product_name: next(),
            printing: next(),
            condition: next(),
            rarity: next(),
            number: next(),
            market_price: next(),
        })
    }

    /// Market price as a number (`"$1.99"` -> 1.99)
    ///
    /// Only the leading numeric part counts, so `"$1.50 USD"` is 1.50.
    pub fn price(&self) -> Option<f64> {
        let price = self.market_price.replace('$', "");
        let parsed = RE_LEADING_FLOAT
            .find(price.trim())
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .filter(|value| value.is_finite());
        if parsed.is_none() {
            debug!("Unparsable market price '{}'", self.market_price);
        }
        parsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain_fields() {
        assert_eq!(
            split_fields("a, b ,c"),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn test_split_quoted_comma() {
        let fields = split_fields(r#""Bolt, the Swift",Normal,Near Mint"#);
        assert_eq!(fields, vec!["Bolt, the Swift", "Normal", "Near Mint"]);
    }

    #[test]
    fn test_doubled_quote_is_not_an_escape() {
        // `""` toggles twice and leaves no quote in the field
        let fields = split_fields(r#""Say ""Hi"", ok",x"#);
        assert_eq!(fields, vec!["Say Hi, ok", "x"]);
    }

    #[test]
    fn test_parse_full_row() {
        let row = RawRow::parse(r#""Ember Knight",Normal,Near Mint,Common,26-045C,$0.25"#).unwrap();
        assert_eq!(row.product_name, "Ember Knight");
        assert_eq!(row.printing, "Normal");
        assert_eq!(row.condition, "Near Mint");
        assert_eq!(row.rarity, "Common");
        assert_eq!(row.number, "26-045C");
        assert_eq!(row.price(), Some(0.25));
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let row = RawRow::parse("A,Foil,LP,Rare,26-001R,$3.50,extra,more").unwrap();
        assert_eq!(row.market_price, "$3.50");
    }

    #[test]
    fn test_short_line_is_skipped() {
        assert!(RawRow::parse("A,Normal,NM,Common,26-045C").is_none());
        assert!(RawRow::parse("").is_none());
    }

    #[test]
    fn test_bad_price() {
        let row = RawRow::parse("A,Normal,NM,Common,26-045C,N/A").unwrap();
        assert_eq!(row.price(), None);
        let row = RawRow::parse("A,Normal,NM,Common,26-045C,").unwrap();
        assert_eq!(row.price(), None);
    }

    #[test]
    fn test_price_reads_leading_number() {
        let price = |raw: &str| {
            RawRow::parse(&format!("A,Normal,NM,Common,26-045C,{}", raw))
                .unwrap()
                .price()
        };
        assert_eq!(price("$1.50 USD"), Some(1.5));
        assert_eq!(price(" $ 2 "), Some(2.0));
        assert_eq!(price("$.75"), Some(0.75));
        assert_eq!(price("3.10abc"), Some(3.1));
        assert_eq!(price("1e2"), Some(100.0));
        assert_eq!(price("free"), None);
    }
}
