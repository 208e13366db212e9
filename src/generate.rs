//! `render`: compiled catalog -> static HTML checklists in `www/`

use anyhow::{Context, Result};
use chrono::Local;
use log::info;
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::error::ChecklistError;
use crate::layout::SetPaths;
use crate::metadata::SetMetadata;
use crate::types::{Catalog, VariationType};
use crate::utils::osc8_file_link;

/// Size of every "top N" list
const TOP_N: usize = 54;
/// Entries per binder page (3x3 pocket sheet)
const BINDER_PAGE_SIZE: usize = 9;

const LEGACY_SYMBOL: &str = "👑";
const REPRINT_SYMBOL: &str = "♻️";
const PROMO_SYMBOL: &str = "🎁";

static RE_RARITY_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+-\d+([A-Z]+)").unwrap());

/// One (card, variation) pair as shown on the pages
#[derive(Debug, Clone)]
pub struct Entry {
    pub id: usize,
    pub set: u32,
    pub number: u32,
    pub card_number: String,
    pub card_name: String,
    pub variant: VariationType,
    pub average_price: f64,
    pub full_card_number: String,
    pub rarity: String,
    pub is_legacy: bool,
    pub is_promo: bool,
    pub is_reprint: bool,
}

fn rarity_code(local_id: &str) -> &str {
    RE_RARITY_CODE
        .captures(local_id)
        .and_then(|c| c.get(1))
        .map_or("", |m| m.as_str())
}

/// Flatten the catalog into entries, ids in catalog order, sorted by number then variant
pub fn flatten_entries(catalog: &Catalog) -> Vec<Entry> {
    let mut entries = Vec::new();
    for card in &catalog.cards {
        for variation in &card.variations {
            entries.push(Entry {
                id: entries.len(),
                set: card.set,
                number: card.number,
                card_number: format!(
                    "{}-{:03}{}",
                    card.set,
                    card.number,
                    rarity_code(&card.local_id)
                ),
                card_name: card.product_name.clone(),
                variant: variation.variation_type.clone(),
                average_price: variation.market_price_avg,
                full_card_number: card.local_id.clone(),
                rarity: card.rarity.clone(),
                is_legacy: card.is_legacy,
                is_promo: card.is_promo,
                is_reprint: card.is_reprint,
            });
        }
    }
    entries.sort_by_key(|e| (e.set, e.number, e.variant.rank()));
    entries
}

/// The `n` most valuable entries, ties in input order
fn top_by_price<'a>(entries: impl IntoIterator<Item = &'a Entry>, n: usize) -> Vec<&'a Entry> {
    let mut sorted: Vec<&Entry> = entries.into_iter().collect();
    sorted.sort_by(|a, b| b.average_price.total_cmp(&a.average_price));
    sorted.truncate(n);
    sorted
}

fn is_full_art(entry: &Entry) -> bool {
    matches!(
        entry.variant,
        VariationType::FullArt | VariationType::FullArtSignature
    ) || entry.is_legacy
}

/// CSS class for the id badge of a rarity
fn rarity_class(rarity: &str) -> &'static str {
    let lower = rarity.to_lowercase();
    if lower.contains("common") {
        "card-id-rarity-common"
    } else if lower.contains("rare") {
        "card-id-rarity-rare"
    } else if lower.contains("hero") {
        "card-id-rarity-hero"
    } else if lower.contains("legend") {
        "card-id-rarity-legend"
    } else {
        "card-id-rarity-common"
    }
}

/// Variant symbol for an entry. Legacy replaces the variant symbol.
fn variant_symbol(entry: &Entry) -> &'static str {
    if entry.is_legacy {
        LEGACY_SYMBOL
    } else {
        entry.variant.symbol()
    }
}

/// Tag symbols for an entry. Legacy hides the reprint tag.
fn entry_tags(entry: &Entry) -> String {
    let mut tags = String::new();
    if entry.is_reprint && !entry.is_legacy {
        tags.push_str(REPRINT_SYMBOL);
    }
    if entry.is_promo {
        tags.push_str(PROMO_SYMBOL);
    }
    tags
}

fn rarity_slug(rarity: &str) -> String {
    rarity
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

// HTML generation helpers
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// CSS styles shared by every page
fn css_styles() -> &'static str {
    r#"
* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
    background: white;
    padding: 20px;
}

.container, .checklist-container {
    max-width: 1400px;
    margin: 0 auto;
}

header {
    background: #667eea;
    color: white;
    padding: 30px;
    display: flex;
    justify-content: space-between;
    align-items: center;
    gap: 20px;
}

header h1 {
    font-size: 2.5em;
    font-weight: 700;
}

.variant-key {
    display: flex;
    flex-wrap: wrap;
    gap: 12px;
    font-size: 0.85em;
}

.variant-key-item {
    display: flex;
    gap: 4px;
}

.cards-page {
    page-break-before: always;
    break-before: page;
}

.cards-grid {
    padding: 30px;
}

.cards-grid h2 {
    margin: 30px 0 20px 0;
    padding-bottom: 10px;
    border-bottom: 2px solid #e9ecef;
    font-size: 1.5em;
    color: #667eea;
}

.binder-page {
    display: grid;
    grid-template-columns: repeat(3, 1fr);
    gap: 20px;
    margin-bottom: 30px;
    break-inside: avoid;
}

.card-entry {
    background: #f8f9fa;
    border: 2px solid #e9ecef;
    border-radius: 8px;
    padding: 10px 15px;
    display: flex;
    align-items: center;
    gap: 12px;
    break-inside: avoid;
}

.card-id {
    color: white;
    font-size: 0.75em;
    padding: 4px 8px;
    border-radius: 4px;
    font-weight: 600;
}

.card-id-rarity-common { background: #6c757d; }
.card-id-rarity-rare { background: #667eea; }
.card-id-rarity-hero { background: #fd7e14; }
.card-id-rarity-legend { background: #d4a017; }

.card-number, .checklist-number, .index-number {
    font-family: 'Courier New', monospace;
    color: #6c757d;
}

.card-name {
    font-weight: 600;
    flex-grow: 1;
}

.card-price, .index-price {
    font-weight: 700;
    color: #28a745;
}

.card-price::before {
    content: '$';
}

.cover-page {
    text-align: center;
    padding: 40px;
    break-after: page;
}

.cover-art {
    max-width: 100%;
    max-height: 60vh;
}

.cover-title {
    font-size: 3em;
    margin-top: 20px;
}

.cover-subtitle {
    font-size: 1.5em;
    color: #6c757d;
}

.cover-stats-grid {
    display: flex;
    justify-content: center;
    gap: 30px;
    margin: 30px 0;
}

.cover-stat-value {
    font-size: 2em;
    font-weight: 700;
    color: #667eea;
}

.cover-stat-label, .cover-date {
    color: #6c757d;
    text-transform: uppercase;
    letter-spacing: 1px;
}

.card-index {
    padding: 30px;
    line-height: 1.8;
}

.checklist-grid {
    display: grid;
    grid-template-columns: repeat(3, 1fr);
    gap: 4px 20px;
    padding: 20px;
}

.checklist-item {
    display: flex;
    gap: 8px;
    align-items: center;
    border-bottom: 1px solid #e9ecef;
}

.checklist-name {
    flex-grow: 1;
}

@media print {
    body {
        padding: 0;
    }

    header {
        background: white;
        color: #212529;
        border-bottom: 2px solid #e9ecef;
    }
}
"#
}

/// Start of an HTML document
fn page_header(set_title: &str, page_title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - {}</title>
    <style>{}</style>
</head>
<body>
"#,
        html_escape(set_title),
        html_escape(page_title),
        css_styles()
    )
}

/// End of an HTML document
fn page_footer() -> &'static str {
    "</body>\n</html>\n"
}

/// Legend of the symbols used on the cards
fn variant_key_html() -> String {
    let items = [
        ("Foil", VariationType::Foil.symbol()),
        ("Full Art", VariationType::FullArt.symbol()),
        ("Full Art Signature", VariationType::FullArtSignature.symbol()),
        ("Legacy", LEGACY_SYMBOL),
        ("Reprint", REPRINT_SYMBOL),
        ("Promo", PROMO_SYMBOL),
    ];
    let items_html: String = items
        .iter()
        .map(|(label, symbol)| {
            format!(
                r#"<div class="variant-key-item"><span>{}</span><span class="variant-key-symbol">{}</span></div>"#,
                label, symbol
            )
        })
        .collect();
    format!(
        r#"<div class="header-right"><div class="variant-key">{}</div></div>"#,
        items_html
    )
}

fn section_header(set_title: &str, subtitle: &str, with_key: bool) -> String {
    format!(
        r#"<header>
    <div class="header-left">
        <h1>{}</h1>
        <p>{}</p>
    </div>
    {}
</header>
"#,
        html_escape(set_title),
        html_escape(subtitle),
        if with_key {
            variant_key_html()
        } else {
            String::new()
        }
    )
}

fn card_entry_html(entry: &Entry) -> String {
    let symbol = variant_symbol(entry);
    let variant_html = if symbol.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="card-variant">{}</div>"#, symbol)
    };
    let tags = entry_tags(entry);
    let tags_html = if tags.is_empty() {
        String::new()
    } else {
        format!(r#"<span class="card-tags">{}</span>"#, tags)
    };

    format!(
        r#"<div class="card-entry">
    <div class="card-header">
        <span class="card-id {}">#{}</span>
        <div class="card-number" title="{}">{}</div>
    </div>
    <div class="card-name">{}</div>
    {}
    {}
    <div class="card-price">{:.2}</div>
</div>
"#,
        rarity_class(&entry.rarity),
        entry.id,
        html_escape(&entry.full_card_number),
        html_escape(&entry.card_number),
        html_escape(&entry.card_name),
        variant_html,
        tags_html,
        entry.average_price
    )
}

/// Card grid chunked into binder pages
fn card_grid_html(entries: &[&Entry]) -> String {
    let mut html = String::new();
    for page in entries.chunks(BINDER_PAGE_SIZE) {
        html.push_str(r#"<div class="binder-page">"#);
        html.push('\n');
        for entry in page {
            html.push_str(&card_entry_html(entry));
        }
        html.push_str("</div>\n");
    }
    html
}

/// Compact inline index: `name symbol (#id, number) $price`
fn card_index_html(entries: &[&Entry]) -> String {
    entries
        .iter()
        .map(|entry| {
            format!(
                r#"<span class="index-entry"><span class="index-name"><strong>{}</strong></span> <span class="index-variant">{}</span> <span class="index-number">(#{}, {})</span> <span class="index-price">${:.2}</span></span>"#,
                html_escape(&entry.card_name),
                variant_symbol(entry),
                entry.id,
                html_escape(&entry.card_number),
                entry.average_price
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn checklist_items_html(entries: &[&Entry]) -> String {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| {
        a.card_number
            .cmp(&b.card_number)
            .then_with(|| a.variant.rank().cmp(&b.variant.rank()))
    });

    let mut html = String::new();
    for entry in sorted {
        let symbol = variant_symbol(entry);
        let variant_html = if symbol.is_empty() {
            String::new()
        } else {
            format!(r#"<span class="checklist-variant">{}</span>"#, symbol)
        };
        html.push_str(&format!(
            r#"<div class="checklist-item">
    <span class="checklist-id">#{}</span>
    <span class="checklist-number">{}</span>
    <span class="checklist-name">{}{}</span>
    <input type="checkbox" class="checklist-checkbox">
</div>
"#,
            entry.id,
            html_escape(&entry.card_number),
            html_escape(&entry.card_name),
            variant_html
        ));
    }
    html
}

/// Everything the pages of one set are built from
pub struct Report {
    pub set_title: String,
    pub cover_title: String,
    pub cover_subtitle: Option<String>,
    pub cover_image: Option<String>,
    pub card_count: usize,
    pub entries: Vec<Entry>,
    pub generated: String,
}

impl Report {
    pub fn new(
        set_name: &str,
        catalog: &Catalog,
        metadata: &SetMetadata,
        cover_image: Option<String>,
    ) -> Self {
        let fallback = set_name.to_uppercase();
        Self {
            set_title: metadata
                .title()
                .or(metadata.alternate_title())
                .unwrap_or(&fallback)
                .to_string(),
            cover_title: metadata.title().unwrap_or(&fallback).to_string(),
            cover_subtitle: metadata.alternate_title().map(str::to_string),
            cover_image,
            card_count: catalog.cards.len(),
            entries: flatten_entries(catalog),
            generated: Local::now().format("%B %-d, %Y").to_string(),
        }
    }

    fn all(&self) -> Vec<&Entry> {
        self.entries.iter().collect()
    }

    fn rarities(&self) -> BTreeSet<&str> {
        self.entries.iter().map(|e| e.rarity.as_str()).collect()
    }

    fn of_variant(&self, variant: VariationType) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(move |e| e.variant == variant)
    }

    pub fn total_value(&self) -> f64 {
        self.entries.iter().map(|e| e.average_price).sum()
    }

    fn document(&self, page_title: &str, body: &str) -> String {
        let mut html = page_header(&self.set_title, page_title);
        html.push_str(body);
        html.push_str(page_footer());
        html
    }

    /// A page of one or more card grids under a single header
    fn grid_page(&self, page_title: &str, subtitle: &str, grid: &str) -> String {
        self.document(
            page_title,
            &format!(
                "<div class=\"container\">\n{}<div class=\"cards-grid\">\n{}</div>\n</div>\n",
                section_header(&self.set_title, subtitle, false),
                grid
            ),
        )
    }

    /// Compiled-document section with an anchor id
    fn section(&self, id: &str, subtitle: &str, content_class: &str, content: &str) -> String {
        format!(
            "<div class=\"cards-page\" id=\"{}\">\n{}<div class=\"{}\">\n{}</div>\n</div>\n",
            id,
            section_header(&self.set_title, subtitle, true),
            content_class,
            content
        )
    }

    pub fn cover_html(&self) -> Option<String> {
        let image = self.cover_image.as_ref()?;
        let subtitle_html = self
            .cover_subtitle
            .as_ref()
            .map(|s| format!(r#"<p class="cover-subtitle">{}</p>"#, html_escape(s)))
            .unwrap_or_default();

        Some(format!(
            r#"<div class="cover-page">
    <div class="cover-art-container">
        <img src="{}" alt="{}" class="cover-art">
    </div>
    <h1 class="cover-title">{}</h1>
    {}
    <div class="cover-stats-grid">
        <div class="cover-stat-box">
            <div class="cover-stat-value">{}</div>
            <div class="cover-stat-label">Unique Cards</div>
        </div>
        <div class="cover-stat-box">
            <div class="cover-stat-value">{}</div>
            <div class="cover-stat-label">Total Variations</div>
        </div>
        <div class="cover-stat-box">
            <div class="cover-stat-value">${:.2}</div>
            <div class="cover-stat-label">Total Value</div>
        </div>
    </div>
    <div class="cover-date">Generated {}</div>
</div>
"#,
            html_escape(image),
            html_escape(&self.cover_title),
            html_escape(&self.cover_title),
            subtitle_html,
            self.card_count,
            self.entries.len(),
            self.total_value(),
            self.generated
        ))
    }

    pub fn cards_page(&self) -> String {
        self.document(
            "Card Collection",
            &format!(
                "<div class=\"container\">\n{}<div class=\"cards-grid\">\n{}</div>\n</div>\n",
                section_header(&self.set_title, "Card Collection Checklist", true),
                card_grid_html(&self.all())
            ),
        )
    }

    pub fn cover_page(&self) -> Option<String> {
        let cover = self.cover_html()?;
        Some(self.document(
            "Cover",
            &format!("<div class=\"container\">\n{}</div>\n", cover),
        ))
    }

    pub fn compiled_page(&self) -> String {
        let mut body = String::from("<div class=\"container\">\n");
        if let Some(cover) = self.cover_html() {
            body.push_str(&cover);
        }

        body.push_str(&self.section(
            "card-collection-checklist",
            "Card Collection Checklist",
            "cards-grid",
            &card_grid_html(&self.all()),
        ));
        body.push_str(&self.section(
            "top-54-most-valuable",
            "Top 54 Most Valuable Cards",
            "cards-grid",
            &card_grid_html(&top_by_price(&self.entries, TOP_N)),
        ));
        for rarity in self.rarities() {
            let top = top_by_price(self.entries.iter().filter(|e| e.rarity == rarity), TOP_N);
            if top.is_empty() {
                continue;
            }
            body.push_str(&self.section(
                &format!("top-54-{}", rarity_slug(rarity)),
                &format!("Top 54 Most Valuable {} Cards", rarity),
                "cards-grid",
                &card_grid_html(&top),
            ));
        }
        body.push_str(&self.section(
            "top-54-normal",
            "Top 54 Most Valuable Normal Cards",
            "cards-grid",
            &card_grid_html(&top_by_price(self.of_variant(VariationType::Normal), TOP_N)),
        ));
        body.push_str(&self.section(
            "top-54-foil",
            "Top 54 Most Valuable Foil Cards (Non-Full Art)",
            "cards-grid",
            &card_grid_html(&top_by_price(self.of_variant(VariationType::Foil), TOP_N)),
        ));
        body.push_str(&self.section(
            "full-art-cards",
            "All Full Art Cards (Sorted by Value)",
            "cards-grid",
            &card_grid_html(&self.full_art()),
        ));
        body.push_str(&self.section(
            "card-index",
            "Card Index",
            "card-index",
            &card_index_html(&self.all()),
        ));
        body.push_str("</div>\n");

        self.document("Compiled", &body)
    }

    fn full_art(&self) -> Vec<&Entry> {
        top_by_price(self.entries.iter().filter(|e| is_full_art(e)), usize::MAX)
    }

    pub fn top_page(&self) -> String {
        self.grid_page(
            "Top 54 Most Valuable",
            "Top 54 Most Valuable Cards",
            &card_grid_html(&top_by_price(&self.entries, TOP_N)),
        )
    }

    /// Normal entries only, one heading per rarity
    pub fn top_per_rarity_page(&self) -> String {
        let mut grid = String::new();
        for rarity in self.rarities() {
            let top = top_by_price(
                self.of_variant(VariationType::Normal)
                    .filter(|e| e.rarity == rarity),
                TOP_N,
            );
            if top.is_empty() {
                continue;
            }
            grid.push_str(&format!("<h2>{}</h2>\n", html_escape(rarity)));
            grid.push_str(&card_grid_html(&top));
        }
        self.grid_page(
            "Top 54 Per Rarity",
            "Top 54 Most Valuable Cards Per Rarity",
            &grid,
        )
    }

    pub fn top_normal_page(&self) -> String {
        self.grid_page(
            "Top 54 Normal Cards",
            "Top 54 Most Valuable Normal Cards",
            &card_grid_html(&top_by_price(self.of_variant(VariationType::Normal), TOP_N)),
        )
    }

    pub fn top_foil_page(&self) -> String {
        self.grid_page(
            "Top Foil Cards",
            "Top 54 Most Valuable Foil Cards (Non-Full Art)",
            &card_grid_html(&top_by_price(self.of_variant(VariationType::Foil), TOP_N)),
        )
    }

    pub fn full_art_page(&self) -> String {
        self.grid_page(
            "Full Art Cards",
            "All Full Art Cards (Sorted by Value)",
            &card_grid_html(&self.full_art()),
        )
    }

    pub fn index_page(&self) -> String {
        self.document(
            "Card Index",
            &format!(
                "<div class=\"container\">\n{}<div class=\"card-index\">\n{}\n</div>\n</div>\n",
                section_header(&self.set_title, "Card Index", false),
                card_index_html(&self.all())
            ),
        )
    }

    pub fn checklist_page(&self) -> String {
        self.document(
            "Checklist",
            &format!(
                "<div class=\"checklist-container\">\n{}<div class=\"checklist-grid\">\n{}</div>\n</div>\n",
                section_header(&self.set_title, "Card Checklist", false),
                checklist_items_html(&self.all())
            ),
        )
    }

    /// Every document as (file name, html)
    pub fn pages(&self) -> Vec<(&'static str, String)> {
        let mut pages = vec![("cards.html", self.cards_page())];
        if let Some(cover) = self.cover_page() {
            pages.push(("cover.html", cover));
        }
        pages.push(("compiled.html", self.compiled_page()));
        pages.push(("top54.html", self.top_page()));
        pages.push(("top54-per-rarity.html", self.top_per_rarity_page()));
        pages.push(("top54-normal.html", self.top_normal_page()));
        pages.push(("top-foil.html", self.top_foil_page()));
        pages.push(("full-art.html", self.full_art_page()));
        pages.push(("index.html", self.index_page()));
        pages.push(("checklist.html", self.checklist_page()));
        pages
    }
}

fn load_catalog(path: &Path) -> Result<Catalog> {
    if !path.is_file() {
        return Err(ChecklistError::CatalogMissing(path.to_path_buf()).into());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse catalog: {}", path.display()))
}

/// Render every page of one set into `www/`. Returns the written paths.
pub fn render_set(paths: &SetPaths) -> Result<Vec<PathBuf>> {
    let catalog = load_catalog(&paths.output_json())?;

    let metadata = SetMetadata::load(&paths.set_json());

    let report = Report::new(&paths.name, &catalog, &metadata, paths.cover_image());

    let www_dir = paths.www_dir();
    fs::create_dir_all(&www_dir)
        .with_context(|| format!("Failed to create {}", www_dir.display()))?;

    let mut written = Vec::new();
    for (file_name, html) in report.pages() {
        let page_path = www_dir.join(file_name);
        fs::write(&page_path, html)
            .with_context(|| format!("Failed to write {}", page_path.display()))?;
        written.push(page_path);
    }

    info!(
        "Rendered {} pages for {} ({} entries)",
        written.len(),
        paths.name,
        report.entries.len()
    );
    Ok(written)
}

pub fn run_render(sets_dir: &Path, set_name: &str) -> Result<()> {
    let paths = SetPaths::new(sets_dir, set_name);
    for page in render_set(&paths)? {
        println!("Successfully generated {}", osc8_file_link(&page));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Card, Variation};

    fn variation(t: VariationType, avg: f64) -> Variation {
        Variation {
            variation_type: t,
            market_price_low: avg,
            market_price_high: avg,
            market_price_avg: avg,
        }
    }

    fn card(name: &str, rarity: &str, set: u32, number: u32, local_id: &str) -> Card {
        Card {
            product_name: name.to_string(),
            rarity: rarity.to_string(),
            set,
            number,
            local_id: local_id.to_string(),
            is_reprint: false,
            original_set_data: None,
            is_legacy: false,
            is_promo: false,
            variations: vec![variation(VariationType::Normal, 0.10)],
        }
    }

    fn sample_catalog() -> Catalog {
        let mut knight = card("Ember Knight", "Common", 26, 45, "26-045C");
        knight.variations = vec![
            variation(VariationType::Normal, 0.10),
            variation(VariationType::Foil, 0.75),
        ];
        let mut promo = card("Gift Sprite", "Promo", 26, 7, "PR-001/26-007C");
        promo.is_promo = true;
        promo.variations = vec![variation(VariationType::Foil, 3.00)];
        let mut legacy = card("Old Guard", "Hero", 15, 20, "15-020H");
        legacy.is_legacy = true;
        legacy.is_reprint = true;
        legacy.variations = vec![variation(VariationType::FullArt, 12.00)];
        let mut rare = card("Bolt <Swift>", "Rare", 26, 3, "26-003R");
        rare.variations = vec![
            variation(VariationType::Normal, 1.25),
            variation(VariationType::FullArtSignature, 40.00),
        ];
        Catalog {
            cards: vec![knight, promo, legacy, rare],
        }
    }

    fn report(cover: Option<&str>) -> Report {
        let metadata = SetMetadata::from_json(r#"{"alternateTitle": "Twenty Six"}"#).unwrap();
        Report::new(
            "xxvi",
            &sample_catalog(),
            &metadata,
            cover.map(str::to_string),
        )
    }

    #[test]
    fn test_flatten_entries_order_and_ids() {
        let entries = flatten_entries(&sample_catalog());
        let summary: Vec<(usize, &str, &str)> = entries
            .iter()
            .map(|e| (e.id, e.card_number.as_str(), e.variant.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (3, "15-020H", "Full Art"),
                (4, "26-003R", "Normal"),
                (5, "26-003R", "Full Art Signature"),
                (2, "26-007C", "Foil"),
                (0, "26-045C", "Normal"),
                (1, "26-045C", "Foil"),
            ]
        );
        assert_eq!(entries[3].full_card_number, "PR-001/26-007C");
    }

    #[test]
    fn test_rarity_code() {
        assert_eq!(rarity_code("26-045C"), "C");
        assert_eq!(rarity_code("26-093C/15-095R"), "C");
        assert_eq!(rarity_code("PR-001/26-045H"), "H");
        assert_eq!(rarity_code("PR-001"), "");
    }

    #[test]
    fn test_rarity_class() {
        assert_eq!(rarity_class("Common"), "card-id-rarity-common");
        assert_eq!(rarity_class("Rare"), "card-id-rarity-rare");
        assert_eq!(rarity_class("Hero"), "card-id-rarity-hero");
        assert_eq!(rarity_class("Legend"), "card-id-rarity-legend");
        assert_eq!(rarity_class("Promo"), "card-id-rarity-common");
        assert_eq!(rarity_class(""), "card-id-rarity-common");
    }

    #[test]
    fn test_symbols_and_tags() {
        let entries = flatten_entries(&sample_catalog());
        let legacy = &entries[0];
        assert_eq!(variant_symbol(legacy), LEGACY_SYMBOL);
        assert_eq!(entry_tags(legacy), "");
        let promo = &entries[3];
        assert_eq!(variant_symbol(promo), "✨");
        assert_eq!(entry_tags(promo), PROMO_SYMBOL);
        assert_eq!(variant_symbol(&entries[4]), "");
    }

    #[test]
    fn test_top_by_price() {
        let entries = flatten_entries(&sample_catalog());
        let top = top_by_price(&entries, 3);
        let prices: Vec<f64> = top.iter().map(|e| e.average_price).collect();
        assert_eq!(prices, vec![40.00, 12.00, 3.00]);
    }

    #[test]
    fn test_titles() {
        let r = report(None);
        assert_eq!(r.set_title, "Twenty Six");
        assert_eq!(r.cover_title, "XXVI");
        assert_eq!(r.cover_subtitle.as_deref(), Some("Twenty Six"));
        assert!((r.total_value() - 57.10).abs() < 1e-9);
    }

    #[test]
    fn test_card_grid_chunks_into_binder_pages() {
        let catalog = Catalog {
            cards: (1..=10).map(|i| card("X", "Common", 1, i, "1-001C")).collect(),
        };
        let entries = flatten_entries(&catalog);
        let refs: Vec<&Entry> = entries.iter().collect();
        let html = card_grid_html(&refs);
        assert_eq!(html.matches("class=\"binder-page\"").count(), 2);
        assert_eq!(html.matches("class=\"card-entry\"").count(), 10);
    }

    #[test]
    fn test_pages_escape_and_cover() {
        let r = report(None);
        let names: Vec<&str> = r.pages().iter().map(|(n, _)| *n).collect();
        assert!(!names.contains(&"cover.html"));
        assert_eq!(names.len(), 9);

        let cards = r.cards_page();
        assert!(cards.contains("Bolt &lt;Swift&gt;"));
        assert!(!cards.contains("Bolt <Swift>"));
        assert!(cards.contains("<title>Twenty Six - Card Collection</title>"));

        let with_cover = report(Some("../assets/cover.png"));
        let cover = with_cover.cover_page().unwrap();
        assert!(cover.contains(r#"src="../assets/cover.png""#));
        assert!(cover.contains("$57.10"));
        assert!(with_cover.compiled_page().contains("cover-page"));
        assert_eq!(with_cover.pages().len(), 10);
    }

    #[test]
    fn test_compiled_sections() {
        let compiled = report(None).compiled_page();
        for id in [
            "card-collection-checklist",
            "top-54-most-valuable",
            "top-54-common",
            "top-54-hero",
            "top-54-promo",
            "top-54-rare",
            "top-54-normal",
            "top-54-foil",
            "full-art-cards",
            "card-index",
        ] {
            assert!(compiled.contains(&format!("id=\"{}\"", id)), "{}", id);
        }
    }

    #[test]
    fn test_per_rarity_uses_normal_entries_only() {
        let page = report(None).top_per_rarity_page();
        assert!(page.contains("<h2>Common</h2>"));
        assert!(page.contains("<h2>Rare</h2>"));
        // Hero and Promo have no Normal entries
        assert!(!page.contains("<h2>Hero</h2>"));
        assert!(!page.contains("<h2>Promo</h2>"));
    }

    #[test]
    fn test_full_art_includes_legacy() {
        let r = report(None);
        let full_art = r.full_art();
        let ids: Vec<usize> = full_art.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![5, 3]);
    }

    #[test]
    fn test_render_set_writes_pages() {
        let dir = tempfile::tempdir().unwrap();
        let paths = SetPaths::new(dir.path(), "xxvi");
        fs::create_dir_all(&paths.dir).unwrap();
        crate::compile::write_catalog(&sample_catalog(), &paths.output_json()).unwrap();
        fs::write(paths.set_json(), "{ nope").unwrap();

        let written = render_set(&paths).unwrap();
        assert_eq!(written.len(), 9);
        let checklist = fs::read_to_string(paths.www_dir().join("checklist.html")).unwrap();
        assert!(checklist.contains("<title>XXVI - Checklist</title>"));
        assert_eq!(checklist.matches("checklist-checkbox").count(), 6);
    }

    #[test]
    fn test_render_without_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let paths = SetPaths::new(dir.path(), "xxvi");
        fs::create_dir_all(&paths.dir).unwrap();
        let err = render_set(&paths).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ChecklistError>(),
            Some(ChecklistError::CatalogMissing(_))
        ));
    }
}
