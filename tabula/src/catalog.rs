use camino::Utf8Path;
use derive_more::Display;
use egui::{Color32, RichText};
use eyre::{Context, Result};
use libtabula::table::{
    ColumnAlign, EmptyState, TableCell, TableColumn, TableFilterOption, TableFilterSpec,
    TableValue,
};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[display("draft")]
    Draft,
    #[display("active")]
    Active,
    #[display("archived")]
    Archived,
}

impl ItemStatus {
    const ALL: [ItemStatus; 3] = [Self::Draft, Self::Active, Self::Archived];

    fn color(self) -> Color32 {
        match self {
            Self::Draft => Color32::GRAY,
            Self::Active => Color32::from_rgb(46, 160, 67),
            Self::Archived => Color32::from_rgb(180, 120, 40),
        }
    }
}

/// One product of the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub sku: String,
    pub name: String,
    pub family: String,
    pub status: ItemStatus,
    pub price: f64,
    pub stock: u32,
    pub enabled: bool,
}

const FAMILIES: [&str; 4] = ["accessories", "clothing", "footwear", "electronics"];
const ADJECTIVES: [&str; 6] = ["Classic", "Compact", "Urban", "Trail", "Studio", "Travel"];
const NOUNS: [&str; 8] = [
    "Backpack", "Jacket", "Sneaker", "Headphones", "Scarf", "Boot", "Speaker", "Wallet",
];

/// Deterministic demo catalog.
pub fn sample_items(count: usize) -> Vec<CatalogItem> {
    (0..count)
        .map(|i| CatalogItem {
            sku: format!("SKU-{:04}", i + 1),
            name: format!(
                "{} {}",
                ADJECTIVES[i % ADJECTIVES.len()],
                NOUNS[(i / ADJECTIVES.len()) % NOUNS.len()]
            ),
            family: FAMILIES[i % FAMILIES.len()].to_string(),
            status: ItemStatus::ALL[(i * 7) % ItemStatus::ALL.len()],
            price: ((i * 37) % 200) as f64 + 0.99,
            stock: ((i * 13) % 50) as u32,
            enabled: i % 5 != 0,
        })
        .collect()
}

/// Reads a JSON array of catalog items.
pub fn load_items(path: &Utf8Path) -> Result<Vec<CatalogItem>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read items from {path}"))?;
    let items: Vec<CatalogItem> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to decode items from {path}"))?;
    info!("Loaded {} catalog items from {path}", items.len());
    Ok(items)
}

pub fn catalog_columns() -> Vec<TableColumn<CatalogItem>> {
    vec![
        TableColumn::new("sku", "SKU", |item: &CatalogItem| TableValue::from(&item.sku))
            .sortable(true)
            .width(90.0)
            .render(|value, _| RichText::new(value.to_display_string()).monospace().into()),
        TableColumn::new("name", "Name", |item: &CatalogItem| TableValue::from(&item.name))
            .sortable(true)
            .width(180.0),
        TableColumn::new("family", "Family", |item: &CatalogItem| {
            TableValue::from(&item.family)
        })
        .sortable(true),
        TableColumn::new("status", "Status", |item: &CatalogItem| {
            TableValue::from(item.status.to_string())
        })
        .width(80.0)
        .render(|value, item: &CatalogItem| {
            TableCell::RichText(RichText::new(value.to_display_string()).color(item.status.color()))
        })
        .mobile_render(|value, _| TableCell::Text(value.to_display_string().to_uppercase())),
        TableColumn::new("price", "Price", |item: &CatalogItem| TableValue::from(item.price))
            .sortable(true)
            .align(ColumnAlign::Right)
            .width(70.0)
            .render(|_, item: &CatalogItem| format!("{:.2}", item.price).into()),
        TableColumn::new("stock", "Stock", |item: &CatalogItem| TableValue::from(item.stock))
            .sortable(true)
            .align(ColumnAlign::Right)
            .width(60.0),
        TableColumn::new("enabled", "Enabled", |item: &CatalogItem| {
            TableValue::from(item.enabled)
        })
        .align(ColumnAlign::Center)
        .width(70.0),
    ]
}

pub fn catalog_filters() -> Vec<TableFilterSpec<CatalogItem>> {
    vec![
        TableFilterSpec::enumerated(
            "family",
            "Family",
            FAMILIES
                .iter()
                .map(|family| TableFilterOption::new(*family, *family))
                .collect(),
        ),
        TableFilterSpec::enumerated(
            "status",
            "Status",
            ItemStatus::ALL
                .iter()
                .map(|status| TableFilterOption::new(status.to_string(), status.to_string()))
                .collect(),
        ),
        TableFilterSpec::enumerated(
            "in_stock",
            "Stock",
            vec![
                TableFilterOption::new("true", "In stock"),
                TableFilterOption::new("false", "Sold out"),
            ],
        )
        .extractor(|item: &CatalogItem| TableValue::from(item.stock > 0)),
    ]
}

pub fn catalog_empty_state() -> EmptyState {
    EmptyState::new("No items")
        .with_icon("🔍")
        .with_description("No catalog item matches the current search and filters.")
        .with_action("Clear filters")
}
