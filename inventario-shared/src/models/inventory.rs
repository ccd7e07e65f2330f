//! Catalog, lot and stock-movement models plus the dashboard summary that is
//! derived from them on the client.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of kardex rows kept for the "recent movements" list.
pub const RECENT_MOVEMENTS: usize = 5;

/// Catalog entry as returned by `GET /productos`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: i64,
    #[serde(rename = "codigo", default)]
    pub code: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "categoria", default)]
    pub category: Option<String>,
    /// Units currently on hand, as computed by the backend.
    #[serde(default)]
    pub stock: i64,
    /// Reorder threshold. Products without one use the configured default.
    #[serde(rename = "stock_minimo", default)]
    pub min_stock: Option<i64>,
    #[serde(rename = "precio", default)]
    pub price: f64,
}

impl Product {
    /// Whether stock is at or below the reorder threshold.
    #[must_use]
    pub fn is_low_stock(&self, default_min: i64) -> bool {
        self.stock <= self.min_stock.unwrap_or(default_min)
    }
}

/// Aggregate from `GET /lotes/resumen`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LotSummary {
    #[serde(rename = "total_lotes", default)]
    pub total: u32,
    #[serde(rename = "por_vencer", default)]
    pub expiring_soon: u32,
    #[serde(rename = "vencidos", default)]
    pub expired: u32,
}

/// Direction of a kardex movement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MovementKind {
    #[serde(rename = "entrada")]
    Inbound,
    #[serde(rename = "salida")]
    Outbound,
    #[serde(rename = "ajuste")]
    Adjustment,
}

/// One row of `GET /kardex`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KardexMovement {
    pub id: i64,
    #[serde(rename = "producto")]
    pub product: String,
    #[serde(rename = "tipo")]
    pub kind: MovementKind,
    #[serde(rename = "cantidad")]
    pub quantity: i64,
    /// Backend formatted timestamp, displayed as-is.
    #[serde(rename = "fecha")]
    pub date: String,
}

/// Everything the dashboard renders, assembled from one primary and two
/// optional sources.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSummary {
    pub total_products: usize,
    pub low_stock_count: usize,
    pub out_of_stock_count: usize,
    pub total_units: i64,
    pub inventory_value: f64,
    pub lots: LotSummary,
    pub recent_movements: Vec<KardexMovement>,
    /// Units on hand per category, largest first. Uncategorized products are
    /// grouped under an empty label.
    pub units_by_category: Vec<(String, i64)>,
    /// True when at least one optional source failed and defaults were used.
    pub degraded: bool,
}

impl DashboardSummary {
    /// Build the summary. Missing secondary sources fall back to empty
    /// values and flag the summary as degraded.
    #[must_use]
    pub fn assemble(
        products: &[Product],
        lots: Option<LotSummary>,
        movements: Option<Vec<KardexMovement>>,
        default_min_stock: i64,
    ) -> Self {
        let degraded = lots.is_none() || movements.is_none();

        let mut by_category: BTreeMap<String, i64> = BTreeMap::new();
        for product in products {
            let label = product.category.clone().unwrap_or_default();
            *by_category.entry(label).or_default() += product.stock.max(0);
        }
        let mut units_by_category: Vec<(String, i64)> = by_category.into_iter().collect();
        units_by_category.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let mut recent_movements = movements.unwrap_or_default();
        recent_movements.truncate(RECENT_MOVEMENTS);

        #[allow(clippy::cast_precision_loss)]
        let inventory_value = products
            .iter()
            .map(|product| product.stock.max(0) as f64 * product.price)
            .sum();

        Self {
            total_products: products.len(),
            low_stock_count: products
                .iter()
                .filter(|product| product.is_low_stock(default_min_stock))
                .count(),
            out_of_stock_count: products.iter().filter(|product| product.stock <= 0).count(),
            total_units: products.iter().map(|product| product.stock.max(0)).sum(),
            inventory_value,
            lots: lots.unwrap_or_default(),
            recent_movements,
            units_by_category,
            degraded,
        }
    }
}
