//! Daily sales report aggregate and the figures derived from it.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::charts::{self, Bar};

/// Sales bucket for one hour of the day.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct HourlySales {
    #[serde(default)]
    pub total: f64,
    #[serde(rename = "cantidad", default)]
    pub count: u32,
}

/// Best selling product line of the day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopProduct {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "cantidad", default)]
    pub quantity: f64,
    #[serde(default)]
    pub total: f64,
}

/// Amount collected through one payment method.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentMethodTotal {
    #[serde(rename = "metodo")]
    pub method: String,
    #[serde(default)]
    pub total: f64,
    #[serde(rename = "cantidad", default)]
    pub count: u32,
}

/// Payload of `GET /sales/report/daily/data`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyReport {
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "total_ventas", default)]
    pub total_sales: f64,
    #[serde(rename = "numero_ventas", default)]
    pub sales_count: u32,
    /// Keyed by `HH:MM`; lexical order is chronological order.
    #[serde(rename = "ventas_por_hora", default, deserialize_with = "map_or_empty_list")]
    pub sales_by_hour: BTreeMap<String, HourlySales>,
    #[serde(rename = "productos_mas_vendidos", default)]
    pub top_products: Vec<TopProduct>,
    #[serde(rename = "metodos_pago", default)]
    pub payment_methods: Vec<PaymentMethodTotal>,
}

impl DailyReport {
    /// Average sale amount, zero on a day without sales.
    #[must_use]
    pub fn average_ticket(&self) -> f64 {
        if self.sales_count == 0 {
            0.0
        } else {
            self.total_sales / f64::from(self.sales_count)
        }
    }

    /// Hourly bars scaled against the busiest hour.
    #[must_use]
    pub fn hourly_bars(&self, min_pct: f64) -> Vec<Bar> {
        charts::bars(
            self.sales_by_hour
                .iter()
                .map(|(hour, bucket)| (hour.clone(), bucket.total)),
            min_pct,
        )
    }

    /// The hour with the highest total, if any sale happened.
    #[must_use]
    pub fn peak_hour(&self) -> Option<(&str, &HourlySales)> {
        self.sales_by_hour
            .iter()
            .filter(|(_, bucket)| bucket.total > 0.0)
            .max_by(|a, b| a.1.total.total_cmp(&b.1.total))
            .map(|(hour, bucket)| (hour.as_str(), bucket))
    }

    /// Each top product's share of the day's total, in percent.
    #[must_use]
    pub fn product_shares(&self) -> Vec<(&TopProduct, f64)> {
        self.top_products
            .iter()
            .map(|product| (product, charts::share_pct(product.total, self.total_sales)))
            .collect()
    }

    /// Each payment method's share of the day's total, in percent.
    #[must_use]
    pub fn payment_shares(&self) -> Vec<(&PaymentMethodTotal, f64)> {
        self.payment_methods
            .iter()
            .map(|method| (method, charts::share_pct(method.total, self.total_sales)))
            .collect()
    }
}

/// Document formats offered by `GET /sales/report/daily`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Pdf,
    Excel,
}

impl ReportFormat {
    /// Value of the `format` query parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Excel => "excel",
        }
    }

    #[must_use]
    pub fn file_extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Excel => "xlsx",
        }
    }

    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Excel => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }

    /// Download file name for the report of `date`.
    #[must_use]
    pub fn file_name(self, date: NaiveDate) -> String {
        format!("ventas-{}.{}", date.format("%Y-%m-%d"), self.file_extension())
    }
}

/// The backend serializes an empty hour map as `[]`.
fn map_or_empty_list<'de, D>(deserializer: D) -> Result<BTreeMap<String, HourlySales>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MapOrList {
        Map(BTreeMap<String, HourlySales>),
        List(Vec<serde_json::Value>),
    }

    match MapOrList::deserialize(deserializer)? {
        MapOrList::Map(map) => Ok(map),
        MapOrList::List(list) if list.is_empty() => Ok(BTreeMap::new()),
        MapOrList::List(_) => Err(serde::de::Error::custom(
            "ventas_por_hora must be an object keyed by hour",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::DEFAULT_MIN_BAR_PCT;
    use serde_json::json;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn report(hours: serde_json::Value) -> DailyReport {
        serde_json::from_value(json!({
            "fecha": "2024-06-15",
            "total_ventas": 150.0,
            "numero_ventas": 3,
            "ventas_por_hora": hours,
            "productos_mas_vendidos": [
                {"nombre": "Arroz 1kg", "cantidad": 10, "total": 120.0},
                {"nombre": "Aceite", "cantidad": 2, "total": 30.0}
            ],
            "metodos_pago": [
                {"metodo": "efectivo", "total": 90.0, "cantidad": 2},
                {"metodo": "tarjeta", "total": 60.0, "cantidad": 1}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn hourly_bars_scale_against_busiest_hour() {
        let report = report(json!({
            "10:00": {"total": 100, "cantidad": 2},
            "11:00": {"total": 50, "cantidad": 1}
        }));
        let bars = report.hourly_bars(DEFAULT_MIN_BAR_PCT);
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].label, "10:00");
        assert!(approx(bars[0].height_pct, 100.0));
        assert_eq!(bars[1].label, "11:00");
        assert!(approx(bars[1].height_pct, 50.0));
        assert_eq!(report.peak_hour().map(|(hour, _)| hour), Some("10:00"));
    }

    #[test]
    fn zero_totals_render_minimum_height() {
        let report = report(json!({
            "09:00": {"total": 0, "cantidad": 0},
            "10:00": {"total": 0, "cantidad": 0}
        }));
        let bars = report.hourly_bars(DEFAULT_MIN_BAR_PCT);
        assert!(bars.iter().all(|bar| approx(bar.height_pct, DEFAULT_MIN_BAR_PCT)));
        assert!(report.peak_hour().is_none());
    }

    #[test]
    fn empty_hour_list_is_accepted() {
        let report = report(json!([]));
        assert!(report.sales_by_hour.is_empty());
        assert!(report.hourly_bars(DEFAULT_MIN_BAR_PCT).is_empty());
    }

    #[test]
    fn non_empty_hour_list_is_rejected() {
        let result: Result<DailyReport, _> = serde_json::from_value(json!({
            "fecha": "2024-06-15",
            "ventas_por_hora": [1, 2]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn derived_figures() {
        let report = report(json!({}));
        assert!(approx(report.average_ticket(), 50.0));
        let shares = report.product_shares();
        assert!(approx(shares[0].1, 80.0));
        assert!(approx(shares[1].1, 20.0));
        let payments = report.payment_shares();
        assert!(approx(payments[0].1, 60.0));
    }

    #[test]
    fn average_ticket_without_sales_is_zero() {
        let mut report = report(json!({}));
        report.sales_count = 0;
        assert!(approx(report.average_ticket(), 0.0));
    }

    #[test]
    fn report_format_file_names() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(ReportFormat::Pdf.file_name(date), "ventas-2024-06-15.pdf");
        assert_eq!(ReportFormat::Excel.file_name(date), "ventas-2024-06-15.xlsx");
        assert_eq!(ReportFormat::Excel.as_str(), "excel");
    }
}
