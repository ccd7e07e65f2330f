use crate::{
    api::{ApiError, InventarioClient},
    components::{BarChart, LoadError, Loading, StatCard},
    config::FrontendConfig,
    format::{format_money, format_units},
    hooks::{use_fetch, use_session},
    models::request_status::RequestStatus,
};
use i18nrs::yew::use_translation;
use shared::charts::{self, DEFAULT_MIN_BAR_PCT};
use shared::models::{DashboardSummary, MovementKind};
use yew::prelude::*;
use yew_icons::IconId;

/// Load the catalog plus the lot and kardex summaries in parallel.
///
/// The catalog is required. The other two only enrich the page, so their
/// failures are logged and the summary is flagged as degraded.
async fn load_summary(default_min_stock: i64) -> Result<DashboardSummary, ApiError> {
    let client = InventarioClient::shared();
    let (products, lots, movements) =
        futures::join!(client.list_products(), client.lots_summary(), client.kardex());
    let products = products?;
    let lots = lots
        .inspect_err(|err| log::warn!("lot summary unavailable: {err}"))
        .ok();
    let movements = movements
        .inspect_err(|err| log::warn!("kardex unavailable: {err}"))
        .ok();
    Ok(DashboardSummary::assemble(
        &products,
        lots,
        movements,
        default_min_stock,
    ))
}

fn movement_badge(kind: MovementKind) -> (&'static str, &'static str) {
    match kind {
        MovementKind::Inbound => ("badge-success", "dashboard.movement.inbound"),
        MovementKind::Outbound => ("badge-error", "dashboard.movement.outbound"),
        MovementKind::Adjustment => ("badge-warning", "dashboard.movement.adjustment"),
    }
}

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let (i18n, ..) = use_translation();
    let user = use_session();
    let default_min_stock = FrontendConfig::new().default_min_stock;
    let fetch = use_fetch(default_min_stock, load_summary);

    let greeting = user.map_or_else(
        || i18n.t("dashboard.title"),
        |user| format!("{}, {}", i18n.t("dashboard.greeting"), user.name),
    );

    let body = match fetch.status() {
        RequestStatus::Idle | RequestStatus::Loading => html! { <Loading /> },
        RequestStatus::Failed(message) => {
            let fetch = fetch.clone();
            html! {
                <LoadError
                    message={message.clone()}
                    on_retry={Callback::from(move |()| fetch.reload())}
                />
            }
        }
        RequestStatus::Succeeded(summary) => {
            let uncategorized = i18n.t("dashboard.uncategorized");
            let category_bars = charts::bars(
                summary.units_by_category.iter().map(|(category, units)| {
                    let label = if category.is_empty() {
                        uncategorized.clone()
                    } else {
                        category.clone()
                    };
                    #[allow(clippy::cast_precision_loss)]
                    let units = *units as f64;
                    (label, units)
                }),
                DEFAULT_MIN_BAR_PCT,
            );
            let low_stock_accent = if summary.low_stock_count > 0 {
                classes!("text-warning")
            } else {
                classes!("text-success")
            };

            html! {
                <>
                    if summary.degraded {
                        <div class="alert alert-warning text-sm" role="status">
                            <i class="fa-solid fa-circle-info"></i>
                            <span>{i18n.t("dashboard.degraded")}</span>
                        </div>
                    }
                    <div class="stats stats-vertical lg:stats-horizontal shadow w-full bg-base-100">
                        <StatCard
                            title={i18n.t("dashboard.products")}
                            value={summary.total_products.to_string()}
                            icon={IconId::HeroiconsOutlineCube}
                            description={format!("{} {}", format_units(summary.total_units), i18n.t("dashboard.units"))}
                        />
                        <StatCard
                            title={i18n.t("dashboard.low_stock")}
                            value={summary.low_stock_count.to_string()}
                            icon={IconId::HeroiconsOutlineExclamationTriangle}
                            description={format!("{} {}", summary.out_of_stock_count, i18n.t("dashboard.out_of_stock"))}
                            accent={low_stock_accent}
                        />
                        <StatCard
                            title={i18n.t("dashboard.lots")}
                            value={summary.lots.total.to_string()}
                            icon={IconId::HeroiconsOutlineArchiveBox}
                            description={format!(
                                "{} {} / {} {}",
                                summary.lots.expiring_soon,
                                i18n.t("dashboard.expiring"),
                                summary.lots.expired,
                                i18n.t("dashboard.expired"),
                            )}
                            accent={classes!("text-secondary")}
                        />
                        <StatCard
                            title={i18n.t("dashboard.inventory_value")}
                            value={format_money(summary.inventory_value)}
                            icon={IconId::HeroiconsOutlineCurrencyDollar}
                            accent={classes!("text-accent")}
                        />
                    </div>
                    <div class="grid gap-6 lg:grid-cols-2">
                        <div class="card bg-base-100 shadow">
                            <div class="card-body">
                                <h2 class="card-title">{i18n.t("dashboard.by_category")}</h2>
                                <BarChart bars={category_bars} empty_label={i18n.t("dashboard.no_products")} />
                            </div>
                        </div>
                        <div class="card bg-base-100 shadow">
                            <div class="card-body">
                                <h2 class="card-title">{i18n.t("dashboard.recent_movements")}</h2>
                                if summary.recent_movements.is_empty() {
                                    <p class="text-sm text-base-content/60 py-8 text-center">
                                        {i18n.t("dashboard.no_movements")}
                                    </p>
                                } else {
                                    <div class="overflow-x-auto">
                                        <table class="table table-sm">
                                            <thead>
                                                <tr>
                                                    <th>{i18n.t("dashboard.product")}</th>
                                                    <th>{i18n.t("dashboard.kind")}</th>
                                                    <th class="text-right">{i18n.t("dashboard.quantity")}</th>
                                                    <th>{i18n.t("dashboard.date")}</th>
                                                </tr>
                                            </thead>
                                            <tbody>
                                                { for summary.recent_movements.iter().map(|movement| {
                                                    let (badge, key) = movement_badge(movement.kind);
                                                    html! {
                                                        <tr key={movement.id}>
                                                            <td>{movement.product.clone()}</td>
                                                            <td><span class={classes!("badge", "badge-sm", badge)}>{i18n.t(key)}</span></td>
                                                            <td class="text-right">{format_units(movement.quantity)}</td>
                                                            <td class="text-xs">{movement.date.clone()}</td>
                                                        </tr>
                                                    }
                                                }) }
                                            </tbody>
                                        </table>
                                    </div>
                                }
                            </div>
                        </div>
                    </div>
                </>
            }
        }
    };

    html! {
        <div class="p-4 space-y-6">
            <h1 class="text-2xl font-bold">{greeting}</h1>
            {body}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_badges_use_distinct_keys() {
        let keys: Vec<_> = [
            MovementKind::Inbound,
            MovementKind::Outbound,
            MovementKind::Adjustment,
        ]
        .into_iter()
        .map(|kind| movement_badge(kind).1)
        .collect();
        assert_eq!(keys.len(), 3);
        assert!(keys.iter().all(|key| key.starts_with("dashboard.movement.")));
        assert_ne!(keys[0], keys[1]);
    }
}
