use crate::{
    api::InventarioClient,
    components::{BarChart, LoadError, Loading, StatCard},
    download::save_bytes,
    format::{format_money, format_pct},
    hooks::{use_fetch, use_notifier, use_submission},
    models::request_status::RequestStatus,
    models::toast::Notifier,
    validation::ValidationError,
};
use chrono::{Local, NaiveDate};
use i18nrs::yew::use_translation;
use shared::charts::DEFAULT_MIN_BAR_PCT;
use shared::models::{DailyReport, ReportFormat};
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_icons::IconId;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse the value of a date input. Empty and future dates are rejected.
fn parse_report_date(value: &str, today: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .ok()
        .filter(|date| *date <= today)
}

fn report_summary(i18n_t: &dyn Fn(&str) -> String, report: &DailyReport) -> Html {
    let peak = report.peak_hour().map_or_else(
        || "-".to_string(),
        |(hour, bucket)| format!("{hour} ({})", format_money(bucket.total)),
    );
    html! {
        <div class="stats stats-vertical lg:stats-horizontal shadow w-full bg-base-100">
            <StatCard
                title={i18n_t("report.total")}
                value={format_money(report.total_sales)}
                icon={IconId::HeroiconsOutlineCurrencyDollar}
            />
            <StatCard
                title={i18n_t("report.count")}
                value={report.sales_count.to_string()}
                icon={IconId::HeroiconsOutlineShoppingCart}
                accent={classes!("text-secondary")}
            />
            <StatCard
                title={i18n_t("report.average")}
                value={format_money(report.average_ticket())}
                icon={IconId::HeroiconsOutlineReceiptPercent}
                accent={classes!("text-accent")}
            />
            <StatCard
                title={i18n_t("report.peak_hour")}
                value={peak}
                icon={IconId::HeroiconsOutlineClock}
                accent={classes!("text-info")}
            />
        </div>
    }
}

fn share_row(label: &str, detail: String, total: f64, share: f64) -> Html {
    html! {
        <li class="flex flex-col gap-1">
            <div class="flex justify-between text-sm">
                <span class="font-medium">{label.to_string()}</span>
                <span>{format_money(total)}</span>
            </div>
            <progress class="progress progress-primary w-full" value={format!("{share:.1}")} max="100"></progress>
            <div class="flex justify-between text-xs text-base-content/60">
                <span>{detail}</span>
                <span>{format_pct(share)}</span>
            </div>
        </li>
    }
}

#[function_component(DailyReportPage)]
pub fn daily_report_page() -> Html {
    let (i18n, ..) = use_translation();
    let today = Local::now().date_naive();
    let date = use_state(move || today);
    let fetch = use_fetch(*date, |date| async move {
        InventarioClient::shared().daily_report_data(date).await
    });
    let export = use_submission();
    let exporting = use_state(|| None::<ReportFormat>);
    let notifier = use_notifier();

    let on_date = {
        let date = date.clone();
        Callback::from(move |event: Event| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                match parse_report_date(&input.value(), today) {
                    Some(picked) => date.set(picked),
                    None => input.set_value(&date.format(DATE_FORMAT).to_string()),
                }
            }
        })
    };

    let export_button = |format: ReportFormat, label_key: &str, icon: &'static str| {
        let onclick = {
            let export = export.clone();
            let exporting = exporting.clone();
            let notifier = notifier.clone();
            let date = *date;
            let saved = i18n.t("report.exported");
            let save_failed = i18n.t("report.export_failed");
            Callback::from(move |_: MouseEvent| {
                exporting.set(Some(format));
                let exporting = exporting.clone();
                let notifier = notifier.clone();
                let saved = saved.clone();
                let save_failed = save_failed.clone();
                export.submit(
                    Ok::<_, ValidationError>(format),
                    move |format| async move {
                        InventarioClient::shared()
                            .daily_report_document(date, format)
                            .await
                    },
                    move |bytes: Vec<u8>| {
                        exporting.set(None);
                        match save_bytes(&bytes, &format.file_name(date), format.mime_type()) {
                            Ok(()) => notifier.success(&saved),
                            Err(err) => {
                                log::error!("report download failed: {err}");
                                notifier.error(&save_failed);
                            }
                        }
                    },
                );
            })
        };
        let busy = export.is_busy() && *exporting == Some(format);
        html! {
            <button class="btn btn-sm btn-outline" {onclick} disabled={export.is_busy()}>
                if busy {
                    <span class="loading loading-spinner loading-xs"></span>
                } else {
                    <i class={classes!("fa-solid", icon)}></i>
                }
                {i18n.t(label_key)}
            </button>
        }
    };

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
        RequestStatus::Succeeded(report) => {
            let t = |key: &str| i18n.t(key);
            html! {
                <>
                    {report_summary(&t, report)}
                    <div class="card bg-base-100 shadow">
                        <div class="card-body">
                            <h2 class="card-title">{i18n.t("report.by_hour")}</h2>
                            <BarChart
                                bars={report.hourly_bars(DEFAULT_MIN_BAR_PCT)}
                                empty_label={i18n.t("report.no_sales")}
                                money=true
                            />
                        </div>
                    </div>
                    <div class="grid gap-6 lg:grid-cols-2">
                        <div class="card bg-base-100 shadow">
                            <div class="card-body">
                                <h2 class="card-title">{i18n.t("report.top_products")}</h2>
                                if report.top_products.is_empty() {
                                    <p class="text-sm text-base-content/60">{i18n.t("report.no_sales")}</p>
                                } else {
                                    <ul class="flex flex-col gap-3">
                                        { for report.product_shares().into_iter().map(|(product, share)| {
                                            let detail = format!("{} {}", product.quantity, i18n.t("report.units_sold"));
                                            share_row(&product.name, detail, product.total, share)
                                        }) }
                                    </ul>
                                }
                            </div>
                        </div>
                        <div class="card bg-base-100 shadow">
                            <div class="card-body">
                                <h2 class="card-title">{i18n.t("report.payment_methods")}</h2>
                                if report.payment_methods.is_empty() {
                                    <p class="text-sm text-base-content/60">{i18n.t("report.no_sales")}</p>
                                } else {
                                    <ul class="flex flex-col gap-3">
                                        { for report.payment_shares().into_iter().map(|(method, share)| {
                                            let detail = format!("{} {}", method.count, i18n.t("report.transactions"));
                                            share_row(&method.method, detail, method.total, share)
                                        }) }
                                    </ul>
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
            <div class="flex flex-wrap items-end justify-between gap-4">
                <div>
                    <h1 class="text-2xl font-bold">{i18n.t("report.title")}</h1>
                    <p class="text-sm text-base-content/70">{i18n.t("report.subtitle")}</p>
                </div>
                <div class="flex flex-wrap items-end gap-2">
                    <label class="form-control">
                        <span class="label-text text-xs">{i18n.t("report.date")}</span>
                        <input
                            type="date"
                            class="input input-bordered input-sm"
                            value={date.format(DATE_FORMAT).to_string()}
                            max={today.format(DATE_FORMAT).to_string()}
                            onchange={on_date}
                        />
                    </label>
                    {export_button(ReportFormat::Pdf, "report.export_pdf", "fa-file-pdf")}
                    {export_button(ReportFormat::Excel, "report.export_excel", "fa-file-excel")}
                </div>
            </div>
            {body}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn report_date_parses_input_value() {
        let today = day(2024, 6, 15);
        assert_eq!(parse_report_date("2024-06-14", today), Some(day(2024, 6, 14)));
        assert_eq!(parse_report_date(" 2024-06-15 ", today), Some(today));
    }

    #[test]
    fn report_date_rejects_empty_and_future() {
        let today = day(2024, 6, 15);
        assert_eq!(parse_report_date("", today), None);
        assert_eq!(parse_report_date("2024-06-16", today), None);
        assert_eq!(parse_report_date("15/06/2024", today), None);
    }
}
