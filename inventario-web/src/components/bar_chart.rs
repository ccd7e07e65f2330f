use crate::format::format_money;
use shared::charts::Bar;
use yew::{AttrValue, Html, Properties, function_component, html};

#[derive(Properties, PartialEq)]
pub struct BarChartProps {
    pub bars: Vec<Bar>,
    /// Shown instead of the chart when there are no bars.
    pub empty_label: AttrValue,
    /// Format values as money instead of whole units.
    #[prop_or_default]
    pub money: bool,
}

/// Vertical bar chart drawn with plain elements. Heights are precomputed.
#[function_component(BarChart)]
pub fn bar_chart(props: &BarChartProps) -> Html {
    if props.bars.is_empty() {
        return html! {
            <p class="text-sm text-base-content/60 py-8 text-center">{props.empty_label.clone()}</p>
        };
    }

    html! {
        <div class="flex items-end gap-2 h-48 w-full overflow-x-auto pt-6">
            { for props.bars.iter().map(|bar| {
                let value = if props.money {
                    format_money(bar.value)
                } else {
                    format!("{:.0}", bar.value)
                };
                html! {
                    <div class="flex flex-col items-center justify-end h-full min-w-10 flex-1">
                        <div
                            class="w-full rounded-t bg-primary tooltip"
                            data-tip={value.clone()}
                            style={format!("height: {:.1}%", bar.height_pct)}
                            aria-label={format!("{}: {value}", bar.label)}
                        ></div>
                        <span class="text-xs mt-1 truncate max-w-full">{bar.label.clone()}</span>
                    </div>
                }
            }) }
        </div>
    }
}
