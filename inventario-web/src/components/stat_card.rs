use yew::{AttrValue, Classes, Html, Properties, classes, function_component, html};
use yew_icons::{Icon, IconId};

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub title: AttrValue,
    pub value: AttrValue,
    pub icon: IconId,
    #[prop_or_default]
    pub description: Option<AttrValue>,
    /// Text color class for the value and icon, such as `text-warning`.
    #[prop_or_else(|| classes!("text-primary"))]
    pub accent: Classes,
}

#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class="stat">
            <div class={classes!("stat-figure", props.accent.clone())}>
                <Icon icon_id={props.icon} class="w-8 h-8" />
            </div>
            <div class="stat-title">{props.title.clone()}</div>
            <div class={classes!("stat-value", props.accent.clone())}>{props.value.clone()}</div>
            if let Some(description) = &props.description {
                <div class="stat-desc">{description.clone()}</div>
            }
        </div>
    }
}
