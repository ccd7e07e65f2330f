use i18nrs::yew::use_translation;
use yew::{AttrValue, Callback, Html, MouseEvent, Properties, function_component, html};

#[derive(Properties, PartialEq)]
pub struct LoadErrorProps {
    pub message: AttrValue,
    pub on_retry: Callback<()>,
}

/// Failed load with a retry button.
#[function_component(LoadError)]
pub fn load_error(props: &LoadErrorProps) -> Html {
    let (i18n, ..) = use_translation();
    let onclick = props.on_retry.reform(|_: MouseEvent| ());
    html! {
        <div class="alert alert-error" role="alert">
            <i class="fa-solid fa-triangle-exclamation"></i>
            <span>{props.message.clone()}</span>
            <button class="btn btn-sm" {onclick}>{i18n.t("common.retry")}</button>
        </div>
    }
}
