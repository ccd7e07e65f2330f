use yew::{Html, Properties, classes, function_component, html};

#[derive(Properties, PartialEq)]
pub struct FormAlertProps {
    #[prop_or_default]
    pub error: Option<String>,
    #[prop_or_default]
    pub success: Option<String>,
}

/// Inline outcome of the last submission. The error wins when both are set.
#[function_component(FormAlert)]
pub fn form_alert(props: &FormAlertProps) -> Html {
    let (class, icon, message) = match (&props.error, &props.success) {
        (Some(error), _) => ("alert-error", "fa-circle-exclamation", error),
        (None, Some(success)) => ("alert-success", "fa-circle-check", success),
        (None, None) => return html! {},
    };
    html! {
        <div class={classes!("alert", class)} role="alert">
            <i class={classes!("fa-solid", icon)}></i>
            <span>{message.clone()}</span>
        </div>
    }
}
