use crate::config::FrontendConfig;
use yew::{AttrValue, Html, Properties, classes, function_component, html};

#[derive(Properties, PartialEq)]
pub struct AvatarProps {
    pub name: AttrValue,
    /// Stored avatar path or a ready-to-use URL such as a preview.
    #[prop_or_default]
    pub src: Option<AttrValue>,
    /// Shown when there is no picture.
    pub initials: AttrValue,
    #[prop_or(AttrValue::Static("w-10"))]
    pub size: AttrValue,
}

#[function_component(Avatar)]
pub fn avatar(props: &AvatarProps) -> Html {
    let size = props.size.to_string();
    match &props.src {
        Some(src) => {
            let url = FrontendConfig::new().asset_url(src);
            html! {
                <div class="avatar">
                    <div class={classes!("rounded-full", size)}>
                        <img src={url} alt={props.name.clone()} />
                    </div>
                </div>
            }
        }
        None => html! {
            <div class="avatar placeholder">
                <div class={classes!("bg-neutral", "text-neutral-content", "rounded-full", size)}>
                    <span>{props.initials.clone()}</span>
                </div>
            </div>
        },
    }
}
