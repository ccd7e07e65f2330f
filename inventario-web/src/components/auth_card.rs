use crate::components::{language_selector::LanguageSelector, theme_switcher::ThemeSwitcher};
use yew::{AttrValue, Children, Html, Properties, function_component, html};

#[derive(Properties, PartialEq)]
pub struct AuthCardProps {
    pub title: AttrValue,
    #[prop_or_default]
    pub subtitle: Option<AttrValue>,
    pub children: Children,
}

/// Centered card used by the pages reachable before the dashboard.
#[function_component(AuthCard)]
pub fn auth_card(props: &AuthCardProps) -> Html {
    html! {
        <div class="flex flex-col items-center justify-center min-h-screen bg-base-200 p-4">
            <div class="flex self-end">
                <LanguageSelector />
                <ThemeSwitcher />
            </div>
            <div class="card w-full max-w-md shadow-lg bg-base-100">
                <div class="card-body gap-4">
                    <div>
                        <h2 class="card-title text-2xl">{props.title.clone()}</h2>
                        if let Some(subtitle) = &props.subtitle {
                            <p class="text-sm text-base-content/70">{subtitle.clone()}</p>
                        }
                    </div>
                    {props.children.clone()}
                </div>
            </div>
        </div>
    }
}
