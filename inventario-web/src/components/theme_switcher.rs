use gloo_storage::{LocalStorage, Storage};
use i18nrs::yew::use_translation;
use web_sys::window;
use yew::{
    Callback, Classes, Html, Properties, function_component, html, use_effect_with, use_state,
};
use yew_icons::{Icon, IconId};

/// `localStorage` key remembering the chosen theme.
pub const THEME_KEY: &str = "inventario.theme";

#[derive(Properties, PartialEq, Eq)]
pub struct ThemeSwitcherProps {
    #[prop_or_default]
    pub class: Classes,
}

/// Theme to start with: the remembered one, else the system preference.
fn initial_theme() -> String {
    if let Ok(theme) = LocalStorage::get::<String>(THEME_KEY) {
        return theme;
    }
    let prefers_dark = window()
        .and_then(|window| window.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .is_some_and(|media_query| media_query.matches());
    if prefers_dark { "dark" } else { "light" }.to_string()
}

fn apply_theme(theme: &str) {
    if let Some(window) = window()
        && let Some(document) = window.document()
        && let Some(html_element) = document.document_element()
        && let Err(err) = html_element.set_attribute("data-theme", theme)
    {
        log::warn!("could not apply theme: {err:?}");
    }
}

#[function_component(ThemeSwitcher)]
pub fn theme_switcher(props: &ThemeSwitcherProps) -> Html {
    let (i18n, ..) = use_translation();
    let current_theme = use_state(initial_theme);

    use_effect_with((*current_theme).clone(), |theme| {
        apply_theme(theme);
        || {}
    });

    let toggle_theme = {
        let current_theme = current_theme.clone();
        Callback::from(move |_: yew::MouseEvent| {
            let new_theme = if *current_theme == "dark" { "light" } else { "dark" };
            if let Err(err) = LocalStorage::set(THEME_KEY, new_theme) {
                log::warn!("could not remember theme: {err}");
            }
            current_theme.set(new_theme.to_string());
        })
    };

    // Sun in dark mode (switch to light), moon in light mode
    let theme_icon = match current_theme.as_str() {
        "light" => IconId::HeroiconsSolidMoon,
        _ => IconId::HeroiconsSolidSun,
    };

    html! {
        <div class={props.class.clone()}>
            <button
                class="btn btn-ghost btn-circle"
                onclick={toggle_theme}
                aria-label={i18n.t("theme.selector")}
            >
                <Icon icon_id={theme_icon} class="h-5 w-5" />
            </button>
        </div>
    }
}
