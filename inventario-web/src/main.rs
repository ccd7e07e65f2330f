mod api;
mod app;
mod components;
mod config;
mod containers;
mod download;
mod format;
mod hooks;
mod language;
mod logging;
mod models;
mod pages;
mod routes;
mod routes_test;
mod validation;

use app::App;
use config::FrontendConfig;
use i18nrs::yew::{I18nProvider, I18nProviderConfig};
use language::supported_languages;
use std::collections::HashMap;
use yew::{Html, Renderer, function_component, html};
use yewdux::YewduxRoot;

#[function_component(InternationalApp)]
fn international_app() -> Html {
    let translations: HashMap<&str, &str> = supported_languages()
        .iter()
        .map(|(&key, value)| (key, value.translation))
        .collect();

    let config = I18nProviderConfig {
        translations,
        default_language: language::initial_language().to_string(),
        ..Default::default()
    };

    html! {
        <YewduxRoot>
            <I18nProvider ..config>
                <App />
            </I18nProvider>
        </YewduxRoot>
    }
}

fn main() {
    let config = FrontendConfig::new();
    logging::init(config.log_level);
    logging::install_panic_hook();
    log::info!("starting inventario-web against {}", config.api_base_url());

    let Some(body) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.body())
    else {
        log::error!("no document body to mount on");
        return;
    };
    Renderer::<InternationalApp>::with_root(body.into()).render();
}
