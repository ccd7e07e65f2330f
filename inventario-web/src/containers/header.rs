use crate::{
    components::{
        header_nav_item::HeaderNavItem, language_selector::LanguageSelector,
        theme_switcher::ThemeSwitcher, user_dropdown::UserDropdown,
    },
    models::app_state::AppState,
    routes::{MainRoute, nav_routes},
};
use i18nrs::yew::use_translation;
use yew::prelude::*;
use yew_router::prelude::Link;
use yewdux::prelude::use_store_value;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    #[prop_or_default]
    pub current_route: Option<MainRoute>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let (i18n, ..) = use_translation();
    let state = use_store_value::<AppState>();
    let routes = nav_routes(&state);

    let render_routes = || -> Html {
        html! {
            { for routes.iter().map(|route| html! {
                <HeaderNavItem
                    current_route={props.current_route.clone()}
                    route={route.clone()}
                />
            }) }
        }
    };

    html! {
        <nav class="navbar justify-between bg-base-300">
            <Link<MainRoute> to={MainRoute::Dashboard} classes="btn btn-ghost text-lg gap-2">
                <i class="fa-solid fa-boxes-stacked text-primary"></i>
                {i18n.t("app.title")}
            </Link<MainRoute>>
            <div class="dropdown dropdown-end sm:hidden">
                <button class="btn btn-soft" aria-label={i18n.t("header.menu")}>
                    <i class="fa-solid fa-bars text-lg"></i>
                </button>
                <ul
                    tabindex="0"
                    class="dropdown-content menu z-[1] bg-base-200 p-6 rounded-box shadow w-56 gap-2"
                >
                    {render_routes()}
                </ul>
            </div>
            <ul class="hidden menu sm:menu-horizontal">
                {render_routes()}
            </ul>
            <div class="flex items-center">
                <div class="hidden sm:flex">
                    <LanguageSelector />
                    <ThemeSwitcher />
                </div>
                <UserDropdown />
            </div>
        </nav>
    }
}
