use crate::routes::MainRoute;
use i18nrs::yew::use_translation;
use yew::{Html, function_component, html};
use yew_router::prelude::Link;

#[function_component(ErrorPage)]
pub fn error_page() -> Html {
    let (i18n, _) = use_translation();

    html! {
        <div class="hero min-h-[60vh]">
            <div class="hero-content text-center">
                <div class="max-w-md space-y-4">
                    <h1 class="text-6xl font-bold text-primary">{"404"}</h1>
                    <p class="text-xl font-semibold">{i18n.t("not_found.title")}</p>
                    <p class="text-base-content/70">{i18n.t("not_found.message")}</p>
                    <Link<MainRoute> to={MainRoute::Dashboard} classes="btn btn-primary">
                        {i18n.t("not_found.back")}
                    </Link<MainRoute>>
                </div>
            </div>
        </div>
    }
}
