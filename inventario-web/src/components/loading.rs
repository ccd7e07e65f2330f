use i18nrs::yew::use_translation;
use yew::{Html, Properties, function_component, html};

#[derive(Properties, PartialEq)]
pub struct LoadingProps {
    /// Translation key of the caption under the spinner.
    #[prop_or("common.loading")]
    pub label: &'static str,
}

#[function_component(Loading)]
pub fn loading(props: &LoadingProps) -> Html {
    let (i18n, ..) = use_translation();
    html! {
        <div class="flex flex-col items-center justify-center h-full py-12 animate-fadeIn" role="status">
            <div class="bg-base-200 p-6 rounded-lg shadow-md flex flex-col items-center">
                <div class="text-xl font-medium flex items-center gap-2">
                    <i class="fas fa-boxes-stacked text-primary"></i>
                    <span>{i18n.t("app.title")}</span>
                </div>
                <div class="mt-3 flex items-center gap-2">
                    <span class="loading loading-dots loading-sm"></span>
                    <span>{i18n.t(props.label)}</span>
                </div>
            </div>
        </div>
    }
}
