use crate::{containers::layout::Layout, models::app_state::AppState, pages::*};
use strum::{EnumIter, IntoEnumIterator};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_store_value;

/// The main routes
#[derive(Debug, Clone, PartialEq, Routable, EnumIter)]
pub enum MainRoute {
    #[at("/")]
    Dashboard,
    #[at("/login")]
    Login,
    #[at("/recuperar-clave")]
    ForgotPassword,
    #[at("/restablecer-clave/:token")]
    ResetPassword { token: String },
    #[at("/cambiar-clave")]
    ForcedPasswordChange,
    #[at("/registro")]
    Register,
    #[at("/reportes/ventas-diarias")]
    DailyReport,
    #[at("/perfil")]
    Profile,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl MainRoute {
    /// Reachable without a session.
    pub fn is_public(&self) -> bool {
        matches!(
            self,
            Self::Login | Self::ForgotPassword | Self::ResetPassword { .. }
        )
    }

    /// Translation key prefix for navigation entries.
    pub fn nav_key(&self) -> &'static str {
        match self {
            Self::Dashboard => "nav.dashboard",
            Self::Login => "nav.login",
            Self::ForgotPassword => "nav.forgot_password",
            Self::ResetPassword { .. } => "nav.reset_password",
            Self::ForcedPasswordChange => "nav.forced_password_change",
            Self::Register => "nav.register",
            Self::DailyReport => "nav.daily_report",
            Self::Profile => "nav.profile",
            Self::NotFound => "nav.not_found",
        }
    }

    /// Font Awesome icon for navigation entries.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Dashboard => "gauge",
            Self::DailyReport => "chart-column",
            Self::Profile => "user-gear",
            Self::Register => "user-plus",
            _ => "circle",
        }
    }
}

/// Outcome of checking a route against the session.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteAccess {
    Allow,
    Redirect(MainRoute),
}

/// Decide whether `route` may render for `state`.
///
/// Anonymous users only reach public pages. A user holding a temporary
/// password is held on the forced change page. Registration is for admins.
pub fn route_access(route: &MainRoute, state: &AppState) -> RouteAccess {
    use RouteAccess::{Allow, Redirect};

    if !state.is_authenticated() {
        return if route.is_public() || *route == MainRoute::NotFound {
            Allow
        } else {
            Redirect(MainRoute::Login)
        };
    }
    if state.must_change_password() {
        return if *route == MainRoute::ForcedPasswordChange {
            Allow
        } else {
            Redirect(MainRoute::ForcedPasswordChange)
        };
    }
    match route {
        route if route.is_public() => Redirect(MainRoute::Dashboard),
        MainRoute::ForcedPasswordChange => Redirect(MainRoute::Dashboard),
        MainRoute::Register if !state.is_admin() => Redirect(MainRoute::Dashboard),
        _ => Allow,
    }
}

/// Routes listed in the header for `state`.
pub fn nav_routes(state: &AppState) -> Vec<MainRoute> {
    MainRoute::iter()
        .filter(|route| {
            matches!(
                route,
                MainRoute::Dashboard | MainRoute::DailyReport | MainRoute::Profile
            ) || (*route == MainRoute::Register && state.is_admin())
        })
        .collect()
}

#[derive(Properties, PartialEq)]
pub struct MainRouteViewProps {
    pub route: MainRoute,
}

#[function_component(MainRouteView)]
fn main_route_view(props: &MainRouteViewProps) -> Html {
    let state = use_store_value::<AppState>();

    if let RouteAccess::Redirect(to) = route_access(&props.route, &state) {
        log::debug!("redirecting {:?} to {to:?}", props.route);
        return html! { <Redirect<MainRoute> to={to} /> };
    }

    let current_route = props.route.clone();
    match props.route.clone() {
        MainRoute::Login => html! { <LoginPage /> },
        MainRoute::ForgotPassword => html! { <ForgotPasswordPage /> },
        MainRoute::ResetPassword { token } => html! { <ResetPasswordPage {token} /> },
        MainRoute::ForcedPasswordChange => html! { <ForcedPasswordChangePage /> },
        MainRoute::Dashboard => html! {
            <Layout {current_route}><DashboardPage /></Layout>
        },
        MainRoute::Register => html! {
            <Layout {current_route}><RegisterPage /></Layout>
        },
        MainRoute::DailyReport => html! {
            <Layout {current_route}><DailyReportPage /></Layout>
        },
        MainRoute::Profile => html! {
            <Layout {current_route}><ProfilePage /></Layout>
        },
        MainRoute::NotFound if state.is_authenticated() => html! {
            <Layout {current_route}><ErrorPage /></Layout>
        },
        MainRoute::NotFound => html! { <ErrorPage /> },
    }
}

/// Switch function for the main routes.
pub fn switch(route: MainRoute) -> Html {
    log::debug!("switching to route: {route:?}");
    html! { <MainRouteView {route} /> }
}
