//! Tests for the routing system
//!
//! Validates route paths, the session guards and the header navigation.

#[cfg(test)]
mod tests {
    use crate::models::app_state::AppState;
    use crate::routes::{MainRoute, RouteAccess, nav_routes, route_access};
    use shared::models::SessionUser;
    use std::rc::Rc;
    use yew_router::Routable;

    fn signed_in(role: &str, must_change_password: bool) -> AppState {
        AppState {
            ready: true,
            user: Some(Rc::new(SessionUser {
                id: 3,
                name: "Luis Andrade".into(),
                email: "luis@example.com".into(),
                role: role.into(),
                avatar: None,
                must_change_password,
            })),
        }
    }

    /// Tests the paths the backend e-mails and links point at
    #[test]
    fn test_route_paths() {
        assert_eq!(MainRoute::Dashboard.to_path(), "/");
        assert_eq!(MainRoute::ForcedPasswordChange.to_path(), "/cambiar-clave");
        assert_eq!(
            MainRoute::ResetPassword {
                token: "abc123".into()
            }
            .to_path(),
            "/restablecer-clave/abc123"
        );
        assert_eq!(MainRoute::DailyReport.to_path(), "/reportes/ventas-diarias");
    }

    /// Tests that the reset token is parsed from the URL
    #[test]
    fn test_reset_token_is_recognized() {
        assert_eq!(
            MainRoute::recognize("/restablecer-clave/tok-987"),
            Some(MainRoute::ResetPassword {
                token: "tok-987".into()
            })
        );
    }

    /// Tests that anonymous users only reach public pages
    #[test]
    fn test_anonymous_access() {
        let state = AppState::default();
        assert_eq!(route_access(&MainRoute::Login, &state), RouteAccess::Allow);
        assert_eq!(
            route_access(&MainRoute::ForgotPassword, &state),
            RouteAccess::Allow
        );
        assert_eq!(
            route_access(&MainRoute::Dashboard, &state),
            RouteAccess::Redirect(MainRoute::Login)
        );
        assert_eq!(
            route_access(&MainRoute::ForcedPasswordChange, &state),
            RouteAccess::Redirect(MainRoute::Login)
        );
    }

    /// Tests that a temporary password pins the user to the forced change page
    #[test]
    fn test_forced_change_gate() {
        let state = signed_in("vendedor", true);
        assert_eq!(
            route_access(&MainRoute::ForcedPasswordChange, &state),
            RouteAccess::Allow
        );
        for route in [MainRoute::Dashboard, MainRoute::Profile, MainRoute::Login] {
            assert_eq!(
                route_access(&route, &state),
                RouteAccess::Redirect(MainRoute::ForcedPasswordChange)
            );
        }
    }

    /// Tests that signed-in users skip the public pages
    #[test]
    fn test_signed_in_access() {
        let state = signed_in("vendedor", false);
        assert_eq!(
            route_access(&MainRoute::Login, &state),
            RouteAccess::Redirect(MainRoute::Dashboard)
        );
        assert_eq!(
            route_access(&MainRoute::ForcedPasswordChange, &state),
            RouteAccess::Redirect(MainRoute::Dashboard)
        );
        assert_eq!(route_access(&MainRoute::DailyReport, &state), RouteAccess::Allow);
        assert_eq!(route_access(&MainRoute::NotFound, &state), RouteAccess::Allow);
    }

    /// Tests that registration is admin only
    #[test]
    fn test_register_requires_admin() {
        assert_eq!(
            route_access(&MainRoute::Register, &signed_in("bodeguero", false)),
            RouteAccess::Redirect(MainRoute::Dashboard)
        );
        assert_eq!(
            route_access(&MainRoute::Register, &signed_in("admin", false)),
            RouteAccess::Allow
        );
    }

    /// Tests the header navigation per role
    #[test]
    fn test_nav_routes() {
        let seller = nav_routes(&signed_in("vendedor", false));
        assert_eq!(
            seller,
            vec![MainRoute::Dashboard, MainRoute::DailyReport, MainRoute::Profile]
        );
        let admin = nav_routes(&signed_in("admin", false));
        assert!(admin.contains(&MainRoute::Register));
    }

    /// Tests that every route has a navigation key
    #[test]
    fn test_nav_keys() {
        assert_eq!(MainRoute::Profile.nav_key(), "nav.profile");
        assert!(MainRoute::NotFound.nav_key().starts_with("nav."));
    }
}
