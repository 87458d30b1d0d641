// =============================================================================
// Storedesk Web - Response Interceptor
// =============================================================================
// Every failed response passes through here before reaching its endpoint
// function. The interceptor only navigates; the failure is always handed back
// to the caller unchanged.
// =============================================================================

use std::sync::Arc;

use leptos::prelude::*;

use super::ApiError;
use crate::routes::NamedRoute;

/// Response header carrying an application error code.
pub const ERROR_CODE_HEADER: &str = "error-code";

/// `error-code` value sent when the logged-in account has no store yet.
pub const NO_STORE_ID: &str = "NO_STORE_ID";

/// Performs navigation on behalf of the interceptor.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: NamedRoute);
}

/// Hands redirects to the in-app router.
///
/// The interceptor runs outside any component, so the requested route is
/// parked in a signal; the router-side listener performs the navigation
/// without reloading the page.
#[derive(Clone, Copy)]
pub struct RouterNavigator {
    pending: RwSignal<Option<NamedRoute>>,
}

impl RouterNavigator {
    pub fn new() -> Self {
        Self {
            pending: RwSignal::new(None),
        }
    }

    /// Last route requested by the interceptor.
    pub fn pending(&self) -> RwSignal<Option<NamedRoute>> {
        self.pending
    }
}

impl Default for RouterNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for RouterNavigator {
    fn navigate(&self, route: NamedRoute) {
        self.pending.set(Some(route));
    }
}

/// Whether moving from `current_path` to `route` changes the page.
pub fn needs_redirect(current_path: &str, route: NamedRoute) -> bool {
    current_path.trim_end_matches('/') != route.path().trim_end_matches('/')
}

/// Redirect hook shared by every [`ApiClient`](super::ApiClient).
#[derive(Clone)]
pub struct RedirectInterceptor {
    navigator: Arc<dyn Navigator>,
}

impl RedirectInterceptor {
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self { navigator }
    }

    /// Decision table, first match wins:
    /// `error-code: NO_STORE_ID` → store registration, 401/403 → login.
    pub fn redirect_for(error: &ApiError) -> Option<NamedRoute> {
        if error.error_code() == Some(NO_STORE_ID) {
            return Some(NamedRoute::StoreRegister);
        }
        match error.status() {
            Some(401) | Some(403) => Some(NamedRoute::Login),
            _ => None,
        }
    }

    /// Navigate if the failure calls for it. Returns the route taken.
    pub fn inspect(&self, error: &ApiError) -> Option<NamedRoute> {
        let route = Self::redirect_for(error)?;
        log::warn!(
            "Redirecting to '{}' after failed request: {}",
            route.name(),
            error
        );
        self.navigator.navigate(route);
        Some(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingNavigator;
    use serde_json::Value;

    fn status_error(status: u16, error_code: Option<&str>) -> ApiError {
        ApiError::Status {
            status,
            error_code: error_code.map(str::to_string),
            body: Value::Null,
        }
    }

    #[test]
    fn missing_store_header_wins_over_status() {
        let error = status_error(403, Some(NO_STORE_ID));
        assert_eq!(
            RedirectInterceptor::redirect_for(&error),
            Some(NamedRoute::StoreRegister)
        );
    }

    #[test]
    fn unauthorized_and_forbidden_go_to_login() {
        assert_eq!(
            RedirectInterceptor::redirect_for(&status_error(401, None)),
            Some(NamedRoute::Login)
        );
        assert_eq!(
            RedirectInterceptor::redirect_for(&status_error(403, Some("OTHER"))),
            Some(NamedRoute::Login)
        );
    }

    #[test]
    fn other_failures_do_not_navigate() {
        let navigator = Arc::new(RecordingNavigator::default());
        let interceptor = RedirectInterceptor::new(navigator.clone());

        assert_eq!(interceptor.inspect(&status_error(500, None)), None);
        assert_eq!(
            interceptor.inspect(&ApiError::Network("offline".into())),
            None
        );
        // header values are compared case-sensitively
        assert_eq!(interceptor.inspect(&status_error(500, Some("no_store_id"))), None);
        assert!(navigator.visits().is_empty());
    }

    #[test]
    fn router_navigator_parks_the_route() {
        let navigator = RouterNavigator::new();
        let interceptor = RedirectInterceptor::new(Arc::new(navigator));

        assert_eq!(navigator.pending().get_untracked(), None);
        interceptor.inspect(&status_error(401, None));
        assert_eq!(navigator.pending().get_untracked(), Some(NamedRoute::Login));
    }

    #[test]
    fn no_redirect_onto_the_current_page() {
        assert!(!needs_redirect("/account/login", NamedRoute::Login));
        assert!(!needs_redirect("/account/login/", NamedRoute::Login));
        assert!(!needs_redirect("/", NamedRoute::Dashboard));
        assert!(needs_redirect("/menu", NamedRoute::Login));
        assert!(needs_redirect("/", NamedRoute::StoreRegister));
    }

    #[test]
    fn inspect_records_one_navigation() {
        let navigator = Arc::new(RecordingNavigator::default());
        let interceptor = RedirectInterceptor::new(navigator.clone());

        interceptor.inspect(&status_error(400, Some(NO_STORE_ID)));
        assert_eq!(navigator.visits(), vec![NamedRoute::StoreRegister]);
    }
}
