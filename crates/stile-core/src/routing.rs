//! Route table and redirect-aware navigation.
//!
//! The navigator models the piece of the dashboard that decides where the
//! user ends up: protected routes require an unexpired session, a bounced
//! navigation records where the user wanted to go, and a successful sign-in
//! consumes that recorded origin (falling back to the configured default).

use crate::config::Config;
use crate::session::StoredSession;

/// Route users are bounced to when a protected route needs a session.
pub const SIGN_IN_ROUTE: &str = "/sign-in";

/// Who may enter a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Reachable without a session.
    Public,
    /// Requires an unexpired session.
    Protected,
}

/// One navigable route of the dashboard.
#[derive(Debug, Clone)]
pub struct Route {
    pub name: &'static str,
    pub path: &'static str,
    pub access: Access,
}

const fn public(name: &'static str, path: &'static str) -> Route {
    Route {
        name,
        path,
        access: Access::Public,
    }
}

const fn protected(name: &'static str, path: &'static str) -> Route {
    Route {
        name,
        path,
        access: Access::Protected,
    }
}

/// Everything the dashboard links to, in sidebar order.
const BUILTIN_ROUTES: &[Route] = &[
    public("Sign in", SIGN_IN_ROUTE),
    protected("Dashboard", "/dashboard"),
    protected("Buttons", "/general/buttons"),
    protected("Icons", "/general/icons"),
    protected("Paper", "/general/paper"),
    protected("Typography", "/general/typography"),
    protected("Dividers", "/layout/dividers"),
    protected("Grid", "/layout/grid"),
    protected("Spaces", "/layout/spaces"),
    protected("Breadcrumbs", "/navigation/breadcrumbs"),
    protected("Dropdown", "/navigation/dropdown"),
    protected("Drawers", "/navigation/drawers"),
    protected("Tabs", "/navigation/tabs"),
    protected("Steppers", "/navigation/steppers"),
    protected("Tours", "/navigation/tours"),
    protected("Text fields", "/data-entry/text-fields"),
    protected("Checkboxes", "/data-entry/checkboxes"),
    protected("Radio buttons", "/data-entry/radio-buttons"),
    protected("Switches", "/data-entry/switches"),
    protected("Single selects", "/data-entry/selects/single-selects"),
    protected("Multiple selects", "/data-entry/selects/multiple-selects"),
    protected("Textareas", "/data-entry/textareas"),
    protected("Date pickers", "/data-entry/pickers/date-pickers"),
    protected("Month pickers", "/data-entry/pickers/month-pickers"),
    protected("Year pickers", "/data-entry/pickers/year-pickers"),
    protected("Time pickers", "/data-entry/pickers/time-pickers"),
    protected("Autocompletes", "/data-entry/autocompletes"),
    protected("File inputs", "/data-entry/file-inputs"),
    protected("Form validation", "/data-entry/form-validation"),
    protected("Expansion Panels", "/data-display/expansion-panels"),
    protected("Data tables", "/data-display/data-tables"),
    protected("Data iterators", "/data-display/data-iterators"),
    protected("Tabular forms", "/data-display/tabular-forms"),
    protected("Tabular form groups", "/data-display/tabular-form-groups"),
    protected("Calendar", "/data-display/calendar"),
    protected("Dialogs", "/feedback/dialogs"),
    protected("Progress", "/feedback/progress"),
    protected("Skeletons", "/feedback/skeletons"),
    protected("CRUD operations", "/state-management/crud-operations"),
    protected("Line charts", "/charts/line-charts"),
    protected("Area charts", "/charts/area-charts"),
    protected("Bar charts", "/charts/bar-charts"),
    protected("Pie charts", "/charts/pie-charts"),
    protected("Bubble charts", "/charts/bubble-charts"),
    protected("Combinations", "/charts/combinations"),
    protected("Fetch", "/network/fetch"),
    protected("WebSocket", "/network/websocket"),
    protected("EventSource", "/network/eventsource"),
];

/// Lookup table over the known routes.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: &'static [Route],
}

impl RouteTable {
    /// Returns the table of built-in dashboard routes.
    pub fn builtin() -> Self {
        Self {
            routes: BUILTIN_ROUTES,
        }
    }

    /// All known routes, in display order.
    pub fn routes(&self) -> &[Route] {
        self.routes
    }

    /// Finds a route by its exact path.
    pub fn find(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.path == path)
    }

    /// Access level for a path. Paths missing from the table are protected.
    pub fn access(&self, path: &str) -> Access {
        self.find(path).map_or(Access::Protected, |route| route.access)
    }
}

/// Verdict of a guarded navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardVerdict {
    /// The navigation went through.
    Allowed,
    /// The user was sent to sign-in; the target was recorded.
    Bounced,
}

/// Tracks the current location and the route a bounced user wanted.
#[derive(Debug, Clone)]
pub struct Navigator {
    table: RouteTable,
    default_route: String,
    current: String,
    redirect_from: Option<String>,
}

impl Navigator {
    /// Creates a navigator positioned on the sign-in route.
    pub fn new(table: RouteTable, default_route: impl Into<String>) -> Self {
        Self {
            table,
            default_route: default_route.into(),
            current: SIGN_IN_ROUTE.to_string(),
            redirect_from: None,
        }
    }

    /// Creates a navigator with the built-in table and the configured default.
    pub fn from_config(config: &Config) -> Self {
        Self::new(RouteTable::builtin(), config.default_route.clone())
    }

    /// The route the user is currently on.
    pub fn current(&self) -> &str {
        &self.current
    }

    /// The recorded origin route, if a bounce happened.
    pub fn redirect_from(&self) -> Option<&str> {
        self.redirect_from.as_deref()
    }

    /// Records where the user was headed before landing on sign-in.
    pub fn record_redirect_from(&mut self, path: impl Into<String>) {
        self.redirect_from = Some(path.into());
    }

    /// Requests navigation to `target`, enforcing the session guard.
    ///
    /// Public routes always pass. Protected routes pass only with an
    /// unexpired session; otherwise the target is recorded and the user is
    /// bounced to sign-in.
    pub fn request(&mut self, target: &str, session: Option<&StoredSession>) -> GuardVerdict {
        let authorized = session.is_some_and(|s| !s.is_expired());

        match self.table.access(target) {
            Access::Public => {
                self.navigate(target);
                GuardVerdict::Allowed
            }
            Access::Protected if authorized => {
                self.navigate(target);
                GuardVerdict::Allowed
            }
            Access::Protected => {
                tracing::debug!(%target, "session required, bouncing to sign-in");
                self.redirect_from = Some(target.to_string());
                self.navigate(SIGN_IN_ROUTE);
                GuardVerdict::Bounced
            }
        }
    }

    /// Resolves where a fresh sign-in should land.
    ///
    /// Consumes the recorded origin route; later sign-ins fall back to the
    /// default route.
    pub fn post_sign_in_destination(&mut self) -> String {
        self.redirect_from
            .take()
            .unwrap_or_else(|| self.default_route.clone())
    }

    /// Moves to a route. Paths missing from the table are allowed through
    /// with a warning so deep links do not dead-end.
    pub fn navigate(&mut self, to: &str) {
        if self.table.find(to).is_none() {
            tracing::warn!(%to, "navigating to a route missing from the route table");
        }
        tracing::debug!(from = %self.current, %to, "navigate");
        self.current = to.to_string();
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    fn valid_session() -> StoredSession {
        StoredSession::issue("a-perfectly-valid-token")
    }

    fn expired_session() -> StoredSession {
        StoredSession::issue_at("a-long-expired-token", Utc::now() - Duration::hours(13))
    }

    /// Route lookup: sign-in is public, dashboard pages are protected.
    #[test]
    fn test_route_table_access() {
        let table = RouteTable::builtin();

        assert_eq!(table.access("/sign-in"), Access::Public);
        assert_eq!(table.access("/dashboard"), Access::Protected);
        assert_eq!(table.access("/charts/line-charts"), Access::Protected);
    }

    /// Unknown paths default to protected.
    #[test]
    fn test_unknown_route_is_protected() {
        let table = RouteTable::builtin();

        assert!(table.find("/made-up").is_none());
        assert_eq!(table.access("/made-up"), Access::Protected);
    }

    /// Public routes pass without any session.
    #[test]
    fn test_guard_allows_public_without_session() {
        let mut nav = Navigator::new(RouteTable::builtin(), "/dashboard");

        let verdict = nav.request("/sign-in", None);

        assert_eq!(verdict, GuardVerdict::Allowed);
        assert_eq!(nav.current(), "/sign-in");
    }

    /// Protected routes without a session bounce and record the origin.
    #[test]
    fn test_guard_bounces_and_records_origin() {
        let mut nav = Navigator::new(RouteTable::builtin(), "/dashboard");

        let verdict = nav.request("/network/fetch", None);

        assert_eq!(verdict, GuardVerdict::Bounced);
        assert_eq!(nav.current(), "/sign-in");
        assert_eq!(nav.redirect_from(), Some("/network/fetch"));
    }

    /// A valid session opens protected routes.
    #[test]
    fn test_guard_allows_protected_with_session() {
        let mut nav = Navigator::new(RouteTable::builtin(), "/dashboard");

        let verdict = nav.request("/dashboard", Some(&valid_session()));

        assert_eq!(verdict, GuardVerdict::Allowed);
        assert_eq!(nav.current(), "/dashboard");
    }

    /// An expired session counts as no session.
    #[test]
    fn test_guard_bounces_expired_session() {
        let mut nav = Navigator::new(RouteTable::builtin(), "/dashboard");

        let verdict = nav.request("/dashboard", Some(&expired_session()));

        assert_eq!(verdict, GuardVerdict::Bounced);
        assert_eq!(nav.redirect_from(), Some("/dashboard"));
    }

    /// The recorded origin is consumed by the first resolution.
    #[test]
    fn test_post_sign_in_destination_consumes_origin() {
        let mut nav = Navigator::new(RouteTable::builtin(), "/dashboard");
        nav.request("/feedback/dialogs", None);

        assert_eq!(nav.post_sign_in_destination(), "/feedback/dialogs");
        assert_eq!(nav.post_sign_in_destination(), "/dashboard");
    }

    /// Without a bounce, sign-in lands on the configured default.
    #[test]
    fn test_post_sign_in_destination_default() {
        let mut nav = Navigator::new(RouteTable::builtin(), "/general/buttons");

        assert_eq!(nav.post_sign_in_destination(), "/general/buttons");
    }

    /// Unknown paths still navigate when a session is present.
    #[test]
    fn test_unknown_route_navigates_with_session() {
        let mut nav = Navigator::new(RouteTable::builtin(), "/dashboard");

        let verdict = nav.request("/not-in-the-table", Some(&valid_session()));

        assert_eq!(verdict, GuardVerdict::Allowed);
        assert_eq!(nav.current(), "/not-in-the-table");
    }
}
