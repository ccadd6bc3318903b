//! Role-based access guards.
//!
//! Pure decision functions over a session snapshot. They are deterministic
//! and side-effect free; callers re-evaluate them after every session
//! change rather than caching a decision.

use super::user::Role;

/// Named navigation targets of the application surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Public sign-in page; also the target of the root path.
    Login,
    /// Admin home.
    Dashboard,
    /// Admin report list.
    Reports,
    /// Admin report detail.
    ReportDetail,
    /// Admin user directory.
    Users,
    /// Admin location directory.
    Locations,
    /// Admin export page.
    Export,
    /// Technician home.
    TechnicianDashboard,
    /// Technician's own report list.
    TechnicianReports,
    /// Technician's own report detail.
    TechnicianReportDetail,
    /// Technician profile page.
    TechnicianProfile,
    /// Technician submission form.
    TechnicianSubmitReport,
}

impl Route {
    /// Path pattern for the route.
    pub fn as_path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
            Self::Reports => "/reports",
            Self::ReportDetail => "/reports/:id",
            Self::Users => "/users",
            Self::Locations => "/locations",
            Self::Export => "/export",
            Self::TechnicianDashboard => "/technician",
            Self::TechnicianReports => "/technician/reports",
            Self::TechnicianReportDetail => "/technician/reports/:id",
            Self::TechnicianProfile => "/technician/profile",
            Self::TechnicianSubmitReport => "/technician/submit-report",
        }
    }

    /// Landing page for an authenticated role.
    pub fn home_for(role: Role) -> Self {
        match role {
            Role::Admin => Self::Dashboard,
            Role::Technician => Self::TechnicianDashboard,
        }
    }
}

/// Authorization scope required by a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteScope {
    /// Only reachable while signed out.
    Public,
    /// Requires an authenticated admin.
    Admin,
    /// Requires an authenticated technician.
    Technician,
}

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Render the guarded content.
    Allow,
    /// Navigate away instead.
    Redirect(Route),
}

/// General access predicate: session role against a required scope.
pub fn can_access(session: Option<Role>, scope: RouteScope) -> AccessDecision {
    match scope {
        RouteScope::Public => match session {
            None => AccessDecision::Allow,
            Some(role) => AccessDecision::Redirect(Route::home_for(role)),
        },
        RouteScope::Admin => match session {
            None => AccessDecision::Redirect(Route::Login),
            Some(Role::Admin) => AccessDecision::Allow,
            Some(Role::Technician) => AccessDecision::Redirect(Route::TechnicianDashboard),
        },
        RouteScope::Technician => match session {
            None => AccessDecision::Redirect(Route::Login),
            Some(Role::Technician) => AccessDecision::Allow,
            Some(Role::Admin) => AccessDecision::Redirect(Route::Dashboard),
        },
    }
}

/// Guard for routes only reachable while signed out.
pub fn public_only(session: Option<Role>) -> AccessDecision {
    can_access(session, RouteScope::Public)
}

/// Guard for admin-only routes.
pub fn admin_only(session: Option<Role>) -> AccessDecision {
    can_access(session, RouteScope::Admin)
}

/// Guard for technician-only routes.
pub fn technician_only(session: Option<Role>) -> AccessDecision {
    can_access(session, RouteScope::Technician)
}
