//! Role-gated routing.
//!
//! Every screen (or CLI command) maps to a [`Route`]. Public routes are open to
//! anyone; protected routes need a session; admin routes need an admin session.
//! Unauthenticated users are sent to [`Route::Auth`], authenticated non-admins
//! on an admin route are sent to [`Route::Dashboard`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::AppRole;
use crate::identity::SessionContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Home,
    Auth,
    PrivacyPolicy,
    Dashboard,
    Parcels,
    NewParcel,
    EditParcel,
    ParcelDetails,
    Search,
    AccessLogs,
    MyData,
}

/// Who may open a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Admin,
}

impl Route {
    #[must_use]
    pub const fn access(self) -> Access {
        match self {
            Self::Home | Self::Auth | Self::PrivacyPolicy => Access::Public,
            Self::Dashboard | Self::Parcels | Self::ParcelDetails | Self::Search | Self::MyData => {
                Access::Authenticated
            }
            Self::NewParcel | Self::EditParcel | Self::AccessLogs => Access::Admin,
        }
    }

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Auth => "/auth",
            Self::PrivacyPolicy => "/politica-privacidade",
            Self::Dashboard => "/dashboard",
            Self::Parcels => "/lotes",
            Self::NewParcel => "/lote/novo",
            Self::EditParcel => "/lote/:id",
            Self::ParcelDetails => "/lote-detalhes/:id",
            Self::Search => "/buscar",
            Self::AccessLogs => "/logs",
            Self::MyData => "/meus-dados",
        }
    }
}

/// Outcome of [`authorize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RouteDecision {
    Allow,
    RedirectToAuth,
    RedirectToDashboard,
}

impl RouteDecision {
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

#[must_use]
pub fn authorize(route: Route, session: Option<&SessionContext>) -> RouteDecision {
    match (route.access(), session) {
        (Access::Public, _) => RouteDecision::Allow,
        (_, None) => RouteDecision::RedirectToAuth,
        (Access::Authenticated, Some(_)) => RouteDecision::Allow,
        (Access::Admin, Some(ctx)) if ctx.is_admin() => RouteDecision::Allow,
        (Access::Admin, Some(_)) => RouteDecision::RedirectToDashboard,
    }
}

/// A sidebar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
pub struct MenuItem {
    pub title: &'static str,
    pub route: Route,
}

const MENU: &[(MenuItem, bool)] = &[
    (MenuItem { title: "Dashboard", route: Route::Dashboard }, false),
    (MenuItem { title: "Lotes", route: Route::Parcels }, false),
    (MenuItem { title: "Buscar", route: Route::Search }, false),
    (MenuItem { title: "Meus Dados", route: Route::MyData }, false),
    (MenuItem { title: "Logs de Acesso", route: Route::AccessLogs }, true),
];

/// Sidebar entries visible to `role`, in display order.
#[must_use]
pub fn menu_for(role: AppRole) -> Vec<MenuItem> {
    MENU.iter()
        .filter(|(_, admin_only)| !admin_only || role.is_admin())
        .map(|(item, _)| *item)
        .collect()
}
