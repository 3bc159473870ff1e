//! # Access Policy
//!
//! Role checks, navigation selection and the route guard decision.
//!
//! ## Permission Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Role Permissions                                │
//! │                                                                         │
//! │  Action           admin  manager  staff  client  viewer  contractor  ?  │
//! │  ───────────────  ─────  ───────  ─────  ──────  ──────  ──────────  ─  │
//! │  AdminArea          ✓                                                   │
//! │  EditProject        ✓       ✓                                           │
//! │  ViewBilling        ✓       ✓                                           │
//! │  CreateInvoice      ✓       ✓                                           │
//! │  Approve            ✓       ✓                                           │
//! │  UploadFiles        ✓       ✓       ✓      ✓                         ✓  │
//! │  ReplyTickets       ✓       ✓       ✓      ✓                         ✓  │
//! │                                                                         │
//! │  ? = any other role string (fail-closed for privileged rows)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Route Guard
//! ```text
//!   loading ─────────────────────────────▶ Pending
//!   !authenticated ──────────────────────▶ DenyRedirect (login)
//!   required roles ∌ current role ───────▶ DenyForbidden
//!   otherwise ───────────────────────────▶ Allow
//! ```
//!
//! Every function here is pure. The caller passes the role it read from the
//! user profile; nothing is looked up from ambient state.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::config::NavigationSettings;

// =============================================================================
// Role
// =============================================================================

/// Role attribute from a user profile.
///
/// Unknown strings are kept as [`Role::Other`] rather than rejected so a
/// profile with an unexpected role still loads; it just gets no privileges.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Manager,
    Staff,
    Client,
    Viewer,
    /// Listed in some profiles; permissions match `Viewer`.
    Contractor,
    Other(String),
}

impl Role {
    /// Parses a profile role string. Matching is exact: `"Admin"` is not `admin`.
    pub fn parse(value: &str) -> Role {
        match value {
            "admin" => Role::Admin,
            "manager" => Role::Manager,
            "staff" => Role::Staff,
            "client" => Role::Client,
            "viewer" => Role::Viewer,
            "contractor" => Role::Contractor,
            other => {
                debug!(role = %other, "unrecognized role, treating as unprivileged");
                Role::Other(other.to_string())
            }
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Staff => "staff",
            Role::Client => "client",
            Role::Viewer => "viewer",
            Role::Contractor => "contractor",
            Role::Other(s) => s,
        }
    }

    /// True when the role string contains `client` (`client`, `client-admin`, ...).
    pub fn is_client_like(&self) -> bool {
        self.as_str().contains("client")
    }

    /// True when the role string contains `admin`. Used for menu shortcuts only.
    pub fn is_admin_like(&self) -> bool {
        self.as_str().contains("admin")
    }

    fn is_admin_or_manager(&self) -> bool {
        matches!(self, Role::Admin | Role::Manager)
    }
}

impl FromStr for Role {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Role::parse(s))
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Role::parse(&value)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Permissions
// =============================================================================

/// Something a signed-in user may try to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    AdminArea,
    EditProject,
    ViewBilling,
    CreateInvoice,
    Approve,
    UploadFiles,
    ReplyTickets,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::AdminArea,
        Action::EditProject,
        Action::ViewBilling,
        Action::CreateInvoice,
        Action::Approve,
        Action::UploadFiles,
        Action::ReplyTickets,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::AdminArea => "admin_area",
            Action::EditProject => "edit_project",
            Action::ViewBilling => "view_billing",
            Action::CreateInvoice => "create_invoice",
            Action::Approve => "approve",
            Action::UploadFiles => "upload_files",
            Action::ReplyTickets => "reply_tickets",
        }
    }
}

/// The permission table. Privileged rows fail closed, the upload and reply
/// rows fail open.
pub fn is_allowed(role: &Role, action: Action) -> bool {
    match action {
        Action::AdminArea => *role == Role::Admin,
        Action::EditProject | Action::ViewBilling | Action::CreateInvoice | Action::Approve => {
            role.is_admin_or_manager()
        }
        Action::UploadFiles | Action::ReplyTickets => {
            !matches!(role, Role::Viewer | Role::Contractor)
        }
    }
}

pub fn is_admin(role: &Role) -> bool {
    is_allowed(role, Action::AdminArea)
}

pub fn can_edit_project(role: &Role) -> bool {
    is_allowed(role, Action::EditProject)
}

pub fn can_view_billing(role: &Role) -> bool {
    is_allowed(role, Action::ViewBilling)
}

pub fn can_create_invoice(role: &Role) -> bool {
    is_allowed(role, Action::CreateInvoice)
}

pub fn can_upload_files(role: &Role) -> bool {
    is_allowed(role, Action::UploadFiles)
}

pub fn can_reply_tickets(role: &Role) -> bool {
    is_allowed(role, Action::ReplyTickets)
}

/// Approving milestones and deliverables.
pub fn can_approve(role: &Role) -> bool {
    is_allowed(role, Action::Approve)
}

// =============================================================================
// Navigation
// =============================================================================

/// One navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NavItem {
    pub label: String,
    pub target: String,
    /// Highlight only on an exact path match.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub exact: bool,
}

impl NavItem {
    fn new(label: &str, target: String) -> Self {
        Self {
            label: label.to_string(),
            target,
            exact: false,
        }
    }

    fn exact(mut self) -> Self {
        self.exact = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavSet {
    Admin,
    Client,
    Public,
}

/// True when `path` is `prefix` itself or below it. `/application` is not
/// under `/app`.
fn is_under(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return path.starts_with('/');
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Picks the navigation set for a page.
///
/// The admin area wins over the client area; a client-like role only
/// selects the client set on pages outside both areas.
pub fn nav_set_for(
    role: Option<&Role>,
    path: &str,
    authenticated: bool,
    settings: &NavigationSettings,
) -> NavSet {
    if is_under(path, &settings.admin_prefix) {
        return NavSet::Admin;
    }
    if is_under(path, &settings.client_prefix) {
        return NavSet::Client;
    }
    if authenticated && role.is_some_and(Role::is_client_like) {
        return NavSet::Client;
    }
    NavSet::Public
}

/// Returns the ordered navigation entries for a page.
///
/// ```rust
/// use devnetiks_core::access::{navigation_for, Role};
/// use devnetiks_core::config::NavigationSettings;
///
/// let nav = navigation_for(None, "/", false, &NavigationSettings::default());
/// let labels: Vec<_> = nav.iter().map(|n| n.label.as_str()).collect();
/// assert_eq!(labels, ["Start a Project", "Log in"]);
/// ```
pub fn navigation_for(
    role: Option<&Role>,
    path: &str,
    authenticated: bool,
    settings: &NavigationSettings,
) -> Vec<NavItem> {
    match nav_set_for(role, path, authenticated, settings) {
        NavSet::Admin => vec![
            NavItem::new("Projects", settings.admin_path("projects")),
            NavItem::new("Organizations", settings.admin_path("organizations")),
            NavItem::new("Invoices", settings.admin_path("invoices")),
            NavItem::new("Dashboard", settings.admin_path("dashboard")),
        ],
        NavSet::Client => vec![
            NavItem::new("Overview", settings.client_path("")).exact(),
            NavItem::new("Organization", settings.client_path("organization")),
        ],
        NavSet::Public => {
            let mut items = vec![NavItem::new("Start a Project", settings.start_path.clone())];
            if !authenticated {
                items.push(NavItem::new("Log in", settings.login_path.clone()));
            }
            items
        }
    }
}

/// Where "My Dashboard" points for this user.
pub fn dashboard_target(
    role: Option<&Role>,
    path: &str,
    authenticated: bool,
    settings: &NavigationSettings,
) -> String {
    if !authenticated {
        return settings.login_path.clone();
    }
    let client_like = role.is_some_and(Role::is_client_like);
    if client_like && !is_under(path, &settings.admin_prefix) {
        return settings.client_path("");
    }
    settings.admin_path("projects")
}

/// Entries of the signed-in user's account menu. Empty when signed out.
pub fn account_menu_for(
    role: Option<&Role>,
    path: &str,
    authenticated: bool,
    settings: &NavigationSettings,
) -> Vec<NavItem> {
    if !authenticated {
        return Vec::new();
    }
    let mut items = vec![NavItem::new(
        "My Dashboard",
        dashboard_target(role, path, authenticated, settings),
    )];
    if role.is_some_and(Role::is_admin_like) {
        items.push(NavItem::new("New Invoice", settings.admin_path("invoices/new")));
    }
    if role.is_some_and(Role::is_client_like) {
        items.push(NavItem::new("My Organization", settings.client_path("organization")));
    }
    items
}

// =============================================================================
// Route Guard
// =============================================================================

/// Auth state at the moment a guarded route renders.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuardInput<'a> {
    pub is_authenticated: bool,
    pub loading: bool,
    /// `None` (or empty) means any signed-in user.
    pub required_roles: Option<&'a [Role]>,
    pub current_role: Option<&'a Role>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum GuardOutcome {
    /// Auth state still loading; render a placeholder.
    Pending,
    Allow,
    /// Not signed in; send to the login page.
    DenyRedirect,
    /// Signed in without a required role.
    DenyForbidden,
}

impl GuardOutcome {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardOutcome::Allow)
    }
}

/// Decides what a guarded route should do. Evaluated from scratch on every
/// auth state change.
pub fn guard_route(input: GuardInput<'_>) -> GuardOutcome {
    if input.loading {
        return GuardOutcome::Pending;
    }
    if !input.is_authenticated {
        return GuardOutcome::DenyRedirect;
    }
    match input.required_roles {
        Some(required) if !required.is_empty() => match input.current_role {
            Some(role) if required.contains(role) => GuardOutcome::Allow,
            _ => GuardOutcome::DenyForbidden,
        },
        _ => GuardOutcome::Allow,
    }
}

/// Redirect target for a guard outcome, if any.
pub fn redirect_target(outcome: GuardOutcome, settings: &NavigationSettings) -> Option<&str> {
    match outcome {
        GuardOutcome::DenyRedirect => Some(settings.login_path.as_str()),
        _ => None,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn role(s: &str) -> Role {
        Role::parse(s)
    }

    fn targets(items: &[NavItem]) -> Vec<&str> {
        items.iter().map(|n| n.target.as_str()).collect()
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!(role("admin"), Role::Admin);
        assert_eq!(role("contractor"), Role::Contractor);
        assert_eq!(role("Admin"), Role::Other("Admin".to_string()));
        assert_eq!("staff".parse::<Role>().unwrap(), Role::Staff);
        assert_eq!(String::from(role("bogus-role")), "bogus-role");
    }

    #[test]
    fn test_role_serde() {
        let json = serde_json::to_string(&Role::Manager).unwrap();
        assert_eq!(json, "\"manager\"");
        let parsed: Role = serde_json::from_str("\"client-admin\"").unwrap();
        assert_eq!(parsed, Role::Other("client-admin".to_string()));
        assert!(parsed.is_client_like());
        assert!(parsed.is_admin_like());
    }

    #[test]
    fn test_can_edit_project() {
        assert!(can_edit_project(&role("admin")));
        assert!(can_edit_project(&role("manager")));
        assert!(!can_edit_project(&role("client")));
        assert!(!can_edit_project(&role("bogus-role")));
    }

    #[test]
    fn test_admin_only_for_admin() {
        assert!(is_admin(&Role::Admin));
        assert!(!is_admin(&Role::Manager));
        assert!(!is_admin(&role("superadmin")));
    }

    #[test]
    fn test_billing_and_invoices() {
        for r in [Role::Admin, Role::Manager] {
            assert!(can_view_billing(&r));
            assert!(can_create_invoice(&r));
            assert!(can_approve(&r));
        }
        for r in [Role::Staff, Role::Client, Role::Viewer, Role::Contractor] {
            assert!(!can_view_billing(&r));
            assert!(!can_create_invoice(&r));
            assert!(!can_approve(&r));
        }
    }

    #[test]
    fn test_upload_and_reply_fail_open() {
        assert!(!can_upload_files(&role("viewer")));
        assert!(can_upload_files(&role("client")));
        assert!(can_upload_files(&role("anything-else")));
        assert!(!can_reply_tickets(&Role::Viewer));
        assert!(can_reply_tickets(&Role::Staff));
    }

    #[test]
    fn test_contractor_matches_viewer() {
        for action in Action::ALL {
            assert_eq!(
                is_allowed(&Role::Contractor, action),
                is_allowed(&Role::Viewer, action),
                "{:?}",
                action
            );
        }
    }

    #[test]
    fn test_navigation_sets() {
        let s = NavigationSettings::default();
        let admin = navigation_for(Some(&Role::Client), "/app/projects/42", true, &s);
        assert_eq!(
            targets(&admin),
            ["/app/projects", "/app/organizations", "/app/invoices", "/app/dashboard"]
        );

        let client = navigation_for(Some(&Role::Admin), "/client/organization", true, &s);
        assert_eq!(targets(&client), ["/client", "/client/organization"]);
        assert!(client[0].exact);

        let public = navigation_for(Some(&Role::Staff), "/", true, &s);
        assert_eq!(targets(&public), ["/start"]);
    }

    #[test]
    fn test_client_role_prefers_client_nav_outside_areas() {
        let s = NavigationSettings::default();
        assert_eq!(nav_set_for(Some(&Role::Client), "/start", true, &s), NavSet::Client);
        // Signed-out visitors never get the client set by role.
        assert_eq!(nav_set_for(Some(&Role::Client), "/start", false, &s), NavSet::Public);
        assert_eq!(nav_set_for(None, "/start", true, &s), NavSet::Public);
    }

    #[test]
    fn test_prefix_match_is_segment_aware() {
        let s = NavigationSettings::default();
        assert_eq!(nav_set_for(None, "/app", true, &s), NavSet::Admin);
        assert_eq!(nav_set_for(None, "/application", true, &s), NavSet::Public);
        assert_eq!(nav_set_for(None, "/clients", true, &s), NavSet::Public);
    }

    #[test]
    fn test_custom_prefixes() {
        let s = NavigationSettings {
            admin_prefix: "/admin".into(),
            client_prefix: "/portal".into(),
            ..NavigationSettings::default()
        };
        let nav = navigation_for(None, "/portal", true, &s);
        assert_eq!(targets(&nav), ["/portal", "/portal/organization"]);
        assert_eq!(nav_set_for(None, "/app", true, &s), NavSet::Public);
    }

    #[test]
    fn test_dashboard_target() {
        let s = NavigationSettings::default();
        assert_eq!(dashboard_target(Some(&Role::Admin), "/", false, &s), "/login");
        assert_eq!(dashboard_target(Some(&Role::Client), "/", true, &s), "/client");
        assert_eq!(
            dashboard_target(Some(&Role::Client), "/app/invoices", true, &s),
            "/app/projects"
        );
        assert_eq!(dashboard_target(Some(&Role::Staff), "/", true, &s), "/app/projects");
    }

    #[test]
    fn test_account_menu() {
        let s = NavigationSettings::default();
        assert!(account_menu_for(Some(&Role::Admin), "/", false, &s).is_empty());

        let admin = account_menu_for(Some(&Role::Admin), "/", true, &s);
        assert_eq!(targets(&admin), ["/app/projects", "/app/invoices/new"]);

        let client = account_menu_for(Some(&Role::Client), "/", true, &s);
        assert_eq!(targets(&client), ["/client", "/client/organization"]);
    }

    #[test]
    fn test_guard_loading_is_pending() {
        let required = [Role::Admin];
        for authenticated in [true, false] {
            let outcome = guard_route(GuardInput {
                is_authenticated: authenticated,
                loading: true,
                required_roles: Some(&required[..]),
                current_role: None,
            });
            assert_eq!(outcome, GuardOutcome::Pending);
        }
    }

    #[test]
    fn test_guard_decision_table() {
        let required = [Role::Admin];
        let staff = Role::Staff;
        let admin = Role::Admin;

        let signed_out = GuardInput::default();
        assert_eq!(guard_route(signed_out), GuardOutcome::DenyRedirect);

        let as_staff = GuardInput {
            is_authenticated: true,
            loading: false,
            required_roles: Some(&required[..]),
            current_role: Some(&staff),
        };
        assert_eq!(guard_route(as_staff), GuardOutcome::DenyForbidden);

        let as_admin = GuardInput {
            current_role: Some(&admin),
            ..as_staff
        };
        assert_eq!(guard_route(as_admin), GuardOutcome::Allow);
    }

    #[test]
    fn test_guard_without_requirements_allows() {
        let staff = Role::Staff;
        let input = GuardInput {
            is_authenticated: true,
            current_role: Some(&staff),
            ..GuardInput::default()
        };
        assert_eq!(guard_route(input), GuardOutcome::Allow);
        assert_eq!(
            guard_route(GuardInput {
                required_roles: Some(&[][..]),
                ..input
            }),
            GuardOutcome::Allow
        );
    }

    #[test]
    fn test_guard_missing_role_is_forbidden() {
        let required = [Role::Admin];
        let input = GuardInput {
            is_authenticated: true,
            loading: false,
            required_roles: Some(&required[..]),
            current_role: None,
        };
        assert_eq!(guard_route(input), GuardOutcome::DenyForbidden);
    }

    #[test]
    fn test_redirect_target() {
        let s = NavigationSettings::default();
        assert_eq!(redirect_target(GuardOutcome::DenyRedirect, &s), Some("/login"));
        assert_eq!(redirect_target(GuardOutcome::DenyForbidden, &s), None);
        assert!(GuardOutcome::Allow.is_allowed());
    }
}
