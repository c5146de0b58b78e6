use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use super::{
    guard::RouteGuard,
    platform::Platform,
    role::Role,
    table::{MOBILE_REQUIRED_ROUTE, WEB_REQUIRED_ROUTE},
};

/// NavKind
///
/// How the chrome renderer presents an item. Which chrome (bottom tabs,
/// drawer, sidebar, top nav) hosts the items is the renderer's choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum NavKind {
    Tab,
    Fab,
    Shortcut,
    Screen,
}

/// NavItem
///
/// A named navigation affordance. Items without a route are UI-only (for
/// example the crisis help button) and are filtered by role exclusions alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub id: &'static str,
    pub label: &'static str,
    pub route: Option<&'static str>,
    pub kind: NavKind,
}

const fn item(id: &'static str, label: &'static str, route: &'static str, kind: NavKind) -> NavItem {
    NavItem {
        id,
        label,
        route: Some(route),
        kind,
    }
}

/// The full navigation list, in display order.
pub const NAV_ITEMS: &[NavItem] = &[
    item("home", "Home", "/(tabs)", NavKind::Tab),
    item("forum", "Forum", "/(tabs)/forum", NavKind::Tab),
    item("chat", "Chat", "/(tabs)/chat", NavKind::Tab),
    item("resources", "Resources", "/(tabs)/resources", NavKind::Tab),
    item("profile", "Profile", "/(tabs)/profile", NavKind::Tab),
    item("compose", "New Post", "/create-post", NavKind::Fab),
    NavItem {
        id: "crisis-help",
        label: "Get Help Now",
        route: None,
        kind: NavKind::Shortcut,
    },
    item("notifications", "Notifications", "/notifications", NavKind::Shortcut),
    item("meetings", "Meetings", "/meetings", NavKind::Shortcut),
    item("check-in", "Check-in", "/check-in", NavKind::Shortcut),
    item("peer-educator", "Peer Educator", "/peer-educator/dashboard", NavKind::Shortcut),
    item("executive", "Executive", "/peer-educator/executive", NavKind::Shortcut),
    item("counselor", "Counselor", "/counselor/dashboard", NavKind::Shortcut),
    item("student-affairs", "Student Affairs", "/student-affairs/dashboard", NavKind::Shortcut),
    item("admin", "Admin", "/admin/dashboard", NavKind::Shortcut),
    item("settings", "Settings", "/settings", NavKind::Shortcut),
];

pub const WEB_REQUIRED_ITEM: NavItem = item("web-required", "Open on the web", WEB_REQUIRED_ROUTE, NavKind::Screen);
pub const MOBILE_REQUIRED_ITEM: NavItem =
    item("mobile-required", "Open the mobile app", MOBILE_REQUIRED_ROUTE, NavKind::Screen);

/// NavigationComposer
///
/// Filters the ordered item list for a `(role, platform)` pair using the same
/// table as the route guard. Surviving items keep their relative order.
#[derive(Debug, Clone, Copy)]
pub struct NavigationComposer<'t> {
    guard: RouteGuard<'t>,
    items: &'t [NavItem],
}

impl Default for NavigationComposer<'static> {
    fn default() -> Self {
        NavigationComposer::new(RouteGuard::default(), NAV_ITEMS)
    }
}

impl<'t> NavigationComposer<'t> {
    pub fn new(guard: RouteGuard<'t>, items: &'t [NavItem]) -> Self {
        Self { guard, items }
    }

    pub fn compose(&self, role: Option<Role>, platform: Platform) -> Vec<NavItem> {
        let table = self.guard.table();

        // A platform conflict replaces the whole chrome with the forced screen.
        match table.platform_redirect(role, platform) {
            Some(WEB_REQUIRED_ROUTE) => return vec![WEB_REQUIRED_ITEM],
            Some(_) => return vec![MOBILE_REQUIRED_ITEM],
            None => {}
        }

        let hidden = table.hidden_nav_items(role);

        self.items
            .iter()
            .filter(|item| !hidden.contains(item.id))
            .filter(|item| match item.route {
                Some(route) => self.guard.evaluate(role, route, platform).is_allowed(),
                None => true,
            })
            .copied()
            .collect()
    }
}
