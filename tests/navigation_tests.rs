use peace_portal::policy::{
    self, NavItem, NavKind, NavigationComposer, Platform, Role, RouteGuard,
    navigation::{NAV_ITEMS, WEB_REQUIRED_ITEM},
};

fn ids(items: &[NavItem]) -> Vec<&'static str> {
    items.iter().map(|item| item.id).collect()
}

// --- Concrete Scenarios ---

#[test]
fn test_counselor_has_no_forum() {
    let items = policy::compose_navigation(Some(Role::Counselor), Platform::Mobile);
    let ids = ids(&items);
    assert!(!ids.contains(&"forum"));
    assert!(!ids.contains(&"compose"));
    assert_eq!(
        ids,
        vec![
            "home",
            "chat",
            "resources",
            "profile",
            "crisis-help",
            "notifications",
            "meetings",
            "counselor",
            "settings",
        ]
    );
}

#[test]
fn test_student_affairs_on_mobile_only_sees_web_required() {
    let items = policy::compose_navigation(Some(Role::StudentAffairs), Platform::Mobile);
    assert_eq!(items, vec![WEB_REQUIRED_ITEM]);
    assert_eq!(items[0].route, Some("/web-required"));
    assert_eq!(items[0].kind, NavKind::Screen);
}

#[test]
fn test_student_affairs_on_web_hides_forum_and_chat() {
    let items = policy::compose_navigation(Some(Role::StudentAffairs), Platform::Web);
    assert_eq!(
        ids(&items),
        vec![
            "home",
            "resources",
            "profile",
            "crisis-help",
            "notifications",
            "student-affairs",
            "settings",
        ]
    );
}

#[test]
fn test_student_navigation() {
    let items = policy::compose_navigation(Some(Role::Student), Platform::Mobile);
    assert_eq!(
        ids(&items),
        vec![
            "home",
            "forum",
            "chat",
            "resources",
            "profile",
            "compose",
            "crisis-help",
            "notifications",
            "meetings",
            "check-in",
            "settings",
        ]
    );
}

#[test]
fn test_executive_sees_both_peer_dashboards() {
    let peer = ids(&policy::compose_navigation(Some(Role::PeerEducator), Platform::Mobile));
    assert!(peer.contains(&"peer-educator"));
    assert!(!peer.contains(&"executive"));

    let exec = ids(&policy::compose_navigation(
        Some(Role::PeerEducatorExecutive),
        Platform::Mobile,
    ));
    assert!(exec.contains(&"peer-educator"));
    assert!(exec.contains(&"executive"));
}

#[test]
fn test_admin_sees_everything() {
    let items = policy::compose_navigation(Some(Role::Admin), Platform::Web);
    assert_eq!(items, NAV_ITEMS.to_vec());
}

#[test]
fn test_anonymous_sees_only_route_less_items() {
    let items = policy::compose_navigation(None, Platform::Mobile);
    assert_eq!(ids(&items), vec!["crisis-help"]);
}

// --- Properties ---

#[test]
fn test_filtering_preserves_order() {
    let composer = NavigationComposer::default();
    let position = |id: &str| NAV_ITEMS.iter().position(|item| item.id == id).unwrap();

    for role in Role::ALL.into_iter().map(Some).chain([None]) {
        for platform in [Platform::Mobile, Platform::Web] {
            let items = composer.compose(role, platform);
            if items == vec![WEB_REQUIRED_ITEM] {
                continue;
            }
            let positions: Vec<usize> = items.iter().map(|item| position(item.id)).collect();
            assert!(
                positions.windows(2).all(|pair| pair[0] < pair[1]),
                "{:?}/{:?} reordered: {:?}",
                role,
                platform,
                ids(&items)
            );
        }
    }
}

#[test]
fn test_visible_items_are_routable() {
    let composer = NavigationComposer::default();
    let guard = RouteGuard::default();

    for role in Role::ALL {
        for platform in [Platform::Mobile, Platform::Web] {
            for item in composer.compose(Some(role), platform) {
                if let Some(route) = item.route {
                    if item == WEB_REQUIRED_ITEM {
                        continue;
                    }
                    assert!(
                        guard.evaluate(Some(role), route, platform).is_allowed(),
                        "{} shows {} but cannot open it",
                        role,
                        item.id
                    );
                }
            }
        }
    }
}

#[test]
fn test_custom_item_list() {
    const ITEMS: &[NavItem] = &[
        NavItem {
            id: "admin",
            label: "Admin",
            route: Some("/admin"),
            kind: NavKind::Tab,
        },
        NavItem {
            id: "home",
            label: "Home",
            route: Some("/(tabs)"),
            kind: NavKind::Tab,
        },
    ];
    let composer = NavigationComposer::new(RouteGuard::default(), ITEMS);

    assert_eq!(ids(&composer.compose(Some(Role::Student), Platform::Web)), vec!["home"]);
    assert_eq!(
        ids(&composer.compose(Some(Role::Admin), Platform::Web)),
        vec!["admin", "home"]
    );
}
