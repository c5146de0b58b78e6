use peace_portal::{
    models::{
        ClassifyResourceRequest, DecisionOutcome, DecisionResponse, NavItemResponse,
        RolePolicyResponse, UpdateRoleRequest,
    },
    policy::{NavKind, Platform, PolicyTable, Role, RouteGuard, navigation::NAV_ITEMS},
    resources::ResourceType,
};

#[test]
fn test_role_serializes_as_kebab_case() {
    let json = serde_json::to_string(&Role::PeerEducatorExecutive).unwrap();
    assert_eq!(json, "\"peer-educator-executive\"");

    let role: Role = serde_json::from_str("\"student-affairs\"").unwrap();
    assert_eq!(role, Role::StudentAffairs);
}

#[test]
fn test_decision_response_for_platform_denial() {
    let evaluation = RouteGuard::default().explain(
        Some(Role::StudentAffairs),
        "/admin/dashboard",
        Platform::Mobile,
    );
    let response = DecisionResponse::new(
        "/admin/dashboard",
        Some(Role::StudentAffairs),
        Platform::Mobile,
        &evaluation,
    );

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["outcome"], "deny-platform");
    assert_eq!(json["target"], "/web-required");
    assert_eq!(json["role"], "student-affairs");
    assert_eq!(json["platform"], "mobile");
    assert!(json["matched_pattern"].is_null());
}

#[test]
fn test_decision_response_for_allow() {
    let evaluation = RouteGuard::default().explain(Some(Role::Admin), "/admin/dashboard", Platform::Web);
    let response = DecisionResponse::new("/admin/dashboard", Some(Role::Admin), Platform::Web, &evaluation);

    assert_eq!(response.outcome, DecisionOutcome::Allow);
    assert_eq!(response.target, None);
    assert_eq!(response.matched_pattern.as_deref(), Some("/"));
}

#[test]
fn test_nav_item_response_keeps_route_less_items() {
    let crisis = NAV_ITEMS
        .iter()
        .copied()
        .find(|item| item.id == "crisis-help")
        .unwrap();
    let response = NavItemResponse::from(crisis);
    assert_eq!(response.route, None);
    assert_eq!(response.kind, NavKind::Shortcut);

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["kind"], "shortcut");
}

#[test]
fn test_role_policy_response_includes_public_prefixes() {
    let table = PolicyTable::standard();
    let response = RolePolicyResponse::new(
        Role::StudentAffairs,
        table.public,
        table.policy(Some(Role::StudentAffairs)),
    );

    assert!(response.allowed.iter().any(|p| p == "/(auth)"));
    assert!(response.allowed.iter().any(|p| p == "/student-affairs"));
    assert!(response.denied.iter().any(|p| p == "/(tabs)/chat"));

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["platform"], "web-only");
    assert_eq!(json["fallback"], "/student-affairs/dashboard");
}

#[test]
fn test_unrestricted_constraint_serializes_as_none() {
    let table = PolicyTable::standard();
    let response = RolePolicyResponse::new(Role::Student, table.public, table.policy(Some(Role::Student)));
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["platform"], "none");
}

#[test]
fn test_classify_request_defaults() {
    let request: ClassifyResourceRequest =
        serde_json::from_str(r#"{"url": "https://vimeo.com/1"}"#).unwrap();
    assert!(request.tags.is_empty());
    assert_eq!(request.metadata(), vec!["https://vimeo.com/1"]);

    let json = serde_json::to_string(&ResourceType::Pdf).unwrap();
    assert_eq!(json, "\"pdf\"");
}

#[test]
fn test_update_role_request_shape() {
    let request: UpdateRoleRequest = serde_json::from_str(r#"{"role": "life-coach"}"#).unwrap();
    assert_eq!(request.role.parse::<Role>().unwrap(), Role::LifeCoach);
}
