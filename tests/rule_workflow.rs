mod common;

use common::{ok, status, RecordingApi};
use dish_console::config::Settings;
use dish_console::models::{HttpMethod, RuleId, SENTINEL};
use dish_console::router::Route;
use dish_console::screens::ScreenPhase;
use dish_console::services::ToastLevel;
use dish_console::ConsoleContext;
use serde_json::json;

fn context(api: std::sync::Arc<RecordingApi>) -> ConsoleContext {
    ConsoleContext::with_sender(api, &Settings::default())
}

#[tokio::test]
async fn edit_then_update_sends_name_and_body_only() {
    let api = RecordingApi::new(vec![ok(json!([
        { "id": 42, "ruleName": "R1", "factName": "F1", "rule": "x>1" }
    ]))]);
    let context = context(api.clone());
    let mut screen = context.rule_details("42").expect("screen");

    screen.load().await.expect("load");
    let rule = screen.rule().clone();
    assert_eq!(rule.id, RuleId::Number(42));
    assert_eq!(rule.rule_name, "R1");
    assert_eq!(rule.fact_name, "F1");
    assert_eq!(rule.rule, "x>1");

    screen.handle_editor_change("x>2");
    assert_eq!(screen.rule().rule_name, "R1");
    assert_eq!(screen.rule().fact_name, "F1");

    screen.handle_update().await.expect("update");

    let requests = api.requests();
    assert_eq!(requests[0].url, "/v1/rules?id=42");
    assert_eq!(requests[1].method, HttpMethod::Put);
    assert_eq!(requests[1].url, "/v1/rules");
    let payload = requests[1].data.clone().expect("payload");
    assert_eq!(payload, json!([{ "id": 42, "ruleName": "R1", "rule": "x>2" }]));
    assert!(!payload.to_string().contains("factName"));

    let toasts = context.toasts.all();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].level, ToastLevel::Success);
    assert_eq!(toasts[0].message, "Rule updated successfully");
}

#[tokio::test]
async fn empty_data_renders_sentinels() {
    let api = RecordingApi::new(vec![ok(json!([]))]);
    let context = context(api);
    let mut screen = context.rule_details("5").expect("screen");
    screen.load().await.expect("load");

    let rule = screen.rule();
    assert_eq!(rule.id, RuleId::sentinel());
    assert_eq!(rule.rule_name, SENTINEL);
    assert_eq!(rule.fact_name, SENTINEL);
    assert_eq!(rule.rule, SENTINEL);
}

#[tokio::test]
async fn successful_delete_navigates_to_rule_list() {
    let api = RecordingApi::new(vec![status(200)]);
    let context = context(api.clone());
    let mut screen = context.rule_details("42").expect("screen");

    assert!(screen.handle_delete().await.expect("delete"));
    assert_eq!(screen.phase(), ScreenPhase::Deleted);
    assert_eq!(context.router.current(), Route::RuleList);
    assert_eq!(api.requests()[0].url, "/v1/rules?ids=42");
    assert_eq!(context.toasts.all()[0].message, "Rule deleted successfully");
}

#[tokio::test]
async fn failed_delete_stays_and_reports() {
    let api = RecordingApi::new(vec![status(500)]);
    let context = context(api);

    assert!(!dish_console::delete_rule(&context, "42").await.expect("delete"));
    assert_eq!(context.router.current(), Route::RuleDetail("42".to_string()));
    let toasts = context.toasts.all();
    assert_eq!(toasts[0].level, ToastLevel::Error);
    assert_eq!(toasts[0].message, "Failed to delete rule");
}

#[tokio::test]
async fn show_rule_keeps_string_ids() {
    let api = RecordingApi::new(vec![ok(json!([
        { "id": "r-7", "ruleName": "Spicy", "factName": "heat", "rule": "heat > 3" }
    ]))]);
    let rule = dish_console::show_rule(&context(api), "r-7").await.expect("show");
    assert_eq!(rule.id, RuleId::Text("r-7".to_string()));
    assert_eq!(
        serde_json::to_value(&rule).expect("encode"),
        json!({ "id": "r-7", "ruleName": "Spicy", "factName": "heat", "rule": "heat > 3" })
    );
}

#[tokio::test]
async fn delete_keeps_an_ampersand_id_as_one_parameter() {
    let api = RecordingApi::new(vec![status(200)]);
    let context = context(api.clone());
    let mut screen = context.rule_details("5&ids=6").expect("screen");
    assert_eq!(screen.route_id(), "5&ids=6");

    assert!(screen.handle_delete().await.expect("delete"));
    let requests = api.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, "/v1/rules?ids=5%26ids%3D6");
}
