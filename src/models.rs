use serde::Serialize;
use std::fmt;

/// Placeholder shown for any rule field the API did not return.
pub const SENTINEL: &str = "N/A";

/// Rule identifier as the server spells it. Numbers stay numbers on the way back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum RuleId {
    Number(i64),
    Text(String),
}

impl RuleId {
    pub fn sentinel() -> Self {
        Self::Text(SENTINEL.to_string())
    }

    /// Interprets a JSON value from the rules payload. Null or absent maps to the sentinel.
    pub fn from_json(value: Option<&serde_json::Value>) -> Self {
        match value {
            None | Some(serde_json::Value::Null) => Self::sentinel(),
            Some(serde_json::Value::Number(number)) => match number.as_i64() {
                Some(id) => Self::Number(id),
                None => Self::Text(number.to_string()),
            },
            Some(serde_json::Value::String(text)) => Self::Text(text.clone()),
            Some(other) => Self::Text(other.to_string()),
        }
    }
}

impl Default for RuleId {
    fn default() -> Self {
        Self::Number(0)
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{}", id),
            Self::Text(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: RuleId,
    pub rule_name: String,
    pub fact_name: String,
    pub rule: String,
}

impl Rule {
    /// Builds a rule from the first element of a `data` array, defaulting each
    /// field on its own.
    pub fn from_first_record(data: &serde_json::Value) -> Self {
        let first = data.as_array().and_then(|records| records.first());
        let field = |key: &str| text_or_sentinel(first.and_then(|record| record.get(key)));

        Self {
            id: RuleId::from_json(first.and_then(|record| record.get("id"))),
            rule_name: field("ruleName"),
            fact_name: field("factName"),
            rule: field("rule"),
        }
    }

    pub fn to_update(&self) -> RuleUpdate {
        RuleUpdate {
            id: self.id.clone(),
            rule_name: self.rule_name.clone(),
            rule: self.rule.clone(),
        }
    }
}

fn text_or_sentinel(value: Option<&serde_json::Value>) -> String {
    match value {
        None | Some(serde_json::Value::Null) => SENTINEL.to_string(),
        Some(serde_json::Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// Write shape of a rule. `factName` is not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleUpdate {
    pub id: RuleId,
    pub rule_name: String,
    pub rule: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub url: String,
    pub method: HttpMethod,
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub data: serde_json::Value,
}

impl ApiResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub units_sold_today: u32,
    pub units_sold_this_quarter: u32,
    pub revenue_accounted_for: u32,
}

impl Default for MetricSnapshot {
    fn default() -> Self {
        Self {
            units_sold_today: 55,
            units_sold_this_quarter: 237,
            revenue_accounted_for: 23,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartTab {
    #[default]
    Sales,
    Peak,
}

impl ChartTab {
    pub fn heading(self) -> &'static str {
        match self {
            Self::Sales => "Sales Report",
            Self::Peak => "Peak Order Hours",
        }
    }

    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Sales => "Sales report",
            Self::Peak => "Peak hours",
        }
    }

    pub fn other(self) -> Self {
        match self {
            Self::Sales => Self::Peak,
            Self::Peak => Self::Sales,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: &'static str,
    pub kind: ChartKind,
    pub labels: Vec<&'static str>,
    pub values: Vec<u64>,
}

impl ChartSeries {
    pub fn max_value(&self) -> u64 {
        self.values.iter().copied().max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsbaResults {
    pub positive: u32,
    pub negative: u32,
}

#[cfg(test)]
mod tests {
    use super::{Rule, RuleId, SENTINEL};
    use serde_json::json;

    #[test]
    fn first_record_fields_default_independently() {
        let rule = Rule::from_first_record(&json!([{ "id": 7, "ruleName": null, "rule": "a" }]));
        assert_eq!(rule.id, RuleId::Number(7));
        assert_eq!(rule.rule_name, SENTINEL);
        assert_eq!(rule.fact_name, SENTINEL);
        assert_eq!(rule.rule, "a");
    }

    #[test]
    fn non_array_data_is_treated_as_empty() {
        let rule = Rule::from_first_record(&json!({ "id": 7 }));
        assert_eq!(rule.id, RuleId::sentinel());
        assert_eq!(rule.rule, SENTINEL);
    }

    #[test]
    fn update_shape_omits_fact_name() {
        let rule = Rule {
            id: RuleId::Text("abc".to_string()),
            rule_name: "R".to_string(),
            fact_name: "F".to_string(),
            rule: "x".to_string(),
        };
        let encoded = serde_json::to_value(rule.to_update()).expect("encode");
        assert_eq!(encoded, json!({ "id": "abc", "ruleName": "R", "rule": "x" }));
    }
}
