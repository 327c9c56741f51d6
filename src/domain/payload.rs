//! Indicator feed payload and typed views over it.
//!
//! The aggregator's schema is not under our control, so the body is kept
//! verbatim as JSON. Typed accessors read the parts we render and tolerate
//! missing fields and numbers sent as strings.

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IndicatorPayload(Value);

/// Latest price snapshot. Each field is the upstream scalar rendered as text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceInfo {
    pub last_price: Option<String>,
    pub change: Option<String>,
    pub percent_change: Option<String>,
    pub high: Option<String>,
    pub low: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorRecord {
    pub name: String,
    pub value: Option<String>,
    pub signal: Option<String>,
    pub action: Option<String>,
}

impl IndicatorRecord {
    /// Positive when the recommended action is a buy.
    pub fn is_buy(&self) -> bool {
        self.action
            .as_deref()
            .is_some_and(|a| a.trim().eq_ignore_ascii_case("buy"))
    }
}

impl IndicatorPayload {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body).map(Self)
    }

    pub fn raw(&self) -> &Value {
        &self.0
    }

    /// True for `null`, `{}`, `[]` and other bodies carrying nothing.
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::String(s) => s.is_empty(),
            Value::Bool(_) | Value::Number(_) => false,
        }
    }

    fn data(&self) -> Option<&Value> {
        self.0.get("data")
    }

    pub fn price_info(&self) -> Option<PriceInfo> {
        let info = self.data()?.get("priceinfo")?.as_object()?;
        if info.is_empty() {
            return None;
        }
        let field = |key: &str| info.get(key).and_then(scalar_text);
        Some(PriceInfo {
            last_price: field("lastprice"),
            change: field("change"),
            percent_change: field("percentchange"),
            high: field("high"),
            low: field("low"),
        })
    }

    /// Indicator records in upstream order. Non-object entries are skipped.
    pub fn indicators(&self) -> Vec<IndicatorRecord> {
        let Some(list) = self
            .data()
            .and_then(|d| d.get("techindicator"))
            .and_then(Value::as_array)
        else {
            return Vec::new();
        };

        list.iter()
            .filter_map(Value::as_object)
            .map(|item| IndicatorRecord {
                name: item
                    .get("name")
                    .and_then(scalar_text)
                    .unwrap_or_default(),
                value: item.get("value").and_then(scalar_text),
                signal: item.get("signal").and_then(scalar_text),
                action: item.get("action").and_then(scalar_text),
            })
            .collect()
    }
}

/// Render a JSON scalar as display text. Null and containers yield `None`.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
