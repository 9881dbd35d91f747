use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Where a tooltip opens relative to its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
    Auto,
}

impl Placement {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "top" => Some(Self::Top),
            "bottom" => Some(Self::Bottom),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "auto" => Some(Self::Auto),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::Auto => "auto",
        }
    }
}

// Unknown or null placements fall back to `top` instead of rejecting the payload.
fn placement_or_top<'de, D>(deserializer: D) -> Result<Placement, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Placement::parse).unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipBinding {
    pub element_id: String,
    pub message: String,
    #[serde(default, deserialize_with = "placement_or_top")]
    pub position: Placement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertNotice {
    pub message: String,
    #[serde(default)]
    pub tooltip: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Opaque recommendation item. Kept as raw JSON; only `title` and
/// `description` have accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recommendation(pub Value);

impl Recommendation {
    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }

    pub fn description(&self) -> Option<&str> {
        self.0.get("description").and_then(Value::as_str)
    }
}

/// Body of `GET /api/insights`. Every slice is optional on the wire.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InsightsPayload {
    #[serde(default)]
    pub tooltips: Vec<TooltipBinding>,
    #[serde(default)]
    pub alerts: Vec<AlertNotice>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionReading {
    pub timestamp: String,
    pub electricity: f64,
    pub gas: f64,
    pub water: f64,
    pub car_miles: f64,
    pub public_transport: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub household_size: Option<u32>,
}

/// Body of `POST /api/readings`. Omitted numbers are stored as zero, but
/// at least one field has to be present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReadingRequest {
    pub electricity: Option<f64>,
    pub gas: Option<f64>,
    pub water: Option<f64>,
    pub car_miles: Option<f64>,
    pub public_transport: Option<f64>,
    pub household_size: Option<u32>,
}

impl ReadingRequest {
    fn amounts(&self) -> [(&'static str, Option<f64>); 5] {
        [
            ("electricity", self.electricity),
            ("gas", self.gas),
            ("water", self.water),
            ("car_miles", self.car_miles),
            ("public_transport", self.public_transport),
        ]
    }

    pub fn has_values(&self) -> bool {
        self.household_size.is_some() || self.amounts().iter().any(|(_, value)| value.is_some())
    }

    /// Returns the name of the first field that is negative or not finite.
    pub fn invalid_field(&self) -> Option<&'static str> {
        self.amounts()
            .into_iter()
            .find(|(_, value)| value.is_some_and(|v| !v.is_finite() || v < 0.0))
            .map(|(name, _)| name)
    }

    pub fn into_reading(self, timestamp: String) -> ConsumptionReading {
        ConsumptionReading {
            timestamp,
            electricity: self.electricity.unwrap_or_default(),
            gas: self.gas.unwrap_or_default(),
            water: self.water.unwrap_or_default(),
            car_miles: self.car_miles.unwrap_or_default(),
            public_transport: self.public_transport.unwrap_or_default(),
            household_size: self.household_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_slices_default_to_empty() {
        let payload: InsightsPayload = serde_json::from_str(r#"{"alerts":[{"message":"A","tooltip":"tA"}]}"#)
            .expect("payload");
        assert!(payload.tooltips.is_empty());
        assert!(payload.recommendations.is_empty());
        assert_eq!(payload.alerts.len(), 1);

        let empty: InsightsPayload = serde_json::from_str("{}").expect("empty payload");
        assert_eq!(empty, InsightsPayload::default());
    }

    #[test]
    fn tooltip_position_defaults_to_top() {
        let bindings: Vec<TooltipBinding> = serde_json::from_str(
            r#"[
                {"element_id":"a","message":"m"},
                {"element_id":"b","message":"m","position":null},
                {"element_id":"c","message":"m","position":"sideways"},
                {"element_id":"d","message":"m","position":"Bottom"}
            ]"#,
        )
        .expect("bindings");
        let positions: Vec<Placement> = bindings.iter().map(|b| b.position).collect();
        assert_eq!(
            positions,
            vec![Placement::Top, Placement::Top, Placement::Top, Placement::Bottom]
        );
    }

    #[test]
    fn recommendation_keeps_unknown_fields() {
        let rec: Recommendation =
            serde_json::from_str(r#"{"title":"Insulate","description":"Loft first","impact":0.8}"#)
                .expect("recommendation");
        assert_eq!(rec.title(), Some("Insulate"));
        assert_eq!(rec.description(), Some("Loft first"));
        assert_eq!(rec.0["impact"], serde_json::json!(0.8));
    }

    #[test]
    fn reading_request_rejects_negative_and_nan() {
        let ok = ReadingRequest { electricity: Some(12.0), ..Default::default() };
        assert_eq!(ok.invalid_field(), None);

        let negative = ReadingRequest { water: Some(-1.0), ..Default::default() };
        assert_eq!(negative.invalid_field(), Some("water"));

        let nan = ReadingRequest { car_miles: Some(f64::NAN), ..Default::default() };
        assert_eq!(nan.invalid_field(), Some("car_miles"));
    }

    #[test]
    fn empty_reading_request_has_no_values() {
        let empty: ReadingRequest = serde_json::from_str("{}").expect("empty body");
        assert!(!empty.has_values());

        let partial: ReadingRequest = serde_json::from_str(r#"{"water":0}"#).expect("partial body");
        assert!(partial.has_values());
        let reading = partial.into_reading("2026-01-05T08:00:00+00:00".into());
        assert_eq!(reading.water, 0.0);
        assert_eq!(reading.electricity, 0.0);
    }
}
