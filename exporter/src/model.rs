use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityId {
    pub id: String,
    #[serde(default)]
    pub entity_type: Option<String>,
}

/// Device as listed by `/api/tenant/deviceInfos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type", default)]
    pub device_type: Option<String>,
}

impl Device {
    pub fn id(&self) -> &str {
        &self.id.id
    }
}

/// One page of a paginated ThingsBoard listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub total_pages: i64,
    #[serde(default)]
    pub total_elements: i64,
    #[serde(default)]
    pub has_next: bool,
}

/// A single time-series point. `value` is whatever scalar the server sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub ts: i64,
    pub value: Value,
}

/// Key -> samples, as returned by `/values/timeseries`.
pub type TimeseriesData = BTreeMap<String, Vec<Sample>>;

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_page() {
        let json = r#"{
            "data": [
                {"id": {"entityType": "DEVICE", "id": "7a1c"}, "name": "Boiler", "type": "default"},
                {"id": {"entityType": "DEVICE", "id": "9f02"}, "name": "Chiller"}
            ],
            "totalPages": 3,
            "totalElements": 5,
            "hasNext": true
        }"#;

        let page: PageData<Device> = serde_json::from_str(json).unwrap();
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[0].id(), "7a1c");
        assert_eq!(page.data[1].device_type, None);
        assert!(page.has_next);
    }

    #[test]
    fn test_timeseries_values() {
        let json = r#"{
            "temperature": [{"ts": 1700000060000, "value": "21.5"}, {"ts": 1700000000000, "value": "21.4"}],
            "humidity": []
        }"#;

        let data: TimeseriesData = serde_json::from_str(json).unwrap();
        assert_eq!(data["temperature"][0].ts, 1_700_000_060_000);
        assert_eq!(data["temperature"][0].value, Value::from("21.5"));
        assert!(data["humidity"].is_empty());
    }
}
