use serde::{Deserialize, Serialize};

/// One synthetic measurement, serialized exactly as the API expects it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub room_id: i32,
    pub temperature: f64,
    pub humidity: f64,
    pub sensor_type: String,
    pub notes: String,
}

/// Direction of a temperature excursion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureFault {
    Hot,
    Cold,
}

/// Direction of a humidity excursion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumidityFault {
    Humid,
    Dry,
}

/// What kind of reading the generator draws
///
/// `Both` is always hot and humid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Normal,
    Temperature(TemperatureFault),
    Humidity(HumidityFault),
    Both,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<UserSummary>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_uses_api_field_names() {
        let reading = Reading {
            room_id: 2,
            temperature: 21.37,
            humidity: 44.1,
            sensor_type: "DHT22".to_string(),
            notes: "Auto-generated reading at 10:15:00".to_string(),
        };

        let json = serde_json::to_value(&reading).unwrap();
        assert_eq!(json["roomId"], 2);
        assert_eq!(json["temperature"], 21.37);
        assert_eq!(json["humidity"], 44.1);
        assert_eq!(json["sensorType"], "DHT22");
        assert_eq!(json["notes"], "Auto-generated reading at 10:15:00");
        assert_eq!(json.as_object().unwrap().len(), 5);
    }

    #[test]
    fn login_response_tolerates_missing_user() {
        let response: LoginResponse = serde_json::from_str(r#"{"token":"abc"}"#).unwrap();
        assert_eq!(response.token, "abc");
        assert!(response.user.is_none());
    }

    #[test]
    fn login_response_reads_user_summary() {
        let body = r#"{
            "token": "abc",
            "user": {"id": 1, "username": "admin", "fullName": "Ada Admin", "role": "Admin",
                     "email": "a@b.c", "createdAt": "2024-01-01T00:00:00Z", "isActive": true}
        }"#;
        let response: LoginResponse = serde_json::from_str(body).unwrap();
        let user = response.user.unwrap();
        assert_eq!(user.username, "admin");
        assert_eq!(user.full_name.as_deref(), Some("Ada Admin"));
        assert_eq!(user.role.as_deref(), Some("Admin"));
    }
}
