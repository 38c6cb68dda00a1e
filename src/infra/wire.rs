//! Wire record shapes shared by both backends. Field names are fixed for
//! compatibility with the hosted store; parsing is lenient so one odd row
//! never takes down a whole dashboard fetch.

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::domain::{Load, LoadStatus, Profile, Role, TruckType};

#[derive(Debug, Deserialize)]
pub struct LoadDto {
    #[serde(deserialize_with = "string_from_json")]
    pub id: String,
    #[serde(default)]
    pub company_id: Option<String>,
    #[serde(default)]
    pub driver_id: Option<String>,
    #[serde(default)]
    pub pickup_city: Option<String>,
    #[serde(default)]
    pub pickup_state: Option<String>,
    #[serde(default)]
    pub drop_city: Option<String>,
    #[serde(default)]
    pub drop_state: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub truck_type: Option<String>,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub pickup_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub distance_km: Option<f64>,
}

impl From<LoadDto> for Load {
    fn from(dto: LoadDto) -> Self {
        Self {
            id: dto.id,
            company_id: dto.company_id.unwrap_or_default(),
            driver_id: dto.driver_id.filter(|id| !id.is_empty()),
            pickup_city: dto.pickup_city.unwrap_or_default(),
            pickup_state: dto.pickup_state.unwrap_or_default(),
            drop_city: dto.drop_city.unwrap_or_default(),
            drop_state: dto.drop_state.unwrap_or_default(),
            material: dto.material.unwrap_or_default(),
            weight: dto.weight.unwrap_or_default(),
            truck_type: TruckType::from(dto.truck_type.unwrap_or_default()),
            price: dto.price.unwrap_or_default(),
            pickup_date: dto.pickup_date.as_deref().and_then(parse_date),
            // Rows written before the status column existed read as posted.
            status: dto
                .status
                .as_deref()
                .and_then(LoadStatus::parse)
                .unwrap_or(LoadStatus::Posted),
            created_at: parse_timestamp(dto.created_at.as_deref()),
            company_name: dto.company_name,
            distance_km: dto.distance_km,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProfileDto {
    #[serde(deserialize_with = "string_from_json")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub gst_number: Option<String>,
    #[serde(default)]
    pub license_number: Option<String>,
    #[serde(default)]
    pub truck_number: Option<String>,
    #[serde(default)]
    pub truck_type: Option<String>,
    #[serde(default)]
    pub verified: Option<bool>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl From<ProfileDto> for Profile {
    fn from(dto: ProfileDto) -> Self {
        let role = match dto.role.as_deref() {
            Some("company") => Role::Company,
            Some("admin") => Role::Admin,
            _ => Role::Driver,
        };
        Self {
            id: dto.id,
            name: dto.name.unwrap_or_default(),
            phone: dto.phone,
            role,
            company_name: dto.company_name,
            gst_number: dto.gst_number,
            license_number: dto.license_number,
            truck_number: dto.truck_number,
            truck_type: dto.truck_type.map(TruckType::from),
            verified: dto.verified.unwrap_or(false),
            state: dto.state,
            city: dto.city,
            created_at: parse_timestamp(dto.created_at.as_deref()),
        }
    }
}

/// Body of a transition PATCH: only the fields the transition table names.
#[derive(Debug, Serialize)]
pub struct TransitionBody<'a> {
    pub status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<&'a str>,
}

pub fn parse_date(raw: &str) -> Option<Date> {
    Date::parse(raw, format_description!("[year]-[month]-[day]")).ok()
}

pub fn format_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

pub fn parse_timestamp(raw: Option<&str>) -> OffsetDateTime {
    raw.and_then(|value| OffsetDateTime::parse(value, &Rfc3339).ok())
        .unwrap_or(OffsetDateTime::UNIX_EPOCH)
}

/// Some stores serve ids as numbers, some as strings; accept both.
pub fn string_from_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct StringOrNumber;

    impl<'de> serde::de::Visitor<'de> for StringOrNumber {
        type Value = String;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string or number")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(StringOrNumber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_dto_maps_the_fixed_wire_shape() {
        let raw = serde_json::json!({
            "id": 42,
            "company_id": "co-9",
            "driver_id": null,
            "pickup_city": "Surat",
            "pickup_state": "Gujarat",
            "drop_city": "Mumbai",
            "drop_state": "Maharashtra",
            "material": "Textiles",
            "weight": 8.5,
            "truck_type": "LCV",
            "price": 42000,
            "pickup_date": "2026-09-01",
            "status": "posted",
            "created_at": "2026-08-20T10:15:00Z"
        });
        let load = Load::from(serde_json::from_value::<LoadDto>(raw).unwrap());
        assert_eq!(load.id, "42");
        assert_eq!(load.status, LoadStatus::Posted);
        assert_eq!(load.truck_type, TruckType::Lcv);
        assert_eq!(load.driver_id, None);
        assert_eq!(load.pickup_date.map(format_date).as_deref(), Some("2026-09-01"));
        assert_eq!(load.created_at.unix_timestamp(), 1_787_220_900);
    }

    #[test]
    fn missing_or_garbage_status_defaults_to_posted() {
        let raw = serde_json::json!({ "id": "l1", "status": "warp_speed" });
        let load = Load::from(serde_json::from_value::<LoadDto>(raw).unwrap());
        assert_eq!(load.status, LoadStatus::Posted);

        let raw = serde_json::json!({ "id": "l2" });
        let load = Load::from(serde_json::from_value::<LoadDto>(raw).unwrap());
        assert_eq!(load.status, LoadStatus::Posted);
    }

    #[test]
    fn profile_dto_defaults_unverified_driver() {
        let raw = serde_json::json!({
            "id": "drv-1",
            "name": "Ramesh Kumar",
            "role": "driver",
            "license_number": "MH12-2019-0045",
            "truck_type": "Container"
        });
        let profile = Profile::from(serde_json::from_value::<ProfileDto>(raw).unwrap());
        assert_eq!(profile.role, Role::Driver);
        assert!(!profile.verified);
        assert_eq!(profile.truck_type, Some(TruckType::Container));
    }
}
