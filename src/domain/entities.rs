use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

time::serde::format_description!(pickup_date_format, Date, "[year]-[month]-[day]");

/// Lifecycle of a load, in strict forward order. A load only ever moves
/// rightwards through these states; there is no backward transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    Posted,
    Accepted,
    /// Shown on the timeline but never driven by an action: `start` moves
    /// a load straight from `accepted` to `in_transit`.
    Picked,
    InTransit,
    Delivered,
    Completed,
}

impl LoadStatus {
    /// All states in lifecycle order, as rendered by the status timeline.
    pub const TIMELINE: [LoadStatus; 6] = [
        LoadStatus::Posted,
        LoadStatus::Accepted,
        LoadStatus::Picked,
        LoadStatus::InTransit,
        LoadStatus::Delivered,
        LoadStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LoadStatus::Posted => "posted",
            LoadStatus::Accepted => "accepted",
            LoadStatus::Picked => "picked",
            LoadStatus::InTransit => "in_transit",
            LoadStatus::Delivered => "delivered",
            LoadStatus::Completed => "completed",
        }
    }

    pub fn parse(raw: &str) -> Option<LoadStatus> {
        LoadStatus::TIMELINE
            .into_iter()
            .find(|status| status.as_str() == raw)
    }

    pub fn label(&self) -> &'static str {
        match self {
            LoadStatus::Posted => "Posted",
            LoadStatus::Accepted => "Accepted",
            LoadStatus::Picked => "Picked Up",
            LoadStatus::InTransit => "In Transit",
            LoadStatus::Delivered => "Delivered",
            LoadStatus::Completed => "Completed",
        }
    }

    pub fn label_hi(&self) -> &'static str {
        match self {
            LoadStatus::Posted => "पोस्ट किया",
            LoadStatus::Accepted => "स्वीकार",
            LoadStatus::Picked => "लोड हुआ",
            LoadStatus::InTransit => "रास्ते में",
            LoadStatus::Delivered => "पहुँचा",
            LoadStatus::Completed => "पूरा हुआ",
        }
    }

    /// Position in the forward order; used for timeline rendering and the
    /// no-backward-transition check.
    pub fn rank(&self) -> u8 {
        match self {
            LoadStatus::Posted => 0,
            LoadStatus::Accepted => 1,
            LoadStatus::Picked => 2,
            LoadStatus::InTransit => 3,
            LoadStatus::Delivered => 4,
            LoadStatus::Completed => 5,
        }
    }

    /// Delivered or completed: the load no longer needs a truck.
    pub fn is_settled(&self) -> bool {
        matches!(self, LoadStatus::Delivered | LoadStatus::Completed)
    }

    /// Accepted or moving: a driver is on the hook for this load.
    pub fn is_active(&self) -> bool {
        matches!(self, LoadStatus::Accepted | LoadStatus::InTransit)
    }
}

/// Truck categories a company can request. The wire value is a display
/// string; anything unrecognised is carried through as `Other` rather than
/// rejected, so older clients keep rendering new categories.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TruckType {
    OpenBody,
    Container,
    Trailer,
    Tanker,
    Tipper,
    Lcv,
    MiniTruck,
    Flatbed,
    Refrigerated,
    Other(String),
}

impl TruckType {
    pub const ALL: [TruckType; 9] = [
        TruckType::OpenBody,
        TruckType::Container,
        TruckType::Trailer,
        TruckType::Tanker,
        TruckType::Tipper,
        TruckType::Lcv,
        TruckType::MiniTruck,
        TruckType::Flatbed,
        TruckType::Refrigerated,
    ];

    pub fn name(&self) -> &str {
        match self {
            TruckType::OpenBody => "Open Body",
            TruckType::Container => "Container",
            TruckType::Trailer => "Trailer",
            TruckType::Tanker => "Tanker",
            TruckType::Tipper => "Tipper",
            TruckType::Lcv => "LCV",
            TruckType::MiniTruck => "Mini Truck",
            TruckType::Flatbed => "Flatbed",
            TruckType::Refrigerated => "Refrigerated",
            TruckType::Other(name) => name.as_str(),
        }
    }
}

impl From<String> for TruckType {
    fn from(value: String) -> Self {
        TruckType::ALL
            .into_iter()
            .find(|kind| kind.name() == value)
            .unwrap_or(TruckType::Other(value))
    }
}

impl From<TruckType> for String {
    fn from(value: TruckType) -> Self {
        value.name().to_string()
    }
}

impl std::fmt::Display for TruckType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Administrative regions served by the marketplace.
pub const INDIAN_STATES: [&str; 30] = [
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
    "Delhi",
    "Chandigarh",
];

/// Major cities per state, used to pre-fill the route pickers. Cities stay
/// freeform on the wire; this is only a convenience lookup.
pub fn major_cities(state: &str) -> &'static [&'static str] {
    match state {
        "Andhra Pradesh" => &["Visakhapatnam", "Vijayawada", "Guntur", "Nellore", "Kurnool"],
        "Arunachal Pradesh" => &["Itanagar", "Tawang", "Ziro", "Pasighat"],
        "Assam" => &["Guwahati", "Silchar", "Dibrugarh", "Jorhat"],
        "Bihar" => &["Patna", "Gaya", "Bhagalpur", "Muzaffarpur"],
        "Chhattisgarh" => &["Raipur", "Bhilai", "Durg", "Bilaspur"],
        "Goa" => &["Panaji", "Margao", "Vasco da Gama", "Mapusa"],
        "Gujarat" => &["Ahmedabad", "Surat", "Vadodara", "Rajkot", "Bhavnagar"],
        "Haryana" => &["Gurugram", "Faridabad", "Panipat", "Ambala", "Hisar"],
        "Himachal Pradesh" => &["Shimla", "Manali", "Dharamshala", "Solan"],
        "Jharkhand" => &["Ranchi", "Jamshedpur", "Dhanbad", "Bokaro"],
        "Karnataka" => &["Bengaluru", "Mysuru", "Hubli", "Mangaluru", "Belagavi"],
        "Kerala" => &["Kochi", "Thiruvananthapuram", "Kozhikode", "Thrissur"],
        "Madhya Pradesh" => &["Bhopal", "Indore", "Gwalior", "Jabalpur", "Ujjain"],
        "Maharashtra" => &["Mumbai", "Pune", "Nagpur", "Nashik", "Aurangabad"],
        "Manipur" => &["Imphal", "Thoubal", "Churachandpur"],
        "Meghalaya" => &["Shillong", "Tura", "Jowai"],
        "Mizoram" => &["Aizawl", "Lunglei", "Champhai"],
        "Nagaland" => &["Kohima", "Dimapur", "Mokokchung"],
        "Odisha" => &["Bhubaneswar", "Cuttack", "Rourkela", "Puri"],
        "Punjab" => &["Ludhiana", "Amritsar", "Jalandhar", "Patiala"],
        "Rajasthan" => &["Jaipur", "Jodhpur", "Udaipur", "Kota", "Ajmer"],
        "Sikkim" => &["Gangtok", "Namchi", "Gyalshing"],
        "Tamil Nadu" => &["Chennai", "Coimbatore", "Madurai", "Salem", "Tiruchirappalli"],
        "Telangana" => &["Hyderabad", "Warangal", "Nizamabad", "Karimnagar"],
        "Tripura" => &["Agartala", "Udaipur", "Dharmanagar"],
        "Uttar Pradesh" => &["Lucknow", "Kanpur", "Varanasi", "Agra", "Noida", "Prayagraj"],
        "Uttarakhand" => &["Dehradun", "Haridwar", "Haldwani", "Roorkee"],
        "West Bengal" => &["Kolkata", "Howrah", "Durgapur", "Siliguri", "Asansol"],
        "Delhi" => &["New Delhi", "Dwarka", "Rohini", "Saket", "Karol Bagh"],
        "Chandigarh" => &["Chandigarh"],
        _ => &[],
    }
}

/// A shipment job. `id` and `company_id` are assigned at creation and never
/// change; `driver_id` is `None` exactly while the load is `posted` and is
/// set once on accept.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Load {
    pub id: String,
    pub company_id: String,
    pub driver_id: Option<String>,
    pub pickup_city: String,
    pub pickup_state: String,
    pub drop_city: String,
    pub drop_state: String,
    pub material: String,
    /// Metric tons.
    pub weight: f64,
    pub truck_type: TruckType,
    /// Indian rupees, whole units.
    pub price: i64,
    #[serde(default, with = "pickup_date_format::option")]
    pub pickup_date: Option<Date>,
    pub status: LoadStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Display convenience only; never authoritative.
    #[serde(default)]
    pub company_name: Option<String>,
    /// Display convenience only; never authoritative.
    #[serde(default)]
    pub distance_km: Option<f64>,
}

impl Load {
    pub fn route_label(&self) -> String {
        format!(
            "{}, {} → {}, {}",
            self.pickup_city, self.pickup_state, self.drop_city, self.drop_state
        )
    }

    pub fn price_display(&self) -> String {
        format!("₹{}", format_inr(self.price))
    }
}

/// Indian digit grouping: the last three digits, then pairs.
/// `147000` renders as `1,47,000`.
pub fn format_inr(amount: i64) -> String {
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::new();
    let len = digits.len();
    for (idx, ch) in digits.chars().enumerate() {
        let remaining = len - idx;
        if idx > 0 && (remaining == 3 || (remaining > 3 && remaining % 2 == 1)) {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Company,
    Driver,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Company => "company",
            Role::Driver => "driver",
            Role::Admin => "admin",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Role::Company => "Company",
            Role::Driver => "Driver",
            Role::Admin => "Admin",
        }
    }
}

/// A user record as stored remotely. Owned by the identity subsystem; the
/// lifecycle engine only ever reads `role` and `verified`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub gst_number: Option<String>,
    #[serde(default)]
    pub license_number: Option<String>,
    #[serde(default)]
    pub truck_number: Option<String>,
    #[serde(default)]
    pub truck_type: Option<TruckType>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_wire_strings() {
        for status in LoadStatus::TIMELINE {
            assert_eq!(LoadStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(LoadStatus::parse("ready"), None);
    }

    #[test]
    fn status_order_is_strictly_forward() {
        let ranks: Vec<u8> = LoadStatus::TIMELINE.iter().map(LoadStatus::rank).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn truck_type_preserves_unknown_wire_values() {
        assert_eq!(TruckType::from("Trailer".to_string()), TruckType::Trailer);
        let odd = TruckType::from("Hovercraft".to_string());
        assert_eq!(odd, TruckType::Other("Hovercraft".to_string()));
        assert_eq!(String::from(odd), "Hovercraft");
    }

    #[test]
    fn inr_grouping_matches_indian_convention() {
        assert_eq!(format_inr(0), "0");
        assert_eq!(format_inr(999), "999");
        assert_eq!(format_inr(85000), "85,000");
        assert_eq!(format_inr(147000), "1,47,000");
        assert_eq!(format_inr(12345678), "1,23,45,678");
        assert_eq!(format_inr(-62000), "-62,000");
    }

    #[test]
    fn every_state_has_a_city_lookup() {
        for state in INDIAN_STATES {
            assert!(!major_cities(state).is_empty(), "no cities for {state}");
        }
        assert!(major_cities("Atlantis").is_empty());
    }
}
