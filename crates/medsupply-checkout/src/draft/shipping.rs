//! Shipping contact and delivery address.

use crate::validation::{FieldValue, Validatable};
use serde::{Deserialize, Serialize};

/// Provinces deliveries are accepted for.
pub const PROVINCES: [&str; 7] = [
    "Koshi",
    "Madhesh",
    "Bagmati",
    "Gandaki",
    "Lumbini",
    "Karnali",
    "Sudurpashchim",
];

/// Shipping details captured on step 2.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShippingDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub province: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinic_name: Option<String>,
}

impl ShippingDetails {
    /// Format as single line.
    pub fn one_line(&self) -> String {
        let mut parts = Vec::new();
        if let Some(ref clinic) = self.clinic_name {
            parts.push(clinic.as_str());
        }
        parts.extend([self.address.as_str(), self.city.as_str(), self.province.as_str()]);
        parts
            .into_iter()
            .filter(|p| !p.trim().is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Validatable for ShippingDetails {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "fullName" => FieldValue::Text(&self.full_name),
            "email" => FieldValue::Text(&self.email),
            "phone" => FieldValue::Text(&self.phone),
            "address" => FieldValue::Text(&self.address),
            "city" => FieldValue::Text(&self.city),
            "province" => FieldValue::Text(&self.province),
            "clinicName" => FieldValue::from_optional(self.clinic_name.as_deref()),
            _ => FieldValue::Absent,
        }
    }
}
