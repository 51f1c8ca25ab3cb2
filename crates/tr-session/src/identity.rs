use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The authenticated user as the server last described them.
///
/// Only ever built from a server response. Optional fields the server
/// leaves out deserialize to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// The profile update endpoint does not echo the role back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(
        default,
        alias = "location",
        skip_serializing_if = "Option::is_none"
    )]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about_me: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_joined: Option<String>,
}

impl Identity {
    /// Best human-readable label: full name, then email, then phone.
    pub fn display_name(&self) -> String {
        let full_name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if !full_name.is_empty() {
            return full_name;
        }

        self.email
            .clone()
            .or_else(|| self.phone_number.clone())
            .unwrap_or_else(|| format!("User #{}", self.id))
    }
}

/// Account role. The set is owned by the server, so unknown values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Customer,
    #[serde(rename = "Fashion_Designer")]
    FashionDesigner,
    Tailor,
    Vendor,
    Admin,
    #[serde(untagged)]
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Customer => "Customer",
            Role::FashionDesigner => "Fashion_Designer",
            Role::Tailor => "Tailor",
            Role::Vendor => "Vendor",
            Role::Admin => "Admin",
            Role::Other(other) => other,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Ok(match normalized.as_str() {
            "customer" | "client" => Role::Customer,
            "fashion_designer" | "designer" => Role::FashionDesigner,
            "tailor" => Role::Tailor,
            "vendor" => Role::Vendor,
            "admin" => Role::Admin,
            _ => Role::Other(s.trim().to_string()),
        })
    }
}
