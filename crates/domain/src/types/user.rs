//! Authenticated user types
//!
//! The signed-in user is returned by the auth endpoints alongside the token
//! pair and decides which dashboard the front-end routes to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::WasteTrackError;

/// Role of a signed-in account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Customer,
    Collector,
    WasteBankUnit,
    WasteBankCentral,
    /// Industry buyer of sorted waste
    #[serde(alias = "industry")]
    Offtaker,
}

impl UserRole {
    /// Dashboard route for this role
    pub fn dashboard_path(self) -> &'static str {
        match self {
            Self::Customer => "/dashboard/customer",
            Self::Collector => "/dashboard/collector",
            Self::WasteBankUnit => "/dashboard/waste-bank-unit",
            Self::WasteBankCentral => "/dashboard/waste-bank-central",
            Self::Offtaker => "/dashboard/offtaker",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Collector => "collector",
            Self::WasteBankUnit => "waste_bank_unit",
            Self::WasteBankCentral => "waste_bank_central",
            Self::Offtaker => "offtaker",
        }
    }

    /// Whether the role operates a waste bank (unit or central)
    pub fn is_waste_bank(self) -> bool {
        matches!(self, Self::WasteBankUnit | Self::WasteBankCentral)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = WasteTrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "customer" => Ok(Self::Customer),
            "collector" => Ok(Self::Collector),
            "waste_bank_unit" => Ok(Self::WasteBankUnit),
            "waste_bank_central" => Ok(Self::WasteBankCentral),
            "offtaker" | "industry" => Ok(Self::Offtaker),
            other => Err(WasteTrackError::InvalidInput(format!("unknown user role: {other}"))),
        }
    }
}

/// The currently authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: UserRole,
}
