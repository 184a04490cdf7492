//! Partner directory listings.

use super::{nullable, non_empty, string_or_number};
use crate::utils::date::DateTimeUtc;
use crate::utils::slug::slugify;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const UNKNOWN_COMPANY: &str = "Unknown Company";
const DEFAULT_COUNTRY: &str = "Deutschland";

/// Subscription tier. Ordered `Starter < Premium < Enterprise`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    #[default]
    Starter,
    Premium,
    Enterprise,
}

impl Tier {
    /// Unknown or missing values fall back to `Starter`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "enterprise" => Self::Enterprise,
            "premium" => Self::Premium,
            _ => Self::Starter,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Starter => "starter",
            Self::Premium => "premium",
            Self::Enterprise => "enterprise",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Starter => "Starter",
            Self::Premium => "Premium",
            Self::Enterprise => "Enterprise",
        }
    }

    /// Paid tiers get a badge and featured placement.
    pub const fn is_paid(self) -> bool {
        !matches!(self, Self::Starter)
    }

    /// Sitemap priority of the profile page.
    pub const fn sitemap_priority(self) -> f32 {
        match self {
            Self::Enterprise => 0.8,
            Self::Premium => 0.7,
            Self::Starter => 0.6,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    #[serde(deserialize_with = "nullable")]
    pub city: String,
    #[serde(deserialize_with = "nullable")]
    pub state: String,
    #[serde(deserialize_with = "nullable")]
    pub country: String,
    #[serde(deserialize_with = "nullable")]
    pub address: String,
    #[serde(deserialize_with = "nullable")]
    pub postal_code: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            city: String::new(),
            state: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
            address: String::new(),
            postal_code: String::new(),
            latitude: None,
            longitude: None,
        }
    }
}

impl Location {
    /// Both coordinates, when present and finite.
    pub fn geo(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => Some((lat, lon)),
            _ => None,
        }
    }

    /// `City, State` with empty parts skipped.
    pub fn display(&self) -> String {
        [self.city.trim(), self.state.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Older rows nest contact data instead of using top-level columns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Row of `partners.json`, normalized in place by `Partner::normalize`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Partner {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub company_name: String,
    #[serde(deserialize_with = "nullable")]
    pub slug: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    pub logo_url: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub contact_info: ContactInfo,
    #[serde(deserialize_with = "nullable")]
    pub location: Location,
    #[serde(deserialize_with = "nullable")]
    pub services: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub industries: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub certifications: Vec<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub employees: String,
    #[serde(deserialize_with = "string_or_number")]
    pub founded: String,
    #[serde(deserialize_with = "nullable")]
    pub subscription_tier: String,
    #[serde(deserialize_with = "nullable")]
    pub is_featured: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Partner {
    /// Fill documented defaults; returns the base slug to claim.
    pub fn normalize(&mut self) -> String {
        if self.company_name.trim().is_empty() {
            self.company_name = UNKNOWN_COMPANY.to_string();
        } else {
            self.company_name = self.company_name.trim().to_string();
        }
        if self.location.country.trim().is_empty() {
            self.location.country = DEFAULT_COUNTRY.to_string();
        }
        self.subscription_tier = self.tier().as_str().to_string();

        [self.slug.as_str(), self.company_name.as_str(), self.id.as_str()]
            .into_iter()
            .map(slugify)
            .find(|s| !s.is_empty())
            .unwrap_or_else(|| slugify(UNKNOWN_COMPANY))
    }

    pub fn tier(&self) -> Tier {
        Tier::parse(&self.subscription_tier)
    }

    pub fn path(&self) -> String {
        format!("/partner/{}/", self.slug)
    }

    pub fn website(&self) -> Option<&str> {
        non_empty(self.website.as_deref())
    }

    pub fn email(&self) -> Option<&str> {
        non_empty(self.email.as_deref()).or_else(|| non_empty(self.contact_info.email.as_deref()))
    }

    pub fn phone(&self) -> Option<&str> {
        non_empty(self.phone.as_deref()).or_else(|| non_empty(self.contact_info.phone.as_deref()))
    }

    pub fn logo(&self) -> Option<&str> {
        non_empty(self.logo_url.as_deref())
    }

    pub fn modified(&self) -> Option<DateTimeUtc> {
        self.updated_at
            .as_deref()
            .or(self.created_at.as_deref())
            .and_then(DateTimeUtc::parse)
    }

    /// Directory order: tier descending, then company name.
    pub fn directory_order(a: &Self, b: &Self) -> std::cmp::Ordering {
        b.tier()
            .cmp(&a.tier())
            .then_with(|| a.company_name.to_lowercase().cmp(&b.company_name.to_lowercase()))
    }
}
