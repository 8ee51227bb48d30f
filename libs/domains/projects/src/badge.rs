//! Badge classification for statuses and roles.
//!
//! Classification is total: any input, including an absent or unknown value,
//! maps to exactly one badge. String matching is exact.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::models::Status;

/// Visual category used when rendering a status or role
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Badge {
    Success,
    Primary,
    Warning,
    Secondary,
    Danger,
    Info,
    Neutral,
}

impl Status {
    pub fn badge(self) -> Badge {
        match self {
            Status::Completed => Badge::Success,
            Status::InProgress => Badge::Primary,
            Status::Pending => Badge::Warning,
            Status::OnHold => Badge::Secondary,
        }
    }
}

/// Badge for a raw status value; unknown or absent values are neutral
pub fn classify(status: Option<&str>) -> Badge {
    status
        .and_then(|s| s.parse::<Status>().ok())
        .map_or(Badge::Neutral, Status::badge)
}

/// Badge for a raw role value; unknown or absent roles are secondary
pub fn classify_role(role: Option<&str>) -> Badge {
    match role {
        Some("admin") => Badge::Danger,
        Some("manager") => Badge::Warning,
        Some("user") => Badge::Info,
        _ => Badge::Secondary,
    }
}
