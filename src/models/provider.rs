use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TelemetryError;

/// The closed set of cloud providers the pipeline understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CloudProvider {
    Aws,
    Azure,
    Gcp,
}

impl CloudProvider {
    /// Every supported provider, in the order summaries report them.
    pub const ALL: [CloudProvider; 3] = [
        CloudProvider::Aws,
        CloudProvider::Azure,
        CloudProvider::Gcp,
    ];

    /// Canonical uppercase wire key ("AWS", "AZURE", "GCP").
    pub fn as_str(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "AWS",
            CloudProvider::Azure => "AZURE",
            CloudProvider::Gcp => "GCP",
        }
    }

    /// Account identifier used when a raw record carries no account field.
    pub fn default_account_identifier(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "aws-default-account",
            CloudProvider::Azure => "subscriptions/default",
            CloudProvider::Gcp => "projects/default",
        }
    }
}

impl fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CloudProvider {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AWS" => Ok(CloudProvider::Aws),
            "AZURE" => Ok(CloudProvider::Azure),
            "GCP" => Ok(CloudProvider::Gcp),
            _ => Err(TelemetryError::UnsupportedProvider(s.to_string())),
        }
    }
}
