use serde::Deserialize;

use crate::export::{LabelPolicy, Locale};

/// Settings for the sitewatch runs.
/// Every field has a default, so an empty or missing file is a valid configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// How each URL is probed.
    pub probe: ProbeSettings,

    /// How results are labelled in reports and exports.
    pub report: ReportSettings,

    /// Location of the YAML file holding the monitored URLs.
    pub store_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            probe: ProbeSettings::default(),
            report: ReportSettings::default(),
            store_path: default_store_path(),
        }
    }
}

/// Probe configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProbeSettings {
    /// Upper bound for a single request, connect included.
    pub timeout_seconds: u64,

    /// How many probes may be in flight at once. 1 probes sequentially.
    pub concurrency: usize,

    pub user_agent: String,

    pub accept_invalid_certs: bool,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: 5,
            concurrency: 8,
            user_agent: concat!("sitewatch/", env!("CARGO_PKG_VERSION")).to_string(),
            accept_invalid_certs: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportSettings {
    pub locale: Locale,
    pub label_policy: LabelPolicy,
}

fn default_store_path() -> String {
    "targets.yml".to_string()
}
