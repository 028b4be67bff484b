use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::probe_config::Settings;
use crate::export::{ExportFormat, LabelPolicy, Locale};

#[derive(Debug, Parser)]
#[command(name = "sitewatch", version, about = "Check websites and report their HTTP status")]
pub struct Cli {
    /// YAML settings file; missing means defaults.
    #[arg(long, global = true, env = "CONFIG_FILE", default_value = "sitewatch.yml")]
    pub config: PathBuf,

    /// Per-request timeout in seconds.
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Number of probes in flight at once.
    #[arg(long, global = true)]
    pub concurrency: Option<usize>,

    #[arg(long, global = true, value_enum)]
    pub locale: Option<Locale>,

    #[arg(long, global = true, value_enum)]
    pub label_policy: Option<LabelPolicy>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check URLs from a file (one per line), or stdin when no file is given.
    Check { file: Option<PathBuf> },
    /// Check every URL in the target store.
    CheckAll,
    /// Show active/inactive counts and the status code histogram for the stored URLs.
    Dashboard {
        #[arg(long, value_enum, default_value_t = DashboardFormat::Text)]
        format: DashboardFormat,
    },
    /// Check the stored URLs and export the report.
    Export {
        #[arg(value_enum)]
        format: ExportFormat,
        /// Destination file, `-` for stdout. Defaults to the report's standard filename.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Manage the stored URLs.
    Targets {
        #[command(subcommand)]
        action: TargetsAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum TargetsAction {
    List,
    Add { url: String },
    Remove { id: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DashboardFormat {
    Text,
    Yaml,
}

impl Cli {
    /// Command-line flags win over the file and the environment.
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(timeout) = self.timeout {
            settings.probe.timeout_seconds = timeout;
        }
        if let Some(concurrency) = self.concurrency {
            settings.probe.concurrency = concurrency;
        }
        if let Some(locale) = self.locale {
            settings.report.locale = locale;
        }
        if let Some(policy) = self.label_policy {
            settings.report.label_policy = policy;
        }
    }
}
