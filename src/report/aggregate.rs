use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::http_probe::result::ProbeResult;

/// Dashboard counts for one check run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub active_count: usize,
    pub inactive_count: usize,
    /// Occurrences of each status code among reachable results.
    pub status_histogram: BTreeMap<u16, usize>,
}

pub fn aggregate<'a, I>(results: I) -> DashboardSummary
where
    I: IntoIterator<Item = &'a ProbeResult>,
{
    results
        .into_iter()
        .fold(DashboardSummary::default(), |mut summary, result| {
            match result.status_code() {
                Some(code) => {
                    summary.active_count += 1;
                    *summary.status_histogram.entry(code).or_default() += 1;
                }
                None => summary.inactive_count += 1,
            }
            summary
        })
}

impl fmt::Display for DashboardSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Active:   {}", self.active_count)?;
        writeln!(f, "Inactive: {}", self.inactive_count)?;
        if !self.status_histogram.is_empty() {
            writeln!(f, "Status codes:")?;
            for (code, count) in &self.status_histogram {
                writeln!(f, "  {code}: {count}")?;
            }
        }
        Ok(())
    }
}
