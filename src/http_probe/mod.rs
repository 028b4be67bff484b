pub mod probe;
pub mod result;
pub mod status;

use std::fmt::Write;

pub mod prelude {
    pub use super::probe::{HttpProber, Probe, normalize_url, probe_url};
    pub use super::report;
    pub use super::result::{ProbeFailure, ProbeOutcome, ProbeResult};
    pub use super::status::{UNKNOWN_STATUS_DESCRIPTION, UNREACHABLE_DESCRIPTION, describe};
}

/// Formats an error together with its whole `source()` chain.
pub fn report(mut err: &(dyn std::error::Error + 'static)) -> String {
    let mut s = format!("{}", err);
    while let Some(src) = err.source() {
        let _ = write!(s, "\n\nCaused by: {}", src);
        err = src;
    }
    s
}
