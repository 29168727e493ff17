//! Resolution of the requested execution count.

use std::ops::RangeInclusive;

/// Bounds and fallback for the number of executions in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunCountLimits {
    pub default: u32,
    pub min: u32,
    pub max: u32,
}

impl RunCountLimits {
    pub fn range(&self) -> RangeInclusive<u32> {
        self.min..=self.max
    }
}

/// Outcome of interpreting the raw count argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunCount {
    /// No argument supplied.
    Default(u32),
    /// Argument parsed and already inside the range.
    Requested(u32),
    /// Argument parsed but outside the range.
    Clamped { requested: i64, runs: u32 },
    /// Argument could not be parsed as an integer.
    Unparsable(u32),
}

impl RunCount {
    pub fn runs(self) -> u32 {
        match self {
            RunCount::Default(runs)
            | RunCount::Requested(runs)
            | RunCount::Clamped { runs, .. }
            | RunCount::Unparsable(runs) => runs,
        }
    }
}

/// Interpret `raw` against `limits`.
///
/// Out-of-range values are clamped, never rejected.
pub fn resolve_run_count(raw: Option<&str>, limits: RunCountLimits) -> RunCount {
    let Some(raw) = raw else {
        return RunCount::Default(limits.default);
    };
    match raw.trim().parse::<i64>() {
        Ok(requested) => {
            let runs = requested.clamp(i64::from(limits.min), i64::from(limits.max)) as u32;
            if i64::from(runs) == requested {
                RunCount::Requested(runs)
            } else {
                RunCount::Clamped { requested, runs }
            }
        }
        Err(_) => RunCount::Unparsable(limits.default),
    }
}
