// crates/gazetteer-core/src/common.rs
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Simple aggregate statistics for a built gazetteer.
///
/// Returned by [`Gazetteer::stats`](crate::Gazetteer::stats); the counts are
/// those of the collections that end up in the JSON output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DbStats {
    pub countries: usize,
    pub states: usize,
    pub cities: usize,
}

/// Why a source line did not become an output record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DiscardReason {
    /// Fewer fields than the format requires.
    MalformedRecord,
    /// A composite state code without exactly one `.` separator.
    MalformedCode,
    /// Latitude or longitude is not a number.
    InvalidCoordinate,
    /// The line is not valid UTF-8.
    InvalidEncoding,
    /// A state whose country ISO code is not loaded.
    UnknownCountry,
    /// A city whose `<ISO>.<admin1>` code matches no loaded state.
    UnknownState,
    /// An alternate name in a language other than `fa` or `ar`.
    UnwantedLanguage,
    /// A second alternate name for an already recorded (place, language).
    DuplicateName,
}

impl fmt::Display for DiscardReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DiscardReason::MalformedRecord => "malformed record",
            DiscardReason::MalformedCode => "malformed code",
            DiscardReason::InvalidCoordinate => "invalid coordinate",
            DiscardReason::InvalidEncoding => "invalid encoding",
            DiscardReason::UnknownCountry => "unknown country",
            DiscardReason::UnknownState => "unknown state",
            DiscardReason::UnwantedLanguage => "unwanted language",
            DiscardReason::DuplicateName => "duplicate name",
        };
        f.write_str(s)
    }
}

/// Outcome counters of one pipeline stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StageReport {
    /// Records kept by the stage.
    pub loaded: usize,
    /// Lines dropped, per reason. Ordered so reports print deterministically.
    pub discarded: BTreeMap<DiscardReason, usize>,
}

impl StageReport {
    pub fn record_discard(&mut self, reason: DiscardReason) {
        *self.discarded.entry(reason).or_insert(0) += 1;
    }

    /// Number of lines dropped for `reason`.
    pub fn discarded(&self, reason: DiscardReason) -> usize {
        self.discarded.get(&reason).copied().unwrap_or(0)
    }

    pub fn total_discarded(&self) -> usize {
        self.discarded.values().sum()
    }
}

impl fmt::Display for StageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} loaded", self.loaded)?;
        for (reason, count) in &self.discarded {
            write!(f, ", {count} {reason}")?;
        }
        Ok(())
    }
}

/// Everything a full build reports besides the data itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub alternate_names: StageReport,
    pub countries: StageReport,
    pub states: StageReport,
    pub cities: StageReport,
    pub stats: DbStats,
}
