use std::fmt;

/// A group for which no timestamp record matched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedGroup {
    /// Position of the group in the flattened group sequence.
    pub position: usize,
    pub tokens: Vec<String>,
}

/// A group that aligned with some of its tokens missing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartialMatch {
    pub position: usize,
    pub missing: Vec<String>,
}

/// Diagnostics of one alignment pass.
///
/// Every recovered problem ends up here so callers can tell a clean pass
/// from one that lost transcript text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AlignmentReport {
    pub total_groups: usize,
    pub aligned_groups: usize,
    pub skipped: Vec<SkippedGroup>,
    pub partial: Vec<PartialMatch>,
    /// Group positions whose end time came from the end of the stream.
    pub end_time_fallbacks: Vec<usize>,
    /// Group positions that only matched beyond the lookahead window.
    pub resynced: Vec<usize>,
    pub total_records: usize,
    pub records_matched: usize,
    /// Records the cursor moved past without matching a token.
    pub records_passed_over: usize,
    /// Group position at which a stopping pass gave up.
    pub stopped_at: Option<usize>,
    /// Groups never attempted because the pass stopped.
    pub dropped_groups: usize,
}

impl AlignmentReport {
    pub fn records_consumed(&self) -> usize {
        self.records_matched + self.records_passed_over
    }

    pub fn records_unconsumed(&self) -> usize {
        self.total_records.saturating_sub(self.records_consumed())
    }

    /// True when every group aligned with every token.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
            && self.partial.is_empty()
            && self.end_time_fallbacks.is_empty()
            && self.stopped_at.is_none()
    }
}

impl fmt::Display for AlignmentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} groups aligned, {} skipped, {} partial, {} end-time fallbacks, \
             {} resynced; {}/{} records matched, {} passed over, {} unconsumed",
            self.aligned_groups,
            self.total_groups,
            self.skipped.len(),
            self.partial.len(),
            self.end_time_fallbacks.len(),
            self.resynced.len(),
            self.records_matched,
            self.total_records,
            self.records_passed_over,
            self.records_unconsumed(),
        )?;
        if let Some(position) = self.stopped_at {
            write!(
                f,
                "; stopped at group {position}, {} groups dropped",
                self.dropped_groups
            )?;
        }
        Ok(())
    }
}
