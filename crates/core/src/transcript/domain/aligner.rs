use serde::{Deserialize, Serialize};

use super::alignment_report::{AlignmentReport, PartialMatch, SkippedGroup};
use super::word_group::WordGroup;
use super::word_record::WordRecord;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::constants::DEFAULT_LOOKAHEAD;

/// What the aligner does with a group that matches no record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissPolicy {
    /// Record the group as skipped and continue with the next one.
    #[default]
    Skip,
    /// End the pass; all following groups are dropped.
    Stop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlignerOptions {
    pub miss_policy: MissPolicy,
    /// Records searched past the current position per token. `None` searches
    /// the whole remaining stream.
    pub lookahead: Option<usize>,
}

impl Default for AlignerOptions {
    fn default() -> Self {
        Self {
            miss_policy: MissPolicy::Skip,
            lookahead: Some(DEFAULT_LOOKAHEAD),
        }
    }
}

/// A group resolved against the record stream.
#[derive(Clone, Debug, PartialEq)]
pub struct AlignedGroup {
    pub start: f64,
    pub end: f64,
    /// Matched record words joined by single spaces.
    pub text: String,
    /// Indices of the matched records, ascending.
    pub records: Vec<usize>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AlignmentOutcome {
    pub groups: Vec<AlignedGroup>,
    pub report: AlignmentReport,
}

/// Result of matching one group's tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupMatch {
    pub matched: Vec<usize>,
    pub missing: Vec<String>,
}

/// Correlates word groups with timestamped word records.
///
/// The aligner owns a cursor into an immutable, time-ordered record slice.
/// Each token is matched by exact word value against the first record at or
/// after the running search position (within the lookahead window). After a
/// group resolves, the cursor moves past its last matched record, so no
/// record is ever matched twice and records skipped by the cursor are never
/// revisited.
pub struct Aligner<'a> {
    records: &'a [WordRecord],
    cursor: usize,
    options: AlignerOptions,
}

impl<'a> Aligner<'a> {
    pub fn new(records: &'a [WordRecord], options: AlignerOptions) -> Self {
        Self {
            records,
            cursor: 0,
            options,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Records not yet consumed.
    pub fn remaining(&self) -> &'a [WordRecord] {
        &self.records[self.cursor..]
    }

    fn find_record(&self, token: &str, from: usize, window: Option<usize>) -> Option<usize> {
        let end = match window {
            Some(window) => from.saturating_add(window).min(self.records.len()),
            None => self.records.len(),
        };
        (from..end).find(|&i| self.records[i].word == token)
    }

    /// Matches the tokens of `group` without consuming anything.
    pub fn match_group(&self, group: &WordGroup) -> GroupMatch {
        self.match_group_within(group, self.options.lookahead)
    }

    fn match_group_within(&self, group: &WordGroup, window: Option<usize>) -> GroupMatch {
        let mut search = self.cursor;
        let mut matched = Vec::with_capacity(group.len());
        let mut missing = Vec::new();
        for token in group.tokens() {
            match self.find_record(token, search, window) {
                Some(i) => {
                    matched.push(i);
                    search = i + 1;
                }
                None => missing.push(token.clone()),
            }
        }
        GroupMatch { matched, missing }
    }

    /// A group with no match inside the window is retried against the whole
    /// remaining stream, so text and records that drifted further apart
    /// than the window can still line up again.
    fn resync(&self, group: &WordGroup) -> Option<GroupMatch> {
        if self.options.lookahead.is_none() {
            return None;
        }
        let group_match = self.match_group_within(group, None);
        (!group_match.matched.is_empty()).then_some(group_match)
    }

    /// Runs one full pass over `groups`. Consumes the aligner: a record
    /// stream belongs to exactly one pass.
    pub fn align(
        mut self,
        groups: &[WordGroup],
        logger: &mut dyn PipelineLogger,
    ) -> AlignmentOutcome {
        let mut report = AlignmentReport {
            total_groups: groups.len(),
            total_records: self.records.len(),
            ..AlignmentReport::default()
        };
        let mut aligned = Vec::with_capacity(groups.len());

        for (position, group) in groups.iter().enumerate() {
            logger.progress(position + 1, groups.len());
            let mut group_match = self.match_group(group);
            if group_match.matched.is_empty() {
                if let Some(resynced) = self.resync(group) {
                    logger.info(&format!(
                        "Group {position} matched beyond the lookahead window; resynchronized"
                    ));
                    report.resynced.push(position);
                    group_match = resynced;
                }
            }

            let (Some(&first), Some(&last)) =
                (group_match.matched.first(), group_match.matched.last())
            else {
                report.skipped.push(SkippedGroup {
                    position,
                    tokens: group.tokens().to_vec(),
                });
                match self.options.miss_policy {
                    MissPolicy::Skip => {
                        logger.warn(&format!(
                            "No timestamps found for group {position} \"{}\"; skipped",
                            group.text()
                        ));
                        continue;
                    }
                    MissPolicy::Stop => {
                        report.stopped_at = Some(position);
                        report.dropped_groups = groups.len() - position - 1;
                        logger.warn(&format!(
                            "No timestamps found for group {position} \"{}\"; \
                             stopping, {} groups dropped",
                            group.text(),
                            report.dropped_groups
                        ));
                        break;
                    }
                }
            };

            if !group_match.missing.is_empty() {
                logger.info(&format!(
                    "Group {position} aligned without {:?}",
                    group_match.missing
                ));
                report.partial.push(PartialMatch {
                    position,
                    missing: group_match.missing.clone(),
                });
            }

            let start = self.records[first].start;
            let end = self.resolve_end(start, last).unwrap_or_else(|| {
                let fallback = self.stream_end().max(start);
                logger.warn(&format!(
                    "Group {position} ends before it starts; using stream end {fallback:.3}s"
                ));
                report.end_time_fallbacks.push(position);
                fallback
            });

            let text = group_match
                .matched
                .iter()
                .map(|&i| self.records[i].word.as_str())
                .collect::<Vec<_>>()
                .join(" ");

            let passed_over = last + 1 - self.cursor - group_match.matched.len();
            report.records_matched += group_match.matched.len();
            report.records_passed_over += passed_over;
            logger.metric("records_passed_over", passed_over as f64);
            self.cursor = last + 1;

            aligned.push(AlignedGroup {
                start,
                end,
                text,
                records: group_match.matched,
            });
        }

        report.aligned_groups = aligned.len();
        AlignmentOutcome {
            groups: aligned,
            report,
        }
    }

    /// End time of the last matched record, unless it precedes `start`.
    fn resolve_end(&self, start: f64, last: usize) -> Option<f64> {
        let end = self.records[last].end;
        (end >= start).then_some(end)
    }

    fn stream_end(&self) -> f64 {
        self.records.last().map_or(0.0, |r| r.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::pipeline_logger::NullPipelineLogger;
    use approx::assert_relative_eq;
    use rstest::rstest;
    use std::collections::HashSet;

    fn rec(word: &str, start: f64, end: f64) -> WordRecord {
        WordRecord::new(word, start, end)
    }

    fn group(words: &[&str]) -> WordGroup {
        words.iter().copied().collect()
    }

    fn hallo_records() -> Vec<WordRecord> {
        vec![
            rec("Hallo", 0.0, 0.4),
            rec("Welt", 0.4, 0.8),
            rec("wie", 0.8, 1.0),
            rec("geht", 1.0, 1.3),
            rec("es", 1.3, 1.5),
            rec("dir", 1.5, 1.9),
        ]
    }

    #[derive(Default)]
    struct CapturingLogger {
        warnings: Vec<String>,
        infos: Vec<String>,
        last_progress: Option<(usize, usize)>,
    }

    impl PipelineLogger for CapturingLogger {
        fn progress(&mut self, current: usize, total: usize) {
            self.last_progress = Some((current, total));
        }
        fn timing(&mut self, _: &str, _: f64) {}
        fn metric(&mut self, _: &str, _: f64) {}
        fn info(&mut self, message: &str) {
            self.infos.push(message.to_string());
        }
        fn warn(&mut self, message: &str) {
            self.warnings.push(message.to_string());
        }
    }

    fn align(
        records: &[WordRecord],
        groups: &[WordGroup],
        options: AlignerOptions,
    ) -> AlignmentOutcome {
        Aligner::new(records, options).align(groups, &mut NullPipelineLogger)
    }

    #[test]
    fn test_aligns_two_groups_of_sentence() {
        let records = hallo_records();
        let groups = vec![group(&["Hallo", "Welt", "wie", "geht"]), group(&["es", "dir"])];
        let outcome = align(&records, &groups, AlignerOptions::default());

        assert_eq!(outcome.groups.len(), 2);
        assert_eq!(outcome.groups[0].text, "Hallo Welt wie geht");
        assert_relative_eq!(outcome.groups[0].start, 0.0);
        assert_relative_eq!(outcome.groups[0].end, 1.3);
        assert_eq!(outcome.groups[1].text, "es dir");
        assert_relative_eq!(outcome.groups[1].start, 1.3);
        assert_relative_eq!(outcome.groups[1].end, 1.9);
        assert!(outcome.report.is_clean());
        assert_eq!(outcome.report.records_matched, 6);
    }

    #[test]
    fn test_partial_match_uses_matched_records_only() {
        let records = hallo_records();
        let groups = vec![group(&["Hallo", "Erde", "wie", "geht"])];
        let outcome = align(&records, &groups, AlignerOptions::default());

        let g = &outcome.groups[0];
        assert_eq!(g.text, "Hallo wie geht");
        assert_eq!(g.records, vec![0, 2, 3]);
        assert_relative_eq!(g.end, 1.3);
        assert_eq!(
            outcome.report.partial,
            vec![PartialMatch {
                position: 0,
                missing: vec!["Erde".to_string()],
            }]
        );
        // "Welt" sits between two matches and is consumed as passed over.
        assert_eq!(outcome.report.records_passed_over, 1);
    }

    #[test]
    fn test_skip_policy_continues_after_unmatched_group() {
        let records = hallo_records();
        let groups = vec![
            group(&["Hallo", "Welt"]),
            group(&["xyz", "abc"]),
            group(&["wie", "geht"]),
        ];
        let mut logger = CapturingLogger::default();
        let outcome = Aligner::new(&records, AlignerOptions::default()).align(&groups, &mut logger);

        assert_eq!(outcome.groups.len(), 2);
        assert_eq!(outcome.groups[1].text, "wie geht");
        assert_relative_eq!(outcome.groups[1].start, 0.8);
        assert_eq!(outcome.report.skipped.len(), 1);
        assert_eq!(outcome.report.skipped[0].position, 1);
        assert!(outcome.report.stopped_at.is_none());
        assert_eq!(logger.warnings.len(), 1);
        assert!(logger.warnings[0].contains("xyz abc"));
        assert_eq!(logger.last_progress, Some((3, 3)));
    }

    #[test]
    fn test_stop_policy_ends_pass_on_first_miss() {
        let records = hallo_records();
        let groups = vec![
            group(&["Hallo", "Welt"]),
            group(&["xyz"]),
            group(&["wie", "geht"]),
            group(&["es", "dir"]),
        ];
        let options = AlignerOptions {
            miss_policy: MissPolicy::Stop,
            ..AlignerOptions::default()
        };
        let outcome = align(&records, &groups, options);

        assert_eq!(outcome.groups.len(), 1);
        assert_eq!(outcome.report.stopped_at, Some(1));
        assert_eq!(outcome.report.dropped_groups, 2);
        assert_eq!(outcome.report.aligned_groups, 1);
    }

    #[test]
    fn test_repeated_words_match_in_order() {
        let records = vec![
            rec("der", 0.0, 0.2),
            rec("der", 0.2, 0.4),
            rec("Hund", 0.4, 0.8),
            rec("der", 0.8, 1.0),
        ];
        let groups = vec![group(&["der", "der", "Hund"]), group(&["der"])];
        let outcome = align(&records, &groups, AlignerOptions::default());

        assert_eq!(outcome.groups[0].records, vec![0, 1, 2]);
        assert_eq!(outcome.groups[1].records, vec![3]);
        assert_relative_eq!(outcome.groups[1].start, 0.8);
    }

    #[test]
    fn test_no_record_is_consumed_twice() {
        let records = vec![
            rec("a", 0.0, 0.1),
            rec("b", 0.1, 0.2),
            rec("a", 0.2, 0.3),
            rec("c", 0.3, 0.4),
            rec("a", 0.4, 0.5),
            rec("b", 0.5, 0.6),
        ];
        let groups = vec![
            group(&["a", "b"]),
            group(&["a", "a"]),
            group(&["b", "c"]),
            group(&["a", "b"]),
        ];
        let outcome = align(&records, &groups, AlignerOptions::default());

        let mut seen = HashSet::new();
        for g in &outcome.groups {
            for &i in &g.records {
                assert!(seen.insert(i), "record {i} matched twice");
            }
        }
        assert!(outcome.report.records_consumed() <= records.len());
        let starts: Vec<f64> = outcome.groups.iter().map(|g| g.start).collect();
        assert!(starts.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_lookahead_limits_search_window() {
        let mut records: Vec<WordRecord> = (0..20)
            .map(|i| rec("äh", i as f64 * 0.1, i as f64 * 0.1 + 0.1))
            .collect();
        records.push(rec("weit", 2.0, 2.3));
        let windowed = AlignerOptions {
            lookahead: Some(5),
            ..AlignerOptions::default()
        };

        let m = Aligner::new(&records, windowed).match_group(&group(&["weit"]));
        assert!(m.matched.is_empty());
        assert_eq!(m.missing, vec!["weit".to_string()]);

        let unbounded = AlignerOptions {
            lookahead: None,
            ..AlignerOptions::default()
        };
        let m = Aligner::new(&records, unbounded).match_group(&group(&["weit"]));
        assert_eq!(m.matched, vec![20]);
    }

    #[test]
    fn test_group_beyond_window_resynchronizes() {
        let mut records: Vec<WordRecord> = (0..20)
            .map(|i| rec("äh", i as f64 * 0.1, i as f64 * 0.1 + 0.1))
            .collect();
        records.push(rec("weit", 2.0, 2.3));
        let options = AlignerOptions {
            lookahead: Some(5),
            ..AlignerOptions::default()
        };
        let mut logger = CapturingLogger::default();
        let outcome = Aligner::new(&records, options).align(&[group(&["weit"])], &mut logger);

        assert_eq!(outcome.groups.len(), 1);
        assert_eq!(outcome.groups[0].records, vec![20]);
        assert_eq!(outcome.report.resynced, vec![0]);
        assert_eq!(outcome.report.records_passed_over, 20);
        assert!(outcome.report.skipped.is_empty());
        assert!(logger.infos[0].contains("resynchronized"));
    }

    fn desynced_stream() -> (Vec<WordRecord>, Vec<WordGroup>) {
        let mut records: Vec<WordRecord> = (0..20)
            .map(|i| rec(&format!("r{i}"), i as f64 * 0.1, i as f64 * 0.1 + 0.1))
            .collect();
        records.extend([
            rec("Hallo", 2.0, 2.4),
            rec("Welt", 2.4, 2.8),
            rec("wie", 2.8, 3.0),
            rec("geht", 3.0, 3.3),
        ]);
        let tokens: Vec<String> = (0..20).map(|i| format!("t{i}")).collect();
        let mut groups: Vec<WordGroup> = tokens
            .chunks(4)
            .map(|chunk| WordGroup::new(chunk.to_vec()))
            .collect();
        groups.push(group(&["Hallo", "Welt"]));
        groups.push(group(&["wie", "geht"]));
        (records, groups)
    }

    #[rstest]
    #[case::windowed(Some(DEFAULT_LOOKAHEAD))]
    #[case::unbounded(None)]
    fn test_tail_aligns_after_consecutive_skipped_groups(#[case] lookahead: Option<usize>) {
        let (records, groups) = desynced_stream();
        let options = AlignerOptions {
            lookahead,
            ..AlignerOptions::default()
        };
        let outcome = align(&records, &groups, options);

        assert_eq!(outcome.report.skipped.len(), 5);
        assert_eq!(outcome.report.aligned_groups, 2);
        let texts: Vec<&str> = outcome.groups.iter().map(|g| g.text.as_str()).collect();
        assert_eq!(texts, vec!["Hallo Welt", "wie geht"]);
        assert_relative_eq!(outcome.groups[0].start, 2.0);
        assert_relative_eq!(outcome.groups[1].end, 3.3);
        assert_eq!(outcome.report.records_unconsumed(), 0);
    }

    #[test]
    fn test_filler_words_are_passed_over() {
        let records = vec![
            rec("Hallo", 0.0, 0.4),
            rec("ähm", 0.4, 0.7),
            rec("Welt", 0.7, 1.0),
        ];
        let outcome = align(&records, &[group(&["Hallo", "Welt"])], AlignerOptions::default());
        assert_eq!(outcome.groups[0].text, "Hallo Welt");
        assert_relative_eq!(outcome.groups[0].end, 1.0);
        assert_eq!(outcome.report.records_passed_over, 1);
    }

    #[test]
    fn test_end_before_start_falls_back_to_stream_end() {
        let records = vec![rec("kaputt", 2.0, 1.0), rec("gut", 3.0, 3.5)];
        let outcome = align(&records, &[group(&["kaputt"])], AlignerOptions::default());

        let g = &outcome.groups[0];
        assert_relative_eq!(g.start, 2.0);
        assert_relative_eq!(g.end, 3.5);
        assert!(g.start <= g.end);
        assert_eq!(outcome.report.end_time_fallbacks, vec![0]);
    }

    #[test]
    fn test_empty_inputs() {
        let outcome = align(&[], &[group(&["a"])], AlignerOptions::default());
        assert!(outcome.groups.is_empty());
        assert_eq!(outcome.report.skipped.len(), 1);

        let outcome = align(&hallo_records(), &[], AlignerOptions::default());
        assert!(outcome.groups.is_empty());
        assert!(outcome.report.is_clean());
        assert_eq!(outcome.report.records_unconsumed(), 6);
    }

    #[test]
    fn test_match_group_does_not_move_cursor() {
        let records = hallo_records();
        let aligner = Aligner::new(&records, AlignerOptions::default());
        let m = aligner.match_group(&group(&["Welt", "dir"]));
        assert_eq!(m.matched, vec![1, 5]);
        assert!(m.missing.is_empty());
        assert_eq!(aligner.cursor(), 0);
        assert_eq!(aligner.remaining().len(), 6);
    }

    #[test]
    fn test_miss_policy_serde_names() {
        assert_eq!(serde_json::to_string(&MissPolicy::Skip).unwrap(), "\"skip\"");
        let p: MissPolicy = serde_json::from_str("\"stop\"").unwrap();
        assert_eq!(p, MissPolicy::Stop);
    }
}
