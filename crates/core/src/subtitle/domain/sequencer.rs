use super::cue::Cue;

/// First index of a sequenced cue list.
pub const FIRST_INDEX: usize = 1;

pub struct Sequencer;

impl Sequencer {
    /// Sorts cues by start time and renumbers them `1..=n`.
    ///
    /// The sort is stable: cues starting at the same time keep their
    /// relative order.
    pub fn sort_and_reindex(mut cues: Vec<Cue>) -> Vec<Cue> {
        cues.sort_by_key(|cue| cue.start);
        for (offset, cue) in cues.iter_mut().enumerate() {
            cue.index = FIRST_INDEX + offset;
        }
        cues
    }

    /// True when cues are ordered by start and indexed `1..=n` without gaps.
    pub fn is_sequenced(cues: &[Cue]) -> bool {
        cues.windows(2).all(|w| w[0].start <= w[1].start)
            && cues
                .iter()
                .enumerate()
                .all(|(offset, cue)| cue.index == FIRST_INDEX + offset)
    }
}
