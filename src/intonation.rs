//! Pass 4: partitions the utterance into prosodic zones and assigns a pitch
//! path to every segment.
//!
//! Zones follow the classic pre-head / head / nucleus / tail model: the
//! pre-head runs to the first primary-stressed syllable, the nucleus is the
//! last primary-stressed syllable, the tail is whatever follows it, and the
//! head in between alternates stressed syllables (percentages from a cyclic
//! step table) with unstressed runs.
//!
//! # Pitch targets
//! A zone's start/end percentages map onto pitch as
//! ```text
//!    pitch(pct) = basePitch * 2^(((pct - 50) / 50) * inflection)
//! ```
//! so 50% is the base pitch, 100% is up to one octave above and 0% up to one
//! octave below, scaled by the inflection setting. Within a zone, pitch is
//! interpolated linearly by the *cumulative voiced duration fraction*, not
//! by segment count or wall-clock time: unvoiced segments pass the running
//! pitch through unchanged.

use crate::math::pow;
use crate::segment::{Segment, Stress};

/// Clause category selecting the intonation table, derived from the
/// sentence-final punctuation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClauseType {
    /// Falling statement contour (`.`).
    #[default]
    Statement,
    /// Continuation rise (`,`).
    Continuation,
    /// High-rising question (`?`).
    Question,
    /// Wide-excursion exclamation (`!`).
    Exclamation,
}

impl From<char> for ClauseType {
    /// Unrecognized characters fall back to the statement contour.
    fn from(c: char) -> Self {
        match c {
            ',' => ClauseType::Continuation,
            '?' => ClauseType::Question,
            '!' => ClauseType::Exclamation,
            _ => ClauseType::Statement,
        }
    }
}

/// Zone percentages for one clause type, on the 0-100 excursion scale.
struct ContourTable {
    /// pre-head start/end
    prehead: (f64, f64),
    /// first stressed syllable of the head, and the head's approach to the
    /// nucleus
    head: (f64, f64),
    /// start percentages for subsequent stressed syllables of the head;
    /// extended cyclically past the end by alternating its last two entries
    head_steps: &'static [f64],
    /// nucleus when a tail follows
    nucleus: (f64, f64),
    /// nucleus on the last syllable of the utterance
    nucleus_no_tail: (f64, f64),
    /// tail start/end
    tail: (f64, f64),
}

/// How far a stressed head syllable falls from its step percentage.
const HEAD_STRESS_DROP: f64 = 8.0;
/// Offsets below the previous stressed syllable's end for an unstressed run.
const UNSTRESSED_RUN_DELTAS: (f64, f64) = (2.0, 8.0);

static STATEMENT: ContourTable = ContourTable {
    prehead: (30.0, 40.0),
    head: (75.0, 55.0),
    head_steps: &[68.0, 62.0, 66.0, 58.0],
    nucleus: (60.0, 25.0),
    nucleus_no_tail: (65.0, 10.0),
    tail: (20.0, 10.0),
};

static CONTINUATION: ContourTable = ContourTable {
    prehead: (30.0, 40.0),
    head: (65.0, 50.0),
    head_steps: &[60.0, 55.0, 58.0, 52.0],
    nucleus: (45.0, 35.0),
    nucleus_no_tail: (50.0, 40.0),
    tail: (40.0, 48.0),
};

static QUESTION: ContourTable = ContourTable {
    prehead: (35.0, 45.0),
    head: (70.0, 55.0),
    head_steps: &[64.0, 58.0, 62.0, 55.0],
    nucleus: (30.0, 50.0),
    nucleus_no_tail: (25.0, 80.0),
    tail: (55.0, 90.0),
};

static EXCLAMATION: ContourTable = ContourTable {
    prehead: (25.0, 45.0),
    head: (90.0, 70.0),
    head_steps: &[85.0, 75.0, 80.0, 70.0],
    nucleus: (85.0, 15.0),
    nucleus_no_tail: (90.0, 5.0),
    tail: (12.0, 5.0),
};

fn table_for(clause: ClauseType) -> &'static ContourTable {
    match clause {
        ClauseType::Statement => &STATEMENT,
        ClauseType::Continuation => &CONTINUATION,
        ClauseType::Question => &QUESTION,
        ClauseType::Exclamation => &EXCLAMATION,
    }
}

/// Step percentage for stressed head syllable `k` (0 = the first syllable
/// *after* the head-initial one). Past the table's prefix the last two
/// entries alternate forever.
fn head_step(steps: &'static [f64], k: usize) -> f64 {
    if k < steps.len() {
        steps[k]
    } else {
        steps[steps.len() - 2 + (k - steps.len()) % 2]
    }
}

/// Maps an excursion percentage to a pitch in Hz.
fn pitch_at(base_pitch: f64, inflection: f64, pct: f64) -> f64 {
    base_pitch * pow(2.0, ((pct - 50.0) / 50.0) * inflection)
}

/// Assigns `pitch`/`end_pitch` over `segs` from `start_pct` to `end_pct`,
/// interpolating by cumulative voiced duration.
fn apply_pitch_path(
    segs: &mut [Segment],
    base_pitch: f64,
    inflection: f64,
    start_pct: f64,
    end_pct: f64,
) {
    let p0 = pitch_at(base_pitch, inflection, start_pct);
    let p1 = pitch_at(base_pitch, inflection, end_pct);
    let voiced_total: f64 = segs.iter().filter(|s| s.is_voiced()).map(|s| s.duration).sum();

    let mut run = 0.0;
    let mut current = p0;
    for seg in segs {
        seg.pitch = Some(current);
        if seg.is_voiced() && voiced_total > 0.0 {
            run += seg.duration;
            current = p0 + (p1 - p0) * (run / voiced_total);
        }
        seg.end_pitch = Some(current);
        seg.mid_pitch = Some(f64::midpoint(seg.pitch.unwrap_or(current), current));
    }
}

/// Assigns a pitch path to every segment of the list.
pub fn apply(list: &mut [Segment], base_pitch: f64, inflection: f64, clause: ClauseType) {
    if list.is_empty() {
        return;
    }
    let inflection = inflection.clamp(0.0, 1.0);
    let table = table_for(clause);

    // syllable-start indices with their stress
    let syllables: alloc::vec::Vec<(usize, Stress)> = list
        .iter()
        .enumerate()
        .filter(|(_, s)| s.syllable_start)
        .map(|(i, s)| (i, s.stress))
        .collect();
    if syllables.is_empty() {
        // nothing but synthetic segments; give them a flat base pitch
        fill_unset(list, base_pitch);
        return;
    }

    // The nucleus is the last primary-stressed syllable; with no primary
    // stress anywhere, the final syllable serves as nucleus.
    let nucleus_syl = syllables
        .iter()
        .rposition(|&(_, stress)| stress == Stress::Primary)
        .unwrap_or(syllables.len() - 1);
    let first_primary = syllables
        .iter()
        .position(|&(_, stress)| stress == Stress::Primary)
        .unwrap_or(nucleus_syl);

    let head_begin = syllables[first_primary].0;
    let nucleus_begin = syllables[nucleus_syl].0;
    let nucleus_end = syllables
        .get(nucleus_syl + 1)
        .map_or(list.len(), |&(i, _)| i);
    let has_tail = nucleus_end < list.len();

    // pre-head
    apply_pitch_path(
        &mut list[..head_begin],
        base_pitch,
        inflection,
        table.prehead.0,
        table.prehead.1,
    );

    // head
    if head_begin < nucleus_begin {
        apply_head(
            list,
            &syllables[first_primary..nucleus_syl],
            nucleus_begin,
            table,
            base_pitch,
            inflection,
        );
    }

    // nucleus
    let pcts = if has_tail {
        table.nucleus
    } else {
        table.nucleus_no_tail
    };
    apply_pitch_path(
        &mut list[nucleus_begin..nucleus_end],
        base_pitch,
        inflection,
        pcts.0,
        pcts.1,
    );

    // tail
    if has_tail {
        apply_pitch_path(
            &mut list[nucleus_end..],
            base_pitch,
            inflection,
            table.tail.0,
            table.tail.1,
        );
    }

    fill_unset(list, base_pitch);
    log::debug!(
        "intonation: {} syllables, nucleus at segment {nucleus_begin}, tail: {has_tail}",
        syllables.len()
    );
}

/// Decomposes the head span into stressed syllables and unstressed runs.
///
/// `head_syllables` starts with the head-initial primary-stressed syllable
/// and excludes the nucleus; `head_end` is the nucleus' first segment index.
fn apply_head(
    list: &mut [Segment],
    head_syllables: &[(usize, Stress)],
    head_end: usize,
    table: &ContourTable,
    base_pitch: f64,
    inflection: f64,
) {
    let (d1, d2) = UNSTRESSED_RUN_DELTAS;
    let mut stressed_seen = 0usize;
    let mut last_stressed_end = table.head.0;

    let mut k = 0;
    while k < head_syllables.len() {
        let begin = head_syllables[k].0;
        if head_syllables[k].1 == Stress::Unstressed {
            // merge consecutive unstressed syllables into one run
            let mut j = k;
            while j + 1 < head_syllables.len()
                && head_syllables[j + 1].1 == Stress::Unstressed
            {
                j += 1;
            }
            let end = head_syllables
                .get(j + 1)
                .map_or(head_end, |&(i, _)| i);
            // the final run approaches the nucleus at the head's end value
            let (start_pct, end_pct) = if end == head_end {
                (last_stressed_end - d1, table.head.1)
            } else {
                (last_stressed_end - d1, last_stressed_end - d2)
            };
            apply_pitch_path(&mut list[begin..end], base_pitch, inflection, start_pct, end_pct);
            k = j + 1;
        } else {
            let end = head_syllables
                .get(k + 1)
                .map_or(head_end, |&(i, _)| i);
            let start_pct = if stressed_seen == 0 {
                table.head.0
            } else {
                head_step(table.head_steps, stressed_seen - 1)
            };
            let end_pct = start_pct - HEAD_STRESS_DROP;
            apply_pitch_path(&mut list[begin..end], base_pitch, inflection, start_pct, end_pct);
            last_stressed_end = end_pct;
            stressed_seen += 1;
            k += 1;
        }
    }
}

/// Gives any segment the zones missed a flat pitch continuing its
/// predecessor, so the every-segment-has-pitch invariant always holds.
fn fill_unset(list: &mut [Segment], base_pitch: f64) {
    let mut last_end = base_pitch;
    for seg in list {
        if seg.pitch.is_none() {
            seg.pitch = Some(last_end);
            seg.mid_pitch = Some(last_end);
            seg.end_pitch = Some(last_end);
        }
        if let Some(end) = seg.end_pitch {
            last_end = end;
        }
    }
}
