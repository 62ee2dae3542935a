//! Pass 6: coarticulation.
//!
//! Two effects, both local to a segment pair:
//!
//! * **Onset formants.** A vowel after an obstruent or nasal does not start
//!   at its steady-state formants; its F2 onset is predicted by the locus
//!   equation `onset = locus + k * (target - locus)` with the locus taken
//!   from the consonant's place of articulation, and its F3 onset uses the
//!   consonant's own F3 as a pseudo-locus. The overrides become short
//!   waypoint frames in the emitter; the segment's steady state is never
//!   replaced.
//! * **Transition fades.** The fade into a segment is refined by the
//!   class pair it forms with its predecessor. Retroflex consonants get a
//!   fixed, long vowel transition instead of the pair lookup.

use crate::segment::{SegClass, Segment};
use crate::template::Place;

/// Locus equation weight for F2: how much of the distance from locus to
/// target the onset has already covered.
const LOCUS_K2: f64 = 0.75;
/// Pseudo-locus weight for F3.
const LOCUS_K3: f64 = 0.85;
/// Vowel fade after a retroflex consonant, in ms at speed 1.
const RETROFLEX_FADE_MS: f64 = 60.0;

/// Transition fade in ms for a (predecessor, current) class pair.
fn pair_fade_ms(prev: SegClass, cur: SegClass) -> f64 {
    match (prev, cur) {
        (SegClass::Stop, SegClass::Vowel) => 40.0,
        (SegClass::Fricative, SegClass::Vowel) => 30.0,
        (SegClass::Nasal, SegClass::Vowel) => 25.0,
        (SegClass::Liquid, SegClass::Vowel) => 55.0,
        (SegClass::Semivowel | SegClass::Vowel, SegClass::Vowel) => 60.0,
        (SegClass::Nasal, SegClass::Stop) => 15.0,
        _ => 20.0,
    }
}

/// Applies onset-formant overrides and fade refinements to the list.
pub fn apply(list: &mut [Segment], speed: f64) {
    for i in 1..list.len() {
        if list[i].silence || list[i].is_synthetic() {
            continue;
        }
        if list[i - 1].silence {
            continue;
        }

        // classify the predecessor; aspiration is transparent, the stop
        // behind it is what shapes the transition
        let mut p = i - 1;
        if list[p].post_stop_aspiration && p > 0 && !list[p - 1].silence {
            p -= 1;
        }
        let prev_class = list[p].class();
        let cur_class = list[i].class();

        if cur_class == SegClass::Vowel {
            if matches!(
                prev_class,
                SegClass::Stop | SegClass::Fricative | SegClass::Nasal
            ) {
                apply_locus(list, p, i);
            }
            if list[p].place == Some(Place::Retroflex) {
                list[i].fade_duration = RETROFLEX_FADE_MS / speed;
                continue;
            }
        }

        list[i].fade_duration = pair_fade_ms(prev_class, cur_class) / speed;
    }
}

/// Computes the vowel's onset F2/F3 from the locus equation. A consonant
/// with no locus (glottal place, or no place at all) contributes nothing.
fn apply_locus(list: &mut [Segment], cons: usize, vowel: usize) {
    let Some(locus) = list[cons].place.and_then(Place::locus) else {
        return;
    };
    let Some(cons_f3) = list[cons].params.as_ref().map(|p| p.f3_freq) else {
        return;
    };
    let Some(params) = list[vowel].params.as_ref() else {
        return;
    };
    let target_f2 = params.f2_freq;
    let target_f3 = params.f3_freq;
    list[vowel].onset_f2 = Some(locus + LOCUS_K2 * (target_f2 - locus));
    list[vowel].onset_f3 = Some(cons_f3 + LOCUS_K3 * (target_f3 - cons_f3));
}
