//! Pass 2: turns the scanned items into the canonical segment list.
//!
//! This is the only pass that changes the segment count: it inserts
//! post-stop aspiration, pre-stop silence gaps with their fade-out copies,
//! and expands diphthong templates into tied component segments. After this
//! pass the list's length and order are frozen.

use alloc::vec::Vec;

use crate::error::{CompileError, CompileWarning};
use crate::segment::{Segment, Stress};
use crate::segmenter::{STRESS_PRIMARY, STRESS_SECONDARY, ScanItem};
use crate::template::TemplateStore;

/// Builds the canonical segment list from the segmenter's output.
///
/// Unknown characters are reported into `warnings` and skipped; the build
/// itself only fails if the template store stops answering.
pub fn build<S: TemplateStore>(
    items: Vec<ScanItem>,
    store: &S,
    warnings: &mut Vec<CompileWarning>,
) -> Result<Vec<Segment>, CompileError> {
    let mut list: Vec<Segment> = Vec::new();
    let mut new_word = true;
    let mut pending_stress: Option<Stress> = None;
    // index of the last real (scanned, non-synthetic) segment in `list`
    let mut last_real: Option<usize> = None;

    for (index, (c, seg)) in items.into_iter().enumerate() {
        if c.is_whitespace() {
            new_word = true;
            continue;
        }
        if c == STRESS_PRIMARY {
            pending_stress = Some(Stress::Primary);
            continue;
        }
        if c == STRESS_SECONDARY {
            pending_stress = Some(Stress::Secondary);
            continue;
        }
        let Some(seg) = seg else {
            log::warn!("no phoneme for character {c:?} at {index}");
            warnings.push(CompileWarning::UnknownSymbol { ch: c, index });
            continue;
        };

        let parts = expand_components(seg, store)?;
        push_segment(&mut list, parts, &mut new_word, &mut pending_stress, &mut last_real, store)?;
    }
    Ok(list)
}

/// Expands a diphthong segment into tied component segments. Ordinary
/// segments come back as a single part. If any component symbol is missing
/// from the store, the segment is kept whole (its own parameter bag already
/// describes the first component's steady state).
fn expand_components<S: TemplateStore>(
    mut seg: Segment,
    store: &S,
) -> Result<Vec<Segment>, CompileError> {
    let components = core::mem::take(&mut seg.components);
    if components.len() < 2 {
        return Ok(alloc::vec![seg]);
    }
    let mut parts: Vec<Segment> = Vec::with_capacity(components.len());
    for symbol in &components {
        match store.lookup(symbol)? {
            Some(template) => {
                let mut part = Segment {
                    source: None,
                    ..Segment::from_template(template, '\0')
                };
                part.components = Vec::new();
                parts.push(part);
            }
            None => {
                log::debug!("diphthong component {symbol:?} not in store; keeping whole segment");
                return Ok(alloc::vec![seg]);
            }
        }
    }
    let last = parts.len() - 1;
    for (k, part) in parts.iter_mut().enumerate() {
        part.tied_to = k < last;
        part.tied_from = k > 0;
    }
    // the first component carries the source glyph and any annotations
    parts[0].source = seg.source;
    parts[0].tone = seg.tone;
    parts[0].lengthened = seg.lengthened;
    Ok(parts)
}

/// Applies the builder rules to one recognized segment (or diphthong part
/// sequence) and appends it, with any synthetic insertions, to the list.
fn push_segment<S: TemplateStore>(
    list: &mut Vec<Segment>,
    parts: Vec<Segment>,
    new_word: &mut bool,
    pending_stress: &mut Option<Stress>,
    last_real: &mut Option<usize>,
    store: &S,
) -> Result<(), CompileError> {
    let mut parts = parts.into_iter();
    let Some(mut seg) = parts.next() else {
        return Ok(());
    };

    let prev_vowel = last_real.map(|i| list[i].flags.vowel);
    // A vowel after a consonant continues that consonant's syllable when the
    // consonant opened it; it only begins a new syllable after a coda.
    let prev_opens_syllable = last_real.map(|i| list[i].syllable_start) == Some(true);

    // Rule 1: syllable-start detection. Word starts always begin a syllable;
    // otherwise a vowel after a coda consonant does, as does a
    // primary-stressed segment after a vowel.
    seg.word_start = *new_word;
    seg.syllable_start = *new_word
        || (prev_vowel == Some(false) && seg.flags.vowel && !prev_opens_syllable)
        || (*pending_stress == Some(Stress::Primary) && prev_vowel == Some(true));

    // Rule 2: aspiration after an unvoiced stop, before a voiced continuant.
    if let Some(p) = *last_real {
        let prev = &list[p];
        if prev.flags.stop
            && !prev.flags.voiced
            && seg.flags.voiced
            && !seg.flags.stop
            && !seg.flags.affricate
            && let Some(template) = store.lookup("h")?
        {
            let mut aspiration = Segment {
                source: None,
                ..Segment::from_template(template, '\0')
            };
            aspiration.components = Vec::new();
            aspiration.post_stop_aspiration = true;
            list.push(aspiration);
        }
    }

    // Rule 3: closure gap before an unstressed stop or affricate. A stressed
    // stop skips the gap; observed behavior, kept as-is.
    if (seg.flags.stop || seg.flags.affricate) && pending_stress.is_none() {
        if let Some(p) = *last_real
            && list[p].flags.voiced
        {
            let mut fade_out = list[p].clone();
            fade_out.source = None;
            fade_out.tone = None;
            fade_out.fade_to_silence = true;
            fade_out.word_start = false;
            fade_out.syllable_start = false;
            fade_out.stress = Stress::Unstressed;
            fade_out.tied_to = false;
            fade_out.tied_from = false;
            list.push(fade_out);
        }
        let mut gap = Segment::silence();
        gap.silence = true;
        gap.pre_stop_gap = true;
        list.push(gap);
    }

    // Rule 4: pending stress lands on the syllable-start segment.
    if seg.syllable_start
        && let Some(stress) = pending_stress.take()
    {
        seg.stress = stress;
    }

    *new_word = false;
    list.push(seg);
    *last_real = Some(list.len() - 1);

    // trailing diphthong components follow their head directly
    for part in parts {
        list.push(part);
        *last_real = Some(list.len() - 1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmenter::scan;
    use crate::table::builtin_store;

    fn build_str(text: &str) -> Vec<Segment> {
        let store = builtin_store();
        let items = scan(&store, text).unwrap();
        let mut warnings = Vec::new();
        build(items, &store, &mut warnings).unwrap()
    }

    #[test]
    fn onset_consonant_opens_the_syllable() {
        let list = build_str("pa");
        // gap, p, aspiration, a
        let sources: Vec<Option<char>> = list.iter().map(|s| s.source).collect();
        assert_eq!(sources, alloc::vec![None, Some('p'), None, Some('a')]);
        assert!(list[0].pre_stop_gap);
        assert!(list[1].word_start && list[1].syllable_start);
        assert!(list[2].post_stop_aspiration);
        // the vowel continues the syllable its onset opened
        assert!(!list[3].syllable_start);
    }

    #[test]
    fn vowel_after_coda_consonant_starts_a_syllable() {
        let list = build_str("mama");
        let starts: Vec<bool> = list.iter().map(|s| s.syllable_start).collect();
        // m opens the first syllable, the second m is a coda for rule
        // purposes until its vowel arrives
        assert_eq!(starts, alloc::vec![true, false, false, true]);
    }

    #[test]
    fn stressed_stop_skips_the_gap() {
        let list = build_str("ˈpa");
        assert!(!list[0].silence);
        assert_eq!(list[0].source, Some('p'));
        assert_eq!(list[0].stress, Stress::Primary);
    }

    #[test]
    fn pending_stress_lands_on_syllable_start() {
        let list = build_str("paˈta");
        let t = list.iter().find(|s| s.source == Some('t')).unwrap();
        assert_eq!(t.stress, Stress::Primary);
        assert!(t.syllable_start);
    }

    #[test]
    fn voiced_predecessor_gets_fade_out_before_gap() {
        let list = build_str("ap");
        // a, fade-out copy of a, gap, p
        assert_eq!(list.len(), 4);
        assert!(list[1].fade_to_silence);
        assert!(list[1].flags.vowel);
        assert_eq!(list[1].source, None);
        assert!(list[2].pre_stop_gap && list[2].silence);
    }

    #[test]
    fn word_boundary_resets_word_start() {
        let list = build_str("ma na");
        let n = list.iter().find(|s| s.source == Some('n')).unwrap();
        assert!(n.word_start && n.syllable_start);
        let m = list.iter().find(|s| s.source == Some('m')).unwrap();
        assert!(m.word_start);
    }

    #[test]
    fn diphthong_expands_into_tied_components() {
        let list = build_str("a͡ɪ");
        assert_eq!(list.len(), 2);
        assert!(list[0].tied_to && !list[0].tied_from);
        assert!(list[1].tied_from && !list[1].tied_to);
        assert_eq!(list[0].source, Some('a'));
        assert_eq!(list[1].source, None);
    }

    #[test]
    fn unknown_characters_produce_warnings_not_segments() {
        let store = builtin_store();
        let items = scan(&store, "a9").unwrap();
        let mut warnings = Vec::new();
        let list = build(items, &store, &mut warnings).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(
            warnings,
            alloc::vec![CompileWarning::UnknownSymbol { ch: '9', index: 1 }]
        );
    }
}
