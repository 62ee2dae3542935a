//! Pass 3: assigns a duration and transition fade to every segment.
//!
//! All times are in milliseconds. The per-syllable speed is reset at each
//! syllable start from its stress level: stressed syllables are spoken
//! faster, so their base durations shrink (primary by 1.4, secondary by
//! 1.1). Class-specific overrides are evaluated in priority order; the
//! first matching rule wins.

use crate::segment::{Segment, Stress};

/// How much a length mark stretches the final duration.
const LENGTH_MARK_FACTOR: f64 = 1.05;

/// Populates `duration` and `fade_duration` on every segment.
pub fn assign(list: &mut [Segment], speed: f64) {
    let mut current_speed = speed;
    for i in 0..list.len() {
        if list[i].syllable_start {
            current_speed = match list[i].stress {
                Stress::Primary => speed * 1.4,
                Stress::Secondary => speed * 1.1,
                Stress::Unstressed => speed,
            };
        }

        let mut duration = 60.0 / current_speed;
        let mut fade = 10.0 / current_speed;

        let seg = &list[i];
        if seg.fade_to_silence {
            duration = 10.0 / speed;
            fade = 10.0 / speed;
        } else if seg.silence {
            // pre-stop closure gap; only the duration is overridden
            duration = 20.0 / speed;
        } else if seg.post_stop_aspiration {
            duration = 20.0 / speed;
        } else if seg.flags.stop {
            // stop bursts stay short even in slow speech
            duration = (6.0 / speed).min(6.0);
            fade = 3.0 / speed;
        } else if seg.flags.affricate {
            duration = 24.0 / speed;
            fade = 5.0 / speed;
        } else if !seg.flags.voiced {
            duration = 45.0 / speed;
        } else if seg.flags.vowel {
            if seg.tied_from {
                duration = 20.0 / speed;
                fade = 20.0 / speed;
            } else if seg.tied_to {
                duration = 40.0 / speed;
            } else if seg.stress == Stress::Unstressed && !seg.syllable_start {
                // an unstressed vowel shortens before a tautosyllabic
                // liquid or nasal
                if let Some(n) = next_real_in_word(list, i) {
                    if list[n].flags.liquid {
                        duration = 30.0 / speed;
                    } else if list[n].flags.nasal {
                        duration = 40.0 / speed;
                    }
                }
            }
        } else {
            // voiced non-vowel
            duration = 30.0 / speed;
            if seg.flags.liquid || seg.flags.semivowel {
                fade = 20.0 / speed;
            }
        }

        if list[i].lengthened {
            duration *= LENGTH_MARK_FACTOR;
        }

        // glides bleed into a following vowel
        if list[i].flags.vowel
            && i > 0
            && (list[i - 1].flags.liquid || list[i - 1].flags.semivowel)
        {
            fade = 25.0 / speed;
        }

        list[i].duration = duration;
        list[i].fade_duration = fade;
    }
}

/// Index of the next real segment in the same word, if any.
fn next_real_in_word(list: &[Segment], i: usize) -> Option<usize> {
    for j in i + 1..list.len() {
        if list[j].is_synthetic() {
            continue;
        }
        if list[j].word_start {
            return None;
        }
        return Some(j);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build;
    use crate::segmenter::scan;
    use crate::table::builtin_store;

    const EPSILON: f64 = 1E-9;

    fn timed(text: &str, speed: f64) -> alloc::vec::Vec<Segment> {
        let store = builtin_store();
        let items = scan(&store, text).unwrap();
        let mut warnings = alloc::vec::Vec::new();
        let mut list = build(items, &store, &mut warnings).unwrap();
        assign(&mut list, speed);
        list
    }

    fn find(list: &[Segment], c: char) -> &Segment {
        list.iter().find(|s| s.source == Some(c)).unwrap()
    }

    #[test]
    fn stop_and_vowel_durations_at_unit_speed() {
        let list = timed("pa", 1.0);
        let p = find(&list, 'p');
        assert!((p.duration - 6.0).abs() < EPSILON);
        assert!((p.fade_duration - 3.0).abs() < EPSILON);
        let a = find(&list, 'a');
        assert!((a.duration - 60.0).abs() < EPSILON);
    }

    #[test]
    fn stop_duration_is_capped_in_slow_speech() {
        let list = timed("pa", 0.5);
        let p = find(&list, 'p');
        assert!((p.duration - 6.0).abs() < EPSILON);
    }

    #[test]
    fn pre_stop_gap_keeps_the_base_fade() {
        let list = timed("pa", 2.0);
        let gap = list.iter().find(|s| s.pre_stop_gap).unwrap();
        assert!((gap.duration - 10.0).abs() < EPSILON);
        assert!((gap.fade_duration - 5.0).abs() < EPSILON);
    }

    #[test]
    fn primary_stress_shortens_the_syllable() {
        let plain = find(&timed("pa", 1.0), 'a').duration;
        let stressed = find(&timed("ˈpa", 1.0), 'a').duration;
        assert!((stressed - plain / 1.4).abs() < EPSILON);
    }

    #[test]
    fn every_non_silence_segment_gets_positive_duration() {
        let list = timed("ˈpat͡ʃa mo˥ liː", 1.3);
        for seg in &list {
            if !seg.silence {
                assert!(seg.duration > 0.0);
            }
        }
    }

    #[test]
    fn length_mark_stretches_duration() {
        let plain = find(&timed("ta", 1.0), 'a').duration;
        let long = find(&timed("taː", 1.0), 'a').duration;
        assert!((long - plain * 1.05).abs() < EPSILON);
    }

    #[test]
    fn diphthong_components_split_forty_twenty() {
        let list = timed("a͡ɪ", 1.0);
        assert!((list[0].duration - 40.0).abs() < EPSILON);
        assert!((list[1].duration - 20.0).abs() < EPSILON);
        assert!((list[1].fade_duration - 20.0).abs() < EPSILON);
    }

    #[test]
    fn unstressed_vowel_shortens_before_nasal_same_word() {
        // the u is not a syllable start (it follows a vowel) and precedes
        // a nasal in the same word
        let list = timed("aun", 1.0);
        let u = find(&list, 'u');
        assert!((u.duration - 40.0).abs() < EPSILON);
        // across a word boundary the rule does not fire
        let split = timed("au na", 1.0);
        let u = find(&split, 'u');
        assert!((u.duration - 60.0).abs() < EPSILON);
    }
}
