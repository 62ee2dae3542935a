//! Pass 5: lexical tone overlay.
//!
//! Runs after the intonation engine and unconditionally wins on any segment
//! carrying an explicit tone mark; everything else is left untouched.

use crate::segment::{Segment, Tone};

/// Base-pitch multiplier for a level tone.
fn level_multiplier(tone: Tone) -> Option<f64> {
    match tone {
        Tone::ExtraHigh => Some(1.35),
        Tone::High => Some(1.2),
        Tone::Mid => Some(1.0),
        Tone::Low => Some(0.85),
        Tone::ExtraLow => Some(0.7),
        Tone::Rising | Tone::Falling => None,
    }
}

/// Start/end multipliers for a contour tone.
fn contour_multipliers(tone: Tone) -> Option<(f64, f64)> {
    match tone {
        Tone::Rising => Some((0.9, 1.2)),
        Tone::Falling => Some((1.2, 0.9)),
        _ => None,
    }
}

/// Overrides the pitch path on every toned segment.
pub fn apply(list: &mut [Segment], base_pitch: f64) {
    for seg in list {
        let Some(tone) = seg.tone else {
            continue;
        };
        if let Some(m) = level_multiplier(tone) {
            let p = base_pitch * m;
            seg.pitch = Some(p);
            seg.mid_pitch = Some(p);
            seg.end_pitch = Some(p);
        } else if let Some((m0, m1)) = contour_multipliers(tone) {
            let p0 = base_pitch * m0;
            let p1 = base_pitch * m1;
            seg.pitch = Some(p0);
            seg.mid_pitch = Some(f64::midpoint(p0, p1));
            seg.end_pitch = Some(p1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::Segment;

    const EPSILON: f64 = 1E-9;

    fn toned(tone: Option<Tone>) -> Segment {
        let mut seg = Segment::silence();
        seg.flags.vowel = true;
        seg.flags.voiced = true;
        seg.tone = tone;
        seg.pitch = Some(111.0);
        seg.mid_pitch = Some(112.0);
        seg.end_pitch = Some(113.0);
        seg
    }

    #[test]
    fn level_tone_flattens_pitch() {
        let mut list = [toned(Some(Tone::High))];
        apply(&mut list, 100.0);
        assert!((list[0].pitch.unwrap() - 120.0).abs() < EPSILON);
        assert!((list[0].end_pitch.unwrap() - 120.0).abs() < EPSILON);
    }

    #[test]
    fn contour_tone_sets_both_endpoints() {
        let mut list = [toned(Some(Tone::Rising))];
        apply(&mut list, 100.0);
        assert!((list[0].pitch.unwrap() - 90.0).abs() < EPSILON);
        assert!((list[0].end_pitch.unwrap() - 120.0).abs() < EPSILON);
        let mut list = [toned(Some(Tone::Falling))];
        apply(&mut list, 100.0);
        assert!(list[0].pitch.unwrap() > list[0].end_pitch.unwrap());
    }

    #[test]
    fn untoned_segments_are_never_touched() {
        let mut list = [toned(None)];
        apply(&mut list, 100.0);
        assert!((list[0].pitch.unwrap() - 111.0).abs() < EPSILON);
        assert!((list[0].mid_pitch.unwrap() - 112.0).abs() < EPSILON);
        assert!((list[0].end_pitch.unwrap() - 113.0).abs() < EPSILON);
    }

    #[test]
    fn high_low_ratio_is_fixed() {
        let mut high = [toned(Some(Tone::High))];
        let mut low = [toned(Some(Tone::Low))];
        apply(&mut high, 100.0);
        apply(&mut low, 100.0);
        let ratio = high[0].pitch.unwrap() / low[0].pitch.unwrap();
        assert!((ratio - 1.2 / 0.85).abs() < EPSILON);
    }
}
