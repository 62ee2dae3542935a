//! The compiler's intermediate representation: one mutable [`Segment`] per
//! realized phoneme (or synthetic insertion), owned by a single compile call.
//!
//! Passes refer to neighbours by index into the segment list, never by
//! reference, so no aliasing can leak between passes.

use alloc::string::String;
use alloc::vec::Vec;

use crate::frame::FrameParams;
use crate::template::{PhonemeFlags, PhonemeTemplate, Place};

/// Stress level of a syllable-start segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Stress {
    #[default]
    Unstressed,
    Secondary,
    Primary,
}

/// Lexical tone attached by a diacritic or tone-letter sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    ExtraHigh,
    High,
    Mid,
    Low,
    ExtraLow,
    Rising,
    Falling,
}

/// Coarse phoneme class used by the coarticulation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegClass {
    Stop,
    Fricative,
    Nasal,
    Liquid,
    Semivowel,
    Vowel,
    Other,
}

/// One segment of the utterance under compilation.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Source glyph, `None` for synthetic segments and trailing diphthong
    /// components.
    pub source: Option<char>,
    /// Parameter bag copied from the template; `None` for silence.
    pub params: Option<FrameParams>,
    pub flags: PhonemeFlags,
    pub place: Option<Place>,
    /// Diphthong component symbols carried over from the template; consumed
    /// and cleared by the list builder.
    pub components: Vec<String>,
    pub stress: Stress,
    pub word_start: bool,
    pub syllable_start: bool,
    /// This segment is a non-final diphthong component tied to the next.
    pub tied_to: bool,
    /// This segment is a non-initial diphthong component tied to the previous.
    pub tied_from: bool,
    /// A length mark followed this segment in the source.
    pub lengthened: bool,
    pub tone: Option<Tone>,
    /// Synthetic aspiration segment inserted after an unvoiced stop.
    pub post_stop_aspiration: bool,
    /// Synthetic fade-out copy of a voiced segment before a stop gap.
    pub fade_to_silence: bool,
    /// Synthetic silence gap before a stop closure.
    pub pre_stop_gap: bool,
    /// Silence segment: carries no parameter bag.
    pub silence: bool,
    /// Steady-state duration in ms, written by the duration pass.
    pub duration: f64,
    /// Transition time in ms, written by the duration and coarticulation
    /// passes.
    pub fade_duration: f64,
    /// Pitch at segment start in Hz, written by the intonation pass.
    pub pitch: Option<f64>,
    pub mid_pitch: Option<f64>,
    pub end_pitch: Option<f64>,
    /// F2 onset override from the locus equation, if any.
    pub onset_f2: Option<f64>,
    /// F3 onset override, if any.
    pub onset_f3: Option<f64>,
}

impl Segment {
    /// Clones a template into a fresh segment for one occurrence.
    pub fn from_template(template: &PhonemeTemplate, source: char) -> Self {
        Segment {
            source: Some(source),
            params: Some(template.params.clone()),
            flags: template.flags,
            place: template.place,
            components: template.components.clone(),
            ..Segment::silence()
        }
    }

    /// A bare silence segment.
    pub fn silence() -> Self {
        Segment {
            source: None,
            params: None,
            flags: PhonemeFlags::default(),
            place: None,
            components: Vec::new(),
            stress: Stress::Unstressed,
            word_start: false,
            syllable_start: false,
            tied_to: false,
            tied_from: false,
            lengthened: false,
            tone: None,
            post_stop_aspiration: false,
            fade_to_silence: false,
            pre_stop_gap: false,
            silence: false,
            duration: 0.0,
            fade_duration: 0.0,
            pitch: None,
            mid_pitch: None,
            end_pitch: None,
            onset_f2: None,
            onset_f3: None,
        }
    }

    /// True for segments whose pitch path the synthesizer will actually use.
    pub fn is_voiced(&self) -> bool {
        !self.silence && self.flags.voiced
    }

    /// True for segments inserted by the list builder rather than scanned
    /// from the source text.
    pub fn is_synthetic(&self) -> bool {
        self.silence || self.post_stop_aspiration || self.fade_to_silence
    }

    /// Coarse class for coarticulation decisions.
    pub fn class(&self) -> SegClass {
        if self.silence {
            SegClass::Other
        } else if self.flags.vowel {
            SegClass::Vowel
        } else if self.flags.stop || self.flags.affricate {
            SegClass::Stop
        } else if self.flags.nasal {
            SegClass::Nasal
        } else if self.flags.liquid {
            SegClass::Liquid
        } else if self.flags.semivowel {
            SegClass::Semivowel
        } else {
            // consonant with no other class flag: treat as fricative
            SegClass::Fricative
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silence_is_synthetic_and_unvoiced() {
        let mut s = Segment::silence();
        s.silence = true;
        assert!(s.is_synthetic());
        assert!(!s.is_voiced());
        assert_eq!(s.class(), SegClass::Other);
    }

    #[test]
    fn class_prefers_vowel_over_voicing() {
        let mut s = Segment::silence();
        s.flags.vowel = true;
        s.flags.voiced = true;
        assert_eq!(s.class(), SegClass::Vowel);
        s.flags.vowel = false;
        s.flags.nasal = true;
        assert_eq!(s.class(), SegClass::Nasal);
    }
}
