//! Pass 7: converts the finalized segment list into the emitted frame
//! sequence.
//!
//! [`FrameStream`] is a finite, single-pass, by-value iterator: it owns the
//! segment list, hands out each frame exactly once, and cannot be restarted.
//! Obtaining the sequence again means re-running the whole compile. If the
//! consumer stops pulling, no further work happens; there is nothing to
//! cancel.

use alloc::vec::Vec;

use crate::error::CompileWarning;
use crate::frame::{FrameItem, FrameParams};
use crate::segment::Segment;

/// The lazily emitted frame sequence for one utterance.
#[derive(Debug)]
pub struct FrameStream {
    segments: alloc::vec::IntoIter<Segment>,
    /// steady-state frame queued behind an onset waypoint
    queued: Option<FrameItem>,
    warnings: Vec<CompileWarning>,
    base_pitch: f64,
    formant_scale: f64,
    tilt_db: Option<f64>,
}

impl FrameStream {
    pub(crate) fn new(
        list: Vec<Segment>,
        warnings: Vec<CompileWarning>,
        base_pitch: f64,
        formant_scale: Option<f64>,
        tilt_db: Option<f64>,
    ) -> Self {
        FrameStream {
            segments: list.into_iter(),
            queued: None,
            warnings,
            base_pitch,
            formant_scale: formant_scale.unwrap_or(1.0),
            tilt_db,
        }
    }

    /// Recoverable input problems encountered while compiling this
    /// utterance.
    pub fn warnings(&self) -> &[CompileWarning] {
        &self.warnings
    }
}

impl Iterator for FrameStream {
    type Item = FrameItem;

    fn next(&mut self) -> Option<FrameItem> {
        if let Some(item) = self.queued.take() {
            return Some(item);
        }
        let seg = self.segments.next()?;

        let Some(params) = seg.params else {
            // silence gap
            return Some(FrameItem {
                params: None,
                duration_ms: seg.duration,
                fade_ms: seg.fade_duration,
                source: None,
            });
        };

        let mut params = params;
        params.formant_scale = self.formant_scale;
        if let Some(tilt) = self.tilt_db {
            params.tilt_db = tilt;
        }
        params.f0 = seg.pitch.unwrap_or(self.base_pitch);
        params.f0_end = seg.end_pitch.unwrap_or(params.f0);
        let mid = f64::midpoint(params.f0, params.f0_end);
        params.f0_mid = seg.mid_pitch.unwrap_or(mid);

        let steady = FrameItem {
            params: Some(params.clone()),
            duration_ms: seg.duration,
            fade_ms: seg.fade_duration,
            source: seg.source,
        };

        if seg.onset_f2.is_none() && seg.onset_f3.is_none() {
            return Some(steady);
        }

        // onset waypoint: same bag with the formant onsets swapped in, held
        // for the transition time, never carrying the source char
        let mut onset: FrameParams = params;
        if let Some(f2) = seg.onset_f2 {
            onset.f2_freq = f2;
        }
        if let Some(f3) = seg.onset_f3 {
            onset.f3_freq = f3;
        }
        onset.f0_mid = onset.f0;
        onset.f0_end = onset.f0;
        let waypoint = FrameItem {
            params: Some(onset),
            duration_ms: seg.fade_duration,
            fade_ms: 0.0,
            source: None,
        };
        self.queued = Some(steady);
        Some(waypoint)
    }
}
