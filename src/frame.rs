//! Frame records handed to the downstream formant synthesizer.
//!
//! The compiler never interprets these numbers; it copies them from the
//! phoneme templates, fills in the pitch path, and forwards them.

/// Acoustic parameters for a single steady-state (or waypoint) frame.
///
/// Every parameter a frame can carry is a named field. There is no dynamic
/// parameter bag: a name that is not listed here does not exist, and a
/// template that wants to set one is a programming error caught at the type
/// level rather than silently accepted.
///
/// Frequencies are in Hz, bandwidths in Hz, amplitudes in dB (0 dB = nominal
/// level, -99 dB = effectively off).
#[derive(Debug, Clone, PartialEq)]
pub struct FrameParams {
    /// oral formant F1 frequency
    pub f1_freq: f64,
    /// oral formant F1 bandwidth
    pub f1_bw: f64,
    /// oral formant F2 frequency
    pub f2_freq: f64,
    /// oral formant F2 bandwidth
    pub f2_bw: f64,
    /// oral formant F3 frequency
    pub f3_freq: f64,
    /// oral formant F3 bandwidth
    pub f3_bw: f64,
    /// oral formant F4 frequency
    pub f4_freq: f64,
    /// oral formant F4 bandwidth
    pub f4_bw: f64,
    /// nasal pole frequency
    pub nasal_pole_freq: f64,
    /// nasal pole bandwidth
    pub nasal_pole_bw: f64,
    /// voicing source amplitude
    pub voicing_db: f64,
    /// aspiration noise amplitude
    pub aspiration_db: f64,
    /// frication noise amplitude
    pub frication_db: f64,
    /// parallel bypass path amplitude
    pub bypass_db: f64,
    /// spectral tilt of the glottal source
    pub tilt_db: f64,
    /// overall frame gain
    pub gain_db: f64,
    /// fundamental frequency at frame start, written by the frame emitter
    pub f0: f64,
    /// fundamental frequency at the frame midpoint
    pub f0_mid: f64,
    /// fundamental frequency at frame end
    pub f0_end: f64,
    /// uniform formant scale factor, forwarded unmodified from the caller
    pub formant_scale: f64,
}

impl Default for FrameParams {
    /// A silent, neutral-tract frame: schwa-like formants, all sources off.
    fn default() -> Self {
        FrameParams {
            f1_freq: 500.0,
            f1_bw: 60.0,
            f2_freq: 1500.0,
            f2_bw: 90.0,
            f3_freq: 2500.0,
            f3_bw: 150.0,
            f4_freq: 3500.0,
            f4_bw: 200.0,
            nasal_pole_freq: 250.0,
            nasal_pole_bw: 100.0,
            voicing_db: -99.0,
            aspiration_db: -99.0,
            frication_db: -99.0,
            bypass_db: -99.0,
            tilt_db: 0.0,
            gain_db: 0.0,
            f0: 0.0,
            f0_mid: 0.0,
            f0_end: 0.0,
            formant_scale: 1.0,
        }
    }
}

/// One item of the emitted frame sequence.
///
/// `params == None` is a silence gap: the synthesizer should emit
/// `duration_ms` of silence and may use `fade_ms` to ramp into it.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameItem {
    /// Frame parameters, or `None` for silence.
    pub params: Option<FrameParams>,
    /// Steady-state duration of this frame in milliseconds.
    pub duration_ms: f64,
    /// Transition time into this frame in milliseconds.
    pub fade_ms: f64,
    /// The source character this frame realizes. `None` for silence and for
    /// synthetic frames (aspiration, fade-outs, coarticulation waypoints).
    pub source: Option<char>,
}
