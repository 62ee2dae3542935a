//! IPA-to-synthesis-frame compiler in Rust.
//!
//! *NOTE*: This is _not_ a synthesizer. It turns a free-form Unicode IPA
//! transcription into an ordered, precisely timed sequence of acoustic
//! parameter frames (or silence gaps) for a downstream Klatt-style formant
//! engine to consume. What happens to the frames afterwards is out of scope.
//!
//! The pipeline is a small compiler: the segmenter and list builder produce
//! the segment list, then the duration, intonation, tone, and coarticulation
//! passes each walk it once, and the frame emitter streams it out. All
//! passes run eagerly inside [`Compiler::compile`]; only the emission is
//! lazy, and it is single-consumption.
//!
//! ```
//! use ipa_frames::{builtin_store, CompileOptions, Compiler};
//!
//! let compiler = Compiler::new(builtin_store());
//! let frames = compiler.compile("ˈpa", &CompileOptions::default()).unwrap();
//! assert!(frames.count() > 0);
//! ```
//!
//! ## `no_std`
//!
//! This library is `no_std` compatible with the `libm` feature (and
//! `alloc`), mirroring the engine it feeds.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(
    clippy::all,
    clippy::cargo,
    clippy::pedantic,
    unsafe_code,
    rustdoc::all
)]
#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::struct_field_names
)]

#[cfg(all(feature = "std", feature = "libm"))]
compile_error!("Features \"std\" and \"libm\" are mutually exclusive.");

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("Must specify a math feature: either \"std\" or \"libm\".");

extern crate alloc;

mod builder;
mod coart;
mod duration;
mod emit;
mod error;
mod frame;
mod intonation;
mod math;
mod segment;
mod segmenter;
mod table;
mod template;
mod tone;

pub use emit::FrameStream;
pub use error::{CompileError, CompileWarning};
pub use frame::{FrameItem, FrameParams};
pub use intonation::ClauseType;
pub use segment::{Segment, Stress, Tone};
pub use table::builtin_store;
pub use template::{MemoryStore, PhonemeFlags, PhonemeTemplate, Place, StoreError, TemplateStore};

use alloc::vec::Vec;

/// Caller-tunable compile settings.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileOptions {
    /// Global speed multiplier, > 0. Larger is faster.
    pub speed: f64,
    /// Base pitch in Hz; the intonation contour bends around it.
    pub base_pitch: f64,
    /// Pitch excursion scale in `[0, 1]`; 0 is monotone, 1 spans an octave
    /// each way. Clamped.
    pub inflection: f64,
    /// Clause category selecting the intonation table.
    pub clause_type: ClauseType,
    /// Uniform formant scale factor forwarded into every frame.
    pub formant_scale: Option<f64>,
    /// Spectral tilt override forwarded into every frame.
    pub tilt_db: Option<f64>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            speed: 1.0,
            base_pitch: 100.0,
            inflection: 0.5,
            clause_type: ClauseType::Statement,
            formant_scale: None,
            tilt_db: None,
        }
    }
}

/// The IPA-to-frame compiler. Owns nothing but the template store, which it
/// only ever reads; one compiler can serve concurrent compiles if the store
/// allows shared access.
#[derive(Debug, Clone)]
pub struct Compiler<S: TemplateStore> {
    store: S,
}

impl<S: TemplateStore> Compiler<S> {
    pub fn new(store: S) -> Self {
        Compiler { store }
    }

    /// Compiles one utterance into its frame sequence.
    ///
    /// Unknown symbols and dangling marks degrade (see
    /// [`FrameStream::warnings`]); the only fatal conditions are a
    /// non-positive speed and a store that cannot answer lookups.
    pub fn compile(
        &self,
        text: &str,
        options: &CompileOptions,
    ) -> Result<FrameStream, CompileError> {
        if options.speed <= 0.0 || !options.speed.is_finite() {
            return Err(CompileError::InvalidSpeed(options.speed));
        }

        let items = segmenter::scan(&self.store, text)?;
        let mut warnings = Vec::new();
        let mut list = builder::build(items, &self.store, &mut warnings)?;
        duration::assign(&mut list, options.speed);
        intonation::apply(
            &mut list,
            options.base_pitch,
            options.inflection,
            options.clause_type,
        );
        tone::apply(&mut list, options.base_pitch);
        coart::apply(&mut list, options.speed);

        log::debug!(
            "compiled {} chars into {} segments ({} warnings)",
            text.chars().count(),
            list.len(),
            warnings.len()
        );
        Ok(FrameStream::new(
            list,
            warnings,
            options.base_pitch,
            options.formant_scale,
            options.tilt_db,
        ))
    }
}
