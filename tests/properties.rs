//! End-to-end properties of the compiled frame sequences.

use ipa_frames::{ClauseType, CompileOptions, Compiler, FrameItem, builtin_store};

/// Acceptable float difference for values that should be exact up to
/// rounding.
const EPSILON: f64 = 1E-9;

fn compile(text: &str, options: &CompileOptions) -> Vec<FrameItem> {
    let compiler = Compiler::new(builtin_store());
    compiler.compile(text, options).unwrap().collect()
}

fn compile_default(text: &str) -> Vec<FrameItem> {
    compile(text, &CompileOptions::default())
}

/// The steady-state frame realizing a given source character.
fn frame_for(frames: &[FrameItem], c: char) -> &FrameItem {
    frames
        .iter()
        .find(|f| f.source == Some(c))
        .unwrap_or_else(|| panic!("no frame for {c:?}"))
}

#[test]
fn any_known_symbol_yields_a_nonempty_positive_sequence() {
    for text in ["a", "pa", "ˈmama", "s", "to˥ne˩"] {
        let frames = compile_default(text);
        assert!(!frames.is_empty(), "empty output for {text:?}");
        let total: f64 = frames.iter().map(|f| f.duration_ms).sum();
        assert!(total > 0.0);
    }
}

#[test]
fn source_characters_come_out_in_input_order() {
    // a tie-bar cluster is one recognized character (its first codepoint);
    // stress marks, spaces, and unknown glyphs are not recognized at all
    let cases: [(&str, &[char]); 4] = [
        ("mapata", &['m', 'a', 'p', 'a', 't', 'a']),
        ("ˈpa ta", &['p', 'a', 't', 'a']),
        ("a͡ɪ li t͡ʃo", &['a', 'l', 'i', 't', 'o']),
        ("x7a b", &['x', 'a', 'b']),
    ];
    for (text, expected) in cases {
        let frames = compile_default(text);
        let emitted: Vec<char> = frames.iter().filter_map(|f| f.source).collect();
        assert_eq!(emitted, expected, "order broken for {text:?}");
    }
}

#[test]
fn duration_law_for_pa_at_unit_speed() {
    let frames = compile_default("pa");
    let p = frame_for(&frames, 'p');
    assert!((p.duration_ms - 6.0).abs() < EPSILON);
    assert!((p.fade_ms - 3.0).abs() < EPSILON);
    let a = frame_for(&frames, 'a');
    assert!((a.duration_ms - 60.0).abs() < EPSILON);

    // durations are independent of pitch settings
    let mut options = CompileOptions::default();
    options.base_pitch = 240.0;
    options.inflection = 1.0;
    let frames = compile("pa", &options);
    assert!((frame_for(&frames, 'p').duration_ms - 6.0).abs() < EPSILON);
    assert!((frame_for(&frames, 'a').duration_ms - 60.0).abs() < EPSILON);
}

#[test]
fn primary_stress_speeds_the_vowel_up() {
    let plain = frame_for(&compile_default("pa"), 'a').duration_ms;
    let stressed = frame_for(&compile_default("ˈpa"), 'a').duration_ms;
    assert!((stressed - plain / 1.4).abs() < EPSILON);
}

#[test]
fn statement_nucleus_pitch_never_rises() {
    let mut options = CompileOptions::default();
    options.base_pitch = 120.0;
    let frames = compile("maˈnama", &options);
    // from the stressed syllable on, voiced pitch must be non-increasing
    let voiced: Vec<&FrameItem> = frames
        .iter()
        .filter(|f| f.params.is_some())
        .collect();
    let nucleus_start = voiced
        .iter()
        .position(|f| f.source == Some('n'))
        .unwrap();
    let mut last = f64::INFINITY;
    for frame in &voiced[nucleus_start..] {
        let params = frame.params.as_ref().unwrap();
        if params.voicing_db <= -90.0 {
            continue;
        }
        assert!(params.f0 <= last + EPSILON);
        assert!(params.f0_end <= params.f0 + EPSILON);
        last = params.f0_end;
    }
}

#[test]
fn lexical_tone_overrides_the_contour_by_a_fixed_ratio() {
    for clause in [
        ClauseType::Statement,
        ClauseType::Question,
        ClauseType::Exclamation,
    ] {
        let mut options = CompileOptions::default();
        options.clause_type = clause;
        let high = compile("má", &options);
        let low = compile("mà", &options);
        let high_f0 = frame_for(&high, 'a').params.as_ref().unwrap().f0;
        let low_f0 = frame_for(&low, 'a').params.as_ref().unwrap().f0;
        assert!((high_f0 / low_f0 - 1.2 / 0.85).abs() < EPSILON);
    }
}

#[test]
fn onset_f2_sits_between_locus_and_target() {
    // the waypoint frame directly precedes the vowel's steady frame
    let onset_and_target = |text: &str, c: char| -> (f64, f64) {
        let frames = compile_default(text);
        let steady_at = frames.iter().position(|f| f.source == Some(c)).unwrap();
        let target = frames[steady_at].params.as_ref().unwrap().f2_freq;
        let onset = frames[steady_at - 1].params.as_ref().unwrap().f2_freq;
        (onset, target)
    };
    let (pa_onset, pa_target) = onset_and_target("pa", 'a');
    let (pi_onset, pi_target) = onset_and_target("pi", 'i');
    assert!(pa_onset < pa_target);
    assert!(pi_onset < pi_target);
    // the locus is farther from /i/'s target, so its jump is larger
    assert!(pi_target - pi_onset > pa_target - pa_onset);
}

#[test]
fn compiling_twice_is_byte_identical() {
    let options = CompileOptions {
        speed: 1.3,
        base_pitch: 110.0,
        inflection: 0.7,
        clause_type: ClauseType::Question,
        formant_scale: Some(1.05),
        tilt_db: Some(-3.0),
    };
    let first = compile("ˌmaʈi paˈt͡ʃaː lo˥˩ wen", &options);
    let second = compile("ˌmaʈi paˈt͡ʃaː lo˥˩ wen", &options);
    assert_eq!(first, second);
}

#[test]
fn unknown_symbols_degrade_with_warnings() {
    let compiler = Compiler::new(builtin_store());
    let stream = compiler
        .compile("a3b", &CompileOptions::default())
        .unwrap();
    assert_eq!(stream.warnings().len(), 1);
    let frames: Vec<FrameItem> = stream.collect();
    let emitted: Vec<char> = frames.iter().filter_map(|f| f.source).collect();
    assert_eq!(emitted, vec!['a', 'b']);
}

#[test]
fn unknown_clause_char_falls_back_to_statement() {
    assert_eq!(ClauseType::from(';'), ClauseType::Statement);
    assert_eq!(ClauseType::from('?'), ClauseType::Question);
}
