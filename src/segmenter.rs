//! Pass 1: scans the normalized input into `(char, Option<Segment>)` pairs.
//!
//! Stress marks and whitespace flow through as bare characters for the list
//! builder to interpret; tone diacritics and tone letters never appear in
//! the output at all, they annotate the previous scanned segment. Unknown
//! characters pass through with no segment so one bad glyph never sinks the
//! whole utterance.

use alloc::string::String;
use alloc::vec::Vec;
use unicode_normalization::UnicodeNormalization;

use crate::error::CompileError;
use crate::segment::{Segment, Tone};
use crate::template::TemplateStore;

/// Primary stress mark (U+02C8).
pub const STRESS_PRIMARY: char = 'ˈ';
/// Secondary stress mark (U+02CC).
pub const STRESS_SECONDARY: char = 'ˌ';
/// Length mark (U+02D0).
pub const LENGTH_MARK: char = 'ː';

/// One scanned item: the source character and its segment, if any.
pub type ScanItem = (char, Option<Segment>);

/// True for the combining tie bars used to join affricate and diphthong
/// clusters (U+0361, U+035C).
fn is_tie_bar(c: char) -> bool {
    c == '\u{0361}' || c == '\u{035C}'
}

/// Maps a combining tone diacritic to its tone, if the character is one.
fn tone_diacritic(c: char) -> Option<Tone> {
    match c {
        '\u{030B}' => Some(Tone::ExtraHigh), // double acute
        '\u{0301}' => Some(Tone::High),      // acute
        '\u{0304}' => Some(Tone::Mid),       // macron
        '\u{0300}' => Some(Tone::Low),       // grave
        '\u{030F}' => Some(Tone::ExtraLow),  // double grave
        '\u{030C}' => Some(Tone::Rising),    // caron
        '\u{0302}' => Some(Tone::Falling),   // circumflex
        _ => None,
    }
}

/// Pitch level of a Chao tone letter, 1 (low) to 5 (high).
fn tone_letter_level(c: char) -> Option<u8> {
    match c {
        '˥' => Some(5),
        '˦' => Some(4),
        '˧' => Some(3),
        '˨' => Some(2),
        '˩' => Some(1),
        _ => None,
    }
}

/// Classifies a run of tone letters.
///
/// A single letter is a level tone, classified high/mid/low by threshold.
/// Two or more letters are a contour, classified by comparing the first and
/// last level; a flat sequence falls back to the level classification.
fn classify_tone_letters(levels: &[u8]) -> Tone {
    let first = levels[0];
    let last = levels[levels.len() - 1];
    if levels.len() >= 2 && first != last {
        if first < last { Tone::Rising } else { Tone::Falling }
    } else if first >= 4 {
        Tone::High
    } else if first == 3 {
        Tone::Mid
    } else {
        Tone::Low
    }
}

/// Attaches a tone to the most recent scanned segment. A dangling mark with
/// no segment before it is dropped.
fn attach_tone(items: &mut [ScanItem], tone: Tone) {
    for (_, seg) in items.iter_mut().rev() {
        if let Some(seg) = seg {
            seg.tone = Some(tone);
            return;
        }
    }
    log::debug!("dropping tone mark with no preceding phoneme");
}

/// Scans `text` into an ordered list of `(char, Option<Segment>)` pairs.
///
/// The input is NFD-normalized first so precomposed accented vowels split
/// into base character plus combining tone mark. Lookahead consumption is
/// tracked by an explicit count so the scan index always advances past the
/// characters a multi-codepoint lookup swallowed.
pub fn scan<S: TemplateStore>(store: &S, text: &str) -> Result<Vec<ScanItem>, CompileError> {
    let chars: Vec<char> = text.nfd().collect();
    let mut items: Vec<ScanItem> = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];

        // stress marks and whitespace pass through for the list builder
        if c == STRESS_PRIMARY || c == STRESS_SECONDARY || c.is_whitespace() {
            items.push((c, None));
            i += 1;
            continue;
        }

        if let Some(tone) = tone_diacritic(c) {
            attach_tone(&mut items, tone);
            i += 1;
            continue;
        }

        if tone_letter_level(c).is_some() {
            let mut levels: Vec<u8> = Vec::new();
            let mut j = i;
            while j < chars.len() {
                match tone_letter_level(chars[j]) {
                    Some(level) => levels.push(level),
                    None => break,
                }
                j += 1;
            }
            attach_tone(&mut items, classify_tone_letters(&levels));
            i = j;
            continue;
        }

        // a tie bar reached here was not consumed by a cluster lookup;
        // like any other malformed combining mark it is dropped silently
        if is_tie_bar(c) {
            log::debug!("dropping tie bar with no recognized cluster");
            i += 1;
            continue;
        }

        let mut consumed = 1;
        let mut seg: Option<Segment> = None;

        // tie-bar-joined cluster (affricate or diphthong), 3 codepoints
        if i + 2 < chars.len() && is_tie_bar(chars[i + 1]) {
            let symbol: String = chars[i..i + 3].iter().collect();
            if let Some(template) = store.lookup(&symbol)? {
                seg = Some(Segment::from_template(template, c));
                consumed = 3;
            }
        }

        // length-mark-suffixed cluster, 2 codepoints, before the single char
        if seg.is_none() && i + 1 < chars.len() && chars[i + 1] == LENGTH_MARK {
            let symbol: String = chars[i..i + 2].iter().collect();
            if let Some(template) = store.lookup(&symbol)? {
                seg = Some(Segment::from_template(template, c));
                consumed = 2;
            } else {
                let mut single = [0u8; 4];
                if let Some(template) = store.lookup(c.encode_utf8(&mut single))? {
                    let mut s = Segment::from_template(template, c);
                    s.lengthened = true;
                    seg = Some(s);
                    consumed = 2;
                }
            }
        }

        if seg.is_none() && consumed == 1 {
            let mut single = [0u8; 4];
            if let Some(template) = store.lookup(c.encode_utf8(&mut single))? {
                seg = Some(Segment::from_template(template, c));
            }
        }

        // unknown characters pass through with no segment
        items.push((c, seg));
        i += consumed;
    }
    Ok(items)
}
