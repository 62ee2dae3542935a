//! Built-in phoneme inventory.
//!
//! The compiler treats the template store as an external collaborator;
//! this module is a reasonable default so the crate works stand-alone.
//! Formant targets are in the Peterson-Barney range for vowels and
//! textbook loci for consonants. Callers with their own measured tables
//! should build a [`MemoryStore`] of their own instead.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::frame::FrameParams;
use crate::template::{MemoryStore, PhonemeFlags, PhonemeTemplate, Place};

fn tract(f1: f64, f2: f64, f3: f64) -> FrameParams {
    FrameParams {
        f1_freq: f1,
        f2_freq: f2,
        f3_freq: f3,
        ..FrameParams::default()
    }
}

fn vowel(symbol: &str, f1: f64, f2: f64, f3: f64) -> PhonemeTemplate {
    let mut params = tract(f1, f2, f3);
    params.voicing_db = 0.0;
    PhonemeTemplate {
        symbol: symbol.to_string(),
        flags: PhonemeFlags {
            vowel: true,
            voiced: true,
            ..PhonemeFlags::default()
        },
        place: None,
        params,
        components: Vec::new(),
    }
}

fn stop(symbol: &str, voiced: bool, place: Place, f1: f64, f2: f64, f3: f64) -> PhonemeTemplate {
    let mut params = tract(f1, f2, f3);
    if voiced {
        params.voicing_db = 0.0;
        params.frication_db = -35.0;
    } else {
        params.frication_db = -25.0;
        params.aspiration_db = -30.0;
    }
    PhonemeTemplate {
        symbol: symbol.to_string(),
        flags: PhonemeFlags {
            stop: true,
            voiced,
            ..PhonemeFlags::default()
        },
        place: Some(place),
        params,
        components: Vec::new(),
    }
}

fn nasal(symbol: &str, place: Place, f1: f64, f2: f64, f3: f64) -> PhonemeTemplate {
    let mut params = tract(f1, f2, f3);
    params.voicing_db = 0.0;
    params.nasal_pole_freq = 270.0;
    params.nasal_pole_bw = 100.0;
    PhonemeTemplate {
        symbol: symbol.to_string(),
        flags: PhonemeFlags {
            nasal: true,
            voiced: true,
            ..PhonemeFlags::default()
        },
        place: Some(place),
        params,
        components: Vec::new(),
    }
}

fn fricative(
    symbol: &str,
    voiced: bool,
    place: Place,
    f1: f64,
    f2: f64,
    f3: f64,
) -> PhonemeTemplate {
    let mut params = tract(f1, f2, f3);
    if voiced {
        params.voicing_db = 0.0;
        params.frication_db = -28.0;
    } else {
        params.frication_db = -20.0;
    }
    PhonemeTemplate {
        symbol: symbol.to_string(),
        flags: PhonemeFlags {
            voiced,
            ..PhonemeFlags::default()
        },
        place: Some(place),
        params,
        components: Vec::new(),
    }
}

fn liquid(symbol: &str, place: Place, f1: f64, f2: f64, f3: f64) -> PhonemeTemplate {
    let mut params = tract(f1, f2, f3);
    params.voicing_db = 0.0;
    PhonemeTemplate {
        symbol: symbol.to_string(),
        flags: PhonemeFlags {
            liquid: true,
            voiced: true,
            ..PhonemeFlags::default()
        },
        place: Some(place),
        params,
        components: Vec::new(),
    }
}

fn semivowel(symbol: &str, place: Place, f1: f64, f2: f64, f3: f64) -> PhonemeTemplate {
    let mut params = tract(f1, f2, f3);
    params.voicing_db = 0.0;
    PhonemeTemplate {
        symbol: symbol.to_string(),
        flags: PhonemeFlags {
            semivowel: true,
            voiced: true,
            ..PhonemeFlags::default()
        },
        place: Some(place),
        params,
        components: Vec::new(),
    }
}

fn affricate(
    symbol: &str,
    voiced: bool,
    place: Place,
    f1: f64,
    f2: f64,
    f3: f64,
) -> PhonemeTemplate {
    let mut params = tract(f1, f2, f3);
    params.frication_db = -22.0;
    if voiced {
        params.voicing_db = 0.0;
    }
    PhonemeTemplate {
        symbol: symbol.to_string(),
        flags: PhonemeFlags {
            affricate: true,
            voiced,
            ..PhonemeFlags::default()
        },
        place: Some(place),
        params,
        components: Vec::new(),
    }
}

fn diphthong(symbol: &str, components: &[&str], f1: f64, f2: f64, f3: f64) -> PhonemeTemplate {
    let mut template = vowel(symbol, f1, f2, f3);
    template.components = components.iter().map(|s| String::from(*s)).collect();
    template
}

/// The default phoneme inventory.
pub fn builtin_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    let templates = [
        // vowels
        vowel("i", 290.0, 2500.0, 3010.0),
        vowel("ɪ", 400.0, 2000.0, 2550.0),
        vowel("e", 390.0, 2300.0, 2650.0),
        vowel("ɛ", 550.0, 1950.0, 2600.0),
        vowel("æ", 690.0, 1660.0, 2490.0),
        vowel("a", 800.0, 1350.0, 2500.0),
        vowel("ɑ", 750.0, 1100.0, 2540.0),
        vowel("ɔ", 570.0, 850.0, 2410.0),
        vowel("o", 430.0, 800.0, 2620.0),
        vowel("ʊ", 440.0, 1020.0, 2240.0),
        vowel("u", 310.0, 870.0, 2250.0),
        vowel("ə", 500.0, 1500.0, 2500.0),
        vowel("ʌ", 640.0, 1190.0, 2390.0),
        vowel("y", 290.0, 2100.0, 2400.0),
        vowel("ø", 450.0, 1600.0, 2450.0),
        // stops
        stop("p", false, Place::Bilabial, 400.0, 900.0, 2500.0),
        stop("b", true, Place::Bilabial, 200.0, 900.0, 2500.0),
        stop("t", false, Place::Alveolar, 400.0, 1700.0, 2600.0),
        stop("d", true, Place::Alveolar, 200.0, 1700.0, 2600.0),
        stop("ʈ", false, Place::Retroflex, 400.0, 1800.0, 2200.0),
        stop("ɖ", true, Place::Retroflex, 200.0, 1800.0, 2200.0),
        stop("k", false, Place::Velar, 300.0, 2500.0, 2600.0),
        stop("g", true, Place::Velar, 200.0, 2500.0, 2600.0),
        stop("q", false, Place::Uvular, 400.0, 1400.0, 2500.0),
        stop("ʔ", false, Place::Glottal, 500.0, 1500.0, 2500.0),
        // nasals
        nasal("m", Place::Bilabial, 250.0, 900.0, 2200.0),
        nasal("n", Place::Alveolar, 250.0, 1700.0, 2300.0),
        nasal("ɳ", Place::Retroflex, 250.0, 1800.0, 2100.0),
        nasal("ɲ", Place::Palatal, 250.0, 2300.0, 2400.0),
        nasal("ŋ", Place::Velar, 250.0, 2300.0, 2300.0),
        // fricatives
        fricative("f", false, Place::Labiodental, 340.0, 1100.0, 2500.0),
        fricative("v", true, Place::Labiodental, 300.0, 1100.0, 2500.0),
        fricative("θ", false, Place::Dental, 320.0, 1500.0, 2600.0),
        fricative("ð", true, Place::Dental, 290.0, 1500.0, 2600.0),
        fricative("s", false, Place::Alveolar, 320.0, 1700.0, 2600.0),
        fricative("z", true, Place::Alveolar, 290.0, 1700.0, 2600.0),
        fricative("ʃ", false, Place::Postalveolar, 300.0, 1900.0, 2500.0),
        fricative("ʒ", true, Place::Postalveolar, 280.0, 1900.0, 2500.0),
        fricative("ʂ", false, Place::Retroflex, 300.0, 1800.0, 2200.0),
        fricative("ʐ", true, Place::Retroflex, 280.0, 1800.0, 2200.0),
        fricative("x", false, Place::Velar, 300.0, 2300.0, 2500.0),
        fricative("h", false, Place::Glottal, 500.0, 1500.0, 2500.0),
        // liquids
        liquid("l", Place::Alveolar, 360.0, 1300.0, 2700.0),
        liquid("r", Place::Alveolar, 350.0, 1300.0, 1600.0),
        liquid("ɹ", Place::Alveolar, 360.0, 1200.0, 1700.0),
        liquid("ɭ", Place::Retroflex, 360.0, 1800.0, 2000.0),
        // semivowels
        semivowel("j", Place::Palatal, 290.0, 2400.0, 3000.0),
        semivowel("w", Place::Bilabial, 290.0, 700.0, 2300.0),
        // tie-bar affricates
        affricate("t͡ʃ", false, Place::Postalveolar, 300.0, 1900.0, 2500.0),
        affricate("d͡ʒ", true, Place::Postalveolar, 280.0, 1900.0, 2500.0),
        affricate("t͡s", false, Place::Alveolar, 320.0, 1700.0, 2600.0),
        // tie-bar diphthongs
        diphthong("a͡ɪ", &["a", "ɪ"], 800.0, 1350.0, 2500.0),
        diphthong("a͡ʊ", &["a", "ʊ"], 800.0, 1350.0, 2500.0),
        diphthong("ɔ͡ɪ", &["ɔ", "ɪ"], 570.0, 850.0, 2410.0),
        diphthong("e͡ɪ", &["e", "ɪ"], 390.0, 2300.0, 2650.0),
        diphthong("o͡ʊ", &["o", "ʊ"], 430.0, 800.0, 2620.0),
    ];
    for template in templates {
        store.insert(template);
    }
    store
}
