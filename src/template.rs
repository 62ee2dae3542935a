//! Phoneme templates and the store that serves them.
//!
//! The store is an injected collaborator: the compiler takes it as a
//! constructor parameter and only ever reads from it, so one store can be
//! shared by any number of concurrent compiles.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::frame::FrameParams;

/// Articulatory class flags copied onto every segment built from a template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhonemeFlags {
    pub vowel: bool,
    pub voiced: bool,
    pub nasal: bool,
    pub stop: bool,
    pub liquid: bool,
    pub semivowel: bool,
    pub affricate: bool,
}

/// Place of articulation, for the locus table and the retroflex timing rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Place {
    Bilabial,
    Labiodental,
    Dental,
    Alveolar,
    Postalveolar,
    Retroflex,
    Palatal,
    Velar,
    Uvular,
    Glottal,
}

impl Place {
    /// F2 locus frequency in Hz for this place of articulation.
    ///
    /// Glottal articulations have no oral constriction and therefore no
    /// locus; the coarticulation pass skips the onset override for them.
    pub fn locus(self) -> Option<f64> {
        match self {
            Place::Bilabial => Some(900.0),
            Place::Labiodental => Some(1000.0),
            Place::Dental => Some(1500.0),
            Place::Alveolar => Some(1700.0),
            Place::Postalveolar => Some(1900.0),
            Place::Retroflex => Some(1800.0),
            Place::Palatal => Some(2300.0),
            Place::Velar => Some(3000.0),
            Place::Uvular => Some(1500.0),
            Place::Glottal => None,
        }
    }
}

/// An immutable phoneme description served by a [`TemplateStore`].
///
/// The parameter bag is opaque to the compiler: apart from the formant
/// frequencies read by the coarticulation pass, the numbers are only ever
/// copied into frames.
#[derive(Debug, Clone, PartialEq)]
pub struct PhonemeTemplate {
    /// IPA symbol, 1-3 codepoints (affricates keep their tie bar).
    pub symbol: String,
    pub flags: PhonemeFlags,
    /// Place of articulation for consonants; `None` for vowels.
    pub place: Option<Place>,
    pub params: FrameParams,
    /// Component vowel symbols for diphthongs/triphthongs, in order.
    /// Empty for ordinary phonemes.
    pub components: Vec<String>,
}

/// Error raised when a template store cannot answer lookups at all.
///
/// This is a caller-configuration failure and aborts the compile; it is not
/// the "symbol absent" case, which degrades per the error philosophy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("phoneme template store unavailable: {0}")]
    Unavailable(&'static str),
}

/// Read-only, exact-match phoneme lookup.
///
/// `symbol` is 1-3 codepoints. Implementations must be safe for concurrent
/// reads; the compiler never writes through this trait.
pub trait TemplateStore {
    /// Look up a symbol. `Ok(None)` means "no phoneme for this symbol" and
    /// is an expected, recoverable answer.
    fn lookup(&self, symbol: &str) -> Result<Option<&PhonemeTemplate>, StoreError>;
}

/// In-memory template store backed by an ordered map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    map: BTreeMap<String, PhonemeTemplate>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            map: BTreeMap::new(),
        }
    }

    /// Inserts a template under its own symbol, replacing any previous entry.
    pub fn insert(&mut self, template: PhonemeTemplate) {
        self.map.insert(template.symbol.clone(), template);
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl TemplateStore for MemoryStore {
    fn lookup(&self, symbol: &str) -> Result<Option<&PhonemeTemplate>, StoreError> {
        Ok(self.map.get(symbol))
    }
}

impl<T: TemplateStore + ?Sized> TemplateStore for &T {
    fn lookup(&self, symbol: &str) -> Result<Option<&PhonemeTemplate>, StoreError> {
        (**self).lookup(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_exact_match_only() {
        let mut store = MemoryStore::new();
        store.insert(PhonemeTemplate {
            symbol: "t͡ʃ".into(),
            flags: PhonemeFlags {
                affricate: true,
                ..PhonemeFlags::default()
            },
            place: Some(Place::Postalveolar),
            params: FrameParams::default(),
            components: alloc::vec::Vec::new(),
        });
        assert!(store.lookup("t͡ʃ").unwrap().is_some());
        assert!(store.lookup("t").unwrap().is_none());
        assert!(store.lookup("ʃ").unwrap().is_none());
    }

    #[test]
    fn glottal_has_no_locus() {
        assert_eq!(Place::Glottal.locus(), None);
        assert_eq!(Place::Bilabial.locus(), Some(900.0));
    }
}
