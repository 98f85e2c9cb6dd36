//! Key generation: a tonic and a mode spelled into seven notes
//!
//! Spelling walks the mode's semitone steps from the tonic's tone and picks,
//! on every tone, the spelling whose letter follows the previous degree's
//! letter. Every key therefore uses each of the seven letters exactly once,
//! and the signature falls out of counting the marks on those notes.
//!
//! Valid tonics are not listed by hand. A table spelling is a valid tonic for
//! a mode when its key can be spelled at all and carries a legal signature.

use crate::error::{Result, TheoryError};
use crate::types::chord::ChordBase;
use crate::types::degree::{Alteration, ModeDegree};
use crate::types::mode::ModeName;
use crate::types::note::{table_notes, tone_at, Note, Tone};
#[cfg(feature = "colored")]
use colored::*;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Most marks a key signature may carry (seven double accidentals)
pub const MAX_SIGNATURE_ACCIDENTALS: u8 = 14;

/// Signatures above this count need double accidentals
pub const MAX_STANDARD_ACCIDENTALS: u8 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySignature {
    Natural,
    Sharps(u8),
    Flats(u8),
}

impl KeySignature {
    /// Number of marks, regardless of direction
    pub fn count(&self) -> u8 {
        match self {
            KeySignature::Natural => 0,
            KeySignature::Sharps(n) | KeySignature::Flats(n) => *n,
        }
    }

    pub fn is_theoretical(&self) -> bool {
        self.count() > MAX_STANDARD_ACCIDENTALS
    }
}

impl fmt::Display for KeySignature {
    /// `""`, `"3#"` or `"2b"`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySignature::Natural => Ok(()),
            KeySignature::Sharps(n) => write!(f, "{}#", n),
            KeySignature::Flats(n) => write!(f, "{}b", n),
        }
    }
}

impl FromStr for KeySignature {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(KeySignature::Natural);
        }
        let mark = s
            .chars()
            .last()
            .ok_or_else(|| TheoryError::malformed("key signature", s))?;
        let count: u8 = s[..s.len() - mark.len_utf8()]
            .parse()
            .map_err(|_| TheoryError::malformed("key signature", s))?;
        if count == 0 || count > MAX_SIGNATURE_ACCIDENTALS {
            return Err(TheoryError::malformed("key signature", s));
        }
        match mark {
            '#' => Ok(KeySignature::Sharps(count)),
            'b' => Ok(KeySignature::Flats(count)),
            _ => Err(TheoryError::malformed("key signature", s)),
        }
    }
}

crate::string_serde!(KeySignature);

fn join_notes(notes: &[Note]) -> String {
    notes
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Signature of a seven-note spelling. Fails on anything but seven notes, on
/// mixed sharps and flats, and on more than fourteen marks.
pub fn key_signature_from_notes(notes: &[Note]) -> Result<KeySignature> {
    let invalid = |reason: String| TheoryError::InvalidKeySignature {
        notes: join_notes(notes),
        reason,
    };

    if notes.len() != 7 {
        return Err(invalid(format!("expected 7 notes, found {}", notes.len())));
    }

    let sharps: u32 = notes.iter().map(|n| n.sharps() as u32).sum();
    let flats: u32 = notes.iter().map(|n| n.flats() as u32).sum();

    if sharps > 0 && flats > 0 {
        return Err(invalid(format!(
            "mixed accidentals ({} sharps, {} flats)",
            sharps, flats
        )));
    }
    let count = sharps.max(flats);
    if count > MAX_SIGNATURE_ACCIDENTALS as u32 {
        return Err(invalid(format!("{} accidentals", count)));
    }

    Ok(match (sharps, flats) {
        (0, 0) => KeySignature::Natural,
        (s, 0) => KeySignature::Sharps(s as u8),
        (_, f) => KeySignature::Flats(f as u8),
    })
}

/// The seven tones of a key, degree 1 first
pub fn key_tones(tonic: &Note, mode: ModeName) -> [&'static Tone; 7] {
    let start = tonic.tone_index() as i32;
    mode.data()
        .offsets()
        .map(|offset| tone_at(start + offset as i32))
}

/// Spell a key's tones into notes, one letter per degree starting from the
/// tonic's letter.
pub fn spell_key_tones(tonic: &Note, tones: &[&'static Tone; 7]) -> Result<[Note; 7]> {
    if !tones[0].contains(tonic) {
        return Err(TheoryError::UnresolvableSpelling {
            context: format!("tonic {} on tone {}", tonic, tones[0].index()),
        });
    }

    let mut notes = [*tonic; 7];
    let mut letter = tonic.letter();
    for (note, tone) in notes.iter_mut().zip(tones.iter()).skip(1) {
        letter = letter.next();
        *note = tone
            .spelling_with_letter(letter)
            .ok_or_else(|| TheoryError::UnresolvableSpelling {
                context: format!(
                    "tone {} with letter {} in key of {}",
                    tone.index(),
                    letter,
                    tonic
                ),
            })?;
    }
    Ok(notes)
}

fn spell_key(tonic: &Note, mode: ModeName) -> Result<([Note; 7], KeySignature)> {
    let notes = spell_key_tones(tonic, &key_tones(tonic, mode))?;
    let signature = key_signature_from_notes(&notes)?;
    Ok((notes, signature))
}

static VALID_TONICS: OnceLock<[Vec<Note>; 7]> = OnceLock::new();

/// Every table spelling that can open a key in `mode`, in tone order
pub fn valid_tonics(mode: ModeName) -> &'static [Note] {
    let all = VALID_TONICS.get_or_init(|| {
        ModeName::ALL.map(|mode| {
            table_notes()
                .filter(|tonic| spell_key(tonic, mode).is_ok())
                .collect()
        })
    });
    &all[mode.index()]
}

pub fn is_valid_tonic(tonic: &Note, mode: ModeName) -> bool {
    valid_tonics(mode).contains(tonic)
}

/// One triad per degree, stacked in thirds from the key's own notes
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DiatonicChord {
    pub degree: ModeDegree,
    pub numeral: &'static str,
    pub base: ChordBase,
    pub notes: [Note; 3],
}

impl fmt::Display for DiatonicChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}{}: [{}]",
            self.numeral,
            self.notes[0],
            self.base,
            join_notes(&self.notes)
        )
    }
}

/// A fully spelled key
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Key {
    tonic: Note,
    mode: ModeName,
    notes: [Note; 7],
    signature: KeySignature,
    notes_by_degree: BTreeMap<ModeDegree, Note>,
    degrees_by_note: BTreeMap<Note, ModeDegree>,
    enharmonic_equivalents: Vec<Note>,
    theoretical: bool,
}

impl Key {
    pub fn new(tonic: Note, mode: ModeName) -> Result<Self> {
        if !is_valid_tonic(&tonic, mode) {
            return Err(TheoryError::InvalidTonicForMode {
                tonic: tonic.to_string(),
                mode,
            });
        }

        let (notes, signature) = spell_key(&tonic, mode)?;

        let mut notes_by_degree = BTreeMap::new();
        for degree in ModeDegree::STANDARD.into_iter().chain(ModeDegree::altered()) {
            notes_by_degree.insert(degree, degree_note(&notes, degree));
        }

        // First claim wins: standard degrees, then flats, then sharps, each
        // from the lowest degree up
        let mut degrees_by_note = BTreeMap::new();
        let claims = ModeDegree::STANDARD
            .into_iter()
            .chain(ModeDegree::altered().filter(|d| d.alteration() == Alteration::Flat))
            .chain(ModeDegree::altered().filter(|d| d.alteration() == Alteration::Sharp));
        for degree in claims {
            degrees_by_note
                .entry(degree_note(&notes, degree))
                .or_insert(degree);
        }

        let enharmonic_equivalents = tonic
            .tone()
            .notes()
            .iter()
            .filter(|n| **n != tonic && is_valid_tonic(n, mode))
            .copied()
            .collect();

        Ok(Key {
            tonic,
            mode,
            notes,
            signature,
            notes_by_degree,
            degrees_by_note,
            enharmonic_equivalents,
            theoretical: signature.is_theoretical(),
        })
    }

    pub fn tonic(&self) -> Note {
        self.tonic
    }

    pub fn mode(&self) -> ModeName {
        self.mode
    }

    pub fn notes(&self) -> &[Note; 7] {
        &self.notes
    }

    pub fn signature(&self) -> KeySignature {
        self.signature
    }

    /// Standard and altered degrees (21 entries)
    pub fn notes_by_degree(&self) -> &BTreeMap<ModeDegree, Note> {
        &self.notes_by_degree
    }

    pub fn degrees_by_note(&self) -> &BTreeMap<Note, ModeDegree> {
        &self.degrees_by_note
    }

    /// Other spellings of the tonic's tone that are valid tonics in this mode
    pub fn enharmonic_equivalents(&self) -> &[Note] {
        &self.enharmonic_equivalents
    }

    pub fn is_theoretical(&self) -> bool {
        self.theoretical
    }

    pub fn note(&self, degree: ModeDegree) -> Note {
        degree_note(&self.notes, degree)
    }

    pub fn degree_of(&self, note: &Note) -> Option<ModeDegree> {
        self.degrees_by_note.get(note).copied()
    }

    pub fn tone_by_degree(&self, degree: ModeDegree) -> &'static Tone {
        self.note(degree).tone()
    }

    /// The key in `mode` built from the same seven notes
    /// (C Ionian -> A Aeolian, D Dorian -> F Lydian).
    pub fn relative(&self, mode: ModeName) -> Result<Key> {
        let shift = (mode.index() as i32 - self.mode.index() as i32).rem_euclid(7);
        Key::new(self.notes[shift as usize], mode)
    }

    pub fn diatonic_chords(&self) -> Vec<DiatonicChord> {
        let mode = self.mode.data();
        ModeDegree::STANDARD
            .iter()
            .enumerate()
            .map(|(i, degree)| DiatonicChord {
                degree: *degree,
                numeral: mode.chord_numerals[i],
                base: mode.chord_bases[i],
                notes: [self.notes[i], self.notes[(i + 2) % 7], self.notes[(i + 4) % 7]],
            })
            .collect()
    }
}

fn degree_note(notes: &[Note; 7], degree: ModeDegree) -> Note {
    let note = notes[degree.index()];
    match degree.alteration().accidental() {
        Some(direction) => note.adjust(direction),
        None => note,
    }
}

/// Parse and build in one step
pub fn build_key(tonic: &str, mode: &str) -> Result<Key> {
    Key::new(tonic.parse()?, mode.parse()?)
}

#[cfg(feature = "colored")]
impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let notes: Vec<String> = self
            .notes
            .iter()
            .map(|n| n.to_string().cyan().to_string())
            .collect();
        let signature = match self.signature {
            KeySignature::Natural => "no accidentals".bright_black().to_string(),
            sig if sig.is_theoretical() => sig.to_string().bright_red().to_string(),
            sig => sig.to_string().yellow().to_string(),
        };
        write!(
            f,
            "{} {} ({}): [{}]",
            self.tonic.to_string().bold(),
            self.mode.to_string().green().bold(),
            signature,
            notes.join(", ")
        )
    }
}

#[cfg(not(feature = "colored"))]
impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let signature = match self.signature {
            KeySignature::Natural => "no accidentals".to_string(),
            sig => sig.to_string(),
        };
        write!(
            f,
            "{} {} ({}): [{}]",
            self.tonic,
            self.mode,
            signature,
            join_notes(&self.notes)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn note(s: &str) -> Note {
        s.parse().unwrap()
    }

    fn names(notes: &[Note]) -> Vec<String> {
        notes.iter().map(|n| n.to_string()).collect()
    }

    fn degree(s: &str) -> ModeDegree {
        s.parse().unwrap()
    }

    #[test]
    fn test_c_ionian() {
        let key = build_key("C", "Ionian").unwrap();
        assert_eq!(names(key.notes()), vec!["C", "D", "E", "F", "G", "A", "B"]);
        assert_eq!(key.signature(), KeySignature::Natural);
        assert_eq!(key.signature().to_string(), "");
        assert!(!key.is_theoretical());
        assert_eq!(key.enharmonic_equivalents(), &[note("B#"), note("Dbb")]);
    }

    #[test]
    fn test_common_signatures() {
        assert_eq!(build_key("G", "Ionian").unwrap().signature().to_string(), "1#");
        assert_eq!(build_key("F", "Ionian").unwrap().signature().to_string(), "1b");
        assert_eq!(build_key("D", "Dorian").unwrap().signature().to_string(), "");
        assert_eq!(build_key("E", "Phrygian").unwrap().signature().to_string(), "");
        assert_eq!(build_key("F#", "Aeolian").unwrap().signature().to_string(), "3#");
        assert_eq!(build_key("Bb", "Mixolydian").unwrap().signature().to_string(), "3b");
    }

    #[test]
    fn test_theoretical_keys() {
        let key = build_key("G#", "Ionian").unwrap();
        assert_eq!(
            names(key.notes()),
            vec!["G#", "A#", "B#", "C#", "D#", "E#", "F##"]
        );
        assert_eq!(key.signature(), KeySignature::Sharps(8));
        assert!(key.is_theoretical());

        let key = build_key("Fb", "Ionian").unwrap();
        assert_eq!(key.signature(), KeySignature::Flats(8));
        assert!(key.notes().contains(&note("Bbb")));

        let key = build_key("B##", "Locrian").unwrap();
        assert_eq!(key.signature(), KeySignature::Sharps(14));
    }

    #[test]
    fn test_invalid_tonic() {
        let err = build_key("Fbb", "Ionian").unwrap_err();
        assert_eq!(
            err,
            TheoryError::InvalidTonicForMode {
                tonic: "Fbb".to_string(),
                mode: ModeName::Ionian,
            }
        );
        // Three marks is never a table spelling
        assert!(build_key("C###", "Ionian").is_err());
        assert!(build_key("C", "Hypoionian").is_err());
        assert!(build_key("X", "Ionian").is_err());
    }

    #[test]
    fn test_signature_errors() {
        let mixed = [
            note("C"),
            note("D"),
            note("E"),
            note("F#"),
            note("G"),
            note("A"),
            note("Bb"),
        ];
        assert!(matches!(
            key_signature_from_notes(&mixed),
            Err(TheoryError::InvalidKeySignature { .. })
        ));
        assert!(key_signature_from_notes(&mixed[..6]).is_err());

        let too_many = [
            note("C###"),
            note("D##"),
            note("E##"),
            note("F##"),
            note("G##"),
            note("A##"),
            note("B##"),
        ];
        assert!(key_signature_from_notes(&too_many).is_err());
    }

    #[test]
    fn test_signature_parsing() {
        assert_eq!("".parse::<KeySignature>().unwrap(), KeySignature::Natural);
        assert_eq!("3#".parse::<KeySignature>().unwrap(), KeySignature::Sharps(3));
        assert_eq!("12b".parse::<KeySignature>().unwrap(), KeySignature::Flats(12));
        assert!("15#".parse::<KeySignature>().is_err());
        assert!("0b".parse::<KeySignature>().is_err());
        assert!("3x".parse::<KeySignature>().is_err());
        assert!("3\u{266F}".parse::<KeySignature>().is_err());
        assert!("\u{266D}".parse::<KeySignature>().is_err());
    }

    #[test]
    fn test_spell_key_tones_requires_tonic_on_first_tone() {
        let tones = key_tones(&note("D"), ModeName::Ionian);
        assert!(matches!(
            spell_key_tones(&note("C"), &tones),
            Err(TheoryError::UnresolvableSpelling { .. })
        ));
        assert_eq!(
            names(&spell_key_tones(&note("D"), &tones).unwrap()),
            vec!["D", "E", "F#", "G", "A", "B", "C#"]
        );
    }

    #[test]
    fn test_altered_degrees() {
        let key = build_key("C", "Ionian").unwrap();
        assert_eq!(key.notes_by_degree().len(), 21);
        assert_eq!(key.note(degree("b3")), note("Eb"));
        assert_eq!(key.note(degree("#4")), note("F#"));
        assert_eq!(key.note(degree("#3")), note("F"));
        assert_eq!(key.note(degree("b1")), note("B"));
        assert_eq!(key.tone_by_degree(degree("b7")).index(), 10);
    }

    #[test]
    fn test_reverse_map_prefers_standard_degrees() {
        let key = build_key("C", "Ionian").unwrap();
        // #3 and b1 land on F and B, which belong to 4 and 7
        assert_eq!(key.degree_of(&note("F")), Some(degree("4")));
        assert_eq!(key.degree_of(&note("B")), Some(degree("7")));
        // #1 and b2 share a tone but are spelled apart
        assert_eq!(key.degree_of(&note("Db")), Some(degree("b2")));
        assert_eq!(key.degree_of(&note("C#")), Some(degree("#1")));
        assert_eq!(key.degree_of(&note("Eb")), Some(degree("b3")));
        assert_eq!(key.degree_of(&note("Fb")), None);
    }

    #[test]
    fn test_degree_round_trip() {
        let key = build_key("Eb", "Dorian").unwrap();
        for d in ModeDegree::STANDARD {
            assert_eq!(key.degree_of(&key.note(d)), Some(d));
        }
    }

    #[test]
    fn test_enharmonic_equivalents() {
        let key = build_key("C#", "Ionian").unwrap();
        assert_eq!(key.enharmonic_equivalents(), &[note("Db")]);

        let key = build_key("B#", "Ionian").unwrap();
        assert!(key.enharmonic_equivalents().contains(&note("C")));
    }

    #[test]
    fn test_relative_keys() {
        let c = build_key("C", "Ionian").unwrap();
        let a = c.relative(ModeName::Aeolian).unwrap();
        assert_eq!(a.tonic(), note("A"));
        assert_eq!(a.signature(), KeySignature::Natural);
        assert_eq!(a.relative(ModeName::Ionian).unwrap().tonic(), note("C"));

        let d = build_key("D", "Dorian").unwrap();
        assert_eq!(d.relative(ModeName::Lydian).unwrap().tonic(), note("F"));
    }

    #[test]
    fn test_diatonic_chords() {
        let key = build_key("C", "Ionian").unwrap();
        let chords = key.diatonic_chords();
        assert_eq!(chords.len(), 7);
        assert_eq!(names(&chords[1].notes), vec!["D", "F", "A"]);
        assert_eq!(chords[1].base, ChordBase::Minor);
        assert_eq!(chords[6].numeral, "vii\u{2070}");
        assert_eq!(names(&chords[6].notes), vec!["B", "D", "F"]);
        assert_eq!(chords[4].to_string(), "V Gmaj: [G, B, D]");
    }

    #[test]
    fn test_valid_tonic_sets() {
        assert!(is_valid_tonic(&note("C"), ModeName::Ionian));
        assert!(!is_valid_tonic(&note("Fbb"), ModeName::Ionian));
        for mode in ModeName::ALL {
            let tonics = valid_tonics(mode);
            for natural in ["C", "D", "E", "F", "G", "A", "B"] {
                assert!(tonics.contains(&note(natural)), "{} {}", natural, mode);
            }
        }
    }
}
