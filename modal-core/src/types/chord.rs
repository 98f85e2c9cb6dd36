//! Chord construction from a root and a chord description
//!
//! Chords are always spelled against the Ionian key of their root. A chord
//! base names a seven-member degree skeleton; the extension decides how much
//! of it to keep, additions and alterations adjust it, and a slash degree
//! rotates it so that member sounds in the bass.

use crate::error::{Result, TheoryError};
use crate::types::degree::{Alteration, ChordDegree};
use crate::types::interval::Interval;
use crate::types::key::Key;
use crate::types::mode::ModeName;
use crate::types::note::Note;
#[cfg(feature = "colored")]
use colored::*;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChordBase {
    Major,
    Minor,
    Diminished,
    Dominant,
    Augmented,
    Sus2,
    Sus4,
}

impl ChordBase {
    pub const ALL: [ChordBase; 7] = [
        ChordBase::Major,
        ChordBase::Minor,
        ChordBase::Diminished,
        ChordBase::Dominant,
        ChordBase::Augmented,
        ChordBase::Sus2,
        ChordBase::Sus4,
    ];

    pub fn token(self) -> &'static str {
        match self {
            ChordBase::Major => "maj",
            ChordBase::Minor => "min",
            ChordBase::Diminished => "dim",
            ChordBase::Dominant => "dom",
            ChordBase::Augmented => "aug",
            ChordBase::Sus2 => "sus2",
            ChordBase::Sus4 => "sus4",
        }
    }

    /// Degree skeleton up to the thirteenth
    pub fn degrees(self) -> [ChordDegree; 7] {
        use Alteration::{Flat, Natural, Sharp};
        let d = ChordDegree::of;
        let (third, fifth, seventh) = match self {
            ChordBase::Major => (d(3, Natural), d(5, Natural), d(7, Natural)),
            ChordBase::Minor => (d(3, Flat), d(5, Natural), d(7, Flat)),
            ChordBase::Diminished => (d(3, Flat), d(5, Flat), d(7, Natural)),
            ChordBase::Dominant => (d(3, Natural), d(5, Natural), d(7, Flat)),
            ChordBase::Augmented => (d(3, Natural), d(5, Sharp), d(7, Natural)),
            ChordBase::Sus2 => (d(2, Natural), d(5, Natural), d(7, Natural)),
            ChordBase::Sus4 => (d(4, Natural), d(5, Natural), d(7, Natural)),
        };
        [
            d(1, Natural),
            third,
            fifth,
            seventh,
            d(9, Natural),
            d(11, Natural),
            d(13, Natural),
        ]
    }
}

impl FromStr for ChordBase {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        ChordBase::ALL
            .into_iter()
            .find(|base| base.token() == s)
            .ok_or_else(|| TheoryError::malformed("chord base", s))
    }
}

impl fmt::Display for ChordBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

crate::string_serde!(ChordBase);

/// Highest stacked member of the chord
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChordExtension {
    Fifth,
    Seventh,
    Ninth,
    Eleventh,
    Thirteenth,
}

impl ChordExtension {
    pub fn number(self) -> u8 {
        match self {
            ChordExtension::Fifth => 5,
            ChordExtension::Seventh => 7,
            ChordExtension::Ninth => 9,
            ChordExtension::Eleventh => 11,
            ChordExtension::Thirteenth => 13,
        }
    }

    /// How many skeleton members the extension keeps
    pub fn member_count(self) -> usize {
        match self {
            ChordExtension::Fifth => 3,
            ChordExtension::Seventh => 4,
            ChordExtension::Ninth => 5,
            ChordExtension::Eleventh => 6,
            ChordExtension::Thirteenth => 7,
        }
    }
}

impl FromStr for ChordExtension {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "5" => Ok(ChordExtension::Fifth),
            "7" => Ok(ChordExtension::Seventh),
            "9" => Ok(ChordExtension::Ninth),
            "11" => Ok(ChordExtension::Eleventh),
            "13" => Ok(ChordExtension::Thirteenth),
            _ => Err(TheoryError::malformed("chord extension", s)),
        }
    }
}

impl fmt::Display for ChordExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

crate::string_serde!(ChordExtension);

/// Everything but the root
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChordSpec {
    pub base: ChordBase,
    #[cfg_attr(feature = "serde", serde(default))]
    pub extension: Option<ChordExtension>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub additions: Vec<ChordDegree>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub alterations: Vec<ChordDegree>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub slash: Option<ChordDegree>,
}

impl ChordSpec {
    pub fn new(base: ChordBase) -> Self {
        ChordSpec {
            base,
            extension: None,
            additions: Vec::new(),
            alterations: Vec::new(),
            slash: None,
        }
    }

    pub fn extension(mut self, extension: ChordExtension) -> Self {
        self.extension = Some(extension);
        self
    }

    pub fn add(mut self, degree: ChordDegree) -> Self {
        self.additions.push(degree);
        self
    }

    pub fn alter(mut self, degree: ChordDegree) -> Self {
        self.alterations.push(degree);
        self
    }

    pub fn slash(mut self, degree: ChordDegree) -> Self {
        self.slash = Some(degree);
        self
    }

    /// Read a base token followed by any of `7`, `add13`, `#5`, `/3`
    pub fn from_tokens<'a, I>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut tokens = tokens.into_iter();
        let base = tokens
            .next()
            .ok_or_else(|| TheoryError::malformed("chord base", ""))?
            .parse()?;
        let mut spec = ChordSpec::new(base);

        for token in tokens {
            if let Some(degree) = token.strip_prefix("add") {
                spec.additions.push(degree.parse()?);
            } else if let Some(degree) = token.strip_prefix('/') {
                spec.slash = Some(degree.parse()?);
            } else if token.starts_with('#') || token.starts_with('b') {
                let degree: ChordDegree = token.parse()?;
                spec.alterations.push(degree);
            } else {
                spec.extension = Some(token.parse()?);
            }
        }
        Ok(spec)
    }
}

impl FromStr for ChordSpec {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        ChordSpec::from_tokens(s.split_whitespace())
    }
}

/// A built chord: degrees in voicing order with their notes and intervals
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Chord {
    root: Note,
    spec: ChordSpec,
    degrees: Vec<ChordDegree>,
    notes: Vec<Note>,
    intervals: Vec<&'static Interval>,
    name: String,
}

impl Chord {
    pub fn root(&self) -> Note {
        self.root
    }

    pub fn spec(&self) -> &ChordSpec {
        &self.spec
    }

    pub fn base(&self) -> ChordBase {
        self.spec.base
    }

    pub fn degrees(&self) -> &[ChordDegree] {
        &self.degrees
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Interval of each note above the root
    pub fn intervals(&self) -> &[&'static Interval] {
        &self.intervals
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lowest member: the slash note if there is one, else the root
    pub fn bass(&self) -> Note {
        self.notes.first().copied().unwrap_or(self.root)
    }

    pub fn slash_note(&self) -> Option<Note> {
        self.spec.slash.map(|_| self.bass())
    }
}

pub fn build_chord(root: Note, spec: &ChordSpec) -> Result<Chord> {
    let key = Key::new(root, ModeName::Ionian)?;

    let count = spec
        .extension
        .map(ChordExtension::member_count)
        .unwrap_or(3);
    let mut degrees: Vec<ChordDegree> = spec.base.degrees()[..count].to_vec();

    for addition in &spec.additions {
        if !degrees.contains(addition) {
            degrees.push(*addition);
        }
    }
    for alteration in &spec.alterations {
        degrees.retain(|d| d.number() != alteration.number());
        degrees.push(*alteration);
    }
    degrees.sort();
    degrees.dedup();

    if let Some(slash) = spec.slash {
        let position = degrees
            .iter()
            .position(|d| d.to_mode_degree() == slash.to_mode_degree())
            .ok_or_else(|| TheoryError::UnresolvableSlashDegree {
                slash: slash.to_string(),
                degrees: degrees
                    .iter()
                    .map(|d| d.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            })?;
        degrees.rotate_left(position);
    }

    let notes: Vec<Note> = degrees
        .iter()
        .map(|d| key.note(d.to_mode_degree()))
        .collect();
    let intervals = notes.iter().map(|n| Interval::between(&root, n)).collect();

    let name = chord_name(root, spec, notes.first().copied());

    Ok(Chord {
        root,
        spec: spec.clone(),
        degrees,
        notes,
        intervals,
        name,
    })
}

/// Parse a root and a description (`"G"`, `"min 7 #5 add13"`) and build
pub fn parse_chord(root: &str, spec: &str) -> Result<Chord> {
    build_chord(root.parse()?, &spec.parse()?)
}

/// `Gmin7#5add13`, `Cmaj/E`
fn chord_name(root: Note, spec: &ChordSpec, bass: Option<Note>) -> String {
    let mut name = format!("{}{}", root, spec.base);
    if let Some(extension) = spec.extension.filter(|e| *e != ChordExtension::Fifth) {
        name.push_str(&extension.to_string());
    }
    for alteration in &spec.alterations {
        name.push_str(&alteration.to_string());
    }
    for addition in &spec.additions {
        name.push_str(&format!("add{}", addition));
    }
    if let (Some(_), Some(bass)) = (spec.slash, bass) {
        name.push_str(&format!("/{}", bass));
    }
    name
}

#[cfg(feature = "colored")]
impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let notes: Vec<String> = self
            .notes
            .iter()
            .map(|n| n.to_string().cyan().to_string())
            .collect();
        let name = match self.spec.base {
            ChordBase::Major => self.name.blue().bold(),
            ChordBase::Minor => self.name.red().bold(),
            ChordBase::Diminished => self.name.purple().bold(),
            ChordBase::Dominant => self.name.green().bold(),
            ChordBase::Augmented => self.name.bright_red().bold(),
            ChordBase::Sus2 | ChordBase::Sus4 => self.name.yellow().bold(),
        };
        write!(f, "{}: [{}]", name, notes.join(", "))
    }
}

#[cfg(not(feature = "colored"))]
impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let notes: Vec<String> = self.notes.iter().map(|n| n.to_string()).collect();
        write!(f, "{}: [{}]", self.name, notes.join(", "))
    }
}
