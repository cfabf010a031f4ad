//! Sound classification for SLP1-encoded Sanskrit.
//!
//! Every sound is a single `char`. Classes are built from three sources:
//!
//! - **Homogeneous sets** (savarṇa): a short vowel stands for itself and its
//!   long counterpart (`a` = {a, A}); ṛ and ḷ are homogeneous with each other.
//! - **Vargas**: the five stop series `ku cu wu tu pu`.
//! - **Pratyāhāras**: abbreviations read off the Māheśvara sūtras (`ac`,
//!   `hal`, `ik`, `yaR`, ...).
//!
//! A trailing `t` on a single sound (`et`, `at`, `Ft`) names exactly that
//! sound.

use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

const VOWELS: &str = "aAiIuUfFxXeEoO";

/// The Māheśvara sūtras: each entry lists its sounds and closing it-marker.
const MAHESHVARA_SUTRAS: &[(&str, char)] = &[
    ("aiu", 'R'),
    ("fx", 'k'),
    ("eo", 'N'),
    ("EO", 'c'),
    ("hyvr", 'w'),
    ("l", 'R'),
    ("YmNRn", 'm'),
    ("JB", 'Y'),
    ("GQD", 'z'),
    ("jbgqd", 'S'),
    ("KPCWTcwt", 'v'),
    ("kp", 'y'),
    ("Szs", 'r'),
    ("h", 'l'),
];

/// Place of articulation (sthāna).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Place {
    Velar,
    Palatal,
    Retroflex,
    Dental,
    Labial,
}

/// Broad manner of articulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Manner {
    Vowel,
    Stop,
    Nasal,
    Semivowel,
    Sibilant,
}

/// A single SLP1 sound with its articulatory features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sound(char);

impl Sound {
    /// Returns `None` for characters that are not SLP1 sounds.
    pub fn new(c: char) -> Option<Self> {
        Self::features(c).map(|_| Sound(c))
    }

    pub fn as_char(&self) -> char {
        self.0
    }

    pub fn is_vowel(&self) -> bool {
        self.manner() == Manner::Vowel
    }

    pub fn place(&self) -> Place {
        Self::features(self.0).map_or(Place::Velar, |(place, ..)| place)
    }

    pub fn manner(&self) -> Manner {
        Self::features(self.0).map_or(Manner::Stop, |(_, manner, ..)| manner)
    }

    pub fn is_voiced(&self) -> bool {
        Self::features(self.0).is_some_and(|(_, _, voiced, _)| voiced)
    }

    pub fn is_aspirated(&self) -> bool {
        Self::features(self.0).is_some_and(|(_, _, _, aspirated)| aspirated)
    }

    /// Returns true if the two sounds are homogeneous (1.1.9 tulyāsyaprayatnaṃ savarṇam).
    pub fn savarna(&self, other: &Sound) -> bool {
        if self.0 == other.0 {
            return true;
        }
        match (savarna_group(self.0), savarna_group(other.0)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Short counterpart of a long simple vowel; other sounds are unchanged.
    pub fn hrasva(&self) -> Sound {
        let short = match self.0 {
            'A' => 'a',
            'I' => 'i',
            'U' => 'u',
            'F' => 'f',
            'X' => 'x',
            'e' | 'E' => 'i',
            'o' | 'O' => 'u',
            c => c,
        };
        Sound(short)
    }

    /// Unaspirated counterpart of an aspirated stop.
    pub fn deaspirate(&self) -> Sound {
        let plain = match self.0 {
            'K' => 'k',
            'G' => 'g',
            'C' => 'c',
            'J' => 'j',
            'W' => 'w',
            'Q' => 'q',
            'T' => 't',
            'D' => 'd',
            'P' => 'p',
            'B' => 'b',
            c => c,
        };
        Sound(plain)
    }

    /// The member of `class` closest to this sound. Place of articulation
    /// outweighs manner, voicing and aspiration together, so a class at
    /// another place (ku for a palatal) still answers with its nearest
    /// member. Ties go to the earlier member. A one-sound class always
    /// answers with that sound.
    pub fn closest_in(&self, class: &SoundClass) -> Option<Sound> {
        if class.sounds.len() == 1 {
            return Sound::new(class.sounds[0]);
        }
        let mut best: Option<(u8, Sound)> = None;
        for candidate in class.iter() {
            let score = 4 * u8::from(candidate.place() == self.place())
                + u8::from(candidate.is_voiced() == self.is_voiced())
                + u8::from(candidate.is_aspirated() == self.is_aspirated())
                + u8::from(candidate.manner() == self.manner());
            if best.is_none_or(|(current, _)| score > current) {
                best = Some((score, candidate));
            }
        }
        best.map(|(_, sound)| sound)
    }

    /// (place, manner, voiced, aspirated)
    fn features(c: char) -> Option<(Place, Manner, bool, bool)> {
        use Manner::{Nasal, Semivowel, Sibilant, Stop, Vowel};
        use Place::{Dental, Labial, Palatal, Retroflex, Velar};
        let features = match c {
            'a' | 'A' => (Velar, Vowel, true, false),
            'i' | 'I' | 'e' | 'E' => (Palatal, Vowel, true, false),
            'u' | 'U' | 'o' | 'O' => (Labial, Vowel, true, false),
            'f' | 'F' => (Retroflex, Vowel, true, false),
            'x' | 'X' => (Dental, Vowel, true, false),
            'k' => (Velar, Stop, false, false),
            'K' => (Velar, Stop, false, true),
            'g' => (Velar, Stop, true, false),
            'G' => (Velar, Stop, true, true),
            'N' => (Velar, Nasal, true, false),
            'h' => (Velar, Sibilant, true, true),
            'c' => (Palatal, Stop, false, false),
            'C' => (Palatal, Stop, false, true),
            'j' => (Palatal, Stop, true, false),
            'J' => (Palatal, Stop, true, true),
            'Y' => (Palatal, Nasal, true, false),
            'y' => (Palatal, Semivowel, true, false),
            'S' => (Palatal, Sibilant, false, false),
            'w' => (Retroflex, Stop, false, false),
            'W' => (Retroflex, Stop, false, true),
            'q' => (Retroflex, Stop, true, false),
            'Q' => (Retroflex, Stop, true, true),
            'R' => (Retroflex, Nasal, true, false),
            'r' => (Retroflex, Semivowel, true, false),
            'z' => (Retroflex, Sibilant, false, false),
            't' => (Dental, Stop, false, false),
            'T' => (Dental, Stop, false, true),
            'd' => (Dental, Stop, true, false),
            'D' => (Dental, Stop, true, true),
            'n' => (Dental, Nasal, true, false),
            'l' => (Dental, Semivowel, true, false),
            's' => (Dental, Sibilant, false, false),
            'p' => (Labial, Stop, false, false),
            'P' => (Labial, Stop, false, true),
            'b' => (Labial, Stop, true, false),
            'B' => (Labial, Stop, true, true),
            'm' => (Labial, Nasal, true, false),
            'v' => (Labial, Semivowel, true, false),
            _ => return None,
        };
        Some(features)
    }
}

impl fmt::Display for Sound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn savarna_group(c: char) -> Option<u8> {
    match c {
        'a' | 'A' => Some(0),
        'i' | 'I' => Some(1),
        'u' | 'U' => Some(2),
        // ṛ and ḷ are treated as homogeneous.
        'f' | 'F' | 'x' | 'X' => Some(3),
        _ => None,
    }
}

/// Returns true if `c` is an SLP1 vowel.
pub fn is_vowel(c: char) -> bool {
    VOWELS.contains(c)
}

/// The five stop series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Varga {
    Ku,
    Cu,
    Wu,
    Tu,
    Pu,
}

impl Varga {
    pub fn as_str(&self) -> &'static str {
        match self {
            Varga::Ku => "ku",
            Varga::Cu => "cu",
            Varga::Wu => "wu",
            Varga::Tu => "tu",
            Varga::Pu => "pu",
        }
    }

    fn members(&self) -> &'static str {
        match self {
            Varga::Ku => "kKgGN",
            Varga::Cu => "cCjJY",
            Varga::Wu => "wWqQR",
            Varga::Tu => "tTdDn",
            Varga::Pu => "pPbBm",
        }
    }
}

/// Pratyāhāras used by the rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pratyahara {
    Ac,
    Hal,
    Ik,
    YaR,
    Ec,
    Ak,
    Jal,
    JaS,
    Car,
    Khay,
    Sar,
}

impl Pratyahara {
    pub const ALL: [Pratyahara; 11] = [
        Pratyahara::Ac,
        Pratyahara::Hal,
        Pratyahara::Ik,
        Pratyahara::YaR,
        Pratyahara::Ec,
        Pratyahara::Ak,
        Pratyahara::Jal,
        Pratyahara::JaS,
        Pratyahara::Car,
        Pratyahara::Khay,
        Pratyahara::Sar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Pratyahara::Ac => "ac",
            Pratyahara::Hal => "hal",
            Pratyahara::Ik => "ik",
            Pratyahara::YaR => "yaR",
            Pratyahara::Ec => "ec",
            Pratyahara::Ak => "ak",
            Pratyahara::Jal => "Jal",
            Pratyahara::JaS => "jaS",
            Pratyahara::Car => "car",
            Pratyahara::Khay => "Kay",
            Pratyahara::Sar => "Sar",
        }
    }

    /// First sound and closing it-marker.
    fn bounds(&self) -> (char, char) {
        match self {
            Pratyahara::Ac => ('a', 'c'),
            Pratyahara::Hal => ('h', 'l'),
            Pratyahara::Ik => ('i', 'k'),
            Pratyahara::YaR => ('y', 'R'),
            Pratyahara::Ec => ('e', 'c'),
            Pratyahara::Ak => ('a', 'k'),
            Pratyahara::Jal => ('J', 'l'),
            Pratyahara::JaS => ('j', 'S'),
            Pratyahara::Car => ('c', 'r'),
            Pratyahara::Khay => ('K', 'y'),
            Pratyahara::Sar => ('S', 'r'),
        }
    }

    /// Expand the pratyāhāra by reading the sūtras from the first sound up
    /// to the first sūtra closed by the it-marker.
    fn expand(&self) -> Vec<char> {
        let (start, it) = self.bounds();
        let mut sounds = Vec::new();
        let mut collecting = false;
        for (members, closing) in MAHESHVARA_SUTRAS {
            for c in members.chars() {
                if !collecting && c == start {
                    collecting = true;
                }
                if collecting && !sounds.contains(&c) {
                    sounds.push(c);
                }
            }
            if collecting && *closing == it {
                break;
            }
        }
        // 1.1.69 aṇudit savarṇasya cāpratyayaḥ
        let mut expanded = Vec::with_capacity(sounds.len());
        for c in sounds {
            expanded.push(c);
            if let Some(long) = long_of(c) {
                expanded.push(long);
            }
        }
        expanded
    }
}

impl FromStr for Pratyahara {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pratyahara::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ModelError::UnknownSoundClass(s.to_string()))
    }
}

fn long_of(c: char) -> Option<char> {
    match c {
        'a' => Some('A'),
        'i' => Some('I'),
        'u' => Some('U'),
        'f' => Some('F'),
        'x' => Some('X'),
        _ => None,
    }
}

/// An ordered set of sounds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SoundClass {
    sounds: Vec<char>,
}

impl SoundClass {
    /// Build a class from literal sounds. Non-sounds are ignored.
    pub fn of(sounds: &str) -> Self {
        let mut class = SoundClass::default();
        for c in sounds.chars().filter(|c| Sound::new(*c).is_some()) {
            class.push(c);
        }
        class
    }

    /// A sound and everything homogeneous with it (1.1.69).
    pub fn homogeneous(c: char) -> Self {
        match savarna_group(c) {
            Some(3) => SoundClass::of("fFxX"),
            Some(_) => {
                let short = Sound(c).hrasva().0;
                let mut class = SoundClass::of(&short.to_string());
                if let Some(long) = long_of(short) {
                    class.push(long);
                }
                class
            }
            None => SoundClass::of(&c.to_string()),
        }
    }

    pub fn varga(varga: Varga) -> Self {
        SoundClass::of(varga.members())
    }

    pub fn pratyahara(pratyahara: Pratyahara) -> Self {
        let mut class = SoundClass::default();
        for c in pratyahara.expand() {
            class.push(c);
        }
        class
    }

    /// Parse a space-separated class spec such as `"i u"`, `"c j"`, `"ku"`,
    /// `"et"` or `"yaR"`.
    pub fn parse(spec: &str) -> Result<Self, ModelError> {
        let mut class = SoundClass::default();
        for item in spec.split_whitespace() {
            class.extend(&Self::parse_item(item)?);
        }
        if class.sounds.is_empty() {
            return Err(ModelError::UnknownSoundClass(spec.to_string()));
        }
        Ok(class)
    }

    fn parse_item(item: &str) -> Result<Self, ModelError> {
        if let Ok(pratyahara) = item.parse::<Pratyahara>() {
            return Ok(SoundClass::pratyahara(pratyahara));
        }
        let varga = match item {
            "ku" => Some(Varga::Ku),
            "cu" => Some(Varga::Cu),
            "wu" => Some(Varga::Wu),
            "tu" => Some(Varga::Tu),
            "pu" => Some(Varga::Pu),
            _ => None,
        };
        if let Some(varga) = varga {
            return Ok(SoundClass::varga(varga));
        }
        let chars: Vec<char> = item.chars().collect();
        match chars.as_slice() {
            [c] if Sound::new(*c).is_some() => Ok(SoundClass::homogeneous(*c)),
            [c, 't'] if Sound::new(*c).is_some() => Ok(SoundClass::of(&c.to_string())),
            _ => Err(ModelError::UnknownSoundClass(item.to_string())),
        }
    }

    fn push(&mut self, c: char) {
        if !self.sounds.contains(&c) {
            self.sounds.push(c);
        }
    }

    fn extend(&mut self, other: &SoundClass) {
        for c in &other.sounds {
            self.push(*c);
        }
    }

    pub fn contains(&self, c: char) -> bool {
        self.sounds.contains(&c)
    }

    pub fn iter(&self) -> impl Iterator<Item = Sound> + '_ {
        self.sounds.iter().filter_map(|c| Sound::new(*c))
    }

    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }
}

impl fmt::Display for SoundClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: String = self.sounds.iter().collect();
        write!(f, "{text}")
    }
}
