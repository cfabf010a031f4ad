//! Closed vocabularies for grammatical categories, it-markers, rule origins,
//! and pipeline operations.
//!
//! Every vocabulary is spelled in SLP1 the way the grammar writes it, and
//! round-trips through `as_str` / `FromStr`.

use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every member, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Returns the SLP1 spelling.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|item| item.as_str() == trimmed)
                    .ok_or_else(|| ModelError::UnknownVocabulary {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

vocabulary! {
    /// Grammatical category (saṃjñā) attached to a term.
    Tag, "tag" {
        Anga => "anga",
        Dhatu => "dhatu",
        /// The reduplicated syllable copied from a dhātu.
        Abhyasa => "abhyasa",
        Pratyaya => "pratyaya",
        Sarvadhatuka => "sarvadhatuka",
        Ardhadhatuka => "ardhadhatuka",
        Tin => "tin",
        Vibhakti => "vibhakti",
        Krt => "krt",
    }
}

vocabulary! {
    /// It-marker carried by an upadeśa. Named after the letter that marks it
    /// (kit, ṅit, ñit, ...).
    Marker, "marker" {
        Kit => "k",
        Ngit => "N",
        Nyit => "Y",
        Nnit => "R",
        Ttit => "w",
        Pit => "p",
        Mit => "m",
        Shit => "S",
        Ssit => "z",
        Cit => "c",
        Lit => "l",
        Adit => "a~",
        Idit => "i~",
        Udit => "u~",
        Irit => "ir",
    }
}

impl Marker {
    /// The marker a single it-letter stands for, if any.
    pub fn from_letter(c: char) -> Option<Marker> {
        let marker = match c {
            'k' => Marker::Kit,
            'N' => Marker::Ngit,
            'Y' => Marker::Nyit,
            'R' => Marker::Nnit,
            'w' => Marker::Ttit,
            'p' => Marker::Pit,
            'm' => Marker::Mit,
            'S' => Marker::Shit,
            'z' => Marker::Ssit,
            'c' => Marker::Cit,
            'l' => Marker::Lit,
            _ => return None,
        };
        Some(marker)
    }

    /// The marker a nasalised it-vowel stands for, if any.
    pub fn from_nasal_vowel(c: char) -> Option<Marker> {
        match c {
            'a' => Some(Marker::Adit),
            'i' => Some(Marker::Idit),
            'u' => Some(Marker::Udit),
            _ => None,
        }
    }
}

vocabulary! {
    /// Identifies the upstream rule or suffix that produced a term.
    Lakshana, "lakshana" {
        LaW => "la~w",
        LiW => "li~w",
        LuW => "lu~w",
        LfW => "lf~w",
        LeW => "le~w",
        LoW => "lo~w",
        LaN => "la~N",
        LiN => "li~N",
        LuN => "lu~N",
        LfN => "lf~N",
        San => "san",
        CaN => "caN",
        Iw => "iw",
    }
}

vocabulary! {
    /// Named pipeline operation recorded in a derivation's `ops`.
    Op, "operation" {
        /// Reduplication attempted.
        Dvirvacana => "dvirvacana",
        /// Stem substitution attempted.
        AngaAdesha => "anga_adesha",
        Rt => "rt",
        /// Vowel-before-vowel rules attempted.
        AngaAci => "anga_aci",
        AcAdesha => "ac_adesha",
        /// Ku-class substitution attempted.
        AngaKu => "anga_ku",
    }
}
