//! Parsing of upadeśa forms into a value and its it-markers.
//!
//! The parser follows the it-rules of 1.3.2 - 1.3.8 closely enough for the
//! forms the rule set uses:
//!
//! - nasalised vowels (`a~`, `i~`, `u~`) are it;
//! - a final consonant is it, except the t-varga, `s` and `m` of a vibhakti,
//!   and except dhātus written bare (without accent or nasal notation);
//! - for pratyayas, an initial `z`, cu or ṭu sound, or `l`, `S` or ku sound
//!   is it;
//! - for dhātus in dhātupāṭha notation, an initial `Yi`, `wu` or `qu` is it.

use std::collections::BTreeSet;
use std::fmt;

use crate::enums::Marker;
use crate::error::{ModelError, Result};
use crate::sounds::{Sound, is_vowel};

const ACCENTS: [char; 2] = ['\\', '^'];

/// What kind of element an upadeśa introduces. This decides which it-rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpadeshaKind {
    Dhatu,
    Pratyaya,
    Vibhakti,
    /// An augment inserted into an existing term.
    Agama,
    /// A substitute for all or part of an existing term.
    Adesha,
}

/// An upadeśa: the raw teaching form plus the value and markers read off it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Upadesha {
    raw: String,
    value: String,
    markers: BTreeSet<Marker>,
}

impl Upadesha {
    /// Parse a raw form. Never fails; an empty value is a valid zero substitute.
    pub fn parse(raw: &str, kind: UpadeshaKind) -> Self {
        let notated = raw.contains(|c| ACCENTS.contains(&c) || c == '~');
        let mut chars: Vec<char> = raw.chars().filter(|c| !ACCENTS.contains(c)).collect();
        let mut markers = BTreeSet::new();

        if kind == UpadeshaKind::Dhatu && notated {
            if chars.ends_with(&['i', '~', 'r']) {
                chars.truncate(chars.len() - 3);
                markers.insert(Marker::Irit);
            }
            if chars.starts_with(&['Y', 'i'])
                || chars.starts_with(&['w', 'u'])
                || chars.starts_with(&['q', 'u'])
            {
                chars.drain(..2);
            }
        }

        // 1.3.3 halantyam looks at the final letter of the upadeśa as written.
        let final_is_it = match chars.last() {
            Some(&last) if !is_vowel(last) && last != '~' => match kind {
                UpadeshaKind::Dhatu => notated,
                // 1.3.4 na vibhaktau tusmāḥ
                UpadeshaKind::Vibhakti => !"tTdDnsm".contains(last),
                _ => true,
            },
            _ => false,
        };
        if final_is_it && let Some(marker) = chars.last().copied().and_then(Marker::from_letter) {
            markers.insert(marker);
            chars.pop();
        }

        // 1.3.2 upadeśe 'janunāsika it
        let mut sounds = Vec::with_capacity(chars.len());
        let mut iter = chars.iter().copied().peekable();
        while let Some(c) = iter.next() {
            if iter.peek() == Some(&'~') {
                iter.next();
                if let Some(marker) = Marker::from_nasal_vowel(c) {
                    markers.insert(marker);
                }
                continue;
            }
            sounds.push(c);
        }

        // 1.3.6 - 1.3.8 for the initial of a pratyaya
        if matches!(kind, UpadeshaKind::Pratyaya | UpadeshaKind::Vibhakti) && sounds.len() > 1 {
            let first = sounds[0];
            if "zcCjJYwWqQRlSkKgGN".contains(first)
                && let Some(marker) = Marker::from_letter(first)
            {
                markers.insert(marker);
                sounds.remove(0);
            }
        }

        Upadesha {
            raw: raw.to_string(),
            value: sounds.into_iter().collect(),
            markers,
        }
    }

    /// Parse a raw form supplied from outside the rule set, rejecting
    /// characters that are not SLP1 sounds and forms with no sounds left.
    pub fn parse_strict(raw: &str, kind: UpadeshaKind) -> Result<Self> {
        let upadesha = Self::parse(raw, kind);
        if upadesha.value.is_empty() || upadesha.value.chars().any(|c| Sound::new(c).is_none()) {
            return Err(ModelError::EmptyUpadesha(raw.to_string()));
        }
        Ok(upadesha)
    }

    pub fn agama(raw: &str) -> Self {
        Self::parse(raw, UpadeshaKind::Agama)
    }

    pub fn adesha(raw: &str) -> Self {
        Self::parse(raw, UpadeshaKind::Adesha)
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn markers(&self) -> &BTreeSet<Marker> {
        &self.markers
    }

    pub fn has_marker(&self, marker: Marker) -> bool {
        self.markers.contains(&marker)
    }
}

impl fmt::Display for Upadesha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(raw: &str, kind: UpadeshaKind) -> (String, Vec<Marker>) {
        let upadesha = Upadesha::parse(raw, kind);
        (
            upadesha.value().to_string(),
            upadesha.markers().iter().copied().collect(),
        )
    }

    #[test]
    fn test_agama_markers() {
        assert_eq!(parsed("vu~k", UpadeshaKind::Agama), ("v".into(), vec![Marker::Kit, Marker::Udit]));
        assert_eq!(parsed("iw", UpadeshaKind::Agama), ("i".into(), vec![Marker::Ttit]));
        assert_eq!(parsed("iya~N", UpadeshaKind::Adesha), ("iy".into(), vec![Marker::Ngit, Marker::Adit]));
    }

    #[test]
    fn test_pratyaya_initial_it() {
        assert_eq!(parsed("Ral", UpadeshaKind::Vibhakti), ("a".into(), vec![Marker::Nnit, Marker::Lit]));
        assert_eq!(parsed("Sap", UpadeshaKind::Pratyaya), ("a".into(), vec![Marker::Pit, Marker::Shit]));
        assert_eq!(parsed("kta", UpadeshaKind::Pratyaya), ("ta".into(), vec![Marker::Kit]));
    }

    #[test]
    fn test_vibhakti_keeps_tusma() {
        assert_eq!(parsed("atus", UpadeshaKind::Vibhakti), ("atus".into(), vec![]));
        assert_eq!(parsed("tip", UpadeshaKind::Vibhakti), ("ti".into(), vec![Marker::Pit]));
    }

    #[test]
    fn test_dhatu_notation() {
        assert_eq!(parsed("gam", UpadeshaKind::Dhatu), ("gam".into(), vec![]));
        assert_eq!(parsed("ga\\mx~", UpadeshaKind::Dhatu), ("gam".into(), vec![]));
        assert_eq!(parsed("i\\R", UpadeshaKind::Dhatu), ("i".into(), vec![Marker::Nnit]));
        assert_eq!(parsed("qukf\\Y", UpadeshaKind::Dhatu), ("kf".into(), vec![Marker::Nyit]));
    }

    #[test]
    fn test_parse_strict_rejects_empty() {
        assert!(Upadesha::parse_strict("", UpadeshaKind::Dhatu).is_err());
        assert!(Upadesha::parse_strict("g@m", UpadeshaKind::Dhatu).is_err());
        assert!(Upadesha::parse_strict("BU", UpadeshaKind::Dhatu).is_ok());
    }
}
