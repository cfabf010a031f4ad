//! The morphological term and its phonological primitives.
//!
//! A [`Term`] never changes once built. Every transform borrows the term and
//! returns a new one, so terms can be shared freely between derivation
//! branches.

use std::collections::BTreeSet;
use std::fmt;

use crate::enums::{Lakshana, Marker, Tag};
use crate::sounds::{Pratyahara, Sound, SoundClass, is_vowel};
use crate::upadesha::{Upadesha, UpadeshaKind};

/// Stable identity of a windowed rule: its position in the rule set that
/// registered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(pub usize);

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    raw: String,
    clean: String,
    value: String,
    tags: BTreeSet<Tag>,
    markers: BTreeSet<Marker>,
    lakshana: BTreeSet<Lakshana>,
    parts: Vec<Upadesha>,
    declined: BTreeSet<RuleId>,
}

impl Term {
    /// A plain term whose value is `value` as given.
    pub fn new(value: &str) -> Self {
        Self {
            raw: value.to_string(),
            clean: value.to_string(),
            value: value.to_string(),
            tags: BTreeSet::new(),
            markers: BTreeSet::new(),
            lakshana: BTreeSet::new(),
            parts: Vec::new(),
            declined: BTreeSet::new(),
        }
    }

    pub fn from_upadesha(upadesha: &Upadesha) -> Self {
        Self {
            raw: upadesha.raw().to_string(),
            clean: upadesha.value().to_string(),
            value: upadesha.value().to_string(),
            markers: upadesha.markers().clone(),
            ..Self::new("")
        }
    }

    /// A dhātu, which is also an aṅga before whatever follows it.
    pub fn dhatu(raw: &str) -> Self {
        Self::from_upadesha(&Upadesha::parse(raw, UpadeshaKind::Dhatu))
            .with_tags([Tag::Dhatu, Tag::Anga])
    }

    pub fn pratyaya(raw: &str) -> Self {
        Self::from_upadesha(&Upadesha::parse(raw, UpadeshaKind::Pratyaya)).with_tags([Tag::Pratyaya])
    }

    /// A verbal ending (tiṅ).
    pub fn vibhakti(raw: &str) -> Self {
        Self::from_upadesha(&Upadesha::parse(raw, UpadeshaKind::Vibhakti))
            .with_tags([Tag::Pratyaya, Tag::Vibhakti, Tag::Tin])
    }

    pub fn abhyasa(value: &str) -> Self {
        Self::new(value).with_tags([Tag::Abhyasa])
    }

    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.tags.extend(tags);
        self
    }

    #[must_use]
    pub fn with_markers(mut self, markers: impl IntoIterator<Item = Marker>) -> Self {
        self.markers.extend(markers);
        self
    }

    #[must_use]
    pub fn with_lakshana(mut self, lakshana: impl IntoIterator<Item = Lakshana>) -> Self {
        self.lakshana.extend(lakshana);
        self
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The upadeśa value with it-letters and accents removed. Unlike
    /// `value`, this never changes under substitution.
    pub fn clean(&self) -> &str {
        &self.clean
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    pub fn markers(&self) -> &BTreeSet<Marker> {
        &self.markers
    }

    pub fn lakshana(&self) -> &BTreeSet<Lakshana> {
        &self.lakshana
    }

    /// Augments inserted into this term, in insertion order.
    pub fn parts(&self) -> &[Upadesha] {
        &self.parts
    }

    pub fn first_part(&self) -> Option<&Upadesha> {
        self.parts.first()
    }

    pub fn has_augment(&self, raw: &str) -> bool {
        self.parts.iter().any(|part| part.raw() == raw)
    }

    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    pub fn any_tag(&self, tags: &[Tag]) -> bool {
        tags.iter().any(|tag| self.tags.contains(tag))
    }

    pub fn has_marker(&self, marker: Marker) -> bool {
        self.markers.contains(&marker)
    }

    pub fn any_marker(&self, markers: &[Marker]) -> bool {
        markers.iter().any(|marker| self.markers.contains(marker))
    }

    pub fn has_lakshana(&self, lakshana: Lakshana) -> bool {
        self.lakshana.contains(&lakshana)
    }

    pub fn any_lakshana(&self, lakshana: &[Lakshana]) -> bool {
        lakshana.iter().any(|item| self.lakshana.contains(item))
    }

    /// Returns true if the optional rule `id` was declined on this term.
    pub fn is_declined(&self, id: RuleId) -> bool {
        self.declined.contains(&id)
    }

    pub fn declined(&self) -> &BTreeSet<RuleId> {
        &self.declined
    }

    fn sounds(&self) -> Vec<char> {
        self.value.chars().collect()
    }

    /// Final sound.
    pub fn antya(&self) -> Option<char> {
        self.value.chars().last()
    }

    /// Initial sound.
    pub fn adi(&self) -> Option<char> {
        self.value.chars().next()
    }

    /// Penultimate sound.
    pub fn upadha(&self) -> Option<char> {
        let sounds = self.sounds();
        sounds.len().checked_sub(2).map(|i| sounds[i])
    }

    pub fn ends_in(&self, class: &SoundClass) -> bool {
        self.antya().is_some_and(|c| class.contains(c))
    }

    pub fn starts_with(&self, class: &SoundClass) -> bool {
        self.adi().is_some_and(|c| class.contains(c))
    }

    /// Returns true if the term ends in a vowel.
    pub fn is_ac(&self) -> bool {
        self.antya().is_some_and(is_vowel)
    }

    /// Returns true if the term begins with a consonant cluster.
    pub fn is_samyogadi(&self) -> bool {
        let sounds = self.sounds();
        sounds.len() >= 2 && !is_vowel(sounds[0]) && !is_vowel(sounds[1])
    }

    /// Returns true if the final sound is directly preceded by a consonant cluster.
    pub fn has_samyoga_before_final(&self) -> bool {
        let sounds = self.sounds();
        let n = sounds.len();
        n >= 3 && !is_vowel(sounds[n - 2]) && !is_vowel(sounds[n - 3])
    }

    pub fn num_syllables(&self) -> usize {
        self.value.chars().filter(|c| is_vowel(*c)).count()
    }

    fn with_value(&self, value: String) -> Self {
        Self {
            value,
            ..self.clone()
        }
    }

    fn with_sound_at(&self, index: usize, replacement: &str) -> Self {
        let mut value = String::with_capacity(self.value.len() + replacement.len());
        for (i, c) in self.value.chars().enumerate() {
            if i == index {
                value.push_str(replacement);
            } else {
                value.push(c);
            }
        }
        self.with_value(value)
    }

    /// Replace the final sound. An empty replacement deletes it.
    pub fn set_antya(&self, replacement: &str) -> Self {
        match self.value.chars().count() {
            0 => self.clone(),
            n => self.with_sound_at(n - 1, replacement),
        }
    }

    /// Replace the initial sound. An empty replacement deletes it.
    pub fn set_adi(&self, replacement: &str) -> Self {
        if self.value.is_empty() {
            return self.clone();
        }
        self.with_sound_at(0, replacement)
    }

    /// Replace the penultimate sound. An empty replacement deletes it.
    pub fn set_upadha(&self, replacement: &str) -> Self {
        match self.value.chars().count() {
            n if n >= 2 => self.with_sound_at(n - 2, replacement),
            _ => self.clone(),
        }
    }

    /// Delete the whole value.
    pub fn lopa(&self) -> Self {
        self.with_value(String::new())
    }

    /// Guṇa of a final ik vowel, or of a light penultimate ik vowel
    /// (7.3.84, 7.3.86).
    pub fn guna(&self) -> Self {
        let ik = SoundClass::pratyahara(Pratyahara::Ik);
        let sounds = self.sounds();
        match sounds.as_slice() {
            [.., last] if ik.contains(*last) => self.set_antya(guna_of(*last)),
            [.., upadha, last] if "iufx".contains(*upadha) && !is_vowel(*last) => {
                self.set_upadha(guna_of(*upadha))
            }
            _ => self.clone(),
        }
    }

    /// Vṛddhi of a final vowel, or of a penultimate `a` (7.2.115, 7.2.116).
    pub fn vrddhi(&self) -> Self {
        let sounds = self.sounds();
        match sounds.as_slice() {
            [.., last] if is_vowel(*last) => self.set_antya(vrddhi_of(*last)),
            [.., 'a', _] => self.set_upadha("A"),
            _ => self.clone(),
        }
    }

    /// Samprasāraṇa: the first semivowel followed by a vowel becomes the
    /// corresponding ik vowel, and the vowel after it merges into it
    /// (1.1.45, 6.1.108).
    pub fn samprasarana(&self) -> Self {
        let yan = SoundClass::pratyahara(Pratyahara::YaR);
        let ik = SoundClass::pratyahara(Pratyahara::Ik);
        let sounds = self.sounds();
        for i in 0..sounds.len().saturating_sub(1) {
            if !yan.contains(sounds[i]) || !is_vowel(sounds[i + 1]) {
                continue;
            }
            let Some(vowel) = Sound::new(sounds[i]).and_then(|s| s.closest_in(&ik)) else {
                continue;
            };
            let mut value: String = sounds[..i].iter().collect();
            value.push(vowel.as_char());
            value.extend(&sounds[i + 2..]);
            return self.with_value(value);
        }
        self.clone()
    }

    /// Replace the last sound belonging to `target` with its closest
    /// counterpart in `result`. Without a counterpart the term is unchanged.
    pub fn al_tasya(&self, target: &SoundClass, result: &SoundClass) -> Self {
        let sounds = self.sounds();
        let Some(index) = sounds.iter().rposition(|c| target.contains(*c)) else {
            return self.clone();
        };
        match Sound::new(sounds[index]).and_then(|s| s.closest_in(result)) {
            Some(replacement) => self.with_sound_at(index, &replacement.to_string()),
            None => self.clone(),
        }
    }

    /// Substitute with an upadeśa, placed according to its markers.
    ///
    /// - ṭit augments go first and kit augments last (1.1.46);
    /// - mit augments go after the last vowel (1.1.47);
    /// - ṅit substitutes replace the final sound (1.1.53);
    /// - śit and multi-sound substitutes replace the whole value (1.1.55);
    /// - anything else replaces the final sound (1.1.52).
    pub fn tasya(&self, upadesha: &Upadesha) -> Self {
        let insert = upadesha.value();
        if upadesha.has_marker(Marker::Kit) {
            return self.with_part(format!("{}{insert}", self.value), upadesha);
        }
        if upadesha.has_marker(Marker::Ttit) {
            return self.with_part(format!("{insert}{}", self.value), upadesha);
        }
        if upadesha.has_marker(Marker::Mit) {
            let sounds = self.sounds();
            let at = sounds.iter().rposition(|c| is_vowel(*c)).map_or(sounds.len(), |i| i + 1);
            let mut value: String = sounds[..at].iter().collect();
            value.push_str(insert);
            value.extend(&sounds[at..]);
            return self.with_part(value, upadesha);
        }
        if upadesha.has_marker(Marker::Ngit) {
            return self.set_antya(insert);
        }
        if upadesha.has_marker(Marker::Shit) || insert.chars().count() > 1 {
            return self.with_value(insert.to_string());
        }
        self.set_antya(insert)
    }

    fn with_part(&self, value: String, upadesha: &Upadesha) -> Self {
        let mut term = self.with_value(value);
        term.parts.push(upadesha.clone());
        term
    }

    /// Record that the optional rule `id` was declined on this term.
    pub fn decline(&self, id: RuleId) -> Self {
        let mut term = self.clone();
        term.declined.insert(id);
        term
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

fn guna_of(c: char) -> &'static str {
    match c {
        'i' | 'I' => "e",
        'u' | 'U' => "o",
        'f' | 'F' => "ar",
        'x' | 'X' => "al",
        'A' => "A",
        _ => "a",
    }
}

fn vrddhi_of(c: char) -> &'static str {
    match c {
        'i' | 'I' | 'e' | 'E' => "E",
        'u' | 'U' | 'o' | 'O' => "O",
        'f' | 'F' => "Ar",
        'x' | 'X' => "Al",
        _ => "A",
    }
}
