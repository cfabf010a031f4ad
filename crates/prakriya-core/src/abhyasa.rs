//! Reduplication (dvirvacana) of a dhātu before liṭ and san.
//!
//! Only the first syllable is copied, and the copy is then reduced to the
//! abhyāsa by 7.4.59 - 7.4.73 and 8.4.54.

use prakriya_model::sounds::is_vowel;
use prakriya_model::{Lakshana, Op, Sound, Tag, Term};
use tracing::debug;

use crate::rule::{Rule, RuleExt, rule};
use crate::state::State;

/// The `dvirvacana` stage.
pub fn dvirvacana() -> impl Rule {
    rule("dvirvacana", |state: &State| {
        let Some((i, dhatu)) = state.find(Tag::Dhatu) else {
            return Vec::new();
        };
        // 6.1.8 liṭi dhātor anabhyāsasya, 6.1.9 sanyaṅoḥ
        let reduplicate = state
            .next(i)
            .is_some_and(|(_, p)| p.any_lakshana(&[Lakshana::LiW, Lakshana::San]));
        let already = i > 0 && state.get(i - 1).is_some_and(|t| t.has_tag(Tag::Abhyasa));
        if !reduplicate || already || dhatu.is_empty() {
            return vec![state.clone()];
        }
        let abhyasa = abhyasa_of(dhatu);
        debug!(dhatu = %dhatu, abhyasa = %abhyasa, "reduplicated");
        vec![state.insert(i, abhyasa)]
    })
    .once(Op::Dvirvacana)
}

/// Build the abhyāsa for `dhatu` from its first syllable.
pub fn abhyasa_of(dhatu: &Term) -> Term {
    let sounds: Vec<char> = dhatu.value().chars().collect();
    let vowel_at = sounds.iter().position(|c| is_vowel(*c));
    let (consonants, vowel) = match vowel_at {
        Some(at) => (&sounds[..at], Some(sounds[at])),
        None => (sounds.as_slice(), None),
    };

    // 7.4.61 śarpūrvāḥ khayaḥ, else 7.4.60 halādiḥ śeṣaḥ
    let consonant = match consonants {
        [first, second, ..] if "Szs".contains(*first) && "KPCWTcwtkp".contains(*second) => {
            Some(*second)
        }
        [first, ..] => Some(*first),
        [] => None,
    };

    let vowel = vowel.map(|v| {
        if dhatu.clean() == "BU" && dhatu.has_tag(Tag::Dhatu) {
            // 7.4.73 bhavater aḥ
            return 'a';
        }
        // 7.4.59 hrasvaḥ, then 7.4.66 ur at
        match hrasva(v) {
            'f' | 'x' => 'a',
            v => v,
        }
    });

    // 8.4.54 abhyāse car ca
    let consonant = consonant.map(|c| deaspirate(kuhos_cuh(c)));

    let value: String = consonant.into_iter().chain(vowel).collect();
    Term::abhyasa(&value)
}

fn hrasva(c: char) -> char {
    Sound::new(c).map_or(c, |s| s.hrasva().as_char())
}

fn deaspirate(c: char) -> char {
    Sound::new(c).map_or(c, |s| s.deaspirate().as_char())
}

/// 7.4.62 kuhoś cuḥ
fn kuhos_cuh(c: char) -> char {
    match c {
        'k' => 'c',
        'K' => 'C',
        'g' | 'h' => 'j',
        'G' => 'J',
        'N' => 'Y',
        c => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abhyasa(dhatu: &str) -> String {
        abhyasa_of(&Term::dhatu(dhatu)).value().to_string()
    }

    #[test]
    fn test_first_syllable_reduced() {
        assert_eq!(abhyasa("BU"), "ba");
        assert_eq!(abhyasa("gam"), "ja");
        assert_eq!(abhyasa("kf"), "ca");
        assert_eq!(abhyasa("sTA"), "ta");
        assert_eq!(abhyasa("han"), "ja");
        assert_eq!(abhyasa("ci"), "ci");
        assert_eq!(abhyasa("rAD"), "ra");
        assert_eq!(abhyasa("nI"), "ni");
    }

    #[test]
    fn test_vowel_initial_copies_vowel() {
        assert_eq!(abhyasa("i"), "i");
    }

    #[test]
    fn test_abhyasa_is_tagged() {
        assert!(abhyasa_of(&Term::dhatu("pac")).has_tag(Tag::Abhyasa));
    }
}
