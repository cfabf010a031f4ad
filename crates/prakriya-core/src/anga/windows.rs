//! Window rule sets consulted by the `anga_aci` and `anga_ku` stages.
//!
//! Within a set, later rules are more specific and are tried first.

use prakriya_model::{Lakshana, Marker, Pratyahara, Sound, SoundClass, Tag, Term, Varga};

use crate::registry::{RuleSet, RuleSetError};
use crate::window::{RuleResult, Substitution, Window, WindowRule, ctx};

fn i_u() -> SoundClass {
    SoundClass::of("iIuU")
}

fn iya_or_uva(cur: &Term) -> Substitution {
    if cur.ends_in(&SoundClass::of("iI")) {
        Substitution::adesha("iya~N")
    } else {
        Substitution::adesha("uva~N")
    }
}

/// Rules conditioned by a following vowel (6.4.77 - 6.4.88).
pub fn aci_rules() -> Result<RuleSet, RuleSetError> {
    let ac = || ctx::starts_with(SoundClass::pratyahara(Pratyahara::Ac));

    RuleSet::builder()
        // 6.4.77 aci śnudhātubhruvāṃ yvor iyaṅuvaṅau
        .rule(
            WindowRule::new("6.4.77", |w: &Window| {
                RuleResult::Substitute(iya_or_uva(&w.cur))
            })
            .cur(ctx::tag(Tag::Dhatu).and(ctx::ends_with(i_u())))
            .right(ac()),
        )
        // 6.4.78 abhyāsasyāsavarṇe
        .rule(
            WindowRule::new("6.4.78", |w: &Window| {
                let savarna = match (w.cur.antya(), w.right.as_ref().and_then(|r| r.adi())) {
                    (Some(f), Some(s)) => Sound::new(f)
                        .zip(Sound::new(s))
                        .is_some_and(|(f, s)| f.savarna(&s)),
                    _ => true,
                };
                if savarna {
                    RuleResult::Unchanged
                } else {
                    RuleResult::Substitute(iya_or_uva(&w.cur))
                }
            })
            .cur(ctx::tag(Tag::Abhyasa).and(ctx::ends_with(i_u())))
            .right(ac()),
        )
        // 6.4.81 iṇo yaṇ
        .rule(
            WindowRule::new("6.4.81", |_: &Window| {
                RuleResult::Substitute(Substitution::operator(|cur, _| cur.set_antya("y")))
            })
            .cur(
                ctx::tag(Tag::Dhatu)
                    .and(ctx::clean_in(&["i"]))
                    .and(ctx::marker_any(&[Marker::Nnit])),
            )
            .right(ac()),
        )
        // 6.4.82 er anekāco 'saṃyogapūrvasya
        .rule(
            WindowRule::new("6.4.82", |w: &Window| {
                let anekac = w.cur.num_syllables() > 1
                    || w.left.as_ref().is_some_and(|l| l.has_tag(Tag::Abhyasa));
                if !anekac || w.cur.has_samyoga_before_final() {
                    return RuleResult::Unchanged;
                }
                RuleResult::Substitute(Substitution::operator(|cur, _| {
                    cur.al_tasya(&SoundClass::of("iI"), &SoundClass::pratyahara(Pratyahara::YaR))
                }))
            })
            .cur(ctx::tag(Tag::Dhatu).and(ctx::ends_with(SoundClass::of("iI"))))
            .right(ac()),
        )
        // 6.4.88 bhuvo vuk luṅliṭoḥ
        .rule(
            WindowRule::new("6.4.88", |w: &Window| {
                if w.cur.value() != "BU" || w.cur.has_augment("vu~k") {
                    return RuleResult::Unchanged;
                }
                RuleResult::Substitute(Substitution::agama("vu~k"))
            })
            .cur(ctx::tag(Tag::Dhatu).and(ctx::clean_in(&["BU"])))
            .right(ac().and(ctx::lakshana_any(&[Lakshana::LuN, Lakshana::LiW]))),
        )
        .build()
}

fn to_ku(targets: &'static str) -> Substitution {
    Substitution::operator(move |cur, _| {
        cur.al_tasya(&SoundClass::of(targets), &SoundClass::varga(Varga::Ku))
    })
}

/// Ku substitution after an abhyāsa (7.3.55 - 7.3.58). Identities continue
/// after `previous`.
pub fn ku_rules(previous: &RuleSet) -> Result<RuleSet, RuleSetError> {
    let after_abhyasa = || ctx::tag(Tag::Abhyasa);
    let san_or_lit = || ctx::lakshana_any(&[Lakshana::San, Lakshana::LiW]);

    previous
        .builder_after()
        // 7.3.55 abhyāsāc ca
        .rule(
            WindowRule::new("7.3.55", |_: &Window| RuleResult::Substitute(to_ku("h")))
                .left(after_abhyasa())
                .cur(ctx::clean_in(&["han"])),
        )
        // 7.3.56 her acaṅi
        .rule(
            WindowRule::new("7.3.56", |_: &Window| RuleResult::Substitute(to_ku("h")))
                .left(after_abhyasa())
                .cur(ctx::clean_in(&["hi"]))
                .right(ctx::not(ctx::lakshana_any(&[Lakshana::CaN]))),
        )
        // 7.3.57 sanliṭor jeḥ
        .rule(
            WindowRule::new("7.3.57", |_: &Window| RuleResult::Substitute(to_ku("cj")))
                .left(after_abhyasa())
                .cur(ctx::clean_in(&["ji"]))
                .right(san_or_lit()),
        )
        // 7.3.58 vibhāṣā ceḥ
        .rule(
            WindowRule::new("7.3.58", |_: &Window| RuleResult::Optional(to_ku("cj")))
                .left(after_abhyasa())
                .cur(ctx::clean_in(&["ci"]))
                .right(san_or_lit()),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_rule_order_is_registration_order() {
        let aci = aci_rules().unwrap();
        let names: Vec<_> = aci.rules().iter().map(|r| r.name()).collect();
        assert_eq!(names, ["6.4.77", "6.4.78", "6.4.81", "6.4.82", "6.4.88"]);
        let ku = ku_rules(&aci).unwrap();
        assert_eq!(ku.rules()[0].id().0, aci.len());
    }

    #[test]
    fn test_iyan_before_vowel() {
        let aci = aci_rules().unwrap();
        let window = Window::new(
            None,
            Arc::new(Term::dhatu("SrI")),
            Some(Arc::new(Term::vibhakti("atus"))),
        );
        let out = aci.apply(&window);
        assert_eq!(out[0].cur.value(), "Sriy");
    }

    #[test]
    fn test_abhyasa_before_savarna_unchanged() {
        let aci = aci_rules().unwrap();
        let window = Window::new(
            None,
            Arc::new(Term::abhyasa("i")),
            Some(Arc::new(Term::dhatu("I"))),
        );
        assert_eq!(aci.apply(&window), vec![window.clone()]);
    }

    #[test]
    fn test_abhyasa_before_asavarna() {
        let aci = aci_rules().unwrap();
        let window = Window::new(
            None,
            Arc::new(Term::abhyasa("i")),
            Some(Arc::new(Term::dhatu("E"))),
        );
        assert_eq!(aci.apply(&window)[0].cur.value(), "iy");
    }
}
