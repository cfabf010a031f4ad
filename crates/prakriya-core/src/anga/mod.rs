//! Stem (aṅga) rules, grouped into pipeline stages.
//!
//! Almost everything here falls under 6.4.1 aṅgasya. The stages gate on
//! each other through the ops recorded in the state:
//!
//! - `anga_adesha` and `ac_adesha` wait for `dvirvacana` (1.1.59 dvirvacane
//!   'ci), so that `gam + atus` gives `ja + gm + atus` and not `j + gm + atus`;
//! - `anga_aci` waits for `anga_adesha`, so that strengthening comes before
//!   the vowel rules.

pub mod lit;
pub mod windows;

use std::sync::Arc;

use prakriya_model::{Lakshana, Marker, Op, Tag};
use tracing::debug;

use crate::config::Gana;
use crate::registry::RuleSet;
use crate::rule::{Rule, RuleExt, rule};
use crate::state::State;
use crate::window::Window;

/// 6.4.98 gamahanajanakhanaghasāṃ lopaḥ kṅityanaṅi
const GAM_ADI: &[&str] = &["gam", "han", "jan", "Kan", "Gas"];

/// Samprasāraṇa, guṇa and vṛddhi of every aṅga before its suffix.
pub fn adesha(gana: Arc<Gana>) -> impl Rule {
    rule("anga_adesha", move |state: &State| {
        let angas: Vec<usize> = state.find_all(Tag::Anga).map(|(i, _)| i).collect();
        if angas.is_empty() {
            return Vec::new();
        }
        let mut state = state.clone();
        for i in angas {
            let Some(anga) = state.get(i).cloned() else {
                continue;
            };
            let Some(next) = state.next(i).map(|(_, t)| Arc::clone(t)) else {
                continue;
            };
            let kniti = next.any_marker(&[Marker::Kit, Marker::Ngit]);

            // 6.1.15 vacisvapiyajādīnāṃ kiti
            // 6.1.16 grahijyāvayivyadhivaṣṭivicativṛścatipṛcchatibhṛjjatīnāṃ ṅiti ca
            let vac = next.has_marker(Marker::Kit) && gana.in_vac(anga.clean());
            let grah = kniti && gana.in_grah(anga.clean());
            let new = if vac || grah {
                anga.samprasarana()
            } else if kniti {
                // 1.1.5 kṅiti ca
                continue;
            } else if next.any_marker(&[Marker::Nyit, Marker::Nnit]) {
                // 7.2.115 aco ñṇiti, 7.2.116 ata upadhāyāḥ
                if anga.is_ac() || anga.upadha() == Some('a') {
                    anga.vrddhi()
                } else {
                    anga.guna()
                }
            } else if next.any_tag(&[Tag::Sarvadhatuka, Tag::Ardhadhatuka]) {
                // 7.3.84 sārvadhātukārdhadhātukayoḥ
                anga.guna()
            } else {
                continue;
            };

            if new != *anga {
                debug!(from = %anga, to = %new, "anga substitution");
                state = state.replace(i, new);
            }
        }
        vec![state]
    })
    .once(Op::AngaAdesha)
    .require(Op::Dvirvacana)
}

/// Guṇa of ṛ-final stems before liṭ.
pub fn rt() -> impl Rule {
    rule("rt", |state: &State| {
        let Some((i, anga)) = state.find(Tag::Anga) else {
            return Vec::new();
        };
        let lit = state
            .next(i)
            .is_some_and(|(_, p)| p.has_lakshana(Lakshana::LiW));
        // 7.4.10 ṛtaś ca saṃyogāder guṇaḥ
        let samyogadi = anga.is_samyogadi() && anga.antya() == Some('f');
        // 7.4.11 ṛcchatyṝtām
        let rcchati = anga.clean() == "f" || anga.antya() == Some('F');
        if lit && (samyogadi || rcchati) {
            vec![state.replace(i, anga.guna())]
        } else {
            vec![state.clone()]
        }
    })
    .once(Op::Rt)
}

/// Rules conditioned by a following vowel, on the abhyāsa and then the aṅga.
pub fn aci(rules: Arc<RuleSet>) -> impl Rule {
    rule("anga_aci", move |state: &State| {
        let Some((j, anga)) = state.find(Tag::Anga) else {
            return Vec::new();
        };
        if anga.is_empty() {
            return vec![state.clone()];
        }
        let mut focus: Vec<usize> = state.find(Tag::Abhyasa).map(|(i, _)| i).into_iter().collect();
        focus.push(j);

        let mut states = vec![state.clone()];
        for i in focus {
            states = states.iter().flat_map(|s| apply_at(&rules, s, i)).collect();
        }
        states
    })
    .once(Op::AngaAci)
    .require(Op::AngaAdesha)
}

/// Vowel deletions, then the liṭ e-substitution.
pub fn ac_adesha(gana: Arc<Gana>) -> impl Rule {
    rule("ac_adesha", move |state: &State| {
        let Some((i, anga)) = state.find(Tag::Anga) else {
            return Vec::new();
        };
        let Some(tin) = state.iter().last().filter(|_| i + 1 < state.len()) else {
            return vec![state.clone()];
        };

        // 6.4.64 āto lopa iṭi ca
        let iti = tin.first_part().is_some_and(|p| p.raw() == "iw") || tin.has_lakshana(Lakshana::Iw);
        if anga.antya() == Some('A') && (iti || tin.has_marker(Marker::Kit)) {
            return vec![state.replace(i, anga.set_antya(""))];
        }

        // TODO: exclude aṅ once the aṅ vikaraṇa is modelled
        if GAM_ADI.contains(&anga.value()) && tin.any_marker(&[Marker::Kit, Marker::Ngit]) {
            return vec![state.replace(i, anga.set_upadha(""))];
        }

        let states = lit::lit_a_to_e(state, &gana);
        if states.is_empty() {
            vec![state.clone()]
        } else {
            states
        }
    })
    .once(Op::AcAdesha)
    .require(Op::Dvirvacana)
}

/// Ku substitution on the aṅga after an abhyāsa.
pub fn ku(rules: Arc<RuleSet>) -> impl Rule {
    rule("anga_ku", move |state: &State| match state.find(Tag::Anga) {
        Some((j, _)) => apply_at(&rules, state, j),
        None => Vec::new(),
    })
    .once(Op::AngaKu)
}

/// The window around position `i`, with empty neighbours skipped.
pub fn window_at(state: &State, i: usize) -> Option<Window> {
    let cur = Arc::clone(state.get(i)?);
    let left = state.prev(i).map(|(_, t)| Arc::clone(t));
    let right = state.next(i).map(|(_, t)| Arc::clone(t));
    Some(Window::new(left, cur, right))
}

fn apply_at(rules: &RuleSet, state: &State, i: usize) -> Vec<State> {
    let Some(window) = window_at(state, i) else {
        return vec![state.clone()];
    };
    rules
        .apply(&window)
        .into_iter()
        .map(|w| state.replace(i, w.cur))
        .collect()
}
