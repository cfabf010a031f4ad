//! e-substitution and abhyāsa deletion in liṭ (6.4.120 - 6.4.126).

use prakriya_model::{Lakshana, Marker, SoundClass, Tag};

use crate::config::Gana;
use crate::state::State;

/// Whether the e-substitution applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Mandatory,
    Optional,
    Inapplicable,
}

/// Decide the status for the first aṅga, or `None` when the rule group
/// does not get a say.
pub fn status(state: &State, gana: &Gana) -> Option<Status> {
    let (_, abhyasa) = state.find(Tag::Abhyasa)?;
    let (j, anga) = state.find(Tag::Anga)?;
    let (_, p) = state.next(j)?;

    if !p.has_lakshana(Lakshana::LiW) {
        return Some(Status::Inapplicable);
    }

    // kṅiti carries over from 6.4.98.
    let kniti = p.any_marker(&[Marker::Kit, Marker::Ngit]);
    // 6.4.121 thali ca seṭi
    let thali_seti = p.value() == "iTa";
    if !(kniti || thali_seti) {
        return None;
    }

    // e.g. pac and ram, but not syand or grah
    let at_ekahal_madhya = anga.upadha() == Some('a') && anga.value().chars().count() == 3;
    // e.g. pa-pac, but not ja-gam
    let anadesha_adi = abhyasa.adi().is_some() && abhyasa.adi() == anga.adi();
    let clean = anga.clean();

    // Each condition below overwrites the previous one. The last one that
    // holds decides, so 6.4.126 beats everything before it.
    let mut status = Status::Inapplicable;

    // 6.4.120 ata ekahalmadhye 'nādeśāder liṭi
    if at_ekahal_madhya && anadesha_adi {
        status = Status::Mandatory;
    }

    if ["tF", "Pal", "Baj", "trap"].contains(&clean) {
        // 6.4.122 tṝphalabhajatrapaś ca
        status = Status::Mandatory;
    } else if clean == "rAD" {
        // 6.4.123 rādho hiṃsāyām
        status = Status::Optional;
    } else if ["jF", "Bram", "tras"].contains(&clean) {
        // 6.4.124 vā jṝbhramutrasām
        status = Status::Optional;
    } else if gana.in_phan(clean) {
        // 6.4.125 phaṇāṃ ca saptānām
        status = Status::Optional;
    }

    // 6.4.126 na śasadadavādiguṇānām
    if ["Sas", "dad"].contains(&clean) || anga.adi() == Some('v') {
        status = Status::Inapplicable;
    }

    Some(status)
}

/// Successor states for the liṭ e-substitution. Empty when the group does
/// not apply at all.
pub fn lit_a_to_e(state: &State, gana: &Gana) -> Vec<State> {
    let Some(status) = status(state, gana) else {
        return Vec::new();
    };
    let (Some((i, abhyasa)), Some((j, anga))) = (state.find(Tag::Abhyasa), state.find(Tag::Anga))
    else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(2);
    if matches!(status, Status::Mandatory | Status::Optional) {
        let a = SoundClass::of("aA");
        let e = SoundClass::of("e");
        out.push(
            state
                .replace(i, abhyasa.lopa())
                .replace(j, anga.al_tasya(&a, &e)),
        );
    }
    if matches!(status, Status::Inapplicable | Status::Optional) {
        out.push(state.clone());
    }
    out
}
