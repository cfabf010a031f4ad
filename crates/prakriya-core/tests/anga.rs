//! Scenario tests for the stem stages.

use std::sync::Arc;

use prakriya_core::anga::{self, windows};
use prakriya_core::{Gana, Rule, State};
use prakriya_model::{Lakshana, Marker, Op, Tag, Term};

fn gana() -> Arc<Gana> {
    Arc::new(Gana::default())
}

fn aci_stage() -> impl Rule {
    anga::aci(Arc::new(windows::aci_rules().unwrap()))
}

#[test]
fn bhu_gains_vuk_before_lun() {
    let state = State::new([
        Term::dhatu("BU"),
        Term::vibhakti("an").with_lakshana([Lakshana::LuN]),
    ])
    .add_op(Op::AngaAdesha);

    let stage = aci_stage();
    let out = stage.apply(&state);
    assert_eq!(out.len(), 1);
    let (_, bhu) = out[0].find(Tag::Anga).unwrap();
    assert_eq!(bhu.value(), "BUv");
    assert!(bhu.has_augment("vu~k"));

    assert!(stage.apply(&out[0]).is_empty());
}

#[test]
fn vuk_window_rule_does_not_repeat() {
    let aci = windows::aci_rules().unwrap();
    let state = State::new([
        Term::dhatu("BU"),
        Term::vibhakti("an").with_lakshana([Lakshana::LuN]),
    ]);
    let window = anga::window_at(&state, 0).unwrap();
    let once = aci.apply(&window);
    assert_eq!(once.len(), 1);
    assert_eq!(aci.apply(&once[0]), once);
}

#[test]
fn gam_loses_penultimate_before_kit() {
    let state = State::new([
        Term::dhatu("gam"),
        Term::vibhakti("atus").with_markers([Marker::Kit]),
    ])
    .add_op(Op::Dvirvacana);

    let out = anga::ac_adesha(gana()).apply(&state);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].get(0).unwrap().value(), "gm");
}

#[test]
fn radh_forks_into_substituted_and_unchanged() {
    let state = State::new([
        Term::abhyasa("ra"),
        Term::dhatu("rAD"),
        Term::vibhakti("atus")
            .with_markers([Marker::Kit])
            .with_lakshana([Lakshana::LiW]),
    ])
    .add_op(Op::Dvirvacana);

    let out = anga::ac_adesha(gana()).apply(&state);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].to_string(), "reD + atus");
    assert_eq!(out[0].get(0).unwrap().value(), "");
    assert!(out[1].iter().eq(state.iter()));
}

#[test]
fn adesha_waits_for_dvirvacana() {
    let state = State::new([
        Term::dhatu("BU"),
        Term::vibhakti("tip").with_tags([Tag::Sarvadhatuka]),
    ]);
    let stage = anga::adesha(gana());
    assert!(stage.apply(&state).is_empty());

    let out = stage.apply(&state.add_op(Op::Dvirvacana));
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].get(0).unwrap().value(), "Bo");
}

#[test]
fn samprasarana_before_kit() {
    let state = State::new([
        Term::dhatu("vac"),
        Term::pratyaya("kta").with_tags([Tag::Ardhadhatuka]),
    ])
    .add_op(Op::Dvirvacana);
    let out = anga::adesha(gana()).apply(&state);
    assert_eq!(out[0].get(0).unwrap().value(), "uc");
}

#[test]
fn kniti_blocks_guna() {
    let state = State::new([
        Term::dhatu("ci"),
        Term::pratyaya("kta").with_tags([Tag::Ardhadhatuka]),
    ])
    .add_op(Op::Dvirvacana);
    let out = anga::adesha(gana()).apply(&state);
    assert_eq!(out[0].get(0).unwrap().value(), "ci");
}

#[test]
fn rt_applies_guna_in_lit() {
    let state = State::new([
        Term::dhatu("smf"),
        Term::vibhakti("atus")
            .with_markers([Marker::Kit])
            .with_lakshana([Lakshana::LiW]),
    ]);
    let out = anga::rt().apply(&state);
    assert_eq!(out[0].get(0).unwrap().value(), "smar");
    assert!(out[0].has_op(Op::Rt));
}

#[test]
fn stages_without_a_stem_yield_nothing() {
    let state = State::new([Term::vibhakti("tip")])
        .add_op(Op::Dvirvacana)
        .add_op(Op::AngaAdesha);
    assert!(anga::adesha(gana()).apply(&state).is_empty());
    assert!(anga::rt().apply(&state).is_empty());
    assert!(aci_stage().apply(&state).is_empty());
    assert!(anga::ac_adesha(gana()).apply(&state).is_empty());
}

#[test]
fn ci_in_lit_offers_ku_optionally() {
    let ku = windows::ku_rules(&windows::aci_rules().unwrap()).unwrap();
    let state = State::new([
        Term::abhyasa("ci"),
        Term::dhatu("ci"),
        Term::vibhakti("atus")
            .with_markers([Marker::Kit])
            .with_lakshana([Lakshana::LiW]),
    ]);
    let out = anga::ku(Arc::new(ku)).apply(&state);
    let values: Vec<_> = out.iter().map(|s| s.get(1).unwrap().value().to_string()).collect();
    assert_eq!(values, ["ci", "ki"]);
    assert_ne!(out[0], out[1]);
}

#[test]
fn ku_needs_an_abhyasa() {
    let ku = windows::ku_rules(&windows::aci_rules().unwrap()).unwrap();
    let state = State::new([
        Term::dhatu("han"),
        Term::vibhakti("atus").with_markers([Marker::Kit]),
    ]);
    let out = anga::ku(Arc::new(ku)).apply(&state);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].get(0).unwrap().value(), "han");
}

fn lit_kit(raw: &str) -> Term {
    Term::vibhakti(raw)
        .with_markers([Marker::Kit])
        .with_lakshana([Lakshana::LiW])
}

#[test]
fn ji_takes_ku_after_abhyasa() {
    let ku = windows::ku_rules(&windows::aci_rules().unwrap()).unwrap();
    let state = State::new([Term::abhyasa("ji"), Term::dhatu("ji"), lit_kit("atus")]);
    let out = anga::ku(Arc::new(ku)).apply(&state);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].get(1).unwrap().value(), "gi");
}

#[test]
fn han_takes_ku_after_abhyasa() {
    let ku = windows::ku_rules(&windows::aci_rules().unwrap()).unwrap();
    let state = State::new([Term::abhyasa("ja"), Term::dhatu("han"), lit_kit("atus")]);
    let out = anga::ku(Arc::new(ku)).apply(&state);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].get(1).unwrap().value(), "Gan");
}

#[test]
fn final_a_dropped_before_kit() {
    let state = State::new([Term::abhyasa("ta"), Term::dhatu("sTA"), lit_kit("atus")])
        .add_op(Op::Dvirvacana);
    let out = anga::ac_adesha(gana()).apply(&state);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].to_string(), "ta + sT + atus");
}

#[test]
fn in_takes_yan_before_vowel() {
    let aci = windows::aci_rules().unwrap();
    let window = |dhatu: Term| {
        let state = State::new([dhatu, lit_kit("atus")]);
        let window = anga::window_at(&state, 0).unwrap();
        aci.apply(&window)[0].cur.value().to_string()
    };
    assert_eq!(window(Term::dhatu("i\\R")), "y");
    assert_eq!(window(Term::dhatu("i")), "iy");
}

#[test]
fn anekac_i_takes_yan() {
    let aci = windows::aci_rules().unwrap();
    let apply = |state: State| {
        let (j, _) = state.find(Tag::Anga).unwrap();
        let window = anga::window_at(&state, j).unwrap();
        aci.apply(&window)[0].cur.value().to_string()
    };
    let after_abhyasa = State::new([Term::abhyasa("ni"), Term::dhatu("nI"), lit_kit("atus")]);
    assert_eq!(apply(after_abhyasa), "ny");
    let alone = State::new([Term::dhatu("nI"), lit_kit("atus")]);
    assert_eq!(apply(alone), "niy");
    let conjunct = State::new([Term::abhyasa("ci"), Term::dhatu("krI"), lit_kit("atus")]);
    assert_eq!(apply(conjunct), "kriy");
}

#[test]
fn gana_lookup_uses_clean_form() {
    let changed = Term::dhatu("vac").set_antya("k");
    assert_eq!(changed.clean(), "vac");
    let state = State::new([
        changed,
        Term::pratyaya("kta").with_tags([Tag::Ardhadhatuka]),
    ])
    .add_op(Op::Dvirvacana);
    let out = anga::adesha(gana()).apply(&state);
    assert_eq!(out[0].get(0).unwrap().value(), "uk");
}
