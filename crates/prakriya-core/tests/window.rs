//! Tests for window matching and optional forks.

use std::sync::Arc;

use prakriya_core::{RuleResult, RuleSet, Substitution, Window, WindowRule, ctx};
use prakriya_model::{Lakshana, Tag, Term};

fn optional_e() -> WindowRule {
    WindowRule::new("optional-e", |_: &Window| {
        RuleResult::Optional(Substitution::operator(|cur, _| cur.set_antya("e")))
    })
}

fn window(cur: Term) -> Window {
    Window::new(None, Arc::new(cur), None)
}

#[test]
fn optional_forks_once() {
    let rules = RuleSet::builder().rule(optional_e()).build().unwrap();
    let rule = &rules.rules()[0];
    let input = window(Term::dhatu("ci"));

    let out = rule.apply(&input);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].cur.value(), "ci");
    assert!(out[0].cur.is_declined(rule.id()));
    assert_eq!(out[1].cur.value(), "ce");
    assert!(!out[1].cur.is_declined(rule.id()));

    let again = rule.apply(&out[0]);
    assert_eq!(again, vec![out[0].clone()]);
}

#[test]
fn rule_set_skips_declined_optional() {
    let rules = RuleSet::builder().rule(optional_e()).build().unwrap();
    let declined = rules.apply(&window(Term::dhatu("ci")))[0].clone();
    assert_eq!(rules.apply(&declined), vec![declined]);
}

#[test]
fn failing_neighbour_blocks_rule() {
    let rule = WindowRule::new("needs-abhyasa", |_: &Window| {
        RuleResult::Substitute(Substitution::adesha("e"))
    })
    .left(ctx::tag(Tag::Abhyasa))
    .cur(ctx::clean_in(&["ci"]))
    .right(ctx::lakshana_any(&[Lakshana::LiW]));

    let lit = Arc::new(Term::vibhakti("Ral").with_lakshana([Lakshana::LiW]));
    let lat = Arc::new(Term::vibhakti("tip").with_lakshana([Lakshana::LaW]));
    let ci = Arc::new(Term::dhatu("ci"));
    let abhyasa = Arc::new(Term::abhyasa("ci"));

    let no_left = Window::new(None, Arc::clone(&ci), Some(Arc::clone(&lit)));
    assert!(!rule.matches(&no_left));
    assert_eq!(rule.apply(&no_left), vec![no_left.clone()]);

    let wrong_right = Window::new(Some(Arc::clone(&abhyasa)), Arc::clone(&ci), Some(lat));
    assert_eq!(rule.apply(&wrong_right), vec![wrong_right.clone()]);

    let full = Window::new(Some(abhyasa), ci, Some(lit));
    assert_eq!(rule.apply(&full)[0].cur.value(), "ce");
}

#[test]
fn absent_predicates_always_hold() {
    let rule = WindowRule::new("anything", |_: &Window| RuleResult::Unchanged);
    assert!(rule.matches(&window(Term::new(""))));
}

fn optional_o() -> WindowRule {
    WindowRule::new("optional-o", |_: &Window| {
        RuleResult::Optional(Substitution::operator(|cur, _| cur.set_antya("o")))
    })
}

#[test]
fn independent_sets_are_rejected_together() {
    let first = RuleSet::builder().rule(optional_e()).build().unwrap();
    let second = RuleSet::builder().rule(optional_o()).build().unwrap();
    assert!(prakriya_core::ensure_disjoint(&[("first", &first), ("second", &second)]).is_err());
}

#[test]
fn chained_sets_keep_their_own_declines() {
    let first = RuleSet::builder().rule(optional_e()).build().unwrap();
    let second = first.builder_after().rule(optional_o()).build().unwrap();
    prakriya_core::ensure_disjoint(&[("first", &first), ("second", &second)]).unwrap();

    let declined = first.apply(&window(Term::dhatu("ci")))[0].clone();
    let out = second.apply(&declined);
    let values: Vec<_> = out.iter().map(|w| w.cur.value().to_string()).collect();
    assert_eq!(values, ["ci", "co"]);
}
