//! Property tests for the combinators and state immutability.

use prakriya_core::{Grammar, PrakriyaConfig, State};
use prakriya_model::{Lakshana, Marker, Op, Tag, Term};
use proptest::prelude::*;

fn dhatu() -> impl Strategy<Value = Term> {
    prop::sample::select(vec![
        "BU", "gam", "ci", "ji", "rAD", "pac", "kf", "smf", "SrI", "han", "vac", "grah", "sTA",
    ])
    .prop_map(Term::dhatu)
}

fn suffix() -> impl Strategy<Value = Term> {
    (
        prop::sample::select(vec!["Ral", "atus", "us", "iTa", "an", "tip", "kta"]),
        prop::sample::select(vec![Lakshana::LiW, Lakshana::LuN, Lakshana::LaW, Lakshana::San]),
        prop::option::of(prop::sample::select(vec![Marker::Kit, Marker::Ngit])),
        any::<bool>(),
    )
        .prop_map(|(raw, lakshana, marker, ardhadhatuka)| {
            let term = Term::vibhakti(raw)
                .with_lakshana([lakshana])
                .with_markers(marker);
            if ardhadhatuka {
                term.with_tags([Tag::Ardhadhatuka])
            } else {
                term
            }
        })
}

fn state() -> impl Strategy<Value = State> {
    (
        dhatu(),
        suffix(),
        prop::collection::btree_set(prop::sample::select(Op::ALL.to_vec()), 0..4),
    )
        .prop_map(|(dhatu, suffix, ops)| {
            ops.into_iter()
                .fold(State::new([dhatu, suffix]), |state, op| state.add_op(op))
        })
}

fn grammar() -> Grammar {
    Grammar::new(PrakriyaConfig::default()).unwrap()
}

proptest! {
    #[test]
    fn stamped_stage_yields_nothing(state in state()) {
        let grammar = grammar();
        for stage in grammar.pipeline().stages() {
            let stamped = stage
                .produces()
                .into_iter()
                .fold(state.clone(), |state, op| state.add_op(op));
            prop_assert!(stage.apply(&stamped).is_empty(), "{} fired twice", stage.name());
        }
    }

    #[test]
    fn missing_requirement_yields_nothing(state in state()) {
        let grammar = grammar();
        for stage in grammar.pipeline().stages() {
            for op in stage.requires() {
                let mut without = State::new(state.iter().map(|t| t.as_ref().clone()));
                for kept in state.ops().iter().filter(|o| **o != op) {
                    without = without.add_op(*kept);
                }
                prop_assert!(stage.apply(&without).is_empty(), "{} ran without {}", stage.name(), op);
            }
        }
    }

    #[test]
    fn stages_leave_their_input_alone(state in state()) {
        let grammar = grammar();
        let snapshot = state.clone();
        for stage in grammar.pipeline().stages() {
            let _ = stage.apply(&state);
            prop_assert_eq!(&state, &snapshot);
        }
    }

    #[test]
    fn replace_and_add_op_leave_receiver_alone(state in state(), value in "[a-zA-Z]{1,4}") {
        let snapshot = state.clone();
        let _ = state.replace(0, Term::new(&value));
        let _ = state.add_op(Op::AngaKu);
        prop_assert_eq!(state, snapshot);
    }

    #[test]
    fn every_derivation_terminates(state in state()) {
        let grammar = grammar();
        let outcome = grammar.deriver().derive(state);
        prop_assert!(!outcome.truncated);
        prop_assert!(!outcome.derivations.is_empty());
    }
}
