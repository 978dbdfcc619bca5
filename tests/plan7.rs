//!
//! end-to-end tests of hmm file -> finite-state model
//!
#[macro_use]
extern crate approx;

use hmmer2fsm::io::hmmoc::to_hmmoc_string;
use hmmer2fsm::plan7::mocks::{MOCK_THREE_NODES, MOCK_TWO_NODES};
use hmmer2fsm::prelude::*;
use std::fmt::Write as _;
use test_case::test_case;

///
/// Plan-7 text of `l` nodes over ACGT where every transition is possible
///
fn synthetic_hmm(l: usize) -> String {
    let mut s = String::new();
    writeln!(s, "HMMER2.0  [synthetic]").unwrap();
    writeln!(s, "NAME  synthetic {}", l).unwrap();
    writeln!(s, "LENG  {}", l).unwrap();
    writeln!(s, "ALPH  Nucleic").unwrap();
    writeln!(s, "XT      -8455     -4  -1000  -1000  -8455     -4  -8455     -4").unwrap();
    writeln!(s, "NULT      -4  -8455").unwrap();
    writeln!(s, "NULE       0      0      0      0").unwrap();
    writeln!(s, "HMM        A      C      G      T").unwrap();
    writeln!(s, "         m->m   m->i   m->d   i->m   i->i   d->m   d->d   b->m   m->e").unwrap();
    writeln!(s, "          -21  -7000  -6129").unwrap();
    for m in 1..=l {
        let x = (m * 377 % 2000) as i64 - 1000;
        writeln!(s, "{:>6} {:>6} {:>6} {:>6} {:>6}", m, x, -x, x / 2, 0).unwrap();
        if m < l {
            writeln!(s, "     -   -100    100      0      0").unwrap();
            writeln!(
                s,
                "     -    -22  -6718  -7760   -894  -1115   -701  -1378  -3000  -5000"
            )
            .unwrap();
        } else {
            writeln!(s, "     -      *      *      *      *").unwrap();
            writeln!(s, "     -      *      *      *      *      *      *      *  -3000      0").unwrap();
        }
    }
    writeln!(s, "//").unwrap();
    s
}

fn build(text: &str) -> Result<FiniteStateModel> {
    let params = ConvertParams::default();
    let plan7 = Plan7Model::from_hmm_str(text, &params)?;
    Ok(FiniteStateModel::from_plan7(&plan7, &params))
}

#[test]
fn minimal_two_node_model() {
    let fsm = build(MOCK_TWO_NODES).unwrap();
    let names: Vec<String> = fsm.states().iter().map(|s| s.id.to_string()).collect();
    assert_eq!(
        names,
        vec![
            "start",
            "M001",
            "M002",
            "beginprofile",
            "cterminal",
            "endprofile",
            "join",
            "nterminal",
            "end",
        ]
    );
    // every state but end has outgoing probability 1
    for state in fsm.states().iter().filter(|s| s.id != StateId::End) {
        assert_abs_diff_eq!(fsm.outgoing_sum(state.id), 1.0, epsilon = 1e-3);
    }
}

#[test_case(2 ; "two nodes")]
#[test_case(3 ; "three nodes")]
#[test_case(17 ; "seventeen nodes")]
#[test_case(150 ; "three digit columns")]
fn state_counts(l: usize) {
    let fsm = build(&synthetic_hmm(l)).unwrap();
    let states = fsm.states();
    let n_match = states
        .iter()
        .filter(|s| matches!(s.id, StateId::Match(_)))
        .count();
    let n_insert = states
        .iter()
        .filter(|s| matches!(s.id, StateId::Insert(_)))
        .count();
    let n_delete = states
        .iter()
        .filter(|s| matches!(s.id, StateId::Delete(_)))
        .count();
    assert_eq!(n_match, l);
    assert_eq!(n_insert, l - 1);
    assert_eq!(n_delete, l - 1);

    // canonical order
    assert_eq!(states[0].id, StateId::Start);
    assert_eq!(states[states.len() - 1].id, StateId::End);
    let names: Vec<String> = states[1..states.len() - 1]
        .iter()
        .map(|s| s.id.to_string())
        .collect();
    assert!(names.windows(2).all(|w| w[0] < w[1]));

    // purged
    assert!(fsm.transitions().iter().all(|t| t.prob.abs() > 1e-6));

    // flanking states are normalized
    for state in [
        StateId::NTerminal,
        StateId::EndProfile,
        StateId::CTerminal,
        StateId::Join,
    ]
    .iter()
    {
        assert_abs_diff_eq!(fsm.outgoing_sum(*state), 1.0, epsilon = 1e-9);
    }
}

#[test]
fn deterministic_output() {
    let a = build(MOCK_THREE_NODES).unwrap();
    let b = build(MOCK_THREE_NODES).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.states(), b.states());
    assert_eq!(
        to_hmmoc_string(&a, "three", RealType::BFloat),
        to_hmmoc_string(&b, "three", RealType::BFloat)
    );
}

#[test]
fn malformed_header_aborts() {
    let text = MOCK_THREE_NODES.replacen("HMMER2.0  [2.3.2]", "FOO  [2.3.2]", 1);
    match build(&text) {
        Err(Plan7Error::BadIdentifier(id)) => assert_eq!(id, "FOO"),
        r => panic!("unexpected {:?}", r),
    }
    // HMMER3 files are rejected too
    let text = MOCK_THREE_NODES.replacen("HMMER2.0", "HMMER3/f", 1);
    assert!(matches!(build(&text), Err(Plan7Error::BadIdentifier(_))));
}

#[test]
fn duplicate_name_aborts() {
    let text = MOCK_THREE_NODES.replacen("LENG  3\n", "LENG  3\nNAME  other\n", 1);
    match build(&text) {
        Err(Plan7Error::DuplicateTag(tag)) => assert_eq!(tag, "NAME"),
        r => panic!("unexpected {:?}", r),
    }
}

#[test]
fn hmmoc_document_of_synthetic_model() {
    let fsm = build(&synthetic_hmm(5)).unwrap();
    let xml = to_hmmoc_string(&fsm, "synthetic", RealType::LogSpace);
    assert_eq!(
        xml.matches("<transition from=").count(),
        fsm.n_transitions()
    );
    for state in fsm.states().iter().filter(|s| !s.id.is_sentinel()) {
        assert!(xml.contains(&format!("<state id=\"{}\"", state.id)));
    }
}
