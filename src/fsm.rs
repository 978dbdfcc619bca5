//!
//! Finite-state model
//!
//! Explicit states, transitions and emissions expanded from a Plan-7 model.
//! HMMER uses both Mealy and Moore states, so transitions can emit too
//! (only n->n, c->c and j->j do).
//!
pub mod builder;
pub mod states;

use crate::plan7::Alphabet;
use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use serde_with::SerializeDisplay;

pub use states::State;

///
/// Identity of a state.
///
/// Column-specific states carry the alignment column number.
/// Rendered into a name only by `Display`.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, SerializeDisplay)]
pub enum StateId {
    Start,
    End,
    Match(usize),
    Insert(usize),
    Delete(usize),
    BeginProfile,
    EndProfile,
    NTerminal,
    CTerminal,
    Join,
}

impl StateId {
    ///
    /// start and end are silent sentinels placed at both ends of the state list
    ///
    pub fn is_sentinel(&self) -> bool {
        matches!(self, StateId::Start | StateId::End)
    }
}

impl std::fmt::Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            StateId::Start => write!(f, "start"),
            StateId::End => write!(f, "end"),
            StateId::Match(c) => write!(f, "M{:03}", c),
            StateId::Insert(c) => write!(f, "I{:03}", c),
            StateId::Delete(c) => write!(f, "D{:03}", c),
            StateId::BeginProfile => write!(f, "beginprofile"),
            StateId::EndProfile => write!(f, "endprofile"),
            StateId::NTerminal => write!(f, "nterminal"),
            StateId::CTerminal => write!(f, "cterminal"),
            StateId::Join => write!(f, "join"),
        }
    }
}

///
/// Transition `from -> to` with probability `prob`.
///
/// `emission` is set for an emitting (Mealy) transition.
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Transition {
    pub from: StateId,
    pub to: StateId,
    pub prob: f64,
    pub emission: Option<Vec<f64>>,
}

impl Transition {
    pub fn new(from: StateId, to: StateId, prob: f64) -> Self {
        Transition {
            from,
            to,
            prob,
            emission: None,
        }
    }
    pub fn emitting(from: StateId, to: StateId, prob: f64, emission: Vec<f64>) -> Self {
        Transition {
            from,
            to,
            prob,
            emission: Some(emission),
        }
    }
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}->{} p={}", self.from, self.to, self.prob)?;
        if self.emission.is_some() {
            write!(f, " (emitting)")?;
        }
        Ok(())
    }
}

///
/// Remove transitions whose probability is at most `epsilon` in magnitude.
///
pub fn purge_transitions(transitions: Vec<Transition>, epsilon: f64) -> Vec<Transition> {
    transitions
        .into_iter()
        .filter(|t| t.prob.abs() > epsilon)
        .collect()
}

///
/// Finite-state model: alphabet, transitions and state emission records
///
#[derive(Clone, Debug, PartialEq)]
pub struct FiniteStateModel {
    alphabet: Alphabet,
    transitions: Vec<Transition>,
    emissions: Vec<(StateId, Vec<f64>)>,
}

impl FiniteStateModel {
    pub fn new(
        alphabet: Alphabet,
        transitions: Vec<Transition>,
        emissions: Vec<(StateId, Vec<f64>)>,
    ) -> Self {
        FiniteStateModel {
            alphabet,
            transitions,
            emissions,
        }
    }
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }
    ///
    /// emission records `(state, emission probs)` in construction order
    ///
    pub fn emissions(&self) -> &[(StateId, Vec<f64>)] {
        &self.emissions
    }
    pub fn n_transitions(&self) -> usize {
        self.transitions.len()
    }
    ///
    /// Find the transition `from -> to`
    ///
    pub fn transition(&self, from: StateId, to: StateId) -> Option<&Transition> {
        self.transitions
            .iter()
            .find(|t| t.from == from && t.to == to)
    }
    ///
    /// Total probability of the transitions leaving `state`
    ///
    pub fn outgoing_sum(&self, state: StateId) -> f64 {
        self.transitions
            .iter()
            .filter(|t| t.from == state)
            .map(|t| t.prob)
            .sum()
    }
    ///
    /// petgraph view of the model.
    /// Nodes are in the order of `states()`.
    ///
    pub fn to_graph(&self) -> DiGraph<StateId, f64> {
        let mut graph = DiGraph::new();
        let mut index = fnv::FnvHashMap::<StateId, NodeIndex>::default();
        for state in self.states() {
            index.insert(state.id, graph.add_node(state.id));
        }
        for t in self.transitions.iter() {
            graph.add_edge(index[&t.from], index[&t.to], t.prob);
        }
        graph
    }
    ///
    /// Dot file of the model
    ///
    pub fn to_dot(&self) -> String {
        format!("{}", Dot::with_config(&self.to_graph(), &[]))
    }
}

impl std::fmt::Display for FiniteStateModel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "FiniteStateModel(n_states={}, n_transitions={}, n_emissions={})",
            self.states().len(),
            self.transitions.len(),
            self.emissions.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_names() {
        assert_eq!(StateId::Start.to_string(), "start");
        assert_eq!(StateId::End.to_string(), "end");
        assert_eq!(StateId::Match(1).to_string(), "M001");
        assert_eq!(StateId::Insert(42).to_string(), "I042");
        assert_eq!(StateId::Delete(1234).to_string(), "D1234");
        assert_eq!(StateId::BeginProfile.to_string(), "beginprofile");
        assert_eq!(StateId::EndProfile.to_string(), "endprofile");
        assert_eq!(StateId::NTerminal.to_string(), "nterminal");
        assert_eq!(StateId::CTerminal.to_string(), "cterminal");
        assert_eq!(StateId::Join.to_string(), "join");
        assert!(StateId::Start.is_sentinel());
        assert!(!StateId::Join.is_sentinel());
        // serialized by name
        assert_eq!(
            serde_json::to_string(&StateId::Match(7)).unwrap(),
            "\"M007\""
        );
    }

    #[test]
    fn purge() {
        let ts = vec![
            Transition::new(StateId::Start, StateId::NTerminal, 1.0),
            Transition::new(StateId::NTerminal, StateId::BeginProfile, 1e-6),
            Transition::new(StateId::NTerminal, StateId::NTerminal, 0.0),
            Transition::new(StateId::Join, StateId::Join, 2e-6),
        ];
        let ts = purge_transitions(ts, 1e-6);
        assert_eq!(ts.len(), 2);
        assert!(ts.iter().all(|t| t.prob.abs() > 1e-6));
    }
}
