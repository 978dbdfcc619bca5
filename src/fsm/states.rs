//!
//! State enumeration
//!
//! Canonical order of states used by serializers:
//! `[start] + (other states sorted by name) + [end]`
//!
use super::{FiniteStateModel, StateId};
use fnv::FnvHashMap;
use serde::Serialize;

///
/// A state and its emission, if it emits
///
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct State<'a> {
    pub id: StateId,
    pub emission: Option<&'a [f64]>,
}

impl<'a> State<'a> {
    pub fn is_emitting(&self) -> bool {
        self.emission.is_some()
    }
}

impl FiniteStateModel {
    ///
    /// List all states referenced by a transition, in canonical order.
    ///
    /// A state gets the emission of the emission record naming it.
    /// Emission records of states without any transition are ignored.
    ///
    pub fn states(&self) -> Vec<State> {
        let mut states: FnvHashMap<StateId, Option<&[f64]>> = FnvHashMap::default();
        for t in self.transitions.iter() {
            states.insert(t.from, None);
            states.insert(t.to, None);
        }
        for (id, emission) in self.emissions.iter() {
            if let Some(slot) = states.get_mut(id) {
                *slot = Some(emission.as_slice());
            }
        }

        let mut middle: Vec<State> = states
            .into_iter()
            .filter(|(id, _)| !id.is_sentinel())
            .map(|(id, emission)| State { id, emission })
            .collect();
        middle.sort_by_cached_key(|s| s.id.to_string());

        let mut ret = Vec::with_capacity(middle.len() + 2);
        ret.push(State {
            id: StateId::Start,
            emission: None,
        });
        ret.extend(middle);
        ret.push(State {
            id: StateId::End,
            emission: None,
        });
        ret
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fsm::Transition;
    use crate::params::ConvertParams;
    use crate::plan7::mocks::*;
    use crate::plan7::{Alphabet, Plan7Model};

    #[test]
    fn start_sorted_end() {
        let params = ConvertParams::default();
        let plan7 = Plan7Model::from_hmm_str(MOCK_THREE_NODES, &params).unwrap();
        let fsm = FiniteStateModel::from_plan7(&plan7, &params);
        let states = fsm.states();
        assert_eq!(states.first().unwrap().id, StateId::Start);
        assert_eq!(states.last().unwrap().id, StateId::End);
        let names: Vec<String> = states[1..states.len() - 1]
            .iter()
            .map(|s| s.id.to_string())
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(
            names,
            vec![
                "D001",
                "D002",
                "I001",
                "I002",
                "M001",
                "M002",
                "M003",
                "beginprofile",
                "cterminal",
                "endprofile",
                "join",
                "nterminal",
            ]
        );

        // deterministic
        assert_eq!(fsm.states(), states);
    }

    #[test]
    fn emissions_are_attached() {
        let params = ConvertParams::default();
        let plan7 = Plan7Model::from_hmm_str(MOCK_THREE_NODES, &params).unwrap();
        let fsm = FiniteStateModel::from_plan7(&plan7, &params);
        for s in fsm.states() {
            match s.id {
                StateId::Match(c) => {
                    let node = plan7.nodes.iter().find(|n| n.column == c).unwrap();
                    assert_eq!(s.emission, Some(node.match_emission.as_slice()));
                }
                StateId::Insert(_) => assert!(s.is_emitting()),
                _ => assert!(!s.is_emitting()),
            }
        }
    }

    #[test]
    fn unreferenced_emission_is_ignored() {
        let fsm = FiniteStateModel::new(
            Alphabet::new(vec!['A', 'B']),
            vec![
                Transition::new(StateId::Start, StateId::Match(1), 1.0),
                Transition::new(StateId::Match(1), StateId::End, 1.0),
            ],
            vec![
                (StateId::Match(1), vec![0.5, 0.5]),
                (StateId::Insert(1), vec![0.5, 0.5]),
            ],
        );
        let states = fsm.states();
        assert_eq!(states.len(), 3);
        assert_eq!(states[1].id, StateId::Match(1));
        assert!(states[1].is_emitting());
    }
}
