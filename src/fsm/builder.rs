//!
//! Topology builder
//!
//! Expands a `Plan7Model` into the full Plan-7 state graph:
//!
//! ```text
//!              +----------------- join <-+
//!              v                   |  |  |
//! start -> nterminal -> beginprofile -> M/I/D chain -> endprofile -> cterminal -> end
//!          ^      |                                                  ^     |
//!          +------+ (n->n emits NULE)                     (c->c) +---+-----+
//! ```
//!
use super::{purge_transitions, FiniteStateModel, StateId, Transition};
use crate::params::ConvertParams;
use crate::plan7::{
    Plan7Model, BM, DD, DM, II, IM, MD, ME, MI, MM, XT_CC, XT_CT, XT_EC, XT_EJ, XT_JB, XT_JJ,
    XT_NB, XT_NN,
};
use log::debug;

impl FiniteStateModel {
    ///
    /// Build the finite-state model of a Plan-7 model.
    ///
    /// Transitions with `|p| <= params.purge_epsilon` are removed afterwards.
    ///
    pub fn from_plan7(plan7: &Plan7Model, params: &ConvertParams) -> FiniteStateModel {
        let mut ts = Vec::new();
        let mut es = Vec::new();

        let n = plan7.nodes.len();
        let last = n - 1;

        // main profile, nodes 0..n-1 (all but the last)
        for m in 0..last {
            let node = &plan7.nodes[m];
            let next = &plan7.nodes[m + 1];
            let p = &node.transitions;

            let cur_m = StateId::Match(node.column);
            let cur_i = StateId::Insert(node.column);
            let cur_d = StateId::Delete(node.column);
            let next_m = StateId::Match(next.column);
            let next_d = StateId::Delete(next.column);

            ts.push(Transition::new(cur_m, next_m, p[MM]));
            ts.push(Transition::new(cur_m, cur_i, p[MI]));
            ts.push(Transition::new(cur_m, StateId::EndProfile, p[ME]));
            ts.push(Transition::new(cur_i, next_m, p[IM]));
            ts.push(Transition::new(cur_i, cur_i, p[II]));
            ts.push(Transition::new(cur_d, next_m, p[DM]));
            // the last delete state is dropped to avoid a silent loop;
            // HMMER's wing retraction is not done here.
            if m + 2 != n {
                ts.push(Transition::new(cur_m, next_d, p[MD]));
                ts.push(Transition::new(cur_d, next_d, p[DD]));
            }
            ts.push(Transition::new(StateId::BeginProfile, cur_m, p[BM]));
            if m == 0 {
                ts.push(Transition::new(
                    StateId::BeginProfile,
                    cur_d,
                    plan7.begin_to_delete(),
                ));
            }

            es.push((cur_m, node.match_emission.clone()));
            es.push((cur_i, node.insert_emission.clone()));
        }

        // final node: match state only
        let node = &plan7.nodes[last];
        let cur_m = StateId::Match(node.column);
        ts.push(Transition::new(
            cur_m,
            StateId::EndProfile,
            node.transitions[ME],
        ));
        ts.push(Transition::new(
            StateId::BeginProfile,
            cur_m,
            node.transitions[BM],
        ));
        es.push((cur_m, node.match_emission.clone()));

        // flanking states
        let xt = &plan7.xt;
        let nule = &plan7.nule;
        ts.push(Transition::new(StateId::Start, StateId::NTerminal, 1.0));
        ts.push(Transition::new(
            StateId::NTerminal,
            StateId::BeginProfile,
            xt[XT_NB],
        ));
        ts.push(Transition::emitting(
            StateId::NTerminal,
            StateId::NTerminal,
            xt[XT_NN],
            nule.clone(),
        ));
        ts.push(Transition::new(
            StateId::EndProfile,
            StateId::CTerminal,
            xt[XT_EC],
        ));
        ts.push(Transition::new(StateId::EndProfile, StateId::Join, xt[XT_EJ]));
        ts.push(Transition::new(StateId::CTerminal, StateId::End, xt[XT_CT]));
        ts.push(Transition::emitting(
            StateId::CTerminal,
            StateId::CTerminal,
            xt[XT_CC],
            nule.clone(),
        ));
        ts.push(Transition::new(
            StateId::Join,
            StateId::BeginProfile,
            xt[XT_JB],
        ));
        ts.push(Transition::emitting(
            StateId::Join,
            StateId::Join,
            xt[XT_JJ],
            nule.clone(),
        ));

        let n_all = ts.len();
        let ts = purge_transitions(ts, params.purge_epsilon);
        debug!("purged {} of {} transitions", n_all - ts.len(), n_all);

        FiniteStateModel::new(plan7.alphabet.clone(), ts, es)
    }
}
