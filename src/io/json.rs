//!
//! JSON output of a finite-state model
//!
//! Each state and transition is written on its own row:
//!
//! ```text
//! {"alphabet":"A B","states":[
//! 	{"id":"start","emission":null},
//! 	{"id":"M001","emission":[0.6,0.4]},
//! ...
//! ],"transitions":[
//! 	{"from":"start","to":"nterminal","prob":1.0,"emission":null},
//! ...
//! ]}
//! ```
//!
use crate::fsm::{FiniteStateModel, State, Transition};
use crate::plan7::Alphabet;
use serde::Serialize;
use serde_json::ser::Formatter;
use serde_with::{serde_as, DisplayFromStr};
use std::io::{self, Write};

/// Formatter putting elements of the state/transition lists on separate rows
#[derive(Default)]
struct RowsFormatter {
    depth: usize,
    /// the array being written is a list of rows
    rows: Vec<bool>,
}

impl Formatter for RowsFormatter {
    fn begin_array<W: ?Sized + Write>(&mut self, w: &mut W) -> io::Result<()> {
        // arrays directly under the top-level object are row lists
        self.rows.push(self.depth == 1);
        self.depth += 1;
        w.write_all(b"[")
    }
    fn end_array<W: ?Sized + Write>(&mut self, w: &mut W) -> io::Result<()> {
        self.depth -= 1;
        if self.rows.pop() == Some(true) {
            w.write_all(b"\n")?;
        }
        w.write_all(b"]")
    }
    fn begin_array_value<W: ?Sized + Write>(&mut self, w: &mut W, first: bool) -> io::Result<()> {
        if !first {
            w.write_all(b",")?;
        }
        if self.rows.last() == Some(&true) {
            w.write_all(b"\n\t")?;
        }
        Ok(())
    }
    fn begin_object<W: ?Sized + Write>(&mut self, w: &mut W) -> io::Result<()> {
        self.depth += 1;
        w.write_all(b"{")
    }
    fn end_object<W: ?Sized + Write>(&mut self, w: &mut W) -> io::Result<()> {
        self.depth -= 1;
        w.write_all(b"}")
    }
}

#[serde_as]
#[derive(Serialize)]
struct JsonModel<'a> {
    #[serde_as(as = "DisplayFromStr")]
    alphabet: &'a Alphabet,
    states: Vec<State<'a>>,
    transitions: &'a [Transition],
}

///
/// Write `{alphabet, states, transitions}` as JSON
///
pub fn write_json<W: Write>(writer: W, fsm: &FiniteStateModel) -> io::Result<()> {
    let model = JsonModel {
        alphabet: fsm.alphabet(),
        states: fsm.states(),
        transitions: fsm.transitions(),
    };
    let mut ser = serde_json::Serializer::with_formatter(writer, RowsFormatter::default());
    model.serialize(&mut ser)?;
    Ok(())
}

///
/// create JSON string with `write_json`
///
pub fn to_json_string(fsm: &FiniteStateModel) -> String {
    let mut writer = Vec::with_capacity(1024);
    // writing into Vec<u8> never fails
    let _ = write_json(&mut writer, fsm);
    String::from_utf8_lossy(&writer).into_owned()
}

//
// tests
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ConvertParams;
    use crate::plan7::mocks::MOCK_TWO_NODES;
    use crate::plan7::Plan7Model;

    #[test]
    fn json_rows() {
        let params = ConvertParams::default();
        let plan7 = Plan7Model::from_hmm_str(MOCK_TWO_NODES, &params).unwrap();
        let fsm = FiniteStateModel::from_plan7(&plan7, &params);
        let json = to_json_string(&fsm);
        println!("{}", json);

        // one row per state and per transition
        let n_rows = json.lines().filter(|l| l.starts_with('\t')).count();
        assert_eq!(n_rows, fsm.states().len() + fsm.n_transitions());
        assert!(json.starts_with("{\"alphabet\":\"A B\",\"states\":[\n\t{\"id\":\"start\""));

        // still valid json
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["states"][0]["id"], "start");
        assert_eq!(value["transitions"][0]["from"], "M001");
        assert_eq!(
            value["transitions"].as_array().unwrap().len(),
            fsm.n_transitions()
        );
    }
}
