//!
//! HMMoC XML output of a finite-state model
//!
//! The document describes the HMM (alphabet, states, transitions and emissions)
//! and asks HMMoC to generate Forward and Viterbi code for it, with
//! parameters stored in the arrays `iT[transition]` and `iE[emission][symbol]`.
//!
//! Identifiers:
//!
//! * `emit_<state>` emission of an emitting state
//! * `emit_<from>_to_<to>` emission of an emitting transition
//! * `tr_<from>_<to>` transition probability
//!
use crate::fsm::{FiniteStateModel, State, Transition};
use itertools::Itertools;
use std::io::Write;

///
/// Number representation of the generated code
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RealType {
    /// extended-exponent float
    BFloat,
    /// log-space float
    LogSpace,
}

impl Default for RealType {
    fn default() -> Self {
        RealType::BFloat
    }
}

impl std::fmt::Display for RealType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            RealType::BFloat => write!(f, "bfloat"),
            RealType::LogSpace => write!(f, "logspace"),
        }
    }
}

///
/// Transition with its identifiers
///
struct TransitionEntry<'a> {
    transition: &'a Transition,
    id: String,
    emission: Option<String>,
    /// neither the transition nor its target emits
    is_empty: bool,
}

///
/// Identifiers assigned to every state, emission and transition
///
struct Identifiers<'a> {
    states: Vec<(State<'a>, Option<String>)>,
    emissions: Vec<(String, &'a [f64])>,
    transitions: Vec<TransitionEntry<'a>>,
}

impl<'a> Identifiers<'a> {
    fn new(fsm: &'a FiniteStateModel) -> Self {
        let mut emissions: Vec<(String, &'a [f64])> = Vec::new();

        // emitting states
        let states: Vec<(State<'a>, Option<String>)> = fsm
            .states()
            .into_iter()
            .map(|state| match state.emission {
                Some(e) => {
                    let id = format!("emit_{}", state.id);
                    emissions.push((id.clone(), e));
                    (state, Some(id))
                }
                None => (state, None),
            })
            .collect();

        // emitting transitions
        let mut transitions = Vec::with_capacity(fsm.n_transitions());
        for t in fsm.transitions() {
            let emission = t.emission.as_ref().map(|e| {
                let id = format!("emit_{}_to_{}", t.from, t.to);
                emissions.push((id.clone(), e.as_slice()));
                id
            });
            transitions.push(TransitionEntry {
                transition: t,
                id: format!("tr_{}_{}", t.from, t.to),
                emission,
                is_empty: false,
            });
        }

        // non-emitting transitions that point to non-emitting states
        for entry in transitions.iter_mut() {
            let target = format!("emit_{}", entry.transition.to);
            entry.is_empty =
                entry.emission.is_none() && !emissions.iter().any(|(id, _)| *id == target);
        }

        Identifiers {
            states,
            emissions,
            transitions,
        }
    }
}

///
/// create HMMoC XML string with `write_hmmoc`
///
pub fn to_hmmoc_string(fsm: &FiniteStateModel, basename: &str, realtype: RealType) -> String {
    let mut writer = Vec::with_capacity(4096);
    // writing into Vec<u8> never fails
    let _ = write_hmmoc(&mut writer, fsm, basename, realtype);
    String::from_utf8_lossy(&writer).into_owned()
}

///
/// Write the HMMoC XML document.
///
/// `basename` names the generated files (`<basename>.cc`, `<basename>_params.h`, ...)
///
pub fn write_hmmoc<W: Write>(
    mut w: W,
    fsm: &FiniteStateModel,
    basename: &str,
    realtype: RealType,
) -> std::io::Result<()> {
    let ids = Identifiers::new(fsm);
    let alphabet = fsm.alphabet();

    writeln!(w, "<?xml version=\"1.0\"?>")?;
    writeln!(w, "<hml>")?;
    writeln!(
        w,
        "<alphabet id=\"hmmer_alphabet\"> {} </alphabet>",
        alphabet
    )?;
    write_output(&mut w, alphabet.len())?;
    write_init(&mut w, fsm, basename)?;
    write_parinit(&mut w, &ids, alphabet.len(), basename)?;
    write_definitions(&mut w, &ids)?;
    write_hmm(&mut w, &ids)?;
    write_codegen(&mut w, basename, realtype)
}

fn write_output<W: Write>(w: &mut W, n_symbols: usize) -> std::io::Result<()> {
    writeln!(w)?;
    writeln!(w, "<output id=\"sequence1\">")?;
    writeln!(w, "      <alphabet idref=\"hmmer_alphabet\"/>")?;
    writeln!(
        w,
        "      <identifier type=\"sequence\" value=\"iTranslatedSequence1\"/>"
    )?;
    writeln!(w, "      <identifier type=\"length\" value=\"iLen1\"/>")?;
    writeln!(w, "      <code type=\"parameter\">")?;
    writeln!(w, "        <![CDATA[")?;
    writeln!(w, "          vector<char>& iSequence1")?;
    writeln!(w, "        ]]>")?;
    writeln!(w, "      </code>")?;
    writeln!(
        w,
        "      <code type=\"parameter\"> hmmer_hmmShortReal iT[] </code>"
    )?;
    writeln!(
        w,
        "      <code type=\"parameter\"> hmmer_hmmShortReal iE[][{}] </code>",
        n_symbols
    )?;
    writeln!(w, "</output>")
}

///
/// translation of the input sequence into symbol indices
///
fn write_init<W: Write>(w: &mut W, fsm: &FiniteStateModel, basename: &str) -> std::io::Result<()> {
    writeln!(w)?;
    writeln!(
        w,
        "<code id=\"initheader\" type=\"statement\" where=\"includes\"><![CDATA["
    )?;
    writeln!(w, "    #include <vector>")?;
    writeln!(w, "    #include \"{}_params.h\"", basename)?;
    writeln!(w, "]]></code>")?;
    writeln!(w)?;
    writeln!(
        w,
        "<code id=\"initialise\" type=\"statement\" init=\"initheader\">"
    )?;
    writeln!(w, "    <![CDATA[")?;
    writeln!(w, "int iLen1 = iSequence1.size();")?;
    writeln!(w, "int iTranslate[256];")?;
    writeln!(w, "for(int i=0;i<256;i++) iTranslate[i]=0;")?;
    for (i, c) in fsm.alphabet().symbols().iter().enumerate() {
        writeln!(w, "iTranslate[(int)'{}'] = {};", c, i)?;
    }
    writeln!(w, "vector<int> iTranslatedSequence1;")?;
    writeln!(w, "for(int i=0;i<(int)iSequence1.size();i++) iTranslatedSequence1.push_back(iTranslate[(int)iSequence1[i]]);")?;
    writeln!(w, "]]>")?;
    writeln!(w, "</code>")?;
    writeln!(w)
}

///
/// parameter initialization `initpars()`
///
fn write_parinit<W: Write>(
    w: &mut W,
    ids: &Identifiers,
    n_symbols: usize,
    basename: &str,
) -> std::io::Result<()> {
    writeln!(w, "<code id=\"parinit\" type=\"statement\"><![CDATA[")?;
    writeln!(w, "#include \"{}_params.h\"", basename)?;
    writeln!(w, "#include \"{}.h\"", basename)?;
    writeln!(w, "hmmer_hmmShortReal iT[{}];", ids.transitions.len())?;
    writeln!(
        w,
        "hmmer_hmmShortReal iE[{}][{}];",
        ids.emissions.len(),
        n_symbols
    )?;
    writeln!(w, "void initpars(){{")?;
    for t in ids.transitions.iter() {
        writeln!(w, "iT[{}] = {};", t.id, t.transition.prob)?;
    }
    for (id, emission) in ids.emissions.iter() {
        for (j, p) in emission.iter().enumerate() {
            writeln!(w, "iE[{}][{}] = {};", id, j, p)?;
        }
    }
    writeln!(w, "}}")?;
    writeln!(w, "]]></code>")
}

///
/// `#DEFINE` of array indices
///
fn write_definitions<W: Write>(w: &mut W, ids: &Identifiers) -> std::io::Result<()> {
    writeln!(w)?;
    writeln!(
        w,
        "<!-- Definitions to refer to array indices by name, rather than number -->"
    )?;
    writeln!(w, "<code id=\"definitions\" type=\"statement\"><![CDATA[")?;
    for (i, (id, _)) in ids.emissions.iter().enumerate() {
        writeln!(w, "#DEFINE {} {}", id, i)?;
    }
    for (i, t) in ids.transitions.iter().enumerate() {
        writeln!(w, "#DEFINE {} {}", t.id, i)?;
    }
    write!(w, "]]></code>")
}

fn quoted(s: &str) -> String {
    format!("\"{}\"", s)
}

///
/// the `<hmm>` element
///
fn write_hmm<W: Write>(w: &mut W, ids: &Identifiers) -> std::io::Result<()> {
    writeln!(w)?;
    writeln!(w)?;
    writeln!(w, "<hmm id=\"hmmer_hmm\">")?;
    writeln!(w)?;
    writeln!(
        w,
        "  <description>  Profile HMM generated from HMMER file   </description>"
    )?;
    writeln!(w)?;
    writeln!(w, "  <outputs>")?;
    writeln!(
        w,
        "    <!-- Define number of emission 'tapes', and their alphabets -->"
    )?;
    writeln!(w, "    <output idref=\"sequence1\"/>")?;
    writeln!(w, "  </outputs>")?;
    writeln!(w)?;
    writeln!(w, "  <clique id=\"block1\">")?;
    writeln!(w, "    <state id=\"start\"/>")?;
    writeln!(w, "  </clique>")?;
    writeln!(w)?;
    writeln!(w, "  <clique id=\"block3\">")?;
    writeln!(w, "    <state id=\"end\"/>")?;
    writeln!(w, "  </clique>")?;
    writeln!(w)?;

    // main clique, without start and end
    writeln!(w, "  <clique id=\"block2\">")?;
    for (state, emission) in ids.states.iter().filter(|(s, _)| !s.id.is_sentinel()) {
        match emission {
            Some(e) => writeln!(w, "    <state id=\"{}\"  emission=\"{}\"/>", state.id, e)?,
            None => writeln!(w, "    <state id=\"{}\" />", state.id)?,
        }
    }
    writeln!(w, "  </clique>")?;
    writeln!(w)?;
    writeln!(w, "  <graph>")?;
    writeln!(w, "    <clique idref=\"block1\"/>")?;
    writeln!(w, "    <clique idref=\"block2\"/>")?;
    writeln!(w, "    <clique idref=\"block3\"/>")?;
    writeln!(w, "  </graph>")?;
    writeln!(w)?;

    // emissions
    writeln!(w, "  <emission id=\"empty\">")?;
    writeln!(
        w,
        "    <probability><code type=\"expression\"> 1.0 </code></probability>"
    )?;
    write!(w, "  </emission>")?;
    for (id, _) in ids.emissions.iter() {
        writeln!(w)?;
        writeln!(w)?;
        writeln!(w, "  <emission id=\"{}\"><output idref=\"sequence1\"/><probability><code><identifier output=\"sequence1\" value=\"iSymbol\"/>", id)?;
        writeln!(w, "    iE[{}][iSymbol]", id)?;
        write!(w, "  </code></probability></emission>")?;
    }
    writeln!(w)?;

    // transitions
    writeln!(w)?;
    writeln!(w, "  <transitions>")?;
    for t in ids.transitions.iter() {
        let emission = match (&t.emission, t.is_empty) {
            (Some(e), _) => format!("emission=\"{}\"", e),
            (None, true) => "emission=\"empty\"".to_owned(),
            (None, false) => String::new(),
        };
        writeln!(
            w,
            "    <transition from={:<15} to={:<15} probability={:<25} {} id={:<25}/>",
            quoted(&t.transition.from.to_string()),
            quoted(&t.transition.to.to_string()),
            quoted(&format!("pr_{}", t.id)),
            emission,
            quoted(&t.id),
        )?;
    }
    writeln!(w, "  </transitions>")?;
    writeln!(w)?;

    // probabilities
    for t in ids.transitions.iter() {
        writeln!(w, "  <probability id=\"pr_{}\"><code type=\"expression\" init=\"initialise\"> iT[{}] </code></probability>", t.id, t.id)?;
    }
    writeln!(w, "</hmm>")
}

///
/// Forward/Viterbi code generation requests
///
fn write_codegen<W: Write>(w: &mut W, basename: &str, realtype: RealType) -> std::io::Result<()> {
    let blocks = vec![
        "<!-- Code generation -->".to_owned(),
        [
            "<forward outputTable=\"yes\" baumWelch=\"no\" cacheValues=\"yes\" name=\"Forward\" id=\"forward\">",
            "  <hmm idref=\"hmmer_hmm\"/>",
            "</forward>",
        ]
        .iter()
        .join("\n"),
        [
            "<viterbi name=\"Viterbi\" cacheValues=\"yes\" id=\"viterbi\">",
            "  <hmm idref=\"hmmer_hmm\"/>",
            "</viterbi>",
        ]
        .iter()
        .join("\n"),
        format!(
            "<codeGeneration realtype=\"{}\" file=\"{}.cc\" header=\"{}.h\" language=\"C++\">\n  <forward idref=\"forward\"/>\n  <viterbi idref=\"viterbi\"/>\n</codeGeneration>",
            realtype, basename, basename
        ),
        format!(
            "<codeGeneration file=\"{}_params.cc\" language=\"C++\">\n  <code idref=\"parinit\"/>\n</codeGeneration>",
            basename
        ),
        format!(
            "<codeGeneration file=\"{}_params.h\" language=\"C++\">\n  <code idref=\"definitions\"/>\n</codeGeneration>",
            basename
        ),
    ];
    writeln!(w)?;
    writeln!(w)?;
    writeln!(w, "{}", blocks.iter().format("\n\n\n"))?;
    writeln!(w)?;
    writeln!(w)?;
    writeln!(w, "</hml>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ConvertParams;
    use crate::plan7::mocks::*;
    use crate::plan7::Plan7Model;

    fn fsm_of(text: &str) -> FiniteStateModel {
        let params = ConvertParams::default();
        let plan7 = Plan7Model::from_hmm_str(text, &params).unwrap();
        FiniteStateModel::from_plan7(&plan7, &params)
    }

    #[test]
    fn realtype() {
        assert_eq!(RealType::default(), RealType::BFloat);
        assert_eq!(RealType::BFloat.to_string(), "bfloat");
        assert_eq!(RealType::LogSpace.to_string(), "logspace");
    }

    #[test]
    fn document_structure() {
        let fsm = fsm_of(MOCK_THREE_NODES);
        let xml = to_hmmoc_string(&fsm, "mock", RealType::LogSpace);
        println!("{}", xml);
        assert!(xml.starts_with("<?xml version=\"1.0\"?>\n<hml>\n"));
        assert!(xml.trim_end().ends_with("</hml>"));
        assert!(xml.contains("<alphabet id=\"hmmer_alphabet\"> A C G T </alphabet>"));
        assert!(xml.contains("hmmer_hmmShortReal iE[][4]"));
        assert!(xml.contains("realtype=\"logspace\" file=\"mock.cc\" header=\"mock.h\""));
        assert!(xml.contains("iTranslate[(int)'G'] = 2;"));
        assert!(xml.contains("#include \"mock_params.h\""));

        // one transition tag, probability and definition per transition
        let n = fsm.n_transitions();
        assert_eq!(xml.matches("<transition from=").count(), n);
        assert_eq!(xml.matches("<probability id=\"pr_tr_").count(), n);
        assert!(xml.contains(&format!("hmmer_hmmShortReal iT[{}];", n)));
        assert_eq!(xml.matches("#DEFINE tr_M001_M002 ").count(), 1);

        // emitting states and transitions
        assert!(xml.contains("<state id=\"M001\"  emission=\"emit_M001\"/>"));
        assert!(xml.contains("<state id=\"beginprofile\" />"));
        assert!(xml.contains("emission=\"emit_nterminal_to_nterminal\""));
        // 3 match + 2 insert + 3 flanking loops
        assert!(xml.contains("hmmer_hmmShortReal iE[8][4];"));
        // start -> nterminal is silent and points to a silent state
        assert!(xml.contains(
            "<transition from=\"start\"         to=\"nterminal\"     probability=\"pr_tr_start_nterminal\"   emission=\"empty\" id=\"tr_start_nterminal\"     />"
        ));
        // transition into an emitting state does not need the empty emission
        assert!(xml.contains(
            "<transition from=\"M001\"          to=\"M002\"          probability=\"pr_tr_M001_M002\"          id=\"tr_M001_M002\"           />"
        ));
    }

    #[test]
    fn bfloat_is_default_realtype() {
        let fsm = fsm_of(MOCK_TWO_NODES);
        let xml = to_hmmoc_string(&fsm, "two", RealType::default());
        assert!(xml.contains("realtype=\"bfloat\""));
        assert!(!xml.contains("I001"));
    }
}
