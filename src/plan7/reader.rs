//!
//! Plan-7 reader
//!
//! Parses a HMMER2 `.hmm` file in a single forward pass:
//!
//! 1. header line `HMMER2.0`
//! 2. tag lines until the `HMM` tag, whose data is the alphabet
//! 3. transition header line (ignored)
//! 4. b->m b->i b->d line
//! 5. three lines (match, insert, transitions) per node
//!
//! All scores are decoded into linear probabilities and renormalized
//! per group while reading.
//!
use super::token::{parse_scores, tokenize};
use super::{
    Alphabet, Header, Node, Plan7Model, BEGIN_GROUP, BM, DELETE_GROUP, INSERT_GROUP,
    MATCH_GROUP, NULT_GROUP, N_BEGIN, N_NODE_TRANSITIONS, N_NULT, N_XT, XT_GROUPS,
};
use crate::error::{Plan7Error, Result};
use crate::params::ConvertParams;
use crate::prob::{decode_scores, renormalize_all, renormalize_checked, Background, Score};
use fnv::FnvHashSet;
use log::{debug, info, warn};

pub const IDENTIFIER: &str = "HMMER2.0";

///
/// line iterator that reports the section being read on EOF
///
struct LineReader<R: std::io::BufRead> {
    lines: std::io::Lines<R>,
}

impl<R: std::io::BufRead> LineReader<R> {
    fn new(reader: R) -> Self {
        LineReader {
            lines: reader.lines(),
        }
    }
    fn next_line(&mut self, section: &'static str) -> Result<String> {
        match self.lines.next() {
            Some(line) => Ok(line?),
            None => Err(Plan7Error::UnexpectedEof(section)),
        }
    }
}

///
/// Raw data of the tags of interest, before validation
///
#[derive(Default, Debug)]
struct RawTags {
    name: Option<Vec<String>>,
    leng: Option<Vec<String>>,
    xt: Option<Vec<String>>,
    nult: Option<Vec<String>>,
    nule: Option<Vec<String>>,
    map: Option<Vec<String>>,
    alph: Option<Vec<String>>,
}

impl RawTags {
    ///
    /// store the data of a tag. Returns false if the tag is not of interest.
    ///
    fn insert(&mut self, tag: &str, data: Vec<String>) -> Result<bool> {
        let slot = match tag {
            "NAME" => &mut self.name,
            "LENG" => &mut self.leng,
            "XT" => &mut self.xt,
            "NULT" => &mut self.nult,
            "NULE" => &mut self.nule,
            "MAP" => &mut self.map,
            "ALPH" => &mut self.alph,
            _ => return Ok(false),
        };
        if slot.is_some() {
            return Err(Plan7Error::DuplicateTag(tag.to_owned()));
        }
        *slot = Some(data);
        Ok(true)
    }
}

///
/// Validated tag section
///
struct Tags {
    header: Header,
    alphabet: Alphabet,
    xt: Vec<Score>,
    nult: Vec<Score>,
    nule: Vec<Score>,
}

fn required(slot: Option<Vec<String>>, tag: &'static str) -> Result<Vec<String>> {
    slot.ok_or(Plan7Error::MissingTag(tag))
}

fn scores_of(tokens: &[String]) -> Result<Vec<Score>> {
    let tokens: Vec<&str> = tokens.iter().map(|s| s.as_str()).collect();
    parse_scores(&tokens)
}

fn check_len(what: &str, expected: usize, found: usize) -> Result<()> {
    if expected != found {
        Err(Plan7Error::LengthMismatch {
            what: what.to_owned(),
            expected,
            found,
        })
    } else {
        Ok(())
    }
}

fn to_array<const N: usize>(v: &[f64]) -> [f64; N] {
    let mut a = [0.0; N];
    a.copy_from_slice(v);
    a
}

fn parse_alphabet(data: &[String]) -> Result<Alphabet> {
    let mut symbols = Vec::with_capacity(data.len());
    for token in data {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => symbols.push(c),
            _ => {
                return Err(Plan7Error::InvalidField {
                    field: "HMM alphabet",
                    value: token.clone(),
                })
            }
        }
    }
    if symbols.is_empty() {
        return Err(Plan7Error::EmptyAlphabet);
    }
    Ok(Alphabet::new(symbols))
}

impl RawTags {
    fn validate(self, alphabet: Alphabet) -> Result<Tags> {
        let leng = required(self.leng, "LENG")?;
        let length: usize = leng
            .first()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| Plan7Error::InvalidField {
                field: "LENG",
                value: leng.join(" "),
            })?;
        if length == 0 {
            return Err(Plan7Error::EmptyModel);
        }
        let xt = scores_of(&required(self.xt, "XT")?)?;
        let nult = scores_of(&required(self.nult, "NULT")?)?;
        let nule = scores_of(&required(self.nule, "NULE")?)?;
        check_len("XT", N_XT, xt.len())?;
        check_len("NULT", N_NULT, nult.len())?;
        check_len("NULE", alphabet.len(), nule.len())?;

        let header = Header {
            name: self.name.map(|n| n.join(" ")).unwrap_or_default(),
            length,
            alph: self.alph.and_then(|a| a.into_iter().next()),
            has_map: self
                .map
                .and_then(|m| m.into_iter().next())
                .map_or(false, |m| m.eq_ignore_ascii_case("yes")),
        };
        Ok(Tags {
            header,
            alphabet,
            xt,
            nult,
            nule,
        })
    }
}

///
/// Parser state shared by the sections after the tag scan
///
struct Plan7Reader<'a, R: std::io::BufRead> {
    lines: LineReader<R>,
    params: &'a ConvertParams,
}

impl<'a, R: std::io::BufRead> Plan7Reader<'a, R> {
    fn read_identifier(&mut self) -> Result<()> {
        let line = self.lines.next_line("header")?;
        let id = line.split_whitespace().next().unwrap_or("");
        if id != IDENTIFIER {
            return Err(Plan7Error::BadIdentifier(id.to_owned()));
        }
        Ok(())
    }
    ///
    /// read tag lines until `HMM`
    ///
    fn read_tags(&mut self) -> Result<Tags> {
        let mut raw = RawTags::default();
        loop {
            let line = self.lines.next_line("tags")?;
            let tokens = tokenize(&line);
            let (tag, data) = match tokens.split_first() {
                Some((tag, data)) => (*tag, data),
                None => continue,
            };
            let data: Vec<String> = data.iter().map(|s| s.to_string()).collect();
            if tag == "HMM" {
                let alphabet = parse_alphabet(&data)?;
                return raw.validate(alphabet);
            }
            if !raw.insert(tag, data)? {
                debug!("ignored tag {}", tag);
            }
        }
    }
    ///
    /// b->m, b->i, b->d
    ///
    fn read_begin(&mut self) -> Result<[f64; N_BEGIN]> {
        let line = self.lines.next_line("begin transitions")?;
        let scores = parse_scores(&tokenize(&line))?;
        check_len("begin transitions", N_BEGIN, scores.len())?;
        let probs = decode_scores(&scores, Background::Scalar(1.0), self.params.int_scale)?;
        let probs = renormalize_checked(
            &probs,
            BEGIN_GROUP,
            self.params.norm_tolerance,
            "b->m,i,d",
        );
        Ok(to_array(&probs))
    }
    ///
    /// read the three lines of the `m`-th node (0-origin)
    ///
    fn read_node(&mut self, m: usize, tags: &Tags, nule: &[f64]) -> Result<Node> {
        let k = tags.alphabet.len();
        let is_last = m + 1 == tags.header.length;
        let int_scale = self.params.int_scale;
        let tol = self.params.norm_tolerance;

        let line1 = self.lines.next_line("match emission line")?;
        let line2 = self.lines.next_line("insert emission line")?;
        let line3 = self.lines.next_line("transition line")?;
        let t1 = tokenize(&line1);
        let t2 = tokenize(&line2);
        let t3 = tokenize(&line3);

        // node number
        let number = t1.first().copied().unwrap_or("");
        if number.parse::<usize>().ok() != Some(m + 1) {
            return Err(Plan7Error::NodeNumberMismatch {
                expected: m + 1,
                found: number.to_owned(),
            });
        }
        let n_fields = if tags.header.has_map { k + 2 } else { k + 1 };
        if t1.len() < n_fields {
            return Err(Plan7Error::TooFewFields {
                what: format!("node {} match emission line", m + 1),
                expected: n_fields,
                found: t1.len(),
            });
        }
        let column = if tags.header.has_map {
            let token = t1[t1.len() - 1];
            token.parse().map_err(|_| Plan7Error::InvalidField {
                field: "MAP column",
                value: token.to_owned(),
            })?
        } else {
            m + 1
        };

        let insert_tokens = t2.get(1..).unwrap_or(&[]);
        check_len(
            &format!("node {} insert emissions", m + 1),
            k,
            insert_tokens.len(),
        )?;
        let trans_tokens = t3.get(1..).unwrap_or(&[]);
        check_len(
            &format!("node {} transitions", m + 1),
            N_NODE_TRANSITIONS,
            trans_tokens.len(),
        )?;

        let prob_match = decode_scores(
            &parse_scores(&t1[1..k + 1])?,
            Background::Vector(nule),
            int_scale,
        )?;
        let prob_insert = decode_scores(
            &parse_scores(insert_tokens)?,
            Background::Vector(nule),
            int_scale,
        )?;
        let prob_trans = decode_scores(
            &parse_scores(trans_tokens)?,
            Background::Scalar(1.0),
            int_scale,
        )?;

        let prob_match = renormalize_all(&prob_match, tol, format!("node {} match", m + 1));
        let mut prob_trans = renormalize_checked(
            &prob_trans,
            MATCH_GROUP,
            tol,
            format!("node {} m->m,i,d,e", m + 1),
        );
        let mut prob_insert = prob_insert;
        // the last node has no outgoing insert/delete transitions
        if !is_last {
            prob_trans = renormalize_checked(
                &prob_trans,
                INSERT_GROUP,
                tol,
                format!("node {} i->m,i", m + 1),
            );
            prob_trans = renormalize_checked(
                &prob_trans,
                DELETE_GROUP,
                tol,
                format!("node {} d->m,d", m + 1),
            );
            prob_insert = renormalize_all(&prob_insert, tol, format!("node {} insert", m + 1));
        }

        Ok(Node {
            column,
            match_emission: prob_match,
            insert_emission: prob_insert,
            transitions: to_array(&prob_trans),
        })
    }
    fn read(mut self) -> Result<Plan7Model> {
        self.read_identifier()?;
        let tags = self.read_tags()?;
        let int_scale = self.params.int_scale;
        let tol = self.params.norm_tolerance;

        // special transitions and null model
        let mut xt = decode_scores(&tags.xt, Background::Scalar(1.0), int_scale)?;
        for group in XT_GROUPS.iter() {
            xt = renormalize_checked(&xt, group, tol, "XT");
        }
        let nult = decode_scores(&tags.nult, Background::Scalar(1.0), int_scale)?;
        let nult = renormalize_checked(&nult, NULT_GROUP, tol, "NULT");
        let uniform = 1.0 / tags.alphabet.len() as f64;
        let nule = decode_scores(&tags.nule, Background::Scalar(uniform), int_scale)?;
        let nule = renormalize_all(&nule, tol, "NULE");

        // transition header line
        self.lines.next_line("transition header")?;
        let begin = self.read_begin()?;

        let mut nodes = Vec::with_capacity(tags.header.length);
        let mut columns = FnvHashSet::default();
        for m in 0..tags.header.length {
            let node = self.read_node(m, &tags, &nule)?;
            if !columns.insert(node.column) {
                return Err(Plan7Error::DuplicateColumn(node.column));
            }
            nodes.push(node);
        }

        let bm = nodes[0].transitions[BM];
        if (begin[0] - bm).abs() > self.params.begin_tolerance {
            warn!(
                "Inconsistent initial b->m transition: {} and {}",
                begin[0], bm
            );
        }

        let model = Plan7Model {
            header: tags.header,
            alphabet: tags.alphabet,
            xt: to_array(&xt),
            nult: to_array(&nult),
            nule,
            begin,
            nodes,
        };
        info!("parsed {}", model);
        Ok(model)
    }
}

///
/// Parsing functions
///
impl Plan7Model {
    ///
    /// Parse a Plan-7 text stream
    ///
    pub fn from_hmm_reader<R: std::io::BufRead>(
        reader: R,
        params: &ConvertParams,
    ) -> Result<Plan7Model> {
        Plan7Reader {
            lines: LineReader::new(reader),
            params,
        }
        .read()
    }
    ///
    /// parse Plan-7 string with `from_hmm_reader`
    ///
    pub fn from_hmm_str(s: &str, params: &ConvertParams) -> Result<Plan7Model> {
        Self::from_hmm_reader(s.as_bytes(), params)
    }
    ///
    /// parse Plan-7 file with `from_hmm_reader`
    ///
    /// Files ending with `.gz` are decompressed.
    ///
    pub fn from_hmm_file<P: AsRef<std::path::Path>>(
        path: P,
        params: &ConvertParams,
    ) -> Result<Plan7Model> {
        let reader = crate::io::open_reader(path)?;
        Self::from_hmm_reader(reader, params)
    }
}

//
// tests
//
