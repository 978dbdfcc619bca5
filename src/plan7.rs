//!
//! Plan-7 profile HMM description
//!
//! Structured, decoded content of a HMMER2 `.hmm` file.
//!
//! ```text
//! HMMER2.0  [2.3.2]
//! NAME  globin
//! LENG  149
//! ALPH  Amino
//! MAP   yes
//! XT      -8455     -4  -1000  -1000  -8455     -4  -8455     -4
//! NULT      -4  -8455
//! NULE     595  -1558     85    338   -294    453  -1158  ...
//! HMM        A      C      D      E      F      G      H  ...
//!          m->m   m->i   m->d   i->m   i->i   d->m   d->d   b->m   m->e
//!           -21      *  -6129
//!      1  -1084    390  -8597  -8255  -5793  -8424  -8268  ...     1
//!      -   -149   -500    233     43   -381    399    106  ...
//!      -    -22  -6718  -7760   -894  -1115   -701  -1378  -1234      *
//! ```
//!
pub mod mocks;
pub mod reader;
pub mod token;

// node transition indices
pub const MM: usize = 0;
pub const MI: usize = 1;
pub const MD: usize = 2;
pub const IM: usize = 3;
pub const II: usize = 4;
pub const DM: usize = 5;
pub const DD: usize = 6;
pub const BM: usize = 7;
pub const ME: usize = 8;
pub const N_NODE_TRANSITIONS: usize = 9;

// XT (special state) transition indices
pub const XT_NB: usize = 0;
pub const XT_NN: usize = 1;
pub const XT_EC: usize = 2;
pub const XT_EJ: usize = 3;
pub const XT_CT: usize = 4;
pub const XT_CC: usize = 5;
pub const XT_JB: usize = 6;
pub const XT_JJ: usize = 7;
pub const N_XT: usize = 8;

pub const N_NULT: usize = 2;
pub const N_BEGIN: usize = 3;

///
/// Groups of XT values that must each sum to 1
/// n->b,n  e->c,j  c->t,c  j->b,j
pub const XT_GROUPS: [&[usize]; 4] = [
    &[XT_NB, XT_NN],
    &[XT_EC, XT_EJ],
    &[XT_CT, XT_CC],
    &[XT_JB, XT_JJ],
];
pub const NULT_GROUP: &[usize] = &[0, 1];
pub const BEGIN_GROUP: &[usize] = &[0, 1, 2];
/// m->m, m->i, m->d, m->e
pub const MATCH_GROUP: &[usize] = &[MM, MI, MD, ME];
/// i->m, i->i
pub const INSERT_GROUP: &[usize] = &[IM, II];
/// d->m, d->d
pub const DELETE_GROUP: &[usize] = &[DM, DD];

///
/// Ordered emission symbols, as listed on the `HMM` line
///
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Alphabet(Vec<char>);

impl Alphabet {
    pub fn new(symbols: Vec<char>) -> Self {
        Alphabet(symbols)
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn symbols(&self) -> &[char] {
        &self.0
    }
    /// index of the symbol in emission vectors
    pub fn index(&self, symbol: char) -> Option<usize> {
        self.0.iter().position(|&c| c == symbol)
    }
}

impl std::fmt::Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use itertools::Itertools;
        write!(f, "{}", self.0.iter().format(" "))
    }
}

///
/// Tagged metadata of the file header
///
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    /// NAME tokens joined by a space
    pub name: String,
    /// LENG, the number of nodes
    pub length: usize,
    /// first token of ALPH (e.g. `Amino`)
    pub alph: Option<String>,
    /// MAP is `yes`; node lines then end with an alignment column number
    pub has_map: bool,
}

///
/// One Plan-7 node (alignment column)
///
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// `m+1` for the m-th node, or the MAP column
    pub column: usize,
    pub match_emission: Vec<f64>,
    pub insert_emission: Vec<f64>,
    /// m->m m->i m->d i->m i->i d->m d->d b->m m->e
    pub transitions: [f64; N_NODE_TRANSITIONS],
}

///
/// Decoded Plan-7 model
///
#[derive(Clone, Debug, PartialEq)]
pub struct Plan7Model {
    pub header: Header,
    pub alphabet: Alphabet,
    /// special state transitions, indexed by `XT_*`
    pub xt: [f64; N_XT],
    /// null model transitions
    pub nult: [f64; N_NULT],
    /// null model emission distribution
    pub nule: Vec<f64>,
    /// b->m b->i b->d
    pub begin: [f64; N_BEGIN],
    pub nodes: Vec<Node>,
}

impl Plan7Model {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    ///
    /// b->d probability used for the wing of the first node
    ///
    pub fn begin_to_delete(&self) -> f64 {
        self.begin[2]
    }
}

impl std::fmt::Display for Plan7Model {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Plan7Model(name={}, L={}, alphabet={})",
            self.header.name,
            self.len(),
            self.alphabet
        )
    }
}
