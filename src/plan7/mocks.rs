//!
//! Mock Plan-7 files for testing
//!

///
/// Two nodes over `{A, B}` with uniform null emissions.
///
/// Only m->m, m->e and b->m are possible in node 1, so neither `I001` nor `D001`
/// is reachable.
///
pub const MOCK_TWO_NODES: &str = r#"HMMER2.0  [2.3.2]
NAME  mock two
LENG  2
ALPH  Amino
XT     -1000  -1000  -1000  -1000  -1000  -1000  -1000  -1000
NULT      -4  -8455
NULE     0     0
HMM        A      B
         m->m   m->i   m->d   i->m   i->i   d->m   d->d   b->m   m->e
            0      *      *
     1   1000      0
     -      *      *
     -  -1000      *      *      *      *      *      *  -1000  -1000
     2      0      0
     -      *      *
     -      *      *      *      *      *      *      *  -1000      0
//
"#;

///
/// Three nodes over `{A, C, G, T}` where every structural transition is possible
///
pub const MOCK_THREE_NODES: &str = r#"HMMER2.0  [2.3.2]
NAME  mock three
LENG  3
ALPH  Nucleic
RF    no
CS    no
MAP   no
COM   hmmbuild mock.hmm mock.sto
NSEQ  4
CKSUM 1234

XT      -8455     -4  -1000  -1000  -8455     -4  -8455     -4
NULT      -4  -8455
NULE     100   -100     50    -50
EVD   -38.893742   0.243153
HMM        A      C      G      T
         m->m   m->i   m->d   i->m   i->i   d->m   d->d   b->m   m->e
          -21  -7000  -6129
     1   1200   -900   -800   -700
     -   -100    100      0      0
     -    -22  -6718  -7760   -894  -1115   -701  -1378   -415  -5000
     2   -800   1500   -900   -600
     -      0    -50     50      0
     -    -30  -6000  -7000   -900  -1100   -800  -1300  -3000  -5000
     3   -700   -800   1400   -900
     -      *      *      *      *
     -      *      *      *      *      *      *      *  -3000      0
//
"#;

///
/// Three nodes with `MAP yes`; alignment columns are 3, 5 and 9
///
pub const MOCK_MAPPED: &str = r#"HMMER2.0
NAME  mapped
LENG  3
ALPH  Amino
MAP   yes
XT      -8455     -4  -1000  -1000  -8455     -4  -8455     -4
NULT      -4  -8455
NULE     0     0
HMM        A      B
         m->m   m->i   m->d   i->m   i->i   d->m   d->d   b->m   m->e
          -21  -7000  -6129
     1   1000  -1000      3
     -      0      0
     -    -22  -6718  -7760   -894  -1115   -701  -1378   -415  -5000
     2  -1000   1000      5
     -      0      0
     -    -22  -6718  -7760   -894  -1115   -701  -1378  -3000  -5000
     3      0      0      9
     -      *      *
     -      *      *      *      *      *      *      *  -3000      0
//
"#;

///
/// A single node over `{A, B}`
///
pub const MOCK_ONE_NODE: &str = r#"HMMER2.0
NAME  single
LENG  1
XT      -8455     -4  -1000  -1000  -8455     -4  -8455     -4
NULT      -4  -8455
NULE     0     0
HMM        A      B
         m->m   m->i   m->d   i->m   i->i   d->m   d->d   b->m   m->e
            0      *      *
     1   1000      0
     -      *      *
     -      *      *      *      *      *      *      *      0      0
//
"#;
