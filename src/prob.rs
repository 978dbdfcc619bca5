///
/// probability calculation
/// decodes HMMER2 scaled log-odds scores and renormalizes probability groups
///
use crate::error::{Plan7Error, Result};
use log::warn;
use std::str::FromStr;

///
/// A score token of a Plan-7 file.
///
/// `Bits(s)` stores `s / int_scale` log2-odds bits relative to a background
/// probability. `Impossible` is the literal `*` and means probability 0.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Score {
    Impossible,
    Bits(i32),
}

impl FromStr for Score {
    type Err = Plan7Error;
    fn from_str(s: &str) -> Result<Self> {
        if s == "*" {
            Ok(Score::Impossible)
        } else {
            s.parse::<i32>()
                .map(Score::Bits)
                .map_err(|_| Plan7Error::InvalidScore(s.to_owned()))
        }
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Score::Impossible => write!(f, "*"),
            Score::Bits(s) => write!(f, "{}", s),
        }
    }
}

///
/// Background (null) probability used to rescale scores.
///
/// `Scalar` is broadcast across all positions.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Background<'a> {
    Scalar(f64),
    Vector(&'a [f64]),
}

impl<'a> Background<'a> {
    fn at(&self, i: usize) -> f64 {
        match self {
            Background::Scalar(p) => *p,
            Background::Vector(ps) => ps[i],
        }
    }
}

///
/// Linear probability of a score: `2^(s / int_scale) * null`, or 0 for `*`.
///
pub fn decode(score: Score, null: f64, int_scale: f64) -> f64 {
    match score {
        Score::Impossible => 0.0,
        Score::Bits(s) => 2f64.powf(s as f64 / int_scale) * null,
    }
}

///
/// `decode` applied position-wise.
///
/// A vector background must have the same length as `scores`.
///
pub fn decode_scores(
    scores: &[Score],
    background: Background,
    int_scale: f64,
) -> Result<Vec<f64>> {
    if let Background::Vector(ps) = background {
        if ps.len() != scores.len() {
            return Err(Plan7Error::LengthMismatch {
                what: "background distribution".to_owned(),
                expected: scores.len(),
                found: ps.len(),
            });
        }
    }
    Ok(scores
        .iter()
        .enumerate()
        .map(|(i, &s)| decode(s, background.at(i), int_scale))
        .collect())
}

///
/// Sum of `probs[i]` for `i` in `group`
///
pub fn group_sum(probs: &[f64], group: &[usize]) -> f64 {
    group.iter().map(|&i| probs[i]).sum()
}

///
/// Returns a copy of `probs` whose `group` members are divided by their sum.
///
/// If the group sums to zero, its members are left at 0.
///
pub fn renormalize(probs: &[f64], group: &[usize]) -> Vec<f64> {
    let total = group_sum(probs, group);
    let mut ret = probs.to_vec();
    if total == 0.0 {
        return ret;
    }
    for &i in group {
        ret[i] = probs[i] / total;
    }
    ret
}

///
/// `renormalize` that logs a warning when the raw sum deviates from 1 by more
/// than `tolerance` or when the group is entirely zero.
///
pub fn renormalize_checked<L: std::fmt::Display>(
    probs: &[f64],
    group: &[usize],
    tolerance: f64,
    label: L,
) -> Vec<f64> {
    let total = group_sum(probs, group);
    if total == 0.0 {
        warn!(
            "{}: group {:?} has zero probability; left unnormalized",
            label, group
        );
    } else if (total - 1.0).abs() > tolerance {
        warn!("{}: probabilities normalize to {}", label, total);
    }
    renormalize(probs, group)
}

///
/// `renormalize_checked` over every index of `probs`
///
pub fn renormalize_all<L: std::fmt::Display>(probs: &[f64], tolerance: f64, label: L) -> Vec<f64> {
    let group: Vec<usize> = (0..probs.len()).collect();
    renormalize_checked(probs, &group, tolerance, label)
}

//
// tests
//
