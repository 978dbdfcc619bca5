//!
//! ConvertParams
//!
//! Numeric constants used while decoding and building the finite-state model.
//!

///
/// Parameters of Plan-7 decoding and topology construction
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvertParams {
    ///
    /// scores are stored as `1/int_scale` of a log2-odds bit
    pub int_scale: f64,
    ///
    /// allowed deviation of a raw group sum from 1 before a warning is logged
    pub norm_tolerance: f64,
    ///
    /// allowed deviation between the begin line b->m and the first node's b->m
    pub begin_tolerance: f64,
    ///
    /// transitions with `|p| <= purge_epsilon` are removed from the model
    pub purge_epsilon: f64,
}

impl ConvertParams {
    pub fn new(int_scale: f64, norm_tolerance: f64, purge_epsilon: f64) -> ConvertParams {
        assert!(int_scale > 0.0);
        assert!(norm_tolerance >= 0.0);
        assert!(purge_epsilon >= 0.0);
        ConvertParams {
            int_scale,
            norm_tolerance,
            begin_tolerance: norm_tolerance,
            purge_epsilon,
        }
    }
    /// HMMER2 defaults
    /// `int_scale = 1000, tolerance = 1e-3, purge = 1e-6`
    pub fn hmmer2() -> ConvertParams {
        ConvertParams::new(1000.0, 1.0e-3, 1.0e-6)
    }
    /// Same as `hmmer2` with another purge threshold
    pub fn with_purge_epsilon(purge_epsilon: f64) -> ConvertParams {
        ConvertParams {
            purge_epsilon,
            ..ConvertParams::hmmer2()
        }
    }
}

impl Default for ConvertParams {
    fn default() -> Self {
        ConvertParams::hmmer2()
    }
}

impl std::fmt::Display for ConvertParams {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "int_scale: {}", self.int_scale)?;
        writeln!(f, "norm_tolerance: {}", self.norm_tolerance)?;
        writeln!(f, "begin_tolerance: {}", self.begin_tolerance)?;
        writeln!(f, "purge_epsilon: {}", self.purge_epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn default_is_hmmer2() {
        let p = ConvertParams::default();
        assert_eq!(p, ConvertParams::hmmer2());
        assert_eq!(p.int_scale, 1000.0);
        assert_eq!(p.purge_epsilon, 1.0e-6);
        let q = ConvertParams::with_purge_epsilon(0.01);
        assert_eq!(q.purge_epsilon, 0.01);
        assert_eq!(q.int_scale, p.int_scale);
        println!("{}", q);
    }
}
