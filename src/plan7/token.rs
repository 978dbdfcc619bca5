//!
//! Line tokenizer of Plan-7 files
//!
//! Any character outside `[A-Za-z0-9-*.:;,!/<>@_]` separates tokens.
//!
use crate::error::Result;
use crate::prob::Score;

///
/// Is the character part of a token?
///
pub fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '-' | '*' | '.' | ':' | ';' | ',' | '!' | '/' | '<' | '>' | '@' | '_'
        )
}

///
/// Split a line into its non-empty tokens
///
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split(|c: char| !is_token_char(c))
        .filter(|w| !w.is_empty())
        .collect()
}

///
/// Parse every token as a `Score`
///
pub fn parse_scores(tokens: &[&str]) -> Result<Vec<Score>> {
    tokens.iter().map(|t| t.parse()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_tag_line() {
        assert_eq!(tokenize("NAME  globin\n"), vec!["NAME", "globin"]);
        assert_eq!(
            tokenize("XT      -8455     -4  -1000  -1000"),
            vec!["XT", "-8455", "-4", "-1000", "-1000"]
        );
        assert_eq!(
            tokenize("         m->m   m->i   m->d"),
            vec!["m->m", "m->i", "m->d"]
        );
        assert_eq!(tokenize("\t  -21   *  -6129\r\n"), vec!["-21", "*", "-6129"]);
        assert!(tokenize("   \n").is_empty());
    }

    #[test]
    fn tokenize_separators() {
        // brackets, quotes and '=' separate
        assert_eq!(tokenize("HMMER2.0  [2.3.2]"), vec!["HMMER2.0", "2.3.2"]);
        assert_eq!(tokenize("a=b|c\"d"), vec!["a", "b", "c", "d"]);
        assert_eq!(tokenize("x@y_z!"), vec!["x@y_z!"]);
    }

    #[test]
    fn parse_score_tokens() {
        let scores = parse_scores(&["-1", "*", "20"]).unwrap();
        assert_eq!(
            scores,
            vec![Score::Bits(-1), Score::Impossible, Score::Bits(20)]
        );
        assert!(parse_scores(&["-1", "x"]).is_err());
    }
}
