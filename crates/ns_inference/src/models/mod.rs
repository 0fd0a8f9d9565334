use std::sync::Arc;

use ns_core::{Error, PolarityScorer, Result};

pub mod dummy;
pub mod lexicon;

pub use dummy::FixedScorer;
pub use lexicon::LexiconScorer;

/// Builds a scorer from its configured name: `lexicon` or `fixed:<score>`.
pub fn create_scorer(name: &str) -> Result<Arc<dyn PolarityScorer>> {
    let name = name.trim();
    if name.eq_ignore_ascii_case("lexicon") {
        return Ok(Arc::new(LexiconScorer::new()));
    }
    if let Some(score) = name.strip_prefix("fixed:") {
        let score: f64 = score
            .parse()
            .map_err(|_| Error::Config(format!("Invalid fixed score: {}", score)))?;
        return Ok(Arc::new(FixedScorer::new(score)));
    }
    Err(Error::Config(format!(
        "Unknown scorer: {}. Available scorers: lexicon, fixed:<score>",
        name
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_scorer() {
        assert_eq!(create_scorer("lexicon").unwrap().name(), "lexicon");
        let fixed = create_scorer("fixed:0.5").unwrap();
        assert_eq!(fixed.name(), "fixed");
        assert_eq!(fixed.compound("whatever"), 0.5);
        assert!(create_scorer("fixed:abc").is_err());
        assert!(create_scorer("bert").is_err());
    }
}
