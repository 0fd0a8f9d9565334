//! Rule-based valence scorer.
//!
//! Words carry a valence on a -4..4 scale. The per-word valences are adjusted
//! by the words around them (boosters, negations, emphasis) and the sum is
//! squashed into a compound score in [-1, 1].

use std::collections::{HashMap, HashSet};
use std::fmt;

use ns_core::PolarityScorer;

const BOOST_INCR: f64 = 0.293;
const BOOST_DECR: f64 = -0.293;
const CAPS_INCR: f64 = 0.733;
const NEGATION_SCALAR: f64 = -0.74;
const EXCLAMATION_INCR: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const NORMALIZATION_ALPHA: f64 = 15.0;

const VALENCES: &[(&str, f64)] = &[
    // positive
    ("accomplish", 1.8), ("accomplished", 1.9), ("achievement", 2.1), ("admire", 2.1),
    ("advance", 1.3), ("agree", 1.5), ("amazing", 2.8), ("approve", 2.0), ("approved", 1.8),
    ("awesome", 3.1), ("beautiful", 2.9), ("benefit", 2.0), ("benefits", 1.6), ("best", 3.2),
    ("better", 1.9), ("boost", 1.7), ("breakthrough", 2.1), ("bright", 1.9), ("calm", 1.3),
    ("celebrate", 2.7), ("celebrates", 2.7), ("champion", 2.9), ("cheer", 2.3), ("confident", 2.2),
    ("cure", 2.1), ("delight", 2.9), ("easy", 1.9), ("effective", 2.1), ("encourage", 2.3),
    ("enjoy", 2.2), ("excellent", 2.7), ("excited", 1.4), ("exciting", 2.2), ("fair", 1.3),
    ("fantastic", 2.6), ("favorite", 2.0), ("free", 2.3), ("fun", 2.3), ("gain", 2.0),
    ("gains", 1.8), ("generous", 2.3), ("glad", 2.0), ("good", 1.9), ("great", 3.1),
    ("grow", 1.5), ("growth", 1.6), ("happy", 2.7), ("heal", 1.7), ("healthy", 1.7),
    ("help", 1.7), ("helps", 1.6), ("hero", 2.6), ("hope", 1.9), ("hopeful", 2.3),
    ("impressive", 2.3), ("improve", 1.9), ("improved", 2.1), ("improvement", 2.0), ("innovative", 1.9),
    ("inspiring", 2.5), ("interesting", 1.7), ("joy", 2.8), ("kind", 2.4), ("like", 1.5),
    ("love", 3.2), ("loved", 2.9), ("lucky", 1.8), ("nice", 1.8), ("optimistic", 1.3),
    ("outstanding", 3.0), ("peace", 2.5), ("perfect", 2.7), ("pleased", 1.9), ("popular", 1.8),
    ("positive", 2.6), ("praise", 2.6), ("profit", 1.9), ("profits", 1.9), ("progress", 1.8),
    ("promising", 1.7), ("protect", 1.6), ("proud", 2.1), ("rally", 1.3), ("record", 0.6),
    ("recover", 1.5), ("recovery", 1.4), ("relief", 2.1), ("rescue", 1.5), ("rescued", 1.8),
    ("safe", 1.9), ("save", 2.2), ("saved", 1.8), ("secure", 1.4), ("smart", 1.7),
    ("solution", 1.3), ("strong", 2.3), ("stronger", 1.6), ("success", 2.7), ("successful", 2.8),
    ("support", 1.7), ("supports", 1.5), ("surge", 1.2), ("thrilled", 2.4), ("top", 0.8),
    ("triumph", 2.8), ("trust", 2.3), ("upbeat", 1.9), ("victory", 2.8), ("welcome", 2.0),
    ("win", 2.8), ("winner", 2.8), ("winning", 2.4), ("wins", 2.7), ("won", 2.7),
    ("wonderful", 2.7),
    ("award", 2.5), ("awarded", 1.7), ("awards", 2.0), ("brilliant", 2.8), ("celebrated", 2.7),
    ("celebration", 2.7), ("charity", 1.8), ("cheerful", 2.5), ("comeback", 1.3),
    ("congratulations", 2.9), ("delighted", 2.6), ("eager", 1.5), ("excellence", 3.1),
    ("fabulous", 2.4), ("gift", 1.9), ("honor", 2.2), ("honored", 2.8), ("innovation", 1.8),
    ("joyful", 2.9), ("milestone", 1.6), ("optimism", 2.5), ("prize", 2.3), ("prosperity", 2.8),
    ("rebound", 1.2), ("reward", 2.1), ("rewarding", 2.4), ("safety", 1.8), ("smile", 1.5),
    ("soar", 1.7), ("soaring", 1.8), ("strength", 2.2), ("thrive", 2.0), ("thriving", 2.4),
    // negative
    ("abuse", -3.2), ("accident", -2.1), ("accused", -1.9), ("afraid", -2.2), ("alarm", -1.4),
    ("anger", -2.7), ("angry", -2.3), ("arrest", -1.4), ("arrested", -2.1), ("attack", -2.1),
    ("attacks", -1.6), ("bad", -2.5), ("ban", -2.6), ("bankrupt", -2.6), ("bankruptcy", -2.6),
    ("battle", -1.6), ("blame", -1.4), ("bomb", -2.2), ("broken", -2.1), ("catastrophe", -3.4),
    ("collapse", -2.2), ("concern", -0.7), ("concerns", -1.2), ("conflict", -1.3), ("crash", -1.7),
    ("crime", -2.5), ("crisis", -3.1), ("critical", -1.3), ("cut", -1.1), ("cuts", -1.2),
    ("damage", -2.2), ("danger", -2.4), ("dangerous", -2.1), ("dead", -3.3), ("death", -2.9),
    ("decline", -1.1), ("defeat", -2.0), ("delay", -1.3), ("deny", -0.4), ("destroy", -2.5),
    ("destroyed", -3.1), ("difficult", -1.5), ("disaster", -3.1), ("disease", -2.1), ("dispute", -1.7),
    ("drop", -1.1), ("emergency", -1.6), ("fail", -2.5), ("failed", -2.3), ("failure", -2.3),
    ("fall", -1.0), ("fear", -2.2), ("fears", -1.8), ("fight", -1.6), ("fire", -1.4),
    ("flood", -1.3), ("fraud", -2.8), ("hate", -2.7), ("hurt", -2.4), ("ill", -1.8),
    ("illegal", -2.6), ("injured", -1.7), ("killed", -3.5), ("kills", -2.5), ("lawsuit", -0.9),
    ("lose", -1.6), ("loses", -1.3), ("loss", -1.3), ("losses", -1.7), ("lost", -1.3),
    ("murder", -3.7), ("negative", -2.7), ("outbreak", -1.5), ("pain", -2.3), ("panic", -2.3),
    ("plunge", -1.3), ("poor", -2.1), ("problem", -1.7), ("problems", -1.7), ("protest", -1.0),
    ("recession", -2.0), ("risk", -1.1), ("risks", -1.1), ("sad", -2.1), ("scandal", -1.9),
    ("scare", -2.2), ("shooting", -2.0), ("shortage", -1.5), ("sick", -2.3), ("slump", -1.7),
    ("strike", -1.2), ("struggle", -1.5), ("suffer", -2.5), ("terrible", -2.1), ("terror", -2.8),
    ("threat", -2.4), ("threatens", -1.9), ("tragedy", -3.4), ("trouble", -1.7), ("violence", -3.1),
    ("war", -2.9), ("warning", -1.4), ("weak", -1.9), ("worried", -1.2), ("worry", -1.9),
    ("worse", -2.1), ("worst", -3.1), ("wrong", -2.1),
    ("abandon", -1.9), ("allegations", -1.1), ("assault", -2.8), ("bleak", -2.1), ("bloody", -1.9),
    ("chaos", -2.7), ("condemn", -1.6), ("corrupt", -3.0), ("corruption", -2.7), ("criticism", -1.9),
    ("criticized", -1.4), ("cruel", -2.8), ("deadly", -2.8), ("deaths", -2.9), ("destruction", -2.7),
    ("devastate", -3.1), ("devastated", -3.1), ("devastates", -2.8), ("devastating", -3.3),
    ("die", -2.9), ("died", -2.6), ("dies", -2.9), ("dying", -2.9), ("disappointed", -1.9),
    ("disappointing", -2.2), ("evil", -3.4), ("explosion", -1.6), ("fatal", -2.5),
    ("fatalities", -2.6), ("fired", -2.0), ("fighting", -1.5), ("grief", -2.2), ("guilty", -1.8),
    ("hostage", -2.8), ("hostile", -1.6), ("injure", -2.1), ("injuries", -1.7), ("injury", -1.8),
    ("kill", -3.7), ("killing", -3.4), ("killings", -3.5), ("layoffs", -1.6), ("lies", -1.8),
    ("missing", -1.2), ("mourn", -1.9), ("mourning", -1.9), ("outrage", -2.3), ("pandemic", -1.8),
    ("poverty", -2.3), ("prison", -2.3), ("racism", -3.1), ("rape", -3.7), ("riot", -2.6),
    ("sanctions", -0.9), ("scam", -2.7), ("shock", -1.6), ("shocked", -1.3), ("stabbed", -2.8),
    ("steal", -2.3), ("stolen", -2.2), ("sue", -1.1), ("sued", -1.1), ("suicide", -3.5),
    ("tension", -1.3), ("toxic", -2.4), ("unemployment", -1.9), ("upset", -1.6), ("victim", -2.3),
    ("victims", -2.0), ("violent", -2.9), ("wildfire", -1.6), ("wounded", -2.3),
];

const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", BOOST_INCR), ("completely", BOOST_INCR), ("considerably", BOOST_INCR),
    ("deeply", BOOST_INCR), ("enormously", BOOST_INCR), ("entirely", BOOST_INCR),
    ("especially", BOOST_INCR), ("exceptionally", BOOST_INCR), ("extremely", BOOST_INCR),
    ("greatly", BOOST_INCR), ("highly", BOOST_INCR), ("hugely", BOOST_INCR),
    ("incredibly", BOOST_INCR), ("intensely", BOOST_INCR), ("majorly", BOOST_INCR),
    ("more", BOOST_INCR), ("most", BOOST_INCR), ("particularly", BOOST_INCR),
    ("really", BOOST_INCR), ("remarkably", BOOST_INCR), ("so", BOOST_INCR),
    ("substantially", BOOST_INCR), ("thoroughly", BOOST_INCR), ("totally", BOOST_INCR),
    ("tremendously", BOOST_INCR), ("very", BOOST_INCR),
    ("almost", BOOST_DECR), ("barely", BOOST_DECR), ("hardly", BOOST_DECR),
    ("less", BOOST_DECR), ("little", BOOST_DECR), ("marginally", BOOST_DECR),
    ("occasionally", BOOST_DECR), ("partly", BOOST_DECR), ("scarcely", BOOST_DECR),
    ("slightly", BOOST_DECR), ("somewhat", BOOST_DECR),
];

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "dont",
    "hadnt", "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither", "never", "no",
    "nobody", "none", "nope", "nor", "not", "nothing", "nowhere", "shouldnt", "wasnt",
    "werent", "without", "wont", "wouldnt",
];

pub struct LexiconScorer {
    valences: HashMap<&'static str, f64>,
    boosters: HashMap<&'static str, f64>,
    negations: HashSet<&'static str>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LexiconScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LexiconScorer")
            .field("valences", &self.valences.len())
            .field("boosters", &self.boosters.len())
            .finish()
    }
}

struct Token<'a> {
    raw: &'a str,
    lower: String,
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            valences: VALENCES.iter().copied().collect(),
            boosters: BOOSTERS.iter().copied().collect(),
            negations: NEGATIONS.iter().copied().collect(),
        }
    }

    /// Adds or replaces a word's valence.
    pub fn with_word(mut self, word: &'static str, valence: f64) -> Self {
        self.valences.insert(word, valence);
        self
    }

    /// Valence of a word, falling back to its base form for regular
    /// inflections (`soars`, `feared`, `crashing`, `injuries`).
    fn lookup(&self, word: &str) -> Option<f64> {
        if let Some(&valence) = self.valences.get(word) {
            return Some(valence);
        }
        Self::base_forms(word)
            .iter()
            .find_map(|base| self.valences.get(base.as_str()).copied())
    }

    fn base_forms(word: &str) -> Vec<String> {
        let mut forms = Vec::new();
        let mut push = |stem: &str, suffix: &str| {
            if stem.chars().count() >= 3 {
                forms.push(format!("{}{}", stem, suffix));
            }
        };
        let undouble = |stem: &str| -> Option<String> {
            let mut chars = stem.chars().rev();
            match (chars.next(), chars.next()) {
                (Some(a), Some(b)) if a == b && !"aeiou".contains(a) => {
                    Some(stem[..stem.len() - a.len_utf8()].to_string())
                }
                _ => None,
            }
        };

        if let Some(stem) = word.strip_suffix("ies") {
            push(stem, "y");
        } else if let Some(stem) = word.strip_suffix("es") {
            push(stem, "");
            push(&word[..word.len() - 1], "");
        } else if let Some(stem) = word.strip_suffix('s').filter(|_| !word.ends_with("ss")) {
            push(stem, "");
        }

        if let Some(stem) = word.strip_suffix("ied") {
            push(stem, "y");
        } else if let Some(stem) = word.strip_suffix("ed") {
            push(stem, "");
            push(&word[..word.len() - 1], "");
            if let Some(single) = undouble(stem) {
                push(&single, "");
            }
        }

        if let Some(stem) = word.strip_suffix("ing") {
            push(stem, "");
            push(stem, "e");
            if let Some(single) = undouble(stem) {
                push(&single, "");
            }
        }
        forms
    }

    fn tokenize(text: &str) -> Vec<Token<'_>> {
        text.split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\''))
            .filter(|w| w.chars().count() > 1)
            .map(|raw| Token {
                raw,
                lower: raw.to_lowercase().replace('\'', ""),
            })
            .collect()
    }

    fn is_shouting(word: &str) -> bool {
        word.chars().any(char::is_alphabetic) && !word.chars().any(char::is_lowercase)
    }

    fn is_negated(&self, token: &Token<'_>) -> bool {
        self.negations.contains(token.lower.as_str()) || token.raw.to_lowercase().contains("n't")
    }

    fn booster(&self, token: &Token<'_>, valence: f64, mixed_case: bool) -> f64 {
        let Some(&scalar) = self.boosters.get(token.lower.as_str()) else {
            return 0.0;
        };
        let mut scalar = if valence < 0.0 { -scalar } else { scalar };
        if mixed_case && Self::is_shouting(token.raw) {
            scalar += if valence > 0.0 { CAPS_INCR } else { -CAPS_INCR };
        }
        scalar
    }

    fn valence_at(&self, tokens: &[Token<'_>], i: usize, mixed_case: bool) -> f64 {
        let token = &tokens[i];
        if self.boosters.contains_key(token.lower.as_str()) {
            return 0.0;
        }
        let Some(base) = self.lookup(&token.lower) else {
            return 0.0;
        };

        let mut valence = base;
        if mixed_case && Self::is_shouting(token.raw) {
            valence += if valence > 0.0 { CAPS_INCR } else { -CAPS_INCR };
        }

        for distance in 1..=3 {
            if i < distance {
                break;
            }
            let previous = &tokens[i - distance];
            if self.lookup(&previous.lower).is_some() {
                continue;
            }
            let damping = match distance {
                1 => 1.0,
                2 => 0.95,
                _ => 0.9,
            };
            valence += self.booster(previous, valence, mixed_case) * damping;
            if self.is_negated(previous) {
                valence *= NEGATION_SCALAR;
            }
        }
        valence
    }

    fn apply_but(tokens: &[Token<'_>], valences: &mut [f64]) {
        let Some(pivot) = tokens.iter().position(|t| t.lower == "but") else {
            return;
        };
        for (i, v) in valences.iter_mut().enumerate() {
            if i < pivot {
                *v *= 0.5;
            } else if i > pivot {
                *v *= 1.5;
            }
        }
    }

    fn punctuation_emphasis(text: &str) -> f64 {
        let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
        exclamations as f64 * EXCLAMATION_INCR
    }

    fn normalize(sum: f64) -> f64 {
        let score = sum / (sum * sum + NORMALIZATION_ALPHA).sqrt();
        score.clamp(-1.0, 1.0)
    }
}

impl PolarityScorer for LexiconScorer {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn compound(&self, text: &str) -> f64 {
        let tokens = Self::tokenize(text);
        if tokens.is_empty() {
            return 0.0;
        }

        let shouting = tokens.iter().filter(|t| Self::is_shouting(t.raw)).count();
        let mixed_case = shouting > 0 && shouting < tokens.len();

        let mut valences: Vec<f64> = (0..tokens.len())
            .map(|i| self.valence_at(&tokens, i, mixed_case))
            .collect();
        Self::apply_but(&tokens, &mut valences);

        let mut sum: f64 = valences.iter().sum();
        if sum == 0.0 {
            return 0.0;
        }
        let emphasis = Self::punctuation_emphasis(text);
        sum += if sum > 0.0 { emphasis } else { -emphasis };
        Self::normalize(sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_text() {
        let scorer = LexiconScorer::new();
        assert_eq!(scorer.compound(""), 0.0);
        assert_eq!(scorer.compound("   "), 0.0);
        assert_eq!(scorer.compound("No description available"), 0.0);
        assert_eq!(scorer.compound("The committee meets on Tuesday."), 0.0);
    }

    #[test]
    fn test_polarity() {
        let scorer = LexiconScorer::new();
        assert!(scorer.compound("The team won a great victory") > 0.05);
        assert!(scorer.compound("Markets crash amid recession fears") < -0.05);
    }

    #[test]
    fn test_single_word_normalization() {
        let scorer = LexiconScorer::new();
        let expected = 1.9 / (1.9f64 * 1.9 + 15.0).sqrt();
        assert!((scorer.compound("The movie is good") - expected).abs() < 1e-9);
    }

    #[test]
    fn test_negation_flips_valence() {
        let scorer = LexiconScorer::new();
        assert!(scorer.compound("The movie is not good") < 0.0);
        assert!(scorer.compound("The outlook isn't bad") > 0.0);
    }

    #[test]
    fn test_boosters_and_caps() {
        let scorer = LexiconScorer::new();
        let plain = scorer.compound("good results");
        assert!(scorer.compound("very good results") > plain);
        assert!(scorer.compound("slightly good results") < plain);
        assert!(scorer.compound("GOOD results") > plain);
        assert!(scorer.compound("good results!!") > plain);
    }

    #[test]
    fn test_but_shifts_weight() {
        let scorer = LexiconScorer::new();
        assert!(scorer.compound("The food was good but the service was terrible") < 0.0);
    }

    #[test]
    fn test_compound_is_bounded() {
        let scorer = LexiconScorer::new();
        let text = "amazing awesome best great love wonderful outstanding perfect!!!!";
        let score = scorer.compound(text);
        assert!(score > 0.9 && score <= 1.0);
    }

    #[test]
    fn test_headline_vocabulary() {
        let scorer = LexiconScorer::new();
        for headline in [
            "Three people died in the storm",
            "Police kill suspect",
            "Earthquake deaths rise to 40",
            "Hurricane devastates coastal towns",
            "Two injuries reported after bridge collapse",
            "Retailer sued over data leak",
        ] {
            assert!(scorer.compound(headline) < -0.05, "{}", headline);
        }
        for headline in [
            "Stocks soar to all-time high",
            "Local bakery wins national award",
            "Economy rebounds as hiring improves",
        ] {
            assert!(scorer.compound(headline) > 0.05, "{}", headline);
        }
    }

    #[test]
    fn test_inflected_forms() {
        let scorer = LexiconScorer::new();
        assert_eq!(scorer.lookup("soars"), Some(1.7));
        assert_eq!(scorer.lookup("soared"), Some(1.7));
        assert_eq!(scorer.lookup("feared"), Some(-2.2));
        assert_eq!(scorer.lookup("plunged"), Some(-1.3));
        assert_eq!(scorer.lookup("crashes"), Some(-1.7));
        assert_eq!(scorer.lookup("crashing"), Some(-1.7));
        assert_eq!(scorer.lookup("cutting"), Some(-1.1));
        assert_eq!(scorer.lookup("tragedies"), Some(-3.4));
        assert_eq!(scorer.lookup("available"), None);
        assert_eq!(scorer.lookup("description"), None);
        assert_eq!(scorer.lookup("news"), None);
    }

    #[test]
    fn test_custom_word() {
        let scorer = LexiconScorer::new().with_word("bullish", 2.0);
        assert!(scorer.compound("Analysts are bullish") > 0.05);
    }
}
