//! Per-term contributions ranked into red and green flags.
//!
//! A term's contribution is its coefficient multiplied by its TF-IDF weight
//! in the document being explained. Positive contributions push the posting
//! toward fake (red flags), negative ones toward real (green flags).

use ahash::AHashSet;
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ml::classifier::ModelWeights;
use crate::ml::features::FeatureVector;
use crate::ml::vocabulary::Vocabulary;

/// Default number of flags reported per side.
pub const DEFAULT_TOP_N: usize = 10;

/// A term together with the magnitude of its contribution.
///
/// Serialized as a `[token, weight]` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Flag {
    pub token: String,
    pub weight: f64,
}

impl Flag {
    pub fn new<S: Into<String>>(token: S, weight: f64) -> Self {
        Flag {
            token: token.into(),
            weight,
        }
    }
}

impl Serialize for Flag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.token)?;
        tuple.serialize_element(&self.weight)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FlagVisitor;

        impl<'de> Visitor<'de> for FlagVisitor {
            type Value = Flag;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a [token, weight] pair")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Flag, A::Error> {
                let token: String = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let weight: f64 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                Ok(Flag { token, weight })
            }
        }

        deserializer.deserialize_tuple(2, FlagVisitor)
    }
}

/// Knobs for [`attribute`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttributionConfig {
    /// Maximum flags per side.
    pub top_n: usize,
    /// Contributions whose magnitude is not above this are dropped.
    pub min_weight: f64,
}

impl Default for AttributionConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            min_weight: 0.0,
        }
    }
}

/// Red and green flags of one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attribution {
    /// Terms pushing toward fake, strongest first.
    pub red_flags: Vec<Flag>,
    /// Terms pushing toward real, strongest first; weights are magnitudes.
    pub green_flags: Vec<Flag>,
}

/// Explain a prediction.
///
/// `terms` is the document's term sequence; each distinct in-vocabulary term
/// is considered once, in first-occurrence order, and ties in the ranking keep
/// that order. Terms unknown to the vocabulary are skipped.
pub fn attribute(
    terms: &[String],
    vocabulary: &Vocabulary,
    weights: &ModelWeights,
    features: &FeatureVector,
    config: &AttributionConfig,
) -> Attribution {
    let mut seen = AHashSet::with_capacity(terms.len());
    let mut red = Vec::new();
    let mut green = Vec::new();

    for term in terms {
        let Some(idx) = vocabulary.index_of(term) else {
            continue;
        };
        if !seen.insert(idx) {
            continue;
        }

        let contribution = weights.coefficient(idx).unwrap_or(0.0) * features.get(idx);
        if contribution.abs() <= config.min_weight {
            continue;
        }
        if contribution > 0.0 {
            red.push(Flag::new(term.as_str(), contribution));
        } else if contribution < 0.0 {
            green.push(Flag::new(term.as_str(), -contribution));
        }
    }

    // sort_by is stable
    red.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    green.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    red.truncate(config.top_n);
    green.truncate(config.top_n);

    Attribution {
        red_flags: red,
        green_flags: green,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::features::{extract, term_sequence};
    use crate::ml::vocabulary::NgramRange;

    fn strings(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn fixture() -> (Vocabulary, ModelWeights) {
        let vocab = Vocabulary::from_parts(
            NgramRange::default(),
            strings(&["benefits", "fee", "remote", "salary", "wire", "wire transfer"]),
            vec![1.0; 6],
        )
        .unwrap();
        let weights = ModelWeights::new(vec![-1.0, 2.0, 0.0, -3.0, 1.0, 4.0], 0.0).unwrap();
        (vocab, weights)
    }

    fn explain(text: &str, config: &AttributionConfig) -> Attribution {
        let (vocab, weights) = fixture();
        let tokens = strings(&text.split_whitespace().collect::<Vec<_>>());
        let terms = term_sequence(&tokens, vocab.ngram_range());
        let features = extract(&terms, &vocab);
        attribute(&terms, &vocab, &weights, &features, config)
    }

    #[test]
    fn test_flags_split_by_sign_and_sorted() {
        let result = explain("wire transfer fee salary benefits", &AttributionConfig::default());

        let red: Vec<&str> = result.red_flags.iter().map(|f| f.token.as_str()).collect();
        let green: Vec<&str> = result.green_flags.iter().map(|f| f.token.as_str()).collect();
        assert_eq!(red, vec!["wire transfer", "fee", "wire"]);
        assert_eq!(green, vec!["salary", "benefits"]);

        assert!(result.red_flags.iter().all(|f| f.weight > 0.0));
        assert!(result.green_flags.iter().all(|f| f.weight > 0.0));
        assert!(
            result
                .red_flags
                .windows(2)
                .all(|w| w[0].weight >= w[1].weight)
        );
    }

    #[test]
    fn test_zero_coefficient_is_not_a_flag() {
        let result = explain("remote remote", &AttributionConfig::default());
        assert!(result.red_flags.is_empty());
        assert!(result.green_flags.is_empty());
    }

    #[test]
    fn test_repeated_terms_reported_once() {
        let result = explain("fee fee fee wire", &AttributionConfig::default());
        assert_eq!(
            result.red_flags.iter().filter(|f| f.token == "fee").count(),
            1
        );
    }

    #[test]
    fn test_ties_keep_first_occurrence_order() {
        let vocab = Vocabulary::from_parts(
            NgramRange::unigrams(),
            strings(&["alpha", "beta", "gamma"]),
            vec![1.0; 3],
        )
        .unwrap();
        let weights = ModelWeights::new(vec![1.0, 1.0, 1.0], 0.0).unwrap();
        let terms = strings(&["gamma", "alpha", "beta"]);
        let features = extract(&terms, &vocab);
        let result = attribute(
            &terms,
            &vocab,
            &weights,
            &features,
            &AttributionConfig::default(),
        );
        let red: Vec<&str> = result.red_flags.iter().map(|f| f.token.as_str()).collect();
        assert_eq!(red, vec!["gamma", "alpha", "beta"]);
    }

    #[test]
    fn test_ties_follow_term_start_position() {
        let vocab = Vocabulary::from_parts(
            NgramRange::default(),
            strings(&["alpha beta", "zeta"]),
            vec![1.0; 2],
        )
        .unwrap();
        let weights = ModelWeights::new(vec![1.0, 1.0], 0.0).unwrap();
        let tokens = strings(&["alpha", "beta", "zeta"]);
        let terms = term_sequence(&tokens, vocab.ngram_range());
        let features = extract(&terms, &vocab);
        let result = attribute(
            &terms,
            &vocab,
            &weights,
            &features,
            &AttributionConfig::default(),
        );

        // the bigram starts at token 0, before "zeta" at token 2
        let red: Vec<&str> = result.red_flags.iter().map(|f| f.token.as_str()).collect();
        assert_eq!(red, vec!["alpha beta", "zeta"]);
        assert_eq!(result.red_flags[0].weight, result.red_flags[1].weight);
    }

    #[test]
    fn test_top_n_and_min_weight() {
        let config = AttributionConfig {
            top_n: 1,
            min_weight: 0.0,
        };
        let result = explain("wire transfer fee salary benefits", &config);
        assert_eq!(result.red_flags.len(), 1);
        assert_eq!(result.red_flags[0].token, "wire transfer");
        assert_eq!(result.green_flags.len(), 1);

        let config = AttributionConfig {
            top_n: 10,
            min_weight: 10.0,
        };
        let result = explain("wire transfer fee salary benefits", &config);
        assert!(result.red_flags.is_empty());
        assert!(result.green_flags.is_empty());
    }

    #[test]
    fn test_out_of_vocabulary_yields_no_flags() {
        let result = explain("completely unknown words", &AttributionConfig::default());
        assert_eq!(result, Attribution::default());
    }

    #[test]
    fn test_flag_serializes_as_pair() {
        let flag = Flag::new("wire transfer", 0.5);
        let json = serde_json::to_string(&flag).unwrap();
        assert_eq!(json, r#"["wire transfer",0.5]"#);

        let restored: Flag = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, flag);
        assert!(serde_json::from_str::<Flag>(r#"["only"]"#).is_err());
    }
}
