//! TF-IDF vectorization over a small in-memory corpus
//!
//! Tokens are runs of two or more word characters, lowercased, with English
//! stop words removed before n-grams are built. Document frequency pruning
//! (`max_df`, as a fraction of the corpus) happens before the vocabulary is
//! capped to the `max_features` most frequent terms. Weights use smoothed
//! idf, `ln((1 + n) / (1 + df)) + 1`, on raw counts, and every row is L2
//! normalized.

use crate::error::{Result, ResumeMatcherError};
use crate::processing::text_processor::TextProcessor;
use regex::Regex;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

pub struct TfidfVectorizer {
    token_pattern: Regex,
    processor: TextProcessor,
    max_features: usize,
    max_df: f64,
    ngram_max: usize,
}

/// Dense document-term matrix with its vocabulary.
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    pub vocabulary: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl TfidfVectorizer {
    pub fn new(max_features: usize, max_df: f64, ngram_max: usize) -> Result<Self> {
        Ok(Self {
            token_pattern: Regex::new(r"\w\w+")?,
            processor: TextProcessor::new(),
            max_features,
            max_df,
            ngram_max: ngram_max.max(1),
        })
    }

    /// Unigrams through `ngram_max`-grams of the filtered token stream.
    fn analyze(&self, document: &str) -> Vec<String> {
        let lowered = document.to_lowercase();
        let tokens: Vec<&str> = self
            .token_pattern
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|t| !self.processor.is_stop_word(t))
            .collect();

        let mut terms = Vec::new();
        for n in 1..=self.ngram_max {
            if tokens.len() < n {
                break;
            }
            terms.extend(tokens.windows(n).map(|w| w.join(" ")));
        }
        terms
    }

    pub fn fit_transform(&self, documents: &[&str]) -> Result<TfidfMatrix> {
        let counts: Vec<HashMap<String, usize>> = documents
            .iter()
            .map(|doc| {
                let mut tf = HashMap::new();
                for term in self.analyze(doc) {
                    *tf.entry(term).or_insert(0) += 1;
                }
                tf
            })
            .collect();

        // BTreeMap keeps terms alphabetical, which settles frequency ties.
        let mut df: BTreeMap<&str, usize> = BTreeMap::new();
        let mut corpus_tf: HashMap<&str, usize> = HashMap::new();
        for doc in &counts {
            for (term, count) in doc {
                *df.entry(term.as_str()).or_insert(0) += 1;
                *corpus_tf.entry(term.as_str()).or_insert(0) += count;
            }
        }

        if df.is_empty() {
            return Err(ResumeMatcherError::Similarity(
                "empty vocabulary; documents contain only stop words".to_string(),
            ));
        }

        let n_docs = documents.len();
        let max_doc_count = self.max_df * n_docs as f64;
        let mut kept: Vec<(&str, usize, usize)> = df
            .iter()
            .filter(|(_, d)| **d as f64 <= max_doc_count)
            .map(|(term, &d)| (*term, d, corpus_tf.get(term).copied().unwrap_or(0)))
            .collect();

        if kept.is_empty() {
            return Err(ResumeMatcherError::Similarity(
                "after pruning, no terms remain".to_string(),
            ));
        }

        if kept.len() > self.max_features {
            // Stable sort keeps alphabetical order among equal frequencies.
            kept.sort_by(|a, b| b.2.cmp(&a.2));
            kept.truncate(self.max_features);
            kept.sort_by(|a, b| a.0.cmp(b.0));
        }

        let vocabulary: Vec<String> = kept.iter().map(|(t, _, _)| t.to_string()).collect();
        let idf: Vec<f64> = kept
            .iter()
            .map(|(_, d, _)| ((1.0 + n_docs as f64) / (1.0 + *d as f64)).ln() + 1.0)
            .collect();

        let rows = counts
            .iter()
            .map(|doc| {
                let mut row: Vec<f64> = vocabulary
                    .iter()
                    .zip(&idf)
                    .map(|(term, w)| doc.get(term).copied().unwrap_or(0) as f64 * w)
                    .collect();
                let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
                if norm > 0.0 {
                    row.iter_mut().for_each(|v| *v /= norm);
                }
                row
            })
            .collect();

        Ok(TfidfMatrix { vocabulary, rows })
    }
}

/// Cosine of two equal-length vectors; 0 when either is all zeros.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    match (norm_a * norm_b).partial_cmp(&0.0) {
        Some(Ordering::Greater) => dot / (norm_a * norm_b),
        _ => 0.0,
    }
}
