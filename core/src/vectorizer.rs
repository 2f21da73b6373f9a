use crate::error::VectorizationError;
use crate::tokenizer::Tokenizer;
use rayon::prelude::*;
use std::collections::HashMap;

pub type TermId = u32;

/// Sparse TF-IDF vector: (term id, weight) pairs sorted by term id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVector {
    pub entries: Vec<(TermId, f32)>,
}

impl TermVector {
    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|(_, w)| *w == 0.0)
    }

    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt()
    }

    /// Merge-join dot product; both sides are sorted by term id.
    pub fn dot(&self, other: &TermVector) -> f32 {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0f32;
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// Bounded, lexicographically ordered vocabulary; a term's id is its position.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    pub terms: Vec<String>,
    pub dictionary: HashMap<String, TermId>,
    pub df: Vec<u32>,
    pub idf: Vec<f32>,
}

impl Vocabulary {
    pub fn len(&self) -> usize { self.terms.len() }
    pub fn is_empty(&self) -> bool { self.terms.is_empty() }
    pub fn term_id(&self, term: &str) -> Option<TermId> { self.dictionary.get(term).copied() }
}

#[derive(Debug, Clone, Copy)]
pub struct VectorizerOptions {
    pub tokenizer: Tokenizer,
    pub max_features: usize,
    pub sublinear_tf: bool,
    pub smooth_idf: bool,
}

/// Fit a vocabulary over `docs` and produce one L2-normalized vector per document.
pub fn fit_transform(docs: &[&str], opts: &VectorizerOptions) -> Result<(Vocabulary, Vec<TermVector>), VectorizationError> {
    let tokenized: Vec<Vec<String>> = docs.par_iter().map(|d| opts.tokenizer.tokenize(d)).collect();

    // Corpus-wide counts drive the max_features cut.
    let mut corpus_tf: HashMap<&str, u64> = HashMap::new();
    for tokens in &tokenized {
        for t in tokens {
            *corpus_tf.entry(t.as_str()).or_insert(0) += 1;
        }
    }
    if corpus_tf.is_empty() {
        return Err(VectorizationError::EmptyVocabulary);
    }

    let mut ranked: Vec<(&str, u64)> = corpus_tf.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(opts.max_features);
    let mut terms: Vec<String> = ranked.into_iter().map(|(t, _)| t.to_string()).collect();
    terms.sort();
    let dictionary: HashMap<String, TermId> = terms.iter().enumerate().map(|(i, t)| (t.clone(), i as TermId)).collect();

    let counts: Vec<HashMap<TermId, u32>> = tokenized
        .par_iter()
        .map(|tokens| {
            let mut tf_counts: HashMap<TermId, u32> = HashMap::new();
            for t in tokens {
                if let Some(&tid) = dictionary.get(t) {
                    *tf_counts.entry(tid).or_insert(0) += 1;
                }
            }
            tf_counts
        })
        .collect();

    let mut df = vec![0u32; terms.len()];
    for tf_counts in &counts {
        for tid in tf_counts.keys() {
            df[*tid as usize] += 1;
        }
    }

    let n = docs.len() as f32;
    let idf: Vec<f32> = df
        .iter()
        .map(|&df_t| {
            let df_t = df_t as f32;
            if opts.smooth_idf { ((1.0 + n) / (1.0 + df_t)).ln() + 1.0 } else { (n / df_t.max(1.0)).ln() + 1.0 }
        })
        .collect();

    let vectors: Vec<TermVector> = counts
        .into_par_iter()
        .map(|tf_counts| weigh(tf_counts, &idf, opts.sublinear_tf))
        .collect();

    tracing::debug!(terms = terms.len(), docs = docs.len(), "vocabulary fitted");
    Ok((Vocabulary { terms, dictionary, df, idf }, vectors))
}

fn weigh(tf_counts: HashMap<TermId, u32>, idf: &[f32], sublinear_tf: bool) -> TermVector {
    let mut entries: Vec<(TermId, f32)> = tf_counts
        .into_iter()
        .map(|(tid, tf_raw)| {
            let tf = if sublinear_tf { 1.0 + (tf_raw as f32).ln() } else { tf_raw as f32 };
            (tid, tf * idf[tid as usize])
        })
        .collect();
    entries.sort_by_key(|(tid, _)| *tid);

    let norm = entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
    if norm > 0.0 {
        for (_, w) in entries.iter_mut() { *w /= norm; }
    }
    TermVector { entries }
}
