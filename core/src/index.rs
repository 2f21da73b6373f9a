use crate::error::BuildError;
use crate::record::MovieRecord;
use crate::similarity::SimilarityMatrix;
use crate::tokenizer::{StopWords, Tokenizer};
use crate::vectorizer::{fit_transform, VectorizerOptions, Vocabulary};
use std::collections::HashMap;
use std::time::Instant;

pub const DEFAULT_MAX_FEATURES: usize = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    pub stop_words: StopWords,
    pub max_features: usize,
    pub stemming: bool,
    /// Use 1 + ln(tf) instead of the raw term count.
    pub sublinear_tf: bool,
    /// Use ln((1 + N) / (1 + df)) + 1 instead of ln(N / df) + 1.
    pub smooth_idf: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            stop_words: StopWords::English,
            max_features: DEFAULT_MAX_FEATURES,
            stemming: false,
            sublinear_tf: false,
            smooth_idf: true,
        }
    }
}

/// Immutable similarity structure over one corpus snapshot.
///
/// Position i is record i and matrix row/column i; nothing here is
/// mutated after [`Index::build`] returns, so an `Index` can be shared freely
/// behind an `Arc`.
#[derive(Debug)]
pub struct Index {
    records: Vec<MovieRecord>,
    vocabulary: Vocabulary,
    matrix: SimilarityMatrix,
    titles: HashMap<String, usize>,
}

impl Index {
    pub fn build(records: &[MovieRecord], options: &BuildOptions) -> Result<Self, BuildError> {
        if records.is_empty() {
            return Err(BuildError::EmptyCorpus);
        }
        if options.max_features == 0 {
            return Err(BuildError::InvalidOptions("max_features must be at least 1".into()));
        }
        let start = Instant::now();

        let opts = VectorizerOptions {
            tokenizer: Tokenizer::new(options.stop_words, options.stemming),
            max_features: options.max_features,
            sublinear_tf: options.sublinear_tf,
            smooth_idf: options.smooth_idf,
        };
        let docs: Vec<&str> = records.iter().map(|r| r.overview.as_str()).collect();
        let (vocabulary, vectors) = fit_transform(&docs, &opts)?;

        let matrix = SimilarityMatrix::from_vectors(&vectors);
        tracing::debug!(rows = matrix.len(), "similarity matrix computed");

        let mut titles: HashMap<String, usize> = HashMap::with_capacity(records.len());
        for (pos, r) in records.iter().enumerate() {
            // first in corpus order wins for duplicate titles
            titles.entry(normalize_title(&r.title)).or_insert(pos);
        }

        tracing::info!(
            movies = records.len(),
            vocabulary = vocabulary.len(),
            took_ms = start.elapsed().as_millis() as u64,
            "index built"
        );
        Ok(Self { records: records.to_vec(), vocabulary, matrix, titles })
    }

    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
    pub fn records(&self) -> &[MovieRecord] { &self.records }
    pub fn record(&self, pos: usize) -> Option<&MovieRecord> { self.records.get(pos) }
    pub fn vocabulary(&self) -> &Vocabulary { &self.vocabulary }
    pub fn matrix(&self) -> &SimilarityMatrix { &self.matrix }

    /// Corpus position of the first record whose title matches case-insensitively.
    pub fn position_of(&self, title: &str) -> Option<usize> {
        self.titles.get(&normalize_title(title)).copied()
    }

    /// All titles, sorted for display.
    pub fn sorted_titles(&self) -> Vec<&str> {
        let mut titles: Vec<&str> = self.records.iter().map(|r| r.title.as_str()).collect();
        titles.sort_unstable();
        titles
    }
}

/// Convenience wrapper over [`Index::build`].
pub fn build(records: &[MovieRecord], options: &BuildOptions) -> Result<Index, BuildError> {
    Index::build(records, options)
}

fn normalize_title(title: &str) -> String {
    title.to_lowercase()
}
