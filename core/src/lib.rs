//! Content-based movie recommendations: TF-IDF vectors over plot overviews,
//! a pairwise cosine similarity matrix, and top-K lookup by title.

pub mod dataset;
pub mod error;
pub mod handle;
pub mod index;
pub mod query;
pub mod record;
pub mod similarity;
pub mod tokenizer;
pub mod vectorizer;

pub use dataset::{load_csv, Dataset, LoadReport};
pub use error::{BuildError, DatasetError, QueryError, VectorizationError};
pub use handle::IndexHandle;
pub use index::{build, BuildOptions, Index, DEFAULT_MAX_FEATURES};
pub use query::{recommend, DEFAULT_K};
pub use record::{MovieRecord, Recommendation, PLACEHOLDER_POSTER};
pub use similarity::SimilarityMatrix;
pub use tokenizer::StopWords;
pub use vectorizer::{TermId, TermVector, Vocabulary};
