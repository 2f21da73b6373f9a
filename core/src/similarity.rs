use crate::vectorizer::TermVector;
use rayon::prelude::*;

/// Dense, row-major N×N cosine similarity matrix addressed by corpus position.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    n: usize,
    data: Vec<f32>,
}

impl SimilarityMatrix {
    /// Pairwise cosine similarity; rows are filled in parallel.
    pub fn from_vectors(vectors: &[TermVector]) -> Self {
        let n = vectors.len();
        let norms: Vec<f32> = vectors.iter().map(TermVector::norm).collect();
        let mut data = vec![0.0f32; n * n];
        if n > 0 {
            data.par_chunks_mut(n).enumerate().for_each(|(i, row)| {
                for (j, cell) in row.iter_mut().enumerate() {
                    *cell = if i == j {
                        if norms[i] > 0.0 { 1.0 } else { 0.0 }
                    } else {
                        cosine(&vectors[i], norms[i], &vectors[j], norms[j])
                    };
                }
            });
        }
        Self { n, data }
    }

    pub fn len(&self) -> usize { self.n }
    pub fn is_empty(&self) -> bool { self.n == 0 }

    pub fn row(&self, i: usize) -> Option<&[f32]> {
        if i >= self.n { return None; }
        Some(&self.data[i * self.n..(i + 1) * self.n])
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        self.row(i).and_then(|r| r.get(j).copied())
    }
}

/// Cosine similarity; 0 when either side is a zero vector.
fn cosine(a: &TermVector, norm_a: f32, b: &TermVector, norm_b: f32) -> f32 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    a.dot(b) / (norm_a * norm_b)
}
