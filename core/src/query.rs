use crate::error::QueryError;
use crate::index::Index;
use crate::record::{preview_overview, resolve_poster, round_score, Recommendation};

pub const DEFAULT_K: usize = 5;

/// Top `k` records most similar to `title`, the queried record excluded.
///
/// Ranking is by reported score (three decimals) descending, ties by ascending
/// corpus position. A corpus smaller than `k + 1` yields what is available.
pub fn recommend(index: &Index, title: &str, k: usize) -> Result<Vec<Recommendation>, QueryError> {
    let pos = index.position_of(title).ok_or_else(|| QueryError::NotFound(title.to_string()))?;
    let row = index.matrix().row(pos).ok_or_else(|| QueryError::NotFound(title.to_string()))?;

    let mut scored: Vec<(usize, f64)> = row
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != pos)
        .map(|(j, s)| (j, round_score(*s)))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    scored.truncate(k);

    let results = scored
        .into_iter()
        .filter_map(|(j, score)| {
            index.record(j).map(|r| Recommendation {
                title: r.title.clone(),
                overview: preview_overview(&r.overview),
                poster_url: resolve_poster(r.poster_url.as_deref()),
                similarity_score: score,
            })
        })
        .collect();
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::BuildOptions;
    use crate::record::{MovieRecord, PLACEHOLDER_POSTER};

    fn index_of(records: &[(&str, &str)]) -> Index {
        let records: Vec<MovieRecord> = records.iter().map(|(t, o)| MovieRecord::new(*t, *o, None)).collect();
        Index::build(&records, &BuildOptions::default()).unwrap()
    }

    #[test]
    fn equal_scores_keep_corpus_order() {
        let index = index_of(&[
            ("Query", "dragon knight"),
            ("Late", "dragon castle"),
            ("Early", "dragon castle"),
            ("Other", "tax accountant"),
        ]);
        let recs = recommend(&index, "query", 3).unwrap();
        let titles: Vec<&str> = recs.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Late", "Early", "Other"]);
        assert_eq!(recs[0].similarity_score, recs[1].similarity_score);
        assert_eq!(recs[2].similarity_score, 0.0);
        assert_eq!(recs[2].poster_url, PLACEHOLDER_POSTER);
    }

    #[test]
    fn zero_k_returns_nothing() {
        let index = index_of(&[("A", "robot uprising"), ("B", "robot love")]);
        assert!(recommend(&index, "A", 0).unwrap().is_empty());
    }

    #[test]
    fn single_record_corpus_returns_empty() {
        let index = index_of(&[("Solo", "lonely astronaut")]);
        assert!(recommend(&index, "solo", DEFAULT_K).unwrap().is_empty());
    }

    #[test]
    fn unknown_title_is_not_found() {
        let index = index_of(&[("A", "robot uprising")]);
        assert_eq!(recommend(&index, "B", 5), Err(QueryError::NotFound("B".into())));
    }
}
