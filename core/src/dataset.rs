use crate::error::DatasetError;
use crate::record::MovieRecord;
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const TITLE_COLUMN: &str = "Title";
pub const OVERVIEW_COLUMN: &str = "Overview";
pub const POSTER_COLUMN: &str = "Poster_Url";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub total_rows: usize,
    pub kept: usize,
    pub dropped: usize,
}

/// Cleaned movie records in file order.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<MovieRecord>,
    pub report: LoadReport,
}

pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Dataset, DatasetError> {
    let f = File::open(path.as_ref())?;
    let dataset = from_reader(f)?;
    tracing::info!(
        path = %path.as_ref().display(),
        movies = dataset.report.kept,
        dropped = dataset.report.dropped,
        "dataset loaded"
    );
    Ok(dataset)
}

/// Parse CSV with `Title`, `Overview` and `Poster_Url` columns; rows missing a
/// title or overview are dropped.
pub fn from_reader<R: Read>(reader: R) -> Result<Dataset, DatasetError> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h.trim() == name);

    let (title_col, overview_col, poster_col) = match (column(TITLE_COLUMN), column(OVERVIEW_COLUMN), column(POSTER_COLUMN)) {
        (Some(t), Some(o), Some(p)) => (t, o, p),
        (t, o, p) => {
            let missing = [(TITLE_COLUMN, t), (OVERVIEW_COLUMN, o), (POSTER_COLUMN, p)]
                .iter()
                .filter(|(_, idx)| idx.is_none())
                .map(|(name, _)| name.to_string())
                .collect();
            return Err(DatasetError::MissingColumns(missing));
        }
    };

    let mut records = Vec::new();
    let mut total_rows = 0;
    for row in rdr.records() {
        let row = row?;
        total_rows += 1;
        let field = |idx: usize| row.get(idx).map(str::trim).filter(|s| !s.is_empty());
        let (Some(title), Some(overview)) = (field(title_col), field(overview_col)) else { continue };
        records.push(MovieRecord::new(title, overview, field(poster_col).map(str::to_string)));
    }

    if records.is_empty() {
        return Err(DatasetError::NoValidRecords);
    }
    let kept = records.len();
    Ok(Dataset { records, report: LoadReport { total_rows, kept, dropped: total_rows - kept } })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_rows_without_title_or_overview() {
        let csv = "Release_Date,Title,Overview,Poster_Url\n\
                   2010,Inception,A thief steals secrets through dreams,https://img/1.jpg\n\
                   2011,,No title here,\n\
                   2012,Blank,   ,\n\
                   2013,\"Up, Again\",\"An old man, a house, balloons\",\n";
        let ds = from_reader(csv.as_bytes()).unwrap();
        assert_eq!(ds.report, LoadReport { total_rows: 4, kept: 2, dropped: 2 });
        assert_eq!(ds.records[0].poster_url.as_deref(), Some("https://img/1.jpg"));
        assert_eq!(ds.records[1].title, "Up, Again");
        assert_eq!(ds.records[1].poster_url, None);
    }

    #[test]
    fn reports_missing_columns() {
        let err = from_reader("Title,Plot\nA,b\n".as_bytes()).unwrap_err();
        match err {
            DatasetError::MissingColumns(cols) => assert_eq!(cols, vec!["Overview", "Poster_Url"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn no_usable_rows() {
        let err = from_reader("Title,Overview,Poster_Url\n,,\n".as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::NoValidRecords));
    }
}
