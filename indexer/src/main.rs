use anyhow::{Context, Result};
use cinematch_core::{load_csv, recommend, BuildOptions, Index, StopWords, DEFAULT_K, DEFAULT_MAX_FEATURES};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, fmt};

use std::time::Instant;

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build the movie similarity index and query it from the command line", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the dataset, build the index and print a summary
    Build {
        #[command(flatten)]
        source: Source,
    },
    /// Print the movies most similar to a title
    Recommend {
        #[command(flatten)]
        source: Source,
        /// Movie title (case-insensitive)
        #[arg(long)]
        title: String,
        /// Number of recommendations
        #[arg(long, default_value_t = DEFAULT_K)]
        k: usize,
    },
}

#[derive(Args)]
struct Source {
    /// CSV file with Title, Overview and Poster_Url columns
    #[arg(long, default_value = "dataset.csv")]
    dataset: String,
    /// Vocabulary cap
    #[arg(long, default_value_t = DEFAULT_MAX_FEATURES)]
    max_features: usize,
    /// Keep English stop-words in the vocabulary
    #[arg(long, default_value_t = false)]
    no_stop_words: bool,
    /// Stem terms with the English Snowball stemmer
    #[arg(long, default_value_t = false)]
    stem: bool,
    /// Use 1 + ln(tf) instead of raw term counts
    #[arg(long, default_value_t = false)]
    sublinear_tf: bool,
    /// Use ln(N/df) + 1 instead of the smoothed IDF
    #[arg(long, default_value_t = false)]
    raw_idf: bool,
}

impl Source {
    fn options(&self) -> BuildOptions {
        BuildOptions {
            stop_words: if self.no_stop_words { StopWords::None } else { StopWords::English },
            max_features: self.max_features,
            stemming: self.stem,
            sublinear_tf: self.sublinear_tf,
            smooth_idf: !self.raw_idf,
        }
    }
}

#[derive(Serialize)]
struct BuildSummary {
    movies: usize,
    dropped: usize,
    vocabulary: usize,
    took_s: f64,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { source } => {
            let start = Instant::now();
            let (index, dropped) = build_index(&source)?;
            let summary = BuildSummary {
                movies: index.len(),
                dropped,
                vocabulary: index.vocabulary().len(),
                took_s: start.elapsed().as_secs_f64(),
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Recommend { source, title, k } => {
            let (index, _) = build_index(&source)?;
            let recommendations = recommend(&index, title.trim(), k)?;
            let out = serde_json::json!({ "query": title, "recommendations": recommendations });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(())
}

fn build_index(source: &Source) -> Result<(Index, usize)> {
    tracing::info!(dataset = %source.dataset, max_features = source.max_features, "building index");
    let dataset = load_csv(&source.dataset).with_context(|| format!("loading {}", source.dataset))?;
    let index = Index::build(&dataset.records, &source.options())?;
    Ok((index, dataset.report.dropped))
}
