//! Shelfrank CLI entrypoint.
//!
//! ```text
//! shelfrank [--no-generate] <blurb...>
//! echo "<blurb>" | shelfrank
//! shelfrank --author <name...>
//! ```

use std::sync::Arc;

use anyhow::Context;
use mimalloc::MiMalloc;
use tokio::io::AsyncReadExt;

use shelfrank::authors::{AuthorAnalyzer, AuthorError};
use shelfrank::config::Config;
use shelfrank::fetcher::CandidateFetcher;
use shelfrank::generation::GenaiGenerator;
use shelfrank::ranking::RankingResult;
use shelfrank::recommend::{
    NO_MATCHES_MESSAGE, RecommendError, RecommendParams, Recommender, STORE_UNAVAILABLE_MESSAGE,
};
use shelfrank::vectordb::{IndexHandle, QdrantIndexBuilder};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const EXIT_STORE_UNAVAILABLE: i32 = 2;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut generate = true;
    let mut author_mode = false;
    let mut words = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--no-generate" => generate = false,
            "--author" => author_mode = true,
            "-h" | "--help" => {
                println!("usage: shelfrank [--no-generate] <blurb...>  (or pipe the blurb on stdin)");
                println!("       shelfrank --author <name...>");
                return Ok(());
            }
            _ => words.push(arg),
        }
    }

    if author_mode {
        return run_author(&words.join(" ")).await;
    }

    let blurb = if words.is_empty() {
        let mut input = String::new();
        tokio::io::stdin()
            .read_to_string(&mut input)
            .await
            .context("failed to read blurb from stdin")?;
        input
    } else {
        words.join(" ")
    };

    if blurb.trim().is_empty() {
        anyhow::bail!("no blurb given: pass it as arguments or on stdin");
    }

    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!(
        qdrant_url = %config.qdrant_url,
        collection = %config.collection,
        chat_model = %config.chat_model,
        k = config.k,
        "Shelfrank starting"
    );

    let handle = Arc::new(IndexHandle::new(QdrantIndexBuilder::from_config(&config)));
    let fetcher = CandidateFetcher::new(handle).with_fetch_size(config.fetch_size);
    let generator = GenaiGenerator::new(config.chat_model.clone(), config.request_timeout());
    let recommender = Recommender::new(fetcher, generator);
    let params = RecommendParams::from_config(&config);

    let outcome = if generate {
        recommender
            .recommend(&blurb, &params)
            .await
            .map(|recommendation| {
                println!("{}", recommendation.message());
                if let Some(contexts) = recommendation.contexts() {
                    print_contexts(contexts);
                }
            })
    } else {
        recommender
            .select_context(&blurb, &params)
            .await
            .map(|contexts| {
                if contexts.is_empty() {
                    println!("{NO_MATCHES_MESSAGE}");
                } else {
                    print_contexts(&contexts);
                }
            })
    };

    match outcome {
        Ok(()) => Ok(()),
        Err(e @ RecommendError::Fetch(_)) if e.is_store_unavailable() => {
            tracing::warn!(error = %e, "Vector store unavailable");
            eprintln!("{}", e.user_message());
            std::process::exit(EXIT_STORE_UNAVAILABLE);
        }
        Err(e) => Err(e.into()),
    }
}

async fn run_author(name: &str) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    config.validate()?;

    let handle = Arc::new(IndexHandle::new(QdrantIndexBuilder::from_config(&config)));
    let analyzer = AuthorAnalyzer::new(handle);

    match analyzer.profile(name).await {
        Ok(profile) => {
            println!("{profile}");
            println!();
            for book in &profile.books {
                println!(
                    "  {} | shelf: {} | rating: {}★",
                    book.title, book.shelf_label, book.rating
                );
            }
            Ok(())
        }
        Err(AuthorError::NotFound { author }) => {
            println!("'{author}' was not found in your reading history.");
            Ok(())
        }
        Err(e) if e.is_store_unavailable() => {
            tracing::warn!(error = %e, "Vector store unavailable");
            eprintln!("{STORE_UNAVAILABLE_MESSAGE}");
            std::process::exit(EXIT_STORE_UNAVAILABLE);
        }
        Err(e) => Err(e.into()),
    }
}

fn print_contexts(contexts: &RankingResult) {
    println!();
    println!("Based on:");
    for entry in contexts {
        println!("  {}", entry.display_line());
    }
}
