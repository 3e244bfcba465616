//! Per-author profile of the reader's history.
//!
//! Collects every indexed book by one author and summarizes how the reader
//! treated them: average rating, how many were loved (4+ stars), how many
//! were abandoned, and a verdict on picking up another one.

pub mod error;


pub use error::AuthorError;

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::metadata::BookMetadata;
use crate::vectordb::{IndexBuilder, IndexHandle, VectorIndex};

/// Overall outlook for another book by the same author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthorVerdict {
    /// At least one abandoned book, and no more loved books than abandoned ones.
    Risky,
    /// More loved books than abandoned ones.
    Promising,
    Mixed,
}

impl AuthorVerdict {
    /// Decides from the loved and abandoned counts.
    pub fn from_counts(high_rated: usize, abandoned: usize) -> Self {
        if abandoned > 0 && abandoned >= high_rated {
            AuthorVerdict::Risky
        } else if high_rated > abandoned {
            AuthorVerdict::Promising
        } else {
            AuthorVerdict::Mixed
        }
    }
}

/// What the reader's history says about one author.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorProfile {
    pub author: String,
    /// One entry per distinct title, in index order.
    pub books: Vec<BookMetadata>,
    /// Mean rating over all books, unrated ones counting as 0.
    pub average_rating: f64,
    pub high_rated: usize,
    pub abandoned: usize,
    pub verdict: AuthorVerdict,
}

impl AuthorProfile {
    /// Builds a profile, or `None` when `books` is empty.
    ///
    /// Repeated titles (several indexed chunks of one book) count once.
    pub fn from_books(author: impl Into<String>, books: Vec<BookMetadata>) -> Option<Self> {
        let mut seen = HashSet::new();
        let books: Vec<BookMetadata> = books
            .into_iter()
            .filter(|book| seen.insert(book.title.clone()))
            .collect();

        if books.is_empty() {
            return None;
        }

        let total: u32 = books.iter().map(|b| u32::from(b.rating)).sum();
        let average_rating = f64::from(total) / books.len() as f64;
        let high_rated = books.iter().filter(|b| b.is_highly_rated()).count();
        let abandoned = books.iter().filter(|b| b.shelf.is_abandoned()).count();

        Some(Self {
            author: author.into(),
            books,
            average_rating,
            high_rated,
            abandoned,
            verdict: AuthorVerdict::from_counts(high_rated, abandoned),
        })
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    /// Human readable conclusion for the verdict.
    pub fn conclusion(&self) -> String {
        let author = &self.author;
        match self.verdict {
            AuthorVerdict::Risky => format!(
                "Be careful: you abandoned at least as many books by {author} as you loved, \
                 so a new one carries an elevated risk of disappointing you."
            ),
            AuthorVerdict::Promising => format!(
                "Good odds: your experience with {author} is mostly positive, \
                 so you will very likely enjoy a new book."
            ),
            AuthorVerdict::Mixed => format!(
                "Your experience with {author} is mixed. A new book could go either way, \
                 so look closely at its themes."
            ),
        }
    }
}

impl fmt::Display for AuthorProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Profile for {}:", self.author)?;
        writeln!(f, "- books in your history: {}", self.book_count())?;
        writeln!(f, "- average rating: {:.2}★", self.average_rating)?;
        writeln!(f, "- rated 4★ or higher: {}", self.high_rated)?;
        if self.abandoned > 0 {
            writeln!(f, "- abandoned (DNF): {}", self.abandoned)?;
        }
        write!(f, "{}", self.conclusion())
    }
}

/// Looks authors up in the shared index.
pub struct AuthorAnalyzer<B: IndexBuilder> {
    handle: Arc<IndexHandle<B>>,
}

impl<B: IndexBuilder> Clone for AuthorAnalyzer<B> {
    fn clone(&self) -> Self {
        Self {
            handle: Arc::clone(&self.handle),
        }
    }
}

impl<B: IndexBuilder> AuthorAnalyzer<B> {
    pub fn new(handle: Arc<IndexHandle<B>>) -> Self {
        Self { handle }
    }

    pub fn handle(&self) -> &Arc<IndexHandle<B>> {
        &self.handle
    }

    /// Profiles `author` (exact name match after trimming).
    pub async fn profile(&self, author: &str) -> Result<AuthorProfile, AuthorError> {
        let author = author.trim();
        if author.is_empty() {
            return Err(AuthorError::EmptyName);
        }

        let index = self.handle.get().await?;
        let books = index.books_by_author(author).await?;

        debug!(author, books = books.len(), "Author lookup complete");

        AuthorProfile::from_books(author, books).ok_or_else(|| AuthorError::NotFound {
            author: author.to_string(),
        })
    }
}
