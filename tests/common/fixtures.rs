use std::sync::Arc;

use shelfrank::metadata::BookMetadata;
use shelfrank::vectordb::{IndexHandle, MockIndexBuilder, MockVectorIndex};

pub type SharedIndex = Arc<MockVectorIndex>;
pub type TestHandle = IndexHandle<MockIndexBuilder<SharedIndex>>;

pub const DUNE_REVIEW: &str = "Title: Dune\nAuthor: Frank Herbert\nShelf: DNF\n\
Review: desert planet spice politics and sand worms, too slow for me";

/// Formats a document the way ingestion writes review-text documents.
pub fn review_doc(title: &str, author: &str, shelf: &str, review: &str) -> String {
    format!("Title: {title}\nAuthor: {author}\nShelf: {shelf}\nReview: {review}")
}

/// A small reading history with one abandoned science fiction novel.
pub fn reading_history() -> MockVectorIndex {
    let index = MockVectorIndex::new();

    index.insert(
        DUNE_REVIEW,
        BookMetadata::new("Dune", "Frank Herbert")
            .with_shelf("DNF")
            .with_pages(412)
            .with_book_id("234225"),
    );

    let books: [(&str, &str, u8, &str, u32, &str); 7] = [
        ("Hyperion", "Dan Simmons", 5, "read", 482, "pilgrims on a distant planet tell their stories"),
        ("Foundation", "Isaac Asimov", 4, "read", 255, "an empire falls and mathematics predicts politics"),
        ("Emma", "Jane Austen", 3, "read", 474, "matchmaking in a quiet english village"),
        ("Neuromancer", "William Gibson", 2, "read", 271, "hackers and corporations in a neon city"),
        ("The Road", "Cormac McCarthy", 0, "to-read", 287, "a father and son cross a burned land"),
        ("Middlemarch", "George Eliot", 0, "did-not-finish", 880, "provincial life marriage and reform"),
        ("Solaris", "Stanislaw Lem", 5, "read", 204, "an ocean planet that may be alive"),
    ];

    for (title, author, rating, shelf, pages, review) in books {
        index.insert(
            review_doc(title, author, shelf, review),
            BookMetadata::new(title, author)
                .with_rating(rating)
                .with_shelf(shelf)
                .with_pages(pages),
        );
    }

    index
}

pub fn handle_over(index: SharedIndex) -> Arc<TestHandle> {
    Arc::new(IndexHandle::new(MockIndexBuilder::new(index)))
}
