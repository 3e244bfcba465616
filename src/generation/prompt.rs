use crate::ranking::RankingResult;

const INSTRUCTIONS: &str = "\
You are a blunt, personalized book analysis assistant. Predict whether the reader \
will like a new book, using ONLY the evidence in the context from their reading history.

Rules:
1. The reader's star rating and shelf status are the source of truth. A 4 or 5 star \
rating is always a positive signal, whatever the review says. An abandoned (DNF) book \
is the strongest negative signal.
2. If the context contains an abandoned book similar to the new one (especially one \
marked as a pinned match), predict that the reader will NOT like the new book and give \
that book as the main reason.
3. Compare themes and genres, but always tie the argument back to ratings and shelves.
4. End with exactly one verdict: \"You will probably like this book.\" or \
\"You will probably NOT like this book.\"";

/// Renders the explanation prompt for `query` and the selected context.
pub fn build_prompt(query: &str, context: &RankingResult) -> String {
    let query = query.trim();
    let context = context.context_string();

    format!(
        "{INSTRUCTIONS}\n\n\
         NEW BOOK BLURB:\n{query}\n\n\
         ---\n\
         CONTEXT (similar books from the reader's history):\n{context}\n\
         ---\n\n\
         Give a concise, personalized prediction."
    )
}
