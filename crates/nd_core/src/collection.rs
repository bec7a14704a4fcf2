//! Pure operations over the article collection: the deduplicating merge,
//! the read-side projections, and enrichment application. No I/O here.

use std::collections::HashSet;

use crate::types::{Article, ArticleStatus, Collection};

/// Combines a freshly fetched batch with the stored collection.
///
/// Incoming articles whose link is not stored yet are appended first,
/// followed by the existing collection. A link present on both sides keeps
/// the existing copy, so an already-summarized article is never clobbered by
/// a re-fetch of the same story. Duplicates within `incoming` itself
/// collapse to the first occurrence.
///
/// The returned order is incoming-then-existing but carries no meaning;
/// callers derive display order through the projections below.
pub fn merge(incoming: Vec<Article>, existing: Collection) -> Collection {
    let mut seen: HashSet<String> = existing
        .articles
        .iter()
        .map(|a| a.link.clone())
        .collect();
    let mut articles = Vec::with_capacity(incoming.len() + existing.articles.len());
    for article in incoming {
        if seen.insert(article.link.clone()) {
            articles.push(article);
        }
    }
    articles.extend(existing.articles);
    Collection { articles }
}

/// Active articles, newest `pubDate` first. Used by the public listing.
pub fn list_active(collection: &Collection) -> Vec<Article> {
    let mut active: Vec<Article> = collection
        .articles
        .iter()
        .filter(|a| a.status == ArticleStatus::Active)
        .cloned()
        .collect();
    active.sort_by_key(|a| std::cmp::Reverse(a.published_at()));
    active
}

/// The oldest inactive article, if any. Stable sort, so articles sharing a
/// `pubDate` are picked in collection order.
pub fn next_to_summarize(collection: &Collection) -> Option<&Article> {
    let mut inactive: Vec<&Article> = collection
        .articles
        .iter()
        .filter(|a| a.status == ArticleStatus::Inactive)
        .collect();
    inactive.sort_by_key(|a| a.published_at());
    inactive.first().copied()
}

/// Returns the collection with the article matching `link` given its summary
/// and promoted to `active`. Every other article is untouched. A link with no
/// match leaves the collection unchanged.
pub fn activate(mut collection: Collection, link: &str, summary: String) -> Collection {
    if let Some(article) = collection.articles.iter_mut().find(|a| a.link == link) {
        article.summary = summary;
        article.status = ArticleStatus::Active;
    }
    collection
}
