//! Aggregate statistics over a classified comment batch.
//!
//! Pure functions the dashboard layer calls with the original comments and
//! the order-aligned [`BatchPrediction`] from the sentiment pipeline. Index
//! alignment between the two is the caller's contract; these functions never
//! reorder either side.

use std::collections::{HashMap, HashSet};

use crate::sentiment::{BatchPrediction, Sentiment};
use crate::video::Comment;

/// Headline numbers for the dashboard metric row.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentStats {
    /// Number of comments analyzed.
    pub total_comments: usize,
    /// Number of distinct comment authors.
    pub unique_commenters: usize,
    /// Mean whitespace-token count per comment.
    pub avg_words: f64,
    /// Mean sentiment score in `[-1, 1]`: class index shifted down by one,
    /// so all-negative is -1 and all-positive is +1.
    pub avg_score: f64,
}

impl CommentStats {
    /// Overall verdict derived from [`avg_score`](Self::avg_score), with a
    /// +-0.1 neutral dead band around zero.
    pub fn vibe(&self) -> Sentiment {
        if self.avg_score > 0.1 {
            Sentiment::Positive
        } else if self.avg_score < -0.1 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

/// Computes headline statistics for a classified comment set.
///
/// An empty batch yields zeroed stats rather than NaN means.
pub fn detailed_stats(comments: &[Comment], prediction: &BatchPrediction) -> CommentStats {
    let total_comments = comments.len();
    let unique_commenters = comments
        .iter()
        .map(|c| c.author.as_str())
        .collect::<HashSet<_>>()
        .len();

    let avg_words = if total_comments == 0 {
        0.0
    } else {
        let words: usize = comments
            .iter()
            .map(|c| c.text.split_whitespace().count())
            .sum();
        words as f64 / total_comments as f64
    };

    let avg_score = if prediction.is_empty() {
        0.0
    } else {
        let sum: i64 = prediction.classes().iter().map(|&s| s as i64 - 1).sum();
        sum as f64 / prediction.len() as f64
    };

    CommentStats {
        total_comments,
        unique_commenters,
        avg_words,
        avg_score,
    }
}

/// Returns up to `count` comments of one sentiment class, most confident
/// predictions first.
pub fn top_comments<'a>(
    comments: &'a [Comment],
    prediction: &BatchPrediction,
    sentiment: Sentiment,
    count: usize,
) -> Vec<&'a Comment> {
    let classes = prediction.classes();
    let confidences = prediction.confidences();

    let mut picked: Vec<(usize, f32)> = Vec::new();
    for i in 0..comments.len().min(classes.len()) {
        if classes[i] == sentiment {
            picked.push((i, confidences[i]));
        }
    }

    picked.sort_by(|a, b| b.1.total_cmp(&a.1));
    picked.truncate(count);
    picked.into_iter().map(|(i, _)| &comments[i]).collect()
}

/// Counts lowercased comment words longer than three characters and returns
/// the `limit` most frequent as `(word, count)` pairs.
///
/// Ties are broken alphabetically so the ranking is deterministic.
pub fn keyword_counts(comments: &[Comment], limit: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for comment in comments {
        for word in comment.text.to_lowercase().split_whitespace() {
            // mirrors the dashboard filter: drop 'the', 'is', and friends
            if word.chars().count() > 3 {
                *counts.entry(word.to_string()).or_default() += 1;
            }
        }
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(author: &str, text: &str) -> Comment {
        Comment {
            author: author.into(),
            text: text.into(),
            likes: 0,
        }
    }

    fn prediction(classes: Vec<Sentiment>, confidences: Vec<f32>) -> BatchPrediction {
        BatchPrediction::from_parts(classes, confidences).unwrap()
    }

    #[test]
    fn stats_over_small_batch() {
        let comments = [
            comment("alice", "great video really"),
            comment("bob", "meh"),
            comment("alice", "total waste of time honestly"),
        ];
        let pred = prediction(
            vec![Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative],
            vec![0.9, 0.5, 0.8],
        );

        let stats = detailed_stats(&comments, &pred);
        assert_eq!(stats.total_comments, 3);
        assert_eq!(stats.unique_commenters, 2);
        assert!((stats.avg_words - 3.0).abs() < 1e-9);
        assert!((stats.avg_score - 0.0).abs() < 1e-9);
        assert_eq!(stats.vibe(), Sentiment::Neutral);
    }

    #[test]
    fn empty_batch_yields_zeroes() {
        let stats = detailed_stats(&[], &BatchPrediction::default());
        assert_eq!(stats.total_comments, 0);
        assert_eq!(stats.unique_commenters, 0);
        assert_eq!(stats.avg_words, 0.0);
        assert_eq!(stats.avg_score, 0.0);
    }

    #[test]
    fn vibe_thresholds() {
        let mut stats = detailed_stats(&[], &BatchPrediction::default());
        stats.avg_score = 0.2;
        assert_eq!(stats.vibe(), Sentiment::Positive);
        stats.avg_score = -0.2;
        assert_eq!(stats.vibe(), Sentiment::Negative);
        stats.avg_score = 0.1;
        assert_eq!(stats.vibe(), Sentiment::Neutral);
        stats.avg_score = -0.1;
        assert_eq!(stats.vibe(), Sentiment::Neutral);
    }

    #[test]
    fn top_comments_sorted_by_confidence() {
        let comments = [
            comment("a", "one"),
            comment("b", "two"),
            comment("c", "three"),
            comment("d", "four"),
        ];
        let pred = prediction(
            vec![
                Sentiment::Positive,
                Sentiment::Negative,
                Sentiment::Positive,
                Sentiment::Positive,
            ],
            vec![0.6, 0.99, 0.9, 0.7],
        );

        let top = top_comments(&comments, &pred, Sentiment::Positive, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].author, "c");
        assert_eq!(top[1].author, "d");
    }

    #[test]
    fn keywords_filter_short_words_and_rank_by_count() {
        let comments = [
            comment("a", "Great video with great music"),
            comment("b", "the video is great"),
        ];

        let ranked = keyword_counts(&comments, 2);
        assert_eq!(
            ranked,
            vec![("great".to_string(), 3), ("video".to_string(), 2)]
        );
    }

    #[test]
    fn keyword_ties_break_alphabetically() {
        let comments = [comment("a", "zebra apple zebra apple")];
        let ranked = keyword_counts(&comments, 10);
        assert_eq!(
            ranked,
            vec![("apple".to_string(), 2), ("zebra".to_string(), 2)]
        );
    }
}
