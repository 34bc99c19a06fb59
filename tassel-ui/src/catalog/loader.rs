//! Review dataset loader
//!
//! Reads the bundled course review CSV and groups rows by course id. The
//! dataset ships with a header row naming the id, review text and rating
//! columns; header detection is case-insensitive and accepts the common
//! column name variants.
//!
//! A missing or unreadable file yields an empty result, never an error:
//! course browsing stays available without the dataset.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File names probed (in order) under the root folder when no explicit
/// dataset path is configured
pub const DATASET_CANDIDATES: &[&str] = &["reviews_by_course.csv", "coursera_reviews.csv"];

/// Rating substituted when a row's rating cell is missing or unparseable
pub const DEFAULT_RATING: f64 = 4.0;

/// Raw per-course collection of review texts and ratings, in CSV row order.
///
/// The two vectors are filled independently: a row contributes text only
/// when its review cell is non-empty, while every row contributes a rating
/// (falling back to [`DEFAULT_RATING`]). Their lengths may differ.
#[derive(Debug, Clone, Default)]
pub struct CourseAggregate {
    pub course_id: String,
    pub reviews: Vec<String>,
    pub ratings: Vec<f64>,
}

/// Column positions discovered from the header row
#[derive(Debug, Clone, Copy)]
pub struct HeaderIndexes {
    pub course_id: usize,
    pub review: Option<usize>,
    pub rating: Option<usize>,
}

/// Locate the review dataset.
///
/// An explicitly configured path wins; otherwise the candidate file names
/// are probed under the root folder in declared order.
pub fn locate_dataset(root: &Path, configured: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = configured.filter(|p| !p.is_empty()) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
        warn!("Configured review dataset not found: {}", path.display());
        return None;
    }

    DATASET_CANDIDATES
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.exists())
}

/// Find the id/review/rating columns in a header row.
///
/// Returns `None` when no id column is present - without it no row can be
/// attributed to a course and the whole file is unusable.
pub fn detect_headers(header_line: &str) -> Option<HeaderIndexes> {
    let headers: Vec<String> = header_line
        .split(',')
        .map(|h| h.trim().to_lowercase())
        .collect();

    let course_id = headers
        .iter()
        .position(|h| h == "courseid" || h == "course_id")?;
    let review = headers.iter().position(|h| h == "review" || h == "review_text");
    let rating = headers.iter().position(|h| h == "label" || h == "rating");

    Some(HeaderIndexes {
        course_id,
        review,
        rating,
    })
}

/// Split one CSV line into trimmed fields.
///
/// Scans characters left to right. A `"` toggles in-quotes mode; two
/// consecutive `"` emit a literal quote; a comma outside quotes ends the
/// field.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                values.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    values.push(current.trim().to_string());

    values
}

/// Parse a rating cell, falling back to [`DEFAULT_RATING`]
pub fn parse_rating(cell: Option<&str>) -> f64 {
    cell.filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(DEFAULT_RATING)
}

/// Load the dataset and group rows by course id.
///
/// Missing file, empty file, or a header without an id column all produce
/// an empty map.
pub fn load_aggregates(path: &Path) -> HashMap<String, CourseAggregate> {
    let mut aggregates: HashMap<String, CourseAggregate> = HashMap::new();

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Could not read review dataset {}: {}", path.display(), e);
            return aggregates;
        }
    };

    let mut lines = content.lines().filter(|line| !line.trim().is_empty());

    let Some(header_line) = lines.next() else {
        return aggregates;
    };
    let Some(headers) = detect_headers(header_line) else {
        warn!("Review dataset {} has no course id column", path.display());
        return aggregates;
    };

    for line in lines {
        let values = parse_csv_line(line);
        if values.len() <= headers.course_id {
            continue;
        }

        let course_id = values[headers.course_id].clone();
        if course_id.is_empty() {
            continue;
        }

        let review_text = headers
            .review
            .and_then(|i| values.get(i))
            .cloned()
            .unwrap_or_default();
        let rating = parse_rating(headers.rating.and_then(|i| values.get(i)).map(String::as_str));

        let aggregate = aggregates
            .entry(course_id.clone())
            .or_insert_with(|| CourseAggregate {
                course_id,
                ..Default::default()
            });

        if !review_text.is_empty() {
            aggregate.reviews.push(review_text);
        }
        aggregate.ratings.push(rating);
    }

    debug!(
        "Loaded {} courses from review dataset {}",
        aggregates.len(),
        path.display()
    );

    aggregates
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_dataset(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_plain_line() {
        assert_eq!(parse_csv_line("a, b ,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_quoted_comma() {
        assert_eq!(
            parse_csv_line(r#"ml101,"Great course, loved it",5"#),
            vec!["ml101", "Great course, loved it", "5"]
        );
    }

    #[test]
    fn test_parse_escaped_quote() {
        assert_eq!(
            parse_csv_line(r#"ml101,"She said ""wow"" twice",4"#),
            vec!["ml101", r#"She said "wow" twice"#, "4"]
        );
    }

    #[test]
    fn test_detect_headers_variants() {
        let h = detect_headers("CourseId,Review,Label").unwrap();
        assert_eq!(h.course_id, 0);
        assert_eq!(h.review, Some(1));
        assert_eq!(h.rating, Some(2));

        let h = detect_headers("rating,course_id,review_text").unwrap();
        assert_eq!(h.course_id, 1);
        assert_eq!(h.review, Some(2));
        assert_eq!(h.rating, Some(0));

        assert!(detect_headers("name,text,score").is_none());
    }

    #[test]
    fn test_rating_defaults_when_missing_or_unparseable() {
        assert_eq!(parse_rating(Some("3.5")), 3.5);
        assert_eq!(parse_rating(Some("")), DEFAULT_RATING);
        assert_eq!(parse_rating(Some("great")), DEFAULT_RATING);
        assert_eq!(parse_rating(None), DEFAULT_RATING);
    }

    #[test]
    fn test_load_groups_by_course() {
        let file = write_dataset(
            "courseid,review,label\n\
             ml101,Good intro,5\n\
             \n\
             ml101,\"Dense, but worth it\",4\n\
             stats-basics,,3\n",
        );

        let aggregates = load_aggregates(file.path());
        assert_eq!(aggregates.len(), 2);

        let ml = &aggregates["ml101"];
        assert_eq!(ml.reviews, vec!["Good intro", "Dense, but worth it"]);
        assert_eq!(ml.ratings, vec![5.0, 4.0]);

        // Empty review cell contributes a rating but no text
        let stats = &aggregates["stats-basics"];
        assert!(stats.reviews.is_empty());
        assert_eq!(stats.ratings, vec![3.0]);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let aggregates = load_aggregates(Path::new("/nonexistent/reviews.csv"));
        assert!(aggregates.is_empty());
    }

    #[test]
    fn test_load_without_id_column_is_empty() {
        let file = write_dataset("review,label\nsome text,5\n");
        assert!(load_aggregates(file.path()).is_empty());
    }
}
