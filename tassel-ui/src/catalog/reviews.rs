//! Review lookup for a single course
//!
//! Independent read path over the same CSV as the loader: scans the file
//! and extracts rows matching the queried course id. Matching is fuzzy in
//! both directions (exact, row id contained in query, query contained in
//! row id, all case-insensitive) so hyphen and case variants of an id still
//! find their reviews.

use std::path::Path;

use serde::Serialize;
use tracing::warn;

use super::loader::{detect_headers, parse_csv_line, parse_rating};

/// One review row matched for a course
#[derive(Debug, Clone, Serialize)]
pub struct CourseReview {
    pub review_id: String,
    pub course_id: String,
    pub review_text: String,
    /// Clamped into [1, 5]
    pub rating: f64,
    pub label: i64,
}

/// Collect up to `cap` reviews for the course id, in CSV row order.
///
/// Only rows with non-empty review text are included. A missing or
/// unusable dataset yields an empty list.
pub fn collect_reviews(path: &Path, course_id: &str, cap: usize) -> Vec<CourseReview> {
    let mut reviews = Vec::new();

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Could not read review dataset {}: {}", path.display(), e);
            return reviews;
        }
    };

    let mut lines = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((_, header_line)) = lines.next() else {
        return reviews;
    };
    let Some(headers) = detect_headers(header_line) else {
        return reviews;
    };

    let needle = course_id.trim().to_lowercase();

    for (line_no, line) in lines {
        if reviews.len() >= cap {
            break;
        }

        let values = parse_csv_line(line);
        let Some(row_id) = values.get(headers.course_id).filter(|v| !v.is_empty()) else {
            continue;
        };

        if !id_matches(&row_id.to_lowercase(), &needle) {
            continue;
        }

        let review_text = headers
            .review
            .and_then(|i| values.get(i))
            .cloned()
            .unwrap_or_default();
        if review_text.is_empty() {
            continue;
        }

        let rating = parse_rating(headers.rating.and_then(|i| values.get(i)).map(String::as_str))
            .clamp(1.0, 5.0);

        reviews.push(CourseReview {
            review_id: format!("review_{}", line_no + 1),
            course_id: row_id.clone(),
            review_text,
            rating,
            label: rating.round() as i64,
        });
    }

    reviews
}

/// Sort reviews for listing: rating descending, ties broken by review text
/// length descending
pub fn sort_reviews(reviews: &mut [CourseReview]) {
    reviews.sort_by(|a, b| {
        b.rating
            .partial_cmp(&a.rating)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.review_text.len().cmp(&a.review_text.len()))
    });
}

/// Three-way fuzzy match: equal, row id inside query, or query inside row
/// id. Both arguments must already be lowercased.
fn id_matches(row_id: &str, query: &str) -> bool {
    row_id == query || row_id.contains(query) || query.contains(row_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn dataset_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const DATASET: &str = "courseid,review,label\n\
        ml101-intro,Good machine learning intro,5\n\
        ml101-intro,Too fast for beginners,2\n\
        ml101-intro,,4\n\
        other-course,Nothing to do with ml queries... or is it,5\n\
        ML101-ADVANCED,Harder sequel course,9\n";

    #[test]
    fn test_fuzzy_match_both_directions() {
        let file = dataset_file(DATASET);

        // Query shorter than the stored id
        let reviews = collect_reviews(file.path(), "ML101", 50);
        let ids: Vec<&str> = reviews.iter().map(|r| r.course_id.as_str()).collect();
        assert!(ids.contains(&"ml101-intro"));
        assert!(ids.contains(&"ML101-ADVANCED"));
        assert!(!ids.contains(&"other-course"));

        // Query longer than the stored id
        let reviews = collect_reviews(file.path(), "ml101-intro-extended", 50);
        assert!(reviews.iter().all(|r| r.course_id == "ml101-intro"));
        assert!(!reviews.is_empty());
    }

    #[test]
    fn test_rows_without_text_excluded() {
        let file = dataset_file(DATASET);
        let reviews = collect_reviews(file.path(), "ml101-intro", 50);

        // The empty-text row with rating 4 must not appear
        assert_eq!(reviews.len(), 3);
        assert!(reviews.iter().all(|r| !r.review_text.is_empty()));
    }

    #[test]
    fn test_rating_clamped_on_read() {
        let file = dataset_file(DATASET);
        let reviews = collect_reviews(file.path(), "ML101-ADVANCED", 50);

        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].rating, 5.0, "rating 9 clamps to 5");
        assert_eq!(reviews[0].label, 5);
    }

    #[test]
    fn test_cap_limits_results() {
        let file = dataset_file(DATASET);
        let reviews = collect_reviews(file.path(), "ml101", 1);
        assert_eq!(reviews.len(), 1);
    }

    #[test]
    fn test_sort_by_rating_then_length() {
        let file = dataset_file(
            "courseid,review,label\n\
             c1,short,3\n\
             c1,a much longer review text,3\n\
             c1,top rated,5\n",
        );
        let mut reviews = collect_reviews(file.path(), "c1", 50);
        sort_reviews(&mut reviews);

        assert_eq!(reviews[0].review_text, "top rated");
        assert_eq!(reviews[1].review_text, "a much longer review text");
        assert_eq!(reviews[2].review_text, "short");
    }

    #[test]
    fn test_adversarial_short_query_matches_unrelated_courses() {
        // Bidirectional substring matching means a very short query id can
        // pull in reviews from several unrelated courses. Documented
        // behavior, kept as-is.
        let file = dataset_file(
            "courseid,review,label\n\
             ml101,About machine learning,5\n\
             html-basics,About markup instead,4\n",
        );
        let reviews = collect_reviews(file.path(), "ml", 50);
        let ids: Vec<&str> = reviews.iter().map(|r| r.course_id.as_str()).collect();

        assert!(ids.contains(&"ml101"));
        assert!(ids.contains(&"html-basics"), "\"ml\" is a substring of \"html-basics\"");
    }

    #[test]
    fn test_missing_dataset_yields_empty() {
        let reviews = collect_reviews(Path::new("/nonexistent.csv"), "ml101", 50);
        assert!(reviews.is_empty());
    }
}
