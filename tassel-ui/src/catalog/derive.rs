//! Course metadata derivation
//!
//! Builds display-ready course records from raw review aggregates. All of
//! this is heuristic: the dataset carries no titles, categories or
//! difficulty levels, so they are inferred from the course id and the
//! review texts. The rules are deterministic - deriving the same aggregate
//! twice yields byte-identical output.

use serde::Serialize;

use super::loader::CourseAggregate;

/// Maximum description length before truncation
const DESCRIPTION_MAX_CHARS: usize = 500;

/// Reviews shorter than this are too thin to use as description material
const MEANINGFUL_REVIEW_CHARS: usize = 20;

/// How many reviews the description is stitched from
const DESCRIPTION_REVIEW_COUNT: usize = 3;

/// Category keyword table, walked in declared order; the first category
/// with a keyword present in the title or review text wins. Keeping this
/// as one table makes the tie-break order auditable.
pub const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Computer Science",
        &["programming", "code", "software", "algorithm", "python", "java", "web"],
    ),
    (
        "Data Science",
        &["data", "analysis", "machine learning", "statistics", "analytics"],
    ),
    (
        "Business",
        &["business", "management", "marketing", "finance", "entrepreneurship"],
    ),
    (
        "Engineering",
        &["engineering", "design", "mechanical", "electrical", "system"],
    ),
    ("Health", &["health", "medical", "medicine", "nursing", "biology"]),
    ("Science", &["science", "physics", "chemistry", "biology", "research"]),
];

/// Display-ready course record derived from a [`CourseAggregate`]
#[derive(Debug, Clone, Serialize)]
pub struct DerivedCourse {
    pub course_id: String,
    pub item_id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty: String,
    /// Mean rating, rounded to one decimal; 4.0 when the aggregate has none
    pub rating: f64,
    /// Count of collected review texts (not of ratings)
    pub num_ratings: i64,
    pub source: String,
    pub url: String,
}

/// Derive a display title from a course id: hyphens become spaces and the
/// first letter of every word is uppercased (`"intro-to-python"` ->
/// `"Intro To Python"`).
pub fn derive_title(course_id: &str) -> String {
    let spaced = course_id.replace('-', " ");
    let mut title = String::with_capacity(spaced.len());
    let mut prev_word = false;

    for ch in spaced.chars() {
        let is_word = ch.is_alphanumeric() || ch == '_';
        if is_word && !prev_word {
            title.extend(ch.to_uppercase());
        } else {
            title.push(ch);
        }
        prev_word = is_word;
    }

    title
}

/// Derive the full course record from an aggregate
pub fn derive_course(aggregate: &CourseAggregate) -> DerivedCourse {
    let title = derive_title(&aggregate.course_id);

    let avg_rating = if aggregate.ratings.is_empty() {
        4.0
    } else {
        aggregate.ratings.iter().sum::<f64>() / aggregate.ratings.len() as f64
    };

    DerivedCourse {
        course_id: aggregate.course_id.clone(),
        item_id: aggregate.course_id.clone(),
        description: derive_description(aggregate, &title),
        category: derive_category(aggregate, &title),
        difficulty: derive_difficulty(avg_rating).to_string(),
        rating: round_one_decimal(avg_rating),
        num_ratings: aggregate.reviews.len() as i64,
        source: "Coursera".to_string(),
        url: format!("https://www.coursera.org/learn/{}", aggregate.course_id),
        title,
    }
}

/// Stitch a description from up to three substantial reviews, or fall back
/// to a generic sentence. Truncated to 500 characters with an ellipsis.
fn derive_description(aggregate: &CourseAggregate, title: &str) -> String {
    let meaningful: Vec<&str> = aggregate
        .reviews
        .iter()
        .filter(|r| r.chars().count() > MEANINGFUL_REVIEW_CHARS)
        .take(DESCRIPTION_REVIEW_COUNT)
        .map(String::as_str)
        .collect();

    let description = if meaningful.is_empty() {
        format!(
            "A comprehensive course on {}. Students have provided positive \
             feedback about the course content and structure.",
            title
        )
    } else {
        meaningful.join(" ")
    };

    truncate_with_ellipsis(&description, DESCRIPTION_MAX_CHARS)
}

/// First matching category from [`CATEGORY_KEYWORDS`], or "General"
fn derive_category(aggregate: &CourseAggregate, title: &str) -> String {
    let title_lower = title.to_lowercase();
    let all_reviews = aggregate.reviews.join(" ").to_lowercase();

    for (category, keywords) in CATEGORY_KEYWORDS {
        let matched = keywords
            .iter()
            .any(|kw| title_lower.contains(kw) || all_reviews.contains(kw));
        if matched {
            return (*category).to_string();
        }
    }

    "General".to_string()
}

/// Difficulty from mean rating: harshly-rated courses read as advanced,
/// loved ones as beginner-friendly
fn derive_difficulty(avg_rating: f64) -> &'static str {
    if avg_rating < 3.0 {
        "Advanced"
    } else if avg_rating > 4.5 {
        "Beginner"
    } else {
        "Intermediate"
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let mut truncated: String = text.chars().take(max_chars).collect();
        truncated.push_str("...");
        truncated
    } else {
        text.to_string()
    }
}
