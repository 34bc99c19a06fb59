//! Course catalog derived from the bundled review dataset
//!
//! The catalog is an owned object injected into the application state. Its
//! contents are built lazily on first access behind a single-flight gate,
//! then held for the process lifetime: the dataset file never changes while
//! the process runs, so there is no invalidation path.

pub mod derive;
pub mod loader;
pub mod reviews;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::OnceCell;
use tracing::info;

pub use derive::{derive_course, derive_title, DerivedCourse};
pub use loader::{load_aggregates, locate_dataset, CourseAggregate};

/// Lazily-built, process-wide course catalog
pub struct CourseCatalog {
    dataset: Option<PathBuf>,
    courses: OnceCell<HashMap<String, DerivedCourse>>,
}

impl CourseCatalog {
    /// Create a catalog backed by the given dataset file.
    ///
    /// `None` produces a permanently-empty catalog; every lookup falls
    /// through to the store.
    pub fn new(dataset: Option<PathBuf>) -> Self {
        Self {
            dataset,
            courses: OnceCell::new(),
        }
    }

    /// Dataset path backing this catalog, if one was found
    pub fn dataset_path(&self) -> Option<&Path> {
        self.dataset.as_deref()
    }

    /// Look up a course: exact id match first, then a case-insensitive scan
    /// (hyphen/case variants of the same id should resolve to one course).
    pub async fn get(&self, course_id: &str) -> Option<DerivedCourse> {
        let courses = self.courses().await;

        if let Some(course) = courses.get(course_id) {
            return Some(course.clone());
        }

        let needle = course_id.to_lowercase();
        courses
            .values()
            .find(|course| course.course_id.to_lowercase() == needle)
            .cloned()
    }

    /// Number of derived courses (builds the catalog if needed)
    pub async fn len(&self) -> usize {
        self.courses().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Build-once accessor. Concurrent first callers coalesce on the same
    /// build; the file is read exactly once per process.
    async fn courses(&self) -> &HashMap<String, DerivedCourse> {
        self.courses
            .get_or_init(|| async {
                let Some(path) = &self.dataset else {
                    return HashMap::new();
                };

                let aggregates = load_aggregates(path);
                let courses: HashMap<String, DerivedCourse> = aggregates
                    .into_iter()
                    .map(|(course_id, aggregate)| (course_id, derive_course(&aggregate)))
                    .collect();

                info!("Course catalog built: {} courses", courses.len());
                courses
            })
            .await
    }
}
