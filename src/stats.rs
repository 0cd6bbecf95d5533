use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::error::AppError;
use crate::models::{BatchStatus, Course};
use crate::repository::courses;
use crate::store::DocumentStore;

/// Dashboard metrics, recomputed from a full scan on every call. Nothing is
/// cached and nothing is updated incrementally.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_courses: usize,
    pub total_batches: usize,
    /// Courses with at least one upcoming or ongoing batch.
    pub active_courses: usize,
    pub active_batches: usize,
    pub total_enrollments: u64,
    /// Signed: documents written before enrollment was capped at capacity
    /// can push a batch's availability below zero.
    pub available_seats: i64,
    /// Distinct course levels in the catalog.
    pub categories: usize,
    pub enrollment_by_course: Vec<EnrollmentRow>,
    pub batches_by_status: BTreeMap<BatchStatus, u64>,
}

/// One row per batch, for stacked-chart consumption.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRow {
    pub course: String,
    pub enrolled: u32,
    pub available: i64,
}

pub fn compute(courses: &[Course]) -> DashboardStats {
    let mut stats = DashboardStats {
        total_courses: 0,
        total_batches: 0,
        active_courses: 0,
        active_batches: 0,
        total_enrollments: 0,
        available_seats: 0,
        categories: 0,
        enrollment_by_course: Vec::new(),
        batches_by_status: BTreeMap::new(),
    };
    let mut levels = BTreeSet::new();

    for course in courses {
        stats.total_courses += 1;
        levels.insert(course.level);
        if course.batches.iter().any(|b| b.status.is_active()) {
            stats.active_courses += 1;
        }

        for batch in &course.batches {
            stats.total_batches += 1;
            stats.total_enrollments += u64::from(batch.enrolled_students);
            *stats.batches_by_status.entry(batch.status).or_insert(0) += 1;

            let available = i64::from(batch.seats) - i64::from(batch.enrolled_students);
            if batch.status.is_active() {
                stats.active_batches += 1;
                stats.available_seats += available;
            }
            stats.enrollment_by_course.push(EnrollmentRow {
                course: course.title.clone(),
                enrolled: batch.enrolled_students,
                available,
            });
        }
    }

    stats.categories = levels.len();
    stats
}

pub async fn dashboard(store: &dyn DocumentStore) -> Result<DashboardStats, AppError> {
    let courses = courses::list_courses(store).await?;
    Ok(compute(&courses))
}
