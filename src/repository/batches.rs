//! Operations on the `batches` array embedded in a course document.
//!
//! Batches have no surrogate ids; a batch is addressed by its current
//! position in the parent's array. Every operation here reads the whole
//! course, mutates the array in memory, and writes the whole array back, so
//! two overlapping writers on the same course can lose an update, and any
//! index issued before a delete may address a different batch (or nothing)
//! afterwards. Stale positions surface as `IndexOutOfRange`.

use chrono::Utc;
use serde_json::{Map, json};

use crate::error::AppError;
use crate::models::batch::at_midnight;
use crate::models::{Batch, NewBatchRequest, UpdateBatchRequest, generate_batch_code};
use crate::repository::courses::get_course;
use crate::store::DocumentStore;

pub async fn add_batch(
    store: &dyn DocumentStore,
    course_id: &str,
    req: NewBatchRequest,
) -> Result<Batch, AppError> {
    if req.end_date <= req.start_date {
        return Err(AppError::Validation(
            "end date must be after start date".to_string(),
        ));
    }
    if req.seats == 0 {
        return Err(AppError::Validation("seats must be at least 1".to_string()));
    }
    let batch_code = match req.batch_code {
        Some(code) if code.trim().is_empty() => {
            return Err(AppError::Validation("batch code is required".to_string()));
        }
        Some(code) => code,
        None => generate_batch_code(),
    };

    let mut course = get_course(store, course_id).await?;
    let batch = Batch {
        batch_code,
        start_date: at_midnight(req.start_date),
        end_date: at_midnight(req.end_date),
        seats: req.seats,
        enrolled_students: 0,
        status: req.status,
    };
    course.batches.push(batch.clone());
    write_batches(store, course_id, &course.batches).await?;

    Ok(batch)
}

/// Replaces the dates, capacity, enrollment, and status of the batch at
/// `index`, keeping its `batchCode`. Date order is deliberately not
/// re-checked here; only batch creation validates it.
pub async fn update_batch_at(
    store: &dyn DocumentStore,
    course_id: &str,
    index: usize,
    req: UpdateBatchRequest,
) -> Result<Batch, AppError> {
    let mut course = get_course(store, course_id).await?;
    let len = course.batches.len();
    let batch = course
        .batches
        .get_mut(index)
        .ok_or(AppError::IndexOutOfRange { index, len })?;

    if req.enrolled_students > req.seats {
        return Err(AppError::Validation(
            "enrolled students cannot exceed seats".to_string(),
        ));
    }

    batch.start_date = at_midnight(req.start_date);
    batch.end_date = at_midnight(req.end_date);
    batch.seats = req.seats;
    batch.enrolled_students = req.enrolled_students;
    batch.status = req.status;
    let updated = batch.clone();

    write_batches(store, course_id, &course.batches).await?;
    Ok(updated)
}

/// Removes the batch at `index`; every batch after it shifts down by one
/// position, so indices handed out before this call go stale.
pub async fn delete_batch_at(
    store: &dyn DocumentStore,
    course_id: &str,
    index: usize,
) -> Result<Batch, AppError> {
    let mut course = get_course(store, course_id).await?;
    let len = course.batches.len();
    if index >= len {
        return Err(AppError::IndexOutOfRange { index, len });
    }

    let removed = course.batches.remove(index);
    write_batches(store, course_id, &course.batches).await?;
    Ok(removed)
}

async fn write_batches(
    store: &dyn DocumentStore,
    course_id: &str,
    batches: &[Batch],
) -> Result<(), AppError> {
    let mut fields = Map::new();
    fields.insert("batches".to_string(), serde_json::to_value(batches)?);
    fields.insert("updatedAt".to_string(), json!(Utc::now()));

    // The course was just read, but it may have been deleted since.
    if !store.update_fields(course_id, fields).await? {
        return Err(AppError::NotFound);
    }
    Ok(())
}
