use chrono::Utc;
use serde_json::{Map, json};

use crate::error::AppError;
use crate::models::course::split_features;
use crate::models::{Course, NewCourseRequest, UpdateCourseRequest};
use crate::store::{DocumentStore, to_document};

pub async fn list_courses(store: &dyn DocumentStore) -> Result<Vec<Course>, AppError> {
    store
        .find_all()
        .await?
        .into_iter()
        .map(|doc| Ok(serde_json::from_value(doc)?))
        .collect()
}

pub async fn get_course(store: &dyn DocumentStore, id: &str) -> Result<Course, AppError> {
    let doc = store.find_by_id(id).await?.ok_or(AppError::NotFound)?;
    Ok(serde_json::from_value(doc)?)
}

pub async fn create_course(
    store: &dyn DocumentStore,
    req: NewCourseRequest,
) -> Result<Course, AppError> {
    require("title", &req.title)?;
    require("description", &req.description)?;
    require("duration", &req.duration)?;
    if req.price.is_nan() || req.price < 0.0 {
        return Err(AppError::Validation("price must be non-negative".to_string()));
    }

    let now = Utc::now();
    let mut course = Course {
        id: String::new(),
        title: req.title,
        description: req.description,
        features: split_features(&req.features),
        price: req.price,
        duration: req.duration,
        level: req.level,
        image_id: req.image_id,
        batches: Vec::new(),
        created_at: now,
        updated_at: now,
    };

    course.id = store.insert(to_document(&course)?).await?;
    Ok(course)
}

/// Replaces the editable course fields wholesale and refreshes `updatedAt`.
/// Fails with `NotFound` when the id is absent; the store's no-op signal is
/// checked so a missing id can never look like a silent success.
pub async fn update_course(
    store: &dyn DocumentStore,
    id: &str,
    req: UpdateCourseRequest,
) -> Result<Course, AppError> {
    let mut fields = Map::new();
    fields.insert("title".to_string(), json!(req.title));
    fields.insert("description".to_string(), json!(req.description));
    fields.insert("price".to_string(), json!(req.price));
    fields.insert("imageId".to_string(), json!(req.image_id));
    fields.insert("duration".to_string(), json!(req.duration));
    fields.insert("level".to_string(), json!(req.level));
    fields.insert("features".to_string(), json!(split_features(&req.features)));
    fields.insert("updatedAt".to_string(), json!(Utc::now()));

    if !store.update_fields(id, fields).await? {
        return Err(AppError::NotFound);
    }

    get_course(store, id).await
}

/// Idempotent: deleting an id that is already gone is a no-op, not an error.
pub async fn delete_course(store: &dyn DocumentStore, id: &str) -> Result<(), AppError> {
    store.delete_one(id).await?;
    Ok(())
}

fn require(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        Err(AppError::Validation(format!("{field} is required")))
    } else {
        Ok(())
    }
}
