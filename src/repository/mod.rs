pub mod batches;
pub mod courses;
