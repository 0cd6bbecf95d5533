pub mod batch;
pub mod course;

pub use batch::{Batch, BatchStatus, NewBatchRequest, UpdateBatchRequest, generate_batch_code};
pub use course::{Course, Level, NewCourseRequest, UpdateCourseRequest};
