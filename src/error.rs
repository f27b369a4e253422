use thiserror::Error;

/// Domain-specific errors for the scheduler
#[derive(Error, Debug)]
pub enum SchedulerError {
    // Input/Parse errors
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON in '{file}': {message}")]
    JsonParse { file: String, message: String },

    // Data validation errors (Phase 0)
    #[error("Subject '{subject_id}' has odd lab_hours ({lab_hours}); labs are two-period blocks")]
    OddLabHours { subject_id: String, lab_hours: u8 },

    #[error(
        "Class '{class_id}' weekly hours ({needed}) exceed its {available} placeable periods"
    )]
    HoursExceedCapacity {
        class_id: String,
        needed: u32,
        available: u32,
    },

    #[error("Basket '{basket_id}' has no participating classes or no subjects")]
    EmptyBasket { basket_id: String },

    #[error("Duplicate ID found: {id_type} '{id}'")]
    DuplicateId { id_type: String, id: String },

    #[error("Fixed slot references unknown {what} '{id}'")]
    UnknownReference { what: String, id: String },

    // Reporting / IO errors at the CLI boundary
    #[error("No schedule found at '{path}'")]
    ScheduleNotFound { path: String },
}

/// Use anyhow::Result at application boundaries
pub type Result<T> = anyhow::Result<T>;
