//! Academic timetable generation engine.
//!
//! Given a snapshot of teachers, subjects, classes, rooms, elective
//! baskets and fixed slots, produces a conflict-free weekly timetable
//! as a flat list of allocations.
//!
//! # Algorithm overview
//!
//! The scheduler runs nine phases over a single in-memory `WorldState`:
//! 0. Validate input (hours, lab parity, basket shape).
//! 1. Bind a teacher to every (class, subject, component) obligation.
//! 2. Place elective theory/tutorial periods, basket-synchronized.
//! 3. Place elective lab blocks, basket-synchronized.
//! 4. Install fixed slots verbatim.
//! 5. Place regular (non-elective) lab blocks.
//! 6. Fill remaining regular theory/tutorial periods.
//! 7. Optionally run a genetic post-optimization pass.
//! 8. Re-validate and emit the allocation list plus a report.
//!
//! # Example
//!
//! ```no_run
//! use timetable_engine::parser::load_input_from_dir;
//! use timetable_engine::scheduler::generate;
//! use timetable_engine::types::RunOptions;
//! use timetable_engine::validator::validate_allocations;
//! use std::path::Path;
//!
//! let input = load_input_from_dir(Path::new("./data/demo")).unwrap();
//! let outcome = generate(&input, &RunOptions::default(), false).unwrap();
//! let validation = validate_allocations(&outcome.allocations, &input);
//! println!("Score: {:.1}", validation.total_score);
//! ```

pub mod binding;
pub mod elective;
pub mod error;
pub mod parser;
pub mod reporter;
pub mod requirements;
pub mod rng;
pub mod scheduler;
pub mod types;
pub mod validator;
pub mod world;

pub use error::{Result, SchedulerError};
