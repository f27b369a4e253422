use super::{
    Class, ClassId, ElectiveBasket, FixedSlot, FixedTeacherAssignment, Room, Subject, Teacher,
    NUM_DAYS, NUM_PERIODS,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Fixed timetable geometry plus the lab-start restriction. Lives in a
/// config record rather than scattered constants so a department with
/// different period counts would only need to change this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_periods_per_day")]
    pub periods_per_day: u8,
    #[serde(default = "default_days_per_week")]
    pub days_per_week: u8,
    #[serde(default = "default_lab_starts")]
    pub lab_starts: Vec<u8>,
}

fn default_periods_per_day() -> u8 {
    NUM_PERIODS
}

fn default_days_per_week() -> u8 {
    NUM_DAYS
}

fn default_lab_starts() -> Vec<u8> {
    vec![3, 5]
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            periods_per_day: NUM_PERIODS,
            days_per_week: NUM_DAYS,
            lab_starts: vec![3, 5],
        }
    }
}

/// Snapshot of the domain model a run is invoked with.
#[derive(Debug, Clone)]
pub struct EngineInput {
    pub teachers: Vec<Teacher>,
    pub subjects: Vec<Subject>,
    pub classes: Vec<Class>,
    pub rooms: Vec<Room>,
    pub baskets: Vec<ElectiveBasket>,
    pub fixed_slots: Vec<FixedSlot>,
    pub fixed_assignments: Vec<FixedTeacherAssignment>,
    pub config: EngineConfig,
}

/// Options controlling a single run of the engine.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Random seed; identical inputs and seed yield byte-identical
    /// output.
    pub seed: u64,
    /// Whether the caller wants any previously persisted allocations
    /// cleared before this run (the engine itself never reads existing
    /// allocations — it always starts from an empty World State — this
    /// flag is surfaced for the caller's own persistence decision).
    pub clear_existing: bool,
    /// Restrict generation to a subset of classes, or all of them.
    pub restrict_to_classes: Option<HashSet<ClassId>>,
    /// Whether to run the genetic optimizer between Phase 6 and Phase 7.
    pub run_optimizer: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            seed: 0,
            clear_existing: false,
            restrict_to_classes: None,
            run_optimizer: true,
        }
    }
}
