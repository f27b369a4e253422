use crate::error::{Result, SchedulerError};
use crate::types::{Class, ElectiveBasket, EngineConfig, EngineInput, FixedSlot, FixedTeacherAssignment, Room, Subject, Teacher};
use std::fs;
use std::path::Path;

/// Load every persisted table (§6) from a directory and assemble an
/// `EngineInput`. The engine never reads or writes these files itself
/// — this loader exists for the CLI boundary.
pub fn load_input_from_dir(dir: &Path) -> Result<EngineInput> {
    let teachers = load_teachers(&dir.join("teachers.json"))?;
    let subjects = load_subjects(&dir.join("subjects.json"))?;
    let classes = load_classes(&dir.join("classes.json"))?;
    let rooms = load_rooms(&dir.join("rooms.json"))?;
    let baskets = load_baskets(&dir.join("elective_baskets.json"))?;
    let fixed_slots = load_fixed_slots(&dir.join("fixed_slots.json"))?;
    let fixed_assignments = load_fixed_assignments(&dir.join("fixed_teacher_assignments.json"))?;
    let config = load_config_or_default(&dir.join("config.toml"));

    Ok(EngineInput {
        teachers,
        subjects,
        classes,
        rooms,
        baskets,
        fixed_slots,
        fixed_assignments,
        config,
    })
}

/// Load teachers from JSON file
pub fn load_teachers(path: &Path) -> Result<Vec<Teacher>> {
    load_json_file(path)
}

/// Load subjects from JSON file
pub fn load_subjects(path: &Path) -> Result<Vec<Subject>> {
    load_json_file(path)
}

/// Load classes from JSON file
pub fn load_classes(path: &Path) -> Result<Vec<Class>> {
    load_json_file(path)
}

/// Load rooms from JSON file
pub fn load_rooms(path: &Path) -> Result<Vec<Room>> {
    load_json_file(path)
}

/// Load elective baskets from JSON file
pub fn load_baskets(path: &Path) -> Result<Vec<ElectiveBasket>> {
    load_json_file(path)
}

/// Load fixed slots from JSON file. Absent file means no fixed slots.
pub fn load_fixed_slots(path: &Path) -> Result<Vec<FixedSlot>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    load_json_file(path)
}

/// Load fixed teacher assignments from JSON file. Absent file means
/// none declared.
pub fn load_fixed_assignments(path: &Path) -> Result<Vec<FixedTeacherAssignment>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    load_json_file(path)
}

/// Load config from TOML file, or use defaults
pub fn load_config_or_default(path: &Path) -> EngineConfig {
    if path.exists() {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => EngineConfig::default(),
        }
    } else {
        EngineConfig::default()
    }
}

/// Write the generated allocations as JSON — the only table the engine
/// itself is allowed to produce.
pub fn write_allocations(path: &Path, allocations: &[crate::types::Allocation]) -> Result<()> {
    let json = serde_json::to_string_pretty(allocations)?;
    fs::write(path, json).map_err(|e| {
        SchedulerError::FileRead {
            path: path.display().to_string(),
            source: e,
        }
        .into()
    })
}

/// Generic JSON file loader
fn load_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let path_str = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|e| SchedulerError::FileRead {
        path: path_str.clone(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| {
        SchedulerError::JsonParse {
            file: path_str,
            message: e.to_string(),
        }
        .into()
    })
}
