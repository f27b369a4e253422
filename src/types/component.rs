use serde::{Deserialize, Serialize};

/// The pedagogical kind of a teaching hour. A closed sum: every
/// requirement, binding and allocation carries exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Component {
    Theory,
    Lab,
    Tutorial,
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Component::Theory => "Theory",
            Component::Lab => "Lab",
            Component::Tutorial => "Tutorial",
        };
        write!(f, "{name}")
    }
}
