use serde::{Deserialize, Serialize};

/// Number of teaching days in the week the engine schedules over.
pub const NUM_DAYS: u8 = 5;

/// Number of periods in a single day.
pub const NUM_PERIODS: u8 = 7;

/// Periods a lab block may start at (post-lunch pairs only: (3,4) and
/// (5,6)). A separate generic "any consecutive pair" code path existed
/// upstream but is not honored here.
pub const LAB_STARTS: [u8; 2] = [3, 5];

/// A (day, period) slot in the weekly timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    /// Day of week, 0-4 for Mon-Fri.
    pub day: u8,
    /// Period within the day, 0-6.
    pub period: u8,
}

impl Period {
    pub fn new(day: u8, period: u8) -> Self {
        Self { day, period }
    }

    /// Convert to a linear index (0..NUM_DAYS*NUM_PERIODS).
    pub fn to_linear(&self) -> usize {
        (self.day as usize) * (NUM_PERIODS as usize) + (self.period as usize)
    }

    /// Create from a linear index.
    pub fn from_linear(index: usize) -> Self {
        let day = (index / NUM_PERIODS as usize) as u8;
        let period = (index % NUM_PERIODS as usize) as u8;
        Self { day, period }
    }

    /// Human-readable day name.
    pub fn day_name(&self) -> &'static str {
        match self.day {
            0 => "Monday",
            1 => "Tuesday",
            2 => "Wednesday",
            3 => "Thursday",
            4 => "Friday",
            _ => "Unknown",
        }
    }

    /// True if this period is a legal lab start (post-lunch pair).
    pub fn is_lab_start(&self) -> bool {
        LAB_STARTS.contains(&self.period)
    }

    /// The second period of the lab block starting here.
    pub fn lab_continuation(&self) -> Period {
        Period::new(self.day, self.period + 1)
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "D{}P{}", self.day + 1, self.period + 1)
    }
}

/// All (day, period) slots in the week, in canonical order.
pub fn all_slots() -> Vec<Period> {
    (0..NUM_DAYS)
        .flat_map(|day| (0..NUM_PERIODS).map(move |period| Period::new(day, period)))
        .collect()
}
