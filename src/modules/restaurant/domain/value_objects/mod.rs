pub mod opening_hours;
pub mod persona;

pub use opening_hours::{
    minutes_to_clock, parse_time_to_minutes, OpeningHoursEntry, Weekday, WeeklySchedule,
};
pub use persona::{Persona, PersonaFilter, PersonaPolicy, PersonaSort};
