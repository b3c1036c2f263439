pub mod import;
pub mod interaction;
pub mod preference;
pub mod restaurant;
