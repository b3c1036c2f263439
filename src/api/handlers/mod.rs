pub mod cuisines;
pub mod interactions;
pub mod preferences;
pub mod restaurants;
