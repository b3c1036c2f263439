pub mod persistence;

pub use persistence::PreferenceRepositoryImpl;
