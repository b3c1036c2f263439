pub mod persistence;

pub use persistence::InteractionRepositoryImpl;
