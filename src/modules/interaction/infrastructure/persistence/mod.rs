pub mod interaction_repository_impl;

pub use interaction_repository_impl::InteractionRepositoryImpl;
