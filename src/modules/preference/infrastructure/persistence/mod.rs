pub mod preference_repository_impl;

pub use preference_repository_impl::PreferenceRepositoryImpl;
