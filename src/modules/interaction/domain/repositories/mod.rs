pub mod interaction_repository;

pub use interaction_repository::InteractionRepository;

#[cfg(test)]
pub use interaction_repository::MockInteractionRepository;
