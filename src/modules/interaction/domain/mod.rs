pub mod entities;
pub mod repositories;
pub mod value_objects;

pub use entities::Interaction;
pub use repositories::InteractionRepository;
pub use value_objects::LikeStatus;

#[cfg(test)]
pub use repositories::MockInteractionRepository;
