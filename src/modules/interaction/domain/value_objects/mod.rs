pub mod like_status;

pub use like_status::LikeStatus;
