pub mod movie;
pub mod rating;
pub mod tag;

pub use movie::{Movie, MovieId};
pub use rating::{Rating, UserId};
pub use tag::Tag;
