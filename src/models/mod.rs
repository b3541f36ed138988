pub mod anime;
pub mod comment;
pub mod rating;
pub mod response;
pub mod user;

pub use anime::*;
pub use comment::*;
pub use rating::*;
pub use response::*;
pub use user::*;
