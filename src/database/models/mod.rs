pub mod home;
pub mod homeowner;
pub mod user;

pub use home::{DefaultHome, Home, NewHome};
pub use homeowner::Homeowner;
pub use user::LegacyUser;
