pub mod chat;
pub mod health;
pub mod teach;

pub use chat::chat;
pub use health::health_check;
pub use teach::{skip, teach};
