pub mod events;
pub mod health;
pub mod request;
pub mod tools;
