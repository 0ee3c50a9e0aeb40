pub mod forward;
pub mod health;
pub mod public;
