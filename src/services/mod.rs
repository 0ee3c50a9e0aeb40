pub mod forward;
pub mod policy;
pub mod upstream;
