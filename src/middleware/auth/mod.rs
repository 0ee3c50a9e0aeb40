pub mod access;
pub mod credential;
pub mod redirect;
