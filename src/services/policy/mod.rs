pub mod client;
pub mod remote;

pub use client::{AuthorizationQuery, Authorizer, Verdict};
pub use remote::RemoteAuthorizer;
