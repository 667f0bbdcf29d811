pub mod auth;
pub mod request_id;

pub use auth::AuthenticatedUser;
pub use request_id::RequestId;
