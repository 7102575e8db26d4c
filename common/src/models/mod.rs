pub mod api_user;

pub use api_user::ApiUser;
