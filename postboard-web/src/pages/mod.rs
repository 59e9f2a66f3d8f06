mod auth;
mod error;
mod home;

pub use auth::AuthPage;
pub use error::ErrorPage;
pub use home::HomePage;
