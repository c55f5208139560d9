pub mod errors;
pub mod models;
pub mod ports;
pub mod service;

pub use errors::AuthError;
pub use models::EmailAddress;
pub use models::NewUser;
pub use models::Principal;
pub use models::TokenPair;
pub use models::User;
pub use ports::AuthServicePort;
pub use ports::UserStore;
pub use service::AuthService;
