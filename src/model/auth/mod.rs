mod origin;
mod token;

pub use origin::{client_ip, ClientIp};
pub use token::{AuthToken, AUTH_TOKEN_COOKIE};
