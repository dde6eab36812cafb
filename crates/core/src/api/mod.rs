pub mod client;
pub mod endpoints;
pub mod traits;
