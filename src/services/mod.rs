pub mod analytics;
pub mod games;
pub mod server;
