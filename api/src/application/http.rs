pub mod estimate;
pub mod server;
