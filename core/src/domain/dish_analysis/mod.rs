pub mod entities;
pub mod fallback;
pub mod interpreter;
pub mod policies;
pub mod ports;
pub mod prompts;
pub mod schema;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use ports::*;
pub use value_objects::*;
