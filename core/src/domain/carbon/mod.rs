pub mod services;
pub mod table;
pub mod value_objects;

pub use services::*;
pub use table::*;
pub use value_objects::*;
