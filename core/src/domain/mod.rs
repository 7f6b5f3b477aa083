pub mod carbon;
pub mod common;
pub mod dish_analysis;
