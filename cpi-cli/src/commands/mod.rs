pub mod generate;
pub mod registry;
