pub mod generator;

pub use generator::CommandGenerator;
