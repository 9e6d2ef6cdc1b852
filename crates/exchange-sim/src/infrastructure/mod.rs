pub mod generator;

pub use generator::MarketGenerator;
