mod counter;
mod engine;

pub use engine::RiskAnalyzer;
