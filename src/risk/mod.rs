mod models;

pub use models::{
    AdditionalInfo, AnalysisResult, ChainModel, ChainSpec, RiskTier, TopTransaction,
};
