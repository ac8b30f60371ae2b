pub mod analysis;
pub mod review;

pub use analysis::{AnalysisResult, FeatureSentiment, Sentiment};
pub use review::Review;
