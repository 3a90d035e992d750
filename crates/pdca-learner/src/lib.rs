pub mod learner;
pub mod models;
pub mod repository;
pub mod sqlite_store;

pub use learner::{
    analyze_records, build_learning_model, default_learning_model, default_trend_analysis,
    performance_ratio, personalization_factor, PersonalizationLearner,
};
pub use models::*;
pub use repository::{InMemoryRecordStore, RecordRepository};
pub use sqlite_store::SqliteRecordStore;
