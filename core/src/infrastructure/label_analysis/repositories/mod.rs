pub mod label_analysis_repository;

pub use label_analysis_repository::PostgresLabelAnalysisRepository;
