pub mod visitor_repository;

pub use visitor_repository::PostgresVisitorRepository;
