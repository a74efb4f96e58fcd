pub mod minio;

pub use minio::MinioLabelImageStorage;
