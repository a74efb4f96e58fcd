pub mod tesseract;

pub use tesseract::TesseractTextExtractor;
