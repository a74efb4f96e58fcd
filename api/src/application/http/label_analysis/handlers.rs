pub mod analyze_label_image;
pub mod analyze_label_text;
pub mod get_analyses;
pub mod get_analysis;
