pub mod downloader;
pub mod errors;
pub mod providers;
pub mod r#trait;
