pub mod command;
pub mod dir;
pub mod downloader_def;
pub mod errors;
pub mod logger;
pub mod shlex;
#[cfg(test)]
pub mod test_server;
pub mod variables;
