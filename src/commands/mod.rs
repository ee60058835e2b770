pub mod init;
pub mod setup;
