pub mod chats;
pub mod init;
pub mod recent;
pub mod register;
pub mod report;
