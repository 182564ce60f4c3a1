pub mod entry;
pub mod path;
pub mod transfer;
