pub mod core;
pub mod offline;
pub mod publisher;
pub mod stream;
