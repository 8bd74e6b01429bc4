pub mod delete;
pub mod resolve;
