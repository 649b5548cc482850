pub mod build_data;
pub mod cli;
pub mod inspect;
pub mod reader;
