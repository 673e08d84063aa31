//! Action outputs and result formatting

pub mod json_format;
pub mod writer;

pub use writer::ActionOutput;
