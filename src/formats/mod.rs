pub mod json;
pub mod report;
pub mod srt;
pub mod time;
