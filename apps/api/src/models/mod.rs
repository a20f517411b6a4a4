pub mod candidate;
pub mod skillpath;
