pub mod charts;
pub mod check;
pub mod completion;
pub mod config;
pub mod export;
pub mod index;
