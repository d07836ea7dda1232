pub mod badge;
pub mod report;
pub mod round;
