pub mod chars;
pub mod waters;
