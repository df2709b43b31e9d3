pub mod loans;
pub mod members;
pub mod notices;
