pub mod audit;
pub mod loan;
pub mod member;
pub mod notice;
pub mod pdc;
pub mod relations;
