pub mod advice;
pub mod loan;
