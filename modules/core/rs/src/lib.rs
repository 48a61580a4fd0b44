pub mod alignable;
pub mod num;
