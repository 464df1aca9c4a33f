pub mod pagination;
pub mod recipes;
