pub mod alert;
pub mod follow_along;
pub mod name_prompt;
pub mod symbol_grid;
