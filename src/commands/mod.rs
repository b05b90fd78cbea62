pub mod drill;
pub mod scores;
pub mod sets;
