pub mod players;
pub mod rules;
