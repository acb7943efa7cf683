pub mod parse;
pub mod score;
