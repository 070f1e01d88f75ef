pub mod parse;
pub mod view;
