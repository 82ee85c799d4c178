pub mod chomsky_normal_form;
pub mod context_free;
pub mod normalize;
pub mod parse;
pub mod types;
