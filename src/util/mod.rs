//! Utility modules

pub mod text;
pub mod url;

pub use text::{char_type, delete_word_backward, is_punctuation, CharType};
pub use url::{is_valid, prepare_link};
