use crate::runtime::data_structures::dictionary::Dictionary;

/// The core words of the language.
pub mod base_words;

/// Words that perform I/O operations.
pub mod io_words;

/// Called to register the full set of builtin words into a dictionary.
pub fn register_builtin_words(dictionary: &mut Dictionary) {
    base_words::register_base_words(dictionary);
    io_words::register_io_words(dictionary);
}
