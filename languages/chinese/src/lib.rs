pub mod dictionary;
pub mod loader;
pub mod processor;
pub mod translator;

pub use dictionary::HanziDictionary;
pub use loader::HanziLoader;
pub use processor::{CAPTION_PUNCTUATION, ChineseProcessor, is_separator};
pub use translator::ChineseTranslator;
