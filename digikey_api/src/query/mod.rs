mod keyword;
pub use self::keyword::{KeywordSearchRequest, MAX_RECORD_COUNT};

mod locale;
pub use self::locale::Locale;
