//! Core category-tree types and traits

pub mod category;
pub mod error;
pub mod field;
pub mod formatter;
pub mod level;
pub mod registry;
pub mod sink;
pub mod thread_tag;
pub mod timestamp;

pub use category::Category;
pub use error::{LoggerError, Result};
pub use field::{Field, FieldSequence, FieldValue};
pub use formatter::{Formatter, JsonFormatter, TextFormatter, CATEGORY_PAD_WIDTH, THREAD_TAG_PREFIX};
pub use level::Level;
pub use registry::Registry;
pub use sink::{FlushPolicy, Sink};
pub use thread_tag::current_thread_tag;
pub use timestamp::TimestampFormat;
