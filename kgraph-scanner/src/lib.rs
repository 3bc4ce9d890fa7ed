pub mod error;
pub mod extract;
pub mod result;
pub mod source;

pub use error::ScanError;
pub use result::{ArticleContent, Collection, Link, UserRecord};
pub use source::load_collection;
