pub mod collection;
pub mod error;
pub mod types;

pub use error::Error;
pub use types::{Article, ArticleStatus, Collection};

pub type Result<T> = std::result::Result<T, Error>;
