//! Document ingestion: turning files on disk into a [`Corpus`](crate::corpus::Corpus).

pub mod normalize;
pub mod source;
pub mod zefania;

pub use source::{CollisionPolicy, DocumentSource, LoadOutcome, LoadReport, LoadedFile, SkippedFile};
pub use zefania::ZefaniaSource;
