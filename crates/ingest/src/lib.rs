pub mod document;
pub mod error;
pub mod reader;

pub use document::{SourceDocument, SourceKind};
pub use error::IngestError;
pub use reader::PdfReader;
