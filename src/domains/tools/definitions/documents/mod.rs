//! Document tools: CRUD, content retrieval, search, and bulk editing.

mod bulk_edit;
mod content;
mod crud;
mod search;

pub use bulk_edit::BulkEditDocumentsTool;
pub use content::GetDocumentContentTool;
pub use crud::{
    CreateDocumentTool, DeleteDocumentTool, GetDocumentTool, ListDocumentsTool, UpdateDocumentTool,
};
pub use search::{FindSimilarDocumentsTool, SearchDocumentsTool};
