//! Tool definitions module.
//!
//! This module exports all available tool definitions, grouped by the
//! paperless resource they operate on. Each group lives in its own file.

pub mod common;
pub mod correspondents;
pub mod custom_fields;
pub mod document_types;
pub mod documents;
pub mod server;
pub mod storage_paths;
pub mod tags;

pub use correspondents::{
    CreateCorrespondentTool, DeleteCorrespondentTool, GetCorrespondentTool, ListCorrespondentsTool,
    UpdateCorrespondentTool,
};
pub use custom_fields::{
    CreateCustomFieldTool, DeleteCustomFieldTool, GetCustomFieldTool, ListCustomFieldsTool,
    UpdateCustomFieldTool,
};
pub use document_types::{
    CreateDocumentTypeTool, DeleteDocumentTypeTool, GetDocumentTypeTool, ListDocumentTypesTool,
    UpdateDocumentTypeTool,
};
pub use documents::{
    BulkEditDocumentsTool, CreateDocumentTool, DeleteDocumentTool, FindSimilarDocumentsTool,
    GetDocumentContentTool, GetDocumentTool, ListDocumentsTool, SearchDocumentsTool,
    UpdateDocumentTool,
};
pub use server::{PingTool, ServerInfoTool};
pub use storage_paths::{
    CreateStoragePathTool, DeleteStoragePathTool, GetStoragePathTool, ListStoragePathsTool,
    UpdateStoragePathTool,
};
pub use tags::{CreateTagTool, DeleteTagTool, GetTagTool, ListTagsTool, UpdateTagTool};
