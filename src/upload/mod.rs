mod client;
mod files;
mod types;

pub use client::ReportClient;
pub use files::collect_upload_files;
pub use types::{Checklist, ChecklistKey, DownloadStatus, FileSource, UploadFile};
