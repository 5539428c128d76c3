use crate::error::ClientError;
use crate::upload::{Checklist, DownloadStatus};
use crate::utils::period::Period;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Progress,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Waiting,
    Processing,
    AllProcessed,
    InsufficientFiles,
    UploadFailed,
    ReportsAvailable(Period),
    StatusCheckFailed(Period),
    Downloaded(PathBuf),
    DownloadFailed,
}

impl StatusMessage {
    pub fn tone(&self) -> Tone {
        match self {
            Self::Waiting => Tone::Neutral,
            Self::Processing => Tone::Progress,
            Self::AllProcessed | Self::ReportsAvailable(_) | Self::Downloaded(_) => Tone::Success,
            Self::InsufficientFiles
            | Self::UploadFailed
            | Self::StatusCheckFailed(_)
            | Self::DownloadFailed => Tone::Error,
        }
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Waiting => {
                write!(f, "Waiting for file upload. Upload files in the dropzone above.")
            }
            Self::Processing => write!(f, "Processing files... (this may take up to 2 minutes)"),
            Self::AllProcessed => write!(
                f,
                "All reports were processed successfully. Download the files below."
            ),
            Self::InsufficientFiles => write!(
                f,
                "Insufficient files provided. Refer to the checklist below to see what files are missing."
            ),
            Self::UploadFailed => write!(
                f,
                "There was an error. Wait a moment and try again or if the problem persists report the error."
            ),
            Self::ReportsAvailable(period) => write!(
                f,
                "{period} reports are available. Download below or rerun reports."
            ),
            Self::StatusCheckFailed(period) => write!(
                f,
                "Could not check download status for {period}. Change the month or year to check again."
            ),
            Self::Downloaded(path) => write!(f, "Processed reports saved to {}.", path.display()),
            Self::DownloadFailed => write!(
                f,
                "The processed reports could not be downloaded. Wait a moment and try again."
            ),
        }
    }
}

/// Identifies one outstanding request. Only the newest ticket of each kind
/// may change the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    seq: u64,
    pub period: Period,
}

/// Client-side state of the upload/status workflow for the selected period.
#[derive(Debug, Clone)]
pub struct UploadSession {
    pub period: Period,
    pub is_loading: bool,
    pub is_downloading: bool,
    pub checklist: Checklist,
    pub upload_count: Option<usize>,
    pub status: StatusMessage,
    pub download_ready: bool,
    upload_seq: u64,
    status_seq: u64,
}

impl UploadSession {
    pub fn new(period: Period) -> Self {
        Self {
            period,
            is_loading: false,
            is_downloading: false,
            checklist: Checklist::default(),
            upload_count: None,
            status: StatusMessage::Waiting,
            download_ready: false,
            upload_seq: 0,
            status_seq: 0,
        }
    }

    pub fn can_upload(&self) -> bool {
        !self.is_loading
    }

    pub fn can_download(&self) -> bool {
        self.download_ready && !self.is_loading && !self.is_downloading
    }

    /// Resets the session for a fresh submission. Any status query still in
    /// flight is invalidated so its answer cannot overwrite the progress state.
    pub fn begin_upload(&mut self) -> Ticket {
        self.upload_seq += 1;
        self.status_seq += 1;
        self.is_loading = true;
        self.download_ready = false;
        self.checklist = Checklist::default();
        self.upload_count = None;
        self.status = StatusMessage::Processing;
        Ticket {
            seq: self.upload_seq,
            period: self.period,
        }
    }

    /// Applies a run-reports result. Returns false when the ticket is stale.
    pub fn finish_upload(&mut self, ticket: Ticket, result: Result<Checklist, ClientError>) -> bool {
        if ticket.seq != self.upload_seq || ticket.period != self.period {
            debug!(seq = ticket.seq, period = %ticket.period, "dropping stale upload result");
            return false;
        }

        self.is_loading = false;
        match result {
            Ok(checklist) => {
                let complete = checklist.is_complete();
                self.checklist = checklist;
                self.upload_count = Some(checklist.present_count());
                self.download_ready = complete;
                self.status = if complete {
                    StatusMessage::AllProcessed
                } else {
                    StatusMessage::InsufficientFiles
                };
            }
            Err(e) => {
                warn!(period = %ticket.period, "upload failed: {e}");
                self.status = StatusMessage::UploadFailed;
            }
        }
        true
    }

    /// Switches to another period and starts the status query for it. An upload
    /// still in flight is abandoned.
    pub fn change_period(&mut self, period: Period) -> Ticket {
        self.period = period;
        self.checklist = Checklist::default();
        self.upload_count = None;
        if self.is_loading {
            self.upload_seq += 1;
            self.is_loading = false;
        }
        self.begin_status_query()
    }

    pub fn begin_status_query(&mut self) -> Ticket {
        self.status_seq += 1;
        self.download_ready = false;
        Ticket {
            seq: self.status_seq,
            period: self.period,
        }
    }

    /// Applies a download-status answer. Never touches the checklist.
    pub fn finish_status_query(
        &mut self,
        ticket: Ticket,
        result: Result<DownloadStatus, ClientError>,
    ) -> bool {
        if ticket.seq != self.status_seq || ticket.period != self.period {
            debug!(seq = ticket.seq, period = %ticket.period, "dropping stale status result");
            return false;
        }

        match result {
            Ok(DownloadStatus {
                download_available: true,
            }) => {
                self.download_ready = true;
                self.status = StatusMessage::ReportsAvailable(ticket.period);
            }
            Ok(_) => self.status = StatusMessage::Waiting,
            Err(e) => {
                warn!(period = %ticket.period, "download status check failed: {e}");
                self.download_ready = false;
                self.status = StatusMessage::StatusCheckFailed(ticket.period);
            }
        }
        true
    }

    pub fn begin_download(&mut self) {
        self.is_downloading = true;
    }

    /// Records a download outcome. A result for a period that is no longer
    /// selected only clears the in-progress flag.
    pub fn finish_download(&mut self, period: Period, result: Result<PathBuf, ClientError>) {
        self.is_downloading = false;
        if period != self.period {
            debug!(%period, current = %self.period, "dropping download result for another period");
            return;
        }
        self.status = match result {
            Ok(path) => StatusMessage::Downloaded(path),
            Err(e) => {
                warn!("download of processed reports failed: {e}");
                StatusMessage::DownloadFailed
            }
        };
    }
}
