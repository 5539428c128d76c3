mod state;
mod ui;

use crate::error::ClientError;
use crate::upload::{
    collect_upload_files, Checklist, DownloadStatus, FileSource, ReportClient, UploadFile,
};
use crate::utils::period::Period;
use derivative::Derivative;
use eframe::{egui, App};
use rfd::FileDialog;
use state::{Ticket, UploadSession};
use std::future::Future;
use std::path::PathBuf;
use std::sync::mpsc as std_mpsc;
use tokio::runtime::Runtime;
use tracing::{debug, info, warn};

enum WorkerEvent {
    UploadFinished {
        ticket: Ticket,
        result: Result<Checklist, ClientError>,
    },
    StatusFinished {
        ticket: Ticket,
        result: Result<DownloadStatus, ClientError>,
    },
    DownloadFinished {
        period: Period,
        result: Result<PathBuf, ClientError>,
    },
}

#[derive(Derivative)]
#[derivative(Debug)]
pub struct UvrUploader {
    session: UploadSession,
    year_options: [i32; 3],
    #[derivative(Debug = "ignore")]
    client: ReportClient,
    #[derivative(Debug = "ignore")]
    runtime: Runtime,
    #[derivative(Debug = "ignore")]
    ctx: egui::Context,
    #[derivative(Debug = "ignore")]
    event_sender: std_mpsc::Sender<WorkerEvent>,
    #[derivative(Debug = "ignore")]
    event_receiver: std_mpsc::Receiver<WorkerEvent>,
}

impl UvrUploader {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        client: ReportClient,
        runtime: Runtime,
        period: Period,
        year_options: [i32; 3],
    ) -> Self {
        let (event_sender, event_receiver) = std_mpsc::channel();
        let mut app = Self {
            session: UploadSession::new(period),
            year_options,
            client,
            runtime,
            ctx: cc.egui_ctx.clone(),
            event_sender,
            event_receiver,
        };

        let ticket = app.session.begin_status_query();
        app.query_download_status(ticket);
        app
    }

    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = WorkerEvent> + Send + 'static,
    {
        let sender = self.event_sender.clone();
        let ctx = self.ctx.clone();
        self.runtime.spawn(async move {
            let event = task.await;
            if sender.send(event).is_err() {
                debug!("ui closed before worker result was delivered");
            }
            ctx.request_repaint();
        });
    }

    pub fn start_upload(&mut self, files: Vec<UploadFile>) {
        if !self.session.can_upload() {
            debug!(files = files.len(), "upload already in progress; ignoring new files");
            return;
        }
        if files.is_empty() {
            warn!("no files selected");
            return;
        }

        let ticket = self.session.begin_upload();
        info!(files = files.len(), period = %ticket.period, "starting upload");

        let client = self.client.clone();
        self.spawn(async move {
            let result = client.run_reports(&files, ticket.period).await;
            WorkerEvent::UploadFinished { ticket, result }
        });
    }

    fn query_download_status(&self, ticket: Ticket) {
        let client = self.client.clone();
        self.spawn(async move {
            let result = client.download_status(ticket.period).await;
            WorkerEvent::StatusFinished { ticket, result }
        });
    }

    pub fn select_period(&mut self, period: Period) {
        if period == self.session.period {
            return;
        }
        info!(%period, "period changed");
        let ticket = self.session.change_period(period);
        self.query_download_status(ticket);
    }

    pub fn pick_files(&mut self) {
        if let Some(paths) = FileDialog::new().pick_files() {
            self.start_upload(collect_upload_files(&paths));
        }
    }

    pub fn pick_folder(&mut self) {
        if let Some(path) = FileDialog::new().pick_folder() {
            self.start_upload(collect_upload_files(&[path]));
        }
    }

    pub fn save_processed_files(&mut self) {
        if !self.session.can_download() {
            return;
        }
        let period = self.session.period;
        let Some(dest) = FileDialog::new()
            .set_file_name(period.archive_name())
            .add_filter("Zip archive", &["zip"])
            .save_file()
        else {
            return;
        };

        self.session.begin_download();
        let client = self.client.clone();
        self.spawn(async move {
            let result = client
                .download_processed_files(period, &dest)
                .await
                .map(|_| dest);
            WorkerEvent::DownloadFinished { period, result }
        });
    }

    pub fn open_processed_files(&mut self) {
        if !self.session.can_download() {
            return;
        }
        let period = self.session.period;
        let opened = self
            .client
            .processed_files_url(period)
            .and_then(|url| {
                info!(%url, "opening processed reports in browser");
                open::that(url.as_str()).map_err(ClientError::from)
            });
        if let Err(e) = opened {
            self.session.finish_download(period, Err(e));
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() {
            return;
        }
        if !self.session.can_upload() {
            debug!(count = dropped.len(), "ignoring files dropped while loading");
            return;
        }
        self.start_upload(dropped_to_upload_files(dropped));
    }

    pub fn update_state(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            match event {
                WorkerEvent::UploadFinished { ticket, result } => {
                    self.session.finish_upload(ticket, result);
                }
                WorkerEvent::StatusFinished { ticket, result } => {
                    self.session.finish_status_query(ticket, result);
                }
                WorkerEvent::DownloadFinished { period, result } => {
                    self.session.finish_download(period, result);
                }
            }
        }
    }
}

fn dropped_to_upload_files(dropped: Vec<egui::DroppedFile>) -> Vec<UploadFile> {
    let mut files = Vec::new();
    for file in dropped {
        if let Some(path) = file.path {
            files.extend(collect_upload_files(&[path]));
        } else if let Some(bytes) = file.bytes {
            files.push(UploadFile {
                name: file.name,
                source: FileSource::Bytes(bytes),
            });
        } else {
            warn!(name = %file.name, "dropped file has neither a path nor contents");
        }
    }
    files
}

impl App for UvrUploader {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);
        self.update_state();
        self.render(ctx);
    }
}
