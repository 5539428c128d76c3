use crate::error::{ClientError, Result};
use crate::upload::types::{Checklist, DownloadStatus, UploadFile};
use crate::utils::cookie::cookie_value;
use crate::utils::period::Period;
use futures_util::StreamExt;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::REFERER;
use reqwest::multipart::{Form, Part};
use reqwest::{Response, Url};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

const CSRF_COOKIE: &str = "csrftoken";
const CSRF_HEADER: &str = "X-CSRFToken";
const INDEX_PATH: &str = "user_verification/";

/// HTTP client for the report server's user-verification endpoints.
#[derive(Clone)]
pub struct ReportClient {
    http: reqwest::Client,
    jar: Arc<Jar>,
    base: Url,
    csrf_token: Option<String>,
}

impl ReportClient {
    pub fn new(
        server_url: &str,
        csrf_token: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut base = Url::parse(server_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let jar = Arc::new(Jar::default());
        let mut builder = reqwest::Client::builder().cookie_provider(Arc::clone(&jar));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            jar,
            base,
            csrf_token,
        })
    }

    pub fn server_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base.join(path)?)
    }

    pub fn download_status_url(&self, period: Period) -> Result<Url> {
        self.endpoint(&format!(
            "user_verification/get_download_status/{}/{}",
            period.year,
            period.month_abbrev()
        ))
    }

    pub fn processed_files_url(&self, period: Period) -> Result<Url> {
        self.endpoint(&format!(
            "user_verification/get_processed_files/{}/{}",
            period.year,
            period.month_abbrev()
        ))
    }

    /// Token for the `X-CSRFToken` header. Falls back to loading the index
    /// page, which sets the `csrftoken` cookie, when the jar has none yet.
    pub async fn csrf_token(&self) -> Result<Option<String>> {
        if let Some(token) = &self.csrf_token {
            return Ok(Some(token.clone()));
        }
        if let Some(token) = self.cookie_token() {
            return Ok(Some(token));
        }

        let index = self.endpoint(INDEX_PATH)?;
        debug!(url = %index, "requesting csrf cookie");
        let fetched = match self.http.get(index).send().await {
            Ok(response) => check_status(response).map(|_| ()),
            Err(e) => Err(e.into()),
        };
        if let Err(e) = fetched {
            warn!("could not load the index page for a csrf cookie: {e}");
            return Ok(None);
        }
        Ok(self.cookie_token())
    }

    fn cookie_token(&self) -> Option<String> {
        let header = self.jar.cookies(&self.base)?;
        cookie_value(header.to_str().ok()?, CSRF_COOKIE)
    }

    /// Submits every file plus the period and returns the server's checklist.
    pub async fn run_reports(&self, files: &[UploadFile], period: Period) -> Result<Checklist> {
        if files.is_empty() {
            return Err(ClientError::NoFiles);
        }

        let mut form = Form::new();
        for (index, file) in files.iter().enumerate() {
            let contents = file.read_contents().await?;
            debug!(field = index, name = %file.name, bytes = contents.len(), "adding file part");
            form = form.part(
                format!("file{index}"),
                Part::bytes(contents).file_name(file.name.clone()),
            );
        }
        form = form
            .text("month", period.month_abbrev())
            .text("year", period.year.to_string());

        let token = self.csrf_token().await?;
        let url = self.endpoint("user_verification/run_reports")?;
        let mut request = self
            .http
            .post(url)
            .header(REFERER, self.endpoint(INDEX_PATH)?.as_str())
            .multipart(form);
        match token {
            Some(token) => request = request.header(CSRF_HEADER, token),
            None => warn!("no csrf token available; submitting without one"),
        }

        info!(files = files.len(), %period, "submitting reports");
        let response = check_status(request.send().await?)?;
        let body: Value = response.json().await?;
        let checklist = Checklist::from_value(&body)?;
        info!(
            present = checklist.present_count(),
            complete = checklist.is_complete(),
            "checklist received"
        );
        Ok(checklist)
    }

    pub async fn download_status(&self, period: Period) -> Result<DownloadStatus> {
        let url = self.download_status_url(period)?;
        debug!(%url, "querying download status");
        let response = check_status(self.http.get(url).send().await?)?;
        Ok(response.json().await?)
    }

    /// Streams the processed archive for `period` into `dest`, returning the bytes written.
    /// The archive lands in a `.part` sibling first and replaces `dest` only once complete.
    pub async fn download_processed_files(&self, period: Period, dest: &Path) -> Result<u64> {
        let url = self.processed_files_url(period)?;
        let response = check_status(self.http.get(url).send().await?)?;

        let partial = partial_path(dest);
        let written = match write_stream(response, &partial).await {
            Ok(written) => written,
            Err(e) => {
                if let Err(cleanup) = tokio::fs::remove_file(&partial).await {
                    debug!(path = %partial.display(), "partial download not removed: {cleanup}");
                }
                return Err(e);
            }
        };
        tokio::fs::rename(&partial, dest).await?;

        info!(%period, dest = %dest.display(), bytes = written, "processed reports saved");
        Ok(written)
    }
}

fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

async fn write_stream(response: Response, path: &Path) -> Result<u64> {
    let mut file = tokio::fs::File::create(path).await?;
    let mut written = 0u64;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ClientError::Status(status))
    }
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
