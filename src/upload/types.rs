use crate::error::ChecklistError;
use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

/// One of the 20 report files the server must see before it can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChecklistKey {
    RgnAll,
    Ogm,
    UserRole,
    Pod,
    Tta,
    DanyaUser,
    Lewin,
    Monitoring,
    Rgn1,
    Rgn2,
    Rgn3,
    Rgn4,
    Rgn5,
    Rgn6,
    Rgn7,
    Rgn8,
    Rgn9,
    Rgn10,
    Rgn11,
    Rgn12,
}

impl ChecklistKey {
    /// Display order.
    pub const ALL: [ChecklistKey; 20] = [
        Self::RgnAll,
        Self::Ogm,
        Self::UserRole,
        Self::Pod,
        Self::Tta,
        Self::DanyaUser,
        Self::Lewin,
        Self::Monitoring,
        Self::Rgn1,
        Self::Rgn2,
        Self::Rgn3,
        Self::Rgn4,
        Self::Rgn5,
        Self::Rgn6,
        Self::Rgn7,
        Self::Rgn8,
        Self::Rgn9,
        Self::Rgn10,
        Self::Rgn11,
        Self::Rgn12,
    ];

    pub fn wire_name(self) -> &'static str {
        match self {
            Self::RgnAll => "rgnAllFileUploaded",
            Self::Ogm => "ogmFileUploaded",
            Self::UserRole => "userRoleFileUploaded",
            Self::Pod => "podFileUploaded",
            Self::Tta => "ttaFileUploaded",
            Self::DanyaUser => "danyaUserFileUploaded",
            Self::Lewin => "lewinFileUploaded",
            Self::Monitoring => "monitoringFileUploaded",
            Self::Rgn1 => "rgn1FileUploaded",
            Self::Rgn2 => "rgn2FileUploaded",
            Self::Rgn3 => "rgn3FileUploaded",
            Self::Rgn4 => "rgn4FileUploaded",
            Self::Rgn5 => "rgn5FileUploaded",
            Self::Rgn6 => "rgn6FileUploaded",
            Self::Rgn7 => "rgn7FileUploaded",
            Self::Rgn8 => "rgn8FileUploaded",
            Self::Rgn9 => "rgn9FileUploaded",
            Self::Rgn10 => "rgn10FileUploaded",
            Self::Rgn11 => "rgn11FileUploaded",
            Self::Rgn12 => "rgn12FileUploaded",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::RgnAll => "RgnAll HSES Accounts.xlsx",
            Self::Ogm => "Rgn0 OGM Accounts.xlsx",
            Self::UserRole => "UserRoleListingReport.xlsx",
            Self::Pod => "Rgn0 HSES POD Accounts.xlsx",
            Self::Tta => "Rgn0 HSES T&TA Accounts.xlsx",
            Self::DanyaUser => "Danya User HSES Accounts.xlsx",
            Self::Lewin => "Lewin Accounts.xlsx",
            Self::Monitoring => "Monitoring_Network_Users.xlsx",
            Self::Rgn1 => "Rgn01 HSES Accounts.xlsx",
            Self::Rgn2 => "Rgn02 HSES Accounts.xlsx",
            Self::Rgn3 => "Rgn03 HSES Accounts.xlsx",
            Self::Rgn4 => "Rgn04 HSES Accounts.xlsx",
            Self::Rgn5 => "Rgn05 HSES Accounts.xlsx",
            Self::Rgn6 => "Rgn06 HSES Accounts.xlsx",
            Self::Rgn7 => "Rgn07 HSES Accounts.xlsx",
            Self::Rgn8 => "Rgn08 HSES Accounts.xlsx",
            Self::Rgn9 => "Rgn09 HSES Accounts.xlsx",
            Self::Rgn10 => "Rgn10 HSES Accounts.xlsx",
            Self::Rgn11 => "Rgn11 HSES Accounts.xlsx",
            Self::Rgn12 => "Rgn12 HSES Accounts.xlsx",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.wire_name() == name)
    }
}

/// Which of the required files the server recognised in the last upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "Value")]
pub struct Checklist {
    present: [bool; 20],
}

impl Checklist {
    #[cfg(test)]
    pub fn complete() -> Self {
        Self {
            present: [true; 20],
        }
    }

    pub fn is_present(&self, key: ChecklistKey) -> bool {
        self.present[key.index()]
    }

    pub fn set(&mut self, key: ChecklistKey, present: bool) {
        self.present[key.index()] = present;
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChecklistKey, bool)> + '_ {
        ChecklistKey::ALL
            .into_iter()
            .map(|key| (key, self.is_present(key)))
    }

    pub fn present_count(&self) -> usize {
        self.present.iter().filter(|present| **present).count()
    }

    pub fn is_complete(&self) -> bool {
        self.present.iter().all(|present| *present)
    }

    /// Strict reading of a run-reports response: exactly the 20 known keys, all booleans.
    pub fn from_value(value: &Value) -> Result<Self, ChecklistError> {
        let object = value.as_object().ok_or(ChecklistError::NotAnObject)?;

        let mut checklist = Self::default();
        let mut seen = [false; 20];
        for (name, flag) in object {
            let key = ChecklistKey::from_wire_name(name)
                .ok_or_else(|| ChecklistError::UnknownKey(name.clone()))?;
            let present = flag
                .as_bool()
                .ok_or_else(|| ChecklistError::NotABoolean(name.clone()))?;
            checklist.set(key, present);
            seen[key.index()] = true;
        }

        if let Some(missing) = ChecklistKey::ALL.into_iter().find(|key| !seen[key.index()]) {
            return Err(ChecklistError::MissingKey(missing.wire_name()));
        }

        Ok(checklist)
    }
}

impl TryFrom<Value> for Checklist {
    type Error = ChecklistError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(&value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DownloadStatus {
    pub download_available: bool,
}

#[derive(Debug, Clone)]
pub enum FileSource {
    Path(PathBuf),
    Bytes(Arc<[u8]>),
}

/// A file queued for submission, named by its base name.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub source: FileSource,
}
