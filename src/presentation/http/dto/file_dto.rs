use serde::Serialize;

use crate::application::use_cases::upload_file::UploadFileResponse;
use crate::domain::entities::File;

#[derive(Debug, Serialize)]
pub struct FileResponseDto {
    pub file_id: String,
    pub file_name: String,
    pub created_at: String,
}

impl From<File> for FileResponseDto {
    fn from(file: File) -> Self {
        Self {
            file_id: file.remote_id().to_string(),
            file_name: file.file_name().to_string(),
            created_at: file.created_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UploadResponseDto {
    pub file_id: String,
    pub file_name: String,
    pub already_attached: bool,
}

impl From<UploadFileResponse> for UploadResponseDto {
    fn from(response: UploadFileResponse) -> Self {
        Self {
            file_id: response.file_id,
            file_name: response.file_name,
            already_attached: response.already_attached,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FileListResponseDto {
    pub files: Vec<FileResponseDto>,
}
