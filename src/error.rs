use std::path::PathBuf;
use thiserror::Error;

pub type ArrangeResult<T> = Result<T, ArrangeError>;

/// 單一檔案整理過程中可能發生的錯誤
#[derive(Error, Debug)]
pub enum ArrangeError {
    #[error("缺少 SourceFile 標籤")]
    MissingSourceFile,

    #[error("日期格式錯誤 {tag}: {value:?}")]
    MalformedDate { tag: &'static str, value: String },

    #[error("無法讀取修改時間 {}: {source}", .path.display())]
    ModificationTime {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("無法分配唯一檔名（已嘗試 {limit} 個）: {}", .directory.display())]
    SuffixExhausted { directory: PathBuf, limit: u32 },

    #[error("I/O 錯誤 {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ArrangeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
