//! 目的地檔名解析模組
//!
//! 依拍攝時間與機型產生標準檔名，並針對目的地已存在的檔案處理重複與檔名衝突：
//! 內容相同視為重複（略過），內容不同則加上 `_001`、`_002`... 編號

use crate::error::{ArrangeError, ArrangeResult};
use crate::tools::capture_date::CaptureTimestamp;
use crate::tools::file_compare::files_identical;
use crate::tools::tag_set::UNKNOWN_MODEL;
use log::debug;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// 每個標準檔名最多嘗試的候選數（編號 0 ~ 998）
pub const DEFAULT_SUFFIX_LIMIT: u32 = 999;

/// 檔名解析結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// 可用的目的地路徑
    Accepted(PathBuf),
    /// 目的地已有內容完全相同的檔案
    Duplicate(PathBuf),
}

/// 目的地檔名解析器
///
/// 每次解析都直接檢查檔案系統，因此同一次執行中先前移動的檔案也會被納入衝突判斷。
/// 測試模式下不會真的移動，改以 `claimed` 記錄先前預計移入的路徑與其來源檔案，
/// 與實際存在的檔案同樣比對內容
#[derive(Debug, Clone)]
pub struct NameResolver {
    dest_root: PathBuf,
    suffix_limit: u32,
    dry_run: bool,
    claimed: HashMap<PathBuf, PathBuf>,
}

impl NameResolver {
    pub fn new(dest_root: impl Into<PathBuf>, suffix_limit: u32) -> Self {
        Self {
            dest_root: dest_root.into(),
            suffix_limit,
            dry_run: false,
            claimed: HashMap::new(),
        }
    }

    /// 測試模式下不建立目的地資料夾
    #[must_use]
    pub const fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    #[must_use]
    pub fn dest_root(&self) -> &Path {
        &self.dest_root
    }

    pub fn resolve(
        &mut self,
        timestamp: &CaptureTimestamp,
        model: &str,
        source: &Path,
    ) -> ArrangeResult<Resolution> {
        let model = sanitize_model(model);
        let directory = self.dest_root.join(timestamp.year_folder()).join(&model);
        if !self.dry_run {
            fs::create_dir_all(&directory).map_err(|e| ArrangeError::io(&directory, e))?;
        }

        let stem = timestamp.file_stem(&model);
        let extension = extension_of(source);

        for index in 0..self.suffix_limit {
            let candidate = directory.join(candidate_name(&stem, index, &extension));

            if let Some(claimant) = self.claimed.get(&candidate) {
                if files_identical(source, claimant).map_err(|e| ArrangeError::io(source, e))? {
                    return Ok(Resolution::Duplicate(candidate));
                }
                debug!("檔名衝突（預計移入的檔案內容不同）: {}", candidate.display());
                continue;
            }

            match fs::symlink_metadata(&candidate) {
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    if self.dry_run {
                        self.claimed
                            .insert(candidate.clone(), source.to_path_buf());
                    }
                    return Ok(Resolution::Accepted(candidate));
                }
                Err(e) => return Err(ArrangeError::io(&candidate, e)),
                Ok(meta) if meta.is_file() => {
                    if files_identical(source, &candidate).map_err(|e| ArrangeError::io(source, e))?
                    {
                        return Ok(Resolution::Duplicate(candidate));
                    }
                    debug!("檔名衝突（內容不同）: {}", candidate.display());
                }
                Ok(_) => debug!("檔名已被非檔案佔用: {}", candidate.display()),
            }
        }

        Err(ArrangeError::SuffixExhausted {
            directory,
            limit: self.suffix_limit,
        })
    }
}

/// 移除機型名稱中的空白與 `/`
///
/// 結果為空字串、`.` 或 `..` 時無法作為資料夾名稱，改用 `Unknown`
#[must_use]
pub fn sanitize_model(model: &str) -> String {
    let sanitized: String = model.chars().filter(|c| !matches!(c, ' ' | '/')).collect();
    match sanitized.as_str() {
        "" | "." | ".." => UNKNOWN_MODEL.to_string(),
        _ => sanitized,
    }
}

fn candidate_name(stem: &str, index: u32, extension: &str) -> String {
    if index == 0 {
        format!("{stem}{extension}")
    } else {
        format!("{stem}_{index:03}{extension}")
    }
}

/// 原始副檔名（含前導點，保留大小寫），沒有副檔名時為空字串
fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}
