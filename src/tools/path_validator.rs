use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};

/// 確認路徑存在且為資料夾，回傳絕對路徑
pub fn validate_directory_exists(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        bail!("路徑不存在: {}", path.display());
    }
    if !path.is_dir() {
        bail!("路徑不是資料夾: {}", path.display());
    }
    path.canonicalize()
        .with_context(|| format!("無法取得絕對路徑: {}", path.display()))
}

/// 以 `base` 為基準顯示相對路徑，無法計算時顯示完整路徑
#[must_use]
pub fn display_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}
