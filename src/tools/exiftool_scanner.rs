use crate::tools::tag_set::{REQUESTED_TAGS, TagSet};
use anyhow::{Context, Result, bail};
use log::{info, warn};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// 提供每個檔案 metadata 標籤的來源
pub trait MetadataSource {
    /// 掃描目標資料夾，每個找到的檔案回傳一組標籤
    fn scan(&self, target: &Path, recursive: bool) -> Result<Vec<TagSet>>;
}

/// 以 exiftool 擷取 metadata
#[derive(Debug, Clone)]
pub struct ExifToolScanner {
    program: PathBuf,
    dump_path: Option<PathBuf>,
}

impl ExifToolScanner {
    /// `dump_path` 有值時會將 exiftool 的原始輸出寫入該檔案
    pub fn new(program: impl Into<PathBuf>, dump_path: Option<PathBuf>) -> Self {
        Self {
            program: program.into(),
            dump_path,
        }
    }

    /// 確認 exiftool 可以執行並回傳版本
    pub fn version(&self) -> Result<String> {
        let output = Command::new(&self.program)
            .arg("-ver")
            .output()
            .with_context(|| {
                format!(
                    "無法執行 exiftool（{}），請先安裝: https://exiftool.org/install.html",
                    self.program.display()
                )
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("exiftool 執行失敗: {stderr}");
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn build_args(target: &Path, recursive: bool) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-j".into(), "-fast2".into()];
        args.extend(REQUESTED_TAGS.iter().map(|tag| OsString::from(format!("-{tag}"))));
        if recursive {
            args.push("-r".into());
        }
        args.push(target.as_os_str().to_owned());
        args
    }
}

impl MetadataSource for ExifToolScanner {
    fn scan(&self, target: &Path, recursive: bool) -> Result<Vec<TagSet>> {
        info!("執行 exiftool: {}", target.display());

        let output = Command::new(&self.program)
            .args(Self::build_args(target, recursive))
            .output()
            .with_context(|| format!("無法執行 exiftool: {}", self.program.display()))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if let Some(dump_path) = &self.dump_path {
            fs::write(dump_path, stdout.as_bytes())
                .with_context(|| format!("無法寫入 metadata 紀錄: {}", dump_path.display()))?;
        }

        // 沒有任何檔案時 exiftool 會以非零狀態結束且沒有輸出
        if !output.status.success() {
            if stdout.trim().is_empty() {
                warn!("exiftool 沒有輸出: {}", stderr.trim());
                return Ok(Vec::new());
            }
            warn!("exiftool 回報部分錯誤: {}", stderr.trim());
        }

        parse_exiftool_output(&stdout)
    }
}

/// 解析 `exiftool -j` 的 JSON 輸出
pub fn parse_exiftool_output(stdout: &str) -> Result<Vec<TagSet>> {
    if stdout.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(stdout).context("無法解析 exiftool 輸出")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_args() {
        let args = ExifToolScanner::build_args(Path::new("/photos"), false);
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().to_string())
            .collect();

        assert_eq!(
            args,
            vec![
                "-j",
                "-fast2",
                "-SourceFile",
                "-FileType",
                "-CreateDate",
                "-DateTimeOriginal",
                "-SubSecDateTimeOriginal",
                "-Model",
                "/photos",
            ]
        );
    }

    #[test]
    fn test_build_args_recursive() {
        let args = ExifToolScanner::build_args(Path::new("/photos"), true);
        assert_eq!(args[args.len() - 2], OsString::from("-r"));
        assert_eq!(args[args.len() - 1], OsString::from("/photos"));
    }

    #[test]
    fn test_parse_exiftool_output() {
        let stdout = r#"[{
  "SourceFile": "/photos/a.jpg",
  "FileType": "JPEG",
  "DateTimeOriginal": "2023:05:01 10:00:00",
  "Model": "Pixel 7"
},
{
  "SourceFile": "/photos/b.mov",
  "FileType": "MOV"
}]"#;
        let tag_sets = parse_exiftool_output(stdout).unwrap();

        assert_eq!(tag_sets.len(), 2);
        assert_eq!(tag_sets[0].model(), "Pixel 7");
        assert_eq!(tag_sets[1].source_file(), Some(Path::new("/photos/b.mov")));
        assert_eq!(tag_sets[1].model(), "Unknown");
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_exiftool_output("").unwrap().is_empty());
        assert!(parse_exiftool_output("  \n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_invalid_output() {
        assert!(parse_exiftool_output("Error: File not found").is_err());
    }

    #[test]
    fn test_missing_program() {
        let scanner = ExifToolScanner::new("/nonexistent/exiftool", None);
        assert!(scanner.version().is_err());
        assert!(scanner.scan(Path::new("/tmp"), false).is_err());
    }
}
