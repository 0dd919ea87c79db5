use crate::tools::DEFAULT_SUFFIX_LIMIT;
use serde::Deserialize;
use std::path::PathBuf;

/// 設定檔位置（程式執行的當前目錄）
pub const SETTINGS_FILE: &str = "settings.json";
pub const DEFAULT_EXIFTOOL: &str = "exiftool";
/// exiftool 原始輸出的紀錄檔
pub const DEFAULT_METADATA_DUMP_FILE: &str = "jsondata.txt";

/// 使用者設定，欄位缺少時使用預設值
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub exiftool_path: PathBuf,
    pub metadata_dump_file: PathBuf,
    pub suffix_limit: u32,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            exiftool_path: PathBuf::from(DEFAULT_EXIFTOOL),
            metadata_dump_file: PathBuf::from(DEFAULT_METADATA_DUMP_FILE),
            suffix_limit: DEFAULT_SUFFIX_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub settings: UserSettings,
}

/// 單次執行的整理選項
#[derive(Debug, Clone)]
pub struct ArrangeOptions {
    pub target_path: PathBuf,
    pub dest_path: PathBuf,
    /// 測試模式，只顯示計畫不移動
    pub dry_run: bool,
    pub recursive: bool,
    pub debug: bool,
    pub suffix_limit: u32,
    pub exiftool_path: PathBuf,
    pub metadata_dump_file: PathBuf,
}

impl ArrangeOptions {
    /// 以預設設定建立選項
    pub fn new(target_path: impl Into<PathBuf>, dest_path: impl Into<PathBuf>) -> Self {
        let settings = UserSettings::default();
        Self {
            target_path: target_path.into(),
            dest_path: dest_path.into(),
            dry_run: false,
            recursive: false,
            debug: false,
            suffix_limit: settings.suffix_limit,
            exiftool_path: settings.exiftool_path,
            metadata_dump_file: settings.metadata_dump_file,
        }
    }
}
