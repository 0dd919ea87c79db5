use crate::config::{ArrangeOptions, UserSettings};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "media_arranger", version)]
#[command(about = "依拍攝日期與相機機型整理照片與影片，並略過重複檔案")]
pub struct Cli {
    /// 要整理的來源資料夾
    pub target_path: PathBuf,

    /// 整理後的目的地資料夾
    pub dest_path: PathBuf,

    /// 測試模式：只顯示計畫，不移動檔案
    #[arg(short = 't', long = "test")]
    pub test: bool,

    /// 遞迴掃描子資料夾
    #[arg(short, long)]
    pub recursive: bool,

    /// 顯示每個檔案的原始日期值
    #[arg(long)]
    pub debug: bool,

    /// exiftool 執行檔路徑
    #[arg(long, value_name = "PATH")]
    pub exiftool: Option<PathBuf>,

    /// exiftool 原始輸出的紀錄檔
    #[arg(long, value_name = "PATH")]
    pub dump_file: Option<PathBuf>,
}

impl Cli {
    /// 合併設定檔與命令列參數，命令列優先
    #[must_use]
    pub fn into_options(self, settings: &UserSettings) -> ArrangeOptions {
        ArrangeOptions {
            target_path: self.target_path,
            dest_path: self.dest_path,
            dry_run: self.test,
            recursive: self.recursive,
            debug: self.debug,
            suffix_limit: settings.suffix_limit,
            exiftool_path: self
                .exiftool
                .unwrap_or_else(|| settings.exiftool_path.clone()),
            metadata_dump_file: self
                .dump_file
                .unwrap_or_else(|| settings.metadata_dump_file.clone()),
        }
    }
}
