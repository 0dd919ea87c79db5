//! 媒體整理主流程
//!
//! 掃描 metadata 後逐一建立計畫並立即移動，讓後續檔案的衝突判斷能看到先前的移動結果

use super::arrangement_planner::{ArrangementPlanner, SkipReason};
use super::mover::{MoveOutcome, Mover};
use crate::config::ArrangeOptions;
use crate::tools::{
    DateExtractor, MetadataSource, NameResolver, TagSet, display_relative,
    validate_directory_exists,
};
use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 整理結果統計
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ArrangeSummary {
    pub total_files: usize,
    pub files_moved: usize,
    /// 測試模式下預計移動的檔案數
    pub planned_moves: usize,
    pub duplicates: usize,
    pub skipped: usize,
    pub errors: usize,
    pub interrupted: bool,
}

/// 媒體整理元件
pub struct MediaArranger<S> {
    options: ArrangeOptions,
    source: S,
    shutdown_signal: Arc<AtomicBool>,
}

/// 目前處理中的資料夾與進度條
struct RunContext<'a> {
    planner: ArrangementPlanner,
    mover: Mover,
    target_root: &'a Path,
    progress_bar: &'a ProgressBar,
}

impl<S: MetadataSource> MediaArranger<S> {
    pub const fn new(options: ArrangeOptions, source: S, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            options,
            source,
            shutdown_signal,
        }
    }

    pub fn run(&self) -> Result<ArrangeSummary> {
        let target_root = validate_directory_exists(&self.options.target_path)?;
        let dest_root = validate_directory_exists(&self.options.dest_path)?;

        println!("{}", style("=== 依拍攝日期整理媒體檔案 ===").cyan().bold());
        if self.options.dry_run {
            println!("{}", style("測試模式：不會移動任何檔案").yellow());
        }

        println!("{}", style("讀取 metadata 中...").dim());
        let tag_sets = self.source.scan(&target_root, self.options.recursive)?;

        let mut summary = ArrangeSummary {
            total_files: tag_sets.len(),
            ..ArrangeSummary::default()
        };

        if tag_sets.is_empty() {
            println!("{}", style("找不到任何檔案").yellow());
            return Ok(summary);
        }

        info!("找到 {} 個檔案，開始整理", tag_sets.len());

        let planner = ArrangementPlanner::new(
            DateExtractor::new(self.options.debug),
            NameResolver::new(&dest_root, self.options.suffix_limit).dry_run(self.options.dry_run),
        );

        let progress_bar = ProgressBar::new(tag_sets.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
        );

        let mut context = RunContext {
            planner,
            mover: Mover::new(self.options.dry_run),
            target_root: &target_root,
            progress_bar: &progress_bar,
        };

        for tags in &tag_sets {
            if self.shutdown_signal.load(Ordering::SeqCst) {
                progress_bar.abandon_with_message("操作已中斷");
                warn!("收到中斷訊號，停止處理");
                summary.interrupted = true;
                break;
            }

            if let Some(name) = tags.source_file().and_then(Path::file_name) {
                progress_bar.set_message(name.to_string_lossy().to_string());
            }

            self.process_file(tags, &mut context, &mut summary);
            progress_bar.inc(1);
        }

        if !summary.interrupted {
            progress_bar.finish_with_message("完成");
        }

        self.print_result(&summary);

        Ok(summary)
    }

    fn process_file(&self, tags: &TagSet, context: &mut RunContext<'_>, summary: &mut ArrangeSummary) {
        let progress_bar = context.progress_bar;
        let source_display = tags
            .source_file()
            .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());

        // 解析與移動時的 debug 紀錄需暫停進度條
        let planner = &mut context.planner;
        let plan = match progress_bar.suspend(|| planner.plan(tags)) {
            Ok(plan) => plan,
            Err(e) => {
                progress_bar.suspend(|| error!("無法整理 {source_display}: {e}"));
                summary.errors += 1;
                return;
            }
        };

        match plan.skip_reason() {
            Some(SkipReason::Duplicate { existing }) => {
                progress_bar.println(format!(
                    "{} {} ({})",
                    style("重複:").yellow(),
                    source_display,
                    display_relative(existing, context.planner.dest_root())
                ));
                summary.duplicates += 1;
                return;
            }
            Some(SkipReason::MissingSourceFile) => {
                progress_bar.suspend(|| warn!("略過缺少 SourceFile 的紀錄"));
                summary.skipped += 1;
                return;
            }
            Some(SkipReason::SourceNotFound) => {
                progress_bar.suspend(|| warn!("來源檔案不存在: {source_display}"));
                summary.skipped += 1;
                return;
            }
            None => {}
        }

        let (Some(source), Some(destination)) = (plan.source_path(), plan.destination_path())
        else {
            summary.skipped += 1;
            return;
        };
        let move_line = report_line(
            &display_relative(source, context.target_root),
            &display_relative(destination, context.planner.dest_root()),
        );

        let mover = context.mover;
        match progress_bar.suspend(|| mover.apply(&plan)) {
            Ok(MoveOutcome::Moved) => {
                progress_bar.println(format!("{} {move_line}", style("移動:").green()));
                summary.files_moved += 1;
            }
            Ok(MoveOutcome::DryRun) => {
                progress_bar.println(format!("{} {move_line}", style("預計移動:").cyan()));
                summary.planned_moves += 1;
            }
            Ok(MoveOutcome::Skipped) => summary.skipped += 1,
            Err(e) => {
                progress_bar.suspend(|| error!("移動失敗 {source_display}: {e:#}"));
                summary.errors += 1;
            }
        }
    }

    fn print_result(&self, result: &ArrangeSummary) {
        println!();
        println!("{}", style("=== 整理結果 ===").cyan().bold());
        println!("  總檔案數: {}", result.total_files);

        if self.options.dry_run {
            println!("  預計移動: {} 個檔案", style(result.planned_moves).cyan());
        } else {
            println!("  成功移動: {} 個檔案", style(result.files_moved).green());
        }

        if result.duplicates > 0 {
            println!("  重複略過: {} 個檔案", style(result.duplicates).yellow());
        }

        if result.skipped > 0 {
            println!("  已跳過: {} 個檔案", style(result.skipped).dim());
        }

        if result.errors > 0 {
            println!("  失敗: {} 個檔案", style(result.errors).red());
        }

        info!(
            "整理完成 - 移動: {}, 預計移動: {}, 重複: {}, 跳過: {}, 失敗: {}",
            result.files_moved, result.planned_moves, result.duplicates, result.skipped, result.errors
        );
    }
}

/// `<來源> -> <目的地>` 報告行
fn report_line(source: &str, destination: &str) -> String {
    format!("{source} -> {destination}")
}
