use super::arrangement_planner::ArrangementPlan;
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// 移動結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// 測試模式，只預覽不移動
    DryRun,
    /// 計畫為略過
    Skipped,
}

/// 依整理計畫移動檔案
#[derive(Debug, Clone, Copy)]
pub struct Mover {
    dry_run: bool,
}

impl Mover {
    #[must_use]
    pub const fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    pub fn apply(&self, plan: &ArrangementPlan) -> Result<MoveOutcome> {
        let (Some(source), Some(target)) = (plan.source_path(), plan.destination_path()) else {
            return Ok(MoveOutcome::Skipped);
        };
        if plan.skip() {
            return Ok(MoveOutcome::Skipped);
        }
        if self.dry_run {
            return Ok(MoveOutcome::DryRun);
        }

        move_file(source, target)?;
        debug!("移動檔案: {} -> {}", source.display(), target.display());
        Ok(MoveOutcome::Moved)
    }
}

fn move_file(source: &Path, target: &Path) -> Result<()> {
    match fs::rename(source, target) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            // rename 失敗（可能是跨檔案系統），改為複製後刪除
            debug!(
                "rename 失敗，改用複製: {} ({rename_err})",
                source.display()
            );
            copy_and_delete(source, target)
        }
    }
}

/// 複製檔案後刪除原檔案
fn copy_and_delete(source: &Path, target: &Path) -> Result<()> {
    fs::copy(source, target).with_context(|| {
        format!("複製檔案失敗: {} -> {}", source.display(), target.display())
    })?;

    fs::remove_file(source).with_context(|| format!("刪除原檔案失敗: {}", source.display()))?;

    Ok(())
}
