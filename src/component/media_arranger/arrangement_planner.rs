use crate::error::ArrangeResult;
use crate::tools::{DateExtractor, NameResolver, Resolution, TagSet};
use log::debug;
use std::path::{Path, PathBuf};

/// 不移動檔案的原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// 標籤中沒有 SourceFile
    MissingSourceFile,
    /// SourceFile 指向的檔案已不存在
    SourceNotFound,
    /// 目的地已有內容相同的檔案
    Duplicate { existing: PathBuf },
}

/// 單一檔案的整理計畫
///
/// 由 [`ArrangementPlanner::plan`] 一次建立完成，之後只供讀取
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrangementPlan {
    source: Option<PathBuf>,
    destination: Option<PathBuf>,
    skip_reason: Option<SkipReason>,
}

impl ArrangementPlan {
    fn skipped(source: Option<PathBuf>, reason: SkipReason) -> Self {
        Self {
            source,
            destination: None,
            skip_reason: Some(reason),
        }
    }

    fn movable(source: PathBuf, destination: PathBuf) -> Self {
        Self {
            source: Some(source),
            destination: Some(destination),
            skip_reason: None,
        }
    }

    #[must_use]
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    #[must_use]
    pub fn destination_path(&self) -> Option<&Path> {
        self.destination.as_deref()
    }

    #[must_use]
    pub const fn skip(&self) -> bool {
        self.skip_reason.is_some()
    }

    #[must_use]
    pub const fn skip_reason(&self) -> Option<&SkipReason> {
        self.skip_reason.as_ref()
    }

    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self.skip_reason, Some(SkipReason::Duplicate { .. }))
    }
}

/// 將一組標籤轉換成整理計畫
#[derive(Debug, Clone)]
pub struct ArrangementPlanner {
    extractor: DateExtractor,
    resolver: NameResolver,
}

impl ArrangementPlanner {
    pub const fn new(extractor: DateExtractor, resolver: NameResolver) -> Self {
        Self {
            extractor,
            resolver,
        }
    }

    #[must_use]
    pub fn dest_root(&self) -> &Path {
        self.resolver.dest_root()
    }

    /// 建立整理計畫
    ///
    /// 缺少來源與重複檔案都以略過的計畫回傳；日期格式錯誤與編號用盡則回傳錯誤
    pub fn plan(&mut self, tags: &TagSet) -> ArrangeResult<ArrangementPlan> {
        let Some(source) = tags.source_file() else {
            debug!("略過缺少 SourceFile 的紀錄");
            return Ok(ArrangementPlan::skipped(None, SkipReason::MissingSourceFile));
        };
        let source = source.to_path_buf();

        if !source.is_file() {
            debug!("來源檔案不存在: {}", source.display());
            return Ok(ArrangementPlan::skipped(
                Some(source),
                SkipReason::SourceNotFound,
            ));
        }

        let timestamp = self.extractor.extract(tags)?;

        match self.resolver.resolve(&timestamp, tags.model(), &source)? {
            Resolution::Accepted(destination) => {
                Ok(ArrangementPlan::movable(source, destination))
            }
            Resolution::Duplicate(existing) => Ok(ArrangementPlan::skipped(
                Some(source),
                SkipReason::Duplicate { existing },
            )),
        }
    }
}
