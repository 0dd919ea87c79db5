//! 依拍攝日期與機型整理媒體檔案元件
//!
//! 以 exiftool 讀取 metadata，產生標準檔名並移動到 `<目的地>/<年>/<機型>/`

mod arrangement_planner;
mod main;
mod mover;

pub use arrangement_planner::{ArrangementPlan, ArrangementPlanner, SkipReason};
pub use main::{ArrangeSummary, MediaArranger};
pub use mover::{MoveOutcome, Mover};
