//! 拍攝時間擷取模組
//!
//! 依優先順序從標籤取得拍攝時間，皆無時退回檔案修改時間

use crate::error::{ArrangeError, ArrangeResult};
use crate::tools::tag_set::{
    CREATE_DATE, DATE_TIME_ORIGINAL, SUB_SEC_DATE_TIME_ORIGINAL, TagSet,
};
use chrono::{DateTime, Datelike, Local, Timelike};
use log::debug;
use regex::Regex;
use std::fs;
use std::sync::LazyLock;
use std::time::SystemTime;

/// 沒有次秒資訊時使用的次秒欄位
pub const SYNTHESIZED_SUBSECOND: &str = "000";

/// 日期標籤的優先順序，第一個存在的標籤勝出
const DATE_TAG_PRIORITY: [&str; 3] = [SUB_SEC_DATE_TIME_ORIGINAL, DATE_TIME_ORIGINAL, CREATE_DATE];

// exiftool 可能附加時區（+09:00 / Z），只接受不做換算
static REGEX_CAPTURE_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<year>[0-9]{4}):(?P<month>[0-9]{2}):(?P<day>[0-9]{2}) (?P<hour>[0-9]{2}):(?P<minute>[0-9]{2}):(?P<second>[0-9]{2})(?:\.(?P<subsec>[0-9]{1,6}))?(?:Z|[+-][0-9]{2}:[0-9]{2})?$",
    )
    .expect("Invalid regex")
});

/// 拍攝時間，所有欄位皆必定有值
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureTimestamp {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    /// 保留來源提供的位數（1~6 位）
    pub subsecond: String,
}

impl CaptureTimestamp {
    /// 解析 `YYYY:MM:DD HH:MM:SS.f{1,6}`
    ///
    /// `require_subsecond` 為 false 時，值不得含次秒，次秒欄位固定為 `"000"`
    fn parse(value: &str, require_subsecond: bool) -> Option<Self> {
        let caps = REGEX_CAPTURE_DATE.captures(value)?;

        let subsecond = match (require_subsecond, caps.name("subsec")) {
            (true, Some(m)) => m.as_str().to_string(),
            (false, None) => SYNTHESIZED_SUBSECOND.to_string(),
            _ => return None,
        };

        Some(Self {
            year: caps["year"].parse().ok()?,
            month: caps["month"].parse().ok()?,
            day: caps["day"].parse().ok()?,
            hour: caps["hour"].parse().ok()?,
            minute: caps["minute"].parse().ok()?,
            second: caps["second"].parse().ok()?,
            subsecond,
        })
    }

    /// 以本地時間表示檔案時間，次秒固定為 `"000"`
    #[must_use]
    pub fn from_system_time(time: SystemTime) -> Self {
        let dt: DateTime<Local> = time.into();
        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
            subsecond: SYNTHESIZED_SUBSECOND.to_string(),
        }
    }

    /// 年份資料夾名稱
    #[must_use]
    pub fn year_folder(&self) -> String {
        format!("{:04}", self.year)
    }

    /// 產生 `YYYY_MMDD_HHMMSS_ffffff_<model>` 檔名主體
    #[must_use]
    pub fn file_stem(&self, model: &str) -> String {
        format!(
            "{:04}_{:02}{:02}_{:02}{:02}{:02}_{}_{}",
            self.year, self.month, self.day, self.hour, self.minute, self.second, self.subsecond, model
        )
    }
}

/// 拍攝時間擷取器
#[derive(Debug, Clone, Copy, Default)]
pub struct DateExtractor {
    debug: bool,
}

impl DateExtractor {
    #[must_use]
    pub const fn new(debug: bool) -> Self {
        Self { debug }
    }

    /// 取得拍攝時間
    ///
    /// 日期標籤存在但格式錯誤時直接回傳錯誤，不退回下一個標籤
    pub fn extract(&self, tags: &TagSet) -> ArrangeResult<CaptureTimestamp> {
        if let Some((tag, value)) = DATE_TAG_PRIORITY
            .iter()
            .find_map(|tag| tags.get(tag).map(|value| (*tag, value)))
        {
            if self.debug {
                debug!("{}: {tag} = {value}", display_source(tags));
            }

            return CaptureTimestamp::parse(value, tag == SUB_SEC_DATE_TIME_ORIGINAL).ok_or_else(
                || ArrangeError::MalformedDate {
                    tag,
                    value: value.to_string(),
                },
            );
        }

        let path = tags.source_file().ok_or(ArrangeError::MissingSourceFile)?;
        let modified = fs::metadata(path)
            .and_then(|meta| meta.modified())
            .map_err(|source| ArrangeError::ModificationTime {
                path: path.to_path_buf(),
                source,
            })?;

        let timestamp = CaptureTimestamp::from_system_time(modified);
        if self.debug {
            debug!(
                "{}: 無日期標籤，使用修改時間 {}",
                path.display(),
                timestamp.file_stem("")
            );
        }
        Ok(timestamp)
    }
}

fn display_source(tags: &TagSet) -> String {
    tags.source_file()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::tag_set::SOURCE_FILE;
    use std::fs::File;
    use std::time::{Duration, UNIX_EPOCH};
    use tempfile::TempDir;

    fn tags(pairs: &[(&str, &str)]) -> TagSet {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_subsec_date_used_verbatim() {
        let extractor = DateExtractor::new(false);
        let ts = extractor
            .extract(&tags(&[
                (SUB_SEC_DATE_TIME_ORIGINAL, "2021:12:31 23:59:58.123456"),
                (DATE_TIME_ORIGINAL, "2000:01:01 00:00:00"),
            ]))
            .unwrap();

        assert_eq!(ts.year, 2021);
        assert_eq!(ts.month, 12);
        assert_eq!(ts.day, 31);
        assert_eq!(ts.hour, 23);
        assert_eq!(ts.minute, 59);
        assert_eq!(ts.second, 58);
        assert_eq!(ts.subsecond, "123456");
        assert_eq!(ts.file_stem("X"), "2021_1231_235958_123456_X");
    }

    #[test]
    fn test_subsec_digits_preserved() {
        let extractor = DateExtractor::new(false);
        let ts = extractor
            .extract(&tags(&[(SUB_SEC_DATE_TIME_ORIGINAL, "2019:02:03 04:05:06.07")]))
            .unwrap();
        assert_eq!(ts.file_stem("M"), "2019_0203_040506_07_M");
    }

    #[test]
    fn test_date_time_original_gets_zero_subsecond() {
        let extractor = DateExtractor::new(false);
        let ts = extractor
            .extract(&tags(&[
                (DATE_TIME_ORIGINAL, "2023:05:01 10:00:00"),
                (CREATE_DATE, "1999:01:01 00:00:00"),
            ]))
            .unwrap();
        assert_eq!(ts.file_stem("Pixel7"), "2023_0501_100000_000_Pixel7");
        assert_eq!(ts.year_folder(), "2023");
    }

    #[test]
    fn test_create_date_is_last_tag_tier() {
        let extractor = DateExtractor::new(true);
        let ts = extractor
            .extract(&tags(&[(CREATE_DATE, "2008:07:09 01:02:03")]))
            .unwrap();
        assert_eq!(ts.file_stem("A"), "2008_0709_010203_000_A");
    }

    #[test]
    fn test_timezone_suffix_is_ignored() {
        let extractor = DateExtractor::new(false);
        let ts = extractor
            .extract(&tags(&[(
                SUB_SEC_DATE_TIME_ORIGINAL,
                "2023:05:01 10:00:00.12+09:00",
            )]))
            .unwrap();
        assert_eq!(ts.hour, 10);
        assert_eq!(ts.subsecond, "12");
    }

    #[test]
    fn test_malformed_date_does_not_fall_through() {
        let extractor = DateExtractor::new(false);
        let err = extractor
            .extract(&tags(&[
                (DATE_TIME_ORIGINAL, "2023-05-01 10:00:00"),
                (CREATE_DATE, "2023:05:01 10:00:00"),
            ]))
            .unwrap_err();

        match err {
            ArrangeError::MalformedDate { tag, value } => {
                assert_eq!(tag, DATE_TIME_ORIGINAL);
                assert_eq!(value, "2023-05-01 10:00:00");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_subsec_tag_without_subsecond_is_malformed() {
        let extractor = DateExtractor::new(false);
        let result = extractor.extract(&tags(&[(SUB_SEC_DATE_TIME_ORIGINAL, "2023:05:01 10:00:00")]));
        assert!(matches!(result, Err(ArrangeError::MalformedDate { .. })));
    }

    #[test]
    fn test_too_many_subsecond_digits_is_malformed() {
        let extractor = DateExtractor::new(false);
        let result = extractor.extract(&tags(&[(
            SUB_SEC_DATE_TIME_ORIGINAL,
            "2023:05:01 10:00:00.1234567",
        )]));
        assert!(matches!(result, Err(ArrangeError::MalformedDate { .. })));
    }

    #[test]
    fn test_fallback_to_modification_time() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("clip.mov");
        let file = File::create(&path).unwrap();
        let mtime = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        file.set_modified(mtime).unwrap();
        drop(file);

        let extractor = DateExtractor::new(false);
        let ts = extractor
            .extract(&tags(&[(SOURCE_FILE, path.to_str().unwrap())]))
            .unwrap();

        assert_eq!(ts, CaptureTimestamp::from_system_time(mtime));
        assert_eq!(ts.subsecond, SYNTHESIZED_SUBSECOND);
    }

    #[test]
    fn test_fallback_without_source_file() {
        let extractor = DateExtractor::new(false);
        let result = extractor.extract(&tags(&[("Model", "X")]));
        assert!(matches!(result, Err(ArrangeError::MissingSourceFile)));
    }

    #[test]
    fn test_fallback_with_missing_file() {
        let extractor = DateExtractor::new(false);
        let result = extractor.extract(&tags(&[(SOURCE_FILE, "/nonexistent/nowhere.jpg")]));
        assert!(matches!(result, Err(ArrangeError::ModificationTime { .. })));
    }
}
