use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

pub const SOURCE_FILE: &str = "SourceFile";
pub const FILE_TYPE: &str = "FileType";
pub const CREATE_DATE: &str = "CreateDate";
pub const DATE_TIME_ORIGINAL: &str = "DateTimeOriginal";
pub const SUB_SEC_DATE_TIME_ORIGINAL: &str = "SubSecDateTimeOriginal";
pub const MODEL: &str = "Model";

/// 向 exiftool 要求的欄位
pub const REQUESTED_TAGS: [&str; 6] = [
    SOURCE_FILE,
    FILE_TYPE,
    CREATE_DATE,
    DATE_TIME_ORIGINAL,
    SUB_SEC_DATE_TIME_ORIGINAL,
    MODEL,
];

/// 缺少 Model 標籤時使用的機型名稱
pub const UNKNOWN_MODEL: &str = "Unknown";

/// 單一檔案的 metadata 標籤集合（唯讀）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: BTreeMap<String, String>,
}

// exiftool 輸出的值可能是字串、數字或布林，統一轉成字串；null、陣列與物件捨棄
impl<'de> Deserialize<'de> for TagSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: HashMap<String, Value> = HashMap::deserialize(deserializer)?;
        let tags = raw
            .into_iter()
            .filter_map(|(name, value)| match value {
                Value::String(s) => Some((name, s)),
                Value::Number(n) => Some((name, n.to_string())),
                Value::Bool(b) => Some((name, b.to_string())),
                Value::Null | Value::Array(_) | Value::Object(_) => None,
            })
            .collect();
        Ok(Self { tags })
    }
}

impl<K, V> FromIterator<(K, V)> for TagSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            tags: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl TagSet {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.tags.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn source_file(&self) -> Option<&Path> {
        self.get(SOURCE_FILE).map(Path::new)
    }

    /// 相機機型，缺少時回傳 `"Unknown"`
    #[must_use]
    pub fn model(&self) -> &str {
        self.get(MODEL).unwrap_or(UNKNOWN_MODEL)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_mixed_values() {
        let json = r#"{
            "SourceFile": "/photos/a.jpg",
            "FileType": "JPEG",
            "Model": 850,
            "Flag": true,
            "Missing": null,
            "List": [1, 2]
        }"#;
        let tags: TagSet = serde_json::from_str(json).unwrap();

        assert_eq!(tags.len(), 4);
        assert_eq!(tags.source_file(), Some(Path::new("/photos/a.jpg")));
        assert_eq!(tags.model(), "850");
        assert_eq!(tags.get("Flag"), Some("true"));
        assert_eq!(tags.get("Missing"), None);
        assert_eq!(tags.get("List"), None);
    }

    #[test]
    fn test_model_defaults_to_unknown() {
        let tags: TagSet = [(SOURCE_FILE, "/photos/a.jpg")].into_iter().collect();
        assert_eq!(tags.model(), UNKNOWN_MODEL);
    }

    #[test]
    fn test_missing_source_file() {
        let tags: TagSet = [(MODEL, "Pixel 7")].into_iter().collect();
        assert!(tags.source_file().is_none());
        assert!(!tags.is_empty());
    }
}
