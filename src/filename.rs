//! Instrument export file names
//!
//! The instrument software names its exports after the acquisition channel:
//!  - map data files: `<index>_<...>.txt`
//!  - channel metadata files: `<...>.<index>.<element>.pm`

use regex::Regex;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum FilenameError {
    #[error("invalid file name regex")]
    Regex(#[from] regex::Error),
    #[error("{kind} file name {name:?} doesn't match the expected pattern {pattern}")]
    Malformed {
        kind: &'static str,
        name: String,
        pattern: &'static str,
    },
    #[error("{0:?} is not a valid UTF-8 file name")]
    NotUtf8(std::path::PathBuf),
}
type Result<T> = std::result::Result<T, FilenameError>;

/// Returns the file name of a path as a string slice
pub fn file_name(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| FilenameError::NotUtf8(path.to_path_buf()))
}

/// Metadata file name: `<...>.<index>.<element>.<suffix>`
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataFileName {
    pub index: String,
    pub element: String,
}
impl MetadataFileName {
    const PATTERN: &'static str = "<index>.<element>.<suffix>";
}
impl TryFrom<&str> for MetadataFileName {
    type Error = FilenameError;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let re = Regex::new(r"^(?:.*\.)?([^.]+)\.([^.]+)\.([^.]+)$")?;
        let caps = re.captures(value).ok_or(FilenameError::Malformed {
            kind: "metadata",
            name: value.to_string(),
            pattern: Self::PATTERN,
        })?;
        Ok(Self {
            index: caps[1].to_string(),
            element: caps[2].to_string(),
        })
    }
}
impl TryFrom<&Path> for MetadataFileName {
    type Error = FilenameError;

    fn try_from(value: &Path) -> std::result::Result<Self, Self::Error> {
        file_name(value)?.try_into()
    }
}

/// Map data file name: `<index>_<...>`
#[derive(Debug, Clone, PartialEq)]
pub struct DataFileName {
    pub index: String,
}
impl DataFileName {
    const PATTERN: &'static str = "<index>_<...>";
}
impl TryFrom<&str> for DataFileName {
    type Error = FilenameError;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let re = Regex::new(r"^([^_]+)_")?;
        let caps = re.captures(value).ok_or(FilenameError::Malformed {
            kind: "data",
            name: value.to_string(),
            pattern: Self::PATTERN,
        })?;
        Ok(Self {
            index: caps[1].to_string(),
        })
    }
}
impl TryFrom<&Path> for DataFileName {
    type Error = FilenameError;

    fn try_from(value: &Path) -> std::result::Result<Self, Self::Error> {
        file_name(value)?.try_into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_name() {
        let meta = MetadataFileName::try_from("1.Fe.pm").unwrap();
        assert_eq!(meta.index, "1");
        assert_eq!(meta.element, "Fe");
    }

    #[test]
    fn metadata_name_with_prefix() {
        let meta = MetadataFileName::try_from("Data_2022.007.CP.pm").unwrap();
        assert_eq!(meta.index, "007");
        assert_eq!(meta.element, "CP");
    }

    #[test]
    fn metadata_name_from_path() {
        let meta = MetadataFileName::try_from(Path::new("maps/run.2/03.Mn.pm")).unwrap();
        assert_eq!(meta.index, "03");
        assert_eq!(meta.element, "Mn");
    }

    #[test]
    fn metadata_name_too_few_tokens() {
        for name in ["Fe.pm", "pm", "01..pm", ".Fe.pm"] {
            let err = MetadataFileName::try_from(name).unwrap_err();
            assert!(
                matches!(err, FilenameError::Malformed { kind: "metadata", .. }),
                "{name}: {err}"
            );
        }
    }

    #[test]
    fn data_name() {
        let data = DataFileName::try_from("12_map_data.txt").unwrap();
        assert_eq!(data.index, "12");
        let data = DataFileName::try_from(Path::new("some/dir/01_x.txt")).unwrap();
        assert_eq!(data.index, "01");
    }

    #[test]
    fn data_name_missing_delimiter() {
        let err = DataFileName::try_from("map.txt").unwrap_err();
        assert!(err.to_string().contains("map.txt"));
        assert!(DataFileName::try_from("_x.txt").is_err());
    }
}
