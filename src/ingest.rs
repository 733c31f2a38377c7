//! EPMA map exports loader
//!
//! Pairs the map data files of an export directory with the element labels
//! found in the channel metadata file names.

use crate::{
    filename::{self, DataFileName, FilenameError, MetadataFileName},
    Dataset, ElementMap, GridError,
};
use glob::{glob, Pattern};
use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    time::Instant,
};

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("{0:?} is not a directory")]
    Directory(PathBuf),
    #[error("invalid file search pattern")]
    Pattern(#[from] glob::PatternError),
    #[error("failed to list the export directory")]
    Glob(#[from] glob::GlobError),
    #[error("malformed file name")]
    Filename(#[from] FilenameError),
    #[error("failed to load the {element} map from {path:?}")]
    Grid {
        element: String,
        path: PathBuf,
        #[source]
        source: GridError,
    },
}
type Result<T> = std::result::Result<T, IngestError>;

/// [Dataset] loader
///
/// By default, loads the maps from the current directory with
/// data files extension `txt` and metadata files extension `pm`
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    path: PathBuf,
    exclude: BTreeSet<String>,
    data_extension: String,
    metadata_extension: String,
}
impl Default for DatasetLoader {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            exclude: BTreeSet::new(),
            data_extension: String::from("txt"),
            metadata_extension: String::from("pm"),
        }
    }
}
impl DatasetLoader {
    /// Sets the export directory
    pub fn data_path<P: AsRef<Path>>(self, data_path: P) -> Self {
        Self {
            path: data_path.as_ref().to_path_buf(),
            ..self
        }
    }
    /// Leaves the given elements out of the dataset
    pub fn exclude<I, S>(self, elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut exclude = self.exclude;
        exclude.extend(elements.into_iter().map(|e| e.into()));
        Self { exclude, ..self }
    }
    /// Sets the extension of the map data files
    pub fn data_extension<S: Into<String>>(self, extension: S) -> Self {
        Self {
            data_extension: extension.into().trim_start_matches('.').to_string(),
            ..self
        }
    }
    /// Sets the extension of the channel metadata files
    pub fn metadata_extension<S: Into<String>>(self, extension: S) -> Self {
        Self {
            metadata_extension: extension.into().trim_start_matches('.').to_string(),
            ..self
        }
    }
    /// Sorted list of the files with the given extension in the export directory
    fn files(&self, extension: &str) -> Result<Vec<PathBuf>> {
        let pattern = Path::new(&Pattern::escape(&self.path.to_string_lossy()))
            .join(format!("*.{}", Pattern::escape(extension)));
        let mut files =
            glob(&pattern.to_string_lossy())?.collect::<std::result::Result<Vec<_>, _>>()?;
        files.sort();
        Ok(files)
    }
    /// Mapping between channel indices and element labels
    pub fn elements(&self) -> Result<BTreeMap<String, String>> {
        let mut elements = BTreeMap::new();
        for path in self.files(&self.metadata_extension)? {
            let MetadataFileName { index, element } = MetadataFileName::try_from(path.as_path())?;
            if self.exclude.contains(&element) {
                log::debug!("excluding {element} ({:?})", filename::file_name(&path)?);
                continue;
            }
            if let Some(previous) = elements.insert(index.clone(), element.clone()) {
                log::warn!("channel #{index}: {previous} superseded by {element}");
            }
        }
        Ok(elements)
    }
    /// Loads the element maps
    pub fn load(self) -> Result<Dataset> {
        if !self.path.is_dir() {
            return Err(IngestError::Directory(self.path));
        }
        let now = Instant::now();
        log::info!("Loading EPMA maps from {:?}...", self.path);
        let elements = self.elements()?;
        let mut dataset = Dataset::default();
        for path in self.files(&self.data_extension)? {
            let DataFileName { index } = DataFileName::try_from(path.as_path())?;
            let Some(element) = elements.get(&index) else {
                log::debug!("skipping {:?}: no element for channel #{index}", path);
                continue;
            };
            let map = ElementMap::from_path(element.as_str(), &path).map_err(|source| {
                IngestError::Grid {
                    element: element.clone(),
                    path: path.clone(),
                    source,
                }
            })?;
            log::debug!("{}", map);
            if dataset.insert(map).is_some() {
                log::warn!("{element} map replaced by {:?}", path);
            }
        }
        log::info!(
            "... loaded {} maps in {}ms",
            dataset.len(),
            now.elapsed().as_millis()
        );
        Ok(dataset)
    }
}

/// Loads the element maps in `file_location`, leaving out the `exclude` elements
pub fn read_data<P, S>(file_location: P, exclude: &[S]) -> Result<Dataset>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    DatasetLoader::default()
        .data_path(file_location)
        .exclude(exclude.iter().map(|e| e.as_ref().to_string()))
        .load()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn export(files: &[(&str, &str)]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, contents) in files {
            fs::write(dir.path().join(name), contents).unwrap();
        }
        dir
    }

    #[test]
    fn exclude_elements() {
        let dir = export(&[
            ("01.Fe.pm", ""),
            ("02.Cr.pm", ""),
            ("01_x.txt", "1 2\n3 4\n"),
            ("02_x.txt", "5 6\n7 8\n"),
        ]);
        let data = read_data(dir.path(), &["Cr"]).unwrap();
        assert_eq!(data.labels().collect::<Vec<_>>(), vec!["Fe"]);
        assert_eq!(data.get("Fe").unwrap().counts()[(1, 1)], 4.);
    }

    #[test]
    fn unmatched_data_file_is_skipped() {
        let dir = export(&[
            ("01.Fe.pm", ""),
            ("01_x.txt", "1 2\n3 4\n"),
            ("03_x.txt", "5 6\n7 8\n"),
        ]);
        let data = read_data::<_, &str>(dir.path(), &[]).unwrap();
        assert_eq!(data.len(), 1);
        assert!(data.contains("Fe"));
    }

    #[test]
    fn insertion_follows_data_file_names() {
        let dir = export(&[
            ("1.Si.pm", ""),
            ("2.CP.pm", ""),
            ("3.Al.pm", ""),
            ("3_map.txt", "1\n"),
            ("1_map.txt", "2\n"),
            ("2_map.txt", "3\n"),
            ("notes.md", "not a map"),
        ]);
        let data = read_data::<_, &str>(dir.path(), &[]).unwrap();
        assert_eq!(data.labels().collect::<Vec<_>>(), vec!["Si", "CP", "Al"]);
    }

    #[test]
    fn custom_extensions() {
        let dir = export(&[("01.Fe.cnd", ""), ("01_x.csv", "1 2\n"), ("01_y.txt", "1\n")]);
        let data = DatasetLoader::default()
            .data_path(dir.path())
            .data_extension(".csv")
            .metadata_extension("cnd")
            .load()
            .unwrap();
        assert_eq!(data.get("Fe").unwrap().shape(), (1, 2));
    }

    #[test]
    fn malformed_data_file_name() {
        let dir = export(&[("01.Fe.pm", ""), ("map.txt", "1 2\n")]);
        let err = read_data::<_, &str>(dir.path(), &[]).unwrap_err();
        assert!(matches!(
            err,
            IngestError::Filename(FilenameError::Malformed { kind: "data", .. })
        ));
    }

    #[test]
    fn malformed_metadata_file_name() {
        let dir = export(&[("Fe.pm", ""), ("01_x.txt", "1 2\n")]);
        let err = read_data::<_, &str>(dir.path(), &[]).unwrap_err();
        assert!(matches!(
            err,
            IngestError::Filename(FilenameError::Malformed {
                kind: "metadata",
                ..
            })
        ));
    }

    #[test]
    fn bad_map_contents() {
        let dir = export(&[("01.Fe.pm", ""), ("01_x.txt", "1 2\n3 oops\n")]);
        let err = read_data::<_, &str>(dir.path(), &[]).unwrap_err();
        match err {
            IngestError::Grid { element, source, .. } => {
                assert_eq!(element, "Fe");
                assert!(matches!(source, GridError::Parse { line: 2, .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn last_metadata_file_wins() {
        let dir = export(&[
            ("a.01.Fe.pm", ""),
            ("b.01.Cu.pm", ""),
            ("01_x.txt", "3 4\n"),
        ]);
        let data = read_data::<_, &str>(dir.path(), &[]).unwrap();
        assert_eq!(data.labels().collect::<Vec<_>>(), vec!["Cu"]);
        assert_eq!(data.get("Cu").unwrap().data_range(), Some((3., 4.)));
    }

    #[test]
    fn excluded_label_does_not_supersede() {
        let dir = export(&[("a.01.Fe.pm", ""), ("b.01.Cr.pm", ""), ("01_x.txt", "1 2\n")]);
        let data = read_data(dir.path(), &["Cr"]).unwrap();
        assert_eq!(data.labels().collect::<Vec<_>>(), vec!["Fe"]);
    }

    #[test]
    fn later_data_file_replaces_map() {
        let dir = export(&[
            ("01.Fe.pm", ""),
            ("02.Cu.pm", ""),
            ("01_x.txt", "1 2\n"),
            ("01_y.txt", "3 4\n"),
            ("02_x.txt", "5 6\n"),
        ]);
        let data = read_data::<_, &str>(dir.path(), &[]).unwrap();
        assert_eq!(data.labels().collect::<Vec<_>>(), vec!["Fe", "Cu"]);
        assert_eq!(data.get("Fe").unwrap().data_range(), Some((3., 4.)));
    }

    #[test]
    fn glob_characters_in_directory() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("run[1]*?");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("01.Fe.pm"), "").unwrap();
        fs::write(dir.join("01_x.txt"), "1 2\n3 4\n").unwrap();
        let data = read_data::<_, &str>(&dir, &[]).unwrap();
        assert_eq!(data.labels().collect::<Vec<_>>(), vec!["Fe"]);
        assert_eq!(data.get("Fe").unwrap().shape(), (2, 2));
    }

    #[test]
    fn missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nowhere");
        assert!(matches!(
            read_data::<_, &str>(&missing, &[]),
            Err(IngestError::Directory(_))
        ));
    }
}
