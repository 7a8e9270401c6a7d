use std::path::{Path, PathBuf};

use crate::error::IoError;

/// List the image files of a dataset directory.
///
/// Only the direct children of `dir` are considered. A file is kept when the image crate
/// can read its header; anything else is skipped. The result is sorted by path.
///
/// # Errors
///
/// Returns an error if `dir` does not exist or is not a directory.
pub fn list_image_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, IoError> {
    let dir = dir.as_ref();
    if !dir.exists() {
        return Err(IoError::FileDoesNotExist(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(IoError::NotADirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        match image::image_dimensions(&path) {
            Ok(_) => files.push(path),
            Err(e) => log::debug!("skipping {}: {}", path.display(), e),
        }
    }
    files.sort();

    Ok(files)
}

/// Parse the class label encoded in an image file name.
///
/// The label is made of the last two characters of the file name before its first `.`,
/// e.g. `cat07.png` has class 7 and `img12.v2.jpg` has class 12.
///
/// # Example
///
/// ```
/// use hogrs_io::dataset::image_class;
///
/// assert_eq!(image_class("data/cat07.png").unwrap(), 7);
/// assert!(image_class("data/cat.png").is_err());
/// ```
pub fn image_class(path: impl AsRef<Path>) -> Result<u32, IoError> {
    let path = path.as_ref();
    let invalid = || IoError::InvalidClassLabel(path.to_path_buf());

    let stem = path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.split('.').next())
        .ok_or_else(invalid)?;

    let start = stem
        .char_indices()
        .rev()
        .nth(1)
        .map_or(0, |(idx, _)| idx);

    stem[start..].parse().map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::dataset::{image_class, list_image_files};
    use crate::error::IoError;

    #[test]
    fn class_labels() -> Result<(), IoError> {
        assert_eq!(image_class("cat07.png")?, 7);
        assert_eq!(image_class("/tmp/data/dog12.jpg")?, 12);
        assert_eq!(image_class("img12.v2.jpg")?, 12);
        assert_eq!(image_class("3.png")?, 3);
        Ok(())
    }

    #[test]
    fn class_label_missing() {
        for name in ["cat.png", "ab.png", ""] {
            let res = image_class(name);
            assert!(
                matches!(res, Err(IoError::InvalidClassLabel(ref p)) if *p == PathBuf::from(name)),
                "{name}"
            );
        }
    }

    #[test]
    fn list_skips_non_images() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let dir = tmp_dir.path();

        image::GrayImage::new(4, 4).save(dir.join("b01.png"))?;
        image::RgbImage::new(2, 2).save(dir.join("a02.png"))?;
        std::fs::write(dir.join("readme.txt"), "labels are in the file names")?;
        std::fs::create_dir(dir.join("train"))?;

        let files = list_image_files(dir)?;
        assert_eq!(files, vec![dir.join("a02.png"), dir.join("b01.png")]);
        Ok(())
    }

    #[test]
    fn list_requires_directory() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("x01.png");
        image::GrayImage::new(1, 1).save(&file_path)?;

        assert!(matches!(
            list_image_files(&file_path),
            Err(IoError::NotADirectory(_))
        ));
        assert!(matches!(
            list_image_files(tmp_dir.path().join("missing")),
            Err(IoError::FileDoesNotExist(_))
        ));
        Ok(())
    }
}
