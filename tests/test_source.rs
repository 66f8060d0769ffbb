//! Integration tests for scanning the input folder.

mod common;

use common::*;

#[test]
fn test_subdirectories_are_skipped() -> anyhow::Result<()> {
    let dir = create_image_dir(3);
    std::fs::create_dir(dir.path().join("album"))?;
    write_test_image(&dir.path().join("album").join("nested.png"));

    let images = ImageSet::scan(dir.path())?;

    assert_eq!(images.len(), 3);
    let mut names: Vec<String> = images
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["photo_0.png", "photo_1.png", "photo_2.png"]);

    Ok(())
}

#[test]
fn test_every_launch_rescans() -> anyhow::Result<()> {
    let dir = create_image_dir(1);
    assert_eq!(ImageSet::scan(dir.path())?.len(), 1);

    write_test_image(&dir.path().join("late.png"));
    assert_eq!(ImageSet::scan(dir.path())?.len(), 2);

    Ok(())
}

#[test]
fn test_non_image_files_are_still_listed() -> anyhow::Result<()> {
    // the folder is not filtered by extension; undecodable files count zero faces later
    let dir = create_image_dir(0);
    std::fs::write(dir.path().join("notes.txt"), "not an image")?;

    assert_eq!(ImageSet::scan(dir.path())?.len(), 1);
    Ok(())
}
