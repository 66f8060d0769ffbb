//! Integration tests for the console menu driving real sessions.

mod common;

use common::*;

#[test]
fn test_launch_then_close() -> anyhow::Result<()> {
    let input = create_image_dir(2);
    let scratch = tempfile::TempDir::new()?;
    let mut session = Session::new(
        fake_classifiers(one_face_one_wide(), None),
        DetectionPipeline::new(),
        ResultLogger::open(stats_path(&scratch))?,
        RecordingViewer::default(),
        input.path(),
    );

    let mut shell = Shell::new("1\n2\n".as_bytes(), Vec::new());
    shell.run(&mut session)?;

    assert_eq!(shell.state(), ShellState::Exited);
    assert_eq!(read_lines(&stats_path(&scratch)).len(), 2);

    let output = String::from_utf8(shell.into_output())?;
    assert_eq!(output.matches("1. Launch program").count(), 2);
    assert!(output.contains("2. Close program"));
    Ok(())
}

#[test]
fn test_unknown_input_redisplays_the_menu() -> anyhow::Result<()> {
    let input = create_image_dir(1);
    let scratch = tempfile::TempDir::new()?;
    let mut session = Session::new(
        fake_classifiers(one_face_one_wide(), None),
        DetectionPipeline::new(),
        ResultLogger::open(stats_path(&scratch))?,
        RecordingViewer::default(),
        input.path(),
    );

    let mut shell = Shell::new("hello\n2\n".as_bytes(), Vec::new());
    shell.run(&mut session)?;

    let output = String::from_utf8(shell.into_output())?;
    assert!(output.contains("Unknown option 'hello'"));
    assert_eq!(output.matches("Welcome to the FacePhoto program").count(), 2);
    assert!(read_lines(&stats_path(&scratch)).is_empty());
    Ok(())
}

#[test]
fn test_end_of_input_exits() -> anyhow::Result<()> {
    let input = create_image_dir(1);
    let scratch = tempfile::TempDir::new()?;
    let mut session = Session::new(
        fake_classifiers(one_face_one_wide(), None),
        DetectionPipeline::new(),
        ResultLogger::open(stats_path(&scratch))?,
        RecordingViewer::default(),
        input.path(),
    );

    let mut shell = Shell::new("1\n".as_bytes(), Vec::new());
    shell.run(&mut session)?;

    assert_eq!(shell.state(), ShellState::Exited);
    assert_eq!(read_lines(&stats_path(&scratch)).len(), 1);
    Ok(())
}

#[test]
fn test_failed_launch_returns_to_the_menu() -> anyhow::Result<()> {
    let input = create_image_dir(0);
    let scratch = tempfile::TempDir::new()?;
    let missing = input.path().join("not_there");
    let mut session = Session::new(
        fake_classifiers(one_face_one_wide(), None),
        DetectionPipeline::new(),
        ResultLogger::open(stats_path(&scratch))?,
        RecordingViewer::default(),
        missing.clone(),
    );

    let mut shell = Shell::new("1\n".as_bytes(), Vec::new());
    assert_eq!(shell.step(&mut session)?, ShellState::Running);
    assert_eq!(shell.step(&mut session)?, ShellState::MenuDisplayed);

    // the folder shows up before the next launch
    std::fs::create_dir(&missing)?;
    write_test_image(&missing.join("face.png"));

    let mut shell = Shell::new("1\n2\n".as_bytes(), Vec::new());
    shell.run(&mut session)?;
    assert_eq!(read_lines(&stats_path(&scratch)).len(), 1);
    Ok(())
}

#[test]
fn test_failed_launch_is_reported() -> anyhow::Result<()> {
    let input = create_image_dir(0);
    let scratch = tempfile::TempDir::new()?;
    let mut session = Session::new(
        fake_classifiers(one_face_one_wide(), None),
        DetectionPipeline::new(),
        ResultLogger::open(stats_path(&scratch))?,
        RecordingViewer::default(),
        input.path().join("not_there"),
    );

    let mut shell = Shell::new("1\n2\n".as_bytes(), Vec::new());
    shell.run(&mut session)?;

    let output = String::from_utf8(shell.into_output())?;
    assert!(output.contains("Launch failed"));
    Ok(())
}
