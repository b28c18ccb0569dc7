//! Integration tests for the session: load, detect, history, save.

mod common;

use image::GenericImageView;

use common::*;

fn session() -> Session {
    Session::new(Detector::default())
}

#[test]
fn detect_before_loading_reports_missing_image() {
    let mut session = session();
    assert!(matches!(session.detect(), Err(DetectError::NoImage)));
    assert_eq!(session.status(), "Please load an image first");
    assert!(session.history().is_empty());
}

#[test]
fn failed_load_leaves_session_untouched() {
    let mut session = session();
    let err = session.open("/no/such/image.png").unwrap_err();
    assert!(matches!(err, DetectError::Decode { .. }));
    assert!(session.source().is_none());
    assert!(session.history().is_empty());
    assert!(session.status().starts_with("Failed to load image"));
}

#[test]
fn uniform_image_with_fast_mode_finds_nothing() -> anyhow::Result<()> {
    let file = write_temp_png(&uniform_image(100, 100, 128));
    let mut session = session();
    session.open(file.path())?;
    assert_eq!(session.history().len(), 1);

    let result = session.detect()?;
    assert!(matches!(result, DetectionResult::NotFound));
    assert_eq!(session.status(), "No barcode detected using fast method");
    assert_eq!(session.history().len(), 1);
    Ok(())
}

#[test]
fn successful_detection_is_pushed_onto_history() -> anyhow::Result<()> {
    let file = write_temp_png(&barcode_image());
    let mut session = session();
    session.open(file.path())?;
    let original = session.current_image().cloned().expect("loaded image");

    assert!(session.detect()?.is_found());
    assert_eq!(session.status(), "Barcode detected using fast method");
    assert_eq!(session.history().len(), 2);
    let annotated = session.current_image().cloned().expect("annotated image");
    assert_eq!(annotated.dimensions(), original.dimensions());
    assert_ne!(annotated.to_rgb8(), original.to_rgb8());

    let back = session.undo().cloned().expect("undo to the loaded image");
    assert_eq!(back.to_rgb8(), original.to_rgb8());
    let forward = session.redo().cloned().expect("redo to the annotated image");
    assert_eq!(forward.to_rgb8(), annotated.to_rgb8());
    assert!(session.redo().is_none());
    Ok(())
}

#[test]
fn detecting_after_undo_replaces_the_redo_branch() -> anyhow::Result<()> {
    let file = write_temp_png(&black_block(100, 100, 10, 10, 40, 20));
    let mut session = session();
    session.open(file.path())?;
    session.set_mode(Mode::Reference);
    session.detect()?;
    session.detect()?;
    assert_eq!(session.history().len(), 3);

    session.undo();
    session.undo();
    session.detect()?;

    assert_eq!(session.history().len(), 2);
    assert_eq!(session.history().cursor(), Some(1));
    assert!(session.redo().is_none());
    assert_eq!(session.status(), "Barcode detected using reference method");
    Ok(())
}

#[test]
fn detection_runs_on_the_loaded_source_not_the_annotation() -> anyhow::Result<()> {
    let file = write_temp_png(&barcode_image());
    let mut session = session();
    session.open(file.path())?;

    let first = session.detect()?;
    let second = session.detect()?;
    assert_eq!(first.geometry(), second.geometry());
    Ok(())
}

#[test]
fn save_result_writes_the_current_image() -> anyhow::Result<()> {
    let file = write_temp_png(&barcode_image());
    let out_dir = tempfile::TempDir::new()?;
    let out_path = out_dir.path().join("result.png");

    let mut session = session();
    assert!(matches!(
        session.save_result(&out_path),
        Err(DetectError::NoImage)
    ));

    session.open(file.path())?;
    session.detect()?;
    session.save_result(&out_path)?;
    assert_eq!(
        session.status(),
        format!("Image saved to {}", out_path.display())
    );

    let saved = image::open(&out_path)?;
    let current = session.current_image().expect("current image");
    assert_eq!(saved.to_rgb8(), current.to_rgb8());
    Ok(())
}

#[test]
fn unwritable_destination_is_a_write_error() -> anyhow::Result<()> {
    let file = write_temp_png(&barcode_image());
    let mut session = session();
    session.open(file.path())?;

    let err = session
        .save_result("/no/such/dir/result.png")
        .unwrap_err();
    assert!(matches!(err, DetectError::Write { .. }));
    assert!(session.status().starts_with("Failed to save image"));
    Ok(())
}
