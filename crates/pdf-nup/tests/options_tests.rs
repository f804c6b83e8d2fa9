use pdf_nup::*;

#[test]
fn test_defaults() {
    let options = MergeOptions::default();
    assert_eq!(options.pages_per_sheet, 4);
    assert!(!options.reverse);
    assert_eq!(options.sheet.paper, PaperSize::A4);
    assert_eq!(options.sheet.margin_pt, 10.0);
    assert!(options.validate().is_ok());
}

#[test]
fn test_a4_reference_dimensions() {
    assert_eq!(PaperSize::A4.dimensions_pt(), (595.27, 841.89));
    assert_eq!(
        PaperSize::A4.dimensions_with_orientation(Orientation::Landscape),
        (841.89, 595.27)
    );
}

#[test]
fn test_validation_zero_pages_per_sheet() {
    let options = MergeOptions {
        pages_per_sheet: 0,
        ..Default::default()
    };
    match options.validate() {
        Err(MergeError::Config(msg)) => assert!(msg.contains("at least 1")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[test]
fn test_validation_bad_margin() {
    for margin_pt in [-1.0, f32::NAN, f32::INFINITY] {
        let sheet = SheetConfig {
            margin_pt,
            ..Default::default()
        };
        assert!(matches!(sheet.validate(), Err(MergeError::Config(_))));
    }
}

#[test]
fn test_validation_bad_paper() {
    let sheet = SheetConfig {
        paper: PaperSize::Custom {
            width_pt: 0.0,
            height_pt: 800.0,
        },
        ..Default::default()
    };
    assert!(matches!(sheet.validate(), Err(MergeError::Config(_))));
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_sheet_config_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sheet.json");

    let config = SheetConfig {
        paper: PaperSize::Letter,
        margin_pt: 18.0,
    };
    config.save(&path).await.unwrap();

    let loaded = SheetConfig::load(&path).await.unwrap();
    assert_eq!(loaded, config);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_sheet_config_load_custom_paper() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sheet.json");
    std::fs::write(
        &path,
        r#"{ "paper": { "Custom": { "width_pt": 500.0, "height_pt": 700.0 } }, "margin_pt": 5.0 }"#,
    )
    .unwrap();

    let loaded = SheetConfig::load(&path).await.unwrap();
    assert_eq!(loaded.paper.dimensions_pt(), (500.0, 700.0));
    assert_eq!(loaded.margin_pt, 5.0);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_sheet_config_load_rejects_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sheet.json");
    std::fs::write(&path, "not json").unwrap();

    match SheetConfig::load(&path).await {
        Err(MergeError::Config(msg)) => assert!(msg.contains("Failed to parse config")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}
