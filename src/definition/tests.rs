// Definition tests: parsing, static checks and end-to-end runs

#[cfg(test)]
mod tests {
    use crate::background::SinkKind;
    use crate::definition::types::{Op, SizeExpr};
    use crate::definition::{Definition, RunOptions};
    use crate::engine::{EngineBackend, NativeEngine};
    use crate::error::Error;
    use crate::geometry::{Pos, Size};
    use crate::pipeline::Pipeline;
    use crate::sources::testing::{MockFetcher, jpeg_bytes, test_catalog};
    use crate::sources::SourceCache;
    use crate::sources::types::Catalog;

    const SIMPLE: &str = include_str!("../../pipelines/simple/pipeline.yaml");
    const SPAN: &str =
        include_str!("../../pipelines/span_three_monitors_north_america/pipeline.yaml");
    const THREE_SATS: &str = include_str!("../../pipelines/three_sats_three_monitors/pipeline.yaml");
    const MIX: &str =
        include_str!("../../pipelines/mix_satellite_images_with_local/pipeline.yaml");

    fn definition_error(yaml: &str) -> String {
        match Definition::parse(yaml) {
            Err(Error::DefinitionError(msg)) => msg,
            other => panic!("expected a definition error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn demo_pipelines_parse() {
        for yaml in [SIMPLE, SPAN, THREE_SATS, MIX] {
            let definition = Definition::parse(yaml).unwrap();
            assert!(!definition.steps.is_empty());
        }
    }

    #[test]
    fn simple_demo_structure() {
        let definition = Definition::parse(SIMPLE).unwrap();

        assert_eq!(definition.sizes["monitor"], Size::new(1920, 1080));
        assert_eq!(definition.steps.len(), 5);
        assert_eq!(definition.steps[0].bind.as_deref(), Some("earth"));
        assert_eq!(
            definition.steps[0].op,
            Op::Clean("GOES-East Full Disk".to_string())
        );
        assert!(matches!(
            &definition.steps[2].op,
            Op::Blank { color, size: SizeExpr::Name(size) } if color == "black" && size == "monitor"
        ));
        assert_eq!(
            definition.steps[4].op,
            Op::Background {
                sink: SinkKind::Gnome3,
                image: "final_background".to_string(),
                monitor: None,
            }
        );
    }

    #[test]
    fn rebinding_is_allowed() {
        let definition = Definition::parse(THREE_SATS).unwrap();
        let bg_bindings = definition
            .steps
            .iter()
            .filter(|s| s.bind.as_deref() == Some("bg"))
            .count();
        assert_eq!(bg_bindings, 4);
        assert_eq!(definition.positions["monitor2_pos"], Pos::new(1200, 240));
    }

    #[test]
    fn yaml_syntax_error() {
        let msg = definition_error("steps: [ { let: a, blank: ");
        assert!(!msg.is_empty());
    }

    #[test]
    fn unknown_operation() {
        definition_error("steps:\n  - let: a\n    blur: { image: b }\n");
    }

    #[test]
    fn missing_let() {
        let msg = definition_error("steps:\n  - blank: { color: black, size: [2, 2] }\n");
        assert!(msg.contains("step 1 (blank)"), "{msg}");
        assert!(msg.contains("let"), "{msg}");
    }

    #[test]
    fn let_on_background() {
        let msg = definition_error(
            r#"
steps:
  - let: a
    blank: { color: black, size: [2, 2] }
  - let: b
    background: { sink: wm, image: a }
"#,
        );
        assert!(msg.contains("step 2 (background)"), "{msg}");
    }

    #[test]
    fn image_used_before_bound() {
        let msg = definition_error(
            r#"
steps:
  - let: b
    resize: { image: a, size: [2, 2] }
  - let: a
    blank: { color: black, size: [2, 2] }
"#,
        );
        assert!(msg.contains("step 1 (resize)"), "{msg}");
        assert!(msg.contains("\"a\""), "{msg}");
    }

    #[test]
    fn unknown_size_and_position_names() {
        let msg = definition_error(
            "steps:\n  - let: a\n    blank: { color: black, size: screen }\n",
        );
        assert!(msg.contains("screen"), "{msg}");

        let msg = definition_error(
            r#"
steps:
  - let: a
    blank: { color: black, size: [4, 4] }
  - let: b
    crop: { image: a, offset: corner, size: [2, 2] }
"#,
        );
        assert!(msg.contains("step 2 (crop)"), "{msg}");
        assert!(msg.contains("corner"), "{msg}");
    }

    #[test]
    fn let_cannot_shadow_declared_size() {
        let msg = definition_error(
            r#"
sizes: { monitor: [4, 4] }
steps:
  - let: monitor
    blank: { color: black, size: [2, 2] }
"#,
        );
        assert!(msg.contains("declared size"), "{msg}");
    }

    #[test]
    fn xfce_without_monitor() {
        definition_error(
            r#"
steps:
  - let: a
    blank: { color: black, size: [2, 2] }
  - background: { sink: xfce, image: a }
"#,
        );
    }

    #[test]
    fn two_operations_in_one_step() {
        let msg = definition_error(
            r#"
steps:
  - let: a
    blank: { color: black, size: [2, 2] }
    crop: { image: zzz, offset: [0, 0], size: [1, 1] }
"#,
        );
        assert!(msg.contains("step 1"), "{msg}");
        assert!(msg.contains("blank, crop"), "{msg}");
    }

    #[test]
    fn misspelled_step_key() {
        let msg = definition_error(
            r#"
steps:
  - let: a
    blank: { color: black, size: [2, 2] }
    monitr: HDMI-1
"#,
        );
        assert!(msg.contains("step 1"), "{msg}");
        assert!(msg.contains("monitr"), "{msg}");
    }

    #[test]
    fn misspelled_operation_field() {
        let msg = definition_error(
            r#"
steps:
  - let: a
    blank: { color: black, size: [2, 2] }
  - background: { sink: wm, image: a, monitr: HDMI-1 }
"#,
        );
        assert!(msg.contains("monitr"), "{msg}");
    }

    #[test]
    fn step_without_operation() {
        let msg = definition_error("steps:\n  - let: a\n");
        assert!(msg.contains("step 1: no operation"), "{msg}");
    }

    #[test]
    fn open_resolves_against_definition_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let photo = tmp.path().join("photo.png");
        image::RgbImage::new(12, 8).save(&photo).unwrap();
        let yaml_path = tmp.path().join("pipeline.yaml");
        std::fs::write(
            &yaml_path,
            r#"
steps:
  - let: photo
    open: photo.png
  - let: half
    resize: { image: photo, size: { scale_factor: [photo, 0.5] } }
"#,
        )
        .unwrap();

        let definition = Definition::from_file(&yaml_path).unwrap();
        let mut pipeline =
            Pipeline::new(tmp.path(), EngineBackend::Native(NativeEngine::new())).unwrap();
        let cache = SourceCache::new(
            test_catalog(),
            pipeline.images_dir(),
            MockFetcher::failing(),
        );

        let images = definition
            .execute(&mut pipeline, &cache, RunOptions::default())
            .unwrap();

        assert_eq!(images["photo"].path(), photo);
        assert_eq!(images["half"].size(), Size::new(6, 4));
    }

    #[test]
    fn runtime_errors_keep_their_kind() {
        let tmp = tempfile::tempdir().unwrap();
        let definition = Definition::parse(
            r#"
steps:
  - let: a
    blank: { color: black, size: [4, 4] }
  - let: b
    crop: { image: a, offset: [2, 2], size: [4, 4] }
"#,
        )
        .unwrap();
        let mut pipeline =
            Pipeline::new(tmp.path(), EngineBackend::Native(NativeEngine::new())).unwrap();
        let cache = SourceCache::new(
            test_catalog(),
            pipeline.images_dir(),
            MockFetcher::failing(),
        );

        let err = definition
            .execute(&mut pipeline, &cache, RunOptions { dry_run: true })
            .unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { .. }));
    }

    fn run_error(yaml: &str) -> Error {
        let tmp = tempfile::tempdir().unwrap();
        let definition = Definition::parse(yaml).unwrap();
        let mut pipeline =
            Pipeline::new(tmp.path(), EngineBackend::Native(NativeEngine::new())).unwrap();
        let cache = SourceCache::new(
            test_catalog(),
            pipeline.images_dir(),
            MockFetcher::failing(),
        );
        definition
            .execute(&mut pipeline, &cache, RunOptions { dry_run: true })
            .unwrap_err()
    }

    #[test]
    fn position_overflow_is_a_definition_error() {
        let err = run_error(
            r#"
positions:
  far: [2147483647, 0]
steps:
  - let: a
    blank: { color: black, size: [4, 4] }
  - let: b
    place: { image: a, offset: { add: [far, [1, 0]] }, base: a }
"#,
        );
        match err {
            Error::DefinitionError(msg) => {
                assert!(msg.contains("step 2 (place)"), "{msg}");
                assert!(msg.contains("out of range"), "{msg}");
            }
            other => panic!("expected a definition error, got {other:?}"),
        }
    }

    #[test]
    fn centering_overflow_is_a_definition_error() {
        let err = run_error(
            r#"
positions:
  far: [2147483647, 0]
steps:
  - let: a
    blank: { color: black, size: [4, 4] }
  - let: b
    place:
      image: a
      base: a
      offset: { centering_offset: { inner: [1, 1], outer: [9, 9], offset: far } }
"#,
        );
        assert!(matches!(err, Error::DefinitionError(_)), "{err:?}");
    }

    #[test]
    fn huge_scale_factor_is_an_invalid_size() {
        let err = run_error(
            r#"
sizes:
  monitor: [1920, 1080]
steps:
  - let: a
    blank: { color: black, size: { scale_factor: [monitor, 1e9] } }
"#,
        );
        assert!(
            matches!(err, Error::InvalidSize { operation: "blank", .. }),
            "{err:?}"
        );
    }

    #[test]
    fn simple_demo_dry_run() {
        let tmp = tempfile::tempdir().unwrap();
        let definition = Definition::parse(SIMPLE).unwrap();
        let mut pipeline =
            Pipeline::new(tmp.path(), EngineBackend::Native(NativeEngine::new())).unwrap();
        let cache = SourceCache::new(
            Catalog::bundled().unwrap(),
            pipeline.images_dir(),
            MockFetcher::serving(jpeg_bytes(500, 500)),
        );

        let images = definition
            .execute(&mut pipeline, &cache, RunOptions { dry_run: true })
            .unwrap();

        // The clean recipe cuts the 47-row info bar
        assert_eq!(images["earth"].size(), Size::new(500, 453));
        let scaled = images["earth_scaled"].size();
        assert!(scaled.w <= 1920 * 9 / 10 + 1 && scaled.h <= 1080 * 9 / 10 + 1);
        assert_eq!(images["final_background"].size(), Size::new(1920, 1080));
        assert_eq!(cache.fetcher().calls(), 1);
    }
}
