//! Contract Invariant Tests
//!
//! These tests verify the non-negotiable guarantees.

use std::sync::Arc;

use forgeavatars_core::{
    engines::{
        BauhausEngine, DiceBearEngine, GradientEngine, GravatarEngine, InitialsEngine,
        MultiColorPixelEngine, PixelEngine,
    },
    AvatarBuilder, AvatarError, Engine, EngineError, EngineKind, EngineOptions, FailureReason,
    GenerationRequest, GradientType, OfflineFetch, Outcome, RemoteFetch, SeedIdentity,
};

struct AlwaysDeclines;

impl Engine for AlwaysDeclines {
    fn name(&self) -> &str {
        "always-declines"
    }

    fn generate(&self, _: &GenerationRequest<'_>) -> Result<Outcome, EngineError> {
        Ok(Outcome::Declined)
    }
}

struct AlwaysFails(&'static str);

impl Engine for AlwaysFails {
    fn name(&self) -> &str {
        self.0
    }

    fn generate(&self, _: &GenerationRequest<'_>) -> Result<Outcome, EngineError> {
        Err(EngineError::render(format!("{} exploded", self.0)))
    }
}

struct AlwaysRenders;

impl Engine for AlwaysRenders {
    fn name(&self) -> &str {
        "always-renders"
    }

    fn generate(&self, _: &GenerationRequest<'_>) -> Result<Outcome, EngineError> {
        Ok(Outcome::Rendered("<svg>ok</svg>".to_string()))
    }
}

/// Answers every request with the same SVG, so DiceBear can run offline.
struct StaticFetch;

impl RemoteFetch for StaticFetch {
    fn fetch(&self, url: &url::Url) -> Option<Vec<u8>> {
        Some(format!("<svg><!-- {url} --></svg>").into_bytes())
    }
}

fn local_engines() -> Vec<Box<dyn Engine>> {
    vec![
        Box::new(PixelEngine),
        Box::new(MultiColorPixelEngine),
        Box::new(BauhausEngine),
        Box::new(GradientEngine),
        Box::new(InitialsEngine),
        Box::new(DiceBearEngine::new(Arc::new(StaticFetch))),
    ]
}

fn run(engine: &dyn Engine, seed: &str, name: Option<&str>, options: &EngineOptions) -> Outcome {
    engine
        .generate(&GenerationRequest::new(seed, name, 200, options))
        .unwrap()
}

#[test]
fn invariant_same_input_same_bytes() {
    let option_sets = [
        EngineOptions::default(),
        EngineOptions {
            pixels: Some(9),
            symmetry: Some(false),
            num_shapes: Some(12),
            gradient_type: Some(GradientType::Marble),
            ..Default::default()
        },
    ];
    let mut engines = local_engines();
    engines.push(Box::new(GravatarEngine));

    for engine in &engines {
        for options in &option_sets {
            for (seed, name) in [("test-seed", None), ("john@example.com", Some("John Doe")), ("", Some("Z"))] {
                assert_eq!(
                    run(engine.as_ref(), seed, name, options),
                    run(engine.as_ref(), seed, name, options),
                    "{} is not deterministic for {seed:?}",
                    engine.name()
                );
            }
        }
    }
}

#[test]
fn invariant_seed_changes_output() {
    let options = EngineOptions::default();
    for engine in local_engines() {
        assert_ne!(
            run(engine.as_ref(), "seed1", None, &options),
            run(engine.as_ref(), "seed2", None, &options),
            "{} ignores the seed",
            engine.name()
        );
    }
}

#[test]
fn invariant_gravatar_ignores_name() {
    let options = EngineOptions::default();
    assert_eq!(
        run(&GravatarEngine, "john@example.com", Some("John Doe"), &options),
        run(&GravatarEngine, "john@example.com", Some("Jane Smith"), &options)
    );
}

#[test]
fn invariant_initials_table() {
    assert_eq!(SeedIdentity::new("John Doe").initials(), "JD");
    assert_eq!(SeedIdentity::new("John Middle Doe").initials(), "JMD");
    assert_eq!(SeedIdentity::new("").initials(), "");
    assert_eq!(SeedIdentity::new("0").initials(), "0");
}

#[test]
fn invariant_initials_declines_exactly_on_empty() {
    let options = EngineOptions::default();
    assert_eq!(run(&InitialsEngine, "", None, &options), Outcome::Declined);
    assert_eq!(run(&InitialsEngine, "x", Some(" "), &options), Outcome::Declined);

    let zero = run(&InitialsEngine, "0", Some("0"), &options);
    assert!(zero.into_content().unwrap().contains(">0</text>"));
}

#[test]
fn invariant_size_boundaries() {
    assert!(AvatarBuilder::new().size(7).is_err());
    assert!(AvatarBuilder::new().size(8).is_ok());
    assert!(AvatarBuilder::new().size(2048).is_ok());
    assert!(AvatarBuilder::new().size(2049).is_err());

    let err = AvatarBuilder::new().size(7).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid size '7'. Size must be between 8 and 2048 pixels."
    );
}

#[test]
fn invariant_lightness_boundaries() {
    assert!(AvatarBuilder::new().foreground_lightness(-0.01).is_err());
    assert!(AvatarBuilder::new().foreground_lightness(1.01).is_err());
    assert!(AvatarBuilder::new().foreground_lightness(0.0).is_ok());
    assert!(AvatarBuilder::new().foreground_lightness(1.0).is_ok());

    let err = AvatarBuilder::new().background_lightness(1.5).unwrap_err();
    assert!(err.to_string().contains("backgroundLightness"));
}

#[test]
fn invariant_fallback_after_decline() {
    let mut builder = AvatarBuilder::new()
        .with_engine(Box::new(AlwaysDeclines))
        .with_engine(Box::new(AlwaysRenders))
        .seed("test-seed");

    let image = builder.generate().unwrap();
    assert_eq!(image.as_str(), Some("<svg>ok</svg>"));

    let log = builder.last_errors();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].engine, "always-declines");
    assert!(matches!(log[0].reason, FailureReason::Declined));
}

#[test]
fn invariant_aggregate_failure_in_order() {
    let mut builder = AvatarBuilder::new()
        .with_engine(Box::new(AlwaysFails("first")))
        .with_engine(Box::new(AlwaysFails("second")));

    let err = builder.generate().unwrap_err();
    let failures = err.failures();
    assert_eq!(failures.len(), 2);
    assert_eq!(failures[0].engine, "first");
    assert_eq!(failures[1].engine, "second");
    assert!(err.to_string().contains("Tried: first, second"));
}

#[test]
fn invariant_debug_raises_first_failure() {
    let mut builder = AvatarBuilder::new()
        .with_engine(Box::new(AlwaysFails("first")))
        .with_engine(Box::new(AlwaysFails("second")))
        .debug(true);

    match builder.generate() {
        Err(AvatarError::EngineFailed { engine, source }) => {
            assert_eq!(engine, "first");
            assert!(source.to_string().contains("first exploded"));
        }
        other => panic!("expected EngineFailed, got {other:?}"),
    }
    assert_eq!(builder.last_errors().len(), 1);
}

#[test]
fn invariant_offline_dicebear_falls_through() {
    let mut builder = AvatarBuilder::new()
        .fetcher(Arc::new(OfflineFetch))
        .engine("dicebear")
        .unwrap()
        .fallback_to("initials")
        .unwrap()
        .name("Grace Hopper");

    let image = builder.generate().unwrap();
    assert!(image.as_str().unwrap_or_default().contains(">GH</text>"));
    assert_eq!(builder.last_errors()[0].engine, "dicebear");
}

#[test]
fn invariant_pixel_end_to_end() {
    let generate = || {
        AvatarBuilder::new()
            .engine("pixel")
            .unwrap()
            .seed("test-seed")
            .size(200)
            .unwrap()
            .generate()
            .unwrap()
    };

    let image = generate();
    let svg = image.as_str().unwrap();
    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="200""#));
    assert!(svg.contains("<rect"));
    assert!(svg.contains("fill: #"));
    assert_eq!(image.content_type(), "image/svg+xml");
    assert_eq!(image.as_bytes(), generate().as_bytes());
}

#[test]
fn invariant_every_registered_engine_resolves() {
    for kind in EngineKind::ALL {
        let builder = AvatarBuilder::new().engine(kind.name()).unwrap();
        assert_eq!(builder.engine_names(), [kind.name()]);
    }
    assert!(matches!(
        AvatarBuilder::new().engine("unknown"),
        Err(AvatarError::UnknownEngine(_))
    ));
}

#[test]
fn invariant_saved_output_matches_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("avatars/test-seed.svg");

    let image = AvatarBuilder::new()
        .engine("bauhaus")
        .unwrap()
        .seed("test-seed")
        .generate()
        .unwrap();
    image.save(&path).unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), image.as_bytes());
}
