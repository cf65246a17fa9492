use anyhow::Result;
use placeholder::harness::TestSurface;
use placeholder::{AnimationSpec, Color, PlaceholderDefaults, PlaceholderSettings, SpringSpec};

const SETTINGS: &str = r#"
[crossfade]
damping_ratio = 0.5
stiffness = 200.0

[shimmer]
duration_ms = 900.0
"#;

#[test]
fn settings_file_reaches_the_node() -> Result<()> {
    let defaults = PlaceholderDefaults::new(PlaceholderSettings::from_toml_str(SETTINGS)?);
    let mut surface = TestSurface::new(16, 16);
    surface.set_content(
        defaults
            .placeholder(true, Color::RED)
            .highlight(defaults.shimmer(Color::WHITE)),
    );

    let node = surface.node().expect("attached");
    let crossfade = AnimationSpec::Spring(SpringSpec::new(0.5, 200.0));
    assert_eq!(node.placeholder_fade_spec(), crossfade);
    assert_eq!(node.content_fade_spec(), crossfade);

    let highlight = node.highlight().expect("shimmer configured");
    assert_eq!(highlight.animation_spec().animation.duration_ms, 900.0);
    assert_eq!(highlight.animation_spec().animation.delay_ms, 200.0);
    assert!(node.is_highlight_running());
    Ok(())
}

#[test]
fn soft_crossfade_takes_longer_to_settle() -> Result<()> {
    let soft = PlaceholderDefaults::new(PlaceholderSettings::from_toml_str(SETTINGS)?);
    let stock = PlaceholderDefaults::default();

    let settle_ms = |defaults: &PlaceholderDefaults| -> Result<f64> {
        let mut surface = TestSurface::new(8, 8);
        surface.set_content(defaults.placeholder(true, Color::RED));
        surface.set_content(defaults.placeholder(false, Color::RED));
        let start = surface.elapsed_ms();
        surface.wait_for_idle()?;
        Ok(surface.elapsed_ms() - start)
    };

    assert!(settle_ms(&soft)? > settle_ms(&stock)?);
    Ok(())
}
