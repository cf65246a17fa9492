use anyhow::Result;
use placeholder::animation::{EasingFunction, RepeatMode};
use placeholder::{AnimationSpec, InfiniteRepeatableSpec, SpringSpec, TweenSpec};

#[test]
fn tween_spec_from_toml() -> Result<()> {
    let spec: AnimationSpec = toml::from_str(
        r#"
        type = "tween"
        duration_ms = 250.0
        delay_ms = 10.0

        [easing]
        type = "linear"
        "#,
    )?;
    assert_eq!(
        spec,
        AnimationSpec::Tween(
            TweenSpec::new(250.0)
                .with_delay(10.0)
                .with_easing(EasingFunction::Linear)
        )
    );
    Ok(())
}

#[test]
fn spring_spec_fills_missing_fields() -> Result<()> {
    let spec: AnimationSpec = toml::from_str(
        r#"
        type = "spring"
        stiffness = 200.0
        "#,
    )?;
    assert_eq!(
        spec,
        AnimationSpec::Spring(SpringSpec::new(
            SpringSpec::DAMPING_RATIO_NO_BOUNCY,
            SpringSpec::STIFFNESS_LOW
        ))
    );
    Ok(())
}

#[test]
fn repeatable_spec_round_trips() -> Result<()> {
    let spec = InfiniteRepeatableSpec::new(
        TweenSpec::new(1700.0).with_easing(EasingFunction::cubic_bezier(0.4, 0.0, 0.2, 1.0)),
        RepeatMode::Reverse,
    );
    let text = toml::to_string(&spec)?;
    let parsed: InfiniteRepeatableSpec = toml::from_str(&text)?;
    assert_eq!(parsed, spec);
    Ok(())
}
