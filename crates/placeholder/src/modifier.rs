//! Declarative entry point: `placeholder(visible, color)` plus builder options.
//!
//! A [`PlaceholderConfig`] is a plain value. The host keeps one per decorated
//! element, calls [`PlaceholderConfig::create`] the first time, and
//! [`PlaceholderConfig::update`] with each new config afterwards so only the
//! fields that actually changed reach the node.

use placeholder_paint::Color;

use crate::animation::AnimationSpec;
use crate::highlight::Highlight;
use crate::node::PlaceholderNode;
use crate::shape::Shape;

/// Configuration of one placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderConfig {
    /// `true` shows the placeholder, `false` shows the content.
    pub visible: bool,
    pub color: Color,
    pub shape: Shape,
    pub highlight: Option<Highlight>,
    pub placeholder_fade_animation_spec: AnimationSpec,
    pub content_fade_animation_spec: AnimationSpec,
}

/// Draw a placeholder of `color` over the content while `visible` is true.
pub fn placeholder(visible: bool, color: Color) -> PlaceholderConfig {
    PlaceholderConfig {
        visible,
        color,
        shape: Shape::Rectangle,
        highlight: None,
        placeholder_fade_animation_spec: AnimationSpec::default(),
        content_fade_animation_spec: AnimationSpec::default(),
    }
}

/// A field of [`PlaceholderConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    Visible,
    Color,
    Shape,
    Highlight,
    PlaceholderFadeAnimationSpec,
    ContentFadeAnimationSpec,
}

impl PlaceholderConfig {
    pub fn shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    pub fn highlight(mut self, highlight: impl Into<Option<Highlight>>) -> Self {
        self.highlight = highlight.into();
        self
    }

    pub fn placeholder_fade_animation_spec(mut self, spec: AnimationSpec) -> Self {
        self.placeholder_fade_animation_spec = spec;
        self
    }

    pub fn content_fade_animation_spec(mut self, spec: AnimationSpec) -> Self {
        self.content_fade_animation_spec = spec;
        self
    }

    /// A fresh, detached node for this configuration.
    pub fn create(&self) -> PlaceholderNode {
        PlaceholderNode::new(self)
    }

    /// Fields whose values differ between `self` and `other`.
    pub fn changed_fields(&self, other: &PlaceholderConfig) -> Vec<ConfigField> {
        let mut changed = Vec::new();
        if self.visible != other.visible {
            changed.push(ConfigField::Visible);
        }
        if self.color != other.color {
            changed.push(ConfigField::Color);
        }
        if self.shape != other.shape {
            changed.push(ConfigField::Shape);
        }
        if self.highlight != other.highlight {
            changed.push(ConfigField::Highlight);
        }
        if self.placeholder_fade_animation_spec != other.placeholder_fade_animation_spec {
            changed.push(ConfigField::PlaceholderFadeAnimationSpec);
        }
        if self.content_fade_animation_spec != other.content_fade_animation_spec {
            changed.push(ConfigField::ContentFadeAnimationSpec);
        }
        changed
    }

    /// Push the fields that differ from the node's configuration into it.
    /// Returns the fields that were pushed.
    pub fn update(&self, node: &mut PlaceholderNode) -> Vec<ConfigField> {
        let changed = self.changed_fields(&node.config());
        for field in &changed {
            match field {
                ConfigField::Visible => node.update_visible(self.visible),
                ConfigField::Color => node.update_color(self.color),
                ConfigField::Shape => node.update_shape(self.shape.clone()),
                ConfigField::Highlight => node.update_highlight(self.highlight.clone()),
                ConfigField::PlaceholderFadeAnimationSpec => {
                    node.update_placeholder_fade_spec(self.placeholder_fade_animation_spec)
                }
                ConfigField::ContentFadeAnimationSpec => {
                    node.update_content_fade_spec(self.content_fade_animation_spec)
                }
            }
        }
        changed
    }

    /// Name, primary value and properties for developer tooling.
    pub fn inspect(&self) -> InspectorInfo {
        InspectorInfo {
            name: "placeholder",
            value: InspectableValue::Bool(self.visible),
            properties: vec![
                ("visible", InspectableValue::Bool(self.visible)),
                ("color", InspectableValue::Color(self.color)),
                ("highlight", InspectableValue::Highlight(self.highlight.clone())),
                ("shape", InspectableValue::Shape(self.shape.clone())),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InspectableValue {
    Bool(bool),
    Color(Color),
    Shape(Shape),
    Highlight(Option<Highlight>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct InspectorInfo {
    pub name: &'static str,
    pub value: InspectableValue,
    pub properties: Vec<(&'static str, InspectableValue)>,
}

impl InspectorInfo {
    pub fn property(&self, name: &str) -> Option<&InspectableValue> {
        self.properties
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::CornerRadii;

    #[test]
    fn defaults() {
        let config = placeholder(true, Color::RED);
        assert_eq!(config.shape, Shape::Rectangle);
        assert_eq!(config.highlight, None);
        assert_eq!(config.placeholder_fade_animation_spec, AnimationSpec::spring());
        assert_eq!(config.content_fade_animation_spec, AnimationSpec::spring());
    }

    #[test]
    fn equal_configs_report_no_changes() {
        let a = placeholder(true, Color::RED).highlight(Highlight::fade(Color::WHITE));
        let b = placeholder(true, Color::RED).highlight(Highlight::fade(Color::WHITE));
        assert_eq!(a, b);
        assert!(a.changed_fields(&b).is_empty());
    }

    #[test]
    fn changed_fields_lists_each_difference() {
        let a = placeholder(true, Color::RED);
        let b = placeholder(false, Color::BLUE)
            .shape(Shape::RoundedRect(CornerRadii::px(4.0)))
            .content_fade_animation_spec(AnimationSpec::tween(200.0));
        assert_eq!(
            a.changed_fields(&b),
            vec![
                ConfigField::Visible,
                ConfigField::Color,
                ConfigField::Shape,
                ConfigField::ContentFadeAnimationSpec,
            ]
        );
    }

    #[test]
    fn update_pushes_only_changes() {
        let mut node = placeholder(true, Color::RED).create();
        let changed = placeholder(true, Color::GREEN).update(&mut node);
        assert_eq!(changed, vec![ConfigField::Color]);
        assert_eq!(node.color(), Color::GREEN);
        assert!(placeholder(true, Color::GREEN).update(&mut node).is_empty());
    }

    #[test]
    fn create_round_trips_config() {
        let config = placeholder(false, Color::BLUE)
            .shape(Shape::Circle)
            .highlight(Highlight::shimmer(Color::WHITE))
            .placeholder_fade_animation_spec(AnimationSpec::snap());
        assert_eq!(config.create().config(), config);
    }

    #[test]
    fn inspector_exposes_properties() {
        let info = placeholder(true, Color::RED).shape(Shape::Circle).inspect();
        assert_eq!(info.name, "placeholder");
        assert_eq!(info.value, InspectableValue::Bool(true));
        let names: Vec<_> = info.properties.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, ["visible", "color", "highlight", "shape"]);
        assert_eq!(info.property("shape"), Some(&InspectableValue::Shape(Shape::Circle)));
        assert_eq!(info.property("missing"), None);
    }
}
