//! Hover tracking and the tooltip it drives.
//!
//! Each tick (after every transform write) the pointer ray is tested against
//! the [`PickableRegistry`]. [`HoverState`] turns the per-frame hit into
//! enter/change/leave transitions, so the tooltip sink only hears about
//! changes.

use bevy::prelude::*;

use crate::camera::MainCamera;
use crate::config::SceneConfig;
use crate::pick::{PickVolume, PickableRegistry, nearest_hit, ndc_from_cursor, ray_from_ndc};
use crate::types::FrameSet;

/// Plugin for pointer picking and tooltip state.
pub struct HoverPlugin;

impl Plugin for HoverPlugin {
    fn build(&self, app: &mut App) {
        let tooltip = app
            .world()
            .get_resource::<SceneConfig>()
            .is_none_or(|c| c.features.tooltip);

        app.init_resource::<HoverState>().init_resource::<PointerState>();
        if tooltip {
            app.init_resource::<Tooltip>();
        }
        app.add_systems(
            Update,
            (prune_pickables, pick_hovered).chain().in_set(FrameSet::Pick),
        );
    }
}

/// Display text of a pickable.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct HoverLabel {
    pub name: String,
    pub info: Option<String>,
}

impl HoverLabel {
    pub fn new(name: impl Into<String>, info: Option<String>) -> Self {
        Self {
            name: name.into(),
            info,
        }
    }

    /// Descriptive text, or the name when there is none.
    pub fn label(&self) -> &str {
        self.info.as_deref().unwrap_or(&self.name)
    }
}

/// Latest pointer position and viewport size, written by the input systems.
#[derive(Resource, Clone, Debug, Default)]
pub struct PointerState {
    /// Cursor in window pixels, `None` when outside the window.
    pub screen: Option<Vec2>,
    /// Logical viewport size in pixels.
    pub viewport: Vec2,
}

impl PointerState {
    pub fn ndc(&self) -> Option<Vec2> {
        ndc_from_cursor(self.screen?, self.viewport)
    }

    pub fn aspect(&self) -> f32 {
        if self.viewport.y > 0.0 {
            self.viewport.x / self.viewport.y
        } else {
            1.0
        }
    }
}

/// Change produced by one observation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverTransition {
    Unchanged,
    Entered(Entity),
    /// Leave `from` and enter `to` in one step.
    Changed { from: Entity, to: Entity },
    Left(Entity),
}

/// The entity currently under the pointer, if any.
#[derive(Resource, Debug, Default)]
pub struct HoverState {
    current: Option<Entity>,
}

impl HoverState {
    pub fn current(&self) -> Option<Entity> {
        self.current
    }

    /// Record this frame's hit and report what changed.
    pub fn observe(&mut self, hit: Option<Entity>) -> HoverTransition {
        let transition = match (self.current, hit) {
            (None, None) => HoverTransition::Unchanged,
            (Some(a), Some(b)) if a == b => HoverTransition::Unchanged,
            (None, Some(to)) => HoverTransition::Entered(to),
            (Some(from), Some(to)) => HoverTransition::Changed { from, to },
            (Some(from), None) => HoverTransition::Left(from),
        };
        self.current = hit;
        transition
    }

    pub fn reset(&mut self) {
        self.current = None;
    }
}

/// Where hover labels go.
pub trait TooltipSink {
    fn show(&mut self, text: &str, screen: Vec2);
    fn hide(&mut self);
    /// Track the pointer while the label stays the same.
    fn follow(&mut self, _screen: Vec2) {}
}

/// Overlay tooltip, drawn by the egui overlay. Hidden by default.
#[derive(Resource, Clone, Debug, Default, PartialEq)]
pub struct Tooltip {
    pub text: Option<String>,
    pub position: Vec2,
}

impl Tooltip {
    pub fn is_visible(&self) -> bool {
        self.text.is_some()
    }
}

impl TooltipSink for Tooltip {
    fn show(&mut self, text: &str, screen: Vec2) {
        self.text = Some(text.to_string());
        self.position = screen;
    }

    fn hide(&mut self) {
        self.text = None;
    }

    fn follow(&mut self, screen: Vec2) {
        if self.text.is_some() {
            self.position = screen;
        }
    }
}

/// Forward a transition to the sink.
///
/// `label` resolves the display text of the newly hovered entity.
pub fn apply_transition(
    transition: HoverTransition,
    screen: Vec2,
    label: impl FnOnce(Entity) -> String,
    sink: &mut impl TooltipSink,
) {
    match transition {
        HoverTransition::Entered(to) | HoverTransition::Changed { to, .. } => {
            sink.show(&label(to), screen);
        }
        HoverTransition::Left(_) => sink.hide(),
        HoverTransition::Unchanged => sink.follow(screen),
    }
}

/// Drop registry entries whose entity is gone.
fn prune_pickables(mut registry: ResMut<PickableRegistry>, volumes: Query<(), With<PickVolume>>) {
    if registry.iter().any(|e| !volumes.contains(e)) {
        registry.retain(|e| volumes.contains(*e));
    }
}

/// Cast the pointer ray and update hover state and tooltip.
fn pick_hovered(
    pointer: Res<PointerState>,
    camera: Query<(&Transform, &Projection), With<MainCamera>>,
    registry: Res<PickableRegistry>,
    pickables: Query<(&Transform, &PickVolume, Option<&HoverLabel>)>,
    mut hover: ResMut<HoverState>,
    tooltip: Option<ResMut<Tooltip>>,
) {
    let Some(mut tooltip) = tooltip else {
        return;
    };

    let ray = match (pointer.ndc(), camera.single()) {
        (Some(ndc), Ok((transform, Projection::Perspective(perspective)))) => {
            ray_from_ndc(ndc, transform, perspective.fov, pointer.aspect())
        }
        _ => None,
    };

    let hit = ray.and_then(|ray| {
        nearest_hit(
            ray,
            registry.iter().filter_map(|entity| {
                pickables
                    .get(entity)
                    .ok()
                    .map(|(transform, volume, _)| (entity, transform, volume))
            }),
        )
    });

    let transition = hover.observe(hit.map(|h| h.entity));
    let screen = pointer.screen.unwrap_or(tooltip.position);
    apply_transition(
        transition,
        screen,
        |entity| match pickables.get(entity) {
            Ok((_, _, Some(label))) => label.label().to_string(),
            _ => entity.to_string(),
        },
        &mut *tooltip,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::entities;

    /// Sink that counts calls.
    #[derive(Default)]
    struct RecordingSink {
        shown: Vec<String>,
        hides: usize,
    }

    impl TooltipSink for RecordingSink {
        fn show(&mut self, text: &str, _screen: Vec2) {
            self.shown.push(text.to_string());
        }

        fn hide(&mut self) {
            self.hides += 1;
        }
    }

    fn run(frames: &[Option<Entity>], state: &mut HoverState, sink: &mut RecordingSink) {
        for hit in frames {
            let transition = state.observe(*hit);
            apply_transition(transition, Vec2::ZERO, |e| format!("{e}"), sink);
        }
    }

    #[test]
    fn test_repeated_hits_show_once() {
        let [a, _] = entities();
        let mut state = HoverState::default();
        let mut sink = RecordingSink::default();

        run(&[Some(a), Some(a), Some(a)], &mut state, &mut sink);

        assert_eq!(sink.shown.len(), 1);
        assert_eq!(state.current(), Some(a));
    }

    #[test]
    fn test_hide_once_while_nothing_hit() {
        let [a, _] = entities();
        let mut state = HoverState::default();
        let mut sink = RecordingSink::default();

        run(&[Some(a), None, None, None], &mut state, &mut sink);

        assert_eq!(sink.hides, 1);
        assert_eq!(state.current(), None);
    }

    #[test]
    fn test_no_hide_without_prior_hover() {
        let mut state = HoverState::default();
        let mut sink = RecordingSink::default();
        run(&[None, None], &mut state, &mut sink);
        assert_eq!(sink.hides, 0);
        assert!(sink.shown.is_empty());
    }

    #[test]
    fn test_switch_target_is_one_change() {
        let [a, b] = entities();
        let mut state = HoverState::default();

        assert_eq!(state.observe(Some(a)), HoverTransition::Entered(a));
        assert_eq!(
            state.observe(Some(b)),
            HoverTransition::Changed { from: a, to: b }
        );
        assert_eq!(state.observe(None), HoverTransition::Left(b));
    }

    #[test]
    fn test_label_falls_back_to_name() {
        let bare = HoverLabel::new("Satellite 1", None);
        let described = HoverLabel::new("Earth", Some("Home".to_string()));
        assert_eq!(bare.label(), "Satellite 1");
        assert_eq!(described.label(), "Home");
    }

    #[test]
    fn test_tooltip_follows_pointer_only_when_visible() {
        let mut tooltip = Tooltip::default();
        tooltip.follow(Vec2::new(5.0, 5.0));
        assert_eq!(tooltip.position, Vec2::ZERO);

        tooltip.show("Mars", Vec2::new(10.0, 20.0));
        tooltip.follow(Vec2::new(12.0, 22.0));
        assert_eq!(tooltip.position, Vec2::new(12.0, 22.0));

        tooltip.hide();
        assert!(!tooltip.is_visible());
    }

    #[test]
    fn test_pointer_ndc_needs_cursor() {
        let mut pointer = PointerState {
            screen: None,
            viewport: Vec2::new(800.0, 600.0),
        };
        assert_eq!(pointer.ndc(), None);
        pointer.screen = Some(Vec2::new(400.0, 300.0));
        assert_eq!(pointer.ndc(), Some(Vec2::ZERO));
        assert!((pointer.aspect() - 4.0 / 3.0).abs() < 1e-6);
    }
}
