//! Body labels and the hover tooltip, drawn with egui.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};

use crate::camera::MainCamera;
use crate::config::SceneConfig;
use crate::hover::Tooltip;
use crate::session::scene_running;
use crate::types::OrbitingBody;

/// Plugin providing body labels and the tooltip overlay.
pub struct LabelPlugin;

impl Plugin for LabelPlugin {
    fn build(&self, app: &mut App) {
        let visible = app
            .world()
            .get_resource::<SceneConfig>()
            .is_none_or(|c| c.features.labels);

        app.insert_resource(LabelSettings {
            visible,
            ..default()
        })
        .add_systems(
            EguiPrimaryContextPass,
            (draw_body_labels, draw_tooltip).run_if(scene_running),
        );
    }
}

/// Settings for label rendering.
#[derive(Resource)]
pub struct LabelSettings {
    /// Whether labels are visible.
    pub visible: bool,
    /// Offset from body center in screen pixels.
    pub offset: f32,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            visible: true,
            offset: 12.0,
        }
    }
}

/// Pointer offset of the tooltip box, in pixels.
const TOOLTIP_OFFSET: egui::Vec2 = egui::vec2(10.0, 10.0);

/// Draw each orbiting body's name next to its projected position.
fn draw_body_labels(
    mut egui_ctx: EguiContexts,
    bodies: Query<(&OrbitingBody, &GlobalTransform)>,
    camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    settings: Res<LabelSettings>,
) {
    if !settings.visible {
        return;
    }

    let Ok((camera, camera_transform)) = camera.single() else {
        return;
    };
    let Ok(ctx) = egui_ctx.ctx_mut() else {
        return;
    };

    egui::Area::new(egui::Id::new("body_labels"))
        .fixed_pos(egui::pos2(0.0, 0.0))
        .order(egui::Order::Background)
        .interactable(false)
        .show(ctx, |ui| {
            let painter = ui.painter();

            for (body, transform) in bodies.iter() {
                // Behind the camera or outside the viewport
                let Ok(screen_pos) = camera.world_to_viewport(camera_transform, transform.translation())
                else {
                    continue;
                };

                let label_pos = egui::pos2(screen_pos.x, screen_pos.y - settings.offset);
                let font = egui::FontId::proportional(13.0);

                // Shadow
                painter.text(
                    label_pos + egui::vec2(1.0, 1.0),
                    egui::Align2::CENTER_BOTTOM,
                    &body.id,
                    font.clone(),
                    egui::Color32::from_rgba_unmultiplied(0, 0, 0, 180),
                );

                // Main text
                painter.text(
                    label_pos,
                    egui::Align2::CENTER_BOTTOM,
                    &body.id,
                    font,
                    egui::Color32::from_rgba_unmultiplied(220, 220, 220, 230),
                );
            }
        });
}

/// Draw the tooltip box while something is hovered.
fn draw_tooltip(mut egui_ctx: EguiContexts, tooltip: Option<Res<Tooltip>>) {
    let Some(tooltip) = tooltip else {
        return;
    };
    let Some(text) = tooltip.text.as_deref() else {
        return;
    };
    let Ok(ctx) = egui_ctx.ctx_mut() else {
        return;
    };

    let pos = egui::pos2(tooltip.position.x, tooltip.position.y) + TOOLTIP_OFFSET;
    egui::Area::new(egui::Id::new("hover_tooltip"))
        .fixed_pos(pos)
        .order(egui::Order::Tooltip)
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::NONE
                .fill(egui::Color32::from_rgba_unmultiplied(0, 0, 0, 180))
                .corner_radius(4.0)
                .inner_margin(egui::Margin::symmetric(10, 5))
                .show(ui, |ui| {
                    ui.label(
                        egui::RichText::new(text)
                            .color(egui::Color32::WHITE)
                            .size(14.0),
                    );
                });
        });
}
