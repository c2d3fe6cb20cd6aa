// ============================================================================
// RETAINED MODE SCENE
// ============================================================================

use crate::animation::Progress;
use crate::config::{AnimationMode, Color, StyleConfig};
use crate::geometry::{Geometry, Point};
use crate::percent::Fractions;
use crate::raster::{self, Canvas};

/// Where 12 o'clock sits in a y-down frame with 0° at 3 o'clock.
pub const TOP_ANGLE: f64 = -90.0;
/// Sweep of the head/marker arc drawn after the segments.
pub const MARKER_SWEEP: f64 = 10.0;

/// One drawing step. Angles are in degrees, clockwise, 0° at 3 o'clock.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Full stroked circle.
    Ring {
        center: Point,
        radius: f64,
        stroke_width: f64,
        color: Color,
    },
    /// Stroked arc with round caps.
    Arc {
        center: Point,
        radius: f64,
        start_angle: f64,
        sweep_angle: f64,
        stroke_width: f64,
        color: Color,
    },
    /// Text centred horizontally on `x`, baseline at `y`.
    Text {
        x: f64,
        y: f64,
        text: String,
        font_size: f64,
        color: Color,
    },
}

/// Ordered list of draw commands for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Paint every command, in order, over `background`.
    ///
    /// Text needs a font; without one labels are skipped.
    pub fn render(&self, canvas: &mut Canvas, font: Option<&rusttype::Font>, background: Color) {
        canvas.clear(background);
        for command in &self.commands {
            match command {
                DrawCommand::Ring {
                    center,
                    radius,
                    stroke_width,
                    color,
                } => {
                    raster::stroke_ring(canvas, *center, *radius, *stroke_width, *color);
                }
                DrawCommand::Arc {
                    center,
                    radius,
                    start_angle,
                    sweep_angle,
                    stroke_width,
                    color,
                } => {
                    raster::stroke_arc(
                        canvas,
                        *center,
                        *radius,
                        *start_angle,
                        *sweep_angle,
                        *stroke_width,
                        *color,
                    );
                }
                DrawCommand::Text {
                    x,
                    y,
                    text,
                    font_size,
                    color,
                } => match font {
                    Some(font) => raster::draw_text(canvas, font, *x, *y, text, *font_size, *color),
                    None => tracing::warn!(%text, "no font loaded, skipping label"),
                },
            }
        }
    }
}

/// Build the frame for the current data and progress.
///
/// No fractions means an empty frame. Otherwise: background ring, one arc per
/// segment, the mode's marker, then the coverage label.
pub fn compose(
    style: &StyleConfig,
    geometry: &Geometry,
    fractions: &Fractions,
    progress: Progress<'_>,
) -> Scene {
    let mut scene = Scene::new();
    if fractions.is_empty() {
        return scene;
    }
    let Some(head_color) = style.segment_color(0) else {
        tracing::warn!("empty segment palette, nothing to draw");
        return scene;
    };

    scene.add_command(DrawCommand::Ring {
        center: geometry.center,
        radius: geometry.radius,
        stroke_width: style.stroke_width,
        color: style.circle_color,
    });

    let rotation = progress.rotation();
    let mut start_from = TOP_ANGLE;
    for (index, full_angle) in fractions.sweep_angles().enumerate() {
        scene.add_command(DrawCommand::Arc {
            center: geometry.center,
            radius: geometry.radius,
            start_angle: start_from + rotation,
            sweep_angle: full_angle * progress.for_segment(index),
            stroke_width: style.stroke_width,
            color: style.segment_color(index).unwrap_or(head_color),
        });
        start_from += full_angle;
    }

    let marker_start = match style.animation {
        // Head rides the rotating front of the ring.
        AnimationMode::Synchronized => start_from + rotation,
        AnimationMode::Staggered => TOP_ANGLE,
    };
    scene.add_command(DrawCommand::Arc {
        center: geometry.center,
        radius: geometry.radius,
        start_angle: marker_start,
        sweep_angle: MARKER_SWEEP,
        stroke_width: style.stroke_width,
        color: head_color,
    });

    scene.add_command(DrawCommand::Text {
        x: geometry.center.x,
        y: geometry.center.y + style.font_size / 4.0,
        text: fractions.label(),
        font_size: style.font_size,
        color: style.text_color,
    });

    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RED: Color = Color::new(0xff, 0, 0);
    const GREEN: Color = Color::new(0, 0xff, 0);
    const GREY: Color = Color::new(0xee, 0xee, 0xee);

    fn style(animation: AnimationMode) -> StyleConfig {
        StyleConfig::builder()
            .stroke_width(10.0)
            .font_size(20.0)
            .segment_colors(vec![RED, GREEN])
            .circle_color(GREY)
            .animation(animation)
            .build()
    }

    fn arcs(scene: &Scene) -> Vec<(f64, f64, Color)> {
        scene
            .commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Arc {
                    start_angle,
                    sweep_angle,
                    color,
                    ..
                } => Some((*start_angle, *sweep_angle, *color)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn empty_fractions_draw_nothing() {
        let scene = compose(
            &style(AnimationMode::Synchronized),
            &Geometry::new(200, 200, 10.0),
            &Fractions::default(),
            Progress::Synchronized(1.0),
        );
        assert!(scene.is_empty());
    }

    #[test]
    fn synchronized_full_progress_draws_full_angles() {
        let fractions = Fractions::from(vec![0.25, 0.25]);
        let scene = compose(
            &style(AnimationMode::Synchronized),
            &Geometry::new(200, 200, 10.0),
            &fractions,
            Progress::Synchronized(1.0),
        );
        assert_eq!(
            arcs(&scene),
            vec![
                (270.0, 90.0, RED),
                (360.0, 90.0, GREEN),
                (450.0, MARKER_SWEEP, RED),
            ]
        );
    }

    #[test]
    fn synchronized_zero_progress_draws_zero_length_arcs() {
        let fractions = Fractions::from(vec![0.25, 0.5]);
        let scene = compose(
            &style(AnimationMode::Synchronized),
            &Geometry::new(200, 200, 10.0),
            &fractions,
            Progress::Synchronized(0.0),
        );
        let arcs = arcs(&scene);
        assert_eq!(arcs[0], (-90.0, 0.0, RED));
        assert_eq!(arcs[1], (0.0, 0.0, GREEN));
        // Head sits where the last segment ends.
        assert_eq!(arcs[2], (180.0, MARKER_SWEEP, RED));
    }

    #[test]
    fn staggered_starts_are_fixed_and_marker_stays_on_top() {
        let fractions = Fractions::from(vec![0.25, 0.25]);
        let scene = compose(
            &style(AnimationMode::Staggered),
            &Geometry::new(200, 200, 10.0),
            &fractions,
            Progress::Staggered(&[1.0, 0.5]),
        );
        assert_eq!(
            arcs(&scene),
            vec![
                (-90.0, 90.0, RED),
                (0.0, 45.0, GREEN),
                (TOP_ANGLE, MARKER_SWEEP, RED),
            ]
        );
    }

    #[test]
    fn ring_label_and_order() {
        let geometry = Geometry::new(200, 200, 10.0);
        let fractions = Fractions::from(vec![0.25, 0.25]);
        let scene = compose(
            &style(AnimationMode::Staggered),
            &geometry,
            &fractions,
            Progress::Staggered(&[0.0, 0.0]),
        );
        let commands = scene.commands();
        assert_eq!(commands.len(), 5);
        assert_eq!(
            commands[0],
            DrawCommand::Ring {
                center: geometry.center,
                radius: 90.0,
                stroke_width: 10.0,
                color: GREY,
            }
        );
        assert_eq!(
            commands[4],
            DrawCommand::Text {
                x: 100.0,
                y: 105.0,
                text: "50.00%".to_string(),
                font_size: 20.0,
                color: Color::BLACK,
            }
        );
    }

    #[test]
    fn palette_wraps_for_extra_segments() {
        let fractions = Fractions::from(vec![0.1, 0.1, 0.1]);
        let scene = compose(
            &style(AnimationMode::Staggered),
            &Geometry::new(200, 200, 10.0),
            &fractions,
            Progress::Staggered(&[1.0, 1.0, 1.0]),
        );
        let colors: Vec<Color> = arcs(&scene).into_iter().map(|(_, _, c)| c).collect();
        assert_eq!(colors, vec![RED, GREEN, RED, RED]);
    }

    #[test]
    fn empty_palette_draws_nothing() {
        let style = StyleConfig::builder()
            .segment_colors(vec![])
            .circle_color(GREY)
            .build();
        let scene = compose(
            &style,
            &Geometry::new(200, 200, 10.0),
            &Fractions::from(vec![0.5]),
            Progress::Staggered(&[0.0]),
        );
        assert!(scene.is_empty());
    }

    #[test]
    fn composing_twice_is_identical() {
        let style = style(AnimationMode::Synchronized);
        let geometry = Geometry::new(320, 240, 10.0);
        let fractions = Fractions::from(vec![0.3, 0.2, 0.1]);
        let first = compose(&style, &geometry, &fractions, Progress::Synchronized(0.4));
        let second = compose(&style, &geometry, &fractions, Progress::Synchronized(0.4));
        assert_eq!(first, second);
    }
}
