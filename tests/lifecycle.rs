use std::time::Duration;

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use states_view::raster::Canvas;
use states_view::{
    AnimationMode, Color, DrawCommand, Progress, StatesView, StyleAttributes,
};

fn view(animation: i64) -> StatesView {
    let attributes = StyleAttributes {
        colors: vec![
            "#FF0000".into(),
            "#00FF00".into(),
            "#0000FF".into(),
            "#FFFF00".into(),
        ],
        circle_color: Some("#EEEEEE".into()),
        animation: Some(animation),
        ..Default::default()
    };
    let style = attributes
        .resolve(2.0, &mut StdRng::seed_from_u64(3))
        .unwrap();
    let mut view = StatesView::new(style).unwrap();
    view.on_size_changed(240, 240);
    view
}

fn segment_sweeps(view: &StatesView) -> Vec<f64> {
    view.draw()
        .commands()
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Arc { sweep_angle, .. } => Some(*sweep_angle),
            _ => None,
        })
        .collect()
}

#[test]
fn staggered_segments_fill_in_turn() {
    let mut view = view(1);
    assert_eq!(view.style().animation, AnimationMode::Staggered);
    view.set_data(Some(4000.0), Some(vec![1000.0, 1000.0, 1000.0, 1000.0]))
        .unwrap();

    // Nothing has ticked yet: every segment is empty, marker is not.
    assert_eq!(segment_sweeps(&view), vec![0.0, 0.0, 0.0, 0.0, 10.0]);

    view.advance(Duration::from_millis(300));
    assert_eq!(segment_sweeps(&view), vec![90.0, 0.0, 0.0, 0.0, 10.0]);

    for _ in 0..45 {
        view.advance(Duration::from_millis(20));
    }
    assert_eq!(segment_sweeps(&view), vec![90.0; 4].into_iter().chain([10.0]).collect::<Vec<_>>());
    assert!(!view.is_animating());
}

#[test]
fn synchronized_ring_rotates_once_while_growing() {
    let mut view = view(0);
    view.set_data(Some(100.0), Some(vec![25.0, 25.0])).unwrap();
    view.advance(Duration::from_millis(1500));
    assert_eq!(view.progress(), Progress::Synchronized(1.0));

    let starts: Vec<f64> = view
        .draw()
        .commands()
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Arc { start_angle, .. } => Some(*start_angle),
            _ => None,
        })
        .collect();
    assert_eq!(starts, vec![270.0, 360.0, 450.0]);
}

#[test]
fn label_reports_total_coverage() {
    let mut view = view(1);
    view.set_data(Some(100.0), Some(vec![25.0, 25.0])).unwrap();
    let label = view.draw().commands().iter().find_map(|command| match command {
        DrawCommand::Text { text, y, .. } => Some((text.clone(), *y)),
        _ => None,
    });
    // font_size 20dp at density 2 is 40px; baseline sits a quarter below center.
    assert_eq!(label, Some(("50.00%".to_string(), 130.0)));
}

#[test]
fn finished_frame_paints_segments_and_ring() {
    let mut view = view(1);
    view.set_data(Some(100.0), Some(vec![25.0])).unwrap();
    view.advance(Duration::from_millis(400));

    let mut buffer = vec![0u8; 240 * 240 * 4];
    let mut canvas = Canvas::new(&mut buffer, 240, 240);
    view.draw().render(&mut canvas, None, Color::WHITE);

    // stroke 10px, radius 110: first quarter is red, opposite side is ring.
    let diagonal = (110.0 * std::f64::consts::FRAC_1_SQRT_2) as usize;
    assert_eq!(canvas.pixel(120 + diagonal, 120 - diagonal), Some(Color::new(0xff, 0, 0)));
    assert_eq!(canvas.pixel(120, 230), Some(Color::new(0xee, 0xee, 0xee)));
    assert_eq!(canvas.pixel(120, 120), Some(Color::WHITE));
}
