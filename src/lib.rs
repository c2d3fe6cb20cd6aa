// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

//! Animated segmented donut chart.
//!
//! [`StatesView`] turns a total and its parts into ring segments that sweep
//! in over time, then hands back a [`Scene`] of draw commands for the host to
//! paint. Time advances only when the host calls [`StatesView::advance`].

pub mod animation;
pub mod config;
pub mod error;
pub mod geometry;
pub mod percent;
pub mod raster;
pub mod scene;
pub mod window;

use std::time::Duration;

pub use animation::{AnimationController, Progress, Redraw};
pub use config::{AnimationMode, Color, StyleAttributes, StyleConfig};
pub use error::{ConfigError, DatasetError, Error, Result};
pub use geometry::Geometry;
pub use percent::{Dataset, Fractions};
pub use scene::{DrawCommand, Scene};

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// Command enum for feeding a running view from another thread
#[derive(Debug, Clone)]
pub enum ViewCommand {
    SetData(Dataset),
}

/// Donut chart widget state: style, layout, data and animation.
#[derive(Debug, Clone)]
pub struct StatesView {
    style: StyleConfig,
    geometry: Geometry,
    dataset: Dataset,
    fractions: Fractions,
    animation: AnimationController,
}

impl StatesView {
    pub fn new(style: StyleConfig) -> std::result::Result<Self, ConfigError> {
        style.validate()?;
        let animation = AnimationController::new(style.animation);
        Ok(Self {
            style,
            geometry: Geometry::default(),
            dataset: Dataset::empty(),
            fractions: Fractions::default(),
            animation,
        })
    }

    /// Replace the data and restart the animation from zero.
    pub fn set_dataset(&mut self, dataset: Dataset) -> Redraw {
        self.fractions = dataset.fractions();
        self.dataset = dataset;
        tracing::debug!(
            segments = self.fractions.len(),
            coverage = self.fractions.coverage(),
            "dataset assigned"
        );
        self.animation.restart(self.fractions.len())
    }

    /// Validate and assign raw data. On error the current data and animation
    /// are left as they were.
    pub fn set_data(
        &mut self,
        total: Option<f64>,
        parts: Option<Vec<f64>>,
    ) -> std::result::Result<Redraw, DatasetError> {
        let dataset = Dataset::try_from_parts(total, parts)?;
        Ok(self.set_dataset(dataset))
    }

    pub fn on_size_changed(&mut self, width: u32, height: u32) {
        self.geometry = Geometry::new(width, height, self.style.stroke_width);
        tracing::debug!(width, height, radius = self.geometry.radius, "geometry updated");
    }

    pub fn advance(&mut self, dt: Duration) -> Vec<Redraw> {
        self.animation.advance(dt)
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_running()
    }

    pub fn draw(&self) -> Scene {
        scene::compose(
            &self.style,
            &self.geometry,
            &self.fractions,
            self.animation.progress(),
        )
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn fractions(&self) -> &Fractions {
        &self.fractions
    }

    pub fn progress(&self) -> Progress<'_> {
        self.animation.progress()
    }

    /// Generation of the animation currently running; redraws tagged with an
    /// older one are stale.
    pub fn generation(&self) -> u64 {
        self.animation.generation()
    }
}
