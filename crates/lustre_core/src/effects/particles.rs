//! Ambient Particle Field
//!
//! A fixed pool of drifting points, repainted every frame, with a line between
//! every pair closer than the link distance.
//!
//! Per frame:
//! 1. Clear the surface
//! 2. Advance and wrap every particle, draw it as a filled circle
//! 3. Link every unordered pair with `distance < link_distance`
//!    (opacity `link_opacity * (1 - distance / link_distance)`)
//!
//! Linking is O(n²), which is fine at the configured pool sizes (30 or 60).

use rand::Rng;

use crate::config::ParticleConfig;
use crate::frame::{FrameControl, FrameEffect};
use crate::host::Canvas2d;
use crate::layout::Viewport;
use crate::style::Color;

/// A single drifting point.
///
/// Radius and opacity are fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// X position in canvas space.
    pub x: f64,
    /// Y position in canvas space.
    pub y: f64,
    /// Horizontal velocity per frame.
    pub vx: f64,
    /// Vertical velocity per frame.
    pub vy: f64,
    radius: f64,
    opacity: f64,
}

impl Particle {
    /// Creates a particle with explicit attributes.
    #[must_use]
    pub const fn new(x: f64, y: f64, vx: f64, vy: f64, radius: f64, opacity: f64) -> Self {
        Self { x, y, vx, vy, radius, opacity }
    }

    /// Draws a particle from the configured random ranges.
    pub fn random<R: Rng>(config: &ParticleConfig, width: f64, height: f64, rng: &mut R) -> Self {
        Self {
            x: sample(rng, 0.0, width),
            y: sample(rng, 0.0, height),
            vx: sample(rng, -config.max_speed, config.max_speed),
            vy: sample(rng, -config.max_speed, config.max_speed),
            radius: sample(rng, config.radius_min, config.radius_max),
            opacity: sample(rng, config.opacity_min, config.opacity_max),
        }
    }

    /// Returns the radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the opacity.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Advances by one velocity step and wraps into `[0, width) × [0, height)`.
    pub fn advance(&mut self, width: f64, height: f64) {
        self.x = wrap_axis(self.x + self.vx, width);
        self.y = wrap_axis(self.y + self.vy, height);
    }

    /// Euclidean distance to another particle.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Uniform sample from `[low, high)`; degenerate ranges return `low`.
fn sample<R: Rng>(rng: &mut R, low: f64, high: f64) -> f64 {
    if high > low {
        rng.gen_range(low..high)
    } else {
        low
    }
}

/// Wraps one coordinate into `[0, bound)`.
///
/// Past the upper edge goes to 0; below zero re-enters just inside the upper
/// edge. A non-positive bound pins the coordinate at 0.
#[must_use]
pub fn wrap_axis(value: f64, bound: f64) -> f64 {
    if bound <= 0.0 || value >= bound {
        return 0.0;
    }
    if value < 0.0 {
        let wrapped = value + bound;
        // Rounding can land exactly on the bound, or a stale position from a
        // larger surface can still be negative
        return if (0.0..bound).contains(&wrapped) { wrapped } else { 0.0 };
    }
    value
}

/// A line between two nearby particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    /// Index of the first particle.
    pub a: usize,
    /// Index of the second particle (`a < b`).
    pub b: usize,
    /// Distance between them.
    pub distance: f64,
    /// Line opacity.
    pub opacity: f64,
}

/// Opacity of a link at `distance`, or `None` if the pair is not linked.
#[must_use]
pub fn link_opacity(distance: f64, threshold: f64, base_opacity: f64) -> Option<f64> {
    (distance < threshold).then(|| base_opacity * (1.0 - distance / threshold))
}

/// The particle field and its surface size.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
    config: ParticleConfig,
}

impl ParticleField {
    /// Creates a field sized to the viewport.
    ///
    /// The pool size is chosen here from the viewport width and never changes.
    pub fn new<R: Rng>(config: ParticleConfig, viewport: Viewport, rng: &mut R) -> Self {
        let count = config.count_for_width(viewport.width);
        let particles = (0..count)
            .map(|_| Particle::random(&config, viewport.width, viewport.height, rng))
            .collect();

        tracing::debug!(
            "Particle field created: {} particles on {}x{}",
            count,
            viewport.width,
            viewport.height
        );

        Self {
            particles,
            width: viewport.width,
            height: viewport.height,
            config,
        }
    }

    /// Creates a field from explicit particles.
    #[must_use]
    pub fn from_particles(config: ParticleConfig, width: f64, height: f64, particles: Vec<Particle>) -> Self {
        Self { particles, width, height, config }
    }

    /// Returns the particles.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Returns the surface size.
    #[must_use]
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Changes the surface size only; particles keep their positions.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Advances every particle one step.
    pub fn update(&mut self) {
        let (width, height) = (self.width, self.height);
        for particle in &mut self.particles {
            particle.advance(width, height);
        }
    }

    /// Iterates every linked pair.
    pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
        let threshold = self.config.link_distance;
        let base = self.config.link_opacity;

        self.particles.iter().enumerate().flat_map(move |(a, first)| {
            self.particles[a + 1..]
                .iter()
                .enumerate()
                .filter_map(move |(offset, second)| {
                    let distance = first.distance_to(second);
                    link_opacity(distance, threshold, base).map(|opacity| Link {
                        a,
                        b: a + 1 + offset,
                        distance,
                        opacity,
                    })
                })
        })
    }

    /// Paints the current state.
    pub fn render<C: Canvas2d + ?Sized>(&self, canvas: &mut C) {
        let hue = self.config.base_color();
        canvas.clear(self.width, self.height);

        for particle in &self.particles {
            canvas.fill_circle(particle.x, particle.y, particle.radius, alpha(hue, particle.opacity));
        }

        for link in self.links() {
            let a = &self.particles[link.a];
            let b = &self.particles[link.b];
            canvas.stroke_line((a.x, a.y), (b.x, b.y), self.config.link_width, alpha(hue, link.opacity));
        }
    }

    /// Updates then paints.
    pub fn frame<C: Canvas2d + ?Sized>(&mut self, canvas: &mut C) {
        self.update();
        self.render(canvas);
    }
}

fn alpha(hue: Color, opacity: f64) -> Color {
    hue.with_alpha(opacity as f32)
}

/// A particle field bound to its canvas, runnable in the animation loop.
pub struct ParticleLayer<C: Canvas2d> {
    /// The simulation.
    pub field: ParticleField,
    /// The surface it paints on.
    pub canvas: C,
}

impl<C: Canvas2d> ParticleLayer<C> {
    /// Binds a field to a canvas and sizes the canvas to the field.
    pub fn new(field: ParticleField, mut canvas: C) -> Self {
        let (width, height) = field.size();
        canvas.resize(width, height);
        Self { field, canvas }
    }

    /// Resizes both the canvas and the field surface.
    pub fn resize(&mut self, viewport: Viewport) {
        self.canvas.resize(viewport.width, viewport.height);
        self.field.resize(viewport.width, viewport.height);
    }
}

impl<C: Canvas2d> FrameEffect for ParticleLayer<C> {
    fn frame(&mut self, _now_ms: f64) -> FrameControl {
        self.field.frame(&mut self.canvas);
        FrameControl::Continue
    }
}
