//! Point-cloud renderer for the four cosmic layers.

use std::f32::consts::TAU;
use std::time::Duration;

use cosmos_core::scene::{Layer, SceneDirective, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::style::Color;

/// Radians per second of automatic rotation.
const ROTATION_SPEED: f32 = 0.05;
/// Focal length of the projection, in normalized screen units.
const FOCAL: f32 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub layer: Layer,
    pub position: Vec3,
    /// 0.0..=1.0
    pub brightness: f32,
}

/// A projected star ready to plot on a `[-1, 1]` canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
    pub color: Color,
}

/// Stars of every layer, generated once per seed.
#[derive(Debug, Clone)]
pub struct Starfield {
    stars: Vec<Star>,
}

impl Starfield {
    /// Distributes `count` bodies across the layers.
    pub fn generate(seed: u64, count: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut stars = Vec::with_capacity(count);

        // Earth and its neighbourhood get few points, the outer layers most
        let earth = (count / 20).max(1);
        let solar = (count / 8).max(1);
        let galaxy = count.saturating_sub(earth + solar) * 3 / 5;
        let universe = count.saturating_sub(earth + solar + galaxy);

        for _ in 0..earth {
            stars.push(Star {
                layer: Layer::Earth,
                position: sphere_point(&mut rng, 1.5),
                brightness: rng.gen_range(0.7..=1.0),
            });
        }
        for _ in 0..solar {
            // Bodies on flat orbits around the sun
            let radius = rng.gen_range(4.0..60.0);
            let angle = rng.gen_range(0.0..TAU);
            stars.push(Star {
                layer: Layer::SolarSystem,
                position: Vec3::new(
                    radius * angle.cos(),
                    rng.gen_range(-1.0..1.0),
                    radius * angle.sin(),
                ),
                brightness: rng.gen_range(0.5..=1.0),
            });
        }
        for _ in 0..galaxy {
            // Two-armed logarithmic spiral
            let arm = if rng.gen_bool(0.5) { 0.0 } else { TAU / 2.0 };
            let distance = rng.gen_range(10.0..220.0f32);
            let angle = arm + distance.ln() * 2.2 + rng.gen_range(-0.35..0.35);
            stars.push(Star {
                layer: Layer::Galaxy,
                position: Vec3::new(
                    distance * angle.cos(),
                    rng.gen_range(-6.0..6.0),
                    distance * angle.sin(),
                ),
                brightness: rng.gen_range(0.3..=1.0),
            });
        }
        for _ in 0..universe {
            stars.push(Star {
                layer: Layer::Universe,
                position: sphere_point(&mut rng, 700.0),
                brightness: rng.gen_range(0.2..=0.8),
            });
        }

        Self { stars }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Projects the visible stars for a camera at `camera` looking at the origin.
    pub fn project(
        &self,
        directive: &SceneDirective,
        camera: Vec3,
        elapsed: Duration,
    ) -> Vec<ScreenPoint> {
        let angle = if directive.auto_rotate() {
            elapsed.as_secs_f32() * ROTATION_SPEED
        } else {
            0.0
        };
        let distance = camera.length().max(0.1);
        let (sin, cos) = angle.sin_cos();

        self.stars
            .iter()
            .filter_map(|star| {
                let layer = directive.layer(star.layer);
                if !layer.visible || layer.opacity <= 0.0 {
                    return None;
                }
                let p = star.position;
                let x = p.x * cos - p.z * sin;
                let z = p.x * sin + p.z * cos;
                let depth = distance - z;
                if depth <= 0.1 {
                    return None;
                }
                let sx = x / depth * FOCAL;
                let sy = p.y / depth * FOCAL;
                if sx.abs() > 1.0 || sy.abs() > 1.0 {
                    return None;
                }
                Some(ScreenPoint {
                    x: sx as f64,
                    y: sy as f64,
                    color: shade(star.layer, star.brightness * layer.opacity),
                })
            })
            .collect()
    }
}

fn sphere_point(rng: &mut StdRng, radius: f32) -> Vec3 {
    let theta = rng.gen_range(0.0..TAU);
    let cos_phi: f32 = rng.gen_range(-1.0..1.0);
    let sin_phi = (1.0 - cos_phi * cos_phi).sqrt();
    let r = radius * rng.gen_range(0.2f32..1.0).cbrt();
    Vec3::new(
        r * sin_phi * theta.cos(),
        r * cos_phi,
        r * sin_phi * theta.sin(),
    )
}

fn shade(layer: Layer, intensity: f32) -> Color {
    match (layer, intensity) {
        (_, i) if i < 0.3 => Color::DarkGray,
        (Layer::Earth, _) => Color::LightBlue,
        (Layer::SolarSystem, i) if i >= 0.75 => Color::Yellow,
        (Layer::Galaxy, i) if i >= 0.75 => Color::LightMagenta,
        (Layer::Universe, i) if i >= 0.6 => Color::LightCyan,
        (_, i) if i >= 0.6 => Color::White,
        _ => Color::Gray,
    }
}
