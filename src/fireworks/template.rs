use glam::{Quat, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::fireworks::{
    apply_colors, generate_directions, BranchDescriptor, BranchLayout, ColorDistribution,
    ColorScheme, GeneratedBranch, PhysicsProfile,
};

/// Angular wedge on the unit sphere where branches may point (degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmissionZone {
    /// [-180, 180]
    pub azimuth_min: f32,
    pub azimuth_max: f32,
    /// [-90, 90]
    pub elevation_min: f32,
    pub elevation_max: f32,
}

impl Default for EmissionZone {
    fn default() -> Self {
        Self {
            azimuth_min: -180.0,
            azimuth_max: 180.0,
            elevation_min: 0.0,
            elevation_max: 90.0,
        }
    }
}

/// Parametric explosion pattern.
///
/// Edits to the public fields take effect on the next
/// [`regenerate_branches`](FireworkTemplate::regenerate_branches); the cached
/// branch list is never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireworkTemplate {
    pub name: String,
    pub zone: EmissionZone,
    /// Pitch, yaw, roll in degrees
    pub world_rotation: Vec3,
    pub physics: PhysicsProfile,
    pub layout: BranchLayout,
    pub color_scheme: ColorScheme,
    /// Parameters copied into every generated branch
    pub branch: BranchDescriptor,
    #[serde(skip)]
    generated_branches: Vec<GeneratedBranch>,
}

impl Default for FireworkTemplate {
    fn default() -> Self {
        Self::new("Unnamed Firework")
    }
}

impl FireworkTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            zone: EmissionZone::default(),
            world_rotation: Vec3::ZERO,
            physics: PhysicsProfile::artistic(),
            layout: BranchLayout::default(),
            color_scheme: ColorScheme::default(),
            branch: BranchDescriptor::default(),
            generated_branches: Vec::new(),
        }
    }

    /// Rebuild the cached branch list from the zone, layout, rotation,
    /// descriptor and color scheme. Replaces the previous list wholesale.
    pub fn regenerate_branches(&mut self) {
        // Zone constrains the layout
        self.layout.azimuth_min = self.zone.azimuth_min;
        self.layout.azimuth_max = self.zone.azimuth_max;
        self.layout.elevation_min = self.zone.elevation_min;
        self.layout.elevation_max = self.zone.elevation_max;

        let rotation = self.rotation();

        self.generated_branches = generate_directions(&self.layout)
            .into_iter()
            .map(|dir| GeneratedBranch {
                direction: (rotation * dir).normalize_or_zero(),
                color: Vec4::ONE,
                params: self.branch.clone(),
            })
            .collect();

        apply_colors(&self.color_scheme, &mut self.generated_branches);

        log::debug!(
            "Regenerated '{}': {} branches x {} particles",
            self.name,
            self.generated_branches.len(),
            self.branch.particles_per_branch
        );
    }

    /// World rotation applied as yaw (Y), then pitch (X), then roll (Z)
    pub fn rotation(&self) -> Quat {
        let pitch = self.world_rotation.x.to_radians();
        let yaw = self.world_rotation.y.to_radians();
        let roll = self.world_rotation.z.to_radians();

        Quat::from_rotation_y(yaw) * Quat::from_rotation_x(pitch) * Quat::from_rotation_z(roll)
    }

    pub fn generated_branches(&self) -> &[GeneratedBranch] {
        &self.generated_branches
    }

    /// Direct access for caller-assigned (per-branch) colors
    pub fn generated_branches_mut(&mut self) -> &mut [GeneratedBranch] {
        &mut self.generated_branches
    }

    pub fn branch_count(&self) -> usize {
        self.generated_branches.len()
    }

    pub fn total_particle_count(&self) -> usize {
        self.generated_branches.len() * self.branch.particles_per_branch.max(0) as usize
    }

    // Presets

    pub fn chrysanthemum() -> Self {
        let mut t = Self::new("Chrysanthemum");
        t.layout.grid_x = 12;
        t.layout.grid_y = 8;
        t.branch.particles_per_branch = 20;
        t.branch.particle_size = 8.0;
        t.branch.lifetime = 3.0;
        t.color_scheme.distribution = ColorDistribution::Gradient;
        t.color_scheme.gradient_start = Vec4::new(1.0, 0.8, 0.0, 1.0);
        t.color_scheme.gradient_end = Vec4::new(1.0, 0.0, 0.0, 1.0);
        t.physics = PhysicsProfile::artistic();
        t.regenerate_branches();
        t
    }

    pub fn palm() -> Self {
        let mut t = Self::new("Palm");
        t.zone = EmissionZone {
            azimuth_min: -60.0,
            azimuth_max: 60.0,
            elevation_min: 60.0,
            elevation_max: 90.0,
        };
        t.layout.grid_x = 8;
        t.layout.grid_y = 6;
        t.branch.particles_per_branch = 30;
        t.branch.particle_size = 10.0;
        t.branch.lifetime = 4.0;
        t.color_scheme = ColorScheme::uniform(Vec4::new(0.0, 1.0, 0.0, 1.0));
        t.physics = PhysicsProfile::realistic();
        t.regenerate_branches();
        t
    }

    pub fn willow() -> Self {
        let mut t = Self::new("Willow");
        t.zone.elevation_min = -30.0;
        t.layout.grid_x = 16;
        t.layout.grid_y = 10;
        t.branch.particles_per_branch = 40;
        t.branch.particle_size = 6.0;
        t.branch.lifetime = 5.0;
        t.color_scheme = ColorScheme::uniform(Vec4::new(1.0, 0.84, 0.0, 1.0));
        // Droops well below the default arc
        t.branch.gravity_scale = 0.6;
        t.regenerate_branches();
        t
    }

    pub fn ring() -> Self {
        let mut t = Self::new("Ring");
        t.zone.elevation_min = -5.0;
        t.zone.elevation_max = 5.0;
        t.layout.grid_x = 24;
        t.layout.grid_y = 2;
        t.branch.initial_speed = 6.0;
        t.branch.particles_per_branch = 25;
        t.branch.particle_size = 8.0;
        t.branch.lifetime = 3.0;
        t.color_scheme = ColorScheme::red_white_blue();
        t.physics = PhysicsProfile::artistic();
        t.regenerate_branches();
        t
    }

    pub fn sphere() -> Self {
        let mut t = Self::new("Sphere");
        t.zone.elevation_min = -90.0;
        t.zone.elevation_max = 90.0;
        t.layout.grid_x = 20;
        t.layout.grid_y = 12;
        t.branch.initial_speed = 5.333;
        t.branch.particles_per_branch = 15;
        t.branch.particle_size = 10.0;
        t.branch.lifetime = 2.5;
        t.color_scheme.distribution = ColorDistribution::Random;
        t.color_scheme.palette = vec![
            Vec4::new(1.0, 0.0, 0.0, 1.0),
            Vec4::new(0.0, 1.0, 0.0, 1.0),
            Vec4::new(0.0, 0.0, 1.0, 1.0),
            Vec4::new(1.0, 1.0, 0.0, 1.0),
            Vec4::new(1.0, 0.0, 1.0, 1.0),
        ];
        t.physics = PhysicsProfile::zero_gravity();
        t.regenerate_branches();
        t
    }

    /// Every built-in preset, regenerated
    pub fn presets() -> Vec<Self> {
        vec![
            Self::chrysanthemum(),
            Self::palm(),
            Self::willow(),
            Self::ring(),
            Self::sphere(),
        ]
    }
}
