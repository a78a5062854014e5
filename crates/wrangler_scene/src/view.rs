//! Viewport description and 2D↔3D projection.
//!
//! Region coordinates are pixels with the origin at the bottom-left corner of
//! the region and `y` pointing up. Window coordinates differ from region
//! coordinates by the region [`offset`](ViewState::offset).

use glam::{Mat4, Vec2, Vec3};

/// Distance orthographic ray origins are pulled back behind the view plane.
pub const ORTHO_RAY_BACKOFF: f32 = 500.0;

/// Identifies one viewport region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub u64);

/// A scene camera the viewport is looking through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub matrix_world: Mat4,
    pub is_ortho: bool,
    pub clip_start: f32,
}

impl CameraView {
    #[must_use]
    pub fn location(&self) -> Vec3 {
        self.matrix_world.w_axis.truncate()
    }

    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (-self.matrix_world.z_axis.truncate()).normalize_or_zero()
    }
}

/// Everything needed to turn a mouse position into a world ray.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub region: RegionId,
    /// Window position of the region's bottom-left corner.
    pub offset: Vec2,
    pub size: Vec2,
    /// World → view transform. The view looks down its local `-Z`.
    pub view_matrix: Mat4,
    pub is_perspective: bool,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Visible height in world units for orthographic views.
    pub ortho_height: f32,
    pub clip_start: f32,
    pub camera: Option<CameraView>,
}

impl ViewState {
    #[must_use]
    pub fn perspective(region: RegionId, size: Vec2, eye: Vec3, target: Vec3, up: Vec3, fov_y: f32) -> Self {
        Self {
            region,
            offset: Vec2::ZERO,
            size,
            view_matrix: Mat4::look_at_rh(eye, target, up),
            is_perspective: true,
            fov_y,
            ortho_height: 10.0,
            clip_start: 0.01,
            camera: None,
        }
    }

    #[must_use]
    pub fn orthographic(region: RegionId, size: Vec2, eye: Vec3, target: Vec3, up: Vec3, ortho_height: f32) -> Self {
        Self {
            region,
            offset: Vec2::ZERO,
            size,
            view_matrix: Mat4::look_at_rh(eye, target, up),
            is_perspective: false,
            fov_y: 50.0_f32.to_radians(),
            ortho_height,
            clip_start: 0.01,
            camera: None,
        }
    }

    /// Looks through `camera`, taking over its transform and projection kind.
    #[must_use]
    pub fn through_camera(mut self, camera: CameraView) -> Self {
        self.view_matrix = camera.matrix_world.inverse();
        self.is_perspective = !camera.is_ortho;
        self.camera = Some(camera);
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub fn with_clip_start(mut self, clip_start: f32) -> Self {
        self.clip_start = clip_start;
        self
    }

    // === View Axes ===

    #[must_use]
    pub fn view_position(&self) -> Vec3 {
        self.view_matrix.inverse().w_axis.truncate()
    }

    #[must_use]
    pub fn view_right(&self) -> Vec3 {
        self.view_matrix.row(0).truncate().normalize_or_zero()
    }

    #[must_use]
    pub fn view_up(&self) -> Vec3 {
        self.view_matrix.row(1).truncate().normalize_or_zero()
    }

    #[must_use]
    pub fn view_forward(&self) -> Vec3 {
        -self.view_matrix.row(2).truncate().normalize_or_zero()
    }

    /// Near clip distance of the camera when looking through one.
    #[must_use]
    pub fn near_clip(&self) -> f32 {
        self.camera.map_or(self.clip_start, |c| c.clip_start)
    }

    #[must_use]
    pub fn is_ortho_camera(&self) -> bool {
        self.camera.is_some_and(|c| c.is_ortho)
    }

    #[must_use]
    pub fn window_to_region(&self, window: Vec2) -> Vec2 {
        window - self.offset
    }

    #[must_use]
    pub fn contains(&self, coord: Vec2) -> bool {
        coord.x >= 0.0 && coord.y >= 0.0 && coord.x <= self.size.x && coord.y <= self.size.y
    }

    // === Projection ===

    /// Half extents of the view at unit depth (perspective) or of the view
    /// plane (orthographic).
    fn half_extents(&self) -> Vec2 {
        let aspect = if self.size.y > 0.0 { self.size.x / self.size.y } else { 1.0 };
        let half_h = if self.is_perspective {
            (self.fov_y * 0.5).tan()
        } else {
            self.ortho_height * 0.5
        };
        Vec2::new(half_h * aspect, half_h)
    }

    fn ndc(&self, coord: Vec2) -> Vec2 {
        Vec2::new(
            coord.x / self.size.x.max(1.0) * 2.0 - 1.0,
            coord.y / self.size.y.max(1.0) * 2.0 - 1.0,
        )
    }

    /// Unit world direction of the ray under `coord`.
    #[must_use]
    pub fn region_2d_to_vector_3d(&self, coord: Vec2) -> Vec3 {
        if !self.is_perspective {
            return self.view_forward();
        }
        let local = self.ndc(coord) * self.half_extents();
        let dir_view = Vec3::new(local.x, local.y, -1.0);
        self.view_matrix
            .inverse()
            .transform_vector3(dir_view)
            .normalize_or_zero()
    }

    /// World origin of the ray under `coord`.
    ///
    /// Perspective rays start at the eye. Orthographic rays start on the view
    /// plane, pulled back by [`ORTHO_RAY_BACKOFF`].
    #[must_use]
    pub fn region_2d_to_origin_3d(&self, coord: Vec2) -> Vec3 {
        if self.is_perspective {
            return self.view_position();
        }
        self.view_plane_point(coord) - self.view_forward() * ORTHO_RAY_BACKOFF
    }

    fn view_plane_point(&self, coord: Vec2) -> Vec3 {
        let local = self.ndc(coord) * self.half_extents();
        self.view_matrix
            .inverse()
            .transform_point3(Vec3::new(local.x, local.y, 0.0))
    }

    /// World point under `coord` at the depth of `depth_location`.
    #[must_use]
    pub fn region_2d_to_location_3d(&self, coord: Vec2, depth_location: Vec3) -> Vec3 {
        let forward = self.view_forward();
        if self.is_perspective {
            let origin = self.view_position();
            let dir = self.region_2d_to_vector_3d(coord);
            let denom = dir.dot(forward);
            if denom.abs() < 1e-6 {
                return origin;
            }
            origin + dir * ((depth_location - origin).dot(forward) / denom)
        } else {
            let plane = self.view_plane_point(coord);
            plane + forward * (depth_location - plane).dot(forward)
        }
    }

    /// Region pixel of a world point, `None` when it is behind the view.
    #[must_use]
    pub fn location_3d_to_region_2d(&self, location: Vec3) -> Option<Vec2> {
        let v = self.view_matrix.transform_point3(location);
        let half = self.half_extents();
        let local = if self.is_perspective {
            if v.z > -1e-6 {
                return None;
            }
            Vec2::new(v.x, v.y) / -v.z
        } else {
            Vec2::new(v.x, v.y)
        };
        let ndc = local / half;
        Some((ndc + Vec2::ONE) * 0.5 * self.size)
    }

    /// World length of `pixels` at the depth of `location`.
    #[must_use]
    pub fn pixel_size_at(&self, location: Vec3, pixels: f32) -> f32 {
        let center = self.location_3d_to_region_2d(location).unwrap_or(self.size * 0.5);
        let a = self.region_2d_to_location_3d(center, location);
        let b = self.region_2d_to_location_3d(center + Vec2::new(0.0, pixels), location);
        a.distance(b)
    }
}
