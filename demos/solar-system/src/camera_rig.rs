/// Camera follow controller.
///
/// Flies the camera toward a vantage point near the selected body (or the
/// fixed overview pose), then lets go so the user can orbit freely. The
/// look-at target keeps tracking a selected body after arrival.

use glam::Vec3;
use orrery_engine::{damp_vec3, Camera3D};
use serde::{Deserialize, Serialize};

use crate::bodies::CelestialBody;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigPhase {
    Flying,
    Arrived,
}

/// Tuning for the rig. Smoothing factors are per 60 Hz frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigSettings {
    pub target_smoothing: f32,
    pub position_smoothing: f32,
    pub arrive_distance: f32,
    pub overview_eye: [f32; 3],
    pub star_offset: f32,
    pub star_height: f32,
    pub planet_offset_factor: f32,
    pub planet_height_factor: f32,
    /// Below this distance from the origin the radial direction is
    /// unreliable and +Z is used instead.
    pub origin_epsilon: f32,
}

impl Default for RigSettings {
    fn default() -> Self {
        Self {
            target_smoothing: 0.1,
            position_smoothing: 0.05,
            arrive_distance: 2.0,
            overview_eye: [0.0, 60.0, 140.0],
            star_offset: 35.0,
            star_height: 5.0,
            planet_offset_factor: 12.0,
            planet_height_factor: 4.0,
            origin_epsilon: 0.1,
        }
    }
}

impl RigSettings {
    pub fn overview_eye(&self) -> Vec3 {
        Vec3::from_array(self.overview_eye)
    }

    /// How far out and how high to park the camera for a body.
    pub fn vantage(&self, body: &CelestialBody) -> Vantage {
        if body.is_star() {
            Vantage { offset: self.star_offset, height: self.star_height }
        } else {
            Vantage {
                offset: body.radius * self.planet_offset_factor,
                height: body.radius * self.planet_height_factor,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vantage {
    pub offset: f32,
    pub height: f32,
}

/// Live state of the selected body for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Focus {
    pub position: Vec3,
    pub vantage: Vantage,
}

pub struct CameraRig {
    settings: RigSettings,
    phase: RigPhase,
    selection: Option<usize>,
    look_target: Vec3,
    /// Where the current flight is heading. Frozen once arrived.
    desired: Vec3,
    suspended: bool,
}

impl CameraRig {
    pub fn new(settings: RigSettings) -> Self {
        let desired = settings.overview_eye();
        Self {
            settings,
            phase: RigPhase::Flying,
            selection: None,
            look_target: Vec3::ZERO,
            desired,
            suspended: false,
        }
    }

    pub fn settings(&self) -> &RigSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: RigSettings) {
        self.settings = settings;
    }

    pub fn phase(&self) -> RigPhase {
        self.phase
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    pub fn desired(&self) -> Vec3 {
        self.desired
    }

    pub fn look_target(&self) -> Vec3 {
        self.look_target
    }

    /// Change focus. Any actual change (including to or from the overview)
    /// restarts the flight. Returns whether the selection changed.
    pub fn select(&mut self, selection: Option<usize>) -> bool {
        if selection == self.selection {
            return false;
        }
        self.selection = selection;
        self.phase = RigPhase::Flying;
        true
    }

    /// While suspended (immersive session) the rig leaves the camera alone.
    pub fn set_suspended(&mut self, suspended: bool) {
        self.suspended = suspended;
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Step the rig one frame. `focus` carries the selected body's live state;
    /// it is ignored in overview mode, and `None` with a selection skips the
    /// frame. Returns the new phase when it changed this frame.
    pub fn update(&mut self, camera: &mut Camera3D, focus: Option<Focus>, dt: f32) -> Option<RigPhase> {
        if self.suspended {
            return None;
        }
        let before = self.phase;

        match self.selection {
            Some(_) => {
                let Some(focus) = focus else {
                    return None;
                };
                self.look_target = damp_vec3(self.look_target, focus.position, self.settings.target_smoothing, dt);
                camera.target = self.look_target;

                if self.phase == RigPhase::Flying {
                    self.desired = self.vantage_point(focus);
                    self.fly(camera, dt);
                }
            }
            None => {
                if self.phase == RigPhase::Flying {
                    self.look_target = damp_vec3(self.look_target, Vec3::ZERO, self.settings.target_smoothing, dt);
                    camera.target = self.look_target;
                    self.desired = self.settings.overview_eye();
                    self.fly(camera, dt);
                }
            }
        }

        (self.phase != before).then_some(self.phase)
    }

    fn vantage_point(&self, focus: Focus) -> Vec3 {
        let dir = if focus.position.length() < self.settings.origin_epsilon {
            Vec3::Z
        } else {
            focus.position.normalize()
        };
        focus.position + dir * focus.vantage.offset + Vec3::Y * focus.vantage.height
    }

    fn fly(&mut self, camera: &mut Camera3D, dt: f32) {
        camera.position = damp_vec3(camera.position, self.desired, self.settings.position_smoothing, dt);
        if camera.position.distance(self.desired) < self.settings.arrive_distance {
            self.phase = RigPhase::Arrived;
        }
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(RigSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    fn camera() -> Camera3D {
        Camera3D::default().with_pose(Vec3::new(0.0, 60.0, 140.0), Vec3::ZERO)
    }

    fn planet_focus(position: Vec3) -> Focus {
        Focus { position, vantage: Vantage { offset: 12.0, height: 4.0 } }
    }

    fn run_until_arrived(rig: &mut CameraRig, cam: &mut Camera3D, focus: Option<Focus>) -> usize {
        for frame in 0..2000 {
            rig.update(cam, focus, FRAME);
            if rig.phase() == RigPhase::Arrived {
                return frame;
            }
        }
        panic!("rig never arrived");
    }

    #[test]
    fn starts_flying_to_overview_and_arrives_immediately_there() {
        let mut rig = CameraRig::default();
        let mut cam = camera();
        assert_eq!(rig.phase(), RigPhase::Flying);
        assert_eq!(rig.update(&mut cam, None, FRAME), Some(RigPhase::Arrived));
    }

    #[test]
    fn flies_to_planet_vantage() {
        let mut rig = CameraRig::default();
        let mut cam = camera();
        let focus = planet_focus(Vec3::new(25.0, 0.0, 0.0));
        assert!(rig.select(Some(3)));

        run_until_arrived(&mut rig, &mut cam, Some(focus));
        let expected = Vec3::new(37.0, 4.0, 0.0);
        assert!(rig.desired().distance(expected) < 1e-4);
        assert!(cam.position.distance(expected) < 2.0);
    }

    #[test]
    fn arrived_rig_keeps_desired_and_position_but_tracks_target() {
        let mut rig = CameraRig::default();
        let mut cam = camera();
        rig.select(Some(3));
        run_until_arrived(&mut rig, &mut cam, Some(planet_focus(Vec3::new(25.0, 0.0, 0.0))));

        let desired = rig.desired();
        let position = cam.position;
        let moved = planet_focus(Vec3::new(0.0, 0.0, 25.0));
        for _ in 0..120 {
            assert_eq!(rig.update(&mut cam, Some(moved), FRAME), None);
        }
        assert_eq!(rig.desired(), desired);
        assert_eq!(cam.position, position);
        assert!(cam.target.distance(moved.position) < 0.5);
    }

    #[test]
    fn user_orbit_after_arrival_is_left_alone() {
        let mut rig = CameraRig::default();
        let mut cam = camera();
        rig.select(Some(3));
        let focus = planet_focus(Vec3::new(25.0, 0.0, 0.0));
        run_until_arrived(&mut rig, &mut cam, Some(focus));

        cam.position = Vec3::new(25.0, 30.0, 30.0);
        rig.update(&mut cam, Some(focus), FRAME);
        assert_eq!(cam.position, Vec3::new(25.0, 30.0, 30.0));
    }

    #[test]
    fn reselecting_same_body_is_noop_and_change_restarts() {
        let mut rig = CameraRig::default();
        let mut cam = camera();
        rig.select(Some(3));
        run_until_arrived(&mut rig, &mut cam, Some(planet_focus(Vec3::new(25.0, 0.0, 0.0))));

        assert!(!rig.select(Some(3)));
        assert_eq!(rig.phase(), RigPhase::Arrived);

        assert!(rig.select(Some(4)));
        assert_eq!(rig.phase(), RigPhase::Flying);

        assert!(rig.select(None));
        assert_eq!(rig.phase(), RigPhase::Flying);
    }

    #[test]
    fn missing_focus_skips_frame() {
        let mut rig = CameraRig::default();
        let mut cam = camera();
        rig.select(Some(2));
        let before = (cam.position, cam.target);
        assert_eq!(rig.update(&mut cam, None, FRAME), None);
        assert_eq!((cam.position, cam.target), before);
        assert_eq!(rig.phase(), RigPhase::Flying);
    }

    #[test]
    fn body_at_origin_uses_z_axis() {
        let mut rig = CameraRig::default();
        let mut cam = camera();
        rig.select(Some(0));
        let sun = Focus { position: Vec3::ZERO, vantage: Vantage { offset: 35.0, height: 5.0 } };
        rig.update(&mut cam, Some(sun), FRAME);
        assert!(rig.desired().distance(Vec3::new(0.0, 5.0, 35.0)) < 1e-5);
    }

    #[test]
    fn back_to_overview_flies_home() {
        let mut rig = CameraRig::default();
        let mut cam = camera();
        rig.select(Some(3));
        run_until_arrived(&mut rig, &mut cam, Some(planet_focus(Vec3::new(25.0, 0.0, 0.0))));

        rig.select(None);
        run_until_arrived(&mut rig, &mut cam, None);
        assert!(cam.position.distance(Vec3::new(0.0, 60.0, 140.0)) < 2.0);
    }

    #[test]
    fn suspended_rig_does_nothing() {
        let mut rig = CameraRig::default();
        let mut cam = camera();
        rig.select(Some(3));
        rig.set_suspended(true);
        let before = cam.position;
        for _ in 0..30 {
            rig.update(&mut cam, Some(planet_focus(Vec3::new(25.0, 0.0, 0.0))), FRAME);
        }
        assert_eq!(cam.position, before);
        assert_eq!(rig.phase(), RigPhase::Flying);
    }

    #[test]
    fn frame_rate_independent_arrival() {
        let focus = planet_focus(Vec3::new(25.0, 0.0, 0.0));

        let mut fast = CameraRig::default();
        let mut fast_cam = camera();
        fast.select(Some(3));
        let mut fast_time = 0.0;
        while fast.phase() == RigPhase::Flying {
            fast.update(&mut fast_cam, Some(focus), FRAME);
            fast_time += FRAME;
        }

        let mut slow = CameraRig::default();
        let mut slow_cam = camera();
        slow.select(Some(3));
        let mut slow_time = 0.0;
        while slow.phase() == RigPhase::Flying {
            slow.update(&mut slow_cam, Some(focus), 1.0 / 30.0);
            slow_time += 1.0 / 30.0;
        }
        assert!((fast_time - slow_time).abs() < 0.1, "{fast_time} vs {slow_time}");
    }

    #[test]
    fn vantage_by_kind() {
        let settings = RigSettings::default();
        let registry = crate::bodies::BodyRegistry::solar_system();
        let sun = registry.get(0).unwrap();
        let jupiter = registry.get(5).unwrap();
        assert_eq!(settings.vantage(sun), Vantage { offset: 35.0, height: 5.0 });
        let v = settings.vantage(jupiter);
        assert!((v.offset - 33.6).abs() < 1e-4);
        assert!((v.height - 11.2).abs() < 1e-4);
    }
}
