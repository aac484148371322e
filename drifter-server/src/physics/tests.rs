use glam::{DQuat, DVec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use drifter_core::entity_location::DerivedFrame;
use drifter_core::physics_object::{RigidBodyHandle, LOCAL_FORWARD, LOCAL_RIGHT};
use drifter_core::player::player_inputs::{InputChannel, InputState};
use drifter_core::tuning::{ControlScheme, SpeedPolicy, VehicleConfig};

use crate::physics::controller::{apply_grip, VehicleController};
use crate::physics::sim_body::SimBody;

const TIME_STEP: f64 = 1.0 / 60.0;

// Stand-in body that remembers every write made to it
#[derive(Default)]
struct RecordingBody {
    linvel: DVec3,
    angvel: DVec3,
    rotation: DQuat,

    linvel_writes: Vec<DVec3>,
    angvel_writes: Vec<DVec3>,
    impulses: Vec<DVec3>,
    wakes: Vec<bool>,
}

impl RecordingBody {
    fn with_linvel(linvel: DVec3) -> Self {
        RecordingBody {
            linvel,
            rotation: DQuat::IDENTITY,
            ..Default::default()
        }
    }

    fn write_count(&self) -> usize {
        self.linvel_writes.len() + self.angvel_writes.len() + self.impulses.len()
    }
}

impl RigidBodyHandle for RecordingBody {
    fn linvel(&self) -> DVec3 {
        self.linvel
    }

    fn angvel(&self) -> DVec3 {
        self.angvel
    }

    fn rotation(&self) -> DQuat {
        self.rotation
    }

    fn set_linvel(&mut self, linvel: DVec3, wake_up: bool) {
        self.linvel = linvel;
        self.linvel_writes.push(linvel);
        self.wakes.push(wake_up);
    }

    fn set_angvel(&mut self, angvel: DVec3, wake_up: bool) {
        self.angvel = angvel;
        self.angvel_writes.push(angvel);
        self.wakes.push(wake_up);
    }

    fn apply_impulse(&mut self, impulse: DVec3, wake_up: bool) {
        self.linvel += impulse;
        self.impulses.push(impulse);
        self.wakes.push(wake_up);
    }
}

fn get_default_config() -> VehicleConfig {
    VehicleConfig::new(10.0, 1.0, 0.95, 2.0).unwrap()
}

fn input_holding(channels: &[InputChannel]) -> InputState {
    let mut input = InputState::new();
    for channel in channels {
        input.set_pressed(*channel, true);
    }
    input
}

fn random_input(rng: &mut StdRng) -> InputState {
    let mut input = InputState::new();
    for channel in [
        InputChannel::Left,
        InputChannel::Right,
        InputChannel::Forward,
        InputChannel::Backward,
    ] {
        input.set_pressed(channel, rng.gen_bool(0.5));
    }
    input
}

fn random_vector(rng: &mut StdRng) -> DVec3 {
    DVec3::new(
        rng.gen_range(-20.0..20.0),
        rng.gen_range(-20.0..20.0),
        rng.gen_range(-20.0..20.0),
    )
}

fn random_yaw(rng: &mut StdRng) -> DQuat {
    DQuat::from_rotation_y(rng.gen_range(-std::f64::consts::PI..std::f64::consts::PI))
}

#[test]
fn test_missing_body_is_skipped() {
    let mut controller = VehicleController::new(get_default_config());
    let input = input_holding(&[InputChannel::Forward, InputChannel::Left]);

    assert_eq!(controller.update(None, &input, TIME_STEP), None);
    assert_eq!(controller.forward_direction(), LOCAL_FORWARD);
}

#[test]
fn test_left_turn_sets_yaw_only() {
    let config = VehicleConfig::new(10.0, 1.0, 0.95, 2.0).unwrap();
    let mut controller = VehicleController::new(config);
    let mut body = RecordingBody::with_linvel(DVec3::ZERO);
    body.angvel = DVec3::new(0.3, -4.0, -0.2);

    let input = input_holding(&[InputChannel::Left]);
    controller.update(Some(&mut body), &input, TIME_STEP);

    assert_eq!(body.angvel, DVec3::new(0.3, 1.0, -0.2));
}

#[test]
fn test_right_turn_is_negative() {
    let config = VehicleConfig::new(10.0, 2.5, 0.95, 2.0).unwrap();
    let mut controller = VehicleController::new(config);
    let mut body = RecordingBody::with_linvel(DVec3::ZERO);

    let input = input_holding(&[InputChannel::Right]);
    controller.update(Some(&mut body), &input, TIME_STEP);

    assert_eq!(body.angvel.y, -2.5);
}

#[test]
fn test_opposite_turns_cancel() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut controller = VehicleController::new(get_default_config());

    for _ in 0..100 {
        let mut body = RecordingBody::with_linvel(random_vector(&mut rng));
        body.angvel = random_vector(&mut rng);
        let before = body.angvel;

        let mut input = input_holding(&[InputChannel::Left, InputChannel::Right]);
        input.set_pressed(InputChannel::Forward, rng.gen_bool(0.5));
        controller.update(Some(&mut body), &input, TIME_STEP);

        assert_eq!(body.angvel, DVec3::new(before.x, 0.0, before.z));
    }
}

#[test]
fn test_no_steering_leaves_no_spin() {
    let mut controller = VehicleController::new(get_default_config());
    let mut body = RecordingBody::with_linvel(DVec3::ZERO);
    body.angvel = DVec3::new(0.0, 3.0, 0.0);

    controller.update(Some(&mut body), &InputState::new(), TIME_STEP);

    assert_eq!(body.angvel, DVec3::ZERO);
}

#[test]
fn test_grip_scenario() {
    // lateral 3 along right, forward speed 4 (the body faces -Z, so +Z
    // velocity is reversing)
    let corrected = apply_grip(DVec3::new(3.0, 0.0, 4.0), &DerivedFrame::default(), 0.95);

    assert!((corrected.dot(LOCAL_RIGHT) - 0.15).abs() < 1e-12);
    assert!((corrected.dot(LOCAL_FORWARD) - -4.0).abs() < 1e-12);
    assert!(corrected.abs_diff_eq(DVec3::new(0.15, 0.0, 4.0), 1e-12));
}

#[test]
fn test_grip_scenario_through_controller() {
    let mut controller = VehicleController::new(get_default_config());
    let mut body = RecordingBody::with_linvel(DVec3::new(3.0, 0.0, 4.0));

    controller.update(Some(&mut body), &InputState::new(), TIME_STEP);

    assert!(body.linvel.abs_diff_eq(DVec3::new(0.15, 0.0, 4.0), 1e-12));
    assert!(body.impulses.is_empty());
}

#[test]
fn test_full_grip_removes_all_sideways_speed() {
    let mut rng = StdRng::seed_from_u64(3);

    for _ in 0..200 {
        let frame = DerivedFrame::from_rotation(random_yaw(&mut rng), &DerivedFrame::default());
        let corrected = apply_grip(random_vector(&mut rng), &frame, 1.0);
        assert!(corrected.dot(frame.right).abs() < 1e-9);
    }
}

#[test]
fn test_zero_grip_is_identity() {
    let mut rng = StdRng::seed_from_u64(5);

    for _ in 0..200 {
        let frame = DerivedFrame::from_rotation(random_yaw(&mut rng), &DerivedFrame::default());
        let velocity = random_vector(&mut rng);
        assert_eq!(apply_grip(velocity, &frame, 0.0), velocity);
    }
}

#[test]
fn test_grip_keeps_forward_speed() {
    let mut rng = StdRng::seed_from_u64(9);

    for _ in 0..200 {
        let frame = DerivedFrame::from_rotation(random_yaw(&mut rng), &DerivedFrame::default());
        let velocity = random_vector(&mut rng);
        let grip = rng.gen_range(0.0..=1.0);
        let corrected = apply_grip(velocity, &frame, grip);

        assert!((corrected.dot(frame.forward) - velocity.dot(frame.forward)).abs() < 1e-9);
        let expected_side = velocity.dot(frame.right) * (1.0 - grip);
        assert!((corrected.dot(frame.right) - expected_side).abs() < 1e-9);
    }
}

#[test]
fn test_vertical_speed_is_never_touched() {
    let mut rng = StdRng::seed_from_u64(17);

    for _ in 0..300 {
        let grip = rng.gen_range(0.0..=1.0);
        let policy = if rng.gen_bool(0.5) {
            SpeedPolicy::Capped
        } else {
            SpeedPolicy::Unlimited
        };
        let config = VehicleConfig::new(10.0, 1.5, grip, 2.0)
            .unwrap()
            .with_speed_policy(policy);
        let mut controller = VehicleController::new(config);

        let mut body = RecordingBody::with_linvel(random_vector(&mut rng));
        body.rotation = random_yaw(&mut rng);
        let vertical_speed = body.linvel.y;

        controller.update(Some(&mut body), &random_input(&mut rng), TIME_STEP);

        assert_eq!(body.linvel.y, vertical_speed);
        assert!(body.impulses.iter().all(|impulse| impulse.y == 0.0));
    }
}

#[test]
fn test_thrust_from_rest_follows_forward() {
    let mut controller = VehicleController::new(get_default_config());
    let mut body = RecordingBody::with_linvel(DVec3::ZERO);
    body.rotation = DQuat::from_rotation_y(0.6);

    let frame = controller
        .update(
            Some(&mut body),
            &input_holding(&[InputChannel::Forward]),
            TIME_STEP,
        )
        .unwrap();

    assert_eq!(body.impulses.len(), 1);
    let impulse = body.impulses[0];
    assert_eq!(impulse.y, 0.0);
    assert!(impulse.cross(frame.forward).length() < 1e-12);
    assert!(impulse.dot(frame.forward) > 0.0);
    assert!((impulse.length() - 2.0).abs() < 1e-12);
    assert_eq!(controller.forward_direction(), frame.forward);
}

#[test]
fn test_reverse_thrust_opposes_forward() {
    let mut controller = VehicleController::new(get_default_config());
    let mut body = RecordingBody::with_linvel(DVec3::ZERO);

    controller.update(
        Some(&mut body),
        &input_holding(&[InputChannel::Backward]),
        TIME_STEP,
    );

    assert_eq!(body.impulses, vec![DVec3::new(0.0, 0.0, 2.0)]);
}

#[test]
fn test_forward_and_backward_cancel() {
    let mut controller = VehicleController::new(get_default_config());
    let mut body = RecordingBody::with_linvel(DVec3::ZERO);

    controller.update(
        Some(&mut body),
        &input_holding(&[InputChannel::Forward, InputChannel::Backward]),
        TIME_STEP,
    );

    assert!(body.impulses.is_empty());
}

#[test]
fn test_every_write_wakes_the_body() {
    let mut controller = VehicleController::new(get_default_config());
    let mut body = RecordingBody::with_linvel(DVec3::new(1.0, 0.0, -1.0));

    controller.update(
        Some(&mut body),
        &input_holding(&[InputChannel::Forward, InputChannel::Left]),
        TIME_STEP,
    );

    assert_eq!(body.write_count(), 3);
    assert!(body.wakes.iter().all(|wake| *wake));
}

#[test]
fn test_capped_policy_withholds_thrust_at_top_speed() {
    let config = get_default_config().with_speed_policy(SpeedPolicy::Capped);
    let mut controller = VehicleController::new(config);

    // already at 10 along forward (-Z)
    let mut body = RecordingBody::with_linvel(DVec3::new(0.0, 0.0, -10.0));
    controller.update(
        Some(&mut body),
        &input_holding(&[InputChannel::Forward]),
        TIME_STEP,
    );
    assert!(body.impulses.is_empty());

    // braking against the motion still goes through
    controller.update(
        Some(&mut body),
        &input_holding(&[InputChannel::Backward]),
        TIME_STEP,
    );
    assert_eq!(body.impulses, vec![DVec3::new(0.0, 0.0, 2.0)]);

    // and below the cap forward thrust is back
    let mut slow_body = RecordingBody::with_linvel(DVec3::new(0.0, 0.0, -9.0));
    controller.update(
        Some(&mut slow_body),
        &input_holding(&[InputChannel::Forward]),
        TIME_STEP,
    );
    assert_eq!(slow_body.impulses, vec![DVec3::new(0.0, 0.0, -2.0)]);
}

#[test]
fn test_capped_policy_ignores_vertical_speed() {
    let config = get_default_config().with_speed_policy(SpeedPolicy::Capped);
    let mut controller = VehicleController::new(config);

    // falling fast but barely moving horizontally
    let mut body = RecordingBody::with_linvel(DVec3::new(0.0, -50.0, -1.0));
    controller.update(
        Some(&mut body),
        &input_holding(&[InputChannel::Forward]),
        TIME_STEP,
    );
    assert_eq!(body.impulses.len(), 1);
}

#[test]
fn test_unlimited_policy_thrusts_at_any_speed() {
    let mut controller = VehicleController::new(get_default_config());
    let mut body = RecordingBody::with_linvel(DVec3::new(0.0, 0.0, -500.0));

    controller.update(
        Some(&mut body),
        &input_holding(&[InputChannel::Forward]),
        TIME_STEP,
    );
    assert_eq!(body.impulses.len(), 1);
}

#[test]
fn test_world_axis_scheme() {
    let config = get_default_config().with_control_scheme(ControlScheme::WorldAxis);
    let mut controller = VehicleController::new(config);

    let mut body = RecordingBody::with_linvel(DVec3::new(2.0, 0.0, 0.0));
    body.angvel = DVec3::new(0.0, 1.0, 0.0);
    controller.update(
        Some(&mut body),
        &input_holding(&[InputChannel::Forward, InputChannel::Left]),
        TIME_STEP,
    );

    // no steering and no grip, just a diagonal push on the world plane
    assert!(body.angvel_writes.is_empty());
    assert!(body.linvel_writes.is_empty());
    assert_eq!(body.impulses.len(), 1);
    let diagonal = DVec3::new(-1.0, 0.0, -1.0).normalize() * 2.0;
    assert!(body.impulses[0].abs_diff_eq(diagonal, 1e-12));

    // at top speed nothing is pushed, whichever way the input points
    let mut fast_body = RecordingBody::with_linvel(DVec3::new(10.0, 0.0, 0.0));
    controller.update(
        Some(&mut fast_body),
        &input_holding(&[InputChannel::Left]),
        TIME_STEP,
    );
    assert!(fast_body.impulses.is_empty());

    let mut idle_body = RecordingBody::with_linvel(DVec3::ZERO);
    controller.update(Some(&mut idle_body), &InputState::new(), TIME_STEP);
    assert_eq!(idle_body.write_count(), 0);
}

#[test]
fn test_degenerate_orientation_keeps_previous_forward() {
    let mut controller = VehicleController::new(get_default_config());

    let mut body = RecordingBody::with_linvel(DVec3::new(1.0, 0.0, 1.0));
    body.rotation = DQuat::from_rotation_y(std::f64::consts::FRAC_PI_2);
    let first = controller
        .update(Some(&mut body), &InputState::new(), TIME_STEP)
        .unwrap();

    body.rotation = DQuat::from_xyzw(0.0, 0.0, 0.0, 0.0);
    let second = controller
        .update(
            Some(&mut body),
            &input_holding(&[InputChannel::Forward]),
            TIME_STEP,
        )
        .unwrap();

    assert_eq!(first, second);
    assert!(body.linvel.is_finite());
    assert!(body.impulses.iter().all(|impulse| impulse.is_finite()));
}

#[test]
fn test_non_finite_velocity_is_not_written_back() {
    let mut controller = VehicleController::new(get_default_config());
    let mut body = RecordingBody::with_linvel(DVec3::new(f64::NAN, 0.0, 1.0));

    controller.update(Some(&mut body), &InputState::new(), TIME_STEP);

    assert!(body.linvel_writes.is_empty());
    assert_eq!(body.angvel_writes, vec![DVec3::ZERO]);
}

#[test]
fn test_sim_body_impulse_scales_with_mass() {
    let mut body = SimBody::new(DVec3::new(0.0, 0.25, 0.0), DVec3::new(0.2, 0.5, 0.3), 4.0, 9.81);
    body.apply_impulse(DVec3::new(0.0, 0.0, -2.0), true);
    assert_eq!(body.velocity, DVec3::new(0.0, 0.0, -0.5));
}

#[test]
fn test_sim_body_falls_and_lands() {
    let mut body = SimBody::new(DVec3::new(0.0, 1.0, 0.0), DVec3::new(0.2, 0.5, 0.3), 1.0, 9.81);
    assert!(body.is_aerial());

    for _ in 0..120 {
        body.do_physics_step(TIME_STEP);
    }

    assert!(!body.is_aerial());
    assert!((body.position.y - 0.25).abs() < 1e-12);
    assert!(body.velocity.y >= 0.0);
}

#[test]
fn test_sim_body_yaw_integration_turns_left() {
    let mut body = SimBody::new(DVec3::new(0.0, 0.25, 0.0), DVec3::new(0.2, 0.5, 0.3), 1.0, 9.81);
    body.set_angvel(DVec3::new(0.0, std::f64::consts::FRAC_PI_2, 0.0), true);

    // a quarter turn over one second of steps
    for _ in 0..60 {
        body.set_angvel(DVec3::new(0.0, std::f64::consts::FRAC_PI_2, 0.0), true);
        body.do_physics_step(TIME_STEP);
    }

    let forward = body.rotation * LOCAL_FORWARD;
    assert!(forward.abs_diff_eq(DVec3::new(-1.0, 0.0, 0.0), 1e-9));
}

#[test]
fn test_sim_body_sleeps_and_wakes() {
    let mut body = SimBody::new(DVec3::new(0.0, 0.25, 0.0), DVec3::new(0.2, 0.5, 0.3), 1.0, 9.81);
    body.do_physics_step(TIME_STEP);
    assert!(!body.awake);

    // sleeping bodies don't move, even with a velocity set behind their back
    body.set_linvel(DVec3::new(1.0, 0.0, 0.0), false);
    body.do_physics_step(TIME_STEP);
    assert_eq!(body.position.x, 0.0);

    body.set_linvel(DVec3::new(1.0, 0.0, 0.0), true);
    body.do_physics_step(TIME_STEP);
    assert!(body.position.x > 0.0);
}

#[test]
fn test_driving_forward_then_left() {
    let mut controller = VehicleController::new(get_default_config());
    let mut body = SimBody::new(DVec3::new(0.0, 0.25, 0.0), DVec3::new(0.2, 0.5, 0.3), 1.0, 9.81);

    let forward = input_holding(&[InputChannel::Forward]);
    for _ in 0..30 {
        controller.update(Some(&mut body), &forward, TIME_STEP);
        body.do_physics_step(TIME_STEP);
    }
    assert!(body.position.z < -1.0);
    assert!(body.position.x.abs() < 1e-9);

    let forward_left = input_holding(&[InputChannel::Forward, InputChannel::Left]);
    for _ in 0..30 {
        controller.update(Some(&mut body), &forward_left, TIME_STEP);
        body.do_physics_step(TIME_STEP);
    }

    // turning left from -Z swings the nose (and with grip, the motion) to -X
    assert!(controller.forward_direction().x < 0.0);
    assert!(body.velocity.x < 0.0);
    assert!(body.velocity.is_finite());
}
