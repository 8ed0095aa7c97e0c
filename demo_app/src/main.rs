//! Hand interaction demo
//!
//! Runs a scripted scene headless and logs every state change: the right
//! hand pinches a mug, then presses a button with its index finger, while
//! a left controller grabs a cube and lifts it.
//!
//! Pass a `.toml` or `.ron` settings file as the first argument to
//! override the defaults; `RUST_LOG` overrides its log level.

use interaction_core::foundation::logging;
use interaction_core::foundation::math::utils::lerp;
use interaction_core::hand::{HandFinger, HandJoint};
use interaction_core::interaction::{SelectIntentComparer, StateChange};
use interaction_core::prelude::*;

const FRAME_TIME: f32 = 1.0 / 72.0;
const FRAMES: u32 = 300;

/// Where the script puts every tracked device in one frame
struct Frame {
    right_hand: Option<HandJointPoses>,
    index_tip: Option<Pose>,
    controller: Pose,
    trigger: bool,
}

/// Interpolation factor of `frame` within `[start, end)`
fn phase(frame: u32, start: u32, end: u32) -> f32 {
    if end <= start {
        return 1.0;
    }
    ((frame.saturating_sub(start)) as f32 / (end - start) as f32).clamp(0.0, 1.0)
}

fn lerp_vec(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    Vec3::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t), lerp(a.z, b.z, t))
}

fn pinched(hand: HandJointPoses) -> HandJointPoses {
    let tip = hand.finger_tip(HandFinger::Thumb) + hand.wrist().up() * 0.005;
    hand.with_joint_position(HandJoint::IndexTip, tip)
}

fn script(frame: u32) -> Frame {
    let pointing = |wrist: Vec3| {
        Pose::looking_along(wrist, Vec3::new(0.0, 0.0, -1.0), Vec3::y())
    };

    // Right hand: reach the mug, pinch, let go, then press the button
    let right_hand = match frame {
        0..=39 => {
            let wrist = lerp_vec(Vec3::new(0.3, 0.9, -0.1), Vec3::new(0.2, 1.0, -0.2), phase(frame, 0, 30));
            Some(HandJointPoses::open(Handedness::Right, Pose::from_position(wrist)))
        }
        40..=89 => {
            let wrist = lerp_vec(Vec3::new(0.2, 1.0, -0.2), Vec3::new(0.2, 1.1, -0.2), phase(frame, 50, 80));
            Some(pinched(HandJointPoses::open(Handedness::Right, Pose::from_position(wrist))))
        }
        90..=119 => Some(HandJointPoses::open(
            Handedness::Right,
            Pose::from_position(Vec3::new(0.2, 1.1, -0.2)),
        )),
        120..=129 => None,
        130..=199 => {
            // Index tip is 0.165 ahead of the wrist; the button sits at z = -0.5
            let depth = if frame < 165 {
                lerp(-0.3, -0.36, phase(frame, 130, 160))
            } else {
                lerp(-0.36, -0.3, phase(frame, 170, 190))
            };
            Some(HandJointPoses::open(
                Handedness::Right,
                pointing(Vec3::new(-0.22, 1.0, depth)),
            ))
        }
        _ => None,
    };
    let index_tip = right_hand
        .as_ref()
        .map(|hand| Pose::from_position(hand.finger_tip(HandFinger::Index)));

    // Left controller: reach the cube, lift it, let go
    let cube = Vec3::new(-0.4, 1.2, -0.4);
    let controller = match frame {
        0..=199 => lerp_vec(Vec3::new(-0.6, 1.0, 0.0), cube, phase(frame, 150, 190)),
        200..=259 => lerp_vec(cube, cube + Vec3::new(0.0, 0.3, 0.0), phase(frame, 210, 250)),
        _ => cube + Vec3::new(0.0, 0.3, 0.1),
    };

    Frame {
        right_hand,
        index_tip,
        controller: Pose::from_position(controller),
        trigger: (195..265).contains(&frame),
    }
}

fn load_config() -> Result<InteractionConfig, Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => InteractionConfig::load_from_file(&path)?,
        None => InteractionConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn log_changes<D>(world: &mut InteractionWorld, key: InteractableKey, name: &'static str)
where
    D: interaction_core::interaction::InteractableData,
{
    if let Some(interactable) = world.interactable_mut::<D>(key) {
        interactable
            .when_state_changed()
            .connect(move |change: &StateChange<InteractableState>| {
                log::info!("{name}: {} -> {}", change.previous, change.new);
            });
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    logging::init_with_level(&config.logging.level)?;
    log::info!("Starting hand interaction demo ({FRAMES} frames)");

    // Scene
    let mut world = InteractionWorld::new();
    let mug = world.spawn(
        Pose::from_position(Vec3::new(0.2, 0.95, -0.1)),
        HandGrabInteractable::new(0.05)?,
    );
    let button = world.spawn(
        Pose::looking_along(Vec3::new(-0.2, 1.0, -0.5), Vec3::new(0.0, 0.0, -1.0), Vec3::y()),
        PokeInteractable::new(PokeSurface::new(Vec2::new(0.04, 0.04))?, &config.poke)?,
    );
    let cube_shape = ColliderShape::cuboid(Vec3::new(0.05, 0.05, 0.05))?;
    let cube = world.spawn_with_limits(
        Pose::from_position(Vec3::new(-0.4, 1.2, -0.4)),
        GrabInteractable::new(vec![cube_shape])?,
        config.grab.limits,
    )?;
    log_changes::<HandGrabInteractable>(&mut world, mug, "mug");
    log_changes::<PokeInteractable>(&mut world, button, "button");
    log_changes::<GrabInteractable>(&mut world, cube, "cube");

    // Right hand: grabbing and poking share the hand, one group arbitrates
    let right_hand = SharedHand::new();
    let index_tip = SharedPose::new();
    let hand_grab = HandGrabModality::from_config(right_hand.clone(), &config)?.interactor(&mut world);
    let poke = PokeModality::new(index_tip.clone(), config.poke.clone())?.interactor(&mut world);
    let group = InteractorDriverGroup::from_config(&config.group)
        .with_driver(Driver::new(hand_grab))
        .with_driver(Driver::new(poke))
        .with_comparer(SelectIntentComparer);

    let mut scheduler = InteractionScheduler::new();
    let right_id = scheduler.add(0, group);

    // Left controller, ticked by the host so it can move what it holds
    let controller = SharedPose::new();
    let trigger = ButtonSelector::shared();
    let mut left = Driver::new(GrabModality::interactor(&mut world, controller.clone(), trigger.clone()));
    left.interactor_mut()
        .when_interactable_selected()
        .connect(|_| log::info!("left controller grabbed the cube"));

    for frame in 0..FRAMES {
        let inputs = script(frame);
        match inputs.right_hand {
            Some(hand) => right_hand.set(hand),
            None => right_hand.clear(),
        }
        match inputs.index_tip {
            Some(tip) => index_tip.set(tip),
            None => index_tip.clear(),
        }
        controller.set(inputs.controller);
        if inputs.trigger {
            trigger.borrow_mut().press();
        } else {
            trigger.borrow_mut().release();
        }

        scheduler.tick(&mut world, FRAME_TIME);
        left.tick(&mut world, FRAME_TIME);

        if let Some(held) = left.interactor().modality().held_pose() {
            if let Some(entry) = world.interactable_mut::<GrabInteractable>(cube) {
                entry.set_pose(held);
            }
        }

        if frame % 30 == 0 {
            let right_state = scheduler
                .driver(right_id)
                .map_or(InteractorState::Disabled, |driver| driver.state());
            log::debug!("frame {frame}: right hand {right_state}, left controller {}", left.state());
        }
    }

    if let Some(entry) = world.interactable::<GrabInteractable>(cube) {
        let position = entry.pose().position;
        log::info!("cube rests at ({:.2}, {:.2}, {:.2})", position.x, position.y, position.z);
    }
    log::info!("Demo finished after {} frames", scheduler.frame());
    Ok(())
}
