//! Drives a full battle through the public API: two players, one tank
//! each, head to head down the basic arena's open corridor.

use engine::assets::ModelId;
use engine::graphics::RenderFrame;
use engine::input::{InputState, Key, MouseButton};
use engine::map::{MapDefinition, MapName};
use engine::unit::Unit;
use engine::units::TwinViaPlatelet;
use engine::{GameCore, KillReport, TICKS_PER_SECOND};
use glam::Vec2;

fn new_battle() -> (GameCore, engine::player::PlayerId, engine::player::PlayerId) {
    let mut core = GameCore::new(MapDefinition::load(MapName::Basic), 7).unwrap();
    let alice = core.add_player();
    let bob = core.add_player();
    (core, alice, bob)
}

#[test]
fn sustained_fire_down_the_corridor_scores_a_kill() {
    let (mut core, alice, bob) = new_battle();
    let alice_tank = core.spawn_unit::<TwinViaPlatelet>(alice).unwrap();
    let bob_tank = core.spawn_unit::<TwinViaPlatelet>(bob).unwrap();

    let target = core.unit(bob_tank).unwrap().base().position;
    let mut input = InputState::default();
    input.set_cursor(target);
    input.hold_mouse(MouseButton::Left);
    core.set_input(alice, input);

    let mut kill: Option<KillReport> = None;
    for _ in 0..(TICKS_PER_SECOND * 4) {
        let report = core.tick();
        if let Some(first) = report.kills.first() {
            kill = Some(*first);
            break;
        }
    }

    let kill = kill.expect("sustained fire should destroy the target");
    assert_eq!(kill.killer, alice);
    assert_eq!(kill.victim, bob_tank);
    assert!(core.unit(bob_tank).is_none());
    assert!(core.unit(alice_tank).is_some());
    assert_eq!(core.player(alice).unwrap().kills, 1);
}

#[test]
fn volleys_come_in_pairs_spaced_by_the_fire_interval() {
    let (mut core, alice, _) = new_battle();
    let alice_tank = core.spawn_unit::<TwinViaPlatelet>(alice).unwrap();
    let position = core.unit(alice_tank).unwrap().base().position;

    let mut input = InputState::default();
    input.set_cursor(position + Vec2::new(0.0, 5.0));
    input.hold_mouse(MouseButton::Left);
    core.set_input(alice, input);

    let fire_interval = TICKS_PER_SECOND / 10;
    let mut bullet_counts = Vec::new();
    for _ in 0..(fire_interval * 2) {
        core.tick();
        bullet_counts.push(core.bullets().len());
    }

    // Two bullets on the firing tick, two more exactly one interval later.
    assert_eq!(bullet_counts[0], 2);
    assert_eq!(bullet_counts[(fire_interval - 1) as usize], 2);
    assert_eq!(bullet_counts[fire_interval as usize], 4);
}

#[test]
fn driving_and_turning_move_the_tank_through_the_event_queue() {
    let (mut core, alice, _) = new_battle();
    let tank = core.spawn_unit::<TwinViaPlatelet>(alice).unwrap();
    let start = core.unit(tank).unwrap().base().position;

    let mut input = InputState::default();
    input.press(Key::W);
    input.press(Key::A);
    input.set_cursor(start + Vec2::Y);
    core.set_input(alice, input);

    for _ in 0..TICKS_PER_SECOND {
        core.tick();
    }

    let base_position = core.unit(tank).unwrap().base().position;
    let base_rotation = core.unit(tank).unwrap().base().rotation;
    assert!(
        (base_position - start).length() > 1.0,
        "a second of driving should cover ground"
    );
    assert!(
        base_rotation > 2.0,
        "a second of holding A should turn roughly half a circle"
    );
}

#[test]
fn dead_players_leave_idle_tanks() {
    // A tank whose player never existed is skipped entirely; here the
    // nearest public equivalent: a player that never sends input.
    let (mut core, _, bob) = new_battle();
    let tank = core.spawn_unit::<TwinViaPlatelet>(bob).unwrap();
    let start = core.unit(tank).unwrap().base().position;

    for _ in 0..10 {
        core.tick();
    }

    assert_eq!(core.unit(tank).unwrap().base().position, start);
    assert!(core.bullets().is_empty());
}

#[test]
fn rendering_a_battle_reuses_registered_models() {
    let (mut core, alice, bob) = new_battle();
    core.spawn_unit::<TwinViaPlatelet>(alice).unwrap();
    core.spawn_unit::<TwinViaPlatelet>(bob).unwrap();

    let mut frame = RenderFrame::new();
    core.render(&mut frame);

    let body_models: Vec<ModelId> = frame
        .calls()
        .iter()
        .step_by(4)
        .map(|call| call.model)
        .collect();
    assert_eq!(body_models.len(), 2);
    assert_eq!(
        body_models[0], body_models[1],
        "both tanks draw the same shared body model"
    );
}
