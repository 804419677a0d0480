//! Integration test: valve orchestration rules on the seed rig.

use proptest::prelude::*;
use vr_components::ValveStatus;
use vr_config::{BufferDef, GasDef, MixDef, RigConfig};
use vr_rig::{RigController, ValveSelector};

fn rig() -> RigController {
    RigController::seeded().unwrap()
}

#[test]
fn incompatible_system_gas_keeps_valve_closed() {
    let mut rig = rig();
    // Hydrogen system gas cannot meet buffer 7's oxygen
    rig.open_buffer_valve(6);
    assert!(!rig.buffer_valve_is_open(6));

    rig.open_buffer_valve(1);
    assert!(rig.buffer_valve_is_open(1));
}

#[test]
fn closed_buffers_still_constrain_opening() {
    let mut rig = rig();
    assert!(!rig.buffer_valve_is_open(7));
    rig.open_buffer_valve(6);
    assert!(!rig.buffer_valve_is_open(6));
}

#[test]
fn open_valve_cannot_be_disabled() {
    let mut rig = rig();
    rig.open_buffer_valve(2);
    rig.disable_buffer_valve(2);
    assert!(rig.buffer_valve_is_open(2));
    assert!(rig.buffer_valve_is_enabled(2));

    rig.close_buffer_valve(2);
    rig.disable_buffer_valve(2);
    assert!(!rig.buffer_valve_is_enabled(2));
}

#[test]
fn vacuum_blocked_while_any_buffer_open() {
    let mut rig = rig();
    rig.open_buffer_valve(3);
    rig.open_vacuum_valve();
    assert!(!rig.vacuum_valve().is_open());

    rig.close_buffer_valve(3);
    rig.open_vacuum_valve();
    assert!(rig.vacuum_valve().is_open());

    rig.close_vacuum_valve();
    assert!(!rig.vacuum_valve().is_open());
}

#[test]
fn cell_valve_follows_enable_flag() {
    let mut rig = rig();
    rig.disable_cell_valve();
    rig.open_cell_valve();
    assert_eq!(rig.cell_valve().status(), ValveStatus::ClosedDisabled);
    rig.enable_cell_valve();
    rig.open_cell_valve();
    assert_eq!(rig.cell_valve().status(), ValveStatus::OpenEnabled);
}

#[test]
fn halt_freezes_every_valve() {
    let mut rig = rig();
    rig.open_buffer_valve(1);
    rig.open_cell_valve();
    let before = rig.valve_statuses();

    assert!(rig.halt());
    rig.close_buffer_valve(1);
    rig.open_buffer_valve(2);
    rig.disable_buffer_valve(3);
    rig.enable_buffer_valve(4);
    rig.close_cell_valve();
    rig.disable_vacuum_valve();
    rig.open_vacuum_valve();
    assert_eq!(rig.valve_statuses(), before);

    assert!(!rig.halt());
    assert!(rig.halted());
}

#[test]
fn halted_rig_still_trips_on_over_pressure() {
    let mut rig = rig();
    rig.tick(0.1).unwrap();
    rig.open_buffer_valve(1);
    assert!(rig.buffer_valve_is_open(1));
    rig.halt();

    rig.set_pressures(150.0).unwrap();
    rig.tick(0.1).unwrap();
    assert!(!rig.buffer_valve_is_open(1));
    assert!(!rig.any_buffer_valve_open());
    assert!((1..=8).all(|n| !rig.buffer_valve_is_enabled(n)));

    // Operator commands stay frozen
    rig.enable_buffer_valve(1);
    assert!(!rig.buffer_valve_is_enabled(1));

    // Low pressure still re-arms the lines
    rig.set_pressures(1.0).unwrap();
    rig.tick(0.1).unwrap();
    assert!(rig.buffer_valve_is_open(1));
    assert!(!rig.buffer_valve_is_open(6));
    assert!(rig.halted());
}

#[test]
fn system_gas_swap_only_while_closed() {
    let mut rig = rig();
    let argon = rig.gases().require("ARGON").unwrap().clone();
    let helium = rig.gases().require("HELIUM").unwrap().clone();

    rig.set_buffer_system_gas(6, &argon);
    assert_eq!(rig.buffer_system_gas(6), Some(&argon));

    // Argon meets every buffer gas, so buffer 6 can open now
    rig.open_buffer_valve(6);
    assert!(rig.buffer_valve_is_open(6));

    rig.set_buffer_system_gas(6, &helium);
    assert_eq!(rig.buffer_system_gas(6).map(|g| g.name()), Some("ARGON"));
}

#[test]
fn numbered_valves_reach_cell_and_vacuum() {
    let mut rig = rig();
    let count = rig.buffer_count();
    let cell = ValveSelector::from_number(count as i64 + 1, count).unwrap();
    let vacuum = ValveSelector::from_number(count as i64 + 2, count).unwrap();

    rig.open_valve(cell);
    assert!(rig.cell_valve().is_open());
    rig.open_valve(vacuum);
    assert!(rig.valve(vacuum).is_some_and(|v| v.is_open()));
    rig.close_valve(vacuum);
    assert!(!rig.vacuum_valve().is_open());
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Open(i64),
    Close(i64),
    Enable(i64),
    Disable(i64),
    OpenVacuum,
    CloseVacuum,
    Halt,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-1i64..11).prop_map(Op::Open),
        (-1i64..11).prop_map(Op::Close),
        (-1i64..11).prop_map(Op::Enable),
        (-1i64..11).prop_map(Op::Disable),
        Just(Op::OpenVacuum),
        Just(Op::CloseVacuum),
        Just(Op::Halt),
    ]
}

proptest! {
    #[test]
    fn valve_invariants_hold(ops in prop::collection::vec(op(), 0..80)) {
        let mut rig = rig();
        for op in ops {
            let vacuum_was_open = rig.vacuum_valve().is_open();
            let buffers_open = rig.any_buffer_valve_open();
            match op {
                Op::Open(n) => rig.open_buffer_valve(n),
                Op::Close(n) => rig.close_buffer_valve(n),
                Op::Enable(n) => rig.enable_buffer_valve(n),
                Op::Disable(n) => rig.disable_buffer_valve(n),
                Op::OpenVacuum => {
                    rig.open_vacuum_valve();
                    if buffers_open {
                        prop_assert_eq!(rig.vacuum_valve().is_open(), vacuum_was_open);
                    }
                }
                Op::CloseVacuum => rig.close_vacuum_valve(),
                Op::Halt => {
                    rig.halt();
                }
            }
            prop_assert!(
                rig.valve_statuses().iter().all(|s| *s != ValveStatus::OpenDisabled)
            );
            // Hydrogen on hydrogen never opens next to oxygen
            prop_assert!(!rig.buffer_valve_is_open(6));
        }
    }
}

const MAX_GASES: usize = 6;

/// A panel of `gas_count` gases where pair `k` (in upper-triangle order)
/// mixes when `pairs[k]` is set.
fn random_panel(gas_count: usize, pairs: &[bool], lines: &[(usize, usize)]) -> RigConfig {
    let name = |i: usize| format!("GAS {i}");
    let gases = (0..gas_count)
        .map(|i| GasDef {
            index: i as u32,
            name: name(i),
        })
        .collect();

    let mut mixing = Vec::new();
    let mut k = 0;
    for i in 0..gas_count {
        let mut with = Vec::new();
        for j in i + 1..gas_count {
            if pairs[k] {
                with.push(name(j));
            }
            k += 1;
        }
        mixing.push(MixDef { gas: name(i), with });
    }

    let buffers = lines
        .iter()
        .map(|&(b, s)| BufferDef {
            buffer_gas: name(b % gas_count),
            system_gas: name(s % gas_count),
        })
        .collect();

    RigConfig {
        gases,
        mixing,
        buffers,
        initial_pressure: None,
        ..RigConfig::default()
    }
}

fn mixing_rule_holds(rig: &RigController) -> bool {
    rig.buffers()
        .iter()
        .filter(|b| b.valve_is_open())
        .all(|b| {
            rig.buffers()
                .iter()
                .all(|other| rig.can_mix(b.system_gas(), other.buffer_gas()))
        })
}

proptest! {
    #[test]
    fn open_buffers_mix_with_every_buffer_gas(
        gas_count in 2usize..=MAX_GASES,
        pairs in prop::collection::vec(any::<bool>(), MAX_GASES * (MAX_GASES - 1) / 2),
        lines in prop::collection::vec((0usize..MAX_GASES, 0usize..MAX_GASES), 1..7),
        ops in prop::collection::vec((0u8..4, 0i64..8, 0u32..MAX_GASES as u32), 0..40),
    ) {
        let config = random_panel(gas_count, &pairs, &lines);
        let mut rig = RigController::from_config(&config).unwrap();

        for (kind, n, gas) in ops {
            match kind {
                0 => rig.open_buffer_valve(n),
                1 => rig.close_buffer_valve(n),
                2 => {
                    if let Some(g) = rig.gases().by_index(gas % gas_count as u32).cloned() {
                        rig.set_buffer_system_gas(n, &g);
                    }
                }
                // Empty sensors sit below a tenth of target, so this re-opens
                _ => rig.tick(0.1).unwrap(),
            }
            prop_assert!(mixing_rule_holds(&rig));
        }
    }
}
