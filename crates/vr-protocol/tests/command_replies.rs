//! Integration test: wire replies for every command against the seed rig.

use proptest::prelude::*;
use vr_protocol::{ProtocolAdapter, Session, TickSource, UNRECOGNISED};
use vr_rig::RigController;

fn session() -> Session {
    Session::new(
        RigController::seeded().unwrap(),
        ProtocolAdapter::new(),
        TickSource::Fixed(0.1),
    )
}

fn ask(session: &mut Session, line: &str) -> String {
    session.handle_line(line).unwrap()
}

#[test]
fn identity() {
    let mut s = session();
    assert_eq!(ask(&mut s, "IDN"), "IDN,00,ISIS Volumetric Gas Handing Panel");
    assert_eq!(ask(&mut s, "?"), "IDN,00,ISIS Volumetric Gas Handing Panel");
}

#[test]
fn buffer_status_round_trips_gases() {
    let mut s = session();
    assert_eq!(
        ask(&mut s, "BCS 6"),
        "BCS,06,009,HYDROGEN            ,009,HYDROGEN            ,EC"
    );
    assert_eq!(
        ask(&mut s, "BCS 7"),
        "BCS,07,010,OXYGEN              ,001,EMPTY               ,EC"
    );
    assert_eq!(ask(&mut s, "BCS 0"), "BCS,00,Too Low");
    assert_eq!(ask(&mut s, "BCS 9"), "BCS,09,Too High");
}

#[test]
fn buffer_status_follows_system_gas_swap() {
    let mut s = session();
    let krypton = s.rig().gases().require("KRYPTON").unwrap().clone();
    s.rig_mut().set_buffer_system_gas(5, &krypton);
    assert_eq!(
        ask(&mut s, "BCS 5"),
        "BCS,05,006,CARBON DIOXIDE      ,013,KRYPTON             ,EC"
    );
}

#[test]
fn open_and_close_echo_old_and_new_state() {
    let mut s = session();
    assert_eq!(ask(&mut s, "OPV 1"), "OPV,01,C,O");
    assert_eq!(ask(&mut s, "OPV 1"), "OPV,01,O,O");
    assert_eq!(ask(&mut s, "BCS 1").chars().last(), Some('O'));
    assert_eq!(ask(&mut s, "CLV 1"), "CLV,01,O,C");
    // Mixing rule keeps hydrogen closed
    assert_eq!(ask(&mut s, "OPV 6"), "OPV,06,C,C");
}

#[test]
fn special_valve_numbers() {
    let mut s = session();
    assert_eq!(ask(&mut s, "OPV 9"), "OPV,09,C,O");
    assert_eq!(ask(&mut s, "OPV 2"), "OPV,02,C,O");
    // Vacuum interlock
    assert_eq!(ask(&mut s, "OPV 10"), "OPV,10,C,C");
    assert_eq!(ask(&mut s, "CLV 2"), "CLV,02,O,C");
    assert_eq!(ask(&mut s, "OPV 10"), "OPV,10,C,O");
    assert_eq!(ask(&mut s, "VST"), "VST,EOOEEEEEEEE");
}

#[test]
fn valve_numbers_out_of_range() {
    let mut s = session();
    assert_eq!(ask(&mut s, "OPV 0"), "OPV,00,Too Low");
    assert_eq!(ask(&mut s, "OPV 11"), "OPV,11,Too High");
    assert_eq!(ask(&mut s, "CLV -2"), "CLV,-2,Too Low");
    assert_eq!(ask(&mut s, "CLV"), "CLV,00,Too Low");
}

#[test]
fn tripped_valves_reject() {
    let mut s = session();
    assert_eq!(ask(&mut s, "OPV 1"), "OPV,01,C,O");
    s.rig_mut().set_pressures(150.0).unwrap();
    // The trip happens in the tick before this command runs
    assert_eq!(ask(&mut s, "OPV 1"), "OPV,01,Rejected not enabled");
    assert_eq!(ask(&mut s, "VST"), "VST,EEEDDDDDDDD");
}

#[test]
fn halt_is_one_way() {
    let mut s = session();
    assert_eq!(ask(&mut s, "HLT"), "HLT,Halted");
    assert_eq!(ask(&mut s, "HLT"), "HLT,Already halted");
    assert_eq!(ask(&mut s, "OPV 1"), "OPV,01,Rejected only allowed when running");
    assert_eq!(ask(&mut s, "CLV 9"), "CLV,09,Rejected only allowed when running");
    // Range is still checked first
    assert_eq!(ask(&mut s, "OPV 0"), "OPV,00,Too Low");
}

#[test]
fn gas_catalogue_queries() {
    let mut s = session();
    assert_eq!(ask(&mut s, "GNA"), "GNA,15");

    let matrix = ask(&mut s, "GMM");
    let fields: Vec<&str> = matrix.split(',').collect();
    assert_eq!(fields[0], "GMM");
    assert_eq!(fields[1], "15");
    assert_eq!(fields.len(), 17);
    // UNKNOWN only mixes with itself
    assert_eq!(fields[2], "YNNNNNNNNNNNNNN");
    // OXYGEN row
    assert_eq!(fields[12], "NYYYYYYNYNYNNYY");
}

#[test]
fn mixing_matrix_is_symmetric() {
    let mut s = session();
    let matrix = ask(&mut s, "GMM");
    let rows: Vec<Vec<char>> = matrix
        .split(',')
        .skip(2)
        .map(|row| row.chars().collect())
        .collect();
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(row[i], 'Y');
        for (j, cell) in row.iter().enumerate() {
            assert_eq!(*cell, rows[j][i]);
        }
    }
}

#[test]
fn mixing_check() {
    let mut s = session();
    assert_eq!(ask(&mut s, "GMC 9 10"), "GMC,009,HYDROGEN,010,OXYGEN,FORBIDDEN");
    assert_eq!(ask(&mut s, "GMC 3 9"), "GMC,003,ARGON,009,HYDROGEN,ALLOWED");
    assert_eq!(ask(&mut s, "GMC 15 3"), "GMC,015,Too High");
    assert_eq!(ask(&mut s, "GMC -1 99"), "GMC,-01,Too Low");
    assert_eq!(ask(&mut s, "GMC 3 99"), "GMC,099,Too High");
    // Missing arguments read as gas 0
    assert_eq!(ask(&mut s, "GMC"), "GMC,000,UNKNOWN,000,UNKNOWN,ALLOWED");
}

#[test]
fn status_line() {
    let mut s = session();
    assert_eq!(ask(&mut s, "STS"), "STS,RUNNING,ACTIVE,000100.00,000060.00,00");
    ask(&mut s, "OPV 3");
    ask(&mut s, "HLT");
    assert_eq!(ask(&mut s, "STS"), "STS,RUNNING,HALTED,000100.00,000060.00,01");
}

#[test]
fn sensor_replies() {
    let mut s = session();
    assert_eq!(ask(&mut s, "PTS"), "PTS,RRRR,RRRRRRRRR");
    assert_eq!(
        ask(&mut s, "PMV"),
        "PMV,000060.00,000060.00,000060.00,000060.00"
    );
    s.rig_mut().set_temperature(0, -5.0).unwrap();
    s.rig_mut()
        .fail_sensor(vr_controls::SensorRef::pressure(1))
        .unwrap();
    s.rig_mut()
        .disable_sensor(vr_controls::SensorRef::temperature(8))
        .unwrap();
    assert_eq!(ask(&mut s, "PTS"), "PTS,RNRR,LRRRRRRRD");
    assert!(ask(&mut s, "TMV").starts_with("TMV,-00005.00,000020.00,"));
}

#[test]
fn unknown_commands_fall_back() {
    let mut s = session();
    assert_eq!(ask(&mut s, "XYZ 1 2"), UNRECOGNISED);
    assert_eq!(ask(&mut s, "bcs 1"), UNRECOGNISED);
    assert_eq!(s.handle_line(""), None);
    // Still serving afterwards
    assert_eq!(ask(&mut s, "GNA"), "GNA,15");
}

proptest! {
    #[test]
    fn arbitrary_lines_never_panic(line in "\\PC{0,40}") {
        let mut s = session();
        let _ = s.handle_line(&line);
        prop_assert_eq!(ask(&mut s, "GNA"), "GNA,15");
    }

    #[test]
    fn arbitrary_arguments_never_panic(
        cmd in prop::sample::select(vec!["BCS", "OPV", "CLV", "GMC", "HLT", "VST", "STS"]),
        a in any::<i64>(),
        b in "\\PC{0,12}",
    ) {
        let mut s = session();
        let reply = ask(&mut s, &format!("{cmd} {a} {b}"));
        prop_assert!(reply.starts_with(cmd));
    }
}
