use std::io::Write;
use std::sync::Arc;

use async_std::task::block_on;
use bankpad_core::bank::BankSelection;
use bankpad_core::engine::{EngineOp, EngineSettings, TestEngine};
use bankpad_core::error::SessionError;
use bankpad_core::session::SessionController;
use bankpad_types::{LoadState, Pitch, SessionHandle, View};

fn setup() -> (Arc<TestEngine>, SessionController) {
    let engine = Arc::new(TestEngine::new());
    let controller = SessionController::new(engine.clone(), EngineSettings::default());
    (engine, controller)
}

fn mock_bank_file(len: usize) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".sf2").tempfile().unwrap();
    file.write_all(&vec![0xA5; len]).unwrap();
    file
}

#[test]
fn test_load_scenario_press_and_release() {
    let (engine, mut controller) = setup();
    let file = mock_bank_file(1000);

    // Nothing visible before the load.
    assert_eq!(controller.view(), View::NotLoaded);
    assert!(controller.controls().is_empty());

    let pending = controller
        .begin_load(Some(BankSelection::Path(file.path().to_path_buf())))
        .unwrap();
    assert_eq!(controller.view(), View::NotLoaded);
    let handle = controller.finish_load(block_on(pending.run())).unwrap();

    let h1 = SessionHandle::new(1);
    assert_eq!(handle, h1);
    assert_eq!(engine.operations(), vec![EngineOp::Load { len: 1000 }]);
    assert_eq!(controller.state(), LoadState::Loaded { handle: h1 });
    assert_eq!(controller.view(), View::Loaded);

    let controls = controller.controls();
    assert_eq!(controls.len(), 12);

    // Control 0 and 11 are bound to the ends of the octave.
    controls[0].press();
    controls[11].press();
    assert_eq!(
        engine.notes_started(),
        vec![(h1, Pitch::new(60)), (h1, Pitch::new(71))]
    );
    engine.clear();

    controls[3].press();
    assert_eq!(
        engine.operations(),
        vec![EngineOp::NoteOn {
            handle: h1,
            pitch: Pitch::new(63),
        }]
    );
    controls[3].release();
    assert_eq!(
        engine.operations(),
        vec![
            EngineOp::NoteOn {
                handle: h1,
                pitch: Pitch::new(63),
            },
            EngineOp::NoteOff {
                handle: h1,
                pitch: Pitch::new(63),
            },
        ]
    );
}

#[test]
fn test_controls_follow_pitch_table_order() {
    let (engine, mut controller) = setup();
    let pending = controller
        .begin_load(Some(BankSelection::Memory {
            name: "mem.sf2".to_string(),
            bytes: vec![1; 64],
        }))
        .unwrap();
    let handle = controller.finish_load(block_on(pending.run())).unwrap();

    let labels: Vec<&str> = controller.controls().iter().map(|c| c.label()).collect();
    assert_eq!(
        labels,
        ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "H"]
    );

    for control in controller.controls() {
        control.press();
        control.release();
    }
    let expected: Vec<(SessionHandle, Pitch)> =
        (60..72).map(|k| (handle, Pitch::new(k))).collect();
    assert_eq!(engine.notes_started(), expected);
    assert_eq!(engine.notes_stopped(), expected);
}

#[test]
fn test_press_on_c_sends_one_note_on() {
    let (engine, mut controller) = setup();
    let pending = controller
        .begin_load(Some(BankSelection::Memory {
            name: "mem.sf2".to_string(),
            bytes: vec![1; 8],
        }))
        .unwrap();
    let handle = controller.finish_load(block_on(pending.run())).unwrap();
    engine.clear();

    let c = controller
        .controls()
        .iter()
        .find(|c| c.label() == "C")
        .unwrap();
    c.press();
    assert_eq!(engine.operations().len(), 1);
    c.release();
    assert_eq!(
        engine.operations(),
        vec![
            EngineOp::NoteOn {
                handle,
                pitch: Pitch::new(60),
            },
            EngineOp::NoteOff {
                handle,
                pitch: Pitch::new(60),
            },
        ]
    );
}

#[test]
fn test_engine_rejection_leaves_no_controls() {
    let (engine, mut controller) = setup();
    engine.reject_next_load("malformed bank");
    let file = mock_bank_file(1000);

    let pending = controller
        .begin_load(Some(BankSelection::Path(file.path().to_path_buf())))
        .unwrap();
    let err = controller.finish_load(block_on(pending.run())).unwrap_err();

    match err {
        SessionError::Engine(e) => assert_eq!(e.to_string(), "malformed bank"),
        other => panic!("Expected Engine error, got {:?}", other),
    }
    assert_eq!(controller.state(), LoadState::NotLoaded);
    assert_eq!(controller.view(), View::NotLoaded);
    assert_eq!(controller.controls().len(), 0);
}

#[test]
fn test_unreadable_file_keeps_not_loaded() {
    let (engine, mut controller) = setup();
    let dir = tempfile::tempdir().unwrap();

    let pending = controller
        .begin_load(Some(BankSelection::Path(dir.path().join("gone.sf2"))))
        .unwrap();
    let err = controller.finish_load(block_on(pending.run())).unwrap_err();

    assert!(err.is_read_failure());
    assert_eq!(controller.state(), LoadState::NotLoaded);
    assert!(engine.operations().is_empty());
}
