use circuitry::transforms::WSPoint;
use circuitry::{Circuit, ComponentId, ComponentKind, SimConfig};

fn circuit() -> Circuit {
    Circuit::new(SimConfig {
        snap_to_grid: false,
        ..SimConfig::default()
    })
}

fn place(c: &mut Circuit, kind: ComponentKind, x: f32, y: f32) -> ComponentId {
    c.place_component(kind, WSPoint::new(x, y), 0.0)
}

#[test]
fn and_gate_truth_on_update() {
    let mut c = circuit();
    let and = place(&mut c, ComponentKind::and(), 0.0, 0.0);
    let gate = c.component_mut(and).unwrap();
    gate.set_input_state(0, true);
    gate.set_input_state(1, false);
    gate.update();
    assert!(!gate.output_state(0));
    gate.set_input_state(1, true);
    gate.update();
    assert!(gate.output_state(0));
}

#[test]
fn wired_source_reaches_consumer_after_two_ticks() {
    let mut c = circuit();
    let a = place(&mut c, ComponentKind::source(), 0.0, 0.0);
    let b = place(&mut c, ComponentKind::source(), 0.0, 200.0);
    let and = place(&mut c, ComponentKind::and(), 300.0, 100.0);
    c.connect(a, 0, and, 0).unwrap();
    c.connect(b, 0, and, 1).unwrap();

    c.toggle_source(a);
    c.toggle_source(b);

    // tick 1: wires read the sources before they republish their latches
    c.tick();
    assert!(c.component(a).unwrap().output_state(0));
    let gate = c.component(and).unwrap();
    assert!(!gate.input_state(0) && !gate.input_state(1));
    assert!(!gate.output_state(0));

    // tick 2: the new outputs cross the wires and the gate evaluates them
    c.tick();
    let gate = c.component(and).unwrap();
    assert!(gate.input_state(0) && gate.input_state(1));
    assert!(gate.output_state(0));
}

#[test]
fn chain_settles_through_each_stage() {
    let mut c = circuit();
    let src = place(&mut c, ComponentKind::source(), 0.0, 0.0);
    let n1 = place(&mut c, ComponentKind::not(), 200.0, 0.0);
    let n2 = place(&mut c, ComponentKind::not(), 400.0, 0.0);
    let or = place(&mut c, ComponentKind::or(), 600.0, 0.0);
    c.connect(src, 0, n1, 0).unwrap();
    c.connect(n1, 1, n2, 0).unwrap();
    c.connect(n2, 1, or, 0).unwrap();

    c.toggle_source(src);
    for _ in 0..8 {
        c.tick();
    }
    // src 1 -> not 0 -> not 1 -> or 1
    assert!(!c.component(n1).unwrap().output_state(0));
    assert!(c.component(n2).unwrap().output_state(0));
    assert!(c.component(or).unwrap().output_state(0));
    assert_eq!(c.ticks(), 8);
}

#[test]
fn disconnected_input_keeps_last_value() {
    let mut c = circuit();
    let src = place(&mut c, ComponentKind::source(), 0.0, 0.0);
    let not = place(&mut c, ComponentKind::not(), 200.0, 0.0);
    let w = c.connect(src, 0, not, 0).unwrap();
    c.toggle_source(src);
    c.tick();
    c.tick();
    assert!(c.component(not).unwrap().input_state(0));

    assert!(c.disconnect(w).is_some());
    c.toggle_source(src);
    c.tick();
    c.tick();
    assert!(c.component(not).unwrap().input_state(0));
    assert!(!c.component(not).unwrap().output_state(0));
}
