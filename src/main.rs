//! headless demo: two sources into an AND, into a NOT. toggles the sources and
//! prints every component's state after each tick.
//!
//! usage: circuitry [config.json]

use colored::Colorize;

use circuitry::transforms::WSPoint;
use circuitry::{Circuit, CircuitError, ComponentId, ComponentKind, SimConfig};

fn level(v: bool) -> colored::ColoredString {
    if v {
        "1".green().bold()
    } else {
        "0".red()
    }
}

fn report(circuit: &Circuit, named: &[(&str, ComponentId)]) {
    let line: Vec<String> = named
        .iter()
        .filter_map(|(name, id)| {
            let c = circuit.component(*id)?;
            let ins: String = c.inputs().iter().map(|v| level(*v).to_string()).collect();
            let outs: String = c.outputs().iter().map(|v| level(*v).to_string()).collect();
            Some(format!("{} [{}|{}]", name.cyan(), ins, outs))
        })
        .collect();
    println!(
        "{} {}",
        format!("tick {:>2}", circuit.ticks()).dimmed(),
        line.join("  ")
    );
}

fn run() -> Result<(), CircuitError> {
    let config = match std::env::args().nth(1) {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    let mut circuit = Circuit::new(config);

    let a = circuit.place_component(ComponentKind::source(), WSPoint::new(0.0, 0.0), 0.0);
    let b = circuit.place_component(ComponentKind::source(), WSPoint::new(0.0, 128.0), 0.0);
    let and = circuit.place_component(ComponentKind::and(), WSPoint::new(192.0, 64.0), 0.0);
    let not = circuit.place_component(ComponentKind::not(), WSPoint::new(384.0, 64.0), 0.0);

    for (from, pin_from, to, pin_to) in [(a, 0, and, 0), (b, 0, and, 1), (and, 2, not, 0)] {
        if circuit.connect(from, pin_from, to, pin_to).is_none() {
            if let Err(e) = circuit.check_connection(from, pin_from, to, pin_to) {
                println!("{} {}", "connect refused:".yellow(), e);
            }
        }
    }
    println!(
        "{} {} components, {} wires",
        "built".bold(),
        circuit.components().len(),
        circuit.connections().len()
    );

    let named = [("A", a), ("B", b), ("AND", and), ("NOT", not)];
    let run_ticks = |circuit: &mut Circuit, n: usize| {
        for _ in 0..n {
            circuit.tick();
            report(circuit, &named);
        }
    };

    run_ticks(&mut circuit, 2);
    for id in [a, b] {
        if let Some(latched) = circuit.toggle_source(id) {
            println!("{} {} -> {}", "toggle".magenta(), id, level(latched));
        }
        run_ticks(&mut circuit, 3);
    }
    Ok(())
}

fn main() {
    circuitry::logging::init();
    if let Err(e) = run() {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
