//! Line-oriented replay scripts for `pinview render`.
//!
//! One command per line, blank lines and `#` comments ignored:
//!
//! ```text
//! zoom 2.0 400 300
//! wheel -120 400 300
//! drag 100 100 150 120
//! focus 3
//! reset
//! resize 1024 768
//! toggle 1
//! remove 2
//! clear
//! ```

use anyhow::{bail, Context, Result};
use pinview_core::{InputEvent, Viewport};
use tracing::{debug, warn};

#[derive(Clone, Debug, PartialEq)]
pub enum ScriptCommand {
    Zoom { delta: f64, x: f64, y: f64 },
    Wheel { delta_y: f64, x: f64, y: f64 },
    Drag { from: (f64, f64), to: (f64, f64) },
    Focus(usize),
    Reset,
    Resize { width: f64, height: f64 },
    Toggle(usize),
    Remove(usize),
    Clear,
}

pub fn parse_script(source: &str) -> Result<Vec<ScriptCommand>> {
    let mut commands = Vec::new();
    for (lineno, raw) in source.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let cmd = parse_line(line).with_context(|| format!("Line {}: '{}'", lineno + 1, raw.trim()))?;
        commands.push(cmd);
    }
    Ok(commands)
}

fn parse_line(line: &str) -> Result<ScriptCommand> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        bail!("Empty command");
    };
    let args: Vec<&str> = words.collect();

    let cmd = match name {
        "zoom" => {
            let [delta, x, y] = floats::<3>(&args)?;
            ScriptCommand::Zoom { delta, x, y }
        }
        "wheel" => {
            let [delta_y, x, y] = floats::<3>(&args)?;
            ScriptCommand::Wheel { delta_y, x, y }
        }
        "drag" => {
            let [x0, y0, x1, y1] = floats::<4>(&args)?;
            ScriptCommand::Drag {
                from: (x0, y0),
                to: (x1, y1),
            }
        }
        "resize" => {
            let [width, height] = floats::<2>(&args)?;
            ScriptCommand::Resize { width, height }
        }
        "focus" => ScriptCommand::Focus(index(&args)?),
        "toggle" => ScriptCommand::Toggle(index(&args)?),
        "remove" => ScriptCommand::Remove(index(&args)?),
        "reset" => {
            no_args(&args)?;
            ScriptCommand::Reset
        }
        "clear" => {
            no_args(&args)?;
            ScriptCommand::Clear
        }
        other => bail!("Unknown command '{other}'"),
    };
    Ok(cmd)
}

fn floats<const N: usize>(args: &[&str]) -> Result<[f64; N]> {
    if args.len() != N {
        bail!("Expected {N} numbers, got {}", args.len());
    }
    let mut out = [0.0; N];
    for (slot, arg) in out.iter_mut().zip(args) {
        *slot = arg
            .parse()
            .with_context(|| format!("Invalid number '{arg}'"))?;
    }
    Ok(out)
}

fn index(args: &[&str]) -> Result<usize> {
    match args {
        [arg] => arg
            .parse()
            .with_context(|| format!("Invalid annotation index '{arg}'")),
        _ => bail!("Expected one annotation index, got {} arguments", args.len()),
    }
}

fn no_args(args: &[&str]) -> Result<()> {
    if !args.is_empty() {
        bail!("Unexpected arguments: {}", args.join(" "));
    }
    Ok(())
}

/// Replay `commands` against `viewport`. Commands naming a missing
/// annotation are skipped with a warning.
pub fn run_script(viewport: &mut Viewport, commands: &[ScriptCommand]) {
    for cmd in commands {
        debug!(?cmd, "Script step");
        match *cmd {
            ScriptCommand::Zoom { delta, x, y } => viewport.zoom(delta, x, y),
            ScriptCommand::Wheel { delta_y, x, y } => {
                viewport.handle_input(&InputEvent::Wheel { delta_y, x, y })
            }
            ScriptCommand::Drag { from, to } => {
                viewport.handle_input(&InputEvent::PointerDown { x: from.0, y: from.1 });
                viewport.handle_input(&InputEvent::PointerMove { x: to.0, y: to.1 });
                viewport.handle_input(&InputEvent::PointerUp);
            }
            ScriptCommand::Focus(index) => {
                if !viewport.focus_on_annotation(index) {
                    warn!(index, "focus: no such annotation");
                }
            }
            ScriptCommand::Reset => viewport.reset_view(),
            ScriptCommand::Resize { width, height } => viewport.update_container_size(width, height),
            ScriptCommand::Toggle(index) => {
                if viewport.toggle_annotation(index).is_none() {
                    warn!(index, "toggle: no such annotation");
                }
            }
            ScriptCommand::Remove(index) => {
                if viewport.remove_annotation(index).is_none() {
                    warn!(index, "remove: no such annotation");
                }
            }
            ScriptCommand::Clear => viewport.clear_annotations(),
        }
    }
}
