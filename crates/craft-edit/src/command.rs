use crate::shapes;
use crate::{BlockEditor, Selection};

/// Axis a flat circle is drawn across.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// A parsed chat-line command. Anything unrecognised is `Talk`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    View(i32),
    Copy,
    Paste,
    Tree,
    Array { xc: i32, yc: i32, zc: i32 },
    Cube { fill: bool },
    Sphere { radius: i32, fill: bool },
    Circle { axis: Axis, radius: i32, fill: bool },
    Cylinder { radius: i32, fill: bool },
    Talk(String),
}

fn int_args(rest: &str) -> Vec<i32> {
    rest.split_whitespace().map_while(|t| t.parse().ok()).collect()
}

impl Command {
    pub fn parse(line: &str) -> Command {
        let line = line.trim_end();
        let (name, rest) = line.split_once(' ').unwrap_or((line, ""));
        let args = int_args(rest);
        let first = args.first().copied();
        let (fill, shape) = match name.strip_prefix("/f") {
            Some(s) if matches!(s, "sphere" | "circlex" | "circley" | "circlez" | "cylinder") => (true, s),
            _ => (false, name.strip_prefix('/').unwrap_or("")),
        };
        let parsed = match (shape, first) {
            ("view", Some(r)) => Some(Command::View(r)),
            ("copy", _) if rest.is_empty() => Some(Command::Copy),
            ("paste", _) if rest.is_empty() => Some(Command::Paste),
            ("tree", _) if rest.is_empty() => Some(Command::Tree),
            ("array", Some(n)) => Some(match args[..] {
                [xc, yc, zc, ..] => Command::Array { xc, yc, zc },
                _ => Command::Array { xc: n, yc: n, zc: n },
            }),
            ("cube", _) if rest.is_empty() => Some(Command::Cube { fill: false }),
            ("fcube", _) if rest.is_empty() => Some(Command::Cube { fill: true }),
            ("sphere", Some(radius)) => Some(Command::Sphere { radius, fill }),
            ("circlex", Some(radius)) => Some(Command::Circle { axis: Axis::X, radius, fill }),
            ("circley", Some(radius)) => Some(Command::Circle { axis: Axis::Y, radius, fill }),
            ("circlez", Some(radius)) => Some(Command::Circle { axis: Axis::Z, radius, fill }),
            ("cylinder", Some(radius)) => Some(Command::Cylinder { radius, fill }),
            _ => None,
        };
        parsed.unwrap_or_else(|| Command::Talk(line.to_string()))
    }

    /// Runs a builder command against `sel`. Returns false for commands the
    /// editor doesn't own (`View`, `Talk`).
    pub fn apply(&self, ed: &mut dyn BlockEditor, sel: &mut Selection) -> bool {
        log::debug!(target: "edit", "command {self:?}");
        match *self {
            Command::Copy => sel.copy(),
            Command::Paste => shapes::paste(ed, sel),
            Command::Tree => shapes::tree(ed, &sel.block0),
            Command::Array { xc, yc, zc } => shapes::array(ed, &sel.block1, &sel.block0, xc, yc, zc),
            Command::Cube { fill } => shapes::cube(ed, &sel.block0, &sel.block1, fill),
            Command::Sphere { radius, fill } => shapes::sphere(ed, &sel.block0, radius, fill, false, false, false),
            Command::Circle { axis, radius, fill } => shapes::sphere(
                ed,
                &sel.block0,
                radius,
                fill,
                axis == Axis::X,
                axis == Axis::Y,
                axis == Axis::Z,
            ),
            Command::Cylinder { radius, fill } => shapes::cylinder(ed, &sel.block0, &sel.block1, radius, fill),
            Command::View(_) | Command::Talk(_) => return false,
        }
        true
    }
}
