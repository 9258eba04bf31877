/// One draw command of a rebuilt route path. The renderer consumes
/// these and nothing else; it never inspects chain structure itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo {
        to: (f32, f32),
    },
    LineTo {
        to: (f32, f32),
    },
    QuadTo {
        ctrl: (f32, f32),
        to: (f32, f32),
    },
    CubicTo {
        ctrl1: (f32, f32),
        ctrl2: (f32, f32),
        to: (f32, f32),
    },
}

impl PathCommand {
    /// The on-curve point this command ends at. Control points are not
    /// on the curve and are not reported here.
    pub fn endpoint(&self) -> (f32, f32) {
        match *self {
            PathCommand::MoveTo { to }
            | PathCommand::LineTo { to }
            | PathCommand::QuadTo { to, .. }
            | PathCommand::CubicTo { to, .. } => to,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoutePath {
    pub commands: Vec<PathCommand>,
}

impl RoutePath {
    /// An empty path, the fail-closed output when a waypoint cannot be
    /// resolved.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Every point the path passes through, in draw order.
    pub fn on_curve_points(&self) -> Vec<(f32, f32)> {
        self.commands.iter().map(PathCommand::endpoint).collect()
    }
}
