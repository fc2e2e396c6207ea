//! SVG path data normalization.
//!
//! Parses the full SVG path grammar and reduces it to three absolute command
//! kinds: [`PathCommand::MoveTo`], [`PathCommand::LineTo`] and
//! [`PathCommand::CubicCurveTo`].
//!
//! - relative coordinates are accumulated from the current position
//! - `H`, `V` and `Z` become lines; `Z` only when it actually moves the pen
//! - `Q`, `T` and `S` become cubics (degree elevation / control reflection)
//! - `A` becomes one cubic per quarter turn, or a line for zero radii

use lyon::geom::{point, vector, Angle, ArcFlags, QuadraticBezierSegment, SvgArc};
use plotkit_core::{Coordinate, MalformedPathError, PathCommand, PathResult};

/// Parses and normalizes SVG path data.
///
/// Empty or whitespace-only data yields an empty command list.
pub fn sanitize(data: &str) -> PathResult<Vec<PathCommand>> {
    let mut cursor = PathCursor::new(data);
    let mut state = PenState::default();
    let mut commands = Vec::new();
    let mut previous: Option<char> = None;

    cursor.skip_wsp_comma();
    while let Some(c) = cursor.peek() {
        let offset = cursor.pos;
        let command = if c.is_ascii_alphabetic() {
            cursor.advance();
            c
        } else if starts_number(c) {
            match previous {
                Some('M') => 'L',
                Some('m') => 'l',
                Some(p) if !matches!(p, 'Z' | 'z') => p,
                _ => return Err(MalformedPathError::UnrecognizedCommand { command: c, offset }),
            }
        } else {
            return Err(MalformedPathError::UnrecognizedCommand { command: c, offset });
        };

        cursor.skip_wsp_comma();
        let ctx = CommandContext { command, offset };
        state.apply(ctx, &mut cursor, &mut commands)?;
        previous = Some(command);
    }

    Ok(commands)
}

/// Command letter and position, carried for error reporting.
#[derive(Debug, Clone, Copy)]
struct CommandContext {
    command: char,
    offset: usize,
}

impl CommandContext {
    fn relative(&self) -> bool {
        self.command.is_ascii_lowercase()
    }

    fn missing(&self) -> MalformedPathError {
        MalformedPathError::MissingArguments {
            command: self.command,
            offset: self.offset,
        }
    }

    fn no_position(&self) -> MalformedPathError {
        MalformedPathError::UndefinedCurrentPosition {
            command: self.command,
            offset: self.offset,
        }
    }

    fn finite(&self, p: Coordinate) -> PathResult<Coordinate> {
        if p.is_finite() {
            Ok(p)
        } else {
            Err(MalformedPathError::NonFiniteCoordinate {
                command: self.command,
                offset: self.offset,
            })
        }
    }
}

/// Pen position threaded through a single parse.
#[derive(Debug, Default)]
struct PenState {
    current: Option<Coordinate>,
    subpath_start: Option<Coordinate>,
    /// Second control point of the previous `C`/`S`, for `S` reflection.
    last_cubic_ctrl: Option<Coordinate>,
    /// Control point of the previous `Q`/`T`, for `T` reflection.
    last_quad_ctrl: Option<Coordinate>,
}

impl PenState {
    fn apply(
        &mut self,
        ctx: CommandContext,
        cursor: &mut PathCursor<'_>,
        out: &mut Vec<PathCommand>,
    ) -> PathResult<()> {
        let mut cubic_ctrl = None;
        let mut quad_ctrl = None;

        match ctx.command.to_ascii_uppercase() {
            'M' => {
                // A leading relative move is relative to the origin.
                let base = self.current.unwrap_or_default();
                let p = ctx.finite(self.resolve(ctx, base, cursor.read_pair(ctx)?))?;
                out.push(PathCommand::MoveTo(p));
                self.current = Some(p);
                self.subpath_start = Some(p);
                self.last_cubic_ctrl = None;
                self.last_quad_ctrl = None;
                return Ok(());
            }
            'L' => {
                let current = self.position(ctx)?;
                let to = ctx.finite(self.resolve(ctx, current, cursor.read_pair(ctx)?))?;
                out.push(PathCommand::LineTo { from: current, to });
            }
            'H' => {
                let current = self.position(ctx)?;
                let x = cursor.read_number(ctx)?;
                let x = if ctx.relative() { current.x + x } else { x };
                let to = ctx.finite(Coordinate::new(x, current.y))?;
                out.push(PathCommand::LineTo { from: current, to });
            }
            'V' => {
                let current = self.position(ctx)?;
                let y = cursor.read_number(ctx)?;
                let y = if ctx.relative() { current.y + y } else { y };
                let to = ctx.finite(Coordinate::new(current.x, y))?;
                out.push(PathCommand::LineTo { from: current, to });
            }
            'C' => {
                let current = self.position(ctx)?;
                let c1 = ctx.finite(self.resolve(ctx, current, cursor.read_pair(ctx)?))?;
                let c2 = ctx.finite(self.resolve(ctx, current, cursor.read_pair(ctx)?))?;
                let end = ctx.finite(self.resolve(ctx, current, cursor.read_pair(ctx)?))?;
                out.push(PathCommand::CubicCurveTo { c1, c2, end });
                cubic_ctrl = Some(c2);
            }
            'S' => {
                let current = self.position(ctx)?;
                let c1 = self
                    .last_cubic_ctrl
                    .map_or(current, |ctrl| reflect(ctrl, current));
                let c2 = ctx.finite(self.resolve(ctx, current, cursor.read_pair(ctx)?))?;
                let end = ctx.finite(self.resolve(ctx, current, cursor.read_pair(ctx)?))?;
                out.push(PathCommand::CubicCurveTo { c1, c2, end });
                cubic_ctrl = Some(c2);
            }
            'Q' => {
                let current = self.position(ctx)?;
                let ctrl = ctx.finite(self.resolve(ctx, current, cursor.read_pair(ctx)?))?;
                let end = ctx.finite(self.resolve(ctx, current, cursor.read_pair(ctx)?))?;
                out.push(quadratic_to_cubic(current, ctrl, end));
                quad_ctrl = Some(ctrl);
            }
            'T' => {
                let current = self.position(ctx)?;
                let ctrl = self
                    .last_quad_ctrl
                    .map_or(current, |ctrl| reflect(ctrl, current));
                let end = ctx.finite(self.resolve(ctx, current, cursor.read_pair(ctx)?))?;
                out.push(quadratic_to_cubic(current, ctrl, end));
                quad_ctrl = Some(ctrl);
            }
            'A' => {
                let current = self.position(ctx)?;
                let rx = cursor.read_number(ctx)?;
                let ry = cursor.read_number(ctx)?;
                let rotation = cursor.read_number(ctx)?;
                let large_arc = cursor.read_flag(ctx)?;
                let sweep = cursor.read_flag(ctx)?;
                let end = ctx.finite(self.resolve(ctx, current, cursor.read_pair(ctx)?))?;
                if !(rx.is_finite() && ry.is_finite() && rotation.is_finite()) {
                    return Err(MalformedPathError::NonFiniteCoordinate {
                        command: ctx.command,
                        offset: ctx.offset,
                    });
                }
                arc_to_commands(current, end, rx, ry, rotation, large_arc, sweep, out);
            }
            'Z' => {
                let current = self.position(ctx)?;
                let start = self.subpath_start.unwrap_or(current);
                if start != current {
                    out.push(PathCommand::LineTo {
                        from: current,
                        to: start,
                    });
                }
                self.current = Some(start);
                self.last_cubic_ctrl = None;
                self.last_quad_ctrl = None;
                return Ok(());
            }
            _ => {
                return Err(MalformedPathError::UnrecognizedCommand {
                    command: ctx.command,
                    offset: ctx.offset,
                })
            }
        }

        self.current = out.last().map(PathCommand::end_point).or(self.current);
        self.last_cubic_ctrl = cubic_ctrl;
        self.last_quad_ctrl = quad_ctrl;
        Ok(())
    }

    fn position(&self, ctx: CommandContext) -> PathResult<Coordinate> {
        self.current.ok_or_else(|| ctx.no_position())
    }

    fn resolve(&self, ctx: CommandContext, base: Coordinate, (x, y): (f64, f64)) -> Coordinate {
        if ctx.relative() {
            Coordinate::new(base.x + x, base.y + y)
        } else {
            Coordinate::new(x, y)
        }
    }
}

fn reflect(p: Coordinate, around: Coordinate) -> Coordinate {
    Coordinate::new(2.0 * around.x - p.x, 2.0 * around.y - p.y)
}

fn to_coordinate(p: lyon::geom::Point<f64>) -> Coordinate {
    Coordinate::new(p.x, p.y)
}

fn quadratic_to_cubic(from: Coordinate, ctrl: Coordinate, to: Coordinate) -> PathCommand {
    let cubic = QuadraticBezierSegment {
        from: point(from.x, from.y),
        ctrl: point(ctrl.x, ctrl.y),
        to: point(to.x, to.y),
    }
    .to_cubic();

    PathCommand::CubicCurveTo {
        c1: to_coordinate(cubic.ctrl1),
        c2: to_coordinate(cubic.ctrl2),
        end: to,
    }
}

#[allow(clippy::too_many_arguments)]
fn arc_to_commands(
    from: Coordinate,
    to: Coordinate,
    rx: f64,
    ry: f64,
    rotation: f64,
    large_arc: bool,
    sweep: bool,
    out: &mut Vec<PathCommand>,
) {
    // An arc onto its own start point draws nothing.
    if from == to {
        return;
    }

    let arc = SvgArc {
        from: point(from.x, from.y),
        to: point(to.x, to.y),
        radii: vector(rx.abs(), ry.abs()),
        x_rotation: Angle::degrees(rotation),
        flags: ArcFlags { large_arc, sweep },
    };

    if rx == 0.0 || ry == 0.0 || arc.is_straight_line() {
        out.push(PathCommand::LineTo { from, to });
        return;
    }

    let first = out.len();
    arc.to_arc().for_each_cubic_bezier(&mut |segment| {
        out.push(PathCommand::CubicCurveTo {
            c1: to_coordinate(segment.ctrl1),
            c2: to_coordinate(segment.ctrl2),
            end: to_coordinate(segment.to),
        });
    });

    // Pin the final endpoint so rounding in the arc math cannot open a gap.
    let emitted = out.len() > first;
    match out.last_mut() {
        Some(PathCommand::CubicCurveTo { end, .. }) if emitted => *end = to,
        _ => out.push(PathCommand::LineTo { from, to }),
    }
}

fn starts_number(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '-' | '+' | '.')
}

/// Byte cursor over path data.
struct PathCursor<'a> {
    data: &'a str,
    pos: usize,
}

impl<'a> PathCursor<'a> {
    fn new(data: &'a str) -> Self {
        Self { data, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.data[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.advance();
        }
    }

    fn skip_wsp_comma(&mut self) {
        self.skip_whitespace();
        if self.peek() == Some(',') {
            self.advance();
            self.skip_whitespace();
        }
    }

    fn skip_digits(&mut self) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        self.pos - start
    }

    /// Reads one number, e.g. `-1.5e3`, `.5` or `+2.`.
    fn read_number(&mut self, ctx: CommandContext) -> PathResult<f64> {
        match self.peek() {
            None => return Err(ctx.missing()),
            Some(c) if c.is_ascii_alphabetic() => return Err(ctx.missing()),
            _ => {}
        }

        let start = self.pos;
        if matches!(self.peek(), Some('-' | '+')) {
            self.advance();
        }
        let mut digits = self.skip_digits();
        if self.peek() == Some('.') {
            self.advance();
            digits += self.skip_digits();
        }
        if digits == 0 {
            return Err(MalformedPathError::InvalidNumber { offset: start });
        }

        // Only consume an exponent that is actually followed by digits.
        if matches!(self.peek(), Some('e' | 'E')) {
            let mark = self.pos;
            self.advance();
            if matches!(self.peek(), Some('-' | '+')) {
                self.advance();
            }
            if self.skip_digits() == 0 {
                self.pos = mark;
            }
        }

        let value = self.data[start..self.pos]
            .parse::<f64>()
            .map_err(|_| MalformedPathError::InvalidNumber { offset: start })?;
        self.skip_wsp_comma();
        Ok(value)
    }

    fn read_pair(&mut self, ctx: CommandContext) -> PathResult<(f64, f64)> {
        let x = self.read_number(ctx)?;
        let y = self.read_number(ctx)?;
        Ok((x, y))
    }

    /// Arc flags may be written without separators, as in `a1 1 0 011 1`.
    fn read_flag(&mut self, ctx: CommandContext) -> PathResult<bool> {
        let flag = match self.peek() {
            None => return Err(ctx.missing()),
            Some('0') => false,
            Some('1') => true,
            Some(c) if c.is_ascii_alphabetic() => return Err(ctx.missing()),
            Some(_) => return Err(MalformedPathError::InvalidNumber { offset: self.pos }),
        };
        self.advance();
        self.skip_wsp_comma();
        Ok(flag)
    }
}
