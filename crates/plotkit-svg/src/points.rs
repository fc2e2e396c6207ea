//! Point-stream construction from normalized path commands.

use plotkit_core::{
    flatten_cubic, Coordinate, MalformedPathError, PathCommand, PathResult, PlotterPoint,
};

/// Turns normalized commands into pen-up / pen-down points.
///
/// `MoveTo` lifts the pen, `LineTo` draws both of its endpoints and
/// `CubicCurveTo` is flattened at `scale` starting from the current position.
/// Drawing before any `MoveTo` fails with
/// [`MalformedPathError::UndefinedCurrentPosition`], where `offset` is the
/// index of the offending command.
pub fn build_point_stream(commands: &[PathCommand], scale: f64) -> PathResult<Vec<PlotterPoint>> {
    let mut points = Vec::with_capacity(commands.len() * 2);
    let mut current: Option<Coordinate> = None;

    for (index, command) in commands.iter().enumerate() {
        match *command {
            PathCommand::MoveTo(p) => {
                points.push(PlotterPoint::PenUp(p));
            }
            PathCommand::LineTo { from, to } => {
                if current.is_none() {
                    return Err(MalformedPathError::UndefinedCurrentPosition {
                        command: 'L',
                        offset: index,
                    });
                }
                points.push(PlotterPoint::PenDown(from));
                points.push(PlotterPoint::PenDown(to));
            }
            PathCommand::CubicCurveTo { c1, c2, end } => {
                let start = current.ok_or(MalformedPathError::UndefinedCurrentPosition {
                    command: 'C',
                    offset: index,
                })?;
                points.extend(
                    flatten_cubic(start, c1, c2, end, scale)
                        .into_iter()
                        .map(PlotterPoint::PenDown),
                );
            }
        }
        current = Some(command.end_point());
    }

    Ok(points)
}
