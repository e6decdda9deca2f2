use crate::core::ChartPoint;

/// Second derivatives of the natural cubic spline through `points`.
///
/// `points` must have strictly increasing `x`. Both end second derivatives
/// are zero.
#[must_use]
pub fn natural_spline_second_derivatives(points: &[ChartPoint]) -> Vec<f64> {
    let n = points.len();
    let mut second = vec![0.0; n];
    if n < 3 {
        return second;
    }
    let mut u = vec![0.0; n];
    for i in 1..n - 1 {
        let (prev, curr, next) = (points[i - 1], points[i], points[i + 1]);
        let sig = (curr.x - prev.x) / (next.x - prev.x);
        let p = sig * second[i - 1] + 2.0;
        second[i] = (sig - 1.0) / p;
        let slope_change =
            (next.y - curr.y) / (next.x - curr.x) - (curr.y - prev.y) / (curr.x - prev.x);
        u[i] = (6.0 * slope_change / (next.x - prev.x) - sig * u[i - 1]) / p;
    }
    second[n - 1] = 0.0;
    for k in (0..n - 1).rev() {
        second[k] = second[k] * second[k + 1] + u[k];
    }
    second
}

/// Cubic Bezier control points for the spline piece between `start` and `end`.
///
/// Controls sit one third of the way along the chord, offset by the spline's
/// second derivatives at both ends.
#[must_use]
pub fn bezier_control_points(
    start: ChartPoint,
    end: ChartPoint,
    start_second: f64,
    end_second: f64,
) -> (ChartPoint, ChartPoint) {
    const ONE_THIRD: f64 = 1.0 / 3.0;
    let dx_squared = (end.x - start.x) * (end.x - start.x);
    let first = ChartPoint::new(
        (2.0 * start.x + end.x) * ONE_THIRD,
        ONE_THIRD
            * ((2.0 * start.y + end.y)
                - ONE_THIRD * dx_squared * (start_second + 0.5 * end_second)),
    );
    let second = ChartPoint::new(
        (start.x + 2.0 * end.x) * ONE_THIRD,
        ONE_THIRD
            * ((start.y + 2.0 * end.y)
                - ONE_THIRD * dx_squared * (0.5 * start_second + end_second)),
    );
    (first, second)
}
