use crate::MIN_TIME;

/*
Breakpoint Parameter Automation
===============================

Every voice in this engine is a one-shot: all of its motion (pitch drops,
filter sweeps, amplitude envelopes) is decided at trigger time. ParamCurve is
the single primitive that carries that motion: an initial value plus a list
of time-ordered breakpoints, each saying "reach this value at this time,
along this shape".

Shapes
------

  step          Hold the previous value, jump at the breakpoint time.
                Used to anchor a level before a later ramp.

  linear        Straight line from the previous breakpoint. Used for
                attack ramps, which must leave zero cleanly.

  exponential   v(t) = v0 * (v1/v0)^((t-t0)/(t1-t0))
                Constant-ratio decay, the natural shape of ringing and
                dying sounds. Undefined across zero, so decays land on a
                small floor (0.001) instead of 0.

Evaluation is stateless: `value_at(t)` can be asked for any time in any
order, which keeps nodes trivially restartable and block-size agnostic.
Times are seconds from the owning voice's start; the renderer places the
voice, so curves never see absolute time.

After the final breakpoint the curve holds its last value forever. The end
of the *sound* is a separate concern: source nodes carry an explicit stop
time slightly past their last breakpoint.
*/

#[derive(Clone, Copy, Debug, PartialEq)]
enum Shape {
    Step,
    Linear,
    Exponential,
}

#[derive(Clone, Copy, Debug)]
struct Breakpoint {
    time: f32,
    value: f32,
    shape: Shape,
}

/// A time-ordered breakpoint automation curve.
#[derive(Clone, Debug)]
pub struct ParamCurve {
    initial: f32,
    points: Vec<Breakpoint>,
}

impl ParamCurve {
    /// Start a curve holding `initial` from time zero.
    pub fn at(initial: f32) -> Self {
        Self {
            initial,
            points: Vec::new(),
        }
    }

    /// A curve that never moves.
    pub fn fixed(value: f32) -> Self {
        Self::at(value)
    }

    fn push(mut self, time: f32, value: f32, shape: Shape) -> Self {
        debug_assert!(
            self.points.last().map_or(true, |p| time >= p.time),
            "breakpoints must be appended in time order"
        );
        self.points.push(Breakpoint { time, value, shape });
        self
    }

    /// Hold the previous value, then jump to `value` at `time`.
    pub fn set_at(self, value: f32, time: f32) -> Self {
        self.push(time, value, Shape::Step)
    }

    /// Ramp linearly from the previous breakpoint to `value` at `time`.
    pub fn linear_to(self, value: f32, time: f32) -> Self {
        self.push(time, value, Shape::Linear)
    }

    /// Ramp exponentially from the previous breakpoint to `value` at `time`.
    ///
    /// Exponential ramps are only defined between same-signed nonzero
    /// endpoints; anything else degrades to a linear segment.
    pub fn exp_to(self, value: f32, time: f32) -> Self {
        self.push(time, value, Shape::Exponential)
    }

    /// Time of the last breakpoint (0.0 for a fixed curve).
    pub fn end_time(&self) -> f32 {
        self.points.last().map_or(0.0, |p| p.time)
    }

    /// Evaluate the curve at `t` seconds.
    pub fn value_at(&self, t: f32) -> f32 {
        let mut prev_time = 0.0f32;
        let mut prev_value = self.initial;

        for point in &self.points {
            if t < point.time {
                let span = point.time - prev_time;
                if span <= MIN_TIME {
                    return point.value;
                }
                let frac = ((t - prev_time) / span).clamp(0.0, 1.0);
                return match point.shape {
                    Shape::Step => prev_value,
                    Shape::Linear => prev_value + (point.value - prev_value) * frac,
                    Shape::Exponential => {
                        if prev_value <= 0.0 || point.value <= 0.0 {
                            prev_value + (point.value - prev_value) * frac
                        } else {
                            prev_value * (point.value / prev_value).powf(frac)
                        }
                    }
                };
            }
            prev_time = point.time;
            prev_value = point.value;
        }

        prev_value
    }
}
