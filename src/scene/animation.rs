/// Ping-pongs the red channel of a color between roughly `0.0` and `1.0`.
///
/// The value is read first and advanced afterwards, so the first frame sees `0.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorAnimation {
    base: [f32; 4],
    value: f32,
    increment: f32,
}

/// The amount the red channel moves per frame.
pub const COLOR_STEP: f32 = 0.05;

impl ColorAnimation {
    /// Animates the red channel of `base`, leaving the other channels as they are.
    pub fn new(base: [f32; 4]) -> Self {
        ColorAnimation {
            base,
            value: 0.0,
            increment: COLOR_STEP,
        }
    }

    /// The color of the current frame.
    #[inline]
    pub fn color(&self) -> [f32; 4] {
        [self.value, self.base[1], self.base[2], self.base[3]]
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn increment(&self) -> f32 {
        self.increment
    }

    /// Moves on to the next frame. The direction flips once the value left `[0, 1]`.
    pub fn advance(&mut self) {
        if self.value > 1.0 {
            self.increment = -COLOR_STEP;
        } else if self.value < 0.0 {
            self.increment = COLOR_STEP;
        }

        self.value += self.increment;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let mut v = ColorAnimation::new([0.5, 0.3, 0.8, 1.0]);
        assert_eq!(v.color(), [0.0, 0.3, 0.8, 1.0]);

        v.advance();
        assert!((v.value() - 0.05).abs() < 1e-6);
        assert_eq!(v.increment(), COLOR_STEP);
    }

    #[test]
    fn ping_pong() {
        let mut v = ColorAnimation::new([0.0, 0.3, 0.8, 1.0]);
        let mut max = 0.0f32;
        let mut min = 0.0f32;
        let mut flips = 0;
        let mut last = v.increment();

        for _ in 0..200 {
            v.advance();
            max = max.max(v.value());
            min = min.min(v.value());
            if v.increment() != last {
                flips += 1;
                last = v.increment();
            }
        }

        assert!(flips >= 4);
        assert!(max > 1.0 && max < 1.0 + 2.0 * COLOR_STEP);
        assert!(min < 0.0 && min > -2.0 * COLOR_STEP);
    }

    #[test]
    fn flips_after_overshoot() {
        let mut v = ColorAnimation::new([0.0; 4]);
        while v.value() <= 1.0 {
            v.advance();
            assert_eq!(v.increment(), COLOR_STEP);
        }

        let peak = v.value();
        v.advance();
        assert_eq!(v.increment(), -COLOR_STEP);
        assert!(v.value() < peak);
    }
}
