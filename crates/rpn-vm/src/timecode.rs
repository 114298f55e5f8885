//! SMPTE-style timecode: hours, minutes, seconds and frames at a frame rate.
//!
//! A non-integral rate (29.97 = 30000/1001) selects drop-frame counting:
//! `ceil(fps) / 15` frame numbers are skipped at the start of every minute
//! except each tenth minute.

use std::fmt;

use crate::fraction::Fraction;

/// A normalized timecode.
#[derive(Clone, Copy, Debug)]
pub struct Timecode {
    pub hour: i64,
    pub minute: i64,
    pub second: i64,
    pub frame: i64,
    rate: Fraction,
}

/// Highest accepted frame rate, in frames per second.
pub const MAX_FRAME_RATE: f64 = 1_000_000.0;

/// Frame counts per unit of wall time for one rate.
struct Counts {
    nominal: i64,
    drop: i64,
    per_minute: i64,
    per_ten_minutes: i64,
    per_hour: i64,
    per_day: i64,
}

impl Counts {
    fn for_rate(rate: &Fraction) -> Option<Self> {
        let fps = rate.to_f64();
        if !fps.is_finite() || fps <= 0.0 || fps > MAX_FRAME_RATE {
            return None;
        }
        let nominal = fps.ceil() as i64;
        let drop = if is_drop_frame(rate) { nominal / 15 } else { 0 };
        let per_minute = nominal.checked_mul(60)?.checked_sub(drop)?;
        let per_ten_minutes = per_minute.checked_mul(10)?.checked_add(drop)?;
        let per_hour = per_ten_minutes.checked_mul(6)?;
        Some(Self {
            nominal,
            drop,
            per_minute,
            per_ten_minutes,
            per_hour,
            per_day: per_hour.checked_mul(24)?,
        })
    }
}

fn is_drop_frame(rate: &Fraction) -> bool {
    let fps = rate.to_f64();
    fps.floor() != fps
}

impl Timecode {
    /// Build from fields, carrying overflow upward and wrapping at 24 hours.
    ///
    /// Returns `None` when `rate` is not a positive frame rate of at most
    /// [`MAX_FRAME_RATE`].
    pub fn from_hmsf(
        hour: i64,
        minute: i64,
        second: i64,
        frame: i64,
        rate: Fraction,
    ) -> Option<Self> {
        let counts = Counts::for_rate(&rate)?;
        let nominal = i128::from(counts.nominal);

        // Carries are summed in i128 so no field combination can overflow.
        let frame = i128::from(frame);
        let second = i128::from(second) + frame.div_euclid(nominal);
        let minute = i128::from(minute) + second.div_euclid(60);
        let hour = i128::from(hour) + minute.div_euclid(60);
        Some(Self {
            hour: narrow(hour.rem_euclid(24)),
            minute: narrow(minute.rem_euclid(60)),
            second: narrow(second.rem_euclid(60)),
            frame: narrow(frame.rem_euclid(nominal)),
            rate,
        })
    }

    /// Build from an absolute frame count (wrapping at 24 hours).
    pub fn from_frames(frames: i64, rate: Fraction) -> Option<Self> {
        let counts = Counts::for_rate(&rate)?;
        let mut rem = frames.rem_euclid(counts.per_day);

        let hour = rem / counts.per_hour;
        rem %= counts.per_hour;

        let minute = if counts.drop > 0 {
            // Step back over the dropped numbers so a minute boundary never
            // lands on a frame that does not exist, then restore them.
            let tens = rem / counts.per_ten_minutes;
            rem %= counts.per_ten_minutes;
            rem -= counts.drop;
            let units = rem / counts.per_minute;
            rem %= counts.per_minute;
            rem += counts.drop;
            tens * 10 + units
        } else {
            let m = rem / counts.per_minute;
            rem %= counts.per_minute;
            m
        };

        Some(Self {
            hour,
            minute,
            second: rem / counts.nominal,
            frame: rem % counts.nominal,
            rate,
        })
    }

    pub fn rate(&self) -> Fraction {
        self.rate
    }

    pub fn is_drop_frame(&self) -> bool {
        is_drop_frame(&self.rate)
    }

    /// Absolute frame count since 00:00:00:00.
    pub fn to_frames(&self) -> i64 {
        let Some(counts) = Counts::for_rate(&self.rate) else {
            return 0;
        };
        // Fields are public, so a host may have set them out of range.
        self.hour
            .wrapping_mul(counts.per_hour)
            .wrapping_add((self.minute / 10).wrapping_mul(counts.per_ten_minutes))
            .wrapping_add((self.minute % 10).wrapping_mul(counts.per_minute))
            .wrapping_add(self.second.wrapping_mul(counts.nominal))
            .wrapping_add(self.frame)
    }

    /// Shift by a signed number of frames.
    pub fn offset(&self, frames: i64) -> Self {
        Self::from_frames(self.to_frames().wrapping_add(frames), self.rate).unwrap_or(*self)
    }
}

/// A field already reduced below its modulus.
fn narrow(field: i128) -> i64 {
    i64::try_from(field).unwrap_or_default()
}

impl PartialEq for Timecode {
    fn eq(&self, other: &Self) -> bool {
        self.hour == other.hour
            && self.minute == other.minute
            && self.second == other.second
            && self.frame == other.frame
            && self.rate == other.rate
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (tag, sep) = if self.is_drop_frame() {
            ("DF", ';')
        } else {
            ("NDF", ':')
        };
        write!(
            f,
            "TC/{tag} {:02}:{:02}:{:02}{sep}{:02} @ {:2.2}",
            self.hour,
            self.minute,
            self.second,
            self.frame,
            self.rate.to_f64()
        )
    }
}
