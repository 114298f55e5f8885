//! Timecode words.
//!
//! The frame rate is a Fraction pushed before the counts: `rate frames ->TC`
//! or `rate h m s f ->TC`. Arithmetic goes through absolute frame counts.

use rpn_lang::{Fraction, Interp, Timecode, ValueKind, WordError, WordResult};

use crate::{kinds, word};

fn invalid_rate(rate: Fraction) -> WordError {
    WordError::eval(format!("invalid frame rate {rate}"))
}

fn at_frame(frames: i64, rate: Fraction) -> Result<Timecode, WordError> {
    Timecode::from_frames(frames, rate).ok_or_else(|| invalid_rate(rate))
}

pub fn register(interp: &mut Interp) -> WordResult {
    use ValueKind::{Fraction as F, Integer, Timecode as T};

    interp.register(
        "->TC",
        word(&kinds(&[Integer, F]), |i| {
            let frames = i.stack.pop_integer()?;
            let rate = i.stack.pop_fraction()?;
            Ok(i.stack.push_timecode(at_frame(frames, rate)?)?)
        }),
    );
    interp.register(
        "->TC",
        word(&kinds(&[Integer, Integer, Integer, Integer, F]), |i| {
            let frame = i.stack.pop_integer()?;
            let second = i.stack.pop_integer()?;
            let minute = i.stack.pop_integer()?;
            let hour = i.stack.pop_integer()?;
            let rate = i.stack.pop_fraction()?;
            let tc = Timecode::from_hmsf(hour, minute, second, frame, rate)
                .ok_or_else(|| invalid_rate(rate))?;
            Ok(i.stack.push_timecode(tc)?)
        }),
    );

    let one = kinds(&[T]);
    interp.register(
        "FR",
        word(&one, |i| {
            let tc = i.stack.pop_timecode()?;
            Ok(i.stack.push_fraction(tc.rate())?)
        }),
    );
    interp.register(
        "->FRAMES",
        word(&one, |i| {
            let tc = i.stack.pop_timecode()?;
            Ok(i.stack.push_integer(tc.to_frames())?)
        }),
    );
    interp.register(
        "OBJ->",
        word(&one, |i| {
            let tc = i.stack.pop_timecode()?;
            i.stack.push_fraction(tc.rate())?;
            for field in [tc.hour, tc.minute, tc.second, tc.frame] {
                i.stack.push_integer(field)?;
            }
            Ok(())
        }),
    );

    let signs: [(&str, i64); 2] = [("+", 1), ("-", -1)];
    for (name, sign) in signs {
        interp.register(
            name,
            word(&kinds(&[T, T]), move |i| {
                let b = i.stack.pop_timecode()?;
                let a = i.stack.pop_timecode()?;
                let frames = a.to_frames().wrapping_add(sign.wrapping_mul(b.to_frames()));
                Ok(i.stack.push_timecode(at_frame(frames, a.rate())?)?)
            }),
        );
        // tc n +
        interp.register(
            name,
            word(&kinds(&[Integer, T]), move |i| {
                let n = i.stack.pop_integer()?;
                let tc = i.stack.pop_timecode()?;
                let frames = tc.to_frames().wrapping_add(sign.wrapping_mul(n));
                Ok(i.stack.push_timecode(at_frame(frames, tc.rate())?)?)
            }),
        );
        // n tc +
        interp.register(
            name,
            word(&kinds(&[T, Integer]), move |i| {
                let tc = i.stack.pop_timecode()?;
                let n = i.stack.pop_integer()?;
                let frames = n.wrapping_add(sign.wrapping_mul(tc.to_frames()));
                Ok(i.stack.push_timecode(at_frame(frames, tc.rate())?)?)
            }),
        );
    }
    Ok(())
}
