use core::fmt;
use core::time::Duration;

use crate::types::FrameRate;

/// Sample time on the player's local clock.
///
/// `sequence_index` distinguishes passes over the same timeline (loops,
/// seeks), so ordering compares it before `time`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MediaTimeStamp {
    pub sequence_index: i64,
    pub time: Duration,
}

impl MediaTimeStamp {
    pub const fn new(time: Duration) -> Self {
        Self {
            sequence_index: 0,
            time,
        }
    }

    pub const fn with_sequence_index(time: Duration, sequence_index: i64) -> Self {
        Self {
            sequence_index,
            time,
        }
    }
}

/// SMPTE style timecode.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timecode {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub frames: u32,
    pub drop_frame: bool,
}

impl Timecode {
    /// Label for the `frame`th frame at `rate`.
    ///
    /// With `drop_frame`, the first `round(fps / 15)` labels of every minute
    /// except each tenth are skipped, which keeps 29.97 and 59.94 timecode in
    /// step with the wall clock. Rates that are not a multiple of 30 ignore
    /// `drop_frame`. Labels past `u64::MAX` frames or `u32::MAX` hours
    /// saturate.
    pub fn from_frame_number(frame: u64, rate: FrameRate, drop_frame: bool) -> Self {
        let fps = u64::from(rate.nominal_fps());
        if fps == 0 {
            return Self::default();
        }

        let drop_frame = drop_frame && fps % 30 == 0;
        let mut label = frame;
        if drop_frame {
            let dropped = fps / 15;
            let frames_per_minute = fps * 60 - dropped;
            let frames_per_ten_minutes = frames_per_minute * 10 + dropped;

            let tens = frame / frames_per_ten_minutes;
            let rest = frame % frames_per_ten_minutes;
            label = label.saturating_add(dropped * 9 * tens);
            if rest > dropped {
                label = label.saturating_add(dropped * ((rest - dropped) / frames_per_minute));
            }
        }

        let total_seconds = label / fps;
        Self {
            hours: u32::try_from(total_seconds / 3600).unwrap_or(u32::MAX),
            minutes: (total_seconds / 60 % 60) as u32,
            seconds: (total_seconds % 60) as u32,
            frames: (label % fps) as u32,
            drop_frame,
        }
    }

    /// Label for the frame showing at `time`, counting from zero at `rate`.
    pub fn from_duration(time: Duration, rate: FrameRate, drop_frame: bool) -> Self {
        if rate.denominator == 0 {
            return Self::default();
        }
        let frame = time.as_nanos() * u128::from(rate.numerator)
            / (u128::from(rate.denominator) * 1_000_000_000);
        Self::from_frame_number(
            u64::try_from(frame).unwrap_or(u64::MAX),
            rate,
            drop_frame,
        )
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = if self.drop_frame { ';' } else { ':' };
        write!(
            f,
            "{:02}:{:02}:{:02}{separator}{:02}",
            self.hours, self.minutes, self.seconds, self.frames
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NTSC: FrameRate = FrameRate::new(30000, 1001);

    #[test]
    fn timestamps_order_by_sequence_first() {
        let late_first_pass = MediaTimeStamp::with_sequence_index(Duration::from_secs(10), 0);
        let early_second_pass = MediaTimeStamp::with_sequence_index(Duration::from_secs(1), 1);
        assert!(late_first_pass < early_second_pass);
        assert!(MediaTimeStamp::new(Duration::ZERO) < MediaTimeStamp::new(Duration::from_millis(1)));
    }

    #[test]
    fn non_drop_frame() {
        let tc = Timecode::from_frame_number(25 * 3661 + 7, FrameRate::new(25, 1), false);
        assert_eq!(tc.to_string(), "01:01:01:07");
    }

    #[test]
    fn drop_frame_skips_labels_at_minute_boundaries() {
        assert_eq!(
            Timecode::from_frame_number(1799, NTSC, true).to_string(),
            "00:00:59;29"
        );
        assert_eq!(
            Timecode::from_frame_number(1800, NTSC, true).to_string(),
            "00:01:00;02"
        );
        // tenth minute keeps its first labels
        assert_eq!(
            Timecode::from_frame_number(17982, NTSC, true).to_string(),
            "00:10:00;00"
        );
    }

    #[test]
    fn drop_frame_ignored_for_pal() {
        let tc = Timecode::from_frame_number(1500, FrameRate::new(25, 1), true);
        assert!(!tc.drop_frame);
        assert_eq!(tc.to_string(), "00:01:00:00");
    }

    #[test]
    fn far_labels_saturate() {
        let tc = Timecode::from_frame_number(u64::MAX, NTSC, true);
        assert_eq!(tc.hours, u32::MAX);
        assert!(tc.minutes < 60 && tc.seconds < 60 && tc.frames < 30);

        let tc = Timecode::from_duration(Duration::MAX, NTSC, true);
        assert_eq!(tc.hours, u32::MAX);
        assert!(tc.drop_frame);
    }

    #[test]
    fn from_duration() {
        let tc = Timecode::from_duration(Duration::from_millis(2_040), FrameRate::new(25, 1), false);
        assert_eq!(
            tc,
            Timecode {
                hours: 0,
                minutes: 0,
                seconds: 2,
                frames: 1,
                drop_frame: false,
            }
        );
        assert_eq!(
            Timecode::from_duration(Duration::from_secs(5), FrameRate::new(0, 0), false),
            Timecode::default()
        );
    }
}
