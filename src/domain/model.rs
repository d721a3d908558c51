use serde::{Deserialize, Serialize};
use std::fmt;

/// One second's worth of clock state, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSnapshot {
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
    /// "AM", "PM", or empty in 24-hour mode.
    pub period: String,
    pub full_date: String,
}

impl TimeSnapshot {
    /// `HH:MM PERIOD`, the label handed to the transmission fetcher.
    pub fn time_label(&self) -> String {
        format!("{}:{} {}", self.hours, self.minutes, self.period)
            .trim_end()
            .to_string()
    }

    /// HH MM SS digit characters in display order.
    pub fn digits(&self) -> Vec<char> {
        self.hours
            .chars()
            .chain(self.minutes.chars())
            .chain(self.seconds.chars())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Am,
    Pm,
    /// 24-hour mode drops the indicator entirely.
    None,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Am => "AM",
            Period::Pm => "PM",
            Period::None => "",
        }
    }
}

/// The seven strokes of a seven-segment digit.
///
/// ```text
///  aaa
/// f   b
///  ggg
/// e   c
///  ddd
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl Segment {
    pub const ALL: [Segment; 7] = [
        Segment::A,
        Segment::B,
        Segment::C,
        Segment::D,
        Segment::E,
        Segment::F,
        Segment::G,
    ];

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    pub fn name(&self) -> char {
        match self {
            Segment::A => 'a',
            Segment::B => 'b',
            Segment::C => 'c',
            Segment::D => 'd',
            Segment::E => 'e',
            Segment::F => 'f',
            Segment::G => 'g',
        }
    }
}

/// Immutable set of lit segments, one bit per segment.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SegmentSet(u8);

impl SegmentSet {
    pub const EMPTY: SegmentSet = SegmentSet(0);

    pub const fn of(segments: &[Segment]) -> Self {
        let mut bits = 0u8;
        let mut i = 0;
        while i < segments.len() {
            bits |= segments[i].bit();
            i += 1;
        }
        SegmentSet(bits)
    }

    pub fn contains(&self, segment: Segment) -> bool {
        self.0 & segment.bit() != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Segment> + '_ {
        Segment::ALL.into_iter().filter(move |s| self.contains(*s))
    }
}

impl fmt::Debug for SegmentSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(|s| s.name())).finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransmissionResult {
    pub message: String,
    pub frequency: String,
    pub timestamp: String,
}

impl TransmissionResult {
    pub const SIGNAL_LOST_MESSAGE: &'static str = "SIGNAL LOST. STATIC INTERFERENCE DETECTED.";
    pub const SIGNAL_LOST_FREQUENCY: &'static str = "ERR-404";
    pub const SIGNAL_LOST_TIMESTAMP: &'static str = "UNKNOWN";

    /// Fixed payload substituted for any failed fetch.
    pub fn signal_lost() -> Self {
        Self {
            message: Self::SIGNAL_LOST_MESSAGE.to_string(),
            frequency: Self::SIGNAL_LOST_FREQUENCY.to_string(),
            timestamp: Self::SIGNAL_LOST_TIMESTAMP.to_string(),
        }
    }

    pub fn is_signal_lost(&self) -> bool {
        *self == Self::signal_lost()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TunerState {
    #[default]
    Idle,
    Scanning,
    Received(TransmissionResult),
}
