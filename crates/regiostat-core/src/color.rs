//! Deterministic display colours for open-ended appeal topics.
//!
//! Topics are discovered from data, so there is no palette to look them up
//! in. Each topic string is hashed and the hash is mapped into HSL space;
//! the same topic yields the same colour in every session without any
//! persisted table. Collisions are possible and accepted.

use std::collections::BTreeMap;
use std::fmt;

const SATURATION_MIN: u32 = 60;
const SATURATION_SPAN: u32 = 21;
const LIGHTNESS_MIN: u32 = 50;
const LIGHTNESS_SPAN: u32 = 16;

/// A colour in HSL space. Saturation and lightness are percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hsl {
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// Order-dependent 32-bit string hash over UTF-16 code units
/// (`h = c + (h << 5) - h`, wrapping).
pub fn topic_hash(topic: &str) -> i32 {
    topic.encode_utf16().fold(0i32, |h, unit| {
        (unit as i32).wrapping_add(h.wrapping_shl(5).wrapping_sub(h))
    })
}

/// Colour for a single topic.
///
/// Hue is `|hash| mod 360`; saturation lands in 60–80% and lightness in
/// 50–65%, each taken from a different slice of the hash.
pub fn color_for(topic: &str) -> Hsl {
    let h = topic_hash(topic).unsigned_abs();
    Hsl {
        hue: (h % 360) as u16,
        saturation: (SATURATION_MIN + (h >> 8) % SATURATION_SPAN) as u8,
        lightness: (LIGHTNESS_MIN + (h >> 16) % LIGHTNESS_SPAN) as u8,
    }
}

/// Colours for a set of topics, keyed by topic, rendered as CSS `hsl(...)`.
pub fn colors_for<S: AsRef<str>>(topics: &[S]) -> BTreeMap<String, String> {
    topics
        .iter()
        .map(|t| (t.as_ref().to_string(), color_for(t.as_ref()).to_string()))
        .collect()
}
