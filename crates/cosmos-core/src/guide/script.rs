//! The guide script.
//!
//! Line counts here drive the stage durations in [`crate::timing`]: adding a
//! line to a scale lengthens that scale by one guide line duration.

use crate::scale::Scale;

const EARTH_LINES: &[&str] = &[
    "Breathe deeply... feel your body connected to this blue planet",
    "Earth is a beautiful oasis in the universe, cradle of countless lives",
    "Imagine your worries as clouds drifting over the Earth, light and fleeting",
    "Across 4.6 billion years of history, we are brief travellers made of stardust",
];

const SOLAR_LINES: &[&str] = &[
    "Our view expands to the Solar System. Can you see that burning star?",
    "Eight planets circle under the Sun's gravity in a grand celestial dance",
    "At this scale, the Earth is only a tiny blue dot",
    "In a system this vast, has your worry begun to feel smaller?",
];

const GALAXY_LINES: &[&str] = &[
    "Let us widen our view further, into the vastness of the Milky Way",
    "More than 300 billion stars shimmer across its spiral arms",
    "Each of them may hold its own planets and its own stories of life",
    "Our Solar System is just one ordinary member of the galaxy",
    "Before a scale like this, a personal worry is a single grain of cosmic dust",
];

const UNIVERSE_LINES: &[&str] = &[
    "Finally, let us look down on everything from the perspective of the universe",
    "The observable universe holds about 150 billion galaxies like the Milky Way",
    "They weave together into one immense cosmic web",
    "In this boundless ocean, our galaxy is only a small whirlpool",
    "But remember: however small, you are still unique in this universe",
];

/// Heading of the worry banner shown during the Earth scale.
pub const WORRY_BANNER_TITLE: &str = "Your worry right now";

/// The guide lines of a scale, in display order.
pub fn guide_lines(scale: Scale) -> &'static [&'static str] {
    match scale {
        Scale::Earth => EARTH_LINES,
        Scale::Solar => SOLAR_LINES,
        Scale::Galaxy => GALAXY_LINES,
        Scale::Universe => UNIVERSE_LINES,
    }
}

pub fn line_count(scale: Scale) -> usize {
    guide_lines(scale).len()
}

/// The sentence that puts the worry in perspective once a scale's lines are done.
pub fn worry_reflection(scale: Scale) -> &'static str {
    match scale {
        Scale::Earth => {
            "Your worry is like a weather system on Earth: however violent, it always calms in the end"
        }
        Scale::Solar => {
            "The Solar System has turned for 4.6 billion years; what you face is a tiny point on the cosmic timeline"
        }
        Scale::Galaxy => {
            "The Milky Way needs 220 million years to turn once, while your worry may last only days or years"
        }
        Scale::Universe => {
            "At the scale of the universe every worry is so brief. Why not cherish the calm of this moment?"
        }
    }
}
