//! Person generation for the matchmaking trial.
//!
//! Each person gets four core trait values (uniform 0-10), one or two
//! non-neutral preference axes, an orientation (75% straight, 5% gay,
//! 20% bi), and a set of display words derived from the numeric
//! vectors. The display words are what the participant sees; the
//! numeric vectors are what the compatibility judge scores.

use rand::seq::SliceRandom;
use rand::Rng;

use parlor_core::{
    CoreTraits, Gender, IdAllocator, LookingFor, MiscPreferences, Person, PreferenceValue,
};

use crate::roster::man_image;

const MALE_NAMES: [&str; 40] = [
    "James", "Liam", "Noah", "Oliver", "Elijah", "Henry", "Lucas", "Theodore", "Jack", "Levi",
    "Alexander", "Jackson", "Mateo", "Daniel", "Michael", "Mason", "Sebastian", "Ethan", "Logan",
    "Owen", "Samuel", "Jacob", "Asher", "Aiden", "John", "Joseph", "Wyatt", "David", "Leo",
    "Luke", "Julian", "Hudson", "Grayson", "Matthew", "Ezra", "Gabriel", "Carter", "Isaac",
    "Jayden", "Luca",
];

const FEMALE_NAMES: [&str; 40] = [
    "Olivia", "Emma", "Charlotte", "Amelia", "Sophia", "Isabella", "Ava", "Mia", "Evelyn",
    "Luna", "Harper", "Camila", "Sofia", "Scarlett", "Elizabeth", "Eleanor", "Emily", "Chloe",
    "Mila", "Violet", "Penelope", "Gianna", "Aria", "Abigail", "Ella", "Avery", "Hazel", "Nora",
    "Layla", "Lily", "Aurora", "Nova", "Ellie", "Madison", "Grace", "Isla", "Willow", "Zoe",
    "Riley", "Stella",
];

const WOMEN_IMAGE_COUNT: u32 = 61;

fn woman_image(rng: &mut impl Rng) -> String {
    format!(
        "/dating/women/woman_{}.png",
        rng.gen_range(1..=WOMEN_IMAGE_COUNT)
    )
}

/// Display vocabulary per trait, from very low (index 0) to very high.
const OPENNESS_WORDS: [[&str; 3]; 5] = [
    ["Traditional", "Creature of habit", "Old-fashioned"],
    ["Down to earth", "Likes routine", "Steady"],
    ["Open-minded", "Flexible", "Easygoing"],
    ["Adventurous", "Curious", "Loves new things"],
    ["Thrill seeker", "Free spirit", "Always exploring"],
];

const SPORTINESS_WORDS: [[&str; 3]; 5] = [
    ["Couch potato", "Homebody", "Allergic to gyms"],
    ["Casual walker", "Sunday stroller", "Takes it easy"],
    ["Stays active", "Weekend hiker", "Likes to move"],
    ["Gym regular", "Team player", "Runs for fun"],
    ["Fitness fanatic", "Marathon runner", "Lives at the gym"],
];

const SOCIAL_WORDS: [[&str; 3]; 5] = [
    ["Lone wolf", "Needs quiet", "Keeps to themselves"],
    ["Reserved", "Small circles", "Quiet one"],
    ["Friendly", "Good listener", "Easy company"],
    ["Outgoing", "Loves a party", "People person"],
    ["Social butterfly", "Life of the party", "Never home"],
];

const NATURAL_WORDS: [[&str; 3]; 5] = [
    ["Always dressed up", "Glamorous", "Loves the spotlight"],
    ["Well groomed", "Stylish", "Puts in effort"],
    ["Smart casual", "Balanced look", "Effortless style"],
    ["Low maintenance", "Casual", "Comfy first"],
    ["All natural", "No-fuss", "Barefoot type"],
];

/// Display vocabulary per preference axis: (positive, negative).
const PREFERENCE_WORDS: [(&str, [&str; 2], [&str; 2]); 10] = [
    ("cats", ["Cat person", "Has three cats"], ["Allergic to cats", "No cats please"]),
    ("dogs", ["Dog lover", "Never without their dog"], ["Not a dog fan", "Scared of dogs"]),
    ("smoking", ["Social smoker", "Smoker"], ["Non-smoker", "Hates smoke"]),
    ("drinking", ["Enjoys a drink", "Cocktail enthusiast"], ["Teetotaler", "Doesn't drink"]),
    ("travel", ["Frequent flyer", "Travel addict"], ["Homebody at heart", "Hates airports"]),
    ("cooking", ["Passionate cook", "Kitchen wizard"], ["Takeout only", "Burns water"]),
    ("reading", ["Bookworm", "Always reading"], ["Not a reader", "Prefers podcasts"]),
    ("music", ["Concert goer", "Music obsessed"], ["Prefers silence", "Not into music"]),
    ("movies", ["Film buff", "Cinema regular"], ["Rarely watches movies", "No screens"]),
    ("outdoors", ["Outdoorsy", "Camping fan"], ["Indoors type", "Prefers the sofa"]),
];

fn trait_level(value: u8) -> usize {
    match value {
        0..=2 => 0,
        3..=4 => 1,
        5..=6 => 2,
        7..=8 => 3,
        _ => 4,
    }
}

fn generate_core_traits(rng: &mut impl Rng) -> CoreTraits {
    CoreTraits {
        openness: rng.gen_range(0..=10),
        sportiness: rng.gen_range(0..=10),
        social: rng.gen_range(0..=10),
        natural: rng.gen_range(0..=10),
    }
}

/// One or two randomly chosen axes become non-neutral, positive or
/// negative 50/50; everything else stays neutral.
fn generate_misc_preferences(rng: &mut impl Rng) -> MiscPreferences {
    let mut prefs = MiscPreferences::neutral();
    let mut axes: Vec<usize> = (0..MiscPreferences::AXIS_COUNT).collect();
    axes.shuffle(rng);
    let count = if rng.gen::<f64>() < 0.5 { 1 } else { 2 };
    for &axis in axes.iter().take(count) {
        let value = if rng.gen::<f64>() < 0.5 {
            PreferenceValue::Positive
        } else {
            PreferenceValue::Negative
        };
        prefs.set_axis(axis, value);
    }
    prefs
}

fn generate_display_traits(
    core_traits: &CoreTraits,
    misc_preferences: &MiscPreferences,
    rng: &mut impl Rng,
) -> Vec<String> {
    let pools = [
        &OPENNESS_WORDS,
        &SPORTINESS_WORDS,
        &SOCIAL_WORDS,
        &NATURAL_WORDS,
    ];
    let mut traits: Vec<String> = core_traits
        .values()
        .iter()
        .zip(pools)
        .map(|(value, pool)| {
            pool[trait_level(*value)]
                .choose(rng)
                .expect("pool is non-empty")
                .to_string()
        })
        .collect();

    for (i, (_, value)) in misc_preferences.axes().iter().enumerate() {
        let words = match value {
            PreferenceValue::Neutral => continue,
            PreferenceValue::Positive => &PREFERENCE_WORDS[i].1,
            PreferenceValue::Negative => &PREFERENCE_WORDS[i].2,
        };
        traits.push(words.choose(rng).expect("pool is non-empty").to_string());
    }

    // Longest first, for card layouting.
    traits.sort_by(|a, b| b.len().cmp(&a.len()));
    traits
}

/// Produces uniquely-identified persons. Owns the id counter for one
/// trial instance.
#[derive(Debug, Default)]
pub struct PersonGenerator {
    ids: IdAllocator,
}

impl PersonGenerator {
    pub fn new() -> Self {
        PersonGenerator::default()
    }

    pub fn generate(&mut self, rng: &mut impl Rng) -> Person {
        let gender = if rng.gen::<f64>() < 0.5 {
            Gender::Male
        } else {
            Gender::Female
        };
        let (name, image) = match gender {
            Gender::Male => (
                MALE_NAMES.choose(rng).expect("pool is non-empty").to_string(),
                man_image(rng),
            ),
            Gender::Female => (
                FEMALE_NAMES.choose(rng).expect("pool is non-empty").to_string(),
                woman_image(rng),
            ),
        };

        // 75% straight, 5% gay, 20% bi.
        let roll = rng.gen::<f64>();
        let looking_for = if roll < 0.75 {
            match gender {
                Gender::Male => LookingFor::Female,
                Gender::Female => LookingFor::Male,
            }
        } else if roll < 0.8 {
            match gender {
                Gender::Male => LookingFor::Male,
                Gender::Female => LookingFor::Female,
            }
        } else {
            LookingFor::Both
        };

        let core_traits = generate_core_traits(rng);
        let misc_preferences = generate_misc_preferences(rng);
        let display_traits = generate_display_traits(&core_traits, &misc_preferences, rng);

        Person {
            id: self.ids.allocate(),
            name,
            image,
            gender,
            looking_for,
            core_traits,
            misc_preferences,
            display_traits,
        }
    }
}
