//! Player generation and club naming for the management trial.

use rand::seq::SliceRandom;
use rand::Rng;

use parlor_core::{IdAllocator, Player, PlayerRole, PlayerStats, STAR_VALUES};

pub const SURNAMES: [&str; 100] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Wilson",
    "Martinez", "Anderson", "Taylor", "Thomas", "Hernandez", "Moore", "Martin", "Jackson",
    "Thompson", "White", "Lopez", "Lee", "Gonzalez", "Harris", "Clark", "Lewis", "Robinson",
    "Walker", "Perez", "Hall", "Young", "Allen", "Sanchez", "Wright", "King", "Scott", "Green",
    "Baker", "Adams", "Nelson", "Hill", "Ramirez", "Campbell", "Mitchell", "Roberts", "Carter",
    "Phillips", "Evans", "Turner", "Torres", "Parker", "Collins", "Edwards", "Stewart", "Flores",
    "Morris", "Nguyen", "Murphy", "Rivera", "Cook", "Rogers", "Morgan", "Peterson", "Cooper",
    "Reed", "Bailey", "Bell", "Gomez", "Kelly", "Howard", "Ward", "Cox", "Diaz", "Richardson",
    "Wood", "Watson", "Brooks", "Bennett", "Gray", "James", "Reyes", "Cruz", "Hughes", "Price",
    "Myers", "Long", "Foster", "Sanders", "Ross", "Morales", "Powell", "Sullivan", "Russell",
    "Ortiz", "Jenkins", "Gutierrez", "Perry", "Butler", "Barnes", "Fisher", "Henderson",
];

const CLUB_FIRST: [&str; 40] = [
    "Thunder", "Golden", "Storm", "Iron", "Fire", "Lightning", "Steel", "Wild", "Crimson", "Blue",
    "Silver", "Black", "Green", "Red", "White", "Purple", "Orange", "Yellow", "Pink", "Midnight",
    "Dawn", "Star", "Moon", "Sun", "Sky", "Ocean", "Mountain", "Desert", "Forest", "River",
    "Valley", "Hill", "Rock", "Ice", "Wind", "Earth", "Crystal", "Diamond", "Ruby", "Emerald",
];

const CLUB_SECOND: [&str; 40] = [
    "Bolts", "Eagles", "Riders", "Wolves", "Hawks", "Strikes", "Panthers", "Stallions", "Tigers",
    "Sharks", "Arrows", "Ravens", "Dragons", "Bulls", "Lions", "Cobras", "Flames", "Hornets",
    "Flamingos", "Owls", "Breakers", "Crushers", "Walkers", "Blazers", "Waves", "Foxes",
    "Rangers", "Climbers", "Bears", "Runners", "Movers", "Chasers", "Cats", "Bugs", "Hammers",
    "Horses", "Griffins", "Serpents", "Dogs", "Rhinos",
];

const CLUB_SUFFIX: [&str; 2] = ["FC", "United"];

const MEN_IMAGE_COUNT: u32 = 53;

/// A portrait reference from the shared male image pool.
pub(crate) fn man_image(rng: &mut impl Rng) -> String {
    format!("/dating/men/man_{}.png", rng.gen_range(1..=MEN_IMAGE_COUNT))
}

/// Uniform draw from the half-star scale.
fn star_value(rng: &mut impl Rng) -> f64 {
    *STAR_VALUES.choose(rng).expect("scale is non-empty")
}

/// Draw from the half-star scale with weights 1,1,2,2,3,3,4,4,5,5 so
/// the value leans high. Used for the stat matching a player's role.
fn biased_star_value(rng: &mut impl Rng) -> f64 {
    const WEIGHTS: [u32; 10] = [1, 1, 2, 2, 3, 3, 4, 4, 5, 5];
    let total: u32 = WEIGHTS.iter().sum();
    let mut roll = rng.gen_range(0..total);
    for (i, w) in WEIGHTS.iter().enumerate() {
        if roll < *w {
            return STAR_VALUES[i];
        }
        roll -= w;
    }
    STAR_VALUES[STAR_VALUES.len() - 1]
}

/// Produces uniquely-identified players. Owns the id counter for one
/// trial instance; the RNG is borrowed per call so a seeded trial
/// replays its roster exactly.
#[derive(Debug, Default)]
pub struct PlayerGenerator {
    ids: IdAllocator,
}

impl PlayerGenerator {
    pub fn new() -> Self {
        PlayerGenerator::default()
    }

    pub fn generate(&mut self, rng: &mut impl Rng) -> Player {
        let role = *[PlayerRole::Defense, PlayerRole::Mid, PlayerRole::Attack]
            .choose(rng)
            .expect("roles are non-empty");
        let stats = PlayerStats {
            defense: if role == PlayerRole::Defense {
                biased_star_value(rng)
            } else {
                star_value(rng)
            },
            passing: if role == PlayerRole::Mid {
                biased_star_value(rng)
            } else {
                star_value(rng)
            },
            shooting: if role == PlayerRole::Attack {
                biased_star_value(rng)
            } else {
                star_value(rng)
            },
            stamina: star_value(rng),
        };
        Player {
            id: self.ids.allocate(),
            name: SURNAMES.choose(rng).expect("pool is non-empty").to_string(),
            image: man_image(rng),
            role,
            stats,
        }
    }
}

fn club_name(rng: &mut impl Rng) -> String {
    format!(
        "{} {} {}",
        CLUB_FIRST.choose(rng).expect("non-empty"),
        CLUB_SECOND.choose(rng).expect("non-empty"),
        CLUB_SUFFIX.choose(rng).expect("non-empty"),
    )
}

/// Generate a pair of distinct club names.
pub fn generate_team_names(rng: &mut impl Rng) -> (String, String) {
    let team_a = club_name(rng);
    let mut team_b = club_name(rng);
    while team_b == team_a {
        team_b = club_name(rng);
    }
    (team_a, team_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn player_ids_are_strictly_increasing() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut gen = PlayerGenerator::new();
        let mut prev = gen.generate(&mut rng).id;
        for _ in 0..100 {
            let id = gen.generate(&mut rng).id;
            assert!(id > prev);
            prev = id;
        }
    }

    #[test]
    fn stats_stay_on_the_half_star_scale() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut gen = PlayerGenerator::new();
        for _ in 0..200 {
            let p = gen.generate(&mut rng);
            for stat in [p.stats.defense, p.stats.passing, p.stats.shooting, p.stats.stamina] {
                assert!(STAR_VALUES.contains(&stat), "off-scale stat {stat}");
            }
        }
    }

    #[test]
    fn role_stat_bias_shows_in_the_mean() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut gen = PlayerGenerator::new();
        let mut primary_sum = 0.0;
        let mut stamina_sum = 0.0;
        let n = 2000;
        for _ in 0..n {
            let p = gen.generate(&mut rng);
            primary_sum += match p.role {
                PlayerRole::Defense => p.stats.defense,
                PlayerRole::Mid => p.stats.passing,
                PlayerRole::Attack => p.stats.shooting,
            };
            stamina_sum += p.stats.stamina;
        }
        // Uniform mean is 2.75; the weighted draw sits near 3.5.
        assert!(primary_sum / n as f64 > stamina_sum / n as f64 + 0.3);
    }

    #[test]
    fn team_names_never_collide() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..100 {
            let (a, b) = generate_team_names(&mut rng);
            assert_ne!(a, b);
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let roster = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut gen = PlayerGenerator::new();
            (0..10).map(|_| gen.generate(&mut rng)).collect::<Vec<_>>()
        };
        assert_eq!(roster(42), roster(42));
    }
}
