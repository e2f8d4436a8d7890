//! Live-ticker timeline for a simulated match.
//!
//! The timeline is presentation data: a kickoff line, one line per goal
//! in a shuffled order, one or two build-up lines placed at random
//! points between the goals, and a closing full-time line picked by
//! result category. Each event carries a display delay that the
//! embedding uses for pacing; the engine treats it as inert data.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use parlor_core::{MatchOutcome, Millis, Winner};

use crate::football::{FieldSlot, TeamSheet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickerKind {
    Kickoff,
    /// Build-up flavor (a chance or a defensive stand).
    Event,
    Goal,
    Fulltime,
}

/// One line of the live ticker with the running score at that point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerEvent {
    pub kind: TickerKind,
    pub message: String,
    pub score_a: u32,
    pub score_b: u32,
    /// Presentation pacing only.
    pub delay_ms: Millis,
}

const KICKOFF_LINES: [&str; 3] = [
    "The referee blows the whistle and we're underway!",
    "The match kicks off with both teams looking eager to make an early impression!",
    "Here we go! The ball is in play and the action begins!",
];

const CHANCE_LINES: [&str; 5] = [
    "{team} creates a great scoring opportunity!",
    "What a chance for {team}! The goalkeeper makes a crucial save!",
    "{team} hits the crossbar! So close to breaking the deadlock!",
    "A dangerous cross from {team} but the defense manages to clear it!",
    "{team} forces a corner kick after sustained pressure!",
];

const DEFENSE_LINES: [&str; 4] = [
    "Solid defending from {team} as they clear the danger!",
    "Great defensive work from {team} to snuff out that attack!",
    "{team}'s backline stands firm under pressure!",
    "Excellent tackling from {team} to win back possession!",
];

const GOAL_LINES: [&str; 5] = [
    "GOAL! {scorer} finds the back of the net for {team}! What a strike!",
    "It's in the net! {scorer} scores a brilliant goal for {team}!",
    "GOAL! {scorer} finishes beautifully to give {team} some breathing room!",
    "What a goal! {scorer} with a fantastic effort for {team}!",
    "GOAL! {scorer} converts expertly to put {team} on the scoresheet!",
];

const EQUALIZER_LINES: [&str; 3] = [
    "EQUALIZER! {scorer} levels the score for {team}! What a response!",
    "It's all square! {scorer} brings {team} back into the game!",
    "GOAL! {scorer} equalizes for {team} with a superb finish!",
];

const FULLTIME_TIE: [&str; 5] = [
    "What a nail-biting match! Both teams fought valiantly to earn their share of the points.",
    "A thrilling draw! The fans got their money's worth watching these two teams battle it out.",
    "Neither team could break the deadlock in this tactical masterpiece of a match.",
    "A hard-fought stalemate! Both sides showed incredible determination and skill.",
    "The match ends in a draw, but both teams can hold their heads high after this performance!",
];

const FULLTIME_LOW_SCORE: [&str; 4] = [
    "A defensive masterclass! Both teams' backlines were rock solid throughout the match.",
    "The goalkeepers were the heroes today, making crucial saves to keep the scoreline tight.",
    "A tactical battle where every goal was hard-earned and well-deserved.",
    "Low-scoring but high on drama! Every moment counted in this tense encounter.",
];

const FULLTIME_HIGH_SCORE: [&str; 4] = [
    "What an absolute goal fest! The fans were treated to end-to-end action and spectacular strikes!",
    "Attack was the best form of defense today as both teams threw caution to the wind!",
    "A thrilling high-scoring encounter that had everything - pace, power, and plenty of goals!",
    "The goalkeepers will want to forget this one, but the fans will remember it forever!",
];

const FULLTIME_BLOWOUT: [&str; 4] = [
    "A dominant display! One team showed their class with a commanding performance.",
    "That was a statement victory! Pure footballing excellence on display today.",
    "A masterful performance that showcased the beautiful game at its finest.",
    "Clinical finishing and tactical superiority led to this convincing result.",
];

const FULLTIME_REGULAR: [&str; 5] = [
    "A well-contested match with moments of brilliance from both sides!",
    "The beautiful game lived up to its name today with this entertaining encounter.",
    "Both teams gave their all in what turned out to be a memorable match.",
    "A solid performance from both teams in this engaging contest.",
    "The fans were treated to genuine football artistry in this well-played match.",
];

fn pick<'a>(lines: &[&'a str], rng: &mut impl Rng) -> &'a str {
    lines.choose(rng).expect("line pool is non-empty")
}

struct Goal {
    team_a: bool,
    scorer: String,
}

/// An event plus its chronological ordering key, before sorting.
struct Keyed {
    order: f64,
    event: TickerEvent,
}

/// Generate the full ticker timeline for a simulated match.
pub fn generate_ticker(
    outcome: &MatchOutcome,
    team_a_name: &str,
    team_b_name: &str,
    sheet: &TeamSheet,
    rng: &mut impl Rng,
) -> Vec<TickerEvent> {
    let total_goals = outcome.team_a_score + outcome.team_b_score;

    // Goals are credited to mid or attack occupants, never the defense.
    let scorer_names = |team_a: bool| -> Vec<String> {
        let slots = if team_a {
            [FieldSlot::MidA1, FieldSlot::MidA2, FieldSlot::OffenseA]
        } else {
            [FieldSlot::MidB1, FieldSlot::MidB2, FieldSlot::OffenseB]
        };
        slots
            .into_iter()
            .filter_map(|slot| sheet.get(slot).map(|p| p.name.clone()))
            .collect()
    };
    let scorers_a = scorer_names(true);
    let scorers_b = scorer_names(false);

    let mut goals: Vec<Goal> = Vec::with_capacity(total_goals as usize);
    for _ in 0..outcome.team_a_score {
        goals.push(Goal {
            team_a: true,
            scorer: scorers_a
                .choose(rng)
                .cloned()
                .unwrap_or_else(|| "Unknown".to_string()),
        });
    }
    for _ in 0..outcome.team_b_score {
        goals.push(Goal {
            team_a: false,
            scorer: scorers_b
                .choose(rng)
                .cloned()
                .unwrap_or_else(|| "Unknown".to_string()),
        });
    }
    goals.shuffle(rng);

    let mut timeline: Vec<Keyed> = Vec::new();

    timeline.push(Keyed {
        order: 0.0,
        event: TickerEvent {
            kind: TickerKind::Kickoff,
            message: pick(&KICKOFF_LINES, rng).to_string(),
            score_a: 0,
            score_b: 0,
            delay_ms: 1000.0,
        },
    });

    // Goal events at order keys 10, 20, ... leaving room in between for
    // the build-up lines.
    let mut score_a = 0u32;
    let mut score_b = 0u32;
    for (index, goal) in goals.iter().enumerate() {
        let team_name = if goal.team_a { team_a_name } else { team_b_name };
        if goal.team_a {
            score_a += 1;
        } else {
            score_b += 1;
        }
        let is_equalizer = score_a == score_b && score_a > 0;
        let template = if is_equalizer {
            pick(&EQUALIZER_LINES, rng)
        } else {
            pick(&GOAL_LINES, rng)
        };
        timeline.push(Keyed {
            order: ((index + 1) * 10) as f64,
            event: TickerEvent {
                kind: TickerKind::Goal,
                message: template
                    .replace("{scorer}", &goal.scorer)
                    .replace("{team}", team_name),
                score_a,
                score_b,
                delay_ms: 1800.0 + rng.gen::<f64>() * 500.0,
            },
        });
    }

    // 1-2 build-up lines at random points of the timeline, with the
    // running score reconstructed from the goals that precede them.
    let build_up_count = rng.gen_range(1..=2);
    for _ in 0..build_up_count {
        let template = if rng.gen::<f64>() < 0.6 {
            pick(&CHANCE_LINES, rng)
        } else {
            pick(&DEFENSE_LINES, rng)
        };
        let team_name = if rng.gen::<f64>() < 0.5 { team_a_name } else { team_b_name };
        let max_order = goals.len() as f64 * 10.0;
        let order = rng.gen::<f64>() * max_order + 1.0;
        let goals_before = &goals[..((order / 10.0) as usize).min(goals.len())];
        let score_a = goals_before.iter().filter(|g| g.team_a).count() as u32;
        let score_b = goals_before.len() as u32 - score_a;
        timeline.push(Keyed {
            order,
            event: TickerEvent {
                kind: TickerKind::Event,
                message: template.replace("{team}", team_name),
                score_a,
                score_b,
                delay_ms: 1800.0 + rng.gen::<f64>() * 500.0,
            },
        });
    }

    timeline.sort_by(|a, b| a.order.partial_cmp(&b.order).expect("finite keys"));

    let mut events: Vec<TickerEvent> = timeline.into_iter().map(|k| k.event).collect();

    let score_diff = outcome.team_a_score.abs_diff(outcome.team_b_score);
    let closing = if outcome.winner == Winner::Tie {
        pick(&FULLTIME_TIE, rng)
    } else if score_diff >= 3 {
        pick(&FULLTIME_BLOWOUT, rng)
    } else if total_goals >= 6 {
        pick(&FULLTIME_HIGH_SCORE, rng)
    } else if total_goals <= 2 {
        pick(&FULLTIME_LOW_SCORE, rng)
    } else {
        pick(&FULLTIME_REGULAR, rng)
    };
    events.push(TickerEvent {
        kind: TickerKind::Fulltime,
        message: closing.to_string(),
        score_a: outcome.team_a_score,
        score_b: outcome.team_b_score,
        delay_ms: 2000.0,
    });

    events
}
