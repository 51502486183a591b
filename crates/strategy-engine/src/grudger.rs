//! Grudge-holding strategies
//!
//! Variants that cooperate until the opponent's defections cross a
//! threshold, then change course for a bounded or unbounded stretch.

use log::debug;
use crate::action::Action;
use crate::classifier::{Classifier, MemoryDepth};
use crate::error::EngineError;
use crate::history::History;
use crate::random::{Seed, SeededRng};
use crate::strategy::Strategy;

/// Rounds a grudge outlasts the round that triggered it.
pub const GRUDGE_ROUNDS: u32 = 10;

/// Default chance per round that [`ForgetfulFoolMeOnce`] forgets its count.
pub const DEFAULT_FORGET_PROBABILITY: f64 = 0.05;

// 2 rounds to detect the trigger + the grudge window.
static ONCE_BITTEN: Classifier = Classifier::deterministic(MemoryDepth::Bounded(2 + GRUDGE_ROUNDS));
static LONG_MEMORY: Classifier = Classifier::deterministic(MemoryDepth::Unbounded);
static FORGETFUL: Classifier = Classifier::stochastic(MemoryDepth::Unbounded);

/// Cooperates until the opponent defects twice in a row, then defects for
/// the triggering round plus [`GRUDGE_ROUNDS`] more before forgiving.
///
/// A new trigger is only looked for once the current grudge has expired; a
/// fresh pair of defections during the grudge does not extend it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OnceBitten {
    grudged: bool,
    grudge_memory: u32,
}

impl OnceBitten {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grudged(&self) -> bool {
        self.grudged
    }

    /// Grudge rounds still owed.
    pub fn grudge_memory(&self) -> u32 {
        self.grudge_memory
    }
}

impl Strategy for OnceBitten {
    fn name(&self) -> String {
        "Once Bitten".to_string()
    }

    fn description(&self) -> &'static str {
        "Defects for ten rounds after two consecutive defections, then forgives."
    }

    fn classifier(&self) -> &'static Classifier {
        &ONCE_BITTEN
    }

    fn decide(&mut self, history: &History) -> Action {
        if self.grudged && self.grudge_memory == 0 {
            debug!("once bitten: grudge expired after round {}", history.len());
            self.grudged = false;
        }

        let opponent = history.opponent_actions();
        if opponent.len() < 2 {
            return Action::Cooperate;
        }

        if self.grudged {
            self.grudge_memory -= 1;
            return Action::Defect;
        }

        if opponent[opponent.len() - 2..] == [Action::Defect, Action::Defect] {
            debug!("once bitten: grudge triggered at round {}", history.len() + 1);
            self.grudged = true;
            self.grudge_memory = GRUDGE_ROUNDS;
            return Action::Defect;
        }

        Action::Cooperate
    }

    fn reset(&mut self) {
        self.grudged = false;
        self.grudge_memory = 0;
    }
}

/// Forgives one defection; defects forever from the opponent's second.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FoolMeOnce;

impl Strategy for FoolMeOnce {
    fn name(&self) -> String {
        "Fool Me Once".to_string()
    }

    fn description(&self) -> &'static str {
        "Forgives a single defection, defects forever after the second."
    }

    fn classifier(&self) -> &'static Classifier {
        &LONG_MEMORY
    }

    fn decide(&mut self, history: &History) -> Action {
        if history.opponent_defections() > 1 {
            Action::Defect
        } else {
            Action::Cooperate
        }
    }

    fn reset(&mut self) {}
}

/// [`FoolMeOnce`] with a running defection count that is wiped with a
/// fixed probability every round.
#[derive(Clone, Debug, PartialEq)]
pub struct ForgetfulFoolMeOnce {
    forget_probability: f64,
    seed: Seed,
    rng: SeededRng,
    d_count: u32,
}

impl ForgetfulFoolMeOnce {
    /// Without a seed one is drawn from the process entropy source.
    pub fn new(forget_probability: f64, seed: Option<Seed>) -> Result<Self, EngineError> {
        if !(0.0..=1.0).contains(&forget_probability) {
            return Err(EngineError::config(format!(
                "forget probability must lie in [0, 1], got {}",
                forget_probability
            )));
        }
        let seed = match seed {
            Some(seed) => seed,
            None => Seed::from_entropy()?,
        };
        Ok(Self {
            forget_probability,
            seed,
            rng: SeededRng::from_seed(seed.0),
            d_count: 0,
        })
    }

    /// Default forget probability with an explicit seed.
    pub fn with_seed(seed: Seed) -> Self {
        Self {
            forget_probability: DEFAULT_FORGET_PROBABILITY,
            seed,
            rng: SeededRng::from_seed(seed.0),
            d_count: 0,
        }
    }

    pub fn d_count(&self) -> u32 {
        self.d_count
    }

    pub fn forget_probability(&self) -> f64 {
        self.forget_probability
    }

    pub fn seed(&self) -> Seed {
        self.seed
    }
}

impl Strategy for ForgetfulFoolMeOnce {
    fn name(&self) -> String {
        format!("Forgetful Fool Me Once: {}", self.forget_probability)
    }

    fn description(&self) -> &'static str {
        "Defects after two defections, but randomly forgets how many it has seen."
    }

    fn classifier(&self) -> &'static Classifier {
        &FORGETFUL
    }

    fn decide(&mut self, history: &History) -> Action {
        // Drawn every round, the opening one included, so the stream stays
        // aligned with the round number.
        let draw = self.rng.next_uniform();

        let Some(last) = history.opponent_actions().last() else {
            return Action::Cooperate;
        };
        if *last == Action::Defect {
            self.d_count = self.d_count.saturating_add(1);
        }
        if draw < self.forget_probability {
            debug!("forgetful fool me once: forgot {} defections", self.d_count);
            self.d_count = 0;
        }

        if self.d_count > 1 {
            Action::Defect
        } else {
            Action::Cooperate
        }
    }

    fn reset(&mut self) {
        self.rng = SeededRng::from_seed(self.seed.0);
        self.d_count = 0;
    }

    fn reseed(&mut self, seed: u64) {
        self.seed = Seed(seed);
        self.rng = SeededRng::from_seed(seed);
    }
}

/// Defects until the opponent first defects, then cooperates for good.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FoolMeForever;

impl Strategy for FoolMeForever {
    fn name(&self) -> String {
        "Fool Me Forever".to_string()
    }

    fn description(&self) -> &'static str {
        "Defects until the opponent defects once, then cooperates forever."
    }

    fn classifier(&self) -> &'static Classifier {
        &LONG_MEMORY
    }

    fn decide(&mut self, history: &History) -> Action {
        if history.opponent_defections() > 0 {
            Action::Cooperate
        } else {
            Action::Defect
        }
    }

    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{actions_from_str, C, D};
    use proptest::prelude::{any, prop, prop_assert, prop_assert_eq, prop_oneof, proptest, Just};

    /// Play `strategy` against a scripted opponent, returning (own, opponent)
    /// pairs.
    fn versus<S: Strategy>(strategy: &mut S, opponent: &[Action]) -> Vec<(Action, Action)> {
        let mut history = History::with_capacity(opponent.len());
        for &theirs in opponent {
            let ours = strategy.decide(&history);
            history.append(ours, theirs);
        }
        history.rounds().collect()
    }

    fn script(moves: &str) -> Vec<Action> {
        actions_from_str(moves).unwrap()
    }

    fn cycle(moves: &str, rounds: usize) -> Vec<Action> {
        script(moves).into_iter().cycle().take(rounds).collect()
    }

    fn alternator(rounds: usize) -> Vec<Action> {
        cycle("CD", rounds)
    }

    fn own(pairs: &[(Action, Action)]) -> Vec<Action> {
        pairs.iter().map(|(ours, _)| *ours).collect()
    }

    fn arb_moves(max: usize) -> impl proptest::strategy::Strategy<Value = Vec<Action>> {
        prop::collection::vec(prop_oneof![Just(C), Just(D)], 0..max)
    }

    #[test]
    fn test_once_bitten_classifier() {
        let classifier = OnceBitten::new().classifier();
        assert_eq!(classifier.memory_depth, MemoryDepth::Bounded(12));
        assert!(!classifier.stochastic);
        assert!(classifier.makes_use_of.is_empty());
        assert!(!classifier.long_run_time);
        assert!(classifier.obeys_rules());
    }

    #[test]
    fn test_once_bitten_single_defection_ignored() {
        let mut strategy = OnceBitten::new();
        let pairs = versus(&mut strategy, &cycle("CCCD", 5));
        assert_eq!(pairs, vec![(C, C), (C, C), (C, C), (C, D), (C, C)]);
        assert!(!strategy.grudged());
        assert_eq!(strategy.grudge_memory(), 0);
    }

    #[test]
    fn test_once_bitten_grudges_after_two_defections() {
        let mut strategy = OnceBitten::new();
        let pairs = versus(&mut strategy, &cycle("CCCDDD", 11));
        assert_eq!(
            pairs,
            vec![
                (C, C),
                (C, C),
                (C, C),
                (C, D),
                (C, D),
                (D, D),
                (D, C),
                (D, C),
                (D, C),
                (D, D),
                (D, D),
            ]
        );
        assert!(strategy.grudged());
        assert_eq!(strategy.grudge_memory(), 5);
    }

    #[test]
    fn test_once_bitten_forgives_after_grudge() {
        let mut strategy = OnceBitten::new();
        let mut opponent = script("CDDC");
        opponent.extend([C; 11]);
        let pairs = versus(&mut strategy, &opponent);

        let mut expected = vec![(C, C), (C, D), (C, D), (D, C)];
        expected.extend([(D, C); 10]);
        expected.push((C, C));
        assert_eq!(pairs, expected);
        assert!(!strategy.grudged());
        assert_eq!(strategy.grudge_memory(), 0);
    }

    #[test]
    fn test_once_bitten_retriggers_on_release() {
        // Constant defection: the grudge re-arms the round it expires.
        let mut strategy = OnceBitten::new();
        let pairs = versus(&mut strategy, &[D; 30]);
        let mut expected = vec![C, C];
        expected.extend([D; 28]);
        assert_eq!(own(&pairs), expected);
    }

    #[test]
    fn test_once_bitten_reset() {
        let mut strategy = OnceBitten::new();
        versus(&mut strategy, &[D; 3]);
        assert!(strategy.grudged());

        strategy.reset();
        assert!(!strategy.grudged());
        assert_eq!(strategy.grudge_memory(), 0);
        assert_eq!(strategy, OnceBitten::new());

        strategy.reset();
        assert_eq!(strategy, OnceBitten::new());
    }

    #[test]
    fn test_fool_me_once() {
        let classifier = FoolMeOnce.classifier();
        assert_eq!(classifier.memory_depth, MemoryDepth::Unbounded);
        assert!(!classifier.stochastic);

        assert_eq!(versus(&mut FoolMeOnce, &[C; 10]), vec![(C, C); 10]);

        let mut opponent = vec![D];
        opponent.extend([C; 9]);
        let mut expected = vec![(C, D)];
        expected.extend([(C, C); 9]);
        assert_eq!(versus(&mut FoolMeOnce, &opponent), expected);

        let mut expected = vec![(C, D); 2];
        expected.extend([(D, D); 8]);
        assert_eq!(versus(&mut FoolMeOnce, &[D; 10]), expected);

        let mut opponent = vec![D, D];
        opponent.extend([C; 9]);
        let mut expected = vec![(C, D); 2];
        expected.extend([(D, C); 9]);
        assert_eq!(versus(&mut FoolMeOnce, &opponent), expected);
    }

    #[test]
    fn test_fool_me_once_counts_beyond_any_window() {
        // The first defection lies outside a 12-round window yet still
        // decides the outcome.
        let mut window = vec![D];
        window.extend([C; 11]);

        let mut early = vec![D];
        early.extend(&window);
        let mut clean = vec![C];
        clean.extend(&window);

        let early_history =
            History::from_parts(own(&versus(&mut FoolMeOnce, &early)), early).unwrap();
        let clean_history =
            History::from_parts(own(&versus(&mut FoolMeOnce, &clean)), clean).unwrap();
        assert_eq!(FoolMeOnce.decide(&early_history), D);
        assert_eq!(FoolMeOnce.decide(&clean_history), C);
    }

    #[test]
    fn test_forgetful_fool_me_once_classifier() {
        let strategy = ForgetfulFoolMeOnce::with_seed(Seed(0));
        assert_eq!(strategy.name(), "Forgetful Fool Me Once: 0.05");
        let classifier = strategy.classifier();
        assert_eq!(classifier.memory_depth, MemoryDepth::Unbounded);
        assert!(classifier.stochastic);
        assert!(classifier.makes_use_of.is_empty());
        assert!(classifier.obeys_rules());
    }

    #[test]
    fn test_forgetful_fool_me_once_seeded_vs_alternator() {
        let mut strategy = ForgetfulFoolMeOnce::with_seed(Seed(2));
        let pairs = versus(&mut strategy, &alternator(5));
        assert_eq!(pairs, vec![(C, C), (C, D), (C, C), (C, D), (D, C)]);
        assert_eq!(strategy.d_count(), 2);
    }

    #[test]
    fn test_forgetful_fool_me_once_eventually_forgets() {
        let mut strategy = ForgetfulFoolMeOnce::with_seed(Seed(2));
        let pairs = versus(&mut strategy, &[D; 21]);
        let mut expected = vec![(C, D); 2];
        expected.extend([(D, D); 18]);
        expected.push((C, D));
        assert_eq!(pairs, expected);
        assert_eq!(strategy.d_count(), 0);
    }

    #[test]
    fn test_forgetful_fool_me_once_count_saturates() {
        let mut strategy = ForgetfulFoolMeOnce::new(0.0, Some(Seed(3))).unwrap();
        strategy.d_count = u32::MAX;
        let history = History::from_parts(vec![D], vec![D]).unwrap();
        assert_eq!(strategy.decide(&history), D);
        assert_eq!(strategy.d_count(), u32::MAX);
    }

    #[test]
    fn test_forgetful_fool_me_once_extreme_probabilities() {
        let mut never = ForgetfulFoolMeOnce::new(0.0, Some(Seed(9))).unwrap();
        let pairs = versus(&mut never, &[D; 20]);
        let mut expected = vec![C, C];
        expected.extend([D; 18]);
        assert_eq!(own(&pairs), expected);
        assert_eq!(never.d_count(), 19);

        let mut always = ForgetfulFoolMeOnce::new(1.0, Some(Seed(9))).unwrap();
        assert_eq!(own(&versus(&mut always, &[D; 20])), vec![C; 20]);
        assert_eq!(always.d_count(), 0);
    }

    #[test]
    fn test_forgetful_fool_me_once_rejects_bad_probability() {
        for p in [-0.1, 1.5, f64::NAN] {
            let err = ForgetfulFoolMeOnce::new(p, Some(Seed(1))).unwrap_err();
            assert!(matches!(err, EngineError::Configuration(_)), "{} accepted", p);
        }
    }

    #[test]
    fn test_forgetful_fool_me_once_entropy_seed() {
        let strategy = ForgetfulFoolMeOnce::new(DEFAULT_FORGET_PROBABILITY, None).unwrap();
        assert_eq!(strategy.d_count(), 0);
    }

    #[test]
    fn test_forgetful_fool_me_once_reseed() {
        let mut strategy = ForgetfulFoolMeOnce::with_seed(Seed(11));
        strategy.reseed(2);
        assert_eq!(strategy.seed(), Seed(2));
        assert_eq!(strategy, ForgetfulFoolMeOnce::with_seed(Seed(2)));
    }

    #[test]
    fn test_fool_me_forever() {
        let classifier = FoolMeForever.classifier();
        assert_eq!(classifier.memory_depth, MemoryDepth::Unbounded);
        assert!(!classifier.stochastic);

        assert_eq!(versus(&mut FoolMeForever, &[C; 20]), vec![(D, C); 20]);

        let mut expected = vec![(D, C), (D, D)];
        for _ in 0..20 {
            expected.extend([(C, C), (C, D)]);
        }
        assert_eq!(versus(&mut FoolMeForever, &alternator(42)), expected);

        let mut opponent = vec![D];
        opponent.extend([C; 19]);
        let mut expected = vec![(D, D)];
        expected.extend([(C, C); 19]);
        assert_eq!(versus(&mut FoolMeForever, &opponent), expected);

        let mut expected = vec![(D, D)];
        expected.extend([(C, D); 19]);
        assert_eq!(versus(&mut FoolMeForever, &[D; 20]), expected);
    }

    #[test]
    fn test_opening_moves() {
        let empty = History::new();
        assert_eq!(OnceBitten::new().decide(&empty), C);
        assert_eq!(FoolMeOnce.decide(&empty), C);
        assert_eq!(ForgetfulFoolMeOnce::with_seed(Seed(2)).decide(&empty), C);
        assert_eq!(FoolMeForever.decide(&empty), D);
    }

    proptest! {
        #[test]
        fn prop_fool_me_once_defects_after_second_defection(opponent in arb_moves(60)) {
            let pairs = versus(&mut FoolMeOnce, &opponent);
            for (round, (ours, _)) in pairs.iter().enumerate() {
                let seen = opponent[..round].iter().filter(|m| **m == D).count();
                let expected = if seen >= 2 { D } else { C };
                prop_assert_eq!(*ours, expected, "round {}", round + 1);
            }
        }

        #[test]
        fn prop_fool_me_forever_forgives_after_first_defection(opponent in arb_moves(60)) {
            let pairs = versus(&mut FoolMeForever, &opponent);
            for (round, (ours, _)) in pairs.iter().enumerate() {
                let bitten = opponent[..round].contains(&D);
                let expected = if bitten { C } else { D };
                prop_assert_eq!(*ours, expected, "round {}", round + 1);
            }
        }

        #[test]
        fn prop_once_bitten_grudge_shape(opponent in arb_moves(80)) {
            let mut strategy = OnceBitten::new();
            let moves = own(&versus(&mut strategy, &opponent));

            for (round, ours) in moves.iter().enumerate().take(2) {
                prop_assert_eq!(*ours, C, "round {}", round + 1);
            }
            for t in 2..moves.len() {
                let provoked = opponent[t - 2] == D && opponent[t - 1] == D;
                if moves[t] == C {
                    prop_assert!(!provoked, "cooperated after DD at round {}", t + 1);
                }
            }

            // Every run of defections starts on a trigger and is made of
            // whole grudges unless the match ends first.
            let mut t = 0;
            while t < moves.len() {
                if moves[t] == C {
                    t += 1;
                    continue;
                }
                let start = t;
                while t < moves.len() && moves[t] == D {
                    t += 1;
                }
                prop_assert!(start >= 2 && opponent[start - 2] == D && opponent[start - 1] == D);
                let run = t - start;
                let grudge = GRUDGE_ROUNDS as usize + 1;
                prop_assert!(t == moves.len() || run % grudge == 0, "run of {} at round {}", run, start + 1);
            }
        }

        #[test]
        fn prop_once_bitten_window_bounds_decision(
            prefix_a in arb_moves(40),
            prefix_b in arb_moves(40),
            window in prop::collection::vec(prop_oneof![Just(C), Just(D)], 12),
        ) {
            // Prefixes that cannot arm a grudge on their own: no DD pair and
            // a trailing cooperation so none straddles the window edge.
            let tame = |prefix: Vec<Action>| {
                let mut out: Vec<Action> = Vec::with_capacity(prefix.len() + 1);
                for m in prefix {
                    let m = if m == D && out.last() == Some(&D) { C } else { m };
                    out.push(m);
                }
                out.push(C);
                out
            };
            let decide_after = |prefix: Vec<Action>| {
                let mut opponent = tame(prefix);
                opponent.extend(&window);
                let mut strategy = OnceBitten::new();
                let pairs = versus(&mut strategy, &opponent);
                let history = History::from_parts(own(&pairs), opponent).unwrap();
                strategy.decide(&history)
            };
            prop_assert_eq!(decide_after(prefix_a), decide_after(prefix_b));
        }

        #[test]
        fn prop_reset_restores_defaults(opponent in arb_moves(60), seed in any::<u64>()) {
            let mut bitten = OnceBitten::new();
            versus(&mut bitten, &opponent);
            bitten.reset();
            prop_assert_eq!(&bitten, &OnceBitten::new());
            bitten.reset();
            prop_assert_eq!(&bitten, &OnceBitten::new());

            let mut forgetful = ForgetfulFoolMeOnce::with_seed(Seed(seed));
            versus(&mut forgetful, &opponent);
            forgetful.reset();
            prop_assert_eq!(&forgetful, &ForgetfulFoolMeOnce::with_seed(Seed(seed)));
            forgetful.reset();
            prop_assert_eq!(&forgetful, &ForgetfulFoolMeOnce::with_seed(Seed(seed)));
        }

        #[test]
        fn prop_forgetful_replays_after_reset(opponent in arb_moves(80), seed in any::<u64>()) {
            let mut strategy = ForgetfulFoolMeOnce::with_seed(Seed(seed));
            let first = versus(&mut strategy, &opponent);
            let first_count = strategy.d_count();
            strategy.reset();
            let second = versus(&mut strategy, &opponent);
            prop_assert_eq!(first, second);
            prop_assert_eq!(first_count, strategy.d_count());
        }
    }
}
