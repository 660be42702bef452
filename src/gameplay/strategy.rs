use super::action::Action;
use super::action::Phase;
use super::observation::Observation;
use crate::KNOCK_POINT;
use crate::Points;
use crate::gin::Hand;
use crate::gin::Solver;
use crate::neural::Network;
use std::cmp::Reverse;

/// Decision policy behind a seat.
pub trait Strategy {
    /// Chooses the next action for `observation.phase`.
    fn decide(&mut self, observation: &Observation) -> Action;
    /// Asked only when this player could knock and the opponent knocked
    /// improperly; accepting ends the game without scoring.
    fn accept_improper_knock(&mut self, observation: &Observation) -> bool;
}

/// Plays whatever its network outputs, decoded into the current phase.
#[derive(Debug, Clone)]
pub struct Neural {
    network: Network,
}

impl From<Network> for Neural {
    fn from(network: Network) -> Self {
        Self { network }
    }
}

impl Strategy for Neural {
    fn decide(&mut self, observation: &Observation) -> Action {
        let outputs = self.network.pulse(&observation.signals());
        let action = outputs.first().copied().unwrap_or_default();
        let index = outputs.get(1).copied().unwrap_or_default();
        Action::decode(observation.phase, action, index, observation.hand.size())
    }
    fn accept_improper_knock(&mut self, observation: &Observation) -> bool {
        let outputs = self.network.pulse(&observation.signals());
        outputs.get(2).is_some_and(|s| *s >= 0.5)
    }
}

/// Solver-driven baseline: takes the discard only if that lowers its
/// deadwood, sheds whatever leaves the least and knocks as soon as it may.
#[derive(Debug, Default)]
pub struct Greedy {
    solver: Solver,
}

impl Greedy {
    /// Index whose removal leaves the least deadwood, shedding the higher
    /// card on ties, with that deadwood.
    fn shed(&mut self, hand: &Hand) -> Option<(usize, Points)> {
        (0..hand.size())
            .filter_map(|i| hand.card_at(i).map(|c| (i, c)))
            .map(|(i, card)| {
                let mut rest = hand.clone();
                rest.discard(&card);
                (rest.deadwood_with(&mut self.solver), Reverse(card.points()), i)
            })
            .min()
            .map(|(deadwood, _, i)| (i, deadwood))
    }
}

impl Strategy for Greedy {
    fn decide(&mut self, observation: &Observation) -> Action {
        let ref hand = observation.hand;
        match observation.phase {
            Phase::Draw => match observation.discard {
                None => Action::Draw,
                Some(top) => {
                    let mut with = hand.clone();
                    with.add(top);
                    let kept = self.shed(&with).map(|(_, d)| d).unwrap_or(Points::MAX);
                    if kept < hand.deadwood_with(&mut self.solver) {
                        Action::PickupDiscard
                    } else {
                        Action::Draw
                    }
                }
            },
            Phase::Discard => match self.shed(hand) {
                Some((i, 0)) => Action::KnockGin(i),
                Some((i, d)) if d <= KNOCK_POINT => Action::Knock(i),
                Some((i, _)) => Action::Discard(i),
                None => Action::Discard(0),
            },
        }
    }
    fn accept_improper_knock(&mut self, _: &Observation) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;

    fn observe(phase: Phase, hand: &str, discard: Option<&str>) -> Observation {
        let hand = Hand::try_from(hand).unwrap();
        Observation {
            phase,
            deadwood: hand.deadwood_count(),
            hand,
            discard: discard.map(|s| Card::try_from(s).unwrap()),
            stock: 30,
            exposed: None,
        }
    }

    #[test]
    fn greedy_goes_gin() {
        let ref o = observe(Phase::Discard, "Ac 2c 3c 4c 5c 6c 7c 8c 9c Tc Kh", None);
        assert_eq!(Greedy::default().decide(o), Action::KnockGin(10));
    }

    #[test]
    fn greedy_knocks_when_able() {
        let ref o = observe(Phase::Discard, "Ad 2c 3c 4c 5c 6c 7c 8c 9c Tc Kh", None);
        assert_eq!(Greedy::default().decide(o), Action::Knock(10));
    }

    #[test]
    fn greedy_sheds_highest_deadwood() {
        let ref o = observe(Phase::Discard, "Ad 2c 3d 4c 5c 6d 7c 8d 9c Td Kh", None);
        let action = Greedy::default().decide(o);
        assert!(matches!(action, Action::Discard(9) | Action::Discard(10)), "{}", action);
    }

    #[test]
    fn greedy_picks_up_useful_discard() {
        let ref useful = observe(Phase::Draw, "Ac 2c 5d 7h 9s Jd Qh Kc 3s 6h", Some("3c"));
        let ref useless = observe(Phase::Draw, "Ac 2c 5d 7h 9s Jd Qh Kc 3s 6h", Some("Kd"));
        assert_eq!(Greedy::default().decide(useful), Action::PickupDiscard);
        assert_eq!(Greedy::default().decide(useless), Action::Draw);
        let ref empty = observe(Phase::Draw, "Ac 2c", None);
        assert_eq!(Greedy::default().decide(empty), Action::Draw);
    }

    #[test]
    fn neural_decodes_into_phase() {
        let ref mut rng = <rand::rngs::SmallRng as rand::SeedableRng>::seed_from_u64(3);
        let network = Network::random(rng);
        let mut neural = Neural::from(network);
        let ref draw = observe(Phase::Draw, "Ac 2c 5d 7h 9s Jd Qh Kc 3s 6h", Some("3c"));
        let ref discard = observe(Phase::Discard, "Ac 2c 5d 7h 9s Jd Qh Kc 3s 6h 4d", None);
        assert_eq!(neural.decide(draw).phase(), Phase::Draw);
        assert!(neural.decide(discard).index().is_some_and(|i| i < 11));
    }
}
