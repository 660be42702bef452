use super::player::Player;
use crate::cards::*;
use rand::Rng;

/// Two seats, the stock and the discard pile.
#[derive(Debug)]
pub struct Table {
    seats: Vec<Player>,
    stock: Deck,
    discards: Vec<Card>,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            seats: Vec::with_capacity(2),
            stock: Deck::from(Vec::new()),
            discards: Vec::new(),
        }
    }
}

impl Table {
    /// Seats a player in the next free seat. A player already seated, or
    /// a third player, is refused.
    pub fn seat(&mut self, player: Player) -> anyhow::Result<()> {
        if self.seats.iter().any(|p| p.id() == player.id()) {
            return Err(anyhow::anyhow!("player {} is already seated", player.id()));
        }
        if self.is_full() {
            return Err(anyhow::anyhow!("table is full"));
        }
        self.seats.push(player);
        Ok(())
    }
    pub fn is_full(&self) -> bool {
        self.seats.len() == 2
    }

    /// Collects every card and shuffles a fresh stock.
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.stock = Deck::new(rng);
        self.discards.clear();
        self.seats.iter_mut().for_each(|p| p.hand_mut().clear());
    }

    pub fn player(&self, seat: usize) -> &Player {
        &self.seats[seat]
    }
    pub fn player_mut(&mut self, seat: usize) -> &mut Player {
        &mut self.seats[seat]
    }
    pub fn players(&self) -> &[Player] {
        &self.seats
    }

    pub fn stock(&self) -> usize {
        self.stock.len()
    }
    pub fn draw(&mut self) -> Option<Card> {
        self.stock.draw()
    }
    pub fn top(&self) -> Option<Card> {
        self.discards.last().copied()
    }
    pub fn pickup(&mut self) -> Option<Card> {
        self.discards.pop()
    }
    pub fn discard(&mut self, card: Card) {
        self.discards.push(card);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::Greedy;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn seats_two_rejects_third() {
        let mut table = Table::default();
        assert!(table.seat(Player::new(1, Greedy::default())).is_ok());
        assert!(table.seat(Player::new(2, Greedy::default())).is_ok());
        assert!(table.seat(Player::new(3, Greedy::default())).is_err());
        assert_eq!(table.player(0).id(), 1);
        assert_eq!(table.player(1).id(), 2);
    }

    #[test]
    fn rejects_same_player_twice() {
        let mut table = Table::default();
        assert!(table.seat(Player::new(1, Greedy::default())).is_ok());
        assert!(table.seat(Player::new(1, Greedy::default())).is_err());
        assert_eq!(table.players().len(), 1);
    }

    #[test]
    fn reset_restores_full_stock() {
        let ref mut rng = SmallRng::seed_from_u64(5);
        let mut table = Table::default();
        table.seat(Player::new(1, Greedy::default())).unwrap();
        table.reset(rng);
        let card = table.draw().unwrap();
        table.player_mut(0).take(card);
        let shed = table.player_mut(0).shed(0).unwrap();
        table.discard(shed);
        assert_eq!(table.top(), Some(card));
        table.reset(rng);
        assert_eq!(table.stock(), 52);
        assert_eq!(table.top(), None);
        assert_eq!(table.player(0).hand().size(), 0);
    }
}
