//! Card store - the live card collection and its stacking counter
//!
//! Cards are kept in insertion order; draw order comes from `stack_order`,
//! which is handed out by a single session-wide counter that only moves up.
//! Operations on ids that are no longer present are silent no-ops: a drag
//! update racing a deletion is expected and harmless.

use super::{Card, CardId, CardPatch, Point, CARD_WIDTH};
use chrono::Local;
use rand::Rng;
use std::collections::HashSet;

/// Alphabet for generated card ids (base 36, uppercase)
const ID_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ID_LEN: usize = 6;

/// Maximum tilt either way, in degrees
pub const MAX_ROTATION: f32 = 4.0;

/// Where new cards land relative to the device anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Horizontal jitter, applied uniformly in `-jitter..=jitter`
    pub jitter: i32,
    /// Rows between the anchor and the card's top edge
    pub lift: i32,
}

impl Default for Placement {
    fn default() -> Self {
        Self { jitter: 4, lift: 14 }
    }
}

/// Owner of all live cards
#[derive(Debug, Default)]
pub struct CardStore {
    cards: Vec<Card>,
    /// Highest stack order ever handed out
    counter: u64,
    /// Every id issued this session, live or not
    issued: HashSet<CardId>,
    placement: Placement,
}

impl CardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_placement(placement: Placement) -> Self {
        Self {
            placement,
            ..Self::default()
        }
    }

    /// Print a new card near `anchor`
    ///
    /// Returns `None` (and changes nothing) when the text is blank.
    pub fn create(&mut self, text: &str, anchor: Point) -> Option<Card> {
        self.create_with(text, anchor, &mut rand::thread_rng())
    }

    /// [`create`](Self::create) with an explicit random source
    pub fn create_with<R: Rng + ?Sized>(
        &mut self,
        text: &str,
        anchor: Point,
        rng: &mut R,
    ) -> Option<Card> {
        if text.trim().is_empty() {
            return None;
        }

        let id = self.fresh_id(rng);
        let jitter = if self.placement.jitter > 0 {
            rng.gen_range(-self.placement.jitter..=self.placement.jitter)
        } else {
            0
        };
        let position = Point::new(
            anchor.x - CARD_WIDTH as i32 / 2 + jitter,
            anchor.y - self.placement.lift,
        );

        let card = Card {
            id,
            text: text.to_string(),
            timestamp: Local::now().format("%H:%M").to_string(),
            position,
            rotation: rng.gen_range(-MAX_ROTATION..=MAX_ROTATION),
            stack_order: self.next_stack_order(),
        };

        tracing::debug!(
            id = %card.id,
            stack_order = card.stack_order,
            x = card.position.x,
            y = card.position.y,
            "card printed"
        );

        self.cards.push(card.clone());
        Some(card)
    }

    /// Merge `patch` into the card with `id`; absent ids are ignored
    pub fn update(&mut self, id: &CardId, patch: CardPatch) {
        let Some(card) = self.cards.iter_mut().find(|c| &c.id == id) else {
            tracing::trace!(%id, "update for missing card ignored");
            return;
        };

        if let Some(position) = patch.position {
            card.position = position;
        }
        if let Some(stack_order) = patch.stack_order {
            card.stack_order = stack_order;
            // Keep the counter the session maximum so it never repeats a value
            self.counter = self.counter.max(stack_order);
        }
    }

    /// Remove the card with `id`; absent ids are ignored
    pub fn delete(&mut self, id: &CardId) {
        let before = self.cards.len();
        self.cards.retain(|c| &c.id != id);
        if self.cards.len() != before {
            tracing::debug!(%id, "card deleted");
        }
    }

    /// Raise the card with `id` above every other card
    pub fn focus(&mut self, id: &CardId) {
        if !self.contains(id) {
            return;
        }
        let stack_order = self.next_stack_order();
        self.update(id, CardPatch::stack_order(stack_order));
    }

    pub fn get(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|c| &c.id == id)
    }

    pub fn contains(&self, id: &CardId) -> bool {
        self.get(id).is_some()
    }

    /// Cards in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Cards in draw order (bottom first)
    pub fn by_stack_order(&self) -> Vec<&Card> {
        let mut cards: Vec<&Card> = self.cards.iter().collect();
        cards.sort_by_key(|c| c.stack_order);
        cards
    }

    /// Topmost card under `point`
    pub fn top_at(&self, point: Point) -> Option<&Card> {
        self.cards
            .iter()
            .filter(|c| c.contains(point))
            .max_by_key(|c| c.stack_order)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Highest stack order handed out so far (0 before the first card)
    pub fn max_stack_order(&self) -> u64 {
        self.counter
    }

    fn next_stack_order(&mut self) -> u64 {
        self.counter += 1;
        self.counter
    }

    fn fresh_id<R: Rng + ?Sized>(&mut self, rng: &mut R) -> CardId {
        loop {
            let raw: String = (0..ID_LEN)
                .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
                .collect();
            let id = CardId::new(raw);
            if self.issued.insert(id.clone()) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const ANCHOR: Point = Point::new(60, 30);

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_first_cards_get_consecutive_stack_orders() {
        let mut store = CardStore::new();
        let mut rng = rng();

        let hello = store.create_with("hello", ANCHOR, &mut rng).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(hello.text, "hello");
        assert_eq!(hello.stack_order, 1);
        assert!(!hello.id.as_str().is_empty());

        let world = store.create_with("world", ANCHOR, &mut rng).unwrap();
        assert_eq!(world.stack_order, 2);
        assert_eq!(store.get(&hello.id).unwrap().stack_order, 1);
    }

    #[test]
    fn test_stack_orders_strictly_increase_and_ids_unique() {
        let mut store = CardStore::new();
        let mut rng = rng();
        let mut last = 0;
        let mut ids = HashSet::new();

        for i in 0..200 {
            let card = store
                .create_with(&format!("message {}", i), ANCHOR, &mut rng)
                .unwrap();
            assert!(card.stack_order > last);
            last = card.stack_order;
            assert!(ids.insert(card.id.clone()), "duplicate id {}", card.id);
            assert_eq!(card.id.as_str().len(), ID_LEN);
        }
    }

    #[test]
    fn test_blank_text_creates_nothing() {
        let mut store = CardStore::new();
        assert!(store.create("", ANCHOR).is_none());
        assert!(store.create("  \n\t ", ANCHOR).is_none());
        assert!(store.is_empty());
        assert_eq!(store.max_stack_order(), 0);
    }

    #[test]
    fn test_spawn_position_and_rotation_bounds() {
        let mut store = CardStore::new();
        let mut rng = rng();
        let placement = Placement::default();

        for _ in 0..100 {
            let card = store.create_with("tossed", ANCHOR, &mut rng).unwrap();
            let centered = ANCHOR.x - CARD_WIDTH as i32 / 2;
            assert!((card.position.x - centered).abs() <= placement.jitter);
            assert_eq!(card.position.y, ANCHOR.y - placement.lift);
            assert!((-MAX_ROTATION..=MAX_ROTATION).contains(&card.rotation));
        }
    }

    #[test]
    fn test_focus_raises_to_top() {
        let mut store = CardStore::new();
        let mut rng = rng();
        let a = store.create_with("a", ANCHOR, &mut rng).unwrap();
        let _b = store.create_with("b", ANCHOR, &mut rng).unwrap();
        let _c = store.create_with("c", ANCHOR, &mut rng).unwrap();

        store.focus(&a.id);

        let focused = store.get(&a.id).unwrap().stack_order;
        let max = store.iter().map(|c| c.stack_order).max().unwrap();
        assert_eq!(focused, max);
        assert_eq!(focused, 4);
        assert_eq!(store.by_stack_order().last().unwrap().id, a.id);
    }

    #[test]
    fn test_focus_keeps_counter_monotonic_after_delete() {
        let mut store = CardStore::new();
        let mut rng = rng();
        let a = store.create_with("a", ANCHOR, &mut rng).unwrap();
        let b = store.create_with("b", ANCHOR, &mut rng).unwrap();

        store.delete(&b.id);
        let c = store.create_with("c", ANCHOR, &mut rng).unwrap();
        assert_eq!(c.stack_order, 3, "counter must not reuse b's order");

        store.focus(&a.id);
        assert_eq!(store.get(&a.id).unwrap().stack_order, 4);
    }

    #[test]
    fn test_operations_on_deleted_card_are_noops() {
        let mut store = CardStore::new();
        let mut rng = rng();
        let a = store.create_with("a", ANCHOR, &mut rng).unwrap();
        let b = store.create_with("b", ANCHOR, &mut rng).unwrap();

        store.delete(&a.id);
        let snapshot: Vec<Card> = store.iter().cloned().collect();
        let counter = store.max_stack_order();

        store.update(&a.id, CardPatch::position(Point::new(1, 1)));
        store.focus(&a.id);
        store.delete(&a.id);

        let after: Vec<Card> = store.iter().cloned().collect();
        assert_eq!(snapshot, after);
        assert_eq!(store.max_stack_order(), counter);
        assert_eq!(store.get(&b.id).unwrap().stack_order, 2);
    }

    #[test]
    fn test_update_merges_only_given_fields() {
        let mut store = CardStore::new();
        let mut rng = rng();
        let card = store.create_with("drag me", ANCHOR, &mut rng).unwrap();

        store.update(&card.id, CardPatch::position(Point::new(-5, 3)));
        let moved = store.get(&card.id).unwrap();
        assert_eq!(moved.position, Point::new(-5, 3));
        assert_eq!(moved.stack_order, card.stack_order);
        assert_eq!(moved.rotation, card.rotation);
        assert_eq!(moved.text, card.text);
        assert_eq!(moved.timestamp, card.timestamp);
    }

    #[test]
    fn test_explicit_stack_order_raises_counter() {
        let mut store = CardStore::new();
        let mut rng = rng();
        let card = store.create_with("a", ANCHOR, &mut rng).unwrap();

        store.update(&card.id, CardPatch::stack_order(40));
        let next = store.create_with("b", ANCHOR, &mut rng).unwrap();
        assert_eq!(next.stack_order, 41);
    }

    #[test]
    fn test_rotation_survives_drag_and_focus() {
        let mut store = CardStore::new();
        let mut rng = rng();
        let card = store.create_with("steady", ANCHOR, &mut rng).unwrap();
        let other = store.create_with("other", ANCHOR, &mut rng).unwrap();

        for step in 0..20 {
            store.update(&card.id, CardPatch::position(Point::new(step, -step)));
            store.focus(&card.id);
            store.focus(&other.id);
        }

        assert_eq!(store.get(&card.id).unwrap().rotation, card.rotation);
        assert_eq!(store.get(&other.id).unwrap().rotation, other.rotation);
    }

    #[test]
    fn test_top_at_prefers_highest_stack_order() {
        let mut store = CardStore::with_placement(Placement { jitter: 0, lift: 0 });
        let mut rng = rng();
        let under = store.create_with("under", ANCHOR, &mut rng).unwrap();
        let over = store.create_with("over", ANCHOR, &mut rng).unwrap();

        assert_eq!(store.top_at(ANCHOR).unwrap().id, over.id);
        store.focus(&under.id);
        assert_eq!(store.top_at(ANCHOR).unwrap().id, under.id);
        assert!(store.top_at(Point::new(-100, -100)).is_none());
    }

    #[test]
    fn test_insertion_order_independent_of_stack_order() {
        let mut store = CardStore::new();
        let mut rng = rng();
        let a = store.create_with("a", ANCHOR, &mut rng).unwrap();
        let b = store.create_with("b", ANCHOR, &mut rng).unwrap();
        store.focus(&a.id);

        let order: Vec<&CardId> = store.iter().map(|c| &c.id).collect();
        assert_eq!(order, vec![&a.id, &b.id]);
        let draw: Vec<&CardId> = store.by_stack_order().into_iter().map(|c| &c.id).collect();
        assert_eq!(draw, vec![&b.id, &a.id]);
    }
}
