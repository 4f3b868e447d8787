use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use prep_core::Flashcard;

use crate::error::FlashcardError;
use crate::gateway::AssistantGateway;
use crate::inflight::InflightGate;

/// Whether a card set is loaded. There is no separate completed phase;
/// navigation simply clamps at the last card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashcardPhase {
    NotStarted,
    Active,
}

#[derive(Debug, Clone)]
struct CardSet {
    cards: Vec<Flashcard>,
    current: usize,
    flipped: bool,
}

/// Rendering snapshot of the flashcard engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashcardProgress {
    pub phase: FlashcardPhase,
    pub current: usize,
    pub total: usize,
    pub flipped: bool,
    pub card: Option<Flashcard>,
}

impl FlashcardProgress {
    fn not_started() -> Self {
        Self {
            phase: FlashcardPhase::NotStarted,
            current: 0,
            total: 0,
            flipped: false,
            card: None,
        }
    }
}

/// State machine for a bounded sequence of two-sided cards with
/// flip/navigate semantics.
#[derive(Clone)]
pub struct FlashcardService {
    gateway: Arc<dyn AssistantGateway>,
    set: Arc<Mutex<Option<CardSet>>>,
    gate: InflightGate,
}

impl FlashcardService {
    #[must_use]
    pub fn new(gateway: Arc<dyn AssistantGateway>) -> Self {
        Self {
            gateway,
            set: Arc::new(Mutex::new(None)),
            gate: InflightGate::new(),
        }
    }

    fn set(&self) -> MutexGuard<'_, Option<CardSet>> {
        self.set.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn phase(&self) -> FlashcardPhase {
        if self.set().is_some() {
            FlashcardPhase::Active
        } else {
            FlashcardPhase::NotStarted
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.gate.is_busy()
    }

    #[must_use]
    pub fn progress(&self) -> FlashcardProgress {
        let guard = self.set();
        let Some(set) = guard.as_ref() else {
            return FlashcardProgress::not_started();
        };
        FlashcardProgress {
            phase: FlashcardPhase::Active,
            current: set.current,
            total: set.cards.len(),
            flipped: set.flipped,
            card: set.cards.get(set.current).cloned(),
        }
    }

    /// Fetch a fresh card set and show its first card front-side up.
    ///
    /// # Errors
    ///
    /// Returns `FlashcardError::InvalidCount` for `count == 0`,
    /// `FlashcardError::Busy` while a request is in flight,
    /// `FlashcardError::EmptyDeck` when the service returns no cards, and
    /// `FlashcardError::Gateway` on failure — the engine then stays where
    /// it was.
    pub async fn generate(&self, topic: Option<&str>, count: u32) -> Result<(), FlashcardError> {
        if count == 0 {
            return Err(FlashcardError::InvalidCount);
        }
        let Some(permit) = self.gate.try_begin() else {
            return Err(FlashcardError::Busy);
        };

        let cards = self.gateway.generate_flashcards(topic, count).await?;

        if !permit.is_current() {
            return Ok(());
        }
        if cards.is_empty() {
            return Err(FlashcardError::EmptyDeck);
        }

        *self.set() = Some(CardSet {
            cards,
            current: 0,
            flipped: false,
        });
        Ok(())
    }

    /// Toggle the visible side of the current card. No-op without a card set.
    pub fn flip(&self) {
        if let Some(set) = self.set().as_mut() {
            set.flipped = !set.flipped;
        }
    }

    /// Show the next card, clamping at the last one. The card always comes
    /// back front-side up.
    pub fn next(&self) {
        if let Some(set) = self.set().as_mut() {
            if set.current + 1 < set.cards.len() {
                set.current += 1;
            }
            set.flipped = false;
        }
    }

    /// Show the previous card, clamping at the first one. The card always
    /// comes back front-side up.
    pub fn previous(&self) {
        if let Some(set) = self.set().as_mut() {
            set.current = set.current.saturating_sub(1);
            set.flipped = false;
        }
    }

    /// Jump straight to a card (progress dots), clamping past-the-end
    /// indexes to the last card.
    pub fn jump_to(&self, index: usize) {
        if let Some(set) = self.set().as_mut() {
            set.current = index.min(set.cards.len().saturating_sub(1));
            set.flipped = false;
        }
    }

    /// Discard the card set and mark any in-flight request stale.
    pub fn restart(&self) {
        self.gate.invalidate();
        *self.set() = None;
    }
}
