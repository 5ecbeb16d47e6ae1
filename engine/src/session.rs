//! Per-community session state.
//!
//! Everything here is scoped to a single community: in-flight blackjack
//! hands, the song queue, and the active skip vote. Communities never share
//! a session, so activity in one cannot bleed into another. The chat layer
//! owns one `GuildSession` per community and serializes access to it.

use std::collections::{BTreeSet, HashMap, VecDeque};

use cookiebot_types::PlayerId;

use crate::games::blackjack::BlackjackHand;
use crate::games::GameError;

/// A queued song request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub title: String,
    pub requested_by: PlayerId,
}

/// Outcome of registering a skip vote.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoteResult {
    /// Vote counted; `votes` of `required` now cast.
    Counted { votes: usize, required: usize },
    /// This player already voted on the current track.
    AlreadyVoted,
    /// The vote counted and reached the threshold.
    Passed,
}

/// Skip vote for the currently playing track. Votes are keyed by player,
/// so repeat votes from the same player never advance the count. The vote
/// resets whenever the queue advances.
#[derive(Clone, Debug, Default)]
pub struct VoteSkip {
    required: usize,
    voters: BTreeSet<PlayerId>,
}

impl VoteSkip {
    pub fn new(required: usize) -> Self {
        Self {
            required: required.max(1),
            voters: BTreeSet::new(),
        }
    }

    pub fn vote(&mut self, player: PlayerId) -> VoteResult {
        if !self.voters.insert(player) {
            return VoteResult::AlreadyVoted;
        }
        if self.voters.len() >= self.required {
            VoteResult::Passed
        } else {
            VoteResult::Counted {
                votes: self.voters.len(),
                required: self.required,
            }
        }
    }

    pub fn votes(&self) -> usize {
        self.voters.len()
    }
}

/// FIFO song queue for one community.
#[derive(Debug, Default)]
pub struct SongQueue {
    tracks: VecDeque<Track>,
    now_playing: Option<Track>,
}

impl SongQueue {
    pub fn push(&mut self, track: Track) {
        self.tracks.push_back(track);
    }

    /// Pop the next track into the playing slot. Clears the previous
    /// track and any skip vote attached to it.
    pub fn advance(&mut self) -> Option<&Track> {
        self.now_playing = self.tracks.pop_front();
        self.now_playing.as_ref()
    }

    pub fn now_playing(&self) -> Option<&Track> {
        self.now_playing.as_ref()
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
        self.now_playing = None;
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// All per-community mutable state.
#[derive(Debug, Default)]
pub struct GuildSession {
    hands: HashMap<PlayerId, BlackjackHand>,
    queue: SongQueue,
    skip_vote: Option<VoteSkip>,
}

impl GuildSession {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Blackjack hands
    // ------------------------------------------------------------------

    /// Park a freshly dealt hand. Each player holds at most one hand at a
    /// time; dealing over a live hand is refused (the old hand stays).
    pub fn start_hand(&mut self, player: PlayerId, hand: BlackjackHand) -> Result<(), GameError> {
        if self.hands.contains_key(&player) {
            return Err(GameError::HandInProgress);
        }
        self.hands.insert(player, hand);
        Ok(())
    }

    pub fn hand_mut(&mut self, player: PlayerId) -> Option<&mut BlackjackHand> {
        self.hands.get_mut(&player)
    }

    /// Remove a hand for settlement. Also how the turn timeout path claims
    /// the hand before auto-standing it.
    pub fn take_hand(&mut self, player: PlayerId) -> Option<BlackjackHand> {
        self.hands.remove(&player)
    }

    pub fn active_hands(&self) -> usize {
        self.hands.len()
    }

    // ------------------------------------------------------------------
    // Song queue
    // ------------------------------------------------------------------

    pub fn queue(&self) -> &SongQueue {
        &self.queue
    }

    pub fn enqueue_track(&mut self, track: Track) -> usize {
        self.queue.push(track);
        self.queue.len()
    }

    /// Advance to the next track, resetting the skip vote.
    pub fn next_track(&mut self) -> Option<&Track> {
        self.skip_vote = None;
        self.queue.advance()
    }

    pub fn stop_playback(&mut self) {
        self.skip_vote = None;
        self.queue.clear();
    }

    /// Register a skip vote against the current track. `required` is the
    /// threshold for this vote round (typically derived from listener
    /// count); it is fixed when the first vote arrives. Listener-count
    /// changes mid-round do not retarget the running vote; a new threshold
    /// only takes effect once the queue advances and the vote resets.
    pub fn vote_skip(&mut self, player: PlayerId, required: usize) -> VoteResult {
        let vote = self.skip_vote.get_or_insert_with(|| VoteSkip::new(required));
        let result = vote.vote(player);
        if result == VoteResult::Passed {
            self.skip_vote = None;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::blackjack::BlackjackHand;
    use crate::games::GameRng;

    fn dealt_hand() -> BlackjackHand {
        let mut rng = GameRng::from_seed(1);
        BlackjackHand::deal(10, &mut rng).unwrap()
    }

    #[test]
    fn test_one_hand_per_player() {
        let mut session = GuildSession::new();
        session.start_hand(7, dealt_hand()).unwrap();
        assert!(matches!(
            session.start_hand(7, dealt_hand()),
            Err(GameError::HandInProgress)
        ));
        assert_eq!(session.active_hands(), 1);
    }

    #[test]
    fn test_players_hold_independent_hands() {
        let mut session = GuildSession::new();
        session.start_hand(1, dealt_hand()).unwrap();
        session.start_hand(2, dealt_hand()).unwrap();
        assert_eq!(session.active_hands(), 2);

        let taken = session.take_hand(1).unwrap();
        assert_eq!(taken.wager(), 10);
        assert_eq!(session.active_hands(), 1);
        assert!(session.hand_mut(2).is_some());
    }

    #[test]
    fn test_take_hand_allows_redeal() {
        let mut session = GuildSession::new();
        session.start_hand(5, dealt_hand()).unwrap();
        session.take_hand(5).unwrap();
        session.start_hand(5, dealt_hand()).unwrap();
    }

    #[test]
    fn test_queue_is_fifo() {
        let mut session = GuildSession::new();
        session.enqueue_track(Track {
            title: "first".into(),
            requested_by: 1,
        });
        session.enqueue_track(Track {
            title: "second".into(),
            requested_by: 2,
        });

        assert_eq!(session.next_track().unwrap().title, "first");
        assert_eq!(session.queue().now_playing().unwrap().title, "first");
        assert_eq!(session.next_track().unwrap().title, "second");
        assert!(session.next_track().is_none());
    }

    #[test]
    fn test_stop_clears_queue_and_playing_slot() {
        let mut session = GuildSession::new();
        session.enqueue_track(Track {
            title: "first".into(),
            requested_by: 1,
        });
        session.next_track();
        session.enqueue_track(Track {
            title: "second".into(),
            requested_by: 1,
        });
        session.stop_playback();
        assert!(session.queue().is_empty());
        assert!(session.queue().now_playing().is_none());
    }

    #[test]
    fn test_duplicate_skip_votes_do_not_count() {
        let mut session = GuildSession::new();
        assert_eq!(
            session.vote_skip(1, 3),
            VoteResult::Counted { votes: 1, required: 3 }
        );
        assert_eq!(session.vote_skip(1, 3), VoteResult::AlreadyVoted);
        assert_eq!(
            session.vote_skip(2, 3),
            VoteResult::Counted { votes: 2, required: 3 }
        );
        assert_eq!(session.vote_skip(3, 3), VoteResult::Passed);
    }

    #[test]
    fn test_skip_vote_resets_when_track_advances() {
        let mut session = GuildSession::new();
        session.enqueue_track(Track {
            title: "first".into(),
            requested_by: 1,
        });
        session.vote_skip(1, 2);
        session.next_track();
        // Fresh vote round: the same player counts again.
        assert_eq!(
            session.vote_skip(1, 2),
            VoteResult::Counted { votes: 1, required: 2 }
        );
    }

    #[test]
    fn test_threshold_is_fixed_for_the_round() {
        let mut session = GuildSession::new();
        assert_eq!(
            session.vote_skip(1, 2),
            VoteResult::Counted { votes: 1, required: 2 }
        );
        // Listeners joined mid-round; the running vote keeps the threshold
        // it started with.
        assert_eq!(session.vote_skip(2, 5), VoteResult::Passed);
    }

    #[test]
    fn test_threshold_of_zero_still_needs_one_vote() {
        let mut vote = VoteSkip::new(0);
        assert_eq!(vote.vote(9), VoteResult::Passed);
    }
}
