use crossbeam_channel::{unbounded, Receiver, Sender};
use rand::Rng;
use std::sync::{Arc, Mutex, RwLock};

mod episode;

pub use episode::Episode;

#[derive(Debug)]
pub enum StateAction {
    Play(Episode),
    PlayList { list: Vec<Episode>, index: usize },

    TogglePlay,
    ToggleLoop,
    ToggleShuffle,
    /// Explicit set, so the playback engine can report "ended" without a toggle.
    SetPlaying(bool),

    PlayNext,
    PlayPrevious,
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Everything the player UI needs to render the transport.
pub struct State {
    pub(crate) queue: Arc<Vec<Episode>>,
    pub(crate) active_index: usize,

    pub(crate) playing: bool,
    pub(crate) looping: bool,
    pub(crate) shuffling: bool,
}

impl State {
    pub fn queue(&self) -> Arc<Vec<Episode>> {
        Arc::clone(&self.queue)
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn playing(&self) -> bool {
        self.playing
    }

    /// Looping is the playback engine's business; the container only carries the flag.
    pub fn looping(&self) -> bool {
        self.looping
    }

    pub fn shuffling(&self) -> bool {
        self.shuffling
    }

    pub fn current_episode(&self) -> Option<&Episode> {
        self.queue.get(self.active_index)
    }

    pub fn has_previous(&self) -> bool {
        self.active_index > 0
    }

    /// Always true while shuffling, since "next" can land anywhere.
    pub fn has_next(&self) -> bool {
        self.shuffling || self.active_index + 1 < self.queue.len()
    }

    pub fn new() -> Self {
        State {
            queue: Arc::new(Vec::new()),
            active_index: 0,
            playing: false,
            looping: false,
            shuffling: false,
        }
    }

    fn apply(&self, actions: Vec<StateAction>) -> State {
        let mut next = self.clone();

        for action in actions {
            log::debug!("applying {:?}", action);

            match action {
                StateAction::Play(episode) => {
                    next.queue = Arc::new(vec![episode]);
                    next.active_index = 0;
                    next.playing = true;
                }
                StateAction::PlayList { list, index } => {
                    next.active_index = if list.is_empty() {
                        0
                    } else if index < list.len() {
                        index
                    } else {
                        log::warn!(
                            "play_list index {} out of range for {} episode(s)",
                            index,
                            list.len()
                        );
                        list.len() - 1
                    };
                    next.queue = Arc::new(list);
                    next.playing = true;
                }
                StateAction::TogglePlay => {
                    next.playing = !next.playing;
                }
                StateAction::ToggleLoop => {
                    next.looping = !next.looping;
                }
                StateAction::ToggleShuffle => {
                    next.shuffling = !next.shuffling;
                }
                StateAction::SetPlaying(playing) => {
                    next.playing = playing;
                }
                StateAction::PlayNext => {
                    if next.shuffling && !next.queue.is_empty() {
                        // May repeat the current index; no exclusion policy.
                        next.active_index = rand::thread_rng().gen_range(0..next.queue.len());
                    } else if next.active_index + 1 < next.queue.len() {
                        next.active_index += 1;
                    }
                }
                StateAction::PlayPrevious => {
                    if next.active_index > 0 {
                        next.active_index -= 1;
                    }
                }
                StateAction::Clear => {
                    next.queue = Arc::new(Vec::new());
                    next.active_index = 0;
                }
            }
        }

        next
    }
}

impl Default for State {
    fn default() -> Self {
        State::new()
    }
}

pub struct CurrentState {
    state: RwLock<Arc<State>>,
    subscribers: Mutex<Vec<Sender<Arc<State>>>>,
}

impl std::fmt::Debug for CurrentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CurrentState")
    }
}

impl CurrentState {
    /// Creates a state that can be gotten, updated, and subscribed to.
    pub fn new() -> Arc<CurrentState> {
        Arc::new(CurrentState {
            state: RwLock::new(Arc::new(State::new())),
            subscribers: Mutex::new(Vec::new()),
        })
    }

    pub fn get(&self) -> Arc<State> {
        self.state.read().unwrap().clone()
    }

    /// Every committed update pushes the new snapshot to every receiver
    /// still alive. Dropped receivers are pruned on the next update.
    pub fn subscribe(&self) -> Receiver<Arc<State>> {
        let (send_snapshot, receive_snapshot) = unbounded();
        self.subscribers.lock().unwrap().push(send_snapshot);

        receive_snapshot
    }

    /// Applies `actions` in order against the current snapshot, commits the
    /// result, then notifies subscribers. Transitions are serialized under
    /// the write lock, and a `get` after `update` sees the committed
    /// snapshot.
    pub fn update(&self, actions: Vec<StateAction>) {
        let next = {
            let mut curr = self.state.write().unwrap();
            let next = Arc::new(curr.apply(actions));

            // Nothing changed, nothing to push.
            if *next == **curr {
                return;
            }

            *curr = Arc::clone(&next);

            next
        };

        self.subscribers
            .lock()
            .unwrap()
            .retain(|subscriber| subscriber.send(Arc::clone(&next)).is_ok());
    }

    pub fn play(&self, episode: Episode) {
        self.update(vec![StateAction::Play(episode)]);
    }

    pub fn play_list(&self, list: Vec<Episode>, index: usize) {
        self.update(vec![StateAction::PlayList { list, index }]);
    }

    pub fn toggle_play(&self) {
        self.update(vec![StateAction::TogglePlay]);
    }

    pub fn toggle_loop(&self) {
        self.update(vec![StateAction::ToggleLoop]);
    }

    pub fn toggle_shuffle(&self) {
        self.update(vec![StateAction::ToggleShuffle]);
    }

    pub fn set_playing(&self, playing: bool) {
        self.update(vec![StateAction::SetPlaying(playing)]);
    }

    pub fn play_next(&self) {
        self.update(vec![StateAction::PlayNext]);
    }

    pub fn play_previous(&self) {
        self.update(vec![StateAction::PlayPrevious]);
    }

    pub fn clear(&self) {
        self.update(vec![StateAction::Clear]);
    }
}
