use state::{CurrentState, Episode};

fn episode(title: &str, members: &str, duration: u64, url: &str) -> Episode {
    Episode::default()
        .with_title(String::from(title))
        .with_members(String::from(members))
        .with_thumbnail(format!("{}.jpg", url.trim_end_matches(".mp3")))
        .with_duration(duration)
        .with_url(String::from(url))
}

// For now, this is a way for me to sanity check the state crate, not actually a useful CLI.
fn main() {
    env_logger::init();
    log::info!("driving the playback state container");

    let current = CurrentState::new();
    let updates = current.subscribe();

    let queue = vec![
        episode(
            "How we ship audio to a million listeners",
            "Dana Reyes, Priya Nair",
            3180,
            "https://cdn.example.com/episodes/shipping-audio.mp3",
        ),
        episode(
            "The archive episode",
            "Dana Reyes",
            2745,
            "https://cdn.example.com/episodes/the-archive.mp3",
        ),
        episode(
            "Listener questions, part three",
            "Dana Reyes, Sam Okafor",
            3600,
            "https://cdn.example.com/episodes/listener-questions-3.mp3",
        ),
    ];

    current.play_list(queue, 0);
    current.play_next();
    current.play_next(); // already at the end; should not move
    current.play_previous();
    current.toggle_shuffle();
    current.play_next();
    current.set_playing(false);
    current.clear();

    drop(current);

    for state in updates {
        println!(
            "playing={} looping={} shuffling={} index={} of {} | now: {:?} | prev={} next={}",
            state.playing(),
            state.looping(),
            state.shuffling(),
            state.active_index(),
            state.queue().len(),
            state.current_episode().map(|episode| episode.title()),
            state.has_previous(),
            state.has_next(),
        );
    }
}
