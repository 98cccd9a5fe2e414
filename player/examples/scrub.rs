use std::{
    env,
    f64::consts::PI,
    thread,
    time::{Duration, Instant},
};

use anyhow::Result;
use log::info;
use tableau_animation::{
    Animation, Parallel, RateFunction, Sequence, Staggered, fade_in, fade_out, indicate, move_to,
    rotate, set_color,
};
use tableau_geometry::{Color, Point};
use tableau_player::{PlaybackEvent, Player, PlayerConfig};
use tableau_scene::MobjectState;

fn main() -> Result<()> {
    env_logger::init();

    let config = match env::args().nth(1) {
        Some(path) => PlayerConfig::load(path)?,
        None => PlayerConfig::default(),
    };
    let mut player = Player::new(config)?;
    let scene = player.scene().clone();

    let dots: Vec<_> = (0..4)
        .map(|i| scene.create(MobjectState::default().at((i as f64 - 1.5, 0.0))))
        .collect();
    let square = scene.create(MobjectState::default().with_color(Color::BLUE));

    player.sequence(|r| {
        r.play(dots.iter().map(|dot| fade_in(dot).boxed()));
        r.wait(0.5);
        r.play([Staggered::new(
            dots.iter()
                .map(|dot| move_to(dot, dot.state().position + Point::UP).boxed()),
            0.25,
        )
        .boxed()]);
        r.play([Parallel::new([
            fade_in(&square).boxed(),
            set_color(&dots[0], Color::YELLOW).with_duration(2.0).boxed(),
        ])
        .boxed()]);
        r.play([Sequence::new([
            rotate(&square, PI).with_rate(RateFunction::Linear).boxed(),
            set_color(&square, Color::RED).boxed(),
            indicate(&square).boxed(),
        ])
        .boxed()]);
        r.wait_default();
        r.play(dots.iter().map(|dot| fade_out(dot).boxed()));
    });

    info!("Segments: {:?}", player.segment_markers());

    for t in [2.0, 0.3, 4.1, 1.0] {
        player.seek(t);
        info!("{} members: {}", player.time_display(), scene.len());
    }

    player.seek(1.2);
    player.prev_segment();
    info!("Previous segment: {}", player.time_display());
    player.next_segment();
    player.next_segment();
    info!("Next segments: {}", player.time_display());

    player.set_playback_rate(4.0);
    player.play();
    player.take_changes();
    let mut changes = 0;
    loop {
        let event = player.frame(Instant::now());
        changes += player.take_changes().len();
        if let Some(PlaybackEvent::Finished) = event {
            break;
        }
        thread::sleep(Duration::from_millis(16));
    }
    info!("{changes} scene changes during playback");
    match player.fps() {
        Some(fps) => info!("Played to the end at {}, {fps:.1} fps", player.time_display()),
        None => info!("Played to the end at {}", player.time_display()),
    }
    Ok(())
}
