//! `slidekit present`: the interactive presenter loop.
//!
//! Everything runs on one thread inside a `LocalSet`. A blocking reader task
//! forwards terminal events over a channel; the loop routes keys, waits on a
//! redraw tick so debounced steps and mirror updates show up, and redraws
//! only when the frame would change.

use std::io;
use std::rc::Rc;
use std::time::Duration;

use slidekit::config::Config;
use slidekit::deck::{load_deck_file, DeckFile};
use slidekit::error::PresentError;
use slidekit::presenter::{KeyOutcome, Presentation, PresentationSettings};
use slidekit::sync::{BusPeer, LocalBus};
use slidekit::ui::render::FrameRenderer;
use slidekit::ui::settings::{KEY_CHANNEL_CAPACITY, REDRAW_TICK_MS};
use slidekit::ui::terminal::{
    read_terminal_events, terminal_size, ReaderStop, TerminalEvent, TerminalGuard,
};
use slidekit::ui::theme::ThemeRegistry;
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, LocalSet};
use tokio::time::MissedTickBehavior;

use crate::cli::PresentArgs;

pub(crate) async fn run_present_mode(
    args: &PresentArgs,
    config: &Config,
) -> Result<(), PresentError> {
    let deck = load_deck_file(&args.deck)?;
    let settings = PresentationSettings::resolve(
        &config.presentation,
        &deck,
        args.controls,
        args.debounce_ms.map(Duration::from_millis),
    );
    let registry = ThemeRegistry::from_overrides(&config.themes);
    let theme_name = args.theme.as_deref().unwrap_or(&config.display.theme);
    let renderer = FrameRenderer::new(registry.resolve(theme_name), config.display.color);

    tracing::info!(
        deck = %args.deck.display(),
        slides = deck.slides.len(),
        controls = settings.keyboard_controls.as_str(),
        debounce_ms = settings.debounce_window.as_millis() as u64,
        mirror = args.mirror,
        "starting presentation"
    );

    let local = LocalSet::new();
    local
        .run_until(present_loop(&deck, &settings, config, &renderer, args.mirror))
        .await
}

async fn present_loop(
    deck: &DeckFile,
    settings: &PresentationSettings,
    config: &Config,
    renderer: &FrameRenderer,
    mirror: bool,
) -> Result<(), PresentError> {
    let bus = LocalBus::new();
    let presenter_peer = Rc::new(bus.connect());
    let presenter = Presentation::build(
        deck,
        settings,
        &config.display,
        presenter_peer.clone(),
        true,
    );
    let mut pumps = vec![spawn_pump(Rc::clone(&presenter_peer))];
    let audience = if mirror {
        let peer = Rc::new(bus.connect());
        let replica = Presentation::build(deck, settings, &config.display, peer.clone(), false);
        pumps.push(spawn_pump(peer));
        Some(replica)
    } else {
        None
    };

    let guard = TerminalGuard::acquire()?;
    let (tx, mut rx) = mpsc::channel(KEY_CHANNEL_CAPACITY);
    let stop = ReaderStop::default();
    let reader = tokio::task::spawn_blocking({
        let stop = stop.clone();
        move || read_terminal_events(tx, stop)
    });

    let mut tick = tokio::time::interval(Duration::from_millis(REDRAW_TICK_MS));
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut size = terminal_size();
    let mut last_frame = None;
    let mut stdout = io::stdout();
    let mut draw_result = Ok(());

    presenter.sync_keyboard();
    loop {
        let mirror_position = audience.as_ref().map(Presentation::position);
        let frame = presenter.frame_key(mirror_position, size);
        if last_frame.as_ref() != Some(&frame) {
            let view = presenter.frame_view(mirror_position);
            if let Err(err) = renderer.draw(&mut stdout, &view, size) {
                draw_result = Err(err);
                break;
            }
            last_frame = Some(frame);
        }

        tokio::select! {
            event = rx.recv() => match event {
                Some(TerminalEvent::Key(input)) => {
                    if presenter.handle_key(&input) == KeyOutcome::Quit {
                        tracing::info!(slide = presenter.current_slide(), "quit requested");
                        break;
                    }
                }
                Some(TerminalEvent::Resize(cols, rows)) => size = (cols, rows),
                None => break,
            },
            _ = tick.tick() => {}
        }
        presenter.sync_keyboard();
    }

    stop.stop();
    drop(rx);
    presenter.unmount();
    if let Some(replica) = &audience {
        replica.unmount();
    }
    for pump in pumps {
        pump.abort();
    }
    drop(guard);

    draw_result?;
    match reader.await {
        Ok(result) => result?,
        Err(err) => return Err(io::Error::other(err).into()),
    }
    Ok(())
}

fn spawn_pump(peer: Rc<BusPeer>) -> JoinHandle<()> {
    tokio::task::spawn_local(async move { peer.run().await })
}
