// Flipbook sketcher.
// What you see:
// • A white canvas with a frame strip underneath. Hold Left Mouse to draw.
// • N new frame, D duplicate, X/Delete remove, Left/Right step through frames.
// • Click a thumbnail to jump to it. Space plays the flipbook, S stops it.
// • E toggles the eraser, [ and ] change brush size, 1..8 pick a colour. ESC quits.

use std::time::{Duration, Instant};

use clap::Parser;
use flipbook::draw::{Drawer, compose, draw_crosshair, draw_text_5x7, hud_text, screen_size};
use flipbook::thumbnail::hit_test;
use flipbook::{Cli, Command, Config, Error, FrameBuffer, Session};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    /* --- Settings + session ---
       Visual: nothing yet; one blank frame exists in memory. */
    let config = Config::from_cli(&Cli::parse())?;
    tracing::info!(?config, "starting flipbook");
    let mut session = Session::new(&config);

    /* --- Window + reusable screen buffer ---
       Visual: window opens with an empty canvas and one thumbnail. */
    let mut drawer = Drawer::new("Flipbook", config.width, config.height)?;
    let (sw, sh) = screen_size(config.width, config.height);
    let mut screen = FrameBuffer::filled(sw, sh, 0);

    let mut first_thumb = 0; // strip scroll, for mapping clicks to frames
    let mut was_down = false;

    /* --- HUD / FPS --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut fps = 0.0_f32;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();

        /* 1) Keys -> commands */
        for cmd in drawer.pressed_commands() {
            session.apply(cmd, now);
        }

        /* 2) Mouse: press starts a stroke (canvas) or picks a frame (strip),
              drag extends the stroke, release commits it. */
        let down = drawer.left_mouse_down();
        let pos = drawer.mouse_pos();
        match (was_down, down, pos) {
            (false, true, Some((mx, my))) if my < config.height => {
                session.pointer_down(mx as i32, my as i32);
            }
            (false, true, Some((mx, my))) => {
                if let Some(i) = hit_test(mx, my - config.height, first_thumb, session.store.len()) {
                    session.apply(Command::SelectFrame(i), now);
                }
            }
            (true, true, Some((mx, my))) if session.is_drawing() => {
                session.pointer_move(mx as i32, my as i32);
            }
            (true, false, _) => session.pointer_up(),
            _ => {}
        }
        was_down = down;

        /* 3) Playback: maybe flip to the next frame. */
        session.tick(now);

        /* 4) Compose canvas + strip, then crosshair and HUD on top. */
        first_thumb = compose(&mut screen, session.canvas.buffer(), session.store.thumbnails());

        if let Some((mx, my)) = pos {
            if my < config.height {
                let reach = session.brush.size as i32 / 2 + 4;
                draw_crosshair(&mut screen, mx as i32, my as i32, reach, 0x00_FF_33_99);
            }
        }

        let hud = hud_text(
            session.store.cursor(),
            session.store.len(),
            session.brush.size,
            session.brush.erasing,
            session.store.is_playing(),
            fps,
        );
        draw_text_5x7(&mut screen, 8, 8, &hud, 0x00_30_30_30, 0x00_E0_E0_E0);

        /* 5) Present to the window (this is when the on-screen image updates). */
        drawer.present(&screen)?;

        /* 6) FPS counter (HUD + debug log once per second) */
        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            fps = frames_this_second as f32 / secs;
            tracing::debug!(fps, "frame rate");
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    tracing::info!(frames = session.store.len(), "window closed");
    Ok(())
}
