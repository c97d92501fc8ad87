//! Text shown on the HUD and in the message box.

use crate::config::StartKey;
use crate::session::{Session, SessionPhase};

pub fn status_line(session: &Session, total_rings: usize, now: f64, start_key: StartKey) -> String {
    if session.phase() == SessionPhase::NotStarted {
        return format!("Press {} to start", start_key.label());
    }
    format!(
        "Time: {:.1}s | Rings: {}/{}",
        session.elapsed(now),
        session.rings_collected(),
        total_rings
    )
}

pub fn welcome_text(total_rings: usize, start_key: StartKey) -> String {
    format!(
        "Welcome to Space Race!\n\nRules:\n- Collect all {total_rings} rings\n- Avoid planets\n- Press W to move forward\n- Use mouse to steer\n- Press {} to start",
        start_key.label()
    )
}

pub fn started_text() -> &'static str {
    "Game Started! Press W to move forward and collect all rings as fast as you can!"
}

pub fn ring_collected_text(remaining: usize) -> String {
    format!("Ring collected! {remaining} rings remaining.")
}

pub fn crashed_text(start_key: StartKey) -> String {
    format!(
        "Game Over! You crashed into a planet. Press {} to restart.",
        start_key.label()
    )
}

pub fn won_text(elapsed: f64, start_key: StartKey) -> String {
    format!(
        "You Win! Time: {elapsed:.1}s - Press {} to restart",
        start_key.label()
    )
}
