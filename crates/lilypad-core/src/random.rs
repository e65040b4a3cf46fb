//! "Random game": pick a console, then a game inside it.

use rand::Rng;

use lilypad_vfs::Vfs;

use crate::launch::LaunchRequest;
use crate::scanner::{ScanContext, scan};

/// Console draws before giving up.
pub const RANDOM_ATTEMPTS: usize = 100;

/// Choose a game uniformly by console, then by file.
///
/// Consoles come from a root listing (so hidden, reserved and cached-empty
/// folders are never drawn). A console whose listing has no files costs one
/// attempt. Returns `None` when there are no consoles or every attempt hit
/// an empty one.
pub fn pick_random_game<R: Rng + ?Sized>(
    vfs: &dyn Vfs,
    ctx: &ScanContext<'_>,
    rng: &mut R,
) -> Option<LaunchRequest> {
    let root = scan(vfs, ctx.root, ctx);
    let consoles: Vec<&str> = root
        .entries
        .iter()
        .filter(|e| e.is_directory && e.action_kind().is_none())
        .map(|e| e.path.as_str())
        .collect();
    if consoles.is_empty() {
        log::info!("Random game: no console folders");
        return None;
    }

    for _ in 0..RANDOM_ATTEMPTS {
        let console = consoles[rng.gen_range(0..consoles.len())];
        let listing = scan(vfs, console, ctx);
        let games: Vec<&str> = listing
            .entries
            .iter()
            .filter(|e| e.is_file_item())
            .map(|e| e.path.as_str())
            .collect();
        if games.is_empty() {
            continue;
        }
        let game = games[rng.gen_range(0..games.len())];
        if let Some(request) = LaunchRequest::from_rom_path(ctx.root, game) {
            log::info!("Random game: {}", request.record_line());
            return Some(request);
        }
    }

    log::info!("Random game: nothing found after {RANDOM_ATTEMPTS} attempts");
    None
}
