//! Player/platform collision
//!
//! Platforms only ever stop vertical motion; bodies pass through them
//! sideways. The central platform is solid from both faces, so its ground
//! test is a plain contact test, while the small side platforms use a
//! proximity tolerance around the face the player's gravity points at.

use crate::game::constants::player::GROUND_TOLERANCE;
use crate::game::state::{Arena, Gravity, Platform, Player};
use crate::util::rect::Rect;

/// Whether the player can jump off something this frame
pub fn is_on_ground(player: &Player, arena: &Arena) -> bool {
    let body = player.body();

    if touches_central(&body, arena.central_platform()) {
        return true;
    }

    arena
        .side_platforms()
        .any(|platform| near_side_platform(&body, platform, player.gravity))
}

/// Contact (inclusive on the vertical axis) with the central platform
fn touches_central(body: &Rect, platform: &Platform) -> bool {
    body.overlaps_horizontally(platform)
        && body.bottom() >= platform.top()
        && body.top() <= platform.bottom()
}

/// Leading edge within tolerance of the platform face gravity points at
fn near_side_platform(body: &Rect, platform: &Platform, gravity: Gravity) -> bool {
    if !body.overlaps_horizontally(platform) {
        return false;
    }
    match gravity {
        Gravity::Down => (body.bottom() - platform.top()).abs() < GROUND_TOLERANCE,
        Gravity::Up => (body.top() - platform.bottom()).abs() < GROUND_TOLERANCE,
    }
}

/// Push the player out of any platform it moved into along its gravity.
///
/// A falling player lands on a top face only if its bottom edge has not
/// already passed the platform's bottom; a rising player under inverted
/// gravity lands on an underside only if its top edge has not passed the
/// platform's top.
pub fn resolve_platforms(player: &mut Player, arena: &Arena) {
    for platform in &arena.platforms {
        let body = player.body();
        if !body.overlaps(platform) {
            continue;
        }

        let vy = player.velocity.y;
        if vy > 0.0 && player.gravity == Gravity::Down && body.bottom() < platform.bottom() {
            player.position.y = platform.top() - player.size.y;
            player.velocity.y = 0.0;
        } else if vy < 0.0 && player.gravity == Gravity::Up && body.top() > platform.top() {
            player.position.y = platform.bottom();
            player.velocity.y = 0.0;
        }
    }
}
