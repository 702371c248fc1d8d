//! Fixed timestep simulation tick
//!
//! Core runner loop that advances simulation deterministically.

use super::difficulty::{day_night_tint, difficulty};
use super::spawn::{hop_displacement, spawn_obstacle};
use super::state::{GameEvent, GamePhase, HikeState};
use crate::consts::*;
use crate::tuning::HikeTuning;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer/touch currently held down
    pub pointer_held: bool,
}

/// Advance the runner by one 20 ms step
pub fn tick(state: &mut HikeState, input: &TickInput, tuning: &HikeTuning) {
    state.pointer_history.push(input.pointer_held);
    state.difficulty = difficulty(state.score);
    state.tint = day_night_tint(state.time_ticks, tuning.day_night_period_ticks);

    if state.phase == GamePhase::Playing {
        state.time_ticks += 1;
        state.score = state.time_ticks as f32 / TICKS_PER_SCORE;

        if state.spawner.advance(TICK_MS as f32) {
            spawn_obstacle(state, tuning);
            let difficulty = state.difficulty;
            state
                .spawner
                .reschedule(&mut state.rng, tuning.spawn_delay_ms, difficulty);
        }

        update_jumps(state, tuning);
        update_obstacles(state);
        cull_obstacles(state, tuning);
    }

    check_collisions(state, tuning);
}

/// Per-avatar input delay. The party jumps in a ripple from the front, and the
/// ripple tightens as avatars drop out.
pub fn jump_delays(state: &HikeState, tuning: &HikeTuning) -> [usize; PLAYER_COUNT] {
    let [_, middle, _] = tuning.jump_delays;
    if state.players[2].active {
        tuning.jump_delays
    } else if state.players[1].active {
        [middle, 0, 0]
    } else {
        [0; PLAYER_COUNT]
    }
}

/// Two-phase jump: constant-speed rise while held, then gravity fall to rest
fn update_jumps(state: &mut HikeState, tuning: &HikeTuning) {
    let delays = jump_delays(state, tuning);
    let max_line = tuning.max_jump_line();
    let ground_line = state.ground_line;
    let speed = state.difficulty;

    for (player, delay) in state.players.iter_mut().zip(delays) {
        if !player.active {
            continue;
        }

        if state.pointer_history.held(delay) {
            if player.bottom() >= ground_line {
                player.jumping = true;
            }
        } else {
            player.jumping = false;
        }

        let at_max_height = player.bottom() <= max_line;
        if player.jumping && !at_max_height {
            // Rise at constant speed, stopping at the max-jump line
            let half_height = player.size.y / 2.0;
            player.pos.y = (player.pos.y + tuning.jump_speed * speed).max(max_line - half_height);
            player.velocity = -tuning.jump_speed;
        } else {
            player.jumping = false;
            player.velocity += tuning.gravity;
            player.pos.y += player.velocity * speed;

            if player.bottom() >= ground_line {
                player.pos.y = player.rest_pos.y;
                player.velocity = 0.0;
            }
        }
    }
}

fn update_obstacles(state: &mut HikeState) {
    let speed = state.difficulty;
    let t = state.time_ticks as f32;
    let hop_now = hop_displacement(t);
    let hop_prev = hop_displacement(t - 1.0);

    for obstacle in &mut state.obstacles {
        obstacle.pos += obstacle.vel * speed;
        if obstacle.rotation_speed != 0.0 {
            obstacle.rotation += obstacle.rotation_speed.to_radians();
        }

        if obstacle.hopping {
            // Only the positive half of the sine lifts it, with a spin while airborne
            obstacle.rotation = if hop_now < 0.0 { -2.0 * (t / 8.0) } else { 0.0 };
            obstacle.pos.y += hop_now;
            if obstacle.started_moving {
                obstacle.pos.y -= hop_prev;
            }
        }

        obstacle.started_moving = true;
    }
}

/// Drop obstacles that have left the screen for good
fn cull_obstacles(state: &mut HikeState, tuning: &HikeTuning) {
    let before = state.obstacles.len();
    let floor = tuning.viewport.height;
    state.obstacles.retain(|o| {
        let bounds = o.bounds();
        bounds.right() >= 0.0 && bounds.y <= floor
    });
    let culled = before - state.obstacles.len();
    if culled > 0 {
        log::debug!("Culled {} off-screen obstacles", culled);
    }
}

fn check_collisions(state: &mut HikeState, tuning: &HikeTuning) {
    let mut downed = Vec::new();
    for obstacle in &state.obstacles {
        let obstacle_bounds = obstacle.bounds();
        for (index, player) in state.players.iter().enumerate() {
            if player.active
                && !downed.contains(&index)
                && player
                    .bounds()
                    .overlaps_lenient(&obstacle_bounds, tuning.collision_leniency)
            {
                downed.push(index);
            }
        }
    }

    for index in downed {
        state.players[index].knock_out();
        log::info!("Player {} knocked out at {}m", index, state.visible_distance());
        state.push_event(GameEvent::PlayerDown { index });
    }

    if state.phase == GamePhase::Playing && state.players.iter().all(|p| !p.active) {
        state.phase = GamePhase::GameOver;
        state.spawner.stop();
        let distance = state.visible_distance();
        log::info!("Run ended at {}m after {} ticks", distance, state.time_ticks);
        state.push_event(GameEvent::RunEnded { distance });
    }
}
