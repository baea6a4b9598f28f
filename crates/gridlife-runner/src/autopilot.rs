//! Scripted input source that steers the snake toward its food.

use gridlife_core::Direction;
use gridlife_world::SnakeEngine;

/// Pick the next heading: never reverse, avoid walls and the body (the
/// vacating tail counts as free), and among safe moves prefer the one that
/// ends closest to the food. Keeps the current heading when nothing is safe.
pub fn choose_direction(engine: &SnakeEngine) -> Direction {
    let current = engine.direction();
    let Some(head) = engine.head() else {
        return current;
    };
    let Ok((row, col)) = engine.grid().coords_of(head) else {
        return current;
    };
    let food = engine
        .food_index()
        .and_then(|food| engine.grid().coords_of(food).ok());
    let body_len = engine.len().saturating_sub(1);

    Direction::all()
        .into_iter()
        .filter(|dir| !dir.is_opposite(current))
        .filter_map(|dir| {
            let target = engine
                .grid()
                .neighbor_index(row, col, dir.to_delta(), engine.config().boundary)
                .ok()
                .flatten()?;
            if engine.segments().iter().take(body_len).any(|&s| s == target) {
                return None;
            }
            let (r, c) = engine.grid().coords_of(target).ok()?;
            let distance = food.map_or(0, |(fr, fc)| r.abs_diff(fr) + c.abs_diff(fc));
            // Ties go to the current heading.
            Some((distance, dir != current, dir))
        })
        .min()
        .map_or(current, |(_, _, dir)| dir)
}
