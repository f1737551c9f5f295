//! Cursor movement over a todo list that skips tombstones.
//!
//! Every function returns a storage index. When there is no live item to move
//! to, the current position is returned unchanged; the cursor never wraps.

use crate::model::todo::TodoList;

/// First live index after `current`, or `current` if there is none.
pub fn move_down(list: &TodoList, current: usize) -> usize {
    let start = current.saturating_add(1);
    (start..list.len())
        .find(|&i| list.is_live(i))
        .unwrap_or(current)
}

/// Last live index before `current`, or `current` if there is none.
pub fn move_up(list: &TodoList, current: usize) -> usize {
    let end = current.min(list.len());
    (0..end).rev().find(|&i| list.is_live(i)).unwrap_or(current)
}

/// Where the cursor goes once the item under it has been deleted: the next
/// live item below, else the nearest live item above.
pub fn reposition_after_delete(list: &TodoList, current: usize) -> usize {
    let down = move_down(list, current);
    if list.is_live(down) {
        return down;
    }
    move_up(list, down)
}

/// Settle a possibly stale cursor: keep it if it is on a live item, otherwise
/// reposition it as after a delete.
pub fn normalize(list: &TodoList, current: usize) -> usize {
    if list.is_live(current) {
        current
    } else if current >= list.len() {
        // Past the end (e.g. the list shrank): nearest live item above
        let up = move_up(list, current);
        if list.is_live(up) { up } else { current }
    } else {
        reposition_after_delete(list, current)
    }
}

pub fn first_live(list: &TodoList) -> Option<usize> {
    list.live().next().map(|(i, _)| i)
}

pub fn last_live(list: &TodoList) -> Option<usize> {
    list.live().last().map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::todo::{TodoItem, TodoState};

    /// Build a list from a pattern: `.` live, `x` done, `-` deleted
    fn list(pattern: &str) -> TodoList {
        pattern
            .chars()
            .enumerate()
            .map(|(i, c)| {
                let state = match c {
                    'x' => TodoState::Done,
                    '-' => TodoState::Deleted,
                    _ => TodoState::NotDone,
                };
                TodoItem::with_state(format!("item {i}"), state)
            })
            .collect()
    }

    #[test]
    fn move_down_skips_tombstones() {
        let l = list(".--x.");
        assert_eq!(move_down(&l, 0), 3);
        assert_eq!(move_down(&l, 3), 4);
    }

    #[test]
    fn move_down_at_last_live_is_noop() {
        let l = list(".x--");
        assert_eq!(move_down(&l, 1), 1);
    }

    #[test]
    fn move_up_skips_tombstones() {
        let l = list(".--x.");
        assert_eq!(move_up(&l, 4), 3);
        assert_eq!(move_up(&l, 3), 0);
    }

    #[test]
    fn move_up_at_first_live_is_noop() {
        let l = list("--.x");
        assert_eq!(move_up(&l, 2), 2);
        assert_eq!(move_up(&l, 0), 0);
    }

    #[test]
    fn empty_list_keeps_position() {
        let l = TodoList::default();
        assert_eq!(move_down(&l, 0), 0);
        assert_eq!(move_up(&l, 0), 0);
        assert_eq!(move_down(&l, 4), 4);
        assert_eq!(normalize(&l, 2), 2);
    }

    #[test]
    fn all_deleted_keeps_position() {
        let l = list("---");
        assert_eq!(move_down(&l, 1), 1);
        assert_eq!(move_up(&l, 1), 1);
        assert_eq!(reposition_after_delete(&l, 1), 1);
    }

    #[test]
    fn reposition_prefers_below() {
        let l = list("x-.");
        assert_eq!(reposition_after_delete(&l, 1), 2);
    }

    #[test]
    fn reposition_falls_back_above_at_end() {
        let l = list("..--");
        assert_eq!(reposition_after_delete(&l, 2), 1);
        assert_eq!(reposition_after_delete(&l, 3), 1);
    }

    #[test]
    fn normalize_keeps_live_cursor() {
        let l = list(".x.");
        assert_eq!(normalize(&l, 1), 1);
    }

    #[test]
    fn normalize_moves_off_tombstone() {
        let l = list("-.");
        assert_eq!(normalize(&l, 0), 1);
    }

    #[test]
    fn normalize_clamps_past_end() {
        let l = list(".x");
        assert_eq!(normalize(&l, 5), 1);
    }

    #[test]
    fn first_and_last_live() {
        let l = list("-.x-");
        assert_eq!(first_live(&l), Some(1));
        assert_eq!(last_live(&l), Some(2));
        assert_eq!(first_live(&list("--")), None);
    }

    #[test]
    fn moves_never_land_on_tombstones() {
        let patterns = ["-.-.-", "..--..", "x-x-x", "-", ".", "--.--", "x---."];
        for p in patterns {
            let l = list(p);
            for start in 0..l.len() {
                for pos in [move_down(&l, start), move_up(&l, start)] {
                    if pos != start {
                        assert!(l.is_live(pos), "{p}: {start} -> {pos}");
                    }
                }
                if l.live_count() > 0 {
                    assert!(l.is_live(reposition_after_delete(&l, start)), "{p}: {start}");
                    assert!(l.is_live(normalize(&l, start)), "{p}: {start}");
                }
            }
        }
    }
}
