//! Key-paced terminal replay of a solution path.

use std::io::{self, Write};

use crossterm::{
    event::{self, Event, KeyCode},
    queue,
    style::{Print, Stylize},
    terminal,
};

use crate::puzzle::PuzzleState;

/// Where keystrokes come from.
pub trait KeySource {
    fn next_key(&mut self) -> io::Result<KeyCode>;
}

/// Reads single keystrokes from the controlling terminal.
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn next_key(&mut self) -> io::Result<KeyCode> {
        terminal::enable_raw_mode()?;
        let key = loop {
            match event::read() {
                Ok(Event::Key(key)) => break Ok(key.code),
                Ok(_) => continue,
                Err(e) => break Err(e),
            }
        };
        terminal::disable_raw_mode()?;
        key
    }
}

/// Asks a yes/no question and waits for a single key.
pub fn confirm<W: Write, K: KeySource>(out: &mut W, keys: &mut K, question: &str) -> io::Result<bool> {
    queue!(out, Print(format!("{} (y/n): ", question)))?;
    out.flush()?;

    let answer = loop {
        match keys.next_key()? {
            KeyCode::Char('y' | 'Y' | 's' | 'S') => break true,
            KeyCode::Char('n' | 'N') | KeyCode::Esc | KeyCode::Enter => break false,
            _ => continue,
        }
    };
    writeln!(out, "{}", if answer { "y" } else { "n" })?;
    Ok(answer)
}

/// Prints every board of `path`, waiting for Enter between steps.
/// `q` or Esc stops early. Returns how many boards were shown.
pub fn replay<W: Write, K: KeySource>(
    out: &mut W,
    keys: &mut K,
    path: &[PuzzleState],
) -> io::Result<usize> {
    for (step, state) in path.iter().enumerate() {
        let heading = match step.checked_sub(1).and_then(|prev| path[prev].move_towards(state)) {
            Some(movement) => format!("Step {} ({})", step, movement),
            None => format!("Step {}", step),
        };
        queue!(out, Print("\n"), Print(heading.bold()), Print("\n"))?;
        queue!(out, Print(state))?;

        if step + 1 == path.len() {
            break;
        }

        queue!(out, Print("Press Enter to continue, q to stop...".dim()))?;
        out.flush()?;
        let stop = loop {
            match keys.next_key()? {
                KeyCode::Enter | KeyCode::Char(' ') => break false,
                KeyCode::Char('q') | KeyCode::Esc => break true,
                _ => continue,
            }
        };
        writeln!(out)?;
        if stop {
            return Ok(step + 1);
        }
    }
    out.flush()?;
    Ok(path.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Move;
    use std::collections::VecDeque;

    struct Scripted(VecDeque<KeyCode>);

    impl KeySource for Scripted {
        fn next_key(&mut self) -> io::Result<KeyCode> {
            self.0
                .pop_front()
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
        }
    }

    fn keys(codes: &[KeyCode]) -> Scripted {
        Scripted(codes.iter().copied().collect())
    }

    fn three_step_path() -> Vec<PuzzleState> {
        let goal = PuzzleState::goal(3).unwrap();
        let a = goal.apply_move(Move::Up).unwrap();
        let b = a.apply_move(Move::Left).unwrap();
        vec![b, a, goal]
    }

    #[test]
    fn confirm_skips_unrelated_keys() {
        let mut out = Vec::new();
        let mut script = keys(&[KeyCode::Char('x'), KeyCode::Char('s')]);
        assert!(confirm(&mut out, &mut script, "Show the path?").unwrap());

        let mut script = keys(&[KeyCode::Enter]);
        assert!(!confirm(&mut out, &mut script, "Show the path?").unwrap());
        assert!(String::from_utf8(out).unwrap().contains("Show the path? (y/n): "));
    }

    #[test]
    fn replay_shows_every_board_and_move() {
        let path = three_step_path();
        let mut out = Vec::new();
        let mut script = keys(&[KeyCode::Enter, KeyCode::Char(' ')]);
        assert_eq!(replay(&mut out, &mut script, &path).unwrap(), 3);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Step 1 (Right)"));
        assert!(text.contains("Step 2 (Down)"));
        assert!(text.contains(&path[2].to_string()));
    }

    #[test]
    fn replay_stops_on_q() {
        let path = three_step_path();
        let mut out = Vec::new();
        let mut script = keys(&[KeyCode::Char('q')]);
        assert_eq!(replay(&mut out, &mut script, &path).unwrap(), 1);
        assert!(!String::from_utf8(out).unwrap().contains("Step 1"));
    }
}
