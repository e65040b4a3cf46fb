//! Button scripts for headless runs.
//!
//! A script is a comma or whitespace separated list of steps. Each step is
//! a control name (`down`, `a`, `select`, `l`, ...), optionally repeated
//! with `*N` (`down*3`), or `wait` / `wait*N` to idle for frames.

use anyhow::{Context, Result, bail};

use lilypad_core::input::Control;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Press for one frame, release on the next.
    Tap(Control),
    /// Let one frame pass with nothing held.
    Wait,
}

pub fn parse(script: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    for token in script
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        let (name, count) = match token.split_once('*') {
            Some((name, n)) => {
                let n: usize = n
                    .parse()
                    .with_context(|| format!("bad repeat count in '{token}'"))?;
                (name, n)
            },
            None => (token, 1),
        };
        let step = if name.eq_ignore_ascii_case("wait") {
            Step::Wait
        } else {
            match Control::from_name(name) {
                Some(control) => Step::Tap(control),
                None => bail!("unknown control '{name}'"),
            }
        };
        steps.extend(std::iter::repeat_n(step, count));
    }
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lilypad_core::input::Button;

    #[test]
    fn parses_taps_waits_and_repeats() {
        let steps = parse("down*2, a wait").unwrap();
        assert_eq!(
            steps,
            vec![
                Step::Tap(Control::Button(Button::Down)),
                Step::Tap(Control::Button(Button::Down)),
                Step::Tap(Control::Button(Button::Confirm)),
                Step::Wait,
            ]
        );
    }

    #[test]
    fn empty_script_has_no_steps() {
        assert!(parse("  ,, ").unwrap().is_empty());
    }

    #[test]
    fn rejects_unknown_controls_and_counts() {
        assert!(parse("jump").is_err());
        assert!(parse("down*many").is_err());
    }
}
