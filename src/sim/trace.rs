//! Sample trace format.
//!
//! One step per line; `#` starts a comment; blank lines are ignored.
//!
//! ```text
//! # direct samples, straight to the classifier
//! acc 102
//! sup 42dv          # 4.2 V at the rail, converted with raw_from_decivolts
//! load 242
//!
//! # scheduler-driven sampling
//! rails 102 120 200 # accumulator, load, supply
//! tick 3            # three timer → conversion cycles
//! reset             # back to the initial states
//! ```

use anyhow::{Context, Result, bail};

use crate::sensors::{Channel, raw_from_decivolts};

/// Largest `tick` count accepted on one line.
pub const MAX_TICKS: u32 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Feed one sample directly to a classifier.
    Sample(Channel, u8),
    /// Set the simulated rail values.
    Rails { accumulator: u8, load: u8, supply: u8 },
    /// Run `n` timer → conversion cycles through the scheduler.
    Tick(u32),
    /// Re-initialise the core.
    Reset,
}

pub fn parse_trace(text: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let step = parse_step(line).with_context(|| format!("line {}: `{}`", idx + 1, line))?;
        steps.push(step);
    }
    Ok(steps)
}

fn parse_step(line: &str) -> Result<Step> {
    let mut words = line.split_whitespace();
    let Some(keyword) = words.next() else {
        bail!("empty step");
    };
    let args: Vec<&str> = words.collect();

    let step = match (keyword, args.as_slice()) {
        ("acc", [v]) => Step::Sample(Channel::Accumulator, parse_value(v)?),
        ("load", [v]) => Step::Sample(Channel::Load, parse_value(v)?),
        ("sup", [v]) => Step::Sample(Channel::Supply, parse_value(v)?),
        ("rails", [a, l, s]) => Step::Rails {
            accumulator: parse_value(a)?,
            load: parse_value(l)?,
            supply: parse_value(s)?,
        },
        ("tick", []) => Step::Tick(1),
        ("tick", [n]) => Step::Tick(parse_tick_count(n)?),
        ("reset", []) => Step::Reset,
        ("acc" | "load" | "sup" | "rails" | "tick" | "reset", _) => {
            bail!("wrong number of arguments for `{keyword}`")
        }
        _ => bail!("unknown step `{keyword}`"),
    };
    Ok(step)
}

fn parse_tick_count(token: &str) -> Result<u32> {
    let n: u32 = token.parse().with_context(|| format!("bad tick count `{token}`"))?;
    if n > MAX_TICKS {
        bail!("tick count {n} exceeds {MAX_TICKS}");
    }
    Ok(n)
}

/// `102` is a raw reading; `42dv` is 4.2 V at the rail.
fn parse_value(token: &str) -> Result<u8> {
    if let Some(dv) = token.strip_suffix("dv") {
        let dv: u16 = dv.parse().with_context(|| format!("bad decivolt value `{token}`"))?;
        return Ok(raw_from_decivolts(dv));
    }
    token.parse().with_context(|| format!("bad raw value `{token}` (expected 0..=255)"))
}
