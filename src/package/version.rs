//! Version and requirement matching for installed packages.
//!
//! Versions are dotted segment lists (`1.2.10`, `2.0.0.rc1`). Numeric segments
//! compare numerically, string segments sort below numbers so pre-releases come
//! before their release. Missing trailing segments count as zero.

use anyhow::{Result, bail};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Num(u64),
    Str(String),
}

/// An installed package version.
#[derive(Debug, Clone)]
pub struct Version {
    raw: String,
    segments: Vec<Segment>,
}

impl Version {
    /// The upper bound used by `~>`: drop the last segment, bump the new last one.
    /// `1.2.3` -> `1.3`, `1.2` -> `2`, `1` -> `2`.
    fn bump(&self) -> Version {
        let mut nums: Vec<u64> = self
            .segments
            .iter()
            .map_while(|s| match s {
                Segment::Num(n) => Some(*n),
                Segment::Str(_) => None,
            })
            .collect();
        if nums.len() > 1 {
            nums.pop();
        }
        match nums.last_mut() {
            Some(last) => *last += 1,
            None => nums.push(1),
        }
        let raw = nums
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(".");
        Version {
            raw,
            segments: nums.into_iter().map(Segment::Num).collect(),
        }
    }

    /// Segments with string parts removed, so `1.0.rc1` bounds like `1.0`.
    fn release(&self) -> Version {
        let segments: Vec<Segment> = self
            .segments
            .iter()
            .take_while(|s| matches!(s, Segment::Num(_)))
            .cloned()
            .collect();
        Version {
            raw: self.raw.clone(),
            segments,
        }
    }
}

impl FromStr for Version {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let raw = s.trim();
        if raw.is_empty() || !raw.starts_with(|c: char| c.is_ascii_digit()) {
            bail!("Malformed version number string {:?}", s);
        }
        if let Some(bad) = raw
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '.' || *c == '-'))
        {
            bail!("Malformed version number string {:?}: unexpected {:?}", s, bad);
        }

        let mut segments = Vec::new();
        for part in raw.split(['.', '-']).filter(|p| !p.is_empty()) {
            // Split runs like "0rc1" into 0, "rc", 1
            let mut rest = part;
            while !rest.is_empty() {
                let digits = rest.chars().next().is_some_and(|c| c.is_ascii_digit());
                let end = rest
                    .find(|c: char| c.is_ascii_digit() != digits)
                    .unwrap_or(rest.len());
                let (run, tail) = rest.split_at(end);
                segments.push(if digits {
                    Segment::Num(run.parse()?)
                } else {
                    Segment::Str(run.to_string())
                });
                rest = tail;
            }
        }

        Ok(Version {
            raw: raw.to_string(),
            segments,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let zero = Segment::Num(0);
        let len = self.segments.len().max(other.segments.len());
        for i in 0..len {
            let lhs = self.segments.get(i).unwrap_or(&zero);
            let rhs = other.segments.get(i).unwrap_or(&zero);
            let ord = match (lhs, rhs) {
                (Segment::Num(a), Segment::Num(b)) => a.cmp(b),
                (Segment::Str(a), Segment::Str(b)) => a.cmp(b),
                (Segment::Str(_), Segment::Num(_)) => Ordering::Less,
                (Segment::Num(_), Segment::Str(_)) => Ordering::Greater,
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
    Pessimistic,
}

impl Op {
    fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Ne => "!=",
            Op::Gt => ">",
            Op::Lt => "<",
            Op::Ge => ">=",
            Op::Le => "<=",
            Op::Pessimistic => "~>",
        }
    }
}

// Longest operators first so ">=" is not read as ">"
const OPS: [(&str, Op); 7] = [
    ("~>", Op::Pessimistic),
    (">=", Op::Ge),
    ("<=", Op::Le),
    ("!=", Op::Ne),
    ("=", Op::Eq),
    (">", Op::Gt),
    ("<", Op::Lt),
];

/// A set of version constraints that must all hold, e.g. `>= 1.0, < 2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    constraints: Vec<(Op, Version)>,
}

impl Requirement {
    /// Matches every version (`>= 0`).
    pub fn any() -> Self {
        let zero = Version {
            raw: "0".to_string(),
            segments: vec![Segment::Num(0)],
        };
        Self {
            constraints: vec![(Op::Ge, zero)],
        }
    }

    pub fn is_satisfied_by(&self, version: &Version) -> bool {
        self.constraints.iter().all(|(op, req)| match op {
            Op::Eq => version == req,
            Op::Ne => version != req,
            Op::Gt => version > req,
            Op::Lt => version < req,
            Op::Ge => version >= req,
            Op::Le => version <= req,
            Op::Pessimistic => version >= req && version.release() < req.bump(),
        })
    }
}

impl Default for Requirement {
    fn default() -> Self {
        Self::any()
    }
}

impl FromStr for Requirement {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Ok(Self::any());
        }

        let mut constraints = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            let (op, rest) = OPS
                .iter()
                .find_map(|(prefix, op)| part.strip_prefix(prefix).map(|rest| (*op, rest)))
                .unwrap_or((Op::Eq, part));
            let version = rest
                .parse::<Version>()
                .map_err(|e| anyhow::anyhow!("Illformed requirement {:?}: {}", s, e))?;
            constraints.push((op, version));
        }
        Ok(Self { constraints })
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .constraints
            .iter()
            .map(|(op, v)| format!("{} {}", op.as_str(), v))
            .collect();
        f.write_str(&parts.join(", "))
    }
}
