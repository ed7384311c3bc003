//! Code fence tracking.
//!
//! Directive syntax inside fenced code blocks is shown literally, so the
//! processor needs to know when it is inside one.

/// An open fence: its character and the length of the opening run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Fence {
    ch: char,
    len: usize,
}

/// Tracks `CommonMark` fenced code block state line by line.
///
/// A fence opens with three or more backticks or tildes. It closes on a line
/// made only of the same character, at least as long as the opening run.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<Fence>,
}

impl FenceTracker {
    pub(crate) fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Feed the next line. Returns `true` if the line opened or closed a fence.
    pub(crate) fn update(&mut self, line: &str) -> bool {
        let Some(run) = fence_run(line.trim_start()) else {
            return false;
        };

        match self.open {
            None => {
                self.open = Some(run.fence);
                true
            }
            Some(open) if run.fence.ch == open.ch && run.fence.len >= open.len && run.bare => {
                self.open = None;
                true
            }
            Some(_) => false,
        }
    }
}

struct FenceRun {
    fence: Fence,
    /// Nothing but whitespace follows the run.
    bare: bool,
}

fn fence_run(trimmed: &str) -> Option<FenceRun> {
    let ch = trimmed.chars().next().filter(|c| matches!(c, '`' | '~'))?;
    let len = trimmed.chars().take_while(|&c| c == ch).count();
    (len >= 3).then(|| FenceRun {
        fence: Fence { ch, len },
        bare: trimmed[len..].trim().is_empty(),
    })
}
