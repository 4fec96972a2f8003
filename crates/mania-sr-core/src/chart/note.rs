use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single note: a tap, or a hold when it has a tail.
///
/// The tail of a hold is always strictly after its head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawNote", into = "RawNote")]
pub struct NoteEvent {
    column: usize,
    head: u32,
    tail: Option<u32>,
}

/// Unvalidated wire form of [`NoteEvent`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawNote {
    column: usize,
    head: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tail: Option<u32>,
}

impl NoteEvent {
    pub fn new(column: usize, head: u32, tail: Option<u32>) -> Result<Self> {
        match tail {
            Some(tail) if tail <= head => Err(Error::InvalidNote { column, head, tail }),
            _ => Ok(Self { column, head, tail }),
        }
    }

    pub fn tap(column: usize, head: u32) -> Self {
        Self {
            column,
            head,
            tail: None,
        }
    }

    pub fn hold(column: usize, head: u32, tail: u32) -> Result<Self> {
        Self::new(column, head, Some(tail))
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn head(&self) -> u32 {
        self.head
    }

    pub fn tail(&self) -> Option<u32> {
        self.tail
    }

    pub fn is_long(&self) -> bool {
        self.tail.is_some()
    }

    /// Last millisecond this note occupies (tail for holds, head for taps).
    pub fn end(&self) -> u32 {
        self.tail.unwrap_or(self.head)
    }

    /// Rescale both timestamps with `scale`, demoting holds that collapse to taps.
    pub(crate) fn rescaled(&self, scale: impl Fn(u32) -> u32) -> Self {
        let head = scale(self.head);
        let tail = self.tail.map(&scale).filter(|&tail| tail > head);
        Self {
            column: self.column,
            head,
            tail,
        }
    }
}

impl TryFrom<RawNote> for NoteEvent {
    type Error = Error;

    fn try_from(raw: RawNote) -> Result<Self> {
        Self::new(raw.column, raw.head, raw.tail)
    }
}

impl From<NoteEvent> for RawNote {
    fn from(note: NoteEvent) -> Self {
        Self {
            column: note.column,
            head: note.head,
            tail: note.tail,
        }
    }
}
