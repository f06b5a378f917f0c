use crate::index::{Occurrence, StringIndex};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cursor {
    Idle,
    Active { next: usize, end: usize },
    Exhausted,
}

/// Search cursor over one [`StringIndex`].
///
/// The first [`find`](Finder::find) after [`clear`](Finder::clear) locates the
/// pattern; every call then yields one occurrence until the matches run out.
/// A finder is meant to be owned by a single worker and reused for every query
/// it handles.
#[derive(Clone, Debug)]
pub struct Finder<'a> {
    index: &'a StringIndex,
    cursor: Cursor,
    current: Option<Occurrence>,
}

impl<'a> Finder<'a> {
    pub fn new(index: &'a StringIndex) -> Self {
        Self {
            index,
            cursor: Cursor::Idle,
            current: None,
        }
    }

    /// Forget the current pattern.
    pub fn clear(&mut self) {
        self.cursor = Cursor::Idle;
        self.current = None;
    }

    /// Advance to the next occurrence of `pattern`. Returns `false` once no
    /// occurrence is left; the finder then stays exhausted until `clear`.
    pub fn find(&mut self, pattern: &[u8]) -> bool {
        if self.cursor == Cursor::Idle {
            let range = self.index.sa_range(pattern);
            self.cursor = Cursor::Active {
                next: range.start,
                end: range.end,
            };
        }

        match self.cursor {
            Cursor::Active { next, end } if next < end => {
                self.current = Some(self.index.occurrence_at(next));
                self.cursor = Cursor::Active {
                    next: next + 1,
                    end,
                };
                true
            }
            _ => {
                self.cursor = Cursor::Exhausted;
                self.current = None;
                false
            }
        }
    }

    /// Occurrence found by the last successful [`find`](Finder::find).
    pub fn position(&self) -> Option<Occurrence> {
        self.current
    }

    /// `find` followed by `position`.
    pub fn find_next(&mut self, pattern: &[u8]) -> Option<Occurrence> {
        if self.find(pattern) {
            self.current
        } else {
            None
        }
    }
}
