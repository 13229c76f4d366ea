//! Line bookmarks, grounded on `ascension::kernel::Document::Bookmarker`
//! (`original_source/ascension/ascension/kernel/document.hpp`): a sorted set of marked line
//! numbers that shifts itself when lines are inserted/removed above a mark, exposed as a
//! [`crate::gap_vector::GapVector`] the same way the original backs it with a `GapVector<Index>`.

use crate::gap_vector::GapVector;

pub struct Bookmarker {
    marks: GapVector<usize>,
}

impl Bookmarker {
    pub fn new() -> Self {
        Self {
            marks: GapVector::new(),
        }
    }

    fn find(&self, line: usize) -> Result<usize, usize> {
        let mut lo = 0usize;
        let mut hi = self.marks.len();
        while lo < hi {
            let mid = (lo + hi) / 2;
            match self.marks.get(mid).copied().unwrap().cmp(&line) {
                std::cmp::Ordering::Less => lo = mid + 1,
                std::cmp::Ordering::Equal => return Ok(mid),
                std::cmp::Ordering::Greater => hi = mid,
            }
        }
        Err(lo)
    }

    pub fn is_marked(&self, line: usize) -> bool {
        self.find(line).is_ok()
    }

    pub fn mark(&mut self, line: usize) {
        if let Err(index) = self.find(line) {
            self.marks.insert(index, line);
        }
    }

    pub fn unmark(&mut self, line: usize) {
        if let Ok(index) = self.find(line) {
            self.marks.remove(index);
        }
    }

    pub fn toggle(&mut self, line: usize) -> bool {
        match self.find(line) {
            Ok(index) => {
                self.marks.remove(index);
                false
            }
            Err(index) => {
                self.marks.insert(index, line);
                true
            }
        }
    }

    pub fn clear(&mut self) {
        self.marks = GapVector::new();
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Next marked line strictly after `line`, wrapping to the first mark if `wrap` is set.
    pub fn next(&self, line: usize, wrap: bool) -> Option<usize> {
        let start = match self.find(line) {
            Ok(i) => i + 1,
            Err(i) => i,
        };
        if start < self.marks.len() {
            self.marks.get(start).copied()
        } else if wrap {
            self.marks.get(0).copied()
        } else {
            None
        }
    }

    /// Previous marked line strictly before `line`, wrapping to the last mark if `wrap` is set.
    pub fn previous(&self, line: usize, wrap: bool) -> Option<usize> {
        let idx = match self.find(line) {
            Ok(i) | Err(i) => i,
        };
        if idx > 0 {
            self.marks.get(idx - 1).copied()
        } else if wrap && !self.marks.is_empty() {
            self.marks.get(self.marks.len() - 1).copied()
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.marks.iter().copied()
    }

    /// React to an edit that replaced lines `[start_line, end_line]` with `new_line_count`
    /// lines: marks inside the replaced span are dropped, marks after it are shifted by the
    /// resulting line-count delta.
    pub fn apply_line_change(&mut self, start_line: usize, end_line: usize, new_line_count: usize) {
        let old_count = end_line - start_line + 1;
        let delta = new_line_count as isize - old_count as isize;
        let kept: Vec<usize> = self
            .marks
            .iter()
            .filter_map(|&line| {
                if line < start_line {
                    Some(line)
                } else if line > end_line {
                    Some((line as isize + delta) as usize)
                } else {
                    None
                }
            })
            .collect();
        self.marks = GapVector::new();
        for line in kept {
            self.marks.push(line);
        }
    }
}

impl Default for Bookmarker {
    fn default() -> Self {
        Self::new()
    }
}
