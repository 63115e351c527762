use std::fmt;

use crate::board::Coord;
use crate::direction::Direction;

/// One step of a path: the cell reached and the move that reached it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct StackRec {
    pub loc: Coord,
    pub dir: Direction,
}

impl StackRec {
    pub fn new(loc: Coord, dir: Direction) -> Self {
        Self { loc, dir }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackError {
    OutOfMemory,
    RetrieveOnEmpty,
}

impl fmt::Display for StackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackError::OutOfMemory => write!(f, "out of memory while growing the path stack"),
            StackError::RetrieveOnEmpty => write!(f, "tried to read the top of an empty stack"),
        }
    }
}

impl std::error::Error for StackError {}

/// LIFO of path steps; the top is the most recently entered cell.
///
/// Not `Clone`: copies go through `duplicate` or `copy_from`, both of which
/// report allocation failure instead of aborting.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PathStack {
    items: Vec<StackRec>,
}

impl PathStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rec: StackRec) -> Result<(), StackError> {
        self.items
            .try_reserve(1)
            .map_err(|_| StackError::OutOfMemory)?;
        self.items.push(rec);
        Ok(())
    }

    /// Removes the top step, if any. Popping an empty stack does nothing.
    pub fn pop(&mut self) -> Option<StackRec> {
        self.items.pop()
    }

    pub fn peek(&self) -> Result<StackRec, StackError> {
        self.items.last().copied().ok_or(StackError::RetrieveOnEmpty)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Steps from bottom (the entrance) to top.
    pub fn iter(&self) -> impl Iterator<Item = &StackRec> {
        self.items.iter()
    }

    pub fn duplicate(&self) -> Result<Self, StackError> {
        let mut copy = Self::new();
        copy.copy_from(self)?;
        Ok(copy)
    }

    /// Replaces the contents of `self` with a copy of `source`.
    pub fn copy_from(&mut self, source: &PathStack) -> Result<(), StackError> {
        self.clear();
        self.items
            .try_reserve_exact(source.items.len())
            .map_err(|_| StackError::OutOfMemory)?;
        self.items.extend_from_slice(&source.items);
        Ok(())
    }
}
