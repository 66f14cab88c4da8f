use crate::runtime::{ data_structures::cell::Cell,
                      error::{ self,
                               ErrorKind } };
use std::slice::Iter;



/// The number of cells a stack holds when no capacity is given.
pub const DEFAULT_CAPACITY: usize = 4096;



/// The bounded data stack of cells managed by the interpreter.  The capacity is fixed when the
/// stack is created.  Pushing onto a full stack and popping from an empty one are both errors,
/// nothing is ever silently dropped.
pub struct Stack
{
    /// The cells, bottom of the stack first.
    cells: Vec<Cell>,

    /// The most cells the stack can hold.
    capacity: usize,

    /// The deepest the stack has been so far.
    max_depth: usize
}


impl Default for Stack
{
    fn default() -> Self
    {
        Self::new(DEFAULT_CAPACITY)
    }
}


impl Stack
{
    /// Create an empty stack that can hold up to `capacity` cells.
    pub fn new(capacity: usize) -> Stack
    {
        Stack
            {
                cells: Vec::with_capacity(capacity.min(64)),
                capacity,
                max_depth: 0
            }
    }

    /// The number of cells currently on the stack.
    pub fn len(&self) -> usize
    {
        self.cells.len()
    }

    /// Is the stack empty?
    pub fn is_empty(&self) -> bool
    {
        self.cells.is_empty()
    }

    /// The most cells the stack can hold.
    pub fn capacity(&self) -> usize
    {
        self.capacity
    }

    /// What is the maximum depth the stack has reached so far?
    pub fn max_depth(&self) -> usize
    {
        self.max_depth
    }

    /// Walk the cells from the bottom of the stack to the top.
    pub fn iter(&self) -> Iter<'_, Cell>
    {
        self.cells.iter()
    }

    /// Push a cell onto the top of the stack.  Fails with a stack overflow when the stack is full.
    pub fn push(&mut self, cell: Cell) -> error::Result<()>
    {
        if self.cells.len() == self.capacity
        {
            return Err(ErrorKind::StackOverflow { capacity: self.capacity }.into());
        }

        self.cells.push(cell);

        if self.cells.len() > self.max_depth
        {
            self.max_depth = self.cells.len();
        }

        Ok(())
    }

    /// Remove and return the top cell.  Fails with a stack underflow when the stack is empty.
    pub fn pop(&mut self) -> error::Result<Cell>
    {
        self.cells.pop().ok_or_else(|| ErrorKind::StackUnderflow.into())
    }

    /// Get the top cell without removing it.
    pub fn peek(&self) -> error::Result<&Cell>
    {
        self.cells.last().ok_or_else(|| ErrorKind::StackUnderflow.into())
    }
}
