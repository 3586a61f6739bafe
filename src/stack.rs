use std::collections::VecDeque;

use num_traits::Zero;

use crate::config::{BitCount, CalcOption, CalcOptions};
use crate::decimal::Decimal;
use crate::errors::*;

/// Snapshots kept for undo
pub const MAX_HISTORY: usize = 50;
/// Depth of the stack in replicating mode
pub const REPLICATED_DEPTH: usize = 4;

/// Operand stack. The last element is X, the one before it Y, and so on.
#[derive(Clone, Debug)]
pub struct Stack {
    values: Vec<Decimal>,
    history: VecDeque<Vec<Decimal>>,
    options: CalcOptions,
    bit_count: BitCount,
}

impl Default for Stack {
    fn default() -> Stack {
        Stack::with_options(CalcOptions::default())
    }
}

impl Stack {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_options(options: CalcOptions) -> Self {
        Stack {
            values: Vec::new(),
            history: VecDeque::new(),
            options,
            bit_count: BitCount::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn push(&mut self, v: Decimal) {
        self.values.push(v);
        if self.options.replicate_stack {
            self.trim_bottom();
        }
    }

    /// Pushes all values in order, the last one ends up in X
    pub fn push_all<I: IntoIterator<Item = Decimal>>(&mut self, values: I) {
        self.values.extend(values);
        if self.options.replicate_stack {
            self.trim_bottom();
        }
    }

    fn trim_bottom(&mut self) {
        if self.values.len() > REPLICATED_DEPTH {
            let extra = self.values.len() - REPLICATED_DEPTH;
            self.values.drain(..extra);
        }
    }

    /// Removes X. An empty stack yields zero. In replicating mode a full
    /// stack copies T before X goes, so the depth stays at four.
    pub fn pop(&mut self) -> Decimal {
        if self.options.replicate_stack && self.values.len() == REPLICATED_DEPTH {
            let bottom = self.values[0].clone();
            self.values.insert(0, bottom);
        }
        self.values.pop().unwrap_or_else(Decimal::zero)
    }

    pub fn peek(&self) -> Decimal {
        self.peek_at(0)
    }

    /// 0 is X, 1 is Y. Out of range yields zero.
    pub fn peek_at(&self, i: usize) -> Decimal {
        if i >= self.values.len() {
            return Decimal::zero();
        }
        self.values[self.values.len() - 1 - i].clone()
    }

    /// X moves to the bottom
    pub fn roll_up(&mut self) {
        if let Some(top) = self.values.pop() {
            self.values.insert(0, top);
        }
    }

    /// The bottom value moves to X
    pub fn roll_down(&mut self) {
        if !self.values.is_empty() {
            let bottom = self.values.remove(0);
            self.values.push(bottom);
        }
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Records the current contents for a later `undo`. Does nothing when
    /// history is switched off.
    pub fn save_history(&mut self) {
        if !self.options.save_history {
            return;
        }
        if self.history.len() == MAX_HISTORY {
            self.history.pop_front();
        }
        self.history.push_back(self.values.clone());
        tracing::trace!(depth = self.history.len(), "stack snapshot saved");
    }

    /// Drops the newest snapshot, used when the operation it guarded failed
    pub(crate) fn discard_history(&mut self) {
        if self.options.save_history {
            self.history.pop_back();
        }
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn undo(&mut self) -> CalcErrorResult {
        if !self.options.save_history {
            return Err(CalcError::NoHistorySaved);
        }
        match self.history.pop_back() {
            Some(prev) => self.values = prev,
            None => self.values.clear(),
        }
        tracing::debug!(left = self.history.len(), "undo");
        Ok(())
    }

    /// Stack contents with X first
    pub fn stack_for_display(&self) -> Vec<Decimal> {
        self.values.iter().rev().cloned().collect()
    }

    pub(crate) fn snapshot(&self) -> Vec<Decimal> {
        self.values.clone()
    }

    pub(crate) fn restore(&mut self, values: Vec<Decimal>) {
        self.values = values;
    }

    pub fn options(&self) -> CalcOptions {
        self.options
    }

    pub fn option(&self, opt: CalcOption) -> bool {
        self.options.get(opt)
    }

    /// Switching replicating mode on clamps the stack to four values
    pub fn set_option(&mut self, opt: CalcOption, value: bool) {
        self.options.set(opt, value);
        if opt == CalcOption::ReplicateStack && value {
            self.trim_bottom();
        }
    }

    pub fn bit_count(&self) -> BitCount {
        self.bit_count
    }

    pub fn set_bit_count(&mut self, bc: BitCount) {
        self.bit_count = bc;
    }

    pub fn bit_mask(&self) -> i64 {
        self.bit_count.mask()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(stack: &Stack) -> Vec<i64> {
        stack.stack_for_display().iter().rev().map(|v| v.to_i64()).collect()
    }

    fn replicating() -> Stack {
        let mut stack = Stack::new();
        stack.set_option(CalcOption::ReplicateStack, true);
        stack
    }

    #[test]
    fn test_push_pop() {
        let mut stack = Stack::new();
        stack.push(Decimal::from(1));
        stack.push(Decimal::from(2));
        assert_eq!(stack.peek(), Decimal::from(2));
        assert_eq!(stack.peek_at(1), Decimal::from(1));
        assert_eq!(stack.peek_at(2), Decimal::zero());
        assert_eq!(stack.pop(), Decimal::from(2));
        assert_eq!(stack.pop(), Decimal::from(1));
        assert_eq!(stack.pop(), Decimal::zero());
        assert_eq!(stack.pop(), Decimal::zero());
        assert!(stack.is_empty());
    }

    #[test]
    fn test_rolls() {
        let mut stack = Stack::new();
        stack.roll_up();
        stack.roll_down();
        assert!(stack.is_empty());
        stack.push_all((1..=4).map(Decimal::from));
        stack.roll_up();
        assert_eq!(values(&stack), vec![4, 1, 2, 3]);
        stack.roll_down();
        stack.roll_down();
        assert_eq!(values(&stack), vec![2, 3, 4, 1]);
    }

    #[test]
    fn test_replicate_push() {
        let mut stack = replicating();
        for i in 1..=5 {
            stack.push(Decimal::from(i));
        }
        assert_eq!(values(&stack), vec![2, 3, 4, 5]);
        stack.push_all((6..=8).map(Decimal::from));
        assert_eq!(values(&stack), vec![5, 6, 7, 8]);
    }

    #[test]
    fn test_replicate_pop() {
        let mut stack = replicating();
        stack.push_all((1..=4).map(Decimal::from));
        assert_eq!(stack.pop(), Decimal::from(4));
        assert_eq!(values(&stack), vec![1, 1, 2, 3]);
        assert_eq!(stack.pop(), Decimal::from(3));
        assert_eq!(values(&stack), vec![1, 1, 1, 2]);
        assert_eq!(stack.len(), 4);
    }

    #[test]
    fn test_replicate_switch_trims() {
        let mut stack = Stack::new();
        stack.push_all((1..=6).map(Decimal::from));
        stack.set_option(CalcOption::ReplicateStack, true);
        assert_eq!(values(&stack), vec![3, 4, 5, 6]);
    }

    #[test]
    fn test_undo() {
        let mut stack = Stack::new();
        stack.push(Decimal::from(1));
        stack.save_history();
        stack.push(Decimal::from(2));
        assert_eq!(stack.undo(), Ok(()));
        assert_eq!(values(&stack), vec![1]);
        assert_eq!(stack.undo(), Ok(()));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_undo_disabled() {
        let mut stack = Stack::new();
        stack.set_option(CalcOption::SaveHistory, false);
        stack.push(Decimal::from(1));
        stack.save_history();
        assert_eq!(stack.history_len(), 0);
        assert_eq!(stack.undo(), Err(CalcError::NoHistorySaved));
        assert_eq!(values(&stack), vec![1]);
    }

    #[test]
    fn test_history_bound() {
        let mut stack = Stack::new();
        for i in 0..(MAX_HISTORY as i64 + 10) {
            stack.push(Decimal::from(i));
            stack.save_history();
        }
        assert_eq!(stack.history_len(), MAX_HISTORY);
    }

    #[test]
    fn test_display_order() {
        let mut stack = Stack::new();
        stack.push_all((1..=3).map(Decimal::from));
        let shown: Vec<i64> = stack.stack_for_display().iter().map(|v| v.to_i64()).collect();
        assert_eq!(shown, vec![3, 2, 1]);
    }

    #[test]
    fn test_bit_mask() {
        let mut stack = Stack::new();
        assert_eq!(stack.bit_mask(), 0xFFFF_FFFF);
        stack.set_bit_count(BitCount::Bits8);
        assert_eq!(stack.bit_mask(), 0xFF);
    }
}
