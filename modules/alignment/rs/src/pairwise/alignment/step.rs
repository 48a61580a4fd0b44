use std::borrow::Borrow;
use std::fmt::Display;

use derive_getters::{Dissolve, Getters};
use eyre::{eyre, Result};

use alignkit_core_rs::num::PrimUInt;

use super::op::Op;

/// A run of identical alignment operations.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Getters, Dissolve)]
pub struct Step<Len: PrimUInt> {
    /// The number of consecutive operations. Guaranteed to be greater than zero.
    len: Len,
    op: Op,
}

impl<Len: PrimUInt> Step<Len> {
    pub fn new(op: Op, len: Len) -> Result<Self> {
        if len.is_zero() {
            return Err(eyre!("Step length must be greater than zero"));
        }
        Ok(Self { len, op })
    }

    /// Merge neighbouring steps with identical operations in place. Merged runs that would not fit
    /// into `Len` are split into several steps.
    pub fn collapse(steps: &mut Vec<Step<Len>>) {
        if steps.len() < 2 {
            return;
        }

        let mut write = 0;
        for read in 1..steps.len() {
            let next = steps[read];
            if steps[write].op != next.op {
                write += 1;
                steps[write] = next;
                continue;
            }

            match steps[write].len.checked_add(&next.len) {
                Some(len) => steps[write].len = len,
                None => {
                    let overflow = next.len - (Len::max_value() - steps[write].len);
                    steps[write].len = Len::max_value();
                    write += 1;
                    steps[write] = Step {
                        len: overflow,
                        op: next.op,
                    };
                }
            }
        }
        steps.truncate(write + 1);
    }

    /// Render steps as a run-length encoded string, e.g. `3=1v2=`.
    pub fn rle_string(steps: impl Iterator<Item: Borrow<Step<Len>>>) -> String
    where
        Len: Display,
    {
        let mut result = String::with_capacity(steps.size_hint().0 * 3);
        for step in steps {
            let step = step.borrow();
            result.push_str(&step.len.to_string());
            result.push(step.op.symbol());
        }
        result
    }
}
