use std::collections::BTreeMap;
use std::ops::Range;

use eyre::Result;

use super::{backtrack, emit, offer, position, Fragment, FragmentAligner, GapCost};
use crate::pairwise::alignment::Sink;
use crate::{Error, Score};

/// Bounding box of a fragment, half-open on both axes.
#[derive(Clone, Debug)]
struct Span<S> {
    rows: Range<usize>,
    cols: Range<usize>,
    // (row_from, col_from) and (row_to, col_to) in the score domain
    from: (S, S),
    to: (S, S),
}

impl<S: Score> Span<S> {
    fn new(ind: usize, fragment: &Fragment<S>) -> Result<Self> {
        let invalid = |reason: &str| -> eyre::Report {
            Error::invalid_input(format!("fragment {ind} is {reason}")).into()
        };
        if !fragment.is_monotone() {
            return Err(invalid("not monotone"));
        }

        let bounds = (
            fragment.row_from(),
            fragment.row_to(),
            fragment.col_from(),
            fragment.col_to(),
        );
        let (Some(row_from), Some(row_to), Some(col_from), Some(col_to)) = bounds else {
            return Err(invalid("empty"));
        };

        Ok(Self {
            rows: row_from..row_to,
            cols: col_from..col_to,
            from: (position(row_from)?, position(col_from)?),
            to: (position(row_to)?, position(col_to)?),
        })
    }

    /// True if the fragment ends before `other` starts on both axes.
    #[inline(always)]
    fn precedes(&self, other: &Span<S>) -> bool {
        self.rows.end <= other.rows.start && self.cols.end <= other.cols.start
    }

    #[inline(always)]
    fn gap(&self, next: &Span<S>, cost: &GapCost<S>) -> S {
        cost.skip(next.from.0 - self.to.0, next.from.1 - self.to.1)
    }
}

fn spans<S: Score>(fragments: &[Fragment<S>]) -> Result<Vec<Span<S>>> {
    fragments
        .iter()
        .enumerate()
        .map(|(ind, x)| Span::new(ind, x))
        .collect()
}

fn finish<S, K>(
    sink: &mut K,
    fragments: &[Fragment<S>],
    best: &[S],
    backptr: &[Option<usize>],
) where
    S: Score,
    K: Sink<S> + ?Sized,
{
    match backtrack(best, backptr) {
        Some((chain, score)) => {
            let pairs = chain
                .into_iter()
                .flat_map(|x| fragments[x].pairs().iter().copied());
            emit(sink, pairs, score)
        }
        None => emit(sink, [], S::zero()),
    }
}

/// Sweep-line fragment chaining.
///
/// Fragments produce two events: the top one at `row_from`, where the best predecessor is
/// looked up, and the bottom one at `row_to`, where the fragment becomes a predecessor for
/// everything below. Bottom events are processed before top events of the same row. Available
/// predecessors are indexed by their `col_to`, so only fragments ending left of the current one
/// are visited.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Fragments<S> {
    cost: GapCost<S>,
}

impl<S: Score> Fragments<S> {
    pub fn new(cost: GapCost<S>) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> &GapCost<S> {
        &self.cost
    }
}

impl<S: Score> Default for Fragments<S> {
    fn default() -> Self {
        Self::new(GapCost::default())
    }
}

impl<S: Score> FragmentAligner<S> for Fragments<S> {
    fn align<K: Sink<S> + ?Sized>(&self, sink: &mut K, fragments: &[Fragment<S>]) -> Result<()> {
        let spans = spans(fragments)?;
        log::debug!("Chaining {} fragments", spans.len());

        // (row, is top, fragment)
        let mut events = Vec::with_capacity(spans.len() * 2);
        for (ind, span) in spans.iter().enumerate() {
            events.push((span.rows.start, true, ind));
            events.push((span.rows.end, false, ind));
        }
        events.sort_unstable();

        let mut best = vec![S::zero(); spans.len()];
        let mut backptr = vec![None; spans.len()];
        let mut region: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (_, top, ind) in events {
            let span = &spans[ind];
            if !top {
                region.entry(span.cols.end).or_default().push(ind);
                continue;
            }

            let mut candidate = None;
            for pred in region.range(..=span.cols.start).flat_map(|(_, x)| x) {
                let score = best[*pred] + spans[*pred].gap(span, &self.cost);
                offer(&mut candidate, score, *pred);
            }
            match candidate {
                Some((score, pred)) if score > S::zero() => {
                    best[ind] = score + *fragments[ind].score();
                    backptr[ind] = Some(pred);
                }
                _ => best[ind] = *fragments[ind].score(),
            }
        }

        finish(sink, fragments, &best, &backptr);
        Ok(())
    }
}

/// Fragment chaining that tries every eligible predecessor of every fragment.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct FragmentsSquared<S> {
    cost: GapCost<S>,
}

impl<S: Score> FragmentsSquared<S> {
    pub fn new(cost: GapCost<S>) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> &GapCost<S> {
        &self.cost
    }
}

impl<S: Score> Default for FragmentsSquared<S> {
    fn default() -> Self {
        Self::new(GapCost::default())
    }
}

impl<S: Score> FragmentAligner<S> for FragmentsSquared<S> {
    fn align<K: Sink<S> + ?Sized>(&self, sink: &mut K, fragments: &[Fragment<S>]) -> Result<()> {
        let spans = spans(fragments)?;
        log::debug!("Chaining {} fragments, all pairs", spans.len());

        let mut order: Vec<usize> = (0..spans.len()).collect();
        order.sort_by_key(|x| (spans[*x].rows.start, spans[*x].cols.start));

        let mut best = vec![S::zero(); spans.len()];
        let mut backptr = vec![None; spans.len()];
        for (processed, &ind) in order.iter().enumerate() {
            let span = &spans[ind];
            let mut candidate = None;
            for &pred in &order[..processed] {
                if spans[pred].precedes(span) {
                    let score = best[pred] + spans[pred].gap(span, &self.cost);
                    offer(&mut candidate, score, pred);
                }
            }
            match candidate {
                Some((score, pred)) if score > S::zero() => {
                    best[ind] = score + *fragments[ind].score();
                    backptr[ind] = Some(pred);
                }
                _ => best[ind] = *fragments[ind].score(),
            }
        }

        finish(sink, fragments, &best, &backptr);
        Ok(())
    }
}
